use std::collections::BTreeMap;

use crate::config::LayoutConfig;
use crate::ir::{AuxLinkSpec, ConnectionSpec};

use super::types::{ConnectionKind, ConnectionLayout, Point, Position};

fn resolve<'s>(ids: &'s [String], positions: &BTreeMap<String, Position>) -> Vec<&'s str> {
    let mut resolved: Vec<&str> = Vec::new();
    for id in ids {
        if positions.contains_key(id) && !resolved.contains(&id.as_str()) {
            resolved.push(id);
        }
    }
    resolved
}

fn bottom_center(position: &Position, config: &LayoutConfig) -> Point {
    Point::new(
        position.x + config.person_width / 2.0,
        position.y + config.person_height,
    )
}

fn top_center(position: &Position, config: &LayoutConfig) -> Point {
    Point::new(position.x + config.person_width / 2.0, position.y)
}

/// Routes every parent-to-children spec whose both sides still resolve, then
/// every auxiliary link. Specs naming only hidden or unplaced people vanish.
pub fn build_connections(
    specs: &[ConnectionSpec],
    links: &[AuxLinkSpec],
    positions: &BTreeMap<String, Position>,
    config: &LayoutConfig,
) -> Vec<ConnectionLayout> {
    let mut connections = Vec::new();
    for spec in specs {
        if let Some(connection) = route_family(spec, positions, config) {
            connections.push(connection);
        }
    }
    for link in links {
        if let Some(connection) = route_auxiliary(link, positions, config) {
            connections.push(connection);
        }
    }
    connections
}

pub fn route_family(
    spec: &ConnectionSpec,
    positions: &BTreeMap<String, Position>,
    config: &LayoutConfig,
) -> Option<ConnectionLayout> {
    let parents = resolve(&spec.parents, positions);
    let children = resolve(&spec.children, positions);
    if parents.is_empty() || children.is_empty() {
        return None;
    }

    let parent_anchors: Vec<Point> = parents
        .iter()
        .map(|id| bottom_center(&positions[*id], config))
        .collect();
    let child_anchors: Vec<Point> = children
        .iter()
        .map(|id| top_center(&positions[*id], config))
        .collect();

    let (left, right) = x_extent(&parent_anchors);
    let anchor_x = (left + right) / 2.0;
    let parent_bottom = parent_anchors
        .iter()
        .map(|p| p.y)
        .fold(f32::NEG_INFINITY, f32::max);
    let child_top = child_anchors
        .iter()
        .map(|p| p.y)
        .fold(f32::INFINITY, f32::min);
    let drop_y = parent_bottom + config.drop_offset;
    let bar_y = (drop_y + child_top) / 2.0;

    let paths = if let [child] = child_anchors.as_slice() {
        vec![vec![
            Point::new(anchor_x, parent_bottom),
            Point::new(anchor_x, bar_y),
            Point::new(child.x, bar_y),
            Point::new(child.x, child.y),
        ]]
    } else {
        let (bar_left, bar_right) = x_extent(&child_anchors);
        let mut paths = Vec::with_capacity(child_anchors.len() + 2);
        paths.push(vec![
            Point::new(anchor_x, parent_bottom),
            Point::new(anchor_x, bar_y),
        ]);
        paths.push(vec![
            Point::new(bar_left.min(anchor_x), bar_y),
            Point::new(bar_right.max(anchor_x), bar_y),
        ]);
        for child in &child_anchors {
            paths.push(vec![Point::new(child.x, bar_y), Point::new(child.x, child.y)]);
        }
        paths
    };

    Some(ConnectionLayout {
        kind: ConnectionKind::Family {
            parents: parents.iter().map(|id| id.to_string()).collect(),
            children: children.iter().map(|id| id.to_string()).collect(),
            parent_anchors,
            child_anchors,
        },
        style: spec.style,
        note: spec.note.clone(),
        paths,
    })
}

pub fn route_auxiliary(
    link: &AuxLinkSpec,
    positions: &BTreeMap<String, Position>,
    config: &LayoutConfig,
) -> Option<ConnectionLayout> {
    let from = positions.get(&link.from)?;
    let to = positions.get(&link.to)?;
    let start = bottom_center(from, config);
    let end = top_center(to, config);
    let mid_y = (start.y + end.y) / 2.0;
    Some(ConnectionLayout {
        kind: ConnectionKind::Auxiliary {
            from: link.from.clone(),
            to: link.to.clone(),
        },
        style: link.style,
        note: None,
        paths: vec![vec![
            start,
            Point::new(start.x, mid_y),
            Point::new(end.x, mid_y),
            end,
        ]],
    })
}

fn x_extent(points: &[Point]) -> (f32, f32) {
    points
        .iter()
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), p| {
            (lo.min(p.x), hi.max(p.x))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::LinkStyle;

    fn config() -> LayoutConfig {
        LayoutConfig {
            person_width: 60.0,
            person_height: 80.0,
            drop_offset: 10.0,
            ..Default::default()
        }
    }

    fn at(positions: &mut BTreeMap<String, Position>, id: &str, x: f32, y: f32) {
        positions.insert(
            id.to_string(),
            Position {
                x,
                y,
                unit_id: id.to_string(),
            },
        );
    }

    fn spec(parents: &[&str], children: &[&str], style: LinkStyle) -> ConnectionSpec {
        ConnectionSpec {
            parents: parents.iter().map(|s| s.to_string()).collect(),
            children: children.iter().map(|s| s.to_string()).collect(),
            style,
            note: None,
        }
    }

    #[test]
    fn single_child_gets_an_elbow() {
        let mut positions = BTreeMap::new();
        at(&mut positions, "A", 0.0, 0.0);
        at(&mut positions, "B", 70.0, 0.0);
        at(&mut positions, "C", 100.0, 200.0);
        let connection = route_family(&spec(&["A", "B"], &["C"], LinkStyle::Normal), &positions, &config())
            .expect("both sides resolve");
        // anchor between centers 30 and 100, bar halfway between 90 and 200
        assert_eq!(
            connection.paths,
            vec![vec![
                Point::new(65.0, 80.0),
                Point::new(65.0, 145.0),
                Point::new(130.0, 145.0),
                Point::new(130.0, 200.0),
            ]]
        );
    }

    #[test]
    fn many_children_share_one_bar() {
        let mut positions = BTreeMap::new();
        at(&mut positions, "P", 80.0, 0.0);
        at(&mut positions, "C1", 0.0, 200.0);
        at(&mut positions, "C2", 80.0, 200.0);
        at(&mut positions, "C3", 160.0, 200.0);
        let connection = route_family(
            &spec(&["P"], &["C1", "C2", "C3"], LinkStyle::Normal),
            &positions,
            &config(),
        )
        .expect("both sides resolve");
        assert_eq!(connection.paths.len(), 5);
        assert_eq!(connection.paths[0], vec![Point::new(110.0, 80.0), Point::new(110.0, 145.0)]);
        assert_eq!(connection.paths[1], vec![Point::new(30.0, 145.0), Point::new(190.0, 145.0)]);
        for (drop, x) in connection.paths[2..].iter().zip([30.0, 110.0, 190.0]) {
            assert_eq!(drop, &vec![Point::new(x, 145.0), Point::new(x, 200.0)]);
        }
    }

    #[test]
    fn dashed_style_keeps_geometry() {
        let mut positions = BTreeMap::new();
        at(&mut positions, "A", 0.0, 0.0);
        at(&mut positions, "C", 40.0, 200.0);
        let normal = route_family(&spec(&["A"], &["C"], LinkStyle::Normal), &positions, &config())
            .expect("normal link");
        let dashed = route_family(&spec(&["A"], &["C"], LinkStyle::Dashed), &positions, &config())
            .expect("dashed link");
        assert_eq!(dashed.style, LinkStyle::Dashed);
        assert_eq!(normal.paths, dashed.paths);
        assert_eq!(dashed.paths[0].len(), 4);
    }

    #[test]
    fn unresolved_sides_emit_nothing() {
        let mut positions = BTreeMap::new();
        at(&mut positions, "A", 0.0, 0.0);
        let specs = vec![
            spec(&["A"], &["hidden"], LinkStyle::Normal),
            spec(&["ghost"], &["A"], LinkStyle::Normal),
        ];
        let links = vec![AuxLinkSpec {
            from: "A".to_string(),
            to: "ghost".to_string(),
            style: LinkStyle::Dashed,
        }];
        assert!(build_connections(&specs, &links, &positions, &config()).is_empty());
    }

    #[test]
    fn partially_resolved_spec_keeps_what_exists() {
        let mut positions = BTreeMap::new();
        at(&mut positions, "A", 0.0, 0.0);
        at(&mut positions, "C", 0.0, 200.0);
        let connection = route_family(
            &spec(&["A", "hidden"], &["C", "C", "gone"], LinkStyle::Normal),
            &positions,
            &config(),
        )
        .expect("one parent and one child remain");
        let ConnectionKind::Family { parents, children, .. } = &connection.kind else {
            panic!("expected a family connection");
        };
        assert_eq!(parents, &vec!["A".to_string()]);
        assert_eq!(children, &vec!["C".to_string()]);
    }

    #[test]
    fn auxiliary_link_is_a_three_segment_elbow() {
        let mut positions = BTreeMap::new();
        at(&mut positions, "G", 200.0, 0.0);
        at(&mut positions, "C", 0.0, 200.0);
        let link = AuxLinkSpec {
            from: "G".to_string(),
            to: "C".to_string(),
            style: LinkStyle::Dashed,
        };
        let connection = route_auxiliary(&link, &positions, &config()).expect("both ends exist");
        assert_eq!(
            connection.paths[0],
            vec![
                Point::new(230.0, 80.0),
                Point::new(230.0, 140.0),
                Point::new(30.0, 140.0),
                Point::new(30.0, 200.0),
            ]
        );
        assert_eq!(connection.style, LinkStyle::Dashed);
    }
}
