use std::collections::BTreeMap;

use crate::config::LayoutConfig;

use super::types::{Position, Unit};

/// Places each root band left to right, then every unit centered in its band
/// with its children as a centered block one row below.
pub fn place_unit_tree(roots: &[Unit], config: &LayoutConfig) -> BTreeMap<String, Position> {
    let mut positions = BTreeMap::new();
    let mut cursor = config.padding;
    for root in roots {
        place_unit(root, cursor, config.padding, config, &mut positions);
        cursor += root.total_width + config.family_gap;
    }
    positions
}

fn place_unit(
    unit: &Unit,
    x: f32,
    y: f32,
    config: &LayoutConfig,
    positions: &mut BTreeMap<String, Position>,
) {
    let center_x = x + unit.total_width / 2.0;
    place_members(unit, center_x - unit.self_width / 2.0, y, config, positions);

    if unit.children.is_empty() {
        return;
    }
    let child_y = y + config.generation_gap;
    let mut cursor = center_x - unit.children_width / 2.0;
    for child in &unit.children {
        place_unit(child, cursor, child_y, config, positions);
        cursor += child.total_width + config.sibling_gap;
    }
}

fn place_members(
    unit: &Unit,
    start_x: f32,
    y: f32,
    config: &LayoutConfig,
    positions: &mut BTreeMap<String, Position>,
) {
    let mut x = start_x;
    for member in &unit.members {
        positions.insert(
            member.clone(),
            Position {
                x,
                y,
                unit_id: unit.id.clone(),
            },
        );
        x += config.person_width + config.couple_gap;
    }
}

/// Left-aligned sweep per row; no centering.
pub fn place_rows(rows: &[Vec<Unit>], config: &LayoutConfig) -> BTreeMap<String, Position> {
    let mut positions = BTreeMap::new();
    for (row_idx, row) in rows.iter().enumerate() {
        let y = config.padding + row_idx as f32 * config.generation_gap;
        let mut x = config.padding;
        for unit in row {
            place_members(unit, x, y, config, &mut positions);
            x += config.unit_width(unit.members.len()) + config.family_gap;
        }
    }
    positions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::width::compute_widths;

    const EPS: f32 = 1e-3;

    fn config() -> LayoutConfig {
        LayoutConfig {
            person_width: 60.0,
            couple_gap: 10.0,
            sibling_gap: 20.0,
            family_gap: 40.0,
            generation_gap: 100.0,
            padding: 10.0,
            ..Default::default()
        }
    }

    fn unit(members: &[&str], children: Vec<Unit>) -> Unit {
        let mut unit = Unit::new(members.iter().map(|m| m.to_string()).collect());
        unit.children = children;
        unit
    }

    fn center(positions: &BTreeMap<String, Position>, ids: &[&str], width: f32) -> f32 {
        let first = positions[ids[0]].x;
        let last = positions[ids[ids.len() - 1]].x;
        (first + last + width) / 2.0
    }

    #[test]
    fn single_child_centers_under_couple() {
        let config = config();
        let mut root = unit(&["A", "B"], vec![unit(&["C"], vec![])]);
        compute_widths(&mut root, &config);
        let positions = place_unit_tree(std::slice::from_ref(&root), &config);

        assert_eq!(positions["A"].x, 10.0);
        assert_eq!(positions["B"].x, 80.0);
        assert_eq!(positions["A"].y, 10.0);
        assert_eq!(positions["C"].y, 110.0);
        let parents = center(&positions, &["A", "B"], 60.0);
        let child = center(&positions, &["C"], 60.0);
        assert!((parents - child).abs() < EPS);
        assert_eq!(positions["C"].unit_id, "C");
        assert_eq!(positions["B"].unit_id, "A+B");
    }

    #[test]
    fn narrow_parent_centers_over_wide_children() {
        let config = config();
        let kids = vec![unit(&["C1"], vec![]), unit(&["C2"], vec![]), unit(&["C3"], vec![])];
        let mut root = unit(&["P"], kids);
        compute_widths(&mut root, &config);
        let positions = place_unit_tree(std::slice::from_ref(&root), &config);

        assert_eq!(positions["C1"].x, 10.0);
        assert_eq!(positions["C2"].x, 90.0);
        assert_eq!(positions["C3"].x, 170.0);
        let parent = center(&positions, &["P"], 60.0);
        let block = center(&positions, &["C1", "C3"], 60.0);
        assert!((parent - block).abs() < EPS);
        assert!((parent - 120.0).abs() < EPS);
    }

    #[test]
    fn roots_are_separated_by_family_gap() {
        let config = config();
        let mut roots = vec![unit(&["A", "B"], vec![]), unit(&["C"], vec![])];
        for root in &mut roots {
            compute_widths(root, &config);
        }
        let positions = place_unit_tree(&roots, &config);
        assert_eq!(positions["C"].x, 10.0 + 130.0 + 40.0);
    }

    #[test]
    fn rows_sweep_left_to_right() {
        let config = config();
        let rows = vec![
            vec![unit(&["A", "B"], vec![]), unit(&["C"], vec![])],
            vec![unit(&["D"], vec![])],
        ];
        let positions = place_rows(&rows, &config);
        assert_eq!(positions["A"].x, 10.0);
        assert_eq!(positions["B"].x, 80.0);
        assert_eq!(positions["C"].x, 180.0);
        assert_eq!(positions["D"].x, 10.0);
        assert_eq!(positions["D"].y, 110.0);
    }
}
