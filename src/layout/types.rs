use std::collections::BTreeMap;

use serde::Serialize;

use crate::ir::LinkStyle;

/// A couple or a single person, optionally owning the units of their children.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Unit {
    pub id: String,
    pub members: Vec<String>,
    pub children: Vec<Unit>,
    pub self_width: f32,
    pub children_width: f32,
    pub total_width: f32,
}

impl Unit {
    pub fn new(members: Vec<String>) -> Self {
        Self {
            id: members.join("+"),
            members,
            children: Vec::new(),
            self_width: 0.0,
            children_width: 0.0,
            total_width: 0.0,
        }
    }

    pub fn is_couple(&self) -> bool {
        self.members.len() == 2
    }

    /// Pre-order walk over this unit and all of its descendants.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Unit, usize)) {
        self.walk_at(0, visit);
    }

    fn walk_at<'a>(&'a self, depth: usize, visit: &mut impl FnMut(&'a Unit, usize)) {
        visit(self, depth);
        for child in &self.children {
            child.walk_at(depth + 1, visit);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Serialize for Point {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        [self.x, self.y].serialize(serializer)
    }
}

/// Top-left corner of one person's card.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub x: f32,
    pub y: f32,
    pub unit_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ConnectionKind {
    #[serde(rename_all = "camelCase")]
    Family {
        parents: Vec<String>,
        children: Vec<String>,
        /// Bottom-center of each resolved parent card.
        parent_anchors: Vec<Point>,
        /// Top-center of each resolved child card.
        child_anchors: Vec<Point>,
    },
    Auxiliary { from: String, to: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionLayout {
    #[serde(flatten)]
    pub kind: ConnectionKind,
    pub style: LinkStyle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Orthogonal polylines, each drawn as one open path.
    pub paths: Vec<Vec<Point>>,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum LayoutWarning {
    /// A child listed by more than one family. The first family keeps the child.
    AmbiguousParentage { child: String, families: Vec<usize> },
    /// A visible person the unit builder did not reach through their family.
    CoverageGap { person: String },
    /// More than two visible partners offered for one unit. The unit keeps a
    /// couple and each extra partner is laid out as a single.
    ExtraPartners { unit: Vec<String>, extra: Vec<String> },
}

impl std::fmt::Display for LayoutWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LayoutWarning::AmbiguousParentage { child, families } => write!(
                f,
                "{child} is listed as a child of families {families:?}; using family {}",
                families.first().copied().unwrap_or_default()
            ),
            LayoutWarning::CoverageGap { person } => {
                write!(f, "{person} is not covered by the unit layout")
            }
            LayoutWarning::ExtraPartners { unit, extra } => write!(
                f,
                "unit {} cannot hold {}; they are laid out as singles",
                unit.join("+"),
                extra.join(", ")
            ),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Layout {
    pub positions: BTreeMap<String, Position>,
    pub connections: Vec<ConnectionLayout>,
    /// Root units with computed widths. Flat (childless) units for the rows strategy.
    pub units: Vec<Unit>,
    pub generations: BTreeMap<String, usize>,
    pub width: f32,
    pub height: f32,
    pub warnings: Vec<LayoutWarning>,
}

impl Layout {
    pub fn unit(&self, id: &str) -> Option<&Unit> {
        let mut found = None;
        for root in &self.units {
            root.walk(&mut |unit, _| {
                if found.is_none() && unit.id == id {
                    found = Some(unit);
                }
            });
        }
        found
    }
}
