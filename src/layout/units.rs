use std::collections::{BTreeMap, HashSet};

use crate::ir::CuratedRow;

use super::index::RelationshipIndex;
use super::types::{LayoutWarning, Unit};

/// Builds the nested unit tree. Every visible person ends up in exactly one
/// unit; the first unit to reach a family or person owns it.
struct TreeBuilder<'i, 'a> {
    index: &'i RelationshipIndex<'a>,
    placed: HashSet<&'a str>,
    claimed: HashSet<usize>,
    spilled: HashSet<&'a str>,
    warnings: Vec<LayoutWarning>,
}

impl<'i, 'a> TreeBuilder<'i, 'a> {
    fn new(index: &'i RelationshipIndex<'a>) -> Self {
        Self {
            index,
            placed: HashSet::new(),
            claimed: HashSet::new(),
            spilled: HashSet::new(),
            warnings: Vec::new(),
        }
    }

    /// First family the person is a partner in that no other unit owns yet.
    fn primary_family(&self, id: &str) -> Option<usize> {
        self.index
            .parent_in(id)
            .iter()
            .copied()
            .find(|family| !self.claimed.contains(family))
    }

    fn is_root_anchor(&self, id: &str) -> bool {
        if self.placed.contains(id) || !self.index.tree_parents(id).is_empty() {
            return false;
        }
        // A spouse with recorded parents pulls the couple down into that subtree.
        match self.primary_family(id) {
            Some(family) => self
                .index
                .visible_partners(family)
                .into_iter()
                .all(|partner| partner == id || self.index.tree_parents(partner).is_empty()),
            None => true,
        }
    }

    fn build(&mut self, id: &'a str) -> Unit {
        let family = self.primary_family(id);
        let mut members: Vec<&'a str> = Vec::new();
        if let Some(family) = family {
            self.claimed.insert(family);
            members.extend(
                self.index
                    .visible_partners(family)
                    .into_iter()
                    .filter(|partner| !self.placed.contains(partner)),
            );
        }
        if !members.contains(&id) {
            members.insert(0, id);
        }
        if members.len() > 2 {
            let partner = members.iter().copied().find(|member| *member != id);
            let (kept, extra): (Vec<&'a str>, Vec<&'a str>) = members
                .into_iter()
                .partition(|member| *member == id || Some(*member) == partner);
            self.spilled.extend(extra.iter().copied());
            self.warnings.push(LayoutWarning::ExtraPartners {
                unit: kept.iter().map(|member| member.to_string()).collect(),
                extra: extra.iter().map(|member| member.to_string()).collect(),
            });
            members = kept;
        }
        self.placed.extend(members.iter().copied());

        let mut unit = Unit::new(members.iter().map(|member| member.to_string()).collect());
        let Some(family) = family else {
            return unit;
        };
        for child in self.index.visible_children(family) {
            if self.placed.contains(child) || self.index.child_of(child) != Some(family) {
                continue;
            }
            let child_unit = self.build(child);
            unit.children.push(child_unit);
        }
        unit
    }
}

pub struct UnitTree {
    pub roots: Vec<Unit>,
    pub warnings: Vec<LayoutWarning>,
}

/// Recursive strategy: couples and singles nested by parent-child families.
pub fn build_unit_tree(index: &RelationshipIndex<'_>) -> UnitTree {
    let mut builder = TreeBuilder::new(index);
    let mut roots = Vec::new();

    for person in index.visible_people() {
        if builder.is_root_anchor(&person.id) {
            roots.push(builder.build(&person.id));
        }
    }

    for person in index.visible_people() {
        let id = person.id.as_str();
        if builder.placed.contains(id) {
            continue;
        }
        let family_laid_out = !index.parent_in(id).is_empty() && builder.primary_family(id).is_none();
        let reported = builder.spilled.contains(id);
        if !reported && (!index.tree_parents(id).is_empty() || family_laid_out) {
            builder.warnings.push(LayoutWarning::CoverageGap {
                person: id.to_string(),
            });
        }
        roots.push(builder.build(id));
    }

    UnitTree {
        roots,
        warnings: builder.warnings,
    }
}

pub struct UnitRows {
    pub rows: Vec<Vec<Unit>>,
    pub warnings: Vec<LayoutWarning>,
}

/// Rows strategy with hand-authored rows. Hidden, unknown and repeated ids are
/// dropped; visible people missing from every row are reported. An entry
/// naming more than two people keeps the first two as a couple and places the
/// rest as singles right after it.
pub fn build_curated_rows(index: &RelationshipIndex<'_>, curated: &[CuratedRow]) -> UnitRows {
    let mut placed: HashSet<&str> = HashSet::new();
    let mut rows = Vec::with_capacity(curated.len());
    let mut warnings = Vec::new();

    for row in curated {
        let mut units = Vec::new();
        for ids in row {
            let mut members = Vec::new();
            for id in ids {
                if index.is_visible(id) && placed.insert(id.as_str()) {
                    members.push(id.clone());
                }
            }
            if members.len() > 2 {
                let extra = members.split_off(2);
                warnings.push(LayoutWarning::ExtraPartners {
                    unit: members.clone(),
                    extra: extra.clone(),
                });
                units.push(Unit::new(members));
                units.extend(extra.into_iter().map(|id| Unit::new(vec![id])));
            } else if !members.is_empty() {
                units.push(Unit::new(members));
            }
        }
        rows.push(units);
    }

    warnings.extend(
        index
            .visible_people()
            .filter(|person| !placed.contains(person.id.as_str()))
            .map(|person| LayoutWarning::CoverageGap {
                person: person.id.clone(),
            }),
    );

    UnitRows { rows, warnings }
}

/// Rows strategy without curated data: the tree's units, flattened and
/// grouped by the deepest generation among their members.
pub fn build_generation_rows(roots: &[Unit], generations: &BTreeMap<String, usize>) -> Vec<Vec<Unit>> {
    let mut by_generation: BTreeMap<usize, Vec<Unit>> = BTreeMap::new();
    for root in roots {
        root.walk(&mut |unit, _| {
            let generation = unit
                .members
                .iter()
                .filter_map(|member| generations.get(member).copied())
                .max()
                .unwrap_or(0);
            by_generation
                .entry(generation)
                .or_default()
                .push(Unit::new(unit.members.clone()));
        });
    }
    by_generation.into_values().collect()
}
