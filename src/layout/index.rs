use std::collections::{BTreeMap, HashMap, HashSet};

use crate::ir::{Dataset, Family, Person};

/// Lookup tables over a dataset with hidden people filtered out.
///
/// Families are referenced by their index in `Dataset::families`. Ids that
/// name no known person never produce an error; they simply resolve to
/// nothing further down the pipeline.
#[derive(Debug)]
pub struct RelationshipIndex<'a> {
    dataset: &'a Dataset,
    people: HashMap<&'a str, &'a Person>,
    hidden: HashSet<&'a str>,
    child_of: HashMap<&'a str, usize>,
    parent_in: HashMap<&'a str, Vec<usize>>,
    /// Children claimed by more than one family, with every claiming family.
    conflicts: BTreeMap<&'a str, Vec<usize>>,
}

impl<'a> RelationshipIndex<'a> {
    pub fn build(dataset: &'a Dataset) -> Self {
        let hidden: HashSet<&str> = dataset.hidden.iter().map(String::as_str).collect();
        let people = dataset
            .people
            .iter()
            .filter(|person| !hidden.contains(person.id.as_str()))
            .map(|person| (person.id.as_str(), person))
            .collect();

        let mut child_of: HashMap<&str, usize> = HashMap::new();
        let mut parent_in: HashMap<&str, Vec<usize>> = HashMap::new();
        let mut conflicts: BTreeMap<&str, Vec<usize>> = BTreeMap::new();

        for (idx, family) in dataset.families.iter().enumerate() {
            for child in &family.children {
                let child = child.as_str();
                if hidden.contains(child) {
                    continue;
                }
                match child_of.get(child).copied() {
                    None => {
                        child_of.insert(child, idx);
                    }
                    Some(first) if first != idx => {
                        conflicts.entry(child).or_insert_with(|| vec![first]).push(idx);
                    }
                    Some(_) => {}
                }
            }
            for partner in &family.partners {
                let partner = partner.as_str();
                if hidden.contains(partner) {
                    continue;
                }
                let families = parent_in.entry(partner).or_default();
                if !families.contains(&idx) {
                    families.push(idx);
                }
            }
        }

        Self {
            dataset,
            people,
            hidden,
            child_of,
            parent_in,
            conflicts,
        }
    }

    pub fn dataset(&self) -> &'a Dataset {
        self.dataset
    }

    pub fn family(&self, idx: usize) -> Option<&'a Family> {
        self.dataset.families.get(idx)
    }

    pub fn person(&self, id: &str) -> Option<&'a Person> {
        self.people.get(id).copied()
    }

    pub fn is_hidden(&self, id: &str) -> bool {
        self.hidden.contains(id)
    }

    /// Known and not hidden.
    pub fn is_visible(&self, id: &str) -> bool {
        self.people.contains_key(id)
    }

    /// Visible people in declaration order.
    pub fn visible_people(&self) -> impl Iterator<Item = &'a Person> + '_ {
        self.dataset
            .people
            .iter()
            .filter(|person| self.is_visible(&person.id))
    }

    pub fn child_of(&self, id: &str) -> Option<usize> {
        self.child_of.get(id).copied()
    }

    pub fn parent_in(&self, id: &str) -> &[usize] {
        self.parent_in.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn visible_partners(&self, idx: usize) -> Vec<&'a str> {
        self.family(idx)
            .map(|family| self.filter_visible(&family.partners))
            .unwrap_or_default()
    }

    pub fn visible_children(&self, idx: usize) -> Vec<&'a str> {
        self.family(idx)
            .map(|family| self.filter_visible(&family.children))
            .unwrap_or_default()
    }

    /// Visible partners of the family this person is a child of.
    pub fn tree_parents(&self, id: &str) -> Vec<&'a str> {
        self.child_of(id)
            .map(|idx| self.visible_partners(idx))
            .unwrap_or_default()
    }

    pub fn conflicts(&self) -> impl Iterator<Item = (&'a str, &[usize])> + '_ {
        self.conflicts
            .iter()
            .map(|(child, families)| (*child, families.as_slice()))
    }

    fn filter_visible(&self, ids: &'a [String]) -> Vec<&'a str> {
        let mut seen = HashSet::new();
        ids.iter()
            .map(String::as_str)
            .filter(|id| self.is_visible(id) && seen.insert(*id))
            .collect()
    }
}
