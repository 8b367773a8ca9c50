use std::collections::{BTreeMap, HashSet, VecDeque};

use super::index::RelationshipIndex;

/// Breadth-first depth from the root ancestors (people with no recorded
/// parents). Visible people no root reaches default to generation 0.
pub fn assign_generations(index: &RelationshipIndex<'_>) -> BTreeMap<String, usize> {
    let mut generations: BTreeMap<String, usize> = BTreeMap::new();
    let mut visited: HashSet<&str> = HashSet::new();
    let mut queue: VecDeque<(&str, usize)> = index
        .visible_people()
        .filter(|person| index.child_of(&person.id).is_none())
        .map(|person| (person.id.as_str(), 0))
        .collect();

    while let Some((id, generation)) = queue.pop_front() {
        if !visited.insert(id) {
            continue;
        }
        generations.insert(id.to_string(), generation);
        for &family in index.parent_in(id) {
            for child in index.visible_children(family) {
                if !visited.contains(child) {
                    queue.push_back((child, generation + 1));
                }
            }
        }
    }

    for person in index.visible_people() {
        generations.entry(person.id.clone()).or_insert(0);
    }

    generations
}
