use super::index::RelationshipIndex;
use super::types::LayoutWarning;

/// Data-quality checks that can run before any layout work.
pub fn validate_index(index: &RelationshipIndex<'_>) -> Vec<LayoutWarning> {
    index
        .conflicts()
        .map(|(child, families)| LayoutWarning::AmbiguousParentage {
            child: child.to_string(),
            families: families.to_vec(),
        })
        .collect()
}

pub(super) fn report(warnings: &[LayoutWarning]) {
    for warning in warnings {
        tracing::warn!(%warning, "family data");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{Dataset, Gender};

    #[test]
    fn flags_children_with_two_families() {
        let mut data = Dataset::new();
        for id in ["A", "B", "C"] {
            data.add_person(id, id, Gender::Male);
        }
        data.add_family(&["A"], &["C"]);
        data.add_family(&["B"], &["C"]);
        let index = RelationshipIndex::build(&data);
        assert_eq!(
            validate_index(&index),
            vec![LayoutWarning::AmbiguousParentage {
                child: "C".to_string(),
                families: vec![0, 1],
            }]
        );
    }

    #[test]
    fn hidden_duplicate_is_not_ambiguous() {
        let mut data = Dataset::new();
        data.add_person("A", "A", Gender::Male);
        data.add_family(&["A"], &["C"]);
        data.add_family(&["B"], &["C"]);
        data.hidden.push("C".to_string());
        let index = RelationshipIndex::build(&data);
        assert!(validate_index(&index).is_empty());
    }
}
