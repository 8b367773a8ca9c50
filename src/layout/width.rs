use crate::config::LayoutConfig;

use super::types::Unit;

/// Post-order pass filling `self_width`, `children_width` and `total_width`.
pub fn compute_widths(unit: &mut Unit, config: &LayoutConfig) -> f32 {
    unit.self_width = config.unit_width(unit.members.len());
    unit.children_width = 0.0;
    if !unit.children.is_empty() {
        let mut total = 0.0;
        for child in &mut unit.children {
            total += compute_widths(child, config);
        }
        total += config.sibling_gap * (unit.children.len() as f32 - 1.0);
        unit.children_width = total;
    }
    unit.total_width = unit.self_width.max(unit.children_width);
    unit.total_width
}
