mod generation;
mod index;
mod position;
mod routing;
mod units;
mod validate;
mod width;
pub(crate) mod types;
pub use generation::assign_generations;
pub use index::RelationshipIndex;
pub use position::{place_rows, place_unit_tree};
pub use routing::{build_connections, route_auxiliary, route_family};
pub use types::*;
pub use units::{UnitRows, UnitTree, build_curated_rows, build_generation_rows, build_unit_tree};
pub use validate::validate_index;
pub use width::compute_widths;

use crate::config::{LayoutConfig, LayoutStrategy};
use crate::ir::Dataset;
use std::collections::BTreeMap;

/// Runs the whole pipeline: index, generations, units, widths, positions,
/// connections. Pure: nothing is read or written outside the return value.
pub fn compute_layout(dataset: &Dataset, config: &LayoutConfig) -> Layout {
    let index = RelationshipIndex::build(dataset);
    let mut warnings = validate_index(&index);
    let generations = assign_generations(&index);

    let tree = build_unit_tree(&index);
    let (units, positions) = match config.strategy {
        LayoutStrategy::Tree => {
            warnings.extend(tree.warnings);
            let mut roots = tree.roots;
            for root in &mut roots {
                compute_widths(root, config);
            }
            let positions = place_unit_tree(&roots, config);
            (roots, positions)
        }
        LayoutStrategy::Rows => {
            let rows = if dataset.rows.is_empty() {
                warnings.extend(tree.warnings);
                build_generation_rows(&tree.roots, &generations)
            } else {
                let curated = build_curated_rows(&index, &dataset.rows);
                warnings.extend(curated.warnings);
                curated.rows
            };
            let positions = place_rows(&rows, config);
            let mut units: Vec<_> = rows.into_iter().flatten().collect();
            for unit in &mut units {
                compute_widths(unit, config);
            }
            (units, positions)
        }
    };

    let connections = build_connections(
        &dataset.connection_specs(),
        &dataset.links,
        &positions,
        config,
    );
    let (width, height) = canvas_size(&positions, config);

    tracing::debug!(
        strategy = ?config.strategy,
        people = positions.len(),
        units = units.len(),
        connections = connections.len(),
        width,
        height,
        "computed family layout"
    );
    validate::report(&warnings);

    Layout {
        positions,
        connections,
        units,
        generations,
        width,
        height,
        warnings,
    }
}

fn canvas_size(positions: &BTreeMap<String, Position>, config: &LayoutConfig) -> (f32, f32) {
    if positions.is_empty() {
        return (config.padding * 2.0, config.padding * 2.0);
    }
    let mut max_x = 0.0f32;
    let mut max_y = 0.0f32;
    for position in positions.values() {
        max_x = max_x.max(position.x + config.person_width);
        max_y = max_y.max(position.y + config.person_height);
    }
    (max_x + config.padding, max_y + config.padding)
}
