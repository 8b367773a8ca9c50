use crate::config::LayoutConfig;
use crate::ir::LinkStyle;
use crate::layout::{ConnectionKind, Layout, Position};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// The engine output in the shape a rendering backend consumes.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutDump {
    pub strategy: String,
    pub width: f32,
    pub height: f32,
    pub person_width: f32,
    pub person_height: f32,
    pub positions: BTreeMap<String, Position>,
    pub connections: Vec<ConnectionDump>,
    pub generations: BTreeMap<String, usize>,
    pub warnings: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionDump {
    pub kind: String,
    pub style: LinkStyle,
    pub parents: Vec<String>,
    pub children: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub paths: Vec<Vec<[f32; 2]>>,
}

impl LayoutDump {
    pub fn from_layout(layout: &Layout, config: &LayoutConfig) -> Self {
        let connections = layout
            .connections
            .iter()
            .map(|connection| {
                let (kind, parents, children) = match &connection.kind {
                    ConnectionKind::Family {
                        parents, children, ..
                    } => ("family", parents.clone(), children.clone()),
                    ConnectionKind::Auxiliary { from, to } => {
                        ("auxiliary", vec![from.clone()], vec![to.clone()])
                    }
                };
                ConnectionDump {
                    kind: kind.to_string(),
                    style: connection.style,
                    parents,
                    children,
                    note: connection.note.clone(),
                    paths: connection
                        .paths
                        .iter()
                        .map(|path| path.iter().map(|p| [p.x, p.y]).collect())
                        .collect(),
                }
            })
            .collect();

        LayoutDump {
            strategy: format!("{:?}", config.strategy).to_lowercase(),
            width: layout.width,
            height: layout.height,
            person_width: config.person_width,
            person_height: config.person_height,
            positions: layout.positions.clone(),
            connections,
            generations: layout.generations.clone(),
            warnings: layout.warnings.iter().map(ToString::to_string).collect(),
        }
    }
}

pub fn layout_dump_json(layout: &Layout, config: &LayoutConfig) -> anyhow::Result<String> {
    let dump = LayoutDump::from_layout(layout, config);
    Ok(serde_json::to_string_pretty(&dump)?)
}

pub fn write_layout_dump(path: &Path, layout: &Layout, config: &LayoutConfig) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let dump = LayoutDump::from_layout(layout, config);
    serde_json::to_writer_pretty(writer, &dump)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{AuxLinkSpec, Dataset, Gender};
    use crate::layout::compute_layout;

    #[test]
    fn dump_uses_backend_field_names() {
        let mut data = Dataset::new();
        data.add_person("A", "Anna", Gender::Female);
        data.add_person("C", "Cleo", Gender::Female);
        data.add_person("G", "Gus", Gender::Male);
        data.add_family(&["A"], &["C"]);
        data.links.push(AuxLinkSpec {
            from: "G".to_string(),
            to: "C".to_string(),
            style: LinkStyle::Dashed,
        });
        let config = LayoutConfig::default();
        let layout = compute_layout(&data, &config);
        let json = layout_dump_json(&layout, &config).expect("serializes");
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");

        assert_eq!(value["strategy"], "tree");
        assert_eq!(value["positions"]["C"]["unitId"], "C");
        assert_eq!(value["connections"][0]["kind"], "family");
        assert_eq!(value["connections"][1]["kind"], "auxiliary");
        assert_eq!(value["connections"][1]["style"], "dashed");
        assert_eq!(value["connections"][1]["parents"][0], "G");
        assert_eq!(value["generations"]["C"], 1);
        assert!(value["warnings"].as_array().is_some_and(|w| w.is_empty()));
    }
}
