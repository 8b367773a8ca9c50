use crate::theme::Theme;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum LayoutStrategy {
    /// Nested couple/single units with children centered under parents.
    #[default]
    Tree,
    /// Flat left-aligned rows, curated in the dataset or derived from generations.
    Rows,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub person_width: f32,
    pub person_height: f32,
    pub couple_gap: f32,
    pub sibling_gap: f32,
    pub family_gap: f32,
    /// Vertical distance between the tops of consecutive rows.
    pub generation_gap: f32,
    pub padding: f32,
    /// Length of the vertical segment below a parent before any bar may start.
    pub drop_offset: f32,
    pub strategy: LayoutStrategy,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            person_width: 100.0,
            person_height: 130.0,
            couple_gap: 10.0,
            sibling_gap: 20.0,
            family_gap: 40.0,
            generation_gap: 200.0,
            padding: 40.0,
            drop_offset: 15.0,
            strategy: LayoutStrategy::Tree,
        }
    }
}

impl LayoutConfig {
    /// Footprint of `members` cards placed side by side as one unit.
    pub fn unit_width(&self, members: usize) -> f32 {
        if members == 0 {
            return 0.0;
        }
        members as f32 * self.person_width + (members as f32 - 1.0) * self.couple_gap
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    pub width: f32,
    pub height: f32,
    pub background: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 800.0,
            background: "#FFFFFF".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub theme: Theme,
    pub layout: LayoutConfig,
    pub render: RenderConfig,
}

impl Default for Config {
    fn default() -> Self {
        let theme = Theme::classic();
        let render = RenderConfig {
            background: theme.background.clone(),
            ..Default::default()
        };
        Self {
            theme,
            layout: LayoutConfig::default(),
            render,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThemeVariables {
    font_family: Option<String>,
    font_size: Option<f32>,
    card_fill: Option<String>,
    text_color: Option<String>,
    alias_text_color: Option<String>,
    male_border: Option<String>,
    female_border: Option<String>,
    photo_fill: Option<String>,
    photo_marker: Option<String>,
    line_color: Option<String>,
    dash_pattern: Option<String>,
    background: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LayoutConfigFile {
    person_width: Option<f32>,
    person_height: Option<f32>,
    couple_gap: Option<f32>,
    sibling_gap: Option<f32>,
    family_gap: Option<f32>,
    generation_gap: Option<f32>,
    padding: Option<f32>,
    drop_offset: Option<f32>,
    strategy: Option<LayoutStrategy>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    theme_variables: Option<ThemeVariables>,
    layout: Option<LayoutConfigFile>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let contents = std::fs::read_to_string(path)?;
    parse_config(&contents)
}

pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let mut config = Config::default();
    let parsed: ConfigFile = serde_json::from_str(contents)?;

    if let Some(theme_name) = parsed.theme.as_deref() {
        match theme_name {
            "modern" => config.theme = Theme::modern(),
            "classic" | "default" => config.theme = Theme::classic(),
            other => tracing::warn!(theme = other, "unknown theme name, keeping default"),
        }
    }

    if let Some(vars) = parsed.theme_variables {
        if let Some(v) = vars.font_family {
            config.theme.font_family = v;
        }
        if let Some(v) = vars.font_size {
            config.theme.font_size = v;
        }
        if let Some(v) = vars.card_fill {
            config.theme.card_fill = v;
        }
        if let Some(v) = vars.text_color {
            config.theme.text_color = v;
        }
        if let Some(v) = vars.alias_text_color {
            config.theme.alias_text_color = v;
        }
        if let Some(v) = vars.male_border {
            config.theme.male_border = v;
        }
        if let Some(v) = vars.female_border {
            config.theme.female_border = v;
        }
        if let Some(v) = vars.photo_fill {
            config.theme.photo_fill = v;
        }
        if let Some(v) = vars.photo_marker {
            config.theme.photo_marker = v;
        }
        if let Some(v) = vars.line_color {
            config.theme.line_color = v;
        }
        if let Some(v) = vars.dash_pattern {
            config.theme.dash_pattern = v;
        }
        if let Some(v) = vars.background {
            config.theme.background = v;
        }
    }

    if let Some(layout) = parsed.layout {
        if let Some(v) = layout.person_width {
            config.layout.person_width = v.max(0.0);
        }
        if let Some(v) = layout.person_height {
            config.layout.person_height = v.max(0.0);
        }
        if let Some(v) = layout.couple_gap {
            config.layout.couple_gap = v.max(0.0);
        }
        if let Some(v) = layout.sibling_gap {
            config.layout.sibling_gap = v.max(0.0);
        }
        if let Some(v) = layout.family_gap {
            config.layout.family_gap = v.max(0.0);
        }
        if let Some(v) = layout.generation_gap {
            config.layout.generation_gap = v.max(0.0);
        }
        if let Some(v) = layout.padding {
            config.layout.padding = v.max(0.0);
        }
        if let Some(v) = layout.drop_offset {
            config.layout.drop_offset = v.max(0.0);
        }
        if let Some(v) = layout.strategy {
            config.layout.strategy = v;
        }
    }

    config.render.background = config.theme.background.clone();

    Ok(config)
}
