use crate::ir::Gender;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub font_family: String,
    pub font_size: f32,
    pub card_fill: String,
    pub text_color: String,
    pub alias_text_color: String,
    pub male_border: String,
    pub female_border: String,
    pub photo_fill: String,
    pub photo_marker: String,
    pub line_color: String,
    pub dash_pattern: String,
    pub background: String,
}

impl Theme {
    pub fn classic() -> Self {
        Self {
            font_family: "Georgia, \"Times New Roman\", serif".to_string(),
            font_size: 12.0,
            card_fill: "#FFFDF7".to_string(),
            text_color: "#2B2B2B".to_string(),
            alias_text_color: "#6B6B6B".to_string(),
            male_border: "#4A78B5".to_string(),
            female_border: "#B5527A".to_string(),
            photo_fill: "#ECE6DA".to_string(),
            photo_marker: "#C9A227".to_string(),
            line_color: "#555555".to_string(),
            dash_pattern: "6 4".to_string(),
            background: "#FFFFFF".to_string(),
        }
    }

    pub fn modern() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            font_size: 11.0,
            card_fill: "#F8FAFF".to_string(),
            text_color: "#1C2430".to_string(),
            alias_text_color: "#7A8AA6".to_string(),
            male_border: "#5B8DEF".to_string(),
            female_border: "#E26D9C".to_string(),
            photo_fill: "#EEF2F8".to_string(),
            photo_marker: "#F2B705".to_string(),
            line_color: "#7A8AA6".to_string(),
            dash_pattern: "5 5".to_string(),
            background: "#FFFFFF".to_string(),
        }
    }

    pub fn border_for(&self, gender: Gender) -> &str {
        match gender {
            Gender::Male => &self.male_border,
            Gender::Female => &self.female_border,
        }
    }
}
