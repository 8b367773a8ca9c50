use kinship::{LayoutStrategy, RenderOptions, render_with_options};
use serde::Deserialize;
use wasm_bindgen::prelude::*;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FamilyRenderOptions {
    theme: Option<String>,
    font_family: Option<String>,
    font_size: Option<f32>,
    strategy: Option<LayoutStrategy>,
    person_width: Option<f32>,
    person_height: Option<f32>,
}

fn build_render_options(options: FamilyRenderOptions) -> RenderOptions {
    let mut render_options = if options.theme.as_deref() == Some("modern") {
        RenderOptions::modern()
    } else {
        RenderOptions::classic()
    };

    if let Some(font_family) = options.font_family {
        render_options.theme.font_family = font_family;
    }
    if let Some(font_size) = options.font_size {
        render_options.theme.font_size = font_size;
    }
    if let Some(strategy) = options.strategy {
        render_options.layout.strategy = strategy;
    }
    if let Some(width) = options.person_width {
        render_options.layout.person_width = width.max(0.0);
    }
    if let Some(height) = options.person_height {
        render_options.layout.person_height = height.max(0.0);
    }

    render_options
}

#[wasm_bindgen]
pub fn render_family_svg(data_json: &str, options_json: Option<String>) -> Result<String, JsValue> {
    let options = if let Some(raw_options) = options_json {
        serde_json::from_str::<FamilyRenderOptions>(&raw_options)
            .map_err(|error| JsValue::from_str(&error.to_string()))?
    } else {
        FamilyRenderOptions::default()
    };

    let render_options = build_render_options(options);
    render_with_options(data_json, render_options)
        .map_err(|error| JsValue::from_str(&error.to_string()))
}

#[cfg(test)]
mod tests {
    use kinship::render_with_options;

    use crate::{FamilyRenderOptions, build_render_options};

    #[test]
    fn renders_couple_with_children() {
        let data = r#"{
            "people": [
                {"id": "a", "name": "Ada", "gender": "F"},
                {"id": "b", "name": "Ben", "gender": "M"},
                {"id": "c", "name": "Cy", "gender": "M"},
                {"id": "d", "name": "Di", "gender": "F"}
            ],
            "families": [{"partners": ["a", "b"], "children": ["c", "d"]}]
        }"#;

        let options: FamilyRenderOptions =
            serde_json::from_str(r#"{"theme": "modern", "strategy": "rows"}"#)
                .expect("options should parse");
        let svg = render_with_options(data, build_render_options(options))
            .expect("family should render");

        assert!(svg.contains("<svg"));
        assert!(svg.contains("Ada"));
        assert!(svg.contains("Di"));
    }
}
