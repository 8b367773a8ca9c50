use crate::config::LayoutConfig;
#[cfg(feature = "png")]
use crate::config::RenderConfig;
use crate::ir::{Dataset, LinkStyle, Person};
use crate::layout::{ConnectionKind, ConnectionLayout, Layout, Point, Position};
use crate::theme::Theme;
use anyhow::Result;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

static UNSAFE_ID_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^A-Za-z0-9_-]+").unwrap());

const CARD_RADIUS: f32 = 6.0;
const CARD_STROKE: f32 = 2.0;
const PHOTO_INSET: f32 = 8.0;
const MARKER_RADIUS: f32 = 4.0;

pub fn render_svg(dataset: &Dataset, layout: &Layout, theme: &Theme, config: &LayoutConfig) -> String {
    let mut svg = String::new();
    let width = layout.width;
    let height = layout.height;

    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">",
    ));

    svg.push_str(&format!(
        "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
        theme.background
    ));

    for connection in &layout.connections {
        svg.push_str(&connection_svg(connection, theme));
    }

    for (id, position) in &layout.positions {
        let Some(person) = dataset.person(id) else {
            continue;
        };
        svg.push_str(&card_svg(person, position, theme, config));
    }

    svg.push_str("</svg>");
    svg
}

fn connection_svg(connection: &ConnectionLayout, theme: &Theme) -> String {
    let class = match &connection.kind {
        ConnectionKind::Family { .. } => "family",
        ConnectionKind::Auxiliary { .. } => "auxiliary",
    };
    let dash = match connection.style {
        LinkStyle::Normal => String::new(),
        LinkStyle::Dashed => format!(" stroke-dasharray=\"{}\"", theme.dash_pattern),
    };
    let mut out = format!("<g class=\"connection {class}\">");
    if let Some(note) = &connection.note {
        out.push_str(&format!("<title>{}</title>", escape_xml(note)));
    }
    for path in &connection.paths {
        out.push_str(&format!(
            "<path d=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"1.5\"{dash}/>",
            points_to_path(path),
            theme.line_color
        ));
    }
    out.push_str("</g>");
    out
}

fn card_svg(person: &Person, position: &Position, theme: &Theme, config: &LayoutConfig) -> String {
    let (x, y) = (position.x, position.y);
    let (w, h) = (config.person_width, config.person_height);
    let center_x = x + w / 2.0;
    let line = theme.font_size * 1.3;
    let text_lines = if person.aka.is_some() { 2.0 } else { 1.0 };
    let photo_w = (w - PHOTO_INSET * 2.0).max(0.0);
    let photo_h = (h - PHOTO_INSET * 2.0 - line * text_lines).max(0.0);

    let mut out = format!(
        "<g id=\"person-{}\" class=\"person\">",
        sanitize_id(&person.id)
    );
    out.push_str(&format!(
        "<rect x=\"{x:.2}\" y=\"{y:.2}\" width=\"{w:.2}\" height=\"{h:.2}\" rx=\"{CARD_RADIUS}\" ry=\"{CARD_RADIUS}\" fill=\"{}\" stroke=\"{}\" stroke-width=\"{CARD_STROKE}\"/>",
        theme.card_fill,
        theme.border_for(person.gender)
    ));
    out.push_str(&format!(
        "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{photo_w:.2}\" height=\"{photo_h:.2}\" fill=\"{}\"/>",
        x + PHOTO_INSET,
        y + PHOTO_INSET,
        theme.photo_fill
    ));

    let name_y = y + PHOTO_INSET + photo_h + line;
    out.push_str(&format!(
        "<text x=\"{center_x:.2}\" y=\"{name_y:.2}\" text-anchor=\"middle\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\">{}</text>",
        theme.font_family,
        theme.font_size,
        theme.text_color,
        escape_xml(&person.name)
    ));
    if let Some(aka) = &person.aka {
        out.push_str(&format!(
            "<text x=\"{center_x:.2}\" y=\"{:.2}\" text-anchor=\"middle\" font-family=\"{}\" font-size=\"{:.1}\" font-style=\"italic\" fill=\"{}\">{}</text>",
            name_y + line,
            theme.font_family,
            theme.font_size * 0.85,
            theme.alias_text_color,
            escape_xml(aka)
        ));
    }
    if person.in_photo {
        out.push_str(&format!(
            "<circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"{MARKER_RADIUS}\" fill=\"{}\"><title>in photo</title></circle>",
            x + w - PHOTO_INSET,
            y + PHOTO_INSET,
            theme.photo_marker
        ));
    }
    out.push_str("</g>");
    out
}

fn points_to_path(points: &[Point]) -> String {
    if points.is_empty() {
        return String::new();
    }
    let mut d = String::new();
    d.push_str(&format!("M {:.2} {:.2}", points[0].x, points[0].y));
    for point in points.iter().skip(1) {
        d.push_str(&format!(" L {:.2} {:.2}", point.x, point.y));
    }
    d
}

fn sanitize_id(id: &str) -> String {
    UNSAFE_ID_CHARS.replace_all(id, "_").into_owned()
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
        }
        None => {
            print!("{}", svg);
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
pub fn write_output_png(svg: &str, output: &Path, render_cfg: &RenderConfig, theme: &Theme) -> Result<()> {
    let mut opt = usvg::Options::default();
    if let Some(family) = theme.font_family.split(',').next() {
        opt.font_family = family.trim().trim_matches('"').to_string();
    }
    opt.default_size = usvg::Size::from_wh(render_cfg.width, render_cfg.height)
        .ok_or_else(|| anyhow::anyhow!("Invalid render size"))?;

    let tree = usvg::Tree::from_str(svg, &opt)?;
    let size = tree.size().to_int_size();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate pixmap"))?;

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(&tree, resvg::tiny_skia::Transform::default(), &mut pixmap_mut);
    pixmap.save_png(output)?;
    Ok(())
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::Gender;
    use crate::layout::compute_layout;

    fn sample() -> Dataset {
        let mut data = Dataset::new();
        data.add_person("anna", "Anna <Nan>", Gender::Female).in_photo = true;
        data.add_person("bert", "Bert", Gender::Male).aka = Some("Bertie".to_string());
        data.add_person("cleo j", "Cleo", Gender::Female);
        data.add_family(&["anna", "bert"], &["cleo j"]).style = LinkStyle::Dashed;
        data
    }

    #[test]
    fn render_svg_basic() {
        let data = sample();
        let config = LayoutConfig::default();
        let theme = Theme::classic();
        let layout = compute_layout(&data, &config);
        let svg = render_svg(&data, &layout, &theme, &config);
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains("Anna &lt;Nan&gt;"));
        assert!(svg.contains("Bertie"));
        assert!(svg.contains("id=\"person-cleo_j\""));
        assert!(svg.contains(&format!("stroke-dasharray=\"{}\"", theme.dash_pattern)));
        assert!(svg.contains(&theme.female_border));
        assert!(svg.contains("<circle"));
    }

    #[test]
    fn hidden_people_are_not_drawn() {
        let mut data = sample();
        data.hidden.push("bert".to_string());
        let config = LayoutConfig::default();
        let theme = Theme::modern();
        let layout = compute_layout(&data, &config);
        let svg = render_svg(&data, &layout, &theme, &config);
        assert!(!svg.contains("person-bert"));
        assert!(!svg.contains(&theme.male_border));
    }

    #[test]
    fn path_data_uses_absolute_moves() {
        let d = points_to_path(&[Point::new(0.0, 1.0), Point::new(2.5, 1.0)]);
        assert_eq!(d, "M 0.00 1.00 L 2.50 1.00");
        assert_eq!(points_to_path(&[]), "");
    }
}
