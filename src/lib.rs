#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod ir;
pub mod layout;
pub mod layout_dump;
pub mod parser;
pub mod render;
pub mod theme;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, LayoutConfig, LayoutStrategy, RenderConfig, load_config};
pub use ir::{AuxLinkSpec, ConnectionSpec, Dataset, Family, Gender, LinkStyle, Person};
pub use layout::{Layout, LayoutWarning, compute_layout};
pub use parser::{DataError, load_dataset, parse_dataset};
pub use render::render_svg;
pub use theme::Theme;

/// Theme and layout settings for one-call rendering.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub theme: Theme,
    pub layout: LayoutConfig,
}

impl RenderOptions {
    pub fn classic() -> Self {
        Self {
            theme: Theme::classic(),
            layout: LayoutConfig::default(),
        }
    }

    pub fn modern() -> Self {
        Self {
            theme: Theme::modern(),
            layout: LayoutConfig::default(),
        }
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::classic()
    }
}

/// Parse a dataset, lay it out and render it to an SVG string.
pub fn render_with_options(input: &str, options: RenderOptions) -> anyhow::Result<String> {
    let dataset = parse_dataset(input)?;
    let layout = compute_layout(&dataset, &options.layout);
    Ok(render_svg(&dataset, &layout, &options.theme, &options.layout))
}
