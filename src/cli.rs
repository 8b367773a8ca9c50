use crate::config::{LayoutStrategy, load_config};
use crate::ir::Dataset;
use crate::layout::compute_layout;
use crate::layout_dump::{layout_dump_json, write_layout_dump};
use crate::parser::{load_dataset, parse_dataset};
use crate::render::{render_svg, write_output_svg};
use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "kinship", version, about = "Family tree layout and SVG renderer")]
pub struct Args {
    /// Input family data (.json / .json5) or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file (svg/png/json). Defaults to stdout for SVG and JSON if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "svg")]
    pub output_format: OutputFormat,

    /// Config JSON file (theme, themeVariables, layout)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Layout strategy, overrides the config file
    #[arg(short = 's', long = "strategy", value_enum)]
    pub strategy: Option<LayoutStrategy>,

    /// Also write the computed layout as JSON to this path
    #[arg(long = "dumpLayout")]
    pub dump_layout: Option<PathBuf>,

    /// Log pipeline details to stderr
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum OutputFormat {
    Svg,
    Png,
    Json,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let mut config = load_config(args.config.as_deref())?;
    if let Some(strategy) = args.strategy {
        config.layout.strategy = strategy;
    }

    let dataset = read_dataset(args.input.as_deref())?;
    let layout = compute_layout(&dataset, &config.layout);
    if !layout.warnings.is_empty() {
        tracing::info!(count = layout.warnings.len(), "layout finished with data warnings");
    }

    if let Some(path) = args.dump_layout.as_deref() {
        write_layout_dump(path, &layout, &config.layout)?;
    }

    match args.output_format {
        OutputFormat::Svg => {
            let svg = render_svg(&dataset, &layout, &config.theme, &config.layout);
            write_output_svg(&svg, args.output.as_deref())?;
        }
        OutputFormat::Json => {
            let json = layout_dump_json(&layout, &config.layout)?;
            match args.output.as_deref() {
                Some(path) => std::fs::write(path, json)?,
                None => println!("{json}"),
            }
        }
        #[cfg(feature = "png")]
        OutputFormat::Png => {
            let output = ensure_output(&args.output, "png")?;
            let svg = render_svg(&dataset, &layout, &config.theme, &config.layout);
            let mut render = config.render.clone();
            render.width = layout.width;
            render.height = layout.height;
            crate::render::write_output_png(&svg, &output, &render, &config.theme)?;
        }
        #[cfg(not(feature = "png"))]
        OutputFormat::Png => {
            return Err(anyhow::anyhow!(
                "PNG output requires the `png` feature"
            ));
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "kinship=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .without_time()
        .try_init();
}

fn read_dataset(path: Option<&Path>) -> Result<Dataset> {
    if let Some(path) = path
        && path != Path::new("-")
    {
        return load_dataset(path);
    }
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(parse_dataset(&buf)?)
}

#[cfg_attr(not(feature = "png"), allow(dead_code))]
fn ensure_output(output: &Option<PathBuf>, ext: &str) -> Result<PathBuf> {
    if let Some(path) = output {
        return Ok(path.clone());
    }
    Err(anyhow::anyhow!(
        "Output path required for {} output",
        ext
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_flags() {
        let args = Args::try_parse_from([
            "kinship",
            "-i",
            "family.json",
            "-e",
            "json",
            "--strategy",
            "rows",
            "--dumpLayout",
            "layout.json",
        ])
        .expect("valid flags");
        assert_eq!(args.input.as_deref(), Some(Path::new("family.json")));
        assert!(matches!(args.output_format, OutputFormat::Json));
        assert_eq!(args.strategy, Some(LayoutStrategy::Rows));
        assert_eq!(args.dump_layout.as_deref(), Some(Path::new("layout.json")));
        assert!(!args.verbose);
    }

    #[test]
    fn png_needs_an_output_path() {
        assert!(ensure_output(&None, "png").is_err());
        let path = PathBuf::from("tree.png");
        assert_eq!(ensure_output(&Some(path.clone()), "png").expect("given"), path);
    }
}
