use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{ArgAction, Parser};
use tracing_subscriber::EnvFilter;

use areamap::io::FormatRegistry;
use areamap::layout_map;
use areamap::simulation::LayoutConfig;

/// Lay out a map of connected areas as a 2D diagram.
#[derive(Parser, Debug)]
#[command(name = "areamap")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Input map file (.json, .yaml, .yml)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output file for the rendered layout
    #[arg(short, long, default_value = "map.svg")]
    output: PathBuf,

    /// Output format (svg, json); defaults to the output file extension
    #[arg(short, long)]
    format: Option<String>,

    /// Canvas width
    #[arg(long, default_value_t = 2000.0)]
    width: f64,

    /// Canvas height
    #[arg(long, default_value_t = 2000.0)]
    height: f64,

    /// Number of simulation steps
    #[arg(long, default_value_t = 100)]
    iterations: usize,

    /// Seed for initial placement (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Velocity damping per step
    #[arg(long)]
    damping: Option<f64>,

    /// Rest length of the spring between connected areas
    #[arg(long)]
    spring_length: Option<f64>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn layout_config(&self) -> LayoutConfig {
        let mut config = LayoutConfig {
            iterations: self.iterations,
            seed: self.seed,
            ..LayoutConfig::default()
        };
        if let Some(damping) = self.damping {
            config = config.with_damping(damping);
        }
        if let Some(spring_length) = self.spring_length {
            config = config.with_spring_length(spring_length);
        }
        config
    }

    fn check_canvas(&self) -> anyhow::Result<()> {
        for (name, value) in [("width", self.width), ("height", self.height)] {
            anyhow::ensure!(
                value.is_finite() && value > 0.0,
                "canvas {name} must be a positive number, got {value}"
            );
        }
        Ok(())
    }

    /// Explicit `--format`, else the output extension, else svg
    fn output_format(&self) -> String {
        self.format
            .clone()
            .or_else(|| FormatRegistry::extension_from_path(&self.output).map(str::to_string))
            .unwrap_or_else(|| "svg".to_string())
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn generate(cli: &Cli, input: &Path) -> anyhow::Result<()> {
    cli.check_canvas()?;
    let registry = FormatRegistry::with_defaults();

    let reader = registry.reader_for_path(input)?;
    let graph = reader
        .read(input)
        .with_context(|| format!("failed to read map from {}", input.display()))?;

    let format = cli.output_format();
    let writer = registry
        .writer_for_format(&format)
        .ok_or_else(|| anyhow::anyhow!("unsupported output format: {format}"))?;

    tracing::info!(
        areas = graph.areas.len(),
        rooms = graph.room_count(),
        iterations = cli.iterations,
        "laying out map"
    );
    let layout = layout_map(&graph, cli.width, cli.height, cli.layout_config());

    writer
        .write(&layout, &cli.output)
        .with_context(|| format!("failed to write {}", cli.output.display()))?;

    println!(
        "Laid out {} areas with {} connections in {}",
        layout.nodes.len(),
        layout.edges.len(),
        cli.output.display()
    );
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match &cli.input {
        Some(input) => generate(&cli, input)?,
        None => println!("areamap: no input specified. Use --help for usage."),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_with_defaults() {
        let cli = Cli::try_parse_from(["areamap"]).unwrap();
        assert_eq!(cli.output, PathBuf::from("map.svg"));
        assert!(cli.input.is_none());
        assert_eq!(cli.width, 2000.0);
        assert_eq!(cli.height, 2000.0);
        assert_eq!(cli.iterations, 100);
        assert_eq!(cli.seed, None);
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn cli_parses_layout_options() {
        let cli = Cli::try_parse_from([
            "areamap",
            "--input",
            "world.yaml",
            "--output",
            "world.json",
            "--width",
            "1200",
            "--height",
            "900.5",
            "--iterations",
            "250",
            "--seed",
            "17",
            "-vv",
        ])
        .unwrap();

        assert_eq!(cli.input, Some(PathBuf::from("world.yaml")));
        assert_eq!(cli.width, 1200.0);
        assert_eq!(cli.height, 900.5);
        assert_eq!(cli.verbose, 2);

        let config = cli.layout_config();
        assert_eq!(config.iterations, 250);
        assert_eq!(config.seed, Some(17));
        assert_eq!(config.repulsion, LayoutConfig::default().repulsion);
        assert_eq!(config.damping, LayoutConfig::default().damping);
        assert_eq!(config.spring_length, LayoutConfig::default().spring_length);
    }

    #[test]
    fn cli_overrides_damping_and_spring_length() {
        let cli = Cli::try_parse_from([
            "areamap",
            "--damping",
            "0.8",
            "--spring-length",
            "320",
        ])
        .unwrap();

        let config = cli.layout_config();
        assert_eq!(config.damping, 0.8);
        assert_eq!(config.spring_length, 320.0);
        assert_eq!(config.iterations, 100);
    }

    #[test]
    fn canvas_must_be_finite_and_positive() {
        let cli = Cli::try_parse_from(["areamap"]).unwrap();
        assert!(cli.check_canvas().is_ok());

        let cli = Cli::try_parse_from(["areamap", "--width", "inf"]).unwrap();
        let err = cli.check_canvas().unwrap_err();
        assert!(err.to_string().contains("canvas width"), "{err}");

        let cli = Cli::try_parse_from(["areamap", "--height", "0"]).unwrap();
        let err = cli.check_canvas().unwrap_err();
        assert!(err.to_string().contains("canvas height"), "{err}");
    }

    #[test]
    fn output_format_prefers_flag_then_extension() {
        let cli = Cli::try_parse_from(["areamap", "-o", "out.json"]).unwrap();
        assert_eq!(cli.output_format(), "json");

        let cli = Cli::try_parse_from(["areamap", "-o", "out.json", "--format", "svg"]).unwrap();
        assert_eq!(cli.output_format(), "svg");

        let cli = Cli::try_parse_from(["areamap", "-o", "out"]).unwrap();
        assert_eq!(cli.output_format(), "svg");
    }
}
