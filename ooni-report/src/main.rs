#![forbid(unsafe_code)]

use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::Parser;
use ooni_report_lib::config::{load_from_path, Config, OutputFormat};
use ooni_report_lib::telemetry::init_tracing;
use ooni_report_lib::{parse_measurement, read_measurement, Measurement, Result, Summary};
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(author, version, about = "Render OONI web-connectivity measurements as reports")]
struct Cli {
    /// Path to configuration file (TOML, or YAML with a .yaml/.yml extension)
    #[arg(short, long, value_name = "FILE", env = "OONI_REPORT_CONFIG")]
    config: Option<PathBuf>,

    /// Output format, overrides the configuration file
    #[arg(short, long, value_name = "FORMAT")]
    format: Option<OutputFormat>,

    /// Leave HTTP response bodies out of the report
    #[arg(long)]
    no_bodies: bool,

    /// Measurement JSON files; `-` reads from stdin
    #[arg(value_name = "MEASUREMENT", default_value = "-")]
    measurements: Vec<PathBuf>,
}

fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => load_from_path(path),
        None => Ok(Config::default()),
    };
    let mut cfg = match loaded {
        Ok(cfg) => cfg,
        Err(err) => {
            let _ = init_tracing("info", false);
            error!(%err, "failed to load configuration");
            std::process::exit(1);
        }
    };

    if let Err(err) = init_tracing(&cfg.logging.level, cfg.logging.show_target) {
        eprintln!("{err}");
        std::process::exit(1);
    }

    if let Some(path) = &cli.config {
        info!(path = %path.display(), "configuration loaded");
    }
    cfg.apply_overrides(cli.format, cli.no_bodies);
    info!(
        format = %cfg.output.format,
        measurements = cli.measurements.len(),
        "rendering reports"
    );

    let mut stdin = None;
    let mut failed = 0usize;
    for (index, path) in cli.measurements.iter().enumerate() {
        let measurement = match load(path, &mut stdin) {
            Ok(m) => m,
            Err(err) => {
                error!(path = %path.display(), %err, "failed to load measurement");
                failed += 1;
                continue;
            }
        };

        let summary = Summary::from_measurement(&measurement, &cfg.output);
        match summary.render(&cfg.output) {
            Ok(out) => {
                if index > 0 && cfg.output.format == OutputFormat::Text {
                    println!();
                }
                print!("{out}");
            }
            Err(err) => {
                error!(path = %path.display(), %err, "failed to render report");
                failed += 1;
            }
        }
    }

    if failed > 0 {
        error!(failed, "some measurements could not be rendered");
        std::process::exit(1);
    }
}

/// `-` reads stdin; the text is read once and reused if `-` is repeated.
fn load(path: &Path, stdin: &mut Option<String>) -> Result<Measurement> {
    if path != Path::new("-") {
        return read_measurement(path);
    }
    parse_measurement(read_once(stdin, io::stdin())?)
}

fn read_once<R: Read>(cache: &mut Option<String>, mut reader: R) -> io::Result<&str> {
    if cache.is_none() {
        let mut txt = String::new();
        reader.read_to_string(&mut txt)?;
        *cache = Some(txt);
    }
    Ok(cache.as_deref().unwrap_or_default())
}
