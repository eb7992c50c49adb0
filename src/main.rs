//! CLI inspector: parse a screen config, resolve it against optional runtime
//! data, and print the render plan.
//!
//! This binary is the composition root — it owns subscriber setup and the
//! host context the library never creates on its own.

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use sdui::{parse_config, plan_screen, ComponentSet, HostContext, ParseError};

#[derive(Parser)]
#[command(name = "sdui", version, about = "Resolve a screen config into a render plan")]
struct Cli {
    /// Screen config JSON document.
    config: PathBuf,

    /// Runtime data JSON file backing {{data.*}} references.
    #[arg(long)]
    data: Option<PathBuf>,

    /// Pretty-print the render plan.
    #[arg(long)]
    pretty: bool,

    /// Raise log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let text = fs::read_to_string(&cli.config)
        .with_context(|| format!("reading {}", cli.config.display()))?;

    let config = match parse_config(&text) {
        Ok(config) => config,
        Err(ParseError::Invalid { issues }) => {
            for issue in &issues {
                eprintln!("error: {issue}");
            }
            bail!("screen config has {} validation issue(s)", issues.len());
        }
        Err(err) => return Err(err.into()),
    };

    let data = match &cli.data {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("parsing {} as JSON", path.display()))?
        }
        None => serde_json::Value::Object(Default::default()),
    };

    let host = HostContext::new()
        .with_device("platform", "cli")
        .with_app("version", env!("CARGO_PKG_VERSION"));
    let components = ComponentSet::new();

    let plan = plan_screen(&config, &data, &host, &components);
    for diagnostic in &plan.diagnostics {
        tracing::warn!(%diagnostic, "recoverable planning problem");
    }

    match plan.root {
        Some(root) => {
            let rendered = if cli.pretty {
                serde_json::to_string_pretty(&root)?
            } else {
                serde_json::to_string(&root)?
            };
            println!("{rendered}");
        }
        None => eprintln!("screen '{}' produced no visible content", config.screen_id),
    }

    Ok(())
}

fn init_tracing(verbosity: u8) {
    let default_level = match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
