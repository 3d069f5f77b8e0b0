mod cli;
mod error_fmt;
mod run;
mod source;

use std::fs;
use std::path::Path;

use clap::Parser;
use eyre::WrapErr;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use crate::cli::{Cli, Commands, FILE_GUARD, JSON_MODE};
use crate::run::{build_mappings, replay};
use crate::source::{CsvSource, StdinSource};
use axis_traits::SampleSource;

fn init_tracing(args: &Cli, logging: &axis_config::Logging) {
    let level = logging.level.as_deref().unwrap_or(&args.log_level);
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    // Console output goes to stderr so shaped values own stdout.
    let registry = tracing_subscriber::registry().with(filter);
    if let Some(file) = &logging.file {
        let path = Path::new(file);
        let dir = path.parent().unwrap_or_else(|| Path::new("."));
        let name = path
            .file_name()
            .unwrap_or_else(|| std::ffi::OsStr::new("axis.log"));
        let appender = match logging.rotation.as_deref() {
            Some("daily") => tracing_appender::rolling::daily(dir, name),
            Some("hourly") => tracing_appender::rolling::hourly(dir, name),
            _ => tracing_appender::rolling::never(dir, name),
        };
        let (non_blocking, guard) = tracing_appender::non_blocking(appender);
        let _ = FILE_GUARD.set(guard);
        if args.json {
            registry
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .with(fmt::layer().json().with_writer(non_blocking))
                .init();
        } else {
            registry
                .with(fmt::layer().with_writer(std::io::stderr))
                .with(fmt::layer().json().with_writer(non_blocking))
                .init();
        }
    } else if args.json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn load_config(path: &Path) -> eyre::Result<axis_config::Config> {
    let text = fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read config file {path:?}"))?;
    let cfg = axis_config::load_toml(&text)
        .map_err(|e| eyre::eyre!("failed to parse config {path:?}: {e}"))?;
    cfg.validate()?;
    Ok(cfg)
}

fn try_main() -> eyre::Result<()> {
    let _ = color_eyre::install();
    let args = Cli::parse();
    let _ = JSON_MODE.set(args.json);

    let cfg = load_config(&args.config)?;
    init_tracing(&args, &cfg.logging);

    match &args.cmd {
        Commands::Check => {
            tracing::info!(axes = cfg.axes.len(), "config valid");
            println!("config ok: {} axis mapping(s)", cfg.axes.len());
            Ok(())
        }
        Commands::Run { input, summary } => {
            let mut mappings = build_mappings(&cfg, args.json)?;
            let default_axis = cfg.axes[0].input_id;

            let mut source: Box<dyn SampleSource> = match input {
                Some(path) => Box::new(CsvSource::open(path)?),
                None => Box::new(StdinSource::new(std::io::stdin().lock(), default_axis)),
            };

            let stats = replay(source.as_mut(), &mut mappings)?;
            tracing::info!(
                processed = stats.processed,
                skipped = stats.skipped,
                "replay complete"
            );
            if *summary {
                let mut axes: Vec<_> = stats.per_axis.iter().collect();
                axes.sort();
                for (axis, count) in axes {
                    eprintln!("axis {axis}: {count} sample(s)");
                }
                eprintln!(
                    "processed {} sample(s), skipped {}",
                    stats.processed, stats.skipped
                );
            }
            Ok(())
        }
    }
}

fn main() {
    if let Err(err) = try_main() {
        error_fmt::report(&err);
        std::process::exit(1);
    }
}
