//! Fractal CLI - build, publish and serve independently deployed components
//!
//! Usage: fractal <COMMAND>
//!
//! Commands:
//!   build    Build 'use fractal' sources (optionally watch and publish)
//!   publish  Upload a build output directory to a registry
//!   serve    Run the fractal registry
//!   detect   List fractal sources and their identities

mod cli;
mod commands;
mod ui;

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use commands::build::BuildArgs;
use ui::context::UiContext;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let ui = UiContext::new(cli.json, cli.verbose, cli.color);
    let result = match cli.command {
        Commands::Build {
            input,
            output,
            watch,
            registry,
            jobs,
        } => commands::build::cmd_build(
            BuildArgs {
                input,
                output,
                watch,
                registry,
                jobs,
            },
            ui,
        ),
        Commands::Publish { output, registry } => {
            commands::publish::cmd_publish(output, registry, ui)
        }
        Commands::Serve {
            host,
            port,
            storage,
        } => commands::serve::cmd_serve(host, port, storage, ui),
        Commands::Detect { input } => commands::detect::cmd_detect(&input, ui),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            ui::error::print_error(&e, ui.json);
            ExitCode::FAILURE
        }
    }
}

/// `RUST_LOG` wins; otherwise `-v` raises the level from warn.
/// Logs go to stderr so `--json` stdout stays NDJSON.
fn init_tracing(verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn default_directive(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info,hyper=warn,reqwest=warn",
        2 => "debug,hyper=warn,reqwest=warn",
        _ => "trace",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_raises_the_default_level() {
        assert_eq!(default_directive(0), "warn");
        assert!(default_directive(1).starts_with("info"));
        assert!(default_directive(2).starts_with("debug"));
        assert_eq!(default_directive(5), "trace");
    }
}
