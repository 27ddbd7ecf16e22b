use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorWhen {
    Auto,
    Always,
    Never,
}

/// Fractal - build, publish and serve independently deployed components
#[derive(Parser, Debug)]
#[command(name = "fractal")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output NDJSON events instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Color output
    #[arg(long, value_enum, global = true)]
    pub color: Option<ColorWhen>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build every 'use fractal' source into a standalone artifact
    Build {
        /// Source tree to scan
        #[arg(short, long, default_value = ".")]
        input: PathBuf,

        /// Output directory [default: dist/fractals]
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Rebuild on changes until Ctrl+C
        #[arg(short, long)]
        watch: bool,

        /// Publish built artifacts to this registry afterwards
        #[arg(long, value_name = "URL")]
        registry: Option<String>,

        /// Parallel build workers
        #[arg(short, long)]
        jobs: Option<usize>,
    },

    /// Upload an existing build output directory to a registry
    Publish {
        /// Build output directory [default: dist/fractals]
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Registry base URL [default: [registry] url or FRACTAL_REGISTRY_URL]
        #[arg(long, value_name = "URL")]
        registry: Option<String>,
    },

    /// Run the fractal registry
    Serve {
        /// Interface to bind [default: 0.0.0.0]
        #[arg(long)]
        host: Option<String>,

        /// Port to bind [default: 3001, or PORT]
        #[arg(short, long)]
        port: Option<u16>,

        /// Directory holding stored fractals [default: fractal-storage]
        #[arg(long)]
        storage: Option<PathBuf>,
    },

    /// List fractal sources and the identities they would build as
    Detect {
        /// Source tree to scan
        #[arg(short, long, default_value = ".")]
        input: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_build_defaults() {
        let cli = Cli::try_parse_from(["fractal", "build"]).unwrap();
        match cli.command {
            Commands::Build {
                input,
                output,
                watch,
                registry,
                jobs,
            } => {
                assert_eq!(input, PathBuf::from("."));
                assert!(output.is_none());
                assert!(!watch);
                assert!(registry.is_none());
                assert!(jobs.is_none());
            }
            _ => panic!("Expected Build command"),
        }
    }

    #[test]
    fn test_cli_build_all_flags() {
        let cli = Cli::try_parse_from([
            "fractal",
            "build",
            "-i",
            "app",
            "-o",
            "out",
            "-w",
            "--registry",
            "http://localhost:3001",
            "-j",
            "4",
        ])
        .unwrap();
        match cli.command {
            Commands::Build {
                input,
                output,
                watch,
                registry,
                jobs,
            } => {
                assert_eq!(input, PathBuf::from("app"));
                assert_eq!(output, Some(PathBuf::from("out")));
                assert!(watch);
                assert_eq!(registry.as_deref(), Some("http://localhost:3001"));
                assert_eq!(jobs, Some(4));
            }
            _ => panic!("Expected Build command"),
        }
    }

    #[test]
    fn test_cli_publish() {
        let cli =
            Cli::try_parse_from(["fractal", "publish", "--registry", "http://r:1"]).unwrap();
        match cli.command {
            Commands::Publish { output, registry } => {
                assert!(output.is_none());
                assert_eq!(registry.as_deref(), Some("http://r:1"));
            }
            _ => panic!("Expected Publish command"),
        }
    }

    #[test]
    fn test_cli_serve() {
        let cli = Cli::try_parse_from([
            "fractal",
            "serve",
            "--host",
            "127.0.0.1",
            "--port",
            "8080",
            "--storage",
            "store",
        ])
        .unwrap();
        match cli.command {
            Commands::Serve {
                host,
                port,
                storage,
            } => {
                assert_eq!(host.as_deref(), Some("127.0.0.1"));
                assert_eq!(port, Some(8080));
                assert_eq!(storage, Some(PathBuf::from("store")));
            }
            _ => panic!("Expected Serve command"),
        }
    }

    #[test]
    fn test_cli_global_flags_after_subcommand() {
        let cli =
            Cli::try_parse_from(["fractal", "detect", "--json", "-vv", "--color", "never"]).unwrap();
        assert!(cli.json);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.color, Some(ColorWhen::Never));
        assert!(matches!(cli.command, Commands::Detect { .. }));
    }

    #[test]
    fn test_cli_rejects_unknown_color() {
        assert!(Cli::try_parse_from(["fractal", "detect", "--color", "sometimes"]).is_err());
    }

    #[test]
    fn test_cli_requires_a_command() {
        assert!(Cli::try_parse_from(["fractal"]).is_err());
    }
}
