mod classes;
mod resources;
mod view;

use clap::{Parser, Subcommand};
use cpscan_core::{ClassPath, Scanner, ScannerConfig};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "cpscan",
    version,
    about = "Discover resources and classes on a class path",
    long_about = "cpscan resolves a location such as `classpath:db/migration` against the \
                  directories and archives of a class path, lists every resource below it and \
                  optionally loads the class files it finds."
)]
pub struct Cli {
    /// JSON scanner configuration
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log debug output to stderr as well
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the resources below a location
    Resources {
        /// Location descriptor, e.g. `classpath:db/migration` or `filesystem:/srv/sql`
        #[arg(value_name = "LOCATION")]
        location: String,
        /// Directories and archives, separated like the platform PATH
        #[arg(long, value_name = "PATHS")]
        classpath: String,
        /// Only resources whose file name starts with this
        #[arg(long)]
        prefix: Option<String>,
        /// Only resources whose file name ends with this
        #[arg(long)]
        suffix: Option<String>,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Load the classes below a namespace location
    Classes {
        #[arg(value_name = "LOCATION")]
        location: String,
        #[arg(long, value_name = "PATHS")]
        classpath: String,
        /// Only concrete types assignable to this type
        #[arg(long, value_name = "TYPE")]
        implements: Option<String>,
        /// Also list the candidates that could not be loaded
        #[arg(long)]
        show_failures: bool,
        #[arg(long)]
        json: bool,
    },
}

fn build_scanner(
    config: Option<&PathBuf>,
    classpath: &str,
) -> Result<Scanner, Box<dyn std::error::Error>> {
    let config = match config {
        Some(path) => ScannerConfig::from_file(path)?,
        None => ScannerConfig::default(),
    };
    Ok(Scanner::builder()
        .classpath(ClassPath::parse(classpath))
        .config(config)
        .build())
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let _guard = cpscan_core::logging::init_logging("cli", cli.verbose);

    match cli.command {
        Commands::Resources {
            location,
            classpath,
            prefix,
            suffix,
            json,
        } => {
            let scanner = build_scanner(cli.config.as_ref(), &classpath)?;
            resources::run(&scanner, &location, prefix, suffix, json)
        }
        Commands::Classes {
            location,
            classpath,
            implements,
            show_failures,
            json,
        } => {
            let scanner = build_scanner(cli.config.as_ref(), &classpath)?;
            classes::run(&scanner, &location, implements, show_failures, json)
        }
    }
}
