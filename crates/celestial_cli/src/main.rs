//! CelestialUI CLI
//!
//! Inspect theme catalogs, emit CSS custom properties and manage the saved
//! theme choice:
//! - `init` writes a `celestial.toml`
//! - `list`, `css`, `export`, `validate` work on the catalog
//! - `current`, `set`, `toggle`, `reset` drive a theme manager backed by the
//!   configured preferences file

mod commands;
mod config;
mod project;

use std::path::PathBuf;

use anyhow::Result;
use celestial_theme::{SynthesisOptions, ThemeManager, ThemeMode};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use crate::commands::ListFilter;
use crate::config::CelestialConfig;

/// CelestialUI theme tooling
#[derive(Parser, Debug)]
#[command(name = "celestial")]
#[command(about = "Inspect CelestialUI themes and manage the active theme")]
#[command(version)]
struct Cli {
    /// Config file or directory (defaults to ./celestial.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Override the detected OS color scheme
    #[arg(long, global = true, value_enum)]
    scheme: Option<Scheme>,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create celestial.toml in a directory
    Init {
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Also write an editable copy of the built-in catalog
        #[arg(long)]
        catalog: bool,
    },

    /// List catalog themes
    List {
        #[arg(long, value_enum)]
        mode: Option<Scheme>,

        /// Category tag (celestial, default, ...)
        #[arg(long)]
        category: Option<String>,

        /// Only featured themes
        #[arg(long)]
        featured: bool,
    },

    /// Print the CSS variables of a theme
    Css {
        /// Theme id (defaults to the active theme)
        id: Option<String>,

        /// Include opacity, tone and state variants
        #[arg(long)]
        derived: bool,

        /// Include spacing, typography, radius, shadow and transition tokens
        #[arg(long)]
        scale: bool,

        /// Rule selector (defaults to .cui-theme-<id>)
        #[arg(long)]
        selector: Option<String>,
    },

    /// Print a theme as JSON
    Export {
        /// Theme id (defaults to the active theme)
        id: Option<String>,
    },

    /// Check a catalog file
    Validate { file: PathBuf },

    /// Show the active theme and where it came from
    Current,

    /// Select and save a theme
    Set { id: String },

    /// Switch to the best theme of the opposite mode
    Toggle,

    /// Forget the saved choice and follow the OS scheme
    Reset,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Scheme {
    Light,
    Dark,
}

impl From<Scheme> for ThemeMode {
    fn from(scheme: Scheme) -> Self {
        match scheme {
            Scheme::Light => ThemeMode::Light,
            Scheme::Dark => ThemeMode::Dark,
        }
    }
}

fn init_logging(verbose: u8) {
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

fn load_config(path: Option<&PathBuf>) -> Result<CelestialConfig> {
    match path {
        Some(path) => CelestialConfig::load_from_dir(path),
        None => CelestialConfig::load_or_default(&std::env::current_dir()?),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let scheme = cli.scheme.map(ThemeMode::from);
    let config_path = cli.config.clone();
    let open = || -> Result<ThemeManager> {
        let config = load_config(config_path.as_ref())?;
        commands::open_manager(&config, scheme)
    };

    let output = match cli.command {
        Commands::Init { path, catalog } => {
            project::create_project(&path, catalog)?;
            format!("Created {}\n", path.join(config::CONFIG_FILE).display())
        }
        Commands::List {
            mode,
            category,
            featured,
        } => {
            let manager = open()?;
            let filter = ListFilter {
                mode: mode.map(ThemeMode::from),
                category,
                featured,
            };
            commands::list(manager.registry(), &filter, Some(&manager.current_id()))
        }
        Commands::Css {
            id,
            derived,
            scale,
            selector,
        } => {
            let manager = open()?;
            let id = id.unwrap_or_else(|| manager.current_id());
            let options = SynthesisOptions { derived, scale };
            commands::css(manager.registry(), &id, options, selector.as_deref())?
        }
        Commands::Export { id } => {
            let manager = open()?;
            let id = id.unwrap_or_else(|| manager.current_id());
            commands::export(manager.registry(), &id)?
        }
        Commands::Validate { file } => commands::validate(&file)?,
        Commands::Current => commands::status(&open()?),
        Commands::Set { id } => {
            let manager = open()?;
            manager.set_theme(&id)?;
            commands::status(&manager)
        }
        Commands::Toggle => {
            let manager = open()?;
            manager.toggle_mode()?;
            commands::status(&manager)
        }
        Commands::Reset => {
            let manager = open()?;
            manager.reset_to_system_preference()?;
            commands::status(&manager)
        }
    };

    print!("{output}");
    Ok(())
}
