//! Widget Board CLI
//!
//! Inspects and edits the persisted dashboard, mirrors it to the configured
//! remote, and manages the configuration file.

use clap::{Parser, Subcommand, ValueEnum};
use std::process::ExitCode;
use widget_board::config::{default, loader::ConfigLoader, xdg};
use widget_board::layout::Breakpoint;
use widget_board::logging;
use widget_board::theme::BackgroundPattern;

mod commands;


/// Widget Board - a personal dashboard of widgets on a responsive grid
#[derive(Parser)]
#[command(name = "wboard")]
#[command(version)]
#[command(about = "Personal widget dashboard with local persistence and remote mirroring")]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Print the widgets and their placements at one breakpoint
    Show {
        /// Viewport width in pixels used to pick the breakpoint
        #[arg(long, default_value_t = 1200)]
        width: u32,
    },
    /// List the widget types that can be added
    Types,
    /// Add a widget of the given type
    Add {
        /// Widget type (e.g. notes, music, todo)
        kind: String,
    },
    /// Remove a widget by id
    Remove {
        /// Widget id as printed by `show`
        id: String,
    },
    /// Move or resize a widget at one breakpoint
    Place {
        /// Breakpoint: lg, md, sm or xs
        breakpoint: Breakpoint,
        /// Widget id as printed by `show`
        id: String,
        /// Column
        #[arg(long)]
        x: u32,
        /// Row
        #[arg(long)]
        y: u32,
        /// Width in columns (keeps the current width if omitted)
        #[arg(long)]
        w: Option<u32>,
        /// Height in rows (keeps the current height if omitted)
        #[arg(long)]
        h: Option<u32>,
    },
    /// Show the theme, or change it
    Theme {
        /// Named primary color (e.g. blue, rose, green)
        #[arg(long)]
        primary: Option<String>,
        /// Background pattern
        #[arg(long, value_enum)]
        pattern: Option<PatternArg>,
        /// Corner radius as a CSS length (e.g. 0.5rem)
        #[arg(long)]
        radius: Option<String>,
    },
    /// Upsert the dashboard to the configured remote once
    Sync,
    /// Manage configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Configuration management actions.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Create default configuration file
    Init {
        /// Overwrite existing config (keeps a .toml.backup copy)
        #[arg(long)]
        force: bool,
    },
    /// Show configuration file path
    Path,
    /// Validate configuration file
    Validate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum PatternArg {
    None,
    Dots,
    Grid,
    Waves,
}

impl From<PatternArg> for BackgroundPattern {
    fn from(arg: PatternArg) -> Self {
        match arg {
            PatternArg::None => BackgroundPattern::None,
            PatternArg::Dots => BackgroundPattern::Dots,
            PatternArg::Grid => BackgroundPattern::Grid,
            PatternArg::Waves => BackgroundPattern::Waves,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Config subcommands must work even when the file is broken.
    if let Commands::Config { action } = cli.command {
        return run_config_command(action);
    }

    let config = match ConfigLoader::load_default() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Config error: {e}");
            return ExitCode::FAILURE;
        }
    };
    logging::init(config.logging.level);

    let mut dashboard = match commands::open_dashboard(&config) {
        Ok(dashboard) => dashboard,
        Err(e) => {
            eprintln!("Storage error: {e}");
            return ExitCode::FAILURE;
        }
    };

    match cli.command {
        Commands::Show { width } => commands::show(&mut dashboard, width),
        Commands::Types => commands::types(&dashboard),
        Commands::Add { kind } => commands::add(&mut dashboard, &kind),
        Commands::Remove { id } => commands::remove(&mut dashboard, &id),
        Commands::Place {
            breakpoint,
            id,
            x,
            y,
            w,
            h,
        } => commands::place(&mut dashboard, breakpoint, &id, (x, y), (w, h)),
        Commands::Theme {
            primary,
            pattern,
            radius,
        } => commands::theme(&mut dashboard, primary, pattern.map(Into::into), radius),
        Commands::Sync => commands::sync(&dashboard, &config),
        Commands::Config { .. } => unreachable!("handled before loading config"),
    }
}

fn run_config_command(action: ConfigAction) -> ExitCode {
    match action {
        ConfigAction::Init { force } => match default::create_default_config(force) {
            Ok(path) => {
                println!("Created configuration at {}", path.display());
            }
            Err(e) => {
                eprintln!("Config error: {e}");
                return ExitCode::FAILURE;
            }
        },
        ConfigAction::Path => {
            println!("{}", xdg::config_path().display());
        }
        ConfigAction::Validate => match ConfigLoader::load_default() {
            Ok(config) => {
                println!("Configuration is valid");
                println!("{config:#?}");
            }
            Err(e) => {
                eprintln!("Config error: {e}");
                return ExitCode::FAILURE;
            }
        },
    }
    ExitCode::SUCCESS
}
