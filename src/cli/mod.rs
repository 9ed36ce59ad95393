//! Command-line interface parsing and handling
//!
//! This module parses the command line and dispatches to the window or to one
//! of the one-shot commands.

pub mod generate;
pub mod settings;

use std::error::Error;
use std::path::PathBuf;
use std::sync::LazyLock;

use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};

use crate::cli::generate::{run_extract, run_generate, run_highlight};
use crate::cli::settings::{load_config, run_set, run_show, run_unset};
use crate::ui::event_loop::run_window;
use crate::utils::clipboard::SystemClipboard;
use crate::utils::logging::{init_tracing, LogTarget};

static LONG_VERSION: LazyLock<String> = LazyLock::new(|| {
    let describe = option_env!("VERGEN_GIT_DESCRIBE").unwrap_or("unknown");
    let sha = option_env!("VERGEN_GIT_SHA").unwrap_or("unknown");
    let built = option_env!("VERGEN_BUILD_DATE").unwrap_or("unknown");
    format!(
        "{} ({describe})\ncommit: {sha}\nbuilt: {built}",
        env!("CARGO_PKG_VERSION")
    )
});

#[derive(Parser)]
#[command(name = "driveframe", version)]
#[command(about = "Turn Google Drive share links into embeddable iframe code")]
#[command(
    long_about = "Driveframe turns a Google Drive share link into an <iframe> snippet that \
embeds the file's preview. Run without a command to open the terminal window.\n\n\
Window controls:\n\
  Ctrl+V / F2       Paste a link from the clipboard and generate the iframe\n\
  Ctrl+Y / F3       Copy the iframe code to the clipboard\n\
  Enter             Generate from the text typed into the link field\n\
  Tab               Switch between the link field and the iframe code\n\
  Esc / Ctrl+C      Quit\n\n\
Environment Variables:\n\
  RUST_LOG          Log filter (default: driveframe=info)\n\
  DRIVEFRAME_COLOR  Force the colour depth: truecolor, 256, or 16"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Use this config file instead of the default location
    #[arg(short = 'c', long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Write diagnostic logs to this file
    #[arg(short = 'l', long, global = true, value_name = "FILE")]
    pub log: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open the terminal window (default)
    Ui,
    /// Print the iframe snippet for a share link
    Generate {
        /// Share link; read from the clipboard when omitted
        link: Option<String>,
        /// Also copy the snippet to the clipboard
        #[arg(long)]
        copy: bool,
        /// Print without syntax colouring
        #[arg(long)]
        plain: bool,
    },
    /// Print only the file identifier of a share link
    Extract {
        /// Share link; read from the clipboard when omitted
        link: Option<String>,
    },
    /// Read HTML from stdin and print it highlighted
    Highlight {
        /// Print without syntax colouring
        #[arg(long)]
        plain: bool,
    },
    /// Print the current configuration
    Config,
    /// Set a configuration value (theme, width, height, allow)
    Set { key: String, value: String },
    /// Reset a configuration value to its default
    Unset { key: String },
}

pub fn main() -> Result<(), Box<dyn Error>> {
    let matches = Args::command()
        .long_version(LONG_VERSION.as_str())
        .get_matches();
    let args = Args::from_arg_matches(&matches)?;
    let command = args.command.unwrap_or(Commands::Ui);

    let interactive = matches!(command, Commands::Ui);
    init_tracing(&LogTarget::for_command(interactive, args.log))?;

    let config_path = args.config;
    match command {
        Commands::Ui => {
            let config = load_config(config_path.as_deref())?;
            run_window(&config)
        }
        Commands::Generate { link, copy, plain } => {
            let config = load_config(config_path.as_deref())?;
            run_generate(link, copy, plain, &config, &mut SystemClipboard)
        }
        Commands::Extract { link } => run_extract(link, &mut SystemClipboard),
        Commands::Highlight { plain } => {
            let config = load_config(config_path.as_deref())?;
            run_highlight(plain, &config)
        }
        Commands::Config => run_show(config_path.as_deref()),
        Commands::Set { key, value } => run_set(config_path.as_deref(), &key, &value),
        Commands::Unset { key } => run_unset(config_path.as_deref(), &key),
    }
}
