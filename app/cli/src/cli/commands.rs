//! CLI command definitions using Clap.
//!
//! The default invocation takes an optional theme name and applies the
//! matching wallpaper; auxiliary operations live behind subcommands.

use std::io;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Generator, Shell, generate};
use colored::Colorize;

use crate::config;
use crate::error::DwallError;
use crate::schema;
use crate::store::Store;
use crate::wallpaper;

/// Application version from Cargo.toml.
const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// dwall - macOS-style dynamic HEIC wallpapers for Linux desktops.
#[derive(Parser, Debug)]
#[command(name = "dwall")]
#[command(author, version = APP_VERSION, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
#[command(after_long_help = r"Examples:
  dwall catalina          # activate the catalina theme and remember it
  dwall                   # re-apply the remembered theme for this hour
  dwall catalina --force  # re-extract frames even when they exist
  dwall list              # list installed themes")]
pub struct Cli {
    /// Theme to activate (a container under $DWALL_PATH/heic/).
    /// Remembered for later invocations without an argument.
    #[arg(value_name = "THEME")]
    theme: Option<String>,

    /// Re-extract frames from the container even when they already exist.
    #[arg(long, short)]
    force: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
#[command(next_display_order = None)]
pub enum Commands {
    /// List installed themes.
    ///
    /// Scans the store's heic/ directory for containers. The remembered
    /// theme is marked with an asterisk.
    List {
        /// Output as a JSON array.
        #[arg(long)]
        json: bool,
    },

    /// Print the remembered theme name.
    Current,

    /// Output the dwall configuration JSON Schema.
    ///
    /// Can be redirected to a file for use with editors that support
    /// JSON Schema validation.
    Schema,

    /// Generate shell completions.
    ///
    /// Outputs shell completion script to stdout for the specified shell.
    ///
    /// Usage:
    ///   eval "$(dwall completions --shell zsh)"
    ///   dwall completions --shell bash > ~/.local/share/bash-completion/completions/dwall
    Completions {
        /// The shell to generate completions for.
        #[arg(long, short, value_enum)]
        shell: Shell,
    },
}

impl Cli {
    /// Executes the parsed command.
    ///
    /// # Errors
    ///
    /// Returns an error when the command execution fails.
    pub fn execute(&self) -> Result<(), DwallError> {
        match &self.command {
            Some(Commands::List { json }) => execute_list(*json),
            Some(Commands::Current) => execute_current(),
            Some(Commands::Schema) => {
                println!("{}", schema::generate_schema_json());
                Ok(())
            }
            Some(Commands::Completions { shell }) => {
                let mut cmd = Self::command();
                print_completions(*shell, &mut cmd);
                Ok(())
            }
            None => execute_apply(self.theme.as_deref(), self.force),
        }
    }
}

/// Prints a completion script for the given shell to stdout.
fn print_completions<G: Generator>(generator: G, cmd: &mut clap::Command) {
    let name = cmd.get_name().to_string();
    generate(generator, cmd, name, &mut io::stdout());
}

/// Executes the default action: apply a theme's wallpaper for this hour.
fn execute_apply(theme: Option<&str>, force: bool) -> Result<(), DwallError> {
    config::init();

    let theme = match theme {
        Some(name) => {
            config::theme::persist(name)?;
            name.to_string()
        }
        None => config::theme::load().ok_or_else(|| {
            DwallError::InvalidArguments(
                "no theme selected; run `dwall <THEME>` once to pick one".to_string(),
            )
        })?,
    };

    wallpaper::apply(&theme, force)?;

    println!("Wallpaper set to {}.", theme.bold());
    Ok(())
}

/// Executes the list command.
fn execute_list(json: bool) -> Result<(), DwallError> {
    config::init();

    let store = Store::resolve(config::get_config())?;
    let themes = store.themes();

    if json {
        println!("{}", serde_json::to_string_pretty(&themes)?);
        return Ok(());
    }

    if themes.is_empty() {
        println!("No themes installed in {}.", store.heic_dir().display());
        return Ok(());
    }

    let current = config::theme::load();
    for theme in &themes {
        if current.as_deref() == Some(theme.as_str()) {
            println!("{} {}", "*".green(), theme.bold());
        } else {
            println!("  {theme}");
        }
    }

    Ok(())
}

/// Executes the current command.
fn execute_current() -> Result<(), DwallError> {
    match config::theme::load() {
        Some(theme) => {
            println!("{theme}");
            Ok(())
        }
        None => Err(DwallError::InvalidArguments(
            "no theme remembered yet; run `dwall <THEME>` once to pick one".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positional_theme_parse() {
        let cli = Cli::try_parse_from(["dwall", "catalina"]).unwrap();
        assert_eq!(cli.theme, Some("catalina".to_string()));
        assert!(!cli.force);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_bare_invocation_parse() {
        let cli = Cli::try_parse_from(["dwall"]).unwrap();
        assert!(cli.theme.is_none());
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_force_flag_parse() {
        let cli = Cli::try_parse_from(["dwall", "catalina", "--force"]).unwrap();
        assert_eq!(cli.theme, Some("catalina".to_string()));
        assert!(cli.force);
    }

    #[test]
    fn test_list_parse() {
        let cli = Cli::try_parse_from(["dwall", "list"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::List { json: false })));
    }

    #[test]
    fn test_list_json_parse() {
        let cli = Cli::try_parse_from(["dwall", "list", "--json"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::List { json: true })));
    }

    #[test]
    fn test_current_parse() {
        let cli = Cli::try_parse_from(["dwall", "current"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Current)));
    }

    #[test]
    fn test_schema_parse() {
        let cli = Cli::try_parse_from(["dwall", "schema"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Schema)));
    }

    #[test]
    fn test_completions_parse() {
        let cli = Cli::try_parse_from(["dwall", "completions", "--shell", "zsh"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Completions { shell: Shell::Zsh })
        ));
    }

    #[test]
    fn test_theme_cannot_combine_with_subcommand() {
        assert!(Cli::try_parse_from(["dwall", "catalina", "list"]).is_err());
    }
}
