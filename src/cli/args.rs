use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use serde::{Deserialize, Serialize};

use crate::config::StorageBackend;
use crate::features::focus::HistoryFilter;

#[derive(Parser)]
#[command(name = "focusflow")]
#[command(about = "A focus timer with session history and statistics")]
#[command(long_about = "focusflow - A terminal focus timer

Time focused work, tag it with a category, and review where your
attention went. Sessions are kept in ~/.focusflow (or $FOCUSFLOW_HOME).

QUICK START:
  focusflow start                    Open the timer in stopwatch mode
  focusflow start --target 25m       Count toward a 25-minute target
  focusflow start --preset deep-work Use a built-in preset
  focusflow history --filter today   Review today's sessions
  focusflow stats                    Totals, streak and insights

OUTPUT FORMATS:
  --output pretty    Human-readable colored output (default)
  --output json      Machine-readable JSON for scripting

For more information on a specific command, run:
  focusflow <command> --help")]
#[command(version, propagate_version = true)]
pub struct Cli {
    /// Output format for command results
    ///
    /// Use 'pretty' for human-readable colored output (default),
    /// or 'json' for machine-readable output suitable for scripting.
    /// Defaults to `general.default_output` from the config file.
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Log debug detail to stderr (the timer screen logs to a file)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for command results.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable colored output.
    #[default]
    Pretty,
    /// Machine-readable JSON output.
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open the full-screen focus timer
    ///
    /// Without a target the timer runs as a stopwatch until you stop it.
    /// With a target it records the session automatically when the target
    /// is reached.
    ///
    /// # Examples
    ///
    ///   focusflow start                          Stopwatch, default category
    ///   focusflow start -t 50m -c coding         50 minutes of coding
    ///   focusflow start --preset pomodoro        25 minutes of study
    ///   focusflow start -n "chapter 3"           Attach a note
    ///
    /// # Keys
    ///
    ///   space / p   pause or resume
    ///   s           stop and save
    ///   c / C       next / previous category
    ///   q / Esc     stop, save and quit
    ///   ?           help
    #[command(alias = "s")]
    Start(StartArgs),

    /// List recorded sessions grouped by day
    ///
    /// # Examples
    ///
    ///   focusflow history                   Everything, newest first
    ///   focusflow history -f today          Today only
    ///   focusflow history -f week -n 20     Last seven days, at most 20
    ///   focusflow history -o json           JSON for scripting
    #[command(alias = "h")]
    History(HistoryArgs),

    /// Show focus statistics and insights
    ///
    /// Totals for today, the last seven days and all time, the current
    /// streak, a per-category breakdown and progress toward the daily goal.
    Stats,

    /// Change the category or note of a recorded session
    ///
    /// The id may be abbreviated to any unambiguous prefix.
    ///
    /// # Examples
    ///
    ///   focusflow edit 3f2a --category reading
    ///   focusflow edit 3f2a --note "finished the draft"
    ///   focusflow edit 3f2a --clear-note
    Edit(EditArgs),

    /// Delete a recorded session
    Delete {
        /// Session id or unambiguous prefix
        id: String,
    },

    /// Delete all recorded sessions
    Clear {
        /// Skip confirmation
        #[arg(long, short = 'f')]
        force: bool,
    },

    /// List the built-in presets
    Presets,

    /// View or change configuration
    Config(ConfigArgs),

    /// Generate shell completions
    ///
    /// Example: focusflow completions zsh > ~/.zsh/completions/_focusflow
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Arguments for the timer.
#[derive(Args, Debug, Default)]
pub struct StartArgs {
    /// Target duration (e.g., 25, 25m, 1h30m, 90s)
    #[arg(long, short = 't', conflicts_with = "preset")]
    pub target: Option<String>,

    /// Preset name (see 'focusflow presets')
    #[arg(long, short = 'p')]
    pub preset: Option<String>,

    /// Category (work, study, reading, coding, exercise, meditation, other)
    #[arg(long, short = 'c')]
    pub category: Option<String>,

    /// Note attached to the recorded session
    #[arg(long, short = 'n')]
    pub note: Option<String>,
}

/// Arguments for history.
#[derive(Args, Debug)]
pub struct HistoryArgs {
    /// Which sessions to show
    #[arg(long, short = 'f', value_enum, default_value = "all")]
    pub filter: HistoryFilterArg,

    /// Maximum number of sessions to show
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,
}

/// History filter for the command line.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum HistoryFilterArg {
    /// Every session
    All,
    /// Today's sessions
    Today,
    /// The last seven days
    Week,
}

impl From<HistoryFilterArg> for HistoryFilter {
    fn from(arg: HistoryFilterArg) -> Self {
        match arg {
            HistoryFilterArg::All => Self::All,
            HistoryFilterArg::Today => Self::Today,
            HistoryFilterArg::Week => Self::Week,
        }
    }
}

/// Arguments for editing a session.
#[derive(Args, Debug)]
pub struct EditArgs {
    /// Session id or unambiguous prefix
    pub id: String,

    /// New category
    #[arg(long, short = 'c')]
    pub category: Option<String>,

    /// New note
    #[arg(long, short = 'n', conflicts_with = "clear_note")]
    pub note: Option<String>,

    /// Remove the note
    #[arg(long)]
    pub clear_note: bool,
}

/// Arguments for configuration.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

/// Configuration subcommands.
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the current configuration
    Show,

    /// Print the config file location
    Path,

    /// Set the daily focus goal in minutes (30-480, steps of 15)
    SetGoal {
        /// Minutes
        minutes: u32,
    },

    /// Turn completion notifications on or off
    Notifications {
        /// on or off
        #[arg(value_enum)]
        state: Toggle,
    },

    /// Turn the completion bell on or off
    Sound {
        /// on or off
        #[arg(value_enum)]
        state: Toggle,
    },

    /// Choose where session history is kept
    Backend {
        /// sqlite or file
        #[arg(value_enum)]
        backend: StorageBackend,
    },
}

/// An on/off switch.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Toggle {
    /// Enabled
    On,
    /// Disabled
    Off,
}

impl From<Toggle> for bool {
    fn from(toggle: Toggle) -> Self {
        toggle == Toggle::On
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["focusflow", "stats"]).unwrap();
        assert_eq!(cli.output, None);
        assert!(!cli.verbose);
        assert!(matches!(cli.command, Commands::Stats));
    }

    #[test]
    fn test_cli_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["focusflow", "stats", "-o", "json", "--verbose"]).unwrap();
        assert_eq!(cli.output, Some(OutputFormat::Json));
        assert!(cli.verbose);
    }

    #[test]
    fn test_cli_start_with_target() {
        let cli =
            Cli::try_parse_from(["focusflow", "start", "-t", "25m", "-c", "coding", "-n", "x"]).unwrap();
        if let Commands::Start(args) = cli.command {
            assert_eq!(args.target.as_deref(), Some("25m"));
            assert_eq!(args.category.as_deref(), Some("coding"));
            assert_eq!(args.note.as_deref(), Some("x"));
            assert!(args.preset.is_none());
        } else {
            panic!("Expected Start command");
        }
    }

    #[test]
    fn test_cli_start_target_conflicts_with_preset() {
        let result = Cli::try_parse_from(["focusflow", "start", "-t", "25m", "-p", "pomodoro"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_history_filter() {
        let cli = Cli::try_parse_from(["focusflow", "history", "--filter", "week", "-n", "5"]).unwrap();
        if let Commands::History(args) = cli.command {
            assert_eq!(HistoryFilter::from(args.filter), HistoryFilter::Week);
            assert_eq!(args.limit, Some(5));
        } else {
            panic!("Expected History command");
        }
    }

    #[test]
    fn test_cli_history_default_filter() {
        let cli = Cli::try_parse_from(["focusflow", "h"]).unwrap();
        if let Commands::History(args) = cli.command {
            assert_eq!(args.filter, HistoryFilterArg::All);
            assert!(args.limit.is_none());
        } else {
            panic!("Expected History command");
        }
    }

    #[test]
    fn test_cli_edit_note_conflicts_with_clear() {
        let result =
            Cli::try_parse_from(["focusflow", "edit", "abc", "--note", "x", "--clear-note"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_edit() {
        let cli = Cli::try_parse_from(["focusflow", "edit", "abc", "--clear-note"]).unwrap();
        if let Commands::Edit(args) = cli.command {
            assert_eq!(args.id, "abc");
            assert!(args.clear_note);
            assert!(args.category.is_none());
        } else {
            panic!("Expected Edit command");
        }
    }

    #[test]
    fn test_cli_config_toggle() {
        let cli = Cli::try_parse_from(["focusflow", "config", "sound", "off"]).unwrap();
        if let Commands::Config(args) = cli.command {
            if let ConfigCommands::Sound { state } = args.command {
                assert!(!bool::from(state));
            } else {
                panic!("Expected Sound subcommand");
            }
        } else {
            panic!("Expected Config command");
        }
    }

    #[test]
    fn test_cli_config_backend() {
        let cli = Cli::try_parse_from(["focusflow", "config", "backend", "file"]).unwrap();
        if let Commands::Config(args) = cli.command {
            assert!(matches!(
                args.command,
                ConfigCommands::Backend {
                    backend: StorageBackend::File
                }
            ));
        } else {
            panic!("Expected Config command");
        }
    }

    #[test]
    fn test_cli_completions() {
        let cli = Cli::try_parse_from(["focusflow", "completions", "zsh"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Completions { shell: Shell::Zsh }
        ));
    }
}
