use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use colored::Colorize;

use focusflow::cli::args::{Cli, Commands};
use focusflow::cli::commands;
use focusflow::config::{ColorSetting, Config, Paths};
use focusflow::logging;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {:#}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let paths = Paths::new()?;

    let log_file = matches!(cli.command, Commands::Start(_)).then_some(paths.log_file.as_path());
    logging::init(cli.verbose, log_file)?;

    let config = Config::load_from_path(&paths.config_file)
        .with_context(|| format!("loading {}", paths.config_file.display()))?;
    match config.general.color {
        ColorSetting::Always => colored::control::set_override(true),
        ColorSetting::Never => colored::control::set_override(false),
        ColorSetting::Auto => {}
    }

    let format = cli.output.unwrap_or(config.general.default_output);
    let now = Local::now();

    let output = match cli.command {
        Commands::Start(args) => commands::start(&args, &config, &paths, format)?,
        Commands::History(args) => {
            let engine = commands::open_engine(&config, &paths, config.timer.default_category)?;
            commands::history(&engine, &args, now, format)?
        }
        Commands::Stats => {
            let engine = commands::open_engine(&config, &paths, config.timer.default_category)?;
            commands::stats(&engine, &config, now, format)?
        }
        Commands::Edit(args) => {
            let mut engine = commands::open_engine(&config, &paths, config.timer.default_category)?;
            commands::edit(&mut engine, &args, format)?
        }
        Commands::Delete { id } => {
            let mut engine = commands::open_engine(&config, &paths, config.timer.default_category)?;
            commands::delete(&mut engine, &id, format)?
        }
        Commands::Clear { force } => {
            let mut engine = commands::open_engine(&config, &paths, config.timer.default_category)?;
            commands::clear(&mut engine, force, format)?
        }
        Commands::Presets => commands::presets(format)?,
        Commands::Config(args) => commands::config(args.command, &paths, format)?,
        Commands::Completions { shell } => commands::completions(shell)?,
    };

    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}
