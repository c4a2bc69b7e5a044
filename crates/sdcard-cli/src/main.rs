//! sdcard: a library of called square dance sequences.

use std::io::{self, IsTerminal};

use anyhow::{Context, Result};
use clap::{ColorChoice, Parser};
use sdcard_cli::commands;
use sdcard_cli::logging::{LogConfig, LogFormat, init_logging};
use sdcard_cli::report::describe_sequence;
use sdcard_cli::workspace::Workspace;
use sdcard_model::SequenceId;
use sdcard_store::{Settings, load_settings, settings_path};
use tracing::level_filters::LevelFilter;

mod cli;
mod summary;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg, SessionCommand, StackCommand};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match run(cli) {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

fn settings_from_cli(cli: &Cli) -> Settings {
    let mut settings = load_settings();
    if let Some(path) = &cli.library {
        settings.library_path = Some(path.clone());
    }
    if let Some(path) = &cli.session {
        settings.session_path = Some(path.clone());
    }
    settings
}

fn run(cli: Cli) -> Result<()> {
    let mut workspace = Workspace::open(settings_from_cli(&cli))?;

    match cli.command {
        Command::Import { files } => {
            let report = commands::import(&mut workspace, &files)?;
            workspace.save()?;
            summary::print_import(&report);
        }
        Command::List { query } => {
            let sequences = commands::list(&workspace, query.as_deref())?;
            summary::print_sequences(&sequences, workspace.library.catalog());
        }
        Command::Show { id } => {
            let sequence = commands::show(&workspace, &id)?;
            println!("{}", sequence.id);
            print!("{}", describe_sequence(sequence, workspace.library.catalog()));
        }
        Command::Tag(args) => {
            let (tag, add) = match (&args.add, &args.remove) {
                (Some(tag), _) => (tag, true),
                (None, Some(tag)) => (tag, false),
                (None, None) => unreachable!("clap requires --add or --remove"),
            };
            let edited = commands::tag(&mut workspace, &args.ids, tag, add)?;
            workspace.save()?;
            println!("{edited} sequences edited");
        }
        Command::Categorize(args) => {
            let option = if args.clear {
                None
            } else {
                args.option.as_deref()
            };
            let edited = commands::categorize(&mut workspace, &args.ids, &args.category, option)?;
            workspace.save()?;
            println!("{edited} sequences edited");
        }
        Command::Remove { ids } => {
            let removed = commands::remove(&mut workspace, &ids)?;
            workspace.save()?;
            println!("{removed} sequences removed");
        }
        Command::Tags => summary::print_tags(workspace.library.catalog()),
        Command::Categories => summary::print_categories(workspace.library.catalog()),
        Command::DefineTag { name, comment } => {
            commands::define_tag(&mut workspace, &name, &comment)?;
            workspace.save()?;
        }
        Command::DefineCategory {
            name,
            options,
            comment,
        } => {
            commands::define_category(&mut workspace, &name, &options, &comment)?;
            workspace.save()?;
        }
        Command::Stack(command) => {
            match command {
                StackCommand::Add { name, query } => {
                    commands::stack_add(&mut workspace, &name, query.as_deref())?;
                }
                StackCommand::Remove { name } => commands::stack_remove(&mut workspace, &name)?,
                StackCommand::Rename { name, new_name } => {
                    commands::stack_rename(&mut workspace, &name, &new_name)?;
                }
                StackCommand::Query { name, query } => {
                    commands::stack_query(&mut workspace, &name, query.as_deref())?;
                }
                StackCommand::List => {
                    summary::print_stacks(&commands::status(&workspace));
                    return Ok(());
                }
            }
            workspace.save()?;
        }
        Command::Session(command) => match command {
            SessionCommand::Start { balanced, auto_tag } => {
                commands::session_start(&mut workspace, balanced, auto_tag.as_deref())?;
                workspace.save()?;
                summary::print_stacks(&commands::status(&workspace));
            }
            SessionCommand::Status => {
                if !workspace.session.ongoing() {
                    println!("No session running.");
                }
                summary::print_stacks(&commands::status(&workspace));
            }
            SessionCommand::Stop => {
                commands::stop(&mut workspace);
                workspace.save()?;
            }
        },
        Command::Next { stack } => {
            let next = commands::next(&mut workspace, stack.as_deref())?;
            workspace.save()?;
            print_moved(&workspace, next.as_ref(), "end of stack");
        }
        Command::Prev { stack } => {
            let previous = commands::prev(&mut workspace, stack.as_deref())?;
            workspace.save()?;
            print_moved(&workspace, previous.as_ref(), "start of stack");
        }
        Command::Config { save } => {
            let settings = &workspace.settings;
            println!("library: {}", workspace.library_path().display());
            println!("session: {}", workspace.session_path().display());
            println!("distribution: {}", settings.distribution);
            println!(
                "auto tag: {}",
                settings.auto_tag.as_deref().unwrap_or("(none)")
            );
            if save {
                let path = settings_path().context("no settings directory on this platform")?;
                commands::write_settings(&workspace, &path)?;
                println!("saved {}", path.display());
            }
        }
    }
    Ok(())
}

fn print_moved(workspace: &Workspace, id: Option<&SequenceId>, boundary: &str) {
    let Some(sequence) = id.and_then(|id| workspace.library.sequence(id)) else {
        println!("({boundary})");
        return;
    };
    println!("{}", sequence.id);
    print!("{}", describe_sequence(sequence, workspace.library.catalog()));
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
