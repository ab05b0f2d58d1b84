// src/cli.rs
use anyhow::Result;
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::{env, path::PathBuf, process::ExitCode};

use crate::{
    commands,
    infra::{fs::DEFAULT_LOG_FILE, t},
    models::EnabledToolchains,
};

/// Pre-parses the command line arguments to find the language setting.
/// This allows i18n to be initialized before the full CLI is built.
/// It looks for a `--lang <VALUE>` argument.
fn pre_parse_language() -> Option<String> {
    let args: Vec<String> = env::args().collect();
    let pos = args.iter().position(|arg| arg == "--lang")?;
    args.get(pos + 1).cloned()
}

pub fn build_cli() -> Command {
    Command::new("preset-matrix")
        .version(env!("CARGO_PKG_VERSION"))
        .about(t!("cli_about").to_string())
        .after_help(t!("cli_after_help").to_string())
        .arg(
            Arg::new("all")
                .long("all")
                .help(t!("arg_all").to_string())
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("msvc")
                .long("msvc")
                .help(t!("arg_msvc").to_string())
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("gcc")
                .long("gcc")
                .help(t!("arg_gcc").to_string())
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("clang")
                .long("clang")
                .help(t!("arg_clang").to_string())
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help(t!("arg_verbose").to_string())
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("log")
                .long("log")
                .help(t!("arg_log").to_string())
                .value_name("PATH")
                .num_args(0..=1)
                .default_missing_value(DEFAULT_LOG_FILE)
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("project-dir")
                .long("project-dir")
                .help(t!("arg_project_dir").to_string())
                .value_name("PROJECT_DIR")
                .default_value(".")
                .value_parser(clap::value_parser!(PathBuf))
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .help(t!("arg_config").to_string())
                .value_name("CONFIG")
                .value_parser(clap::value_parser!(PathBuf))
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("lang")
                .long("lang")
                .help(t!("cli_lang").to_string())
                .value_name("LANGUAGE")
                .action(ArgAction::Set),
        )
}

/// Reads the toolchain selection flags. `--all` implies the other three.
pub fn enabled_toolchains(matches: &ArgMatches) -> EnabledToolchains {
    if matches.get_flag("all") {
        return EnabledToolchains::all();
    }
    EnabledToolchains {
        msvc: matches.get_flag("msvc"),
        gcc: matches.get_flag("gcc"),
        clang: matches.get_flag("clang"),
    }
}

/// Turns parsed matches into the arguments of the run command.
pub fn run_args(matches: &ArgMatches) -> commands::run::RunArgs {
    commands::run::RunArgs {
        enabled: enabled_toolchains(matches),
        verbose: matches.get_flag("verbose"),
        log: matches.get_one::<String>("log").cloned(),
        project_dir: matches
            .get_one::<PathBuf>("project-dir")
            .cloned()
            .unwrap_or_else(|| PathBuf::from(".")),
        config: matches.get_one::<PathBuf>("config").cloned(),
        language: matches.get_one::<String>("lang").cloned(),
    }
}

/// Parses the command line and runs the matrix.
/// With no toolchain group selected, the help text goes to stderr and the exit code is 0.
pub async fn run() -> Result<ExitCode> {
    // Pre-parse language and initialize i18n first.
    match pre_parse_language() {
        Some(language) => crate::set_language(&language),
        None => crate::init(),
    }
    crate::logging::init_logging();

    let mut command = build_cli();
    let matches = command.get_matches_mut();
    let args = run_args(&matches);

    if args.enabled.is_empty() {
        eprintln!("{}", command.render_help());
        return Ok(ExitCode::SUCCESS);
    }

    commands::run::execute(args).await
}
