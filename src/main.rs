// setenv-rs: Build Environment Script Generator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> Config --> Logging --> Command Dispatch
//!   Generate | Print | List | Options | Inis | Version
//! ```

use std::process::ExitCode;

use setenv_rs::cli::global::GlobalOptions;
use setenv_rs::cli::{self, Command};
use setenv_rs::cmd::config::{run_inis_command, run_options_command};
use setenv_rs::cmd::generate::{run_generate_command, run_print_command};
use setenv_rs::cmd::list::run_list_command;
use setenv_rs::config::Config;
use setenv_rs::config::loader::ConfigLoader;
use setenv_rs::logging::init_logging;

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// Configuration file picked up from the working directory.
const DEFAULT_INI: &str = "setenv.toml";

/// Prefix of `SETENV_<SECTION>__<KEY>` overrides.
const ENV_PREFIX: &str = "SETENV";

#[tokio::main]
async fn main() -> ExitCode {
    let cli = cli::parse();

    let config = match load_config(&cli.global) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    let log_config = config.global.log_config();
    let _log_guard = match init_logging(&log_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            return ExitCode::FAILURE;
        }
    };

    dispatch_command(&cli, &config).await
}

async fn dispatch_command(cli: &cli::Cli, config: &Config) -> ExitCode {
    let dry = cli.global.dry;
    let result = match &cli.command {
        Some(Command::Version) => {
            handle_version_command();
            Ok(())
        }
        Some(Command::Options) => {
            run_options_command(config);
            Ok(())
        }
        Some(Command::Inis) => build_config_loader(&cli.global).map(|loader| {
            run_inis_command(&loader.format_loaded_files());
        }),
        Some(Command::Generate(args)) => run_generate_command(args, config, dry).await,
        Some(Command::Print(args)) => run_print_command(args, config).await,
        Some(Command::List(args)) => run_list_command(args, config),
        None => {
            eprintln!("No command specified. Use --help for usage information.");
            Err(anyhow::anyhow!("No command specified"))
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn handle_version_command() {
    println!("{}", env!("CARGO_PKG_VERSION"));
}

fn build_config_loader(global: &GlobalOptions) -> setenv_rs::error::Result<ConfigLoader> {
    let mut loader = ConfigLoader::new();
    if !global.no_default_inis {
        loader = loader.add_toml_file_optional(DEFAULT_INI);
    }
    for ini_path in &global.inis {
        loader = loader.add_toml_file(ini_path);
    }
    loader = loader.with_env_prefix(ENV_PREFIX);
    for option in global.to_config_overrides() {
        loader = loader.set_option(&option)?;
    }
    Ok(loader)
}

fn load_config(global: &GlobalOptions) -> setenv_rs::error::Result<Config> {
    build_config_loader(global)?.build()
}
