use anyhow::Result;
use bookmark::cli::Cli;
use bookmark::commands::{self, CmdContext, ExecError};
use bookmark::config::Config;
use bookmark::console::Console;
use bookmark::store::FileStore;
use clap::Parser;
use colored::*;
use log::debug;
use std::io;
use std::process;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = simple_logger::init_with_level(cli.log_level()) {
        eprintln!("{}: unable to set up logging: {}", "warning".yellow(), e);
    }

    if let Err(e) = run(cli) {
        eprintln!("{}: {:#}", "error".red(), e);
        let code = e
            .downcast_ref::<ExecError>()
            .and_then(ExecError::exit_code)
            .unwrap_or(1);
        process::exit(code);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config_path = match cli.config {
        Some(path) => path,
        None => Config::default_path()?,
    };
    let config = Config::load_or_create(&config_path, Config::default_store_path)?;
    debug!("using config {:?}, store {:?}", config_path, config.store);

    let store = FileStore::new(&config.store);
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();

    let mut ctx = CmdContext {
        config,
        config_path,
        store: &store,
        console: Console::new(&mut input, &mut output),
    };
    commands::dispatch(cli.command, &mut ctx)
}
