pub mod bookmark;
pub mod config;

use crate::cli::{Command, ConfigCommand};
use crate::config::Config;
use crate::console::Console;
use crate::store::BookmarkStore;
use anyhow::Result;
use std::path::PathBuf;

pub use self::bookmark::{add, exec, list, remove, search, ExecError};

pub const NO_BOOKMARKS: &str = "You have no saved bookmarks";

// this bundles everything a command handler may need, so the handlers
// don't have to reach for any global state
pub struct CmdContext<'a> {
    pub config: Config,
    pub config_path: PathBuf,
    pub store: &'a dyn BookmarkStore,
    pub console: Console<'a>,
}

/// Runs a single parsed command
pub fn dispatch(command: Command, ctx: &mut CmdContext) -> Result<()> {
    let store = ctx.store;
    let console = &mut ctx.console;
    match command {
        Command::Add { name, command } => add(store, console, &name, &command.join(" ")),
        Command::Exec { name } => exec(store, console, &name),
        Command::List => list(store, console),
        Command::Remove { name } => remove(store, console, &name),
        Command::Search { name } => search(store, console, &name),
        Command::Version => version(console),
        Command::Config(ConfigCommand::List) => config::list(&ctx.config, console),
        Command::Config(ConfigCommand::Set { key, value }) => {
            config::set(&mut ctx.config, &ctx.config_path, console, &key, &value)
        }
    }
}

pub fn version(console: &mut Console) -> Result<()> {
    console.say(format!("v{}", clap::crate_version!()))?;
    Ok(())
}

fn not_found(console: &mut Console, name: &str) -> Result<()> {
    console.say(format!("Unable to find bookmark: \"{}\"", name))?;
    Ok(())
}
