use super::{not_found, NO_BOOKMARKS};
use crate::console::Console;
use crate::store::{BookmarkLoader, BookmarkStore};
use crate::tokenizer::tokenize;
use anyhow::{bail, Result};
use log::{debug, info};
use std::io;
use std::process::{Command, ExitStatus};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExecError {
    #[error("failed to launch `{command}`")]
    Launch {
        command: String,
        #[source]
        source: io::Error,
    },
    #[error("`{command}` failed: {status}")]
    Exit { command: String, status: ExitStatus },
}

impl ExecError {
    /// the code the bookmarked command exited with, if it ran at all
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            ExecError::Exit { status, .. } => status.code(),
            ExecError::Launch { .. } => None,
        }
    }
}

/// Saves `command` under `name`. An existing bookmark is only replaced
/// after the user confirmed it.
pub fn add<S>(store: &S, console: &mut Console, name: &str, command: &str) -> Result<()>
where
    S: BookmarkStore + ?Sized,
{
    if name.trim().is_empty() {
        bail!("bookmark name must not be empty");
    }
    if command.trim().is_empty() {
        bail!("command for bookmark \"{}\" must not be empty", name);
    }

    let mut bookmarks = store.load()?;
    if let Some(existing) = bookmarks.get(name) {
        console.say(format!("{} already exists: {}", name, existing))?;
        if !console.confirm("Do you want to override it")? {
            info!("kept existing bookmark {:?}", name);
            return Ok(());
        }
        bookmarks.insert(name.to_string(), command.to_string());
        store.update(&bookmarks)?;
        console.say(format!("Bookmark \"{}\" has been updated successfully!", name))?;
        return Ok(());
    }

    bookmarks.insert(name.to_string(), command.to_string());
    store.update(&bookmarks)?;
    console.say(format!("New bookmark \"{}\" has been added successfully!", name))?;
    Ok(())
}

/// Runs the command saved under `name` in the platform shell, with the
/// shell attached to this process' stdin, stdout and stderr.
pub fn exec<S>(store: &S, console: &mut Console, name: &str) -> Result<()>
where
    S: BookmarkLoader + ?Sized,
{
    let bookmarks = store.load()?;
    if bookmarks.is_empty() {
        console.say(NO_BOOKMARKS)?;
        return Ok(());
    }
    let Some(saved) = bookmarks.get(name) else {
        return not_found(console, name);
    };

    let tokens = tokenize(saved);
    debug!("{:?} tokenized as {:?}", name, tokens);
    let line = tokens.join(" ");

    // the child writes straight to our stdout, keep the order of output
    console.flush()?;

    info!("executing {:?}", line);
    let status = shell(&line).status().map_err(|source| ExecError::Launch {
        command: line.clone(),
        source,
    })?;
    if !status.success() {
        return Err(ExecError::Exit {
            command: line,
            status,
        }
        .into());
    }
    Ok(())
}

/// Prints all bookmarks, sorted by name
pub fn list<S>(store: &S, console: &mut Console) -> Result<()>
where
    S: BookmarkLoader + ?Sized,
{
    let bookmarks = store.load()?;
    if bookmarks.is_empty() {
        console.say(NO_BOOKMARKS)?;
        return Ok(());
    }
    console.say("ID: BOOKMARK: COMMAND")?;
    for (id, (name, command)) in bookmarks.iter().enumerate() {
        console.say(format!("{}: {}: {}", id + 1, name, command))?;
    }
    Ok(())
}

/// Removes the bookmark `name` after the user confirmed it
pub fn remove<S>(store: &S, console: &mut Console, name: &str) -> Result<()>
where
    S: BookmarkStore + ?Sized,
{
    let mut bookmarks = store.load()?;
    if bookmarks.is_empty() {
        console.say(NO_BOOKMARKS)?;
        return Ok(());
    }
    if !bookmarks.contains_key(name) {
        return not_found(console, name);
    }

    if console.confirm(format!("Are you sure you want to remove \"{}\"", name))? {
        bookmarks.remove(name);
        store.update(&bookmarks)?;
        console.say(format!("\"{}\" was removed successfully!", name))?;
    }
    Ok(())
}

/// Prints the command saved under `name`
pub fn search<S>(store: &S, console: &mut Console, name: &str) -> Result<()>
where
    S: BookmarkLoader + ?Sized,
{
    let bookmarks = store.load()?;
    if bookmarks.is_empty() {
        console.say(NO_BOOKMARKS)?;
        return Ok(());
    }
    match bookmarks.get(name) {
        Some(command) => console.say(command)?,
        None => return not_found(console, name),
    }
    Ok(())
}

#[cfg(windows)]
fn shell(line: &str) -> Command {
    let mut command = Command::new("cmd");
    command.arg("/c").arg(line);
    command
}

#[cfg(not(windows))]
fn shell(line: &str) -> Command {
    let mut command = Command::new("bash");
    command.arg("-c").arg(line);
    command
}
