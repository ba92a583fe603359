use crate::config::{Config, DEFAULT_STORE_FILE_NAME};
use crate::console::Console;
use crate::store::{BookmarkContainer, BookmarkUpdater, FileStore};
use anyhow::{bail, Context, Result};
use log::info;
use std::env;
use std::fs;
use std::path::{Path, PathBuf, MAIN_SEPARATOR};

pub const STORE_KEY: &str = "store";

/// Prints the configuration as JSON
pub fn list(config: &Config, console: &mut Console) -> Result<()> {
    console.say(serde_json::to_string_pretty(config)?)?;
    Ok(())
}

/// Sets configuration `key` to `value` and writes the config back to
/// `config_path`. Only the store location can be changed; the existing
/// store file moves along. A store already at the new location is used
/// as is when there is nothing to move, and never overwritten.
pub fn set(
    config: &mut Config,
    config_path: &Path,
    console: &mut Console,
    key: &str,
    value: &str,
) -> Result<()> {
    match key {
        STORE_KEY => {
            let new_store = resolve_store_path(value)?;
            move_store(&config.store, &new_store)?;
            config.store = new_store;
            config.save(config_path)?;
            console.say(format!("Bookmarks are now stored in {}", config.store.display()))?;
            Ok(())
        }
        _ => bail!("unable to find the given config: \"{}\"", key),
    }
}

// relative paths are taken from the cwd, a bare folder gets the default
// file name
fn resolve_store_path(value: &str) -> Result<PathBuf> {
    let mut path = PathBuf::from(value);
    if !path.is_absolute() {
        path = env::current_dir()?.join(path);
    }
    if value.ends_with(MAIN_SEPARATOR) || value.ends_with('/') || path.is_dir() {
        path.push(DEFAULT_STORE_FILE_NAME);
    }
    Ok(path)
}

fn move_store(from: &Path, to: &Path) -> Result<()> {
    if let Some(parent) = to.parent() {
        fs::create_dir_all(parent).with_context(|| format!("Unable to create {:?}", parent))?;
    }

    if from == to {
        return Ok(());
    }

    match (from.exists(), to.exists()) {
        (false, true) => {
            info!("no store at {:?}, using the existing one at {:?}", from, to);
            return Ok(());
        }
        (false, false) => {
            info!("no store at {:?}, starting an empty one at {:?}", from, to);
            FileStore::new(to).update(&BookmarkContainer::new())?;
            return Ok(());
        }
        (true, true) => bail!(
            "{:?} already exists, move or remove it before storing bookmarks there",
            to
        ),
        (true, false) => {}
    }

    info!("moving store {:?} to {:?}", from, to);
    if fs::rename(from, to).is_err() {
        // rename doesn't work across file systems
        fs::copy(from, to).with_context(|| format!("Unable to copy {:?} to {:?}", from, to))?;
        fs::remove_file(from).with_context(|| format!("Unable to remove {:?}", from))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::BookmarkLoader;
    use std::io::Cursor;
    use tempfile::TempDir;

    struct Setup {
        dir: TempDir,
        config: Config,
        config_path: PathBuf,
    }

    fn setup() -> Setup {
        let dir = TempDir::new().unwrap();
        let config = Config::new(dir.path().join("old.json"));
        let config_path = dir.path().join("config.json");
        config.save(&config_path).unwrap();
        Setup {
            dir,
            config,
            config_path,
        }
    }

    fn run_set(setup: &mut Setup, key: &str, value: &str) -> Result<String> {
        let mut input = Cursor::new(Vec::new());
        let mut output = Vec::new();
        let mut console = Console::new(&mut input, &mut output);
        set(&mut setup.config, &setup.config_path, &mut console, key, value)?;
        Ok(String::from_utf8(output).unwrap())
    }

    #[test]
    fn set_store_moves_existing_bookmarks() {
        let mut setup = setup();
        let mut bookmarks = BookmarkContainer::new();
        bookmarks.insert("hello".to_string(), "echo hi".to_string());
        FileStore::new(&setup.config.store).update(&bookmarks).unwrap();

        let target = setup.dir.path().join("nested").join("new.json");
        run_set(&mut setup, STORE_KEY, target.to_str().unwrap()).unwrap();

        assert!(!setup.dir.path().join("old.json").exists());
        assert_eq!(FileStore::new(&target).load().unwrap(), bookmarks);
        assert_eq!(Config::load(&setup.config_path).unwrap().store, target);
        assert_eq!(setup.config.store, target);
    }

    #[test]
    fn set_store_creates_empty_store_when_none_exists() {
        let mut setup = setup();
        let folder = setup.dir.path().join("data");
        let value = format!("{}{}", folder.display(), MAIN_SEPARATOR);

        let output = run_set(&mut setup, STORE_KEY, &value).unwrap();

        let expected = folder.join(DEFAULT_STORE_FILE_NAME);
        assert!(expected.is_file());
        assert!(FileStore::new(&expected).load().unwrap().is_empty());
        assert_eq!(setup.config.store, expected);
        assert!(output.contains(&expected.display().to_string()));
    }

    #[test]
    fn set_store_keeps_existing_target_when_nothing_to_move() {
        let mut setup = setup();
        let mut synced = BookmarkContainer::new();
        synced.insert("deploy".to_string(), "make deploy".to_string());
        let target = setup.dir.path().join("synced.json");
        FileStore::new(&target).update(&synced).unwrap();

        run_set(&mut setup, STORE_KEY, target.to_str().unwrap()).unwrap();

        assert_eq!(FileStore::new(&target).load().unwrap(), synced);
        assert_eq!(setup.config.store, target);
        assert_eq!(Config::load(&setup.config_path).unwrap().store, target);
    }

    #[test]
    fn set_store_refuses_to_replace_existing_target() {
        let mut setup = setup();
        let mut current = BookmarkContainer::new();
        current.insert("hello".to_string(), "echo hi".to_string());
        FileStore::new(&setup.config.store).update(&current).unwrap();

        let mut synced = BookmarkContainer::new();
        synced.insert("deploy".to_string(), "make deploy".to_string());
        let target = setup.dir.path().join("synced.json");
        FileStore::new(&target).update(&synced).unwrap();

        assert!(run_set(&mut setup, STORE_KEY, target.to_str().unwrap()).is_err());

        let old = setup.dir.path().join("old.json");
        assert_eq!(FileStore::new(&target).load().unwrap(), synced);
        assert_eq!(FileStore::new(&old).load().unwrap(), current);
        assert_eq!(setup.config.store, old);
        assert_eq!(Config::load(&setup.config_path).unwrap().store, old);
    }

    #[test]
    fn unknown_key_fails() {
        let mut setup = setup();
        let err = run_set(&mut setup, "storePath", "/tmp/x.json").unwrap_err();
        assert_eq!(
            err.to_string(),
            "unable to find the given config: \"storePath\""
        );
        assert_eq!(
            Config::load(&setup.config_path).unwrap().store,
            setup.dir.path().join("old.json")
        );
    }

    #[test]
    fn list_prints_json() {
        let setup = setup();
        let mut input = Cursor::new(Vec::new());
        let mut output = Vec::new();
        list(&setup.config, &mut Console::new(&mut input, &mut output)).unwrap();

        let printed: Config = serde_json::from_slice(&output).unwrap();
        assert_eq!(printed, setup.config);
    }
}
