use std::env;
use std::path::PathBuf;

use storysite::config::{read_config, Config};

use crate::CFG_FILE_NAME;

fn get_config_path() -> Option<PathBuf> {
    let exe_dir = env::current_exe().ok()
        .and_then(|exe| exe.parent().map(|dir| dir.to_path_buf()));
    if let Some(exe_dir) = exe_dir {
        if exe_dir.join(CFG_FILE_NAME).exists() {
            return Some(exe_dir.join(CFG_FILE_NAME));
        }
    }

    if let Ok(cur_dir) = env::current_dir() {
        if cur_dir.join(CFG_FILE_NAME).exists() {
            return Some(cur_dir.join(CFG_FILE_NAME));
        }
    }

    let cfg_dir = dirs::config_dir()?;
    if cfg_dir.join(CFG_FILE_NAME).exists() {
        return Some(cfg_dir.join(CFG_FILE_NAME));
    }

    None
}

/// An explicit path must exist. Without one the usual places are searched and
/// the built-in defaults are used when nothing is found.
pub(crate) fn open_config(cfg_path: Option<PathBuf>) -> Result<Config, String> {
    let config_path = match cfg_path.or_else(get_config_path) {
        Some(path) => path,
        None => {
            println!("No {} found, using default settings", CFG_FILE_NAME);
            return Ok(Config::default());
        }
    };

    println!("Reading config from {}", config_path.display());
    let config = read_config(&config_path).map_err(|e| e.to_string())?;

    match config.log {
        Some(ref log) => match log.location {
            Some(ref location) => println!("Log enabled. Files will be written in {}", location.display()),
            None => println!("Log enabled on the console"),
        },
        None => println!("Log disabled. Using stdout"),
    }

    Ok(config)
}
