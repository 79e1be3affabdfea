use std::env;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "product-explorer";

/// What: Resolve an XDG base directory, falling back to `$HOME` with provided segments.
///
/// Inputs:
/// - `var`: Environment variable name, e.g., `XDG_CONFIG_HOME`.
/// - `home_default`: Path segments appended to `$HOME` when the variable is unset.
///
/// Output:
/// - `PathBuf` pointing to the derived base directory.
///
/// Details:
/// - Treats empty environment values as unset and gracefully handles missing `$HOME`.
fn xdg_base_dir(var: &str, home_default: &[&str]) -> PathBuf {
    if let Ok(p) = env::var(var)
        && !p.trim().is_empty()
    {
        return PathBuf::from(p);
    }
    let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
    let mut base = PathBuf::from(home);
    for seg in home_default {
        base = base.join(seg);
    }
    base
}

/// What: Build `$HOME/.config/product-explorer`, creating it when `$HOME` is set.
///
/// Output:
/// - `Some(PathBuf)` when the directory is usable; `None` if `$HOME` is missing or creation fails.
///
/// Details:
/// - On Windows, also checks `APPDATA` when `HOME` is not set.
fn home_config_dir() -> Option<PathBuf> {
    if let Ok(home) = env::var("HOME")
        && !home.trim().is_empty()
    {
        let dir = Path::new(&home).join(".config").join(APP_DIR);
        if std::fs::create_dir_all(&dir).is_ok() {
            return Some(dir);
        }
    }
    #[cfg(windows)]
    {
        if let Ok(appdata) = env::var("APPDATA") {
            let dir = Path::new(&appdata).join(APP_DIR);
            if std::fs::create_dir_all(&dir).is_ok() {
                return Some(dir);
            }
        }
    }
    None
}

/// What: Resolve the application config directory, ensuring it exists on disk.
///
/// Output:
/// - `PathBuf` pointing to the config directory.
///
/// Details:
/// - Prefers `$HOME/.config/product-explorer`, falling back to `XDG_CONFIG_HOME/product-explorer`.
pub fn config_dir() -> PathBuf {
    if let Some(dir) = home_config_dir() {
        return dir;
    }
    let dir = xdg_base_dir("XDG_CONFIG_HOME", &[".config"]).join(APP_DIR);
    let _ = std::fs::create_dir_all(&dir);
    dir
}

/// Log directory inside the config folder (created if missing).
pub fn logs_dir() -> PathBuf {
    let dir = config_dir().join("logs");
    let _ = std::fs::create_dir_all(&dir);
    dir
}

/// Persisted lists (favorites) inside the config folder (created if missing).
pub fn lists_dir() -> PathBuf {
    let dir = config_dir().join("lists");
    let _ = std::fs::create_dir_all(&dir);
    dir
}

/// Path of the persisted favorites list.
pub fn favorites_path() -> PathBuf {
    lists_dir().join("favorites.json")
}

/// Path of `settings.conf`; the file may not exist yet.
pub fn settings_path() -> PathBuf {
    config_dir().join("settings.conf")
}
