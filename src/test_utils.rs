//! Global test utilities for ensuring test isolation.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, OnceLock};

/// Global mutex for tests that modify the PATH environment variable.
///
/// Since `std::env::set_var` affects the entire process, all tests that
/// modify PATH must serialize their execution using this mutex to prevent
/// race conditions between parallel tests.
static PATH_MUTEX: OnceLock<Mutex<()>> = OnceLock::new();

/// Global mutex for tests that modify the HOME environment variable.
static HOME_MUTEX: OnceLock<Mutex<()>> = OnceLock::new();

/// Acquire the global PATH mutex to safely modify PATH environment variable.
///
/// Output:
/// - `MutexGuard<()>` that must be held while PATH is modified.
///
/// Details:
/// - Automatically recovers from poisoned mutex (from panicked tests).
/// - Hold this guard for the entire duration that PATH is modified.
pub fn lock_path_mutex() -> MutexGuard<'static, ()> {
    PATH_MUTEX
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|e| e.into_inner())
}

/// Acquire the global HOME mutex to safely modify HOME environment variable.
pub fn lock_home_mutex() -> MutexGuard<'static, ()> {
    HOME_MUTEX
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|e| e.into_inner())
}

/// What: Sets an environment variable for the lifetime of the guard.
///
/// Details:
/// - The previous value (or its absence) is restored on drop.
/// - Callers serialize with the mutex guarding that variable.
pub struct EnvVarGuard {
    key: String,
    old: Option<String>,
}

impl EnvVarGuard {
    pub fn set(key: &str, value: &str) -> Self {
        let old = std::env::var(key).ok();
        unsafe { std::env::set_var(key, value) };
        Self {
            key: key.to_string(),
            old,
        }
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        match &self.old {
            Some(v) => unsafe { std::env::set_var(&self.key, v) },
            None => unsafe { std::env::remove_var(&self.key) },
        }
    }
}

/// What: Fake executable placed first on `PATH`.
///
/// Inputs:
/// - `name`: Executable name to shadow (e.g. `curl`).
/// - `script`: Full script text including the shebang.
///
/// Output:
/// - Guard holding the PATH mutex, the temp directory and the previous PATH.
///
/// Details:
/// - Dropping the guard restores PATH before releasing the mutex.
pub struct FakeBin {
    path: Option<EnvVarGuard>,
    dir: tempfile::TempDir,
    _lock: MutexGuard<'static, ()>,
}

impl FakeBin {
    #[cfg(unix)]
    pub fn install(name: &str, script: &str) -> Self {
        use std::os::unix::fs::PermissionsExt;

        let lock = lock_path_mutex();
        let dir = tempfile::tempdir().expect("tempdir");
        let bin = dir.path().join(name);
        std::fs::write(&bin, script).expect("write fake bin");
        let mut perm = std::fs::metadata(&bin).expect("meta").permissions();
        perm.set_mode(0o755);
        std::fs::set_permissions(&bin, perm).expect("chmod");

        let old_path = std::env::var("PATH").unwrap_or_default();
        let new_path = format!("{}:{old_path}", dir.path().display());
        Self {
            path: Some(EnvVarGuard::set("PATH", &new_path)),
            dir,
            _lock: lock,
        }
    }

    pub fn dir(&self) -> &Path {
        self.dir.path()
    }
}

impl Drop for FakeBin {
    fn drop(&mut self) {
        self.path.take();
    }
}

/// What: Temporary `HOME` for tests that touch the config directory.
///
/// Details:
/// - Holds the HOME mutex; `XDG_CONFIG_HOME` is cleared so `HOME` wins.
pub struct TempHome {
    _xdg: EnvVarGuard,
    _home: EnvVarGuard,
    dir: tempfile::TempDir,
    _lock: MutexGuard<'static, ()>,
}

impl TempHome {
    pub fn new() -> Self {
        let lock = lock_home_mutex();
        let dir = tempfile::tempdir().expect("tempdir");
        let home = EnvVarGuard::set("HOME", &dir.path().display().to_string());
        let xdg = EnvVarGuard::set("XDG_CONFIG_HOME", "");
        Self {
            _xdg: xdg,
            _home: home,
            dir,
            _lock: lock,
        }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }
}
