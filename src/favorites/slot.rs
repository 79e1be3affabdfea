use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// What: Named storage slot holding the persisted favorites encoding.
///
/// Inputs:
/// - `read` returns the raw slot contents, `Ok(None)` when the slot was never written.
/// - `write` replaces the contents.
///
/// Output:
/// - Used by `FavoritesStore`; errors are logged there and never reach the caller of toggle/clear.
///
/// Details:
/// - Implementations must be shareable between store instances (`Send + Sync`) so two
///   views can observe the same slot.
pub trait FavoritesSlot: Send + Sync + std::fmt::Debug {
    fn read(&self) -> io::Result<Option<String>>;
    fn write(&self, contents: &str) -> io::Result<()>;

    /// Backing file, when the slot lives on disk and can be watched.
    fn path(&self) -> Option<&Path> {
        None
    }
}

/// Slot stored as a JSON file.
#[derive(Debug, Clone)]
pub struct FileSlot {
    path: PathBuf,
}

impl FileSlot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl FavoritesSlot for FileSlot {
    fn read(&self) -> io::Result<Option<String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(s) => Ok(Some(s)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Writes to a sibling temp file and renames it over the target so watchers
    /// never observe a half-written array.
    fn write(&self, contents: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        std::fs::write(&tmp, contents.as_bytes())?;
        std::fs::rename(&tmp, &self.path)
    }

    fn path(&self) -> Option<&Path> {
        Some(&self.path)
    }
}

/// In-memory slot; used when no config directory is available and by tests.
#[derive(Debug, Default)]
pub struct MemorySlot {
    contents: Mutex<Option<String>>,
    fail_writes: AtomicBool,
    writes: AtomicUsize,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_contents(contents: &str) -> Self {
        Self {
            contents: Mutex::new(Some(contents.to_string())),
            ..Self::default()
        }
    }

    /// Make subsequent writes fail, simulating disabled storage or a full disk.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Raw contents, bypassing any store.
    pub fn snapshot(&self) -> Option<String> {
        self.contents
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Replace contents directly, as another process would.
    pub fn overwrite(&self, contents: &str) {
        *self.contents.lock().unwrap_or_else(|e| e.into_inner()) = Some(contents.to_string());
    }
}

impl FavoritesSlot for MemorySlot {
    fn read(&self) -> io::Result<Option<String>> {
        Ok(self.snapshot())
    }

    fn write(&self, contents: &str) -> io::Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(io::Error::other("storage unavailable"));
        }
        self.overwrite(contents);
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// What: Verify the file slot distinguishes "never written" from real contents.
    ///
    /// Inputs:
    /// - A temp directory with a not-yet-existing nested favorites path.
    ///
    /// Output:
    /// - `read` yields `None` before the first write and the written text afterwards.
    ///
    /// Details:
    /// - The write creates missing parent directories and leaves no `.tmp` file behind.
    fn file_slot_reads_none_then_written_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lists").join("favorites.json");
        let slot = FileSlot::new(&path);
        assert_eq!(slot.read().unwrap(), None);
        slot.write("[1,2]").unwrap();
        assert_eq!(slot.read().unwrap().as_deref(), Some("[1,2]"));
        assert_eq!(slot.path(), Some(path.as_path()));
        assert!(!dir.path().join("lists").join("favorites.json.tmp").exists());
    }

    #[test]
    fn memory_slot_counts_writes_and_can_fail() {
        let slot = MemorySlot::new();
        slot.write("[1]").unwrap();
        slot.set_fail_writes(true);
        assert!(slot.write("[2]").is_err());
        assert_eq!(slot.write_count(), 1);
        assert_eq!(slot.snapshot().as_deref(), Some("[1]"));
    }
}
