use std::path::Path;

use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

/// What: Push a notification whenever the favorites file changes on disk.
///
/// Inputs:
/// - `path`: Favorites file; its parent directory must exist.
/// - `tx`: Channel receiving one `()` per relevant filesystem event.
///
/// Output:
/// - The watcher; dropping it stops notifications.
///
/// Details:
/// - Watches the parent directory rather than the file, because writes land via rename
///   and a rename does not produce modify events on the original inode.
/// - Events for other files in the directory are ignored.
pub fn watch_favorites_file(
    path: &Path,
    tx: mpsc::UnboundedSender<()>,
) -> notify::Result<RecommendedWatcher> {
    let parent = path
        .parent()
        .ok_or_else(|| notify::Error::generic("favorites path has no parent directory"))?
        .to_path_buf();
    let file_name = path
        .file_name()
        .ok_or_else(|| notify::Error::generic("favorites path has no file name"))?
        .to_owned();

    let mut watcher =
        notify::recommended_watcher(move |res: notify::Result<notify::Event>| match res {
            Ok(event) => {
                if !event
                    .paths
                    .iter()
                    .any(|p| p.file_name() == Some(file_name.as_os_str()))
                {
                    return;
                }
                if event.kind.is_access() {
                    return;
                }
                tracing::debug!(kind = ?event.kind, "favorites file changed");
                if tx.send(()).is_err() {
                    tracing::debug!("favorites change receiver dropped");
                }
            }
            Err(err) => tracing::error!(%err, "favorites watcher error"),
        })?;
    watcher.watch(&parent, RecursiveMode::NonRecursive)?;
    tracing::debug!(path = %path.display(), "watching favorites file");
    Ok(watcher)
}
