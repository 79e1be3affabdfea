//! Configuration directory layout and `settings.conf` loading.

mod paths;
mod settings;

pub use paths::{config_dir, favorites_path, lists_dir, logs_dir, settings_path};
pub use settings::{
    DEFAULT_API_BASE, DEFAULT_SEARCH_DEBOUNCE_MS, MAX_PAGE_SIZE, SETTINGS_SKELETON_CONTENT,
    Settings, ensure_settings_skeleton, parse_settings, settings, strip_inline_comment,
};
