use std::fs;
use std::path::Path;

use crate::logic::paging::DEFAULT_PAGE_SIZE;
use crate::state::{QueryScope, SortMode};

pub const DEFAULT_API_BASE: &str = "https://fakestoreapi.com";
pub const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 200;
pub const MAX_SEARCH_DEBOUNCE_MS: u64 = 2000;
pub const MAX_PAGE_SIZE: usize = 100;

/// User-configurable settings loaded from `settings.conf`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    pub api_base: String,
    pub page_size: usize,
    pub sort_mode: SortMode,
    pub search_scope: QueryScope,
    pub search_debounce_ms: u64,
    /// Empty means "use the default level".
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            sort_mode: SortMode::default(),
            search_scope: QueryScope::default(),
            search_debounce_ms: DEFAULT_SEARCH_DEBOUNCE_MS,
            log_level: String::new(),
        }
    }
}

pub const SETTINGS_SKELETON_CONTENT: &str = "\
# product-explorer settings
# Lines are key = value. Comments start with # or //.

# Product API root
api_base = https://fakestoreapi.com

# Products shown per page and added by \"load more\" (1-100)
page_size = 8

# featured | price-asc | price-desc | rating
sort_mode = featured

# title | all  (all = title, category and description)
search_scope = all

# Idle time before a typed query is applied, in milliseconds (0-2000)
search_debounce_ms = 200

# trace | debug | info | warn | error  (RUST_LOG takes precedence)
# log_level = info
";

/// What: Remove a trailing `#` or `//` comment from a value.
///
/// Details:
/// - A marker only counts at the start or after whitespace, so URLs like `https://x`
///   and fragments like `a#b` survive.
pub fn strip_inline_comment(val: &str) -> &str {
    let bytes = val.as_bytes();
    for (i, &b) in bytes.iter().enumerate() {
        let at_boundary = i == 0 || bytes[i - 1].is_ascii_whitespace();
        if !at_boundary {
            continue;
        }
        if b == b'#' || (b == b'/' && bytes.get(i + 1) == Some(&b'/')) {
            return val[..i].trim_end();
        }
    }
    val.trim_end()
}

fn parse_bool(val: &str) -> Option<bool> {
    match val.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// What: Parse `settings.conf` content.
///
/// Inputs:
/// - `content`: Full file text.
///
/// Output:
/// - `Settings` with every recognized key applied over the defaults.
///
/// Details:
/// - Keys are lowercased and `.`, `-` and spaces become `_`.
/// - Unknown keys and unparsable values are ignored with a `debug` log.
/// - `page_size` is clamped to 1..=100 and `search_debounce_ms` to at most 2000.
pub fn parse_settings(content: &str) -> Settings {
    let mut out = Settings::default();
    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with("//") {
            continue;
        }
        let Some((raw_key, raw_val)) = trimmed.split_once('=') else {
            continue;
        };
        let key = raw_key.trim().to_lowercase().replace(['.', '-', ' '], "_");
        let val = strip_inline_comment(raw_val.trim());
        let applied = match key.as_str() {
            "api_base" | "api_url" | "base_url" => {
                let v = val.trim_end_matches('/');
                if v.is_empty() {
                    false
                } else {
                    out.api_base = v.to_string();
                    true
                }
            }
            "page_size" | "per_page" => val
                .parse::<usize>()
                .map(|v| out.page_size = v.clamp(1, MAX_PAGE_SIZE))
                .is_ok(),
            "sort_mode" | "results_sort" => SortMode::from_config_key(val)
                .map(|m| out.sort_mode = m)
                .is_some(),
            "search_scope" => QueryScope::from_config_key(val)
                .map(|s| out.search_scope = s)
                .is_some(),
            "search_title_only" => parse_bool(val)
                .map(|b| {
                    out.search_scope = if b {
                        QueryScope::Title
                    } else {
                        QueryScope::TitleCategoryDescription
                    }
                })
                .is_some(),
            "search_debounce_ms" | "debounce_ms" => val
                .parse::<u64>()
                .map(|v| out.search_debounce_ms = v.min(MAX_SEARCH_DEBOUNCE_MS))
                .is_ok(),
            "log_level" => {
                out.log_level = val.to_ascii_lowercase();
                true
            }
            _ => false,
        };
        if !applied {
            tracing::debug!(key = %key, value = %val, "ignored settings entry");
        }
    }
    out
}

/// What: Write the commented skeleton when no settings file exists.
///
/// Output:
/// - `Ok(true)` when the skeleton was written; `Ok(false)` when a file already existed.
pub fn ensure_settings_skeleton(path: &Path) -> std::io::Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    fs::write(path, SETTINGS_SKELETON_CONTENT)?;
    Ok(true)
}

/// What: Load user settings from `settings.conf` under the config directory.
///
/// Output:
/// - A `Settings` value; defaults when the file is missing or unreadable.
///
/// Details:
/// - A missing file is replaced by the skeleton so users can discover the keys.
pub fn settings() -> Settings {
    let path = super::settings_path();
    match fs::read_to_string(&path) {
        Ok(content) => parse_settings(&content),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            if let Err(err) = ensure_settings_skeleton(&path) {
                tracing::warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to write settings skeleton"
                );
            }
            Settings::default()
        }
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "failed to read settings; using defaults"
            );
            Settings::default()
        }
    }
}
