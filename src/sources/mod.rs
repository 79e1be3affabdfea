//! Product API client built on curl.
//!
//! curl runs on the blocking pool; every public fetch takes a `FetchToken` and
//! reports `CatalogError::Cancelled` instead of a result once the token is cancelled.

use crate::error::CatalogError;
use crate::util::{BODY_EXCERPT_CHARS, curl_args, excerpt};

mod products;

pub use products::{
    decode_product, decode_product_list, fetch_detail, fetch_product, fetch_products,
};

type Result<T> = std::result::Result<T, CatalogError>;

/// Status and body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    /// Convert non-2xx responses into `CatalogError::Http` with a body excerpt.
    pub(crate) fn require_success(self) -> Result<String> {
        if (200..300).contains(&self.status) {
            Ok(self.body)
        } else {
            Err(CatalogError::Http {
                status: self.status,
                excerpt: excerpt(&self.body, BODY_EXCERPT_CHARS),
            })
        }
    }
}

/// What: GET a URL with curl and capture status and body.
///
/// Input: `url` HTTP(S) to request
/// Output: `Ok(HttpResponse)` for any completed exchange; `Err(Transport)` when curl itself fails
///
/// Details: The status code is read from the trailing line written by `-w "\n%{http_code}"`.
/// A status of `000` means curl never got a response and is reported as a transport error.
fn curl_http(url: &str) -> Result<HttpResponse> {
    let args = curl_args(url, &["-H", "accept: application/json"]);
    let out = std::process::Command::new("curl").args(&args).output()?;
    if !out.status.success() {
        let stderr = String::from_utf8_lossy(&out.stderr);
        let msg = stderr.trim();
        return Err(CatalogError::Transport(if msg.is_empty() {
            format!("curl failed: {:?}", out.status)
        } else {
            msg.to_string()
        }));
    }
    parse_curl_output(&String::from_utf8_lossy(&out.stdout))
}

fn parse_curl_output(stdout: &str) -> Result<HttpResponse> {
    let (body, code) = stdout.rsplit_once('\n').unwrap_or(("", stdout));
    let status: u16 = code.trim().parse().map_err(|_| {
        CatalogError::Transport(format!("missing HTTP status in curl output: {code:?}"))
    })?;
    if status == 0 {
        return Err(CatalogError::Transport("no response from server".into()));
    }
    Ok(HttpResponse {
        status,
        body: body.to_string(),
    })
}

#[cfg(not(target_os = "windows"))]
#[cfg(test)]
static TEST_MUTEX: std::sync::OnceLock<std::sync::Mutex<()>> = std::sync::OnceLock::new();

#[cfg(not(target_os = "windows"))]
#[cfg(test)]
/// What: Provide a shared mutex to serialize tests that mutate PATH or curl shims.
///
/// Input: None.
/// Output: `&'static Mutex<()>` guard to synchronize tests touching global state.
///
/// Details: Lazily initializes a global `Mutex` via `OnceLock` for cross-test coordination.
pub(crate) fn test_mutex() -> &'static std::sync::Mutex<()> {
    TEST_MUTEX.get_or_init(|| std::sync::Mutex::new(()))
}

#[cfg(not(target_os = "windows"))]
#[cfg(test)]
/// What: Acquire test mutex lock with automatic poison recovery.
pub(crate) fn lock_test_mutex() -> std::sync::MutexGuard<'static, ()> {
    test_mutex().lock().unwrap_or_else(|e| e.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// What: Split curl stdout into body and status.
    ///
    /// Inputs:
    /// - Outputs with a multi-line body, an empty body, a `000` status and no status at all.
    ///
    /// Output:
    /// - Body and status recovered for real responses; transport errors otherwise.
    fn parse_curl_output_splits_body_and_status() {
        let r = parse_curl_output("[1,\n2]\n200").unwrap();
        assert_eq!(r.status, 200);
        assert_eq!(r.body, "[1,\n2]");

        let r = parse_curl_output("\n404").unwrap();
        assert_eq!((r.status, r.body.as_str()), (404, ""));

        assert!(matches!(
            parse_curl_output("\n000"),
            Err(CatalogError::Transport(_))
        ));
        assert!(matches!(
            parse_curl_output("no status"),
            Err(CatalogError::Transport(_))
        ));
    }

    #[test]
    fn require_success_maps_error_statuses() {
        let ok = HttpResponse {
            status: 204,
            body: "x".into(),
        };
        assert_eq!(ok.require_success().unwrap(), "x");

        let err = HttpResponse {
            status: 500,
            body: format!("  {}  ", "e".repeat(300)),
        }
        .require_success()
        .unwrap_err();
        match err {
            CatalogError::Http { status, excerpt } => {
                assert_eq!(status, 500);
                assert_eq!(excerpt.len(), 120);
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
