use serde_json::Value;

use super::Result;
use crate::error::CatalogError;
use crate::logic::requests::FetchToken;
use crate::state::{DetailBundle, ProductRecord};

/// What: Decode a product list response.
///
/// Inputs:
/// - `body`: Response text of `GET /products`.
///
/// Output:
/// - Decodable products in response order; `Err(Decode)` only when `body` is not JSON.
///
/// Details:
/// - A JSON value that is not an array yields an empty list.
/// - Elements that do not decode as a product are skipped and logged.
pub fn decode_product_list(body: &str) -> Result<Vec<ProductRecord>> {
    let value: Value = serde_json::from_str(body)?;
    let Some(arr) = value.as_array() else {
        tracing::warn!("product list response is not an array; treating as empty");
        return Ok(Vec::new());
    };
    let mut out = Vec::with_capacity(arr.len());
    for (idx, item) in arr.iter().enumerate() {
        match serde_json::from_value::<ProductRecord>(item.clone()) {
            Ok(p) => out.push(p),
            Err(e) => tracing::warn!(index = idx, error = %e, "skipping undecodable product"),
        }
    }
    Ok(out)
}

/// Decode a single product response.
pub fn decode_product(body: &str) -> Result<ProductRecord> {
    Ok(serde_json::from_str(body)?)
}

async fn get(url: String, token: &FetchToken) -> Result<String> {
    if token.is_cancelled() {
        return Err(CatalogError::Cancelled);
    }
    tracing::debug!(%url, "GET");
    let resp = tokio::task::spawn_blocking(move || super::curl_http(&url))
        .await
        .map_err(|e| CatalogError::Transport(format!("fetch task failed: {e}")))??;
    if token.is_cancelled() {
        return Err(CatalogError::Cancelled);
    }
    resp.require_success()
}

fn products_url(api_base: &str) -> String {
    format!("{}/products", api_base.trim_end_matches('/'))
}

/// What: Fetch the full product list.
///
/// Inputs:
/// - `api_base`: API root such as `https://fakestoreapi.com`.
/// - `token`: Cancellation token for this request.
///
/// Output:
/// - Products on success; `Http`, `Transport`, `Decode` or `Cancelled` otherwise.
///
/// Details:
/// - No automatic retry; the UI offers a retry key instead.
pub async fn fetch_products(api_base: &str, token: &FetchToken) -> Result<Vec<ProductRecord>> {
    let body = get(products_url(api_base), token).await?;
    let list = decode_product_list(&body)?;
    tracing::info!(count = list.len(), "product list loaded");
    Ok(list)
}

/// What: Fetch one product by id.
///
/// Details:
/// - Ids that are not positive fail with `InvalidIdentifier` before any request is made.
pub async fn fetch_product(
    api_base: &str,
    product_id: i64,
    token: &FetchToken,
) -> Result<ProductRecord> {
    if product_id <= 0 {
        return Err(CatalogError::InvalidIdentifier(product_id.to_string()));
    }
    let url = format!("{}/{product_id}", products_url(api_base));
    let body = get(url, token).await?;
    decode_product(&body)
}

/// What: Fetch everything the detail screen needs.
///
/// Inputs:
/// - `product_id`: Product to show.
///
/// Output:
/// - `DetailBundle` with the product and the full list used for prev/next.
///
/// Details:
/// - Both requests run concurrently. A failed product request fails the bundle; a failed
///   list request only degrades navigation to an empty list.
pub async fn fetch_detail(
    api_base: &str,
    product_id: i64,
    token: &FetchToken,
) -> Result<DetailBundle> {
    let (product, list) = tokio::join!(
        fetch_product(api_base, product_id, token),
        fetch_products(api_base, token)
    );
    let product = product?;
    let all_products = match list {
        Ok(list) => list,
        Err(CatalogError::Cancelled) => return Err(CatalogError::Cancelled),
        Err(e) => {
            tracing::warn!(error = %e, "product list unavailable for detail navigation");
            Vec::new()
        }
    };
    Ok(DetailBundle {
        product,
        all_products,
    })
}
