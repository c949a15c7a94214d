//! Asset existence probes and byte fetches.
//!
//! ERROR HANDLING
//! ==============
//! Nothing here panics or surfaces to the user. Callers get `ProbeError`s and
//! decide whether to drop the asset from the menu or leave the overlay unset.

use gloo_net::http::{Method, RequestBuilder, Response};

use crate::state::menu::{AssetProbe, ProbeError};

/// Checks candidates with an HTTP `HEAD`; any 2xx status counts as present.
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpProbe;

impl AssetProbe for HttpProbe {
    async fn exists(&self, url: &str) -> Result<bool, ProbeError> {
        let resp = RequestBuilder::new(url)
            .method(Method::HEAD)
            .send()
            .await
            .map_err(|e| ProbeError::Request(e.to_string()))?;
        Ok(is_success(&resp))
    }
}

/// Download an asset's bytes for decoding.
///
/// # Errors
///
/// Returns `Request` if the request or body read fails and `Status` for a
/// non-2xx response.
pub async fn fetch_bytes(url: &str) -> Result<Vec<u8>, ProbeError> {
    let resp = RequestBuilder::new(url)
        .method(Method::GET)
        .send()
        .await
        .map_err(|e| ProbeError::Request(e.to_string()))?;
    if !is_success(&resp) {
        return Err(ProbeError::Status(resp.status()));
    }
    resp.binary().await.map_err(|e| ProbeError::Request(e.to_string()))
}

fn is_success(resp: &Response) -> bool {
    (200..300).contains(&resp.status())
}
