//! Hand an exported PNG to the browser as a file download.

use canvas::export::Export;
use js_sys::{Array, Uint8Array};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

const PNG_MIME: &str = "image/png";

/// Trigger a download of `export` through a temporary object URL.
///
/// # Errors
///
/// Returns the browser's error if the blob, URL, or anchor cannot be created.
pub fn save_png(export: &Export) -> Result<(), JsValue> {
    let bytes = Uint8Array::from(export.bytes.as_slice());
    let options = BlobPropertyBag::new();
    options.set_type(PNG_MIME);
    let blob = Blob::new_with_u8_array_sequence_and_options(&Array::of1(&bytes), &options)?;
    let href = Url::create_object_url_with_blob(&blob)?;

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("download: no document"))?;
    let anchor = document
        .create_element("a")?
        .dyn_into::<HtmlAnchorElement>()
        .map_err(|_| JsValue::from_str("download: anchor is not HtmlAnchorElement"))?;
    anchor.set_href(&href);
    anchor.set_download(&export.filename);
    anchor.click();

    log::info!("export: saved {} ({} bytes)", export.filename, export.bytes.len());
    Url::revoke_object_url(&href)
}
