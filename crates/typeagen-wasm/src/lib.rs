//! WASM bindings for typeagen-core.
//!
//! Exposes interface generation as `#[wasm_bindgen]` functions callable from
//! JavaScript/TypeScript, for editor plugins and playgrounds that paste a
//! response body and want the interfaces back.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p typeagen-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir pkg/ \
//!   target/wasm32-unknown-unknown/release/typeagen_wasm.wasm
//! ```

use typeagen_core::{SynthOptions, WorklistOrder};
use wasm_bindgen::prelude::*;

/// Generate TypeScript interfaces for a JSON document.
///
/// Returns the interface text, or throws a JS error if the document is
/// malformed or contains an empty array.
#[wasm_bindgen]
pub fn generate(json: &str, root_name: &str) -> std::result::Result<String, JsValue> {
    typeagen_core::synthesize(json, root_name).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Like [`generate`], with breadth-first ordering and shape deduplication
/// selectable.
#[wasm_bindgen(js_name = generateWithOptions)]
pub fn generate_with_options(
    json: &str,
    root_name: &str,
    breadth_first: bool,
    dedupe: bool,
) -> std::result::Result<String, JsValue> {
    let options = SynthOptions {
        order: if breadth_first {
            WorklistOrder::Fifo
        } else {
            WorklistOrder::Lifo
        },
        dedupe,
    };
    typeagen_core::synthesize_with(json, root_name, None, options)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
