//! Browser demo: binds every input in `index.html` that declares a
//! placeholder, and swaps the search hints when the button is clicked.
#[cfg(feature = "web")]
use wasm_bindgen::prelude::*;

/// The hints the "swap" button alternates between.
pub fn search_hints(swapped: bool) -> serde_json::Value {
    if swapped {
        serde_json::json!(["Find a recipe", "Find an ingredient"])
    } else {
        serde_json::json!(["Search products", "Search orders", "Search customers"])
    }
}

#[cfg(feature = "web")]
#[wasm_bindgen(start)]
pub fn web_run() -> Result<(), JsValue> {
    use mogwai_placeholder::{prelude::*, web::event::EventListener};

    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Debug).map_err(|e| JsValue::from(e.to_string()))?;

    let document = mogwai_placeholder::web::document().map_err(|e| JsValue::from(e.to_string()))?;
    let body = document
        .body()
        .ok_or_else(|| JsValue::from("document has no body"))?;
    let bindings =
        mogwai_placeholder::web::bind_all(&body).map_err(|e| JsValue::from(e.to_string()))?;
    log::info!("bound {} placeholder(s)", bindings.len());

    let Some(button) = document.get_element_by_id("swap") else {
        // Nothing to swap, but the bindings must outlive this function.
        std::mem::forget(bindings);
        return Ok(());
    };
    let clicks = EventListener::new(&button, "click");
    wasm_bindgen_futures::spawn_local(async move {
        let mut swapped = false;
        loop {
            clicks.next().await;
            swapped = !swapped;
            let config = PlaceholderConfig::from_binding(&search_hints(swapped), None);
            if !bindings.update("search", config) {
                log::warn!("the search input is not bound");
            }
        }
    });
    Ok(())
}
