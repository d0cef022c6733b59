mod countdown;
mod dom;
mod error;
mod leaflet;
mod logging;
mod observer;
mod page;
mod scroll_top;

use itinerary_shared::PageConfig;
use itinerary_shared::config::CONFIG_ELEMENT_ID;
use web_sys::Document;

/// Page settings come from an inline `<script type="application/json">`
/// block; a missing or malformed block falls back to the built-in trip.
fn load_config(document: &Document) -> (PageConfig, Option<String>) {
    let Some(raw) = document
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|el| el.text_content())
    else {
        return (PageConfig::default(), None);
    };
    match PageConfig::from_json(&raw) {
        Ok(config) => (config, None),
        Err(e) => (PageConfig::default(), Some(e.to_string())),
    }
}

fn main() {
    console_error_panic_hook::set_once();
    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };

    let (config, config_error) = load_config(&document);
    logging::init(config.log_level);
    if let Some(error) = config_error {
        tracing::warn!(%error, element = CONFIG_ELEMENT_ID, "page config unreadable; using defaults");
    }

    page::boot(&window, &document, &config);

    if let Err(e) = scroll_top::bind(&window, &document, &config) {
        tracing::info!(error = %e, "scroll-to-top control disabled");
    }
    if let Err(e) = countdown::mount(&document, &config) {
        tracing::info!(error = %e, "countdown disabled");
    }
}
