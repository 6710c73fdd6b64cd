//! Page-level overrides read from `window` globals.

use folio::FolioConfig;
use wasm_bindgen::JsValue;
use web_sys::Window;

/// Partial `FolioConfig` object, camelCase keys.
pub const CONFIG_GLOBAL: &str = "FOLIO_CONFIG";
/// Log filter directives, e.g. `"folio=debug"`.
pub const LOG_FILTER_GLOBAL: &str = "FOLIO_LOG";

fn global(window: &Window, name: &str) -> Option<JsValue> {
    let value = js_sys::Reflect::get(window, &name.into()).ok()?;
    if value.is_undefined() || value.is_null() {
        None
    } else {
        Some(value)
    }
}

pub fn log_filter(window: &Window) -> Option<String> {
    global(window, LOG_FILTER_GLOBAL).and_then(|value| value.as_string())
}

/// Read the page's config override, falling back to defaults when it is
/// absent or rejected.
pub fn load(window: &Window) -> FolioConfig {
    let Some(raw) = global(window, CONFIG_GLOBAL) else {
        return FolioConfig::default();
    };
    from_js(raw)
}

pub fn from_js(raw: JsValue) -> FolioConfig {
    let config = match serde_wasm_bindgen::from_value::<FolioConfig>(raw) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(error = %err, "unreadable {CONFIG_GLOBAL}, using defaults");
            return FolioConfig::default();
        }
    };
    match config.validate() {
        Ok(()) => config,
        Err(err) => {
            tracing::warn!(error = %err, "rejected {CONFIG_GLOBAL}, using defaults");
            FolioConfig::default()
        }
    }
}
