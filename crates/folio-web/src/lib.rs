//! Folio Web - portfolio page behavior in the browser
//!
//! Binds the `folio` core to the live document: the preloader sequencer,
//! navbar, scroll-to-top button, contact form, project tabs and CV link.

use std::rc::Rc;

use folio::{Bootstrap, BootstrapReport, FolioConfig};
use wasm_bindgen::prelude::*;

pub mod config;
pub mod contact_form;
pub mod cv_download;
pub mod host;
pub mod logging;
pub mod navbar;
pub mod project_filter;
pub mod scroll_top;

pub use host::WebHost;

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let host = Rc::new(WebHost::new().map_err(|e| JsValue::from_str(&e.to_string()))?);
    logging::init(config::log_filter(host.window()).as_deref());

    let config = Rc::new(config::load(host.window()));
    let report = start(&host, &config);
    if !report.is_clean() {
        tracing::warn!(failed = ?report.failed, "some page features are disabled");
    }
    Ok(())
}

/// Start every page feature against `host`.
pub fn start(host: &Rc<WebHost>, config: &Rc<FolioConfig>) -> BootstrapReport {
    Bootstrap::new()
        .register("preloader", || {
            folio::start_sequence(host.clone(), config.clone());
            Ok(())
        })
        .register("cv-download", || cv_download::init(host, config))
        .register("contact-form", || contact_form::init(host, config))
        .register("project-filter", || project_filter::init(host, config))
        .register("scroll-to-top", || scroll_top::init(host, config))
        .register("navbar", || navbar::init(host, config))
        .run()
}
