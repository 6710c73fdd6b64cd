use std::rc::Rc;

use folio::{Dom, FolioConfig, Result};
use wasm_bindgen::JsCast;
use web_sys::HtmlAnchorElement;

use crate::host::{WebHost, js_error, listen};

pub fn init(host: &Rc<WebHost>, config: &FolioConfig) -> Result<()> {
    let Some(link) = host.query(&config.selectors.cv_link) else {
        tracing::trace!("no CV link");
        return Ok(());
    };

    let click_host = host.clone();
    let clicked = link.clone();
    let file_name = config.cv_file_name.clone();
    listen(&link, "click", move |event| {
        event.prevent_default();
        let Some(url) = click_host.attribute(&clicked, "href") else {
            return;
        };
        if let Err(err) = download(&click_host, &url, &file_name) {
            tracing::warn!(error = %err, "download link failed, opening in a new tab");
            if let Err(err) = click_host
                .window()
                .open_with_url_and_target(&url, "_blank")
            {
                tracing::error!(error = ?err, "could not open CV");
            }
        }
    })
}

/// Click a temporary hidden anchor carrying the `download` attribute.
fn download(host: &WebHost, url: &str, file_name: &str) -> Result<()> {
    let document = host.document();
    let body = document
        .body()
        .ok_or_else(|| folio::FolioError::Host("no body".into()))?;
    let anchor: HtmlAnchorElement = document
        .create_element("a")
        .map_err(js_error)?
        .dyn_into()
        .map_err(|_| folio::FolioError::Host("created element is not an anchor".into()))?;
    anchor.set_href(url);
    anchor.set_download(file_name);
    anchor.set_target("_blank");
    anchor.style().set_property("display", "none").map_err(js_error)?;

    body.append_child(&anchor).map_err(js_error)?;
    anchor.click();
    body.remove_child(&anchor).map_err(js_error)?;
    Ok(())
}
