use std::rc::Rc;

use folio::scroll_top::button_display;
use folio::{Dom, FolioConfig, Result};

use crate::host::{WebHost, listen};

pub fn init(host: &Rc<WebHost>, config: &FolioConfig) -> Result<()> {
    let Some(button) = host.query(&config.selectors.scroll_top_button) else {
        tracing::trace!("no scroll-to-top button");
        return Ok(());
    };

    let window = host.window().clone();
    let scroll_host = host.clone();
    let shown = button.clone();
    let threshold = config.scroll_top_offset;
    listen(&window, "scroll", move |_| {
        scroll_host.set_display(&shown, button_display(scroll_host.scroll_y(), threshold));
    })?;

    let click_host = host.clone();
    listen(&button, "click", move |_| click_host.scroll_to_top_smooth())
}
