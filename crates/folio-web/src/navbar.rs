use std::cell::RefCell;
use std::rc::Rc;

use folio::navbar::{self, ACTIVE_LINK_CLASS, NavbarBehavior, SectionBounds};
use folio::{Dom, FolioConfig, FolioError, Result};
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement};

use crate::host::{WebHost, listen};

/// Scroll look, mobile collapse state and scroll spy.
pub fn init(host: &Rc<WebHost>, config: &FolioConfig) -> Result<()> {
    let selectors = &config.selectors;
    let bar = host
        .query(&selectors.navbar)
        .ok_or_else(|| FolioError::missing(&selectors.navbar))?;
    let window = host.window().clone();

    {
        let host = host.clone();
        let bar = bar.clone();
        let behavior = RefCell::new(NavbarBehavior::new(&config.navbar));
        listen(&window, "scroll", move |_| {
            let mode = behavior.borrow_mut().on_scroll(host.scroll_y());
            if let Some(mode) = mode {
                mode.apply(host.as_ref(), &bar);
            }
        })?;
    }

    if let Some(collapse) = host.query(&selectors.nav_collapse) {
        for (event, open) in [("show.bs.collapse", true), ("hide.bs.collapse", false)] {
            let host = host.clone();
            let bar = bar.clone();
            listen(&collapse, event, move |_| navbar::set_open(host.as_ref(), &bar, open))?;
        }
    }

    let spy_host = host.clone();
    let sections = selectors.sections.clone();
    let links = selectors.nav_links.clone();
    let offset = config.navbar.spy_offset;
    listen(&window, "scroll", move |_| {
        let bounds: Vec<SectionBounds> = spy_host
            .query_all(&sections)
            .iter()
            .filter_map(section_bounds)
            .collect();
        let current = navbar::current_section(&bounds, spy_host.scroll_y(), offset);
        for link in spy_host.query_all(&links) {
            let href = spy_host.attribute(&link, "href").unwrap_or_default();
            if navbar::link_is_active(&href, current) {
                spy_host.add_class(&link, ACTIVE_LINK_CLASS);
            } else {
                spy_host.remove_class(&link, ACTIVE_LINK_CLASS);
            }
        }
    })?;

    Ok(())
}

fn section_bounds(section: &Element) -> Option<SectionBounds> {
    let element = section.dyn_ref::<HtmlElement>()?;
    let id = section.id();
    Some(SectionBounds {
        id: (!id.is_empty()).then_some(id),
        top: f64::from(element.offset_top()),
        height: f64::from(element.offset_height()),
    })
}
