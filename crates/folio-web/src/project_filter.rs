use std::rc::Rc;

use folio::filter::ProjectFilter;
use folio::{Dom, FolioConfig, Result};

use crate::host::{WebHost, listen};

const TARGET_ATTRIBUTE: &str = "data-bs-target";

pub fn init(host: &Rc<WebHost>, config: &Rc<FolioConfig>) -> Result<()> {
    let filter = ProjectFilter::new(host.clone(), config.clone());
    filter.reveal_initial();

    let tabs = host.query_all(&config.selectors.project_tabs);
    for tab in &tabs {
        let filter = filter.clone();
        let tab_host = host.clone();
        let clicked = tab.clone();
        listen(tab, "click", move |_| {
            if let Some(target) = tab_host.attribute(&clicked, TARGET_ATTRIBUTE) {
                filter.switch_to(&target);
            }
        })?;
    }
    tracing::debug!(tabs = tabs.len(), "project tabs bound");
    Ok(())
}
