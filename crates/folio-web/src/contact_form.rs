//! Contact form: inline validation messages and the local storage log.

use std::rc::Rc;

use folio::contact::{self, ContactForm, ContactSubmission, Field, SubmissionStore};
use folio::{Dom, FolioConfig, FolioError, Result, Scheduler};
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlFormElement, Node, Storage};

use crate::host::{WebHost, js_error, listen};

const ERROR_CLASS: &str = "form-error";
const ERROR_CLASSES: &str = "form-error text-danger mt-1";
const SUCCESS_ID: &str = "form-success";
const SUCCESS_CLASSES: &str = "alert alert-success mt-3";

/// `window.localStorage` under one key.
pub struct LocalStorageStore {
    key: String,
}

impl LocalStorageStore {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    fn storage(&self) -> Result<Storage> {
        web_sys::window()
            .ok_or_else(|| FolioError::Storage("no window".into()))?
            .local_storage()
            .map_err(|err| FolioError::Storage(format!("{err:?}")))?
            .ok_or_else(|| FolioError::Storage("local storage disabled".into()))
    }
}

impl SubmissionStore for LocalStorageStore {
    fn load(&self) -> Result<Option<String>> {
        self.storage()?
            .get_item(&self.key)
            .map_err(|err| FolioError::Storage(format!("{err:?}")))
    }

    fn save(&self, value: &str) -> Result<()> {
        self.storage()?
            .set_item(&self.key, value)
            .map_err(|err| FolioError::Storage(format!("{err:?}")))
    }
}

pub fn init(host: &Rc<WebHost>, config: &Rc<FolioConfig>) -> Result<()> {
    let Some(form) = host.query(&config.selectors.contact_form) else {
        tracing::trace!("no contact form");
        return Ok(());
    };
    let form: HtmlFormElement = form
        .dyn_into()
        .map_err(|_| FolioError::Host("contact form is not a <form>".into()))?;

    for field in Field::ALL {
        let Some(control) = control(&form, field) else {
            continue;
        };
        let events: &[&str] = match control.tag_name().as_str() {
            "SELECT" | "TEXTAREA" => &["input", "change"],
            _ => &["input"],
        };
        for event in events {
            let cleared = control.clone();
            listen(&control, event, move |_| clear_error(&cleared))?;
        }
    }

    let store = LocalStorageStore::new(&config.contact.storage_key);
    let submit_host = host.clone();
    let submit_config = config.clone();
    let submitted = form.clone();
    listen(&form, "submit", move |event| {
        event.prevent_default();
        submit(&submit_host, &submit_config, &submitted, &store);
    })
}

fn submit(host: &Rc<WebHost>, config: &FolioConfig, form: &HtmlFormElement, store: &LocalStorageStore) {
    clear_success(host);

    let values = read_form(form);
    let errors = contact::validate(&values);
    for field in Field::ALL {
        let Some(control) = control(form, field) else {
            continue;
        };
        match errors.iter().find(|error| error.field == field) {
            Some(error) => {
                if let Err(err) = set_error(host, &control, field, error.message) {
                    tracing::warn!(field = field.name(), error = %err, "could not show field error");
                }
            }
            None => clear_error(&control),
        }
    }
    if !errors.is_empty() {
        tracing::debug!(errors = errors.len(), "contact form rejected");
        return;
    }

    let stored = ContactSubmission::from_form(&values, host.now_ms())
        .and_then(|submission| contact::save_submission(store, &submission));
    if let Err(err) = &stored {
        tracing::error!(error = %err, "contact submission not stored");
    }
    if let Err(err) = show_success(host, form, contact::success_message(stored.is_ok())) {
        tracing::warn!(error = %err, "could not show success message");
    }

    let clear_host = host.clone();
    host.set_timeout(
        config.contact.success_clear_ms,
        Box::new(move || clear_success(&clear_host)),
    );
    form.reset();
    for field in Field::ALL {
        if let Some(control) = control(form, field) {
            clear_error(&control);
        }
    }
}

fn control(form: &HtmlFormElement, field: Field) -> Option<Element> {
    form.query_selector(&format!("[name=\"{}\"]", field.name()))
        .ok()
        .flatten()
}

fn read_form(form: &HtmlFormElement) -> ContactForm {
    let mut values = ContactForm::default();
    for field in Field::ALL {
        let value = control(form, field)
            .and_then(|control| js_sys::Reflect::get(&control, &"value".into()).ok())
            .and_then(|value| value.as_string())
            .unwrap_or_default();
        values.set(field, value);
    }
    values
}

fn set_error(host: &WebHost, control: &Element, field: Field, message: &str) -> Result<()> {
    let parent = control
        .parent_element()
        .ok_or_else(|| FolioError::Host("form control has no parent".into()))?;
    let error = match parent
        .query_selector(&format!(".{ERROR_CLASS}"))
        .map_err(js_error)?
    {
        Some(error) => error,
        None => {
            let error = host.document().create_element("div").map_err(js_error)?;
            error.set_class_name(ERROR_CLASSES);
            error.set_attribute("role", "alert").map_err(js_error)?;
            error.set_attribute("aria-live", "polite").map_err(js_error)?;
            parent.append_child(&error).map_err(js_error)?;
            error
        }
    };
    error.set_text_content(Some(message));

    if error.id().is_empty() {
        error.set_id(&field.error_id());
    }
    control.set_attribute("aria-invalid", "true").map_err(js_error)?;
    control
        .set_attribute("aria-describedby", &error.id())
        .map_err(js_error)
}

fn clear_error(control: &Element) {
    let error = control
        .parent_element()
        .and_then(|parent| parent.query_selector(&format!(".{ERROR_CLASS}")).ok().flatten());
    if let Some(error) = error {
        error.set_text_content(Some(""));
    }
    let _ = control.remove_attribute("aria-invalid");
    let _ = control.remove_attribute("aria-describedby");
}

fn show_success(host: &WebHost, form: &HtmlFormElement, message: &str) -> Result<()> {
    let banner = match host.document().get_element_by_id(SUCCESS_ID) {
        Some(banner) => banner,
        None => {
            let banner = host.document().create_element("div").map_err(js_error)?;
            banner.set_id(SUCCESS_ID);
            banner.set_class_name(SUCCESS_CLASSES);
            let parent = form
                .parent_element()
                .ok_or_else(|| FolioError::Host("contact form has no parent".into()))?;
            let before: &Node = form;
            parent.insert_before(&banner, Some(before)).map_err(js_error)?;
            banner
        }
    };
    banner.set_text_content(Some(message));
    Ok(())
}

fn clear_success(host: &WebHost) {
    if let Some(banner) = host.document().get_element_by_id(SUCCESS_ID) {
        banner.remove();
    }
}
