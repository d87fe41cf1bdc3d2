use std::future::Future;

use gloo_timers::future::TimeoutFuture;
use log::{debug, warn};
use wasm_bindgen::JsCast;
use web_sys::{Event, HtmlButtonElement, HtmlFormElement, Window};

use crate::config::PageConfig;
use crate::dom::{self, PageElements};
use crate::error::Result;

/// What a submission does to the page while it is in flight.
pub trait FormControls {
    /// Disables the submit control and swaps in the busy label.
    fn set_busy(&mut self, label: &str);
    /// Re-enables the submit control with its original label.
    fn restore(&mut self);
    fn clear_fields(&mut self);
    fn notify(&mut self, message: &str);
}

/// Runs one submission through `send`, always restoring the controls afterwards.
pub async fn submit<C, F>(controls: &mut C, send: F, config: &PageConfig) -> Result<()>
where
    C: FormControls,
    F: Future<Output = Result<()>>,
{
    controls.set_busy(&config.sending_label);
    let outcome = send.await;
    match &outcome {
        Ok(()) => {
            controls.notify(&config.success_message);
            controls.clear_fields();
        }
        Err(e) => {
            warn!("Contact form submission failed: {}", e);
            controls.notify(&config.failure_message);
        }
    }
    controls.restore();
    outcome
}

/// Stand-in for a real request; nothing leaves the page.
async fn simulated_send(delay_ms: u32) -> Result<()> {
    TimeoutFuture::new(delay_ms).await;
    Ok(())
}

struct DomForm {
    window: Window,
    form: HtmlFormElement,
    button: Option<HtmlButtonElement>,
    original_label: Option<String>,
}

impl FormControls for DomForm {
    fn set_busy(&mut self, label: &str) {
        if let Some(button) = &self.button {
            self.original_label = button.text_content();
            button.set_disabled(true);
            button.set_text_content(Some(label));
        }
    }

    fn restore(&mut self) {
        if let Some(button) = &self.button {
            button.set_disabled(false);
            button.set_text_content(self.original_label.as_deref());
        }
    }

    fn clear_fields(&mut self) {
        self.form.reset();
    }

    fn notify(&mut self, message: &str) {
        let _ = self.window.alert_with_message(message);
    }
}

pub fn init(elements: &PageElements, config: &PageConfig) -> Result<()> {
    let Some(form) = elements.contact_form.clone() else {
        return Ok(());
    };

    let target = form.clone();
    let window = elements.window.clone();
    let config = config.clone();
    dom::listen(&target, "submit", move |e: Event| {
        e.prevent_default();
        let button = form
            .query_selector("button[type=\"submit\"]")
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<HtmlButtonElement>().ok());
        let mut controls = DomForm {
            window: window.clone(),
            form: form.clone(),
            button,
            original_label: None,
        };
        let config = config.clone();
        wasm_bindgen_futures::spawn_local(async move {
            let delay = config.form_delay_ms;
            let _ = submit(&mut controls, simulated_send(delay), &config).await;
            debug!("Contact form submission finished");
        });
    })?;
    Ok(())
}
