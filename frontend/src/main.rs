use log::{debug, info, warn};
use web_sys::Event;

mod config;
mod dom;
mod error;
mod behaviors {
    pub mod cards;
    pub mod contact_form;
    pub mod counter;
    pub mod menu;
    pub mod parallax;
    pub mod scroll_spy;
    pub mod slider;
    pub mod smooth_scroll;
    pub mod testimonials;
}
mod utils {
    pub mod easing;
    pub mod throttle;
}

use behaviors::{cards, contact_form, counter, menu, parallax, scroll_spy, slider, smooth_scroll, testimonials};
use config::PageConfig;
use dom::PageElements;
use error::Result;

/// Runs one feature's initializer; a failure only disables that feature.
fn wire(name: &str, outcome: Result<()>) {
    match outcome {
        Ok(()) => debug!("{} ready", name),
        Err(e) => warn!("{} disabled: {}", name, e),
    }
}

fn init_page() -> Result<()> {
    info!("Initializing page behaviors");
    let window = dom::window()?;
    let document = dom::document()?;
    let config = PageConfig::load(&document);
    let elements = PageElements::query(window, document);
    debug!("Found {} hero slides", elements.hero_slides.len());

    wire("mobile menu", menu::init(&elements));
    wire("hero slider", slider::init(&elements, &config));
    wire("smooth scroll", smooth_scroll::init(&elements, &config));
    wire("scroll spy", scroll_spy::init(&elements, &config));
    wire("counters", counter::init(&elements, &config));
    wire("contact form", contact_form::init(&elements, &config));
    wire("product cards", cards::init(&elements));
    wire("parallax", parallax::init(&elements, &config));
    wire("testimonials", testimonials::init(&elements, &config));

    if let Some(body) = elements.document.body() {
        let _ = body.class_list().add_1("loaded");
    }
    info!("Page behaviors initialized");
    Ok(())
}

fn run() {
    if let Err(e) = init_page() {
        warn!("Page behaviors unavailable: {}", e);
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum ReadyAction {
    AwaitDomContentLoaded,
    AwaitLoad,
    RunNow,
}

/// Picks when to initialize from `document.readyState`.
fn ready_action(ready_state: &str, has_images: bool) -> ReadyAction {
    match ready_state {
        "loading" => ReadyAction::AwaitDomContentLoaded,
        // Parsed but images still loading: wait so slide and section offsets are final.
        "interactive" if has_images => ReadyAction::AwaitLoad,
        _ => ReadyAction::RunNow,
    }
}

/// Defers `run` until the markup (and its images, if any) are ready.
fn when_ready() -> Result<()> {
    let window = dom::window()?;
    let document = dom::document()?;

    match ready_action(&document.ready_state(), document.images().length() > 0) {
        ReadyAction::AwaitDomContentLoaded => {
            dom::listen(&document, "DOMContentLoaded", |_: Event| run())?;
        }
        ReadyAction::AwaitLoad => {
            dom::listen(&window, "load", |_: Event| run())?;
        }
        ReadyAction::RunNow => run(),
    }
    Ok(())
}

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    console_log::init_with_level(config::log_level()).expect("error initializing log");

    info!("Starting page behaviors");
    if let Err(e) = when_ready() {
        warn!("Could not schedule page behaviors: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loading_document_waits_for_dom_content_loaded() {
        assert_eq!(ready_action("loading", false), ReadyAction::AwaitDomContentLoaded);
        assert_eq!(ready_action("loading", true), ReadyAction::AwaitDomContentLoaded);
    }

    #[test]
    fn interactive_document_waits_for_images() {
        assert_eq!(ready_action("interactive", true), ReadyAction::AwaitLoad);
        assert_eq!(ready_action("interactive", false), ReadyAction::RunNow);
    }

    #[test]
    fn complete_document_runs_immediately() {
        assert_eq!(ready_action("complete", true), ReadyAction::RunNow);
        assert_eq!(ready_action("complete", false), ReadyAction::RunNow);
    }
}
