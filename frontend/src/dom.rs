//! DOM lookups and listener plumbing shared by every behavior.
//!
//! Elements are queried once on page-ready into [`PageElements`] and handed to
//! each initializer explicitly. Listeners live as long as the page, so their
//! closures are leaked on registration.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::convert::FromWasmAbi;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, EventTarget, HtmlElement, Window};

use crate::error::{BehaviorError, Result};

pub fn window() -> Result<Window> {
    web_sys::window().ok_or(BehaviorError::MissingWindow)
}

pub fn document() -> Result<Document> {
    window()?.document().ok_or(BehaviorError::MissingDocument)
}

/// First match for `selector`, or `None` when absent or the selector is invalid.
pub fn query<T: JsCast>(root: &Document, selector: &str) -> Option<T> {
    root.query_selector(selector)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<T>().ok())
}

pub fn query_all<T: JsCast>(root: &Document, selector: &str) -> Vec<T> {
    match root.query_selector_all(selector) {
        Ok(list) => collect(&list),
        Err(_) => Vec::new(),
    }
}

pub fn query_all_in<T: JsCast>(root: &Element, selector: &str) -> Vec<T> {
    match root.query_selector_all(selector) {
        Ok(list) => collect(&list),
        Err(_) => Vec::new(),
    }
}

fn collect<T: JsCast>(list: &web_sys::NodeList) -> Vec<T> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<T>().ok())
        .collect()
}

/// Registers `handler` for `event` on `target` for the rest of the page's life.
pub fn listen<E, F>(target: &EventTarget, event: &str, handler: F) -> Result<()>
where
    E: FromWasmAbi + 'static,
    F: FnMut(E) + 'static,
{
    let closure = Closure::<dyn FnMut(E)>::new(handler);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

pub fn set_style(el: &HtmlElement, property: &str, value: &str) -> Result<()> {
    el.style().set_property(property, value)?;
    Ok(())
}

pub fn clear_style(el: &HtmlElement, property: &str) -> Result<()> {
    el.style().remove_property(property)?;
    Ok(())
}

/// Element references every behavior works from.
pub struct PageElements {
    pub window: Window,
    pub document: Document,
    pub mobile_menu_toggle: Option<HtmlElement>,
    pub nav: Option<HtmlElement>,
    pub nav_links: Vec<HtmlElement>,
    pub hero: Option<HtmlElement>,
    pub hero_slider: Option<HtmlElement>,
    pub hero_slides: Vec<HtmlElement>,
    pub prev_button: Option<HtmlElement>,
    pub next_button: Option<HtmlElement>,
    pub sections: Vec<HtmlElement>,
    pub anchors: Vec<HtmlElement>,
    pub stats_section: Option<Element>,
    pub contact_form: Option<web_sys::HtmlFormElement>,
    pub product_cards: Vec<HtmlElement>,
    pub testimonials: Vec<HtmlElement>,
}

impl PageElements {
    pub fn query(window: Window, document: Document) -> Self {
        let d = &document;
        Self {
            mobile_menu_toggle: query(d, ".mobile-menu-toggle"),
            nav: query(d, ".nav"),
            nav_links: query_all(d, ".nav a"),
            hero: query(d, ".hero"),
            hero_slider: query(d, ".hero-slider"),
            hero_slides: query_all(d, ".hero .slide"),
            prev_button: query(d, ".slider-arrow.prev"),
            next_button: query(d, ".slider-arrow.next"),
            sections: query_all(d, "section[id]"),
            anchors: query_all(d, "a[href^=\"#\"]"),
            stats_section: query(d, ".stats"),
            contact_form: query(d, ".contact-form"),
            product_cards: query_all(d, ".product-card"),
            testimonials: query_all(d, ".testimonial-card"),
            window,
            document,
        }
    }
}
