use std::cell::Cell;
use std::rc::Rc;

use log::debug;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Event, HtmlElement, Window};

use crate::config::PageConfig;
use crate::dom::{self, PageElements};
use crate::error::Result;

/// Vertical shift for the hero, or `None` once it has scrolled out of view.
pub fn hero_offset(scroll_y: f64, viewport_height: f64, factor: f64) -> Option<f64> {
    (scroll_y < viewport_height).then(|| scroll_y * factor)
}

fn prefers_reduced_motion(window: &Window) -> bool {
    window
        .match_media("(prefers-reduced-motion: reduce)")
        .ok()
        .flatten()
        .map(|mql| mql.matches())
        .unwrap_or(false)
}

fn apply(window: &Window, hero: &HtmlElement, factor: f64) {
    let scroll_y = window.scroll_y().unwrap_or(0.0);
    let viewport = window
        .inner_height()
        .ok()
        .and_then(|h| h.as_f64())
        .unwrap_or(0.0);
    if let Some(offset) = hero_offset(scroll_y, viewport, factor) {
        let _ = dom::set_style(hero, "transform", &format!("translateY({}px)", offset));
    }
}

pub fn init(elements: &PageElements, config: &PageConfig) -> Result<()> {
    let Some(hero) = elements.hero.clone() else {
        return Ok(());
    };
    if prefers_reduced_motion(&elements.window) {
        debug!("Reduced motion requested, parallax disabled");
        return Ok(());
    }

    let ticking = Rc::new(Cell::new(false));
    let factor = config.parallax_factor;
    let on_frame = {
        let window = elements.window.clone();
        let ticking = ticking.clone();
        Closure::<dyn FnMut(f64)>::new(move |_: f64| {
            apply(&window, &hero, factor);
            ticking.set(false);
        })
    };

    let window = elements.window.clone();
    dom::listen(&elements.window, "scroll", move |_: Event| {
        if !ticking.get() {
            ticking.set(true);
            let _ = window.request_animation_frame(on_frame.as_ref().unchecked_ref());
        }
    })?;
    Ok(())
}
