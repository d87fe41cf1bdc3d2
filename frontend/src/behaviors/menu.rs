use wasm_bindgen::JsCast;
use web_sys::{Event, HtmlElement, Node};

use crate::dom::{self, PageElements};
use crate::error::Result;

const OPEN_CLASS: &str = "active";

fn close(nav: &HtmlElement, toggle: &HtmlElement) {
    let _ = nav.class_list().remove_1(OPEN_CLASS);
    let _ = toggle.set_attribute("aria-expanded", "false");
}

pub fn init(elements: &PageElements) -> Result<()> {
    let (Some(toggle), Some(nav)) = (&elements.mobile_menu_toggle, &elements.nav) else {
        return Ok(());
    };

    {
        let nav = nav.clone();
        let toggle_el = toggle.clone();
        dom::listen(toggle, "click", move |e: Event| {
            e.stop_propagation();
            let open = nav.class_list().toggle(OPEN_CLASS).unwrap_or(false);
            let _ = toggle_el.set_attribute("aria-expanded", if open { "true" } else { "false" });
        })?;
    }

    for link in &elements.nav_links {
        let nav = nav.clone();
        let toggle = toggle.clone();
        dom::listen(link, "click", move |_: Event| close(&nav, &toggle))?;
    }

    // Any click outside the menu closes it.
    let nav = nav.clone();
    let toggle = toggle.clone();
    dom::listen(&elements.document, "click", move |e: Event| {
        let target = e.target();
        let target = target.as_ref().and_then(|t| t.dyn_ref::<Node>());
        if !nav.contains(target) && !toggle.contains(target) {
            close(&nav, &toggle);
        }
    })?;
    Ok(())
}
