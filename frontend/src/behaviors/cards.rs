use web_sys::Event;

use crate::dom::{self, PageElements};
use crate::error::Result;

const LIFT: &str = "translateY(-10px)";

pub fn init(elements: &PageElements) -> Result<()> {
    for card in &elements.product_cards {
        let lifted = card.clone();
        dom::listen(card, "mouseenter", move |_: Event| {
            let _ = dom::set_style(&lifted, "transform", LIFT);
        })?;
        let settled = card.clone();
        dom::listen(card, "mouseleave", move |_: Event| {
            let _ = dom::clear_style(&settled, "transform");
        })?;
    }
    Ok(())
}
