use gloo_timers::callback::Interval;
use log::debug;

use super::slider::SlideDeck;
use crate::config::PageConfig;
use crate::dom::{self, PageElements};
use crate::error::Result;

/// Opacity for the card at `index` while `current` is featured.
pub fn card_opacity(index: usize, current: usize) -> &'static str {
    if index == current {
        "1"
    } else {
        "0.5"
    }
}

pub fn init(elements: &PageElements, config: &PageConfig) -> Result<()> {
    let cards = elements.testimonials.clone();
    let mut deck = SlideDeck::new(cards.len());
    if !deck.rotates() {
        return Ok(());
    }
    debug!("Rotating {} testimonials", cards.len());

    Interval::new(config.testimonial_interval_ms, move || {
        let current = deck.current();
        for (i, card) in cards.iter().enumerate() {
            let _ = dom::set_style(card, "opacity", card_opacity(i, current));
        }
        deck.next();
    })
    .forget();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_current_card_is_opaque() {
        let shown: Vec<_> = (0..3).map(|i| card_opacity(i, 1)).collect();
        assert_eq!(shown, vec!["0.5", "1", "0.5"]);
    }
}
