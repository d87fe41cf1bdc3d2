use log::debug;
use web_sys::{Event, HtmlElement, ScrollBehavior, ScrollToOptions, Window};

use crate::config::PageConfig;
use crate::dom::{self, PageElements};
use crate::error::Result;

#[derive(Debug, Clone, PartialEq)]
pub enum AnchorTarget {
    /// Bare `#` links keep the browser default.
    Ignore,
    Top,
    Section(String),
}

impl AnchorTarget {
    pub fn from_href(href: &str) -> Self {
        match href {
            "#" => AnchorTarget::Ignore,
            "#home" => AnchorTarget::Top,
            other => match other.strip_prefix('#') {
                Some(id) => AnchorTarget::Section(id.to_string()),
                // Retargeted off-page since init.
                None => AnchorTarget::Ignore,
            },
        }
    }
}

/// Scroll position that puts a section's top just below the fixed header.
pub fn target_top(offset_top: f64, header_offset: f64) -> f64 {
    offset_top - header_offset
}

fn smooth_scroll_to(window: &Window, top: f64) {
    let options = ScrollToOptions::new();
    options.set_top(top);
    options.set_behavior(ScrollBehavior::Smooth);
    window.scroll_to_with_scroll_to_options(&options);
}

pub fn init(elements: &PageElements, config: &PageConfig) -> Result<()> {
    debug!("Wiring {} in-page anchors", elements.anchors.len());
    for anchor in &elements.anchors {
        let window = elements.window.clone();
        let document = elements.document.clone();
        let link = anchor.clone();
        let header_offset = config.scroll_offset;

        dom::listen(anchor, "click", move |e: Event| {
            let href = link.get_attribute("href").unwrap_or_default();
            match AnchorTarget::from_href(&href) {
                AnchorTarget::Ignore => {}
                AnchorTarget::Top => {
                    e.prevent_default();
                    smooth_scroll_to(&window, 0.0);
                }
                AnchorTarget::Section(id) => {
                    // Unknown targets fall through to normal navigation.
                    if let Some(target) = dom::query::<HtmlElement>(&document, &format!("#{}", id)) {
                        e.prevent_default();
                        smooth_scroll_to(&window, target_top(f64::from(target.offset_top()), header_offset));
                    }
                }
            }
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_hrefs() {
        assert_eq!(AnchorTarget::from_href("#"), AnchorTarget::Ignore);
        assert_eq!(AnchorTarget::from_href("#home"), AnchorTarget::Top);
        assert_eq!(
            AnchorTarget::from_href("#contact"),
            AnchorTarget::Section("contact".to_string())
        );
    }

    #[test]
    fn retargeted_anchor_navigates_normally() {
        assert_eq!(AnchorTarget::from_href(""), AnchorTarget::Ignore);
        assert_eq!(AnchorTarget::from_href("/about"), AnchorTarget::Ignore);
        assert_eq!(
            AnchorTarget::from_href("#team"),
            AnchorTarget::Section("team".to_string())
        );
    }

    #[test]
    fn target_sits_below_fixed_header() {
        assert_eq!(target_top(1200.0, 80.0), 1120.0);
        assert_eq!(target_top(40.0, 80.0), -40.0);
    }
}
