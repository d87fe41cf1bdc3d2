use log::debug;
use web_sys::{Event, HtmlElement, Window};

use crate::config::PageConfig;
use crate::dom::{self, PageElements};
use crate::error::Result;
use crate::utils::throttle::throttle;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionSpan {
    pub top: f64,
    pub height: f64,
}

impl SectionSpan {
    fn contains(&self, point: f64) -> bool {
        point >= self.top && point < self.top + self.height
    }
}

/// Index of the section to highlight for `probe`.
///
/// Spans are in document order and the last containing span wins. A probe
/// past every span but at or below the last one's top keeps the last section
/// highlighted.
pub fn active_section(spans: &[SectionSpan], probe: f64) -> Option<usize> {
    let hit = spans
        .iter()
        .enumerate()
        .filter(|(_, span)| span.contains(probe))
        .map(|(i, _)| i)
        .last();

    hit.or_else(|| match spans.last() {
        Some(last) if probe >= last.top => Some(spans.len() - 1),
        _ => None,
    })
}

fn highlight(window: &Window, sections: &[HtmlElement], links: &[HtmlElement], config: &PageConfig) {
    let scroll_y = window.scroll_y().unwrap_or(0.0);
    let spans: Vec<SectionSpan> = sections
        .iter()
        .map(|s| SectionSpan {
            top: f64::from(s.offset_top()),
            height: f64::from(s.client_height()),
        })
        .collect();

    let current = active_section(&spans, config.spy_probe(scroll_y))
        .map(|i| format!("#{}", sections[i].id()));

    for link in links {
        let _ = link.class_list().remove_1("active");
        if current.is_some() && link.get_attribute("href") == current {
            let _ = link.class_list().add_1("active");
        }
    }
}

pub fn init(elements: &PageElements, config: &PageConfig) -> Result<()> {
    if elements.sections.is_empty() || elements.nav_links.is_empty() {
        debug!("No sections or nav links, scroll-spy disabled");
        return Ok(());
    }

    let window = elements.window.clone();
    let sections = elements.sections.clone();
    let links = elements.nav_links.clone();
    let config = config.clone();
    let mut on_scroll = throttle(config.spy_throttle_ms, move || {
        highlight(&window, &sections, &links, &config)
    });

    // Set the initial highlight before any scrolling happens.
    on_scroll();
    dom::listen(&elements.window, "scroll", move |_: Event| on_scroll())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> Vec<SectionSpan> {
        vec![
            SectionSpan { top: 0.0, height: 600.0 },
            SectionSpan { top: 600.0, height: 400.0 },
            SectionSpan { top: 1000.0, height: 800.0 },
        ]
    }

    #[test]
    fn picks_the_containing_section() {
        let spans = page();
        assert_eq!(active_section(&spans, 0.0), Some(0));
        assert_eq!(active_section(&spans, 599.9), Some(0));
        assert_eq!(active_section(&spans, 600.0), Some(1));
        assert_eq!(active_section(&spans, 999.0), Some(1));
        assert_eq!(active_section(&spans, 1000.0), Some(2));
    }

    #[test]
    fn past_the_end_keeps_last_section() {
        assert_eq!(active_section(&page(), 5000.0), Some(2));
    }

    #[test]
    fn above_first_section_highlights_nothing() {
        let spans = vec![SectionSpan { top: 300.0, height: 200.0 }];
        assert_eq!(active_section(&spans, 100.0), None);
        assert_eq!(active_section(&[], 100.0), None);
    }

    #[test]
    fn overlapping_sections_prefer_the_later_one() {
        let spans = vec![
            SectionSpan { top: 0.0, height: 1000.0 },
            SectionSpan { top: 500.0, height: 300.0 },
        ];
        assert_eq!(active_section(&spans, 600.0), Some(1));
        assert_eq!(active_section(&spans, 900.0), Some(0));
    }

    #[test]
    fn gap_between_sections_highlights_nothing() {
        let spans = vec![
            SectionSpan { top: 0.0, height: 100.0 },
            SectionSpan { top: 200.0, height: 100.0 },
            SectionSpan { top: 400.0, height: 100.0 },
        ];
        assert_eq!(active_section(&spans, 150.0), None);
    }

    #[test]
    fn default_probe_uses_header_offset_and_lead() {
        let config = PageConfig::default();
        // Scrolled to 400: probe is 630, inside the second section.
        assert_eq!(active_section(&page(), config.spy_probe(400.0)), Some(1));
    }
}
