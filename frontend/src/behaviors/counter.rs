use std::cell::RefCell;
use std::rc::Rc;

use log::debug;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit, Window};

use crate::config::PageConfig;
use crate::dom::{self, PageElements};
use crate::error::Result;
use crate::utils::easing;

const ANIMATED_CLASS: &str = "animated";

/// A stat label split around its number, e.g. `"Over 1,200+"`.
#[derive(Debug, Clone, PartialEq)]
pub struct CounterLabel {
    pub prefix: String,
    pub target: u64,
    pub suffix: String,
}

impl CounterLabel {
    /// Takes the first digit run, allowing `,` group separators inside it.
    /// Labels without a positive number are not animated.
    pub fn parse(text: &str) -> Option<Self> {
        let start = text.find(|c: char| c.is_ascii_digit())?;
        let rest = &text[start..];
        let mut end = 0;
        for (i, c) in rest.char_indices() {
            if c.is_ascii_digit() {
                end = i + 1;
            } else if c != ',' {
                break;
            }
        }

        let digits: String = rest[..end].chars().filter(|c| c.is_ascii_digit()).collect();
        let target = digits.parse::<u64>().ok().filter(|n| *n > 0)?;
        Some(Self {
            prefix: text[..start].to_string(),
            target,
            suffix: rest[end..].to_string(),
        })
    }

    pub fn render(&self, value: u64) -> String {
        format!("{}{}{}", self.prefix, group_thousands(value), self.suffix)
    }

    /// Text for the frame at `elapsed_ms`, and whether the animation is done.
    pub fn frame(&self, elapsed_ms: f64, duration_ms: f64) -> (String, bool) {
        let progress = easing::progress(elapsed_ms, duration_ms);
        let value = easing::eased_value(self.target, progress);
        (self.render(value), progress >= 1.0)
    }
}

pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

fn now(window: &Window) -> f64 {
    window
        .performance()
        .map(|p| p.now())
        .unwrap_or_else(js_sys::Date::now)
}

/// Drives `label` on `element` through animation frames until it reaches its target.
fn animate(window: Window, element: Element, label: CounterLabel, duration_ms: f64) {
    let started = now(&window);
    let frame: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
    let next = frame.clone();
    let win = window.clone();

    *frame.borrow_mut() = Some(Closure::new(move |timestamp: f64| {
        let (text, done) = label.frame(timestamp - started, duration_ms);
        element.set_text_content(Some(&text));
        if done {
            // Breaks the self-reference so the closure is freed.
            let _ = next.borrow_mut().take();
        } else if let Some(cb) = next.borrow().as_ref() {
            let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }));

    if let Some(cb) = frame.borrow().as_ref() {
        let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
    };
}

fn start_counters(window: &Window, container: &Element, duration_ms: f64) {
    for stat in dom::query_all_in::<Element>(container, ".stat-number") {
        if stat.class_list().contains(ANIMATED_CLASS) {
            continue;
        }
        let Some(label) = stat.text_content().as_deref().and_then(CounterLabel::parse) else {
            continue;
        };
        let _ = stat.class_list().add_1(ANIMATED_CLASS);
        debug!("Animating counter to {}", label.target);
        animate(window.clone(), stat, label, duration_ms);
    }
}

pub fn init(elements: &PageElements, config: &PageConfig) -> Result<()> {
    let Some(stats) = &elements.stats_section else {
        debug!("No stats section, counters disabled");
        return Ok(());
    };

    let window = elements.window.clone();
    let duration_ms = config.counter_duration_ms;
    let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
        move |entries: js_sys::Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                if !entry.is_intersecting() {
                    continue;
                }
                let target = entry.target();
                start_counters(&window, &target, duration_ms);
                observer.unobserve(&target);
            }
        },
    );

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(config.counter_threshold));
    options.set_root_margin(&config.counter_root_margin);

    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
    observer.observe(stats);
    callback.forget();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_number_with_suffix() {
        let label = CounterLabel::parse("1,200+").unwrap();
        assert_eq!(label.target, 1200);
        assert_eq!(label.prefix, "");
        assert_eq!(label.suffix, "+");
    }

    #[test]
    fn parses_leading_run_only() {
        let label = CounterLabel::parse("24/7").unwrap();
        assert_eq!(label.target, 24);
        assert_eq!(label.suffix, "/7");

        let label = CounterLabel::parse("Over 98%").unwrap();
        assert_eq!(label.prefix, "Over ");
        assert_eq!(label.target, 98);
        assert_eq!(label.suffix, "%");
    }

    #[test]
    fn trailing_comma_stays_in_suffix() {
        let label = CounterLabel::parse("15, and more").unwrap();
        assert_eq!(label.target, 15);
        assert_eq!(label.suffix, ", and more");
    }

    #[test]
    fn skips_labels_without_a_positive_number() {
        assert_eq!(CounterLabel::parse("Many"), None);
        assert_eq!(CounterLabel::parse(""), None);
        assert_eq!(CounterLabel::parse("0+"), None);
    }

    #[test]
    fn keeps_multibyte_text_and_skips_overflow() {
        let label = CounterLabel::parse("€1,5 mio").unwrap();
        assert_eq!(label.prefix, "€");
        assert_eq!(label.target, 15);
        assert_eq!(label.suffix, " mio");
        assert_eq!(CounterLabel::parse("12345678901234567890123"), None);
    }

    #[test]
    fn animate_runs_frames_until_target() {
        // Every frame written by the animation loop, sampled at 60fps.
        let label = CounterLabel::parse("750+").unwrap();
        let mut frames = Vec::new();
        let mut t = 0.0;
        loop {
            let (text, done) = label.frame(t, 2000.0);
            frames.push(text);
            if done {
                break;
            }
            t += 16.0;
        }
        assert_eq!(frames.first().map(String::as_str), Some("0+"));
        assert_eq!(frames.last().map(String::as_str), Some("750+"));
    }

    #[test]
    fn groups_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(1234567), "1,234,567");
    }

    #[test]
    fn frames_start_at_zero_and_finish_on_target() {
        let label = CounterLabel::parse("5,000+").unwrap();
        assert_eq!(label.frame(0.0, 2000.0), ("0+".to_string(), false));
        let (mid, done) = label.frame(1000.0, 2000.0);
        assert!(!done);
        assert_eq!(mid, "4,687+");
        assert_eq!(label.frame(2000.0, 2000.0), ("5,000+".to_string(), true));
        assert_eq!(label.frame(2600.0, 2000.0), ("5,000+".to_string(), true));
    }

    #[test]
    fn finished_label_shows_exact_target() {
        for text in ["1+", "37%", "1,999 clients", "123456789"] {
            let label = CounterLabel::parse(text).unwrap();
            let (finished, done) = label.frame(2000.0, 2000.0);
            assert!(done);
            assert_eq!(CounterLabel::parse(&finished).unwrap().target, label.target);
        }
    }
}
