use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Interval;
use log::debug;
use web_sys::{Document, Event, HtmlElement};

use crate::config::PageConfig;
use crate::dom::{self, PageElements};
use crate::error::Result;

/// Index bookkeeping for a fixed set of slides.
#[derive(Debug, Clone, PartialEq)]
pub struct SlideDeck {
    current: usize,
    total: usize,
}

impl SlideDeck {
    pub fn new(total: usize) -> Self {
        Self { current: 0, total }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    /// A single slide (or none) never rotates.
    pub fn rotates(&self) -> bool {
        self.total > 1
    }

    pub fn next(&mut self) -> usize {
        if self.rotates() {
            self.current = (self.current + 1) % self.total;
        }
        self.current
    }

    pub fn prev(&mut self) -> usize {
        if self.rotates() {
            self.current = (self.current + self.total - 1) % self.total;
        }
        self.current
    }
}

/// Whether auto-advance may run: only with more than one slide, while the
/// pointer is outside the slider and the page is visible.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AutoPlay {
    rotates: bool,
    hovered: bool,
    hidden: bool,
}

impl AutoPlay {
    pub fn new(total: usize, hidden: bool) -> Self {
        Self {
            rotates: total > 1,
            hovered: false,
            hidden,
        }
    }

    pub fn set_hovered(&mut self, hovered: bool) {
        self.hovered = hovered;
    }

    pub fn set_hidden(&mut self, hidden: bool) {
        self.hidden = hidden;
    }

    /// Whether a repeating timer should exist right now.
    pub fn should_run(&self) -> bool {
        self.rotates && !self.hovered && !self.hidden
    }

    /// Whether a timer tick should advance, given the page's current visibility.
    pub fn on_tick(&mut self, hidden: bool) -> bool {
        self.hidden = hidden;
        self.should_run()
    }
}

struct HeroSlider {
    slides: Vec<HtmlElement>,
    deck: SlideDeck,
    play: AutoPlay,
    timer: Option<Interval>,
    interval_ms: u32,
    document: Document,
}

impl HeroSlider {
    fn show(&self, index: usize) {
        debug!("Showing slide {}", index);
        for slide in &self.slides {
            let _ = slide.class_list().remove_1("active");
            let _ = dom::set_style(slide, "display", "none");
        }
        if let Some(slide) = self.slides.get(index) {
            let _ = dom::clear_style(slide, "display");
            let _ = slide.class_list().add_1("active");
        }
    }

    fn advance(&mut self) {
        let index = self.deck.next();
        self.show(index);
    }

    fn retreat(&mut self) {
        let index = self.deck.prev();
        self.show(index);
    }

    fn stop(&mut self) {
        // Dropping the interval clears it.
        self.timer = None;
    }
}

fn start(slider: &Rc<RefCell<HeroSlider>>) {
    let mut state = slider.borrow_mut();
    state.stop();
    if !state.play.should_run() {
        return;
    }
    let interval_ms = state.interval_ms;
    let weak = Rc::downgrade(slider);
    state.timer = Some(Interval::new(interval_ms, move || {
        if let Some(slider) = weak.upgrade() {
            let mut state = slider.borrow_mut();
            let hidden = state.document.hidden();
            if state.play.on_tick(hidden) {
                state.advance();
            }
        }
    }));
}

fn stop(slider: &Rc<RefCell<HeroSlider>>) {
    slider.borrow_mut().stop();
}

pub fn init(elements: &PageElements, config: &PageConfig) -> Result<()> {
    if elements.hero_slides.is_empty() {
        debug!("No hero slides found, slider disabled");
        return Ok(());
    }

    let slider = Rc::new(RefCell::new(HeroSlider {
        slides: elements.hero_slides.clone(),
        deck: SlideDeck::new(elements.hero_slides.len()),
        play: AutoPlay::new(elements.hero_slides.len(), elements.document.hidden()),
        timer: None,
        interval_ms: config.slider_interval_ms,
        document: elements.document.clone(),
    }));
    debug!("Initializing slider with {} slides", elements.hero_slides.len());

    for (button, forward) in [(&elements.next_button, true), (&elements.prev_button, false)] {
        if let Some(button) = button {
            let slider = slider.clone();
            dom::listen(button, "click", move |e: Event| {
                e.prevent_default();
                e.stop_propagation();
                if !slider.borrow().deck.rotates() {
                    return;
                }
                stop(&slider);
                if forward {
                    slider.borrow_mut().advance();
                } else {
                    slider.borrow_mut().retreat();
                }
                start(&slider);
            })?;
        }
    }

    if let Some(region) = &elements.hero_slider {
        let on_enter = slider.clone();
        dom::listen(region, "mouseenter", move |_: Event| {
            on_enter.borrow_mut().play.set_hovered(true);
            stop(&on_enter);
        })?;
        let on_leave = slider.clone();
        dom::listen(region, "mouseleave", move |_: Event| {
            on_leave.borrow_mut().play.set_hovered(false);
            start(&on_leave);
        })?;
    }

    {
        let slider = slider.clone();
        let document = elements.document.clone();
        dom::listen(&elements.document, "visibilitychange", move |_: Event| {
            let hidden = document.hidden();
            slider.borrow_mut().play.set_hidden(hidden);
            if hidden {
                stop(&slider);
            } else {
                start(&slider);
            }
        })?;
    }

    slider.borrow().show(0);
    start(&slider);
    Ok(())
}
