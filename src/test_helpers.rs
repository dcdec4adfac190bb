//! Shared test utilities for the viewport-breakpoints test suite.
//!
//! Callbacks handed to a [`BreakpointSet`] are `'static` closures, so tests
//! observe them through shared recorders rather than captured locals.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let rec = Recorder::new();
//! let mut set = BreakpointSet::new();
//! rec.define(&mut set, 320.0);
//! set.evaluate(400.0).unwrap();
//! assert_eq!(rec.take(), vec![Event::Enter(320.0)]);
//!
//! let (log, sink) = image_log();
//! let mut bg = ResponsiveBackground::new(sizes(&[(0, "xs.jpg")]), sink);
//! bg.notify_width_changed(10.0).unwrap();
//! assert_eq!(*log.borrow(), vec!["xs.jpg"]);
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use crate::background::ImageSizes;
use crate::breakpoints::{Breakpoint, BreakpointId, BreakpointSet};

// =========================================================================
// Breakpoint callback recording
// =========================================================================

/// A callback firing, tagged with the breakpoint width it belongs to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    Enter(f64),
    Exit(f64),
}

/// Collects [`Event`]s from any number of breakpoint callbacks, in firing order.
#[derive(Clone, Default)]
pub struct Recorder {
    events: Rc<RefCell<Vec<Event>>>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// A callback that records `event` each time it runs.
    pub fn callback(&self, event: Event) -> impl FnMut() + 'static {
        let events = self.events.clone();
        move || events.borrow_mut().push(event)
    }

    /// Register a breakpoint at `width` whose enter/exit are recorded.
    pub fn define(&self, set: &mut BreakpointSet, width: f64) -> BreakpointId {
        let bp = Breakpoint::new(width)
            .on_enter(self.callback(Event::Enter(width)))
            .on_exit(self.callback(Event::Exit(width)));
        set.add(bp).unwrap()
    }

    /// Everything recorded so far.
    pub fn events(&self) -> Vec<Event> {
        self.events.borrow().clone()
    }

    /// Drain the recorded events.
    pub fn take(&self) -> Vec<Event> {
        std::mem::take(&mut *self.events.borrow_mut())
    }
}

// =========================================================================
// Image sink recording
// =========================================================================

/// A sink closure plus the shared log of every URL it was asked to apply.
pub fn image_log() -> (Rc<RefCell<Vec<String>>>, impl FnMut(&str) + 'static) {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink_log = log.clone();
    (log, move |url: &str| sink_log.borrow_mut().push(url.to_string()))
}

/// Build an [`ImageSizes`] from integer widths. Panics on failure.
pub fn sizes(entries: &[(u32, &str)]) -> ImageSizes {
    ImageSizes::from_pairs(entries.iter().map(|(w, url)| (w.to_string(), *url))).unwrap()
}
