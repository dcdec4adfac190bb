//! Breakpoint evaluation engine.
//!
//! A [`BreakpointSet`] holds width thresholds, each with an enter and an exit
//! callback, and tracks which one is currently **active**: the breakpoint with
//! the greatest width not exceeding the current viewport width.
//!
//! ```text
//! breakpoints:   320          768
//! width:      0 ──┼─── 400 ────┼─── 800 ──▶
//! active:    none │    320     │    768
//! ```
//!
//! Callers feed widths through [`BreakpointSet::evaluate`] whenever the
//! viewport may have changed (page ready, debounced resize, orientation
//! change). Callbacks fire only when the active breakpoint *changes*:
//!
//! | Before | After | Fired |
//! |--------|-------|-------|
//! | none   | none  | nothing |
//! | none   | `b`   | `b.on_enter` |
//! | `a`    | `a`   | nothing |
//! | `a`    | `b`   | `a.on_exit`, then `b.on_enter` |
//! | `a`    | none  | `a.on_exit` |
//!
//! ## Equal Widths
//!
//! Breakpoints are kept sorted with a stable sort, so equal widths stay in
//! insertion order. Evaluation picks the *last* qualifying entry, which makes
//! the most recently added of several equal-width breakpoints the only one
//! that can ever become active.
//!
//! ## Re-entrancy
//!
//! [`BreakpointSet::evaluate`] takes `&mut self` and the set owns its
//! callbacks, so a callback cannot evaluate the set again through a plain
//! borrow. Sharing the set through `Rc<RefCell<_>>` and evaluating it from a
//! callback panics on the second `borrow_mut`; it never recurses.

use std::fmt;
use thiserror::Error;
use tracing::{debug, trace};

#[derive(Error, Debug)]
pub enum BreakpointError {
    #[error("invalid width {0}: widths must be finite and non-negative")]
    InvalidWidth(f64),
    #[error("invalid image size key {0:?}: expected a non-negative integer width")]
    InvalidSizeKey(String),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Reject widths that cannot describe a viewport.
pub(crate) fn check_width(width: f64) -> Result<f64, BreakpointError> {
    if width.is_finite() && width >= 0.0 {
        Ok(width)
    } else {
        Err(BreakpointError::InvalidWidth(width))
    }
}

/// Callback run when a breakpoint becomes or stops being active.
pub type Callback = Box<dyn FnMut()>;

fn noop() -> Callback {
    Box::new(|| {})
}

/// A viewport-width threshold with its enter and exit actions.
///
/// Build one with [`Breakpoint::new`] or [`BreakpointSet::make`], then hand it
/// to [`BreakpointSet::add`]. Once added, the set owns it.
pub struct Breakpoint {
    /// Minimum viewport width (inclusive) at which this breakpoint applies.
    pub width: f64,
    on_enter: Callback,
    on_exit: Callback,
}

impl Breakpoint {
    /// A breakpoint at `width` with no-op callbacks.
    pub fn new(width: f64) -> Self {
        Self {
            width,
            on_enter: noop(),
            on_exit: noop(),
        }
    }

    /// Replace the enter callback.
    pub fn on_enter(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_enter = Box::new(f);
        self
    }

    /// Replace the exit callback.
    pub fn on_exit(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_exit = Box::new(f);
        self
    }

    /// Replace the enter callback in place.
    pub fn set_on_enter(&mut self, f: impl FnMut() + 'static) {
        self.on_enter = Box::new(f);
    }

    /// Replace the exit callback in place.
    pub fn set_on_exit(&mut self, f: impl FnMut() + 'static) {
        self.on_exit = Box::new(f);
    }
}

impl Default for Breakpoint {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl fmt::Debug for Breakpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Breakpoint")
            .field("width", &self.width)
            .finish_non_exhaustive()
    }
}

/// Identity of a breakpoint within one [`BreakpointSet`].
///
/// Assigned by [`BreakpointSet::add`]; survives re-sorting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BreakpointId(u32);

/// A registered breakpoint as seen from outside the set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BreakpointRef {
    pub id: BreakpointId,
    pub width: f64,
}

/// What one evaluation did.
///
/// Both sides are `None` when the active breakpoint did not change.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Transition {
    /// Breakpoint whose `on_exit` fired.
    pub exited: Option<BreakpointRef>,
    /// Breakpoint whose `on_enter` fired; it is now the active one.
    pub entered: Option<BreakpointRef>,
}

impl Transition {
    pub fn is_change(&self) -> bool {
        self.exited.is_some() || self.entered.is_some()
    }
}

struct Entry {
    id: BreakpointId,
    breakpoint: Breakpoint,
}

impl Entry {
    fn to_ref(&self) -> BreakpointRef {
        BreakpointRef {
            id: self.id,
            width: self.breakpoint.width,
        }
    }
}

/// Ordered breakpoints plus the currently active one.
#[derive(Default)]
pub struct BreakpointSet {
    /// Ascending by width; equal widths in insertion order.
    entries: Vec<Entry>,
    active: Option<BreakpointId>,
    next_id: u32,
}

impl BreakpointSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// A fresh, detached breakpoint (width 0, no-op callbacks) to populate
    /// before calling [`add`](Self::add).
    pub fn make() -> Breakpoint {
        Breakpoint::default()
    }

    /// Register a breakpoint and restore width order.
    ///
    /// Returns `InvalidWidth` for negative or non-finite widths, leaving the
    /// set untouched.
    pub fn add(&mut self, breakpoint: Breakpoint) -> Result<BreakpointId, BreakpointError> {
        check_width(breakpoint.width)?;
        Ok(self.insert(breakpoint))
    }

    /// Register a breakpoint whose width is already known to be valid.
    pub(crate) fn insert(&mut self, breakpoint: Breakpoint) -> BreakpointId {
        let id = BreakpointId(self.next_id);
        self.next_id += 1;
        trace!(width = breakpoint.width, ?id, "adding breakpoint");
        self.entries.push(Entry { id, breakpoint });
        // Stable: equal widths keep insertion order, so the newest one wins.
        self.entries
            .sort_by(|a, b| a.breakpoint.width.total_cmp(&b.breakpoint.width));
        id
    }

    /// Build and register a breakpoint in one call.
    pub fn define(
        &mut self,
        width: f64,
        on_enter: impl FnMut() + 'static,
        on_exit: impl FnMut() + 'static,
    ) -> Result<BreakpointId, BreakpointError> {
        self.add(Breakpoint::new(width).on_enter(on_enter).on_exit(on_exit))
    }

    /// Recompute the active breakpoint for `width` and fire callbacks on change.
    ///
    /// At most one `on_exit` and one `on_enter` run, exit first. Evaluating
    /// the same width twice fires nothing the second time.
    ///
    /// A negative or non-finite `width` returns `InvalidWidth` before any
    /// callback runs, so the active breakpoint stays active rather than being
    /// exited.
    pub fn evaluate(&mut self, width: f64) -> Result<Transition, BreakpointError> {
        let width = check_width(width)?;
        let matched = self.match_index(width);
        let matched_id = matched.map(|i| self.entries[i].id);

        if matched_id == self.active {
            return Ok(Transition::default());
        }

        let mut transition = Transition::default();
        if let Some(index) = self.active_index() {
            let entry = &mut self.entries[index];
            (entry.breakpoint.on_exit)();
            transition.exited = Some(entry.to_ref());
        }
        self.active = matched_id;
        if let Some(index) = matched {
            let entry = &mut self.entries[index];
            (entry.breakpoint.on_enter)();
            transition.entered = Some(entry.to_ref());
        }

        debug!(
            width,
            exited = ?transition.exited.map(|b| b.width),
            entered = ?transition.entered.map(|b| b.width),
            "active breakpoint changed"
        );
        Ok(transition)
    }

    /// The active breakpoint, if any.
    pub fn current(&self) -> Option<BreakpointRef> {
        self.active_index().map(|i| self.entries[i].to_ref())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered breakpoints in evaluation order.
    pub fn breakpoints(&self) -> impl Iterator<Item = BreakpointRef> + '_ {
        self.entries.iter().map(Entry::to_ref)
    }

    /// Registered widths in evaluation order.
    pub fn widths(&self) -> impl Iterator<Item = f64> + '_ {
        self.entries.iter().map(|e| e.breakpoint.width)
    }

    /// Index of the last entry whose width is `<= width`.
    fn match_index(&self, width: f64) -> Option<usize> {
        self.entries
            .partition_point(|e| e.breakpoint.width <= width)
            .checked_sub(1)
    }

    fn active_index(&self) -> Option<usize> {
        let active = self.active?;
        self.entries.iter().position(|e| e.id == active)
    }
}

impl fmt::Debug for BreakpointSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BreakpointSet")
            .field("widths", &self.widths().collect::<Vec<_>>())
            .field("active", &self.current())
            .finish()
    }
}
