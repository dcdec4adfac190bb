//! # Viewport Breakpoints
//!
//! Run enter/exit logic when a viewport crosses configured width thresholds,
//! and swap an element's background image from a width-keyed table.
//!
//! ```
//! use viewport_breakpoints::breakpoints::BreakpointSet;
//!
//! let mut set = BreakpointSet::new();
//! set.define(320.0, || println!("entered 320"), || println!("left 320")).unwrap();
//! set.define(768.0, || println!("entered 768"), || println!("left 768")).unwrap();
//!
//! set.evaluate(400.0).unwrap(); // entered 320
//! set.evaluate(700.0).unwrap(); // nothing: still 320
//! set.evaluate(800.0).unwrap(); // left 320, entered 768
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`breakpoints`] | The evaluation engine: ordered thresholds, active selection, exit/enter protocol |
//! | [`background`] | Width→URL tables and the binding that applies images on enter |
//! | [`simulate`] | Replays a width sequence through a binding and records each step |
//! | [`config`] | `breakpoints.toml` loading and validation for the CLI |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## No DOM in the Core
//!
//! Nothing here knows about documents, elements, or resize events. Whatever
//! observes the viewport (a wasm glue layer, a test, the bundled CLI) calls
//! [`BreakpointSet::evaluate`](breakpoints::BreakpointSet::evaluate) or
//! [`ResponsiveBackground::notify_width_changed`](background::ResponsiveBackground::notify_width_changed)
//! with the current width, as often as it likes. Applying an image is likewise
//! delegated to an [`ImageSink`](background::ImageSink).
//!
//! ## No Shared Registry
//!
//! Sets and bindings are plain values. Callers construct and own them; there is
//! no global namespace to attach to.
//!
//! ## Strict Widths
//!
//! Negative and non-finite widths are rejected with
//! [`BreakpointError::InvalidWidth`](breakpoints::BreakpointError::InvalidWidth),
//! both when registering a breakpoint and when evaluating. Image table keys
//! must be plain non-negative integers.

pub mod background;
pub mod breakpoints;
pub mod config;
pub mod output;
pub mod simulate;

#[cfg(test)]
pub(crate) mod test_helpers;
