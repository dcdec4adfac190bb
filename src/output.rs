//! CLI output formatting.
//!
//! Every command has a `format_*` function returning lines, for testability,
//! and a `print_*` wrapper that writes them to stdout. Logging goes to stderr
//! through `tracing`, so stdout stays clean for piping.
//!
//! # Output Format
//!
//! ## Check
//!
//! ```text
//! Breakpoints
//! 001 0px → img/xs.jpg
//! 002 320px → img/sm.jpg
//! ```
//!
//! ## Simulate
//!
//! ```text
//! Simulation
//! 001 400px
//!     enter 320px → img/sm.jpg
//! 002 700px
//!     unchanged
//! 003 200px
//!     exit 320px
//!
//! Showing: img/sm.jpg
//! 2 changes over 3 widths
//! ```
//!
//! ## Resolve
//!
//! ```text
//! 400px → img/sm.jpg
//!     background-image: url("img/sm.jpg")
//! ```

use crate::background::{ImageSizes, css_background_image};
use crate::simulate::Simulation;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Widths print without a fraction when they have none.
fn format_width(width: f64) -> String {
    if width.fract() == 0.0 {
        format!("{width:.0}px")
    } else {
        format!("{width}px")
    }
}

// ============================================================================
// Check
// ============================================================================

pub fn format_breakpoints(sizes: &ImageSizes) -> Vec<String> {
    let mut lines = vec!["Breakpoints".to_string()];
    if sizes.is_empty() {
        lines.push("    (none)".to_string());
    }
    for (i, (width, url)) in sizes.iter().enumerate() {
        lines.push(format!(
            "{} {} → {}",
            format_index(i + 1),
            format_width(f64::from(width)),
            url
        ));
    }
    lines
}

pub fn print_breakpoints(sizes: &ImageSizes) {
    for line in format_breakpoints(sizes) {
        println!("{}", line);
    }
}

// ============================================================================
// Simulate
// ============================================================================

pub fn format_simulation(sim: &Simulation) -> Vec<String> {
    let mut lines = vec!["Simulation".to_string()];
    for (i, step) in sim.steps.iter().enumerate() {
        lines.push(format!("{} {}", format_index(i + 1), format_width(step.width)));
        if !step.transition.is_change() {
            lines.push("    unchanged".to_string());
            continue;
        }
        if let Some(exited) = step.transition.exited {
            lines.push(format!("    exit {}", format_width(exited.width)));
        }
        if let Some(entered) = step.transition.entered {
            match &step.applied {
                Some(url) => lines.push(format!(
                    "    enter {} → {}",
                    format_width(entered.width),
                    url
                )),
                None => lines.push(format!("    enter {}", format_width(entered.width))),
            }
        }
    }

    lines.push(String::new());
    match sim.final_image() {
        Some(url) => lines.push(format!("Showing: {}", url)),
        None => lines.push("Showing: nothing".to_string()),
    }
    let changes = sim.changes();
    let widths = sim.steps.len();
    lines.push(format!(
        "{} change{} over {} width{}",
        changes,
        if changes == 1 { "" } else { "s" },
        widths,
        if widths == 1 { "" } else { "s" },
    ));
    lines
}

pub fn print_simulation(sim: &Simulation) {
    for line in format_simulation(sim) {
        println!("{}", line);
    }
}

// ============================================================================
// Resolve
// ============================================================================

pub fn format_resolve(width: f64, url: Option<&str>) -> Vec<String> {
    match url {
        Some(url) => vec![
            format!("{} → {}", format_width(width), url),
            format!("    background-image: {}", css_background_image(url)),
        ],
        None => vec![format!("{} → (no image)", format_width(width))],
    }
}

pub fn print_resolve(width: f64, url: Option<&str>) {
    for line in format_resolve(width, url) {
        println!("{}", line);
    }
}
