//! Replay a width sequence through a [`ResponsiveBackground`].
//!
//! This is the in-process stand-in for a browser: each width plays the role of
//! one resize/orientation signal. The result records what every notification
//! did, so it can be printed or asserted on without any I/O.

use std::cell::RefCell;
use std::rc::Rc;

use crate::background::{ImageSizes, ResponsiveBackground};
use crate::breakpoints::{BreakpointError, Transition};

/// One notification and its effect.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub width: f64,
    pub transition: Transition,
    /// URL the sink received during this step.
    pub applied: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Simulation {
    pub steps: Vec<Step>,
}

impl Simulation {
    /// Number of steps that changed the active breakpoint.
    pub fn changes(&self) -> usize {
        self.steps.iter().filter(|s| s.transition.is_change()).count()
    }

    /// URL applied last, i.e. what the element would be showing.
    pub fn final_image(&self) -> Option<&str> {
        self.steps.iter().rev().find_map(|s| s.applied.as_deref())
    }
}

/// Feed `widths` in order to a fresh binding over `sizes`.
///
/// Stops at the first invalid width.
pub fn simulate(sizes: &ImageSizes, widths: &[f64]) -> Result<Simulation, BreakpointError> {
    let last_applied: Rc<RefCell<Option<String>>> = Rc::default();
    let sink_slot = last_applied.clone();
    let mut background = ResponsiveBackground::new(sizes.clone(), move |url: &str| {
        *sink_slot.borrow_mut() = Some(url.to_string());
    });

    let mut steps = Vec::with_capacity(widths.len());
    for &width in widths {
        let transition = background.notify_width_changed(width)?;
        let applied = last_applied.borrow_mut().take();
        steps.push(Step {
            width,
            transition,
            applied,
        });
    }
    Ok(Simulation { steps })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::sizes;

    fn applied(sim: &Simulation) -> Vec<Option<&str>> {
        sim.steps.iter().map(|s| s.applied.as_deref()).collect()
    }

    #[test]
    fn records_image_per_step() {
        let table = sizes(&[(0, "xs.jpg"), (320, "sm.jpg"), (768, "md.jpg")]);
        let sim = simulate(&table, &[50.0, 400.0, 1000.0, 10.0]).unwrap();
        assert_eq!(
            applied(&sim),
            vec![Some("xs.jpg"), Some("sm.jpg"), Some("md.jpg"), Some("xs.jpg")]
        );
        assert_eq!(sim.changes(), 4);
        assert_eq!(sim.final_image(), Some("xs.jpg"));
    }

    #[test]
    fn unchanged_steps_apply_nothing() {
        let table = sizes(&[(320, "sm.jpg"), (768, "md.jpg")]);
        let sim = simulate(&table, &[0.0, 400.0, 700.0, 800.0, 200.0]).unwrap();
        assert_eq!(
            applied(&sim),
            vec![None, Some("sm.jpg"), None, Some("md.jpg"), None]
        );
        // The last step exits 768 without applying anything.
        let last = sim.steps.last().unwrap();
        assert_eq!(last.transition.exited.map(|b| b.width), Some(768.0));
        assert!(last.transition.entered.is_none());
        assert_eq!(sim.final_image(), Some("md.jpg"));
    }

    #[test]
    fn empty_table_and_no_widths() {
        let sim = simulate(&ImageSizes::default(), &[100.0]).unwrap();
        assert_eq!(sim.changes(), 0);
        let sim = simulate(&sizes(&[(0, "xs.jpg")]), &[]).unwrap();
        assert!(sim.steps.is_empty());
        assert_eq!(sim.final_image(), None);
    }

    #[test]
    fn invalid_width_stops_simulation() {
        let table = sizes(&[(0, "xs.jpg")]);
        let result = simulate(&table, &[10.0, f64::NAN, 20.0]);
        assert!(matches!(result, Err(BreakpointError::InvalidWidth(_))));
    }
}
