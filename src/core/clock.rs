//! Clock collaborator: where "now" comes from.

use chrono::{DateTime, FixedOffset, Local};
use std::cell::Cell;
use std::rc::Rc;

pub trait Clock {
    fn now(&self) -> DateTime<FixedOffset>;
}

/// Wall clock in the local timezone.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }
}

/// Settable clock for tests and `--at` overrides. Clones share the same instant.
#[derive(Debug, Clone)]
pub struct FixedClock {
    at: Rc<Cell<DateTime<FixedOffset>>>,
}

impl FixedClock {
    pub fn new(at: DateTime<FixedOffset>) -> Self {
        Self {
            at: Rc::new(Cell::new(at)),
        }
    }

    pub fn set(&self, at: DateTime<FixedOffset>) {
        self.at.set(at);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.at.get()
    }
}
