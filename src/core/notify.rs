//! Notification collaborator: surfaces outcomes to the user.

use crate::ui::messages;
use std::cell::RefCell;
use std::rc::Rc;

pub trait Notifier {
    fn notify(&self, message: &str);

    /// Non fatal problems (e.g. a lost persistence write).
    fn warn(&self, message: &str) {
        self.notify(message);
    }
}

/// Prints through the coloured terminal helpers.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, message: &str) {
        messages::points(message);
    }

    fn warn(&self, message: &str) {
        messages::warning(message);
    }
}

/// Keeps every message in memory. Clones share the same buffer.
#[derive(Debug, Default, Clone)]
pub struct RecordingNotifier {
    messages: Rc<RefCell<Vec<String>>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<String> {
        self.messages.borrow().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str) {
        self.messages.borrow_mut().push(message.to_string());
    }
}
