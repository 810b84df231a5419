//! Pluggable component log
//!
//! A component carries an optional log object. It can be set directly with
//! `Component::set_log`, or manufactured by a filter registered on
//! `Component::ON_SET_LOG_FILTER` before `init` runs.

use log::Level;
use std::fmt;
use std::rc::Rc;

/// A log object a component can write to
pub trait ComponentLog: fmt::Debug {
    /// Write one message at the given level
    fn log(&self, level: Level, message: &str);

    fn error(&self, message: &str) {
        self.log(Level::Error, message);
    }

    fn warn(&self, message: &str) {
        self.log(Level::Warn, message);
    }

    fn info(&self, message: &str) {
        self.log(Level::Info, message);
    }

    fn debug(&self, message: &str) {
        self.log(Level::Debug, message);
    }
}

/// Shared handle to a component log
pub type SharedLog = Rc<dyn ComponentLog>;

/// Log that forwards every message to the `log` facade under a fixed target
#[derive(Debug, Clone)]
pub struct FacadeLog {
    target: String,
}

impl FacadeLog {
    /// Create a log writing under `target`
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
        }
    }

    /// Create a log and wrap it for use as a `HookValue`
    pub fn shared(target: impl Into<String>) -> SharedLog {
        Rc::new(Self::new(target))
    }

    pub fn target(&self) -> &str {
        &self.target
    }
}

impl ComponentLog for FacadeLog {
    fn log(&self, level: Level, message: &str) {
        log::log!(target: self.target.as_str(), level, "{}", message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Debug, Default)]
    struct RecordingLog {
        lines: RefCell<Vec<(Level, String)>>,
    }

    impl ComponentLog for RecordingLog {
        fn log(&self, level: Level, message: &str) {
            self.lines.borrow_mut().push((level, message.to_string()));
        }
    }

    #[test]
    fn test_level_helpers_route_through_log() {
        let log = RecordingLog::default();
        log.error("e");
        log.warn("w");
        log.info("i");
        log.debug("d");

        let levels: Vec<Level> = log.lines.borrow().iter().map(|(l, _)| *l).collect();
        assert_eq!(levels, vec![Level::Error, Level::Warn, Level::Info, Level::Debug]);
    }

    #[test]
    fn test_facade_log_target() {
        let log = FacadeLog::new("app::component");
        assert_eq!(log.target(), "app::component");
        // Must not panic without a logger installed
        log.info("hello");
    }
}
