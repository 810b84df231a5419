//! Values passed through hooks
//!
//! Callbacks receive and return `HookValue`s. Most of the time this is plain
//! JSON-shaped data; the one exception is a log object handed back by a
//! `set-log` filter.

use crate::log_sink::SharedLog;
use serde_json::Value;
use std::fmt;
use std::rc::Rc;

/// A value carried through actions and filters
#[derive(Clone)]
pub enum HookValue {
    /// JSON-shaped data (`Value::Null` is the empty value)
    Data(Value),
    /// A log object
    Log(SharedLog),
}

impl HookValue {
    /// The empty value
    pub fn null() -> Self {
        HookValue::Data(Value::Null)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, HookValue::Data(Value::Null))
    }

    /// Borrow the data, if this is not a log
    pub fn as_data(&self) -> Option<&Value> {
        match self {
            HookValue::Data(value) => Some(value),
            HookValue::Log(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        self.as_data().and_then(Value::as_str)
    }

    pub fn as_bool(&self) -> Option<bool> {
        self.as_data().and_then(Value::as_bool)
    }

    pub fn as_i64(&self) -> Option<i64> {
        self.as_data().and_then(Value::as_i64)
    }

    pub fn as_log(&self) -> Option<&SharedLog> {
        match self {
            HookValue::Log(log) => Some(log),
            HookValue::Data(_) => None,
        }
    }

    /// Consume the value, keeping it only if it is a log
    pub fn into_log(self) -> Option<SharedLog> {
        match self {
            HookValue::Log(log) => Some(log),
            HookValue::Data(_) => None,
        }
    }

    /// Consume the value, keeping it only if it is data
    pub fn into_data(self) -> Option<Value> {
        match self {
            HookValue::Data(value) => Some(value),
            HookValue::Log(_) => None,
        }
    }

    /// Loose truthiness: `null`, `false`, `0`, `""`, `"0"` and empty
    /// collections are false. A log is always true.
    pub fn is_truthy(&self) -> bool {
        match self {
            HookValue::Data(value) => crate::util::truthy(value),
            HookValue::Log(_) => true,
        }
    }
}

impl Default for HookValue {
    fn default() -> Self {
        Self::null()
    }
}

impl fmt::Debug for HookValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HookValue::Data(value) => f.debug_tuple("Data").field(value).finish(),
            HookValue::Log(log) => f.debug_tuple("Log").field(log).finish(),
        }
    }
}

impl PartialEq for HookValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (HookValue::Data(a), HookValue::Data(b)) => a == b,
            (HookValue::Log(a), HookValue::Log(b)) => {
                Rc::as_ptr(a) as *const () == Rc::as_ptr(b) as *const ()
            }
            _ => false,
        }
    }
}

impl From<Value> for HookValue {
    fn from(value: Value) -> Self {
        HookValue::Data(value)
    }
}

impl From<SharedLog> for HookValue {
    fn from(log: SharedLog) -> Self {
        HookValue::Log(log)
    }
}

impl From<&str> for HookValue {
    fn from(value: &str) -> Self {
        HookValue::Data(Value::from(value))
    }
}

impl From<String> for HookValue {
    fn from(value: String) -> Self {
        HookValue::Data(Value::from(value))
    }
}

impl From<bool> for HookValue {
    fn from(value: bool) -> Self {
        HookValue::Data(Value::from(value))
    }
}

impl From<i64> for HookValue {
    fn from(value: i64) -> Self {
        HookValue::Data(Value::from(value))
    }
}

impl From<u64> for HookValue {
    fn from(value: u64) -> Self {
        HookValue::Data(Value::from(value))
    }
}
