//! Debug tracing of hook activity
//!
//! When a component's debug flag is set, every registration, removal and
//! invocation is written to the `log` facade under [`TRACE_TARGET`], one line
//! per event:
//!
//! ```text
//! +ACTION: on_component_init_action -> app::setup + Priority: 10
//! ->FILTER: on_set_log_filter -> app::make_log + Priority: 10
//! -ACTION: on_component_init_action -> app::setup + Priority: 10
//! ```

use crate::types::{HookKind, Priority};
use std::fmt;

/// Log target used for trace lines
pub const TRACE_TARGET: &str = "rawbase::trace";

/// What happened to a hook entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceOp {
    Register,
    Remove,
    Invoke,
}

impl TraceOp {
    fn prefix(&self) -> &'static str {
        match self {
            TraceOp::Register => "+",
            TraceOp::Remove => "-",
            TraceOp::Invoke => "->",
        }
    }
}

/// A single trace line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceEvent<'a> {
    pub op: TraceOp,
    pub kind: HookKind,
    pub hook: &'a str,
    pub label: &'a str,
    pub priority: Priority,
}

impl fmt::Display for TraceEvent<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}: {} -> {} + Priority: {}",
            self.op.prefix(),
            self.kind,
            self.hook,
            self.label,
            self.priority
        )
    }
}

pub(crate) fn emit(event: &TraceEvent<'_>) {
    log::info!(target: TRACE_TARGET, "{}", event);
}
