//! Base component with actions and filters
//!
//! `Component` is the base every framework object builds on. It owns a
//! configuration table, an optional log, a debug flag and two hook tables:
//!
//! - **actions**: callbacks fired for their side effects, return values ignored
//! - **filters**: callbacks chained over a value, each one's output feeding the
//!   next
//!
//! All methods take `&self`. A component is usually shared as `Rc<Component>`
//! and callbacks may hold a clone of that `Rc` to register, remove or fire
//! hooks themselves; runs iterate over a snapshot so such changes apply from
//! the next run.

use crate::config::{Config, DEBUG_KEY};
use crate::hooks::HookTable;
use crate::log_sink::SharedLog;
use crate::trace::{self, TraceEvent, TraceOp};
use crate::types::{HookHandle, HookKind, Priority, Result, DEFAULT_PRIORITY};
use crate::util;
use crate::value::HookValue;
use std::cell::{Cell, Ref, RefCell};
use std::rc::Rc;

/// Action callback: receives the fire parameters
pub type ActionFn = dyn Fn(&[HookValue]) -> anyhow::Result<()>;

/// Filter callback: receives the current value plus the fixed extra arguments
/// and returns the new value
pub type FilterFn = dyn Fn(HookValue, &[HookValue]) -> anyhow::Result<HookValue>;

/// Objects with an `init` lifecycle built on a `Component`
pub trait Lifecycle {
    /// The underlying component
    fn component(&self) -> &Component;

    /// (Re-)initialise from a configuration table
    fn init(&self, config: Config) -> Result<()>;
}

/// Base component: configuration, log, debug flag and hook tables
#[derive(Debug)]
pub struct Component {
    config: RefCell<Config>,
    log: RefCell<Option<SharedLog>>,
    debug: Cell<bool>,
    actions: HookTable<ActionFn>,
    filters: HookTable<FilterFn>,
}

impl Component {
    /// Fired at the end of every `init`, with no parameters
    pub const ON_COMPONENT_INIT_ACTION: &'static str = "on_component_init_action";

    /// Applied to `null` during `init`; a filter returning a log sets the
    /// component's log
    pub const ON_SET_LOG_FILTER: &'static str = "on_set_log_filter";

    /// Create a component with an empty configuration
    ///
    /// No hooks run; call `init` once the hooks it should trigger are
    /// registered.
    pub fn new() -> Self {
        Self {
            config: RefCell::new(Config::new()),
            log: RefCell::new(None),
            debug: Cell::new(false),
            actions: HookTable::new(HookKind::Action),
            filters: HookTable::new(HookKind::Filter),
        }
    }

    /// Create a component and initialise it from `config`
    pub fn with_config(config: Config) -> Result<Self> {
        let component = Self::new();
        component.init(config)?;
        Ok(component)
    }

    /// Initialise the component
    ///
    /// 1. Store `config` (the `debug` key, when set, updates the debug flag)
    /// 2. Resolve the log through `ON_SET_LOG_FILTER`
    /// 3. Fire `ON_COMPONENT_INIT_ACTION`
    ///
    /// Registered hooks survive re-initialisation. Must not be called while a
    /// `Ref` from [`Component::config`] is held.
    pub fn init(&self, config: Config) -> Result<()> {
        if let Some(flag) = config.get_set(DEBUG_KEY) {
            self.debug.set(util::truthy(flag));
        }
        *self.config.borrow_mut() = config;

        let resolved = self.apply_filter(Self::ON_SET_LOG_FILTER, HookValue::null(), &[])?;
        *self.log.borrow_mut() = resolved.into_log();
        log::debug!(
            "Component initialised (debug: {}, log: {})",
            self.debug.get(),
            self.log.borrow().is_some()
        );

        self.do_action(Self::ON_COMPONENT_INIT_ACTION, &[])
    }

    /// Current configuration
    pub fn config(&self) -> Ref<'_, Config> {
        self.config.borrow()
    }

    /// Current log, if one was set or resolved
    pub fn log(&self) -> Option<SharedLog> {
        self.log.borrow().clone()
    }

    /// Set the log directly; the next `init` resolves it again
    pub fn set_log(&self, log: Option<SharedLog>) {
        *self.log.borrow_mut() = log;
    }

    pub fn debug(&self) -> bool {
        self.debug.get()
    }

    pub fn set_debug(&self, enabled: bool) {
        self.debug.set(enabled);
    }

    /// Read access to the action table
    pub fn actions(&self) -> &HookTable<ActionFn> {
        &self.actions
    }

    /// Read access to the filter table
    pub fn filters(&self) -> &HookTable<FilterFn> {
        &self.filters
    }

    // ---------------------------------------------------------------
    // Actions
    // ---------------------------------------------------------------

    /// Register an action callback at the default priority
    pub fn add_action<F>(&self, name: &str, callback: F) -> HookHandle
    where
        F: Fn(&[HookValue]) -> anyhow::Result<()> + 'static,
    {
        self.register_action(name, callback, DEFAULT_PRIORITY)
    }

    /// Register an action callback; lower priorities run first
    pub fn register_action<F>(&self, name: &str, callback: F, priority: Priority) -> HookHandle
    where
        F: Fn(&[HookValue]) -> anyhow::Result<()> + 'static,
    {
        self.register_shared_action(name, std::any::type_name::<F>(), Rc::new(callback), priority)
    }

    /// Register an already shared action callback under an explicit label
    pub fn register_shared_action(
        &self,
        name: &str,
        label: &str,
        callback: Rc<ActionFn>,
        priority: Priority,
    ) -> HookHandle {
        let handle = self.actions.insert(name, priority, label, callback);
        self.trace(TraceOp::Register, HookKind::Action, name, label, priority);
        handle
    }

    /// Remove an action registration
    ///
    /// Returns false if `name` has no registration with that handle.
    pub fn remove_action(&self, name: &str, handle: HookHandle) -> bool {
        match self.actions.remove(name, handle) {
            Some(removed) => {
                self.trace(
                    TraceOp::Remove,
                    HookKind::Action,
                    name,
                    removed.label(),
                    removed.priority(),
                );
                true
            }
            None => false,
        }
    }

    /// Run every action registered under `name`, in priority order
    ///
    /// Does nothing if `name` has no registrations. Stops at the first
    /// callback error and returns it.
    pub fn do_action(&self, name: &str, params: &[HookValue]) -> Result<()> {
        for entry in self.actions.snapshot(name) {
            (entry.callback())(params)?;
            self.trace(
                TraceOp::Invoke,
                HookKind::Action,
                name,
                entry.label(),
                entry.priority(),
            );
        }
        Ok(())
    }

    // ---------------------------------------------------------------
    // Filters
    // ---------------------------------------------------------------

    /// Register a filter callback at the default priority
    pub fn add_filter<F>(&self, name: &str, callback: F) -> HookHandle
    where
        F: Fn(HookValue, &[HookValue]) -> anyhow::Result<HookValue> + 'static,
    {
        self.register_filter(name, callback, DEFAULT_PRIORITY)
    }

    /// Register a filter callback; lower priorities run first
    pub fn register_filter<F>(&self, name: &str, callback: F, priority: Priority) -> HookHandle
    where
        F: Fn(HookValue, &[HookValue]) -> anyhow::Result<HookValue> + 'static,
    {
        self.register_shared_filter(name, std::any::type_name::<F>(), Rc::new(callback), priority)
    }

    /// Register an already shared filter callback under an explicit label
    pub fn register_shared_filter(
        &self,
        name: &str,
        label: &str,
        callback: Rc<FilterFn>,
        priority: Priority,
    ) -> HookHandle {
        let handle = self.filters.insert(name, priority, label, callback);
        self.trace(TraceOp::Register, HookKind::Filter, name, label, priority);
        handle
    }

    /// Remove a filter registration
    ///
    /// Returns false if `name` has no registration with that handle.
    pub fn remove_filter(&self, name: &str, handle: HookHandle) -> bool {
        match self.filters.remove(name, handle) {
            Some(removed) => {
                self.trace(
                    TraceOp::Remove,
                    HookKind::Filter,
                    name,
                    removed.label(),
                    removed.priority(),
                );
                true
            }
            None => false,
        }
    }

    /// Pass `value` through every filter registered under `name`
    ///
    /// Each filter gets the previous filter's result plus `extra` (the same
    /// extra arguments for every filter). Whatever a filter returns is kept,
    /// including `false` or `null`. With no filters, `value` comes back
    /// unchanged.
    pub fn apply_filter(
        &self,
        name: &str,
        value: HookValue,
        extra: &[HookValue],
    ) -> Result<HookValue> {
        let mut value = value;
        for entry in self.filters.snapshot(name) {
            value = (entry.callback())(value, extra)?;
            self.trace(
                TraceOp::Invoke,
                HookKind::Filter,
                name,
                entry.label(),
                entry.priority(),
            );
        }
        Ok(value)
    }

    /// Shorthand for [`Component::apply_filter`] without extra arguments
    pub fn filter(&self, name: &str, value: impl Into<HookValue>) -> Result<HookValue> {
        self.apply_filter(name, value.into(), &[])
    }

    fn trace(&self, op: TraceOp, kind: HookKind, hook: &str, label: &str, priority: Priority) {
        if self.debug.get() {
            trace::emit(&TraceEvent {
                op,
                kind,
                hook,
                label,
                priority,
            });
        }
    }
}

impl Default for Component {
    fn default() -> Self {
        Self::new()
    }
}

impl Lifecycle for Component {
    fn component(&self) -> &Component {
        self
    }

    fn init(&self, config: Config) -> Result<()> {
        Component::init(self, config)
    }
}
