//! RawBase Component Library
//!
//! Base types for framework objects: a `Component` carrying a WordPress-style
//! action/filter hook system, and a `Model` that adds an identifier.
//!
//! # Architecture
//!
//! - Hooks are stored per name in priority order (lower runs first)
//! - Every registration returns a `HookHandle` used to remove it again
//! - Actions run for their side effects; filters thread a value through each
//!   callback and return the result
//! - `init` resolves an optional log through a reserved filter and fires a
//!   reserved action, so subclasses and plugins can hook into set-up
//! - With the debug flag on, every register/remove/fire is traced through the
//!   `log` facade
//!
//! The library does NOT:
//! - Share components across threads (everything is `Rc`/`RefCell` based)
//! - Persist or serialize hook registrations
//!
//! Loading configuration files is left to the application layer (rawbase-cli).
//!
//! # Example Usage
//!
//! ```
//! use rawbase::{Component, Config, FacadeLog, HookValue};
//!
//! let component = Component::new();
//!
//! // Filters run in priority order, each one seeing the previous result
//! component.register_filter("title", |value, _extra| {
//!     let title = value.as_str().unwrap_or_default().to_string();
//!     Ok(HookValue::from(format!("{} - filtered", title)))
//! }, 1);
//! let title = component.filter("title", "home").unwrap();
//! assert_eq!(title.as_str(), Some("home - filtered"));
//!
//! // A set-log filter supplies the component's log during init
//! component.add_filter(Component::ON_SET_LOG_FILTER, |_, _| {
//!     Ok(FacadeLog::shared("app").into())
//! });
//! component.init(Config::new().with_debug(true)).unwrap();
//! assert!(component.log().is_some());
//! ```

// Public modules
pub mod component;
pub mod config;
pub mod hooks;
pub mod log_sink;
pub mod model;
pub mod trace;
pub mod types;
pub mod util;
pub mod value;

// Re-export main types for convenience
pub use component::{ActionFn, Component, FilterFn, Lifecycle};
pub use config::Config;
pub use hooks::{HookTable, Registration};
pub use log_sink::{ComponentLog, FacadeLog, SharedLog};
pub use model::Model;
pub use types::{ComponentError, HookHandle, HookKind, Priority, Result, DEFAULT_PRIORITY};
pub use util::{array_dump, object_dump, valid_index};
pub use value::HookValue;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
