//! Base model
//!
//! A `Model` is a `Component` with a numeric identifier. Its `init` runs the
//! component initialisation first, then takes `id` from the configuration and
//! fires `ON_MODEL_INIT_ACTION`.

use crate::component::{Component, Lifecycle};
use crate::config::{Config, ID_KEY};
use crate::types::Result;
use crate::util;
use std::cell::Cell;
use std::ops::Deref;

/// Component with an identifier
#[derive(Debug, Default)]
pub struct Model {
    component: Component,
    id: Cell<u64>,
}

impl Model {
    /// Fired at the end of every model `init`, after
    /// `Component::ON_COMPONENT_INIT_ACTION`
    pub const ON_MODEL_INIT_ACTION: &'static str = "on_init_model_action";

    /// Create a model with id 0 and an empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a model and initialise it from `config`
    pub fn with_config(config: Config) -> Result<Self> {
        let model = Self::new();
        model.init(config)?;
        Ok(model)
    }

    /// Initialise the model
    ///
    /// An `id` key (when set) is coerced to a non-negative integer; without it
    /// the current id is kept.
    pub fn init(&self, config: Config) -> Result<()> {
        let id = config.get_set(ID_KEY).map(util::coerce_id);

        self.component.init(config)?;

        if let Some(id) = id {
            self.id.set(id);
        }
        log::debug!("Model initialised (id: {})", self.id.get());

        self.component.do_action(Self::ON_MODEL_INIT_ACTION, &[])
    }

    pub fn id(&self) -> u64 {
        self.id.get()
    }

    pub fn set_id(&self, id: u64) {
        self.id.set(id);
    }

    pub fn component(&self) -> &Component {
        &self.component
    }
}

impl Deref for Model {
    type Target = Component;

    fn deref(&self) -> &Component {
        &self.component
    }
}

impl Lifecycle for Model {
    fn component(&self) -> &Component {
        &self.component
    }

    fn init(&self, config: Config) -> Result<()> {
        Model::init(self, config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_default_id() {
        let model = Model::with_config(Config::new()).unwrap();
        assert_eq!(model.id(), 0);
    }

    #[test]
    fn test_id_from_config() {
        let model = Model::with_config(Config::new().with("id", 17)).unwrap();
        assert_eq!(model.id(), 17);

        model.init(Config::new().with("id", "23")).unwrap();
        assert_eq!(model.id(), 23);
    }

    #[test]
    fn test_missing_id_keeps_previous() {
        let model = Model::with_config(Config::new().with("id", 5)).unwrap();
        model.init(Config::new()).unwrap();
        assert_eq!(model.id(), 5);
    }

    #[test]
    fn test_init_action_order() {
        let model = Model::new();
        let order = Rc::new(RefCell::new(Vec::new()));

        let seen = Rc::clone(&order);
        model.add_action(Model::ON_MODEL_INIT_ACTION, move |_| {
            seen.borrow_mut().push("model");
            Ok(())
        });
        let seen = Rc::clone(&order);
        model.add_action(Component::ON_COMPONENT_INIT_ACTION, move |_| {
            seen.borrow_mut().push("component");
            Ok(())
        });

        model.init(Config::new()).unwrap();
        assert_eq!(*order.borrow(), vec!["component", "model"]);
    }

    #[test]
    fn test_id_visible_in_model_action() {
        let model = Rc::new(Model::new());
        let observed = Rc::new(Cell::new(None));

        let weak = Rc::downgrade(&model);
        let slot = Rc::clone(&observed);
        model.add_action(Model::ON_MODEL_INIT_ACTION, move |_| {
            if let Some(model) = weak.upgrade() {
                slot.set(Some(model.id()));
            }
            Ok(())
        });

        model.init(Config::new().with("id", 9)).unwrap();
        assert_eq!(observed.get(), Some(9));
    }

    #[test]
    fn test_model_init_via_lifecycle() {
        let model = Model::new();
        let lifecycle: &dyn Lifecycle = &model;
        lifecycle.init(Config::new().with("id", 3).with_debug(true)).unwrap();

        assert_eq!(model.id(), 3);
        assert!(lifecycle.component().debug());
    }
}
