use std::{cell::RefCell, rc::Rc};

use rustc_hash::FxHashMap;

use super::prelude::Value;

pub type Env = Rc<RefCell<Environment>>;

#[derive(Default)]
pub struct Environment {
    pub store: FxHashMap<String, Value>,
    pub outer: Option<Env>,
}

impl Environment {
    pub fn new() -> Env {
        Rc::new(RefCell::new(Self::default()))
    }

    pub fn new_enclosed(outer: &Env) -> Env {
        Rc::new(RefCell::new(Self {
            store: FxHashMap::default(),
            outer: Some(outer.clone()),
        }))
    }

    /// Looks the name up in this frame, then in every enclosing one.
    pub fn get(&self, name: &str) -> Option<Value> {
        match self.store.get(name) {
            Some(value) => Some(value.clone()),
            None => self.outer.as_ref()?.borrow().get(name),
        }
    }

    /// Binds in this frame, shadowing any outer binding.
    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.store.insert(name.into(), value);
    }

    /// Rebinds the name in the nearest frame that already defines it.
    /// Returns `false` when no frame does.
    pub fn set_if_exists(&mut self, name: &str, value: Value) -> bool {
        if let Some(slot) = self.store.get_mut(name) {
            *slot = value;
            return true;
        }

        match &self.outer {
            Some(outer) => outer.borrow_mut().set_if_exists(name, value),
            None => false,
        }
    }
}

impl std::fmt::Debug for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names = self.store.keys().collect::<Vec<&String>>();
        names.sort();

        f.debug_struct("Environment")
            .field("names", &names)
            .field("outer", &self.outer.is_some())
            .finish()
    }
}
