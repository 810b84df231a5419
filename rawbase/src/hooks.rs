//! Priority-ordered hook tables
//!
//! A [`HookTable`] maps hook names to an ordered list of registrations. It is
//! storage only: running the callbacks (and tracing them) is the job of
//! `Component`, which owns one table for actions and one for filters.
//!
//! Ordering: after every insertion the list for that name is sorted by
//! ascending priority. The sort is stable, so entries with equal priority keep
//! their insertion order, but callers should not rely on that.
//!
//! Tables use interior mutability so that a callback holding a reference to its
//! component can register or remove hooks while a hook is running. Runs always
//! iterate over a [`HookTable::snapshot`], so such changes apply from the next
//! run onwards.

use crate::types::{HookHandle, HookKind, Priority};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

/// One registered callback
pub struct Registration<C: ?Sized> {
    handle: HookHandle,
    priority: Priority,
    label: String,
    callback: Rc<C>,
}

impl<C: ?Sized> Registration<C> {
    fn new(priority: Priority, label: String, callback: Rc<C>) -> Self {
        Self {
            handle: HookHandle::next(),
            priority,
            label,
            callback,
        }
    }

    pub fn handle(&self) -> HookHandle {
        self.handle
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    /// Human-readable name of the callback, used in trace lines
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn callback(&self) -> &Rc<C> {
        &self.callback
    }
}

impl<C: ?Sized> Clone for Registration<C> {
    fn clone(&self) -> Self {
        Self {
            handle: self.handle,
            priority: self.priority,
            label: self.label.clone(),
            callback: Rc::clone(&self.callback),
        }
    }
}

impl<C: ?Sized> fmt::Debug for Registration<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("handle", &self.handle)
            .field("priority", &self.priority)
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

/// Named, priority-ordered callback lists
pub struct HookTable<C: ?Sized> {
    kind: HookKind,
    entries: RefCell<BTreeMap<String, Vec<Registration<C>>>>,
}

impl<C: ?Sized> HookTable<C> {
    /// Create an empty table
    pub fn new(kind: HookKind) -> Self {
        Self {
            kind,
            entries: RefCell::new(BTreeMap::new()),
        }
    }

    pub fn kind(&self) -> HookKind {
        self.kind
    }

    /// Add a callback under `name` and re-sort that name's list by priority
    pub fn insert(
        &self,
        name: &str,
        priority: Priority,
        label: impl Into<String>,
        callback: Rc<C>,
    ) -> HookHandle {
        let registration = Registration::new(priority, label.into(), callback);
        let handle = registration.handle;

        let mut entries = self.entries.borrow_mut();
        let list = entries.entry(name.to_string()).or_default();
        list.push(registration);
        if list.len() > 1 {
            list.sort_by(|a, b| a.priority.cmp(&b.priority));
        }

        handle
    }

    /// Remove the registration identified by `handle` from `name`
    ///
    /// Returns the removed entry, or `None` when `name` is unknown or the
    /// handle is not registered under it. The name itself stays known even
    /// when its list becomes empty.
    pub fn remove(&self, name: &str, handle: HookHandle) -> Option<Registration<C>> {
        let mut entries = self.entries.borrow_mut();
        let list = entries.get_mut(name)?;
        let position = list.iter().position(|entry| entry.handle == handle)?;
        Some(list.remove(position))
    }

    /// Copy of the current list for `name`, in run order
    pub fn snapshot(&self, name: &str) -> Vec<Registration<C>> {
        self.entries
            .borrow()
            .get(name)
            .cloned()
            .unwrap_or_default()
    }

    /// True if `name` has ever had a registration
    pub fn contains(&self, name: &str) -> bool {
        self.entries.borrow().contains_key(name)
    }

    /// Number of registrations under `name` (0 if unknown)
    pub fn len(&self, name: &str) -> usize {
        self.entries.borrow().get(name).map_or(0, Vec::len)
    }

    /// True if no name has any registration
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().values().all(Vec::is_empty)
    }

    /// Total number of registrations across all names
    pub fn total(&self) -> usize {
        self.entries.borrow().values().map(Vec::len).sum()
    }

    /// All known names, sorted
    pub fn names(&self) -> Vec<String> {
        self.entries.borrow().keys().cloned().collect()
    }

    /// Priorities under `name`, in run order
    pub fn priorities(&self, name: &str) -> Option<Vec<Priority>> {
        self.entries
            .borrow()
            .get(name)
            .map(|list| list.iter().map(|entry| entry.priority).collect())
    }

    /// Callback labels under `name`, in run order
    pub fn labels(&self, name: &str) -> Option<Vec<String>> {
        self.entries
            .borrow()
            .get(name)
            .map(|list| list.iter().map(|entry| entry.label.clone()).collect())
    }
}

impl<C: ?Sized> fmt::Debug for HookTable<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries = self.entries.borrow();
        let mut map = f.debug_map();
        for (name, list) in entries.iter() {
            map.entry(name, &list.len());
        }
        map.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Callback = dyn Fn() -> u32;

    fn table() -> HookTable<Callback> {
        HookTable::new(HookKind::Action)
    }

    fn callback(value: u32) -> Rc<Callback> {
        Rc::new(move || value)
    }

    #[test]
    fn test_insert_single() {
        let table = table();
        table.insert("run", 10, "first", callback(1));

        assert_eq!(table.len("run"), 1);
        assert_eq!(table.priorities("run"), Some(vec![10]));
        assert_eq!(table.labels("run"), Some(vec!["first".to_string()]));
    }

    #[test]
    fn test_insert_sorts_by_priority() {
        let table = table();
        table.insert("run", 10, "a", callback(10));
        table.insert("run", 1, "b", callback(1));
        table.insert("run", 5, "c", callback(5));

        assert_eq!(table.priorities("run"), Some(vec![1, 5, 10]));
        let results: Vec<u32> = table
            .snapshot("run")
            .iter()
            .map(|entry| (entry.callback())())
            .collect();
        assert_eq!(results, vec![1, 5, 10]);
    }

    #[test]
    fn test_negative_priorities_run_first() {
        let table = table();
        table.insert("run", 0, "zero", callback(0));
        table.insert("run", -5, "minus", callback(0));
        assert_eq!(table.priorities("run"), Some(vec![-5, 0]));
    }

    #[test]
    fn test_remove_by_handle() {
        let table = table();
        let keep = table.insert("run", 1, "keep", callback(1));
        let gone = table.insert("run", 2, "gone", callback(2));

        let removed = table.remove("run", gone).unwrap();
        assert_eq!(removed.priority(), 2);
        assert_eq!(removed.label(), "gone");
        assert_eq!(table.len("run"), 1);
        assert_eq!(table.snapshot("run")[0].handle(), keep);

        // Already gone
        assert!(table.remove("run", gone).is_none());
    }

    #[test]
    fn test_remove_keeps_empty_name() {
        let table = table();
        let handle = table.insert("run", 1, "only", callback(1));

        assert!(table.remove("run", handle).is_some());
        assert!(table.contains("run"));
        assert_eq!(table.len("run"), 0);
        assert_eq!(table.priorities("run"), Some(vec![]));
        assert!(table.is_empty());
    }

    #[test]
    fn test_remove_unknown_name() {
        let table = table();
        let handle = table.insert("run", 1, "only", callback(1));

        assert!(table.remove("other", handle).is_none());
        assert_eq!(table.len("run"), 1);
        assert!(!table.contains("other"));
    }

    #[test]
    fn test_handle_scoped_to_name() {
        let table = table();
        let a = table.insert("a", 1, "a", callback(1));
        table.insert("b", 1, "b", callback(1));

        assert!(table.remove("b", a).is_none());
        assert_eq!(table.total(), 2);
    }

    #[test]
    fn test_snapshot_is_detached() {
        let table = table();
        table.insert("run", 1, "a", callback(1));
        let snapshot = table.snapshot("run");

        table.insert("run", 0, "b", callback(0));
        assert_eq!(snapshot.len(), 1);
        assert_eq!(table.len("run"), 2);
    }

    #[test]
    fn test_names_sorted() {
        let table = table();
        table.insert("zeta", 1, "z", callback(1));
        table.insert("alpha", 1, "a", callback(1));
        assert_eq!(table.names(), vec!["alpha".to_string(), "zeta".to_string()]);
        assert!(table.snapshot("missing").is_empty());
    }
}
