//! Generic instance registry.
//!
//! One registry per entity type owns the authoritative, append-only list of
//! every live instance for the process lifetime. Registration runs the single
//! construction/validation protocol shared by all entity types: evaluate the
//! type's uniqueness predicate against the current contents, then append.
//!
//! Registries are explicit repository objects passed in by callers (typically
//! held together in an application context), never ambient globals. No
//! concurrency control: single-threaded access is assumed throughout.

use std::cell::RefCell;
use std::rc::Rc;

use crate::entity::Registered;
use crate::error::{DomainError, DomainResult};

/// Shared handle to a registered entity.
///
/// The registry owns one handle per instance; aggregates that reference the
/// entity (e.g. an order referencing its customer) hold clones.
pub type Shared<T> = Rc<RefCell<T>>;

/// Append-only collection of all live instances of one entity type.
#[derive(Debug)]
pub struct Registry<T: Registered> {
    instances: Vec<Shared<T>>,
}

impl<T: Registered> Registry<T> {
    pub fn new() -> Self {
        Self {
            instances: Vec::new(),
        }
    }

    /// Run the construction protocol for `entity`: check the type's
    /// uniqueness predicate against every registered instance, then append.
    ///
    /// Returns the shared handle on success; `DuplicateEntity` on conflict,
    /// leaving the registry unchanged.
    pub fn register(&mut self, entity: T) -> DomainResult<Shared<T>> {
        if self
            .instances
            .iter()
            .any(|existing| entity.is_duplicate_of(&existing.borrow()))
        {
            return Err(DomainError::duplicate(T::KIND));
        }

        let handle = Rc::new(RefCell::new(entity));
        self.instances.push(Rc::clone(&handle));
        Ok(handle)
    }

    /// Iterate over the contents in registration order. Restartable.
    pub fn iter(&self) -> core::slice::Iter<'_, Shared<T>> {
        self.instances.iter()
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// The most recently registered instance; `NotFound` when empty.
    pub fn latest(&self) -> DomainResult<&Shared<T>> {
        self.instances.last().ok_or_else(DomainError::not_found)
    }

    /// First instance matching `pred`, in registration order.
    pub fn find(&self, mut pred: impl FnMut(&T) -> bool) -> Option<&Shared<T>> {
        self.instances.iter().find(|h| pred(&h.borrow()))
    }

    /// Clear all instances (test isolation / reprovisioning).
    pub fn reset(&mut self) {
        self.instances.clear();
    }
}

impl<T: Registered> Default for Registry<T> {
    fn default() -> Self {
        Self::new()
    }
}
