use std::collections::HashMap;

use crate::api::types::InstanceId;
use crate::error::{Result, ScrubsError};

/// Owned instance state keyed by element identity.
/// Entries are inserted on bind and removed on teardown.
pub struct InstanceRegistry<T> {
    instances: HashMap<InstanceId, T>,
    next_id: u32,
}

impl<T> InstanceRegistry<T> {
    pub fn new() -> Self {
        Self {
            instances: HashMap::new(),
            next_id: 1,
        }
    }

    /// Reserve a fresh identity for an element about to be bound.
    pub fn allocate_id(&mut self) -> InstanceId {
        let id = InstanceId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Register an instance. Returns the previous occupant, if any.
    pub fn insert(&mut self, id: InstanceId, instance: T) -> Option<T> {
        self.instances.insert(id, instance)
    }

    /// Unregister an instance on teardown.
    pub fn remove(&mut self, id: InstanceId) -> Result<T> {
        self.instances.remove(&id).ok_or(ScrubsError::NotBound(id))
    }

    pub fn get(&self, id: InstanceId) -> Result<&T> {
        self.instances.get(&id).ok_or(ScrubsError::NotBound(id))
    }

    pub fn get_mut(&mut self, id: InstanceId) -> Result<&mut T> {
        self.instances.get_mut(&id).ok_or(ScrubsError::NotBound(id))
    }

    pub fn contains(&self, id: InstanceId) -> bool {
        self.instances.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}

impl<T> Default for InstanceRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_get_remove() {
        let mut reg = InstanceRegistry::new();
        let id = reg.allocate_id();
        assert!(reg.insert(id, "scrubber").is_none());
        assert!(reg.contains(id));
        assert_eq!(*reg.get(id).unwrap(), "scrubber");
        *reg.get_mut(id).unwrap() = "renamed";
        assert_eq!(reg.remove(id).unwrap(), "renamed");
        assert!(reg.is_empty());
    }

    #[test]
    fn ids_are_unique() {
        let mut reg: InstanceRegistry<()> = InstanceRegistry::new();
        let a = reg.allocate_id();
        let b = reg.allocate_id();
        assert_ne!(a, b);
    }

    #[test]
    fn missing_instance_is_not_bound() {
        let mut reg: InstanceRegistry<u8> = InstanceRegistry::new();
        let id = InstanceId(7);
        assert!(matches!(reg.get(id), Err(ScrubsError::NotBound(InstanceId(7)))));
        assert!(matches!(reg.remove(id), Err(ScrubsError::NotBound(_))));
        assert_eq!(reg.len(), 0);
    }
}
