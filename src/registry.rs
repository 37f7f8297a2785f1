//! Handle table for elements the page has touched.
//!
//! Handles are never reused, so a stale [`NodeId`] held by a controller
//! resolves to nothing instead of to an unrelated element.

#[cfg(test)]
#[path = "registry_test.rs"]
mod registry_test;

use std::collections::HashMap;

use effects::host::NodeId;

pub struct Registry<E> {
    entries: HashMap<NodeId, E>,
    next: u32,
}

impl<E> Default for Registry<E> {
    fn default() -> Self {
        Self { entries: HashMap::new(), next: 0 }
    }
}

impl<E> Registry<E> {
    /// Register `element` under a fresh handle.
    pub fn insert(&mut self, element: E) -> NodeId {
        let node = NodeId(self.next);
        self.next = self.next.wrapping_add(1);
        self.entries.insert(node, element);
        node
    }

    pub fn get(&self, node: NodeId) -> Option<&E> {
        self.entries.get(&node)
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.entries.contains_key(&node)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every entry `released` selects and hand the elements back.
    pub fn release_where(&mut self, mut released: impl FnMut(&E) -> bool) -> Vec<E> {
        let gone: Vec<NodeId> =
            self.entries.iter().filter(|(_, element)| released(element)).map(|(node, _)| *node).collect();
        gone.into_iter().filter_map(|node| self.entries.remove(&node)).collect()
    }
}
