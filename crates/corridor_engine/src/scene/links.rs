//! Explicit object links
//!
//! A visual twin and its collision hull, or the parts of a multi-piece prop,
//! are linked so that shooting one affects all of them. Links are symmetric.

use std::collections::HashMap;

use super::object::ObjectId;

/// Symmetric object-to-objects link table
#[derive(Debug, Clone, Default)]
pub struct LinkTable {
    links: HashMap<ObjectId, Vec<ObjectId>>,
}

impl LinkTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Link two objects both ways; repeated links are ignored
    pub fn link(&mut self, a: ObjectId, b: ObjectId) {
        if a == b {
            return;
        }
        Self::push_unique(self.links.entry(a).or_default(), b);
        Self::push_unique(self.links.entry(b).or_default(), a);
    }

    /// Link every member of a group to every other member
    pub fn link_group(&mut self, members: &[ObjectId]) {
        for (i, &a) in members.iter().enumerate() {
            for &b in &members[i + 1..] {
                self.link(a, b);
            }
        }
    }

    /// Objects directly linked to `id`, in link order
    pub fn linked(&self, id: ObjectId) -> &[ObjectId] {
        self.links.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// `id` followed by everything reachable through links
    ///
    /// Resolved up front so callers can mutate the scene afterwards.
    pub fn closure(&self, id: ObjectId) -> Vec<ObjectId> {
        let mut result = vec![id];
        let mut next = 0;
        while next < result.len() {
            for &other in self.linked(result[next]) {
                if !result.contains(&other) {
                    result.push(other);
                }
            }
            next += 1;
        }
        result
    }

    /// Forget an object and every link pointing at it
    pub fn remove(&mut self, id: ObjectId) {
        if let Some(others) = self.links.remove(&id) {
            for other in others {
                if let Some(list) = self.links.get_mut(&other) {
                    list.retain(|&linked| linked != id);
                }
            }
        }
    }

    /// Number of objects with at least one link
    pub fn len(&self) -> usize {
        self.links.values().filter(|list| !list.is_empty()).count()
    }

    /// True when no links exist
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn push_unique(list: &mut Vec<ObjectId>, id: ObjectId) {
        if !list.contains(&id) {
            list.push(id);
        }
    }
}
