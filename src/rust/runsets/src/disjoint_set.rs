//! Sparse Union-Find (Disjoint Set Union) keyed by arbitrary integers
//!
//! Keys are registered lazily and mapped onto dense slots, so the structure
//! works for key spaces that are not a `0..n` range. Combines full path
//! compression with union-by-size for O(α(n)) amortised operations.

use log::trace;
use rustc_hash::FxHashMap;
use std::collections::hash_map::Entry;

use crate::error::DisjointSetError;
use crate::partition::Partition;

/// Union-Find over `i64` keys
///
/// Layout:
/// - `slots` maps each registered key to its dense slot index
/// - `keys`, `parent` and `size` are indexed by slot
///
/// `size` is only meaningful at roots (slots whose parent is themselves).
#[derive(Debug, Clone, Default)]
pub struct DisjointSet {
    slots: FxHashMap<i64, u32>,

    /// Slot -> key, in registration order
    keys: Vec<i64>,

    /// Parent pointers - parent[s] == s means s is a root
    parent: Vec<u32>,

    /// Component sizes, valid at roots only
    size: Vec<u32>,

    /// Number of roots
    components: usize,
}

impl DisjointSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty set with room for `capacity` keys before reallocating
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            keys: Vec::with_capacity(capacity),
            parent: Vec::with_capacity(capacity),
            size: Vec::with_capacity(capacity),
            components: 0,
        }
    }

    /// Register `key` as a singleton component
    ///
    /// # Returns
    /// true if the key was new, false if it was already registered (no-op)
    ///
    /// # Panics
    /// If the set already holds `u32::MAX + 1` keys.
    pub fn add(&mut self, key: i64) -> bool {
        let next_slot = slot_for_len(self.keys.len());
        match self.slots.entry(key) {
            Entry::Occupied(_) => false,
            Entry::Vacant(entry) => {
                entry.insert(next_slot);
                self.keys.push(key);
                self.parent.push(next_slot);
                self.size.push(1);
                self.components += 1;
                true
            }
        }
    }

    /// Check whether `key` has been registered
    #[inline]
    pub fn contains(&self, key: i64) -> bool {
        self.slots.contains_key(&key)
    }

    /// Number of registered keys
    #[inline]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Number of disjoint components
    #[inline]
    pub fn component_count(&self) -> usize {
        self.components
    }

    /// Registered keys in registration order
    pub fn keys(&self) -> impl Iterator<Item = i64> + '_ {
        self.keys.iter().copied()
    }

    /// Find the root key of the component containing `key`
    ///
    /// # Panics
    /// If `key` has not been registered with [`DisjointSet::add`].
    pub fn find(&mut self, key: i64) -> i64 {
        self.try_find(key).unwrap_or_else(|e| panic!("{e}"))
    }

    /// Checked form of [`DisjointSet::find`]
    ///
    /// # Complexity
    /// O(α(n)) amortised
    pub fn try_find(&mut self, key: i64) -> Result<i64, DisjointSetError> {
        let slot = self.slot(key)?;
        let root = self.find_root(slot);
        Ok(self.keys[root as usize])
    }

    /// Merge the components containing `a` and `b`
    ///
    /// The root of the smaller component is attached under the root of the
    /// larger one. On equal sizes the root of `a` is kept.
    ///
    /// # Returns
    /// true if two components were merged, false if already connected
    ///
    /// # Panics
    /// If either key has not been registered.
    pub fn union(&mut self, a: i64, b: i64) -> bool {
        self.try_union(a, b).unwrap_or_else(|e| panic!("{e}"))
    }

    /// Checked form of [`DisjointSet::union`]
    ///
    /// Both keys are validated before anything is mutated.
    pub fn try_union(&mut self, a: i64, b: i64) -> Result<bool, DisjointSetError> {
        let slot_a = self.slot(a)?;
        let slot_b = self.slot(b)?;

        let root_a = self.find_root(slot_a);
        let root_b = self.find_root(slot_b);
        if root_a == root_b {
            return Ok(false);
        }

        let (root, child) = if self.size[root_a as usize] < self.size[root_b as usize] {
            (root_b, root_a)
        } else {
            (root_a, root_b)
        };

        self.parent[child as usize] = root;
        self.size[root as usize] += self.size[child as usize];
        self.components -= 1;

        trace!(
            "union({a}, {b}): root {} absorbed {}, size now {}",
            self.keys[root as usize],
            self.keys[child as usize],
            self.size[root as usize]
        );
        Ok(true)
    }

    /// Number of keys in the component containing `key`
    ///
    /// # Panics
    /// If `key` has not been registered.
    pub fn component_size(&mut self, key: i64) -> usize {
        self.try_component_size(key).unwrap_or_else(|e| panic!("{e}"))
    }

    pub fn try_component_size(&mut self, key: i64) -> Result<usize, DisjointSetError> {
        let slot = self.slot(key)?;
        let root = self.find_root(slot);
        Ok(self.size[root as usize] as usize)
    }

    /// Check if `a` and `b` are in the same component
    ///
    /// # Panics
    /// If either key has not been registered.
    pub fn connected(&mut self, a: i64, b: i64) -> bool {
        self.try_connected(a, b).unwrap_or_else(|e| panic!("{e}"))
    }

    pub fn try_connected(&mut self, a: i64, b: i64) -> Result<bool, DisjointSetError> {
        let slot_a = self.slot(a)?;
        let slot_b = self.slot(b)?;
        Ok(self.find_root(slot_a) == self.find_root(slot_b))
    }

    /// Size of the largest component, 0 when nothing is registered
    pub fn max_component_size(&self) -> usize {
        self.parent
            .iter()
            .enumerate()
            .filter(|&(slot, &parent)| slot as u32 == parent)
            .map(|(slot, _)| self.size[slot] as usize)
            .max()
            .unwrap_or(0)
    }

    /// Snapshot every component
    ///
    /// # Complexity
    /// O(n * α(n)) - one find per registered key
    pub fn partition(&mut self) -> Partition {
        let mut groups: FxHashMap<u32, roaring::RoaringBitmap> = FxHashMap::default();
        for slot in 0..self.keys.len() as u32 {
            let root = self.find_root(slot);
            groups.entry(root).or_default().insert(slot);
        }
        Partition::new(self.keys.clone(), groups.into_values().collect())
    }

    #[inline]
    fn slot(&self, key: i64) -> Result<u32, DisjointSetError> {
        self.slots
            .get(&key)
            .copied()
            .ok_or(DisjointSetError::UnregisteredKey(key))
    }

    /// Walk to the root, then point every node on the path directly at it.
    /// Two loops instead of recursion so long chains cannot overflow the stack.
    fn find_root(&mut self, slot: u32) -> u32 {
        let mut root = slot;
        while self.parent[root as usize] != root {
            root = self.parent[root as usize];
        }

        let mut node = slot;
        while node != root {
            let next = self.parent[node as usize];
            self.parent[node as usize] = root;
            node = next;
        }

        root
    }
}

/// Slot index for the next key; slots are `u32`, so the set is capped at 2^32 keys
#[inline]
fn slot_for_len(len: usize) -> u32 {
    u32::try_from(len).expect("DisjointSet is limited to u32::MAX + 1 keys")
}
