use comfy_table::Table;
use roaring::RoaringBitmap;
use rustc_hash::FxHashMap;
use std::fmt;

/// Snapshot of every component of a [`crate::DisjointSet`]
///
/// Each component is a RoaringBitmap of slot indices; `keys` maps a slot back
/// to the integer key it was registered under. Components are ordered by their
/// smallest key.
///
/// Equality compares the grouping of keys only, so snapshots built from the
/// same runs added in a different order compare equal.
#[derive(Debug, Clone)]
pub struct Partition {
    /// Slot -> key
    keys: Vec<i64>,

    /// Disjoint sets of slots, one per component
    components: Vec<RoaringBitmap>,

    /// Pre-computed component sizes, 1:1 with `components`
    component_sizes: Vec<u32>,

    /// Key -> index into `components`
    component_index: FxHashMap<i64, usize>,
}

impl Partition {
    pub(crate) fn new(keys: Vec<i64>, mut components: Vec<RoaringBitmap>) -> Self {
        components.sort_by_key(|component| {
            component
                .iter()
                .map(|slot| keys[slot as usize])
                .min()
                .unwrap_or(i64::MAX)
        });
        let component_sizes = components.iter().map(|c| c.len() as u32).collect();

        let mut component_index =
            FxHashMap::with_capacity_and_hasher(keys.len(), Default::default());
        for (index, component) in components.iter().enumerate() {
            for slot in component {
                component_index.insert(keys[slot as usize], index);
            }
        }

        Self {
            keys,
            components,
            component_sizes,
            component_index,
        }
    }

    /// Get the number of components
    pub fn num_components(&self) -> usize {
        self.components.len()
    }

    /// Get pre-computed component sizes
    pub fn component_sizes(&self) -> &[u32] {
        &self.component_sizes
    }

    /// Total number of keys across all components
    pub fn total_keys(&self) -> usize {
        self.component_sizes.iter().map(|&s| s as usize).sum()
    }

    /// Sorted keys of the component at `index`
    pub fn members(&self, index: usize) -> Option<Vec<i64>> {
        let component = self.components.get(index)?;
        let mut members: Vec<i64> = component
            .iter()
            .map(|slot| self.keys[slot as usize])
            .collect();
        members.sort_unstable();
        Some(members)
    }

    /// All components as sorted key lists
    pub fn components(&self) -> Vec<Vec<i64>> {
        (0..self.components.len())
            .filter_map(|index| self.members(index))
            .collect()
    }

    /// Members of the largest component; ties go to the one with the smallest key
    pub fn largest(&self) -> Option<Vec<i64>> {
        let mut best: Option<usize> = None;
        for (index, &size) in self.component_sizes.iter().enumerate() {
            if best.map_or(true, |b| size > self.component_sizes[b]) {
                best = Some(index);
            }
        }
        best.and_then(|index| self.members(index))
    }

    /// Index of the component containing `key`, if the key is present
    ///
    /// # Complexity
    /// O(1) - backed by a key -> component map built with the snapshot
    pub fn component_of(&self, key: i64) -> Option<usize> {
        self.component_index.get(&key).copied()
    }
}

impl PartialEq for Partition {
    fn eq(&self, other: &Self) -> bool {
        self.component_sizes == other.component_sizes && self.components() == other.components()
    }
}

impl Eq for Partition {}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut table = Table::new();
        table.set_header(vec!["component", "size", "min", "max"]);
        let bound = |key: Option<&i64>| key.map_or_else(String::new, |k| k.to_string());
        for (index, members) in self.components().iter().enumerate() {
            table.add_row(vec![
                index.to_string(),
                members.len().to_string(),
                bound(members.first()),
                bound(members.last()),
            ]);
        }
        write!(f, "{table}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bitmap(slots: &[u32]) -> RoaringBitmap {
        slots.iter().copied().collect()
    }

    #[test]
    fn test_partition_creation() {
        // slots:        0   1   2  3  4
        let keys = vec![50, 51, 7, 8, 9];
        let partition = Partition::new(keys, vec![bitmap(&[0, 1]), bitmap(&[2, 3, 4])]);

        assert_eq!(partition.num_components(), 2);
        // Ordered by smallest key: {7,8,9} before {50,51}
        assert_eq!(partition.component_sizes(), &[3, 2]);
        assert_eq!(partition.total_keys(), 5);
        assert_eq!(partition.components(), vec![vec![7, 8, 9], vec![50, 51]]);
    }

    #[test]
    fn test_largest_prefers_smallest_key_on_tie() {
        let keys = vec![30, 31, -2, -1, 5];
        let partition = Partition::new(
            keys,
            vec![bitmap(&[0, 1]), bitmap(&[4]), bitmap(&[3, 2])],
        );

        assert_eq!(partition.largest(), Some(vec![-2, -1]));
    }

    #[test]
    fn test_component_of() {
        let keys = vec![1, 2, 10];
        let partition = Partition::new(keys, vec![bitmap(&[2]), bitmap(&[0, 1])]);

        assert_eq!(partition.component_of(1), Some(0));
        assert_eq!(partition.component_of(2), Some(0));
        assert_eq!(partition.component_of(10), Some(1));
        assert_eq!(partition.component_of(3), None);
    }

    #[test]
    fn test_equality_ignores_slot_order() {
        // Same grouping {1, 2} {10}, keys registered in different orders
        let forward = Partition::new(vec![1, 2, 10], vec![bitmap(&[0, 1]), bitmap(&[2])]);
        let reversed = Partition::new(vec![10, 2, 1], vec![bitmap(&[1, 2]), bitmap(&[0])]);
        assert_eq!(forward, reversed);

        let regrouped = Partition::new(vec![1, 2, 10], vec![bitmap(&[0]), bitmap(&[1, 2])]);
        assert_ne!(forward, regrouped);
    }

    #[test]
    fn test_empty_partition() {
        let partition = Partition::new(Vec::new(), Vec::new());

        assert_eq!(partition.num_components(), 0);
        assert_eq!(partition.total_keys(), 0);
        assert_eq!(partition.largest(), None);
        assert!(partition.components().is_empty());
    }

    #[test]
    fn test_display_table() {
        let keys = vec![4, 3, 100];
        let partition = Partition::new(keys, vec![bitmap(&[2]), bitmap(&[0, 1])]);
        let rendered = partition.to_string();

        assert!(rendered.contains("component"));
        assert!(rendered.contains("size"));
        assert!(rendered.contains("100"));
        // One header line plus one line per component, framed by borders
        assert!(rendered.lines().count() > 3);
    }
}
