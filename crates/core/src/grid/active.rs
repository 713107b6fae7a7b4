//! Sparse active-voxel tracking
//!
//! The stepper only visits active (non-air) voxels. Membership is an
//! append-only index list paired with a bitmap for O(1) duplicate checks;
//! entries are never removed individually, only dropped wholesale by
//! [`ActiveSet::clear`] or swapped out by [`ActiveSet::replace`].

/// Sparse index list over a fixed-size grid with O(1) membership checks.
#[derive(Debug, Clone)]
pub struct ActiveSet {
    indices: Vec<u32>,
    /// One bit per flat grid index, packed into u64 words.
    membership: Vec<u64>,
}

impl ActiveSet {
    /// Empty set covering `capacity` flat indices.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            indices: Vec::new(),
            membership: vec![0; capacity.div_ceil(64)],
        }
    }

    /// Append `index` if it is not already a member. Returns whether it was added.
    pub fn insert(&mut self, index: u32) -> bool {
        let word = (index / 64) as usize;
        let bit = 1u64 << (index % 64);
        if self.membership[word] & bit != 0 {
            return false;
        }
        self.membership[word] |= bit;
        self.indices.push(index);
        true
    }

    /// O(1) membership test.
    #[must_use]
    pub fn contains(&self, index: u32) -> bool {
        let word = (index / 64) as usize;
        self.membership
            .get(word)
            .is_some_and(|bits| bits & (1 << (index % 64)) != 0)
    }

    /// Number of tracked indices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Tracked indices in insertion order.
    #[must_use]
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Drop all members.
    pub fn clear(&mut self) {
        self.indices.clear();
        self.membership.fill(0);
    }

    /// Swap in a freshly rebuilt index list. The list must be duplicate-free.
    pub fn replace(&mut self, indices: Vec<u32>) {
        self.membership.fill(0);
        for &index in &indices {
            self.membership[(index / 64) as usize] |= 1 << (index % 64);
        }
        self.indices = indices;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_contains() {
        let mut set = ActiveSet::new(256);
        assert!(set.is_empty());
        assert!(set.insert(5));
        assert!(set.insert(64));
        assert!(set.insert(255));
        assert_eq!(set.len(), 3);
        assert!(set.contains(5));
        assert!(set.contains(64));
        assert!(set.contains(255));
        assert!(!set.contains(6));
        assert!(!set.contains(63));
    }

    #[test]
    fn test_insert_deduplicates() {
        let mut set = ActiveSet::new(128);
        assert!(set.insert(42));
        assert!(!set.insert(42));
        assert!(!set.insert(42));
        assert_eq!(set.len(), 1);
        assert_eq!(set.indices(), &[42]);
    }

    #[test]
    fn test_preserves_insertion_order() {
        let mut set = ActiveSet::new(128);
        set.insert(90);
        set.insert(3);
        set.insert(57);
        assert_eq!(set.indices(), &[90, 3, 57]);
    }

    #[test]
    fn test_clear() {
        let mut set = ActiveSet::new(128);
        set.insert(7);
        set.insert(100);
        set.clear();
        assert!(set.is_empty());
        assert!(!set.contains(7));
        assert!(!set.contains(100));
        // Reusable after clearing
        assert!(set.insert(7));
    }

    #[test]
    fn test_replace() {
        let mut set = ActiveSet::new(256);
        set.insert(1);
        set.insert(2);
        set.replace(vec![10, 20, 130]);
        assert_eq!(set.indices(), &[10, 20, 130]);
        assert!(set.contains(130));
        assert!(!set.contains(1));
        assert!(!set.contains(2));
    }

    #[test]
    fn test_contains_out_of_capacity_is_false() {
        let set = ActiveSet::new(64);
        assert!(!set.contains(1000));
    }
}
