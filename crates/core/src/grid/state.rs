//! Double-buffered voxel cell storage
//!
//! Steps read the front buffer and write the back buffer, then swap the two
//! by pointer. Authoring writes go through to both buffers: a sweep only
//! writes active cells, so a front-only edit to a cell that goes inactive
//! would be resurrected from the stale back buffer at the next swap.

use crate::core_types::voxel::VoxelCell;

/// Front/back cell buffers for one grid.
#[derive(Debug, Clone)]
pub struct GridState {
    front: Vec<VoxelCell>,
    back: Vec<VoxelCell>,
}

impl GridState {
    /// Allocate both buffers zeroed (all air).
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self {
            front: vec![VoxelCell::EMPTY; len],
            back: vec![VoxelCell::EMPTY; len],
        }
    }

    /// Number of cells per buffer.
    #[must_use]
    pub fn len(&self) -> usize {
        self.front.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.front.is_empty()
    }

    /// Current cell at `index` (front buffer).
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> VoxelCell {
        self.front[index]
    }

    /// Authoring write, mirrored to both buffers.
    #[inline]
    pub fn write(&mut self, index: usize, cell: VoxelCell) {
        self.front[index] = cell;
        self.back[index] = cell;
    }

    /// Readable front and writable back, for one sweep.
    pub fn split(&mut self) -> (&[VoxelCell], &mut [VoxelCell]) {
        (&self.front, &mut self.back)
    }

    /// Flip front and back. No cell data is copied.
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.front, &mut self.back);
    }

    /// All current cells (front buffer).
    #[must_use]
    pub fn cells(&self) -> &[VoxelCell] {
        &self.front
    }

    /// The current state as raw bytes, suitable for GPU upload or
    /// serialization. Zero-copy view of the front buffer.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.front)
    }

    /// Overwrite both buffers with the given cells. Lengths must match.
    pub fn load_cells(&mut self, cells: &[VoxelCell]) {
        self.front.copy_from_slice(cells);
        self.back.copy_from_slice(cells);
    }

    /// Zero both buffers.
    pub fn clear(&mut self) {
        self.front.fill(VoxelCell::EMPTY);
        self.back.fill(VoxelCell::EMPTY);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::voxel::VOXEL_STRIDE;

    fn cell(temperature: u8) -> VoxelCell {
        VoxelCell {
            temperature,
            moisture: 0,
            fuel: 0,
            material: 1,
        }
    }

    #[test]
    fn test_starts_zeroed() {
        let state = GridState::new(16);
        assert_eq!(state.len(), 16);
        for index in 0..16 {
            assert_eq!(state.get(index), VoxelCell::EMPTY);
        }
    }

    #[test]
    fn test_write_survives_swap() {
        let mut state = GridState::new(8);
        state.write(3, cell(200));
        state.swap();
        // The write went to both buffers, so the swap cannot lose it
        assert_eq!(state.get(3).temperature, 200);
        state.swap();
        assert_eq!(state.get(3).temperature, 200);
    }

    #[test]
    fn test_split_writes_land_after_swap() {
        let mut state = GridState::new(4);
        {
            let (front, back) = state.split();
            assert_eq!(front[2], VoxelCell::EMPTY);
            back[2] = cell(99);
        }
        // Not visible until the swap
        assert_eq!(state.get(2), VoxelCell::EMPTY);
        state.swap();
        assert_eq!(state.get(2).temperature, 99);
    }

    #[test]
    fn test_as_bytes_layout() {
        let mut state = GridState::new(3);
        state.write(
            1,
            VoxelCell {
                temperature: 10,
                moisture: 20,
                fuel: 30,
                material: 5,
            },
        );
        let bytes = state.as_bytes();
        assert_eq!(bytes.len(), 3 * VOXEL_STRIDE);
        assert_eq!(&bytes[4..8], &[10, 20, 30, 5]);
    }

    #[test]
    fn test_load_and_clear() {
        let mut state = GridState::new(2);
        state.load_cells(&[cell(1), cell(2)]);
        assert_eq!(state.get(0).temperature, 1);
        assert_eq!(state.get(1).temperature, 2);
        state.swap();
        // load_cells wrote both buffers
        assert_eq!(state.get(0).temperature, 1);
        state.clear();
        assert_eq!(state.get(0), VoxelCell::EMPTY);
        state.swap();
        assert_eq!(state.get(1), VoxelCell::EMPTY);
    }
}
