//! Grid geometry: dimensions, flat-index addressing, world-space mapping

use serde::{Deserialize, Serialize};

use crate::core_types::Vec3;

/// Immutable voxel grid geometry.
///
/// Fixed for the lifetime of a simulation instance; resizing means
/// constructing a new instance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    /// Voxel count along X.
    pub size_x: u32,
    /// Voxel count along Y (up).
    pub size_y: u32,
    /// Voxel count along Z.
    pub size_z: u32,
    /// Edge length of one voxel in meters.
    pub voxel_size: f32,
    /// World-space position of the grid's minimum corner.
    pub origin: Vec3,
}

impl GridConfig {
    /// Total number of voxels.
    #[must_use]
    pub fn voxel_count(&self) -> usize {
        self.size_x as usize * self.size_y as usize * self.size_z as usize
    }

    /// Whether the signed coordinates name a voxel inside the grid.
    #[must_use]
    pub fn contains(&self, x: i32, y: i32, z: i32) -> bool {
        x >= 0
            && y >= 0
            && z >= 0
            && (x as u32) < self.size_x
            && (y as u32) < self.size_y
            && (z as u32) < self.size_z
    }

    /// Flat buffer index for in-bounds coordinates.
    ///
    /// X varies fastest, then Z, then Y: the grid is a stack of XZ slabs.
    #[inline]
    #[must_use]
    pub fn flat_index(&self, x: u32, y: u32, z: u32) -> usize {
        (y as usize * self.size_z as usize + z as usize) * self.size_x as usize + x as usize
    }

    /// Inverse of [`GridConfig::flat_index`].
    #[inline]
    #[must_use]
    pub fn coords_of(&self, index: usize) -> (u32, u32, u32) {
        let sx = self.size_x as usize;
        let sz = self.size_z as usize;
        let x = index % sx;
        let z = (index / sx) % sz;
        let y = index / (sx * sz);
        (x as u32, y as u32, z as u32)
    }

    /// World-space center of the voxel at the given coordinates.
    #[must_use]
    pub fn world_center(&self, x: u32, y: u32, z: u32) -> Vec3 {
        self.origin
            + Vec3::new(
                (x as f32 + 0.5) * self.voxel_size,
                (y as f32 + 0.5) * self.voxel_size,
                (z as f32 + 0.5) * self.voxel_size,
            )
    }
}

/// Named grid resolutions.
///
/// Larger presets trade voxel size for extent, keeping the world footprint
/// in the same ballpark while the cell count grows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GridPreset {
    /// 64 x 32 x 64 voxels at 1.0 m.
    Small,
    /// 128 x 48 x 128 voxels at 0.75 m.
    Medium,
    /// 256 x 64 x 256 voxels at 0.5 m.
    Large,
}

impl GridPreset {
    /// Voxel counts along (X, Y, Z) for this preset.
    #[must_use]
    pub const fn dimensions(self) -> (u32, u32, u32) {
        match self {
            Self::Small => (64, 32, 64),
            Self::Medium => (128, 48, 128),
            Self::Large => (256, 64, 256),
        }
    }

    /// Edge length of one voxel in meters for this preset.
    #[must_use]
    pub const fn voxel_size(self) -> f32 {
        match self {
            Self::Small => 1.0,
            Self::Medium => 0.75,
            Self::Large => 0.5,
        }
    }

    /// Build the full grid configuration at a world origin.
    #[must_use]
    pub fn config(self, origin: Vec3) -> GridConfig {
        let (size_x, size_y, size_z) = self.dimensions();
        GridConfig {
            size_x,
            size_y,
            size_z,
            voxel_size: self.voxel_size(),
            origin,
        }
    }
}
