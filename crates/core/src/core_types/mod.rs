//! Core types shared across the simulation

pub mod material;
pub mod noise;
pub mod vec;
pub mod voxel;

pub use material::{MaterialId, MaterialProperties, MATERIAL_COUNT};
pub use vec::{Vec2, Vec3};
pub use voxel::{VoxelCell, VoxelState};
