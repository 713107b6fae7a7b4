//! Packed per-voxel state record and its decoded float view
//!
//! The grid stores one [`VoxelCell`] per voxel: four bytes, one per channel.
//! Channels are quantized to 8 bits in storage and exposed as floats in
//! [0, 1] through [`VoxelState`]. The packed layout is `#[repr(C)]` and
//! `Pod`, so a whole buffer can be viewed as raw bytes without copying.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use super::material::MaterialId;

/// Bytes per voxel in the packed state buffer.
pub const VOXEL_STRIDE: usize = std::mem::size_of::<VoxelCell>();

/// Quantize a [0, 1] channel value to its stored byte.
///
/// Truncates toward zero, matching byte-array store semantics: an increment
/// smaller than one quantum is lost, a decrement always makes progress.
/// NaN collapses to zero and infinities clamp like any out-of-range value,
/// so a transient numeric anomaly cannot persist across steps.
#[inline]
pub fn pack_channel(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0) as u8
}

/// Expand a stored byte back to its [0, 1] channel value.
#[inline]
pub fn unpack_channel(byte: u8) -> f32 {
    f32::from(byte) / 255.0
}

/// One voxel as stored in the front/back buffers.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct VoxelCell {
    /// Quantized temperature.
    pub temperature: u8,
    /// Quantized moisture.
    pub moisture: u8,
    /// Quantized remaining fuel.
    pub fuel: u8,
    /// Material ordinal, see [`MaterialId`].
    pub material: u8,
}

impl VoxelCell {
    /// An air cell: all channels zero.
    pub const EMPTY: Self = Self {
        temperature: 0,
        moisture: 0,
        fuel: 0,
        material: 0,
    };

    /// Material of this cell, with invalid ordinals degrading to air.
    #[inline]
    #[must_use]
    pub const fn material_id(self) -> MaterialId {
        MaterialId::from_ordinal(self.material)
    }

    /// Decode into the float view.
    #[must_use]
    pub fn unpack(self) -> VoxelState {
        VoxelState {
            temperature: unpack_channel(self.temperature),
            moisture: unpack_channel(self.moisture),
            fuel: unpack_channel(self.fuel),
            material: self.material_id(),
        }
    }
}

/// Decoded per-voxel state: the public query/authoring representation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct VoxelState {
    /// Heat proxy in [0, 1]; not real-world units.
    pub temperature: f32,
    /// Wetness in [0, material moisture capacity].
    pub moisture: f32,
    /// Remaining combustible mass in [0, 1]. Depletes while burning, never regenerates.
    pub fuel: f32,
    /// What the voxel is made of.
    pub material: MaterialId,
}

impl VoxelState {
    /// Whether this cell sustains combustion right now: hot enough, dry
    /// enough, fueled, and made of something that can burn.
    #[must_use]
    pub fn is_burning(&self) -> bool {
        let props = self.material.properties();
        self.temperature > props.ignition_temp
            && self.moisture < props.max_burn_moisture
            && self.fuel > 0.0
            && props.flammability > 0.0
    }
}
