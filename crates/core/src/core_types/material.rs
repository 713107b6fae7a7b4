//! Static material property table
//!
//! Every voxel carries a material ordinal; combustion and thermal behavior is
//! looked up here. The table is immutable for the process lifetime and indexed
//! by ordinal, so lookups are a bounds-free array access.

use serde::{Deserialize, Serialize};

/// Number of material kinds, including [`MaterialId::Air`].
pub const MATERIAL_COUNT: usize = 8;

/// Identifies what a voxel is made of.
///
/// Ordinals are part of the packed state-buffer format and must stay stable.
#[repr(u8)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MaterialId {
    /// Empty space. Carries no temperature, moisture, or fuel.
    #[default]
    Air = 0,
    /// Ground cover that ignites readily and burns out quickly.
    Grass = 1,
    /// Dry scrub with the lowest ignition point in the table.
    DryBrush = 2,
    /// Dense fuel that is slow to ignite and slow to consume.
    Wood = 3,
    /// Canopy fuel, quick to flash over.
    Leaves = 4,
    /// Inert but conductive; carries heat without burning.
    Stone = 5,
    /// Moisture source. Wets its neighborhood and never burns.
    Water = 6,
    /// Heat source. Held at maximum temperature every step.
    Lava = 7,
}

impl MaterialId {
    /// Decode a raw ordinal, clamping anything unknown to [`MaterialId::Air`].
    ///
    /// Packed buffers can arrive from outside the process; an out-of-range
    /// ordinal degrades to empty space instead of being an error.
    #[must_use]
    pub const fn from_ordinal(ordinal: u8) -> Self {
        match ordinal {
            1 => Self::Grass,
            2 => Self::DryBrush,
            3 => Self::Wood,
            4 => Self::Leaves,
            5 => Self::Stone,
            6 => Self::Water,
            7 => Self::Lava,
            _ => Self::Air,
        }
    }

    /// The raw ordinal stored in packed buffers.
    #[must_use]
    pub const fn ordinal(self) -> u8 {
        self as u8
    }

    /// Static combustion/thermal properties for this material.
    #[must_use]
    pub const fn properties(self) -> &'static MaterialProperties {
        &MATERIALS[self as usize]
    }
}

/// Combustion and thermal constants for one material.
///
/// All temperatures, moistures, and fuels are in the same normalized [0, 1]
/// space the voxel channels use; none of these are real-world units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialProperties {
    /// Temperature above which combustion can start.
    pub ignition_temp: f32,
    /// Moisture at or above which combustion is suppressed.
    pub max_burn_moisture: f32,
    /// Fuel consumed per second while burning, before global scaling.
    pub burn_rate: f32,
    /// How readily heat is exchanged with neighbors.
    pub heat_conductivity: f32,
    /// Upper bound for the moisture channel of cells made of this material.
    pub moisture_capacity: f32,
    /// How fast standing moisture boils off under heat.
    pub evaporation_rate: f32,
    /// Fuel assigned when a cell of this material is authored.
    pub max_fuel: f32,
    /// Zero disables combustion entirely; scales fuel consumption otherwise.
    pub flammability: f32,
    /// Pinned to maximum temperature every step (lava).
    pub is_heat_source: bool,
    /// Pinned to full moisture every step and wets its neighbors (water).
    pub is_moisture_source: bool,
    /// Display color for intact cells (RGB).
    pub base_color: [u8; 3],
    /// Display color once fuel is depleted (RGB).
    pub charred_color: [u8; 3],
}

impl MaterialProperties {
    pub const AIR: Self = Self {
        ignition_temp: 1.0,
        max_burn_moisture: 0.0,
        burn_rate: 0.0,
        heat_conductivity: 0.05,
        moisture_capacity: 0.0,
        evaporation_rate: 0.0,
        max_fuel: 0.0,
        flammability: 0.0,
        is_heat_source: false,
        is_moisture_source: false,
        base_color: [0, 0, 0],
        charred_color: [0, 0, 0],
    };

    pub const GRASS: Self = Self {
        ignition_temp: 0.35,
        max_burn_moisture: 0.4,
        burn_rate: 0.8,
        heat_conductivity: 0.5,
        moisture_capacity: 0.6,
        evaporation_rate: 0.5,
        max_fuel: 0.6,
        flammability: 0.9,
        is_heat_source: false,
        is_moisture_source: false,
        base_color: [86, 152, 56],
        charred_color: [44, 38, 34],
    };

    // Authors drier than its own burn threshold, so fresh brush catches as
    // soon as temperature crosses ignition. This is the fire-carrier
    // material; the slow burn rate keeps a front alive long enough to heat
    // its neighbors.
    pub const DRY_BRUSH: Self = Self {
        ignition_temp: 0.25,
        max_burn_moisture: 0.3,
        burn_rate: 0.5,
        heat_conductivity: 0.7,
        moisture_capacity: 0.2,
        evaporation_rate: 0.7,
        max_fuel: 0.5,
        flammability: 1.0,
        is_heat_source: false,
        is_moisture_source: false,
        base_color: [168, 142, 74],
        charred_color: [52, 44, 38],
    };

    pub const WOOD: Self = Self {
        ignition_temp: 0.5,
        max_burn_moisture: 0.5,
        burn_rate: 0.3,
        heat_conductivity: 0.4,
        moisture_capacity: 0.6,
        evaporation_rate: 0.3,
        max_fuel: 1.0,
        flammability: 0.6,
        is_heat_source: false,
        is_moisture_source: false,
        base_color: [112, 78, 46],
        charred_color: [38, 32, 30],
    };

    pub const LEAVES: Self = Self {
        ignition_temp: 0.3,
        max_burn_moisture: 0.35,
        burn_rate: 0.9,
        heat_conductivity: 0.45,
        moisture_capacity: 0.4,
        evaporation_rate: 0.8,
        max_fuel: 0.35,
        flammability: 0.85,
        is_heat_source: false,
        is_moisture_source: false,
        base_color: [66, 122, 38],
        charred_color: [40, 36, 32],
    };

    pub const STONE: Self = Self {
        ignition_temp: 1.0,
        max_burn_moisture: 0.0,
        burn_rate: 0.0,
        heat_conductivity: 0.8,
        moisture_capacity: 0.2,
        evaporation_rate: 0.4,
        max_fuel: 0.0,
        flammability: 0.0,
        is_heat_source: false,
        is_moisture_source: false,
        base_color: [128, 128, 130],
        charred_color: [88, 88, 90],
    };

    pub const WATER: Self = Self {
        ignition_temp: 1.0,
        max_burn_moisture: 0.0,
        burn_rate: 0.0,
        heat_conductivity: 0.6,
        moisture_capacity: 1.0,
        evaporation_rate: 0.0,
        max_fuel: 0.0,
        flammability: 0.0,
        is_heat_source: false,
        is_moisture_source: true,
        base_color: [40, 92, 196],
        charred_color: [40, 92, 196],
    };

    pub const LAVA: Self = Self {
        ignition_temp: 1.0,
        max_burn_moisture: 0.0,
        burn_rate: 0.0,
        heat_conductivity: 0.9,
        moisture_capacity: 0.0,
        evaporation_rate: 0.0,
        max_fuel: 0.0,
        flammability: 0.0,
        is_heat_source: true,
        is_moisture_source: false,
        base_color: [236, 98, 22],
        charred_color: [236, 98, 22],
    };
}

/// Properties indexed by material ordinal.
const MATERIALS: [MaterialProperties; MATERIAL_COUNT] = [
    MaterialProperties::AIR,
    MaterialProperties::GRASS,
    MaterialProperties::DRY_BRUSH,
    MaterialProperties::WOOD,
    MaterialProperties::LEAVES,
    MaterialProperties::STONE,
    MaterialProperties::WATER,
    MaterialProperties::LAVA,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_ordinal_round_trips() {
        for ordinal in 0..MATERIAL_COUNT as u8 {
            let material = MaterialId::from_ordinal(ordinal);
            assert_eq!(material.ordinal(), ordinal);
        }
    }

    #[test]
    fn test_from_ordinal_clamps_invalid() {
        assert_eq!(MaterialId::from_ordinal(8), MaterialId::Air);
        assert_eq!(MaterialId::from_ordinal(200), MaterialId::Air);
        assert_eq!(MaterialId::from_ordinal(u8::MAX), MaterialId::Air);
    }

    #[test]
    fn test_air_carries_nothing() {
        let air = MaterialId::Air.properties();
        assert_eq!(air.max_fuel, 0.0);
        assert_eq!(air.moisture_capacity, 0.0);
        assert_eq!(air.flammability, 0.0);
        assert!(!air.is_heat_source);
        assert!(!air.is_moisture_source);
    }

    #[test]
    fn test_flammables_can_actually_burn() {
        for material in [
            MaterialId::Grass,
            MaterialId::DryBrush,
            MaterialId::Wood,
            MaterialId::Leaves,
        ] {
            let props = material.properties();
            assert!(props.flammability > 0.0, "{material:?} not flammable");
            assert!(props.max_fuel > 0.0, "{material:?} has no fuel");
            assert!(props.burn_rate > 0.0, "{material:?} never consumes fuel");
            // Ignition must be reachable below the temperature ceiling
            assert!(props.ignition_temp < 1.0, "{material:?} cannot ignite");
        }

        // Wetting past the burn threshold must be possible for these, or
        // they could never be extinguished by moisture
        for material in [MaterialId::Grass, MaterialId::Wood, MaterialId::Leaves] {
            let props = material.properties();
            assert!(
                props.moisture_capacity > props.max_burn_moisture,
                "{material:?} cannot be wetted out"
            );
        }

        // Dry brush is the exception: it holds too little water to cross
        // its own burn threshold, so it catches on temperature alone
        let brush = MaterialId::DryBrush.properties();
        assert!(brush.moisture_capacity < brush.max_burn_moisture);
    }

    #[test]
    fn test_inerts_never_burn() {
        for material in [
            MaterialId::Air,
            MaterialId::Stone,
            MaterialId::Water,
            MaterialId::Lava,
        ] {
            let props = material.properties();
            assert_eq!(props.flammability, 0.0, "{material:?} should be inert");
            assert_eq!(props.max_fuel, 0.0, "{material:?} should carry no fuel");
        }
    }

    #[test]
    fn test_sources() {
        assert!(MaterialId::Lava.properties().is_heat_source);
        assert!(MaterialId::Water.properties().is_moisture_source);
        assert_eq!(MaterialId::Water.properties().moisture_capacity, 1.0);
    }

    #[test]
    fn test_properties_within_channel_range() {
        for ordinal in 0..MATERIAL_COUNT as u8 {
            let props = MaterialId::from_ordinal(ordinal).properties();
            assert!((0.0..=1.0).contains(&props.ignition_temp));
            assert!((0.0..=1.0).contains(&props.max_burn_moisture));
            assert!((0.0..=1.0).contains(&props.moisture_capacity));
            assert!((0.0..=1.0).contains(&props.max_fuel));
            assert!((0.0..=1.0).contains(&props.flammability));
        }
    }
}
