//! Scene authoring operations
//!
//! Everything here mutates grid contents directly between steps: material
//! painting, brush sprays, bulk fills, and active-list maintenance. Writes go
//! through to both buffers so a later swap cannot resurrect pre-edit state.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use tracing::debug;

use crate::core_types::voxel::{pack_channel, VoxelCell};
use crate::core_types::{MaterialId, VoxelState};
use crate::solver::SimulationStats;

use super::FireSystem;

impl FireSystem {
    /// Paint one voxel with a material, initializing its channels.
    ///
    /// Temperature starts at ambient, moisture at the material's full
    /// capacity, fuel at `min(1, max_fuel * global_fuel)`. Out-of-bounds
    /// coordinates are a no-op. Painting air zeroes the cell and leaves a
    /// stale active entry behind; the stepper skips it until the next
    /// [`FireSystem::rebuild_active_list`].
    pub fn set_material(&mut self, x: i32, y: i32, z: i32, material: MaterialId) {
        if !self.config.contains(x, y, z) {
            return;
        }
        let index = self.config.flat_index(x as u32, y as u32, z as u32);
        self.write_material(index, material);
    }

    /// Write a fully specified voxel state.
    ///
    /// Channels are clamped to their valid ranges, moisture against the
    /// material's capacity. Air forces every channel to zero.
    pub fn set_voxel(&mut self, x: i32, y: i32, z: i32, state: VoxelState) {
        if !self.config.contains(x, y, z) {
            return;
        }
        let index = self.config.flat_index(x as u32, y as u32, z as u32);
        let cell = if state.material == MaterialId::Air {
            VoxelCell::EMPTY
        } else {
            let props = state.material.properties();
            VoxelCell {
                temperature: pack_channel(state.temperature),
                moisture: pack_channel(state.moisture.clamp(0.0, props.moisture_capacity)),
                fuel: pack_channel(state.fuel),
                material: state.material.ordinal(),
            }
        };
        self.state.write(index, cell);
        if state.material != MaterialId::Air {
            self.active.insert(index as u32);
        }
    }

    /// Raise temperature and dry out a falloff sphere.
    ///
    /// Material and fuel are untouched, so igniting cannot create or destroy
    /// burnable mass.
    pub fn ignite(&mut self, x: i32, y: i32, z: i32, radius: f32) {
        self.apply_falloff(x, y, z, radius, |state, falloff| {
            state.temperature = state.temperature.max(falloff);
            state.moisture *= 1.0 - falloff;
        });
    }

    /// Soak a falloff sphere: moisture rises toward each cell's own capacity
    /// and temperature falls toward ambient.
    pub fn wet(&mut self, x: i32, y: i32, z: i32, radius: f32) {
        let ambient = self.simulation.ambient_temperature;
        self.apply_falloff(x, y, z, radius, |state, falloff| {
            let capacity = state.material.properties().moisture_capacity;
            state.moisture += (capacity - state.moisture) * falloff;
            state.temperature += (ambient - state.temperature) * falloff;
        });
    }

    /// Bulk-paint an axis-aligned box spanning two corners (inclusive, in
    /// either order), clamped to the grid.
    pub fn fill_region(
        &mut self,
        corner_a: (i32, i32, i32),
        corner_b: (i32, i32, i32),
        material: MaterialId,
    ) {
        let (x0, x1) = axis_span(corner_a.0, corner_b.0, self.config.size_x);
        let (y0, y1) = axis_span(corner_a.1, corner_b.1, self.config.size_y);
        let (z0, z1) = axis_span(corner_a.2, corner_b.2, self.config.size_z);
        for y in y0..=y1 {
            for z in z0..=z1 {
                for x in x0..=x1 {
                    let index = self.config.flat_index(x as u32, y as u32, z as u32);
                    self.write_material(index, material);
                }
            }
        }
    }

    /// Bulk-paint a sphere: every voxel with `dx^2 + dy^2 + dz^2 <= r^2`.
    pub fn fill_sphere(&mut self, cx: i32, cy: i32, cz: i32, radius: f32, material: MaterialId) {
        if !radius.is_finite() || radius <= 0.0 {
            return;
        }
        let reach = radius.ceil() as i32;
        let radius_sq = radius * radius;
        let (x0, x1) = span_around(cx, reach, self.config.size_x);
        let (y0, y1) = span_around(cy, reach, self.config.size_y);
        let (z0, z1) = span_around(cz, reach, self.config.size_z);
        for y in y0..=y1 {
            for z in z0..=z1 {
                for x in x0..=x1 {
                    let dx = (x - cx) as f32;
                    let dy = (y - cy) as f32;
                    let dz = (z - cz) as f32;
                    if dx * dx + dy * dy + dz * dz > radius_sq {
                        continue;
                    }
                    let index = self.config.flat_index(x as u32, y as u32, z as u32);
                    self.write_material(index, material);
                }
            }
        }
    }

    /// Scatter a material through a box with per-voxel probability
    /// `density`, reproducibly from `seed`.
    ///
    /// One random draw is made per voxel in the clamped box whether or not
    /// it lands, so a given seed always produces the same pattern.
    pub fn scatter(
        &mut self,
        corner_a: (i32, i32, i32),
        corner_b: (i32, i32, i32),
        material: MaterialId,
        density: f32,
        seed: u64,
    ) {
        if !density.is_finite() {
            return;
        }
        let mut rng = StdRng::seed_from_u64(seed);
        let (x0, x1) = axis_span(corner_a.0, corner_b.0, self.config.size_x);
        let (y0, y1) = axis_span(corner_a.1, corner_b.1, self.config.size_y);
        let (z0, z1) = axis_span(corner_a.2, corner_b.2, self.config.size_z);
        for y in y0..=y1 {
            for z in z0..=z1 {
                for x in x0..=x1 {
                    if rng.random::<f32>() >= density {
                        continue;
                    }
                    let index = self.config.flat_index(x as u32, y as u32, z as u32);
                    self.write_material(index, material);
                }
            }
        }
    }

    /// Reset the world: both buffers zeroed, active set emptied, clock and
    /// stats cleared. Wind, simulation params and multipliers survive.
    pub fn clear(&mut self) {
        self.state.clear();
        self.active.clear();
        self.time = 0.0;
        self.stats = SimulationStats::default();
        debug!("Cleared fire system");
    }

    /// Rescan the whole grid and rebuild the active list from cell contents.
    ///
    /// O(N) over all voxels; used after bulk edits or a byte-buffer load to
    /// drop stale air entries. The rebuilt list is in ascending index order,
    /// so rebuilding is itself deterministic.
    pub fn rebuild_active_list(&mut self) {
        let air = MaterialId::Air.ordinal();
        let indices: Vec<u32> = self
            .state
            .cells()
            .par_iter()
            .enumerate()
            .filter_map(|(index, cell)| (cell.material != air).then_some(index as u32))
            .collect();
        debug!("Rebuilt active list: {} cells", indices.len());
        self.active.replace(indices);
    }

    fn write_material(&mut self, index: usize, material: MaterialId) {
        let cell = self.material_cell(material);
        self.state.write(index, cell);
        if material != MaterialId::Air {
            self.active.insert(index as u32);
        }
    }

    fn material_cell(&self, material: MaterialId) -> VoxelCell {
        if material == MaterialId::Air {
            return VoxelCell::EMPTY;
        }
        let props = material.properties();
        VoxelCell {
            temperature: pack_channel(self.simulation.ambient_temperature),
            moisture: pack_channel(props.moisture_capacity),
            fuel: pack_channel((props.max_fuel * self.global_fuel).min(1.0)),
            material: material.ordinal(),
        }
    }

    /// Walk the voxels inside a sphere and apply `edit` with a linear
    /// falloff weight: 1 at the center, 0 at the radius. Air cells are
    /// skipped and channels are re-clamped after the edit; materials and the
    /// active list are never touched.
    fn apply_falloff<F>(&mut self, cx: i32, cy: i32, cz: i32, radius: f32, mut edit: F)
    where
        F: FnMut(&mut VoxelState, f32),
    {
        if !radius.is_finite() || radius <= 0.0 {
            return;
        }
        let reach = radius.ceil() as i32;
        let radius_sq = radius * radius;
        let (x0, x1) = span_around(cx, reach, self.config.size_x);
        let (y0, y1) = span_around(cy, reach, self.config.size_y);
        let (z0, z1) = span_around(cz, reach, self.config.size_z);
        for y in y0..=y1 {
            for z in z0..=z1 {
                for x in x0..=x1 {
                    let dx = (x - cx) as f32;
                    let dy = (y - cy) as f32;
                    let dz = (z - cz) as f32;
                    let dist_sq = dx * dx + dy * dy + dz * dz;
                    if dist_sq > radius_sq {
                        continue;
                    }
                    let index = self.config.flat_index(x as u32, y as u32, z as u32);
                    let cell = self.state.get(index);
                    if cell.material_id() == MaterialId::Air {
                        continue;
                    }
                    let mut state = cell.unpack();
                    edit(&mut state, 1.0 - dist_sq.sqrt() / radius);
                    let props = state.material.properties();
                    self.state.write(
                        index,
                        VoxelCell {
                            temperature: pack_channel(state.temperature),
                            moisture: pack_channel(
                                state.moisture.clamp(0.0, props.moisture_capacity),
                            ),
                            fuel: pack_channel(state.fuel),
                            material: cell.material,
                        },
                    );
                }
            }
        }
    }
}

/// Clamp an inclusive span given by two unordered endpoints to `[0, size)`.
fn axis_span(a: i32, b: i32, size: u32) -> (i32, i32) {
    (a.min(b).max(0), a.max(b).min(size as i32 - 1))
}

/// Clamp the inclusive span `center - reach ..= center + reach` to `[0, size)`,
/// saturating so an oversized reach covers the whole axis.
fn span_around(center: i32, reach: i32, size: u32) -> (i32, i32) {
    axis_span(center.saturating_sub(reach), center.saturating_add(reach), size)
}
