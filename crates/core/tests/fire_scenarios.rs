//! End-to-end fire behavior: ignition and burn-down, soak extinguishing,
//! wind-driven spread across a brush field, convective ignition of a canopy,
//! and the stats the facade reports while all of it happens.

use voxfire_core::{FireSystem, GridConfig, GridPreset, MaterialId, Vec3, WindParams};

#[ctor::ctor]
fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Gust-free wind so scenario timings are stable.
fn steady_wind(direction_deg: f32, speed: f32) -> WindParams {
    WindParams {
        direction_deg,
        speed,
        turbulence: 0.0,
        gust_frequency: 0.0,
        gust_amplitude: 0.0,
        local_variation: 0.0,
        variation_scale: 0.05,
    }
}

fn small_grid(size_x: u32, size_y: u32, size_z: u32) -> FireSystem {
    FireSystem::with_config(GridConfig {
        size_x,
        size_y,
        size_z,
        voxel_size: 1.0,
        origin: Vec3::zeros(),
    })
}

/// A lone grass voxel in open air, lit with the ignite brush, must heat past
/// its ignition threshold and consume fuel over two simulated seconds.
#[test]
fn test_isolated_grass_voxel_ignites_and_burns_down() {
    let mut sys = FireSystem::new(GridPreset::Small, Vec3::zeros());
    sys.wind = steady_wind(0.0, 0.0);
    sys.set_material(32, 0, 32, MaterialId::Grass);
    sys.ignite(32, 0, 32, 2.0);

    let initial_fuel = sys.voxel(32, 0, 32).unwrap().fuel;
    let ignition_temp = MaterialId::Grass.properties().ignition_temp;

    let mut peak_temperature = 0.0_f32;
    for _ in 0..120 {
        sys.step(1.0 / 60.0);
        let state = sys.voxel(32, 0, 32).unwrap();
        peak_temperature = peak_temperature.max(state.temperature);
    }

    let final_fuel = sys.voxel(32, 0, 32).unwrap().fuel;
    assert!(
        peak_temperature > ignition_temp,
        "peak temperature {} never crossed the grass ignition threshold {}",
        peak_temperature,
        ignition_temp
    );
    assert!(
        final_fuel < initial_fuel,
        "fuel never dropped ({} -> {})",
        initial_fuel,
        final_fuel
    );
}

/// Soaking a burning voxel past its max-burn moisture stops combustion on
/// the next step.
#[test]
fn test_soaking_extinguishes_a_burning_voxel() {
    let mut sys = FireSystem::new(GridPreset::Small, Vec3::zeros());
    sys.wind = steady_wind(0.0, 0.0);
    sys.set_material(32, 0, 32, MaterialId::Grass);
    sys.ignite(32, 0, 32, 2.0);

    sys.step(1.0 / 60.0);
    assert!(
        sys.voxel(32, 0, 32).unwrap().is_burning(),
        "the voxel should burn before soaking"
    );
    assert_eq!(sys.stats().burning_voxels, 1);

    sys.wet(32, 0, 32, 3.0);
    let soaked = sys.voxel(32, 0, 32).unwrap();
    let max_burn = MaterialId::Grass.properties().max_burn_moisture;
    assert!(
        soaked.moisture > max_burn,
        "soaked moisture {} should exceed the max-burn threshold {}",
        soaked.moisture,
        max_burn
    );
    assert!(!soaked.is_burning(), "soaked voxel still reports burning");

    sys.step(1.0 / 60.0);
    assert_eq!(
        sys.stats().burning_voxels,
        0,
        "soaked voxel kept burning on the following step"
    );
}

/// With a steady +X wind, a fire lit in a dry brush field must reach a
/// probe nine voxels downwind of the seed while the mirror probe six voxels
/// upwind never warms at all.
#[test]
fn test_fire_spreads_downwind_across_a_brush_field() {
    let mut sys = FireSystem::new(GridPreset::Small, Vec3::zeros());
    sys.wind = steady_wind(0.0, 1.0);
    sys.fill_region((16, 0, 28), (44, 0, 36), MaterialId::DryBrush);
    sys.ignite(26, 0, 32, 2.5);

    let downwind = (35, 0, 32);
    let upwind = (20, 0, 32);

    let mut reached_at = None;
    let mut upwind_peak = 0.0_f32;
    for step in 0..1000 {
        sys.step(0.05);
        upwind_peak = upwind_peak.max(sys.voxel(upwind.0, upwind.1, upwind.2).unwrap().temperature);
        if sys.voxel(downwind.0, downwind.1, downwind.2).unwrap().temperature > 0.25 {
            reached_at = Some(step);
            break;
        }
    }

    let reached_at =
        reached_at.expect("fire never advanced downwind in 50 simulated seconds");
    assert!(
        upwind_peak < 0.25,
        "cell {:?} facing the wind peaked at {} while the front reached the downwind probe at step {}",
        upwind,
        upwind_peak,
        reached_at
    );
}

/// Convection carries heat upward: a burning grass floor ignites the leaf
/// canopy above it, and the wood above the canopy warms in turn.
#[test]
fn test_convection_ignites_canopy_above_surface_fire() {
    let mut sys = small_grid(8, 6, 8);
    sys.wind = steady_wind(0.0, 0.0);
    sys.fill_region((1, 0, 1), (5, 0, 5), MaterialId::Grass);
    sys.fill_region((2, 1, 2), (4, 1, 4), MaterialId::Leaves);
    sys.set_material(3, 2, 3, MaterialId::Wood);
    sys.ignite(3, 0, 3, 3.0);

    let leaves_ignition = MaterialId::Leaves.properties().ignition_temp;
    let mut leaves_peak = 0.0_f32;
    let mut wood_peak = 0.0_f32;
    for _ in 0..500 {
        sys.step(0.05);
        leaves_peak = leaves_peak.max(sys.voxel(3, 1, 3).unwrap().temperature);
        wood_peak = wood_peak.max(sys.voxel(3, 2, 3).unwrap().temperature);
    }

    assert!(
        leaves_peak > leaves_ignition,
        "leaves above the fire peaked at {} but ignite at {}",
        leaves_peak,
        leaves_ignition
    );
    assert!(
        wood_peak > 0.2,
        "wood two voxels up only reached {}",
        wood_peak
    );
}

/// One run in which burning, steaming and charred cells all appear, with
/// the aggregate fields staying self-consistent.
#[test]
fn test_stats_report_burning_steaming_and_charred() {
    let mut sys = small_grid(6, 3, 6);
    sys.wind = steady_wind(0.0, 0.0);
    sys.set_global_multipliers(5.0, 1.0);
    sys.fill_region((2, 0, 2), (4, 0, 4), MaterialId::DryBrush);
    sys.fill_region((0, 0, 0), (1, 0, 1), MaterialId::Lava);
    sys.set_material(0, 1, 0, MaterialId::Water);
    sys.ignite(3, 0, 3, 4.0);

    let mut saw_burning = false;
    let mut saw_steaming = false;
    let mut saw_charred = false;
    for _ in 0..200 {
        sys.step(0.05);
        let stats = *sys.stats();
        saw_burning |= stats.burning_voxels > 0;
        saw_steaming |= stats.steaming_voxels > 0;
        saw_charred |= stats.charred_voxels > 0;

        assert_eq!(stats.active_voxels as usize, sys.active_voxels().len());
        assert!(stats.avg_temperature >= 0.0 && stats.avg_temperature <= 1.0);
        assert!(stats.avg_moisture >= 0.0 && stats.avg_moisture <= 1.0);
        assert!(stats.step_time_ms >= 0.0);
        assert!(stats.fps >= 0.0);
    }

    assert!(saw_burning, "no step reported burning voxels");
    assert!(saw_steaming, "the water pocket over lava never steamed");
    assert!(saw_charred, "the brush never burned down to char");
}
