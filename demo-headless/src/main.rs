use clap::Parser;
use voxfire_core::{FireSystem, GridConfig, GridPreset, MaterialId, Vec3, WindParams};

/// Voxel fire simulation demo with configurable parameters
#[derive(Parser, Debug)]
#[command(name = "voxfire-demo")]
#[command(about = "Headless voxel fire propagation demo", long_about = None)]
struct Args {
    /// Grid preset (small, medium, large)
    #[arg(short, long, default_value = "small")]
    preset: String,

    /// Simulation duration in seconds
    #[arg(short, long, default_value_t = 60.0)]
    duration: f32,

    /// Step size in seconds
    #[arg(long, default_value_t = 0.05)]
    dt: f32,

    /// Wind speed (normalized, typically 0-1)
    #[arg(short, long, default_value_t = 0.6)]
    wind_speed: f32,

    /// Wind direction in degrees (0 blows toward +X, 90 toward +Z)
    #[arg(long, default_value_t = 0.0)]
    wind_direction: f32,

    /// Simulation time scale multiplier
    #[arg(long, default_value_t = 1.0)]
    time_scale: f32,

    /// Dry brush coverage of the ground layer (0-1)
    #[arg(long, default_value_t = 0.45)]
    brush_density: f32,

    /// Scatter seed for the brush layer
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Number of trees to place
    #[arg(long, default_value_t = 5)]
    num_trees: u32,

    /// Tree spacing in voxels
    #[arg(long, default_value_t = 8)]
    tree_spacing: i32,

    /// Report interval in simulation seconds
    #[arg(short, long, default_value_t = 5.0)]
    report_interval: f32,

    /// Run validation checks instead of the scenario
    #[arg(short, long)]
    validate: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    if args.validate {
        run_validation_checks();
        return;
    }

    println!("=== Voxel Fire Simulation Demo ===\n");

    let preset = match args.preset.to_lowercase().as_str() {
        "small" => GridPreset::Small,
        "medium" => GridPreset::Medium,
        "large" => GridPreset::Large,
        other => {
            println!("Unknown preset '{}', using small", other);
            GridPreset::Small
        }
    };

    let dt = if args.dt.is_finite() && args.dt > 0.0 {
        args.dt
    } else {
        println!("Invalid dt {}, using 0.05", args.dt);
        0.05
    };

    let mut sim = FireSystem::new(preset, Vec3::zeros());
    let config = *sim.config();
    println!(
        "Created {}x{}x{} voxel grid at {:.2} m per voxel",
        config.size_x, config.size_y, config.size_z, config.voxel_size
    );

    sim.wind.direction_deg = args.wind_direction;
    sim.wind.speed = args.wind_speed;
    sim.simulation.time_scale = args.time_scale;
    println!(
        "Wind: speed {:.2} toward {:.0} deg, time scale {:.1}x\n",
        args.wind_speed, args.wind_direction, args.time_scale
    );

    // Build the scene: a grass field with dry brush scattered through it and
    // a few wood-and-leaves trees near the center
    println!("Authoring scene...");

    let max_x = config.size_x as i32 - 1;
    let max_z = config.size_z as i32 - 1;
    sim.fill_region((0, 0, 0), (max_x, 0, max_z), MaterialId::Grass);
    sim.scatter(
        (0, 0, 0),
        (max_x, 0, max_z),
        MaterialId::DryBrush,
        args.brush_density,
        args.seed,
    );
    println!(
        "Ground layer: {} voxels ({:.0}% dry brush)",
        sim.active_voxels().len(),
        args.brush_density * 100.0
    );

    let center_x = config.size_x as i32 / 2;
    let center_z = config.size_z as i32 / 2;
    let trees_per_row = (args.num_trees as f32).sqrt().ceil() as i32;
    let offset = (trees_per_row - 1) * args.tree_spacing / 2;

    let mut tree_num = 0;
    'rows: for row in 0..trees_per_row {
        for col in 0..trees_per_row {
            if tree_num >= args.num_trees {
                break 'rows;
            }
            let x = center_x + col * args.tree_spacing - offset;
            let z = center_z + row * args.tree_spacing - offset;

            // Trunk plus a canopy block
            sim.fill_region((x, 0, z), (x, 2, z), MaterialId::Wood);
            sim.fill_region((x - 1, 3, z - 1), (x + 1, 4, z + 1), MaterialId::Leaves);

            tree_num += 1;
        }
    }
    println!(
        "Added {} trees with {} voxel spacing, {} voxels total",
        tree_num,
        args.tree_spacing,
        sim.active_voxels().len()
    );

    sim.ignite(center_x, 0, center_z, 3.0);
    println!("Ignited at ({}, 0, {}) with radius 3\n", center_x, center_z);

    println!("Running simulation...\n");
    println!("Time(s) | Burning | Steaming | Charred | Active | Avg Temp | Step(ms)");
    println!("--------|---------|----------|---------|--------|----------|---------");

    let mut time = 0.0_f32;
    let mut steps = 0_u32;
    let mut next_report = args.report_interval;
    let (final_stats, fire_out) = loop {
        sim.step(dt);
        time += dt;
        steps += 1;
        let stats = *sim.stats();

        if time >= next_report {
            println!(
                "{:7.1} | {:7} | {:8} | {:7} | {:6} | {:8.3} | {:8.3}",
                time,
                stats.burning_voxels,
                stats.steaming_voxels,
                stats.charred_voxels,
                stats.active_voxels,
                stats.avg_temperature,
                stats.step_time_ms
            );
            next_report += args.report_interval;
        }

        if time >= args.duration {
            break (stats, false);
        }
        if stats.burning_voxels == 0 && stats.steaming_voxels == 0 {
            break (stats, true);
        }
    };

    println!("\n=== Simulation Complete ===");
    if fire_out {
        println!("Fire burned out at {:.1}s", time);
    } else {
        println!("Reached configured duration at {:.1}s", time);
    }
    println!("Simulation clock: {:.1}s", sim.time());
    println!("Steps taken: {}", steps);
    println!("Burning voxels: {}", final_stats.burning_voxels);
    println!("Charred voxels: {}", final_stats.charred_voxels);
    println!("Average temperature: {:.3}", final_stats.avg_temperature);
    println!("Average moisture: {:.3}", final_stats.avg_moisture);
    println!(
        "Last step: {:.3} ms ({:.0} steps/s)",
        final_stats.step_time_ms, final_stats.fps
    );
}

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

fn flat_grid(size_x: u32, size_y: u32, size_z: u32) -> FireSystem {
    FireSystem::with_config(GridConfig {
        size_x,
        size_y,
        size_z,
        voxel_size: 1.0,
        origin: Vec3::zeros(),
    })
}

fn run_validation_checks() {
    println!("=== Running Validation Checks ===\n");

    // Check 1: wind directionality
    println!("Check 1: Wind Directionality");
    let mut sim = flat_grid(64, 8, 64);
    sim.wind = steady_wind(0.0, 1.0);
    sim.fill_region((16, 0, 28), (44, 0, 36), MaterialId::DryBrush);
    sim.ignite(26, 0, 32, 2.5);

    let mut upwind_peak = 0.0_f32;
    let mut downwind_reached = false;
    for _ in 0..1000 {
        sim.step(0.05);
        let upwind = sim.voxel(20, 0, 32).map_or(0.0, |v| v.temperature);
        upwind_peak = upwind_peak.max(upwind);
        let downwind = sim.voxel(35, 0, 32).map_or(0.0, |v| v.temperature);
        if downwind > 0.25 {
            downwind_reached = true;
            break;
        }
    }
    println!("  Downwind probe heated: {}", downwind_reached);
    println!("  Upwind probe peak temperature: {:.3}", upwind_peak);
    if downwind_reached && upwind_peak < 0.25 {
        println!("  PASS: fire spreads downwind only\n");
    } else {
        println!("  FAIL: expected directional spread\n");
    }

    // Check 2: soaking extinguishes
    println!("Check 2: Soak Extinguishes Fire");
    let mut sim = flat_grid(8, 8, 8);
    sim.wind = steady_wind(0.0, 0.0);
    sim.set_material(4, 2, 4, MaterialId::Grass);
    sim.ignite(4, 2, 4, 1.5);
    for _ in 0..10 {
        sim.step(0.05);
    }
    let burning_before = sim.voxel(4, 2, 4).is_some_and(|v| v.is_burning());
    sim.wet(4, 2, 4, 2.0);
    sim.step(0.05);
    let burning_after = sim.voxel(4, 2, 4).is_some_and(|v| v.is_burning());
    println!("  Burning before soak: {}", burning_before);
    println!("  Burning after soak: {}", burning_after);
    if burning_before && !burning_after {
        println!("  PASS: water knocks the fire down\n");
    } else {
        println!("  FAIL: expected the soak to extinguish\n");
    }

    // Check 3: fire climbs into the canopy
    println!("Check 3: Vertical Spread Into Canopy");
    let mut sim = flat_grid(8, 6, 8);
    sim.wind = steady_wind(0.0, 0.0);
    sim.fill_region((1, 0, 1), (5, 0, 5), MaterialId::Grass);
    sim.fill_region((2, 1, 2), (4, 1, 4), MaterialId::Leaves);
    sim.set_material(3, 2, 3, MaterialId::Wood);
    sim.ignite(3, 0, 3, 3.0);

    let mut leaves_peak = 0.0_f32;
    let mut wood_peak = 0.0_f32;
    for _ in 0..500 {
        sim.step(0.05);
        leaves_peak = leaves_peak.max(sim.voxel(3, 1, 3).map_or(0.0, |v| v.temperature));
        wood_peak = wood_peak.max(sim.voxel(3, 2, 3).map_or(0.0, |v| v.temperature));
    }
    println!("  Canopy leaves peak temperature: {:.3}", leaves_peak);
    println!("  Trunk-top wood peak temperature: {:.3}", wood_peak);
    if leaves_peak > 0.3 && wood_peak > 0.2 {
        println!("  PASS: heat climbs from the surface fire\n");
    } else {
        println!("  FAIL: expected convection to carry fire upward\n");
    }

    println!("=== Validation Complete ===");
}
