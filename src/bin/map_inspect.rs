use std::env;
use std::process;

use sightline::map::{GameMap, MapData, WorldBounds};

/// Inspector for map documents.
///
/// Loads a map JSON file, builds the world geometry and prints a summary.
/// Exits non-zero when the document is rejected, so it doubles as a
/// validator for the asset pipeline.
fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <map.json> [width height]", args[0]);
        eprintln!("Validates a map document and prints its geometry summary");
        process::exit(1);
    }

    let filename = &args[1];
    let json = match std::fs::read_to_string(filename) {
        Ok(json) => json,
        Err(e) => {
            eprintln!("Cannot read {}: {}", filename, e);
            process::exit(1);
        }
    };

    let data = match MapData::parse(&json) {
        Ok(data) => data,
        Err(e) => {
            eprintln!("Map rejected: {}", e);
            process::exit(1);
        }
    };

    // Optional explicit bounds override the canvas-derived ones.
    let bounds = if args.len() >= 4 {
        match (args[2].parse::<f64>(), args[3].parse::<f64>()) {
            (Ok(w), Ok(h)) => WorldBounds::centered(w, h),
            _ => {
                eprintln!("Width and height must be numbers");
                process::exit(1);
            }
        }
    } else {
        match data.world_bounds() {
            Ok(bounds) => bounds,
            Err(e) => {
                eprintln!("Map rejected: {}", e);
                process::exit(1);
            }
        }
    };

    let map = match GameMap::new(bounds, &data) {
        Ok(map) => map,
        Err(e) => {
            eprintln!("Map rejected: {}", e);
            process::exit(1);
        }
    };

    println!("=== Map: {} ({}) ===", map.name(), filename);
    println!(
        "Bounds: ({}, {}) {}x{}",
        bounds.x, bounds.y, bounds.w, bounds.h
    );
    println!();

    for group in map.groups() {
        let occlusion = if group.occluding {
            "occluding"
        } else {
            "see-through"
        };
        println!(
            "Group '{}': {} shapes ({})",
            group.key,
            group.obstacles.len(),
            occlusion
        );
    }
    println!();

    println!("=== Geometry ===");
    println!("Wall segments: {}", map.segments().len());
    println!("Unique corners: {}", map.points().len());
    println!("Spawn points: {}", map.spawn_points().len());
    for spawn in map.spawn_points() {
        println!("  spawn at ({}, {})", spawn.x, spawn.y);
    }
}
