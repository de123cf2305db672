mod common;

use common::*;
use sightline::geometry::Point;
use sightline::map::{GameMap, MapData, MapError, Shape, WorldBounds};

#[test]
fn test_shipped_map_loads() {
    let map = GameMap::from_json_file("assets/maps/1.json").expect("shipped map must load");

    assert_eq!(map.name(), "arena");
    let bounds = map.bounds();
    assert_eq!((bounds.x, bounds.y), (-900.0, -600.0));
    assert_eq!((bounds.w, bounds.h), (1800.0, 1200.0));

    // Boundary plus four segments per occluding rectangle; the circle and
    // the window contribute none.
    assert_eq!(map.segments().len(), 24);
    assert_eq!(map.points().len(), 24);
    assert_eq!(map.spawn_points().len(), 2);

    let keys: Vec<_> = map.groups().iter().map(|g| g.key.as_str()).collect();
    assert_eq!(keys, ["wl", "wn"]);
    assert!(map.groups()[0].occluding);
    assert!(!map.groups()[1].occluding);
}

#[test]
fn test_shipped_map_spawns_are_walkable() {
    let map = GameMap::from_json_file("assets/maps/1.json").expect("shipped map must load");
    for spawn in map.spawn_points() {
        assert!(
            !map.collides_circle(spawn.x, spawn.y, 36.0),
            "spawn ({}, {}) overlaps an obstacle",
            spawn.x,
            spawn.y
        );
    }
}

#[test]
fn test_document_bounds_center_the_canvas() {
    let data = MapData::parse(r#"{"name": "m", "width": "400", "height": "300"}"#).unwrap();
    let bounds = data.world_bounds().unwrap();
    assert_eq!(bounds, WorldBounds::centered(400.0, 300.0));
    assert_eq!((bounds.x, bounds.y), (-200.0, -150.0));
}

#[test]
fn test_explicit_bounds_override_canvas_shift() {
    // The same document built over wider bounds keeps shapes at the same
    // canvas offset from the new top-left corner.
    let data = MapData::parse(
        r#"{"name": "m", "width": 400, "height": 300,
            "wl": [{"x": 10, "y": 20, "width": 30, "height": 40}]}"#,
    )
    .unwrap();

    let map = GameMap::new(WorldBounds::centered(1000.0, 600.0), &data).unwrap();
    match map.groups()[0].obstacles[0].shape {
        Shape::Rect { x, y, w, h } => {
            assert_eq!((x, y), (-490.0, -280.0));
            assert_eq!((w, h), (30.0, 40.0));
        }
        ref other => panic!("expected a rectangle, got {:?}", other),
    }
}

#[test]
fn test_mixed_groups_partition_geometry() {
    let map = map_from_json(
        r#"{"name": "m", "width": 1000, "height": 1000,
            "wl": [{"x": 100, "y": 100, "width": 50, "height": 50},
                   {"cx": 500, "cy": 500, "r": 40}],
            "wn": [{"x": 300, "y": 300, "width": 80, "height": 20}],
            "sp": [{"x": 50, "y": 50}]}"#,
    );

    // One occluding rectangle: 4 boundary + 4 rect segments.
    assert_eq!(map.segments().len(), 8);
    assert_eq!(map.points().len(), 8);
    assert_eq!(map.spawn_points(), [Point::new(-450.0, -450.0)]);

    // All three non-spawn shapes are present for rendering and collision.
    let total: usize = map.groups().iter().map(|g| g.obstacles.len()).sum();
    assert_eq!(total, 3);

    // Window and circle collide despite casting no shadow.
    assert!(map.collides_circle(0.0, 0.0, 20.0)); // circle at world origin
    assert!(map.collides_circle(-160.0, -190.0, 10.0)); // inside the window
}

#[test]
fn test_points_are_sorted_and_unique() {
    let map = map_from_json(
        r#"{"name": "m", "width": 1000, "height": 1000,
            "wl": [{"x": 100, "y": 100, "width": 100, "height": 100},
                   {"x": 200, "y": 100, "width": 100, "height": 100}]}"#,
    );

    // The two rectangles share an edge: two corners coincide.
    assert_eq!(map.segments().len(), 12);
    assert_eq!(map.points().len(), 4 + 8 - 2);

    for pair in map.points().windows(2) {
        let ordered = pair[0].x < pair[1].x
            || (pair[0].x == pair[1].x && pair[0].y < pair[1].y);
        assert!(ordered, "{:?} repeats or precedes {:?}", pair[1], pair[0]);
    }
}

#[test]
fn test_geometry_errors_name_the_group() {
    let err = GameMap::from_json(
        r#"{"name": "m", "width": 1000, "height": 1000,
            "walls": [{"x": "3,5", "y": 0, "width": 10, "height": 10}]}"#,
    )
    .unwrap_err();
    match err {
        MapError::NonNumeric { group, field, value } => {
            assert_eq!(group, "walls");
            assert_eq!(field, "x");
            assert_eq!(value, "3,5");
        }
        other => panic!("expected NonNumeric, got {:?}", other),
    }
}

#[test]
fn test_spawn_layer_key_is_case_insensitive() {
    let map = map_from_json(
        r#"{"name": "m", "width": 1000, "height": 1000,
            "SP": [{"x": 500, "y": 500}]}"#,
    );
    assert_eq!(map.spawn_points(), [Point::new(0.0, 0.0)]);
    assert!(map.groups().is_empty());
}
