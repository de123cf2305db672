mod common;

use common::*;
use sightline::geometry::angle_between;
use sightline::raycaster::Raycaster;
use std::f64::consts::{FRAC_PI_2, FRAC_PI_3, TAU};

#[test]
fn test_full_circle_sees_every_corner() {
    let map = empty_room();
    let caster = Raycaster::new(&map);
    let points = caster.generate_intersection_points(0.0, 0.0, 0.0, TAU);

    // Seed, two edge rays, and a triple per room corner.
    assert_eq!(points.len(), 15);
    assert_fan_order(&points, 0.0, 0.0, 0.0, TAU);
    for (cx, cy) in [
        (-900.0, -600.0),
        (900.0, -600.0),
        (900.0, 600.0),
        (-900.0, 600.0),
    ] {
        assert!(
            contains_point(&points, cx, cy, 1e-6),
            "missing corner ({}, {})",
            cx,
            cy
        );
    }
    // Both edge rays at ±π land on the left wall beside the viewer's level.
    assert!(contains_point(&points, -900.0, 0.0, 1e-6));
}

#[test]
fn test_quarter_cone_pins_edges_and_corners() {
    let map = empty_room();
    let caster = Raycaster::new(&map);
    let points = caster.generate_intersection_points(0.0, 0.0, 0.0, FRAC_PI_2);

    // Seed, two edge hits, and triples for the two right-hand corners; the
    // corners behind the viewer fall outside the cone.
    assert_eq!(points.len(), 9);
    assert_fan_order(&points, 0.0, 0.0, 0.0, FRAC_PI_2);

    // Edge rays at ∓π/4 hit the top and bottom walls, not the right wall.
    assert!((points[1].x - 600.0).abs() < 1e-6);
    assert!((points[1].y + 600.0).abs() < 1e-6);
    assert!((points[1].param - 600.0 * 2.0_f64.sqrt()).abs() < 1e-6);
    assert!((points[8].x - 600.0).abs() < 1e-6);
    assert!((points[8].y - 600.0).abs() < 1e-6);

    // Each corner triple is ordered around its exact hit.
    assert!((points[3].x - 900.0).abs() < 1e-6);
    assert!((points[3].y + 600.0).abs() < 1e-6);
    assert!((points[6].x - 900.0).abs() < 1e-6);
    assert!((points[6].y - 600.0).abs() < 1e-6);
    for i in [2, 4] {
        assert!(points[i].point().distance(&points[3].point()) < 0.1);
    }
    for i in [5, 7] {
        assert!(points[i].point().distance(&points[6].point()) < 0.1);
    }
}

#[test]
fn test_zero_width_cone_is_degenerate() {
    let map = empty_room();
    let caster = Raycaster::new(&map);
    let points = caster.generate_intersection_points(0.0, 0.0, 0.0, 0.0);

    // Both edge rays coincide and no corner lies strictly inside the cone.
    assert_eq!(points.len(), 3);
    assert_eq!(points[1], points[2]);
    assert!((points[1].x - 900.0).abs() < 1e-6);
    assert!(points[1].y.abs() < 1e-6);
}

#[test]
fn test_same_pose_same_polygon() {
    let map = room_with_center_block();
    let caster = Raycaster::new(&map);

    let poses = [
        (-500.0, 0.0, 0.0, FRAC_PI_2),
        (-500.0, 0.0, 2.0, 2.0 * FRAC_PI_3),
        (300.0, -200.0, -2.5, FRAC_PI_3),
    ];
    for (x, y, facing, fov) in poses {
        let first = caster.generate_intersection_points(x, y, facing, fov);
        let second = caster.generate_intersection_points(x, y, facing, fov);
        assert_eq!(first, second, "polygon differs for pose ({}, {})", x, y);
        assert_fan_order(&first, x, y, facing, fov);
    }
}

#[test]
fn test_block_stops_vision_and_polygon_wraps_behind_it() {
    let map = room_with_center_block();
    let caster = Raycaster::new(&map);
    let points = caster.generate_intersection_points(-500.0, 0.0, 0.0, FRAC_PI_2);

    // Six corners fall inside the cone: the block's four and the two
    // right-hand room corners. Every ray hits, so the count is fixed.
    assert_eq!(points.len(), 21);
    assert_fan_order(&points, -500.0, 0.0, 0.0, FRAC_PI_2);

    // The block's near corners are hit exactly.
    assert!(contains_point(&points, -100.0, -100.0, 1e-6));
    assert!(contains_point(&points, -100.0, 100.0, 1e-6));

    // No hit strictly inside the blocked span may land beyond the near face.
    let blocked_half_angle = (100.0_f64 / 400.0).atan();
    for p in &points[1..] {
        let toward = angle_between(-500.0, 0.0, p.x, p.y);
        if toward.abs() < blocked_half_angle - 1e-3 {
            assert!(
                p.x <= -100.0 + 1e-6,
                "leaked through the block at ({}, {})",
                p.x,
                p.y
            );
        }
    }

    // The nudged rays that slip past the block's corners continue to the
    // right wall, so the polygon wraps around the block.
    let wraps: Vec<_> = points
        .iter()
        .filter(|p| p.x > 800.0 && p.y.abs() < 400.0)
        .collect();
    assert_eq!(wraps.len(), 2);
    for p in &wraps {
        assert!((p.x - 900.0).abs() < 1e-6);
        assert!((p.y.abs() - 350.0).abs() < 0.5);
    }
}

#[test]
fn test_corner_triple_straddles_the_corner() {
    let map = empty_room();
    let caster = Raycaster::new(&map);
    let facing = angle_between(0.0, 0.0, 900.0, 600.0);
    let points = caster.generate_intersection_points(0.0, 0.0, facing, FRAC_PI_2);

    // The exact ray lands on the corner itself.
    assert!(contains_point(&points, 900.0, 600.0, 1e-6));
    // One nudged companion stays on the right wall short of the corner...
    assert!(points
        .iter()
        .any(|p| (p.x - 900.0).abs() < 1e-6 && p.y < 600.0 - 1e-3 && p.y > 599.9));
    // ...and the other slips past onto the far wall.
    assert!(points
        .iter()
        .any(|p| (p.y - 600.0).abs() < 1e-6 && p.x < 900.0 - 1e-3 && p.x > 899.9));
}

#[test]
fn test_windows_do_not_block_vision() {
    // Same block, but in the window layer: it must change nothing about the
    // polygon compared to an empty room.
    let with_window = map_from_json(
        r#"{"name": "w", "width": 1800, "height": 1200,
            "wn": [{"x": 800, "y": 500, "width": 200, "height": 200}]}"#,
    );
    let empty = empty_room();

    let through = Raycaster::new(&with_window)
        .generate_intersection_points(-500.0, 0.0, 0.0, FRAC_PI_2);
    let clear = Raycaster::new(&empty).generate_intersection_points(-500.0, 0.0, 0.0, FRAC_PI_2);
    assert_eq!(through, clear);
}

#[test]
fn test_circles_do_not_block_vision() {
    let with_pillar = map_from_json(
        r#"{"name": "p", "width": 1800, "height": 1200,
            "wl": [{"cx": 900, "cy": 600, "r": 80}]}"#,
    );
    let empty = empty_room();

    let through = Raycaster::new(&with_pillar)
        .generate_intersection_points(-500.0, 0.0, 0.0, FRAC_PI_2);
    let clear = Raycaster::new(&empty).generate_intersection_points(-500.0, 0.0, 0.0, FRAC_PI_2);
    assert_eq!(through, clear);
}

#[test]
fn test_hit_params_equal_viewer_distance() {
    let map = room_with_center_block();
    let caster = Raycaster::new(&map);
    let (x, y) = (-500.0, 120.0);
    let points = caster.generate_intersection_points(x, y, 0.3, 2.0 * FRAC_PI_3);

    for p in &points[1..] {
        let dist = ((p.x - x).powi(2) + (p.y - y).powi(2)).sqrt();
        assert!(p.param > 0.0);
        assert!(
            (p.param - dist).abs() < 1e-6,
            "param {} does not match distance {}",
            p.param,
            dist
        );
    }
}

#[test]
fn test_facing_wrap_keeps_fan_order() {
    // Facing angles near ±π exercise the wrapped half of the membership
    // test and the relative sort.
    let map = room_with_center_block();
    let caster = Raycaster::new(&map);

    for facing in [3.0, -3.0, std::f64::consts::PI] {
        let points = caster.generate_intersection_points(300.0, 50.0, facing, FRAC_PI_2);
        assert!(points.len() >= 3);
        assert_fan_order(&points, 300.0, 50.0, facing, FRAC_PI_2);
    }
}

#[test]
fn test_viewer_on_room_midline_is_symmetric() {
    let map = empty_room();
    let caster = Raycaster::new(&map);
    let points = caster.generate_intersection_points(-300.0, 0.0, 0.0, FRAC_PI_2);

    // Mirror symmetry across y = 0: every hit has a partner at -y.
    for p in &points[1..] {
        assert!(
            contains_point(&points, p.x, -p.y, 1e-6),
            "no mirror partner for ({}, {})",
            p.x,
            p.y
        );
    }
}
