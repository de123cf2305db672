use sightline::geometry::{normalize_angle, IntersectionPoint};
use sightline::map::GameMap;

/// Bare 1800x1200 room centered on the origin: boundary walls only.
pub fn empty_room() -> GameMap {
    map_from_json(r#"{"name": "empty", "width": 1800, "height": 1200}"#)
}

/// 1800x1200 room with a 200x200 wall block spanning world
/// (-100, -100)..(100, 100). Canvas coordinates are (800, 500).
pub fn room_with_center_block() -> GameMap {
    map_from_json(
        r#"{"name": "block", "width": 1800, "height": 1200,
            "wl": [{"x": 800, "y": 500, "width": 200, "height": 200}]}"#,
    )
}

/// Parse a map document, panicking on malformed fixtures.
pub fn map_from_json(json: &str) -> GameMap {
    GameMap::from_json(json).expect("fixture map must parse")
}

/// Whether any point of the polygon lies within `tol` of `(x, y)`.
pub fn contains_point(points: &[IntersectionPoint], x: f64, y: f64, tol: f64) -> bool {
    points
        .iter()
        .any(|p| (p.x - x).abs() < tol && (p.y - y).abs() < tol)
}

/// The sort key the raycaster orders hits by: angle relative to the cone's
/// trailing edge, with the viewer seed pinned below everything.
pub fn relative_sort_key(angle: f64, facing: f64, fov: f64) -> f64 {
    if angle == f64::NEG_INFINITY {
        return f64::NEG_INFINITY;
    }
    normalize_angle(normalize_angle(angle) - facing + fov)
}

/// Assert the polygon starts with the viewer seed and the remaining hits are
/// in non-decreasing relative-angle order.
pub fn assert_fan_order(points: &[IntersectionPoint], x: f64, y: f64, facing: f64, fov: f64) {
    assert!(!points.is_empty(), "polygon must at least hold the viewer");
    let seed = &points[0];
    assert_eq!((seed.x, seed.y), (x, y), "first point must be the viewer");
    assert_eq!(seed.param, 0.0);
    assert_eq!(seed.angle, f64::NEG_INFINITY);

    for pair in points.windows(2) {
        let a = relative_sort_key(pair[0].angle, facing, fov);
        let b = relative_sort_key(pair[1].angle, facing, fov);
        assert!(
            a.total_cmp(&b).is_le(),
            "points out of fan order: {:?} before {:?}",
            pair[0],
            pair[1]
        );
    }
}
