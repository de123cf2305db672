use std::f64::consts::{PI, TAU};

use crate::geometry::{angle_between, normalize_angle, IntersectionPoint, Segment};
use crate::map::GameMap;

/// Angular offset for the corner ray triples, in radians.
///
/// A ray aimed exactly at a corner is numerically ambiguous about which side
/// of the corner it grazes, so every visible corner gets three rays: one
/// exact, one nudged to each side. The nudged rays slide past the corner and
/// pick up the wall behind it, which is what lets the polygon wrap around
/// edges. The value is tuned for coordinates in the hundreds-to-thousands
/// range and has to be re-derived for a different world scale.
pub const CORNER_EPSILON: f64 = 1e-5;

/// Below this the ray and segment directions are parallel in either
/// orientation and the intersection denominator cannot be trusted.
const PARALLEL_EPSILON: f64 = 1e-12;

/// Slack on the segment-extent test. A ray aimed exactly at an endpoint
/// shared by two walls can round `t2` just past the end of one and just
/// before the start of the other, rejecting both; hits inside the slack
/// are kept and clamped onto the segment.
const ENDPOINT_EPSILON: f64 = 1e-9;

/// Computes visibility polygons against an immutable [`GameMap`].
///
/// Holds only a read-only borrow of the map: the output is a pure function
/// of the map geometry and the viewer pose passed to each call, so repeated
/// calls with the same pose return identical polygons.
pub struct Raycaster<'m> {
    map: &'m GameMap,
}

impl<'m> Raycaster<'m> {
    pub fn new(map: &'m GameMap) -> Self {
        Raycaster { map }
    }

    /// Compute the visibility polygon for a viewer at `(x, y)` facing
    /// `facing` radians with a cone `fov` radians wide.
    ///
    /// The first point is always the viewer itself, tagged with angle `-∞`
    /// so it sorts before every wall hit and can serve as the fan origin.
    /// The rest are the nearest wall hits of the edge rays and the corner
    /// ray triples, sorted by angle relative to the cone's trailing edge.
    /// A ray that escapes the map (broken boundary) contributes nothing, so
    /// callers must tolerate fewer vertices than rays cast.
    pub fn generate_intersection_points(
        &self,
        x: f64,
        y: f64,
        facing: f64,
        fov: f64,
    ) -> Vec<IntersectionPoint> {
        let edges = [facing - fov / 2.0, facing + fov / 2.0];

        let mut points = vec![IntersectionPoint {
            x,
            y,
            param: 0.0,
            angle: f64::NEG_INFINITY,
        }];

        // The two cone edges are always cast so the polygon stays anchored
        // to the viewer even when no corner falls inside the cone.
        for &angle in &edges {
            let ray = Segment::ray(x, y, angle);
            if let Some(mut hit) = self.closest_intersection(&ray) {
                hit.angle = angle;
                points.push(hit);
            }
        }

        for corner in self.map.points() {
            let init_angle = PI + angle_between(corner.x, corner.y, x, y);

            // Strict cone membership. init_angle is in [0, 2π) but the edge
            // interval can sit a full turn below it when facing is negative
            // or the cone straddles zero, so also test against the interval
            // shifted up by one turn.
            let inside = (init_angle > edges[0] && init_angle < edges[1])
                || (init_angle > edges[0] + TAU && init_angle < edges[1] + TAU);
            if !inside {
                continue;
            }

            for step in -1i32..=1 {
                let angle = init_angle + f64::from(step) * CORNER_EPSILON;
                let ray = Segment::ray(x, y, angle);
                if let Some(mut hit) = self.closest_intersection(&ray) {
                    hit.angle = angle;
                    points.push(hit);
                }
            }
        }

        // Stable sort on the relative angle keeps equal-key triples in cast
        // order, so the output is deterministic for a given pose.
        points.sort_by(|a, b| {
            relative_angle(a.angle, facing, fov).total_cmp(&relative_angle(b.angle, facing, fov))
        });
        points
    }

    /// Nearest hit of `ray` against any wall segment, or `None` when the ray
    /// escapes. Ties keep the earliest segment in construction order.
    pub fn closest_intersection(&self, ray: &Segment) -> Option<IntersectionPoint> {
        let mut closest: Option<IntersectionPoint> = None;
        for segment in self.map.segments() {
            if let Some(hit) = intersection(ray, segment) {
                if closest.map_or(true, |best| hit.param < best.param) {
                    closest = Some(hit);
                }
            }
        }
        closest
    }
}

/// Sort key: angle relative to the trailing cone edge, wrapped to `[0, 2π)`.
///
/// The viewer seed's `-∞` tag passes through untouched (wrapping it would
/// produce NaN) and compares below every finite key under `total_cmp`.
fn relative_angle(angle: f64, facing: f64, fov: f64) -> f64 {
    if angle == f64::NEG_INFINITY {
        return f64::NEG_INFINITY;
    }
    normalize_angle(normalize_angle(angle) - facing + fov)
}

/// Intersection of a ray with a finite segment, solved parametrically.
///
/// `t2` is the position along the segment, accepted within `ENDPOINT_EPSILON`
/// of `[0, 1]` and clamped back onto it so a ray aimed exactly at a shared
/// corner still lands there; `t1` is the distance along the ray and is
/// rejected behind the origin. Near-parallel pairs are rejected up front:
/// the denominator also guards the collinear case where both numerator and
/// denominator vanish.
pub fn intersection(ray: &Segment, segment: &Segment) -> Option<IntersectionPoint> {
    let denom = segment.dx * ray.dy - segment.dy * ray.dx;
    if denom.abs() < PARALLEL_EPSILON {
        return None;
    }

    let t2 = (ray.dx * (segment.y - ray.y) + ray.dy * (ray.x - segment.x)) / denom;
    if !(-ENDPOINT_EPSILON..=1.0 + ENDPOINT_EPSILON).contains(&t2) {
        return None;
    }
    let t2 = t2.clamp(0.0, 1.0);

    // Recover t1 from whichever ray axis is better conditioned.
    let t1 = if ray.dx.abs() > ray.dy.abs() {
        (segment.x + segment.dx * t2 - ray.x) / ray.dx
    } else {
        (segment.y + segment.dy * t2 - ray.y) / ray.dy
    };
    if t1 < 0.0 {
        return None;
    }

    Some(IntersectionPoint {
        x: ray.x + ray.dx * t1,
        y: ray.y + ray.dy * t1,
        param: t1,
        angle: f64::NEG_INFINITY,
    })
}
