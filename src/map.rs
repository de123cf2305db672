use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::geometry::{Point, Segment};

/// Layer key for see-through barriers: they collide but cast no shadow.
const WINDOW_GROUP: &str = "wn";
/// Layer key for spawn markers: positions only, no geometry.
const SPAWN_GROUP: &str = "sp";

/// Fill color used when a shape carries no parseable `fill` attribute.
const DEFAULT_FILL: u32 = 0x4a4a55;

/// Construction-time map failures. A level with malformed geometry must not
/// load at all.
#[derive(Debug, Error)]
pub enum MapError {
    #[error("cannot read map file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed map document: {0}")]
    Json(#[from] serde_json::Error),
    #[error("group '{group}': shape is missing '{field}'")]
    MissingField { group: String, field: &'static str },
    #[error("group '{group}': {field} is not a number: '{value}'")]
    NonNumeric {
        group: String,
        field: &'static str,
        value: String,
    },
    #[error("group '{group}': {field} must be positive, got {value}")]
    InvalidDimension {
        group: String,
        field: &'static str,
        value: f64,
    },
    #[error("group '{group}': shape has no dimensions, radius or position")]
    UnknownShape { group: String },
    #[error("world bounds must have positive size, got {w}x{h}")]
    InvalidBounds { w: f64, h: f64 },
}

/// A numeric attribute that may arrive as a JSON number or a string.
///
/// The map converter copies SVG attributes verbatim and SVG attributes are
/// strings, so `"width": "137"` and `"width": 137` are both valid.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Number(f64),
    Text(String),
}

impl Scalar {
    fn to_f64(&self, group: &str, field: &'static str) -> Result<f64, MapError> {
        let value = match self {
            Scalar::Number(n) => *n,
            Scalar::Text(s) => s.trim().parse::<f64>().map_err(|_| MapError::NonNumeric {
                group: group.to_string(),
                field,
                value: s.clone(),
            })?,
        };
        if !value.is_finite() {
            return Err(MapError::NonNumeric {
                group: group.to_string(),
                field,
                value: format!("{value}"),
            });
        }
        Ok(value)
    }
}

/// One shape record as it appears in the document. Field presence decides the
/// kind: `width`+`height` is a rectangle, `r` is a circle, a bare position is
/// a marker.
#[derive(Debug, Deserialize)]
pub struct RawShape {
    pub x: Option<Scalar>,
    pub y: Option<Scalar>,
    pub width: Option<Scalar>,
    pub height: Option<Scalar>,
    pub cx: Option<Scalar>,
    pub cy: Option<Scalar>,
    pub r: Option<Scalar>,
    pub fill: Option<String>,
    #[serde(rename = "fillOpacity")]
    pub fill_opacity: Option<Scalar>,
}

/// Raw map document, as written by the SVG-to-JSON converter.
///
/// Top level: map name, source canvas size, then one entry per layer keyed by
/// the layer's file name (`wl` walls, `wn` windows, `sp` spawn markers, and
/// so on). Shape coordinates are local to the canvas; [`GameMap::new`] shifts
/// them into world space.
#[derive(Debug, Deserialize)]
pub struct MapData {
    pub name: String,
    pub width: Scalar,
    pub height: Scalar,
    #[serde(flatten)]
    pub groups: BTreeMap<String, Vec<RawShape>>,
}

impl MapData {
    pub fn parse(json: &str) -> Result<Self, MapError> {
        Ok(serde_json::from_str(json)?)
    }

    /// World bounds implied by the document: the canvas size centered on the
    /// origin.
    pub fn world_bounds(&self) -> Result<WorldBounds, MapError> {
        let w = self.width.to_f64("map", "width")?;
        let h = self.height.to_f64("map", "height")?;
        if w <= 0.0 || h <= 0.0 {
            return Err(MapError::InvalidBounds { w, h });
        }
        Ok(WorldBounds::centered(w, h))
    }
}

/// Axis-aligned world rectangle the whole scene lives in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldBounds {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl WorldBounds {
    /// Bounds of the given size centered on the origin.
    pub fn centered(w: f64, h: f64) -> Self {
        WorldBounds {
            x: -w / 2.0,
            y: -h / 2.0,
            w,
            h,
        }
    }
}

/// A world-space obstacle shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Rect { x: f64, y: f64, w: f64, h: f64 },
    Circle { cx: f64, cy: f64, r: f64 },
    Marker { x: f64, y: f64 },
}

/// An obstacle with its renderer styling.
#[derive(Debug, Clone)]
pub struct Obstacle {
    pub shape: Shape,
    /// Fill color as 0xRRGGBB.
    pub fill: u32,
    pub opacity: f64,
}

/// All obstacles from one document layer.
#[derive(Debug, Clone)]
pub struct ObstacleGroup {
    pub key: String,
    /// Whether this layer's rectangles cast shadows. Windows do not.
    pub occluding: bool,
    pub obstacles: Vec<Obstacle>,
}

/// Immutable world geometry: the solid truth every raycast runs against.
///
/// Built once from a [`MapData`] document. `segments` holds the vision-blocking
/// walls (the four boundary edges first, then four per occluding rectangle)
/// and `points` the deduplicated corners of those walls, sorted by `(x, y)`.
/// Circles never contribute segments; they collide but do not occlude.
#[derive(Debug, Clone)]
pub struct GameMap {
    name: String,
    bounds: WorldBounds,
    points: Vec<Point>,
    segments: Vec<Segment>,
    groups: Vec<ObstacleGroup>,
    spawn_points: Vec<Point>,
}

impl GameMap {
    /// Build world geometry from a parsed document, shifting canvas-local
    /// shape coordinates by the bounds origin.
    pub fn new(bounds: WorldBounds, data: &MapData) -> Result<Self, MapError> {
        if bounds.w <= 0.0 || bounds.h <= 0.0 {
            return Err(MapError::InvalidBounds {
                w: bounds.w,
                h: bounds.h,
            });
        }

        let mut points = Vec::new();
        let mut segments = Vec::new();
        let mut groups = Vec::new();
        let mut spawn_points = Vec::new();

        // Boundary corners and edges, clockwise from the top-left.
        push_rect_geometry(&mut points, &mut segments, bounds.x, bounds.y, bounds.w, bounds.h);

        for (key, shapes) in &data.groups {
            if key.eq_ignore_ascii_case(SPAWN_GROUP) {
                for raw in shapes {
                    let obstacle = parse_shape(key, raw, &bounds)?;
                    spawn_points.push(shape_center(&obstacle.shape));
                }
                continue;
            }

            let occluding = !key.eq_ignore_ascii_case(WINDOW_GROUP);
            let mut obstacles = Vec::with_capacity(shapes.len());
            for raw in shapes {
                let obstacle = parse_shape(key, raw, &bounds)?;
                if occluding {
                    if let Shape::Rect { x, y, w, h } = obstacle.shape {
                        push_rect_geometry(&mut points, &mut segments, x, y, w, h);
                    }
                }
                obstacles.push(obstacle);
            }
            groups.push(ObstacleGroup {
                key: key.clone(),
                occluding,
                obstacles,
            });
        }

        // Corners shared between shapes would spawn redundant ray triples.
        points.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
        points.dedup_by(|a, b| a.x == b.x && a.y == b.y);

        Ok(GameMap {
            name: data.name.clone(),
            bounds,
            points,
            segments,
            groups,
            spawn_points,
        })
    }

    /// Parse a document and build it with the bounds it implies.
    pub fn from_json(json: &str) -> Result<Self, MapError> {
        let data = MapData::parse(json)?;
        let bounds = data.world_bounds()?;
        Self::new(bounds, &data)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, MapError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bounds(&self) -> WorldBounds {
        self.bounds
    }

    /// Deduplicated corners of all vision-blocking geometry, sorted by `(x, y)`.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Vision-blocking wall segments, boundary first.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn groups(&self) -> &[ObstacleGroup] {
        &self.groups
    }

    pub fn spawn_points(&self) -> &[Point] {
        &self.spawn_points
    }

    /// Whether a circle at `(x, y)` overlaps any obstacle shape. Markers
    /// never collide. Windows do: see-through is not walk-through.
    pub fn collides_circle(&self, x: f64, y: f64, radius: f64) -> bool {
        for group in &self.groups {
            for obstacle in &group.obstacles {
                match obstacle.shape {
                    Shape::Rect { x: rx, y: ry, w, h } => {
                        let nx = x.clamp(rx, rx + w);
                        let ny = y.clamp(ry, ry + h);
                        let dx = x - nx;
                        let dy = y - ny;
                        if dx * dx + dy * dy < radius * radius {
                            return true;
                        }
                    }
                    Shape::Circle { cx, cy, r } => {
                        let dx = x - cx;
                        let dy = y - cy;
                        let reach = radius + r;
                        if dx * dx + dy * dy < reach * reach {
                            return true;
                        }
                    }
                    Shape::Marker { .. } => {}
                }
            }
        }
        false
    }
}

/// Append the four corners and four clockwise edges of a rectangle.
fn push_rect_geometry(
    points: &mut Vec<Point>,
    segments: &mut Vec<Segment>,
    x: f64,
    y: f64,
    w: f64,
    h: f64,
) {
    points.push(Point::new(x, y));
    points.push(Point::new(x + w, y));
    points.push(Point::new(x + w, y + h));
    points.push(Point::new(x, y + h));

    segments.push(Segment::new(x, y, w, 0.0));
    segments.push(Segment::new(x + w, y, 0.0, h));
    segments.push(Segment::new(x + w, y + h, -w, 0.0));
    segments.push(Segment::new(x, y + h, 0.0, -h));
}

fn shape_center(shape: &Shape) -> Point {
    match *shape {
        Shape::Rect { x, y, w, h } => Point::new(x + w / 2.0, y + h / 2.0),
        Shape::Circle { cx, cy, .. } => Point::new(cx, cy),
        Shape::Marker { x, y } => Point::new(x, y),
    }
}

/// Classify one raw record and shift it into world space.
///
/// Geometry fields are strict: a non-numeric or non-positive dimension fails
/// the whole map. Styling fields are lenient and fall back to defaults, like
/// the renderer the format was written for.
fn parse_shape(group: &str, raw: &RawShape, bounds: &WorldBounds) -> Result<Obstacle, MapError> {
    let shape = if raw.width.is_some() || raw.height.is_some() {
        let w = required(group, "width", &raw.width)?;
        let h = required(group, "height", &raw.height)?;
        if w <= 0.0 {
            return Err(invalid_dimension(group, "width", w));
        }
        if h <= 0.0 {
            return Err(invalid_dimension(group, "height", h));
        }
        let x = optional(group, "x", &raw.x)?;
        let y = optional(group, "y", &raw.y)?;
        Shape::Rect {
            x: x + bounds.x,
            y: y + bounds.y,
            w,
            h,
        }
    } else if raw.r.is_some() {
        let r = required(group, "r", &raw.r)?;
        if r <= 0.0 {
            return Err(invalid_dimension(group, "r", r));
        }
        let cx = optional(group, "cx", &raw.cx)?;
        let cy = optional(group, "cy", &raw.cy)?;
        Shape::Circle {
            cx: cx + bounds.x,
            cy: cy + bounds.y,
            r,
        }
    } else if raw.x.is_some() || raw.y.is_some() || raw.cx.is_some() || raw.cy.is_some() {
        // Spawn markers come through as bare positions, sometimes keyed
        // cx/cy when the source shape was a circle without a radius.
        let x = match &raw.x {
            Some(_) => optional(group, "x", &raw.x)?,
            None => optional(group, "cx", &raw.cx)?,
        };
        let y = match &raw.y {
            Some(_) => optional(group, "y", &raw.y)?,
            None => optional(group, "cy", &raw.cy)?,
        };
        Shape::Marker {
            x: x + bounds.x,
            y: y + bounds.y,
        }
    } else {
        return Err(MapError::UnknownShape {
            group: group.to_string(),
        });
    };

    let fill = raw
        .fill
        .as_deref()
        .and_then(|f| u32::from_str_radix(f.trim_start_matches('#'), 16).ok())
        .unwrap_or(DEFAULT_FILL);
    let opacity = match &raw.fill_opacity {
        Some(s) => s.to_f64(group, "fillOpacity").unwrap_or(1.0).clamp(0.0, 1.0),
        None => 1.0,
    };

    Ok(Obstacle {
        shape,
        fill,
        opacity,
    })
}

fn required(group: &str, field: &'static str, value: &Option<Scalar>) -> Result<f64, MapError> {
    match value {
        Some(scalar) => scalar.to_f64(group, field),
        None => Err(MapError::MissingField {
            group: group.to_string(),
            field,
        }),
    }
}

/// Missing optional coordinates default to 0, matching the converter's
/// handling of SVG's implicit origin.
fn optional(group: &str, field: &'static str, value: &Option<Scalar>) -> Result<f64, MapError> {
    match value {
        Some(scalar) => scalar.to_f64(group, field),
        None => Ok(0.0),
    }
}

fn invalid_dimension(group: &str, field: &'static str, value: f64) -> MapError {
    MapError::InvalidDimension {
        group: group.to_string(),
        field,
        value,
    }
}
