pub mod config;
pub mod equipment;
pub mod geometry;
pub mod map;
pub mod player;
pub mod raycaster;

pub use geometry::{IntersectionPoint, Point, Segment};
pub use map::{GameMap, MapData, MapError, WorldBounds};
pub use raycaster::Raycaster;
