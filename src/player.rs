use crate::equipment::{BodyKind, HeadKind, WeaponKind};
use crate::geometry::angle_between;
use crate::map::GameMap;

/// The viewer: world position, facing and equipped gear.
///
/// Position changes through [`Player::update`]; facing follows the aim point
/// every frame; the vision cone width changes only when headgear is swapped.
#[derive(Debug, Clone)]
pub struct Player {
    pub x: f64,
    pub y: f64,
    /// Facing in radians, toward the last aim point.
    pub angle: f64,
    /// Movement speed before the body armor modifier, world units per second.
    pub base_speed: f64,
    /// Collision circle radius.
    pub radius: f64,
    body: BodyKind,
    head: HeadKind,
    weapon: WeaponKind,
}

/// One frame of movement and aim input, filled in by the host loop.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlayerInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Aim point in world coordinates.
    pub aim_x: f64,
    pub aim_y: f64,
}

impl Player {
    /// Spawn at `(x, y)` with the default loadout: light armor, assault
    /// rifle, bare head.
    pub fn new(x: f64, y: f64) -> Self {
        Player {
            x,
            y,
            angle: 0.0,
            base_speed: 300.0,
            radius: 36.0,
            body: BodyKind::Light,
            head: HeadKind::None,
            weapon: WeaponKind::AssaultRifle,
        }
    }

    /// Apply one frame of input: move with blocking, then face the aim point.
    pub fn update(&mut self, input: &PlayerInput, map: &GameMap, dt: f64) {
        self.modify_position(input, map, dt);
        self.modify_angle(input.aim_x, input.aim_y);
    }

    /// Width of the vision cone in radians.
    ///
    /// Headgear stats carry degrees; the conversion lives here so every
    /// raycast sees the same radians.
    pub fn fov(&self) -> f64 {
        self.head.stats().fov_degrees.to_radians()
    }

    /// Effective movement speed in world units per second.
    pub fn speed(&self) -> f64 {
        self.base_speed * self.body.stats().speed_modifier
    }

    /// Total armor from body and head gear.
    pub fn armor(&self) -> i32 {
        self.body.stats().armor + self.head.stats().armor
    }

    pub fn body(&self) -> BodyKind {
        self.body
    }

    pub fn set_body(&mut self, body: BodyKind) {
        self.body = body;
    }

    pub fn head(&self) -> HeadKind {
        self.head
    }

    pub fn set_head(&mut self, head: HeadKind) {
        self.head = head;
    }

    pub fn weapon(&self) -> WeaponKind {
        self.weapon
    }

    pub fn set_weapon(&mut self, weapon: WeaponKind) {
        self.weapon = weapon;
    }

    fn modify_position(&mut self, input: &PlayerInput, map: &GameMap, dt: f64) {
        let speed = self.speed();
        let mut vx = 0.0;
        let mut vy = 0.0;
        if input.right && !input.left {
            vx = speed;
        } else if input.left && !input.right {
            vx = -speed;
        }
        if input.down && !input.up {
            vy = speed;
        } else if input.up && !input.down {
            vy = -speed;
        }

        // Axes move independently so a blocked axis still allows sliding
        // along the other.
        self.try_move(vx * dt, 0.0, map);
        self.try_move(0.0, vy * dt, map);
    }

    fn modify_angle(&mut self, aim_x: f64, aim_y: f64) {
        self.angle = angle_between(self.x, self.y, aim_x, aim_y);
    }

    fn try_move(&mut self, dx: f64, dy: f64, map: &GameMap) {
        let bounds = map.bounds();
        let nx = (self.x + dx).clamp(bounds.x + self.radius, bounds.x + bounds.w - self.radius);
        let ny = (self.y + dy).clamp(bounds.y + self.radius, bounds.y + bounds.h - self.radius);
        if !map.collides_circle(nx, ny, self.radius) {
            self.x = nx;
            self.y = ny;
        }
    }
}
