use arboard::Clipboard;
use macroquad::prelude::*;
use macroquad::rand::gen_range;
use serde::Serialize;

use sightline::config::Config;
use sightline::equipment::HeadKind;
use sightline::geometry::{IntersectionPoint, Point, Segment};
use sightline::map::{GameMap, Shape};
use sightline::player::{Player, PlayerInput};
use sightline::raycaster::Raycaster;

/// A fired projectile. Its flight is fixed at spawn time: it travels along a
/// straight line until `max_dist` (the first wall hit or the weapon's range)
/// and dies there.
struct Bullet {
    x: f64,
    y: f64,
    dx: f64,
    dy: f64,
    speed: f64,
    radius: f64,
    traveled: f64,
    max_dist: f64,
}

/// Everything the capture key copies out: enough to replay one frame's
/// visibility query elsewhere.
#[derive(Serialize)]
struct ScenarioCapture<'a> {
    map: &'a str,
    x: f64,
    y: f64,
    angle: f64,
    fov: f64,
    polygon: Vec<Point>,
}

/// Demo state: the loaded map, the raycaster bound to it, and the moving
/// parts layered on top.
struct Demo<'m> {
    map: &'m GameMap,
    raycaster: Raycaster<'m>,
    config: Config,
    player: Player,
    bullets: Vec<Bullet>,
    fire_cooldown: f64,
    polygon: Vec<IntersectionPoint>,
}

impl<'m> Demo<'m> {
    fn new(map: &'m GameMap, config: Config) -> Self {
        let spawn = map
            .spawn_points()
            .first()
            .copied()
            .unwrap_or(Point::new(0.0, 0.0));
        let mut player = Player::new(spawn.x, spawn.y);
        player.base_speed = config.player.base_speed;
        player.radius = config.player.radius;

        let raycaster = Raycaster::new(map);
        let polygon = raycaster.generate_intersection_points(
            player.x,
            player.y,
            player.angle,
            player.fov(),
        );

        Demo {
            map,
            raycaster,
            config,
            player,
            bullets: Vec::new(),
            fire_cooldown: 0.0,
            polygon,
        }
    }

    fn handle_input(&mut self, dt: f64) {
        // Headgear on number keys, weapons cycle on Q/E
        let head_keys = [KeyCode::Key1, KeyCode::Key2, KeyCode::Key3, KeyCode::Key4];
        for (i, key) in head_keys.iter().enumerate() {
            if is_key_pressed(*key) {
                self.player.set_head(HeadKind::ALL[i]);
            }
        }
        if is_key_pressed(KeyCode::Q) {
            self.player.set_weapon(self.player.weapon().prev());
        }
        if is_key_pressed(KeyCode::E) {
            self.player.set_weapon(self.player.weapon().next());
        }

        // Aim through the camera the previous frame was drawn with
        let (mouse_x, mouse_y) = mouse_position();
        let aim = self.follow_camera().screen_to_world(vec2(mouse_x, mouse_y));

        let input = PlayerInput {
            up: is_key_down(KeyCode::W),
            down: is_key_down(KeyCode::S),
            left: is_key_down(KeyCode::A),
            right: is_key_down(KeyCode::D),
            aim_x: f64::from(aim.x),
            aim_y: f64::from(aim.y),
        };
        self.player.update(&input, self.map, dt);

        self.try_fire(dt);
    }

    fn try_fire(&mut self, dt: f64) {
        self.fire_cooldown -= dt;
        if !is_mouse_button_down(MouseButton::Left) || self.fire_cooldown > 0.0 {
            return;
        }

        let stats = self.player.weapon().stats();
        let half_spread = (stats.spread_degrees / 2.0) as f32;
        let jitter = f64::from(gen_range(-half_spread, half_spread)).to_radians();
        let angle = self.player.angle + jitter;

        // The flight is resolved now: the bullet dies at the first wall or
        // at the weapon's range, whichever is closer.
        let ray = Segment::ray(self.player.x, self.player.y, angle);
        let wall_dist = self
            .raycaster
            .closest_intersection(&ray)
            .map_or(stats.range, |hit| hit.param);

        self.bullets.push(Bullet {
            x: self.player.x,
            y: self.player.y,
            dx: angle.cos(),
            dy: angle.sin(),
            speed: stats.bullet_speed,
            radius: stats.bullet_radius,
            traveled: 0.0,
            max_dist: stats.range.min(wall_dist),
        });
        self.fire_cooldown = 1.0 / stats.fire_rate;
    }

    fn update(&mut self, dt: f64) {
        for bullet in &mut self.bullets {
            let step = bullet.speed * dt;
            bullet.x += bullet.dx * step;
            bullet.y += bullet.dy * step;
            bullet.traveled += step;
        }
        self.bullets.retain(|b| b.traveled < b.max_dist);

        // Fresh polygon every frame; the previous one is dropped wholesale
        self.polygon = self.raycaster.generate_intersection_points(
            self.player.x,
            self.player.y,
            self.player.angle,
            self.player.fov(),
        );
    }

    /// Camera that follows the player. Negative y zoom keeps the world's
    /// y-down convention on screen.
    fn follow_camera(&self) -> Camera2D {
        let view_h = self.config.visual.camera_height;
        let aspect = screen_width() / screen_height();
        Camera2D {
            target: vec2(self.player.x as f32, self.player.y as f32),
            zoom: vec2(2.0 / (view_h * aspect), -2.0 / view_h),
            ..Default::default()
        }
    }

    /// Fixed camera showing the whole map in a corner viewport.
    fn minimap_camera(&self) -> Camera2D {
        let bounds = self.map.bounds();
        let size = self.config.visual.minimap_size as i32;
        let extent = (bounds.w as f32).max(bounds.h as f32) * 1.05;
        Camera2D {
            target: vec2(
                (bounds.x + bounds.w / 2.0) as f32,
                (bounds.y + bounds.h / 2.0) as f32,
            ),
            zoom: vec2(2.0 / extent, -2.0 / extent),
            viewport: Some((
                screen_width() as i32 - size - 10,
                screen_height() as i32 - size - 10,
                size,
                size,
            )),
            ..Default::default()
        }
    }

    fn copy_scenario(&self) {
        let capture = ScenarioCapture {
            map: self.map.name(),
            x: self.player.x,
            y: self.player.y,
            angle: self.player.angle,
            fov: self.player.fov(),
            polygon: self.polygon.iter().map(|p| p.point()).collect(),
        };

        let json = match serde_json::to_string_pretty(&capture) {
            Ok(json) => json,
            Err(e) => {
                println!("Failed to serialize scenario: {}", e);
                return;
            }
        };

        match Clipboard::new() {
            Ok(mut clipboard) => {
                if let Err(e) = clipboard.set_text(&json) {
                    println!("Failed to copy to clipboard: {}", e);
                } else {
                    println!("Scenario copied to clipboard!");
                    // Keep clipboard alive for a moment to ensure clipboard managers can capture it
                    std::thread::sleep(std::time::Duration::from_millis(100));
                }
            }
            Err(e) => {
                println!("Failed to access clipboard: {}", e);
            }
        }
    }

    fn draw(&self) {
        let visual = &self.config.visual;
        clear_background(Color::from_rgba(
            visual.background_r,
            visual.background_g,
            visual.background_b,
            255,
        ));

        set_camera(&self.follow_camera());
        self.draw_world();
        self.draw_visibility();
        self.draw_bullets();
        self.draw_player();

        if visual.show_minimap {
            set_camera(&self.minimap_camera());
            self.draw_world();
            // Oversized dot so the player reads at minimap scale
            draw_circle(self.player.x as f32, self.player.y as f32, 25.0, SKYBLUE);
        }

        set_default_camera();
        self.draw_hud();
    }

    fn draw_world(&self) {
        let bounds = self.map.bounds();
        draw_rectangle_lines(
            bounds.x as f32,
            bounds.y as f32,
            bounds.w as f32,
            bounds.h as f32,
            6.0,
            GRAY,
        );

        for group in self.map.groups() {
            for obstacle in &group.obstacles {
                let mut color = Color::from_hex(obstacle.fill);
                color.a = obstacle.opacity as f32;
                match obstacle.shape {
                    Shape::Rect { x, y, w, h } => {
                        draw_rectangle(x as f32, y as f32, w as f32, h as f32, color)
                    }
                    Shape::Circle { cx, cy, r } => {
                        draw_circle(cx as f32, cy as f32, r as f32, color)
                    }
                    Shape::Marker { .. } => {}
                }
            }
        }
    }

    /// Triangle fan from the viewer seed over consecutive polygon points.
    fn draw_visibility(&self) {
        if self.polygon.len() < 3 {
            return;
        }
        let origin = vec2(self.polygon[0].x as f32, self.polygon[0].y as f32);
        let color = Color::new(1.0, 1.0, 0.85, self.config.visual.fov_opacity);
        for pair in self.polygon[1..].windows(2) {
            let a = vec2(pair[0].x as f32, pair[0].y as f32);
            let b = vec2(pair[1].x as f32, pair[1].y as f32);
            draw_triangle(origin, a, b, color);
        }
    }

    fn draw_bullets(&self) {
        for bullet in &self.bullets {
            draw_circle(
                bullet.x as f32,
                bullet.y as f32,
                bullet.radius.max(2.0) as f32,
                YELLOW,
            );
        }
    }

    fn draw_player(&self) {
        let x = self.player.x as f32;
        let y = self.player.y as f32;
        let radius = self.player.radius as f32;
        draw_circle(x, y, radius, SKYBLUE);

        // Facing tick
        let tip_x = x + self.player.angle.cos() as f32 * (radius + 14.0);
        let tip_y = y + self.player.angle.sin() as f32 * (radius + 14.0);
        draw_line(x, y, tip_x, tip_y, 3.0, WHITE);
    }

    fn draw_hud(&self) {
        let head = self.player.head();
        let info = format!(
            "Position: ({:.0}, {:.0})\n\
             Weapon: {} | Head: {} ({:.0} deg)\n\
             Armor: {} | Polygon points: {}\n\
             WASD: move  Mouse: aim  LMB: fire\n\
             1-4: headgear  Q/E: weapon  C: copy scenario  Esc: quit",
            self.player.x,
            self.player.y,
            self.player.weapon().name(),
            head.name(),
            head.stats().fov_degrees,
            self.player.armor(),
            self.polygon.len(),
        );
        for (i, line) in info.lines().enumerate() {
            draw_text(line, 10.0, 20.0 + i as f32 * 22.0, 20.0, WHITE);
        }
    }
}

#[macroquad::main("Sightline")]
async fn main() {
    let config = Config::load();

    let map = match GameMap::from_json_file(&config.map.path) {
        Ok(map) => map,
        Err(e) => {
            eprintln!("Failed to load map '{}': {}", config.map.path, e);
            return;
        }
    };
    println!(
        "Loaded map '{}': {} wall segments, {} corners, {} spawn points",
        map.name(),
        map.segments().len(),
        map.points().len(),
        map.spawn_points().len()
    );

    let mut demo = Demo::new(&map, config);

    loop {
        let dt = f64::from(get_frame_time());

        // Close window on Escape
        if is_key_pressed(KeyCode::Escape) {
            break;
        }

        demo.handle_input(dt);
        demo.update(dt);

        // Copy the current pose and polygon on C key
        if is_key_pressed(KeyCode::C) {
            demo.copy_scenario();
        }

        demo.draw();

        next_frame().await
    }
}
