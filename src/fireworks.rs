//! Fireworks particle model for the winner celebration.
//!
//! Pure simulation in screen coordinates (x right, y down); renderers decide
//! how to draw rockets and sparks. One call to [`Fireworks::tick`] is one
//! animation frame.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Base rocket speed.
pub const ROCKET_SPEED: f64 = 2.0;
/// Multiplier applied to rocket velocity each frame.
pub const LAUNCH_BOOST: f64 = 5.0;
/// A rocket closer than this to its target explodes.
pub const EXPLODE_DISTANCE: f64 = 10.0;
/// Sparks created per explosion.
pub const SPARKS_PER_BURST: usize = 50;
/// Largest initial spark speed along each axis.
pub const SPARK_MAX_SPEED: f64 = 4.0;
/// Velocity retained per frame.
pub const FRICTION: f64 = 0.95;
/// Downward acceleration per frame.
pub const GRAVITY: f64 = 0.2;
/// Alpha lost per frame.
pub const FADE: f64 = 0.015;
/// Chance of launching a rocket on any frame.
pub const SPAWN_CHANCE: f64 = 0.05;

/// A rocket climbing toward its burst point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rocket {
    /// Horizontal position.
    pub x: f64,
    /// Vertical position (grows downward).
    pub y: f64,
    /// Burst point, horizontal.
    pub target_x: f64,
    /// Burst point, vertical.
    pub target_y: f64,
    /// Velocity per frame before the launch boost.
    pub vx: f64,
    /// Velocity per frame before the launch boost.
    pub vy: f64,
    /// Colour hue in degrees.
    pub hue: u16,
}

impl Rocket {
    /// Launch from `(x, y)` toward `(target_x, target_y)`.
    #[must_use]
    pub fn new(x: f64, y: f64, target_x: f64, target_y: f64, hue: u16) -> Self {
        let angle = (target_y - y).atan2(target_x - x);
        Self {
            x,
            y,
            target_x,
            target_y,
            vx: angle.cos() * ROCKET_SPEED,
            vy: angle.sin() * ROCKET_SPEED,
            hue,
        }
    }

    /// Advance one frame; returns `true` once the rocket reached its target.
    pub fn update(&mut self) -> bool {
        self.x += self.vx * LAUNCH_BOOST;
        self.y += self.vy * LAUNCH_BOOST;
        (self.x - self.target_x).hypot(self.y - self.target_y) < EXPLODE_DISTANCE
    }
}

/// A fading spark from an explosion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spark {
    /// Horizontal position.
    pub x: f64,
    /// Vertical position (grows downward).
    pub y: f64,
    /// Horizontal velocity.
    pub vx: f64,
    /// Vertical velocity.
    pub vy: f64,
    /// Opacity in `(0, 1]`.
    pub alpha: f64,
    /// Colour hue in degrees.
    pub hue: u16,
}

impl Spark {
    /// Advance one frame; returns `false` once the spark has faded out.
    pub fn update(&mut self) -> bool {
        self.vx *= FRICTION;
        self.vy *= FRICTION;
        self.vy += GRAVITY;
        self.x += self.vx;
        self.y += self.vy;
        self.alpha -= FADE;
        self.alpha > 0.0
    }
}

/// The whole display: pending rockets, live sparks and the spawner.
#[derive(Debug, Clone)]
pub struct Fireworks {
    width: f64,
    height: f64,
    active: bool,
    rockets: Vec<Rocket>,
    sparks: Vec<Spark>,
    rng: StdRng,
}

impl Fireworks {
    /// An idle display over a `width` × `height` area.
    #[must_use]
    pub fn new(width: f64, height: f64, seed: u64) -> Self {
        Self {
            width,
            height,
            active: false,
            rockets: Vec::new(),
            sparks: Vec::new(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Resize the area new rockets launch into.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    /// Begin launching rockets.
    pub fn start(&mut self) {
        self.active = true;
    }

    /// Stop launching and clear everything on screen.
    pub fn stop(&mut self) {
        self.active = false;
        self.rockets.clear();
        self.sparks.clear();
    }

    /// Whether rockets are being launched.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Rockets in flight.
    #[must_use]
    pub fn rockets(&self) -> &[Rocket] {
        &self.rockets
    }

    /// Live sparks.
    #[must_use]
    pub fn sparks(&self) -> &[Spark] {
        &self.sparks
    }

    /// Launch a rocket from the bottom edge at a random column.
    pub fn launch(&mut self) {
        let x = self.rng.random::<f64>() * self.width;
        let target_y = self.rng.random::<f64>() * (self.height / 2.0);
        let hue = self.rng.random_range(0..360);
        self.rockets.push(Rocket::new(x, self.height, x, target_y, hue));
    }

    /// Explode at `(x, y)` into [`SPARKS_PER_BURST`] sparks.
    pub fn burst(&mut self, x: f64, y: f64, hue: u16) {
        for _ in 0..SPARKS_PER_BURST {
            let vx = (self.rng.random::<f64>() - 0.5) * SPARK_MAX_SPEED * 2.0;
            let vy = (self.rng.random::<f64>() - 0.5) * SPARK_MAX_SPEED * 2.0;
            self.sparks.push(Spark {
                x,
                y,
                vx,
                vy,
                alpha: 1.0,
                hue,
            });
        }
    }

    /// Advance one animation frame.
    pub fn tick(&mut self) {
        if self.active && self.rng.random_bool(SPAWN_CHANCE) {
            self.launch();
        }

        let mut bursts = Vec::new();
        self.rockets.retain_mut(|rocket| {
            if rocket.update() {
                bursts.push((rocket.target_x, rocket.target_y, rocket.hue));
                false
            } else {
                true
            }
        });
        for (x, y, hue) in bursts {
            self.burst(x, y, hue);
        }

        self.sparks.retain_mut(Spark::update);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_display_spawns_nothing() {
        let mut fw = Fireworks::new(200.0, 100.0, 1);
        for _ in 0..500 {
            fw.tick();
        }
        assert!(fw.rockets().is_empty());
        assert!(fw.sparks().is_empty());
    }

    #[test]
    fn test_active_display_spawns() {
        let mut fw = Fireworks::new(200.0, 100.0, 1);
        fw.start();
        let mut seen_sparks = false;
        for _ in 0..500 {
            fw.tick();
            seen_sparks |= !fw.sparks().is_empty();
        }
        assert!(seen_sparks);
    }

    #[test]
    fn test_rocket_reaches_target_and_bursts() {
        let mut fw = Fireworks::new(200.0, 100.0, 2);
        fw.rockets.push(Rocket::new(50.0, 100.0, 50.0, 20.0, 120));

        let mut frames = 0;
        while !fw.rockets().is_empty() {
            fw.tick();
            frames += 1;
            assert!(frames < 100, "rocket never exploded");
        }
        assert_eq!(fw.sparks().len(), SPARKS_PER_BURST);
        assert!(fw.sparks().iter().all(|s| s.hue == 120));
    }

    #[test]
    fn test_sparks_fade_out() {
        let mut fw = Fireworks::new(200.0, 100.0, 3);
        fw.burst(10.0, 10.0, 0);
        // 1.0 / 0.015 frames until alpha reaches zero
        for _ in 0..67 {
            fw.tick();
        }
        assert!(fw.sparks().is_empty());
    }

    #[test]
    fn test_spark_physics() {
        let mut spark = Spark {
            x: 0.0,
            y: 0.0,
            vx: 1.0,
            vy: 0.0,
            alpha: 1.0,
            hue: 0,
        };
        assert!(spark.update());
        assert!((spark.vx - 0.95).abs() < 1e-12);
        assert!((spark.vy - 0.2).abs() < 1e-12);
        assert!((spark.x - 0.95).abs() < 1e-12);
        assert!((spark.alpha - 0.985).abs() < 1e-12);
    }

    #[test]
    fn test_stop_clears() {
        let mut fw = Fireworks::new(200.0, 100.0, 4);
        fw.start();
        fw.burst(5.0, 5.0, 10);
        fw.launch();
        fw.stop();
        assert!(!fw.is_active());
        assert!(fw.rockets().is_empty());
        assert!(fw.sparks().is_empty());
    }
}
