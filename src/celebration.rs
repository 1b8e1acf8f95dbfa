use rand::Rng;

/// UI ticks are 100ms, so 30 ticks of confetti after a finished workout.
const DURATION_TICKS: u32 = 30;
const SPARK_COUNT: usize = 40;
const GLYPHS: [char; 5] = ['*', '+', '✦', '·', '✶'];

/// One piece of confetti.
#[derive(Debug, Clone)]
pub struct Spark {
    pub x: f64,
    pub y: f64,
    vel_x: f64,
    vel_y: f64,
    pub glyph: char,
    pub color_index: usize,
    age: f64,
    ttl: f64,
}

impl Spark {
    fn scatter(center_x: f64, center_y: f64, rng: &mut impl Rng) -> Self {
        Self {
            x: center_x + rng.gen_range(-12.0..12.0),
            y: center_y + rng.gen_range(-4.0..4.0),
            vel_x: rng.gen_range(-3.0..3.0),
            vel_y: rng.gen_range(-4.0..-1.0),
            glyph: GLYPHS[rng.gen_range(0..GLYPHS.len())],
            color_index: rng.gen_range(0..7),
            age: 0.0,
            ttl: rng.gen_range(2.0..3.0),
        }
    }

    /// Simple ballistic step; returns false once the spark expires.
    fn step(&mut self, dt: f64) -> bool {
        self.x += self.vel_x * dt;
        self.y += self.vel_y * dt;
        self.vel_y += 15.0 * dt;
        self.age += dt;
        self.age < self.ttl
    }

    pub fn fade(&self) -> f64 {
        1.0 - (self.age / self.ttl)
    }
}

/// Confetti burst over the completion screen. Advanced once per UI tick;
/// duration is counted in ticks so the animation stays deterministic.
#[derive(Debug, Default)]
pub struct Celebration {
    pub sparks: Vec<Spark>,
    ticks: u32,
    width: f64,
    height: f64,
    pub is_active: bool,
}

impl Celebration {
    pub fn start(&mut self, width: u16, height: u16) {
        let mut rng = rand::thread_rng();
        self.width = width as f64;
        self.height = height as f64;
        self.ticks = 0;
        self.is_active = true;
        self.sparks = (0..SPARK_COUNT)
            .map(|_| Spark::scatter(self.width / 2.0, self.height / 2.0, &mut rng))
            .collect();
    }

    pub fn update(&mut self) {
        if !self.is_active {
            return;
        }
        self.ticks += 1;
        if self.ticks >= DURATION_TICKS {
            self.is_active = false;
            self.sparks.clear();
            return;
        }

        let (width, height) = (self.width, self.height);
        self.sparks.retain_mut(|spark| {
            spark.step(0.1)
                && spark.y < height + 3.0
                && spark.x > -3.0
                && spark.x < width + 3.0
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_inactive_and_empty() {
        let c = Celebration::default();
        assert!(!c.is_active);
        assert!(c.sparks.is_empty());
    }

    #[test]
    fn start_spawns_sparks() {
        let mut c = Celebration::default();
        c.start(80, 24);
        assert!(c.is_active);
        assert_eq!(c.sparks.len(), SPARK_COUNT);
    }

    #[test]
    fn sparks_move_under_gravity() {
        let mut c = Celebration::default();
        c.start(80, 24);
        let before: Vec<(f64, f64)> = c.sparks.iter().map(|s| (s.x, s.y)).collect();
        for _ in 0..5 {
            c.update();
        }
        let moved = c
            .sparks
            .iter()
            .zip(before.iter())
            .filter(|(s, &(x, y))| (s.x - x).abs() > 0.1 || (s.y - y).abs() > 0.1)
            .count();
        assert!(moved > 0);
    }

    #[test]
    fn animation_stops_after_its_duration() {
        let mut c = Celebration::default();
        c.start(80, 24);
        for _ in 0..DURATION_TICKS {
            c.update();
        }
        assert!(!c.is_active);
        assert!(c.sparks.is_empty());
    }

    #[test]
    fn off_screen_sparks_are_dropped() {
        let mut c = Celebration::default();
        c.start(20, 10);
        c.sparks.push(Spark {
            x: 200.0,
            y: 200.0,
            vel_x: 0.0,
            vel_y: 0.0,
            glyph: '*',
            color_index: 0,
            age: 0.0,
            ttl: 10.0,
        });
        c.update();
        assert!(c.sparks.iter().all(|s| s.x < 23.0 && s.y < 13.0));
    }

    #[test]
    fn update_without_start_is_a_noop() {
        let mut c = Celebration::default();
        c.update();
        assert!(!c.is_active);
    }

    #[test]
    fn fade_decreases_with_age() {
        let mut spark = Spark {
            x: 0.0,
            y: 0.0,
            vel_x: 0.0,
            vel_y: 0.0,
            glyph: '*',
            color_index: 0,
            age: 0.0,
            ttl: 2.0,
        };
        let fresh = spark.fade();
        spark.step(0.5);
        assert!(spark.fade() < fresh);
    }
}
