//! Damped spring used to smooth the scroll-progress bar.
//!
//! The bar never jumps: each frame the displayed value is pulled toward the
//! real scroll progress by a mass-spring-damper and integrated with
//! semi-implicit Euler.  The default constants are over-damped, so the value
//! approaches its target without overshooting.

/// Seconds per integration sub-step.  Long frames are split so a stalled
/// event loop cannot destabilise the integration.
const MAX_STEP: f64 = 1.0 / 120.0;

/// Longest frame we integrate; anything longer is treated as this long.
const MAX_FRAME: f64 = 0.25;

#[derive(Debug, Clone)]
pub struct Spring {
    value: f64,
    velocity: f64,
    target: f64,
    stiffness: f64,
    damping: f64,
    mass: f64,
    /// Snap once `|value - target|` is below this...
    rest_delta: f64,
    /// ...and `|velocity|` is below this.
    rest_speed: f64,
}

impl Default for Spring {
    fn default() -> Self {
        Self::new(100.0, 30.0)
    }
}

impl Spring {
    pub fn new(stiffness: f64, damping: f64) -> Self {
        Self {
            value: 0.0,
            velocity: 0.0,
            target: 0.0,
            stiffness: stiffness.max(f64::EPSILON),
            damping: damping.max(0.0),
            mass: 1.0,
            rest_delta: 0.001,
            rest_speed: 0.01,
        }
    }

    pub fn set_target(&mut self, target: f64) {
        self.target = target;
    }

    /// Jump straight to `value` with no motion.
    pub fn snap_to(&mut self, value: f64) {
        self.value = value;
        self.target = value;
        self.velocity = 0.0;
    }

    /// Advance the simulation by `dt` seconds.
    pub fn step(&mut self, dt: f64) {
        if self.is_settled() {
            return;
        }
        let mut remaining = dt.clamp(0.0, MAX_FRAME);
        while remaining > 0.0 {
            let h = remaining.min(MAX_STEP);
            let force = -self.stiffness * (self.value - self.target) - self.damping * self.velocity;
            self.velocity += force / self.mass * h;
            self.value += self.velocity * h;
            remaining -= h;
        }
        if (self.value - self.target).abs() < self.rest_delta
            && self.velocity.abs() < self.rest_speed
        {
            self.snap_to(self.target);
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn is_settled(&self) -> bool {
        self.value == self.target && self.velocity == 0.0
    }
}
