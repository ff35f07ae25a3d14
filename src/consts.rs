// Design constants for the sun-earth-moon system. These are picked to look
// good on screen, not derived from anything physical.

pub const SUN_RADIUS: f32 = 8.0;
pub const SUN_GLOW_RADIUS: f32 = 12.0;

pub const EARTH_RADIUS: f32 = 3.0;
pub const EARTH_ORBIT_RADIUS: f32 = 60.0;
pub const EARTH_AXIAL_TILT_DEGREES: f32 = 23.5;

pub const MOON_RADIUS: f32 = 1.0;
pub const MOON_ORBIT_RADIUS: f32 = 10.0;

// Angular rates, in radians per second before the speed multiplier
pub const EARTH_ORBIT_RATE: f64 = 0.2;
pub const EARTH_SPIN_RATE: f64 = 2.0;
pub const MOON_ORBIT_RATE: f64 = 1.0;
pub const MOON_SPIN_RATE: f64 = 1.0;
pub const SUN_SPIN_RATE: f64 = 0.5;

pub const STAR_COUNT: usize = 10_000;
pub const STAR_FIELD_HALF_EXTENT: f32 = 1000.0;
pub const NEBULA_RADIUS: f32 = 800.0;

pub const CAMERA_TRANSITION_MILLIS: u64 = 2000;
pub const MAX_SPEED_MULTIPLIER: f64 = 5.0;
pub const SPEED_STEP: f64 = 0.1;
