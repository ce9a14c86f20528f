use std::f32::consts::TAU;

// Shared tuning constants for the particle field and page logic.

// Particle physics (units are canvas pixels and display frames)
pub const GRAVITY_PER_FRAME: f32 = 0.1; // added to vy every frame
pub const AMBIENT_SOFT_CAP: usize = 20; // ambient emitter stops at this many live particles
pub const AMBIENT_INTERVAL_MS: i32 = 2000;
pub const AMBIENT_SPAWN_BELOW_PX: f32 = 20.0; // spawn just under the bottom edge

// Ambient heart launch ranges
pub const AMBIENT_RISE_SPEED_MIN: f32 = 0.5;
pub const AMBIENT_RISE_SPEED_MAX: f32 = 2.5;
pub const AMBIENT_DRIFT_MAX: f32 = 0.25;

// Burst
pub const BURST_COUNT: usize = 100;
pub const BURST_SPEED_MIN: f32 = 3.0;
pub const BURST_SPEED_MAX: f32 = 8.0;

// Defaults applied when a particle is first created
pub const SPAWN_DRIFT_MAX: f32 = 1.0;
pub const SPAWN_RISE_MIN: f32 = 1.0;
pub const SPAWN_RISE_MAX: f32 = 4.0;
pub const DECAY_MIN: f32 = 0.005;
pub const DECAY_MAX: f32 = 0.015;
pub const SIZE_MIN: f32 = 10.0;
pub const SIZE_MAX: f32 = 30.0;
pub const SPIN_MAX: f32 = 0.05;
pub const FULL_TURN: f32 = TAU;

// Colors
pub const HEART_COLOR: &str = "#ff2d55";
pub const CONFETTI_PALETTE: [&str; 4] = ["#ff2d55", "#e63946", "#ffd700", "#ff69b4"];

// Evasive button
pub const DODGE_MARGIN_PX: f64 = 40.0; // keep clear of the far edges
pub const DODGE_MIN_OFFSET_PX: f64 = 20.0; // keep clear of the near edges

// Upload limits
pub const PHOTO_MAX_BYTES: u64 = 5 * 1024 * 1024;
pub const AUDIO_MAX_BYTES: u64 = 10 * 1024 * 1024;

// Storage key for the persisted configuration snapshot
pub const CONFIG_STORAGE_KEY: &str = "valentine-config";
