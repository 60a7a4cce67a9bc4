use glam::Vec3;
use std::f32::consts::FRAC_PI_2;

// Authoring values for the gallery scene. Distances are in world units,
// durations in seconds, angles in radians.

// Ring layout
pub const RING_RADIUS: f32 = 1000.0;
pub const PANEL_SIZE: [f32; 2] = [400.0, 250.0];
pub const BORDER_SIZE: [f32; 2] = [420.0, 270.0]; // oversized glow frame behind each panel
pub const BORDER_INSET: f32 = 2.0; // border sits this far inside its panel, toward the centre
pub const BORDER_COLOR: [f32; 3] = [0.306, 0.804, 0.769]; // #4ecdc4
pub const BORDER_OPACITY: f32 = 0.3;
pub const INITIAL_RING_TILT: f32 = FRAC_PI_2; // edge-on until the entry sequence un-tilts it

// Backdrop
pub const STAR_COUNT: usize = 2000;
pub const STAR_VOLUME: f32 = 10_000.0; // edge of the cube stars are scattered in
pub const STAR_SIZE: f32 = 2.0;
pub const STAR_OPACITY: f32 = 0.8;
pub const PARTICLE_COUNT: usize = 500;
pub const PARTICLE_VOLUME: f32 = 2000.0;
pub const PARTICLE_SIZE: f32 = 3.0;
pub const PARTICLE_OPACITY: f32 = 0.6;

// Fog (black, linear)
pub const FOG_NEAR: f32 = 1000.0;
pub const FOG_FAR: f32 = 5000.0;

// Camera
pub const CAMERA_FOV_DEG: f32 = 70.0;
pub const CAMERA_NEAR: f32 = 1.0;
pub const CAMERA_FAR: f32 = 10_000.0;
pub const CAMERA_START: Vec3 = Vec3::new(0.0, 200.0, 5000.0);
pub const VANTAGE_POINT: Vec3 = Vec3::new(0.0, 100.0, 0.0);
pub const APPROACH_HEADING: Vec3 = Vec3::NEG_Z; // from the start point toward the ring centre

// Timing
pub const ENTRY_DURATION_SEC: f32 = 6.0;
pub const IDLE_SPIN_PER_CYCLE: f64 = 2.0 * std::f64::consts::TAU; // two full turns...
pub const IDLE_CYCLE_SEC: f32 = 60.0; // ...per minute
pub const RESET_DURATION_SEC: f32 = 2.0;

// Interaction
pub const DRAG_SPIN_GAIN: f32 = 2.0;
pub const DRAG_TILT_GAIN: f32 = 0.5;
pub const ZOOM_STEP: f32 = 50.0;
pub const ZOOM_MIN: f32 = 50.0;
pub const ZOOM_MAX: f32 = 2000.0;
pub const RESET_KEY_CODE: &str = "Space";

// Backdrop spin (radians per second of wall-clock time)
pub const PARTICLE_SPIN_Y: f32 = 0.1;
pub const PARTICLE_SPIN_X: f32 = 0.05;
pub const STAR_SPIN_Y: f32 = 0.02;

// Lighting
pub const AMBIENT_COLOR: [f32; 3] = [0.251, 0.251, 0.251]; // #404040
pub const AMBIENT_INTENSITY: f32 = 0.6;
pub const SUN_COLOR: [f32; 3] = [1.0, 1.0, 1.0];
pub const SUN_INTENSITY: f32 = 0.8;
pub const SUN_POSITION: Vec3 = Vec3::new(100.0, 100.0, 50.0);
pub const SHADOW_MAP_SIZE: u32 = 2048;
pub const WARM_LIGHT_COLOR: [f32; 3] = [1.0, 0.420, 0.420]; // #ff6b6b
pub const WARM_LIGHT_POSITION: Vec3 = Vec3::new(500.0, 200.0, 0.0);
pub const COOL_LIGHT_COLOR: [f32; 3] = BORDER_COLOR;
pub const COOL_LIGHT_POSITION: Vec3 = Vec3::new(-500.0, 200.0, 0.0);
pub const POINT_LIGHT_INTENSITY: f32 = 0.5;
pub const POINT_LIGHT_RANGE: f32 = 1000.0;
