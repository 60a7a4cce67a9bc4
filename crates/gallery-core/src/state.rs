//! Mutable scene state: the viewer, the ring transform and the backdrop spin.
//!
//! These types avoid platform APIs so the web front-end and the tests share
//! them. [`SceneState`] is the single owned context every component mutates
//! through `&mut`, never through shared handles.

use crate::constants::{
    APPROACH_HEADING, CAMERA_FAR, CAMERA_FOV_DEG, CAMERA_NEAR, CAMERA_START, INITIAL_RING_TILT,
    ZOOM_MAX, ZOOM_MIN,
};
use crate::tween::{Animatable, Channel};
use glam::{EulerRot, Mat4, Quat, Vec2, Vec3};
use std::f64::consts::TAU;

/// Size of the drawable region in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Width over height, or `None` for a collapsed viewport.
    pub fn aspect(&self) -> Option<f32> {
        (!self.is_empty()).then(|| self.width as f32 / self.height as f32)
    }

    /// Map a pixel position to normalized device coordinates, y up.
    pub fn to_ndc(&self, px: Vec2) -> Vec2 {
        let w = self.width.max(1) as f32;
        let h = self.height.max(1) as f32;
        Vec2::new(px.x / w * 2.0 - 1.0, -(px.y / h) * 2.0 + 1.0)
    }
}

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

/// Where the viewer is and how it projects.
///
/// The zoom distance is the position's z component; wheel input keeps it in
/// `[ZOOM_MIN, ZOOM_MAX]`. The heading never changes: the viewer keeps
/// looking along the approach direction toward the ring centre.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewerState {
    pub position: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
}

impl ViewerState {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            position: CAMERA_START,
            aspect: viewport.aspect().unwrap_or(1.0),
            fovy_radians: CAMERA_FOV_DEG.to_radians(),
        }
    }

    pub fn zoom_distance(&self) -> f32 {
        self.position.z
    }

    /// Move the viewer along z by `step` and clamp into the zoom bounds.
    pub fn zoom_by(&mut self, step: f32) {
        self.position.z = (self.position.z + step).clamp(ZOOM_MIN, ZOOM_MAX);
    }

    pub fn camera(&self) -> Camera {
        Camera {
            eye: self.position,
            target: self.position + APPROACH_HEADING,
            up: Vec3::Y,
            aspect: self.aspect,
            fovy_radians: self.fovy_radians,
            znear: CAMERA_NEAR,
            zfar: CAMERA_FAR,
        }
    }
}

/// Orientation of the whole ring of panels.
///
/// `tilt` rotates about x, `spin` about y. Spin accumulates without
/// wrapping, so it is kept in f64 and only reduced to one turn when the
/// rotation is built.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RingState {
    pub tilt: f32,
    pub spin: f64,
}

impl Default for RingState {
    fn default() -> Self {
        Self {
            tilt: INITIAL_RING_TILT,
            spin: 0.0,
        }
    }
}

impl RingState {
    /// Group rotation, tilt applied outermost (x then y).
    pub fn rotation(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.tilt, self.spin_angle(), 0.0)
    }

    /// Spin reduced into `[0, TAU)`.
    pub fn spin_angle(&self) -> f32 {
        self.spin.rem_euclid(TAU) as f32
    }

    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_quat(self.rotation())
    }
}

/// Rotation of the decorative point fields.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BackdropState {
    pub particle_rotation: Vec2, // (x, y) radians
    pub star_spin: f32,
}

impl BackdropState {
    pub fn particle_matrix(&self) -> Mat4 {
        Mat4::from_euler(
            EulerRot::XYZ,
            self.particle_rotation.x,
            self.particle_rotation.y,
            0.0,
        )
    }

    pub fn star_matrix(&self) -> Mat4 {
        Mat4::from_rotation_y(self.star_spin)
    }
}

/// The single owned scene context mutated by every component.
#[derive(Clone, Debug)]
pub struct SceneState {
    pub viewer: ViewerState,
    pub ring: RingState,
    pub backdrop: BackdropState,
}

impl SceneState {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewer: ViewerState::new(viewport),
            ring: RingState::default(),
            backdrop: BackdropState::default(),
        }
    }
}

impl Animatable for SceneState {
    fn read(&self, channel: Channel) -> f64 {
        match channel {
            Channel::ViewerX => f64::from(self.viewer.position.x),
            Channel::ViewerY => f64::from(self.viewer.position.y),
            Channel::ViewerZ => f64::from(self.viewer.position.z),
            Channel::RingTilt => f64::from(self.ring.tilt),
            Channel::RingSpin => self.ring.spin,
        }
    }

    fn write(&mut self, channel: Channel, value: f64) {
        match channel {
            Channel::ViewerX => self.viewer.position.x = value as f32,
            Channel::ViewerY => self.viewer.position.y = value as f32,
            Channel::ViewerZ => self.viewer.position.z = value as f32,
            Channel::RingTilt => self.ring.tilt = value as f32,
            Channel::RingSpin => self.ring.spin = value,
        }
    }
}
