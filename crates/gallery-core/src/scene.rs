//! Static scene graph and the builder that lays it out.
//!
//! Everything here is built once at mount, before any texture arrives. After
//! that only panel texture states change; panels move solely through the
//! ring's group transform.

use crate::config::GalleryConfig;
use crate::constants::*;
use glam::{Mat3, Mat4, Quat, Vec2, Vec3};
use rand::prelude::*;
use std::f32::consts::TAU;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Blend {
    Alpha,
    Additive,
}

/// A cloud of screen-facing point sprites.
#[derive(Clone, Debug)]
pub struct PointField {
    pub positions: Vec<Vec3>,
    /// Per-point colours; `None` means every point uses `color`.
    pub colors: Option<Vec<[f32; 3]>>,
    pub color: [f32; 3],
    pub size: f32,
    pub opacity: f32,
    pub blend: Blend,
}

impl PointField {
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn color_of(&self, i: usize) -> [f32; 3] {
        self.colors
            .as_ref()
            .and_then(|c| c.get(i).copied())
            .unwrap_or(self.color)
    }
}

/// A flat rectangle in ring-local space. Its front face looks along local +z.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Quad {
    pub position: Vec3,
    pub orientation: Quat,
    pub size: Vec2,
}

impl Quad {
    /// Place a quad at `position` facing `target`, keeping world-up up.
    pub fn facing(position: Vec3, target: Vec3, size: Vec2) -> Self {
        let forward = (target - position).normalize();
        let right = Vec3::Y.cross(forward).normalize();
        let up = forward.cross(right);
        Self {
            position,
            orientation: Quat::from_mat3(&Mat3::from_cols(right, up, forward)),
            size,
        }
    }

    pub fn forward(&self) -> Vec3 {
        self.orientation * Vec3::Z
    }

    /// Unit quad to ring-local transform, scale included.
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.size.extend(1.0), self.orientation, self.position)
    }
}

/// What a panel currently shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PanelTexture {
    /// Still fetching; drawn with the placeholder look.
    Pending,
    Ready,
    /// The image failed; drawn with the placeholder look for good.
    Fallback,
}

#[derive(Clone, Debug)]
pub struct Panel {
    pub index: usize,
    pub angle: f32,
    pub image: Quad,
    pub border: Quad,
    pub texture: PanelTexture,
    pub casts_shadow: bool,
    pub receives_shadow: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BorderStyle {
    pub color: [f32; 3],
    pub opacity: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AmbientLight {
    pub color: [f32; 3],
    pub intensity: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DirectionalLight {
    pub color: [f32; 3],
    pub intensity: f32,
    pub position: Vec3,
    pub casts_shadow: bool,
    pub shadow_map_size: u32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointLight {
    pub color: [f32; 3],
    pub intensity: f32,
    pub position: Vec3,
    pub range: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Lighting {
    pub ambient: AmbientLight,
    pub sun: DirectionalLight,
    pub points: [PointLight; 2],
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fog {
    pub color: [f32; 3],
    pub near: f32,
    pub far: f32,
}

/// The full static scene handed to the render surface at mount.
#[derive(Clone, Debug)]
pub struct SceneGraph {
    pub stars: PointField,
    pub particles: PointField,
    pub panels: Vec<Panel>,
    pub border_style: BorderStyle,
    pub lighting: Lighting,
    pub fog: Fog,
    pub ring_radius: f32,
}

impl SceneGraph {
    pub fn panel_count(&self) -> usize {
        self.panels.len()
    }

    /// Record what panel `index` shows. Out-of-range indices are ignored.
    pub fn set_texture(&mut self, index: usize, texture: PanelTexture) -> bool {
        match self.panels.get_mut(index) {
            Some(panel) => {
                panel.texture = texture;
                true
            }
            None => false,
        }
    }
}

/// Lays out the static scene from a [`GalleryConfig`].
pub struct SceneBuilder<'a> {
    config: &'a GalleryConfig,
}

impl<'a> SceneBuilder<'a> {
    pub fn new(config: &'a GalleryConfig) -> Self {
        Self { config }
    }

    pub fn build(&self) -> SceneGraph {
        let mut rng = StdRng::seed_from_u64(self.config.seed);
        let stars = star_field(&mut rng, self.config.star_count);
        let particles = particle_field(&mut rng, self.config.particle_count);
        let panels = ring_panels(self.config.image_count(), self.config.ring_radius);
        log::debug!(
            "[scene] stars={} particles={} panels={}",
            stars.len(),
            particles.len(),
            panels.len()
        );
        SceneGraph {
            stars,
            particles,
            panels,
            border_style: BorderStyle {
                color: BORDER_COLOR,
                opacity: BORDER_OPACITY,
            },
            lighting: lighting(),
            fog: Fog {
                color: [0.0, 0.0, 0.0],
                near: FOG_NEAR,
                far: FOG_FAR,
            },
            ring_radius: self.config.ring_radius,
        }
    }
}

fn scatter(rng: &mut StdRng, edge: f32) -> Vec3 {
    Vec3::new(
        (rng.gen::<f32>() - 0.5) * edge,
        (rng.gen::<f32>() - 0.5) * edge,
        (rng.gen::<f32>() - 0.5) * edge,
    )
}

fn star_field(rng: &mut StdRng, count: usize) -> PointField {
    PointField {
        positions: (0..count).map(|_| scatter(rng, STAR_VOLUME)).collect(),
        colors: None,
        color: [1.0, 1.0, 1.0],
        size: STAR_SIZE,
        opacity: STAR_OPACITY,
        blend: Blend::Alpha,
    }
}

fn particle_field(rng: &mut StdRng, count: usize) -> PointField {
    let mut positions = Vec::with_capacity(count);
    let mut colors = Vec::with_capacity(count);
    for _ in 0..count {
        positions.push(scatter(rng, PARTICLE_VOLUME));
        // pale blues and lilacs
        colors.push([
            rng.gen::<f32>() * 0.5 + 0.5,
            rng.gen::<f32>() * 0.5 + 0.5,
            1.0,
        ]);
    }
    PointField {
        positions,
        colors: Some(colors),
        color: [1.0, 1.0, 1.0],
        size: PARTICLE_SIZE,
        opacity: PARTICLE_OPACITY,
        blend: Blend::Additive,
    }
}

/// `count` panels at equal angular spacing on a circle in the ring's xz plane,
/// each facing the centre, with its border pulled slightly inward.
pub fn ring_panels(count: usize, radius: f32) -> Vec<Panel> {
    if count == 0 {
        return Vec::new();
    }
    let step = TAU / count as f32;
    (0..count)
        .map(|i| {
            let angle = i as f32 * step;
            let position = Vec3::new(angle.cos() * radius, 0.0, angle.sin() * radius);
            let image = Quad::facing(position, Vec3::ZERO, Vec2::from(PANEL_SIZE));
            let mut border = Quad::facing(position, Vec3::ZERO, Vec2::from(BORDER_SIZE));
            border.position += position.normalize() * -BORDER_INSET;
            Panel {
                index: i,
                angle,
                image,
                border,
                texture: PanelTexture::Pending,
                casts_shadow: true,
                receives_shadow: true,
            }
        })
        .collect()
}

fn lighting() -> Lighting {
    Lighting {
        ambient: AmbientLight {
            color: AMBIENT_COLOR,
            intensity: AMBIENT_INTENSITY,
        },
        sun: DirectionalLight {
            color: SUN_COLOR,
            intensity: SUN_INTENSITY,
            position: SUN_POSITION,
            casts_shadow: true,
            shadow_map_size: SHADOW_MAP_SIZE,
        },
        points: [
            PointLight {
                color: WARM_LIGHT_COLOR,
                intensity: POINT_LIGHT_INTENSITY,
                position: WARM_LIGHT_POSITION,
                range: POINT_LIGHT_RANGE,
            },
            PointLight {
                color: COOL_LIGHT_COLOR,
                intensity: POINT_LIGHT_INTENSITY,
                position: COOL_LIGHT_POSITION,
                range: POINT_LIGHT_RANGE,
            },
        ],
    }
}
