// Static scene layout.

mod common;

use common::*;
use gallery_core::constants::*;
use gallery_core::*;
use glam::Vec3;
use std::f32::consts::TAU;

#[test]
fn ring_has_one_panel_and_one_border_per_image() {
    for k in [1usize, 2, 3, 7, 12, 40] {
        let config = small_config(k);
        let graph = SceneBuilder::new(&config).build();
        assert_eq!(graph.panels.len(), k);
        for (i, panel) in graph.panels.iter().enumerate() {
            assert_eq!(panel.index, i);
            assert_ne!(panel.image.position, panel.border.position);
        }
    }
}

#[test]
fn panels_sit_on_the_circle_at_equal_angles() {
    let k = 12;
    let panels = ring_panels(k, RING_RADIUS);
    for (i, p) in panels.iter().enumerate() {
        let expected = i as f32 * TAU / k as f32;
        assert!((p.angle - expected).abs() < 1e-5);
        let pos = p.image.position;
        assert!((pos.length() - RING_RADIUS).abs() < 1e-2, "panel {i} off radius");
        assert!(pos.y.abs() < 1e-6);
        assert!((pos.x - expected.cos() * RING_RADIUS).abs() < 1e-2);
        assert!((pos.z - expected.sin() * RING_RADIUS).abs() < 1e-2);
    }
}

#[test]
fn panels_and_borders_face_the_centre() {
    for k in [1usize, 5, 12] {
        for p in ring_panels(k, RING_RADIUS) {
            let outward = p.image.position.normalize();
            assert!((outward.dot(p.image.forward()) + 1.0).abs() < 1e-4);
            assert!((outward.dot(p.border.forward()) + 1.0).abs() < 1e-4);
            // panels stay upright
            assert!((p.image.orientation * Vec3::Y).dot(Vec3::Y) > 0.999);
        }
    }
}

#[test]
fn borders_are_larger_and_pulled_toward_the_centre() {
    for p in ring_panels(6, RING_RADIUS) {
        assert!(p.border.size.x > p.image.size.x);
        assert!(p.border.size.y > p.image.size.y);
        let inset = p.image.position.length() - p.border.position.length();
        assert!((inset - BORDER_INSET).abs() < 1e-2);
    }
}

#[test]
fn panels_start_pending_with_shadow_flags() {
    for p in ring_panels(3, RING_RADIUS) {
        assert_eq!(p.texture, PanelTexture::Pending);
        assert!(p.casts_shadow && p.receives_shadow);
    }
}

#[test]
fn backdrop_counts_and_volumes_follow_config() {
    let config = GalleryConfig {
        star_count: 200,
        particle_count: 50,
        ..small_config(2)
    };
    let graph = SceneBuilder::new(&config).build();
    assert_eq!(graph.stars.len(), 200);
    assert_eq!(graph.particles.len(), 50);
    let half_star = STAR_VOLUME / 2.0;
    assert!(graph
        .stars
        .positions
        .iter()
        .all(|p| p.abs().max_element() <= half_star));
    let half_particle = PARTICLE_VOLUME / 2.0;
    assert!(graph
        .particles
        .positions
        .iter()
        .all(|p| p.abs().max_element() <= half_particle));
    assert_eq!(graph.particles.blend, Blend::Additive);
    assert_eq!(graph.stars.blend, Blend::Alpha);
    for i in 0..graph.particles.len() {
        let [r, g, b] = graph.particles.color_of(i);
        assert!((0.5..1.0).contains(&r));
        assert!((0.5..1.0).contains(&g));
        assert_eq!(b, 1.0);
    }
    assert_eq!(graph.stars.color_of(3), [1.0, 1.0, 1.0]);
}

#[test]
fn same_seed_builds_the_same_backdrop() {
    let config = small_config(3);
    let a = SceneBuilder::new(&config).build();
    let b = SceneBuilder::new(&config).build();
    assert_eq!(a.stars.positions, b.stars.positions);
    assert_eq!(a.particles.positions, b.particles.positions);
    let other = GalleryConfig { seed: 8, ..small_config(3) };
    let c = SceneBuilder::new(&other).build();
    assert_ne!(a.stars.positions, c.stars.positions);
}

#[test]
fn lighting_is_ambient_sun_and_two_points() {
    let graph = SceneBuilder::new(&small_config(1)).build();
    let l = graph.lighting;
    assert!(l.sun.casts_shadow);
    assert_eq!(l.sun.shadow_map_size, SHADOW_MAP_SIZE);
    assert_eq!(l.points.len(), 2);
    assert_ne!(l.points[0].color, l.points[1].color);
    assert_eq!(graph.fog.near, FOG_NEAR);
    assert_eq!(graph.fog.far, FOG_FAR);
}

#[test]
fn large_spin_builds_the_same_rotation_as_its_reduced_angle() {
    let wound = RingState {
        tilt: 0.3,
        spin: 3.0 + 5000.0 * std::f64::consts::TAU,
    };
    let plain = RingState { tilt: 0.3, spin: 3.0 };
    assert!((wound.spin_angle() - 3.0).abs() < 1e-5);
    assert!(wound.rotation().abs_diff_eq(plain.rotation(), 1e-5));
}

#[test]
fn ring_starts_edge_on() {
    let ring = RingState::default();
    assert_eq!(ring.tilt, INITIAL_RING_TILT);
    assert_eq!(ring.spin, 0.0);
    // a quarter turn about x maps the ring plane's normal (y) onto z
    let normal = ring.rotation() * Vec3::Y;
    assert!((normal - Vec3::Z).length() < 1e-5);
}

#[test]
fn set_texture_ignores_unknown_panels() {
    let mut graph = SceneBuilder::new(&small_config(2)).build();
    assert!(graph.set_texture(1, PanelTexture::Ready));
    assert!(!graph.set_texture(5, PanelTexture::Ready));
    assert_eq!(graph.panels[1].texture, PanelTexture::Ready);
}
