//! Animation clock and per-role transform updates.
//!
//! Every tagged node is visited once per frame through a single match on its
//! [`ObjectRole`]. Positions and scales are recomputed from the clock;
//! rotations of spinning nodes accumulate per tick.

use crate::{
    constants::{DEFAULT_CLOCK_STEP, DEFAULT_MAX_CLOCK_STEP, TILT_PITCH_RATIO},
    profile::{CalibrationProfile, CharacterMotion, FloatingMotion, GlowMotion, MainObjectMotion, OrbitMotion},
    scene::{AnimationParams, ModelKind, ObjectGroup, ObjectRole, SceneNode},
    smoother::SmoothedState,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// How the animation clock advances per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClockMode {
    /// Constant increment per frame; speed follows the display refresh rate
    Fixed,
    /// Increment by measured wall-clock time, capped
    Measured,
}

impl Default for ClockMode {
    fn default() -> Self {
        Self::Fixed
    }
}

/// Monotonic animation time
#[derive(Debug, Clone)]
pub struct AnimationClock {
    mode: ClockMode,
    step: f64,
    max_step: f64,
    time: f64,
    frames: u64,
}

impl Default for AnimationClock {
    fn default() -> Self {
        Self::new(ClockMode::Fixed, DEFAULT_CLOCK_STEP, DEFAULT_MAX_CLOCK_STEP)
    }
}

impl AnimationClock {
    /// # Panics
    ///
    /// Panics if `step` or `max_step` is negative
    #[must_use]
    pub fn new(mode: ClockMode, step: f64, max_step: f64) -> Self {
        assert!(step >= 0.0, "Clock step must be non-negative");
        assert!(max_step >= 0.0, "Maximum clock step must be non-negative");
        Self {
            mode,
            step,
            max_step,
            time: 0.0,
            frames: 0,
        }
    }

    /// Advance one frame and return the new time.
    ///
    /// `elapsed` is ignored in fixed mode.
    pub fn advance(&mut self, elapsed: Duration) -> f64 {
        let delta = match self.mode {
            ClockMode::Fixed => self.step,
            ClockMode::Measured => elapsed.as_secs_f64().min(self.max_step),
        };
        self.time += delta;
        self.frames += 1;
        self.time
    }

    pub const fn time(&self) -> f64 {
        self.time
    }

    pub const fn frames(&self) -> u64 {
        self.frames
    }

    pub const fn mode(&self) -> ClockMode {
        self.mode
    }
}

/// Horizontal orbit offset `(x, z)` for a floating node at time `t`
pub fn orbit_offset(orbit: &OrbitMotion, params: &AnimationParams, t: f64) -> (f64, f64) {
    let angle = (t * orbit.speed).mul_add(params.speed, params.phase);
    let radius = orbit.radius + orbit.wobble.sample(t, params.phase);
    (angle.cos() * radius, angle.sin() * radius)
}

/// Vertical bob of a floating node
pub fn floating_height(motion: &FloatingMotion, params: &AnimationParams, t: f64) -> f64 {
    params.base_y + motion.bob.sample(t, params.phase * motion.bob_phase_multiplier)
}

fn animate_floating(node: &mut SceneNode, motion: &FloatingMotion, params: &AnimationParams, t: f64) {
    let transform = &mut node.transform;
    if let Some(orbit) = &motion.orbit {
        let (x, z) = orbit_offset(orbit, params, t);
        transform.position.x = x;
        transform.position.z = z;
    }
    transform.position.y = floating_height(motion, params, t);
    transform.rotation += motion.spin;
    if let Some(pulse) = &motion.pulse {
        transform.set_uniform_scale(1.0 + pulse.sample(t, params.phase));
    }
}

fn animate_character(node: &mut SceneNode, motion: &CharacterMotion, params: &AnimationParams, t: f64) {
    let transform = &mut node.transform;
    let secondary = motion.secondary_bob.map_or(0.0, |wave| wave.sample(t, params.phase));
    transform.position.y = params.base_y + motion.bob.sample(t, params.phase) + secondary;
    transform.rotation.y = motion.yaw.sample(t, params.phase);
    if let Some(roll) = &motion.roll {
        transform.rotation.z = roll.sample(t, params.phase);
    }
    if let Some(breathing) = &motion.breathing {
        transform.set_uniform_scale(1.0 + breathing.sample(t, params.phase));
    }
}

fn animate_main_object(node: &mut SceneNode, motion: &MainObjectMotion, head: &SmoothedState) {
    let rotation = &mut node.transform.rotation;
    rotation.x += motion.spin_x;
    rotation.y += motion.spin_y;
    if let Some(reaction) = motion.head_reaction {
        rotation.x += head.y * reaction;
        rotation.y += head.x * reaction;
    }
}

/// Set every emissive material in the group to the pulsing intensity
fn pulse_glow(group: &mut ObjectGroup, glow: &GlowMotion, t: f64) {
    let intensity = glow.intensity(t);
    for node in group.nodes_mut() {
        if let Some(material) = node.material.as_mut() {
            if material.emissive.is_some() {
                material.emissive = Some(intensity);
            }
        }
    }
}

/// Rotate the whole group toward the viewer's head
fn tilt_group(group: &mut ObjectGroup, head: &SmoothedState, tilt_gain: f64) {
    group.transform.rotation.y = head.x * tilt_gain;
    group.transform.rotation.x = -head.y * tilt_gain * TILT_PITCH_RATIO;
}

/// Apply one frame of animation to the attached group.
///
/// An empty group (mid-switch) is a no-op apart from tilt.
pub fn animate_group(group: &mut ObjectGroup, head: &SmoothedState, t: f64, profile: &CalibrationProfile) {
    if let Some(tilt_gain) = profile.tilt_gain {
        tilt_group(group, head, tilt_gain);
    }

    let kind = group.kind();
    for node in group.nodes_mut() {
        match node.role {
            ObjectRole::None => {}
            ObjectRole::Floating(params) => animate_floating(node, &profile.floating, &params, t),
            ObjectRole::Character(params) => animate_character(node, &profile.character, &params, t),
            ObjectRole::MainObject => {
                if kind == Some(ModelKind::Cube) {
                    animate_main_object(node, &profile.main_object, head);
                }
            }
        }
    }

    if kind == Some(ModelKind::Room) {
        pulse_glow(group, &profile.glow, t);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        profile::Wave,
        scene::{GroupId, Material, Transform},
    };
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_fixed_clock_ignores_elapsed() {
        let mut clock = AnimationClock::default();
        clock.advance(Duration::from_millis(100));
        clock.advance(Duration::from_millis(1));
        assert!((clock.time() - 0.032).abs() < 1e-12);
        assert_eq!(clock.frames(), 2);
    }

    #[test]
    fn test_measured_clock_caps_stalls() {
        let mut clock = AnimationClock::new(ClockMode::Measured, 0.016, 0.1);
        clock.advance(Duration::from_millis(20));
        assert!((clock.time() - 0.02).abs() < 1e-12);
        clock.advance(Duration::from_secs(5));
        assert!((clock.time() - 0.12).abs() < 1e-12);
    }

    #[test]
    fn test_orbit_quarter_turn() {
        let orbit = OrbitMotion {
            radius: 2.5,
            speed: 0.5,
            wobble: Wave::new(0.0, 0.0),
        };
        let params = AnimationParams::default();
        let t = FRAC_PI_2 / orbit.speed;
        let (x, z) = orbit_offset(&orbit, &params, t);
        assert!(x.abs() < 1e-12);
        assert!((z - 2.5).abs() < 1e-12);
    }

    #[test]
    fn test_gentle_floating_keeps_horizontal_position() {
        let profile = CalibrationProfile::gentle();
        let params = AnimationParams {
            phase: 0.3,
            base_y: 0.5,
            speed: 1.0,
        };
        let mut node = SceneNode::new("f", Transform::at(1.0, 0.5, -2.0), None).with_role(ObjectRole::Floating(params));
        animate_floating(&mut node, &profile.floating, &params, 1.0);

        assert_eq!(node.transform.position.x, 1.0);
        assert_eq!(node.transform.position.z, -2.0);
        let expected_y = 0.5 + (1.0f64 * 2.0 + 0.3).sin() * 0.15;
        assert!((node.transform.position.y - expected_y).abs() < 1e-12);
        assert!((node.transform.rotation.x - 0.008).abs() < 1e-12);
        assert_eq!(node.transform.scale.x, 1.0);
    }

    #[test]
    fn test_main_object_only_spins_for_cube() {
        let profile = CalibrationProfile::gentle();
        let head = SmoothedState::default();
        let node = SceneNode::new("m", Transform::default(), None).with_role(ObjectRole::MainObject);

        let mut room = ObjectGroup::new(GroupId(1), ModelKind::Room, vec![node.clone()]);
        animate_group(&mut room, &head, 0.0, &profile);
        assert_eq!(room.nodes()[0].transform.rotation.x, 0.0);

        let mut cube = ObjectGroup::new(GroupId(2), ModelKind::Cube, vec![node]);
        animate_group(&mut cube, &head, 0.0, &profile);
        assert!((cube.nodes()[0].transform.rotation.x - 0.004).abs() < 1e-12);
        assert!((cube.nodes()[0].transform.rotation.y - 0.006).abs() < 1e-12);
    }

    #[test]
    fn test_dramatic_tilt_and_reaction() {
        let profile = CalibrationProfile::dramatic();
        let head = SmoothedState { x: 0.5, y: 0.4, z: 1.0 };
        let node = SceneNode::new("m", Transform::default(), None).with_role(ObjectRole::MainObject);
        let mut group = ObjectGroup::new(GroupId(1), ModelKind::Cube, vec![node]);

        animate_group(&mut group, &head, 0.0, &profile);
        assert!((group.transform.rotation.y - 0.15).abs() < 1e-12);
        assert!((group.transform.rotation.x + 0.06).abs() < 1e-12);
        let rotation = group.nodes()[0].transform.rotation;
        assert!((rotation.x - (0.004 + 0.4 * 0.01)).abs() < 1e-12);
        assert!((rotation.y - (0.006 + 0.5 * 0.01)).abs() < 1e-12);
    }

    #[test]
    fn test_glow_only_touches_emissive_in_room() {
        let profile = CalibrationProfile::gentle();
        let nodes = vec![
            SceneNode::new("lamp", Transform::default(), Some(Material::glowing(0xffbe0b, 0.4))),
            SceneNode::new("wall", Transform::default(), Some(Material::solid(0x202040))),
        ];
        let mut group = ObjectGroup::new(GroupId(1), ModelKind::Room, nodes);
        let t = FRAC_PI_2;
        animate_group(&mut group, &SmoothedState::default(), t, &profile);

        assert_eq!(group.nodes()[0].material.and_then(|m| m.emissive), Some(0.5));
        assert_eq!(group.nodes()[1].material.and_then(|m| m.emissive), None);
    }

    #[test]
    fn test_character_breathing_and_roll() {
        let profile = CalibrationProfile::dramatic();
        let params = AnimationParams::default();
        let mut node = SceneNode::new("c", Transform::default(), None).with_role(ObjectRole::Character(params));
        let t = FRAC_PI_2 / 2.0; // breathing peak: sin(2.0 * t) = 1
        animate_character(&mut node, &profile.character, &params, t);

        assert!((node.transform.scale.y - 1.03).abs() < 1e-12);
        assert!((node.transform.rotation.z - (0.7 * t).sin() * 0.05).abs() < 1e-12);
        let expected_y = (1.5 * t).sin() * 0.12 + (3.0 * t).sin() * 0.04;
        assert!((node.transform.position.y - expected_y).abs() < 1e-12);
    }
}
