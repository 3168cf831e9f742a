//! Procedural node lists for the cube, character and room models.
//!
//! Geometry is described only as far as the frame loop cares: names,
//! rest transforms, materials and animation roles. Meshes are the
//! renderer's business.

use crate::scene::{AnimationParams, Material, ModelBuilder, ModelKind, ObjectRole, SceneNode, Transform};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::f64::consts::{PI, TAU};

const CYAN: u32 = 0x00d4ff;
const PURPLE: u32 = 0x7b2cbf;
const PINK: u32 = 0xff006e;
const GREEN: u32 = 0x00ff88;
const AMBER: u32 = 0xffbe0b;

const ACCENTS: [u32; 4] = [CYAN, PURPLE, PINK, GREEN];

const FLOATING_CUBES: usize = 6;
const FLOATING_RING_RADIUS: f64 = 2.5;
const STARS: usize = 5;

const ROOM_SIZE: f64 = 6.0;
const ROOM_DEPTH: f64 = 10.0;
const WINDOW_SIZE: f64 = 2.0;
const FRAME_THICKNESS: f64 = 0.15;

/// Builds the three demo models. Random placement is seeded so a session
/// can be replayed exactly.
#[derive(Debug)]
pub struct ProceduralModels {
    rng: StdRng,
}

impl ProceduralModels {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Centered random value in `[-span / 2, span / 2)`
    fn jitter(&mut self, span: f64) -> f64 {
        (self.rng.gen::<f64>() - 0.5) * span
    }

    fn cube(&mut self) -> Vec<SceneNode> {
        let mut nodes = vec![
            SceneNode::new("main_cube", Transform::default(), Some(Material::solid(CYAN)))
                .with_role(ObjectRole::MainObject),
            SceneNode::new(
                "main_cube_wireframe",
                Transform::default(),
                Some(Material {
                    color: 0xffffff,
                    emissive: None,
                    opacity: 0.2,
                    wireframe: true,
                }),
            )
            .with_role(ObjectRole::MainObject),
        ];

        for i in 0..FLOATING_CUBES {
            let angle = (i as f64 / FLOATING_CUBES as f64) * TAU;
            let y = (angle * 2.0).sin();
            let color = ACCENTS[i % ACCENTS.len()];
            let node = SceneNode::new(
                format!("floating_cube_{i}"),
                Transform::at(angle.cos() * FLOATING_RING_RADIUS, y, angle.sin() * FLOATING_RING_RADIUS),
                Some(Material::glowing(color, 0.2)),
            )
            .with_role(ObjectRole::Floating(AnimationParams {
                phase: angle,
                base_y: y,
                speed: 1.0,
            }));
            nodes.push(node);
        }

        nodes
    }

    fn character(&mut self) -> Vec<SceneNode> {
        let skin = Material::solid(CYAN);
        let dark = Material::solid(0x1a1a2e);
        let white = Material::solid(0xffffff);
        let blush = Material {
            color: 0xff9999,
            emissive: None,
            opacity: 0.6,
            wireframe: false,
        };
        let inner_ear = Material::solid(0xff9999);

        let parts = vec![
            SceneNode::new("torso", Transform::default().with_scale(1.0, 1.1, 1.0), Some(skin)),
            SceneNode::new("face", Transform::at(0.0, 0.0, 0.95), Some(Material::solid(0xfff0db))),
            SceneNode::new("left_eye", Transform::at(-0.3, 0.25, 1.05), Some(dark)),
            SceneNode::new("right_eye", Transform::at(0.3, 0.25, 1.05), Some(dark)),
            SceneNode::new("left_highlight", Transform::at(-0.26, 0.32, 1.18), Some(white)),
            SceneNode::new("right_highlight", Transform::at(0.34, 0.32, 1.18), Some(white)),
            SceneNode::new("left_blush", Transform::at(-0.55, -0.05, 1.0), Some(blush)),
            SceneNode::new("right_blush", Transform::at(0.55, -0.05, 1.0), Some(blush)),
            SceneNode::new("mouth", Transform::at(0.0, -0.25, 1.0).with_rotation(0.0, 0.0, PI), Some(dark)),
            SceneNode::new("left_ear", Transform::at(-0.9, 1.0, 0.0).with_scale(1.0, 1.3, 0.5), Some(skin)),
            SceneNode::new("right_ear", Transform::at(0.9, 1.0, 0.0).with_scale(1.0, 1.3, 0.5), Some(skin)),
            SceneNode::new("left_inner_ear", Transform::at(-0.9, 1.0, 0.15).with_scale(1.0, 1.3, 0.5), Some(inner_ear)),
            SceneNode::new("right_inner_ear", Transform::at(0.9, 1.0, 0.15).with_scale(1.0, 1.3, 0.5), Some(inner_ear)),
            SceneNode::new("left_foot", Transform::at(-0.45, -1.3, 0.2).with_scale(1.0, 0.6, 1.2), Some(skin)),
            SceneNode::new("right_foot", Transform::at(0.45, -1.3, 0.2).with_scale(1.0, 0.6, 1.2), Some(skin)),
        ];

        let mut nodes = vec![SceneNode::new("character", Transform::default(), None)
            .with_role(ObjectRole::Character(AnimationParams::default()))
            .with_children(parts)];

        for i in 0..STARS {
            let x = self.jitter(5.0);
            let y = self.jitter(3.0);
            let z = self.jitter(3.0) - 1.0;
            let phase = self.rng.gen::<f64>() * TAU;
            let speed = self.rng.gen::<f64>().mul_add(0.5, 0.5);
            nodes.push(
                SceneNode::new(format!("star_{i}"), Transform::at(x, y, z), Some(Material::glowing(AMBER, 0.5)))
                    .with_role(ObjectRole::Floating(AnimationParams { phase, base_y: y, speed })),
            );
        }

        nodes
    }

    fn room(&mut self) -> Vec<SceneNode> {
        let half = ROOM_SIZE / 2.0;
        let back_z = -ROOM_DEPTH / 2.0;
        let side_wall = Material::solid(0x252545);
        let frame = Material::solid(0x4a4a6a);

        let mut nodes = vec![
            SceneNode::new("back_wall", Transform::at(0.0, 0.0, back_z), Some(Material::solid(0x2a2a4a))),
            SceneNode::new(
                "floor",
                Transform::at(0.0, -half, 0.0).with_rotation(PI / 2.0, 0.0, 0.0),
                Some(Material::solid(0x1a1a2e)),
            ),
            SceneNode::new(
                "left_wall",
                Transform::at(-half, 0.0, 0.0).with_rotation(0.0, PI / 2.0, 0.0),
                Some(side_wall),
            ),
            SceneNode::new(
                "right_wall",
                Transform::at(half, 0.0, 0.0).with_rotation(0.0, -PI / 2.0, 0.0),
                Some(side_wall),
            ),
            SceneNode::new(
                "ceiling",
                Transform::at(0.0, half, 0.0).with_rotation(-PI / 2.0, 0.0, 0.0),
                Some(Material::solid(0x202040)),
            ),
            SceneNode::new(
                "window",
                Transform::at(0.0, 0.5, back_z + 0.1),
                Some(Material {
                    color: 0x87ceeb,
                    emissive: None,
                    opacity: 0.8,
                    wireframe: false,
                }),
            ),
            SceneNode::new(
                "window_frame_top",
                Transform::at(0.0, 0.5 + WINDOW_SIZE / 2.0 + FRAME_THICKNESS / 2.0, back_z + 0.15),
                Some(frame),
            ),
            SceneNode::new(
                "window_frame_bottom",
                Transform::at(0.0, 0.5 - WINDOW_SIZE / 2.0 - FRAME_THICKNESS / 2.0, back_z + 0.15),
                Some(frame),
            ),
            SceneNode::new("desk", Transform::at(0.0, -1.5, -2.5), Some(Material::solid(0x5c4033))),
            SceneNode::new("monitor", Transform::at(0.0, -0.95, -2.8), Some(Material::solid(0x1a1a1a))),
            SceneNode::new("monitor_screen", Transform::at(0.0, -0.95, -2.75), Some(Material::glowing(CYAN, 0.8))),
            SceneNode::new("lamp_base", Transform::at(1.5, -1.4, -2.6), Some(Material::solid(0x666666))),
            SceneNode::new(
                "lamp_shade",
                Transform::at(1.5, -0.9, -2.6).with_rotation(PI, 0.0, 0.0),
                Some(Material::glowing(AMBER, 0.4)),
            ),
            SceneNode::new("lamp_light", Transform::at(1.5, -0.9, -2.6), None),
        ];

        for (i, color) in [PINK, PURPLE, CYAN].into_iter().enumerate() {
            let tilt = self.jitter(0.15);
            nodes.push(SceneNode::new(
                format!("book_{i}"),
                Transform::at((i as f64).mul_add(0.3, -0.8), -1.3, -2.5).with_rotation(0.0, 0.0, tilt),
                Some(Material::solid(color)),
            ));
        }

        nodes.push(SceneNode::new("plant_pot", Transform::at(-2.0, -2.65, -3.0), Some(Material::solid(0x8b4513))));
        for i in 0..4 {
            let x = -2.0 + self.jitter(0.2);
            let z = -3.0 + self.jitter(0.2);
            nodes.push(SceneNode::new(
                format!("leaf_{i}"),
                Transform::at(x, (i as f64).mul_add(0.12, -2.3), z).with_scale(0.7, 1.0, 0.7),
                Some(Material::solid(0x228b22)),
            ));
        }

        nodes
    }
}

impl Default for ProceduralModels {
    fn default() -> Self {
        Self::new(0)
    }
}

impl ModelBuilder for ProceduralModels {
    fn build(&mut self, kind: ModelKind) -> Vec<SceneNode> {
        match kind {
            ModelKind::Cube => self.cube(),
            ModelKind::Character => self.character(),
            ModelKind::Room => self.room(),
        }
    }
}
