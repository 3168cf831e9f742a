//! Scene graph nodes, roles and the single live object group.

use crate::{Error, Result};
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// The three selectable models
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    Cube,
    Character,
    Room,
}

impl ModelKind {
    pub const ALL: [Self; 3] = [Self::Cube, Self::Character, Self::Room];

    /// The model after this one, wrapping around
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Cube => Self::Character,
            Self::Character => Self::Room,
            Self::Room => Self::Cube,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cube => "cube",
            Self::Character => "character",
            Self::Room => "room",
        }
    }
}

impl Default for ModelKind {
    fn default() -> Self {
        Self::Cube
    }
}

impl FromStr for ModelKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "cube" => Ok(Self::Cube),
            "character" => Ok(Self::Character),
            "room" => Ok(Self::Room),
            _ => Err(Error::InvalidInput(format!("Unknown model: {s}"))),
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-object animation parameters, fixed when the node is created
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationParams {
    /// Phase angle in radians
    pub phase: f64,
    /// Rest height for vertical bobbing
    pub base_y: f64,
    /// Multiplier on orbit speed
    pub speed: f64,
}

impl Default for AnimationParams {
    fn default() -> Self {
        Self {
            phase: 0.0,
            base_y: 0.0,
            speed: 1.0,
        }
    }
}

/// How the frame scheduler animates a node
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ObjectRole {
    /// Static scenery
    None,
    /// Rotates continuously while the cube model is active
    MainObject,
    /// Bobs, spins and optionally orbits
    Floating(AnimationParams),
    /// Bobs and wiggles as a whole body
    Character(AnimationParams),
}

/// Position, Euler rotation (radians, XYZ) and per-axis scale
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vector3<f64>,
    pub rotation: Vector3<f64>,
    pub scale: Vector3<f64>,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vector3::zeros(),
            rotation: Vector3::zeros(),
            scale: Vector3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Transform {
    #[must_use]
    pub fn at(x: f64, y: f64, z: f64) -> Self {
        Self {
            position: Vector3::new(x, y, z),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_rotation(mut self, x: f64, y: f64, z: f64) -> Self {
        self.rotation = Vector3::new(x, y, z);
        self
    }

    #[must_use]
    pub fn with_scale(mut self, x: f64, y: f64, z: f64) -> Self {
        self.scale = Vector3::new(x, y, z);
        self
    }

    /// Set all three scale components to the same factor
    pub fn set_uniform_scale(&mut self, factor: f64) {
        self.scale = Vector3::new(factor, factor, factor);
    }
}

/// Surface description handed to the renderer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    /// Packed 0xRRGGBB
    pub color: u32,
    /// Emissive intensity, present only on glowing materials
    pub emissive: Option<f64>,
    pub opacity: f64,
    pub wireframe: bool,
}

impl Material {
    pub const fn solid(color: u32) -> Self {
        Self {
            color,
            emissive: None,
            opacity: 1.0,
            wireframe: false,
        }
    }

    pub const fn glowing(color: u32, intensity: f64) -> Self {
        Self {
            color,
            emissive: Some(intensity),
            opacity: 1.0,
            wireframe: false,
        }
    }
}

/// A named, tagged, transformable scene node
#[derive(Debug, Clone, PartialEq)]
pub struct SceneNode {
    pub name: String,
    pub transform: Transform,
    pub material: Option<Material>,
    pub role: ObjectRole,
    /// Parts positioned relative to this node; never animated individually
    pub children: Vec<SceneNode>,
}

impl SceneNode {
    pub fn new(name: impl Into<String>, transform: Transform, material: Option<Material>) -> Self {
        Self {
            name: name.into(),
            transform,
            material,
            role: ObjectRole::None,
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_role(mut self, role: ObjectRole) -> Self {
        self.role = role;
        self
    }

    #[must_use]
    pub fn with_children(mut self, children: Vec<SceneNode>) -> Self {
        self.children = children;
        self
    }

    /// This node plus all descendants
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(Self::node_count).sum::<usize>()
    }
}

/// Identifies one constructed group, so renderer resources can be released
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupId(pub u64);

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "group#{}", self.0)
    }
}

/// All nodes of one model, created and destroyed as a unit
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectGroup {
    id: GroupId,
    kind: Option<ModelKind>,
    /// Group-level transform (tilt is written here)
    pub transform: Transform,
    nodes: Vec<SceneNode>,
}

impl ObjectGroup {
    pub fn new(id: GroupId, kind: ModelKind, nodes: Vec<SceneNode>) -> Self {
        Self {
            id,
            kind: Some(kind),
            transform: Transform::default(),
            nodes,
        }
    }

    /// A group with no model, used while a switch is in progress
    pub fn empty(id: GroupId) -> Self {
        Self {
            id,
            kind: None,
            transform: Transform::default(),
            nodes: Vec::new(),
        }
    }

    pub const fn id(&self) -> GroupId {
        self.id
    }

    pub const fn kind(&self) -> Option<ModelKind> {
        self.kind
    }

    pub fn nodes(&self) -> &[SceneNode] {
        &self.nodes
    }

    pub fn nodes_mut(&mut self) -> &mut [SceneNode] {
        &mut self.nodes
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn find(&self, name: &str) -> Option<&SceneNode> {
        self.nodes.iter().find(|node| node.name == name)
    }

    /// Number of nodes whose material glows
    pub fn emissive_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|node| node.material.and_then(|m| m.emissive).is_some())
            .count()
    }
}

/// Builds the node list for a model
pub trait ModelBuilder {
    fn build(&mut self, kind: ModelKind) -> Vec<SceneNode>;
}

/// Owner of the one attached object group and the active model selection.
///
/// Switching builds the replacement completely before it is attached, so the
/// frame loop sees either the old group or the new one, never a mixture.
#[derive(Debug)]
pub struct Stage {
    active: ModelKind,
    group: ObjectGroup,
    next_id: u64,
}

impl Stage {
    /// Stage with the given model already built
    pub fn new(kind: ModelKind, builder: &mut dyn ModelBuilder) -> Self {
        let group = ObjectGroup::new(GroupId(0), kind, builder.build(kind));
        Self {
            active: kind,
            group,
            next_id: 1,
        }
    }

    pub const fn active_model(&self) -> ModelKind {
        self.active
    }

    pub const fn group(&self) -> &ObjectGroup {
        &self.group
    }

    pub fn group_mut(&mut self) -> &mut ObjectGroup {
        &mut self.group
    }

    fn allocate_id(&mut self) -> GroupId {
        let id = GroupId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Build `kind`, attach it, and hand back the detached previous group.
    ///
    /// The caller is responsible for releasing the returned group's
    /// renderer resources.
    pub fn switch_to(&mut self, kind: ModelKind, builder: &mut dyn ModelBuilder) -> ObjectGroup {
        let id = self.allocate_id();
        let replacement = ObjectGroup::new(id, kind, builder.build(kind));
        self.active = kind;
        std::mem::replace(&mut self.group, replacement)
    }

    /// Detach the current group and leave an empty one in its place
    pub fn teardown(&mut self) -> ObjectGroup {
        let id = self.allocate_id();
        std::mem::replace(&mut self.group, ObjectGroup::empty(id))
    }

    /// Attach nodes for `kind` in place of the current group, returning it
    pub fn install(&mut self, kind: ModelKind, nodes: Vec<SceneNode>) -> ObjectGroup {
        let id = self.allocate_id();
        self.active = kind;
        std::mem::replace(&mut self.group, ObjectGroup::new(id, kind, nodes))
    }
}
