//! Viewport state and the head-coupled camera pose.

use crate::{
    constants::{
        DEFAULT_FAR_PLANE, DEFAULT_FOV_DEGREES, DEFAULT_NEAR_PLANE, DEFAULT_VIEWPORT_HEIGHT, DEFAULT_VIEWPORT_WIDTH,
    },
    smoother::SmoothedState,
};
use log::warn;
use nalgebra::{Isometry3, Matrix4, Perspective3, Point3, Vector3};

/// Drawing surface size and presentation mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
    /// Fullscreen shows the webcam as a picture-in-picture preview
    pub fullscreen: bool,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::windowed(DEFAULT_VIEWPORT_WIDTH, DEFAULT_VIEWPORT_HEIGHT)
    }
}

impl Viewport {
    pub const fn windowed(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            fullscreen: false,
        }
    }

    pub const fn fullscreen(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            fullscreen: true,
        }
    }

    pub fn aspect(&self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }

    /// Apply a new size, ignoring degenerate ones. Returns `true` on change.
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        if width == 0 || height == 0 {
            warn!("Ignoring degenerate viewport size {}x{}", width, height);
            return false;
        }
        let changed = self.width != width || self.height != height;
        self.width = width;
        self.height = height;
        changed
    }
}

/// Perspective lens parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lens {
    pub fov_degrees: f64,
    pub near: f64,
    pub far: f64,
}

impl Default for Lens {
    fn default() -> Self {
        Self {
            fov_degrees: DEFAULT_FOV_DEGREES,
            near: DEFAULT_NEAR_PLANE,
            far: DEFAULT_FAR_PLANE,
        }
    }
}

/// Camera placement for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub position: Point3<f64>,
    pub look_at: Point3<f64>,
    pub fov_degrees: f64,
    pub aspect: f64,
    pub near: f64,
    pub far: f64,
}

impl CameraPose {
    /// Place the camera from the smoothed head offset.
    ///
    /// The camera slides in the XY plane at a fixed distance and always
    /// looks at the origin, which is what turns the screen into a window.
    pub fn from_head(head: &SmoothedState, parallax_gain: f64, distance: f64, lens: &Lens, aspect: f64) -> Self {
        Self {
            position: Point3::new(head.x * parallax_gain, head.y * parallax_gain, distance),
            look_at: Point3::origin(),
            fov_degrees: lens.fov_degrees,
            aspect,
            near: lens.near,
            far: lens.far,
        }
    }

    /// World-to-camera transform
    pub fn view_matrix(&self) -> Matrix4<f64> {
        Isometry3::look_at_rh(&self.position, &self.look_at, &Vector3::y()).to_homogeneous()
    }

    pub fn projection_matrix(&self) -> Matrix4<f64> {
        Perspective3::new(self.aspect, self.fov_degrees.to_radians(), self.near, self.far).to_homogeneous()
    }

    pub fn view_projection(&self) -> Matrix4<f64> {
        self.projection_matrix() * self.view_matrix()
    }
}
