//! Head-coupled parallax viewer library.
//!
//! Turns the viewer's head position, as reported by a webcam face detector,
//! into a camera that slides in front of a 3D scene so the display behaves
//! like a window. The pipeline is:
//! 1. Map each detection's bounding box into mirrored head offsets and a
//!    depth proxy
//! 2. Smooth those targets once per frame with exponential smoothing
//! 3. Place the camera from the smoothed values and animate the scene
//! 4. Hand camera, viewport and object group to a renderer
//!
//! # Examples
//!
//! ## Driving the frame loop by hand
//!
//! ```no_run
//! use head_parallax::{
//!     detection::{FaceBox, FaceDetection},
//!     models::ProceduralModels,
//!     profile::CalibrationProfile,
//!     renderer::LogRenderer,
//!     scene::ModelKind,
//!     scheduler::FrameScheduler,
//! };
//! use std::time::Duration;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut models = ProceduralModels::new(42);
//! let mut renderer = LogRenderer::new(60);
//! let mut scheduler = FrameScheduler::new(CalibrationProfile::gentle(), ModelKind::Cube, &mut models);
//!
//! // A detector result arrived: face slightly left of center
//! let face = FaceDetection::new(FaceBox::new(0.4, 0.5, 0.3, 0.35), 0.93);
//! scheduler.on_detections(&[face]);
//!
//! // Display refresh
//! let state = scheduler.tick(Duration::from_millis(16), &mut renderer)?;
//! println!("Camera at {:?}", state.camera.position);
//!
//! // User picked another model
//! scheduler.select_model(ModelKind::Room, &mut models, &mut renderer)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Using the smoother on its own
//!
//! ```no_run
//! use head_parallax::smoother::TrackingSmoother;
//!
//! let mut smoother = TrackingSmoother::new(0.08);
//! smoother.update_target(1.0, 0.0, 1.0);
//! let state = smoother.tick();
//! assert!((state.x - 0.08).abs() < 1e-12);
//! ```

/// Exponential smoothing of head-position targets
pub mod smoother;

/// Detector output and its mapping into tracking targets
pub mod detection;

/// Detection sources: synthetic head path and trace replay
pub mod source;

/// Calibration profiles for parallax and object motion
pub mod profile;

/// Scene nodes, roles and the active object group
pub mod scene;

/// Procedural builders for the three models
pub mod models;

/// Viewport and camera pose
pub mod camera;

/// Animation clock and per-role transform updates
pub mod animation;

/// Per-frame scheduler owning the session state
pub mod scheduler;

/// Rendering collaborator interface
pub mod renderer;

/// Main application module
pub mod app;

/// Utility functions for parsing and timing
pub mod utils;

/// Error types and result handling
pub mod error;

/// Constants used throughout the application
pub mod constants;

/// Configuration management
pub mod config;

pub use error::{Error, Result};
