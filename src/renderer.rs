//! Interface to the rendering collaborator.
//!
//! The core never draws anything itself. Once per frame it hands the
//! renderer the camera, the viewport and the attached group; when a group is
//! replaced the renderer is told to free whatever it allocated for it.

use crate::{
    camera::{CameraPose, Viewport},
    scene::{GroupId, ObjectGroup},
    Result,
};
use log::{debug, info};

/// Everything the renderer needs for one frame
#[derive(Debug, Clone, Copy)]
pub struct FrameSubmission<'a> {
    pub frame: u64,
    pub time: f64,
    pub viewport: Viewport,
    pub camera: &'a CameraPose,
    pub group: &'a ObjectGroup,
}

/// Rendering backend
pub trait Renderer {
    /// Draw one frame
    fn render(&mut self, submission: &FrameSubmission<'_>) -> Result<()>;

    /// Surface size or presentation mode changed
    fn resize(&mut self, viewport: Viewport) -> Result<()>;

    /// Free resources held for a group that is no longer attached
    fn release(&mut self, group: &ObjectGroup) -> Result<()>;
}

/// Renderer that draws nothing and only reports what it would draw
#[derive(Debug, Default)]
pub struct LogRenderer {
    /// Log a frame summary every this many frames; 0 disables summaries
    every: u64,
    frames: u64,
    released: Vec<GroupId>,
}

impl LogRenderer {
    #[must_use]
    pub fn new(every: u64) -> Self {
        Self {
            every,
            ..Self::default()
        }
    }

    pub const fn frames(&self) -> u64 {
        self.frames
    }

    pub fn released(&self) -> &[GroupId] {
        &self.released
    }
}

impl Renderer for LogRenderer {
    fn render(&mut self, submission: &FrameSubmission<'_>) -> Result<()> {
        self.frames += 1;
        if self.every > 0 && submission.frame % self.every == 0 {
            let camera = submission.camera;
            info!(
                "frame {} t={:.3} camera=({:.2}, {:.2}, {:.2}) {} nodes={} viewport={}x{}{}",
                submission.frame,
                submission.time,
                camera.position.x,
                camera.position.y,
                camera.position.z,
                submission.group.kind().map_or("none", |kind| kind.as_str()),
                submission.group.len(),
                submission.viewport.width,
                submission.viewport.height,
                if submission.viewport.fullscreen { " fullscreen" } else { "" },
            );
        }
        Ok(())
    }

    fn resize(&mut self, viewport: Viewport) -> Result<()> {
        debug!("Renderer surface now {}x{}", viewport.width, viewport.height);
        Ok(())
    }

    fn release(&mut self, group: &ObjectGroup) -> Result<()> {
        debug!("Releasing {} ({} nodes)", group.id(), group.len());
        self.released.push(group.id());
        Ok(())
    }
}
