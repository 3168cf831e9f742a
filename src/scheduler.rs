//! Per-frame update: smoothing, camera pose, object animation, submission.
//!
//! [`FrameScheduler`] owns all session state (tracking, clock, active model,
//! viewport). Detection results and UI events mutate it between frames; a
//! frame tick reads whatever is current and never waits on detection.

use crate::{
    animation::{animate_group, AnimationClock},
    camera::{CameraPose, Lens, Viewport},
    detection::{DetectionMapper, FaceDetection},
    profile::CalibrationProfile,
    renderer::{FrameSubmission, Renderer},
    scene::{ModelBuilder, ModelKind, ObjectGroup, SceneNode, Stage},
    smoother::{SmoothedState, TrackingSmoother},
    Result,
};
use log::{debug, info};
use std::time::Duration;

/// Tracking status change caused by a detection result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackingChange {
    Unchanged,
    /// A face appeared after none (or at startup)
    Acquired,
    /// The face disappeared
    Lost,
}

/// Snapshot of what one tick computed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameState {
    pub frame: u64,
    pub time: f64,
    pub head: SmoothedState,
    pub camera: CameraPose,
}

/// Session context plus the frame update
#[derive(Debug)]
pub struct FrameScheduler {
    profile: CalibrationProfile,
    lens: Lens,
    clock: AnimationClock,
    smoother: TrackingSmoother,
    mapper: DetectionMapper,
    stage: Stage,
    viewport: Viewport,
    windowed: Viewport,
    camera: CameraPose,
}

impl FrameScheduler {
    /// Create a scheduler with `initial` already built and default clock,
    /// lens, mapper and viewport.
    ///
    /// # Panics
    ///
    /// Panics if the profile's smoothing factor is not in (0, 1]
    pub fn new(profile: CalibrationProfile, initial: ModelKind, builder: &mut dyn ModelBuilder) -> Self {
        let smoother = TrackingSmoother::new(profile.smoothing);
        let viewport = Viewport::default();
        let lens = Lens::default();
        let camera = CameraPose::from_head(
            &smoother.current(),
            profile.parallax_gain,
            profile.camera_distance,
            &lens,
            viewport.aspect(),
        );
        info!("Starting with {} model", initial);
        Self {
            stage: Stage::new(initial, builder),
            profile,
            lens,
            clock: AnimationClock::default(),
            smoother,
            mapper: DetectionMapper::default(),
            viewport,
            windowed: viewport,
            camera,
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: AnimationClock) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn with_mapper(mut self, mapper: DetectionMapper) -> Self {
        self.mapper = mapper;
        self
    }

    #[must_use]
    pub fn with_lens(mut self, lens: Lens) -> Self {
        self.lens = lens;
        self.camera.fov_degrees = lens.fov_degrees;
        self.camera.near = lens.near;
        self.camera.far = lens.far;
        self
    }

    /// Windowed viewport size used at startup and after leaving fullscreen
    #[must_use]
    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self.windowed = Viewport::windowed(viewport.width, viewport.height);
        self.camera.aspect = viewport.aspect();
        self
    }

    /// Feed one detector result; an empty slice means no face this frame
    pub fn on_detections(&mut self, detections: &[FaceDetection]) -> TrackingChange {
        match self.mapper.process(detections) {
            Some(signal) => {
                if self.smoother.apply_signal(signal) {
                    TrackingChange::Acquired
                } else {
                    TrackingChange::Unchanged
                }
            }
            None => {
                if self.smoother.on_detection_lost() {
                    TrackingChange::Lost
                } else {
                    TrackingChange::Unchanged
                }
            }
        }
    }

    /// Advance the clock and recompute camera and object transforms
    pub fn advance(&mut self, elapsed: Duration) -> FrameState {
        let time = self.clock.advance(elapsed);
        let head = self.smoother.tick();

        self.camera = CameraPose::from_head(
            &head,
            self.profile.parallax_gain,
            self.profile.camera_distance,
            &self.lens,
            self.viewport.aspect(),
        );
        animate_group(self.stage.group_mut(), &head, time, &self.profile);

        FrameState {
            frame: self.clock.frames(),
            time,
            head,
            camera: self.camera,
        }
    }

    /// Hand the current frame to the renderer
    pub fn submit(&self, renderer: &mut dyn Renderer) -> Result<()> {
        renderer.render(&FrameSubmission {
            frame: self.clock.frames(),
            time: self.clock.time(),
            viewport: self.viewport,
            camera: &self.camera,
            group: self.stage.group(),
        })
    }

    /// One full frame: advance then submit
    pub fn tick(&mut self, elapsed: Duration, renderer: &mut dyn Renderer) -> Result<FrameState> {
        let state = self.advance(elapsed);
        self.submit(renderer)?;
        Ok(state)
    }

    /// Replace the attached group with a freshly built `kind`.
    ///
    /// The new group is complete before it is attached; the old one is
    /// released afterwards, so no frame ever sees two live groups.
    pub fn select_model(
        &mut self,
        kind: ModelKind,
        builder: &mut dyn ModelBuilder,
        renderer: &mut dyn Renderer,
    ) -> Result<()> {
        let previous = self.stage.switch_to(kind, builder);
        info!(
            "Switched model {} -> {}",
            previous.kind().map_or("none", |k| k.as_str()),
            kind
        );
        renderer.release(&previous)
    }

    /// Detach and release the current group, leaving the stage empty
    pub fn teardown(&mut self, renderer: &mut dyn Renderer) -> Result<()> {
        let previous = self.stage.teardown();
        debug!("Tore down {}", previous.id());
        renderer.release(&previous)
    }

    /// Attach prebuilt nodes for `kind`, releasing whatever was attached
    pub fn install(&mut self, kind: ModelKind, nodes: Vec<SceneNode>, renderer: &mut dyn Renderer) -> Result<()> {
        let previous = self.stage.install(kind, nodes);
        renderer.release(&previous)
    }

    /// Change the surface size; only aspect and viewport are affected
    pub fn resize(&mut self, width: u32, height: u32, renderer: &mut dyn Renderer) -> Result<()> {
        if !self.viewport.resize(width, height) {
            return Ok(());
        }
        if !self.viewport.fullscreen {
            self.windowed = self.viewport;
        }
        self.apply_viewport(renderer)
    }

    /// Switch to a fullscreen surface of the given size
    pub fn enter_fullscreen(&mut self, width: u32, height: u32, renderer: &mut dyn Renderer) -> Result<()> {
        if width == 0 || height == 0 {
            log::warn!("Ignoring fullscreen request with size {}x{}", width, height);
            return Ok(());
        }
        self.viewport = Viewport::fullscreen(width, height);
        info!("Entered fullscreen {}x{}", width, height);
        self.apply_viewport(renderer)
    }

    /// Return to the windowed size
    pub fn exit_fullscreen(&mut self, renderer: &mut dyn Renderer) -> Result<()> {
        if !self.viewport.fullscreen {
            return Ok(());
        }
        self.viewport = self.windowed;
        info!("Exited fullscreen, back to {}x{}", self.viewport.width, self.viewport.height);
        self.apply_viewport(renderer)
    }

    fn apply_viewport(&mut self, renderer: &mut dyn Renderer) -> Result<()> {
        self.camera.aspect = self.viewport.aspect();
        renderer.resize(self.viewport)
    }

    pub const fn camera(&self) -> &CameraPose {
        &self.camera
    }

    pub const fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub const fn active_model(&self) -> ModelKind {
        self.stage.active_model()
    }

    pub const fn group(&self) -> &ObjectGroup {
        self.stage.group()
    }

    pub const fn smoother(&self) -> &TrackingSmoother {
        &self.smoother
    }

    /// Direct access for callers that map detections themselves
    pub fn smoother_mut(&mut self) -> &mut TrackingSmoother {
        &mut self.smoother
    }

    pub const fn clock(&self) -> &AnimationClock {
        &self.clock
    }

    pub const fn profile(&self) -> &CalibrationProfile {
        &self.profile
    }

    pub const fn is_tracking(&self) -> bool {
        self.smoother.is_tracking()
    }
}
