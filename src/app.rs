//! Main application module for the head parallax viewer.
//!
//! Everything runs on one thread. Detector results, UI events and frame
//! ticks go through a single queue and each is handled to completion before
//! the next, so tracking updates never interleave with a frame.

use crate::{
    config::Config,
    models::ProceduralModels,
    renderer::Renderer,
    scene::ModelKind,
    scheduler::{FrameScheduler, FrameState, TrackingChange},
    source::{DetectionEvent, DetectionSource},
    utils::frame_interval,
    Error, Result,
};
use log::{debug, info, warn};
use std::{
    collections::VecDeque,
    time::{Duration, Instant},
};

/// Main application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Stop after this many frames; `None` runs until the source is exhausted
    pub max_frames: Option<u64>,
    /// Sleep between frames to hold the target framerate
    pub pace: bool,
    /// Cycle to the next model every this many frames
    pub switch_every: Option<u64>,
    /// Start in fullscreen with this surface size
    pub fullscreen: Option<(u32, u32)>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            max_frames: Some(600),
            pace: true,
            switch_every: None,
            fullscreen: None,
        }
    }
}

/// Inputs to the application loop
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// A detector result arrived
    Detection(DetectionEvent),
    /// The user picked a model
    SelectModel(ModelKind),
    /// The surface changed size
    Resize { width: u32, height: u32 },
    EnterFullscreen { width: u32, height: u32 },
    ExitFullscreen,
    /// Display refresh
    Frame { elapsed: Duration },
}

/// What a finished run did
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSummary {
    pub frames: u64,
    pub model_switches: u64,
    /// Frames rendered while a face was being tracked
    pub tracked_frames: u64,
    pub last_frame: Option<FrameState>,
}

/// Main application struct
pub struct ParallaxApp<R: Renderer> {
    config: AppConfig,
    target_fps: u32,
    scheduler: FrameScheduler,
    models: ProceduralModels,
    renderer: R,
    source: Box<dyn DetectionSource>,
    queue: VecDeque<AppEvent>,
    summary: RunSummary,
}

impl<R: Renderer> ParallaxApp<R> {
    /// Create a new viewer from file settings and run options
    pub fn new(config: AppConfig, settings: &Config, renderer: R, source: Box<dyn DetectionSource>) -> Result<Self> {
        info!("Initializing head parallax viewer");
        settings.validate()?;
        if config.max_frames.is_none() && !source.is_finite() {
            return Err(Error::InvalidInput(format!(
                "A frame limit is required with the endless {} source",
                source.name()
            )));
        }

        let profile = settings.calibration_profile();
        info!(
            "Profile {}: parallax gain {:.2}, smoothing {:.3}, camera distance {:.1}",
            settings.profile, profile.parallax_gain, profile.smoothing, profile.camera_distance
        );

        let mut models = ProceduralModels::new(settings.session.seed);
        let scheduler = FrameScheduler::new(profile, settings.session.initial_model, &mut models)
            .with_clock(settings.animation_clock())
            .with_mapper(settings.detection_mapper())
            .with_lens(settings.lens())
            .with_viewport(settings.viewport());
        info!("Detections from {} source", source.name());

        let mut app = Self {
            config,
            target_fps: settings.display.target_fps,
            scheduler,
            models,
            renderer,
            source,
            queue: VecDeque::new(),
            summary: RunSummary {
                frames: 0,
                model_switches: 0,
                tracked_frames: 0,
                last_frame: None,
            },
        };

        let viewport = app.scheduler.viewport();
        app.renderer.resize(viewport)?;
        if let Some((width, height)) = app.config.fullscreen {
            app.push_event(AppEvent::EnterFullscreen { width, height });
        }

        Ok(app)
    }

    /// Queue an event for the next drain
    pub fn push_event(&mut self, event: AppEvent) {
        self.queue.push_back(event);
    }

    /// Handle every queued event in order
    pub fn drain(&mut self) -> Result<()> {
        while let Some(event) = self.queue.pop_front() {
            self.dispatch(event)?;
        }
        Ok(())
    }

    /// Handle one event to completion
    pub fn dispatch(&mut self, event: AppEvent) -> Result<()> {
        match event {
            AppEvent::Detection(event) => self.on_detection(&event),
            AppEvent::SelectModel(kind) => {
                self.scheduler.select_model(kind, &mut self.models, &mut self.renderer)?;
                self.summary.model_switches += 1;
            }
            AppEvent::Resize { width, height } => {
                self.scheduler.resize(width, height, &mut self.renderer)?;
            }
            AppEvent::EnterFullscreen { width, height } => {
                self.scheduler.enter_fullscreen(width, height, &mut self.renderer)?;
            }
            AppEvent::ExitFullscreen => self.scheduler.exit_fullscreen(&mut self.renderer)?,
            AppEvent::Frame { elapsed } => {
                let state = self.scheduler.tick(elapsed, &mut self.renderer)?;
                self.summary.frames += 1;
                if self.scheduler.is_tracking() {
                    self.summary.tracked_frames += 1;
                }
                self.summary.last_frame = Some(state);
            }
        }
        Ok(())
    }

    fn on_detection(&mut self, event: &DetectionEvent) {
        match self.scheduler.on_detections(&event.faces) {
            TrackingChange::Acquired => info!("Face acquired at frame {}, tracking", event.frame),
            TrackingChange::Lost => info!("Face lost at frame {}, holding last position", event.frame),
            TrackingChange::Unchanged => {}
        }
        if !event.faces.is_empty() {
            let target = self.scheduler.smoother().target();
            debug!(
                "target x={:.2} y={:.2} z={:.2}",
                target.target_x, target.target_y, target.target_z
            );
        }
    }

    /// Collect due detections and scheduled UI events, then run one frame
    pub fn step(&mut self, elapsed: Duration) -> Result<()> {
        let frame = self.summary.frames;

        for event in self.source.poll(frame) {
            self.push_event(AppEvent::Detection(event));
        }

        if let Some(every) = self.config.switch_every {
            if every > 0 && frame > 0 && frame % every == 0 {
                let next = self.scheduler.active_model().next();
                self.push_event(AppEvent::SelectModel(next));
            }
        }

        self.push_event(AppEvent::Frame { elapsed });
        self.drain()
    }

    fn finished(&self) -> bool {
        match self.config.max_frames {
            Some(limit) => self.summary.frames >= limit,
            None => self.source.is_exhausted() && self.queue.is_empty(),
        }
    }

    /// Run the main application loop
    pub fn run(&mut self) -> Result<RunSummary> {
        info!("Starting main application loop");

        let interval = frame_interval(self.target_fps);
        let start_time = Instant::now();
        let mut last_frame = Instant::now();
        let mut last_fps_update = Instant::now();

        while !self.finished() {
            let now = Instant::now();
            let elapsed = now.duration_since(last_frame);
            last_frame = now;

            self.step(elapsed)?;

            if last_fps_update.elapsed() >= Duration::from_secs(1) {
                let fps = self.summary.frames as f64 / start_time.elapsed().as_secs_f64();
                debug!("{:.1} fps, tracking: {}", fps, self.scheduler.is_tracking());
                last_fps_update = Instant::now();
            }

            if self.config.pace {
                let spent = now.elapsed();
                if spent < interval {
                    std::thread::sleep(interval - spent);
                } else if spent > interval * 2 {
                    warn!("Frame {} took {:?}", self.summary.frames, spent);
                }
            }
        }

        info!(
            "Application shutting down after {} frames ({} tracked, {} model switches)",
            self.summary.frames, self.summary.tracked_frames, self.summary.model_switches
        );
        Ok(self.summary)
    }

    pub const fn scheduler(&self) -> &FrameScheduler {
        &self.scheduler
    }

    pub const fn renderer(&self) -> &R {
        &self.renderer
    }

    pub const fn summary(&self) -> RunSummary {
        self.summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        detection::{FaceBox, FaceDetection},
        renderer::LogRenderer,
        source::{SyntheticHeadPath, TraceSource},
    };

    fn app_with(events: Vec<DetectionEvent>, config: AppConfig) -> ParallaxApp<LogRenderer> {
        ParallaxApp::new(
            config,
            &Config::default(),
            LogRenderer::default(),
            Box::new(TraceSource::new(events)),
        )
        .unwrap()
    }

    #[test]
    fn test_runs_until_trace_exhausted() {
        let face = FaceDetection::new(FaceBox::new(0.3, 0.5, 0.3, 0.3), 0.9);
        let events = vec![
            DetectionEvent { frame: 0, faces: vec![face] },
            DetectionEvent { frame: 5, faces: vec![] },
        ];
        let config = AppConfig {
            max_frames: None,
            pace: false,
            ..AppConfig::default()
        };
        let mut app = app_with(events, config);
        let summary = app.run().unwrap();

        assert_eq!(summary.frames, 6);
        assert_eq!(summary.tracked_frames, 5);
        assert!(!app.scheduler().is_tracking());
        assert_eq!(app.renderer().frames(), 6);
    }

    #[test]
    fn test_switch_every_cycles_models() {
        let config = AppConfig {
            max_frames: Some(7),
            pace: false,
            switch_every: Some(3),
            fullscreen: None,
        };
        let mut app = app_with(Vec::new(), config);
        let summary = app.run().unwrap();

        assert_eq!(summary.model_switches, 2);
        assert_eq!(app.scheduler().active_model(), ModelKind::Room);
        assert_eq!(app.renderer().released().len(), 2);
    }

    #[test]
    fn test_unbounded_run_needs_finite_source() {
        let config = AppConfig {
            max_frames: None,
            pace: false,
            ..AppConfig::default()
        };
        let result = ParallaxApp::new(
            config,
            &Config::default(),
            LogRenderer::default(),
            Box::new(SyntheticHeadPath::new(1, 60)),
        );
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_starts_fullscreen_when_requested() {
        let config = AppConfig {
            max_frames: Some(1),
            pace: false,
            switch_every: None,
            fullscreen: Some((1280, 720)),
        };
        let mut app = app_with(Vec::new(), config);
        app.run().unwrap();
        assert!(app.scheduler().viewport().fullscreen);
        assert_eq!(app.scheduler().viewport().width, 1280);
    }
}
