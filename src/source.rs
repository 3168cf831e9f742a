//! Detection sources that stand in for the webcam face detector.
//!
//! A real detector delivers results on its own cadence, sometimes slower
//! than the display, sometimes with gaps. Both sources here reproduce that:
//! the synthetic one generates an irregular stream with dropouts, the trace
//! source replays a recorded session from YAML.

use crate::{
    detection::{FaceBox, FaceDetection},
    Error, Result,
};
use log::{debug, info};
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::{collections::VecDeque, f64::consts::TAU, path::Path};

/// One detector result delivered at a given frame. An empty `faces` list
/// means the detector processed a frame and found nobody.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionEvent {
    pub frame: u64,
    #[serde(default)]
    pub faces: Vec<FaceDetection>,
}

/// Anything that yields detector results as frames go by
pub trait DetectionSource {
    /// Results that became available at or before `frame`, oldest first
    fn poll(&mut self, frame: u64) -> Vec<DetectionEvent>;

    /// No further results will ever arrive
    fn is_exhausted(&self) -> bool {
        false
    }

    /// Whether the source eventually runs out; infinite sources never do
    fn is_finite(&self) -> bool {
        false
    }

    fn name(&self) -> &str;
}

/// Generates a smoothly wandering head with irregular delivery and periodic
/// loss of the face
#[derive(Debug)]
pub struct SyntheticHeadPath {
    rng: StdRng,
    frames_per_second: f64,
    next_delivery: u64,
    min_gap: u64,
    max_gap: u64,
    dropout_period: u64,
    dropout_length: u64,
}

impl SyntheticHeadPath {
    /// Detector running every 2 to 4 display frames, losing the face for
    /// 45 frames out of every 300
    #[must_use]
    pub fn new(seed: u64, frames_per_second: u32) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            frames_per_second: f64::from(frames_per_second.max(1)),
            next_delivery: 0,
            min_gap: 2,
            max_gap: 4,
            dropout_period: 300,
            dropout_length: 45,
        }
    }

    /// Override delivery spacing in frames
    ///
    /// # Panics
    ///
    /// Panics if `min_gap` is 0 or greater than `max_gap`
    #[must_use]
    pub fn with_cadence(mut self, min_gap: u64, max_gap: u64) -> Self {
        assert!(min_gap > 0 && min_gap <= max_gap, "Cadence must satisfy 0 < min <= max");
        self.min_gap = min_gap;
        self.max_gap = max_gap;
        self
    }

    /// Override face loss; a period of 0 disables dropouts
    #[must_use]
    pub fn with_dropouts(mut self, period: u64, length: u64) -> Self {
        self.dropout_period = period;
        self.dropout_length = length;
        self
    }

    fn in_dropout(&self, frame: u64) -> bool {
        self.dropout_period > 0 && frame % self.dropout_period >= self.dropout_period - self.dropout_length.min(self.dropout_period)
    }

    /// Head position at `frame` as a detector would report it
    pub fn face_at(&self, frame: u64) -> FaceBox {
        let seconds = frame as f64 / self.frames_per_second;
        let x_center = 0.5 + 0.3 * (seconds * 0.15 * TAU).sin();
        let y_center = 0.5 + 0.2 * (seconds * 0.23 * TAU).sin();
        let size = 0.25 + 0.08 * (seconds * 0.07 * TAU).sin();
        FaceBox::new(x_center, y_center, size, size * 1.2)
    }
}

impl DetectionSource for SyntheticHeadPath {
    fn poll(&mut self, frame: u64) -> Vec<DetectionEvent> {
        if frame < self.next_delivery {
            return Vec::new();
        }
        self.next_delivery = frame + self.rng.gen_range(self.min_gap..=self.max_gap);

        let faces = if self.in_dropout(frame) {
            Vec::new()
        } else {
            let score = self.rng.gen_range(0.7..1.0);
            vec![FaceDetection::new(self.face_at(frame), score)]
        };
        vec![DetectionEvent { frame, faces }]
    }

    fn name(&self) -> &str {
        "synthetic"
    }
}

/// Replays detection events recorded in a YAML file
#[derive(Debug)]
pub struct TraceSource {
    events: VecDeque<DetectionEvent>,
}

impl TraceSource {
    /// Build from events; they are sorted by frame
    pub fn new(mut events: Vec<DetectionEvent>) -> Self {
        events.sort_by_key(|event| event.frame);
        Self {
            events: events.into(),
        }
    }

    /// Load a YAML list of `{ frame, faces }` entries
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let source = Self::from_yaml(&content)
            .map_err(|e| Error::DetectionSource(format!("Failed to parse trace {}: {e}", path.display())))?;
        info!("Loaded {} detection events from {}", source.events.len(), path.display());
        Ok(source)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        let events: Vec<DetectionEvent> = serde_yaml::from_str(content)?;
        Ok(Self::new(events))
    }

    pub fn remaining(&self) -> usize {
        self.events.len()
    }
}

impl DetectionSource for TraceSource {
    fn poll(&mut self, frame: u64) -> Vec<DetectionEvent> {
        let mut due = Vec::new();
        while self.events.front().is_some_and(|event| event.frame <= frame) {
            if let Some(event) = self.events.pop_front() {
                due.push(event);
            }
        }
        if !due.is_empty() {
            debug!("Trace delivered {} events at frame {}", due.len(), frame);
        }
        due
    }

    fn is_exhausted(&self) -> bool {
        self.events.is_empty()
    }

    fn is_finite(&self) -> bool {
        true
    }

    fn name(&self) -> &str {
        "trace"
    }
}
