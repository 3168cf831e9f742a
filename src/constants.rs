//! Constants used throughout the application

/// Default smoothing factor (fraction of remaining distance covered per tick)
pub const DEFAULT_SMOOTHING: f64 = 0.08;

/// Smoothing factor bounds (exclusive min, inclusive max)
pub const SMOOTHING_MIN: f64 = 0.0;
pub const SMOOTHING_MAX: f64 = 1.0;

/// Camera travel per unit of normalized head offset
pub const DEFAULT_PARALLAX_GAIN: f64 = 3.0;

/// Camera distance from the scene origin along +Z
pub const DEFAULT_CAMERA_DISTANCE: f64 = 10.0;

/// Clock increment applied per frame in fixed-step mode (~60 Hz)
pub const DEFAULT_CLOCK_STEP: f64 = 0.016;

/// Largest clock increment accepted in measured mode, in seconds
pub const DEFAULT_MAX_CLOCK_STEP: f64 = 0.1;

/// Face-size to depth-proxy scale: `z = k / sqrt(width * height)`
pub const DEFAULT_DEPTH_SCALE: f64 = 0.8;

/// Depth proxy bounds
pub const DEPTH_PROXY_MIN: f64 = 0.5;
pub const DEPTH_PROXY_MAX: f64 = 1.5;

/// Neutral depth proxy the smoother starts from
pub const NEUTRAL_DEPTH: f64 = 1.0;

/// Detections below this confidence are treated as no detection
pub const DEFAULT_MIN_CONFIDENCE: f32 = 0.5;

/// Windowed viewport size
pub const DEFAULT_VIEWPORT_WIDTH: u32 = 640;
pub const DEFAULT_VIEWPORT_HEIGHT: u32 = 480;

/// Perspective projection defaults
pub const DEFAULT_FOV_DEGREES: f64 = 45.0;
pub const DEFAULT_NEAR_PLANE: f64 = 0.1;
pub const DEFAULT_FAR_PLANE: f64 = 1000.0;

/// Default frames per second for the render loop
pub const DEFAULT_TARGET_FPS: u32 = 60;

/// Group tilt around X is damped relative to tilt around Y
pub const TILT_PITCH_RATIO: f64 = 0.5;

