//! Unusual detector output and surface events

use head_parallax::{
    camera::Viewport,
    detection::{DetectionMapper, FaceBox, FaceDetection},
    profile::CalibrationProfile,
    scene::ModelKind,
    scheduler::TrackingChange,
};
use std::time::Duration;

use test_helpers::{create_scheduler, face_at, RecordingRenderer};

#[test]
fn test_out_of_range_center_is_not_clamped() {
    let mapper = DetectionMapper::default();
    let signal = mapper.map(&FaceBox::new(1.5, -0.5, 0.3, 0.3));
    assert!((signal.target_x - (-2.0)).abs() < 1e-12);
    assert!((signal.target_y - 2.0).abs() < 1e-12);
}

#[test]
fn test_depth_proxy_bounds() {
    let mapper = DetectionMapper::default();
    // Tiny face far away, huge face up close
    assert_eq!(mapper.map(&FaceBox::new(0.5, 0.5, 0.01, 0.01)).target_z, 1.5);
    assert_eq!(mapper.map(&FaceBox::new(0.5, 0.5, 1.0, 1.0)).target_z, 0.8);
    assert_eq!(mapper.map(&FaceBox::new(0.5, 0.5, 4.0, 4.0)).target_z, 0.5);
}

#[test]
fn test_degenerate_boxes_map_to_far_depth() {
    let mapper = DetectionMapper::default();
    assert_eq!(mapper.map(&FaceBox::new(0.5, 0.5, 0.0, 0.4)).target_z, 1.5);
    assert_eq!(mapper.map(&FaceBox::new(0.5, 0.5, f64::NAN, 0.4)).target_z, 1.5);
    assert_eq!(mapper.map(&FaceBox::new(0.5, 0.5, f64::INFINITY, 0.0)).target_z, 1.5);
}

#[test]
fn test_low_confidence_counts_as_lost() {
    let (mut scheduler, _) = create_scheduler(CalibrationProfile::gentle(), ModelKind::Cube);
    assert_eq!(scheduler.on_detections(&[face_at(0.3, 0.5)]), TrackingChange::Acquired);

    let weak = FaceDetection::new(FaceBox::new(0.9, 0.5, 0.3, 0.3), 0.2);
    assert_eq!(scheduler.on_detections(&[weak]), TrackingChange::Lost);
    // Target held at the last confident reading
    assert!((scheduler.smoother().target().target_x - 0.4).abs() < 1e-12);
}

#[test]
fn test_only_first_detection_drives_camera() {
    let (mut scheduler, _) = create_scheduler(CalibrationProfile::gentle(), ModelKind::Cube);
    scheduler.on_detections(&[face_at(0.0, 0.5), face_at(1.0, 0.5)]);
    assert!((scheduler.smoother().target().target_x - 1.0).abs() < 1e-12);
}

#[test]
fn test_bursty_detections_do_not_change_per_tick_rate() {
    let (mut bursty, _) = create_scheduler(CalibrationProfile::gentle(), ModelKind::Cube);
    let (mut single, _) = create_scheduler(CalibrationProfile::gentle(), ModelKind::Cube);

    for _ in 0..5 {
        bursty.on_detections(&[face_at(0.0, 0.5)]);
    }
    single.on_detections(&[face_at(0.0, 0.5)]);

    let a = bursty.advance(Duration::ZERO);
    let b = single.advance(Duration::ZERO);
    assert_eq!(a.head, b.head);
}

#[test]
fn test_zero_resize_is_ignored() {
    let (mut scheduler, _) = create_scheduler(CalibrationProfile::gentle(), ModelKind::Cube);
    let mut renderer = RecordingRenderer::default();

    scheduler.resize(0, 300, &mut renderer).unwrap();
    scheduler.enter_fullscreen(1920, 0, &mut renderer).unwrap();

    assert_eq!(scheduler.viewport(), Viewport::default());
    assert!(renderer.resizes.is_empty());
}

#[test]
fn test_resize_is_idempotent() {
    let (mut scheduler, _) = create_scheduler(CalibrationProfile::gentle(), ModelKind::Cube);
    let mut renderer = RecordingRenderer::default();

    scheduler.resize(800, 400, &mut renderer).unwrap();
    let once = *scheduler.camera();
    scheduler.resize(800, 400, &mut renderer).unwrap();

    assert_eq!(*scheduler.camera(), once);
    assert!((once.aspect - 2.0).abs() < 1e-12);
    assert_eq!(scheduler.viewport(), Viewport::windowed(800, 400));
}

#[test]
fn test_exit_fullscreen_restores_resized_window() {
    let (mut scheduler, _) = create_scheduler(CalibrationProfile::gentle(), ModelKind::Cube);
    let mut renderer = RecordingRenderer::default();

    scheduler.resize(800, 600, &mut renderer).unwrap();
    scheduler.enter_fullscreen(2560, 1440, &mut renderer).unwrap();
    scheduler.tick(Duration::ZERO, &mut renderer).unwrap();
    assert!(renderer.frames[0].viewport.fullscreen);

    scheduler.exit_fullscreen(&mut renderer).unwrap();
    assert_eq!(scheduler.viewport(), Viewport::windowed(800, 600));
    assert_eq!(renderer.resizes.len(), 3);
}
