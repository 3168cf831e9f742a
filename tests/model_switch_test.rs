//! Model switching as seen by the renderer

use head_parallax::{
    models::ProceduralModels,
    profile::CalibrationProfile,
    scene::{ModelBuilder, ModelKind},
};
use std::time::Duration;

use test_helpers::{create_scheduler, face_at, RecordingRenderer};

#[test]
fn test_one_live_group_across_switches() {
    let (mut scheduler, mut models) = create_scheduler(CalibrationProfile::gentle(), ModelKind::Cube);
    let mut renderer = RecordingRenderer::default();

    for kind in [ModelKind::Character, ModelKind::Room, ModelKind::Cube, ModelKind::Room] {
        scheduler.tick(Duration::ZERO, &mut renderer).unwrap();
        scheduler.select_model(kind, &mut models, &mut renderer).unwrap();
        scheduler.tick(Duration::ZERO, &mut renderer).unwrap();
    }

    assert_eq!(renderer.max_live_groups(), 1);
    assert_eq!(renderer.live_groups(), 1);
    assert_eq!(renderer.released.len(), 4);
    assert_eq!(scheduler.active_model(), ModelKind::Room);
}

#[test]
fn test_every_frame_sees_a_complete_group() {
    let (mut scheduler, mut models) = create_scheduler(CalibrationProfile::dramatic(), ModelKind::Cube);
    let mut renderer = RecordingRenderer::default();
    let expected: Vec<(ModelKind, usize)> = ModelKind::ALL
        .iter()
        .map(|&kind| (kind, ProceduralModels::new(1).build(kind).len()))
        .collect();

    let mut kind = ModelKind::Cube;
    for frame in 0..30 {
        if frame % 4 == 3 {
            kind = kind.next();
            scheduler.select_model(kind, &mut models, &mut renderer).unwrap();
        }
        scheduler.tick(Duration::ZERO, &mut renderer).unwrap();
    }

    for recorded in &renderer.frames {
        let kind = recorded.kind.unwrap();
        let (_, nodes) = expected.iter().find(|(k, _)| *k == kind).unwrap();
        assert_eq!(recorded.nodes, *nodes, "frame {} drew a partial {}", recorded.frame, kind);
    }
}

#[test]
fn test_rapid_switches_without_frames() {
    let (mut scheduler, mut models) = create_scheduler(CalibrationProfile::gentle(), ModelKind::Cube);
    let mut renderer = RecordingRenderer::default();

    for _ in 0..10 {
        let next = scheduler.active_model().next();
        scheduler.select_model(next, &mut models, &mut renderer).unwrap();
    }
    scheduler.tick(Duration::ZERO, &mut renderer).unwrap();

    // Ten replacements, ten releases, and only the last group ever drawn
    assert_eq!(renderer.released.len(), 10);
    assert_eq!(renderer.frames.len(), 1);
    assert_eq!(renderer.frames[0].group, scheduler.group().id());
    assert_eq!(scheduler.active_model(), ModelKind::Character);
}

#[test]
fn test_frame_between_teardown_and_install() {
    let (mut scheduler, _) = create_scheduler(CalibrationProfile::dramatic(), ModelKind::Room);
    let mut renderer = RecordingRenderer::default();
    scheduler.on_detections(&[face_at(0.2, 0.4)]);
    scheduler.tick(Duration::ZERO, &mut renderer).unwrap();

    scheduler.teardown(&mut renderer).unwrap();
    let state = scheduler.tick(Duration::ZERO, &mut renderer).unwrap();
    assert!(scheduler.group().is_empty());
    assert_eq!(renderer.frames.last().unwrap().nodes, 0);
    assert_eq!(renderer.frames.last().unwrap().kind, None);
    // Camera keeps following the head with nothing attached
    assert!(state.camera.position.x > 0.0);

    let nodes = ProceduralModels::new(7).build(ModelKind::Character);
    let count = nodes.len();
    scheduler.install(ModelKind::Character, nodes, &mut renderer).unwrap();
    scheduler.tick(Duration::ZERO, &mut renderer).unwrap();

    assert_eq!(renderer.frames.last().unwrap().nodes, count);
    assert_eq!(scheduler.active_model(), ModelKind::Character);
    assert_eq!(renderer.max_live_groups(), 1);
}

#[test]
fn test_switch_to_same_model_rebuilds() {
    let (mut scheduler, mut models) = create_scheduler(CalibrationProfile::gentle(), ModelKind::Cube);
    let mut renderer = RecordingRenderer::default();
    let first = scheduler.group().id();

    scheduler.select_model(ModelKind::Cube, &mut models, &mut renderer).unwrap();

    assert_ne!(scheduler.group().id(), first);
    assert_eq!(renderer.released, vec![first]);
    assert_eq!(scheduler.active_model(), ModelKind::Cube);
}
