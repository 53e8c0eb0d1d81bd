//! End-to-end frame scenarios across spawn, aging, retirement, and draw

use std::sync::Arc;

use mdx_particles::emitter::{BlendFactor, EmitterSettings};
use mdx_particles::{
    CameraFrame, Emitter, EmitterDefinition, FilterMode, ModelInstance, ScalarTrack, TrackSet,
    TrackTag,
};
use pretty_assertions::assert_eq;

fn definition(settings: EmitterSettings) -> Arc<EmitterDefinition> {
    Arc::new(EmitterDefinition::new(settings).unwrap())
}

#[test]
fn both_mode_emission_produces_one_head_and_one_tail() {
    // Emission rate of one per frame at a one-second frame step
    let settings = EmitterSettings {
        head_or_tail: 2,
        life_span: 2.0,
        emission_rate: 1.0,
        ..Default::default()
    };
    let mut emitter = Emitter::new(definition(settings));
    let camera = CameraFrame::identity();

    emitter
        .update(1.0, &ModelInstance::default(), &camera)
        .unwrap();

    assert_eq!(emitter.alive_count(), 2);
    let heads: Vec<bool> = emitter.particles().map(|p| p.is_head).collect();
    assert_eq!(heads, vec![true, false]);
    assert!(emitter.particles().all(|p| p.health > 0.0));
}

#[test]
fn particle_dies_after_two_half_life_updates_and_lands_in_free_list() {
    let settings = EmitterSettings {
        life_span: 1.0,
        ..Default::default()
    };
    let mut emitter = Emitter::new(definition(settings));
    let camera = CameraFrame::identity();
    let instance = ModelInstance::default();

    emitter.emit(&instance);
    assert_eq!(emitter.alive_count(), 1);
    assert_eq!(emitter.pool().free_count(), 0);

    emitter.update(0.5, &instance, &camera).unwrap();
    assert_eq!(emitter.alive_count(), 1);

    emitter.update(0.5, &instance, &camera).unwrap();
    assert_eq!(emitter.alive_count(), 0);
    assert_eq!(emitter.pool().free_count(), 1);
}

#[test]
fn modulate_blend_factors_and_strict_visibility_threshold() {
    let tracks = TrackSet::new().with(TrackTag::Visibility, ScalarTrack::linear(&[(0, 0.75)]));
    let settings = EmitterSettings {
        filter_mode: 2,
        tracks,
        ..Default::default()
    };
    let emitter = Emitter::new(definition(settings));

    assert_eq!(
        FilterMode::Modulate.blend(),
        (BlendFactor::Zero, BlendFactor::SrcColor)
    );
    assert_eq!(emitter.definition().blend_src, BlendFactor::Zero);
    assert_eq!(emitter.definition().blend_dst, BlendFactor::SrcColor);

    // Visibility of exactly 0.75 must not pass the strict comparison
    assert!(!emitter.should_render(&ModelInstance::default()));
}

#[test]
fn empty_emitter_produces_no_draw() {
    let mut emitter = Emitter::new(definition(EmitterSettings::default()));
    let camera = CameraFrame::identity();

    let command = emitter
        .update(0.016, &ModelInstance::default(), &camera)
        .unwrap();

    assert!(command.is_none());
}

#[test]
fn repacking_an_unchanged_alive_set_is_byte_identical() {
    let settings = EmitterSettings {
        life_span: 10.0,
        speed: 5.0,
        ..Default::default()
    };
    let mut emitter = Emitter::new(definition(settings));
    let camera = CameraFrame::identity();
    let instance = ModelInstance::default();

    emitter.emit(&instance);
    emitter.emit(&instance);

    // A zero-dt update leaves every particle where it is
    let first: Vec<f32> = emitter
        .update(0.0, &instance, &camera)
        .unwrap()
        .expect("alive particles produce a draw")
        .vertices
        .to_vec();
    let second: Vec<f32> = emitter
        .update(0.0, &instance, &camera)
        .unwrap()
        .expect("alive particles produce a draw")
        .vertices
        .to_vec();

    assert_eq!(first, second);
}

#[test]
fn emission_order_survives_mixed_retirement() {
    // Continuous emission with a short life span: the live set must always
    // be the most recent emissions, oldest first.
    let settings = EmitterSettings {
        emission_rate: 50.0,
        life_span: 0.1,
        speed: 1.0,
        ..Default::default()
    };
    let mut emitter = Emitter::new(definition(settings));
    let camera = CameraFrame::identity();
    let instance = ModelInstance::default();

    for _ in 0..30 {
        emitter.update(0.02, &instance, &camera).unwrap();

        let healths: Vec<f32> = emitter.particles().map(|p| p.health).collect();
        let mut sorted = healths.clone();
        sorted.sort_by(f32::total_cmp);
        assert_eq!(healths, sorted, "oldest particles must sit at the front");
        assert!(emitter.particles().all(|p| p.health > 0.0));
    }

    assert!(emitter.pool().free_count() > 0);
}

#[test]
fn clearing_an_unset_failure_latch_is_harmless() {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut emitter = Emitter::new(definition(EmitterSettings {
        life_span: 10.0,
        ..Default::default()
    }));
    let camera = CameraFrame::identity();
    let instance = ModelInstance::default();

    emitter.emit(&instance);
    assert!(!emitter.is_failed());

    // A healthy emitter draws; clearing a never-set failure is harmless
    emitter.reset_failure();
    let command = emitter.update(0.016, &instance, &camera).unwrap();
    assert!(command.is_some());
}

#[test]
fn sampled_emission_rate_ramps_spawning() {
    let tracks = TrackSet::new().with(
        TrackTag::EmissionRate,
        ScalarTrack::linear(&[(0, 0.0), (1000, 100.0)]),
    );
    let settings = EmitterSettings {
        life_span: 60.0,
        tracks,
        ..Default::default()
    };
    let mut emitter = Emitter::new(definition(settings));
    let camera = CameraFrame::identity();

    // At t=0 the track says zero particles per second
    emitter
        .update(0.1, &ModelInstance::at_time(0.0), &camera)
        .unwrap();
    assert_eq!(emitter.alive_count(), 0);

    // At t=1000ms it says one hundred per second
    emitter
        .update(0.1, &ModelInstance::at_time(1000.0), &camera)
        .unwrap();
    assert_eq!(emitter.alive_count(), 10);
}
