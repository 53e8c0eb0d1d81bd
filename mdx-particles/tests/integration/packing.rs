//! Buffer layout and packed-scalar contract tests

use std::sync::Arc;

use mdx_particles::emitter::{BYTES_PER_PARTICLE, EmitterSettings, FlipbookInterval};
use mdx_particles::render::decode_triple;
use mdx_particles::{CameraFrame, Emitter, EmitterDefinition, ModelInstance};
use pretty_assertions::assert_eq;
use test_case::test_case;

fn emitter_with(settings: EmitterSettings) -> Emitter {
    Emitter::new(Arc::new(EmitterDefinition::new(settings).unwrap()))
}

#[test]
fn thirty_floats_per_particle() {
    assert_eq!(BYTES_PER_PARTICLE, 120);

    let mut emitter = emitter_with(EmitterSettings {
        life_span: 10.0,
        ..Default::default()
    });
    let camera = CameraFrame::identity();
    let instance = ModelInstance::default();

    for expected in 1..=4 {
        emitter.emit(&instance);
        let command = emitter
            .update(0.001, &instance, &camera)
            .unwrap()
            .expect("alive particles produce a draw");
        assert_eq!(command.vertices.len(), expected * 30);
        assert_eq!(command.vertex_count as usize, expected * 6);
    }
}

#[test_case(1; "one particle")]
#[test_case(7; "seven particles")]
#[test_case(64; "sixty four particles")]
fn buffer_covers_every_alive_particle(count: usize) {
    let mut emitter = emitter_with(EmitterSettings {
        life_span: 100.0,
        ..Default::default()
    });
    let camera = CameraFrame::identity();
    let instance = ModelInstance::default();

    for _ in 0..count {
        emitter.emit(&instance);
    }
    let command = emitter
        .update(0.001, &instance, &camera)
        .unwrap()
        .expect("alive particles produce a draw");

    assert_eq!(command.vertices.len(), count * 30);
}

#[test]
fn packed_vertex_stride_carries_cell_and_color() {
    let settings = EmitterSettings {
        life_span: 10.0,
        columns: 8,
        rows: 8,
        head_interval: FlipbookInterval {
            start: 0,
            end: 63,
            repeat: 1,
        },
        segment_colors: [[1.0, 0.0, 0.0]; 3],
        segment_alphas: [255; 3],
        ..Default::default()
    };
    let mut emitter = emitter_with(settings);
    let camera = CameraFrame::identity();
    let instance = ModelInstance::default();

    emitter.emit(&instance);
    let command = emitter
        .update(0.001, &instance, &camera)
        .unwrap()
        .expect("alive particle produces a draw");

    for vertex in 0..6 {
        let base = vertex * 5;
        let (u, v, alpha) = decode_triple(command.vertices[base + 3]);
        assert!(u <= 8 && v <= 8, "cell corners stay inside the atlas grid");
        assert_eq!(alpha, 255);

        let (r, g, b) = decode_triple(command.vertices[base + 4]);
        assert_eq!((r, g, b), (255, 0, 0));
    }
}

#[test]
fn draw_disappears_when_the_last_particle_dies() {
    let mut emitter = emitter_with(EmitterSettings {
        life_span: 0.1,
        ..Default::default()
    });
    let camera = CameraFrame::identity();
    let instance = ModelInstance::default();

    emitter.emit(&instance);
    assert!(
        emitter
            .update(0.05, &instance, &camera)
            .unwrap()
            .is_some()
    );
    assert!(
        emitter
            .update(0.05, &instance, &camera)
            .unwrap()
            .is_none()
    );
    assert_eq!(emitter.alive_count(), 0);
}
