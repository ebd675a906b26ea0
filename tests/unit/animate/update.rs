use super::*;
use crate::field::build::build_field;
use crate::field::config::Palette;
use crate::foundation::core::{Canvas, Point};
use crate::noise::{FieldNoise, Simplex};

struct Zero;

impl NoiseSource for Zero {
    fn noise2(&self, _x: f64, _y: f64) -> f64 {
        0.0
    }

    fn noise3(&self, _x: f64, _y: f64, _z: f64) -> f64 {
        0.0
    }
}

#[derive(Default)]
struct Recorder {
    writes: Vec<(usize, f64)>,
}

impl VertexAccess for Recorder {
    fn vertex_count(&self) -> usize {
        usize::MAX
    }

    fn vertex(&self, _index: usize) -> Option<Point> {
        None
    }

    fn set_vertex_y(&mut self, index: usize, y: f64) -> WavefieldResult<()> {
        self.writes.push((index, y));
        Ok(())
    }
}

fn cfg() -> FieldConfig {
    FieldConfig {
        num_paths: 12,
        num_waves: 8,
        ..FieldConfig::default()
    }
}

fn seeded_field(seed: u64) -> (WaveField, FieldNoise) {
    let noise = FieldNoise::seeded(seed);
    let canvas = Canvas {
        width: 640,
        height: 360,
    };
    let field = build_field(&cfg(), &Palette::default(), canvas, &noise).unwrap();
    (field, noise)
}

fn interior_points(field: &WaveField) -> Vec<Point> {
    field
        .paths()
        .iter()
        .flat_map(|w| w.points().iter().map(|p| w.path().segments()[p.segment].point))
        .collect()
}

#[test]
fn zero_noise_frame_zero_restores_baseline() {
    let (mut field, _) = seeded_field(5);
    apply_frame(&mut field, FrameIndex(0), &Zero, &cfg()).unwrap();
    for wave in field.paths() {
        for p in wave.points() {
            assert_eq!(wave.path().segments()[p.segment].point.y, p.y_base);
        }
    }
}

#[test]
fn x_never_changes() {
    let (mut field, noise) = seeded_field(5);
    let before: Vec<f64> = interior_points(&field).iter().map(|p| p.x).collect();
    for f in [0u64, 1, 2, 90, 360, 10_000] {
        apply_frame(&mut field, FrameIndex(f), &noise.drift, &cfg()).unwrap();
        let after: Vec<f64> = interior_points(&field).iter().map(|p| p.x).collect();
        assert_eq!(before, after);
    }
}

#[test]
fn same_frame_is_idempotent() {
    let (mut field, noise) = seeded_field(8);
    apply_frame(&mut field, FrameIndex(42), &noise.drift, &cfg()).unwrap();
    let once = interior_points(&field);
    apply_frame(&mut field, FrameIndex(42), &noise.drift, &cfg()).unwrap();
    assert_eq!(once, interior_points(&field));

    // Visiting other frames in between does not matter either.
    apply_frame(&mut field, FrameIndex(7), &noise.drift, &cfg()).unwrap();
    apply_frame(&mut field, FrameIndex(42), &noise.drift, &cfg()).unwrap();
    assert_eq!(once, interior_points(&field));
}

#[test]
fn perturbation_is_bounded() {
    let (mut field, noise) = seeded_field(13);
    let factor = cfg().noise_factor;
    for f in (0..400).step_by(37) {
        apply_frame(&mut field, FrameIndex(f), &noise.drift, &cfg()).unwrap();
        for wave in field.paths() {
            for p in wave.points() {
                let y = wave.path().segments()[p.segment].point.y;
                assert!((y - p.y_base).abs() <= factor * 1.0);
            }
        }
    }
}

#[test]
fn frames_move_vertices() {
    let (mut field, noise) = seeded_field(21);
    apply_frame(&mut field, FrameIndex(0), &noise.drift, &cfg()).unwrap();
    let a = interior_points(&field);
    apply_frame(&mut field, FrameIndex(120), &noise.drift, &cfg()).unwrap();
    let b = interior_points(&field);
    assert_ne!(a, b);
}

#[test]
fn anchor_and_closing_vertices_are_untouched() {
    let (mut field, noise) = seeded_field(3);
    let ends = |field: &WaveField| -> Vec<Point> {
        field
            .paths()
            .iter()
            .flat_map(|w| {
                let segs = w.path().segments();
                let n = segs.len();
                [segs[0].point, segs[n - 2].point, segs[n - 1].point]
            })
            .collect()
    };
    let before = ends(&field);
    for f in [1u64, 50, 360] {
        apply_frame(&mut field, FrameIndex(f), &noise.drift, &cfg()).unwrap();
    }
    assert_eq!(before, ends(&field));
}

#[test]
fn writes_go_through_vertex_access_by_segment() {
    let points = [
        ControlPoint {
            x: 10.0,
            y_base: 100.0,
            segment: 1,
        },
        ControlPoint {
            x: 20.0,
            y_base: 200.0,
            segment: 2,
        },
    ];
    let drift = Simplex::new(4);
    let mut rec = Recorder::default();
    animate_path(&mut rec, &points, FrameIndex(9), &drift, 20.0, 100.0).unwrap();

    assert_eq!(rec.writes.len(), 2);
    assert_eq!(rec.writes[0].0, 1);
    assert_eq!(rec.writes[1].0, 2);
    let expected = 100.0 + 20.0 * drift.noise3(0.1, 1.0, 0.09);
    assert_eq!(rec.writes[0].1, expected);
    assert_eq!(
        rec.writes[0].1,
        live_y(&points[0], FrameIndex(9), &drift, 20.0, 100.0)
    );
}
