use super::*;

#[derive(Clone, Copy, Debug)]
struct Flat(f64);

impl NoiseSource for Flat {
    fn noise2(&self, _x: f64, _y: f64) -> f64 {
        self.0
    }

    fn noise3(&self, _x: f64, _y: f64, _z: f64) -> f64 {
        self.0
    }
}

fn flat(v: f64) -> FieldNoise<Flat> {
    FieldNoise {
        warp: Flat(v),
        drift: Flat(v),
    }
}

fn small_cfg() -> FieldConfig {
    FieldConfig {
        num_paths: 3,
        num_waves: 3,
        wave_amplitude: 40.0,
        ..FieldConfig::default()
    }
}

const CANVAS: Canvas = Canvas {
    width: 800,
    height: 600,
};

#[test]
fn topology_counts() {
    let cfg = FieldConfig {
        num_paths: 7,
        num_waves: 5,
        ..FieldConfig::default()
    };
    let field = build_field(&cfg, &Palette::default(), CANVAS, &flat(0.0)).unwrap();
    assert_eq!(field.paths().len(), 7);
    for wave in field.paths() {
        assert_eq!(wave.points().len(), 4);
        // leading anchor + interior + two closing vertices
        assert_eq!(wave.path().segments().len(), 1 + 4 + 2);
        assert!(wave.path().is_closed());
        for (k, p) in wave.points().iter().enumerate() {
            assert_eq!(p.segment, k + 1);
        }
    }
}

#[test]
fn band_positions_are_monotonic_and_normalized() {
    let cfg = FieldConfig {
        num_paths: 9,
        num_waves: 4,
        ..FieldConfig::default()
    };
    let field = build_field(&cfg, &Palette::default(), CANVAS, &flat(0.0)).unwrap();
    let ts: Vec<f64> = field.paths().iter().map(WavePath::t).collect();
    assert_eq!(ts[0], 0.0);
    assert_eq!(ts[8], 1.0);
    for w in ts.windows(2) {
        assert!(w[0] < w[1]);
    }
    for t in ts {
        assert!((0.0..=1.0).contains(&t));
    }
}

#[test]
fn middle_band_offset_and_leading_vertex() {
    let field = build_field(&small_cfg(), &Palette::default(), CANVAS, &flat(0.0)).unwrap();
    let mid = &field.paths()[1];
    assert_eq!(mid.t(), 0.5);
    assert_eq!(mid.y_offset(), 300.0);
    assert_eq!(mid.path().segments()[0].point, Point::new(0.0, 340.0));
}

#[test]
fn interior_vertices_without_noise() {
    let field = build_field(&small_cfg(), &Palette::default(), CANVAS, &flat(0.0)).unwrap();
    let mid = &field.paths()[1];
    let pts = mid.points();
    // j = 1: s = 0.5, x = -500 + 1300 * 0.5 + 0.5 * 300; odd j swings up.
    assert_eq!(pts[0].x, 300.0);
    assert_eq!(pts[0].y_base, 260.0);
    // j = 2: s = 1, x = -500 + 1300 + 150; even j swings down.
    assert_eq!(pts[1].x, 950.0);
    assert_eq!(pts[1].y_base, 340.0);
    for p in pts {
        assert_eq!(mid.path().segments()[p.segment].point, Point::new(p.x, p.y_base));
    }
}

#[test]
fn live_vertices_carry_frame_zero_noise_but_baseline_does_not() {
    let cfg = small_cfg();
    let field = build_field(&cfg, &Palette::default(), CANVAS, &flat(0.5)).unwrap();
    let mid = &field.paths()[1];
    for p in mid.points() {
        let live = mid.path().segments()[p.segment].point;
        assert_eq!(live.y, p.y_base + cfg.noise_factor * 0.5);
        assert_eq!(live.x, p.x);
    }
    // x warp: 200 * 0.5 on top of the noise-free layout.
    assert_eq!(mid.points()[0].x, 400.0);
}

#[test]
fn closing_vertices_are_off_canvas() {
    let field = build_field(&small_cfg(), &Palette::default(), CANVAS, &flat(0.0)).unwrap();
    for wave in field.paths() {
        let segs = wave.path().segments();
        let n = segs.len();
        assert_eq!(segs[n - 2].point, Point::new(2000.0, 2000.0));
        assert_eq!(segs[n - 1].point, Point::new(-2000.0, 2000.0));
    }
}

#[test]
fn paint_follows_band_position() {
    let field = build_field(&small_cfg(), &Palette::default(), CANVAS, &flat(0.0)).unwrap();
    let first = &field.paths()[0];
    let last = &field.paths()[2];
    assert_eq!(first.stroke().to_hex(), "#ff4466");
    assert_eq!(first.fill().to_hex(), "#112244");
    assert_eq!(last.stroke().to_hex(), "#4466ff");
    assert_eq!(last.fill().to_hex(), "#000000");
    assert!((first.stroke_width() - 0.1).abs() < 1e-12);
    assert!((last.stroke_width() - (0.1 + 4.0 * 1.0f64.sin())).abs() < 1e-12);
}

#[test]
fn same_seed_same_field() {
    let cfg = FieldConfig {
        num_paths: 20,
        ..FieldConfig::default()
    };
    let a = build_field(&cfg, &Palette::default(), CANVAS, &FieldNoise::seeded(99)).unwrap();
    let b = build_field(&cfg, &Palette::default(), CANVAS, &FieldNoise::seeded(99)).unwrap();
    for (pa, pb) in a.paths().iter().zip(b.paths()) {
        assert_eq!(pa.path(), pb.path());
        assert_eq!(pa.points(), pb.points());
    }

    let c = build_field(&cfg, &Palette::default(), CANVAS, &FieldNoise::seeded(100)).unwrap();
    assert!(
        a.paths()
            .iter()
            .zip(c.paths())
            .any(|(pa, pc)| pa.points() != pc.points())
    );
}

#[test]
fn rejects_single_path_or_wave() {
    let cfg = FieldConfig {
        num_paths: 1,
        ..small_cfg()
    };
    assert!(build_field(&cfg, &Palette::default(), CANVAS, &flat(0.0)).is_err());
    let cfg = FieldConfig {
        num_waves: 1,
        ..small_cfg()
    };
    assert!(build_field(&cfg, &Palette::default(), CANVAS, &flat(0.0)).is_err());
    let empty = Canvas {
        width: 0,
        height: 600,
    };
    assert!(build_field(&small_cfg(), &Palette::default(), empty, &flat(0.0)).is_err());
}
