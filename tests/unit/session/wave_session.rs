use super::*;
use crate::encode::sink::InMemorySink;
use crate::foundation::core::{Canvas, Fps};

#[derive(Default)]
struct ProbeBackend {
    first_y: Vec<f64>,
}

impl RenderBackend for ProbeBackend {
    fn render_field(&mut self, field: &WaveField) -> WavefieldResult<FrameRGBA> {
        let wave = &field.paths()[0];
        let p = wave.points()[0];
        self.first_y.push(wave.path().segments()[p.segment].point.y);
        let c = field.canvas();
        Ok(FrameRGBA {
            width: c.width,
            height: c.height,
            data: vec![0; (c.width * c.height * 4) as usize],
            premultiplied: true,
        })
    }
}

fn small_scene(terminal: u64) -> SceneConfig {
    let mut cfg = SceneConfig::default();
    cfg.canvas = Canvas {
        width: 16,
        height: 8,
    };
    cfg.field.num_paths = 4;
    cfg.field.num_waves = 5;
    cfg.terminal_frame = terminal;
    cfg
}

#[test]
fn run_captures_every_frame_through_terminal_and_exports_once() {
    let mut sess = WaveSession::new(small_scene(5)).unwrap();
    let mut backend = ProbeBackend::default();
    let mut sink = InMemorySink::new();

    let stats = sess.run(&mut backend, &mut sink).unwrap();
    assert_eq!(
        stats,
        RenderStats {
            frames_rendered: 6,
            last_frame: 5,
        }
    );
    let idx: Vec<u64> = sink.frames().iter().map(|(i, _)| i.0).collect();
    assert_eq!(idx, vec![0, 1, 2, 3, 4, 5]);
    assert_eq!(sink.end_count(), 1);
    assert_eq!(sink.config().unwrap().fps, Fps::new(60, 1).unwrap());
    assert_eq!(sess.clock().state(), ClockState::Stopped);

    assert!(sess.tick(&mut backend, &mut sink).is_err());
    assert_eq!(sink.end_count(), 1);
    assert_eq!(backend.first_y.len(), 6);
}

#[test]
fn tick_walks_the_state_machine() {
    let mut sess = WaveSession::new(small_scene(1)).unwrap();
    let mut backend = ProbeBackend::default();
    let mut sink = InMemorySink::new();

    assert_eq!(sess.clock().state(), ClockState::NotStarted);
    assert_eq!(
        sess.tick(&mut backend, &mut sink).unwrap(),
        ClockState::Running
    );
    assert_eq!(sess.clock().frame(), FrameIndex(1));
    assert_eq!(sink.end_count(), 0);
    assert_eq!(
        sess.tick(&mut backend, &mut sink).unwrap(),
        ClockState::Stopped
    );
    assert_eq!(sink.end_count(), 1);
    assert_eq!(sink.frames().len(), 2);
}

#[test]
fn ticks_animate_the_field() {
    let mut sess = WaveSession::new(small_scene(60)).unwrap();
    let mut backend = ProbeBackend::default();
    let mut sink = InMemorySink::new();
    sess.run(&mut backend, &mut sink).unwrap();

    let first = backend.first_y[0];
    assert!(backend.first_y.iter().any(|&y| y != first));
    let base = sess.field().paths()[0].points()[0].y_base;
    for y in &backend.first_y {
        assert!((y - base).abs() <= sess.config().field.noise_factor);
    }
}

#[test]
fn same_seed_sessions_agree_and_seek_matches_ticks() {
    let mut a = WaveSession::new(small_scene(10)).unwrap();
    let mut b = WaveSession::new(small_scene(10)).unwrap();
    let mut backend_a = ProbeBackend::default();
    let mut backend_b = ProbeBackend::default();
    a.run(&mut backend_a, &mut InMemorySink::new()).unwrap();
    for f in 0..=10 {
        b.render_frame(FrameIndex(f), &mut backend_b).unwrap();
    }
    assert_eq!(backend_a.first_y, backend_b.first_y);
    assert_eq!(b.clock().state(), ClockState::NotStarted);
}

#[test]
fn invalid_config_fails_fast() {
    let mut cfg = small_scene(3);
    cfg.field.num_waves = 1;
    assert!(WaveSession::new(cfg).is_err());
}
