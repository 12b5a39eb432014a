use super::*;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn thresholds_run_one_through_seven() {
    let thresholds: Vec<usize> = BEAMS.iter().map(|b| b.threshold).collect();
    assert_eq!(thresholds, [1, 2, 3, 4, 5, 6, 7]);
    assert_eq!(BEAMS[0].from, Anchor::UserInterface);
    assert_eq!(BEAMS[4].from, Anchor::Stage(Stage::TestConfig));
    assert_eq!(BEAMS[5].to, Anchor::Stage(Stage::PlaywrightMCP));
}

#[test]
fn beams_latch_on_at_their_threshold() {
    for (i, spec) in BEAMS.iter().enumerate() {
        for step in 0..=8 {
            assert_eq!(spec.is_active(step), step >= spec.threshold, "beam {i} at step {step}");
        }
    }
    assert_eq!(active_beams(0).count(), 0);
    assert_eq!(active_beams(4).count(), 4);
    assert_eq!(active_beams(8).count(), BEAMS.len());
}

#[test]
fn straight_path_between_centers() {
    let container = Rect::new(100.0, 50.0, 800.0, 400.0);
    let from = Rect::new(120.0, 70.0, 100.0, 60.0);
    let to = Rect::new(520.0, 70.0, 100.0, 60.0);

    let path = compute_path(container, from, to, &BeamOptions::default());
    assert!(close(path.start.x, 70.0) && close(path.start.y, 50.0));
    assert!(close(path.end.x, 470.0) && close(path.end.y, 50.0));
    assert!(close(path.control.x, 270.0) && close(path.control.y, 50.0));
    assert_eq!(path.to_svg_d(), "M 70,50 Q 270,50 470,50");
    assert!(close(path.width, 800.0));
}

#[test]
fn curvature_raises_the_control_point() {
    let container = Rect::new(0.0, 0.0, 500.0, 300.0);
    let from = Rect::new(0.0, 100.0, 20.0, 20.0);
    let to = Rect::new(200.0, 200.0, 20.0, 20.0);
    let opts = BeamOptions { curvature: 40.0, ..BeamOptions::default() };

    let path = compute_path(container, from, to, &opts);
    assert_eq!(path.to_svg_d(), "M 10,110 Q 110,70 210,210");
}

#[test]
fn offsets_shift_endpoints() {
    let container = Rect::new(0.0, 0.0, 500.0, 300.0);
    let r = Rect::new(0.0, 0.0, 20.0, 20.0);
    let opts = BeamOptions {
        curvature: 0.0,
        start_offset: Point { x: 5.0, y: 0.0 },
        end_offset: Point { x: -5.0, y: 2.0 },
    };
    let path = compute_path(container, r, r, &opts);
    assert!(close(path.start.x, 15.0));
    assert!(close(path.end.x, 5.0));
    assert!(close(path.end.y, 12.0));
}

#[test]
fn geometry_cache_recomputes_only_on_change() {
    let mut geometry = BeamGeometry::default();
    assert!(geometry.cached().is_none());

    let container = Rect::new(0.0, 0.0, 400.0, 200.0);
    let from = Rect::new(0.0, 0.0, 20.0, 20.0);
    let to = Rect::new(100.0, 0.0, 20.0, 20.0);
    let opts = BeamOptions::default();

    let first = geometry.resolve(container, from, to, &opts);
    assert_eq!(geometry.cached(), Some(first));

    let moved = Rect::new(300.0, 0.0, 20.0, 20.0);
    let second = geometry.resolve(container, from, moved, &opts);
    assert_ne!(first, second);
    assert_eq!(second, compute_path(container, from, moved, &opts));
    assert_eq!(geometry.cached(), Some(second));
}
