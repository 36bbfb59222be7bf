use egui::Pos2;
use trace_label::{DragButton, SegmentEngine, SegmentSpan};

fn trajectory(len: usize) -> Vec<Pos2> {
    (0..len).map(|i| Pos2::new(i as f32, i as f32)).collect()
}

fn loaded_engine(len: usize, target_len: usize, saved: Option<&[Vec<usize>]>) -> SegmentEngine {
    let mut engine = SegmentEngine::default();
    engine.load(trajectory(len), target_len, saved);
    engine
}

// position fraction -> track coordinate
fn at(engine: &SegmentEngine, fraction: f64) -> f64 {
    fraction * engine.extent()
}

#[test]
fn test_drag_scenario_two_letters_ten_steps() {
    let mut engine = loaded_engine(10, 2, None);
    assert_eq!(
        engine.current_partition().spans(),
        [SegmentSpan::new(0, 3), SegmentSpan::new(6, 10)]
    );

    // grab segment 0's end marker (secondary button between the middle
    // markers) and drag it to 0.55: segment 1's start marker at 2/3 is
    // beyond it, so nothing gets pushed
    let x = at(&engine, 0.55);
    engine.pointer_down(x, DragButton::Secondary);
    assert_eq!(engine.active_marker(), Some(1));
    assert_eq!(
        engine.current_partition().spans(),
        [SegmentSpan::new(0, 5), SegmentSpan::new(6, 10)]
    );

    // dragging on to 0.70 crosses segment 1's start marker, which must be
    // pushed forward
    engine.pointer_move(at(&engine, 0.70));
    let spans = engine.current_partition().spans().to_vec();
    assert_eq!(spans[0], SegmentSpan::new(0, 7));
    assert!(spans[1].start >= spans[0].end);
    assert!(spans[1].start > 6, "segment 1's start must have been pushed");

    engine.pointer_up();
    assert_eq!(engine.active_marker(), None);
    // release never rolls positions back
    assert_eq!(engine.current_partition().spans()[0], SegmentSpan::new(0, 7));
}

#[test]
fn test_primary_button_grabs_the_start_marker() {
    let mut engine = loaded_engine(10, 2, None);
    // same coordinate as the secondary-button scenario, primary instead:
    // the straddling pair is (1, 2) and the even-indexed marker 2 —
    // segment 1's start — is selected
    engine.pointer_down(at(&engine, 0.55), DragButton::Primary);
    assert_eq!(engine.active_marker(), Some(2));
    assert_eq!(
        engine.current_partition().spans(),
        [SegmentSpan::new(0, 3), SegmentSpan::new(5, 10)]
    );
}

#[test]
fn test_click_beyond_the_edge_markers() {
    // restored layout keeps the outer markers away from the track edges
    let saved = vec![vec![2, 3], vec![5, 6]];
    let mut engine = loaded_engine(10, 2, Some(&saved));

    // beyond the last marker: the last marker is grabbed
    engine.pointer_down(at(&engine, 0.85), DragButton::Primary);
    assert_eq!(engine.active_marker(), Some(3));
    assert_eq!(engine.current_partition().spans()[1], SegmentSpan::new(5, 8));
    engine.pointer_up();

    // before the first marker: the first marker is grabbed
    engine.pointer_down(at(&engine, 0.15), DragButton::Secondary);
    assert_eq!(engine.active_marker(), Some(0));
    assert_eq!(
        engine.current_partition().spans()[0].start,
        1,
        "first marker follows the click"
    );
}

#[test]
fn test_click_outside_the_track_selects_nothing() {
    let mut engine = loaded_engine(10, 2, None);
    let before = engine.current_partition();

    // the default layout pins the outer markers to the track edges, so a
    // coordinate at or past an edge straddles nothing
    for x in [0.0, engine.extent(), engine.extent() + 50.0, -25.0] {
        engine.pointer_down(x, DragButton::Primary);
        assert_eq!(engine.active_marker(), None, "x = {x}");
    }
    // and moves without a selection are no-ops
    engine.pointer_move(at(&engine, 0.5));
    assert_eq!(engine.current_partition(), before);
}

#[test]
fn test_push_chain_keeps_every_marker_ordered() {
    let mut engine = loaded_engine(100, 4, None);
    // drag segment 0's end marker across the entire track
    engine.pointer_down(at(&engine, 0.2), DragButton::Secondary);
    assert_eq!(engine.active_marker(), Some(1));
    for step in 0..40 {
        engine.pointer_move(at(&engine, 0.2 + step as f64 * 0.02));
        let partition = engine.current_partition();
        assert!(partition.is_ordered(), "after step {step}");
        let markers = engine.marker_positions();
        assert!(
            markers.windows(2).all(|w| w[0] <= w[1]),
            "markers crossed after step {step}"
        );
        assert!(markers.iter().all(|&m| (0.0..=engine.extent()).contains(&m)));
    }
}

#[test]
fn test_moves_clamp_to_the_track() {
    let mut engine = loaded_engine(10, 2, None);
    engine.pointer_down(at(&engine, 0.55), DragButton::Secondary);

    engine.pointer_move(-4000.0);
    let markers = engine.marker_positions();
    assert_eq!(markers[1], 0.0);
    assert!(engine.current_partition().is_ordered());

    engine.pointer_move(engine.extent() * 10.0);
    let markers = engine.marker_positions();
    assert_eq!(markers[1], engine.extent());
    assert!(engine.current_partition().is_ordered());
}

#[test]
fn test_unloaded_engine_ignores_everything() {
    let mut engine = SegmentEngine::default();
    engine.pointer_down(500.0, DragButton::Primary);
    engine.pointer_move(700.0);
    engine.pointer_up();
    assert!(!engine.is_loaded());
    assert!(engine.current_partition().is_empty());
    assert!(engine.points().is_empty());
}

#[test]
fn test_degenerate_loads_leave_the_engine_unloaded() {
    let mut engine = SegmentEngine::default();
    engine.load(Vec::new(), 3, None);
    assert!(!engine.is_loaded());
    engine.load(trajectory(10), 0, None);
    assert!(!engine.is_loaded());
}

#[test]
fn test_loading_replaces_the_previous_board() {
    let mut engine = loaded_engine(10, 2, None);
    engine.pointer_down(at(&engine, 0.55), DragButton::Secondary);
    assert!(engine.active_marker().is_some());

    engine.load(trajectory(50), 3, None);
    assert_eq!(engine.active_marker(), None);
    assert_eq!(engine.target_len(), 3);
    assert_eq!(engine.points().len(), 50);
    assert_eq!(engine.current_partition().segment_count(), 3);
}
