use egui::Pos2;
use trace_label::{SegmentEngine, SegmentSpan};

fn trajectory(len: usize) -> Vec<Pos2> {
    (0..len).map(|i| Pos2::new(i as f32, i as f32)).collect()
}

fn loaded_engine(len: usize, target_len: usize, saved: Option<&[Vec<usize>]>) -> SegmentEngine {
    let mut engine = SegmentEngine::default();
    engine.load(trajectory(len), target_len, saved);
    engine
}

#[test]
fn test_default_layout_has_equal_segments_and_gaps() {
    let engine = loaded_engine(100, 3, None);
    let partition = engine.current_partition();
    let spans = partition.spans();

    assert_eq!(spans.len(), 3);
    assert_eq!(spans[0], SegmentSpan::new(0, 20));
    assert_eq!(spans[1], SegmentSpan::new(40, 60));
    assert_eq!(spans[2], SegmentSpan::new(80, 100));

    let widths: Vec<usize> = spans.iter().map(SegmentSpan::len).collect();
    assert!(widths.windows(2).all(|w| w[0] == w[1]));
    let gaps: Vec<usize> = spans.windows(2).map(|w| w[1].start - w[0].end).collect();
    assert!(gaps.windows(2).all(|w| w[0] == w[1]));
}

#[test]
fn test_default_layout_two_letters_over_ten_steps() {
    // cursor_range = 1/3: segment 0 covers positions [0, 1/3),
    // segment 1 covers [2/3, 1]
    let engine = loaded_engine(10, 2, None);
    let spans = engine.current_partition();
    assert_eq!(
        spans.spans(),
        [SegmentSpan::new(0, 3), SegmentSpan::new(6, 10)]
    );
}

#[test]
fn test_restore_round_trips_a_saved_partition() {
    let saved = vec![vec![0, 1, 2], vec![5, 6, 7, 8, 9]];
    let engine = loaded_engine(10, 2, Some(&saved));
    assert_eq!(engine.current_partition().index_lists(), saved);
}

#[test]
fn test_restore_round_trips_across_awkward_lengths() {
    // lengths that don't divide evenly stress the float path of the
    // position/index mapping
    for length in [7usize, 13, 97, 977] {
        let saved = vec![
            vec![1, 2],
            (length / 2..length / 2 + 3).collect(),
            vec![length - 1],
        ];
        let engine = loaded_engine(length, 3, Some(&saved));
        assert_eq!(
            engine.current_partition().index_lists(),
            saved,
            "length {length}"
        );
    }
}

#[test]
fn test_restore_collapses_empty_segment_at_midpoint() {
    // An empty saved segment restores as a marker pair collapsed at the
    // trajectory midpoint. Its index list stays empty, but the marker
    // positions are not where a zero-width pair elsewhere on the track
    // would have been — the one intentional non-round-trip case.
    let saved = vec![vec![0, 1], vec![], vec![7, 8]];
    let engine = loaded_engine(10, 3, Some(&saved));
    assert_eq!(engine.current_partition().index_lists(), saved);

    let markers = engine.marker_positions();
    let midpoint = 5.0 / 10.0 * engine.extent();
    assert_eq!(markers[2], midpoint);
    assert_eq!(markers[3], midpoint);
}

#[test]
fn test_segment_count_mismatch_falls_back_to_default() {
    let saved = vec![vec![0, 1], vec![4, 5]];
    let restored = loaded_engine(100, 3, Some(&saved));
    let fresh = loaded_engine(100, 3, None);
    // never a partial merge: the result is exactly the default layout
    assert_eq!(restored.current_partition(), fresh.current_partition());
    assert_eq!(
        restored.marker_positions(),
        fresh.marker_positions()
    );
}

#[test]
fn test_restore_repairs_out_of_order_input() {
    let saved = vec![vec![7, 8], vec![1, 2]];
    let engine = loaded_engine(10, 2, Some(&saved));
    let partition = engine.current_partition();
    assert!(partition.is_ordered());
    assert_eq!(partition.segment_count(), 2);
}

#[test]
fn test_single_letter_word() {
    let engine = loaded_engine(10, 1, None);
    // cursor_range = 1/(2·1−1) = 1: the single segment spans everything
    assert_eq!(engine.current_partition().spans(), [SegmentSpan::new(0, 10)]);
}

#[test]
fn test_single_point_trajectory() {
    let engine = loaded_engine(1, 2, None);
    let partition = engine.current_partition();
    assert!(partition.is_ordered());
    for span in partition.spans() {
        assert!(span.end <= 1);
    }
}
