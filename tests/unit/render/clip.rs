use super::*;

/// Per-offset reference: skip while out of range on the low side, stop on the high side.
fn reference_span(count: i32, src: i32, src_len: i32, dst: i32, dst_len: i32) -> Vec<usize> {
    let mut out = Vec::new();
    for i in 0..count {
        let s = src + i;
        if s < 0 {
            continue;
        }
        if s >= src_len {
            break;
        }
        let d = dst + i;
        if d < 0 {
            continue;
        }
        if d >= dst_len {
            break;
        }
        out.push(i as usize);
    }
    out
}

#[test]
fn span_matches_per_offset_loop() {
    for count in [-2, 0, 1, 4, 10] {
        for src in -6..8 {
            for dst in -6..8 {
                let got: Vec<usize> = clip_span(count, src, 5, dst, 7).collect();
                assert_eq!(
                    got,
                    reference_span(count, src, 5, dst, 7),
                    "count={count} src={src} dst={dst}"
                );
            }
        }
    }
}

#[test]
fn span_handles_extreme_offsets() {
    assert!(clip_span(10, i32::MIN, 5, 0, 5).is_empty());
    assert!(clip_span(10, 0, 5, i32::MAX, 5).is_empty());
    assert_eq!(clip_span(i32::MAX, 0, 3, 0, 4), 0..3);
}

#[test]
fn spans_for_full_copy() {
    let spans = CopySpans::new(
        Rectangle::new(0, 0, 2, 2),
        Size::new(2, 2),
        Point::ZERO,
        Size::new(3, 3),
    );
    let rows: Vec<_> = spans.rows().collect();
    assert_eq!(rows, vec![(0..2, 0..2), (2..4, 3..5)]);
    assert_eq!(spans.pixel_count(), 4);
}

#[test]
fn spans_clip_negative_destination() {
    let spans = CopySpans::new(
        Rectangle::new(0, 0, 10, 10),
        Size::new(10, 10),
        Point::new(-3, -3),
        Size::new(5, 5),
    );
    let rows: Vec<_> = spans.rows().collect();
    assert_eq!(rows.len(), 5);
    assert_eq!(rows[0], (33..38, 0..5));
    assert_eq!(rows[4], (73..78, 20..25));
}

#[test]
fn spans_empty_when_fully_outside() {
    let spans = CopySpans::new(
        Rectangle::new(0, 0, 4, 4),
        Size::new(4, 4),
        Point::new(9, 0),
        Size::new(5, 5),
    );
    assert!(spans.is_empty());
    assert_eq!(spans.rows().count(), 0);
}
