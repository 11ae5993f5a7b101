use super::*;
use crate::foundation::core::{Point, Rect, Size, Vec2};

fn strip(shifts: &[(f64, f64)]) -> Frames {
    let mut f = Frames::new("walk", BaseBox::new(0.0, 0.0, 32.0, 32.0));
    f.frame_deltas = shifts
        .iter()
        .map(|&(x, y)| FrameDelta::new(Vec2::new(x, y)))
        .collect();
    f
}

#[test]
fn absolute_position_chains_deltas() {
    let mut f = strip(&[(5.0, 1.0), (32.0, 0.0), (32.0, -2.0), (10.0, 10.0)]);
    f.base_box.left = 3.0;
    f.base_box.top = 4.0;

    let mut prev = f.base_box.position();
    for i in 0..f.len() {
        let p = f.absolute_position(i);
        assert_eq!(p, prev + f.frame_deltas[i].shift());
        prev = p;
    }
    assert_eq!(f.absolute_position(3), Point::new(82.0, 13.0));
}

#[test]
fn new_frames_start_with_one_zero_delta() {
    let f = Frames::new("idle", BaseBox::new(7.0, 9.0, 16.0, 16.0));
    assert_eq!(f.len(), 1);
    assert_eq!(f.absolute_position(0), Point::new(7.0, 9.0));
    assert_eq!(f.frame_box(0), Rect::new(7.0, 9.0, 23.0, 25.0));
}

#[test]
fn visible_rect_subtracts_crop() {
    let mut f = strip(&[(0.0, 0.0)]);
    f.frame_deltas[0].crop = Crop {
        top: 1.0,
        right: 2.0,
        bottom: 3.0,
        left: 4.0,
    };
    assert_eq!(f.visible_rect(0), Some(Rect::new(4.0, 1.0, 30.0, 29.0)));
    assert_eq!(f.visible_rect(1), None);
}

#[test]
fn find_frame_at_prefers_last_match() {
    let f = strip(&[(0.0, 0.0), (16.0, 0.0)]);
    // Both frames cover x in [16, 32]; the later one wins.
    assert_eq!(f.find_frame_at(Point::new(20.0, 5.0)), Some(1));
    assert_eq!(f.find_frame_at(Point::new(5.0, 5.0)), Some(0));
    assert_eq!(f.find_frame_at(Point::new(40.0, 5.0)), Some(1));
    assert_eq!(f.find_frame_at(Point::new(100.0, 5.0)), None);
}

#[test]
fn find_frame_at_ignores_cropped_region() {
    let mut f = strip(&[(0.0, 0.0), (16.0, 0.0)]);
    f.frame_deltas[1].crop.left = 10.0;
    // Frame 1's visible part starts at x = 26, so x = 20 only hits frame 0.
    assert_eq!(f.find_frame_at(Point::new(20.0, 5.0)), Some(0));
    assert_eq!(f.find_frame_at(Point::new(27.0, 5.0)), Some(1));
}

#[test]
fn nudge_keeps_later_frames_in_place() {
    let mut f = strip(&[(32.0, 0.0), (32.0, 0.0), (32.0, 0.0)]);
    let after = f.absolute_position(2);
    assert!(f.nudge_frame(1, Vec2::new(1.0, 0.0)));
    assert_eq!(f.frame_deltas[1].x_shift, 33.0);
    assert_eq!(f.frame_deltas[2].x_shift, 31.0);
    assert_eq!(f.absolute_position(2), after);
    assert_eq!(f.absolute_position(1), Point::new(65.0, 0.0));

    // The last frame has no successor to compensate.
    assert!(f.nudge_frame(2, Vec2::new(0.0, -1.0)));
    assert_eq!(f.absolute_position(2), Point::new(96.0, -1.0));
    assert!(!f.nudge_frame(3, Vec2::new(1.0, 0.0)));
}

#[test]
fn truncate_keeps_at_least_one_frame() {
    let mut f = strip(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.0, 0.0)]);
    assert_eq!(f.truncate_from(2), 2);
    assert_eq!(f.len(), 2);
    assert_eq!(f.truncate_from(0), 1);
    assert_eq!(f.len(), 1);
    assert_eq!(f.truncate_from(0), 0);
}

#[test]
fn middle_point_is_relative_to_frame_origin() {
    let mut f = strip(&[(10.0, 0.0), (32.0, 8.0)]);
    f.set_middle_point(1, Point::new(50.0, 20.0));
    assert_eq!(f.base_box.middle_point, Some(Point::new(8.0, 12.0)));
    assert_eq!(f.middle_point_at(0), Some(Point::new(18.0, 12.0)));
}

#[test]
fn dimension_input_ignores_small_and_clamps_large() {
    let mut b = BaseBox::new(0.0, 0.0, 32.0, 32.0);
    assert_eq!(b.set_dimension(Dimension::Width, 7.0, 8.0, 10_000.0), InputOutcome::Ignored);
    assert_eq!(b.width, 32.0);
    assert_eq!(b.set_dimension(Dimension::Width, f64::NAN, 8.0, 10_000.0), InputOutcome::Ignored);
    assert_eq!(b.set_dimension(Dimension::Height, 48.0, 8.0, 10_000.0), InputOutcome::Applied);
    assert_eq!(b.height, 48.0);
    assert_eq!(
        b.set_dimension(Dimension::Width, 20_000.0, 8.0, 10_000.0),
        InputOutcome::Clamped(10_000.0)
    );
    assert_eq!(b.width, 10_000.0);
}

#[test]
fn move_within_clamps_to_sprite_with_tolerance() {
    let sprite = Size::new(100.0, 80.0);
    let mut b = BaseBox::new(10.0, 10.0, 32.0, 32.0);
    b.move_within(Vec2::new(-50.0, -50.0), sprite, 5.0);
    assert_eq!(b.position(), Point::new(0.0, 0.0));
    b.move_within(Vec2::new(500.0, 500.0), sprite, 5.0);
    assert_eq!(b.position(), Point::new(73.0, 53.0));
}

#[test]
fn hit_test_distinguishes_inside_band_and_outside() {
    let b = BaseBox::new(10.0, 10.0, 20.0, 20.0);
    assert_eq!(b.hit_test(Point::new(15.0, 15.0), 4.0), BoxHit::Inside);
    assert_eq!(
        b.hit_test(Point::new(32.0, 15.0), 4.0),
        BoxHit::Border(Sides::only(Side::Right))
    );
    assert_eq!(
        b.hit_test(Point::new(8.0, 7.0), 4.0),
        BoxHit::Border(Sides {
            top: true,
            left: true,
            ..Sides::NONE
        })
    );
    assert_eq!(b.hit_test(Point::new(40.0, 15.0), 4.0), BoxHit::Outside);
}

#[test]
fn resize_sides_respects_min_and_sprite_bounds() {
    let sprite = Size::new(100.0, 100.0);
    let mut b = BaseBox::new(10.0, 10.0, 20.0, 20.0);
    b.resize_sides(Sides::only(Side::Left), Vec2::new(-30.0, 0.0), sprite, 5.0, 8.0, 10_000.0);
    assert_eq!((b.left, b.width), (0.0, 30.0));

    b.resize_sides(Sides::only(Side::Right), Vec2::new(-100.0, 0.0), sprite, 5.0, 8.0, 10_000.0);
    assert_eq!(b.width, 8.0);

    b.resize_sides(Sides::only(Side::Bottom), Vec2::new(0.0, 500.0), sprite, 5.0, 8.0, 10_000.0);
    assert_eq!(b.top + b.height, 105.0);

    b.resize_sides(Sides::only(Side::Top), Vec2::new(0.0, 200.0), sprite, 5.0, 8.0, 10_000.0);
    assert_eq!(b.height, 8.0);
    assert_eq!(b.top, 97.0);
}

#[test]
fn frames_serialize_with_camel_case_keys() {
    let f = strip(&[(32.0, 0.0)]);
    let json = serde_json::to_string(&f).unwrap();
    assert!(json.contains("\"animationName\""));
    assert!(json.contains("\"frameDeltas\""));
    assert!(json.contains("\"xShift\""));
    assert!(!json.contains("middlePoint"));
    let back: Frames = serde_json::from_str(&json).unwrap();
    assert_eq!(back, f);
}
