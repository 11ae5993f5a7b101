use super::*;
use crate::foundation::core::{Point, Rect, Size, Vec2};

/// Three 32x32 frames side by side starting at (100, 100).
fn row() -> Frames {
    let mut f = Frames::new("jump", BaseBox::new(100.0, 100.0, 32.0, 32.0));
    f.frame_deltas = vec![
        FrameDelta::default(),
        FrameDelta::new(Vec2::new(40.0, 0.0)),
        FrameDelta::new(Vec2::new(40.0, 0.0)),
    ];
    f
}

fn visible(f: &Frames) -> Vec<Rect> {
    (0..f.len()).map(|i| f.visible_rect(i).unwrap()).collect()
}

fn assert_invariants(f: &Frames, core: f64) {
    for d in &f.frame_deltas {
        assert!(d.crop.horizontal() + core <= f.base_box.width + 1e-9);
        assert!(d.crop.vertical() + core <= f.base_box.height + 1e-9);
        for side in Side::ALL {
            assert!(d.crop.get(side) >= 0.0);
        }
    }
}

#[test]
fn growing_right_edge_expands_base_and_crops_others() {
    let mut f = row();
    let before = visible(&f);
    assert!(f.resize_frame_border(Side::Right, 6.0, 1, &BorderLimits::default()));

    assert_eq!(f.base_box.width, 38.0);
    assert_eq!(f.frame_deltas[1].crop.right, 0.0);
    assert_eq!(f.frame_deltas[0].crop.right, 6.0);
    assert_eq!(f.frame_deltas[2].crop.right, 6.0);

    let after = visible(&f);
    assert_eq!(after[0], before[0]);
    assert_eq!(after[2], before[2]);
    assert_eq!(after[1], Rect::new(140.0, 100.0, 178.0, 132.0));
}

#[test]
fn growing_left_edge_moves_base_origin() {
    let mut f = row();
    f.base_box.middle_point = Some(Point::new(16.0, 16.0));
    let anchor_before = f.middle_point_at(0).unwrap();
    let before = visible(&f);

    assert!(f.resize_frame_border(Side::Left, -5.0, 2, &BorderLimits::default()));

    assert_eq!(f.base_box.left, 95.0);
    assert_eq!(f.base_box.width, 37.0);
    let after = visible(&f);
    assert_eq!(after[0], before[0]);
    assert_eq!(after[1], before[1]);
    assert_eq!(after[2].x0, before[2].x0 - 5.0);
    assert_eq!(f.middle_point_at(0).unwrap(), anchor_before);
}

#[test]
fn growing_first_consumes_own_crop() {
    let mut f = row();
    f.frame_deltas[0].crop.bottom = 10.0;
    assert!(f.resize_frame_border(Side::Bottom, 4.0, 0, &BorderLimits::default()));
    assert_eq!(f.frame_deltas[0].crop.bottom, 6.0);
    assert_eq!(f.base_box.height, 32.0);
}

#[test]
fn shrinking_crops_then_auto_trims() {
    let mut f = row();
    assert!(f.resize_frame_border(Side::Top, 3.0, 1, &BorderLimits::default()));
    // Only frame 1 is cropped, so the base box keeps its size.
    assert_eq!(f.frame_deltas[1].crop.top, 3.0);
    assert_eq!(f.base_box.height, 32.0);

    assert!(f.resize_frame_border(Side::Top, 5.0, 0, &BorderLimits::default()));
    assert!(f.resize_frame_border(Side::Top, 2.0, 2, &BorderLimits::default()));
    // Every frame now carries top crop, the smallest (2) is trimmed off the base box.
    assert_eq!(f.base_box.top, 102.0);
    assert_eq!(f.base_box.height, 30.0);
    let tops: Vec<f64> = f.frame_deltas.iter().map(|d| d.crop.top).collect();
    assert_eq!(tops, vec![3.0, 1.0, 0.0]);
    assert_invariants(&f, 4.0);
}

#[test]
fn single_frame_shrink_trims_base_immediately() {
    let mut f = Frames::new("one", BaseBox::new(0.0, 0.0, 32.0, 32.0));
    assert!(f.resize_frame_border(Side::Right, -10.0, 0, &BorderLimits::default()));
    assert_eq!(f.base_box.width, 22.0);
    assert_eq!(f.frame_deltas[0].crop, Crop::ZERO);
}

#[test]
fn shrink_never_collapses_visible_core() {
    let mut f = row();
    f.frame_deltas[1].crop.left = 20.0;
    f.resize_frame_border(Side::Right, -100.0, 1, &BorderLimits::default());
    assert_eq!(f.frame_deltas[1].crop.right, 8.0);
    assert_eq!(f.visible_rect(1).unwrap().width(), 4.0);
    assert_invariants(&f, 4.0);
}

#[test]
fn mixed_drag_sequences_keep_invariants() {
    let limits = BorderLimits::default();
    let moves = [-7.0, 12.0, -40.0, 3.0, 25.0, -1.0, -18.0, 9.0];
    for side in Side::ALL {
        for idx in 0..3 {
            let mut f = row();
            for (k, m) in moves.iter().enumerate() {
                let target = (idx + k) % 3;
                f.resize_frame_border(side, *m, target, &limits);
                assert_invariants(&f, limits.min_visible_core);
                if *m != 0.0 {
                    let any_zero = f.frame_deltas.iter().any(|d| d.crop.get(side) == 0.0);
                    assert!(any_zero, "side {side:?} frame {target} move {m}");
                }
            }
        }
    }
}

#[test]
fn growth_is_limited_by_sprite_bounds() {
    let limits = BorderLimits {
        sprite: Some(Size::new(200.0, 200.0)),
        ..BorderLimits::default()
    };
    let mut f = row();
    // Frame 2's box ends at x = 212, already past 200 + 5, so it cannot grow right.
    assert!(!f.resize_frame_border(Side::Right, 10.0, 2, &limits));
    assert_eq!(f.base_box.width, 32.0);

    // Frame 0 starts at x = 100 and may grow left to -5.
    f.resize_frame_border(Side::Left, -500.0, 0, &limits);
    assert_eq!(f.base_box.left, -5.0);
}

#[test]
fn growth_is_limited_by_max_box_side() {
    let limits = BorderLimits {
        max_box_side: 40.0,
        ..BorderLimits::default()
    };
    let mut f = row();
    f.resize_frame_border(Side::Bottom, 100.0, 0, &limits);
    assert_eq!(f.base_box.height, 40.0);
}

#[test]
fn multi_side_drag_applies_each_axis() {
    let mut f = row();
    let sides = Sides {
        right: true,
        bottom: true,
        ..Sides::NONE
    };
    assert!(f.resize_frame_borders(sides, Vec2::new(2.0, 3.0), 0, &BorderLimits::default()));
    assert_eq!(f.base_box.width, 34.0);
    assert_eq!(f.base_box.height, 35.0);
}

#[test]
fn out_of_range_index_or_zero_delta_is_a_no_op() {
    let mut f = row();
    let before = f.clone();
    assert!(!f.resize_frame_border(Side::Left, 3.0, 9, &BorderLimits::default()));
    assert!(!f.resize_frame_border(Side::Left, 0.0, 0, &BorderLimits::default()));
    assert_eq!(f, before);
}

#[test]
fn border_hit_reports_near_edges() {
    let r = Rect::new(10.0, 10.0, 30.0, 30.0);
    assert_eq!(border_hit(r, Point::new(20.0, 20.0), 2.0), Sides::NONE);
    assert_eq!(border_hit(r, Point::new(31.0, 20.0), 2.0), Sides::only(Side::Right));
    assert_eq!(
        border_hit(r, Point::new(9.0, 29.0), 2.0),
        Sides {
            left: true,
            bottom: true,
            ..Sides::NONE
        }
    );
    assert!(border_hit(r, Point::new(31.0, 50.0), 2.0).is_empty());
}
