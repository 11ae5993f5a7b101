use super::*;
use crate::foundation::core::{Rect, Size, Vec2};
use crate::frames::{BaseBox, Crop, FrameDelta, Frames};

fn two_frames() -> Frames {
    let mut f = Frames::new("walk", BaseBox::new(0.0, 0.0, 20.0, 10.0));
    f.frame_deltas.push(FrameDelta::new(Vec2::new(20.0, 0.0)));
    f
}

#[test]
fn crop_bands_cover_exactly_the_cropped_area() {
    let b = Rect::new(0.0, 0.0, 20.0, 10.0);
    let crop = Crop {
        top: 1.0,
        right: 2.0,
        bottom: 3.0,
        left: 4.0,
    };
    let bands = crop_bands(b, &crop);
    assert_eq!(
        bands,
        vec![
            Rect::new(0.0, 0.0, 20.0, 1.0),
            Rect::new(0.0, 7.0, 20.0, 10.0),
            Rect::new(0.0, 1.0, 4.0, 7.0),
            Rect::new(18.0, 1.0, 20.0, 7.0),
        ]
    );
    let area: f64 = bands.iter().map(|r| r.area()).sum();
    assert_eq!(area, 200.0 - 14.0 * 6.0);

    assert!(crop_bands(b, &Crop::ZERO).is_empty());
}

#[test]
fn outlines_highlight_selected_and_overlay_crop() {
    let palette = Palette::default();
    let mut f = two_frames();
    let plain = frame_outlines(&f, Some(1), 10.0, &palette);
    assert_eq!(plain.len(), 2);
    assert_eq!(
        plain[0],
        DrawCmd::Stroke {
            rect: Rect::new(8.0, 8.0, 32.0, 22.0),
            width: 2.0,
            color: palette.outline,
        }
    );
    assert!(matches!(plain[1], DrawCmd::Stroke { color, .. } if color == palette.selected));

    f.frame_deltas[0].crop.left = 5.0;
    let cropped = frame_outlines(&f, None, 0.0, &palette);
    // Dimmed outer box, one overlay band, inner visible box, then frame 1.
    assert_eq!(cropped.len(), 4);
    assert!(matches!(cropped[0], DrawCmd::Stroke { color, .. } if color == palette.outline_dimmed));
    assert_eq!(
        cropped[1],
        DrawCmd::Fill {
            rect: Rect::new(0.0, 0.0, 5.0, 10.0),
            color: palette.crop_overlay,
        }
    );
    assert_eq!(
        cropped[2],
        DrawCmd::Stroke {
            rect: Rect::new(5.0, 0.0, 20.0, 10.0),
            width: 1.0,
            color: palette.outline,
        }
    );
}

#[test]
fn outlines_mark_middle_point_of_selected_frame() {
    let palette = Palette::default();
    let mut f = two_frames();
    f.base_box.middle_point = Some(crate::foundation::core::Point::new(4.0, 5.0));
    let cmds = frame_outlines(&f, Some(1), 0.0, &palette);
    assert_eq!(
        cmds.last(),
        Some(&DrawCmd::Fill {
            rect: Rect::new(22.5, 3.5, 25.5, 6.5),
            color: palette.middle_point,
        })
    );
    assert_eq!(frame_outlines(&f, None, 0.0, &palette).len(), 2);
}

#[test]
fn fit_preview_letterboxes_wide_frames() {
    let f = two_frames();
    let blit = fit_preview(&f, 1, Size::new(100.0, 100.0)).unwrap();
    assert_eq!(blit.src, Rect::new(20.0, 0.0, 40.0, 10.0));
    assert_eq!(blit.dst, Rect::new(0.0, 25.0, 100.0, 75.0));
}

#[test]
fn fit_preview_pillarboxes_tall_frames_and_uses_left_crop() {
    let mut f = Frames::new("idle", BaseBox::new(10.0, 10.0, 40.0, 40.0));
    f.frame_deltas[0].crop = Crop {
        top: 0.0,
        right: 5.0,
        bottom: 0.0,
        left: 15.0,
    };
    let blit = fit_preview(&f, 0, Size::new(100.0, 80.0)).unwrap();
    assert_eq!(blit.src, Rect::new(25.0, 10.0, 45.0, 50.0));
    assert_eq!(blit.dst, Rect::new(30.0, 0.0, 70.0, 80.0));

    assert!(fit_preview(&f, 3, Size::new(100.0, 80.0)).is_none());
    assert!(fit_preview(&f, 0, Size::ZERO).is_none());
}

#[test]
fn frame_preview_paints_background_then_frame() {
    let f = two_frames();
    let list = frame_preview(&f, 0, Size::new(40.0, 40.0), &Palette::default());
    assert_eq!(list.size, Size::new(40.0, 40.0));
    assert_eq!(list.cmds.len(), 2);
    assert!(matches!(
        list.cmds[1],
        DrawCmd::Sprite { dst, .. } if dst == Rect::new(0.0, 10.0, 40.0, 30.0)
    ));
}

#[test]
fn backdrop_and_blank_canvas_sizes() {
    let palette = Palette::default();
    let list = sprite_backdrop(Size::new(64.0, 32.0), 10.0, &palette);
    assert_eq!(list.size, Size::new(84.0, 52.0));
    assert_eq!(
        list.cmds[1],
        DrawCmd::Sprite {
            src: Rect::new(0.0, 0.0, 64.0, 32.0),
            dst: Rect::new(10.0, 10.0, 74.0, 42.0),
        }
    );
    let blank = blank_canvas(Size::new(320.0, 160.0), 10.0, &palette);
    assert_eq!(blank.cmds.len(), 2);
    assert_eq!(base_box_outline(&two_frames(), 0.0, &palette).len(), 1);
}
