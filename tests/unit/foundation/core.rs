use super::*;

#[test]
fn blend_over_respects_extreme_alphas() {
    let dst = [10, 20, 30, 255];
    assert_eq!(Rgba8::transparent().blend_over(dst), dst);
    assert_eq!(Rgba8::opaque(1, 2, 3).blend_over(dst), [1, 2, 3, 255]);
}

#[test]
fn blend_over_half_alpha_mixes_channels() {
    let out = Rgba8::new(255, 0, 0, 128).blend_over([0, 0, 255, 255]);
    assert_eq!(out[3], 255);
    assert!((127..=129).contains(&out[0]));
    assert!((126..=128).contains(&out[2]));
    assert_eq!(out[1], 0);
}

#[test]
fn blend_over_transparent_destination_keeps_source_color() {
    let out = Rgba8::new(200, 100, 50, 64).blend_over([0, 0, 0, 0]);
    assert_eq!(out, [200, 100, 50, 64]);
}

#[test]
fn inclusive_containment_includes_far_edges() {
    let r = Rect::new(0.0, 0.0, 10.0, 10.0);
    assert!(contains_inclusive(r, Point::new(10.0, 10.0)));
    assert!(contains_inclusive(r, Point::new(0.0, 5.0)));
    assert!(!contains_inclusive(r, Point::new(10.5, 5.0)));
    assert!(!r.contains(Point::new(10.0, 10.0)));
}
