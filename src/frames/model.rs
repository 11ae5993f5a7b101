use crate::foundation::core::{Point, Rect, Size, Vec2, contains_inclusive};
use crate::foundation::math::round_half_up;

/// One edge of a box.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Side {
    Top,
    Right,
    Bottom,
    Left,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::Top, Side::Right, Side::Bottom, Side::Left];

    pub fn opposite(self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Right => Self::Left,
            Self::Bottom => Self::Top,
            Self::Left => Self::Right,
        }
    }

    pub fn is_horizontal_axis(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }
}

/// Set of box edges, used for corner drags and resize cursors.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Sides {
    pub top: bool,
    pub right: bool,
    pub bottom: bool,
    pub left: bool,
}

impl Sides {
    pub const NONE: Sides = Sides {
        top: false,
        right: false,
        bottom: false,
        left: false,
    };

    pub fn only(side: Side) -> Self {
        let mut s = Self::NONE;
        s.insert(side);
        s
    }

    pub fn insert(&mut self, side: Side) {
        match side {
            Side::Top => self.top = true,
            Side::Right => self.right = true,
            Side::Bottom => self.bottom = true,
            Side::Left => self.left = true,
        }
    }

    pub fn contains(self, side: Side) -> bool {
        match side {
            Side::Top => self.top,
            Side::Right => self.right,
            Side::Bottom => self.bottom,
            Side::Left => self.left,
        }
    }

    pub fn is_empty(self) -> bool {
        !(self.top || self.right || self.bottom || self.left)
    }

    pub fn iter(self) -> impl Iterator<Item = Side> {
        Side::ALL.into_iter().filter(move |s| self.contains(*s))
    }
}

/// Pixel insets narrowing a frame's visible region.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Crop {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Crop {
    pub const ZERO: Crop = Crop {
        top: 0.0,
        right: 0.0,
        bottom: 0.0,
        left: 0.0,
    };

    pub fn get(&self, side: Side) -> f64 {
        match side {
            Side::Top => self.top,
            Side::Right => self.right,
            Side::Bottom => self.bottom,
            Side::Left => self.left,
        }
    }

    pub fn get_mut(&mut self, side: Side) -> &mut f64 {
        match side {
            Side::Top => &mut self.top,
            Side::Right => &mut self.right,
            Side::Bottom => &mut self.bottom,
            Side::Left => &mut self.left,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.top == 0.0 && self.right == 0.0 && self.bottom == 0.0 && self.left == 0.0
    }

    /// `left + right`.
    pub fn horizontal(&self) -> f64 {
        self.left + self.right
    }

    /// `top + bottom`.
    pub fn vertical(&self) -> f64 {
        self.top + self.bottom
    }
}

/// Which dimension a numeric box input edits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dimension {
    Width,
    Height,
}

/// Result of feeding a numeric input into the base box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputOutcome {
    /// Below the minimum or not a number; nothing changed.
    Ignored,
    Applied,
    /// Above the maximum; the clamped value was applied and should be written back.
    Clamped(f64),
}

/// Where a point lies relative to the base box during sizing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BoxHit {
    Inside,
    /// Just outside, within the resize band, beyond the given sides.
    Border(Sides),
    Outside,
}

/// Rectangle shared by every frame of one animation, in sprite pixels.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseBox {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
    /// Anchor relative to a frame's top-left corner.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub middle_point: Option<Point>,
}

impl BaseBox {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            top,
            left,
            width,
            height,
            middle_point: None,
        }
    }

    pub fn position(&self) -> Point {
        Point::new(self.left, self.top)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn rect(&self) -> Rect {
        Rect::from_origin_size(self.position(), self.size())
    }

    /// Extent across the axis a side belongs to.
    pub fn span(&self, side: Side) -> f64 {
        if side.is_horizontal_axis() {
            self.width
        } else {
            self.height
        }
    }

    /// Push one edge outward by `amount` (negative pulls it in).
    ///
    /// Moving the left or top edge moves every frame's origin, so the middle
    /// point is shifted to stay put in sprite space.
    pub fn grow(&mut self, side: Side, amount: f64) {
        match side {
            Side::Left => {
                self.left -= amount;
                self.width += amount;
                if let Some(mp) = self.middle_point.as_mut() {
                    mp.x += amount;
                }
            }
            Side::Top => {
                self.top -= amount;
                self.height += amount;
                if let Some(mp) = self.middle_point.as_mut() {
                    mp.y += amount;
                }
            }
            Side::Right => self.width += amount,
            Side::Bottom => self.height += amount,
        }
    }

    pub fn hit_test(&self, p: Point, band: f64) -> BoxHit {
        let r = self.rect();
        if contains_inclusive(r, p) {
            return BoxHit::Inside;
        }
        if !contains_inclusive(r.inflate(band, band), p) {
            return BoxHit::Outside;
        }
        BoxHit::Border(Sides {
            top: p.y < r.y0,
            right: p.x > r.x1,
            bottom: p.y > r.y1,
            left: p.x < r.x0,
        })
    }

    /// Numeric input: values under `min` are ignored, values over `max` clamped.
    pub fn set_dimension(
        &mut self,
        dim: Dimension,
        value: f64,
        min: f64,
        max: f64,
    ) -> InputOutcome {
        if !value.is_finite() || value < min {
            return InputOutcome::Ignored;
        }
        let (applied, outcome) = if value > max {
            (max, InputOutcome::Clamped(max))
        } else {
            (value, InputOutcome::Applied)
        };
        match dim {
            Dimension::Width => self.width = applied,
            Dimension::Height => self.height = applied,
        }
        outcome
    }

    /// Translate, then clamp so the box stays grabbable inside the sprite.
    pub fn move_within(&mut self, delta: Vec2, sprite: Size, tolerance: f64) {
        self.left += delta.x;
        self.top += delta.y;
        if self.left < 0.0 {
            self.left = 0.0;
        }
        if self.top < 0.0 {
            self.top = 0.0;
        }
        if self.left + self.width > sprite.width + tolerance {
            self.left = sprite.width - self.width + tolerance;
        }
        if self.top + self.height > sprite.height + tolerance {
            self.top = sprite.height - self.height + tolerance;
        }
    }

    /// Drag the given edges by `delta`, keeping each side length in `[min, max]`
    /// and the edges inside the sprite (plus tolerance on the far edges).
    pub fn resize_sides(
        &mut self,
        sides: Sides,
        delta: Vec2,
        sprite: Size,
        tolerance: f64,
        min: f64,
        max: f64,
    ) {
        let right = self.left + self.width;
        let bottom = self.top + self.height;

        if sides.left {
            let new_left = (self.left + delta.x)
                .max(0.0)
                .min(right - min)
                .max(right - max);
            self.left = new_left;
            self.width = right - new_left;
        } else if sides.right {
            let new_right = (right + delta.x)
                .min(sprite.width + tolerance)
                .max(self.left + min)
                .min(self.left + max);
            self.width = new_right - self.left;
        }

        if sides.top {
            let new_top = (self.top + delta.y)
                .max(0.0)
                .min(bottom - min)
                .max(bottom - max);
            self.top = new_top;
            self.height = bottom - new_top;
        } else if sides.bottom {
            let new_bottom = (bottom + delta.y)
                .min(sprite.height + tolerance)
                .max(self.top + min)
                .min(self.top + max);
            self.height = new_bottom - self.top;
        }
    }

    /// Snap position and size to whole pixels.
    pub fn round(&mut self) {
        self.top = round_half_up(self.top);
        self.left = round_half_up(self.left);
        self.width = round_half_up(self.width);
        self.height = round_half_up(self.height);
    }
}

/// Offset from the previous frame plus this frame's crop.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameDelta {
    pub x_shift: f64,
    pub y_shift: f64,
    #[serde(default)]
    pub crop: Crop,
}

impl FrameDelta {
    pub fn new(shift: Vec2) -> Self {
        Self {
            x_shift: shift.x,
            y_shift: shift.y,
            crop: Crop::ZERO,
        }
    }

    pub fn shift(&self) -> Vec2 {
        Vec2::new(self.x_shift, self.y_shift)
    }

    pub fn set_shift(&mut self, shift: Vec2) {
        self.x_shift = shift.x;
        self.y_shift = shift.y;
    }
}

/// Frames of one animation: a base box plus chained per-frame deltas.
///
/// Frame `i` sits at `base_box.position() + sum(deltas[0..=i].shift())`. Positions
/// are always recomputed from the chain; any earlier delta may change.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Frames {
    pub animation_name: String,
    pub base_box: BaseBox,
    pub frame_deltas: Vec<FrameDelta>,
}

impl Frames {
    /// A single zero-delta frame sitting on `base_box`.
    pub fn new(animation_name: impl Into<String>, base_box: BaseBox) -> Self {
        Self {
            animation_name: animation_name.into(),
            base_box,
            frame_deltas: vec![FrameDelta::default()],
        }
    }

    pub fn len(&self) -> usize {
        self.frame_deltas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frame_deltas.is_empty()
    }

    /// Top-left of frame `index`; indices past the end sum the whole chain.
    pub fn absolute_position(&self, index: usize) -> Point {
        self.frame_deltas
            .iter()
            .take(index.saturating_add(1))
            .fold(self.base_box.position(), |p, d| p + d.shift())
    }

    /// Full (uncropped) box of frame `index`.
    pub fn frame_box(&self, index: usize) -> Rect {
        Rect::from_origin_size(self.absolute_position(index), self.base_box.size())
    }

    /// Box of frame `index` minus its crop.
    pub fn visible_rect(&self, index: usize) -> Option<Rect> {
        let crop = self.frame_deltas.get(index)?.crop;
        let b = self.frame_box(index);
        Some(Rect::new(
            b.x0 + crop.left,
            b.y0 + crop.top,
            b.x1 - crop.right,
            b.y1 - crop.bottom,
        ))
    }

    /// Last frame whose visible rect contains `p`.
    ///
    /// Later frames draw over earlier ones, so the whole chain is scanned and the
    /// last match wins.
    pub fn find_frame_at(&self, p: Point) -> Option<usize> {
        let mut pos = self.base_box.position();
        let size = self.base_box.size();
        let mut found = None;
        for (i, d) in self.frame_deltas.iter().enumerate() {
            pos += d.shift();
            let b = Rect::from_origin_size(pos, size);
            let visible = Rect::new(
                b.x0 + d.crop.left,
                b.y0 + d.crop.top,
                b.x1 - d.crop.right,
                b.y1 - d.crop.bottom,
            );
            if contains_inclusive(visible, p) {
                found = Some(i);
            }
        }
        found
    }

    /// Move frame `index` by `delta` without displacing any later frame.
    pub fn nudge_frame(&mut self, index: usize, delta: Vec2) -> bool {
        let Some(d) = self.frame_deltas.get_mut(index) else {
            return false;
        };
        d.set_shift(d.shift() + delta);
        if let Some(next) = self.frame_deltas.get_mut(index + 1) {
            next.set_shift(next.shift() - delta);
        }
        true
    }

    /// Drop frame `index` and everything after it, always keeping one frame.
    ///
    /// Returns how many frames were removed.
    pub fn truncate_from(&mut self, index: usize) -> usize {
        let keep = index.max(1);
        let before = self.frame_deltas.len();
        self.frame_deltas.truncate(keep);
        before - self.frame_deltas.len()
    }

    /// Middle point in absolute sprite coordinates for frame `index`.
    pub fn middle_point_at(&self, index: usize) -> Option<Point> {
        let mp = self.base_box.middle_point?;
        let origin = self.absolute_position(index);
        Some(origin + mp.to_vec2())
    }

    /// Store `p` (absolute) as the middle point, relative to frame `index`'s top-left.
    pub fn set_middle_point(&mut self, index: usize, p: Point) {
        let origin = self.absolute_position(index);
        self.base_box.middle_point = Some((p - origin).to_point());
    }
}
