use crate::config::EditorConfig;
use crate::foundation::core::{Point, Rect, Size, Vec2};
use crate::frames::model::{Frames, Side, Sides};

/// Bounds applied while dragging a frame's crop border.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BorderLimits {
    /// Visible core each frame keeps on both axes.
    pub min_visible_core: f64,
    pub max_box_side: f64,
    /// When set, the dragged frame's outer box may not grow past the sprite (plus tolerance).
    pub sprite: Option<Size>,
    pub tolerance: f64,
}

impl BorderLimits {
    pub fn from_config(cfg: &EditorConfig, sprite: Option<Size>) -> Self {
        Self {
            min_visible_core: cfg.min_visible_core,
            max_box_side: cfg.max_box_side,
            sprite,
            tolerance: cfg.bounds_tolerance,
        }
    }
}

impl Default for BorderLimits {
    fn default() -> Self {
        Self::from_config(&EditorConfig::default(), None)
    }
}

/// Edges of `rect` that `p` is within `tolerance` of.
pub fn border_hit(rect: Rect, p: Point, tolerance: f64) -> Sides {
    let within_y = p.y >= rect.y0 - tolerance && p.y <= rect.y1 + tolerance;
    let within_x = p.x >= rect.x0 - tolerance && p.x <= rect.x1 + tolerance;
    Sides {
        top: within_x && (p.y - rect.y0).abs() <= tolerance,
        right: within_y && (p.x - rect.x1).abs() <= tolerance,
        bottom: within_x && (p.y - rect.y1).abs() <= tolerance,
        left: within_y && (p.x - rect.x0).abs() <= tolerance,
    }
}

impl Frames {
    /// Drag one visible edge of frame `index` by a pointer movement of `delta`
    /// along that edge's axis (positive is right/down).
    ///
    /// Growing first eats the frame's own crop on that side. Past that the shared
    /// base box grows and every other frame gains the same crop, so their visible
    /// boxes stay where they are. Shrinking adds crop to the dragged frame and then
    /// trims the base box by the smallest crop any frame carries on that side.
    ///
    /// Returns `true` when anything changed.
    pub fn resize_frame_border(
        &mut self,
        side: Side,
        delta: f64,
        index: usize,
        limits: &BorderLimits,
    ) -> bool {
        if index >= self.frame_deltas.len() || delta == 0.0 || !delta.is_finite() {
            return false;
        }
        let outward = match side {
            Side::Left | Side::Top => -delta,
            Side::Right | Side::Bottom => delta,
        };
        if outward > 0.0 {
            self.grow_border(side, outward, index, limits)
        } else {
            self.shrink_border(side, -outward, index, limits)
        }
    }

    /// Apply a two-axis pointer movement to every side in `sides`.
    pub fn resize_frame_borders(
        &mut self,
        sides: Sides,
        delta: Vec2,
        index: usize,
        limits: &BorderLimits,
    ) -> bool {
        let mut changed = false;
        for side in sides.iter() {
            let d = if side.is_horizontal_axis() {
                delta.x
            } else {
                delta.y
            };
            changed |= self.resize_frame_border(side, d, index, limits);
        }
        changed
    }

    fn grow_border(
        &mut self,
        side: Side,
        outward: f64,
        index: usize,
        limits: &BorderLimits,
    ) -> bool {
        let own = self.frame_deltas[index].crop.get(side);
        if outward <= own {
            *self.frame_deltas[index].crop.get_mut(side) = own - outward;
            return true;
        }

        let mut excess = outward - own;
        excess = excess.min(limits.max_box_side - self.base_box.span(side));
        if let Some(sprite) = limits.sprite {
            let b = self.frame_box(index);
            let room = match side {
                Side::Left => b.x0 + limits.tolerance,
                Side::Top => b.y0 + limits.tolerance,
                Side::Right => sprite.width + limits.tolerance - b.x1,
                Side::Bottom => sprite.height + limits.tolerance - b.y1,
            };
            excess = excess.min(room);
        }
        let excess = excess.max(0.0);

        *self.frame_deltas[index].crop.get_mut(side) = 0.0;
        if excess == 0.0 {
            return own > 0.0;
        }

        self.base_box.grow(side, excess);
        for (i, d) in self.frame_deltas.iter_mut().enumerate() {
            if i != index {
                *d.crop.get_mut(side) += excess;
            }
        }
        true
    }

    fn shrink_border(
        &mut self,
        side: Side,
        amount: f64,
        index: usize,
        limits: &BorderLimits,
    ) -> bool {
        let span = self.base_box.span(side);
        let crop = &mut self.frame_deltas[index].crop;
        let max_crop = (span - limits.min_visible_core - crop.get(side.opposite())).max(0.0);
        let old = crop.get(side);
        let new = (old + amount).min(max_crop).max(old);
        *crop.get_mut(side) = new;

        let trimmed = self.trim_border(side);
        new != old || trimmed > 0.0
    }

    /// Shrink the base box on `side` by the smallest crop any frame has there,
    /// removing that much crop from every frame. Returns the trimmed amount.
    pub fn trim_border(&mut self, side: Side) -> f64 {
        let min = self
            .frame_deltas
            .iter()
            .map(|d| d.crop.get(side))
            .fold(f64::INFINITY, f64::min);
        if !min.is_finite() || min <= 0.0 {
            return 0.0;
        }
        self.base_box.grow(side, -min);
        for d in &mut self.frame_deltas {
            *d.crop.get_mut(side) -= min;
        }
        min
    }
}
