use crate::foundation::core::{Point, Vec2};
use crate::foundation::math::round_half_up;
use crate::frames::model::{FrameDelta, Frames};

/// Keep only the dominant axis of `shift`; ties go to the horizontal axis.
pub fn locked_shift(shift: Vec2, axis_lock: bool) -> Vec2 {
    if !axis_lock {
        return shift;
    }
    if shift.x.abs() >= shift.y.abs() {
        Vec2::new(shift.x, 0.0)
    } else {
        Vec2::new(0.0, shift.y)
    }
}

impl Frames {
    /// Resize the trailing batch of `batch_len` frames to `target` frames.
    ///
    /// Shrinking pops from the tail, growing pushes zero-crop frames, and every
    /// frame of the resulting batch gets `shift`.
    pub fn set_frame_count(&mut self, batch_len: usize, target: usize, shift: Vec2) {
        let batch_len = batch_len.min(self.frame_deltas.len());
        if target < batch_len {
            let keep = self.frame_deltas.len() - (batch_len - target);
            self.frame_deltas.truncate(keep);
        } else {
            for _ in batch_len..target {
                self.frame_deltas.push(FrameDelta::new(shift));
            }
        }
        let start = self.frame_deltas.len() - target;
        for d in &mut self.frame_deltas[start..] {
            d.set_shift(shift);
        }
    }

    /// Round the last `count` shifts to whole pixels, carrying each rounding
    /// error into the next frame so the chain never drifts by more than half a pixel.
    pub fn round_shifts(&mut self, count: usize) {
        let start = self.frame_deltas.len() - count.min(self.frame_deltas.len());
        let mut carry = Vec2::ZERO;
        for d in &mut self.frame_deltas[start..] {
            let want = d.shift() + carry;
            let rounded = Vec2::new(round_half_up(want.x), round_half_up(want.y));
            carry = want - rounded;
            d.set_shift(rounded);
        }
    }
}

/// Frames being placed interactively, appended to the tail of a [`Frames`].
///
/// Created when mass-adding starts and consumed by [`commit`](Self::commit) or
/// [`cancel`](Self::cancel).
#[derive(Clone, Debug, PartialEq)]
pub struct InProgressBatch {
    count: usize,
    last_pointer: Option<Point>,
    shift: Vec2,
    axis_lock: bool,
}

impl InProgressBatch {
    /// Start a batch with one frame placed one box-width to the right.
    pub fn begin(frames: &mut Frames, axis_lock: bool) -> Self {
        let mut batch = Self {
            count: 0,
            last_pointer: None,
            shift: Vec2::new(frames.base_box.width, 0.0),
            axis_lock,
        };
        batch.set_count(frames, 1);
        batch
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn axis_lock(&self) -> bool {
        self.axis_lock
    }

    /// Shift applied to every frame of the batch right now.
    pub fn effective_shift(&self) -> Vec2 {
        locked_shift(self.shift, self.axis_lock)
    }

    /// Feed a pointer position (sprite space); the first one only sets the reference.
    pub fn pointer_moved(&mut self, frames: &mut Frames, p: Point) {
        if let Some(last) = self.last_pointer {
            self.shift += p - last;
        }
        self.last_pointer = Some(p);
        frames.set_frame_count(self.count, self.count, self.effective_shift());
    }

    pub fn set_count(&mut self, frames: &mut Frames, target: usize) {
        frames.set_frame_count(self.count, target, self.effective_shift());
        self.count = target;
    }

    /// Keep the batch, snapping its shifts to whole pixels. Returns the batch size.
    pub fn commit(self, frames: &mut Frames) -> usize {
        frames.round_shifts(self.count);
        self.count
    }

    /// Remove every frame the batch added.
    pub fn cancel(mut self, frames: &mut Frames) {
        self.set_count(frames, 0);
    }
}
