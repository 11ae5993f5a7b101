use std::time::Duration;

use crate::config::PlaybackConfig;
use crate::foundation::math::round_half_up;

/// Which frames the player cycles through.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaybackRange {
    /// The trailing `n` frames.
    LastN(usize),
    /// Every frame from the first.
    All,
}

/// Timer-driven frame cycling for the preview surface.
///
/// The player owns no clock: the host calls [`tick`](Self::tick) with the elapsed
/// time and gets back the frame index to show, if one is due. Frame counts are
/// passed in on every call because the frames may change between ticks.
#[derive(Clone, Debug)]
pub struct Player {
    cfg: PlaybackConfig,
    interval: Duration,
    range: PlaybackRange,
    play_until_selected: bool,
    selected: Option<usize>,
    running: bool,
    current: usize,
    elapsed: Duration,
    due_now: bool,
}

impl Player {
    pub fn new(cfg: &PlaybackConfig) -> Self {
        Self {
            interval: cfg.interval(),
            range: PlaybackRange::LastN(cfg.show_last.max(1)),
            cfg: cfg.clone(),
            play_until_selected: false,
            selected: None,
            running: false,
            current: 0,
            elapsed: Duration::ZERO,
            due_now: false,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn range(&self) -> PlaybackRange {
        self.range
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn play_until_selected(&self) -> bool {
        self.play_until_selected
    }

    pub fn set_show_last(&mut self, n: usize) {
        self.range = PlaybackRange::LastN(n.max(1));
    }

    pub fn show_all(&mut self) {
        self.range = PlaybackRange::All;
    }

    /// Returns whether the setting changed, i.e. playback should restart.
    pub fn set_play_until_selected(&mut self, on: bool) -> bool {
        let changed = self.play_until_selected != on;
        self.play_until_selected = on;
        changed
    }

    /// Track the selected frame. Returns whether the displayed window moved.
    pub fn set_selected(&mut self, selected: Option<usize>) -> bool {
        let changed = self.selected != selected;
        self.selected = selected;
        changed && self.play_until_selected
    }

    /// Inclusive `(first, last)` indices of the frames being cycled.
    pub fn window(&self, frame_count: usize) -> Option<(usize, usize)> {
        if frame_count == 0 {
            return None;
        }
        let last = match (self.play_until_selected, self.selected) {
            (true, Some(sel)) => sel.min(frame_count - 1),
            _ => frame_count - 1,
        };
        let first = match self.range {
            PlaybackRange::All => 0,
            PlaybackRange::LastN(n) => (last + 1).saturating_sub(n),
        };
        Some((first, last))
    }

    /// Start from the beginning of the window; the first frame is due immediately.
    pub fn start(&mut self, frame_count: usize) {
        self.running = true;
        self.current = self.window(frame_count).map_or(0, |(first, _)| first);
        self.elapsed = Duration::ZERO;
        self.due_now = true;
        tracing::debug!(frame_count, start = self.current, range = ?self.range, "playback started");
    }

    pub fn stop(&mut self) {
        if self.running {
            tracing::debug!("playback stopped");
        }
        self.running = false;
        self.due_now = false;
        self.elapsed = Duration::ZERO;
    }

    pub fn restart(&mut self, frame_count: usize) {
        self.stop();
        self.start(frame_count);
    }

    /// Advance the clock by `dt` and return the frame to show, if any is due.
    ///
    /// When several intervals elapsed at once the skipped frames are not reported.
    pub fn tick(&mut self, dt: Duration, frame_count: usize) -> Option<usize> {
        if !self.running {
            return None;
        }
        let window = self.window(frame_count)?;
        let mut steps = 0u32;
        if self.due_now {
            self.due_now = false;
            steps = 1;
        } else if self.interval.is_zero() {
            steps = 1;
        } else {
            self.elapsed += dt;
            while self.elapsed >= self.interval {
                self.elapsed -= self.interval;
                steps += 1;
            }
        }
        let mut shown = None;
        for _ in 0..steps {
            shown = Some(self.advance(window));
        }
        shown
    }

    fn advance(&mut self, (first, last): (usize, usize)) -> usize {
        let show = self.current.clamp(first, last);
        self.current = if show >= last { first } else { show + 1 };
        show
    }

    /// Slow down by one step. Returns the new interval.
    pub fn step_interval_up(&mut self) -> Duration {
        let ms = self.interval.as_millis() as f64;
        let stepped = clean_interval(ms * self.cfg.step_factor).max(ms + increment(ms));
        self.set_interval_ms(stepped)
    }

    /// Speed up by one step. Returns the new interval.
    pub fn step_interval_down(&mut self) -> Duration {
        let ms = self.interval.as_millis() as f64;
        let raw = ms / self.cfg.step_factor;
        let stepped = clean_interval(raw).min(ms - increment(raw));
        self.set_interval_ms(stepped)
    }

    pub fn set_interval_ms(&mut self, ms: f64) -> Duration {
        if ms.is_finite() {
            let lo = self.cfg.min_interval_ms as f64;
            let hi = self.cfg.max_interval_ms as f64;
            self.interval = Duration::from_millis(ms.clamp(lo, hi) as u64);
        }
        self.interval
    }
}

fn increment(ms: f64) -> f64 {
    if ms < 1000.0 { 10.0 } else { 50.0 }
}

fn clean_interval(ms: f64) -> f64 {
    let inc = increment(ms);
    round_half_up(ms / inc) * inc
}

#[cfg(test)]
#[path = "../tests/unit/player/player.rs"]
mod tests;
