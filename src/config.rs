use std::path::Path;
use std::time::Duration;

use crate::foundation::core::Size;
use crate::foundation::error::{SpriteError, SpriteResult};

/// Tunable constants for the editor, renderer, player and packer.
///
/// Every field has a default, so a config file only needs the keys it overrides.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Border inset around the rendered sprite, in sprite pixels.
    pub canvas_padding: f64,
    /// Canvas size used when there is no sprite to show.
    pub min_canvas: Size,
    /// Smallest accepted base-box side (smaller input is ignored).
    pub min_box_side: f64,
    /// Largest accepted base-box side (larger input is clamped).
    pub max_box_side: f64,
    /// Visible core every frame keeps after cropping.
    pub min_visible_core: f64,
    /// How far a dragged box may hang over the sprite's far edges.
    pub bounds_tolerance: f64,
    /// Width of the band just outside the base box that starts a border resize.
    pub resize_band: f64,
    /// Crop-edge hover tolerance in screen pixels.
    pub crop_edge_tolerance: f64,
    pub default_animation_name: String,
    pub default_box_size: f64,
    pub min_zoom_percent: f64,
    pub max_zoom_percent: f64,
    pub playback: PlaybackConfig,
    pub sheet: SheetConfig,
    /// Size of the single-frame preview surface.
    pub preview_size: Size,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    pub interval_ms: u64,
    pub min_interval_ms: u64,
    pub max_interval_ms: u64,
    /// Multiplicative factor for one interval step.
    pub step_factor: f64,
    /// Default size of the trailing window of frames that cycles.
    pub show_last: usize,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SheetConfig {
    /// Lowest acceptable width/height ratio of the packed sheet.
    pub min_ratio: f64,
    /// Highest acceptable width/height ratio of the packed sheet.
    pub max_ratio: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            canvas_padding: 10.0,
            min_canvas: Size::new(320.0, 160.0),
            min_box_side: 8.0,
            max_box_side: 10_000.0,
            min_visible_core: 4.0,
            bounds_tolerance: 5.0,
            resize_band: 4.0,
            crop_edge_tolerance: 3.0,
            default_animation_name: "Animation".to_string(),
            default_box_size: 32.0,
            min_zoom_percent: 10.0,
            max_zoom_percent: 6400.0,
            playback: PlaybackConfig::default(),
            sheet: SheetConfig::default(),
            preview_size: Size::new(128.0, 128.0),
        }
    }
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            interval_ms: 300,
            min_interval_ms: 50,
            max_interval_ms: 2500,
            step_factor: 1.25,
            show_last: 5,
        }
    }
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            min_ratio: 0.5,
            max_ratio: 2.0,
        }
    }
}

impl PlaybackConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

impl EditorConfig {
    pub fn from_json_str(s: &str) -> SpriteResult<Self> {
        let cfg: Self = serde_json::from_str(s).map_err(|e| SpriteError::serde(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_path(path: &Path) -> SpriteResult<Self> {
        let s = std::fs::read_to_string(path).map_err(|e| {
            SpriteError::Other(anyhow::Error::new(e).context(format!(
                "read editor config '{}'",
                path.display()
            )))
        })?;
        Self::from_json_str(&s)
    }

    /// Apply `SPRITEBOX_PLAYBACK_INTERVAL_MS` and `SPRITEBOX_SHOW_LAST`.
    /// Unparsable values are ignored.
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(ms) = std::env::var("SPRITEBOX_PLAYBACK_INTERVAL_MS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|&n| n > 0)
        {
            self.playback.interval_ms =
                ms.clamp(self.playback.min_interval_ms, self.playback.max_interval_ms);
        }
        if let Some(n) = std::env::var("SPRITEBOX_SHOW_LAST")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .filter(|&n| n > 0)
        {
            self.playback.show_last = n;
        }
        self
    }

    pub fn validate(&self) -> SpriteResult<()> {
        if self.canvas_padding < 0.0 {
            return Err(SpriteError::validation("canvas_padding must be >= 0"));
        }
        if self.min_box_side <= 0.0 || self.min_box_side > self.max_box_side {
            return Err(SpriteError::validation(
                "box side bounds must satisfy 0 < min_box_side <= max_box_side",
            ));
        }
        if self.min_visible_core < 0.0 || self.min_visible_core >= self.min_box_side {
            return Err(SpriteError::validation(
                "min_visible_core must be >= 0 and smaller than min_box_side",
            ));
        }
        if self.default_box_size < self.min_box_side || self.default_box_size > self.max_box_side
        {
            return Err(SpriteError::validation(
                "default_box_size must lie within the box side bounds",
            ));
        }
        if self.min_zoom_percent <= 0.0 || self.min_zoom_percent > self.max_zoom_percent {
            return Err(SpriteError::validation(
                "zoom bounds must satisfy 0 < min_zoom_percent <= max_zoom_percent",
            ));
        }
        let p = &self.playback;
        if p.min_interval_ms == 0
            || p.min_interval_ms > p.max_interval_ms
            || !(p.min_interval_ms..=p.max_interval_ms).contains(&p.interval_ms)
        {
            return Err(SpriteError::validation(
                "playback interval must lie within 0 < min_interval_ms <= max_interval_ms",
            ));
        }
        if p.step_factor <= 1.0 {
            return Err(SpriteError::validation("playback step_factor must be > 1"));
        }
        if p.show_last == 0 {
            return Err(SpriteError::validation("playback show_last must be > 0"));
        }
        if self.sheet.min_ratio <= 0.0 || self.sheet.min_ratio > self.sheet.max_ratio {
            return Err(SpriteError::validation(
                "sheet ratio bounds must satisfy 0 < min_ratio <= max_ratio",
            ));
        }
        if self.preview_size.width <= 0.0 || self.preview_size.height <= 0.0 {
            return Err(SpriteError::validation("preview_size must be non-empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/unit/config/config.rs"]
mod tests;
