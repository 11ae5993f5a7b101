#![forbid(unsafe_code)]

pub mod config;
pub mod editor;
pub mod export;
pub mod foundation;
pub mod frames;
pub mod player;
pub mod project;
pub mod render;
pub mod sprite;

pub use config::{EditorConfig, PlaybackConfig, SheetConfig};
pub use editor::{Cursor, Direction, EditorState, Editor, Effect, Event, Key};
pub use export::{Placement, SheetLayout, compose_atlas, pack, pack_frames};
pub use foundation::core::{Point, Rect, Rgba8, Size, Vec2};
pub use foundation::error::{SpriteError, SpriteResult};
pub use frames::{BaseBox, Crop, FrameDelta, Frames, InProgressBatch, Side, Sides};
pub use player::{PlaybackRange, Player};
pub use project::{Animation, AnimationId, AnimationStage, Project};
pub use render::{DrawCmd, DrawList, Palette, RasterSurface, Surface, Viewport};
pub use sprite::SpriteImage;
