//! Interactive editing state machine.
//!
//! [`Editor`] consumes host [`Event`]s and answers with [`Effect`]s. It never fails:
//! input that is illegal in the current state is logged and dropped.

pub mod bindings;
pub mod events;
pub mod state;

use std::time::Duration;

use crate::config::EditorConfig;
use crate::export;
use crate::foundation::core::{Point, Vec2};
use crate::foundation::math::round_half_up;
use crate::frames::{
    BaseBox, BorderLimits, BoxHit, Dimension, Frames, InProgressBatch, InputOutcome, border_hit,
};
use crate::player::Player;
use crate::project::{AnimationId, Project};
use crate::render::projection::{
    DrawList, Palette, base_box_outline, blank_canvas, frame_outlines, frame_preview,
    sprite_backdrop,
};
use crate::render::view::Viewport;
use crate::sprite::SpriteImage;

pub use bindings::{BindingChange, Bindings};
pub use events::{Cursor, Direction, Effect, Event, EventKind, Key};
pub use state::{BoxDrag, EditorState, FrameMode, SelectedMode, StateKind};

pub struct Editor {
    config: EditorConfig,
    palette: Palette,
    viewport: Viewport,
    project: Option<Project>,
    state: EditorState,
    bindings: Bindings,
    player: Player,
    axis_lock: bool,
    cursor: Cursor,
    /// Last pointer position in sprite space.
    pointer: Option<Point>,
}

impl Editor {
    pub fn new(config: EditorConfig) -> Self {
        Self {
            viewport: Viewport::from_config(&config),
            player: Player::new(&config.playback),
            palette: Palette::default(),
            project: None,
            state: EditorState::Idle,
            bindings: Bindings::new(StateKind::Idle),
            axis_lock: true,
            cursor: Cursor::Default,
            pointer: None,
            config,
        }
    }

    pub fn with_sprite(config: EditorConfig, sprite: SpriteImage) -> Self {
        let mut ed = Self::new(config);
        ed.project = Some(Project::new(sprite));
        ed
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn bindings(&self) -> &Bindings {
        &self.bindings
    }

    pub fn project(&self) -> Option<&Project> {
        self.project.as_ref()
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn axis_lock(&self) -> bool {
        self.axis_lock
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Frames of the animation the current state works on.
    pub fn active_frames(&self) -> Option<&Frames> {
        let id = self.state.animation()?;
        self.project.as_ref()?.get(id).map(|a| &a.frames)
    }

    fn active_frames_mut(&mut self) -> Option<&mut Frames> {
        let id = self.state.animation()?;
        self.project.as_mut()?.get_mut(id).map(|a| &mut a.frames)
    }

    /// Feed one event. Never fails; see the module docs.
    pub fn handle(&mut self, event: Event) -> Vec<Effect> {
        let kind = event.kind();
        if let Event::PointerDown(p) | Event::PointerMove(p) | Event::PointerUp(p) = &event {
            self.pointer = Some(self.viewport.client_to_sprite(*p));
        }
        if !self.bindings.listens(kind) {
            tracing::debug!(?kind, state = ?self.state.kind(), "event not bound in this state");
            return Vec::new();
        }

        let mut fx = Vec::new();
        match event {
            Event::PointerDown(p) => {
                let p = self.viewport.client_to_sprite(p);
                self.pointer_down(p, &mut fx);
            }
            Event::PointerMove(p) => {
                let p = self.viewport.client_to_sprite(p);
                self.pointer_move(p, &mut fx);
            }
            Event::PointerUp(_) => self.pointer_up(&mut fx),
            Event::Key(key) => self.key(key, &mut fx),
            Event::Layout {
                canvas_origin,
                scroll,
            } => {
                self.viewport.set_canvas_origin(canvas_origin);
                self.viewport.set_scroll(scroll);
            }
            Event::AddAnimation => self.add_animation(&mut fx),
            Event::SelectAnimation(id) => self.select_animation(id, &mut fx),
            Event::RemoveAnimation(id) => self.remove_animation(id, &mut fx),
            Event::NameInput(text) => {
                if let EditorState::NamingAnimation { text: t, .. } = &mut self.state {
                    *t = text;
                }
            }
            Event::BoxInput { dim, value } => self.box_input(dim, value, &mut fx),
            Event::ConfirmBoxSize => self.confirm_box_size(&mut fx),
            Event::SetZoom(percent) => {
                let percent = self.viewport.set_zoom_percent(percent);
                fx.push(Effect::SetCanvasScale {
                    scale: self.viewport.scale(),
                    percent,
                });
            }
            Event::SetAxisLock(on) => self.axis_lock = on,
            Event::SetPlayUntilSelected(on) => {
                if self.player.set_play_until_selected(on) {
                    self.restart_playback(&mut fx);
                }
            }
            Event::ShowLast(n) => {
                self.player.set_show_last(n);
                self.restart_playback(&mut fx);
            }
            Event::ShowAll => {
                self.player.show_all();
                self.restart_playback(&mut fx);
            }
            Event::IntervalUp => fx.push(Effect::IntervalChanged(self.player.step_interval_up())),
            Event::IntervalDown => {
                fx.push(Effect::IntervalChanged(self.player.step_interval_down()))
            }
            Event::OpenSprite(sprite) => self.open_sprite(sprite, &mut fx),
            Event::Export => self.export(&mut fx),
        }
        fx
    }

    /// Advance playback; yields a preview when a new frame is due.
    pub fn tick(&mut self, dt: Duration) -> Vec<Effect> {
        if !matches!(self.state, EditorState::FrameEditing { .. }) {
            return Vec::new();
        }
        let Some(len) = self.active_frames().map(Frames::len) else {
            return Vec::new();
        };
        self.player
            .tick(dt, len)
            .and_then(|i| self.preview(i))
            .into_iter()
            .collect()
    }

    /// Main canvas for the current state.
    pub fn canvas(&self) -> DrawList {
        let padding = self.viewport.padding();
        let Some(project) = self.project.as_ref().filter(|p| !p.sprite().is_empty()) else {
            return blank_canvas(self.viewport.canvas_size(None), padding, &self.palette);
        };
        let mut list = sprite_backdrop(project.sprite_size(), padding, &self.palette);
        if let Some(frames) = self.active_frames() {
            match &self.state {
                EditorState::NamingAnimation { .. } | EditorState::SizingBaseBox { .. } => {
                    list.extend(base_box_outline(frames, padding, &self.palette));
                }
                EditorState::FrameEditing { .. } => list.extend(frame_outlines(
                    frames,
                    self.state.selected_frame(),
                    padding,
                    &self.palette,
                )),
                EditorState::Idle => {}
            }
        }
        list
    }

    fn redraw(&self, fx: &mut Vec<Effect>) {
        fx.push(Effect::Redraw(self.canvas()));
    }

    fn preview(&self, index: usize) -> Option<Effect> {
        let frames = self.active_frames()?;
        Some(Effect::Preview(frame_preview(
            frames,
            index,
            self.config.preview_size,
            &self.palette,
        )))
    }

    /// Redraw plus a preview of the frame that was just edited.
    fn redraw_with_preview(&self, index: usize, fx: &mut Vec<Effect>) {
        self.redraw(fx);
        fx.extend(self.preview(index));
    }

    fn enter(&mut self, next: EditorState, fx: &mut Vec<Effect>) {
        let (from, to) = (self.state.kind(), next.kind());
        if from != to {
            tracing::debug!(?from, ?to, "editor state");
        }
        self.state = next;
        let change = self.bindings.rebind(to);
        if !change.is_empty() {
            fx.push(Effect::Listen(change));
        }
        if self.player.set_selected(self.state.selected_frame()) {
            self.restart_playback(fx);
        }
    }

    fn set_cursor(&mut self, cursor: Cursor, fx: &mut Vec<Effect>) {
        if self.cursor != cursor {
            self.cursor = cursor;
            fx.push(Effect::SetCursor(cursor));
        }
    }

    fn restart_playback(&mut self, fx: &mut Vec<Effect>) {
        if !matches!(self.state, EditorState::FrameEditing { .. }) {
            return;
        }
        if let Some(len) = self.active_frames().map(Frames::len) {
            self.player.restart(len);
            fx.push(Effect::PlaybackRestarted);
        }
    }

    fn stop_playback(&mut self, fx: &mut Vec<Effect>) {
        if self.player.is_running() {
            self.player.stop();
            fx.push(Effect::PlaybackStopped);
        }
    }

    fn border_limits(&self) -> BorderLimits {
        let sprite = self.project.as_ref().map(Project::sprite_size);
        BorderLimits::from_config(&self.config, sprite)
    }

    // Project-level actions.

    fn add_animation(&mut self, fx: &mut Vec<Effect>) {
        let origin = self.viewport.visible_origin();
        let side = self.config.default_box_size;
        let tolerance = self.config.bounds_tolerance;
        let Some(project) = self.project.as_mut() else {
            tracing::debug!("add animation without a sprite");
            return;
        };
        let mut base = BaseBox::new(origin.x, origin.y, side, side);
        base.move_within(Vec2::ZERO, project.sprite_size(), tolerance);
        let id = project.add_animation(base);

        self.stop_playback(fx);
        self.enter(
            EditorState::NamingAnimation {
                id,
                text: String::new(),
            },
            fx,
        );
        fx.push(Effect::AnimationListed(id));
        self.redraw(fx);
    }

    fn select_animation(&mut self, id: AnimationId, fx: &mut Vec<Effect>) {
        let Some(project) = self.project.as_mut() else {
            return;
        };
        if let Err(err) = project.select(id) {
            tracing::debug!(%err, "select animation ignored");
            return;
        }
        self.enter_frame_editing(id, fx);
    }

    fn enter_frame_editing(&mut self, id: AnimationId, fx: &mut Vec<Effect>) {
        self.enter(
            EditorState::FrameEditing {
                id,
                mode: FrameMode::Idle,
            },
            fx,
        );
        fx.push(Effect::ShowFrameEditor);
        self.restart_playback(fx);
        self.redraw(fx);
    }

    fn remove_animation(&mut self, id: AnimationId, fx: &mut Vec<Effect>) {
        let Some(project) = self.project.as_mut() else {
            return;
        };
        if project.remove(id).is_none() {
            tracing::debug!(%id, "remove of unknown animation ignored");
            return;
        }
        fx.push(Effect::AnimationUnlisted(id));
        if self.state.animation() == Some(id) {
            self.settle(fx);
        }
    }

    /// After the active animation went away: continue with the project's
    /// selection, or fall back to the bare sprite.
    fn settle(&mut self, fx: &mut Vec<Effect>) {
        match self.project.as_ref().and_then(Project::selected) {
            Some(next) => self.enter_frame_editing(next, fx),
            None => {
                self.enter(EditorState::Idle, fx);
                self.stop_playback(fx);
                fx.push(Effect::HideFrameEditor);
                self.set_cursor(Cursor::Default, fx);
                self.redraw(fx);
            }
        }
    }

    fn open_sprite(&mut self, sprite: SpriteImage, fx: &mut Vec<Effect>) {
        tracing::debug!(width = sprite.width(), height = sprite.height(), "opening sprite");
        self.project = Some(Project::new(sprite));
        fx.push(Effect::ClearAnimationList);
        self.enter(EditorState::Idle, fx);
        self.stop_playback(fx);
        fx.push(Effect::HideFrameEditor);
        fx.push(Effect::SetCanvasScale {
            scale: self.viewport.scale(),
            percent: self.viewport.zoom_percent(),
        });
        self.redraw(fx);
    }

    fn export(&mut self, fx: &mut Vec<Effect>) {
        let Some(project) = self.project.as_ref() else {
            fx.push(Effect::Notify("Open a sprite first".to_string()));
            return;
        };
        match export::pack(project, &self.config.sheet) {
            Ok(layout) => {
                let image = export::compose_atlas(&layout, project.sprite());
                fx.push(Effect::ShowExport { layout, image });
            }
            Err(err) => {
                tracing::info!(%err, "export aborted");
                fx.push(Effect::Notify(err.to_string()));
            }
        }
    }

    // Construction stages.

    fn commit_name(&mut self, fx: &mut Vec<Effect>) {
        let EditorState::NamingAnimation { id, text } = &self.state else {
            return;
        };
        let (id, text) = (*id, text.clone());
        let default_name = self.config.default_animation_name.clone();
        let Some(anim) = self.project.as_mut().and_then(|p| p.get_mut(id)) else {
            return;
        };
        if let Err(err) = anim.commit_name(&text, &default_name) {
            tracing::debug!(%err, "name commit ignored");
            return;
        }
        let name = anim.name().to_string();
        let (width, height) = (anim.frames.base_box.width, anim.frames.base_box.height);

        self.enter(
            EditorState::SizingBaseBox {
                id,
                drag: BoxDrag::None,
            },
            fx,
        );
        fx.push(Effect::AnimationNamed { id, name });
        fx.push(Effect::ShowSizingDialog { width, height });
        self.redraw_with_preview(0, fx);
    }

    /// Escape while naming or sizing: the half-built animation is dropped.
    fn cancel_construction(&mut self, fx: &mut Vec<Effect>) {
        let Some(id) = self.state.animation() else {
            return;
        };
        let sizing = matches!(self.state, EditorState::SizingBaseBox { .. });
        if let Some(project) = self.project.as_mut() {
            project.remove(id);
        }
        if sizing {
            fx.push(Effect::HideSizingDialog);
        }
        fx.push(Effect::AnimationUnlisted(id));
        self.settle(fx);
    }

    fn box_input(&mut self, dim: Dimension, value: f64, fx: &mut Vec<Effect>) {
        let (min, max) = (self.config.min_box_side, self.config.max_box_side);
        let Some(frames) = self.active_frames_mut() else {
            return;
        };
        match frames.base_box.set_dimension(dim, value, min, max) {
            InputOutcome::Ignored => return,
            InputOutcome::Applied => {}
            InputOutcome::Clamped(_) => fx.push(Effect::WriteBoxInputs {
                width: frames.base_box.width,
                height: frames.base_box.height,
            }),
        }
        self.redraw_with_preview(0, fx);
    }

    fn confirm_box_size(&mut self, fx: &mut Vec<Effect>) {
        let EditorState::SizingBaseBox { id, drag } = self.state else {
            return;
        };
        if drag != BoxDrag::None {
            tracing::debug!("box size confirm while dragging ignored");
            return;
        }
        let Some(project) = self.project.as_mut() else {
            return;
        };
        let committed = project.get_mut(id).map(|a| {
            a.commit_size()?;
            a.begin_editing()
        });
        match committed {
            Some(Ok(())) => {}
            Some(Err(err)) => {
                tracing::debug!(%err, "box size confirm ignored");
                return;
            }
            None => return,
        }
        if let Err(err) = project.select(id) {
            tracing::debug!(%err, "new animation could not be selected");
        }
        fx.push(Effect::HideSizingDialog);
        self.set_cursor(Cursor::Default, fx);
        self.enter_frame_editing(id, fx);
    }

    // Pointer and keyboard dispatch.

    fn pointer_down(&mut self, p: Point, fx: &mut Vec<Effect>) {
        match self.state.clone() {
            EditorState::NamingAnimation { .. } => self.commit_name(fx),
            EditorState::SizingBaseBox { id, .. } => {
                let band = self.viewport.screen_len_to_sprite(self.config.resize_band);
                let Some(frames) = self.active_frames() else {
                    return;
                };
                let drag = match frames.base_box.hit_test(p, band) {
                    BoxHit::Inside => BoxDrag::Moving { last: p },
                    BoxHit::Border(sides) => BoxDrag::Resizing { sides, last: p },
                    BoxHit::Outside => return,
                };
                self.enter(EditorState::SizingBaseBox { id, drag }, fx);
            }
            EditorState::FrameEditing { id, mode } => match mode {
                FrameMode::Idle => {
                    if let Some(index) = self.active_frames().and_then(|f| f.find_frame_at(p)) {
                        self.select_frame(id, index, fx);
                    }
                }
                FrameMode::MassAdding(batch) => self.finish_batch(id, batch, fx),
                FrameMode::Selected { index, sub } => match sub {
                    SelectedMode::Idle => self.selected_pointer_down(id, index, p, fx),
                    SelectedMode::AnchorPicking => {
                        let hit = self.active_frames().and_then(|f| f.find_frame_at(p));
                        if let (Some(j), Some(frames)) = (hit, self.active_frames_mut()) {
                            frames.set_middle_point(j, p);
                            tracing::debug!(frame = j, x = p.x, y = p.y, "middle point set");
                        }
                        self.set_cursor(Cursor::Default, fx);
                        self.enter(selected(id, index), fx);
                        self.redraw_with_preview(index, fx);
                    }
                    SelectedMode::CropDragging { .. } => {}
                },
            },
            EditorState::Idle => {}
        }
    }

    fn selected_pointer_down(
        &mut self,
        id: AnimationId,
        index: usize,
        p: Point,
        fx: &mut Vec<Effect>,
    ) {
        let tolerance = self.viewport.screen_len_to_sprite(self.config.crop_edge_tolerance);
        let Some(frames) = self.active_frames() else {
            return;
        };
        let sides = frames
            .visible_rect(index)
            .map(|r| border_hit(r, p, tolerance))
            .unwrap_or_default();
        if !sides.is_empty() {
            let sub = SelectedMode::CropDragging {
                sides,
                last: p,
                residual: Vec2::ZERO,
            };
            self.enter(
                EditorState::FrameEditing {
                    id,
                    mode: FrameMode::Selected { index, sub },
                },
                fx,
            );
            return;
        }
        match frames.find_frame_at(p) {
            Some(j) => self.select_frame(id, j, fx),
            None => self.exit_selection(id, fx),
        }
    }

    fn pointer_move(&mut self, p: Point, fx: &mut Vec<Effect>) {
        match self.state.clone() {
            EditorState::SizingBaseBox { id, drag } => self.sizing_move(id, drag, p, fx),
            EditorState::FrameEditing { id, mode } => match mode {
                FrameMode::MassAdding(mut batch) => {
                    let Some(frames) = self.active_frames_mut() else {
                        return;
                    };
                    batch.pointer_moved(frames, p);
                    tracing::trace!(shift = ?batch.effective_shift(), "batch shift");
                    self.state = EditorState::FrameEditing {
                        id,
                        mode: FrameMode::MassAdding(batch),
                    };
                    self.redraw(fx);
                }
                FrameMode::Selected {
                    index,
                    sub: SelectedMode::Idle,
                } => {
                    let tolerance =
                        self.viewport.screen_len_to_sprite(self.config.crop_edge_tolerance);
                    let sides = self
                        .active_frames()
                        .and_then(|f| f.visible_rect(index))
                        .map(|r| border_hit(r, p, tolerance))
                        .unwrap_or_default();
                    let cursor = if sides.is_empty() {
                        Cursor::Default
                    } else {
                        Cursor::Resize(sides)
                    };
                    self.set_cursor(cursor, fx);
                }
                FrameMode::Selected {
                    index,
                    sub:
                        SelectedMode::CropDragging {
                            sides,
                            last,
                            residual,
                        },
                } => {
                    let total = residual + (p - last);
                    let step = Vec2::new(total.x.trunc(), total.y.trunc());
                    self.state = EditorState::FrameEditing {
                        id,
                        mode: FrameMode::Selected {
                            index,
                            sub: SelectedMode::CropDragging {
                                sides,
                                last: p,
                                residual: total - step,
                            },
                        },
                    };
                    if step == Vec2::ZERO {
                        return;
                    }
                    let limits = self.border_limits();
                    let Some(frames) = self.active_frames_mut() else {
                        return;
                    };
                    if frames.resize_frame_borders(sides, step, index, &limits) {
                        tracing::trace!(?step, frame = index, "crop drag");
                        self.redraw_with_preview(index, fx);
                    }
                }
                _ => {}
            },
            _ => {}
        }
    }

    fn sizing_move(&mut self, id: AnimationId, drag: BoxDrag, p: Point, fx: &mut Vec<Effect>) {
        let cfg = &self.config;
        let (tolerance, min, max) = (cfg.bounds_tolerance, cfg.min_box_side, cfg.max_box_side);
        let band = self.viewport.screen_len_to_sprite(cfg.resize_band);
        let Some(sprite) = self.project.as_ref().map(Project::sprite_size) else {
            return;
        };
        let Some(frames) = self.active_frames_mut() else {
            return;
        };
        let base = &mut frames.base_box;
        let next = match drag {
            BoxDrag::None => {
                let cursor = match base.hit_test(p, band) {
                    BoxHit::Inside => Cursor::Move,
                    BoxHit::Border(sides) => Cursor::Resize(sides),
                    BoxHit::Outside => Cursor::Default,
                };
                self.set_cursor(cursor, fx);
                return;
            }
            BoxDrag::Moving { last } => {
                base.move_within(p - last, sprite, tolerance);
                BoxDrag::Moving { last: p }
            }
            BoxDrag::Resizing { sides, last } => {
                base.resize_sides(sides, p - last, sprite, tolerance, min, max);
                fx.push(Effect::WriteBoxInputs {
                    width: round_half_up(base.width),
                    height: round_half_up(base.height),
                });
                BoxDrag::Resizing { sides, last: p }
            }
        };
        self.state = EditorState::SizingBaseBox { id, drag: next };
        self.redraw_with_preview(0, fx);
    }

    fn pointer_up(&mut self, fx: &mut Vec<Effect>) {
        match self.state.clone() {
            EditorState::SizingBaseBox { id, .. } => self.enter(
                EditorState::SizingBaseBox {
                    id,
                    drag: BoxDrag::None,
                },
                fx,
            ),
            EditorState::FrameEditing {
                id,
                mode:
                    FrameMode::Selected {
                        index,
                        sub: SelectedMode::CropDragging { .. },
                    },
            } => {
                self.enter(selected(id, index), fx);
                self.restart_playback(fx);
            }
            _ => {}
        }
    }

    fn key(&mut self, key: Key, fx: &mut Vec<Effect>) {
        let key = match key {
            Key::Char(c) => Key::Char(c.to_ascii_lowercase()),
            other => other,
        };
        match self.state.clone() {
            EditorState::NamingAnimation { .. } => match key {
                Key::Enter => self.commit_name(fx),
                Key::Escape => self.cancel_construction(fx),
                _ => {}
            },
            EditorState::SizingBaseBox { .. } => match key {
                Key::Enter => self.confirm_box_size(fx),
                Key::Escape => self.cancel_construction(fx),
                _ => {}
            },
            EditorState::FrameEditing { id, mode } => match mode {
                FrameMode::Idle => self.frames_idle_key(id, key, fx),
                FrameMode::MassAdding(batch) => self.mass_adding_key(id, batch, key, fx),
                FrameMode::Selected { index, sub } => match sub {
                    SelectedMode::Idle => self.selected_key(id, index, key, fx),
                    SelectedMode::AnchorPicking => {
                        if key == Key::Escape {
                            self.set_cursor(Cursor::Default, fx);
                            self.enter(selected(id, index), fx);
                        }
                    }
                    SelectedMode::CropDragging { .. } => {}
                },
            },
            EditorState::Idle => {}
        }
    }

    fn frames_idle_key(&mut self, id: AnimationId, key: Key, fx: &mut Vec<Effect>) {
        match key {
            Key::Char('a') => {
                let axis_lock = self.axis_lock;
                let pointer = self.pointer;
                let Some(frames) = self.active_frames_mut() else {
                    return;
                };
                let mut batch = InProgressBatch::begin(frames, axis_lock);
                if let Some(p) = pointer {
                    batch.pointer_moved(frames, p);
                }
                let count = batch.count();
                self.enter(
                    EditorState::FrameEditing {
                        id,
                        mode: FrameMode::MassAdding(batch),
                    },
                    fx,
                );
                fx.push(Effect::BatchCount(count));
                self.restart_playback(fx);
                self.redraw(fx);
            }
            Key::Char('s') => {
                if let Some(last) = self.active_frames().and_then(|f| f.len().checked_sub(1)) {
                    self.select_frame(id, last, fx);
                }
            }
            _ => {}
        }
    }

    fn mass_adding_key(
        &mut self,
        id: AnimationId,
        mut batch: InProgressBatch,
        key: Key,
        fx: &mut Vec<Effect>,
    ) {
        match key {
            Key::Digit(n) if n <= 9 => {
                let Some(frames) = self.active_frames_mut() else {
                    return;
                };
                batch.set_count(frames, usize::from(n));
                let count = batch.count();
                self.state = EditorState::FrameEditing {
                    id,
                    mode: FrameMode::MassAdding(batch),
                };
                fx.push(Effect::BatchCount(count));
                self.restart_playback(fx);
                self.redraw(fx);
            }
            Key::Escape => {
                if let Some(frames) = self.active_frames_mut() {
                    batch.cancel(frames);
                }
                self.enter(
                    EditorState::FrameEditing {
                        id,
                        mode: FrameMode::Idle,
                    },
                    fx,
                );
                self.restart_playback(fx);
                self.redraw(fx);
            }
            _ => {}
        }
    }

    fn finish_batch(&mut self, id: AnimationId, batch: InProgressBatch, fx: &mut Vec<Effect>) {
        if let Some(frames) = self.active_frames_mut() {
            let added = batch.commit(frames);
            tracing::debug!(added, total = frames.len(), "frames added");
        }
        self.enter(
            EditorState::FrameEditing {
                id,
                mode: FrameMode::Idle,
            },
            fx,
        );
        self.restart_playback(fx);
        self.redraw(fx);
    }

    fn selected_key(&mut self, id: AnimationId, index: usize, key: Key, fx: &mut Vec<Effect>) {
        match key {
            Key::Arrow(dir) => {
                let Some(frames) = self.active_frames_mut() else {
                    return;
                };
                if frames.nudge_frame(index, dir.delta()) {
                    self.redraw_with_preview(index, fx);
                }
            }
            Key::Delete => {
                if let Some(frames) = self.active_frames_mut() {
                    let removed = frames.truncate_from(index);
                    tracing::debug!(removed, from = index, "frames deleted");
                }
                self.exit_selection(id, fx);
                self.restart_playback(fx);
            }
            Key::Enter | Key::Escape | Key::Char('s') => self.exit_selection(id, fx),
            Key::Char('m') => {
                self.set_cursor(Cursor::Crosshair, fx);
                self.enter(
                    EditorState::FrameEditing {
                        id,
                        mode: FrameMode::Selected {
                            index,
                            sub: SelectedMode::AnchorPicking,
                        },
                    },
                    fx,
                );
            }
            _ => {}
        }
    }

    fn select_frame(&mut self, id: AnimationId, index: usize, fx: &mut Vec<Effect>) {
        tracing::debug!(frame = index, "frame selected");
        self.enter(selected(id, index), fx);
        self.redraw_with_preview(index, fx);
    }

    fn exit_selection(&mut self, id: AnimationId, fx: &mut Vec<Effect>) {
        self.set_cursor(Cursor::Default, fx);
        self.enter(
            EditorState::FrameEditing {
                id,
                mode: FrameMode::Idle,
            },
            fx,
        );
        self.redraw(fx);
    }
}

fn selected(id: AnimationId, index: usize) -> EditorState {
    EditorState::FrameEditing {
        id,
        mode: FrameMode::Selected {
            index,
            sub: SelectedMode::Idle,
        },
    }
}

#[cfg(test)]
#[path = "../../tests/unit/editor/editor.rs"]
mod tests;
