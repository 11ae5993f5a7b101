use crate::foundation::core::{Rect, Rgba8, Size, Vec2};
use crate::frames::{Crop, Frames};
use crate::sprite::SpriteImage;

/// Drawing primitives the editor needs from a surface.
///
/// Coordinates are unscaled canvas pixels. Zoom is applied by the host on top
/// (see [`Effect::SetCanvasScale`](crate::editor::Effect::SetCanvasScale)).
pub trait Surface {
    fn size(&self) -> Size;
    /// Change the backing size; contents are undefined afterwards.
    fn resize(&mut self, size: Size);
    fn clear(&mut self, color: Rgba8);
    fn fill_rect(&mut self, rect: Rect, color: Rgba8);
    /// Stroke of `width` centered on the rectangle's edges.
    fn stroke_rect(&mut self, rect: Rect, width: f64, color: Rgba8);
    /// Draw the `src` region of the sprite scaled into `dst`.
    fn draw_sprite(&mut self, sprite: &SpriteImage, src: Rect, dst: Rect);
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCmd {
    Clear(Rgba8),
    Fill { rect: Rect, color: Rgba8 },
    Stroke { rect: Rect, width: f64, color: Rgba8 },
    Sprite { src: Rect, dst: Rect },
}

/// Commands for one surface, plus the size the surface must have.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DrawList {
    pub size: Size,
    pub cmds: Vec<DrawCmd>,
}

impl DrawList {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            cmds: Vec::new(),
        }
    }

    pub fn push(&mut self, cmd: DrawCmd) {
        self.cmds.push(cmd);
    }

    pub fn extend(&mut self, cmds: impl IntoIterator<Item = DrawCmd>) {
        self.cmds.extend(cmds);
    }

    pub fn execute(&self, surface: &mut dyn Surface, sprite: Option<&SpriteImage>) {
        if surface.size() != self.size {
            surface.resize(self.size);
        }
        for cmd in &self.cmds {
            match cmd {
                DrawCmd::Clear(c) => surface.clear(*c),
                DrawCmd::Fill { rect, color } => surface.fill_rect(*rect, *color),
                DrawCmd::Stroke { rect, width, color } => {
                    surface.stroke_rect(*rect, *width, *color)
                }
                DrawCmd::Sprite { src, dst } => {
                    if let Some(sprite) = sprite {
                        surface.draw_sprite(sprite, *src, *dst);
                    }
                }
            }
        }
    }
}

/// Colors used by the projections.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    pub canvas_frame: Rgba8,
    pub canvas_background: Rgba8,
    pub outline: Rgba8,
    pub outline_dimmed: Rgba8,
    pub selected: Rgba8,
    pub crop_overlay: Rgba8,
    pub middle_point: Rgba8,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            canvas_frame: Rgba8::opaque(0x11, 0x11, 0x11),
            canvas_background: Rgba8::opaque(0x44, 0x44, 0x44),
            outline: Rgba8::opaque(0xa0, 0xff, 0xa0),
            outline_dimmed: Rgba8::new(0xa0, 0xff, 0xa0, 0x60),
            selected: Rgba8::opaque(0xff, 0xd2, 0x4a),
            crop_overlay: Rgba8::new(0, 0, 0, 0x80),
            middle_point: Rgba8::opaque(0xff, 0x40, 0x40),
        }
    }
}

const OUTLINE_GAP: f64 = 2.0;
const OUTLINE_WIDTH: f64 = 2.0;

/// Empty canvas shown before any sprite is opened.
pub fn blank_canvas(size: Size, padding: f64, palette: &Palette) -> DrawList {
    let mut list = DrawList::new(size);
    list.push(DrawCmd::Clear(palette.canvas_frame));
    list.push(DrawCmd::Fill {
        rect: Rect::new(padding, padding, size.width - padding, size.height - padding),
        color: palette.canvas_background,
    });
    list
}

/// The sprite itself, inset by `padding`.
pub fn sprite_backdrop(sprite: Size, padding: f64, palette: &Palette) -> DrawList {
    let mut list = DrawList::new(Size::new(
        sprite.width + padding * 2.0,
        sprite.height + padding * 2.0,
    ));
    list.push(DrawCmd::Clear(palette.canvas_frame));
    list.push(DrawCmd::Sprite {
        src: sprite.to_rect(),
        dst: sprite.to_rect() + Vec2::new(padding, padding),
    });
    list
}

/// Outline of the shared base box, as drawn while it is being sized.
pub fn base_box_outline(frames: &Frames, padding: f64, palette: &Palette) -> Vec<DrawCmd> {
    let r = frames.base_box.rect() + Vec2::new(padding, padding);
    vec![DrawCmd::Stroke {
        rect: r.inflate(OUTLINE_GAP, OUTLINE_GAP),
        width: OUTLINE_WIDTH,
        color: palette.outline,
    }]
}

/// Cropped-out parts of `frame_box` as up to four bands: top, bottom, then the
/// left and right bands between them.
pub fn crop_bands(frame_box: Rect, crop: &Crop) -> Vec<Rect> {
    let inner_top = frame_box.y0 + crop.top;
    let inner_bottom = frame_box.y1 - crop.bottom;
    let bands = [
        Rect::new(frame_box.x0, frame_box.y0, frame_box.x1, inner_top),
        Rect::new(frame_box.x0, inner_bottom, frame_box.x1, frame_box.y1),
        Rect::new(frame_box.x0, inner_top, frame_box.x0 + crop.left, inner_bottom),
        Rect::new(frame_box.x1 - crop.right, inner_top, frame_box.x1, inner_bottom),
    ];
    bands
        .into_iter()
        .filter(|r| r.width() > 0.0 && r.height() > 0.0)
        .collect()
}

/// Outlines for every frame, with crop overlays and the selected frame highlighted.
pub fn frame_outlines(
    frames: &Frames,
    selected: Option<usize>,
    padding: f64,
    palette: &Palette,
) -> Vec<DrawCmd> {
    let offset = Vec2::new(padding, padding);
    let mut cmds = Vec::new();
    for (i, d) in frames.frame_deltas.iter().enumerate() {
        let is_selected = selected == Some(i);
        let accent = if is_selected {
            palette.selected
        } else {
            palette.outline
        };
        let b = frames.frame_box(i) + offset;

        if d.crop.is_zero() {
            cmds.push(DrawCmd::Stroke {
                rect: b.inflate(OUTLINE_GAP, OUTLINE_GAP),
                width: OUTLINE_WIDTH,
                color: accent,
            });
            continue;
        }

        cmds.push(DrawCmd::Stroke {
            rect: b.inflate(OUTLINE_GAP, OUTLINE_GAP),
            width: OUTLINE_WIDTH,
            color: palette.outline_dimmed,
        });
        cmds.extend(crop_bands(b, &d.crop).into_iter().map(|rect| DrawCmd::Fill {
            rect,
            color: palette.crop_overlay,
        }));
        if let Some(v) = frames.visible_rect(i) {
            cmds.push(DrawCmd::Stroke {
                rect: v + offset,
                width: 1.0,
                color: accent,
            });
        }
    }

    if let Some(mp) = selected.and_then(|i| frames.middle_point_at(i)) {
        let c = mp + offset;
        cmds.push(DrawCmd::Fill {
            rect: Rect::new(c.x - 1.5, c.y - 1.5, c.x + 1.5, c.y + 1.5),
            color: palette.middle_point,
        });
    }
    cmds
}

/// Source and destination rectangles for showing one frame in a preview surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PreviewBlit {
    /// Visible (cropped) frame region in sprite pixels.
    pub src: Rect,
    /// Aspect-fit placement inside the preview, centered on the loose axis.
    pub dst: Rect,
}

pub fn fit_preview(frames: &Frames, index: usize, surface: Size) -> Option<PreviewBlit> {
    let src = frames.visible_rect(index)?;
    let (fw, fh) = (src.width(), src.height());
    if fw <= 0.0 || fh <= 0.0 || surface.width <= 0.0 || surface.height <= 0.0 {
        return None;
    }
    let p_ratio = surface.width / surface.height;
    let f_ratio = fw / fh;
    let dst = if p_ratio > f_ratio {
        let w = surface.height * f_ratio;
        let gap = (surface.width - w) / 2.0;
        Rect::new(gap, 0.0, gap + w, surface.height)
    } else {
        let h = surface.width / f_ratio;
        let gap = (surface.height - h) / 2.0;
        Rect::new(0.0, gap, surface.width, gap + h)
    };
    Some(PreviewBlit { src, dst })
}

/// Background fill plus the fitted frame for a preview surface of `size`.
pub fn frame_preview(frames: &Frames, index: usize, size: Size, palette: &Palette) -> DrawList {
    let mut list = DrawList::new(size);
    list.push(DrawCmd::Fill {
        rect: size.to_rect(),
        color: palette.canvas_background,
    });
    if let Some(blit) = fit_preview(frames, index, size) {
        list.push(DrawCmd::Sprite {
            src: blit.src,
            dst: blit.dst,
        });
    }
    list
}
