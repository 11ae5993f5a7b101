//! Packing every animation's frames into one atlas image.
//!
//! Each animation becomes a block of equally sized cells (its base box), laid
//! out left to right and wrapped at the sheet width. Blocks are stacked
//! top to bottom in project order. A cropped frame keeps its crop offset inside
//! its cell so frames of one animation stay aligned.

use crate::config::SheetConfig;
use crate::foundation::core::{Point, Rect, Size, Vec2};
use crate::foundation::error::{SpriteError, SpriteResult};
use crate::frames::Frames;
use crate::project::Project;
use crate::render::projection::{DrawCmd, DrawList};
use crate::render::raster::RasterSurface;
use crate::sprite::SpriteImage;

/// Sheet size picked by [`choose_sheet_size`].
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SheetSize {
    pub width: f64,
    pub height: f64,
    /// Cells per row of each block, in block order.
    pub per_row: Vec<usize>,
}

impl SheetSize {
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    pub fn ratio(&self) -> f64 {
        self.width / self.height
    }
}

/// Where one frame is copied from and to.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Placement {
    pub animation: String,
    pub frame: usize,
    /// Visible frame region in the sprite.
    pub src: Rect,
    /// Same-sized region in the sheet.
    pub dst: Rect,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SheetLayout {
    pub width: u32,
    pub height: u32,
    pub placements: Vec<Placement>,
}

/// Cell grid of one animation, as seen by the width search.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Block {
    pub cell: Size,
    pub count: usize,
}

impl Block {
    fn of(frames: &Frames) -> Self {
        Self {
            cell: frames.base_box.size(),
            count: frames.len(),
        }
    }

    /// Cells that fit side by side in `sheet_width`, at least one.
    pub fn fitting(&self, sheet_width: f64) -> usize {
        ((sheet_width / self.cell.width).floor() as usize).max(1)
    }

    pub fn rows(&self, per_row: usize) -> usize {
        self.count.div_ceil(per_row.max(1))
    }

    /// Sheet width at which one more cell fits per row.
    fn next_width(&self, per_row: usize) -> f64 {
        (per_row + 1) as f64 * self.cell.width
    }
}

pub fn sheet_height(blocks: &[Block], per_row: &[usize]) -> f64 {
    blocks
        .iter()
        .zip(per_row)
        .map(|(b, &n)| b.rows(n) as f64 * b.cell.height)
        .sum()
}

/// Search sheet widths for the smallest area whose ratio stays within bounds.
///
/// Candidates start at twice the widest cell plus 2 and then jump to the next
/// width at which some block fits one more cell per row. Per-row counts are
/// stepped as integers, never derived back from the float width. The search
/// ends once the sheet gets too wide or every block already fits in a single row.
pub fn choose_sheet_size(blocks: &[Block], cfg: &SheetConfig) -> Option<SheetSize> {
    if blocks.is_empty()
        || blocks
            .iter()
            .any(|b| !b.cell.width.is_finite() || b.cell.width <= 0.0)
    {
        return None;
    }
    let max_cell = blocks.iter().map(|b| b.cell.width).fold(0.0, f64::max);

    let mut width = 2.0 * max_cell + 2.0;
    let mut per_row: Vec<usize> = blocks.iter().map(|b| b.fitting(width)).collect();
    let mut first: Option<SheetSize> = None;
    let mut last = None;
    let mut best: Option<SheetSize> = None;
    let mut all_too_tall = true;

    loop {
        let cand = SheetSize {
            width,
            height: sheet_height(blocks, &per_row),
            per_row: per_row.clone(),
        };
        let ratio = cand.ratio();
        tracing::trace!(width, height = cand.height, ratio, "sheet candidate");

        if ratio >= cfg.min_ratio {
            all_too_tall = false;
        }
        if (cfg.min_ratio..=cfg.max_ratio).contains(&ratio)
            && best.as_ref().is_none_or(|b| cand.area() < b.area())
        {
            best = Some(cand.clone());
        }
        if first.is_none() {
            first = Some(cand.clone());
        }
        last = Some(cand);

        let single_row = blocks.iter().zip(&per_row).all(|(b, &n)| n >= b.count);
        if ratio > cfg.max_ratio || single_row {
            break;
        }
        width = blocks
            .iter()
            .zip(&per_row)
            .map(|(b, &n)| b.next_width(n))
            .fold(f64::INFINITY, f64::min);
        for (b, n) in blocks.iter().zip(per_row.iter_mut()) {
            if b.next_width(*n) <= width {
                *n += 1;
            }
        }
    }

    best.or(if all_too_tall { last } else { first })
}

/// Lay out the given animations on one sheet.
#[tracing::instrument(skip_all, fields(animations = tracing::field::Empty))]
pub fn pack_frames<'a>(
    frames: impl IntoIterator<Item = &'a Frames>,
    cfg: &SheetConfig,
) -> SpriteResult<SheetLayout> {
    let frames: Vec<&Frames> = frames.into_iter().filter(|f| !f.is_empty()).collect();
    tracing::Span::current().record("animations", frames.len());
    if frames.is_empty() {
        return Err(SpriteError::export("there are no animations to export"));
    }
    if let Some(bad) = frames
        .iter()
        .find(|f| f.base_box.width <= 0.0 || f.base_box.height <= 0.0)
    {
        return Err(SpriteError::export(format!(
            "animation '{}' has an empty base box",
            bad.animation_name
        )));
    }

    let blocks: Vec<Block> = frames.iter().map(|f| Block::of(f)).collect();
    let size = choose_sheet_size(&blocks, cfg)
        .ok_or_else(|| SpriteError::export("no sheet size fits the animations"))?;

    let mut placements = Vec::new();
    let mut block_top = 0.0;
    for ((f, block), &per_row) in frames.iter().zip(&blocks).zip(&size.per_row) {
        for (i, d) in f.frame_deltas.iter().enumerate() {
            let Some(src) = f.visible_rect(i) else {
                continue;
            };
            let cell = Point::new(
                (i % per_row) as f64 * block.cell.width,
                block_top + (i / per_row) as f64 * block.cell.height,
            );
            let origin = cell + Vec2::new(d.crop.left, d.crop.top);
            placements.push(Placement {
                animation: f.animation_name.clone(),
                frame: i,
                src,
                dst: Rect::from_origin_size(origin, src.size()),
            });
        }
        block_top += block.rows(per_row) as f64 * block.cell.height;
    }

    let layout = SheetLayout {
        width: size.width.ceil() as u32,
        height: size.height.ceil() as u32,
        placements,
    };
    tracing::info!(
        width = layout.width,
        height = layout.height,
        frames = layout.placements.len(),
        "packed sheet"
    );
    Ok(layout)
}

/// Lay out every exportable animation of the project.
pub fn pack(project: &Project, cfg: &SheetConfig) -> SpriteResult<SheetLayout> {
    pack_frames(project.exportable().map(|a| &a.frames), cfg)
}

/// Copy the frames of a layout out of the sprite into a new image.
pub fn compose_atlas(layout: &SheetLayout, sprite: &SpriteImage) -> image::RgbaImage {
    let size = Size::new(f64::from(layout.width), f64::from(layout.height));
    let mut list = DrawList::new(size);
    list.extend(layout.placements.iter().map(|p| DrawCmd::Sprite {
        src: p.src,
        dst: p.dst,
    }));
    let mut surface = RasterSurface::new(size);
    list.execute(&mut surface, Some(sprite));
    surface.into_image()
}

#[cfg(test)]
#[path = "../tests/unit/export/export.rs"]
mod tests;
