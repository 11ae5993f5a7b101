use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use spritebox::RasterSurface;

#[derive(Parser, Debug)]
#[command(name = "spritebox", version)]
struct Cli {
    /// Editor config JSON; defaults apply to missing keys.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Pack every animation into one atlas PNG.
    Export(ExportArgs),
    /// Render a single frame, aspect-fit, as a PNG.
    Preview(PreviewArgs),
    /// Render the sprite with frame outlines as a PNG.
    Outlines(OutlinesArgs),
}

#[derive(Parser, Debug)]
struct Inputs {
    /// Sprite sheet image.
    #[arg(long)]
    sprite: PathBuf,

    /// Animations JSON (a list of frames objects).
    #[arg(long)]
    frames: PathBuf,
}

#[derive(Parser, Debug)]
struct ExportArgs {
    #[command(flatten)]
    inputs: Inputs,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Also write the sheet layout as JSON.
    #[arg(long)]
    layout: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct PreviewArgs {
    #[command(flatten)]
    inputs: Inputs,

    /// Animation name; the first animation when omitted.
    #[arg(long)]
    animation: Option<String>,

    /// Frame index (0-based).
    #[arg(long, default_value_t = 0)]
    frame: usize,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct OutlinesArgs {
    #[command(flatten)]
    inputs: Inputs,

    /// Animation name; the first animation when omitted.
    #[arg(long)]
    animation: Option<String>,

    /// Highlight this frame.
    #[arg(long)]
    selected: Option<usize>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;
    match cli.cmd {
        Command::Export(args) => cmd_export(args, &config),
        Command::Preview(args) => cmd_preview(args, &config),
        Command::Outlines(args) => cmd_outlines(args, &config),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<spritebox::EditorConfig> {
    let cfg = match path {
        Some(p) => spritebox::EditorConfig::from_path(p)
            .with_context(|| format!("load config '{}'", p.display()))?,
        None => spritebox::EditorConfig::default(),
    };
    let cfg = cfg.with_env_overrides();
    cfg.validate()?;
    Ok(cfg)
}

fn read_inputs(
    inputs: &Inputs,
) -> anyhow::Result<(spritebox::SpriteImage, Vec<spritebox::Frames>)> {
    let sprite = spritebox::SpriteImage::open(&inputs.sprite)
        .with_context(|| format!("open sprite '{}'", inputs.sprite.display()))?;
    let f = File::open(&inputs.frames)
        .with_context(|| format!("open frames '{}'", inputs.frames.display()))?;
    let frames: Vec<spritebox::Frames> = serde_json::from_reader(BufReader::new(f))
        .context("parse frames JSON")?;
    Ok((sprite, frames))
}

fn pick<'a>(
    frames: &'a [spritebox::Frames],
    name: Option<&str>,
) -> anyhow::Result<&'a spritebox::Frames> {
    match name {
        Some(name) => frames
            .iter()
            .find(|f| f.animation_name == name)
            .with_context(|| format!("no animation named '{name}'")),
        None => frames.first().context("frames JSON holds no animations"),
    }
}

fn write_png(img: &image::RgbaImage, out: &Path) -> anyhow::Result<()> {
    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    img.save_with_format(out, image::ImageFormat::Png)
        .with_context(|| format!("write png '{}'", out.display()))?;
    eprintln!("wrote {}", out.display());
    Ok(())
}

fn cmd_export(args: ExportArgs, config: &spritebox::EditorConfig) -> anyhow::Result<()> {
    let (sprite, frames) = read_inputs(&args.inputs)?;
    let project = spritebox::Project::from_frames(sprite, frames);
    let layout = spritebox::pack(&project, &config.sheet)?;
    let atlas = spritebox::compose_atlas(&layout, project.sprite());
    write_png(&atlas, &args.out)?;

    if let Some(path) = args.layout {
        let json = serde_json::to_string_pretty(&layout).context("serialize sheet layout")?;
        std::fs::write(&path, json)
            .with_context(|| format!("write layout '{}'", path.display()))?;
        eprintln!("wrote {}", path.display());
    }
    Ok(())
}

fn cmd_preview(args: PreviewArgs, config: &spritebox::EditorConfig) -> anyhow::Result<()> {
    let (sprite, frames) = read_inputs(&args.inputs)?;
    let anim = pick(&frames, args.animation.as_deref())?;
    if args.frame >= anim.len() {
        anyhow::bail!(
            "frame {} is out of range, '{}' has {} frames",
            args.frame,
            anim.animation_name,
            anim.len()
        );
    }
    let list = spritebox::render::frame_preview(
        anim,
        args.frame,
        config.preview_size,
        &spritebox::Palette::default(),
    );
    let mut surface = RasterSurface::new(list.size);
    list.execute(&mut surface, Some(&sprite));
    write_png(&surface.into_image(), &args.out)
}

fn cmd_outlines(args: OutlinesArgs, config: &spritebox::EditorConfig) -> anyhow::Result<()> {
    let (sprite, frames) = read_inputs(&args.inputs)?;
    let anim = pick(&frames, args.animation.as_deref())?;
    let palette = spritebox::Palette::default();
    let padding = config.canvas_padding;

    let mut list = spritebox::render::sprite_backdrop(sprite.size(), padding, &palette);
    list.extend(spritebox::render::frame_outlines(
        anim,
        args.selected,
        padding,
        &palette,
    ));
    let mut surface = RasterSurface::new(list.size);
    list.execute(&mut surface, Some(&sprite));
    write_png(&surface.into_image(), &args.out)
}
