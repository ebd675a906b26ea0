use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand, ValueEnum};
use sha2::Digest as _;

#[derive(Parser, Debug)]
#[command(name = "wavefield", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
    /// Record every frame up to the terminal frame as a numbered PNG sequence.
    Render(RenderArgs),
    /// Print the effective scene configuration as JSON.
    Config(SceneArgs),
}

#[derive(Args, Debug)]
struct SceneArgs {
    /// Scene configuration JSON. Missing keys use built-in defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override canvas width.
    #[arg(long)]
    width: Option<u32>,

    /// Override canvas height.
    #[arg(long)]
    height: Option<u32>,

    /// Override the noise seed.
    #[arg(long)]
    seed: Option<u64>,

    /// Override the terminal frame.
    #[arg(long)]
    terminal_frame: Option<u64>,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// Frame index (0-based).
    #[arg(long, default_value_t = 0)]
    frame: u64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Backend to use.
    #[arg(long, value_enum, default_value_t = BackendChoice::Cpu)]
    backend: BackendChoice,

    /// Print the SHA-256 of the rendered pixels.
    #[arg(long)]
    digest: bool,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// Write numbered PNG frames into this directory.
    #[arg(long)]
    out_dir: PathBuf,

    /// Backend to use.
    #[arg(long, value_enum, default_value_t = BackendChoice::Cpu)]
    backend: BackendChoice,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum BackendChoice {
    Cpu,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Render(args) => cmd_render(args),
        Command::Config(args) => cmd_config(args),
    }
}

fn load_scene(args: &SceneArgs) -> anyhow::Result<wavefield::SceneConfig> {
    let mut cfg = match &args.config {
        Some(path) => wavefield::SceneConfig::load(path)
            .with_context(|| format!("load scene config '{}'", path.display()))?,
        None => wavefield::SceneConfig::default(),
    };
    if let Some(w) = args.width {
        cfg.canvas.width = w;
    }
    if let Some(h) = args.height {
        cfg.canvas.height = h;
    }
    if let Some(seed) = args.seed {
        cfg.seed = seed;
    }
    if let Some(terminal) = args.terminal_frame {
        cfg.terminal_frame = terminal;
    }
    cfg.validate().context("invalid scene config")?;
    Ok(cfg)
}

fn make_backend(
    choice: BackendChoice,
    settings: &wavefield::RenderSettings,
) -> anyhow::Result<Box<dyn wavefield::RenderBackend>> {
    let kind = match choice {
        BackendChoice::Cpu => wavefield::BackendKind::Cpu,
    };

    Ok(wavefield::create_backend(kind, settings)?)
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let cfg = load_scene(&args.scene)?;
    let mut backend = make_backend(args.backend, &cfg.render_settings())?;
    let mut session = wavefield::WaveSession::new(cfg)?;

    let frame = session.render_frame(wavefield::FrameIndex(args.frame), backend.as_mut())?;

    wavefield::ensure_parent_dir(&args.out)?;
    let straight = unpremultiply(&frame);
    image::save_buffer_with_format(
        &args.out,
        &straight,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    if args.digest {
        println!("{}", sha256_hex(&frame.data));
    }
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let cfg = load_scene(&args.scene)?;
    let settings = cfg.render_settings();
    let mut backend = make_backend(args.backend, &settings)?;
    let mut session = wavefield::WaveSession::new(cfg)?;

    let mut opts = wavefield::PngSequenceOpts::new(&args.out_dir);
    opts.bg_rgba = settings.clear_rgba.unwrap_or([0, 0, 0, 255]);
    let mut sink = wavefield::PngSequenceSink::new(opts);

    let stats = session.run(backend.as_mut(), &mut sink)?;

    eprintln!(
        "wrote {} frames (0..={}) to {}",
        stats.frames_rendered,
        stats.last_frame,
        args.out_dir.display()
    );
    Ok(())
}

fn cmd_config(args: SceneArgs) -> anyhow::Result<()> {
    let cfg = load_scene(&args)?;
    println!("{}", cfg.to_json_pretty()?);
    Ok(())
}

fn unpremultiply(frame: &wavefield::FrameRGBA) -> Vec<u8> {
    let mut out = frame.data.clone();
    if !frame.premultiplied {
        return out;
    }
    for px in out.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
        }
    }
    out
}

fn sha256_hex(bytes: &[u8]) -> String {
    let digest = sha2::Sha256::digest(bytes);
    let mut out = String::with_capacity(digest.len() * 2);
    for b in digest {
        out.push_str(&format!("{:02x}", b));
    }
    out
}
