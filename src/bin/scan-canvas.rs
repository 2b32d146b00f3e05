use std::io::Write as _;
use std::path::PathBuf;

use anyhow::Context as _;
use clap::{ArgAction, Args, Parser, Subcommand};
use scan_canvas::{
    ColorDef, CpuSurface, CpuSurfaceOpts, RecordingSurface, ScanAttributes, ScanCanvas,
    ScanDocument,
};

/// Overrides the default base color when no `base-color` attribute is given.
const BASE_COLOR_ENV: &str = "SCAN_CANVAS_BASE_COLOR";

#[derive(Parser, Debug)]
#[command(name = "scan-canvas", version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the grid as a PNG.
    Frame(FrameArgs),
    /// Print the surface calls the renderer issues, as JSON.
    Ops(OpsArgs),
}

/// Grid inputs. Flags take precedence over values from `--in`.
#[derive(Args, Debug)]
struct InputArgs {
    /// Input scan document (JSON object keyed by attribute name).
    #[arg(long = "in")]
    in_path: Option<PathBuf>,

    /// Surface width.
    #[arg(long, allow_hyphen_values = true)]
    width: Option<String>,

    /// Surface height.
    #[arg(long, allow_hyphen_values = true)]
    height: Option<String>,

    /// Cell side length.
    #[arg(long = "pixel-size", allow_hyphen_values = true)]
    pixel_size: Option<String>,

    /// Cell color.
    #[arg(long = "base-color")]
    base_color: Option<String>,

    /// Intensities: a JSON array or a comma/space separated list.
    #[arg(long, allow_hyphen_values = true)]
    pixels: Option<String>,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Background color placed under the cells (default: transparent).
    #[arg(long)]
    background: Option<String>,
}

#[derive(Parser, Debug)]
struct OpsArgs {
    #[command(flatten)]
    input: InputArgs,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Ops(args) => cmd_ops(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn load_attributes(input: &InputArgs) -> anyhow::Result<ScanAttributes> {
    let mut attrs = match &input.in_path {
        Some(path) => ScanDocument::from_path(path)
            .with_context(|| format!("load scan document '{}'", path.display()))?
            .to_attributes(),
        None => ScanAttributes::new(),
    };

    let flags: ScanAttributes = [
        ("width", &input.width),
        ("height", &input.height),
        ("pixel-size", &input.pixel_size),
        ("base-color", &input.base_color),
        ("pixels", &input.pixels),
    ]
    .into_iter()
    .filter_map(|(name, value)| value.as_deref().map(|v| (name, v)))
    .collect();
    attrs.merge(&flags);

    if attrs.get("base-color").is_none()
        && let Some(color) = std::env::var(BASE_COLOR_ENV).ok().filter(|v| !v.is_empty())
    {
        tracing::info!(color = %color, "base color from {BASE_COLOR_ENV}");
        attrs.set("base-color", color);
    }

    Ok(attrs)
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let attrs = load_attributes(&args.input)?;

    let background = args
        .background
        .as_deref()
        .map(|s| ColorDef::parse(s).map(ColorDef::to_rgba8_straight))
        .transpose()
        .context("parse --background")?;
    let opts = CpuSurfaceOpts::default().with_background(background);

    let mut canvas = ScanCanvas::with_attributes(CpuSurface::new(opts), attrs);
    canvas.connect();

    let frame = canvas.surface_mut().to_frame()?;
    if frame.is_empty() {
        anyhow::bail!("nothing to render: width, height and pixel-size must all be positive");
    }

    frame
        .save_png(&args.out)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_ops(args: OpsArgs) -> anyhow::Result<()> {
    let attrs = load_attributes(&args.input)?;

    let mut canvas = ScanCanvas::with_attributes(RecordingSurface::new(), attrs);
    canvas.connect();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    serde_json::to_writer_pretty(&mut out, canvas.surface().ops()).context("encode ops")?;
    writeln!(out)?;
    Ok(())
}
