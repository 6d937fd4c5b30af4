use std::{
    net::SocketAddr,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt as _, util::SubscriberInitExt as _};

#[derive(Parser, Debug)]
#[command(name = "tokenarc", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the new-tokens proxy route.
    Serve(ServeArgs),
    /// Render a single marquee frame as a PNG.
    Frame(FrameArgs),
    /// Render one full marquee loop as an MP4 (requires `ffmpeg` on PATH).
    Render(RenderArgs),
    /// Render the liquid-metal button as a PNG.
    Button(ButtonArgs),
}

#[derive(Parser, Debug)]
struct ServeArgs {
    /// Address to listen on.
    #[arg(long, env = "BIND_ADDR", default_value = "127.0.0.1:3000")]
    bind: SocketAddr,

    /// DAS JSON-RPC endpoint.
    #[arg(long, env = "DAS_URL", default_value = tokenarc::feed::DEFAULT_DAS_URL)]
    das_url: String,

    /// DAS API key. Requests fail with 500 while it is unset.
    #[arg(long, env = "HELIUS_API_KEY", hide_env_values = true)]
    api_key: Option<String>,
}

#[derive(Args, Debug)]
struct MarqueeArgs {
    /// Arc curvature; higher is more curved.
    #[arg(long, default_value_t = 0.5)]
    curvature: f64,

    /// Seconds per full loop.
    #[arg(long, default_value_t = 20.0)]
    duration: f64,

    /// Container width in pixels.
    #[arg(long, default_value_t = 1200.0)]
    width: f64,

    /// Depth of the arc curve in pixels.
    #[arg(long, default_value_t = 200.0)]
    arc_height: f64,

    /// Hide the rainbow glow arc.
    #[arg(long)]
    no_glow: bool,
}

impl MarqueeArgs {
    fn config(&self) -> tokenarc::MarqueeConfig {
        tokenarc::MarqueeConfig {
            curvature: self.curvature,
            duration_secs: self.duration,
            width: self.width,
            arc_height: self.arc_height,
            show_rainbow_glow: !self.no_glow,
        }
    }
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Token list JSON: an array of cards or a `{"tokens": [...]}` feed response.
    #[arg(long)]
    tokens: PathBuf,

    /// Time since mount, in milliseconds.
    #[arg(long, default_value_t = 0)]
    time_ms: u64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Directory relative image paths resolve against (defaults to the token file's directory).
    #[arg(long)]
    assets_dir: Option<PathBuf>,

    #[command(flatten)]
    marquee: MarqueeArgs,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Token list JSON: an array of cards or a `{"tokens": [...]}` feed response.
    #[arg(long)]
    tokens: PathBuf,

    /// Output MP4 path.
    #[arg(long)]
    out: PathBuf,

    /// Output frame rate.
    #[arg(long, default_value_t = 30)]
    fps: u32,

    /// Directory relative image paths resolve against (defaults to the token file's directory).
    #[arg(long)]
    assets_dir: Option<PathBuf>,

    #[command(flatten)]
    marquee: MarqueeArgs,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SizeChoice {
    Sm,
    Md,
    Lg,
}

#[derive(Parser, Debug)]
struct ButtonArgs {
    /// Button label.
    #[arg(long, default_value = "Launch a token")]
    label: String,

    /// Optional glyph left of the label.
    #[arg(long)]
    icon: Option<String>,

    #[arg(long, value_enum, default_value_t = SizeChoice::Md)]
    size: SizeChoice,

    /// Metal base color.
    #[arg(long, default_value = "#02FF40")]
    color_back: String,

    /// Metal highlight color.
    #[arg(long, default_value = "#bbf7d0")]
    color_tint: String,

    /// Border sweep speed, turns per second.
    #[arg(long, default_value_t = 0.4)]
    speed: f64,

    /// Time in milliseconds.
    #[arg(long, default_value_t = 0)]
    time_ms: u64,

    /// Render in the disabled state.
    #[arg(long)]
    disabled: bool,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("tokenarc=info,tower_http=info")),
        )
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Serve(args) => cmd_serve(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Render(args) => cmd_render(args),
        Command::Button(args) => cmd_button(args),
    }
}

fn cmd_serve(args: ServeArgs) -> anyhow::Result<()> {
    let config = tokenarc::ServerConfig {
        bind_addr: args.bind,
        das_url: args.das_url,
        api_key: args.api_key,
    };

    let runtime = tokio::runtime::Runtime::new().context("start tokio runtime")?;
    runtime.block_on(tokenarc::server::run(config))
}

fn read_marquee(path: &Path, args: &MarqueeArgs) -> anyhow::Result<tokenarc::Marquee> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("open token list '{}'", path.display()))?;
    let tokens = tokenarc::parse_token_list(&json)
        .with_context(|| format!("parse token list '{}'", path.display()))?;
    Ok(tokenarc::Marquee::new(tokens, args.config())?)
}

fn make_rasterizer(tokens_path: &Path, assets_dir: Option<PathBuf>) -> tokenarc::Rasterizer {
    let dir = assets_dir.unwrap_or_else(|| {
        tokens_path
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .to_path_buf()
    });
    tokenarc::Rasterizer::new().with_resources_dir(dir)
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let marquee = read_marquee(&args.tokens, &args.marquee)?;
    let rasterizer = make_rasterizer(&args.tokens, args.assets_dir);

    let frame = tokenarc::render_still(
        &marquee,
        &rasterizer,
        Duration::from_millis(args.time_ms),
    )?;
    tokenarc::write_png(&frame, &args.out)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let marquee = read_marquee(&args.tokens, &args.marquee)?;
    let rasterizer = make_rasterizer(&args.tokens, args.assets_dir);

    let opts = tokenarc::RenderLoopOpts {
        fps: tokenarc::Fps::new(args.fps, 1)?,
        out_path: args.out.clone(),
        overwrite: true,
        bg_rgba: [5, 5, 7, 255],
    };
    let frames = tokenarc::render_loop_to_mp4(&marquee, &rasterizer, opts)?;

    eprintln!("wrote {} ({frames} frames)", args.out.display());
    Ok(())
}

fn cmd_button(args: ButtonArgs) -> anyhow::Result<()> {
    let size = match args.size {
        SizeChoice::Sm => tokenarc::ButtonSize::Sm,
        SizeChoice::Md => tokenarc::ButtonSize::Md,
        SizeChoice::Lg => tokenarc::ButtonSize::Lg,
    };

    let button = tokenarc::LiquidMetalButton::new(tokenarc::ButtonConfig {
        label: args.label,
        icon: args.icon,
        size,
        disabled: args.disabled,
        metal: tokenarc::LiquidMetalConfig {
            color_back: args.color_back,
            color_tint: args.color_tint,
            speed: args.speed,
            ..tokenarc::LiquidMetalConfig::default()
        },
        ..tokenarc::ButtonConfig::default()
    })?;

    let t_secs = Duration::from_millis(args.time_ms).as_secs_f64();
    let frame = tokenarc::Rasterizer::new().rasterize(&button.svg_document(t_secs))?;
    tokenarc::write_png(&frame, &args.out)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}
