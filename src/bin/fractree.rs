use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use fractree::{
    AnimationPacer, CpuSurface, FractreeResult, PacerControl, SceneConfig, SessionSweep,
    StyleAttribute, SweepBounds, SweepParam, SweepTarget, SystemClock, TreeSession,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "fractree", version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). `RUST_LOG` takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
    /// Sweep one control with the pacer and write the final frame as a PNG.
    Animate(AnimateArgs),
    /// Overwrite the persisted style bounds with the defaults document.
    ResetStyles(ResetArgs),
}

#[derive(Args, Debug)]
struct SceneArgs {
    /// Scene config JSON. Built-in scene when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Layer count override.
    #[arg(long)]
    layers: Option<i64>,

    /// Branch angle override, degrees.
    #[arg(long)]
    angle: Option<i64>,

    /// Root count override.
    #[arg(long)]
    roots: Option<i64>,

    /// Render worker threads.
    #[arg(long)]
    threads: Option<usize>,
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct AnimateArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// Output PNG path for the last frame.
    #[arg(long)]
    out: PathBuf,

    /// Number of pacer updates before stopping.
    #[arg(long, default_value_t = 60)]
    updates: u64,

    /// Target updates per second (overrides the config).
    #[arg(long)]
    rate: Option<f64>,

    /// Control to sweep: layers, angle or roots (overrides the config).
    #[arg(long)]
    target: Option<SweepParam>,

    /// Also write every update as `frame_NNNNN.png` into this directory.
    #[arg(long)]
    frames_dir: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct ResetArgs {
    /// Scene config JSON naming the defaults and store paths.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Defaults document (overrides the config).
    #[arg(long)]
    defaults: Option<PathBuf>,

    /// Bounds store file (overrides the config).
    #[arg(long)]
    store: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Animate(args) => cmd_animate(args),
        Command::ResetStyles(args) => cmd_reset_styles(args),
    }
}

fn setup_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_config(path: Option<&Path>) -> anyhow::Result<SceneConfig> {
    match path {
        Some(path) => SceneConfig::load(path)
            .with_context(|| format!("load scene config '{}'", path.display())),
        None => Ok(SceneConfig::default()),
    }
}

fn scene_config(args: &SceneArgs) -> anyhow::Result<SceneConfig> {
    let mut cfg = load_config(args.config.as_deref())?;
    for (param, value) in [
        (SweepParam::Layers, args.layers),
        (SweepParam::Angle, args.angle),
        (SweepParam::Roots, args.roots),
    ] {
        let Some(value) = value else {
            continue;
        };
        let control = cfg.params.control_mut(param);
        control.set_value(value);
        if control.value() != value {
            tracing::warn!(%param, requested = value, used = control.value(), "override clamped");
        }
    }
    if args.threads.is_some() {
        cfg.threads = args.threads;
    }
    cfg.validate()?;
    Ok(cfg)
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let cfg = scene_config(&args.scene)?;
    let mut session = cfg.open_session()?;
    let mut surface = CpuSurface::new(cfg.canvas, cfg.background)?;
    session.regenerate(&mut surface)?;
    surface.finish().save_png(&args.out)?;

    tracing::info!(nodes = session.arena().len(), "rendered frame");
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

/// Stops the pacer after a fixed number of updates, optionally saving each one.
struct BoundedSweep<'a> {
    inner: SessionSweep<'a, CpuSurface>,
    control: PacerControl,
    remaining: u64,
    frames_dir: Option<&'a Path>,
    written: u64,
}

impl SweepTarget for BoundedSweep<'_> {
    fn bounds(&self) -> FractreeResult<SweepBounds> {
        self.inner.bounds()
    }

    fn value(&self) -> i64 {
        self.inner.value()
    }

    fn set_value(&mut self, value: i64) -> FractreeResult<()> {
        self.inner.set_value(value)
    }

    fn redraw(&mut self) -> FractreeResult<()> {
        self.inner.redraw()?;
        if let Some(dir) = self.frames_dir {
            let path = dir.join(format!("frame_{:05}.png", self.written));
            self.inner.surface_mut().finish().save_png(&path)?;
        }
        self.written += 1;
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.control.stop();
        }
        Ok(())
    }
}

fn cmd_animate(args: AnimateArgs) -> anyhow::Result<()> {
    let cfg = scene_config(&args.scene)?;
    let target = args.target.unwrap_or(cfg.animation.target);
    let rate = args.rate.unwrap_or(cfg.animation.rate);

    let mut session: TreeSession = cfg.open_session()?;
    let mut surface = CpuSurface::new(cfg.canvas, cfg.background)?;
    session.regenerate(&mut surface)?;

    let mut pacer = AnimationPacer::new(SystemClock::new(), Some(rate));
    let stats = if args.updates == 0 {
        Default::default()
    } else {
        let mut sweep = BoundedSweep {
            inner: session.sweep(target, &mut surface),
            control: pacer.control(),
            remaining: args.updates,
            frames_dir: args.frames_dir.as_deref(),
            written: 0,
        };
        pacer
            .start(&mut sweep)
            .with_context(|| format!("animate '{target}'"))?
    };

    surface.finish().save_png(&args.out)?;
    tracing::info!(
        %target,
        value = session.params().control(target).value(),
        updates = stats.updates,
        steps = stats.steps,
        catch_ups = stats.catch_ups,
        "animation finished"
    );
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_reset_styles(args: ResetArgs) -> anyhow::Result<()> {
    let mut cfg = load_config(args.config.as_deref())?;
    if args.defaults.is_some() {
        cfg.defaults_path = args.defaults;
    }
    if args.store.is_some() {
        cfg.store_path = args.store;
    }
    let style = cfg.open_style(true)?;

    for attr in StyleAttribute::ALL {
        let bounds = style.bounds(attr);
        println!("{attr}: {} -> {}", bounds.start, bounds.end);
    }
    match &cfg.store_path {
        Some(path) => eprintln!("reset {}", path.display()),
        None => eprintln!("no store configured; defaults not persisted"),
    }
    Ok(())
}
