use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use std::path::PathBuf;
use stickpaint::backend::{Script, SimClock, SimDisplay, SimInput};
use stickpaint::hal::HeapPool;
use stickpaint::{Config, Controller, Runtime};

/// Stick rest reading used when no script is given.
const DEFAULT_REST: [u16; 2] = [2048, 2048];

#[derive(Parser, Debug)]
#[command(name = "stickpaint")]
#[command(
    version,
    long_version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("STICKPAINT_GIT_HASH"), ")"),
    about = "Joystick paint controller running on the simulator board"
)]
struct Cli {
    /// Config file (defaults to ~/.config/stickpaint/config.toml)
    #[arg(long, short = 'c', value_name = "PATH")]
    config: Option<PathBuf>,

    /// TOML input script to replay
    #[arg(long, short = 's', value_name = "PATH")]
    script: Option<PathBuf>,

    /// Number of ticks to run (defaults to the script length)
    #[arg(
        long,
        short = 't',
        value_name = "N",
        required_unless_present_any = ["script", "init_config"]
    )]
    ticks: Option<u64>,

    /// Write the documented default config and exit
    #[arg(long, action = ArgAction::SetTrue)]
    init_config: bool,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    if cli.init_config {
        let path = match cli.config {
            Some(path) => path,
            None => Config::get_config_path()?,
        };
        Config::create_default_file(&path)?;
        println!("Wrote default config to {}", path.display());
        return Ok(());
    }

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let script = cli.script.as_deref().map(Script::load).transpose()?;

    let tick_ms = config.runtime.tick_ms;
    let ticks = match (cli.ticks, &script) {
        (Some(ticks), _) => ticks,
        // one extra tick so the final release is seen
        (None, Some(script)) => script.total_ms().div_ceil(u64::from(tick_ms)) + 1,
        (None, None) => anyhow::bail!("--ticks is required without --script"),
    };

    let mut clock = SimClock::new();
    let mut input = match script {
        Some(script) => SimInput::with_script(clock.handle(), script),
        None => SimInput::new(clock.handle(), DEFAULT_REST),
    };
    let mut display = SimDisplay::new(config.canvas.width, config.canvas.height);

    let controller = Controller::start(
        &config,
        Box::new(HeapPool),
        &mut display,
        &mut input,
        &mut clock,
    )
    .context("Controller startup failed")?;

    let mut runtime = Runtime::new(controller, display, input, clock, tick_ms);
    let stats = runtime.run(Some(ticks)).context("Paint loop stopped")?;

    let controller = runtime.controller();
    let canvas = controller.canvas();
    let painted = canvas
        .pixels()
        .iter()
        .filter(|&&p| p != canvas.background().raw())
        .count();
    let (x, y) = controller.position().pixel();

    println!("Session summary:");
    println!("  ticks:          {}", stats.ticks);
    println!("  strokes:        {}", stats.strokes);
    println!("  dabs:           {}", stats.dabs);
    println!("  undos:          {}", stats.undos);
    println!("  clears:         {}", stats.clears);
    println!("  colors picked:  {}", stats.colors_picked);
    println!("  undo snapshots: {}", controller.drawing().history().len());
    println!("  painted pixels: {painted}");
    println!("  cursor:         ({x}, {y})");
    println!("  color:          {:#06x}", controller.color().raw());

    Ok(())
}
