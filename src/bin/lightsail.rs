use std::io;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use lightsail::config::{RunConfig, StepPolicyConfig, load_run_config};
use lightsail::common::time::{seconds_to_days, split_duration};
use lightsail::common::units::{m_to_gm, ms_to_kms, percent_of_light_speed};
use lightsail::flight::{AccelerationProfile, StepPolicy};
use lightsail::mission::{FramePacer, Mission, MissionOutcome, MissionReport};
use lightsail::scene::{PlotRenderer, RenderFanout, TerminalRenderer};

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Light sail flight to Proxima Centauri b (100 GW laser, 2 g sail)"
)]
struct Cli {
    /// Run configuration (.toml, .yaml or .yml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write PNG snapshots into this directory
    #[arg(long)]
    frames_dir: Option<PathBuf>,

    /// Snapshot interval in ticks
    #[arg(long)]
    frame_every: Option<u64>,

    /// Ticks per second (0 disables pacing)
    #[arg(long)]
    fps: Option<u32>,

    /// Do not sleep between ticks
    #[arg(long, default_value_t = false)]
    unpaced: bool,

    /// Stop after this many ticks
    #[arg(long)]
    max_ticks: Option<u64>,

    /// Whether a halved step carries into later ticks
    #[arg(long, value_enum)]
    step_policy: Option<PolicyArg>,

    /// Starfield seed
    #[arg(long)]
    seed: Option<u64>,

    /// Skip the live overlay; print only the final summary
    #[arg(long, default_value_t = false)]
    quiet: bool,
}

#[derive(Copy, Clone, ValueEnum, Debug)]
enum PolicyArg {
    Persistent,
    ResetEachTick,
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .compact()
        .init();
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let config = resolve_config(&cli)?;

    let policy = match config.simulation.step_policy {
        StepPolicyConfig::Persistent => StepPolicy::Persistent,
        StepPolicyConfig::ResetEachTick => StepPolicy::ResetEachTick,
    };
    let mut mission = Mission::proxima(policy, config.scene.star_count, config.scene.star_seed)?
        .with_max_ticks(config.simulation.max_ticks);

    let mut renderer = RenderFanout::new();
    if !cli.quiet {
        // Unpaced runs only redraw every thousandth tick.
        let redraw_every = if config.simulation.frame_rate_hz == 0 { 1_000 } else { 1 };
        renderer.push(Box::new(TerminalRenderer::new(io::stdout(), redraw_every)));
    }
    if let Some(dir) = &config.render.frames_dir {
        let plot = PlotRenderer::new(
            dir,
            config.render.width,
            config.render.height,
            config.render.frame_every,
        )?
        .with_labels(config.render.labels);
        renderer.push(Box::new(plot));
    }

    let mut pacer = FramePacer::new(config.simulation.frame_rate_hz);
    let report = mission.run(&mut renderer, &mut pacer)?;
    print_summary(&mission, &report, cli.quiet);
    Ok(())
}

/// File values first, then command-line overrides.
fn resolve_config(cli: &Cli) -> anyhow::Result<RunConfig> {
    let mut config = match &cli.config {
        Some(path) => load_run_config(path)?,
        None => RunConfig::default(),
    };
    if let Some(dir) = &cli.frames_dir {
        config.render.frames_dir = Some(dir.clone());
    }
    if let Some(every) = cli.frame_every {
        config.render.frame_every = every;
    }
    if let Some(fps) = cli.fps {
        config.simulation.frame_rate_hz = fps;
    }
    if cli.unpaced {
        config.simulation.frame_rate_hz = 0;
    }
    if cli.max_ticks.is_some() {
        config.simulation.max_ticks = cli.max_ticks;
    }
    if let Some(policy) = cli.step_policy {
        config.simulation.step_policy = match policy {
            PolicyArg::Persistent => StepPolicyConfig::Persistent,
            PolicyArg::ResetEachTick => StepPolicyConfig::ResetEachTick,
        };
    }
    if let Some(seed) = cli.seed {
        config.scene.star_seed = seed;
    }
    config.validate()?;
    Ok(config)
}

fn print_summary(mission: &Mission, report: &MissionReport, quiet: bool) {
    let state = &report.final_state;
    let (d, h, m) = split_duration(state.elapsed_s);

    // Without the live overlay the last status block has not been shown yet.
    if quiet {
        println!("{}", report.final_status);
    }
    println!();
    println!("=== Flight Summary ===");
    println!(
        "Outcome        : {}",
        match report.outcome {
            MissionOutcome::Arrived => "arrived",
            MissionOutcome::TickLimit => "stopped at tick limit",
        }
    );
    println!("Ticks          : {}", report.ticks);
    println!(
        "Mission clock  : {:.2} days ({}d {}h {}m)",
        seconds_to_days(state.elapsed_s),
        d,
        h,
        m
    );
    match &report.cutoff {
        Some(cutoff) => println!(
            "Laser cutoff   : tick {}, t = {:.3} s, after {:.3} Gm",
            cutoff.tick,
            cutoff.elapsed_s,
            m_to_gm(cutoff.position_m)
        ),
        None => println!("Laser cutoff   : not reached"),
    }
    println!(
        "Final speed    : {:.2} km/s ({:.2}% c)",
        ms_to_kms(state.velocity_m_s),
        percent_of_light_speed(state.velocity_m_s)
    );
    println!("Final step     : {:.3e} s", state.step_s);

    if let Some(profile) = AccelerationProfile::analytic(mission.integrator().params()) {
        println!(
            "Ideal profile  : burn {:.2} s over {:.3} Gm, arrival after {:.2} days",
            profile.burn_time_s,
            m_to_gm(profile.burn_distance_m),
            seconds_to_days(profile.time_of_flight_s)
        );
    }
}
