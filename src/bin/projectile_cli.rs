use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use log::warn;
use serde::Serialize;

use projectile_lab::constants::STORE_CAPACITY;
use projectile_lab::{
    integrate, load_scenario, resolve_drag_coefficient, AtmosphereModel, Color, PlotExtent,
    ResultStore, SimulationParameters, Trajectory, TrajectoryPoint, SHAPE_PRESETS,
};

#[derive(Parser)]
#[command(name = "projectile")]
#[command(version)]
#[command(about = "Projectile trajectories with drag, wind and atmosphere models", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate a single trajectory
    Trajectory {
        #[command(flatten)]
        shot: ShotArgs,

        /// Output format
        #[arg(short = 'o', long, default_value = "table")]
        output: OutputFormat,

        /// Full output (show all trajectory points)
        #[arg(long)]
        full: bool,
    },

    /// Compute every shot in a scenario file and compare the stored results
    Compare {
        /// Scenario file (TOML)
        #[arg(short = 'c', long)]
        config: PathBuf,

        /// Output format
        #[arg(short = 'o', long, default_value = "table")]
        output: OutputFormat,
    },

    /// Replay a trajectory point by point
    Playback {
        #[command(flatten)]
        shot: ShotArgs,

        /// Frames per second (0 prints without pausing)
        #[arg(long, default_value = "0")]
        fps: f64,
    },

    /// List atmosphere models and shape presets
    Info,
}

#[derive(Args, Debug)]
struct ShotArgs {
    /// Initial velocity (m/s)
    #[arg(short = 'v', long)]
    velocity: f64,

    /// Launch angle (degrees)
    #[arg(short = 'a', long, default_value = "45.0", allow_hyphen_values = true)]
    angle: f64,

    /// Mass (kg)
    #[arg(short = 'm', long, default_value = "1.0")]
    mass: f64,

    /// Shape label; selects a preset drag coefficient
    #[arg(short = 's', long, default_value = "sphere")]
    shape: String,

    /// Drag coefficient (overrides the shape preset)
    #[arg(long = "cd")]
    drag_coefficient: Option<f64>,

    /// Reference area (m²)
    #[arg(long, default_value = "0.01")]
    area: f64,

    /// Initial height (meters)
    #[arg(long, default_value = "0.0")]
    height: f64,

    /// Wind speed (m/s)
    #[arg(long, default_value = "0.0", allow_hyphen_values = true)]
    wind_speed: f64,

    /// Wind direction (degrees, 0 = headwind, 180 = tailwind)
    #[arg(long, default_value = "0.0", allow_hyphen_values = true)]
    wind_direction: f64,

    /// Atmosphere model (const1225, const1290, isa)
    #[arg(long, default_value = "const1225")]
    atmosphere: AtmosphereModel,

    /// Time step (seconds)
    #[arg(long, default_value = "0.01")]
    time_step: f64,
}

impl ShotArgs {
    fn to_parameters(&self) -> Result<SimulationParameters> {
        let drag_coefficient = resolve_drag_coefficient(&self.shape, self.drag_coefficient)?;

        Ok(SimulationParameters {
            initial_speed: self.velocity,
            launch_angle: self.angle,
            mass: self.mass,
            drag_coefficient,
            reference_area: self.area,
            time_step: self.time_step,
            initial_height: self.height,
            wind_speed: self.wind_speed,
            wind_direction: self.wind_direction,
            atmosphere: self.atmosphere,
            shape: self.shape.clone(),
        })
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Csv,
    Table,
}

#[derive(Debug, Serialize)]
struct TrajectoryReport<'a> {
    shape: &'a str,
    params: &'a SimulationParameters,
    range: f64,
    max_height: f64,
    final_speed: f64,
    time_of_flight: f64,
    step_count: u64,
    truncated: bool,
    color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    trajectory: Option<&'a [TrajectoryPoint]>,
}

impl<'a> TrajectoryReport<'a> {
    fn new(t: &'a Trajectory, with_points: bool) -> Self {
        Self {
            shape: &t.params.shape,
            params: &t.params,
            range: t.range,
            max_height: t.max_height,
            final_speed: t.final_speed,
            time_of_flight: t.time_of_flight,
            step_count: t.step_count,
            truncated: t.is_truncated(),
            color: t.color,
            trajectory: with_points.then_some(t.points.as_slice()),
        }
    }
}

#[derive(Debug, Serialize)]
struct Rejection {
    shot: usize,
    shape: String,
    reason: &'static str,
    message: String,
}

#[derive(Debug, Serialize)]
struct CompareReport<'a> {
    stored: Vec<TrajectoryReport<'a>>,
    rejected: Vec<Rejection>,
    plot_extent: PlotExtent,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Trajectory { shot, output, full } => {
            let params = shot.to_parameters()?;
            let trajectory = integrate(&params)?;
            display_trajectory(&trajectory, output, full)?;
        }

        Commands::Compare { config, output } => {
            let shots = load_scenario(&config)
                .with_context(|| format!("loading scenario {}", config.display()))?;

            let mut store = ResultStore::new();
            let mut rejected = Vec::new();
            for (i, params) in shots.into_iter().enumerate() {
                let shape = params.shape.clone();
                let trajectory = integrate(&params)
                    .with_context(|| format!("integrating shot {}", i + 1))?;
                if trajectory.is_truncated() {
                    warn!("shot {} ({}) stopped at the step cap before landing", i + 1, shape);
                }
                if let Err(err) = store.insert(trajectory) {
                    warn!("shot {} ({}) not stored: {}", i + 1, shape, err);
                    rejected.push(Rejection {
                        shot: i + 1,
                        shape,
                        reason: err.reason(),
                        message: err.to_string(),
                    });
                }
            }

            display_comparison(&store, rejected, output)?;
        }

        Commands::Playback { shot, fps } => {
            let params = shot.to_parameters()?;
            let trajectory = integrate(&params)?;
            let pause = if fps > 0.0 {
                let interval = Duration::try_from_secs_f64(1.0 / fps)
                    .with_context(|| format!("--fps {} gives an unusable frame interval", fps))?;
                Some(interval)
            } else {
                None
            };

            println!("frame,index,x,y");
            for (frame, step) in trajectory.playback().enumerate() {
                println!("{},{},{:.3},{:.3}", frame, step.index, step.point.x, step.point.y);
                if let Some(pause) = pause {
                    thread::sleep(pause);
                }
            }
        }

        Commands::Info => {
            println!("╔════════════════════════════════════════╗");
            println!("║          PROJECTILE LAB v{:<8}      ║", env!("CARGO_PKG_VERSION"));
            println!("╠════════════════════════════════════════╣");
            println!("║ Atmosphere models:                     ║");
            for model in AtmosphereModel::ALL {
                println!("║ • {:<10} {:<27} ║", model.as_str(), truncate(model.description(), 27));
            }
            println!("╠════════════════════════════════════════╣");
            println!("║ Shape presets (Cd):                    ║");
            for (name, cd) in SHAPE_PRESETS {
                println!("║ • {:<22} {:>6.2}         ║", name, cd);
            }
            println!("╠════════════════════════════════════════╣");
            println!("║ Result store holds up to {:<3} entries   ║", STORE_CAPACITY);
            println!("╚════════════════════════════════════════╝");
        }
    }

    Ok(())
}

fn truncate(text: &str, width: usize) -> String {
    text.chars().take(width).collect()
}

fn display_trajectory(result: &Trajectory, format: OutputFormat, full: bool) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&TrajectoryReport::new(result, true))?);
        }

        OutputFormat::Csv => {
            println!("x,y");
            for p in &result.points {
                println!("{:.4},{:.4}", p.x, p.y);
            }
        }

        OutputFormat::Table => {
            println!("╔════════════════════════════════════════╗");
            println!("║         TRAJECTORY RESULTS             ║");
            println!("╠════════════════════════════════════════╣");
            println!("║ Range:             {:>10.2} m        ║", result.range);
            println!("║ Max Height:        {:>10.2} m        ║", result.max_height);
            println!("║ Time of Flight:    {:>10.3} s        ║", result.time_of_flight);
            println!("║ Final Speed:       {:>10.2} m/s      ║", result.final_speed);
            println!("║ Steps:             {:>10}          ║", result.step_count);
            println!("║ Points Kept:       {:>10}          ║", result.points.len());
            if result.is_truncated() {
                println!("║ STEP CAP REACHED: landing approximate  ║");
            }
            println!("╚════════════════════════════════════════╝");

            println!("\nTrajectory Points:");
            println!("┌──────────┬──────────┐");
            println!("│  X (m)   │  Y (m)   │");
            println!("├──────────┼──────────┤");

            let step = if full { 1 } else { (result.points.len() / 10).max(1) };
            let last = result.points.len() - 1;
            for (i, p) in result.points.iter().enumerate() {
                if i % step == 0 || i == last {
                    println!("│ {:>8.2} │ {:>8.2} │", p.x, p.y);
                }
            }
            println!("└──────────┴──────────┘");
        }
    }

    Ok(())
}

fn display_comparison(store: &ResultStore, rejected: Vec<Rejection>, format: OutputFormat) -> Result<()> {
    let extent = PlotExtent::from_trajectories(store);

    match format {
        OutputFormat::Json => {
            let report = CompareReport {
                stored: store.iter().map(|t| TrajectoryReport::new(t, false)).collect(),
                rejected,
                plot_extent: extent,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }

        OutputFormat::Csv => {
            println!("index,color,shape,velocity,angle,cd,atmosphere,range,max_height,final_speed,steps,truncated");
            for (i, t) in store.iter().enumerate() {
                let color = t.color.map(|c| c.hex()).unwrap_or("");
                println!(
                    "{},{},{},{},{},{},{},{:.3},{:.3},{:.3},{},{}",
                    i + 1,
                    color,
                    t.params.shape,
                    t.params.initial_speed,
                    t.params.launch_angle,
                    t.params.drag_coefficient,
                    t.params.atmosphere,
                    t.range,
                    t.max_height,
                    t.final_speed,
                    t.step_count,
                    t.is_truncated()
                );
            }
        }

        OutputFormat::Table => {
            println!("┌────┬─────────┬──────────────────┬─────────┬────────┬───────┬───────────┬───────────┬───────────┬───────────┐");
            println!("│  # │ Color   │ Shape            │ V0(m/s) │ Angle  │  Cd   │ Range (m) │ Peak (m)  │ Vf (m/s)  │ Status    │");
            println!("├────┼─────────┼──────────────────┼─────────┼────────┼───────┼───────────┼───────────┼───────────┼───────────┤");
            for (i, t) in store.iter().enumerate() {
                let color = t.color.map(|c| c.hex()).unwrap_or("-");
                let status = if t.is_truncated() { "truncated" } else { "landed" };
                println!(
                    "│ {:>2} │ {:<7} │ {:<16} │ {:>7.2} │ {:>6.2} │ {:>5.2} │ {:>9.2} │ {:>9.2} │ {:>9.2} │ {:<9} │",
                    i + 1,
                    color,
                    truncate(&t.params.shape, 16),
                    t.params.initial_speed,
                    t.params.launch_angle,
                    t.params.drag_coefficient,
                    t.range,
                    t.max_height,
                    t.final_speed,
                    status
                );
            }
            println!("└────┴─────────┴──────────────────┴─────────┴────────┴───────┴───────────┴───────────┴───────────┴───────────┘");
            println!(
                "Stored {}/{} | plot extent x: 0..{:.2} m, y: 0..{:.2} m",
                store.len(),
                store.capacity(),
                extent.max_x,
                extent.max_y
            );

            for r in &rejected {
                println!("Shot {} ({}) rejected [{}]: {}", r.shot, r.shape, r.reason, r.message);
            }
        }
    }

    Ok(())
}
