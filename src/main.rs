//! Command-line front end: print or export magnetization trajectories and
//! storyboards for an animation engine.
//!
//! ```sh
//! blochvis trajectory --model exponential
//! blochvis storyboard scene.toml --output storyboard.csv
//! blochvis storyboard --scene position-check
//! blochvis validate scene.toml
//! ```

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use blochvis::config::{load_config, SceneConfig};
use blochvis::render::{render_storyboard, RecordingRenderer};
use blochvis::scene::Quality;
use blochvis::storyboard::Storyboard;
use blochvis::{export, ModelKind};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "blochvis")]
#[command(about = "Magnetization trajectories and storyboards for Bloch equation animations")]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sample the relaxation after the 90° pulse
    Trajectory {
        /// Scene configuration (stock scene if omitted)
        config: Option<PathBuf>,

        /// Relaxation duration in seconds (overrides the config)
        #[arg(short, long)]
        duration: Option<f64>,

        /// Step size in seconds (overrides the config)
        #[arg(short, long)]
        step: Option<f64>,

        /// Relaxation model (overrides the config)
        #[arg(short, long)]
        model: Option<Model>,

        /// Write CSV to this file instead of printing the read-out
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Build the keyframes of the full animation
    Storyboard {
        /// Scene configuration (stock scene if omitted)
        config: Option<PathBuf>,

        /// Render quality (overrides the config)
        #[arg(short, long)]
        quality: Option<RenderQuality>,

        /// Which scene to lay out
        #[arg(long, value_enum, default_value = "bloch")]
        scene: SceneKind,

        /// Write CSV to this file instead of printing a summary
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check a configuration file without sampling anything
    Validate {
        config: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Model {
    Linear,
    Exponential,
}

impl From<Model> for ModelKind {
    fn from(value: Model) -> Self {
        match value {
            Model::Linear => ModelKind::Linear,
            Model::Exponential => ModelKind::Exponential,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum SceneKind {
    /// Excitation and relaxation
    Bloch,
    /// One still frame showing every element
    PositionCheck,
}

#[derive(Clone, Copy, ValueEnum)]
enum RenderQuality {
    Testing,
    Full,
}

impl From<RenderQuality> for Quality {
    fn from(value: RenderQuality) -> Self {
        match value {
            RenderQuality::Testing => Quality::Testing,
            RenderQuality::Full => Quality::Full,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Commands::Trajectory {
            config,
            duration,
            step,
            model,
            output,
        } => {
            let mut scene = read_config(config.as_deref())?;
            if let Some(duration) = duration {
                scene.relaxation.duration = Some(duration);
            }
            if let Some(step) = step {
                scene.relaxation.step = step;
            }
            if let Some(model) = model {
                scene.model = model.into();
            }

            let trajectory = scene.trajectory()?;
            info!(
                model = trajectory.model_name(),
                samples = trajectory.request().len(),
                "Sampling trajectory"
            );

            match output {
                Some(path) => {
                    let file = create(&path)?;
                    export::write_trajectory_csv(&trajectory, file)?;
                    info!(path = %path.display(), "Wrote trajectory");
                }
                None => {
                    for sample in trajectory.samples() {
                        println!("{sample}");
                    }
                }
            }
            Ok(())
        }
        Commands::Storyboard {
            config,
            quality,
            scene: kind,
            output,
        } => {
            let mut scene = read_config(config.as_deref())?;
            if let Some(quality) = quality {
                scene.quality = quality.into();
            }

            let physics = scene.physics()?;
            let storyboard = match kind {
                SceneKind::Bloch => {
                    let trajectory = scene.trajectory()?;
                    Storyboard::build(&physics, &trajectory, scene.quality)
                }
                SceneKind::PositionCheck => Storyboard::position_check(&physics),
            };

            match output {
                Some(path) => {
                    let file = create(&path)?;
                    export::write_storyboard_csv(&storyboard, file)?;
                    info!(path = %path.display(), "Wrote storyboard");
                }
                None => {
                    let mut renderer = RecordingRenderer::default();
                    render_storyboard(&storyboard, &mut renderer);

                    println!("Keyframes:     {}", storyboard.len());
                    println!("Draw commands: {}", renderer.commands.len());
                    println!("Duration:      {:.2}s", storyboard.duration());
                }
            }
            Ok(())
        }
        Commands::Validate { config } => {
            let scene = load_config(&config)
                .with_context(|| format!("Failed to load {}", config.display()))?;
            scene.trajectory()?;
            println!("Configuration is valid: {}", config.display());
            Ok(())
        }
    }
}

fn read_config(path: Option<&Path>) -> Result<SceneConfig> {
    match path {
        Some(path) => {
            load_config(path).with_context(|| format!("Failed to load {}", path.display()))
        }
        None => Ok(SceneConfig::default()),
    }
}

fn create(path: &Path) -> Result<BufWriter<File>> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    Ok(BufWriter::new(file))
}
