use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::io::Read as _;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use vertexplot_core::camera::{OrthoCamera, ROTATE_STEP};
use vertexplot_core::notation::write_sets;
use vertexplot_core::parser::{parse_with, ParseOptions, ParseOutput};
use vertexplot_core::report::{FitReport, ParseReport};
use vertexplot_core::viewport::{ViewOptions, ViewSize, Viewport};
use vertexplot_core::PlotData;

#[derive(Debug, Parser)]
#[command(name = "vertexplot")]
#[command(about = "Parse free-form vertex text and compute plot views.")]
struct Cli {
    /// Log at debug level (RUST_LOG overrides).
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Parse vertex text and report sets, bounds and brace errors.
    Parse {
        /// Input file, or `-` for stdin.
        input: PathBuf,
        #[arg(long)]
        strict: bool,
        #[arg(long)]
        report: Option<PathBuf>,
    },
    /// Fit a viewport of the given pixel size to the parsed geometry.
    Fit {
        input: PathBuf,
        #[arg(long, default_value_t = 800.0)]
        width: f64,
        #[arg(long, default_value_t = 600.0)]
        height: f64,
        #[arg(long)]
        no_aspect: bool,
        /// JSON file with view options.
        #[arg(long)]
        view_options: Option<PathBuf>,
    },
    /// Project the parsed geometry through an orthographic camera.
    Project {
        input: PathBuf,
        /// Horizontal rotation, radians.
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        yaw: f64,
        /// Vertical rotation, radians.
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        pitch: f64,
        /// Extra keyboard-sized rotation steps, applied horizontally.
        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        steps: i32,
    },
    /// Rewrite the input in canonical notation.
    Format {
        input: PathBuf,
        #[arg(long)]
        strict: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    match cli.cmd {
        Command::Parse {
            input,
            strict,
            report,
        } => parse_cmd(&input, strict, report.as_deref()),
        Command::Fit {
            input,
            width,
            height,
            no_aspect,
            view_options,
        } => fit_cmd(&input, width, height, no_aspect, view_options.as_deref()),
        Command::Project {
            input,
            yaw,
            pitch,
            steps,
        } => project_cmd(&input, yaw, pitch, steps),
        Command::Format { input, strict } => {
            let output = load(&input, strict)?;
            print!("{}", write_sets(&output.sets));
            Ok(())
        }
    }
}

fn init_logging(verbose: bool) -> Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let default_level = if verbose { "debug" } else { "warn" };
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .context("build log filter")?;

    // stdout carries the JSON output, so logs go to stderr.
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .context("install log subscriber")?;
    Ok(())
}

fn parse_cmd(input: &Path, strict: bool, report: Option<&Path>) -> Result<()> {
    let output = load(input, strict)?;
    let report_data = ParseReport::new(&output);

    match report {
        Some(path) => write_json(path, &report_data),
        None => print_json(&report_data),
    }
}

fn fit_cmd(
    input: &Path,
    width: f64,
    height: f64,
    no_aspect: bool,
    view_options: Option<&Path>,
) -> Result<()> {
    if !(width > 0.0 && height > 0.0) {
        bail!("view size must be positive, got {width}x{height}");
    }

    let mut options = match view_options {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("read view options: {path:?}"))?;
            serde_json::from_str::<ViewOptions>(&json)
                .with_context(|| format!("parse view options: {path:?}"))?
        }
        None => ViewOptions::default(),
    };
    if no_aspect {
        options.maintain_aspect = false;
    }

    let output = load(input, false)?;
    let plot = PlotData::from_sets(output.sets);

    let mut viewport = Viewport::new(ViewSize::new(width, height)).with_options(options);
    viewport.auto_scale_for_points(plot.bounds_2d());
    info!(status = %viewport.status_bounds(), "fitted view");

    print_json(&FitReport::new(&viewport))
}

#[derive(Debug, Serialize)]
struct ProjectReport {
    axis_x: vertexplot_core::Vec3,
    axis_y: vertexplot_core::Vec3,
    axis_z: vertexplot_core::Vec3,
    axis_aligned: bool,
    plot: PlotData,
}

fn project_cmd(input: &Path, yaw: f64, pitch: f64, steps: i32) -> Result<()> {
    let output = load(input, false)?;
    let plot = PlotData::from_sets(output.sets);

    let mut camera = OrthoCamera::default();
    camera.rotate(yaw + f64::from(steps) * ROTATE_STEP, pitch);
    debug!(?camera, "camera ready");

    print_json(&ProjectReport {
        axis_x: camera.axis_x(),
        axis_y: camera.axis_y(),
        axis_z: camera.axis_z(),
        axis_aligned: camera.is_axis_aligned(),
        plot: plot.projected(&camera),
    })
}

fn load(input: &Path, strict: bool) -> Result<ParseOutput> {
    let text = read_input(input)?;
    let output = parse_with(
        &text,
        &ParseOptions {
            strict_braces: strict,
        },
    );
    for error in &output.errors {
        warn!(input = ?input, kind = %error.kind, position = error.position, "brace error");
    }
    Ok(output)
}

fn read_input(input: &Path) -> Result<String> {
    if input == Path::new("-") {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("read stdin")?;
        return Ok(text);
    }
    ensure_input_file(input)?;
    std::fs::read_to_string(input).with_context(|| format!("read input: {input:?}"))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("serialize report")?;
    println!("{json}");
    Ok(())
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("serialize report")?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).ok();
    }
    std::fs::write(path, &json).with_context(|| format!("write report: {path:?}"))
}

fn ensure_input_file(input: &Path) -> Result<()> {
    match std::fs::metadata(input) {
        Ok(meta) => {
            if meta.is_file() {
                Ok(())
            } else {
                bail!("input is not a file: {input:?}");
            }
        }
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
            bail!("input not found: {input:?} (cwd: {cwd:?}).");
        }
        Err(err) => Err(err).with_context(|| format!("stat input: {input:?}")),
    }
}
