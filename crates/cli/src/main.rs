use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;

use agecam_core::compositing::domain::frame_compositor::FrameCompositor;
use agecam_core::compositing::infrastructure::opencv_overlay_renderer::OpenCvOverlayRenderer;
use agecam_core::pipeline::annotate_image_use_case::AnnotateImageUseCase;
use agecam_core::pipeline::frame_annotator::FrameAnnotator;
use agecam_core::pipeline::infrastructure::resource_loader::load_detection_context;
use agecam_core::pipeline::live_detection_use_case::{
    LiveDetectionUseCase, LoopOutcome, TerminationReason,
};
use agecam_core::pipeline::pipeline_logger::StdoutPipelineLogger;
use agecam_core::shared::config::AppConfig;
use agecam_core::shared::constants::IMAGE_EXTENSIONS;
use agecam_core::video::infrastructure::camera_source::CameraSource;
use agecam_core::video::infrastructure::highgui_display::HighGuiDisplay;
use agecam_core::video::infrastructure::image_file_reader::ImageFileReader;
use agecam_core::video::infrastructure::image_file_writer::ImageFileWriter;

/// Live webcam face detection with age and gender labels.
#[derive(Parser)]
#[command(name = "agecam")]
struct Cli {
    /// Directory that relative model and logo paths resolve in.
    #[arg(long, default_value = ".")]
    models_dir: PathBuf,

    /// Logo image to overlay (overrides the config file).
    #[arg(long, conflicts_with = "no_logo")]
    logo: Option<PathBuf>,

    /// Disable the logo overlay.
    #[arg(long)]
    no_logo: bool,

    /// Camera device index.
    #[arg(long)]
    camera: Option<i32>,

    /// JSON settings file; command-line flags take precedence.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Annotate this image instead of opening the camera.
    #[arg(long, requires = "output")]
    image: Option<PathBuf>,

    /// Where to write the annotated image (with --image).
    #[arg(long, requires = "image")]
    output: Option<PathBuf>,

    /// Cascade image pyramid scale step (> 1.0).
    #[arg(long)]
    scale_factor: Option<f64>,

    /// Neighboring hits required to keep a detection.
    #[arg(long)]
    min_neighbors: Option<i32>,

    /// Smallest detectable face edge in pixels.
    #[arg(long)]
    min_face_size: Option<i32>,

    /// Frames between progress lines in the log.
    #[arg(long, default_value = "100")]
    log_every: usize,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;
    let config = build_config(&cli)?;

    let context = load_detection_context(
        &config.resources,
        &config.detection,
        config.logo.width,
    )?;
    let compositor = FrameCompositor::new(
        Box::new(OpenCvOverlayRenderer::new()),
        context.logo,
        (config.logo.offset_x, config.logo.offset_y),
    );
    let annotator = FrameAnnotator::new(context.locator, context.classifier, compositor);
    let logger = Box::new(StdoutPipelineLogger::new(cli.log_every));

    match (&cli.image, &cli.output) {
        (Some(input), Some(output)) => run_image(input, output, annotator, logger),
        _ => run_live(&config, annotator, logger),
    }
}

fn run_live(
    config: &AppConfig,
    annotator: FrameAnnotator,
    logger: Box<StdoutPipelineLogger>,
) -> Result<(), Box<dyn std::error::Error>> {
    let source = CameraSource::open(config.camera_index)?;
    let display = HighGuiDisplay::new(config.window_title.clone())?;

    let mut use_case =
        LiveDetectionUseCase::new(Box::new(source), Box::new(display), annotator, logger)
            .with_quit_key(config.quit_key);
    let outcome = use_case.execute()?;
    if let Some(message) = capture_ended_message(&outcome, config.camera_index) {
        eprintln!("{message}");
    }
    Ok(())
}

/// User-facing notice for a loop that stopped because the camera did.
///
/// Quitting with the key is the normal exit and prints nothing.
fn capture_ended_message(outcome: &LoopOutcome, camera_index: i32) -> Option<String> {
    match outcome.reason {
        TerminationReason::QuitRequested => None,
        TerminationReason::CaptureEnded => Some(format!(
            "Camera {camera_index} stopped delivering frames after {} frames; exiting.",
            outcome.frames_processed
        )),
    }
}

fn run_image(
    input: &Path,
    output: &Path,
    annotator: FrameAnnotator,
    logger: Box<StdoutPipelineLogger>,
) -> Result<(), Box<dyn std::error::Error>> {
    let reader = ImageFileReader::open(input)?;
    let mut use_case = AnnotateImageUseCase::new(
        Box::new(reader),
        Box::new(ImageFileWriter::new()),
        annotator,
        logger,
    );
    let annotations = use_case.execute(output)?;
    log::info!(
        "Annotated {} face(s), output written to {}",
        annotations.len(),
        output.display()
    );
    Ok(())
}

/// Layers defaults, the optional config file and command-line flags, in
/// that order, then resolves resource paths against `--models-dir`.
fn build_config(cli: &Cli) -> Result<AppConfig, Box<dyn std::error::Error>> {
    let mut config = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };

    config.resources = config.resources.resolve(&cli.models_dir);
    if cli.no_logo {
        config.resources.logo = None;
    } else if let Some(logo) = &cli.logo {
        config.resources.logo = Some(logo.clone());
    }
    if let Some(index) = cli.camera {
        config.camera_index = index;
    }
    if let Some(scale) = cli.scale_factor {
        config.detection.scale_factor = scale;
    }
    if let Some(neighbors) = cli.min_neighbors {
        config.detection.min_neighbors = neighbors;
    }
    if let Some(size) = cli.min_face_size {
        config.detection.min_size = size;
    }

    config.validate()?;
    Ok(config)
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if !cli.models_dir.is_dir() {
        return Err(format!("Models directory not found: {}", cli.models_dir.display()).into());
    }
    if let Some(path) = &cli.config {
        if !path.is_file() {
            return Err(format!("Config file not found: {}", path.display()).into());
        }
    }
    if let Some(input) = &cli.image {
        if !input.is_file() {
            return Err(format!("Input image not found: {}", input.display()).into());
        }
        if !is_image(input) {
            return Err(format!("Unsupported image type: {}", input.display()).into());
        }
    }
    if let Some(output) = &cli.output {
        if !is_image(output) {
            return Err(format!("Unsupported output image type: {}", output.display()).into());
        }
    }
    if let Some(scale) = cli.scale_factor {
        if scale.is_nan() || scale <= 1.0 {
            return Err(format!("Scale factor must be greater than 1.0, got {scale}").into());
        }
    }
    if let Some(size) = cli.min_face_size {
        if size <= 0 {
            return Err(format!("Minimum face size must be positive, got {size}").into());
        }
    }
    if let Some(index) = cli.camera {
        if index < 0 {
            return Err(format!("Camera index must be non-negative, got {index}").into());
        }
    }
    if cli.log_every == 0 {
        return Err("--log-every must be at least 1".into());
    }
    Ok(())
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}
