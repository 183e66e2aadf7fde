//! Circle Render entry point
//!
//! Loads a scene, renders the requested number of frames and optionally
//! writes PPM frames, a particle dump and a comparison against a reference.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;

use circle_render::{Image, RefRenderer, RenderConfig, Result, SceneName};

/// Largest per-channel error a PPM round trip can introduce
const PPM_TOLERANCE: f32 = 1.0 / 255.0;

#[derive(Debug, Parser)]
#[command(name = "circle-render", version, about = "Sequential reference circle renderer")]
struct Cli {
    /// JSON config file; flags below override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Scene name (rgb, rgby, rand10k, rand100k, biglittle, littlebig,
    /// pattern, snow, snowsingle, bouncingballs, hypnosis, fireworks)
    #[arg(short, long)]
    scene: Option<SceneName>,

    /// Square image size in pixels
    #[arg(long)]
    size: Option<u32>,

    /// Number of frames to render
    #[arg(short, long)]
    frames: Option<u32>,

    /// Scene loader seed
    #[arg(long)]
    seed: Option<u64>,

    /// Write particle state here after the last frame has advanced
    #[arg(short, long)]
    dump: Option<PathBuf>,

    /// Write each frame to PREFIX_NNNN.ppm
    #[arg(short, long)]
    output: Option<String>,

    /// Compare the last frame against this PPM
    #[arg(long)]
    compare: Option<PathBuf>,

    /// Increase verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn into_config(self) -> Result<(RenderConfig, Option<PathBuf>)> {
        let mut config = match &self.config {
            Some(path) => RenderConfig::load(path)?,
            None => RenderConfig::default(),
        };
        if let Some(scene) = self.scene {
            config.scene = scene;
        }
        if let Some(size) = self.size {
            config.width = size;
            config.height = size;
        }
        if let Some(frames) = self.frames {
            config.frames = frames;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if self.dump.is_some() {
            config.dump_path = self.dump;
        }
        if self.output.is_some() {
            config.output_prefix = self.output;
        }
        Ok((config, self.compare))
    }
}

fn run(config: &RenderConfig, compare: Option<PathBuf>) -> Result<bool> {
    let mut renderer = RefRenderer::with_seed(config.seed);
    renderer.alloc_output_image(config.width, config.height);
    renderer.load_scene(config.scene);

    let start = Instant::now();
    for frame in 0..config.frames {
        let frame_start = Instant::now();
        renderer.clear_image()?;
        renderer.render()?;
        log::debug!("Frame {} rendered in {:.2?}", frame, frame_start.elapsed());

        if let (Some(path), Some(image)) = (config.frame_path(frame), renderer.image()) {
            image.save_ppm(&path)?;
            log::info!("Wrote {}", path.display());
        }

        renderer.advance_animation();
    }
    log::info!(
        "Rendered {} frame(s) of {} at {}x{} in {:.2?}",
        config.frames,
        config.scene,
        config.width,
        config.height,
        start.elapsed()
    );

    if let Some(path) = &config.dump_path {
        renderer.dump_particles(path)?;
        log::info!("Dumped particles to {}", path.display());
    }

    let Some(reference_path) = compare else {
        return Ok(true);
    };
    let reference = Image::load_ppm(&reference_path)?;
    let Some(image) = renderer.image() else {
        return Ok(false);
    };
    match image.quantized().max_abs_diff(&reference) {
        Some(diff) if diff <= PPM_TOLERANCE => {
            log::info!("Matches {} (max diff {:.5})", reference_path.display(), diff);
            Ok(true)
        }
        Some(diff) => {
            log::error!("Differs from {} (max diff {:.5})", reference_path.display(), diff);
            Ok(false)
        }
        None => {
            log::error!(
                "Size mismatch: rendered {}x{}, reference {}x{}",
                image.width(),
                image.height(),
                reference.width(),
                reference.height()
            );
            Ok(false)
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // RUST_LOG still wins over -v
    let default_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let result = cli.into_config().and_then(|(config, compare)| {
        log::info!("Circle Render starting: {:?}", config);
        run(&config, compare)
    });

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
