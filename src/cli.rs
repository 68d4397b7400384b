use clap::Parser;
use std::path::PathBuf;

use chroma_filter::color::TargetColor;
use chroma_filter::error::FilterError;
use chroma_filter::image_io;
use chroma_filter::pipeline::{FilterSettings, MAX_QUEUE, Operation, ProcessQueue, QueueItem};

/// Remove or boost pixels close to a target color
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Input images
    #[arg(required = true, value_hint = clap::ValueHint::FilePath)]
    pub inputs: Vec<PathBuf>,

    /// Target color as #rrggbb
    #[arg(short, long, default_value = "#00ff00")]
    pub color: TargetColor,

    /// Pixels strictly closer than this (Euclidean RGB distance) match
    #[arg(short, long, default_value_t = 30, allow_negative_numbers = true)]
    pub threshold: i32,

    /// Boost matching pixels by this factor instead of removing them
    #[arg(short, long, allow_negative_numbers = true)]
    pub boost: Option<f32>,

    /// Take the target color from this pixel of each image (eye-dropper).
    /// The pixel is read from the input as loaded, before any filtering.
    #[arg(long, value_name = "X,Y", value_parser = parse_point)]
    pub pick: Option<(u32, u32)>,

    /// Output directory
    #[arg(short, long, default_value = ".", value_hint = clap::ValueHint::DirPath)]
    pub out_dir: PathBuf,

    /// Bundle the results into this zip archive instead of writing PNGs to --out-dir
    #[arg(long, value_name = "FILE", value_hint = clap::ValueHint::FilePath)]
    pub zip: Option<PathBuf>,
}

impl Cli {
    fn settings(&self) -> FilterSettings {
        FilterSettings {
            target: self.color,
            threshold: self.threshold,
            operation: match self.boost {
                Some(boost) => Operation::EnhanceColor { boost },
                None => Operation::RemoveBackground,
            },
        }
    }
}

fn parse_point(s: &str) -> Result<(u32, u32), String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got `{s}`"))?;
    let parse = |v: &str| {
        v.trim()
            .parse::<u32>()
            .map_err(|e| format!("bad coordinate `{v}`: {e}"))
    };
    Ok((parse(x)?, parse(y)?))
}

/// Returns `Ok(false)` when some inputs failed but the rest were written.
pub fn run() -> Result<bool, FilterError> {
    let cli = Cli::parse();
    let settings = cli.settings();
    let mut ok = true;

    if cli.inputs.len() > MAX_QUEUE {
        log::warn!(
            "{} inputs given, only the first {MAX_QUEUE} will be processed",
            cli.inputs.len()
        );
    }

    let mut queue = ProcessQueue::new();
    for path in cli.inputs.iter().take(MAX_QUEUE) {
        let mut item = match QueueItem::open(path) {
            Ok(item) => item,
            Err(e) => {
                log::error!("Skipping {}: {e}", path.display());
                ok = false;
                continue;
            }
        };
        item.settings = settings;
        if let Some((x, y)) = cli.pick {
            match image_io::sample_color(item.original(), x, y) {
                Ok(color) => {
                    log::info!("{}: picked {color} at ({x}, {y})", item.name);
                    item.settings.target = color;
                }
                Err(e) => {
                    log::error!("Skipping {}: {e}", path.display());
                    ok = false;
                    continue;
                }
            }
        }
        queue.push(item)?;
    }

    if queue.is_empty() {
        log::warn!("Nothing to process");
        return Ok(false);
    }

    log::info!(
        "{} {} images (target {}, threshold {})",
        settings.operation.name(),
        queue.len(),
        settings.target,
        settings.threshold,
    );

    let report = queue.process_all();
    for (name, e) in &report.failed {
        log::error!("{name}: {e}");
        ok = false;
    }

    match &cli.zip {
        Some(archive) => {
            queue.save_zip(archive)?;
        }
        None => {
            let saved = queue.save_processed(&cli.out_dir);
            for path in &saved.written {
                log::info!("Wrote {}", path.display());
            }
            if !saved.failed.is_empty() {
                log::error!(
                    "{} of {} images could not be written",
                    saved.failed.len(),
                    saved.failed.len() + saved.written.len(),
                );
                ok = false;
            }
        }
    }
    Ok(ok)
}
