//! graphite: turn photos into pencil, charcoal and ink sketches.
//!
//! Reads a PNG or JPEG, renders a sketch with the chosen style and
//! settings, and writes it next to the input as `<stem>-sketch.<ext>`
//! (or wherever `-o` points).
//!
//! # Usage
//!
//! ```text
//! graphite [OPTIONS] <INPUT>
//! graphite --list-presets
//! ```
//!
//! Settings are layered: built-in defaults, then `--preset`, then
//! `--config-json`, then the individual flags.

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use graphite_export::{ExportError, ExportFormat, download_filename};
use graphite_pipeline::validate::mime_from_extension;
use graphite_pipeline::{
    Dimensions, PRESETS, Preset, Setting, SketchConfig, SketchError, SketchSession, Style,
};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Turn a photo into a pencil, charcoal or ink sketch.
#[derive(Debug, Parser)]
#[command(name = "graphite", version)]
struct Cli {
    /// Input photo (PNG or JPEG).
    #[arg(required_unless_present = "list_presets")]
    input: Option<PathBuf>,

    /// Output path. Defaults to `<stem>-sketch.<ext>` next to the input.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Sketch style (pencil, charcoal, ink, detailed-pencil).
    #[arg(long)]
    style: Option<Style>,

    /// Start from a named preset (see --list-presets).
    #[arg(long)]
    preset: Option<String>,

    /// Style intensity, 0-100.
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    intensity: Option<u8>,

    /// Contrast, 0-100 (50 is neutral).
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    contrast: Option<u8>,

    /// Brightness, 0-100 (50 is neutral).
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    brightness: Option<u8>,

    /// Invert the finished sketch.
    #[arg(long)]
    invert: bool,

    /// Sketch config as a JSON object, e.g. '{"style":"ink","intensity":70}'.
    ///
    /// Fields present here override the preset; missing fields keep
    /// their current value.
    #[arg(long, value_name = "JSON")]
    config_json: Option<String>,

    /// Output format (png or jpeg). Inferred from `-o` when omitted.
    #[arg(long)]
    format: Option<ExportFormat>,

    /// JPEG quality, 1-100.
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=100))]
    quality: Option<u8>,

    /// Seed for the charcoal grain, for reproducible output.
    #[arg(long)]
    seed: Option<u64>,

    /// Render at the photo's own size instead of fitting 800x600.
    #[arg(long)]
    full_resolution: bool,

    /// Print the available presets and exit.
    #[arg(long)]
    list_presets: bool,

    /// Log debug detail to stderr (overridden by RUST_LOG).
    #[arg(short, long)]
    verbose: bool,
}

/// Errors surfaced to the user by the CLI.
#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("no input image given")]
    MissingInput,

    #[error("unsupported file type: {} (expected .png, .jpg or .jpeg)", .0.display())]
    UnsupportedExtension(PathBuf),

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid --config-json: {0}")]
    ConfigJson(#[from] serde_json::Error),

    #[error("invalid --config-json: expected a JSON object")]
    ConfigJsonNotObject,

    #[error("no sketch was rendered")]
    NothingRendered,

    #[error(transparent)]
    Sketch(#[from] SketchError),

    #[error(transparent)]
    Export(#[from] ExportError),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.list_presets {
        print!("{}", preset_table());
        return ExitCode::SUCCESS;
    }

    match run(&cli) {
        Ok(path) => {
            info!(path = %path.display(), "wrote sketch");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "graphite=debug" } else { "graphite=info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Read, sketch and write one image. Returns the output path.
fn run(cli: &Cli) -> Result<PathBuf, CliError> {
    let input = cli.input.as_deref().ok_or(CliError::MissingInput)?;
    let mime = mime_from_extension(input)
        .ok_or_else(|| CliError::UnsupportedExtension(input.to_path_buf()))?;
    let config = resolve_config(cli)?;
    let (output, format) = resolve_output(cli, input);
    debug!(?config, %format, output = %output.display(), "resolved settings");

    let bytes = std::fs::read(input).map_err(|source| CliError::Read {
        path: input.to_path_buf(),
        source,
    })?;

    let mut session = cli
        .seed
        .map_or_else(SketchSession::new, SketchSession::with_seed);
    if cli.full_resolution {
        session = session.with_display_bounds(Dimensions::new(u32::MAX, u32::MAX));
    }
    session.set_config(config);
    session.load_image(&bytes, mime)?;
    let sketch = session.output().ok_or(CliError::NothingRendered)?;

    let encoded = graphite_export::encode(sketch, format)?;
    std::fs::write(&output, &encoded).map_err(|source| CliError::Write {
        path: output.clone(),
        source,
    })?;
    Ok(output)
}

/// Layer defaults, preset, JSON and individual flags, in that order.
fn resolve_config(cli: &Cli) -> Result<SketchConfig, CliError> {
    let mut config = match cli.preset.as_deref() {
        Some(name) => {
            Preset::lookup(name)
                .ok_or_else(|| SketchError::UnknownPreset(name.to_owned()))?
                .config
        }
        None => SketchConfig::default(),
    };

    if let Some(json) = cli.config_json.as_deref() {
        config = merge_json(config, json)?;
    }

    if let Some(style) = cli.style {
        config.set(Setting::Style(style));
    }
    if let Some(v) = cli.intensity {
        config.set(Setting::Intensity(v));
    }
    if let Some(v) = cli.contrast {
        config.set(Setting::Contrast(v));
    }
    if let Some(v) = cli.brightness {
        config.set(Setting::Brightness(v));
    }
    if cli.invert {
        config.set(Setting::Invert(true));
    }
    Ok(config)
}

/// Overlay the fields of a JSON object onto `base`.
fn merge_json(base: SketchConfig, json: &str) -> Result<SketchConfig, CliError> {
    let serde_json::Value::Object(overlay) = serde_json::from_str::<serde_json::Value>(json)? else {
        return Err(CliError::ConfigJsonNotObject);
    };
    let mut merged = serde_json::to_value(base)?;
    if let serde_json::Value::Object(fields) = &mut merged {
        fields.extend(overlay);
    }
    let config: SketchConfig = serde_json::from_value(merged)?;
    Ok(config.clamped())
}

/// Pick the output path and format.
///
/// An explicit `--format` wins; otherwise the `-o` extension decides,
/// falling back to PNG.
fn resolve_output(cli: &Cli, input: &Path) -> (PathBuf, ExportFormat) {
    let inferred = cli
        .output
        .as_deref()
        .and_then(|path| path.extension())
        .and_then(|ext| ext.to_str())
        .and_then(|ext| ext.parse().ok());
    let format = cli.format.or(inferred).unwrap_or_default();
    let format = cli.quality.map_or(format, |q| format.with_quality(q));

    let output = cli.output.clone().unwrap_or_else(|| {
        let name = input.file_name().and_then(|n| n.to_str()).unwrap_or_default();
        input.with_file_name(download_filename(name, format))
    });
    (output, format)
}

fn preset_table() -> String {
    let mut table = format!(
        "{:<12} {:<16} {:>9} {:>8} {:>10}\n",
        "PRESET", "STYLE", "INTENSITY", "CONTRAST", "BRIGHTNESS"
    );
    for preset in &PRESETS {
        let c = preset.config;
        table.push_str(&format!(
            "{:<12} {:<16} {:>9} {:>8} {:>10}\n",
            preset.name, c.style, c.intensity, c.contrast, c.brightness
        ));
    }
    table
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use clap::CommandFactory;
    use image::codecs::png::PngEncoder;
    use image::{ExtendedColorType, ImageEncoder, Rgba, RgbaImage};

    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("graphite").chain(args.iter().copied())).unwrap()
    }

    fn write_png(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
        #[allow(clippy::cast_possible_truncation)]
        let img = RgbaImage::from_fn(width, height, |x, y| {
            Rgba([(x % 256) as u8, (y % 256) as u8, 128, 255])
        });
        let mut buf = Vec::new();
        PngEncoder::new(&mut buf)
            .write_image(img.as_raw(), width, height, ExtendedColorType::Rgba8)
            .unwrap();
        let path = dir.join(name);
        std::fs::write(&path, buf).unwrap();
        path
    }

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn input_required_unless_listing() {
        assert!(Cli::try_parse_from(["graphite"]).is_err());
        assert!(Cli::try_parse_from(["graphite", "--list-presets"]).is_ok());
    }

    #[test]
    fn out_of_range_flag_is_rejected() {
        assert!(Cli::try_parse_from(["graphite", "a.png", "--intensity", "101"]).is_err());
        assert!(Cli::try_parse_from(["graphite", "a.png", "--style", "oil"]).is_err());
    }

    #[test]
    fn defaults_without_flags() {
        let config = resolve_config(&parse(&["a.png"])).unwrap();
        assert_eq!(config, SketchConfig::default());
    }

    #[test]
    fn flags_override_json_override_preset() {
        let cli = parse(&[
            "a.png",
            "--preset",
            "ink",
            "--config-json",
            r#"{"contrast":10,"brightness":20}"#,
            "--brightness",
            "90",
        ]);
        let config = resolve_config(&cli).unwrap();
        assert_eq!(config, SketchConfig::new(Style::Ink, 80, 10, 90, false));
    }

    #[test]
    fn json_out_of_range_is_clamped() {
        let cli = parse(&["a.png", "--config-json", r#"{"intensity":250}"#]);
        assert_eq!(resolve_config(&cli).unwrap().intensity, 100);
    }

    #[test]
    fn json_must_be_an_object() {
        let cli = parse(&["a.png", "--config-json", "[1,2]"]);
        assert!(matches!(resolve_config(&cli), Err(CliError::ConfigJsonNotObject)));
        let cli = parse(&["a.png", "--config-json", "{"]);
        assert!(matches!(resolve_config(&cli), Err(CliError::ConfigJson(_))));
    }

    #[test]
    fn unknown_preset_is_an_error() {
        let cli = parse(&["a.png", "--preset", "pastel"]);
        assert!(matches!(
            resolve_config(&cli),
            Err(CliError::Sketch(SketchError::UnknownPreset(_)))
        ));
    }

    #[test]
    fn default_output_sits_next_to_input() {
        let cli = parse(&["photos/cat.jpeg"]);
        let (path, format) = resolve_output(&cli, Path::new("photos/cat.jpeg"));
        assert_eq!(path, PathBuf::from("photos/cat-sketch.png"));
        assert_eq!(format, ExportFormat::Png);
    }

    #[test]
    fn output_extension_picks_format() {
        let cli = parse(&["cat.png", "-o", "out.JPG", "--quality", "70"]);
        let (path, format) = resolve_output(&cli, Path::new("cat.png"));
        assert_eq!(path, PathBuf::from("out.JPG"));
        assert_eq!(format, ExportFormat::Jpeg { quality: 70 });
    }

    #[test]
    fn explicit_format_wins() {
        let cli = parse(&["cat.png", "-o", "out.png", "--format", "jpeg"]);
        let (_, format) = resolve_output(&cli, Path::new("cat.png"));
        assert_eq!(format, ExportFormat::JPEG);
    }

    #[test]
    fn preset_table_lists_every_preset() {
        let table = preset_table();
        for preset in &PRESETS {
            assert!(table.contains(preset.name), "{}", preset.name);
        }
        assert_eq!(table.lines().count(), PRESETS.len() + 1);
    }

    #[test]
    fn run_writes_sketch_next_to_input() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_png(dir.path(), "street.png", 1000, 500);
        let input_arg = input.to_str().unwrap();

        let path = run(&parse(&[input_arg, "--style", "ink", "--seed", "4"])).unwrap();
        assert_eq!(path, dir.path().join("street-sketch.png"));

        let written = image::open(&path).unwrap();
        assert_eq!((written.width(), written.height()), (800, 400));
    }

    #[test]
    fn run_full_resolution_keeps_size() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_png(dir.path(), "big.png", 1000, 500);
        let output = dir.path().join("big.jpg");
        let cli = parse(&[
            input.to_str().unwrap(),
            "--full-resolution",
            "-o",
            output.to_str().unwrap(),
        ]);

        run(&cli).unwrap();
        let written = image::open(&output).unwrap();
        assert_eq!((written.width(), written.height()), (1000, 500));
    }

    #[test]
    fn run_rejects_unsupported_extension() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("anim.gif");
        std::fs::write(&input, b"GIF89a").unwrap();
        let err = run(&parse(&[input.to_str().unwrap()])).unwrap_err();
        assert!(matches!(err, CliError::UnsupportedExtension(_)));
    }

    #[test]
    fn run_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("missing.png");
        let err = run(&parse(&[input.to_str().unwrap()])).unwrap_err();
        assert!(matches!(err, CliError::Read { .. }));
    }

    #[test]
    fn run_reports_corrupt_image() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("broken.png");
        std::fs::write(&input, b"definitely not a png").unwrap();
        let err = run(&parse(&[input.to_str().unwrap()])).unwrap_err();
        assert!(matches!(err, CliError::Sketch(SketchError::ImageDecode(_))));
    }
}
