use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use retrobooth_contracts::events::EventWriter;
use retrobooth_contracts::styles::StyleCatalog;
use retrobooth_engine::config::non_empty_env;
use retrobooth_engine::normalize::normalize_bytes;
use retrobooth_engine::{
    build_gateway, load_source_image, new_booth_id, Credential, EngineConfig, GenerationGateway,
    OutputFormat, SessionCoordinator, SessionPhase,
};

mod booth;

#[derive(Debug, Parser)]
#[command(name = "retrobooth", version, about = "Retro photo booth")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Interactive booth session on stdin.
    Booth(BoothArgs),
    /// Capture one photo, apply remixes and an optional video, then save the results.
    Run(RunArgs),
    /// Bound and re-encode a single image.
    Normalize(NormalizeArgs),
    /// List the style catalog.
    Styles(StylesArgs),
}

#[derive(Debug, Args)]
struct SessionFlags {
    #[arg(long)]
    out: PathBuf,
    #[arg(long)]
    events: Option<PathBuf>,
    #[arg(long)]
    style: Option<String>,
    #[arg(long)]
    dryrun: bool,
    #[arg(long)]
    video_key: Option<String>,
    #[command(flatten)]
    normalize: NormalizeFlags,
}

#[derive(Debug, Args)]
struct NormalizeFlags {
    #[arg(long)]
    max_dimension: Option<u32>,
    #[arg(long)]
    quality: Option<f32>,
}

#[derive(Debug, Parser)]
struct BoothArgs {
    #[command(flatten)]
    session: SessionFlags,
}

#[derive(Debug, Parser)]
struct RunArgs {
    #[arg(long)]
    image: PathBuf,
    #[arg(long = "remix")]
    remixes: Vec<String>,
    #[arg(long)]
    video: Option<String>,
    #[command(flatten)]
    session: SessionFlags,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum FormatArg {
    Jpeg,
    Png,
}

#[derive(Debug, Parser)]
struct NormalizeArgs {
    #[arg(long)]
    image: PathBuf,
    #[arg(long)]
    out: PathBuf,
    #[arg(long, value_enum, default_value_t = FormatArg::Jpeg)]
    format: FormatArg,
    #[command(flatten)]
    normalize: NormalizeFlags,
}

#[derive(Debug, Parser)]
struct StylesArgs {
    #[arg(long)]
    json: bool,
}

fn main() {
    match run() {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("retrobooth error: {err:#}");
            std::process::exit(1);
        }
    }
}

fn run() -> Result<i32> {
    let cli = Cli::parse();
    match cli.command {
        Command::Booth(args) => {
            run_booth(args)?;
            Ok(0)
        }
        Command::Run(args) => run_once(args),
        Command::Normalize(args) => run_normalize(args),
        Command::Styles(args) => run_styles(args),
    }
}

fn engine_config(flags: &NormalizeFlags) -> EngineConfig {
    let mut config = EngineConfig::from_env();
    apply_normalize_flags(&mut config, flags);
    config
}

fn apply_normalize_flags(config: &mut EngineConfig, flags: &NormalizeFlags) {
    if let Some(max_dimension) = flags.max_dimension.filter(|value| *value > 0) {
        config.normalize.max_dimension = max_dimension;
    }
    if let Some(quality) = flags.quality.filter(|value| value.is_finite() && *value > 0.0) {
        config.normalize.quality = quality.min(1.0);
    }
}

fn video_credential(flag: Option<&str>) -> Option<Credential> {
    flag.and_then(Credential::new)
        .or_else(|| non_empty_env("RETROBOOTH_VIDEO_KEY").and_then(Credential::new))
}

struct SessionSetup {
    config: EngineConfig,
    coordinator: SessionCoordinator,
    events: EventWriter,
}

fn open_session(flags: &SessionFlags) -> Result<SessionSetup> {
    fs::create_dir_all(&flags.out)
        .with_context(|| format!("failed to create {}", flags.out.display()))?;
    let events_path = flags
        .events
        .clone()
        .unwrap_or_else(|| flags.out.join("events.jsonl"));
    let events = EventWriter::new(events_path, new_booth_id());
    let config = engine_config(&flags.normalize);

    let mut coordinator =
        SessionCoordinator::new(Arc::new(StyleCatalog::default())).with_events(events.clone());
    if let Some(style) = flags.style.as_deref() {
        let resolved = coordinator.select_style(style)?;
        if resolved.id != style.trim() {
            eprintln!("Unknown style {style}; using {}.", resolved.id);
        }
    }
    if let Some(credential) = video_credential(flags.video_key.as_deref()) {
        coordinator.set_credential(credential);
    }
    Ok(SessionSetup {
        config,
        coordinator,
        events,
    })
}

fn run_booth(args: BoothArgs) -> Result<()> {
    let setup = open_session(&args.session)?;
    println!(
        "Booth {} logging to {}",
        setup.events.booth_id(),
        setup.events.path().display()
    );
    let gateway: Arc<dyn GenerationGateway> =
        Arc::from(build_gateway(&setup.config, args.session.dryrun));
    booth::run_booth(booth::Booth::new(
        setup.coordinator,
        gateway,
        setup.config,
        args.session.out.clone(),
    ))
}

fn run_once(args: RunArgs) -> Result<i32> {
    let SessionSetup {
        config,
        mut coordinator,
        events,
    } = open_session(&args.session)?;
    let gateway = build_gateway(&config, args.session.dryrun);

    let captured = load_source_image(&args.image, &config.normalize)?;
    if let Some(err) = captured.fallback.as_ref() {
        coordinator.record_normalization_fallback(err);
        eprintln!("Normalization skipped ({err}); using the original file.");
    }

    let style = coordinator.style_id().to_string();
    coordinator.capture(gateway.as_ref(), captured.image, Some(&style))?;
    if coordinator.phase() == SessionPhase::Error {
        bail!(
            "{}",
            coordinator.generation_error().unwrap_or("generation failed")
        );
    }
    println!("Styled as {} ({})", coordinator.style().label, coordinator.style_id());

    for prompt in &args.remixes {
        coordinator.remix(gateway.as_ref(), prompt)?;
        if let Some(message) = coordinator.remix_error() {
            bail!("{message}");
        }
        println!("Remixed: {prompt}");
    }

    if let Some(prompt) = args.video.as_deref() {
        coordinator.request_video(gateway.as_ref(), prompt, None)?;
        if let Some(message) = coordinator.video_error() {
            bail!("{message}");
        }
    }

    for path in save_outputs(&coordinator, &args.session.out)? {
        println!("Saved {}", path.display());
    }
    println!("Events: {} ({})", events.path().display(), events.booth_id());
    Ok(0)
}

fn run_normalize(args: NormalizeArgs) -> Result<i32> {
    let mut options = engine_config(&args.normalize).normalize;
    options.output = match args.format {
        FormatArg::Jpeg => OutputFormat::Jpeg,
        FormatArg::Png => OutputFormat::Png,
    };
    let bytes = fs::read(&args.image)
        .with_context(|| format!("failed to read {}", args.image.display()))?;
    let normalized = normalize_bytes(&bytes, &options)?;
    write_payload(&args.out, &normalized.payload.decode_bytes()?)?;
    let size = if normalized.was_resized() {
        format!(
            "{}x{} -> {}x{}",
            normalized.source_width, normalized.source_height, normalized.width, normalized.height
        )
    } else {
        format!("{}x{} (unchanged)", normalized.width, normalized.height)
    };
    println!(
        "{size} {} ({})",
        normalized.payload.mime_type,
        args.out.display()
    );
    Ok(0)
}

fn run_styles(args: StylesArgs) -> Result<i32> {
    let catalog = StyleCatalog::default();
    if args.json {
        let styles: Vec<_> = catalog.enumerate().collect();
        println!("{}", serde_json::to_string_pretty(&styles)?);
    } else {
        print_styles(&catalog);
    }
    Ok(0)
}

pub(crate) fn print_styles(catalog: &StyleCatalog) {
    for style in catalog.enumerate() {
        println!(
            "{:<16} {:<24} {:<6} {} -> {}",
            style.id, style.label, style.era, style.accent.0, style.accent.1
        );
    }
}

/// Writes the current image artifact, and the video when one exists, into `dir`.
pub(crate) fn save_outputs(coordinator: &SessionCoordinator, dir: &Path) -> Result<Vec<PathBuf>> {
    let Some(artifact) = coordinator.artifact() else {
        bail!("nothing to save yet");
    };
    fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;
    let stem = format!("retrobooth-{}", coordinator.style_id());

    let mut saved = Vec::new();
    let image_path = dir.join(format!("{stem}.{}", artifact.extension()));
    let bytes = artifact
        .decode_bytes()
        .context("artifact is not valid base64")?;
    write_payload(&image_path, &bytes)?;
    saved.push(image_path);

    if let Some(video) = coordinator.video() {
        let video_path = video
            .save_to(dir, &stem)
            .with_context(|| format!("failed to save video into {}", dir.display()))?;
        saved.push(video_path);
    }
    Ok(saved)
}

fn write_payload(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, bytes).with_context(|| format!("failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::io::Cursor;
    use std::path::Path;
    use std::sync::Arc;

    use clap::Parser;
    use image::{DynamicImage, ImageFormat, RgbImage};
    use retrobooth_contracts::events::{read_event_types, EventKind};
    use retrobooth_contracts::styles::StyleCatalog;
    use retrobooth_engine::{
        Credential, DryrunGateway, EngineConfig, ImagePayload, SessionCoordinator,
    };

    use super::{
        apply_normalize_flags, run_once, save_outputs, Cli, Command, NormalizeFlags,
    };

    pub(crate) fn write_png(path: &Path, width: u32, height: u32) -> anyhow::Result<()> {
        let mut bytes = Vec::new();
        DynamicImage::ImageRgb8(RgbImage::new(width, height))
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
        fs::write(path, bytes)?;
        Ok(())
    }

    #[test]
    fn run_subcommand_collects_repeated_remixes() {
        let cli = Cli::try_parse_from([
            "retrobooth",
            "run",
            "--image",
            "me.jpg",
            "--out",
            "out",
            "--style",
            "90s",
            "--remix",
            "add sunglasses",
            "--remix",
            "neon sign",
            "--dryrun",
        ])
        .unwrap();
        let Command::Run(args) = cli.command else {
            panic!("expected run subcommand");
        };
        assert_eq!(args.remixes, vec!["add sunglasses", "neon sign"]);
        assert_eq!(args.session.style.as_deref(), Some("90s"));
        assert!(args.session.dryrun);
        assert!(args.video.is_none());
    }

    #[test]
    fn normalize_flags_override_config_within_bounds() {
        let mut config = EngineConfig::default();
        apply_normalize_flags(
            &mut config,
            &NormalizeFlags {
                max_dimension: Some(512),
                quality: Some(3.0),
            },
        );
        assert_eq!(config.normalize.max_dimension, 512);
        assert_eq!(config.normalize.quality, 1.0);

        apply_normalize_flags(
            &mut config,
            &NormalizeFlags {
                max_dimension: Some(0),
                quality: Some(-1.0),
            },
        );
        assert_eq!(config.normalize.max_dimension, 512);
        assert_eq!(config.normalize.quality, 1.0);
    }

    #[test]
    fn save_outputs_writes_photo_and_video() -> anyhow::Result<()> {
        let temp = tempfile::tempdir()?;
        let gateway = DryrunGateway::new(temp.path().join("media"));
        let mut coordinator = SessionCoordinator::new(Arc::new(StyleCatalog::default()));

        assert!(save_outputs(&coordinator, temp.path()).is_err());

        coordinator.capture(
            &gateway,
            ImagePayload::from_bytes(b"photo", "image/jpeg"),
            Some("80s"),
        )?;
        coordinator.request_video(&gateway, "wave", Credential::new("k"))?;

        let saved = save_outputs(&coordinator, &temp.path().join("out"))?;
        let names: Vec<String> = saved
            .iter()
            .filter_map(|path| path.file_name())
            .map(|name| name.to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["retrobooth-80s.png", "retrobooth-80s.mp4"]);
        assert!(saved.iter().all(|path| path.exists()));
        Ok(())
    }

    #[test]
    fn dryrun_one_shot_writes_outputs_and_events() -> anyhow::Result<()> {
        let temp = tempfile::tempdir()?;
        let image = temp.path().join("me.png");
        write_png(&image, 32, 24)?;
        let out = temp.path().join("out");

        let cli = Cli::try_parse_from([
            "retrobooth",
            "run",
            "--image",
            image.to_str().unwrap(),
            "--out",
            out.to_str().unwrap(),
            "--style",
            "y2k",
            "--remix",
            "add glitter",
            "--video",
            "slow zoom",
            "--video-key",
            "k",
            "--dryrun",
        ])?;
        let Command::Run(args) = cli.command else {
            panic!("expected run subcommand");
        };
        assert_eq!(run_once(args)?, 0);

        assert!(out.join("retrobooth-y2k.png").exists());
        assert!(out.join("retrobooth-y2k.mp4").exists());
        let types = read_event_types(&out.join("events.jsonl"))?;
        assert_eq!(types.first(), Some(&EventKind::SessionStarted));
        assert!(types.contains(&EventKind::RemixApplied));
        assert!(types.contains(&EventKind::VideoReady));
        Ok(())
    }
}
