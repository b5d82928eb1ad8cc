use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};

use thumbforge::{
    CompositingEngine, ImageSource, OutputFormat, ThumbnailConfig,
    assets::loader::{DecodedInputs, decode_inputs},
    output::{encode::write_frame, layers::export_layers, naming::thumbnail_file_name},
};

#[derive(Parser, Debug)]
#[command(name = "thumbforge", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Composite a thumbnail from a background, a title and optional icons.
    Generate(GenerateArgs),
    /// Print the default configuration as JSON.
    Config,
}

#[derive(Parser, Debug)]
struct GenerateArgs {
    /// Background image: file path or `data:` URL.
    #[arg(long)]
    background: String,

    /// Title text.
    #[arg(long, default_value = "")]
    title: String,

    /// Icon image (repeatable, up to the configured maximum).
    #[arg(long = "icon")]
    icons: Vec<String>,

    /// Output file. Defaults to a name derived from the title; a directory gets that name
    /// inside it.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Configuration JSON; unspecified fields take their defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output format (overrides the configuration).
    #[arg(long, value_enum)]
    format: Option<FormatChoice>,

    /// Encoder quality in 0..1 (JPEG only; overrides the configuration).
    #[arg(long)]
    quality: Option<f32>,

    /// Font file to use instead of resolving configured families.
    #[arg(long)]
    font: Option<PathBuf>,

    /// Also export the layers (background PNG, title JSON, icon PNGs) into this directory.
    #[arg(long)]
    layers: Option<PathBuf>,

    /// Print the resolved font family and the SHA-256 of its bytes.
    #[arg(long)]
    dump_font: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatChoice {
    Png,
    Jpeg,
}

impl From<FormatChoice> for OutputFormat {
    fn from(value: FormatChoice) -> Self {
        match value {
            FormatChoice::Png => Self::Png,
            FormatChoice::Jpeg => Self::Jpeg,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Generate(args) => cmd_generate(args),
        Command::Config => cmd_config(),
    }
}

fn cmd_config() -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(&ThumbnailConfig::default())
        .context("serialize default config")?;
    println!("{json}");
    Ok(())
}

fn load_config(args: &GenerateArgs) -> anyhow::Result<ThumbnailConfig> {
    let mut cfg = match &args.config {
        Some(path) => ThumbnailConfig::from_path(path)
            .with_context(|| format!("load config '{}'", path.display()))?,
        None => ThumbnailConfig::default(),
    };
    if let Some(format) = args.format {
        cfg.output.format = format.into();
    }
    if let Some(quality) = args.quality {
        cfg.output.quality = quality;
    }
    if let Some(font) = &args.font {
        cfg.font.path = Some(font.clone());
    }
    cfg.validate().context("validate config")?;
    Ok(cfg)
}

fn output_path(args: &GenerateArgs, format: OutputFormat) -> PathBuf {
    let name = thumbnail_file_name(&args.title, format);
    match &args.out {
        Some(out) if out.is_dir() => out.join(name),
        Some(out) => out.clone(),
        None => PathBuf::from(name),
    }
}

fn cmd_generate(args: GenerateArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args)?;

    let max_icons = cfg.canvas.max_icons;
    if args.icons.len() > max_icons {
        tracing::warn!(
            supplied = args.icons.len(),
            max_icons,
            "ignoring icons beyond the configured maximum"
        );
    }
    let background = ImageSource::parse(&args.background).context("background source")?;
    let icons = args
        .icons
        .iter()
        .take(max_icons)
        .map(|s| ImageSource::parse(s).with_context(|| format!("icon source '{s}'")))
        .collect::<anyhow::Result<Vec<_>>>()?;

    let mut engine = CompositingEngine::new(cfg.clone())?;
    if args.dump_font {
        let face = engine.ensure_font().context("resolve title font")?;
        eprintln!("font diagnostics:");
        eprintln!("  family: {}", face.family);
        eprintln!("  sha256: {}", face.sha256_hex());
    }

    let DecodedInputs { background, icons } = decode_inputs(&background, &icons)?;
    let generation = engine.generate_decoded(&background, &args.title, &icons)?;

    let out = output_path(&args, cfg.output.format);
    create_parent(&out)?;
    write_frame(&out, &generation.frame, cfg.output.format, cfg.output.quality)
        .with_context(|| format!("write thumbnail '{}'", out.display()))?;
    eprintln!("wrote {}", out.display());

    if let Some(dir) = &args.layers {
        let family = engine.font().map(|f| f.family.as_str());
        let files = export_layers(dir, &generation, &args.title, family, &icons, &cfg)
            .with_context(|| format!("export layers to '{}'", dir.display()))?;
        eprintln!("wrote {} layer files to {}", files.len(), dir.display());
    }

    Ok(())
}

fn create_parent(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}
