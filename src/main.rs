use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use mockupkit::{
    editor_options, init_logging, Config, DesignDocument, EditorSession, EventBus, FsAssetLoader,
    ImageStore, ProductCatalog, SettingsManager, Size,
};

/// Editor canvas size used for headless sessions.
const HEADLESS_CANVAS: Size = Size {
    width: 800.0,
    height: 600.0,
};

#[derive(Parser, Debug)]
#[command(name = "mockupkit", version, about = "Product mockup designs from the command line")]
struct Cli {
    /// Product catalog JSON; the built-in catalog when omitted.
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Settings file (JSON or TOML); the user config when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Debug logging.
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List products with their sides and previews.
    Products,
    /// Summarize a saved design, optionally with one composed preview.
    Inspect(InspectArgs),
    /// Render a preview of a saved design as PNG.
    Preview(PreviewArgs),
}

#[derive(Parser, Debug)]
struct InspectArgs {
    /// Design document JSON.
    design: PathBuf,

    /// Print the composed preview with this key as JSON.
    #[arg(long)]
    preview: Option<String>,

    /// Preview canvas edge length.
    #[arg(long)]
    size: Option<u32>,
}

#[derive(Parser, Debug)]
struct PreviewArgs {
    /// Design document JSON.
    design: PathBuf,

    /// Preview key, e.g. `front` or `person1`.
    #[arg(long)]
    preview: String,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Preview canvas edge length; the large preview size when omitted.
    #[arg(long)]
    size: Option<u32>,

    /// Directory image references resolve against.
    #[arg(long, default_value = ".")]
    assets: PathBuf,

    /// Output pixels per preview pixel; the export multiplier when omitted.
    #[arg(long)]
    multiplier: Option<u32>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;
    tracing::debug!("mockupkit {} built {}", mockupkit::VERSION, mockupkit::BUILD_DATE);

    let catalog = load_catalog(cli.catalog.as_deref())?;
    let config = load_config(cli.config.as_deref())?;
    match cli.cmd {
        Command::Products => cmd_products(&catalog),
        Command::Inspect(args) => cmd_inspect(&catalog, &config, args),
        Command::Preview(args) => cmd_preview(&catalog, &config, args),
    }
}

fn load_catalog(path: Option<&Path>) -> anyhow::Result<ProductCatalog> {
    match path {
        Some(path) => ProductCatalog::load_from_file(path)
            .with_context(|| format!("load catalog '{}'", path.display())),
        None => Ok(ProductCatalog::builtin()),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let manager = match path {
        Some(path) => SettingsManager::load_or_default(path),
        None => SettingsManager::load_default(),
    };
    match manager {
        Ok(manager) => Ok(manager.config().clone()),
        Err(e) if path.is_none() => {
            tracing::warn!("Using default settings: {}", e);
            Ok(Config::default())
        }
        Err(e) => Err(e).context("load settings"),
    }
}

/// Opens a headless session with the design applied.
fn open_design(
    catalog: &ProductCatalog,
    config: &Config,
    path: &Path,
) -> anyhow::Result<EditorSession> {
    let document = DesignDocument::load_from_file(path)?;
    let product = catalog.get(&document.metadata.product_id)?.clone();
    let first = product.first_side()?.key.clone();
    let mut session = EditorSession::new(
        product,
        &first,
        HEADLESS_CANVAS,
        editor_options(config),
        Arc::new(EventBus::new()),
    )?;
    session.apply_document(&document)?;
    Ok(session)
}

fn cmd_products(catalog: &ProductCatalog) -> anyhow::Result<()> {
    for product in catalog.products() {
        println!("{}  {}", product.id, product.name);
        for side in &product.sides {
            let d = side.print_dimensions;
            println!(
                "  side {:<12} {}x{} at ({}, {})",
                side.key, d.width, d.height, d.left_offset, d.top_offset
            );
        }
        let previews: Vec<&str> = product.preview_mockups.keys().map(String::as_str).collect();
        println!("  previews: {}", previews.join(", "));
    }
    Ok(())
}

fn cmd_inspect(catalog: &ProductCatalog, config: &Config, args: InspectArgs) -> anyhow::Result<()> {
    let session = open_design(catalog, config, &args.design)?;
    println!("{} ({})", session.design_name(), session.product().id);
    for (key, snapshot) in session.snapshots() {
        match snapshot {
            Some(s) if !s.is_empty() => println!(
                "  {:<12} {} objects{}",
                key,
                s.len(),
                if s.is_legacy() { " (legacy)" } else { "" }
            ),
            _ => println!("  {:<12} empty", key),
        }
    }

    if let Some(preview) = args.preview {
        let size = args.size.unwrap_or(config.projection.large_preview_size);
        let scene = session.render_preview(&preview, f64::from(size))?;
        println!("{}", serde_json::to_string_pretty(&scene)?);
    }
    Ok(())
}

fn cmd_preview(catalog: &ProductCatalog, config: &Config, args: PreviewArgs) -> anyhow::Result<()> {
    let session = open_design(catalog, config, &args.design)?;
    let size = args.size.unwrap_or(config.projection.large_preview_size);
    let multiplier = args.multiplier.unwrap_or(config.projection.export_multiplier);
    let scene = session.render_preview(&args.preview, f64::from(size))?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("start runtime")?;
    let loader = FsAssetLoader::new(&args.assets);
    let mut images = ImageStore::new();
    let loaded = runtime.block_on(images.preload(&loader, scene.asset_refs()));
    tracing::debug!("Loaded {} images from {}", loaded, args.assets.display());

    if let Some(parent) = args.out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    mockupkit::designer::export_png(&scene, &images, f64::from(multiplier), &args.out)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}
