use clap::{Parser, Subcommand};
use photochronicle::collection::{self, PhotoFilter};
use photochronicle::config::{self, AlbumConfig};
use photochronicle::imaging::{ProbeSummary, RustBackend, probe_images};
use photochronicle::layout::{AlbumLayout, LayoutPlan};
use photochronicle::types::{PhotoId, PhotoRecord};
use photochronicle::{output, render};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Flags shared by every command that plans an album.
#[derive(clap::Args, Clone)]
struct AlbumArgs {
    /// JSON array of photo records
    #[arg(long, default_value = "photos.json")]
    photos: PathBuf,

    /// Which photos to include: all, month:YYYY-MM, tag:NAME or event:NAME
    #[arg(long, default_value = "all")]
    filter: PhotoFilter,

    /// Only these photo ids (comma separated), kept in collection order
    #[arg(long, value_delimiter = ',')]
    ids: Vec<String>,

    /// Cover title (defaults to one derived from the filter)
    #[arg(long)]
    title: Option<String>,

    /// Cover subtitle
    #[arg(long)]
    subtitle: Option<String>,

    /// Directory that image refs resolve against. Enables size probing.
    #[arg(long)]
    probe_root: Option<PathBuf>,
}

#[derive(Parser)]
#[command(name = "photochronicle")]
#[command(about = "Lay out photo selections as printable albums")]
#[command(long_about = "\
Lay out photo selections as printable albums

An album is a cover page followed by content pages with two photos each:
one in the top half of the page, one in the bottom half. Every image is
scaled to fit a fixed frame and captioned with its title, date taken and
description.

Input is a JSON array of photo records:

  [
    {
      \"id\": \"p1\",
      \"image_ref\": \"uploads/p1.jpg\",
      \"title\": \"Dunes\",
      \"description\": \"Early light\",
      \"date_taken\": \"2023-06-10T08:30:00Z\",
      \"tags\": [\"desert\"],
      \"event\": \"Road trip\"
    }
  ]

Images that cannot be read get a grey placeholder in the same frame.

Logging goes to stderr; set RUST_LOG=debug for detail.
Run 'photochronicle gen-config' to generate a documented album.toml.")]
#[command(version)]
struct Cli {
    /// Directory containing album.toml
    #[arg(long, default_value = ".", global = true)]
    config_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the page-by-page plan of an album
    Plan {
        #[command(flatten)]
        album: AlbumArgs,
        /// Print the full plan as JSON instead of the summary
        #[arg(long)]
        json: bool,
    },
    /// Render an album to a printable HTML document
    Render {
        #[command(flatten)]
        album: AlbumArgs,
        /// Output file
        #[arg(long, default_value = "album.html")]
        out: PathBuf,
    },
    /// Validate config and photo list without rendering
    Check {
        #[command(flatten)]
        album: AlbumArgs,
    },
    /// List the tag and event filters a photo list offers
    Filters {
        /// JSON array of photo records
        #[arg(long, default_value = "photos.json")]
        photos: PathBuf,
    },
    /// Print a stock album.toml with all options documented
    GenConfig,
}

/// A laid-out album and, when images were probed, what probing found.
struct Built {
    plan: LayoutPlan,
    probed: Option<(ProbeSummary, PathBuf)>,
}

impl Built {
    fn print_probe_output(&self) {
        if let Some((summary, root)) = &self.probed {
            output::print_probe_output(summary, root);
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Plan { album, json } => {
            let config = config::load_config(&cli.config_dir)?;
            let built = build_plan(&config, &album)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&built.plan)?);
            } else {
                built.print_probe_output();
                output::print_plan_output(&built.plan);
            }
        }
        Command::Render { album, out } => {
            let config = config::load_config(&cli.config_dir)?;
            let built = build_plan(&config, &album)?;
            built.print_probe_output();
            let plan = built.plan;
            let root = image_root(&album);
            let resolver = render::PathResolver::new(root);
            let title = album_title(&album);
            let html = render::render_album(&plan, &title, &resolver);
            std::fs::write(&out, html.into_string())?;
            info!(out = %out.display(), pages = plan.page_count(), "rendered album");
            output::print_render_output(&plan, &out);
        }
        Command::Check { album } => {
            let config = config::load_config(&cli.config_dir)?;
            let built = build_plan(&config, &album)?;
            built.print_probe_output();
            let config_path = cli.config_dir.join(config::CONFIG_FILENAME);
            output::print_check_output(&built.plan, &config_path);
        }
        Command::Filters { photos } => {
            let all = collection::load_photos(&photos)?;
            output::print_filters_output(&all);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Log to stderr, `warn` and above unless `RUST_LOG` says otherwise.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Load, select, optionally probe, then lay out. Prints nothing.
fn build_plan(
    config: &AlbumConfig,
    album: &AlbumArgs,
) -> Result<Built, Box<dyn std::error::Error>> {
    let photos = select_photos(album)?;
    info!(count = photos.len(), filter = ?album.filter, "selected photos");

    let (photos, probed) = match &album.probe_root {
        Some(root) => {
            init_thread_pool(&config.processing);
            let (probed, summary) = probe_images(&RustBackend::new(), &photos, root);
            info!(root = %root.display(), %summary, "probed images");
            (probed, Some((summary, root.clone())))
        }
        None => (photos, None),
    };

    let layout = AlbumLayout::new(config.page, config.layout.clone())?;
    let options = config.album_options(&album_title(album), album.subtitle.as_deref());
    let today = chrono::Local::now().date_naive();
    let plan = layout.plan(&photos, &options, today)?;
    Ok(Built { plan, probed })
}

fn select_photos(album: &AlbumArgs) -> Result<Vec<PhotoRecord>, collection::CollectionError> {
    let all = collection::load_photos(&album.photos)?;
    let filtered = collection::select(&all, &album.filter);
    if album.ids.is_empty() {
        return Ok(filtered);
    }
    let ids: Vec<PhotoId> = album.ids.iter().map(|id| PhotoId::from(id.as_str())).collect();
    Ok(collection::select_ids(&filtered, &ids))
}

fn album_title(album: &AlbumArgs) -> String {
    album
        .title
        .clone()
        .unwrap_or_else(|| album.filter.default_title())
}

/// Where image refs resolve when rendering: the probe root if given,
/// otherwise the directory holding the photo list.
fn image_root(album: &AlbumArgs) -> PathBuf {
    album.probe_root.clone().unwrap_or_else(|| {
        album
            .photos
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default()
    })
}

/// Initialize the rayon thread pool based on processing config.
///
/// Capped at the number of available CPU cores.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
