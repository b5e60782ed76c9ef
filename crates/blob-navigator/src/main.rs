use std::{
    path::{Path, PathBuf},
    process::ExitCode,
    sync::Arc,
};

use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use thiserror::Error;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use blob_navigator::{
    BlobInfo, Document, HighlightIndex, Position, StaticCodeIntel, ViewerSettings,
    blame::{BlameKey, BlameStore, display_hunks},
    codeintel::{CodeIntelError, StaticIndexError},
    config::{SettingsError, generate_configuration_markdown},
    decorations::{DecorationInputs, DecorationRenderer, HoveredLine},
    definition::{DefinitionPerf, DefinitionPipeline},
    document::BlobInfoError,
    navigation::{Direction, occurrence_in_direction},
    occurrence::{OccurrenceDecodeError, occurrences_from_blob},
    prefetch::{PrefetchContext, TokenLinkSet, Viewport, prefetch_viewport},
};

#[derive(Parser, Debug)]
#[command(name = "blob-navigator", version, about)]
struct Args {
    #[arg(long, short, global = true)]
    verbose: bool,

    #[arg(long, global = true)]
    log_file: Option<String>,

    /// Settings file (`.toml` or `.json`).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the occurrence table of a blob.
    Inspect { blob: PathBuf },
    /// Move from a position to the next interactive occurrence.
    Navigate {
        blob: PathBuf,
        #[arg(long)]
        line: u32,
        #[arg(long)]
        character: u32,
        #[arg(long, value_enum)]
        key: ArrowKey,
    },
    /// Resolve go-to-definition at a position.
    Resolve {
        blob: PathBuf,
        #[arg(long)]
        codeintel: PathBuf,
        #[arg(long)]
        line: u32,
        #[arg(long)]
        character: u32,
    },
    /// Prefetch definition links for a range of lines.
    Links {
        blob: PathBuf,
        #[arg(long)]
        codeintel: PathBuf,
        #[arg(long)]
        first_line: u32,
        #[arg(long)]
        last_line: u32,
    },
    /// Print the overlays rendered for a range of lines.
    Decorations {
        blob: PathBuf,
        #[arg(long)]
        codeintel: Option<PathBuf>,
        #[arg(long)]
        first_line: u32,
        #[arg(long)]
        last_line: u32,
        #[arg(long)]
        blame: bool,
    },
    /// Print the settings reference.
    Schema,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ArrowKey {
    Left,
    Right,
    Up,
    Down,
}

impl From<ArrowKey> for Direction {
    fn from(key: ArrowKey) -> Self {
        match key {
            ArrowKey::Left => Direction::Left,
            ArrowKey::Right => Direction::Right,
            ArrowKey::Up => Direction::Up,
            ArrowKey::Down => Direction::Down,
        }
    }
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Blob(#[from] BlobInfoError),
    #[error(transparent)]
    Occurrences(#[from] OccurrenceDecodeError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    StaticIndex(#[from] StaticIndexError),
    #[error(transparent)]
    CodeIntel(#[from] CodeIntelError),
}

fn default_log_path() -> PathBuf {
    dirs_or_tmp().join("blob-navigator.log")
}

fn dirs_or_tmp() -> PathBuf {
    if let Some(home) = std::env::var_os("HOME") {
        let dir = PathBuf::from(home).join(".blob-navigator");
        if std::fs::create_dir_all(&dir).is_ok() {
            return dir;
        }
    }
    std::env::temp_dir()
}

fn init_logging(
    args: &Args,
    settings: &ViewerSettings,
) -> PathBuf {
    let level = settings.logging.level.as_directive();
    let stderr_filter = if args.verbose {
        EnvFilter::new("blob_navigator=debug")
    } else {
        EnvFilter::new("blob_navigator=warn")
    };
    let file_filter = if args.verbose {
        EnvFilter::new("blob_navigator=debug")
    } else {
        EnvFilter::new(format!("blob_navigator={level}"))
    };

    let log_path = args.log_file.as_ref().map(PathBuf::from).unwrap_or_else(default_log_path);
    let file_appender = tracing_appender::rolling::never(
        log_path.parent().unwrap_or(Path::new(".")),
        log_path.file_name().unwrap_or(std::ffi::OsStr::new("blob-navigator.log")),
    );

    let file_layer = fmt::layer().with_writer(file_appender).with_ansi(false).with_target(false).with_filter(file_filter);
    let stderr_layer =
        fmt::layer().with_writer(std::io::stderr).with_ansi(false).with_target(false).with_filter(stderr_filter);

    tracing_subscriber::registry().with(file_layer).with(stderr_layer).init();
    log_path
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let settings = match &args.config {
        Some(path) => ViewerSettings::load(path),
        None => Ok(ViewerSettings::default()),
    };
    let log_path = init_logging(&args, settings.as_ref().unwrap_or(&ViewerSettings::default()));
    info!("blob-navigator v{} (log file: {})", env!("CARGO_PKG_VERSION"), log_path.display());

    let result = match settings {
        Ok(settings) => run(args.command, settings).await,
        Err(error) => Err(error.into()),
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            error!("{error}");
            eprintln!("error: {error}");
            ExitCode::FAILURE
        },
    }
}

async fn run(
    command: Command,
    settings: ViewerSettings,
) -> Result<(), CliError> {
    match command {
        Command::Inspect {
            blob,
        } => inspect(&blob),
        Command::Navigate {
            blob,
            line,
            character,
            key,
        } => navigate(&blob, Position::new(line, character), key.into()),
        Command::Resolve {
            blob,
            codeintel,
            line,
            character,
        } => resolve(&blob, &codeintel, Position::new(line, character)).await,
        Command::Links {
            blob,
            codeintel,
            first_line,
            last_line,
        } => links(&blob, &codeintel, Viewport::new(first_line, last_line)).await,
        Command::Decorations {
            blob,
            codeintel,
            first_line,
            last_line,
            blame,
        } => decorations(&blob, codeintel.as_deref(), Viewport::new(first_line, last_line), blame, &settings).await,
        Command::Schema => {
            print!("{}", generate_configuration_markdown());
            Ok(())
        },
    }
}

fn open_blob(path: &Path) -> Result<(Arc<BlobInfo>, Arc<HighlightIndex>), CliError> {
    let (blob, _, index) = open_document(path)?;
    Ok((blob, index))
}

fn open_document(path: &Path) -> Result<(Arc<BlobInfo>, Document, Arc<HighlightIndex>), CliError> {
    let blob = BlobInfo::load(path)?;
    let occurrences = occurrences_from_blob(&blob)?;
    let document = Document::new(blob.content.as_str());
    let index = Arc::new(HighlightIndex::new(occurrences, document.line_count()));
    Ok((Arc::new(blob), document, index))
}

fn inspect(path: &Path) -> Result<(), CliError> {
    let (blob, document, index) = open_document(path)?;
    let interactive = index.interactive_occurrences().count();
    println!("{}@{} {}", blob.repo_name, blob.revision, blob.file_path);
    println!("{} lines, {} occurrences, {} interactive", index.line_count(), index.occurrences().len(), interactive);

    for line in 0..index.line_count() as u32 {
        let cells: Vec<String> = index
            .occurrences_on_line(line)
            .map(|occurrence| {
                let kind = occurrence.kind.map_or_else(|| "-".to_owned(), |kind| format!("{kind:?}"));
                let marker = if occurrence.is_interactive() { "*" } else { "" };
                format!("{}..{} {kind}{marker}", occurrence.range.start.character, occurrence.range.end.character)
            })
            .collect();
        if !cells.is_empty() {
            println!("L{}: {}", line + 1, document.line_text(line as usize).unwrap_or_default().trim());
            println!("    {}", cells.join(", "));
        }
    }
    Ok(())
}

fn navigate(
    path: &Path,
    position: Position,
    direction: Direction,
) -> Result<(), CliError> {
    let (_, index) = open_blob(path)?;
    match occurrence_in_direction(&index, position, direction) {
        Some(occurrence) => {
            let range = occurrence.range;
            println!("{}:{}-{}:{}", range.start.line, range.start.character, range.end.line, range.end.character);
        },
        None => println!("no occurrence"),
    }
    Ok(())
}

async fn resolve(
    path: &Path,
    codeintel: &Path,
    position: Position,
) -> Result<(), CliError> {
    let (blob, index) = open_blob(path)?;
    let client = Arc::new(StaticCodeIntel::load(codeintel)?);
    let Some(occurrence) = index.occurrence_at(position) else {
        println!("no occurrence");
        return Ok(());
    };
    let pipeline = DefinitionPipeline::new(blob, client, Arc::new(DefinitionPerf::default()));
    println!("{}", pipeline.resolve(occurrence, position).await);
    Ok(())
}

async fn prefetched_links(
    blob: &Arc<BlobInfo>,
    index: &Arc<HighlightIndex>,
    codeintel: Option<&Path>,
    viewport: Viewport,
) -> Result<Arc<TokenLinkSet>, CliError> {
    let links = Arc::new(TokenLinkSet::seeded(index));
    if let Some(codeintel) = codeintel {
        let context = PrefetchContext {
            blob: Arc::clone(blob),
            index: Arc::clone(index),
            links: Arc::clone(&links),
            source: Arc::new(StaticCodeIntel::load(codeintel)?),
        };
        let changed = prefetch_viewport(&context, viewport).await?;
        info!("[prefetch] {changed} links resolved for lines {}..={}", viewport.first_line, viewport.last_line);
    }
    Ok(links)
}

async fn links(
    path: &Path,
    codeintel: &Path,
    viewport: Viewport,
) -> Result<(), CliError> {
    let (blob, index) = open_blob(path)?;
    let links = prefetched_links(&blob, &index, Some(codeintel), viewport).await?;
    for link in links.snapshot().iter().filter(|link| link.range.within_lines(viewport.first_line, viewport.last_line)) {
        let start = link.range.start;
        let end = link.range.end;
        let url = link.url.as_deref().unwrap_or("(unresolved)");
        println!("{}:{}-{}:{} -> {url}", start.line, start.character, end.line, end.character);
    }
    Ok(())
}

async fn decorations(
    path: &Path,
    codeintel: Option<&Path>,
    viewport: Viewport,
    show_blame: bool,
    settings: &ViewerSettings,
) -> Result<(), CliError> {
    let (blob, index) = open_blob(path)?;
    let links = prefetched_links(&blob, &index, codeintel, viewport).await?;

    let blame = if show_blame || settings.blame.visible {
        let source = match codeintel {
            Some(codeintel) => StaticCodeIntel::load(codeintel)?,
            None => StaticCodeIntel::default(),
        };
        let store = BlameStore::new(Arc::new(source));
        let hunks = store.hunks(BlameKey::for_blob(&blob)).await?;
        Some(Arc::new(display_hunks(&hunks, &settings.blame, Utc::now())))
    } else {
        None
    };

    let renderer = DecorationRenderer::new(settings.decorations.overscan_lines);
    let rendered = renderer.render(DecorationInputs {
        index,
        links: links.snapshot(),
        blame,
        hovered: HoveredLine::None,
        clickable: false,
        viewport,
    });
    print!("{rendered}");
    Ok(())
}
