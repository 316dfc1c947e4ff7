//! Review card generator.
//!
//! Renders shareable review cards to PNG:
//! - `render`: one card from flags and/or a request file
//! - `batch`: many cards from a list, covers fetched concurrently
//! - `watch`: live preview of a request file
//! - `palettes`: list the built-in palettes

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

use card_common::{BuiltinPalette, Color, ContentType, PaletteOverrides, Platform};
use cardgen::config::{default_output_name, load_batch, load_request, RequestOverrides};
use cardgen::pipeline::{GenerateOptions, Pipeline};
use cardgen::watch::{self, Preview};
use cardgen::CardgenError;
use cover_loader::{CoverLoader, LoaderConfig};
use renderer::CardStyle;

#[derive(Parser, Debug)]
#[command(name = "cardgen")]
#[command(about = "Generate shareable review cards as PNG images")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Style file (JSON or YAML) overriding layout constants
    #[arg(long, global = true)]
    style: Option<PathBuf>,

    /// Log level
    #[arg(long, global = true, env = "CARDGEN_LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Log output format
    #[arg(long, global = true, value_enum, default_value = "pretty")]
    log_format: LogFormat,

    /// Timeout for loading a cover image, in milliseconds
    #[arg(long, global = true, env = "CARDGEN_COVER_TIMEOUT_MS", default_value = "10000")]
    cover_timeout_ms: u64,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormat {
    Json,
    Pretty,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a single card
    Render(RenderArgs),

    /// Render every card listed in a batch file
    Batch {
        /// YAML or JSON list of `{ output, request }` entries
        file: PathBuf,
    },

    /// Re-render a preview whenever the request file changes
    Watch {
        /// Request file to watch
        request: PathBuf,

        /// Preview PNG path (default: derived from the title)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Quiet period before re-rendering, in milliseconds
        #[arg(long, default_value = "300")]
        debounce_ms: u64,
    },

    /// List the built-in palettes
    Palettes,
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// Request file (YAML or JSON); flags override its fields
    #[arg(short, long)]
    request: Option<PathBuf>,

    /// Output PNG path (default: derived from the title)
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[arg(long)]
    title: Option<String>,

    /// Score out of 10
    #[arg(long)]
    score: Option<f32>,

    #[arg(long)]
    review: Option<String>,

    /// game, movie, anime or generic
    #[arg(long)]
    content_type: Option<ContentType>,

    /// none, backloggd or letterboxd
    #[arg(long)]
    platform: Option<Platform>,

    /// Platform handle shown in the footer
    #[arg(long)]
    username: Option<String>,

    /// Built-in palette name
    #[arg(long)]
    palette: Option<String>,

    /// Background color override (#rrggbb)
    #[arg(long)]
    bg: Option<Color>,

    #[arg(long)]
    accent: Option<Color>,

    #[arg(long)]
    primary: Option<Color>,

    #[arg(long)]
    secondary: Option<Color>,

    #[arg(long)]
    width: Option<u32>,

    #[arg(long)]
    height: Option<u32>,

    #[arg(long)]
    corner_radius: Option<u32>,

    /// Cover image URL or local path
    #[arg(long)]
    cover: Option<String>,
}

impl RenderArgs {
    fn overrides(&self) -> RequestOverrides {
        RequestOverrides {
            title: self.title.clone(),
            score: self.score,
            review_text: self.review.clone(),
            content_type: self.content_type,
            platform: self.platform,
            username: self.username.clone(),
            palette: self.palette.clone(),
            colors: PaletteOverrides {
                background: self.bg,
                accent: self.accent,
                text_primary: self.primary,
                text_secondary: self.secondary,
            },
            width: self.width,
            height: self.height,
            corner_radius: self.corner_radius,
            cover: self.cover.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment from .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    if let Err(e) = init_tracing(&cli.log_level, cli.log_format) {
        eprintln!("Failed to initialize logging: {}", e);
        return ExitCode::FAILURE;
    }

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            let message = match e.downcast_ref::<CardgenError>() {
                Some(err) => err.user_message(),
                None => format!("{:#}", e),
            };
            error!(error = %message, "cardgen failed");
            eprintln!("error: {}", message);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(log_level: &str, format: LogFormat) -> Result<()> {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr);

    match format {
        LogFormat::Json => {
            let subscriber = builder.with_thread_ids(true).json().finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        LogFormat::Pretty => {
            let subscriber = builder.finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
    }
    Ok(())
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let style = match &cli.style {
        Some(path) => CardStyle::from_file(path).map_err(CardgenError::from)?,
        None => CardStyle::default(),
    };
    let loader = LoaderConfig::default().with_timeout(Duration::from_millis(cli.cover_timeout_ms));
    let options = GenerateOptions { style, loader };

    match cli.command {
        Command::Render(args) => {
            let overrides = args.overrides();
            let request = match &args.request {
                Some(path) => overrides
                    .apply(load_request(path)?)
                    .map_err(CardgenError::from)?,
                None => overrides.into_request()?,
            };

            let output = args
                .output
                .unwrap_or_else(|| PathBuf::from(default_output_name(&request.title)));

            let pipeline = Pipeline::new(options)?;
            let generated = pipeline.generate(&request, &output).await?;
            if let Some(reason) = &generated.placeholder {
                info!(reason = %reason, "Cover replaced by placeholder");
            }
            println!("{}", generated.path.display());
            Ok(ExitCode::SUCCESS)
        }
        Command::Batch { file } => {
            let entries = load_batch(&file)?;
            info!(file = %file.display(), entries = entries.len(), "Starting batch");

            let pipeline = Pipeline::new(options)?;
            let report = pipeline.generate_batch(entries).await;
            for item in &report.items {
                match &item.result {
                    Ok(generated) => println!("ok      {}", generated.path.display()),
                    Err(e) => println!("failed  {}: {}", item.output.display(), e.user_message()),
                }
            }
            println!("{} succeeded, {} failed", report.succeeded(), report.failed());

            Ok(if report.all_ok() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Command::Watch {
            request,
            output,
            debounce_ms,
        } => {
            let output = match output {
                Some(output) => output,
                None => {
                    let title = load_request(&request).map(|r| r.title).unwrap_or_default();
                    PathBuf::from(default_output_name(&title))
                }
            };
            let loader = CoverLoader::new(options.loader).map_err(CardgenError::from)?;
            let preview = Preview::new(request, output, options.style, loader);
            watch::run(
                preview,
                Duration::from_millis(debounce_ms),
                watch::DEFAULT_POLL_INTERVAL,
            )
            .await?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Palettes => {
            print_palettes();
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn print_palettes() {
    println!(
        "{:<16} {:<9} {:<9} {:<9} {:<9}",
        "NAME", "BG", "ACCENT", "PRIMARY", "SECONDARY"
    );
    for builtin in BuiltinPalette::ALL {
        let p = builtin.palette();
        println!(
            "{:<16} {:<9} {:<9} {:<9} {:<9}",
            p.name,
            p.background.to_hex(),
            p.accent.to_hex(),
            p.text_primary.to_hex(),
            p.text_secondary.to_hex()
        );
    }
}
