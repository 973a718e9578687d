use clap::Parser;
use codeshot::config::Config;
use codeshot::preprocessing::Preset;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "codeshot-server")]
#[command(about = "Screenshot enhancement and code language detection server")]
#[command(version)]
pub struct Args {
    /// Host address to bind to
    #[arg(long, env = "CODESHOT_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "CODESHOT_PORT", default_value = "9393")]
    pub port: u16,

    /// Maximum upload size in bytes (default: 20MB)
    #[arg(long, env = "CODESHOT_MAX_FILE_SIZE", default_value = "20971520")]
    pub max_file_size: usize,

    /// Preset used when a request names neither a preset nor settings
    #[arg(long, env = "CODESHOT_DEFAULT_PRESET", default_value = "default")]
    pub default_preset: String,

    /// Start without an OCR engine (enhance and classify only)
    #[arg(long, env = "CODESHOT_NO_OCR")]
    pub no_ocr: bool,

    /// Directory for cached OCR models
    #[arg(long, env = "CODESHOT_MODEL_DIR")]
    pub model_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,
}

impl TryFrom<Args> for Config {
    type Error = codeshot::CodeshotError;

    fn try_from(args: Args) -> Result<Self, Self::Error> {
        Ok(Self {
            host: args.host,
            port: args.port,
            max_file_size: args.max_file_size,
            default_preset: args.default_preset.parse::<Preset>()?,
            ocr_enabled: !args.no_ocr,
            model_dir: args.model_dir,
        })
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| args.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::try_from(args)?;

    tracing::info!("Starting codeshot-server v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "Binding to {}:{} (default preset: {}, ocr: {})",
        config.host,
        config.port,
        config.default_preset,
        config.ocr_enabled
    );

    codeshot::server::run(config).await
}
