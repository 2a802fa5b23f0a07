use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use std::{env, path::PathBuf};
use tracing::{info, Level};
use tracing_subscriber::{
    field::RecordFields,
    fmt::{self, time::ChronoUtc, FormatFields},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use medicare_server::config::{Overrides, DEFAULT_CONFIG_FILE};
use medicare_server::{create_app, AppContext, Settings};

/// MediCare AI HTTP Server
#[derive(Parser, Debug)]
#[command(name = "medicare-server")]
#[command(about = "Disease prediction HTTP API server")]
struct Args {
    /// Server bind address [default: 0.0.0.0]
    #[arg(long, env = "MEDICARE_HOST")]
    host: Option<String>,

    /// Server port [default: 5000]
    #[arg(short, long, env = "MEDICARE_PORT")]
    port: Option<u16>,

    /// Configuration file path
    #[arg(short, long, env = "MEDICARE_CONFIG", default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Directory holding the model and label encoder artifacts [default: .]
    #[arg(long, env = "MEDICARE_ARTIFACT_DIR")]
    artifact_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env must be in the environment before clap and the config layer read it
    let dotenv = dotenvy::dotenv();
    let args = Args::parse();

    init_tracing(args.verbose);

    if let Ok(path) = dotenv {
        info!(path = %path.display(), "Loaded .env file");
    }

    info!("{}", "Starting MediCare AI HTTP Server".bright_cyan());
    info!("Version: {}", env!("CARGO_PKG_VERSION").bright_white());

    let settings = Settings::load(&args.config)
        .with_context(|| format!("Invalid configuration in {}", args.config.display()))?
        .with_overrides(Overrides {
            host: args.host,
            port: args.port,
            artifact_dir: args.artifact_dir,
        });
    let addr = settings.bind_address();
    info!("Bind address: {}", addr.bright_yellow());

    let ctx = AppContext::from_settings(settings);
    let app = create_app(ctx);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;

    info!("{}", format!("MediCare AI server running on http://{addr}").bright_green());
    info!("{}", format!("Health check available at: http://{addr}/health").bright_blue());
    info!("{}", format!("Predictions at: POST http://{addr}/predict").bright_blue());
    info!("{}", format!("OpenAPI document: http://{addr}/api-docs/openapi.json").bright_blue());

    axum::serve(listener, app).await.context("HTTP server error")?;
    Ok(())
}

fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    // Check if we're in development or production
    let is_development =
        env::var("MEDICARE_ENV").unwrap_or_else(|_| "development".to_string()) == "development";
    let use_colors = env::var("NO_COLOR").is_err() && atty::is(atty::Stream::Stdout);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("medicare_server={level},diagnosis_engine={level},treatment_knowledge={level},tower_http=info").into()
    });

    if is_development && use_colors {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .with_ansi(true)
                    .event_format(ColoredFormatter)
                    .fmt_fields(ColoredFieldFormatter),
            )
            .init();

        print_startup_banner();
    } else {
        // Structured JSON logging for production
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_ansi(false)
                    .json(),
            )
            .init();
    }
}

fn print_startup_banner() {
    println!("{}", "╔══════════════════════════════════════════════════════════════╗".bright_cyan());
    println!("{}", "║                        MEDICARE AI                           ║".bright_cyan());
    println!("{}", "║               Disease Prediction Backend API                 ║".bright_cyan());
    println!("{}", "╚══════════════════════════════════════════════════════════════╝".bright_cyan());
    println!();
}

// Custom colored formatter for development
struct ColoredFormatter;

impl<S, N> tracing_subscriber::fmt::FormatEvent<S, N> for ColoredFormatter
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &tracing_subscriber::fmt::FmtContext<'_, S, N>,
        mut writer: tracing_subscriber::fmt::format::Writer<'_>,
        event: &tracing::Event<'_>,
    ) -> std::fmt::Result {
        let metadata = event.metadata();

        write!(
            writer,
            "{} ",
            chrono::Utc::now().format("%H:%M:%S%.3f").to_string().bright_black()
        )?;

        let level_str = match *metadata.level() {
            Level::TRACE => "TRACE".bright_purple(),
            Level::DEBUG => "DEBUG".bright_blue(),
            Level::INFO => " INFO".bright_green(),
            Level::WARN => " WARN".bright_yellow(),
            Level::ERROR => "ERROR".bright_red(),
        };
        write!(writer, "[{level_str}] ")?;

        if let Some(target) = metadata.target().split("::").last() {
            write!(writer, "{:<15} ", target.bright_cyan())?;
        }

        ctx.format_fields(writer.by_ref(), event)?;

        // file and line for debug/trace
        if metadata.level() >= &Level::DEBUG {
            if let (Some(file), Some(line)) = (metadata.file(), metadata.line()) {
                let file_short = file.rsplit('/').next().unwrap_or(file);
                write!(writer, " {}", format!("({file_short}:{line})").bright_black())?;
            }
        }

        writeln!(writer)
    }
}

// Custom field formatter for colored output
struct ColoredFieldFormatter;

impl<'a> FormatFields<'a> for ColoredFieldFormatter {
    fn format_fields<R: RecordFields>(
        &self,
        writer: tracing_subscriber::fmt::format::Writer<'a>,
        fields: R,
    ) -> std::fmt::Result {
        let mut visitor = ColoredFieldVisitor {
            writer,
            result: Ok(()),
        };
        fields.record(&mut visitor);
        visitor.result
    }
}

struct ColoredFieldVisitor<'a> {
    writer: tracing_subscriber::fmt::format::Writer<'a>,
    result: std::fmt::Result,
}

impl ColoredFieldVisitor<'_> {
    fn write_field(&mut self, name: &str, value: &str) {
        if self.result.is_err() {
            return;
        }
        self.result = if name == "message" {
            write!(self.writer, "{}", value.white().bold())
        } else {
            write!(self.writer, " {}={}", name.bright_yellow(), value.bright_white())
        };
    }
}

impl tracing::field::Visit for ColoredFieldVisitor<'_> {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.write_field(field.name(), &format!("{value:?}"));
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.write_field(field.name(), value);
    }
}
