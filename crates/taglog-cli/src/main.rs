use std::io::{self, BufRead, Write};
use std::net::{IpAddr, Ipv4Addr};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use log::info;
use taglog_core::frame::layout::is_word_char;
use taglog_core::{
    Clock, ConsoleSink, DEFAULT_PORT, DEFAULT_READ_BUFFER, FormatSpec, LayoutRegistry,
    LineOutcome, Server, ServerConfig, ServerError, SessionContext, Value, inspect_line,
    tag_values,
};

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (commit ",
    env!("TAGLOG_BUILD_COMMIT"),
    ", ",
    env!("TAGLOG_BUILD_DATE"),
    ")"
);

const EXAMPLES: &str = "Examples:\n  taglog\n  taglog serve --port 9100\n  taglog decode 'DATA_TAG: NAME:Foo FORMAT:<I LEN:1 BASE64:AQAAAA=='\n  taglog encode --name NetworkData 7 3300";

#[derive(Parser, Debug)]
#[command(name = "taglog")]
#[command(version, long_version = LONG_VERSION)]
#[command(
    about = "TCP log listener that timestamps device logs and decodes DATA_TAG binary frames.",
    long_about = None,
    after_help = EXAMPLES
)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    serve: ServeArgs,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Listen for device connections (default when no command is given).
    Serve(ServeArgs),
    /// Decode DATA_TAG frames from LINE, or from each stdin line.
    Decode {
        /// A log line containing a DATA_TAG frame
        line: Option<String>,
    },
    /// Pack values into a DATA_TAG line.
    Encode {
        /// Struct name written to NAME:
        #[arg(long)]
        name: String,

        /// Format descriptor (defaults to the registered format of --name)
        #[arg(long)]
        format: Option<String>,

        /// Field values: integers, or text for `s` fields
        #[arg(required = true, allow_negative_numbers = true)]
        values: Vec<String>,
    },
    /// List the registered struct layouts.
    Layouts,
}

#[derive(Args, Debug)]
struct ServeArgs {
    /// Address to listen on
    #[arg(long, default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    host: IpAddr,

    /// TCP port to listen on
    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Bytes requested per socket read
    #[arg(long, default_value_t = DEFAULT_READ_BUFFER)]
    read_buffer: usize,
}

impl ServeArgs {
    fn into_config(self) -> ServerConfig {
        ServerConfig {
            host: self.host,
            port: self.port,
            read_buffer: self.read_buffer,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let result = match cli.command {
        None => cmd_serve(cli.serve),
        Some(Commands::Serve(args)) => cmd_serve(args),
        Some(Commands::Decode { line }) => cmd_decode(line),
        Some(Commands::Encode {
            name,
            format,
            values,
        }) => cmd_encode(&name, format, &values),
        Some(Commands::Layouts) => cmd_layouts(),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {}", hint);
            }
            ExitCode::from(2)
        }
    }
}

#[derive(Debug)]
struct CliError {
    message: String,
    hint: Option<String>,
}

impl CliError {
    fn new(message: impl Into<String>, hint: Option<String>) -> Self {
        Self {
            message: message.into(),
            hint,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::new(format!("{err:#}"), None)
    }
}

fn builtin_registry() -> Result<LayoutRegistry> {
    LayoutRegistry::builtin().context("built-in layout table is invalid")
}

fn cmd_serve(args: ServeArgs) -> Result<(), CliError> {
    let registry = builtin_registry()?;
    // Read the local offset before any other thread exists.
    let clock = Clock::local();
    let context = SessionContext::new(Arc::new(registry), Arc::new(ConsoleSink), clock);

    let config = args.into_config();
    let port = config.port;
    let server = Server::bind(config, context).map_err(|err| match err {
        ServerError::Bind { .. } => CliError::new(
            err.to_string(),
            Some(format!(
                "check that port {port} is free, or choose another with --port"
            )),
        ),
        ServerError::Config(_) => CliError::new(
            err.to_string(),
            Some("use --read-buffer 1 or more".to_string()),
        ),
        ServerError::Io(_) => CliError::new(err.to_string(), None),
    })?;

    ctrlc::set_handler(|| {
        info!("interrupted, shutting down");
        std::process::exit(0);
    })
    .context("failed to install Ctrl-C handler")?;

    server.run().context("server stopped")?;
    Ok(())
}

fn cmd_decode(line: Option<String>) -> Result<(), CliError> {
    let registry = builtin_registry()?;
    let lines: Vec<String> = match line {
        Some(line) => vec![line],
        None => io::stdin()
            .lock()
            .lines()
            .collect::<io::Result<Vec<String>>>()
            .context("failed to read stdin")?,
    };

    let mut decoded = 0usize;
    let mut failed = 0usize;
    let mut out = io::stdout().lock();
    for line in &lines {
        let outcome = inspect_line(&registry, line.trim_end());
        if outcome.is_error() {
            failed += 1;
        } else if matches!(outcome, LineOutcome::Decoded { .. }) {
            decoded += 1;
        }
        for message in outcome.report() {
            writeln!(out, "{message}").context("failed to write output")?;
        }
    }

    if decoded == 0 && failed > 0 {
        return Err(CliError::new(
            "no DATA_TAG frame could be decoded",
            Some("check the FORMAT and BASE64 fields of the line".to_string()),
        ));
    }
    Ok(())
}

fn cmd_encode(name: &str, format: Option<String>, values: &[String]) -> Result<(), CliError> {
    if name.is_empty() || !name.chars().all(is_word_char) {
        return Err(CliError::new(
            format!("invalid struct name '{name}'"),
            Some("use letters, digits and underscores only".to_string()),
        ));
    }

    let registry = builtin_registry()?;
    let descriptor = match format {
        Some(format) => format,
        None => registry
            .lookup(name)
            .map(|layout| layout.format.to_string())
            .ok_or_else(|| {
                CliError::new(
                    format!("struct {name} is not registered"),
                    Some("pass --format for unregistered structs".to_string()),
                )
            })?,
    };
    let spec = FormatSpec::compile(&descriptor).map_err(|err| {
        CliError::new(
            format!("invalid format '{descriptor}': {err}"),
            Some("formats start with '<' followed by B, b, H, h, I, i, x or s codes".to_string()),
        )
    })?;

    let values: Vec<Value> = values.iter().map(|raw| parse_value(raw)).collect();
    let frame = tag_values(name, &spec, &values).map_err(|err| {
        CliError::new(
            err.to_string(),
            Some(format!(
                "{} takes {} value(s)",
                spec.descriptor(),
                spec.value_count()
            )),
        )
    })?;
    println!("{frame}");
    Ok(())
}

fn cmd_layouts() -> Result<(), CliError> {
    let registry = builtin_registry()?;
    for layout in registry.iter() {
        println!(
            "{}  {}  ({} bytes, {} fields)",
            layout.name,
            layout.format,
            layout.spec().byte_len(),
            layout.field_names.len()
        );
        println!("  {}", layout.field_names.join(", "));
    }
    Ok(())
}

fn parse_value(raw: &str) -> Value {
    raw.parse::<i64>()
        .map(Value::Int)
        .unwrap_or_else(|_| Value::Bytes(raw.as_bytes().to_vec()))
}
