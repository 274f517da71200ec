//! Terminal client for line-based chat servers
//! Features: alias on connect (flag or prompt), local roster, JSON event output

mod input;
mod render;
mod roster;

use anyhow::{Context, Result};
use clap::Parser;
use input::Input;
use linechat_core::{
    ChatClient, ChatEvent, ClientConfig, Endpoint, EventBus, FramerConfig, DEFAULT_HOST,
    DEFAULT_MAX_LINE_LENGTH, DEFAULT_PORT,
};
use render::{OutputMode, Renderer};
use roster::Roster;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Time to keep printing server output after stdin closes
const STDIN_EOF_GRACE: Duration = Duration::from_secs(2);

/// Line-based chat client
#[derive(Parser, Debug)]
#[command(name = "chat_client")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Terminal client for line-based chat servers", long_about = None)]
struct Args {
    /// Server host name or address
    #[arg(long, default_value = DEFAULT_HOST)]
    host: String,

    /// Server port
    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Server as host:port, overrides --host and --port
    #[arg(short, long)]
    connect: Option<String>,

    /// Alias sent to the server once connected (prompted for if omitted)
    #[arg(short, long)]
    alias: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "warn")]
    log_level: String,

    /// Print events as JSON lines instead of text
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Max bytes buffered for one incoming line (0 = unbounded)
    #[arg(long, default_value_t = DEFAULT_MAX_LINE_LENGTH)]
    max_line_length: usize,
}

impl Args {
    /// Server to connect to
    fn endpoint(&self) -> Result<Endpoint> {
        match &self.connect {
            Some(addr) => addr
                .parse()
                .with_context(|| format!("Invalid server address: {}", addr)),
            None => Ok(Endpoint::new(self.host.clone(), self.port)),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    setup_logging(&args.log_level)?;

    let endpoint = args.endpoint()?;
    let framer = match args.max_line_length {
        0 => FramerConfig::unbounded(),
        max => FramerConfig::with_max_line_length(max),
    };
    let config = ClientConfig::new(endpoint.clone()).with_framer(framer);

    let renderer = Renderer::new(if args.json {
        OutputMode::Json
    } else {
        OutputMode::Text
    });

    let bus = Arc::new(EventBus::new());
    let mut events = bus.subscribe_channel();

    renderer.notice("Connecting...")?;
    let client = ChatClient::connect(config, bus)
        .await
        .with_context(|| format!("Could not connect to {}", endpoint))?;

    let mut stdin_rx = spawn_stdin_reader();
    let mut stdin_open = true;
    let mut roster = Roster::default();
    let mut awaiting_alias = false;

    let grace = tokio::time::sleep(Duration::from_secs(3600));
    tokio::pin!(grace);

    loop {
        tokio::select! {
            event = events.recv() => {
                let Some(event) = event else { break };
                roster.apply(&event);
                renderer.render(&event)?;

                match &event {
                    ChatEvent::ConnectionEstablished { .. } => {
                        if let Some(alias) = &args.alias {
                            client.send(alias).await.context("Failed to send alias")?;
                        } else {
                            renderer.notice("Enter your alias:")?;
                            awaiting_alias = true;
                        }
                    }
                    ChatEvent::ConnectionLost => break,
                    _ => {}
                }
            }
            line = stdin_rx.recv(), if stdin_open => {
                let Some(line) = line else {
                    tracing::debug!("stdin closed, waiting {:?} for server output", STDIN_EOF_GRACE);
                    stdin_open = false;
                    grace.as_mut().reset(tokio::time::Instant::now() + STDIN_EOF_GRACE);
                    continue;
                };

                let input = if awaiting_alias {
                    Input::parse_alias(&line)
                } else {
                    Input::parse(&line)
                };

                match input {
                    Input::Send(text) => {
                        client.send(text).await.context("Failed to send message")?;
                        awaiting_alias = false;
                    }
                    Input::Who => renderer.roster(&roster)?,
                    Input::Quit => break,
                    Input::Empty => {}
                }
            }
            _ = &mut grace, if !stdin_open => break,
        }
    }

    if client.is_connected() {
        client.close().await?;
    }

    Ok(())
}

/// Forward stdin lines over a channel so the main loop can select on them
fn spawn_stdin_reader() -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel::<String>(32);

    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    if tx.send(line).await.is_err() {
                        break;
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    tracing::warn!("Failed to read stdin: {}", e);
                    break;
                }
            }
        }
    });

    rx
}

fn setup_logging(level: &str) -> Result<()> {
    let log_level = level.parse::<Level>().unwrap_or(Level::WARN);

    let filter = EnvFilter::builder()
        .with_default_directive(log_level.into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .context("Failed to install log subscriber")
}
