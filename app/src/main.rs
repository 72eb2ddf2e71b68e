#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

//! Terminal front-end for the conversation engine.
//!
//! Pure presentation: reads user lines, hands them to the engine, and
//! renders whatever message list and typing flag the engine exposes.

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use banter_advice::AdviceSlipClient;
use banter_config::{ChatConfig, Config};
use banter_conversation::{ConversationEngine, EngineConfig, LatencyModel};
use banter_core::{Message, ReplyClassifier, Sender};
use banter_storage::FileStore;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "banter")]
#[command(about = "banter rule-based chat assistant", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Chat with the assistant
    Chat {
        /// Single message to send
        #[arg(short = 'm', long)]
        message: Option<String>,
    },
    /// Clear the stored conversation
    Reset,
    /// Initialize configuration
    Init,
    /// Show version
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Chat { message } => {
            let config = Config::load()?;
            let mut engine = build_engine(&config).await?;

            if let Some(msg) = message {
                run_single(&mut engine, &msg).await;
            } else {
                run_interactive(&mut engine).await?;
            }
        }
        Commands::Reset => {
            let config = Config::load()?;
            let mut engine = build_engine(&config).await?;
            engine.reset().await;
            println!("Conversation cleared.");
        }
        Commands::Init => {
            Config::create_config()?;
        }
        Commands::Version => {
            println!("banter {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}

async fn build_engine(config: &Config) -> anyhow::Result<ConversationEngine> {
    let advice =
        AdviceSlipClient::with_timeout(Duration::from_secs(config.advice.timeout_secs))
            .with_base_url(config.advice.base_url.clone());

    let path = match &config.storage.transcript_path {
        Some(path) => path.clone(),
        None => FileStore::default_path()?,
    };
    info!("Transcript path: {}", path.display());
    let store = FileStore::new(path);

    let engine_config = EngineConfig {
        latency: latency_from(&config.chat),
        advice_timeout: Duration::from_secs(config.advice.timeout_secs),
    };

    Ok(ConversationEngine::new(
        ReplyClassifier::new(),
        Arc::new(advice),
        Arc::new(store),
        engine_config,
    )
    .await)
}

const fn latency_from(chat: &ChatConfig) -> LatencyModel {
    LatencyModel::new(
        Duration::from_millis(chat.base_delay_ms),
        Duration::from_millis(chat.per_char_delay_ms),
        Duration::from_millis(chat.delay_cap_ms),
    )
}

async fn run_single(engine: &mut ConversationEngine, message: &str) {
    engine.submit(message).await;
    engine.wait_until_idle().await;

    if let Some(reply) = engine.messages().last() {
        println!("{}", reply.text);
    }
}

async fn run_interactive(engine: &mut ConversationEngine) -> anyhow::Result<()> {
    render_history(&engine.messages());
    println!("Type 'exit', 'quit', or Ctrl+C to end. '/reset' clears the conversation.\n");

    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let mut line = String::new();
        if std::io::stdin().read_line(&mut line)? == 0 {
            break; // EOF
        }
        let input = line.trim();

        if matches!(input, "exit" | "quit" | "q") {
            break;
        }

        if input == "/reset" {
            engine.reset().await;
            render_history(&engine.messages());
            continue;
        }

        if input.is_empty() {
            continue;
        }

        engine.submit(input).await;
        if !engine.is_awaiting_reply() {
            continue; // rejected submission
        }

        println!("bot is typing...");
        engine.wait_until_idle().await;

        if let Some(reply) = engine.messages().last() {
            print_message(reply);
        }
    }

    Ok(())
}

fn render_history(messages: &[Message]) {
    for message in messages {
        print_message(message);
    }
}

fn print_message(message: &Message) {
    let who = match message.sender {
        Sender::User => "you",
        Sender::Bot => "bot",
    };
    let time = message
        .created_at
        .with_timezone(&chrono::Local)
        .format("%H:%M");
    println!("[{time}] {who}: {}\n", message.text);
}
