use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tokio::io::AsyncBufReadExt;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use parley_voice::backend::DEFAULT_BACKEND_URL;
use parley_voice::chat::{ChatOrchestrator, Notice};
use parley_voice::config::{self, BackendFileConfig, ConfigFile, VoiceFileConfig};
use parley_voice::conversation::Role;
use parley_voice::credential::{ApiKey, CredentialStore};
use parley_voice::voice::{
    CaptureController, CaptureEvent, DEFAULT_LOCALE, OutputController, SessionParams,
    UnsupportedCapture, UnsupportedSpeech,
};
use parley_voice::{AskClient, Config};

/// Parley - voice and text chat client for AI question answering
#[derive(Parser)]
#[command(name = "parley", version, about)]
struct Cli {
    /// Q&A backend base URL
    #[arg(long, env = "PARLEY_BACKEND_URL")]
    backend_url: Option<String>,

    /// Disable voice features (headless hosts without speech engines)
    #[arg(long, env = "PARLEY_DISABLE_VOICE")]
    no_voice: bool,

    /// API key (validated and held in memory only; unused by the /ask path)
    #[arg(long, env = "PARLEY_API_KEY")]
    api_key: Option<String>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Ask a single question and print the answer
    Ask {
        /// Question text
        text: String,
    },
    /// Interactive first-run setup
    Setup,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 => "warn,parley_voice=warn",
        1 => "info,parley_voice=debug",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    if let Some(Command::Setup) = cli.command {
        return run_setup();
    }

    let config = Config::load_with_options(cli.backend_url.as_deref(), cli.no_voice)?;
    tracing::debug!(?config, "loaded configuration");

    // Credential entry: rejected here, before any chat state exists
    let mut credentials = CredentialStore::new();
    if let Some(raw) = &cli.api_key {
        match ApiKey::parse(raw) {
            Ok(key) => credentials.set(key),
            Err(e) => anyhow::bail!("{e}"),
        }
    }

    if let Some(Command::Ask { text }) = cli.command {
        return ask_once(&config, &text).await;
    }

    run_chat(config, &credentials).await
}

/// One-shot question against the backend
async fn ask_once(config: &Config, text: &str) -> anyhow::Result<()> {
    let client = AskClient::new(config.backend_url.clone());
    let answer = client.ask(text).await?;
    println!("{answer}");
    Ok(())
}

/// Interactive chat loop
///
/// Stdin lines are the typed input path; capture events arrive on the same
/// loop so all conversation mutation stays on one task.
async fn run_chat(config: Config, credentials: &CredentialStore) -> anyhow::Result<()> {
    if credentials.is_set() {
        tracing::debug!("API key present (not used by the /ask path)");
    }

    let (notice_tx, mut notices) = mpsc::channel::<Notice>(16);
    let client = AskClient::new(config.backend_url.clone());
    let output = OutputController::new(Box::new(UnsupportedSpeech));
    let mut chat = ChatOrchestrator::new(client, output).with_notifications(notice_tx);

    let params = SessionParams::for_locale(config.voice.locale.clone());
    let mut capture = CaptureController::new(Box::new(UnsupportedCapture), params);

    let voice_ready = config.voice.enabled && capture.is_supported();
    println!("Parley ({})", if voice_ready { "voice & text enabled" } else { "text only" });
    println!("Backend: {}", config.backend_url);
    println!("Commands: /voice toggles the mic, /speech toggles spoken replies, /quit exits\n");

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match line.trim() {
                    "" => {}
                    "/quit" | "/exit" => break,
                    "/speech" => {
                        chat.toggle_speech_output().await;
                        println!(
                            "[speech output {}]",
                            if chat.speech_enabled() { "on" } else { "off" }
                        );
                    }
                    "/voice" => {
                        if let Err(e) = capture.toggle().await {
                            eprintln!("[voice error] {e}");
                        } else if capture.has_session() && capture.is_listening() {
                            println!("[listening]");
                        }
                    }
                    text => {
                        chat.set_draft(text);
                        chat.submit_draft().await;
                        print_reply(&chat);
                    }
                }
            }
            Some(event) = capture.next_event(), if capture.has_session() => {
                if let CaptureEvent::Interim(transcript) = &event {
                    println!("listening> {transcript}");
                }
                let was_final = matches!(event, CaptureEvent::Final(_));
                chat.handle_capture_event(event).await;
                if was_final {
                    print_reply(&chat);
                }
            }
            Some(notice) = notices.recv() => {
                match notice {
                    Notice::Capture(reason) => eprintln!("[voice error] {reason}"),
                    Notice::Backend(message) => eprintln!("[error] {message}"),
                }
            }
        }
    }

    Ok(())
}

/// Print the assistant's latest reply, if the last turn is one
fn print_reply(chat: &ChatOrchestrator) {
    if let Some(turn) = chat.conversation().last_turn() {
        if turn.role == Role::Assistant {
            println!("assistant> {}\n", turn.content);
        }
    }
}

/// Run the interactive setup wizard
fn run_setup() -> anyhow::Result<()> {
    use dialoguer::{Confirm, Input};

    println!("Parley Setup\n");

    let existing = config::load_config_file().unwrap_or_default();

    let default_url = existing
        .backend
        .url
        .clone()
        .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string());
    let url: String = Input::new()
        .with_prompt("Q&A backend URL")
        .default(default_url)
        .interact_text()?;

    let voice_enabled = Confirm::new()
        .with_prompt("Enable voice features?")
        .default(existing.voice.enabled.unwrap_or(true))
        .interact()?;

    let locale: String = Input::new()
        .with_prompt("Recognition locale")
        .default(
            existing
                .voice
                .locale
                .clone()
                .unwrap_or_else(|| DEFAULT_LOCALE.to_string()),
        )
        .interact_text()?;

    let file = ConfigFile {
        backend: BackendFileConfig { url: Some(url) },
        voice: VoiceFileConfig {
            enabled: Some(voice_enabled),
            locale: Some(locale),
        },
    };
    let path = config::save_config_file(&file)?;
    println!("\nConfig written to {}", path.display());

    // Keys are validated here but never written anywhere
    let key_input: String = Input::new()
        .with_prompt("API key (optional; held in memory only, never saved)")
        .allow_empty(true)
        .interact_text()?;
    if !key_input.is_empty() {
        match ApiKey::parse(&key_input) {
            Ok(_) => println!("API key accepted. Pass it with --api-key when starting a chat."),
            Err(e) => println!("{e}"),
        }
    }

    Ok(())
}
