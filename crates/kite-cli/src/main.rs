//! kite - terminal chat client for a Notion workspace agent

mod commands;
mod config;
mod output;
mod prompts;
mod ui;
mod utils;

use clap::Parser;
use std::sync::Arc;
use std::sync::Mutex;

use kite_agent::HttpAgentClient;
use kite_chat::{Chat, DemoOverlay};

use config::{CliOverrides, Config, Settings};

/// kite - chat with your Notion workspace agent
#[derive(Parser, Debug)]
#[command(name = "kite")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Agent endpoint URL (default: http://localhost:3000/api/agent)
    #[arg(long)]
    endpoint: Option<String>,

    /// Agent to talk to
    #[arg(long)]
    agent_id: Option<String>,

    /// Display name for the agent
    #[arg(long)]
    agent_name: Option<String>,

    /// Run in non-interactive mode with a single message
    #[arg(short = 'c', long)]
    command: Option<String>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Disable TUI mode (use simple stdin/stdout)
    #[arg(long)]
    no_tui: bool,

    /// Start with the sample conversation shown
    #[arg(long)]
    sample_data: bool,

    /// Initialize config file
    #[arg(long)]
    init_config: bool,
}

impl Args {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            endpoint: self.endpoint.clone(),
            agent_id: self.agent_id.clone(),
            agent_name: self.agent_name.clone(),
            no_tui: self.no_tui,
            sample_data: self.sample_data,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize config and exit
    if args.init_config {
        match Config::init() {
            Ok(path) => {
                println!("Config file created at: {}", path.display());
                println!("\nExample config:\n{}", config::example_config());
            }
            Err(e) => {
                eprintln!("Error creating config: {}", e);
                std::process::exit(1);
            }
        }
        return Ok(());
    }

    let cfg = Config::load();
    let settings = cfg.settings(&args.overrides());
    let use_tui = settings.use_tui && args.command.is_none();

    if args.verbose {
        init_tracing(use_tui)?;
    }

    let mut client = HttpAgentClient::with_timeout(&settings.endpoint, settings.timeout)?;
    if let Some(key) = &settings.api_key {
        client = client.with_api_key(key);
    }
    tracing::debug!("Using agent endpoint {}", client.endpoint());

    let mut chat = Chat::new(Arc::new(client), settings.agent_id.clone());

    // Non-interactive mode
    if let Some(command) = args.command {
        return run_command(&mut chat, &command, &settings).await;
    }

    if use_tui {
        return ui::run_tui(chat, &settings).await;
    }

    run_interactive(&mut chat, &settings).await
}

/// Log to stderr, or to a file while the TUI owns the terminal
fn init_tracing(to_file: bool) -> anyhow::Result<()> {
    const FILTER: &str = "kite_agent=debug,kite_chat=debug,kite_tui=debug,kite_cli=debug";

    if to_file {
        let dir = dirs::data_local_dir()
            .unwrap_or_else(|| std::path::PathBuf::from("."))
            .join("kite");
        std::fs::create_dir_all(&dir)?;
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(dir.join("kite.log"))?;
        tracing_subscriber::fmt()
            .with_env_filter(FILTER)
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(FILTER)
            .with_writer(std::io::stderr)
            .init();
    }
    Ok(())
}

async fn run_command(chat: &mut Chat, command: &str, settings: &Settings) -> anyhow::Result<()> {
    println!("kite> {}", utils::truncate_chars(command, 200));
    println!();

    match chat.send(command).await {
        Some(reply) => {
            let failed = reply.is_error;
            println!("{}", output::reply_text(reply));
            if failed {
                std::process::exit(1);
            }
        }
        None => {
            eprintln!("Nothing to send to {}.", settings.agent_name);
            std::process::exit(2);
        }
    }

    Ok(())
}

async fn run_interactive(chat: &mut Chat, settings: &Settings) -> anyhow::Result<()> {
    use commands::{CommandResult, execute_command};
    use std::io::{self, Write};

    // Show minimal startup info (only if TTY)
    if std::io::IsTerminal::is_terminal(&std::io::stderr()) {
        eprintln!(
            "kite ({}) session: {}",
            settings.agent_name,
            utils::truncate_chars(chat.identity().session_id(), 12)
        );
        eprintln!("Type /help for commands.");
        eprintln!();
    }

    // No live view to overlay in line mode; print the samples once up front
    let overlay = DemoOverlay::new(settings.sample_data);
    if overlay.is_showing_samples(chat.store().messages()) {
        println!(
            "{}\n",
            output::transcript_text(kite_chat::demo::sample_messages(), &settings.agent_name)
        );
    }

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            // EOF
            break;
        }

        let input = input.trim();
        if input.is_empty() {
            continue;
        }

        // Handle slash commands
        if let Some(result) = execute_command(input, chat, &settings.agent_name) {
            match result {
                CommandResult::Clear => {
                    chat.store_mut().clear();
                    println!("Cleared conversation.");
                }
                CommandResult::Exit => {
                    break;
                }
                CommandResult::Message(msg) => {
                    println!("{}", msg);
                }
                CommandResult::Unknown(cmd) => {
                    println!("Unknown command: /{}", cmd);
                    println!("Type /help for available commands.");
                }
            }
            println!();
            continue;
        }

        println!();
        eprintln!("{} is working...", settings.agent_name);

        if let Some(reply) = chat.send(input).await {
            println!("{}", output::reply_text(reply));
        }

        println!();
    }

    Ok(())
}
