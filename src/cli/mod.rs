//! Command-line interface parsing and handling
//!
//! This module handles parsing command-line arguments and executing the appropriate commands.

pub mod character_list;
pub mod duet;
pub mod talk;

use std::error::Error;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::debug;

use crate::api::{ConversationService, HttpConversationService};
use crate::cli::character_list::list_characters;
use crate::cli::duet::run_duet;
use crate::cli::talk::run_talk;
use crate::core::app::App;
use crate::core::characters::CharacterRegistry;
use crate::core::config::Config;
use crate::core::constants::{BASE_URL_ENV_VAR, TURN_LIMIT};
use crate::ui::chat_loop::run_chat;
use crate::utils::logging::{init_logging, LogTarget};
use crate::utils::url::normalize_base_url;

#[derive(Parser)]
#[command(name = "parley")]
#[command(version)]
#[command(about = "Stage turn-based dialogues between characters from the terminal")]
#[command(
    long_about = "Parley is a full-screen terminal front end for a remote conversation service. \
Pick two characters and watch them talk for up to five turns, or pick one character and \
talk to it yourself.\n\n\
Environment Variables:\n\
  PARLEY_BASE_URL   Conversation service origin (defaults to http://localhost:8080)\n\
  RUST_LOG          Log filter (defaults to warn)\n\n\
Controls:\n\
  Up/Down           Move through the character list\n\
  Space             Select the focused character (Ctrl+Space while typing)\n\
  Tab               Switch between two characters and you-and-a-character\n\
  Ctrl+S            Start a conversation with the selection\n\
  Enter             Next turn, or send your message\n\
  Esc               Clear the selection\n\
  Ctrl+C            Quit the application"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Conversation service origin (overrides PARLEY_BASE_URL and the config file)
    #[arg(long, global = true, value_name = "URL")]
    pub base_url: Option<String>,

    /// Write diagnostic logs to the specified file
    #[arg(short = 'l', long, global = true, value_name = "FILE")]
    pub log: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the interactive interface (default)
    Chat,
    /// List the characters that can take part in a conversation
    Characters,
    /// Run a two-character conversation and print each turn
    Duet {
        /// Character who speaks first
        first: String,
        /// Character who speaks second
        second: String,
        /// Number of turns to run
        #[arg(short, long, default_value_t = TURN_LIMIT)]
        turns: u32,
    },
    /// Send one message to a character and print the reply
    Talk {
        /// Character to talk to
        character: String,
        /// Message to send (can be multiple words)
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        message: Vec<String>,
    },
    /// Set configuration values
    Set {
        /// Configuration key to set
        key: String,
        /// Value to set for the key
        value: Option<String>,
    },
    /// Unset configuration values
    Unset {
        /// Configuration key to unset
        key: String,
    },
}

pub fn main() -> Result<(), Box<dyn Error>> {
    tokio::runtime::Runtime::new()?.block_on(async_main())
}

async fn async_main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let command = args.command.unwrap_or(Commands::Chat);

    let interactive = matches!(command, Commands::Chat);
    init_logging(&LogTarget::for_command(args.log.as_deref(), interactive))?;

    let config = Config::load()?;
    let base_url = config.resolve_base_url_from_env(args.base_url.as_deref());
    let registry = CharacterRegistry::from_config(&config);
    debug!(%base_url, env_var = BASE_URL_ENV_VAR, "resolved service origin");

    match command {
        Commands::Chat => {
            let service: Arc<dyn ConversationService> =
                Arc::new(HttpConversationService::new(base_url.clone()));
            run_chat(App::new(registry, base_url), service).await
        }
        Commands::Characters => list_characters(&registry, &mut io::stdout()),
        Commands::Duet {
            first,
            second,
            turns,
        } => {
            let service = HttpConversationService::new(base_url);
            let result =
                run_duet(&service, &registry, &first, &second, turns, &mut io::stdout()).await;
            if let Err(e) = result {
                exit_with(e);
            }
            Ok(())
        }
        Commands::Talk { character, message } => {
            let service = HttpConversationService::new(base_url);
            let message = message.join(" ");
            let result =
                run_talk(&service, &registry, &character, &message, &mut io::stdout()).await;
            if let Err(e) = result {
                exit_with(e);
            }
            Ok(())
        }
        Commands::Set { key, value } => {
            let mut config = config;
            match apply_set(&mut config, &key, value.as_deref()) {
                Ok(true) => {
                    config.save()?;
                    println!(
                        "✅ Set {key} to: {}",
                        config.base_url.as_deref().unwrap_or_default()
                    );
                }
                Ok(false) => config.print_all(),
                Err(e) => exit_with(e),
            }
            Ok(())
        }
        Commands::Unset { key } => {
            let mut config = config;
            if let Err(e) = apply_unset(&mut config, &key) {
                exit_with(e);
            }
            config.save()?;
            println!("✅ Unset {key}");
            Ok(())
        }
    }
}

fn exit_with(err: Box<dyn Error>) -> ! {
    eprintln!("❌ {err}");
    std::process::exit(1);
}

/// Apply `parley set <key> [value]` to `config`. Returns `false` when no
/// value was given, meaning the caller should print the configuration.
fn apply_set(config: &mut Config, key: &str, value: Option<&str>) -> Result<bool, Box<dyn Error>> {
    match key {
        "base-url" => match value.map(str::trim).filter(|v| !v.is_empty()) {
            Some(url) => {
                config.base_url = Some(normalize_base_url(url));
                Ok(true)
            }
            None => Ok(false),
        },
        _ => Err(format!("Unknown config key: {key}").into()),
    }
}

fn apply_unset(config: &mut Config, key: &str) -> Result<(), Box<dyn Error>> {
    match key {
        "base-url" => {
            config.base_url = None;
            Ok(())
        }
        _ => Err(format!("Unknown config key: {key}").into()),
    }
}
