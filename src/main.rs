// This is the entry point of the sheet assistant.
//
// **Architecture Overview:**
// - `core/` = Business logic (A1 ranges, serialization, prompts, services)
// - `infra/` = Implementations of core traits (Google OAuth, REST clients, key storage)
// - `popup/` = User-facing adapter (controller state machine, terminal view)
//
// This file's job is to:
// 1. Load configuration
// 2. Initialize services (dependency injection)
// 3. Run the single-threaded event loop that feeds the controller

// These attrs point each module declaration at a more descriptive root file
// so we don't end up with half a dozen mod.rs files that all look the same.
#[path = "core/core_layer.rs"]
mod core;
#[path = "infra/infra_layer.rs"]
mod infra;
#[path = "popup/popup_layer.rs"]
mod popup;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::core::assistant::{AiConfig, AssistantService};
use crate::core::assistant::prompt::system_prompt;
use crate::core::keys::KeyService;
use crate::core::sheets::SheetsService;
use crate::infra::ai::GroqClient;
use crate::infra::google::{DriveSheetsClient, ServiceAccountAuth};
use crate::infra::keys::JsonKeyStore;
use crate::popup::{PopupController, TerminalView};

const HELP: &str = "\
Commands:
  auth           sign in and list your spreadsheets
  open <number>  open a spreadsheet from the list
  back           return to the list
  run <request>  ask the assistant to plan changes to the open sheet
  key <value>    save your Groq API key (empty value removes it)
  help           show this help
  quit           exit";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging so we can see what's happening
    tracing_subscriber::fmt::init();

    // Load environment variables from .env file (if it exists)
    dotenv::dotenv().ok();

    // ========================================================================
    // DEPENDENCY INJECTION
    // ========================================================================
    // Create our services with their dependencies.
    // This is the "composition root" where we wire everything together.

    let auth = if let Ok(path) = std::env::var("GOOGLE_SERVICE_ACCOUNT_KEY") {
        ServiceAccountAuth::from_file(&path)
            .await
            .with_context(|| format!("loading service account key from {path}"))?
    } else if let Ok(json) = std::env::var("GOOGLE_SERVICE_ACCOUNT_JSON") {
        ServiceAccountAuth::from_json(&json).context("parsing GOOGLE_SERVICE_ACCOUNT_JSON")?
    } else {
        anyhow::bail!(
            "Set GOOGLE_SERVICE_ACCOUNT_KEY (path to a service account JSON key) \
             or GOOGLE_SERVICE_ACCOUNT_JSON (its content) to sign in to Google."
        );
    };
    let sheets_service = SheetsService::new(auth, DriveSheetsClient::new());

    let mut ai_config = AiConfig::default();
    if let Ok(model) = std::env::var("GROQ_MODEL") {
        ai_config.model = model;
    }
    let locale = sys_locale::get_locale().unwrap_or_else(|| "en-US".to_string());
    let assistant_service =
        AssistantService::new(GroqClient::new(), ai_config, system_prompt(&locale));

    // Keep runtime state in a dedicated folder so the repo root stays tidy.
    let data_dir = "data";
    std::fs::create_dir_all(data_dir).context("creating the data directory")?;
    let key_service = KeyService::new(JsonKeyStore::new(format!("{data_dir}/keys.json")));

    let mut controller = PopupController::new(
        sheets_service,
        assistant_service,
        key_service,
        TerminalView::new(),
    );

    // ========================================================================
    // EVENT LOOP
    // ========================================================================
    // Single-threaded and cooperative: one user event at a time, each handler
    // an awaited sequential chain. No timers, no background work.

    println!("Sheet assistant ready. Type `help` for commands.");
    controller.opened().await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("reading a command")? {
        let input = line.trim();
        let (command, rest) = match input.split_once(' ') {
            Some((command, rest)) => (command, rest.trim()),
            None => (input, ""),
        };

        match command {
            "" => {}
            "auth" | "list" => controller.auth_clicked().await,
            "open" => match rest.parse::<usize>() {
                // List entries are shown 1-based.
                Ok(number) if number > 0 => controller.sheet_clicked(number - 1),
                _ => println!("Usage: open <number>"),
            },
            "back" => controller.back_clicked(),
            "run" => controller.run_clicked(rest).await,
            "key" => controller.save_key_clicked(rest).await,
            "help" => println!("{HELP}"),
            "quit" | "exit" => break,
            other => println!("Unknown command `{other}`. Type `help` for commands."),
        }
    }

    Ok(())
}
