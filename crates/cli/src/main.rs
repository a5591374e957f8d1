use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use krishi_agents::{load_rule_table, AssistantConfig, KrishiAssistant, DEFAULT_HISTORY_LIMIT};
use krishi_core::catalog::{EquipmentKind, EquipmentSort, SchemeStatus};
use krishi_core::Availability;
use krishi_observability::{init_tracing, AppMetrics};
use krishi_storage::MemoryStore;
use serde::Serialize;

#[derive(Debug, Parser)]
#[command(name = "krishi")]
#[command(about = "Krishi Mitra farming assistant")]
struct Cli {
    /// JSON rule table replacing the built-in chatbot rules.
    #[arg(long, env = "KRISHI_RULES")]
    rules: Option<PathBuf>,

    #[arg(long, env = "KRISHI_HISTORY_LIMIT", default_value_t = DEFAULT_HISTORY_LIMIT)]
    history_limit: usize,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    Chat,
    Ask {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    Rules,
    Crops {
        #[arg(long)]
        category: Option<String>,
    },
    Crop {
        id: String,
    },
    Equipment {
        #[arg(long)]
        kind: Option<String>,
        #[arg(long, default_value = "name")]
        sort: String,
    },
    Schemes {
        #[arg(long)]
        status: Option<String>,
    },
    Weather,
    Prices {
        #[arg(long)]
        crop: Option<String>,
    },
    Soil,
    Labour {
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long)]
        availability: Option<String>,
    },
}

fn main() -> Result<()> {
    init_tracing("krishi_cli");
    let cli = Cli::parse();

    let assistant = build_assistant(&cli)?;

    match cli.command {
        Command::Chat => run_chat(&assistant)?,
        Command::Ask { text } => {
            let reply = assistant
                .handle_chat(&text.join(" "))
                .context("message is empty")?;
            print_json(&reply)?;
        }
        Command::Rules => print_json(assistant.rules())?,
        Command::Crops { category } => print_json(&assistant.crops(category.as_deref()))?,
        Command::Crop { id } => {
            let Some(crop) = assistant.crop(&id) else {
                bail!("unknown crop id `{id}`");
            };
            print_json(crop)?;
        }
        Command::Equipment { kind, sort } => {
            let kind = kind
                .map(|kind| EquipmentKind::parse(&kind).context("invalid --kind value"))
                .transpose()?;
            let sort = EquipmentSort::parse(&sort).context("invalid --sort value")?;
            print_json(&assistant.equipment(kind, sort))?;
        }
        Command::Schemes { status } => {
            let status = status
                .map(|status| SchemeStatus::parse(&status).context("invalid --status value"))
                .transpose()?;
            print_json(&assistant.schemes(status))?;
        }
        Command::Weather => print_json(&assistant.weather())?,
        Command::Prices { crop } => {
            let prices = assistant.market_prices(crop.as_deref());
            if prices.is_empty() {
                bail!("no market prices for crop `{}`", crop.unwrap_or_default());
            }
            print_json(&prices)?;
        }
        Command::Soil => print_json(assistant.soil_analysis())?,
        Command::Labour {
            search,
            availability,
        } => {
            let availability = availability
                .map(|value| Availability::parse(&value).context("invalid --availability value"))
                .transpose()?;
            print_json(&assistant.search_labour(&search, availability))?;
        }
    }

    Ok(())
}

fn run_chat(assistant: &KrishiAssistant<MemoryStore>) -> Result<()> {
    if let Some(greeting) = assistant.state().transcript.first() {
        println!("{}\n", greeting.content);
    }
    println!("type 'exit' to quit.");

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if io::stdin().read_line(&mut line)? == 0 {
            break;
        }

        let message = line.trim();
        if message.eq_ignore_ascii_case("exit") || message.eq_ignore_ascii_case("quit") {
            break;
        }

        if let Some(reply) = assistant.handle_chat(message) {
            println!("\n{}\n", reply.reply_text);
        }
    }

    Ok(())
}

fn build_assistant(cli: &Cli) -> Result<KrishiAssistant<MemoryStore>> {
    let rules = load_rule_table(cli.rules.as_deref())?;

    Ok(KrishiAssistant::new(
        Arc::new(rules),
        Arc::new(MemoryStore::new()),
        AppMetrics::shared(),
        AssistantConfig {
            history_limit: cli.history_limit,
        },
    ))
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
