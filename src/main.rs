use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use crossterm::style::Stylize;
use serde::Deserialize;
use serde_json::Value;

use autocomplete_prompt::shared::logging;
use autocomplete_prompt::{
    AutocompletePrompt, CancelReason, Choice, FuzzyMatcher, PromptConfig, PromptOutcome, Theme,
};

const FLAVORS: &[&str] = &[
    "almond",
    "apple",
    "banana",
    "cherry",
    "chocolate",
    "cinnamon",
    "coconut",
    "cotton candy",
    "grape",
    "nougat",
    "orange",
    "pear",
    "pineapple",
    "strawberry",
    "vanilla",
    "watermelon",
    "wintergreen",
];

/// Pick one entry from a list by typing to filter it.
#[derive(Parser, Debug)]
#[command(name = "autocomplete", version)]
struct Args {
    /// JSON prompt file: {name, message, choices, limit, initial}
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Prompt message (overrides the file)
    #[arg(short, long)]
    message: Option<String>,

    /// Number of choices visible at once (overrides the file)
    #[arg(short, long)]
    limit: Option<usize>,

    /// Rank choices by fuzzy subsequence score instead of substring order
    #[arg(long)]
    fuzzy: bool,

    /// Plain output without colors
    #[arg(long)]
    no_color: bool,

    /// Write tracing events to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
struct PromptFile {
    #[serde(default = "default_name")]
    name: String,
    #[serde(default = "default_message")]
    message: String,
    choices: Vec<ChoiceEntry>,
    limit: Option<usize>,
    initial: Option<usize>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ChoiceEntry {
    Name(String),
    Full {
        name: String,
        message: Option<String>,
        hint: Option<String>,
        value: Option<Value>,
    },
}

impl From<ChoiceEntry> for Choice<Value> {
    fn from(entry: ChoiceEntry) -> Self {
        match entry {
            ChoiceEntry::Name(name) => Choice::new(name.clone(), Value::String(name)),
            ChoiceEntry::Full {
                name,
                message,
                hint,
                value,
            } => {
                let value = value.unwrap_or_else(|| Value::String(name.clone()));
                let mut choice = Choice::new(name, value);
                if let Some(message) = message {
                    choice = choice.with_message(message);
                }
                if let Some(hint) = hint {
                    choice = choice.with_hint(hint);
                }
                choice
            }
        }
    }
}

fn default_name() -> String {
    "flavor".to_string()
}

fn default_message() -> String {
    "Pick your favorite flavor".to_string()
}

fn load_prompt_file(path: &Path) -> anyhow::Result<PromptFile> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("invalid prompt file {}", path.display()))
}

fn build_config(args: &Args, file: Option<PromptFile>) -> PromptConfig<Value> {
    let file = file.unwrap_or_else(|| PromptFile {
        name: default_name(),
        message: default_message(),
        choices: FLAVORS
            .iter()
            .map(|f| ChoiceEntry::Name(f.to_string()))
            .collect(),
        limit: None,
        initial: None,
    });

    let message = args.message.clone().unwrap_or(file.message);
    let mut builder = PromptConfig::<Value>::builder(file.name, message)
        .choices(file.choices)
        .initial(file.initial.unwrap_or(0));
    if let Some(limit) = args.limit.or(file.limit) {
        builder = builder.limit(limit);
    }
    if args.fuzzy {
        builder = builder.matcher(FuzzyMatcher);
    }
    if !args.no_color {
        builder = builder.highlight(|s: &str| s.green().to_string());
    }
    builder.build()
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if let Some(path) = &args.log_file {
        logging::init_file_logging(path, None)
            .with_context(|| format!("failed to open log file {}", path.display()))?;
    }

    let file = args.config.as_deref().map(load_prompt_file).transpose()?;
    let config = build_config(&args, file);
    let theme = if args.no_color {
        Theme::plain()
    } else {
        Theme::colored()
    };

    let prompt = AutocompletePrompt::new(config).with_theme(theme);
    match prompt.run_on_stdio().await? {
        PromptOutcome::Answer(Value::String(answer)) => println!("Answer: {answer}"),
        PromptOutcome::Answer(value) => println!("Answer: {value}"),
        PromptOutcome::Cancelled(CancelReason::Escape) => eprintln!("cancelled"),
        PromptOutcome::Cancelled(CancelReason::Interrupt) => {
            eprintln!("interrupted");
            std::process::exit(130);
        }
    }

    Ok(())
}
