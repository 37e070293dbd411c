use crate::output::print_json;
use anyhow::Context;
use chrono::Utc;
use clap::Subcommand;
use std::io::Read;
use taskdeck_core::assistant::{self, Command};

#[derive(Subcommand)]
pub enum AssistantSubcommand {
    /// Apply a structured command (JSON argument, or '-' for stdin)
    Apply { command: String },
}

pub fn run(api_url: Option<&str>, subcmd: AssistantSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        AssistantSubcommand::Apply { command } => apply(api_url, &command, json),
    }
}

fn apply(api_url: Option<&str>, raw: &str, json: bool) -> anyhow::Result<()> {
    let payload = if raw == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read command from stdin")?;
        buf
    } else {
        raw.to_string()
    };

    let command: Command =
        serde_json::from_str(&payload).context("invalid assistant command JSON")?;

    let mut store = super::open_store(api_url)?;
    let reply = assistant::apply(&command, &mut store, Utc::now())
        .context("assistant command failed")?;

    if json {
        print_json(&serde_json::json!({ "reply": reply }))?;
    } else {
        println!("{reply}");
    }
    Ok(())
}
