use crate::output::{print_json, print_table};
use anyhow::Context;
use clap::Subcommand;
use taskdeck_core::board::{self, DropAction, DropTarget};
use taskdeck_core::types::Status;

#[derive(Subcommand)]
pub enum BoardSubcommand {
    /// Move a card to another column (updates the task's status)
    Move { id: String, status: String },
    /// Reorder a card above another card in the same column (display
    /// order only; lost on the next fetch)
    Shift { id: String, before: String },
}

pub fn run(
    api_url: Option<&str>,
    subcmd: Option<BoardSubcommand>,
    json: bool,
) -> anyhow::Result<()> {
    match subcmd {
        None => show(api_url, json),
        Some(BoardSubcommand::Move { id, status }) => move_card(api_url, &id, &status, json),
        Some(BoardSubcommand::Shift { id, before }) => shift_card(api_url, &id, &before, json),
    }
}

fn show(api_url: Option<&str>, json: bool) -> anyhow::Result<()> {
    let store = super::open_store(api_url)?;
    let columns = board::columns(store.items());

    if json {
        let value: serde_json::Map<String, serde_json::Value> = columns
            .iter()
            .map(|col| {
                (
                    col.status.to_string(),
                    serde_json::to_value(&col.tasks).unwrap_or_default(),
                )
            })
            .collect();
        return print_json(&value);
    }

    let headers: Vec<String> = columns
        .iter()
        .map(|c| format!("{} ({})", c.status, c.tasks.len()))
        .collect();
    let header_refs: Vec<&str> = headers.iter().map(String::as_str).collect();

    let depth = columns.iter().map(|c| c.tasks.len()).max().unwrap_or(0);
    let rows: Vec<Vec<String>> = (0..depth)
        .map(|i| {
            columns
                .iter()
                .map(|col| {
                    col.tasks
                        .get(i)
                        .map(|t| format!("[{}] {}", t.id, t.name))
                        .unwrap_or_default()
                })
                .collect()
        })
        .collect();
    print_table(&header_refs, rows);
    Ok(())
}

fn move_card(api_url: Option<&str>, id: &str, status: &str, json: bool) -> anyhow::Result<()> {
    let status: Status = status
        .parse()
        .map_err(|e: taskdeck_core::TaskdeckError| anyhow::anyhow!(e.to_string()))?;
    let mut store = super::open_store(api_url)?;

    match board::resolve_drop(store.items(), id, &DropTarget::Column(status)) {
        Some(DropAction::Move { id, draft, status }) => {
            store
                .update(&id, &draft)
                .with_context(|| format!("failed to move task '{id}'"))?;
            if json {
                print_json(&serde_json::json!({ "id": id, "status": status }))?;
            } else {
                println!("Task moved to {status}");
            }
            Ok(())
        }
        Some(DropAction::Reorder(_)) | None => {
            if json {
                print_json(&serde_json::json!({ "id": id, "moved": false }))?;
            } else {
                println!("Nothing to do.");
            }
            Ok(())
        }
    }
}

fn shift_card(api_url: Option<&str>, id: &str, before: &str, json: bool) -> anyhow::Result<()> {
    let mut store = super::open_store(api_url)?;

    match board::resolve_drop(store.items(), id, &DropTarget::Task(before.to_string())) {
        Some(DropAction::Reorder(order)) => {
            store.reorder(&order);
            if json {
                let ids: Vec<&str> = store.items().iter().map(|t| t.id.as_str()).collect();
                print_json(&ids)?;
            } else {
                println!("Reordered (display only; not persisted).");
            }
            Ok(())
        }
        Some(DropAction::Move { .. }) => {
            anyhow::bail!("'{id}' and '{before}' are in different columns; use 'board move'")
        }
        None => {
            if json {
                print_json(&serde_json::json!({ "id": id, "reordered": false }))?;
            } else {
                println!("Nothing to do.");
            }
            Ok(())
        }
    }
}
