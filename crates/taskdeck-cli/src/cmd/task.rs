use crate::output::{print_json, print_table, time_cell};
use anyhow::Context;
use clap::Subcommand;
use taskdeck_core::list::{self, ListFilter, SortKey};
use taskdeck_core::task::TaskDraft;
use taskdeck_core::types::{Priority, Status};

#[derive(Subcommand)]
pub enum TaskSubcommand {
    /// List tasks with filters and sorting
    List {
        /// Filter by status (Todo, InProgress, Review, Done)
        #[arg(long)]
        status: Option<String>,
        /// Filter by priority (Low, Medium, High)
        #[arg(long)]
        priority: Option<String>,
        /// Case-insensitive search over name and description
        #[arg(long)]
        search: Option<String>,
        /// Sort key: date, date-asc, priority, name, status
        #[arg(long, default_value = "date")]
        sort: String,
    },
    /// Show full details for a single task
    Get { id: String },
    /// Create a task
    Add {
        #[arg(required = true)]
        name: Vec<String>,
        #[arg(long)]
        description: Option<String>,
        /// Todo, InProgress, Review, Done (default Todo)
        #[arg(long)]
        status: Option<String>,
        /// Low, Medium, High (default Medium)
        #[arg(long)]
        priority: Option<String>,
        /// Start time (RFC 3339 or YYYY-MM-DDTHH:MM)
        #[arg(long)]
        start: Option<String>,
        /// End time (must be after start)
        #[arg(long)]
        end: Option<String>,
        #[arg(long)]
        note: Option<String>,
    },
    /// Update task fields (omitted fields are left untouched)
    Edit {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        priority: Option<String>,
        #[arg(long)]
        start: Option<String>,
        #[arg(long)]
        end: Option<String>,
        #[arg(long)]
        note: Option<String>,
    },
    /// Delete a task
    Delete { id: String },
}

pub fn run(api_url: Option<&str>, subcmd: TaskSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        TaskSubcommand::List {
            status,
            priority,
            search,
            sort,
        } => list_tasks(
            api_url,
            status.as_deref(),
            priority.as_deref(),
            search.as_deref(),
            &sort,
            json,
        ),
        TaskSubcommand::Get { id } => get(api_url, &id, json),
        TaskSubcommand::Add {
            name,
            description,
            status,
            priority,
            start,
            end,
            note,
        } => {
            let draft = build_draft(
                Some(name.join(" ")),
                description,
                status.as_deref(),
                priority.as_deref(),
                start.as_deref(),
                end.as_deref(),
                note,
            )?;
            add(api_url, draft, json)
        }
        TaskSubcommand::Edit {
            id,
            name,
            description,
            status,
            priority,
            start,
            end,
            note,
        } => {
            let draft = build_draft(
                name,
                description,
                status.as_deref(),
                priority.as_deref(),
                start.as_deref(),
                end.as_deref(),
                note,
            )?;
            edit(api_url, &id, draft, json)
        }
        TaskSubcommand::Delete { id } => delete(api_url, &id, json),
    }
}

fn parse_status(s: &str) -> anyhow::Result<Status> {
    s.parse::<Status>()
        .map_err(|e| anyhow::anyhow!(e.to_string()))
}

fn parse_priority(s: &str) -> anyhow::Result<Priority> {
    s.parse::<Priority>()
        .map_err(|e| anyhow::anyhow!(e.to_string()))
}

#[allow(clippy::too_many_arguments)]
fn build_draft(
    name: Option<String>,
    description: Option<String>,
    status: Option<&str>,
    priority: Option<&str>,
    start: Option<&str>,
    end: Option<&str>,
    note: Option<String>,
) -> anyhow::Result<TaskDraft> {
    Ok(TaskDraft {
        name,
        description,
        status: status.map(parse_status).transpose()?,
        priority: priority.map(parse_priority).transpose()?,
        start_time: start.map(super::parse_datetime).transpose()?,
        end_time: end.map(super::parse_datetime).transpose()?,
        note,
    })
}

fn list_tasks(
    api_url: Option<&str>,
    status: Option<&str>,
    priority: Option<&str>,
    search: Option<&str>,
    sort: &str,
    json: bool,
) -> anyhow::Result<()> {
    let store = super::open_store(api_url)?;
    let filter = ListFilter {
        status: status.map(parse_status).transpose()?,
        priority: priority.map(parse_priority).transpose()?,
        search: search.unwrap_or_default().to_string(),
    };
    let sort: SortKey = sort
        .parse()
        .map_err(|e: taskdeck_core::TaskdeckError| anyhow::anyhow!(e.to_string()))?;
    let rows = list::filter_and_sort(store.items(), &filter, sort);

    if json {
        return print_json(&rows);
    }
    if rows.is_empty() {
        println!("No tasks.");
        return Ok(());
    }
    let table: Vec<Vec<String>> = rows
        .iter()
        .map(|t| {
            vec![
                t.id.clone(),
                t.status.to_string(),
                t.priority.to_string(),
                t.name.clone(),
                time_cell(t.start_time),
            ]
        })
        .collect();
    print_table(&["ID", "STATUS", "PRIORITY", "NAME", "START"], table);
    Ok(())
}

fn get(api_url: Option<&str>, id: &str, json: bool) -> anyhow::Result<()> {
    let mut store = super::open_store(api_url)?;
    store
        .load_one(id)
        .with_context(|| format!("task '{id}' not found"))?;
    let task = store.selected().expect("selected set by load_one");

    if json {
        return print_json(task);
    }
    println!("Task: {}", task.id);
    println!("Name:        {}", task.name);
    println!("Status:      {}", task.status);
    println!("Priority:    {}", task.priority);
    if let Some(desc) = &task.description {
        println!("Description: {}", desc);
    }
    if let Some(start) = task.start_time {
        println!("Start:       {}", start.format("%Y-%m-%d %H:%M"));
    }
    if let Some(end) = task.end_time {
        println!("End:         {}", end.format("%Y-%m-%d %H:%M"));
    }
    if let Some(note) = &task.note {
        println!("Note:        {}", note);
    }
    Ok(())
}

fn add(api_url: Option<&str>, draft: TaskDraft, json: bool) -> anyhow::Result<()> {
    let mut store = super::open_store(api_url)?;
    let task = store.create(&draft).context("failed to create task")?;

    if json {
        print_json(&task)?;
    } else {
        println!("Added task [{}]: {}", task.id, task.name);
    }
    Ok(())
}

fn edit(api_url: Option<&str>, id: &str, draft: TaskDraft, json: bool) -> anyhow::Result<()> {
    let mut store = super::open_store(api_url)?;
    store
        .update(id, &draft)
        .with_context(|| format!("failed to update task '{id}'"))?;

    if json {
        let task = store.find(id).expect("updated task present");
        print_json(task)?;
    } else {
        println!("Updated task [{id}]");
    }
    Ok(())
}

fn delete(api_url: Option<&str>, id: &str, json: bool) -> anyhow::Result<()> {
    let mut store = super::open_store(api_url)?;
    store
        .delete(id)
        .with_context(|| format!("failed to delete task '{id}'"))?;

    if json {
        print_json(&serde_json::json!({ "id": id, "deleted": true }))?;
    } else {
        println!("Deleted task [{id}]");
    }
    Ok(())
}
