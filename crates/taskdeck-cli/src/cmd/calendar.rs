use crate::output::{print_json, print_table, time_cell};
use chrono::{Datelike, Utc};
use clap::Subcommand;
use taskdeck_core::calendar;

#[derive(Subcommand)]
pub enum CalendarSubcommand {
    /// Month grid with per-day task counts
    Month {
        #[arg(long)]
        year: Option<i32>,
        /// 1-12
        #[arg(long)]
        month: Option<u32>,
    },
}

pub fn run(
    api_url: Option<&str>,
    subcmd: Option<CalendarSubcommand>,
    date: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    match subcmd {
        None => day(api_url, date, json),
        Some(CalendarSubcommand::Month { year, month }) => {
            let today = Utc::now().date_naive();
            month_view(
                api_url,
                year.unwrap_or_else(|| today.year()),
                month.unwrap_or_else(|| today.month()),
                json,
            )
        }
    }
}

fn day(api_url: Option<&str>, date: Option<&str>, json: bool) -> anyhow::Result<()> {
    let day = super::parse_date(date)?;
    let store = super::open_store(api_url)?;
    let tasks = calendar::tasks_on(store.items(), day);

    if json {
        return print_json(&tasks);
    }
    if tasks.is_empty() {
        println!("No tasks on {day}.");
        return Ok(());
    }
    println!("Tasks on {day}:");
    let rows: Vec<Vec<String>> = tasks
        .iter()
        .map(|t| {
            vec![
                t.id.clone(),
                t.name.clone(),
                t.status.to_string(),
                time_cell(t.start_time),
                time_cell(t.end_time),
            ]
        })
        .collect();
    print_table(&["ID", "NAME", "STATUS", "START", "END"], rows);
    Ok(())
}

fn month_view(api_url: Option<&str>, year: i32, month: u32, json: bool) -> anyhow::Result<()> {
    let grid = calendar::month_grid(year, month)
        .ok_or_else(|| anyhow::anyhow!("invalid month {year}-{month}"))?;
    let store = super::open_store(api_url)?;

    let counts: Vec<usize> = grid
        .iter()
        .map(|&d| calendar::tasks_on(store.items(), d).len())
        .collect();

    if json {
        let cells: Vec<serde_json::Value> = grid
            .iter()
            .zip(&counts)
            .map(|(d, c)| serde_json::json!({ "date": d.to_string(), "tasks": c }))
            .collect();
        return print_json(&cells);
    }

    println!("{year}-{month:02}");
    let cells: Vec<String> = grid
        .iter()
        .zip(&counts)
        .map(|(d, &count)| {
            let cell = if count > 0 {
                format!("{:2} ({count})", d.day())
            } else {
                format!("{:2}", d.day())
            };
            // Pad days from the surrounding months so they read dimmer.
            if d.month() == month {
                cell
            } else {
                format!(" {cell}")
            }
        })
        .collect();
    let rows: Vec<Vec<String>> = cells.chunks(7).map(|week| week.to_vec()).collect();
    print_table(&["MON", "TUE", "WED", "THU", "FRI", "SAT", "SUN"], rows);
    Ok(())
}
