use crate::output::{print_json, print_table};
use taskdeck_core::week;

pub fn run(api_url: Option<&str>, date: Option<&str>, json: bool) -> anyhow::Result<()> {
    let anchor = super::parse_date(date)?;
    let days = week::week_days(anchor);
    let store = super::open_store(api_url)?;

    if json {
        let mut slots = Vec::new();
        for &day in &days {
            for hour in 0..24u32 {
                let tasks = week::tasks_in_slot(store.items(), day, hour);
                if !tasks.is_empty() {
                    let ids: Vec<&str> = tasks.iter().map(|t| t.id.as_str()).collect();
                    slots.push(serde_json::json!({
                        "day": day.to_string(),
                        "hour": hour,
                        "tasks": ids,
                    }));
                }
            }
        }
        return print_json(&slots);
    }

    println!(
        "Week of {} to {}",
        days[0].format("%b %-d"),
        days[6].format("%b %-d %Y")
    );

    let day_names = ["MON", "TUE", "WED", "THU", "FRI", "SAT", "SUN"];
    let headers: Vec<String> = days
        .iter()
        .zip(day_names)
        .map(|(d, name)| format!("{name} {}", d.format("%d")))
        .collect();
    let mut header_refs: Vec<&str> = vec!["HOUR"];
    header_refs.extend(headers.iter().map(String::as_str));

    let rows: Vec<Vec<String>> = (0..24u32)
        .map(|hour| {
            let mut row = vec![format!("{hour:02}:00")];
            for &day in &days {
                let tasks = week::tasks_in_slot(store.items(), day, hour);
                let cell = tasks
                    .iter()
                    .map(|t| {
                        // The card label sits in the start hour; later
                        // hours show a continuation mark.
                        if week::is_first_hour(t, hour) {
                            t.name.clone()
                        } else {
                            "·".to_string()
                        }
                    })
                    .collect::<Vec<_>>()
                    .join(", ");
                row.push(cell);
            }
            row
        })
        .collect();

    print_table(&header_refs, rows);
    Ok(())
}
