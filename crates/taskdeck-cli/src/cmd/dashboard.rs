use crate::output::{print_json, print_table};
use chrono::Utc;
use taskdeck_core::dashboard::{self, bar_series, pie_series};

pub fn run(api_url: Option<&str>, json: bool) -> anyhow::Result<()> {
    let store = super::open_store(api_url)?;
    let summary = dashboard::summarize(store.items(), Utc::now());

    if json {
        return print_json(&serde_json::json!({
            "summary": summary,
            "pie": pie_series(&summary),
            "bar": bar_series(&summary),
            "activities": store.activities(),
        }));
    }

    println!("Total tasks: {}", summary.total);
    println!("Completed:   {}", summary.completed);
    println!("Due soon:    {} (within 7 days)", summary.due_soon);
    println!();

    let status_rows: Vec<Vec<String>> = pie_series(&summary)
        .iter()
        .map(|slice| {
            vec![
                slice.name.to_string(),
                slice.value.to_string(),
                slice.fill.to_string(),
            ]
        })
        .collect();
    print_table(&["STATUS", "COUNT", "COLOR"], status_rows);
    println!();

    let priority_rows: Vec<Vec<String>> = bar_series(&summary)
        .iter()
        .map(|bar| vec![bar.name.to_string(), bar.count.to_string()])
        .collect();
    print_table(&["PRIORITY", "COUNT"], priority_rows);

    // The activity log lives only in this process, so a fresh CLI run
    // has nothing to show until mutations happen in-session.
    if !store.activities().is_empty() {
        println!();
        let activity_rows: Vec<Vec<String>> = store
            .activities()
            .iter()
            .map(|a| {
                vec![
                    a.kind.to_string(),
                    a.task_name.clone(),
                    a.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
                ]
            })
            .collect();
        print_table(&["ACTIVITY", "TASK", "WHEN"], activity_rows);
    }

    Ok(())
}
