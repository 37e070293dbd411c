pub mod assistant;
pub mod board;
pub mod calendar;
pub mod dashboard;
pub mod prefs;
pub mod task;
pub mod week;

use anyhow::Context;
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use taskdeck_core::gateway::HttpTaskGateway;
use taskdeck_core::prefs::Preferences;
use taskdeck_core::store::TaskStore;

/// Build a store against the configured API and populate it, the
/// equivalent of a view mount's initial fetch.
pub(crate) fn open_store(api_url: Option<&str>) -> anyhow::Result<TaskStore> {
    let url = match api_url {
        Some(url) => url.to_string(),
        None => {
            Preferences::load()
                .context("failed to load preferences")?
                .api_url
        }
    };
    let mut store = TaskStore::new(Box::new(HttpTaskGateway::new(url)));
    store.load().context("failed to fetch tasks")?;
    Ok(store)
}

/// `YYYY-MM-DD`, defaulting to today (UTC).
pub(crate) fn parse_date(arg: Option<&str>) -> anyhow::Result<NaiveDate> {
    match arg {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .with_context(|| format!("invalid date '{s}', expected YYYY-MM-DD")),
        None => Ok(Utc::now().date_naive()),
    }
}

/// Timestamps accepted on the command line: RFC 3339, a local-naive
/// `YYYY-MM-DDTHH:MM`, or a bare date (midnight). All read as UTC.
pub(crate) fn parse_datetime(s: &str) -> anyhow::Result<DateTime<Utc>> {
    if let Ok(t) = DateTime::parse_from_rfc3339(s) {
        return Ok(t.with_timezone(&Utc));
    }
    if let Ok(t) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M") {
        return Ok(Utc.from_utc_datetime(&t));
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        let midnight = d.and_hms_opt(0, 0, 0).expect("midnight is valid");
        return Ok(Utc.from_utc_datetime(&midnight));
    }
    anyhow::bail!("invalid time '{s}', expected RFC 3339, YYYY-MM-DDTHH:MM, or YYYY-MM-DD")
}
