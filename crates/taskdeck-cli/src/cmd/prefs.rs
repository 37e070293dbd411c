use crate::output::print_json;
use anyhow::Context;
use clap::Subcommand;
use taskdeck_core::prefs::Preferences;

#[derive(Subcommand)]
pub enum PrefsSubcommand {
    /// Show current preferences
    Show,
    /// Set preference values (only the flags given are changed)
    Set {
        /// Enable or disable dark mode (true/false)
        #[arg(long)]
        dark_mode: Option<bool>,
        /// Background image URL
        #[arg(long)]
        background_url: Option<String>,
        /// Background search keyword
        #[arg(long)]
        background_keyword: Option<String>,
        /// Register an uploaded background image and make it current
        #[arg(long)]
        add_background: Option<String>,
        /// Task API base URL
        #[arg(long)]
        api_url: Option<String>,
    },
}

pub fn run(subcmd: PrefsSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        PrefsSubcommand::Show => show(json),
        PrefsSubcommand::Set {
            dark_mode,
            background_url,
            background_keyword,
            add_background,
            api_url,
        } => set(
            dark_mode,
            background_url,
            background_keyword,
            add_background,
            api_url,
            json,
        ),
    }
}

fn show(json: bool) -> anyhow::Result<()> {
    let prefs = Preferences::load().context("failed to load preferences")?;
    if json {
        return print_json(&prefs);
    }
    println!("Dark mode:    {}", prefs.dark_mode);
    println!("API URL:      {}", prefs.api_url);
    println!(
        "Background:   {}",
        prefs.background_url.as_deref().unwrap_or("(default)")
    );
    println!(
        "Keyword:      {}",
        prefs.background_keyword.as_deref().unwrap_or("(none)")
    );
    if !prefs.custom_backgrounds.is_empty() {
        println!("Uploaded:");
        for bg in &prefs.custom_backgrounds {
            println!("  {bg}");
        }
    }
    Ok(())
}

fn set(
    dark_mode: Option<bool>,
    background_url: Option<String>,
    background_keyword: Option<String>,
    add_background: Option<String>,
    api_url: Option<String>,
    json: bool,
) -> anyhow::Result<()> {
    let mut prefs = Preferences::load().context("failed to load preferences")?;

    if let Some(dark) = dark_mode {
        prefs.dark_mode = dark;
    }
    if let Some(url) = background_url {
        prefs.background_url = Some(url);
    }
    if let Some(keyword) = background_keyword {
        prefs.background_keyword = Some(keyword);
    }
    if let Some(upload) = add_background {
        prefs.add_custom_background(upload);
    }
    if let Some(url) = api_url {
        prefs.api_url = url;
    }

    prefs.save().context("failed to save preferences")?;

    if json {
        print_json(&prefs)?;
    } else {
        println!("Preferences saved.");
    }
    Ok(())
}
