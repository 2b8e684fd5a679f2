use anyhow::Result;
use clap::Parser;
use pro_directory::app::events::UserEvent;
use pro_directory::app::filtering::normalize_term;
use pro_directory::app::helpers::lock_state;
use pro_directory::app::session::DirectorySession;
use pro_directory::cli::Cli;
use pro_directory::config::AppConfig;
use pro_directory::core::HttpProfessionalSource;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let mut config = AppConfig::load().unwrap_or_else(|e| {
        tracing::warn!("Failed to load config, using defaults: {}", e);
        AppConfig::default()
    });
    cli.apply_to(&mut config);
    let timeout = Duration::from_secs(config.request_timeout_secs + 5);

    let source = Arc::new(HttpProfessionalSource::new(&config)?);
    let (proxy, mut event_rx) = mpsc::unbounded_channel();
    let session = DirectorySession::new(config, proxy, source);

    {
        let state = session.state();
        let mut state_guard = lock_state(&state);
        state_guard.search_term = normalize_term(cli.search.as_deref().unwrap_or_default());
        state_guard.location_term = normalize_term(cli.location.as_deref().unwrap_or_default());
    }
    session.initialize();

    loop {
        match tokio::time::timeout(timeout, event_rx.recv()).await {
            Ok(Some(UserEvent::StateUpdate(ui_state))) if !ui_state.loading => break,
            Ok(Some(UserEvent::ShowError(message))) => anyhow::bail!(message),
            Ok(Some(_)) => {}
            Ok(None) => anyhow::bail!("Session closed before the first load completed"),
            Err(_) => anyhow::bail!("Timed out waiting for the professional list"),
        }
    }

    match &cli.category {
        Some(slug) => session.select_category(slug),
        None => session.select_all(),
    }
    let ui_state = session.snapshot();

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&ui_state)?);
        return Ok(());
    }

    if let Some(error) = &ui_state.error {
        eprintln!("Erreur: {error}");
    }
    println!("{} - {}", ui_state.profession, ui_state.status_message);
    for tile in &ui_state.tiles {
        println!("  [{}] {} ({})", tile.slug, tile.name, tile.count);
    }
    println!();
    for p in &ui_state.visible_list {
        let badges = ui_state
            .badges
            .get(&p.id)
            .map(|slugs| slugs.join(", "))
            .unwrap_or_default();
        println!(
            "  {} - {} - {} [{}]",
            p.name,
            p.specialty.as_deref().unwrap_or("-"),
            p.city.as_deref().unwrap_or("-"),
            badges
        );
    }
    if ui_state.show_empty_state {
        println!("  Aucun professionnel trouvé.");
    }

    Ok(())
}
