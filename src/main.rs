// Streaming assistant entry point.
//
// Startup sequence:
// 1. Initialize tracing
// 2. Load config
// 3. Load schedule/roster/free-agent data through the typed adapter boundary
// 4. Build drop and pickup candidates
// 5. Run the streaming optimizer and rank the results
// 6. Render the report, print it, and append it to the history database

use anyhow::Context;
use tracing::{info, warn};

use streaming_assistant::config;
use streaming_assistant::db::HistoryDb;
use streaming_assistant::model::player::players_from_json;
use streaming_assistant::model::roster::Roster;
use streaming_assistant::model::schedule::{fantasy_week_boundaries, Schedule};
use streaming_assistant::report;
use streaming_assistant::streaming::{candidates, optimizer, recommend};

fn main() -> anyhow::Result<()> {
    // 1. Initialize tracing
    init_tracing();
    info!("Streaming assistant starting up");

    // 2. Load config
    let config = config::load_config().context("failed to load configuration")?;
    info!(
        "Config loaded: league={}, provider={}, {} week window",
        config.league.name, config.league.provider, config.streaming.weeks
    );

    // 3. Load data through the adapter boundary (malformed input is fatal)
    let schedule_text = std::fs::read_to_string(&config.data_paths.schedule)
        .with_context(|| format!("failed to read {}", config.data_paths.schedule))?;
    let schedule = Schedule::from_json(&schedule_text).context("invalid schedule data")?;

    let roster_text = std::fs::read_to_string(&config.data_paths.roster)
        .with_context(|| format!("failed to read {}", config.data_paths.roster))?;
    let roster = Roster::from_json(&roster_text).context("invalid roster data")?;

    let available_text = std::fs::read_to_string(&config.data_paths.available)
        .with_context(|| format!("failed to read {}", config.data_paths.available))?;
    let available = players_from_json(&available_text).context("invalid free-agent data")?;

    info!(
        "Loaded schedule for {} teams ({} to {}), {} rostered players, {} free agents",
        schedule.teams.len(),
        schedule.start_date,
        schedule.end_date,
        roster.players.len(),
        available.len()
    );

    // The clock is read once, here at the edge; everything downstream is
    // deterministic in `today`.
    let today = chrono::Local::now().date_naive();
    let (expected_start, expected_end, _) = fantasy_week_boundaries(today, config.streaming.weeks);
    if schedule.start_date > expected_start || schedule.end_date < expected_end {
        warn!(
            "schedule window {}..{} does not cover the current {}-week fantasy window {}..{}",
            schedule.start_date,
            schedule.end_date,
            config.streaming.weeks,
            expected_start,
            expected_end
        );
    }

    // 4. Build candidates
    let settings = config.quality_settings();
    let drop_candidates = candidates::build_drop_candidates(&roster, &schedule, &settings, today);
    let pickup_candidates =
        candidates::build_pickup_candidates(&available, &schedule, &settings, today);
    info!(
        "Found {} droppable players and {} pickup candidates",
        drop_candidates.len(),
        pickup_candidates.len()
    );

    // 5. Optimize and rank
    let opportunities =
        optimizer::find_opportunities(&drop_candidates, &pickup_candidates, &schedule);
    let recommendation = recommend::rank_and_summarize(
        opportunities,
        drop_candidates.len(),
        pickup_candidates.len(),
        config.streaming.max_recommendations,
    );
    info!(
        "Ranked {} streaming opportunities",
        recommendation.total_opportunities
    );

    // 6. Render, print, persist
    let subject = report::subject_line(schedule.start_date);
    let body = report::render_body(&recommendation, schedule.start_date, schedule.end_date);
    println!("{subject}\n\n{body}");

    let history = HistoryDb::open(&config.db_path).context("failed to open history database")?;
    history
        .save(&subject, &body)
        .context("failed to save recommendation to history")?;
    info!("Recommendation saved to history at {}", config.db_path);

    Ok(())
}

/// Initialize tracing to stderr, honoring `RUST_LOG` when set.
fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("streaming_assistant=info,warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}
