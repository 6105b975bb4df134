// Candidate builder: filters a roster into drop candidates and a free-agent
// pool into pickup candidates, attaching quality assessments to each.

use chrono::NaiveDate;
use tracing::info;

use crate::model::player::Player;
use crate::model::roster::Roster;
use crate::model::schedule::Schedule;
use crate::streaming::quality::{self, QualitySettings};

/// Roster players safe to drop for streaming: healthy, not on IR, and in a
/// droppable tier. Each returned player carries its quality assessment.
/// Elite and High-End players never appear here.
pub fn build_drop_candidates(
    roster: &Roster,
    schedule: &Schedule,
    settings: &QualitySettings,
    as_of: NaiveDate,
) -> Vec<Player> {
    let mut candidates = Vec::new();

    for player in &roster.players {
        if player.is_injured || player.is_on_ir() {
            info!("skipping {} - injured or on IR", player.name);
            continue;
        }

        let assessment = quality::assess(player, schedule, settings, as_of);
        if assessment.droppable {
            let mut candidate = player.clone();
            candidate.quality = Some(assessment);
            candidates.push(candidate);
        } else {
            info!(
                "skipping {} - tier: {} (not droppable)",
                player.name, assessment.tier
            );
        }
    }

    candidates
}

/// All available players with quality attached. No droppability filter:
/// incoming quality is informational, not a gate.
pub fn build_pickup_candidates(
    available_players: &[Player],
    schedule: &Schedule,
    settings: &QualitySettings,
    as_of: NaiveDate,
) -> Vec<Player> {
    available_players
        .iter()
        .map(|player| {
            let mut candidate = player.clone();
            candidate.quality = Some(quality::assess(player, schedule, settings, as_of));
            candidate
        })
        .collect()
}
