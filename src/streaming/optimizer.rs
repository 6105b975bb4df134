// Streaming opportunity optimizer: for every compatible (drop, pickup) pair,
// find the drop date that maximizes total games played over the window.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::model::player::{Player, Position};
use crate::model::schedule::{Game, Schedule};

/// A single drop/pickup opportunity with its optimal timing. Immutable once
/// built; only strictly improving opportunities are ever materialized.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamingOpportunity {
    pub drop_player: Player,
    pub pickup_player: Player,
    /// The date to execute the drop (the drop player's last counted game
    /// date, or the window start for an immediate drop).
    pub drop_date: NaiveDate,
    /// Games the drop player will have banked before the switch.
    pub drop_after_games: u32,
    /// Games the pickup player plays strictly after the drop date.
    pub pickup_games_remaining: u32,
    pub total_games: u32,
    /// Extra games gained vs keeping the drop player all window. Always > 0.
    pub improvement: u32,
    /// Games if the drop player is kept for the entire window.
    pub baseline_games: u32,
    pub next_pickup_game: Option<NaiveDate>,
    pub reasoning: String,
}

/// Optimal timing for one pair, before it is dressed up into an opportunity.
struct Timing {
    drop_date: NaiveDate,
    drop_after_games: u32,
    pickup_games_remaining: u32,
    total_games: u32,
    improvement: u32,
    next_pickup_game: Option<Game>,
}

/// Coarse position gate: both goalies, or both non-goalies. Exact slot
/// legality (LW vs RW) is not enforced at this layer.
pub fn positions_compatible(drop: Option<Position>, pickup: Option<Position>) -> bool {
    match (drop, pickup) {
        (Some(d), Some(p)) => (d == Position::Goalie) == (p == Position::Goalie),
        _ => false,
    }
}

/// Full-window game list for a player, via their team's schedule. Missing
/// team data fails soft with an empty list.
fn games_for_player<'a>(player: &Player, schedule: &'a Schedule) -> &'a [Game] {
    match player.nhl_team.as_deref() {
        Some(team) => schedule.games_for_team(team),
        None => {
            warn!("could not determine team for player: {}", player.name);
            &[]
        }
    }
}

/// Search drop timings for one pair. Returns None when either player has no
/// games, when the pickup offers no more games than the drop baseline, or
/// when no timing strictly beats the baseline.
///
/// The objective only changes value at game boundaries, so it is enough to
/// enumerate "drop right after game i" for each of the drop player's games,
/// plus the degenerate immediate drop. Strict `>` comparisons keep the
/// earliest maximal drop point: drop as early as safely possible.
fn best_timing(
    drop_games: &[Game],
    pickup_games: &[Game],
    window_start: NaiveDate,
) -> Option<Timing> {
    if drop_games.is_empty() || pickup_games.is_empty() {
        return None;
    }

    let drop_total = drop_games.len() as u32;
    let pickup_total = pickup_games.len() as u32;

    // No incentive to swap if the pickup offers no more games than simply
    // keeping the incumbent.
    if pickup_total <= drop_total {
        return None;
    }

    let mut best_total = drop_total; // baseline: keep the drop player
    let mut best: Option<Timing> = None;

    for (i, game) in drop_games.iter().enumerate() {
        let drop_after_games = i as u32 + 1;
        let remaining: Vec<&Game> = pickup_games.iter().filter(|g| g.date > game.date).collect();
        let total = drop_after_games + remaining.len() as u32;

        if total > best_total {
            best_total = total;
            best = Some(Timing {
                drop_date: game.date,
                drop_after_games,
                pickup_games_remaining: remaining.len() as u32,
                total_games: total,
                improvement: total - drop_total,
                next_pickup_game: remaining.first().map(|g| (*g).clone()),
            });
        }
    }

    // Degenerate case: drop before the window even starts.
    if pickup_total > best_total {
        best = Some(Timing {
            drop_date: window_start,
            drop_after_games: 0,
            pickup_games_remaining: pickup_total,
            total_games: pickup_total,
            improvement: pickup_total - drop_total,
            next_pickup_game: pickup_games.first().cloned(),
        });
    }

    best
}

fn build_opportunity(
    drop_player: &Player,
    pickup_player: &Player,
    timing: Timing,
    baseline_games: u32,
) -> StreamingOpportunity {
    let drop_timing = if timing.drop_after_games == 0 {
        format!("Drop {} immediately", drop_player.name)
    } else {
        format!(
            "Drop {} on {} (after {} games played)",
            drop_player.name, timing.drop_date, timing.drop_after_games
        )
    };

    let next_game_info = match &timing.next_pickup_game {
        Some(game) => format!(" First game: {} vs {}.", game.date, game.opponent),
        None => String::new(),
    };

    let reasoning = format!(
        "{drop_timing}, pick up {} ({} games remaining).{next_game_info} \
         Total: {} games vs {} games if kept.",
        pickup_player.name,
        timing.pickup_games_remaining,
        timing.total_games,
        baseline_games
    );

    StreamingOpportunity {
        drop_player: drop_player.clone(),
        pickup_player: pickup_player.clone(),
        drop_date: timing.drop_date,
        drop_after_games: timing.drop_after_games,
        pickup_games_remaining: timing.pickup_games_remaining,
        total_games: timing.total_games,
        improvement: timing.improvement,
        baseline_games,
        next_pickup_game: timing.next_pickup_game.map(|g| g.date),
        reasoning,
    }
}

/// Evaluate every compatible (drop, pickup) pair and return all strictly
/// improving opportunities, unranked. Deterministic for identical inputs.
pub fn find_opportunities(
    drop_candidates: &[Player],
    pickup_candidates: &[Player],
    schedule: &Schedule,
) -> Vec<StreamingOpportunity> {
    let mut opportunities = Vec::new();

    for drop_player in drop_candidates {
        let drop_games = games_for_player(drop_player, schedule);
        let baseline_games = drop_games.len() as u32;

        for pickup_player in pickup_candidates {
            if !positions_compatible(drop_player.position, pickup_player.position) {
                continue;
            }

            let pickup_games = games_for_player(pickup_player, schedule);
            if let Some(timing) = best_timing(drop_games, pickup_games, schedule.start_date) {
                opportunities.push(build_opportunity(
                    drop_player,
                    pickup_player,
                    timing,
                    baseline_games,
                ));
            }
        }
    }

    opportunities
}
