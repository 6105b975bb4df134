// Player quality classifier: points-per-game, tier assignment, droppability.
// This is the single implementation shared by every call site.

use chrono::NaiveDate;
use serde::Deserialize;

use crate::model::player::{Player, PlayerQuality, Tier};
use crate::model::schedule::Schedule;

/// PPG cutpoints for one position class. A tier is assigned by the highest
/// threshold the value meets or exceeds; below `streamable` is Deep League.
/// Tables must be strictly decreasing top to bottom (validated at config
/// load).
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct TierThresholds {
    pub elite: f64,
    pub high_end: f64,
    pub mid_tier: f64,
    pub streamable: f64,
}

impl TierThresholds {
    /// Default skater cutpoints.
    pub fn skater_default() -> Self {
        TierThresholds {
            elite: 4.5,
            high_end: 3.5,
            mid_tier: 2.5,
            streamable: 1.0,
        }
    }

    /// Default goalie cutpoints. Goalie scoring runs on a different scale.
    pub fn goalie_default() -> Self {
        TierThresholds {
            elite: 6.0,
            high_end: 4.5,
            mid_tier: 3.0,
            streamable: 1.5,
        }
    }
}

/// Skater and goalie threshold tables together.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct TierTables {
    pub skater: TierThresholds,
    pub goalie: TierThresholds,
}

impl Default for TierTables {
    fn default() -> Self {
        TierTables {
            skater: TierThresholds::skater_default(),
            goalie: TierThresholds::goalie_default(),
        }
    }
}

/// Classifier settings passed explicitly through the call chain (no hidden
/// process-wide state).
#[derive(Debug, Clone, Copy)]
pub struct QualitySettings {
    pub tables: TierTables,
    /// Games-played substitute when the count cannot be determined from the
    /// schedule; guards against early-season division instability.
    pub fallback_games: u32,
}

impl Default for QualitySettings {
    fn default() -> Self {
        QualitySettings {
            tables: TierTables::default(),
            fallback_games: 5,
        }
    }
}

/// Count a player's team games played through `as_of` (inclusive). Falls back
/// to the configured default when the team is unknown or has no games yet.
pub fn games_played_through(
    player: &Player,
    schedule: &Schedule,
    as_of: NaiveDate,
    fallback: u32,
) -> u32 {
    let played = match player.nhl_team.as_deref() {
        Some(team) => schedule
            .games_for_team(team)
            .iter()
            .filter(|g| g.date <= as_of)
            .count() as u32,
        None => 0,
    };
    if played == 0 {
        fallback
    } else {
        played
    }
}

fn classify(ppg: f64, thresholds: &TierThresholds) -> Tier {
    if ppg >= thresholds.elite {
        Tier::Elite
    } else if ppg >= thresholds.high_end {
        Tier::HighEnd
    } else if ppg >= thresholds.mid_tier {
        Tier::MidTier
    } else if ppg >= thresholds.streamable {
        Tier::Streamable
    } else {
        Tier::DeepLeague
    }
}

/// Assess a player's quality from accumulated fantasy points and schedule
/// data as of a given date.
pub fn assess(
    player: &Player,
    schedule: &Schedule,
    settings: &QualitySettings,
    as_of: NaiveDate,
) -> PlayerQuality {
    let games_played = games_played_through(player, schedule, as_of, settings.fallback_games);
    let ppg = player.fantasy_points / games_played.max(1) as f64;

    let thresholds = if player.is_goalie() {
        &settings.tables.goalie
    } else {
        &settings.tables.skater
    };
    let tier = classify(ppg, thresholds);

    PlayerQuality {
        ppg: (ppg * 100.0).round() / 100.0,
        games_played,
        tier,
        droppable: tier.droppable(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::player::{PlayerStatus, Position};
    use crate::model::schedule::{Game, TeamSchedule};

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn schedule_with_edm(dates: &[&str]) -> Schedule {
        Schedule {
            weeks: 1,
            start_date: d("2024-10-14"),
            end_date: d("2024-10-20"),
            week_info: None,
            teams: vec![TeamSchedule {
                abbr: "EDM".into(),
                total: dates.len() as u32,
                by_week: vec![dates.len() as u32],
                games: dates
                    .iter()
                    .map(|s| Game {
                        date: d(s),
                        opponent: "TOR".into(),
                        is_home: true,
                    })
                    .collect(),
            }],
        }
    }

    fn player(points: f64, position: Position, team: Option<&str>) -> Player {
        Player {
            player_id: None,
            name: "Test Player".into(),
            position: Some(position),
            eligible_positions: vec![],
            selected_position: None,
            nhl_team: team.map(|s| s.to_string()),
            fantasy_points: points,
            status: PlayerStatus::Healthy,
            is_injured: false,
            quality: None,
        }
    }

    #[test]
    fn games_played_counts_through_as_of_inclusive() {
        let schedule = schedule_with_edm(&["2024-10-14", "2024-10-16", "2024-10-18"]);
        let p = player(10.0, Position::Center, Some("EDM"));
        assert_eq!(games_played_through(&p, &schedule, d("2024-10-16"), 5), 2);
        assert_eq!(games_played_through(&p, &schedule, d("2024-10-20"), 5), 3);
    }

    #[test]
    fn games_played_falls_back_when_undeterminable() {
        let schedule = schedule_with_edm(&["2024-10-14"]);
        // No team at all.
        let p = player(10.0, Position::Center, None);
        assert_eq!(games_played_through(&p, &schedule, d("2024-10-16"), 5), 5);
        // Unknown team.
        let p = player(10.0, Position::Center, Some("XYZ"));
        assert_eq!(games_played_through(&p, &schedule, d("2024-10-16"), 5), 5);
        // Team known but no games played yet.
        let p = player(10.0, Position::Center, Some("EDM"));
        assert_eq!(games_played_through(&p, &schedule, d("2024-10-13"), 5), 5);
    }

    #[test]
    fn skater_tier_assignment_walks_thresholds() {
        let t = TierThresholds::skater_default();
        assert_eq!(classify(5.0, &t), Tier::Elite);
        assert_eq!(classify(4.5, &t), Tier::Elite);
        assert_eq!(classify(3.5, &t), Tier::HighEnd);
        assert_eq!(classify(2.5, &t), Tier::MidTier);
        assert_eq!(classify(1.0, &t), Tier::Streamable);
        assert_eq!(classify(0.5, &t), Tier::DeepLeague);
    }

    #[test]
    fn goalie_uses_its_own_table() {
        let schedule = schedule_with_edm(&["2024-10-14", "2024-10-16"]);
        let settings = QualitySettings::default();
        // 5.0 ppg: Elite for a skater, only High-End for a goalie.
        let skater = player(10.0, Position::Center, Some("EDM"));
        let goalie = player(10.0, Position::Goalie, Some("EDM"));
        let as_of = d("2024-10-16");
        assert_eq!(assess(&skater, &schedule, &settings, as_of).tier, Tier::Elite);
        assert_eq!(assess(&goalie, &schedule, &settings, as_of).tier, Tier::HighEnd);
    }

    #[test]
    fn assessment_rounds_ppg_to_two_decimals() {
        let schedule = schedule_with_edm(&["2024-10-14", "2024-10-16", "2024-10-18"]);
        let p = player(10.0, Position::Center, Some("EDM"));
        let quality = assess(&p, &schedule, &QualitySettings::default(), d("2024-10-20"));
        // 10.0 / 3 = 3.333... -> 3.33
        assert_eq!(quality.ppg, 3.33);
        assert_eq!(quality.games_played, 3);
    }

    #[test]
    fn droppable_follows_tier_policy() {
        let schedule = schedule_with_edm(&["2024-10-14", "2024-10-16"]);
        let settings = QualitySettings::default();
        let as_of = d("2024-10-16");

        let elite = player(10.0, Position::Center, Some("EDM")); // 5.0 ppg
        assert!(!assess(&elite, &schedule, &settings, as_of).droppable);

        let mid = player(6.0, Position::Center, Some("EDM")); // 3.0 ppg
        assert!(assess(&mid, &schedule, &settings, as_of).droppable);

        let deep = player(1.0, Position::Center, Some("EDM")); // 0.5 ppg
        assert!(!assess(&deep, &schedule, &settings, as_of).droppable);
    }

    #[test]
    fn negative_goalie_points_land_in_deep_league() {
        let schedule = schedule_with_edm(&["2024-10-14", "2024-10-16"]);
        let p = player(-4.0, Position::Goalie, Some("EDM"));
        let quality = assess(&p, &schedule, &QualitySettings::default(), d("2024-10-16"));
        assert_eq!(quality.tier, Tier::DeepLeague);
        assert!(!quality.droppable);
    }
}
