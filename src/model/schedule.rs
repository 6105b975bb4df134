// Schedule index: per-team game lists with point and range queries, plus
// fantasy-week window math.

use std::fmt;

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::ModelError;

/// A single NHL game. Immutable once the schedule is fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub date: NaiveDate,
    /// Opponent team abbreviation (e.g. "TOR", "EDM").
    pub opponent: String,
    pub is_home: bool,
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let location = if self.is_home { "vs" } else { "@" };
        write!(f, "{} {} {}", self.date, location, self.opponent)
    }
}

/// One fantasy week (Monday-Sunday scoring period).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekInfo {
    /// 1-indexed week number.
    pub week_num: u32,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Schedule for a single NHL team over the evaluation window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamSchedule {
    /// Canonical team abbreviation.
    pub abbr: String,
    /// Total games in the window. Must equal `games.len()`.
    pub total: u32,
    /// Games per fantasy week. Must sum to `total`.
    pub by_week: Vec<u32>,
    #[serde(default)]
    pub games: Vec<Game>,
}

impl TeamSchedule {
    /// Games within `[start, end]`, both ends inclusive.
    pub fn games_in_period(&self, start: NaiveDate, end: NaiveDate) -> Vec<Game> {
        self.games
            .iter()
            .filter(|g| g.date >= start && g.date <= end)
            .cloned()
            .collect()
    }

    /// Games strictly after `date`.
    pub fn games_after(&self, date: NaiveDate) -> Vec<Game> {
        self.games.iter().filter(|g| g.date > date).cloned().collect()
    }

    fn validate(&self) -> Result<(), ModelError> {
        if self.total as usize != self.games.len() {
            return Err(ModelError::Invalid {
                what: "team schedule",
                message: format!(
                    "{}: total is {} but {} games listed",
                    self.abbr,
                    self.total,
                    self.games.len()
                ),
            });
        }
        let by_week_sum: u32 = self.by_week.iter().sum();
        if by_week_sum != self.total {
            return Err(ModelError::Invalid {
                what: "team schedule",
                message: format!(
                    "{}: by_week sums to {} but total is {}",
                    self.abbr, by_week_sum, self.total
                ),
            });
        }
        // Games must be chronological with no duplicate dates per team.
        for pair in self.games.windows(2) {
            if pair[1].date <= pair[0].date {
                return Err(ModelError::Invalid {
                    what: "team schedule",
                    message: format!(
                        "{}: games out of order or duplicated at {}",
                        self.abbr, pair[1].date
                    ),
                });
            }
        }
        Ok(())
    }
}

/// Complete schedule data for all teams over the evaluation window.
/// Constructed once per recommendation cycle; read-only thereafter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Schedule {
    /// Number of fantasy weeks covered.
    pub weeks: u32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub week_info: Option<Vec<WeekInfo>>,
    pub teams: Vec<TeamSchedule>,
}

impl Schedule {
    /// Parse and validate a schedule JSON document. Malformed dates or
    /// inconsistent game counts are fatal; this is the adapter boundary where
    /// external data either becomes fully typed or is rejected.
    pub fn from_json(text: &str) -> Result<Self, ModelError> {
        let schedule: Schedule = serde_json::from_str(text).map_err(|e| ModelError::Parse {
            what: "schedule",
            source: e,
        })?;
        schedule.validate()?;
        Ok(schedule)
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        if self.start_date > self.end_date {
            return Err(ModelError::Invalid {
                what: "schedule",
                message: format!(
                    "start_date {} is after end_date {}",
                    self.start_date, self.end_date
                ),
            });
        }
        if let Some(weeks) = &self.week_info {
            if weeks.len() != self.weeks as usize {
                return Err(ModelError::Invalid {
                    what: "schedule",
                    message: format!(
                        "week_info has {} entries but weeks is {}",
                        weeks.len(),
                        self.weeks
                    ),
                });
            }
        }
        for team in &self.teams {
            team.validate()?;
            for game in &team.games {
                if game.date < self.start_date || game.date > self.end_date {
                    return Err(ModelError::Invalid {
                        what: "schedule",
                        message: format!(
                            "{} game on {} falls outside window {}..{}",
                            team.abbr, game.date, self.start_date, self.end_date
                        ),
                    });
                }
            }
        }
        Ok(())
    }

    /// Look up a team's schedule. The abbreviation is normalized first, so
    /// provider short forms ("TB") resolve to the canonical form ("TBL").
    /// Unknown teams fail soft: `None` plus a logged warning.
    pub fn team(&self, abbr: &str) -> Option<&TeamSchedule> {
        let canonical = normalize_team_code(abbr);
        let found = self.teams.iter().find(|t| t.abbr == canonical);
        if found.is_none() {
            warn!("team {canonical} not found in schedule data");
        }
        found
    }

    /// Full ordered game list for a team; empty for unknown teams.
    pub fn games_for_team(&self, abbr: &str) -> &[Game] {
        self.team(abbr).map(|t| t.games.as_slice()).unwrap_or(&[])
    }

    /// Games for a team within `[start, end]` inclusive.
    pub fn games_in_range(&self, abbr: &str, start: NaiveDate, end: NaiveDate) -> Vec<Game> {
        self.team(abbr)
            .map(|t| t.games_in_period(start, end))
            .unwrap_or_default()
    }

    /// Games for a team strictly after `date`.
    pub fn games_after(&self, abbr: &str, date: NaiveDate) -> Vec<Game> {
        self.team(abbr).map(|t| t.games_after(date)).unwrap_or_default()
    }

    /// Teams ordered by total games, descending.
    pub fn teams_sorted_by_games(&self) -> Vec<&TeamSchedule> {
        let mut teams: Vec<&TeamSchedule> = self.teams.iter().collect();
        teams.sort_by(|a, b| b.total.cmp(&a.total));
        teams
    }
}

/// Normalize a team abbreviation to the canonical (NHL API) form. The league
/// provider uses 2-letter short forms for a handful of franchises.
pub fn normalize_team_code(abbr: &str) -> &str {
    match abbr {
        "TB" => "TBL",
        "NJ" => "NJD",
        "SJ" => "SJS",
        "LA" => "LAK",
        other => other,
    }
}

/// Fantasy-week boundaries starting from `today`: week 1 runs today through
/// the coming Sunday, each following week is a full Monday-Sunday span.
/// Returns `(window_start, window_end, per_week_boundaries)`.
pub fn fantasy_week_boundaries(
    today: NaiveDate,
    weeks: u32,
) -> (NaiveDate, NaiveDate, Vec<(NaiveDate, NaiveDate)>) {
    let days_until_sunday = 6 - today.weekday().num_days_from_monday() as i64;

    let mut boundaries = Vec::new();
    let mut week_end = today + Duration::days(days_until_sunday);
    boundaries.push((today, week_end));

    for _ in 1..weeks {
        let week_start = week_end + Duration::days(1);
        week_end = week_start + Duration::days(6);
        boundaries.push((week_start, week_end));
    }

    (today, week_end, boundaries)
}
