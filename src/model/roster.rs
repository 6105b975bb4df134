// Fantasy roster: the user's current players plus composition summaries.

use serde::{Deserialize, Serialize};

use super::player::{Player, Position};
use super::ModelError;

/// Summary statistics about roster composition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterCounts {
    pub total: usize,
    /// C, LW, RW, and generic F positions.
    pub forwards: usize,
    pub defense: usize,
    pub goalies: usize,
    pub active: usize,
    pub bench: usize,
    pub injured_reserve: usize,
}

/// Complete roster for one fantasy team.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Roster {
    #[serde(default)]
    pub team_id: Option<String>,
    #[serde(default)]
    pub players: Vec<Player>,
}

impl Roster {
    /// Parse and validate a roster JSON document.
    pub fn from_json(text: &str) -> Result<Self, ModelError> {
        let roster: Roster = serde_json::from_str(text).map_err(|e| ModelError::Parse {
            what: "roster",
            source: e,
        })?;
        for player in &roster.players {
            if player.name.is_empty() {
                return Err(ModelError::Invalid {
                    what: "roster",
                    message: "player with empty name".into(),
                });
            }
        }
        Ok(roster)
    }

    pub fn counts(&self) -> RosterCounts {
        RosterCounts {
            total: self.players.len(),
            forwards: self.forwards().len(),
            defense: self.defensemen().len(),
            goalies: self.goalies().len(),
            active: self.active_players().len(),
            bench: self.bench_players().len(),
            injured_reserve: self.ir_players().len(),
        }
    }

    /// Players in active lineup slots (not bench/IR).
    pub fn active_players(&self) -> Vec<&Player> {
        self.players.iter().filter(|p| p.is_active()).collect()
    }

    pub fn bench_players(&self) -> Vec<&Player> {
        self.players
            .iter()
            .filter(|p| p.selected_position == Some(super::player::SlotAssignment::Bench))
            .collect()
    }

    pub fn ir_players(&self) -> Vec<&Player> {
        self.players.iter().filter(|p| p.is_on_ir()).collect()
    }

    pub fn players_by_position(&self, position: Position) -> Vec<&Player> {
        self.players
            .iter()
            .filter(|p| p.position == Some(position))
            .collect()
    }

    pub fn forwards(&self) -> Vec<&Player> {
        self.players
            .iter()
            .filter(|p| {
                matches!(
                    p.position,
                    Some(Position::Center)
                        | Some(Position::LeftWing)
                        | Some(Position::RightWing)
                        | Some(Position::Forward)
                )
            })
            .collect()
    }

    pub fn defensemen(&self) -> Vec<&Player> {
        self.players_by_position(Position::Defense)
    }

    pub fn goalies(&self) -> Vec<&Player> {
        self.players_by_position(Position::Goalie)
    }

    /// Find a player by name, case-insensitive exact match.
    pub fn player_by_name(&self, name: &str) -> Option<&Player> {
        let name_lower = name.to_lowercase();
        self.players
            .iter()
            .find(|p| p.name.to_lowercase() == name_lower)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::player::{PlayerStatus, SlotAssignment};

    fn player(name: &str, position: Position, slot: Option<SlotAssignment>) -> Player {
        Player {
            player_id: None,
            name: name.into(),
            position: Some(position),
            eligible_positions: vec![],
            selected_position: slot,
            nhl_team: Some("EDM".into()),
            fantasy_points: 10.0,
            status: PlayerStatus::Healthy,
            is_injured: false,
            quality: None,
        }
    }

    fn sample_roster() -> Roster {
        Roster {
            team_id: Some("456".into()),
            players: vec![
                player("Center One", Position::Center, Some(SlotAssignment::Center)),
                player("Winger Two", Position::LeftWing, Some(SlotAssignment::LeftWing)),
                player("Dman Three", Position::Defense, Some(SlotAssignment::Defense)),
                player("Goalie Four", Position::Goalie, Some(SlotAssignment::Goalie)),
                player("Bench Five", Position::RightWing, Some(SlotAssignment::Bench)),
                player("Hurt Six", Position::Forward, Some(SlotAssignment::InjuredReserve)),
            ],
        }
    }

    #[test]
    fn counts_summarize_composition() {
        let counts = sample_roster().counts();
        assert_eq!(counts.total, 6);
        assert_eq!(counts.forwards, 4);
        assert_eq!(counts.defense, 1);
        assert_eq!(counts.goalies, 1);
        assert_eq!(counts.active, 4);
        assert_eq!(counts.bench, 1);
        assert_eq!(counts.injured_reserve, 1);
    }

    #[test]
    fn player_by_name_is_case_insensitive() {
        let roster = sample_roster();
        assert!(roster.player_by_name("center one").is_some());
        assert!(roster.player_by_name("CENTER ONE").is_some());
        assert!(roster.player_by_name("nobody").is_none());
    }

    #[test]
    fn from_json_parses_roster_document() {
        let json = r#"{
            "team_id": "456",
            "players": [
                {"name": "Connor McDavid", "position": "C", "selected_position": "C",
                 "nhl_team": "EDM", "fantasy_points": 45.5}
            ]
        }"#;
        let roster = Roster::from_json(json).unwrap();
        assert_eq!(roster.players.len(), 1);
        assert_eq!(roster.counts().active, 1);
    }

    #[test]
    fn from_json_rejects_malformed_document() {
        assert!(Roster::from_json("[]").is_err());
        assert!(Roster::from_json(r#"{"players": [{"name": ""}]}"#).is_err());
    }
}
