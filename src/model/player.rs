// Player types: positions, roster slots, status, and quality tiers.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::ModelError;

/// Primary player positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Position {
    #[serde(rename = "C")]
    Center,
    #[serde(rename = "LW")]
    LeftWing,
    #[serde(rename = "RW")]
    RightWing,
    /// Generic forward.
    #[serde(rename = "F")]
    Forward,
    #[serde(rename = "D")]
    Defense,
    #[serde(rename = "G")]
    Goalie,
    /// Utility (any skater).
    #[serde(rename = "U")]
    Utility,
}

/// Player injury/availability status as reported by the league provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlayerStatus {
    #[default]
    #[serde(rename = "Healthy")]
    Healthy,
    #[serde(rename = "INJ")]
    Injured,
    #[serde(rename = "O")]
    Out,
    #[serde(rename = "DTD")]
    DayToDay,
    #[serde(rename = "IR")]
    InjuredReserve,
    #[serde(rename = "IR+")]
    IrPlus,
    #[serde(rename = "SUSP")]
    Suspended,
    #[serde(rename = "NA")]
    NotActive,
}

/// Current roster slot assignment for a rostered player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlotAssignment {
    #[serde(rename = "C")]
    Center,
    #[serde(rename = "LW")]
    LeftWing,
    #[serde(rename = "RW")]
    RightWing,
    #[serde(rename = "D")]
    Defense,
    #[serde(rename = "U")]
    Utility,
    #[serde(rename = "G")]
    Goalie,
    #[serde(rename = "BN")]
    Bench,
    #[serde(rename = "IR")]
    InjuredReserve,
    #[serde(rename = "IR+")]
    IrPlus,
}

/// Quality tiers, best first. Tier assignment is position-class dependent
/// (goalie scoring runs on a different scale than skater scoring); see
/// `streaming::quality` for the thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tier {
    #[serde(rename = "Elite")]
    Elite,
    #[serde(rename = "High-End")]
    HighEnd,
    #[serde(rename = "Mid-Tier")]
    MidTier,
    #[serde(rename = "Streamable")]
    Streamable,
    #[serde(rename = "Deep League")]
    DeepLeague,
}

impl Tier {
    /// Whether this tier makes a player eligible to drop for streaming.
    /// Elite and High-End players are categorically protected. Deep League
    /// players are not droppable either; this is the single policy point if
    /// that ever changes.
    pub fn droppable(self) -> bool {
        matches!(self, Tier::MidTier | Tier::Streamable)
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Tier::Elite => "Elite",
            Tier::HighEnd => "High-End",
            Tier::MidTier => "Mid-Tier",
            Tier::Streamable => "Streamable",
            Tier::DeepLeague => "Deep League",
        };
        f.write_str(s)
    }
}

/// Assessment of player quality and droppability. Derived by the classifier
/// and attached to a `Player` for one recommendation cycle; never persisted
/// on its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerQuality {
    /// Fantasy points per game, rounded to two decimals.
    pub ppg: f64,
    /// Games played used for the ppg denominator.
    pub games_played: u32,
    pub tier: Tier,
    pub droppable: bool,
}

/// Standardized player representation used across the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    #[serde(default)]
    pub player_id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub position: Option<Position>,
    #[serde(default)]
    pub eligible_positions: Vec<Position>,
    /// Current roster slot. None for free agents.
    #[serde(default)]
    pub selected_position: Option<SlotAssignment>,
    /// NHL team abbreviation (e.g. "TOR", "EDM"). May be a provider short
    /// form; the schedule index normalizes at lookup time.
    #[serde(default)]
    pub nhl_team: Option<String>,
    /// Total fantasy points accumulated this season (can be negative for
    /// goalies).
    #[serde(default)]
    pub fantasy_points: f64,
    #[serde(default)]
    pub status: PlayerStatus,
    #[serde(default)]
    pub is_injured: bool,
    /// Populated by the classifier when needed for drop decisions.
    #[serde(default)]
    pub quality: Option<PlayerQuality>,
}

impl Player {
    pub fn is_goalie(&self) -> bool {
        self.position == Some(Position::Goalie)
    }

    pub fn is_skater(&self) -> bool {
        !self.is_goalie()
    }

    /// Whether the player is in an active lineup slot (not bench/IR, and not
    /// a free agent).
    pub fn is_active(&self) -> bool {
        !matches!(
            self.selected_position,
            None | Some(SlotAssignment::Bench)
                | Some(SlotAssignment::InjuredReserve)
                | Some(SlotAssignment::IrPlus)
        )
    }

    pub fn is_on_ir(&self) -> bool {
        matches!(
            self.selected_position,
            Some(SlotAssignment::InjuredReserve) | Some(SlotAssignment::IrPlus)
        )
    }
}

/// Parse a JSON array of players (the free-agent pool document). Fails fast
/// on malformed input.
pub fn players_from_json(text: &str) -> Result<Vec<Player>, ModelError> {
    let players: Vec<Player> = serde_json::from_str(text).map_err(|e| ModelError::Parse {
        what: "player list",
        source: e,
    })?;
    for player in &players {
        if player.name.is_empty() {
            return Err(ModelError::Invalid {
                what: "player list",
                message: "player with empty name".into(),
            });
        }
    }
    Ok(players)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_player(name: &str) -> Player {
        Player {
            player_id: None,
            name: name.into(),
            position: Some(Position::Center),
            eligible_positions: vec![],
            selected_position: None,
            nhl_team: Some("EDM".into()),
            fantasy_points: 0.0,
            status: PlayerStatus::Healthy,
            is_injured: false,
            quality: None,
        }
    }

    #[test]
    fn goalie_checks() {
        let mut p = base_player("Test");
        assert!(!p.is_goalie());
        assert!(p.is_skater());
        p.position = Some(Position::Goalie);
        assert!(p.is_goalie());
        assert!(!p.is_skater());
    }

    #[test]
    fn free_agent_is_not_active() {
        let p = base_player("FA");
        assert!(!p.is_active());
        assert!(!p.is_on_ir());
    }

    #[test]
    fn bench_and_ir_are_not_active() {
        let mut p = base_player("Benchwarmer");
        p.selected_position = Some(SlotAssignment::Bench);
        assert!(!p.is_active());
        assert!(!p.is_on_ir());

        p.selected_position = Some(SlotAssignment::IrPlus);
        assert!(!p.is_active());
        assert!(p.is_on_ir());
    }

    #[test]
    fn starter_is_active() {
        let mut p = base_player("Starter");
        p.selected_position = Some(SlotAssignment::LeftWing);
        assert!(p.is_active());
    }

    #[test]
    fn droppable_policy_only_mid_tier_and_streamable() {
        assert!(!Tier::Elite.droppable());
        assert!(!Tier::HighEnd.droppable());
        assert!(Tier::MidTier.droppable());
        assert!(Tier::Streamable.droppable());
        assert!(!Tier::DeepLeague.droppable());
    }

    #[test]
    fn player_deserializes_provider_strings() {
        let json = r#"{
            "player_id": "3637",
            "name": "Connor McDavid",
            "position": "C",
            "eligible_positions": ["C", "LW"],
            "selected_position": "C",
            "nhl_team": "EDM",
            "fantasy_points": 45.5,
            "status": "Healthy",
            "is_injured": false
        }"#;
        let p: Player = serde_json::from_str(json).unwrap();
        assert_eq!(p.position, Some(Position::Center));
        assert_eq!(p.selected_position, Some(SlotAssignment::Center));
        assert_eq!(p.eligible_positions, vec![Position::Center, Position::LeftWing]);
        assert!(p.is_active());
    }

    #[test]
    fn ir_plus_status_string_round_trips() {
        let json = r#"{"name": "Hurt Guy", "status": "IR+", "selected_position": "IR+"}"#;
        let p: Player = serde_json::from_str(json).unwrap();
        assert_eq!(p.status, PlayerStatus::IrPlus);
        assert!(p.is_on_ir());
    }

    #[test]
    fn players_from_json_parses_minimal_free_agents() {
        let json = r#"[{"name": "A", "position": "LW", "nhl_team": "TOR", "fantasy_points": 3.0}]"#;
        let players = players_from_json(json).unwrap();
        assert_eq!(players.len(), 1);
        assert_eq!(players[0].selected_position, None);
        assert_eq!(players[0].fantasy_points, 3.0);
    }

    #[test]
    fn players_from_json_rejects_malformed_input() {
        assert!(players_from_json("{not json").is_err());
        // A player entry missing the required name field is a shape error.
        assert!(players_from_json(r#"[{"position": "C"}]"#).is_err());
        assert!(players_from_json(r#"[{"name": ""}]"#).is_err());
    }
}
