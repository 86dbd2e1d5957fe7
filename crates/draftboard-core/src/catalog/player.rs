// Player records and the enums that describe them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier used as the draft-status key.
pub type PlayerId = u32;

/// Fantasy football roster positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    #[serde(rename = "QB")]
    Quarterback,
    #[serde(rename = "RB")]
    RunningBack,
    #[serde(rename = "WR")]
    WideReceiver,
    #[serde(rename = "TE")]
    TightEnd,
    #[serde(rename = "DST")]
    Defense,
    #[serde(rename = "K")]
    Kicker,
}

impl Position {
    /// All positions in board tab order.
    pub const ALL: [Position; 6] = [
        Position::Quarterback,
        Position::RunningBack,
        Position::WideReceiver,
        Position::TightEnd,
        Position::Defense,
        Position::Kicker,
    ];

    /// Parse a position abbreviation (case-insensitive).
    ///
    /// "D/ST" and "DEF" are accepted as aliases for the defense slot.
    pub fn from_str_pos(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "QB" => Some(Position::Quarterback),
            "RB" => Some(Position::RunningBack),
            "WR" => Some(Position::WideReceiver),
            "TE" => Some(Position::TightEnd),
            "DST" | "D/ST" | "DEF" => Some(Position::Defense),
            "K" => Some(Position::Kicker),
            _ => None,
        }
    }

    /// Return the display string for this position.
    pub fn display_str(&self) -> &'static str {
        match self {
            Position::Quarterback => "QB",
            Position::RunningBack => "RB",
            Position::WideReceiver => "WR",
            Position::TightEnd => "TE",
            Position::Defense => "DST",
            Position::Kicker => "K",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_str())
    }
}

/// Qualitative floor/ceiling grade. Variants are declared worst to best so
/// the derived ordering matches the grade ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rating {
    Poor,
    Mediocre,
    Good,
    Great,
    Excellent,
}

impl Rating {
    pub fn from_str_rating(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "poor" => Some(Rating::Poor),
            "mediocre" => Some(Rating::Mediocre),
            "good" => Some(Rating::Good),
            "great" => Some(Rating::Great),
            "excellent" => Some(Rating::Excellent),
            _ => None,
        }
    }

    pub fn display_str(&self) -> &'static str {
        match self {
            Rating::Poor => "Poor",
            Rating::Mediocre => "Mediocre",
            Rating::Good => "Good",
            Rating::Great => "Great",
            Rating::Excellent => "Excellent",
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_str())
    }
}

/// Qualitative flags attached to a player. Independent of one another.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerTags {
    pub must_draft: bool,
    pub avoid: bool,
    pub overrated: bool,
    pub underrated: bool,
}

/// A single row of the draft board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub id: PlayerId,
    pub name: String,
    pub team: String,
    pub position: Position,
    /// Overall rank as published. Display data only: two players may share
    /// a rank.
    pub overall_rank: u32,
    pub position_rank: u32,
    /// Average draft position exactly as authored (e.g. "12.8").
    pub adp: String,
    pub tier: u8,
    pub tags: PlayerTags,
    pub floor: Rating,
    pub ceiling: Rating,
    /// Free-form projection text, display only.
    pub projection: Option<String>,
}

impl PlayerRecord {
    /// Parsed ADP, or `None` when the authored text is not a finite number.
    pub fn adp_value(&self) -> Option<f64> {
        self.adp
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
    }

    /// Positional label such as "RB12".
    pub fn position_label(&self) -> String {
        format!("{}{}", self.position.display_str(), self.position_rank)
    }
}

#[cfg(test)]
pub(crate) fn sample_player(id: PlayerId, name: &str, position: Position, rank: u32) -> PlayerRecord {
    PlayerRecord {
        id,
        name: name.to_string(),
        team: "FA".to_string(),
        position,
        overall_rank: rank,
        position_rank: 1,
        adp: format!("{rank}.0"),
        tier: 1,
        tags: PlayerTags::default(),
        floor: Rating::Good,
        ceiling: Rating::Great,
        projection: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_parse_accepts_aliases() {
        assert_eq!(Position::from_str_pos("rb"), Some(Position::RunningBack));
        assert_eq!(Position::from_str_pos(" DST "), Some(Position::Defense));
        assert_eq!(Position::from_str_pos("D/ST"), Some(Position::Defense));
        assert_eq!(Position::from_str_pos("OF"), None);
    }

    #[test]
    fn position_display_round_trips() {
        for pos in Position::ALL {
            assert_eq!(Position::from_str_pos(pos.display_str()), Some(pos));
        }
    }

    #[test]
    fn rating_is_ordered_worst_to_best() {
        assert!(Rating::Poor < Rating::Mediocre);
        assert!(Rating::Mediocre < Rating::Good);
        assert!(Rating::Good < Rating::Great);
        assert!(Rating::Great < Rating::Excellent);
    }

    #[test]
    fn adp_value_parses_decimal_text() {
        let p = sample_player(1, "Ja'Marr Chase", Position::WideReceiver, 1);
        assert_eq!(p.adp_value(), Some(1.0));
    }

    #[test]
    fn adp_value_rejects_garbage_and_non_finite() {
        let mut p = sample_player(1, "Someone", Position::Kicker, 1);
        p.adp = "N/A".into();
        assert_eq!(p.adp_value(), None);
        p.adp = "".into();
        assert_eq!(p.adp_value(), None);
        p.adp = "NaN".into();
        assert_eq!(p.adp_value(), None);
        p.adp = " 43.2 ".into();
        assert_eq!(p.adp_value(), Some(43.2));
    }

    #[test]
    fn position_label_combines_position_and_rank() {
        let mut p = sample_player(1, "Bijan Robinson", Position::RunningBack, 2);
        p.position_rank = 12;
        assert_eq!(p.position_label(), "RB12");
    }
}
