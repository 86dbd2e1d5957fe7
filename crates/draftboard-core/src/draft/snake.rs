// Snake-draft pick arithmetic.
//
// Odd rounds pick in slot order 1..N, even rounds reverse N..1.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PickError {
    #[error("invalid argument `{field}`: {message}")]
    InvalidArgument {
        field: &'static str,
        message: String,
    },
}

/// Overall pick number for `slot` in `round` of a `team_count`-team snake
/// draft. Callers must pass `round >= 1` and `1 <= slot <= team_count`; see
/// [`checked_overall_pick`] for a validating variant.
pub fn overall_pick(round: u32, team_count: u32, slot: u32) -> u32 {
    if round % 2 == 1 {
        (round - 1) * team_count + slot
    } else {
        round * team_count - slot + 1
    }
}

/// [`overall_pick`] with argument validation.
pub fn checked_overall_pick(round: u32, team_count: u32, slot: u32) -> Result<u32, PickError> {
    if team_count == 0 {
        return Err(PickError::InvalidArgument {
            field: "team_count",
            message: "must be greater than 0".into(),
        });
    }
    if round == 0 {
        return Err(PickError::InvalidArgument {
            field: "round",
            message: "must be at least 1".into(),
        });
    }
    if slot == 0 || slot > team_count {
        return Err(PickError::InvalidArgument {
            field: "slot",
            message: format!("must be between 1 and {team_count}, got {slot}"),
        });
    }
    Ok(overall_pick(round, team_count, slot))
}

/// Inverse of [`overall_pick`]: the `(round, slot)` that owns `pick`.
/// Returns `None` for pick 0 or a zero team count.
pub fn round_and_slot(pick: u32, team_count: u32) -> Option<(u32, u32)> {
    if pick == 0 || team_count == 0 {
        return None;
    }
    let round = (pick - 1) / team_count + 1;
    let offset = (pick - 1) % team_count;
    let slot = if round % 2 == 1 {
        offset + 1
    } else {
        team_count - offset
    };
    Some((round, slot))
}
