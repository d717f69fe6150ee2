//! Placement legality.
//!
//! A selection may go to staging line `N` when the line exists, is not
//! frozen, holds nothing or the same color, has room, and the color is not
//! already on row `N - 1` of the grid. Capacity overflow is not an error:
//! the excess spills into the penalty area. The penalty area itself always
//! accepts.

use crate::board::Participant;
use crate::core::{IllegalMove, PlacementTarget};
use crate::runes::RuneColor;

/// Check that `color` may be staged on `line` (1-based) of `participant`.
pub fn check_line(participant: &Participant, line: usize, color: RuneColor) -> Result<(), IllegalMove> {
    let staging = participant.line(line).ok_or(IllegalMove::LineOutOfRange(line))?;

    if staging.frozen {
        return Err(IllegalMove::LineFrozen(line));
    }
    if let Some(held) = staging.color() {
        if held != color {
            return Err(IllegalMove::LineColorMismatch { line, held });
        }
    }
    if staging.is_full() {
        return Err(IllegalMove::LineFull(line));
    }
    if participant.grid.row_has_color(line - 1, color) {
        return Err(IllegalMove::ColorOnGrid { line, color });
    }
    Ok(())
}

/// Check any placement target.
pub fn check_placement(
    participant: &Participant,
    target: PlacementTarget,
    color: RuneColor,
) -> Result<(), IllegalMove> {
    match target {
        PlacementTarget::Line(line) => check_line(participant, line, color),
        PlacementTarget::Penalty => Ok(()),
    }
}

/// Every legal target for `color`: lines in ascending order, then the
/// penalty area.
#[must_use]
pub fn legal_placements(participant: &Participant, color: RuneColor) -> Vec<PlacementTarget> {
    (1..=participant.lines.len())
        .filter(|&line| check_line(participant, line, color).is_ok())
        .map(PlacementTarget::Line)
        .chain(std::iter::once(PlacementTarget::Penalty))
        .collect()
}
