//! Draft pools: participant-owned forges and the shared center.
//!
//! A forge is drafted whole: the chosen color goes to the drafter, every
//! other token in it moves to the center. The center is drafted by color
//! and keeps the rest.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::core::PlayerId;
use crate::runes::{RuneColor, Token};

/// Distinct colors of `tokens` in first-seen order.
pub fn distinct_colors<'a>(tokens: impl IntoIterator<Item = &'a Token>) -> Vec<RuneColor> {
    let mut colors = Vec::new();
    for token in tokens {
        if !colors.contains(&token.color) {
            colors.push(token.color);
        }
    }
    colors
}

/// A participant-owned draft pool.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Forge {
    pub owner: PlayerId,
    pub tokens: Vector<Token>,
}

impl Forge {
    /// Create an empty forge.
    #[must_use]
    pub fn new(owner: PlayerId) -> Self {
        Self {
            owner,
            tokens: Vector::new(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[must_use]
    pub fn has_color(&self, color: RuneColor) -> bool {
        self.tokens.iter().any(|t| t.color == color)
    }

    /// Colors available here, in first-seen order.
    #[must_use]
    pub fn colors(&self) -> Vec<RuneColor> {
        distinct_colors(&self.tokens)
    }

    /// Split the forge into `(drafted, leftover)` by `color`, emptying it.
    ///
    /// Returns `None` and leaves the forge untouched if the color is absent.
    pub fn draft(&mut self, color: RuneColor) -> Option<(Vector<Token>, Vector<Token>)> {
        if !self.has_color(color) {
            return None;
        }
        let (drafted, leftover): (Vector<Token>, Vector<Token>) = std::mem::take(&mut self.tokens)
            .into_iter()
            .partition(|t| t.color == color);
        Some((drafted, leftover))
    }
}

/// The shared overflow pool.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CenterPool {
    pub tokens: Vector<Token>,
}

impl CenterPool {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[must_use]
    pub fn colors(&self) -> Vec<RuneColor> {
        distinct_colors(&self.tokens)
    }

    /// Append leftovers, preserving their order.
    pub fn receive(&mut self, tokens: Vector<Token>) {
        self.tokens.append(tokens);
    }

    /// Take every token of `color`, keeping the others in order.
    ///
    /// Returns `None` and leaves the pool untouched if the color is absent.
    pub fn take_color(&mut self, color: RuneColor) -> Option<Vector<Token>> {
        if !self.tokens.iter().any(|t| t.color == color) {
            return None;
        }
        let (taken, kept): (Vector<Token>, Vector<Token>) = std::mem::take(&mut self.tokens)
            .into_iter()
            .partition(|t| t.color == color);
        self.tokens = kept;
        Some(taken)
    }
}

/// Refill every forge from its owner's supply.
///
/// `forges` is laid out owner-major: each owner's forges are contiguous.
/// Tokens are drawn from the front of each supply, `tokens_per_forge` per
/// forge. If any owner cannot fill all of their forges, nothing is drawn and
/// the exhausted owners are returned.
pub fn refill_forges<'a>(
    forges: &mut Vector<Forge>,
    supplies: impl IntoIterator<Item = (PlayerId, &'a mut Vector<Token>)>,
    tokens_per_forge: usize,
) -> Result<usize, Vec<PlayerId>> {
    let mut supplies: Vec<_> = supplies.into_iter().collect();

    let exhausted: Vec<PlayerId> = supplies
        .iter()
        .filter(|(owner, supply)| {
            let owned = forges.iter().filter(|f| f.owner == *owner).count();
            supply.len() < owned * tokens_per_forge
        })
        .map(|(owner, _)| *owner)
        .collect();
    if !exhausted.is_empty() {
        return Err(exhausted);
    }

    let mut drawn = 0;
    for forge in forges.iter_mut() {
        let Some((_, supply)) = supplies.iter_mut().find(|(owner, _)| *owner == forge.owner) else {
            continue;
        };
        let rest = supply.split_off(tokens_per_forge);
        forge.tokens.append(std::mem::replace(*supply, rest));
        drawn += tokens_per_forge;
    }
    Ok(drawn)
}
