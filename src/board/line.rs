//! Staging lines - fixed-capacity buffers between the draft and the grid.
//!
//! Line `N` (1-indexed) holds at most `N` runes of a single color. The
//! anchor is the rune whose effects will govern the grid cell: the highest
//! tier staged, earliest on ties.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::runes::{RuneColor, Token};

/// Pick the anchor of `tokens`: highest tier, earliest on ties.
fn pick_anchor(tokens: &Vector<Token>) -> Option<Token> {
    let mut best: Option<&Token> = None;
    for token in tokens {
        if best.map_or(true, |b| token.tier > b.tier) {
            best = Some(token);
        }
    }
    best.cloned()
}

/// A single staging line.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StagingLine {
    pub capacity: usize,
    pub tokens: Vector<Token>,
    /// Cached anchor; always one of `tokens` when the line is non-empty.
    pub anchor: Option<Token>,
    /// Frozen lines reject placement until the round ends.
    pub frozen: bool,
}

impl StagingLine {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            tokens: Vector::new(),
            anchor: None,
            frozen: false,
        }
    }

    /// Color currently held, if any.
    #[must_use]
    pub fn color(&self) -> Option<RuneColor> {
        self.tokens.front().map(|t| t.color)
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.tokens.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.capacity.saturating_sub(self.tokens.len())
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.tokens.len() >= self.capacity
    }

    /// Stage as many of `incoming` as fit, in order.
    ///
    /// Returns `(staged, overflow)`. Color and freeze legality are the rule
    /// layer's concern; this only enforces capacity.
    pub fn stage(&mut self, mut incoming: Vector<Token>) -> (Vector<Token>, Vector<Token>) {
        let fit = self.remaining().min(incoming.len());
        let overflow = incoming.split_off(fit);
        self.tokens.append(incoming.clone());
        self.anchor = pick_anchor(&self.tokens);
        (incoming, overflow)
    }

    /// Remove the most recently staged rune, re-deriving the anchor.
    pub fn remove_last(&mut self) -> Option<Token> {
        let removed = self.tokens.pop_back()?;
        self.anchor = pick_anchor(&self.tokens);
        Some(removed)
    }

    /// Empty the line. Returns `(anchor, the other runes)`.
    pub fn clear(&mut self) -> (Option<Token>, Vector<Token>) {
        let anchor = self.anchor.take();
        let tokens = std::mem::take(&mut self.tokens);
        let rest = match &anchor {
            Some(a) => tokens.into_iter().filter(|t| t.id != a.id).collect(),
            None => tokens,
        };
        (anchor, rest)
    }
}
