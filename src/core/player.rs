//! Participant identification and per-participant data storage.
//!
//! ## PlayerId
//!
//! Type-safe participant identifier. A versus match seats two participants,
//! a solo run seats one.
//!
//! ## PlayerMap
//!
//! Per-participant storage backed by `im::Vector`, so cloning a whole match
//! state stays O(1). Indexed directly by `PlayerId`.

use im::Vector;
use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Participant identifier.
///
/// Indices are 0-based: the first participant is `PlayerId(0)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new participant ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The other seat of a two-participant match.
    ///
    /// ```
    /// use rune_forge::core::PlayerId;
    ///
    /// assert_eq!(PlayerId::new(0).opponent(), PlayerId::new(1));
    /// assert_eq!(PlayerId::new(1).opponent(), PlayerId::new(0));
    /// ```
    #[must_use]
    pub const fn opponent(self) -> Self {
        Self(1 - (self.0 & 1))
    }

    /// Iterate over all participant IDs for `count` participants.
    pub fn all(count: usize) -> impl Iterator<Item = PlayerId> {
        (0..count as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Participant {}", self.0)
    }
}

/// Per-participant data with O(1) access and O(1) clone.
///
/// ## Example
///
/// ```
/// use rune_forge::core::{PlayerId, PlayerMap};
///
/// let mut health: PlayerMap<u32> = PlayerMap::new(2, |_| 40);
/// health[PlayerId::new(1)] = 35;
///
/// assert_eq!(health[PlayerId::new(0)], 40);
/// assert_eq!(health[PlayerId::new(1)], 35);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T: Clone> {
    data: Vector<T>,
}

impl<T: Clone> PlayerMap<T> {
    /// Create a map with values from a factory function.
    pub fn new(count: usize, factory: impl Fn(PlayerId) -> T) -> Self {
        assert!(count > 0, "Must have at least 1 participant");
        assert!(count <= 2, "At most 2 participants supported");

        Self {
            data: PlayerId::all(count).map(factory).collect(),
        }
    }

    /// Create a map with every entry set to `value`.
    pub fn with_value(count: usize, value: T) -> Self {
        Self::new(count, |_| value.clone())
    }

    /// Number of participants.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always false; a map holds at least one participant.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Whether `player` has a seat in this map.
    #[must_use]
    pub fn contains(&self, player: PlayerId) -> bool {
        player.index() < self.data.len()
    }

    /// Get a participant's entry.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> &T {
        &self.data[player.index()]
    }

    /// Get a participant's entry mutably.
    pub fn get_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.data[player.index()]
    }

    /// Iterate over `(PlayerId, &T)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Iterate over `(PlayerId, &mut T)` pairs.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (PlayerId, &mut T)> {
        self.data
            .iter_mut()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Iterate over all participant IDs.
    pub fn player_ids(&self) -> impl Iterator<Item = PlayerId> {
        PlayerId::all(self.data.len())
    }
}

impl<T: Clone> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        self.get(player)
    }
}

impl<T: Clone> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        self.get_mut(player)
    }
}
