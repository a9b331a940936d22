//! In-memory table of running games.
//!
//! Each game carries its own `Uuid`; the registry is just an owned map from
//! that id to the game, so callers never share state through globals.

use rustc_hash::FxHashMap;
use uuid::Uuid;

use crate::games::casino::CasinoGame;
use crate::games::party::PartyGame;

/// Anything the registry can hold.
pub trait Identified {
    fn id(&self) -> Uuid;
}

impl Identified for CasinoGame {
    fn id(&self) -> Uuid {
        CasinoGame::id(self)
    }
}

impl Identified for PartyGame {
    fn id(&self) -> Uuid {
        PartyGame::id(self)
    }
}

/// Games keyed by id.
///
/// ## Example
///
/// ```
/// use ride_the_bus::{CasinoGame, GameRegistry};
///
/// let mut games = GameRegistry::new();
/// let id = games.insert(CasinoGame::new(7, 20).unwrap());
///
/// assert_eq!(games.get(id).unwrap().bet(), 20);
/// assert!(games.remove(id).is_some());
/// assert!(games.is_empty());
/// ```
#[derive(Clone, Debug)]
pub struct GameRegistry<G> {
    games: FxHashMap<Uuid, G>,
}

impl<G> Default for GameRegistry<G> {
    fn default() -> Self {
        Self {
            games: FxHashMap::default(),
        }
    }
}

impl<G: Identified> GameRegistry<G> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a game, replacing any game with the same id. Returns the id.
    pub fn insert(&mut self, game: G) -> Uuid {
        let id = game.id();
        if self.games.insert(id, game).is_some() {
            log::debug!("replaced game {id} in registry");
        }
        id
    }

    #[must_use]
    pub fn get(&self, id: Uuid) -> Option<&G> {
        self.games.get(&id)
    }

    pub fn get_mut(&mut self, id: Uuid) -> Option<&mut G> {
        self.games.get_mut(&id)
    }

    pub fn remove(&mut self, id: Uuid) -> Option<G> {
        self.games.remove(&id)
    }

    #[must_use]
    pub fn contains(&self, id: Uuid) -> bool {
        self.games.contains_key(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.games.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = Uuid> + '_ {
        self.games.keys().copied()
    }
}
