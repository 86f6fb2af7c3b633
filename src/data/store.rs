//! In-memory holder for the player record the server is currently showing.
//! Uploads replace the record wholesale; nothing is written back to disk.

use std::sync::{Arc, PoisonError, RwLock};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::data::player::{parse_player, Player, PlayerError};

#[derive(Debug, Clone)]
pub struct LoadedPlayer {
    pub player: Arc<Player>,
    /// Bumped on every replacement, starting at 1 for the initial record.
    pub revision: u64,
    pub loaded_at: DateTime<Utc>,
}

#[derive(Debug)]
pub struct PlayerStore {
    current: RwLock<LoadedPlayer>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlayerSummary {
    pub tag: String,
    pub name: String,
    pub name_color: String,
    pub club: Option<String>,
    pub trophies: u32,
    pub highest_trophies: u32,
    pub exp_level: u32,
    pub exp_points: u64,
    pub exp_progress_percent: f64,
    pub three_vs_three_victories: u32,
    pub solo_victories: u32,
    pub duo_victories: u32,
    pub brawler_count: usize,
    pub revision: u64,
    pub loaded_at: String,
}

impl PlayerSummary {
    pub fn from_loaded(loaded: &LoadedPlayer) -> Self {
        let player = &loaded.player;
        Self {
            tag: player.tag.clone(),
            name: player.name.clone(),
            name_color: player.name_color_hex(),
            club: player.club_name().map(str::to_string),
            trophies: player.trophies,
            highest_trophies: player.highest_trophies,
            exp_level: player.exp_level,
            exp_points: player.exp_points,
            exp_progress_percent: player.exp_progress_percent(),
            three_vs_three_victories: player.three_vs_three_victories,
            solo_victories: player.solo_victories,
            duo_victories: player.duo_victories,
            brawler_count: player.brawlers.len(),
            revision: loaded.revision,
            loaded_at: loaded.loaded_at.to_rfc3339(),
        }
    }
}

impl PlayerStore {
    pub fn new(initial: Player) -> Self {
        Self {
            current: RwLock::new(LoadedPlayer {
                player: Arc::new(initial),
                revision: 1,
                loaded_at: Utc::now(),
            }),
        }
    }

    /// Snapshot of the current record; callers never hold the lock.
    pub fn current(&self) -> LoadedPlayer {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn player(&self) -> Arc<Player> {
        self.current().player
    }

    pub fn replace(&self, player: Player) -> LoadedPlayer {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        let revision = guard.revision.saturating_add(1);
        *guard = LoadedPlayer {
            player: Arc::new(player),
            revision,
            loaded_at: Utc::now(),
        };
        guard.clone()
    }

    /// Parse an uploaded record and swap it in. An invalid upload leaves the
    /// current record untouched.
    pub fn replace_from_json(&self, raw: &str) -> Result<LoadedPlayer, PlayerError> {
        let player = parse_player(raw)?;
        Ok(self.replace(player))
    }
}

impl Default for PlayerStore {
    fn default() -> Self {
        Self::new(Player::default())
    }
}
