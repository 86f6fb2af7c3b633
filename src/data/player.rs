//! Player record as exported by the Brawl Stars API (camelCase keys).
//! Unknown fields are ignored; missing collections and counters default to empty / 0.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

pub const DEFAULT_PLAYER_PATH: &str = "data/player.json";

/// Power level at which a brawler is fully upgraded.
pub const MAX_POWER: u32 = 11;

const DEFAULT_NAME_COLOR: &str = "#ff9727";

pub type BrawlerId = u32;

#[derive(Debug, thiserror::Error)]
pub enum PlayerError {
    #[error("unable to read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid player record: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid player record: expected a JSON object, found {0}")]
    NotAnObject(&'static str),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Accessory {
    pub id: u32,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gear {
    pub id: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub level: u32,
}

impl Gear {
    pub fn label(&self) -> String {
        format!("{} Lv{}", self.name, self.level)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RankTier {
    Bronze,
    Silver,
    Gold,
    Legendary,
}

impl RankTier {
    pub fn from_rank(rank: u32) -> Self {
        if rank >= 35 {
            Self::Legendary
        } else if rank >= 25 {
            Self::Gold
        } else if rank >= 15 {
            Self::Silver
        } else {
            Self::Bronze
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Self::Bronze => "#cd7f32",
            Self::Silver => "#c0c0c0",
            Self::Gold => "#ffd700",
            Self::Legendary => "#ff6b6b",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Brawler {
    pub id: BrawlerId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub power: u32,
    #[serde(default)]
    pub rank: u32,
    #[serde(default)]
    pub trophies: u32,
    #[serde(default)]
    pub highest_trophies: u32,
    #[serde(default)]
    pub prestige_level: u32,
    #[serde(default)]
    pub current_win_streak: u32,
    #[serde(default)]
    pub max_win_streak: u32,
    #[serde(default)]
    pub gadgets: Vec<Accessory>,
    #[serde(default)]
    pub star_powers: Vec<Accessory>,
    #[serde(default)]
    pub gears: Vec<Gear>,
}

impl Brawler {
    /// Power level zero-padded to two digits, as shown on the card badge.
    pub fn power_label(&self) -> String {
        format!("{:02}", self.power)
    }

    pub fn rank_tier(&self) -> RankTier {
        RankTier::from_rank(self.rank)
    }

    pub fn is_max_power(&self) -> bool {
        self.power >= MAX_POWER
    }

    pub fn has_upgrades(&self) -> bool {
        !self.gears.is_empty() || !self.star_powers.is_empty() || !self.gadgets.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerIcon {
    pub id: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Club {
    #[serde(default)]
    pub tag: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    #[serde(default)]
    pub tag: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub name_color: Option<String>,
    #[serde(default)]
    pub icon: Option<PlayerIcon>,
    #[serde(default)]
    pub trophies: u32,
    #[serde(default)]
    pub highest_trophies: u32,
    #[serde(default)]
    pub exp_level: u32,
    #[serde(default)]
    pub exp_points: u64,
    #[serde(default, rename = "3vs3Victories")]
    pub three_vs_three_victories: u32,
    #[serde(default)]
    pub solo_victories: u32,
    #[serde(default)]
    pub duo_victories: u32,
    #[serde(default)]
    pub club: Option<Club>,
    #[serde(default)]
    pub brawlers: Vec<Brawler>,
}

impl Player {
    pub fn brawler(&self, id: BrawlerId) -> Option<&Brawler> {
        self.brawlers.iter().find(|b| b.id == id)
    }

    /// API colours arrive as `0xffRRGGBB`; the alpha prefix is dropped.
    pub fn name_color_hex(&self) -> String {
        match self.name_color.as_deref() {
            Some(raw) if !raw.trim().is_empty() => {
                format!("#{}", raw.trim().replacen("0xff", "", 1))
            }
            _ => DEFAULT_NAME_COLOR.to_string(),
        }
    }

    /// Progress through the current 10k exp band, in percent (0..=100).
    pub fn exp_progress_percent(&self) -> f64 {
        ((self.exp_points % 10_000) as f64 / 100.0).min(100.0)
    }

    pub fn club_name(&self) -> Option<&str> {
        self.club
            .as_ref()
            .and_then(|club| club.name.as_deref())
            .filter(|name| !name.is_empty())
    }
}

/// Only a JSON object is a record; the derived visitor would otherwise
/// accept an array and fill every field with its default.
pub fn parse_player(raw: &str) -> Result<Player, PlayerError> {
    let value: serde_json::Value = serde_json::from_str(raw)?;
    let kind = match &value {
        serde_json::Value::Object(_) => return Ok(serde_json::from_value(value)?),
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Null => "null",
    };
    Err(PlayerError::NotAnObject(kind))
}

pub fn load_player(path: impl AsRef<Path>) -> Result<Player, PlayerError> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).map_err(|source| PlayerError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_player(&raw)
}
