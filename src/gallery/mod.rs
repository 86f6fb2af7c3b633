//! Gallery view over a player's roster: search, sort, column layout and the
//! per-brawler detail card.

use std::str::FromStr;

use serde::Serialize;

use crate::data::player::{Brawler, BrawlerId, Player, RankTier};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GalleryError {
    #[error("unknown sort key '{0}' (expected roster, name, trophies, highest_trophies, power or rank)")]
    UnknownSortKey(String),
    #[error("unsupported column count '{0}' (expected 2 or 3)")]
    UnsupportedColumns(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    #[default]
    Roster,
    Name,
    Trophies,
    HighestTrophies,
    Power,
    Rank,
}

impl FromStr for SortKey {
    type Err = GalleryError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "" | "roster" => Ok(Self::Roster),
            "name" => Ok(Self::Name),
            "trophies" => Ok(Self::Trophies),
            "highest" | "highest_trophies" => Ok(Self::HighestTrophies),
            "power" => Ok(Self::Power),
            "rank" => Ok(Self::Rank),
            _ => Err(GalleryError::UnknownSortKey(raw.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Columns {
    Two,
    #[default]
    Three,
}

impl Columns {
    pub fn count(&self) -> usize {
        match self {
            Self::Two => 2,
            Self::Three => 3,
        }
    }
}

impl FromStr for Columns {
    type Err = GalleryError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim() {
            "2" => Ok(Self::Two),
            "" | "3" => Ok(Self::Three),
            _ => Err(GalleryError::UnsupportedColumns(raw.to_string())),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GalleryQuery {
    pub search: String,
    pub sort: SortKey,
    pub columns: Columns,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrawlerCard {
    pub id: BrawlerId,
    pub name: String,
    pub power: u32,
    pub power_label: String,
    pub rank: u32,
    pub rank_tier: RankTier,
    pub rank_color: &'static str,
    pub trophies: u32,
    pub highest_trophies: u32,
    pub current_win_streak: u32,
    pub max_win_streak: u32,
    pub gears: Vec<String>,
    pub star_powers: Vec<String>,
    pub gadgets: Vec<String>,
    pub has_upgrades: bool,
}

impl From<&Brawler> for BrawlerCard {
    fn from(brawler: &Brawler) -> Self {
        let tier = brawler.rank_tier();
        Self {
            id: brawler.id,
            name: brawler.name.clone(),
            power: brawler.power,
            power_label: brawler.power_label(),
            rank: brawler.rank,
            rank_tier: tier,
            rank_color: tier.color(),
            trophies: brawler.trophies,
            highest_trophies: brawler.highest_trophies,
            current_win_streak: brawler.current_win_streak,
            max_win_streak: brawler.max_win_streak,
            gears: brawler.gears.iter().map(|g| g.label()).collect(),
            star_powers: brawler.star_powers.iter().map(|sp| sp.name.clone()).collect(),
            gadgets: brawler.gadgets.iter().map(|gd| gd.name.clone()).collect(),
            has_upgrades: brawler.has_upgrades(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Gallery {
    pub columns: usize,
    pub total: usize,
    pub matched: usize,
    pub rows: Vec<Vec<BrawlerCard>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_message: Option<String>,
}

/// Case-insensitive substring match on name; roster order is kept.
pub fn filter_brawlers<'a>(roster: &'a [Brawler], search: &str) -> Vec<&'a Brawler> {
    let needle = search.to_lowercase();
    roster
        .iter()
        .filter(|b| needle.is_empty() || b.name.to_lowercase().contains(&needle))
        .collect()
}

/// Stable sort: numeric keys descend, names ascend, ties keep roster order.
pub fn sort_brawlers(brawlers: &mut [&Brawler], key: SortKey) {
    match key {
        SortKey::Roster => {}
        SortKey::Name => brawlers.sort_by_key(|b| b.name.to_lowercase()),
        SortKey::Trophies => brawlers.sort_by(|a, b| b.trophies.cmp(&a.trophies)),
        SortKey::HighestTrophies => {
            brawlers.sort_by(|a, b| b.highest_trophies.cmp(&a.highest_trophies))
        }
        SortKey::Power => brawlers.sort_by(|a, b| b.power.cmp(&a.power)),
        SortKey::Rank => brawlers.sort_by(|a, b| b.rank.cmp(&a.rank)),
    }
}

pub fn build_gallery(player: &Player, query: &GalleryQuery) -> Gallery {
    let mut matched = filter_brawlers(&player.brawlers, &query.search);
    sort_brawlers(&mut matched, query.sort);

    let columns = query.columns.count();
    let cards: Vec<BrawlerCard> = matched.iter().map(|b| BrawlerCard::from(*b)).collect();
    let empty_message = cards
        .is_empty()
        .then(|| format!("No brawlers found for \"{}\"", query.search));

    Gallery {
        columns,
        total: player.brawlers.len(),
        matched: cards.len(),
        rows: cards.chunks(columns).map(<[BrawlerCard]>::to_vec).collect(),
        empty_message,
    }
}

pub fn brawler_detail(player: &Player, id: BrawlerId) -> Option<BrawlerCard> {
    player.brawler(id).map(BrawlerCard::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn brawler(id: u32, name: &str, trophies: u32, power: u32, rank: u32) -> Brawler {
        Brawler {
            id,
            name: name.to_string(),
            trophies,
            highest_trophies: trophies,
            power,
            rank,
            ..Brawler::default()
        }
    }

    fn player() -> Player {
        Player {
            brawlers: vec![
                brawler(1, "SHELLY", 700, 11, 30),
                brawler(2, "COLT", 900, 9, 25),
                brawler(3, "EL PRIMO", 700, 11, 20),
                brawler(4, "BULL", 300, 3, 10),
                brawler(5, "CROW", 1200, 11, 35),
            ],
            ..Player::default()
        }
    }

    fn ids(gallery: &Gallery) -> Vec<u32> {
        gallery.rows.iter().flatten().map(|card| card.id).collect()
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let player = player();
        let found = filter_brawlers(&player.brawlers, "eL");
        let names: Vec<_> = found.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, ["SHELLY", "EL PRIMO"]);
        assert_eq!(filter_brawlers(&player.brawlers, "").len(), 5);
    }

    #[test]
    fn sort_is_stable_and_descending_for_numbers() {
        let player = player();
        let query = GalleryQuery {
            sort: SortKey::Trophies,
            ..GalleryQuery::default()
        };
        assert_eq!(ids(&build_gallery(&player, &query)), [5, 2, 1, 3, 4]);

        let query = GalleryQuery {
            sort: SortKey::Power,
            ..GalleryQuery::default()
        };
        assert_eq!(ids(&build_gallery(&player, &query)), [1, 3, 5, 2, 4]);

        let query = GalleryQuery {
            sort: SortKey::Name,
            ..GalleryQuery::default()
        };
        assert_eq!(ids(&build_gallery(&player, &query)), [4, 2, 5, 3, 1]);
    }

    #[test]
    fn rows_are_chunked_by_columns() {
        let player = player();
        let gallery = build_gallery(
            &player,
            &GalleryQuery {
                columns: Columns::Two,
                ..GalleryQuery::default()
            },
        );
        let widths: Vec<_> = gallery.rows.iter().map(Vec::len).collect();
        assert_eq!(widths, [2, 2, 1]);

        let gallery = build_gallery(&player, &GalleryQuery::default());
        let widths: Vec<_> = gallery.rows.iter().map(Vec::len).collect();
        assert_eq!(widths, [3, 2]);
        assert!(gallery.empty_message.is_none());
    }

    #[test]
    fn no_match_carries_message() {
        let gallery = build_gallery(
            &player(),
            &GalleryQuery {
                search: "mortis".to_string(),
                ..GalleryQuery::default()
            },
        );
        assert_eq!(gallery.matched, 0);
        assert_eq!(gallery.total, 5);
        assert!(gallery.rows.is_empty());
        assert_eq!(
            gallery.empty_message.as_deref(),
            Some("No brawlers found for \"mortis\"")
        );
    }

    #[test]
    fn query_parts_parse_and_reject_unknowns() {
        assert_eq!("Highest".parse::<SortKey>(), Ok(SortKey::HighestTrophies));
        assert_eq!("".parse::<SortKey>(), Ok(SortKey::Roster));
        assert!(matches!(
            "speed".parse::<SortKey>(),
            Err(GalleryError::UnknownSortKey(_))
        ));
        assert_eq!("2".parse::<Columns>(), Ok(Columns::Two));
        assert!(matches!(
            "4".parse::<Columns>(),
            Err(GalleryError::UnsupportedColumns(_))
        ));
    }

    #[test]
    fn detail_card_projects_display_fields() {
        let card = brawler_detail(&player(), 5).expect("crow should be present");
        assert_eq!(card.power_label, "11");
        assert_eq!(card.rank_tier, RankTier::Legendary);
        assert_eq!(card.rank_color, "#ff6b6b");
        assert!(!card.has_upgrades);
        assert!(brawler_detail(&player(), 99).is_none());
    }
}
