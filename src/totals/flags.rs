//! Per-brawler toggle state supplied by the host UI.
//!
//! Both maps treat an absent id as "nothing set": [`HyperchargeFlags::is_set`] returns
//! `false` and [`BuffyFlags::get`] returns [`Buffies::default`]. JSON keys are brawler ids.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::data::player::BrawlerId;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HyperchargeFlags(HashMap<BrawlerId, bool>);

impl HyperchargeFlags {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_set(&self, id: BrawlerId) -> bool {
        self.0.get(&id).copied().unwrap_or(false)
    }

    pub fn set(&mut self, id: BrawlerId, enabled: bool) {
        self.0.insert(id, enabled);
    }

    /// Flip the flag and return the new value.
    pub fn toggle(&mut self, id: BrawlerId) -> bool {
        let next = !self.is_set(id);
        self.set(id, next);
        next
    }
}

impl FromIterator<(BrawlerId, bool)> for HyperchargeFlags {
    fn from_iter<I: IntoIterator<Item = (BrawlerId, bool)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuffyKind {
    Hyper,
    Gadget,
    StarPower,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Buffies {
    pub hyper: bool,
    pub gadget: bool,
    pub star_power: bool,
}

impl Buffies {
    pub fn all() -> Self {
        Self {
            hyper: true,
            gadget: true,
            star_power: true,
        }
    }

    /// Number of enabled buffies, 0..=3.
    pub fn count(&self) -> u32 {
        u32::from(self.hyper) + u32::from(self.gadget) + u32::from(self.star_power)
    }

    fn slot_mut(&mut self, kind: BuffyKind) -> &mut bool {
        match kind {
            BuffyKind::Hyper => &mut self.hyper,
            BuffyKind::Gadget => &mut self.gadget,
            BuffyKind::StarPower => &mut self.star_power,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BuffyFlags(HashMap<BrawlerId, Buffies>);

impl BuffyFlags {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: BrawlerId) -> Buffies {
        self.0.get(&id).copied().unwrap_or_default()
    }

    pub fn insert(&mut self, id: BrawlerId, buffies: Buffies) {
        self.0.insert(id, buffies);
    }

    pub fn set(&mut self, id: BrawlerId, kind: BuffyKind, enabled: bool) {
        *self.0.entry(id).or_default().slot_mut(kind) = enabled;
    }

    /// Flip one buffy and return the new value.
    pub fn toggle(&mut self, id: BrawlerId, kind: BuffyKind) -> bool {
        let slot = self.0.entry(id).or_default().slot_mut(kind);
        *slot = !*slot;
        *slot
    }
}

impl FromIterator<(BrawlerId, Buffies)> for BuffyFlags {
    fn from_iter<I: IntoIterator<Item = (BrawlerId, Buffies)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Both toggle maps together, as read from a flags file or request body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpgradeFlags {
    pub hypercharges: HyperchargeFlags,
    pub buffies: BuffyFlags,
}
