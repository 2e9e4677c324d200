//! Shipyard catalog
//!
//! Boats and themes the player can unlock with points.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which list a cosmetic belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CosmeticKind {
    Boat,
    Theme,
}

impl CosmeticKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CosmeticKind::Boat => "boat",
            CosmeticKind::Theme => "theme",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "boat" | "boats" => Some(CosmeticKind::Boat),
            "theme" | "themes" => Some(CosmeticKind::Theme),
            _ => None,
        }
    }
}

impl fmt::Display for CosmeticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A purchasable cosmetic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogItem {
    pub id: &'static str,
    pub name: &'static str,
    /// Price in points (0 = starter item)
    pub cost: u64,
}

/// Boat unlocked for every new player
pub const DEFAULT_BOAT: &str = "classic";
/// Theme unlocked for every new player
pub const DEFAULT_THEME: &str = "sunset";

pub static BOATS: [CatalogItem; 3] = [
    CatalogItem {
        id: DEFAULT_BOAT,
        name: "Classic Sloop",
        cost: 0,
    },
    CatalogItem {
        id: "speed",
        name: "Speedboat",
        cost: 500,
    },
    CatalogItem {
        id: "ship",
        name: "Pirate Ship",
        cost: 1000,
    },
];

pub static THEMES: [CatalogItem; 3] = [
    CatalogItem {
        id: DEFAULT_THEME,
        name: "Sunset",
        cost: 0,
    },
    CatalogItem {
        id: "night",
        name: "Midnight",
        cost: 800,
    },
    CatalogItem {
        id: "storm",
        name: "Stormy",
        cost: 1200,
    },
];

/// Every item of one kind, cheapest first
pub fn items(kind: CosmeticKind) -> &'static [CatalogItem] {
    match kind {
        CosmeticKind::Boat => &BOATS,
        CosmeticKind::Theme => &THEMES,
    }
}

/// Look up an item by id
pub fn find(kind: CosmeticKind, id: &str) -> Option<&'static CatalogItem> {
    items(kind).iter().find(|item| item.id == id)
}
