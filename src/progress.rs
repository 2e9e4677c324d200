//! Progress ledger
//!
//! Points, daily streak and unlocked cosmetics that persist across sessions.
//! Sessions never touch this directly; the caller hands over a
//! `SessionOutcome` once a run finishes.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::{self, CosmeticKind, DEFAULT_BOAT, DEFAULT_THEME};
use crate::persistence::{KeyValueStore, PersistError, load_versioned, save_versioned};
use crate::settings::{Settings, SettingsPatch};
use crate::sim::SessionOutcome;

/// Storage key for the progress record
pub const STORAGE_KEY: &str = "regatta_progress";
/// Bump when the saved layout changes incompatibly
pub const SAVE_VERSION: u32 = 1;

/// Largest gap (in days) since the last play that still extends the streak
pub const STREAK_GRACE_DAYS: i64 = 2;

/// Points per correct answer on a win, plus the finish bonus
pub const WIN_POINTS_PER_CORRECT: u64 = 10;
pub const WIN_BONUS: u64 = 50;
/// Points per correct answer when the run is lost
pub const LOSS_POINTS_PER_CORRECT: u64 = 5;

/// Shipyard failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PurchaseError {
    #[error("no {kind} named '{id}' in the shipyard")]
    UnknownItem { kind: CosmeticKind, id: String },
    #[error("{kind} '{id}' is already owned")]
    AlreadyOwned { kind: CosmeticKind, id: String },
    #[error("{kind} '{id}' is not owned")]
    NotOwned { kind: CosmeticKind, id: String },
    #[error("need {cost} points, have {available}")]
    InsufficientPoints { cost: u64, available: u64 },
}

impl SessionOutcome {
    /// Points earned by this run
    pub fn points(&self) -> u64 {
        let correct = u64::from(self.correct_count);
        if self.won {
            correct * WIN_POINTS_PER_CORRECT + WIN_BONUS
        } else {
            correct * LOSS_POINTS_PER_CORRECT
        }
    }
}

/// Today's date for streak purposes (UTC)
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Cross-session player progress
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Progress {
    pub points: u64,
    /// Consecutive days played
    pub streak: u32,
    pub last_played_date: Option<NaiveDate>,
    pub unlocked_boats: Vec<String>,
    pub unlocked_themes: Vec<String>,
    pub settings: Settings,
}

impl Default for Progress {
    fn default() -> Self {
        Self {
            points: 0,
            streak: 0,
            last_played_date: None,
            unlocked_boats: vec![DEFAULT_BOAT.to_string()],
            unlocked_themes: vec![DEFAULT_THEME.to_string()],
            settings: Settings::default(),
        }
    }
}

impl Progress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_points(&mut self, amount: u64) {
        self.points = self.points.saturating_add(amount);
    }

    /// Credit a finished run and count today toward the streak.
    /// Returns the points awarded.
    pub fn record_session(&mut self, outcome: &SessionOutcome, today: NaiveDate) -> u64 {
        let earned = outcome.points();
        self.add_points(earned);
        self.update_streak(today);
        log::info!(
            "Recorded {} run: +{} points (total {}), streak {}",
            if outcome.won { "winning" } else { "lost" },
            earned,
            self.points,
            self.streak
        );
        earned
    }

    /// Extend, restart or keep the daily streak
    pub fn update_streak(&mut self, today: NaiveDate) {
        if self.last_played_date == Some(today) {
            return;
        }
        self.streak = match self.last_played_date {
            Some(last) if today.signed_duration_since(last).num_days().abs() <= STREAK_GRACE_DAYS => {
                self.streak + 1
            }
            _ => 1,
        };
        self.last_played_date = Some(today);
    }

    fn unlocked(&self, kind: CosmeticKind) -> &Vec<String> {
        match kind {
            CosmeticKind::Boat => &self.unlocked_boats,
            CosmeticKind::Theme => &self.unlocked_themes,
        }
    }

    fn unlocked_mut(&mut self, kind: CosmeticKind) -> &mut Vec<String> {
        match kind {
            CosmeticKind::Boat => &mut self.unlocked_boats,
            CosmeticKind::Theme => &mut self.unlocked_themes,
        }
    }

    pub fn is_unlocked(&self, kind: CosmeticKind, id: &str) -> bool {
        self.unlocked(kind).iter().any(|owned| owned == id)
    }

    /// Id of the equipped item of `kind`
    pub fn selected(&self, kind: CosmeticKind) -> &str {
        match kind {
            CosmeticKind::Boat => &self.settings.selected_boat,
            CosmeticKind::Theme => &self.settings.selected_theme,
        }
    }

    /// Spend points to unlock a catalog item
    pub fn purchase(&mut self, kind: CosmeticKind, id: &str) -> Result<(), PurchaseError> {
        let item = catalog::find(kind, id).ok_or_else(|| PurchaseError::UnknownItem {
            kind,
            id: id.to_string(),
        })?;
        if self.is_unlocked(kind, id) {
            return Err(PurchaseError::AlreadyOwned {
                kind,
                id: id.to_string(),
            });
        }
        if self.points < item.cost {
            return Err(PurchaseError::InsufficientPoints {
                cost: item.cost,
                available: self.points,
            });
        }

        self.points -= item.cost;
        self.unlocked_mut(kind).push(item.id.to_string());
        log::info!("Unlocked {} '{}' for {} points", kind, item.id, item.cost);
        Ok(())
    }

    /// Equip an owned item
    pub fn select(&mut self, kind: CosmeticKind, id: &str) -> Result<(), PurchaseError> {
        if !self.is_unlocked(kind, id) {
            return Err(PurchaseError::NotOwned {
                kind,
                id: id.to_string(),
            });
        }
        match kind {
            CosmeticKind::Boat => self.settings.selected_boat = id.to_string(),
            CosmeticKind::Theme => self.settings.selected_theme = id.to_string(),
        }
        Ok(())
    }

    /// Shipyard tap: equip if owned, otherwise buy and equip
    pub fn buy_or_select(&mut self, kind: CosmeticKind, id: &str) -> Result<(), PurchaseError> {
        if self.selected(kind) == id {
            return Ok(());
        }
        if !self.is_unlocked(kind, id) {
            self.purchase(kind, id)?;
        }
        self.select(kind, id)
    }

    /// Apply a partial settings change. Unowned cosmetics are skipped.
    pub fn update_settings(&mut self, patch: SettingsPatch) {
        if let Some(volume) = patch.volume {
            self.settings.set_volume(volume);
        }
        for (kind, id) in [
            (CosmeticKind::Boat, patch.selected_boat),
            (CosmeticKind::Theme, patch.selected_theme),
        ] {
            if let Some(id) = id {
                if let Err(e) = self.select(kind, &id) {
                    log::warn!("Ignoring settings change: {e}");
                }
            }
        }
    }

    /// Load from `store`, falling back to a fresh ledger on any problem
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Self {
        match load_versioned::<Self, S>(store, STORAGE_KEY, SAVE_VERSION) {
            Ok(Some(progress)) => {
                log::info!("Loaded progress ({} points)", progress.points);
                progress
            }
            Ok(None) => {
                log::info!("No saved progress, starting fresh");
                Self::new()
            }
            Err(e) => {
                log::warn!("Discarding unreadable progress: {e}");
                Self::new()
            }
        }
    }

    pub fn save<S: KeyValueStore + ?Sized>(&self, store: &mut S) -> Result<(), PersistError> {
        save_versioned(store, STORAGE_KEY, SAVE_VERSION, self)?;
        log::info!("Progress saved");
        Ok(())
    }
}
