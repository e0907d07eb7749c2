use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SettingField {
    Height,
    Width,
    Bombs,
}

/// Edits typed into the settings inputs but not applied yet.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingSettings {
    pub height: Option<Coord>,
    pub width: Option<Coord>,
    pub bombs: Option<CellCount>,
}

impl PendingSettings {
    pub const fn is_empty(&self) -> bool {
        self.height.is_none() && self.width.is_none() && self.bombs.is_none()
    }

    /// `base` with every staged field overriding it.
    pub fn overlay(&self, base: GameConfig) -> GameConfig {
        GameConfig::new_unchecked(
            self.height.unwrap_or(base.height),
            self.width.unwrap_or(base.width),
            self.bombs.unwrap_or(base.bombs),
        )
    }
}

/// Committed configuration plus staged edits, for a settings form in front of the engine.
///
/// The engine only ever sees committed configurations. Staged values may be invalid, they are
/// checked on [`SettingsStage::commit`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsStage {
    committed: GameConfig,
    staged: PendingSettings,
}

impl SettingsStage {
    pub fn new(committed: GameConfig) -> Result<Self> {
        committed.validate()?;
        Ok(Self {
            committed,
            staged: PendingSettings::default(),
        })
    }

    pub fn committed(&self) -> GameConfig {
        self.committed
    }

    pub fn staged(&self) -> PendingSettings {
        self.staged
    }

    /// Values a form should display: committed ones unless an edit is staged.
    pub fn effective(&self) -> GameConfig {
        self.staged.overlay(self.committed)
    }

    pub fn has_staged_changes(&self) -> bool {
        !self.staged.is_empty()
    }

    /// Stages a raw input value, saturating it into the field's range.
    pub fn stage(&mut self, field: SettingField, value: u32) {
        match field {
            SettingField::Height => {
                self.staged.height = Some(value.try_into().unwrap_or(Coord::MAX));
            }
            SettingField::Width => {
                self.staged.width = Some(value.try_into().unwrap_or(Coord::MAX));
            }
            SettingField::Bombs => {
                self.staged.bombs = Some(value.try_into().unwrap_or(CellCount::MAX));
            }
        }
    }

    /// Applies staged edits and returns the configuration to reset the engine with.
    ///
    /// On error nothing changes, the staged edits stay for the user to fix.
    pub fn commit(&mut self) -> Result<GameConfig> {
        let config = self.effective();
        config.validate()?;
        log::debug!(
            "Committed settings {}x{} with {} mines",
            config.height,
            config.width,
            config.bombs
        );
        self.committed = config;
        self.staged = PendingSettings::default();
        Ok(config)
    }

    pub fn discard(&mut self) {
        self.staged = PendingSettings::default();
    }
}
