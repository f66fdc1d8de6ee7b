//! Tuning параметры персонажа-волшебника (tuning.ron)
//!
//! Все числа в метрах/секундах. Словарь заклинаний, длина кода и
//! crafting time scale — константы (см. `spell`), сюда НЕ выносятся.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::logger::{log_info, log_warning};

/// Tunable параметры движения, dash и spell grid
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WizardTuning {
    /// Скорость ходьбы (m/s)
    pub move_speed: f32,
    /// Гравитация (m/s², отрицательная)
    pub gravity: f32,
    /// Горизонтальная скорость dash launch (m/s)
    pub dash_speed: f32,
    /// Через сколько секунд после launch гасится velocity
    pub dash_duration: f32,
    /// Через сколько секунд dash снова доступен
    pub dash_cooldown: f32,
    /// Вертикальный offset spawn для Fireball/Frostbolt (метры)
    pub spell_spawn_height: f32,
    /// Расстояние между spell points в grid (метры)
    pub grid_spacing: f32,
    /// Радиус collider'а spell point (метры)
    pub spell_point_radius: f32,
    /// Максимальная длина cursor ray (метры)
    pub cursor_max_distance: f32,
    /// Частота FixedUpdate (Hz)
    pub fixed_hz: f64,
}

impl Default for WizardTuning {
    fn default() -> Self {
        Self {
            move_speed: 5.0,
            gravity: -9.81,
            dash_speed: 10.0,
            dash_duration: 0.2,
            dash_cooldown: 1.0,
            spell_spawn_height: 1.0,
            grid_spacing: 1.2,
            spell_point_radius: 0.35,
            cursor_max_distance: 1000.0,
            fixed_hz: 60.0,
        }
    }
}

impl WizardTuning {
    /// Parse + validate RON строки
    pub fn from_ron_str(contents: &str) -> Result<Self, ConfigError> {
        let tuning: Self = ron::from_str(contents)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn to_ron_string(&self) -> Result<String, ConfigError> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_ron_str(&contents)
    }

    /// Load из файла, при любой ошибке — defaults (с warning в лог)
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            log_info(&format!("Tuning file {} not found, using defaults", path.display()));
            return Self::default();
        }

        match Self::load(path) {
            Ok(tuning) => {
                log_info(&format!("Tuning loaded from {}", path.display()));
                tuning
            }
            Err(e) => {
                log_warning(&format!("Failed to load {}: {}, using defaults", path.display(), e));
                Self::default()
            }
        }
    }

    /// Проверка инвариантов (скорости и длительности > 0)
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("move_speed", self.move_speed),
            ("dash_speed", self.dash_speed),
            ("dash_duration", self.dash_duration),
            ("dash_cooldown", self.dash_cooldown),
            ("grid_spacing", self.grid_spacing),
            ("spell_point_radius", self.spell_point_radius),
            ("cursor_max_distance", self.cursor_max_distance),
        ];

        for (name, value) in positive {
            if !(value > 0.0) {
                return Err(ConfigError::Invalid(format!("{} must be > 0 (got {})", name, value)));
            }
        }

        if !(self.fixed_hz > 0.0) {
            return Err(ConfigError::Invalid(format!("fixed_hz must be > 0 (got {})", self.fixed_hz)));
        }

        if self.dash_cooldown < self.dash_duration {
            // Допустимо: ability re-arm дождётся halt (см. DashAbility::tick)
            log_warning(&format!(
                "dash_cooldown ({}) < dash_duration ({}): re-arm waits for halt",
                self.dash_cooldown, self.dash_duration
            ));
        }

        Ok(())
    }
}

/// Ошибки загрузки tuning
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    Io(String),
    Parse(String),
    Invalid(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(err) => write!(f, "IO error: {}", err),
            ConfigError::Parse(err) => write!(f, "Parse error: {}", err),
            ConfigError::Invalid(msg) => write!(f, "Invalid tuning: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::Io(err.to_string())
    }
}

impl From<ron::error::SpannedError> for ConfigError {
    fn from(err: ron::error::SpannedError) -> Self {
        ConfigError::Parse(err.to_string())
    }
}
