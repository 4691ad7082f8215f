//! Bot tuning parameters.
//!
//! Every number the decision engine depends on lives in [`BotConfig`]. The
//! defaults match the engine's published constants; a RON file can override
//! any subset of fields.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{BotError, Result};

/// Engine speed limit per turn.
pub const MAX_SPEED: i32 = 7;
/// Ship collision radius.
pub const SHIP_RADIUS: f64 = 0.5;
/// Distance from a planet's surface within which docking is allowed.
pub const DOCK_RADIUS: f64 = 4.0;
/// Weapon range.
pub const WEAPON_RADIUS: f64 = 5.0;

/// Navigation tuning shared by one goal's tasks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NavProfile {
    /// Heading correction per attempt, in degrees.
    pub angular_step_deg: f64,
    /// Maximum correction attempts before giving up.
    pub max_corrections: u32,
}

impl NavProfile {
    /// Heading correction per attempt, in radians.
    #[must_use]
    pub fn angular_step_rad(&self) -> f64 {
        self.angular_step_deg.to_radians()
    }
}

/// Complete bot configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    /// Maximum thrust magnitude.
    pub max_speed: i32,
    /// Ship collision radius.
    pub ship_radius: f64,
    /// Docking range beyond a planet's surface.
    pub dock_radius: f64,
    /// Stop distance for a normal (non-kamikaze) attack.
    pub attack_stop_radius: f64,
    /// Predicted end positions closer than `collision_factor * ship_radius` collide.
    pub collision_factor: f64,
    /// Dock requests issued before the dock task gives up waiting.
    pub dock_attempt_limit: u32,
    /// A hostile ship this close to a patrolling ship triggers interception.
    pub enemy_close_radius: f64,
    /// Orbit points closer than this to the map edge flip the sweep.
    pub patrol_padding: f64,
    /// Orbit radius beyond the planet's surface.
    pub patrol_orbit_margin: f64,
    /// Sweep angle advanced per turn while patrolling, in degrees.
    pub patrol_sweep_deg: f64,
    /// Every n-th assignment after turn 1 becomes an attack.
    pub attack_period: u64,
    /// Number of turn-1 assignments that mine; later ones defend.
    pub opening_miners: u64,
    /// Navigation tuning for mining goals.
    pub mine_nav: NavProfile,
    /// Navigation tuning for defence goals.
    pub defend_nav: NavProfile,
    /// Navigation tuning for attack goals.
    pub attack_nav: NavProfile,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            max_speed: MAX_SPEED,
            ship_radius: SHIP_RADIUS,
            dock_radius: DOCK_RADIUS,
            attack_stop_radius: WEAPON_RADIUS - 1.0,
            collision_factor: 6.1,
            dock_attempt_limit: 5,
            enemy_close_radius: 40.0,
            patrol_padding: 4.0,
            patrol_orbit_margin: 6.0,
            patrol_sweep_deg: 10.0,
            attack_period: 3,
            opening_miners: 2,
            mine_nav: NavProfile {
                angular_step_deg: 3.0,
                max_corrections: 90,
            },
            defend_nav: NavProfile {
                angular_step_deg: 4.0,
                max_corrections: 90,
            },
            attack_nav: NavProfile {
                angular_step_deg: 5.0,
                max_corrections: 90,
            },
        }
    }
}

impl BotConfig {
    /// Load a config from a RON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| BotError::ConfigRead {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_ron_str(&contents)
    }

    /// Load from a RON string.
    pub fn from_ron_str(ron: &str) -> Result<Self> {
        let config: BotConfig = ron::from_str(ron)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the engine logic cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.max_speed <= 0 {
            return Err(BotError::InvalidConfig(format!(
                "max_speed must be positive, got {}",
                self.max_speed
            )));
        }
        if self.attack_period == 0 {
            return Err(BotError::InvalidConfig(
                "attack_period must be at least 1".to_string(),
            ));
        }
        if self.ship_radius <= 0.0 || self.collision_factor < 0.0 {
            return Err(BotError::InvalidConfig(
                "ship_radius must be positive and collision_factor non-negative".to_string(),
            ));
        }
        Ok(())
    }

    /// Minimum allowed distance between predicted end positions.
    #[must_use]
    pub fn collision_distance(&self) -> f64 {
        self.collision_factor * self.ship_radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_engine_constants() {
        let config = BotConfig::default();
        assert_eq!(config.max_speed, 7);
        assert_eq!(config.dock_attempt_limit, 5);
        assert!((config.collision_distance() - 3.05).abs() < 1e-9);
        assert_eq!(config.mine_nav.max_corrections, 90);
    }

    #[test]
    fn test_shipped_config_matches_defaults() {
        let shipped = BotConfig::from_ron_str(include_str!("../../../config/bot.ron")).unwrap();
        assert_eq!(shipped, BotConfig::default());
    }

    #[test]
    fn test_partial_ron_override() {
        let config = BotConfig::from_ron_str("(max_speed: 5, attack_period: 4)").unwrap();
        assert_eq!(config.max_speed, 5);
        assert_eq!(config.attack_period, 4);
        assert_eq!(config.opening_miners, 2);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = BotConfig::from_ron_str("(attack_period: 0)").unwrap_err();
        assert!(matches!(err, BotError::InvalidConfig(_)));
    }

    #[test]
    fn test_malformed_ron_rejected() {
        let err = BotConfig::from_ron_str("(max_speed: )").unwrap_err();
        assert!(matches!(err, BotError::ConfigParse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bot.ron");
        std::fs::write(&path, "(enemy_close_radius: 25.0)").unwrap();
        let config = BotConfig::load(&path).unwrap();
        assert!((config.enemy_close_radius - 25.0).abs() < 1e-9);

        let missing = BotConfig::load(dir.path().join("missing.ron")).unwrap_err();
        assert!(matches!(missing, BotError::ConfigRead { .. }));
    }
}
