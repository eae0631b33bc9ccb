//! Arena demo configuration

use scene_engine::config::{Config, ConfigError, EngineConfig};
use scene_engine::foundation::math::{utils, Vec2};
use serde::{Deserialize, Serialize};

/// Rectangle actors may roam; anything on or past an edge is out
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldBounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl WorldBounds {
    pub fn contains(&self, point: Vec2) -> bool {
        point.x > self.min.x && point.x < self.max.x && point.y > self.min.y && point.y < self.max.y
    }
}

impl Default for WorldBounds {
    fn default() -> Self {
        Self {
            min: Vec2::new(-100.0, -100.0),
            max: Vec2::new(900.0, 900.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub start: Vec2,
    /// World units per second
    pub speed: f32,
    pub radius: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            start: Vec2::new(400.0, 300.0),
            speed: 120.0,
            radius: 8.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    pub count: usize,
    pub speed: f32,
    pub radius: f32,
    /// How far an enemy can see the player
    pub sight_distance: f32,
    /// Half-angle of the view cone, in degrees
    pub view_angle_degrees: f32,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            count: 4,
            speed: 60.0,
            radius: 7.0,
            sight_distance: 300.0,
            view_angle_degrees: 45.0,
        }
    }
}

impl EnemyConfig {
    pub fn view_angle(&self) -> f32 {
        utils::deg_to_rad(self.view_angle_degrees)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BulletConfig {
    pub speed: f32,
    pub radius: f32,
}

impl Default for BulletConfig {
    fn default() -> Self {
        Self { speed: 400.0, radius: 5.0 }
    }
}

/// Everything the arena binary reads at startup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    pub engine: EngineConfig,
    pub bounds: WorldBounds,
    pub player: PlayerConfig,
    pub enemy: EnemyConfig,
    pub bullet: BulletConfig,
    /// Seed for enemy placement
    pub seed: u64,
    /// Console grid the final frame is printed on
    pub grid_columns: usize,
    pub grid_rows: usize,
    /// World units per console cell
    pub cell_size: f32,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            engine: EngineConfig::headless(0.05, 200),
            bounds: WorldBounds::default(),
            player: PlayerConfig::default(),
            enemy: EnemyConfig::default(),
            bullet: BulletConfig::default(),
            seed: 7,
            grid_columns: 80,
            grid_rows: 30,
            cell_size: 10.0,
        }
    }
}

impl ArenaConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.engine.validate()?;
        if self.bounds.min.x >= self.bounds.max.x || self.bounds.min.y >= self.bounds.max.y {
            return Err(ConfigError::Invalid {
                field: "bounds",
                reason: "min must be below max on both axes".to_string(),
            });
        }
        if !self.bounds.contains(self.player.start) {
            return Err(ConfigError::Invalid {
                field: "player.start",
                reason: "player must start inside the bounds".to_string(),
            });
        }
        if self.cell_size <= 0.0 {
            return Err(ConfigError::Invalid {
                field: "cell_size",
                reason: format!("must be positive, got {}", self.cell_size),
            });
        }
        Ok(())
    }
}

impl Config for ArenaConfig {}
