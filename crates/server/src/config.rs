//! Server configuration.

use crate::entity::Wall;
use protocol::Vec2D;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Root configuration structure.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub game: GameConfig,
    /// Wall layout, sent to every client during the handshake.
    #[serde(default = "default_walls")]
    pub walls: Vec<WallConfig>,
}

impl Config {
    /// Load configuration from `settings.toml` or use defaults.
    pub fn load() -> anyhow::Result<Self> {
        let path = Path::new("settings.toml");
        if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            let config: Self = toml::from_str(&contents)?;
            config.validate()?;
            Ok(config)
        } else {
            info!("No settings.toml found, creating default config");
            let default_config = Self::default();
            std::fs::write(path, toml::to_string_pretty(&default_config)?)?;
            Ok(default_config)
        }
    }

    /// Reject configurations the simulation cannot run on.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.game.ms_per_frame == 0 {
            anyhow::bail!("game.ms_per_frame must be at least 1");
        }
        for wall in &self.walls {
            if !wall.as_wall().is_axis_aligned() {
                anyhow::bail!("wall {} is not axis-aligned", wall.id);
            }
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            game: GameConfig::default(),
            walls: default_walls(),
        }
    }
}

/// Server networking settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Bind address.
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            bind: default_bind(),
        }
    }
}

fn default_port() -> u16 {
    11000
}
fn default_bind() -> String {
    "0.0.0.0".to_string()
}

/// Simulation settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GameConfig {
    /// Arena size, sent to every client during the handshake.
    #[serde(default = "default_universe_size")]
    pub universe_size: u64,
    /// Tick period in milliseconds.
    #[serde(default = "default_ms_per_frame")]
    pub ms_per_frame: u64,
    /// Ticks between a snake's death and respawn eligibility.
    #[serde(default = "default_respawn_rate")]
    pub respawn_rate: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            universe_size: default_universe_size(),
            ms_per_frame: default_ms_per_frame(),
            respawn_rate: default_respawn_rate(),
        }
    }
}

fn default_universe_size() -> u64 {
    2000
}
fn default_ms_per_frame() -> u64 {
    17
}
fn default_respawn_rate() -> u64 {
    300
}

/// One wall segment endpoint.
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct WallPoint {
    pub x: f64,
    pub y: f64,
}

impl WallPoint {
    pub fn as_vector(&self) -> Vec2D {
        Vec2D::new(self.x, self.y)
    }
}

/// One configured wall. Endpoints must share an axis.
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct WallConfig {
    pub id: u64,
    pub p1: WallPoint,
    pub p2: WallPoint,
}

impl WallConfig {
    pub fn as_wall(&self) -> Wall {
        Wall::new(self.id, self.p1.as_vector(), self.p2.as_vector())
    }
}

fn default_walls() -> Vec<WallConfig> {
    // Border box enclosing the spawn bands and the powerup grid.
    let c = 975.0;
    vec![
        WallConfig {
            id: 1,
            p1: WallPoint { x: -c, y: -c },
            p2: WallPoint { x: c, y: -c },
        },
        WallConfig {
            id: 2,
            p1: WallPoint { x: c, y: -c },
            p2: WallPoint { x: c, y: c },
        },
        WallConfig {
            id: 3,
            p1: WallPoint { x: c, y: c },
            p2: WallPoint { x: -c, y: c },
        },
        WallConfig {
            id: 4,
            p1: WallPoint { x: -c, y: c },
            p2: WallPoint { x: -c, y: -c },
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.walls.len(), 4);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [game]
            universe_size = 500
            "#,
        )
        .unwrap();
        assert_eq!(config.game.universe_size, 500);
        assert_eq!(config.game.ms_per_frame, 17);
        assert_eq!(config.server.port, 11000);
        assert_eq!(config.walls.len(), 4);
    }

    #[test]
    fn test_diagonal_wall_rejected() {
        let config: Config = toml::from_str(
            r#"
            [[walls]]
            id = 9
            p1 = { x = 0.0, y = 0.0 }
            p2 = { x = 10.0, y = 10.0 }
            "#,
        )
        .unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_tick_rejected() {
        let config: Config = toml::from_str(
            r#"
            [game]
            ms_per_frame = 0
            "#,
        )
        .unwrap();
        assert!(config.validate().is_err());
    }
}
