use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Screen-space rectangle and live stats of one tower, as reported by the game.
///
/// `x`/`y` is the top-left corner in metadata space, `scale_x`/`scale_y` the
/// extent. Field names follow the game's serializer and must stay in sync.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct TowerMeta {
    pub x: f32,
    pub y: f32,
    pub scale_x: f32,
    pub scale_y: f32,
    pub attack: f32,
    pub cool_down: f32,
    pub fire_rate: f32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct TowerInfo {
    pub items: Vec<TowerMeta>,
}

/// Per enemy type stats shown in the wave panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct EnemyInformation {
    pub enemy_name: String,
    pub health: f32,
    pub speed: f32,
    pub attack: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct EnemyPosition {
    pub enemy_name: String,
    pub x: f32,
    pub y: f32,
    pub scale_x: f32,
    pub scale_y: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EnemyInfo {
    pub info: Vec<EnemyInformation>,
    pub enemies: Vec<EnemyPosition>,
    pub wave_number: i64,
}

impl Default for EnemyInfo {
    fn default() -> Self {
        Self {
            info: Vec::new(),
            enemies: Vec::new(),
            wave_number: -1,
        }
    }
}

/// Metadata for a single video frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct FrameMeta {
    pub enemy_info: EnemyInfo,
    pub tower_info: TowerInfo,
}

impl FrameMeta {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse frame metadata")
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).context("Failed to serialize frame metadata")
    }
}
