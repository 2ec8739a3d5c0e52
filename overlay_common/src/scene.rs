use serde::{Deserialize, Serialize};

use crate::frame_meta::FrameMeta;
use crate::input::Pointer;
use crate::rect::Point;
use crate::screen::ScreenMapping;
use crate::tower_panel::{TargetView, TowerHighlightView, TowerPanel, TowerPanelConfig};
use crate::wave_panel::{EnemyCard, WavePanel, WavePanelConfig, MARKER_ASSET};

/// Everything the host needs to draw one overlay tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneSnapshot {
    pub frames_received: u64,
    pub tower_highlight: Option<TowerHighlightView>,
    pub target: Option<TargetView>,
    pub wave_number: i64,
    pub enemy_cards: Vec<EnemyCard>,
    pub selected_enemy: Option<String>,
    pub marker_asset: String,
    pub enemy_markers: Vec<Point>,
}

/// Overlay state driven by incoming frame metadata and pointer input.
///
/// Only the most recent frame is kept; every tick reads from it.
#[derive(Debug, Clone)]
pub struct OverlayScene {
    frame: Option<FrameMeta>,
    frames_received: u64,
    towers: TowerPanel,
    waves: WavePanel,
}

impl OverlayScene {
    pub fn new(
        mapping: ScreenMapping,
        tower_config: TowerPanelConfig,
        wave_config: WavePanelConfig,
    ) -> Self {
        Self {
            frame: None,
            frames_received: 0,
            towers: TowerPanel::new(mapping, tower_config),
            waves: WavePanel::new(mapping, wave_config),
        }
    }

    pub fn receive(&mut self, frame: FrameMeta) {
        self.frames_received += 1;
        self.frame = Some(frame);
    }

    pub fn tick(&mut self, pointer: &Pointer) {
        let frame = self.frame.as_ref();
        self.towers.update(frame.map(|f| &f.tower_info), pointer);
        self.waves.update(frame.map(|f| &f.enemy_info), pointer);
    }

    pub fn frame(&self) -> Option<&FrameMeta> {
        self.frame.as_ref()
    }

    pub fn towers(&self) -> &TowerPanel {
        &self.towers
    }

    pub fn waves(&self) -> &WavePanel {
        &self.waves
    }

    pub fn snapshot(&self) -> SceneSnapshot {
        SceneSnapshot {
            frames_received: self.frames_received,
            tower_highlight: self.towers.highlight_view(),
            target: self.towers.target().cloned(),
            wave_number: self.waves.wave_number(),
            enemy_cards: self.waves.cards().to_vec(),
            selected_enemy: self.waves.selected().map(|card| card.enemy_name.clone()),
            marker_asset: MARKER_ASSET.to_string(),
            enemy_markers: self.waves.markers().to_vec(),
        }
    }
}

impl Default for OverlayScene {
    fn default() -> Self {
        Self::new(
            ScreenMapping::default(),
            TowerPanelConfig::default(),
            WavePanelConfig::default(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: &str = r#"{
        "towerInfo": {"items": [
            {"x": 1000, "y": 6000, "scaleX": 1000, "scaleY": 1000,
             "attack": 3, "coolDown": 1, "fireRate": 2, "name": "Cannon"}
        ]},
        "enemyInfo": {
            "info": [{"enemyName": "Hovertank", "health": 10, "speed": 2, "attack": 4}],
            "enemies": [{"enemyName": "Hovertank", "x": 5000, "y": 5000, "scaleX": 100, "scaleY": 100}],
            "waveNumber": 1
        }
    }"#;

    #[test]
    fn test_tick_before_any_frame_is_empty() {
        let mut scene = OverlayScene::default();
        scene.tick(&Pointer::at(150.0, 250.0));

        let snapshot = scene.snapshot();
        assert_eq!(snapshot.frames_received, 0);
        assert!(snapshot.tower_highlight.is_none());
        assert!(snapshot.enemy_cards.is_empty());
        assert_eq!(snapshot.wave_number, -1);
    }

    #[test]
    fn test_frame_drives_both_panels() {
        let mut scene = OverlayScene::default();
        scene.receive(FrameMeta::from_json(FRAME).unwrap());
        scene.tick(&Pointer::at(150.0, 250.0));

        let snapshot = scene.snapshot();
        assert_eq!(snapshot.frames_received, 1);
        assert_eq!(snapshot.tower_highlight.unwrap().tower, 0);
        assert_eq!(snapshot.enemy_cards.len(), 1);
        assert_eq!(snapshot.wave_number, 1);
        assert!(snapshot.enemy_markers.is_empty());
    }

    #[test]
    fn test_last_frame_wins() {
        let mut scene = OverlayScene::default();
        scene.receive(FrameMeta::from_json(FRAME).unwrap());
        scene.receive(FrameMeta::default());
        scene.tick(&Pointer::at(150.0, 250.0));

        assert_eq!(scene.snapshot().frames_received, 2);
        assert!(scene.frame().unwrap().tower_info.items.is_empty());
        assert!(!scene.towers().is_visible());
    }

    #[test]
    fn test_snapshot_serializes() {
        let mut scene = OverlayScene::default();
        scene.receive(FrameMeta::from_json(FRAME).unwrap());
        scene.tick(&Pointer::at(850.0, 120.0));

        let json = serde_json::to_string(&scene.snapshot()).unwrap();
        assert!(json.contains("\"selected_enemy\":\"Hovertank\""));
        assert!(json.contains("blueorb.png"));
    }
}
