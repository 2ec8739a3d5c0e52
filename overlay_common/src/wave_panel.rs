//! Enemy information panel.
//!
//! One card per enemy type in the current wave. Cards are rebuilt whenever the
//! wave number changes; their bars and text track the latest frame. Hovering a
//! card marks every on-screen enemy of that type.

use serde::{Deserialize, Serialize};

use crate::frame_meta::{EnemyInfo, EnemyInformation};
use crate::input::Pointer;
use crate::rect::{Point, ScreenRect};
use crate::screen::ScreenMapping;
use crate::stat_bar::{StatBar, TINT_BLUE, TINT_RED, TINT_YELLOW};

pub const PANEL_ORIGIN: Point = Point { x: 800.0, y: 75.0 };
pub const PANEL_ASSET: &str = "background.png";
pub const PANEL_SCALE: Point = Point { x: 0.35, y: 0.9 };
pub const CARD_MARGIN: f32 = 20.0;
pub const CARD_SPACING: f32 = 100.0;
pub const CARD_TEXT_OFFSET: Point = Point { x: 100.0, y: 10.0 };
pub const HEALTH_BAR_OFFSET: Point = Point { x: -10.0, y: -63.0 };
pub const SPEED_BAR_OFFSET: Point = Point { x: -10.0, y: -43.0 };
pub const ATTACK_BAR_OFFSET: Point = Point { x: -10.0, y: -23.0 };
pub const MARKER_ASSET: &str = "blueorb.png";

const NO_WAVE: i64 = -1;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WavePanelConfig {
    pub origin: Point,
    /// Hit area of a card, measured from its top-left corner.
    pub card_width: f32,
    pub card_height: f32,
    pub bar_factor: f32,
}

impl Default for WavePanelConfig {
    fn default() -> Self {
        Self {
            origin: PANEL_ORIGIN,
            card_width: 200.0,
            card_height: 90.0,
            bar_factor: 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyCard {
    pub enemy_name: String,
    pub asset: String,
    pub position: Point,
    pub text: String,
    pub text_offset: Point,
    pub health_bar: StatBar,
    pub speed_bar: StatBar,
    pub attack_bar: StatBar,
}

impl EnemyCard {
    fn new(position: Point, info: &EnemyInformation, bar_factor: f32) -> Self {
        let mut card = Self {
            enemy_name: info.enemy_name.clone(),
            asset: format!("{}InformationPopup.png", info.enemy_name),
            position,
            text: String::new(),
            text_offset: CARD_TEXT_OFFSET,
            health_bar: StatBar::new(HEALTH_BAR_OFFSET, TINT_RED),
            speed_bar: StatBar::new(SPEED_BAR_OFFSET, TINT_BLUE),
            attack_bar: StatBar::new(ATTACK_BAR_OFFSET, TINT_YELLOW),
        };
        card.refresh(info, bar_factor);
        card
    }

    fn refresh(&mut self, info: &EnemyInformation, bar_factor: f32) {
        self.text = format!(
            "{}\nHealth: {}\nSpeed: {}\nAttack:{}",
            info.enemy_name, info.health, info.speed, info.attack
        );
        self.health_bar.set_value(info.health, bar_factor);
        self.speed_bar.set_value(info.speed, bar_factor);
        self.attack_bar.set_value(info.attack, bar_factor);
    }

    pub fn rect(&self, width: f32, height: f32) -> ScreenRect {
        ScreenRect::from_origin_size(self.position.x, self.position.y, width, height)
    }
}

#[derive(Debug, Clone)]
pub struct WavePanel {
    config: WavePanelConfig,
    mapping: ScreenMapping,
    wave_number: i64,
    cards: Vec<EnemyCard>,
    selected: Option<usize>,
    markers: Vec<Point>,
}

impl WavePanel {
    pub fn new(mapping: ScreenMapping, config: WavePanelConfig) -> Self {
        Self {
            config,
            mapping,
            wave_number: NO_WAVE,
            cards: Vec::new(),
            selected: None,
            markers: Vec::new(),
        }
    }

    pub fn update(&mut self, enemies: Option<&EnemyInfo>, pointer: &Pointer) {
        let Some(enemies) = enemies else {
            return;
        };

        if enemies.wave_number != self.wave_number {
            self.rebuild(enemies);
        }

        for (card, info) in self.cards.iter_mut().zip(&enemies.info) {
            card.refresh(info, self.config.bar_factor);
        }

        let (width, height) = (self.config.card_width, self.config.card_height);
        self.selected = self
            .cards
            .iter()
            .rposition(|card| card.rect(width, height).contains(pointer.position));

        self.markers.clear();
        if let Some(idx) = self.selected {
            let name = &self.cards[idx].enemy_name;
            self.markers.extend(
                enemies
                    .enemies
                    .iter()
                    .filter(|enemy| &enemy.enemy_name == name)
                    .map(|enemy| self.mapping.to_screen(enemy.x, enemy.y)),
            );
        }
    }

    fn rebuild(&mut self, enemies: &EnemyInfo) {
        log::info!(
            "Wave {} -> {}: {} enemy types",
            self.wave_number,
            enemies.wave_number,
            enemies.info.len()
        );

        let origin = self.config.origin;
        self.cards = enemies
            .info
            .iter()
            .enumerate()
            .map(|(i, info)| {
                let position = Point::new(
                    origin.x + CARD_MARGIN,
                    origin.y + CARD_MARGIN + i as f32 * CARD_SPACING,
                );
                EnemyCard::new(position, info, self.config.bar_factor)
            })
            .collect();
        self.wave_number = enemies.wave_number;
        self.selected = None;
    }

    pub fn wave_number(&self) -> i64 {
        self.wave_number
    }

    pub fn cards(&self) -> &[EnemyCard] {
        &self.cards
    }

    pub fn selected(&self) -> Option<&EnemyCard> {
        self.selected.map(|idx| &self.cards[idx])
    }

    pub fn markers(&self) -> &[Point] {
        &self.markers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame_meta::EnemyPosition;

    fn info(name: &str, health: f32) -> EnemyInformation {
        EnemyInformation {
            enemy_name: name.to_string(),
            health,
            speed: 2.0,
            attack: 4.0,
        }
    }

    fn position(name: &str, x: f32, y: f32) -> EnemyPosition {
        EnemyPosition {
            enemy_name: name.to_string(),
            x,
            y,
            scale_x: 100.0,
            scale_y: 100.0,
        }
    }

    fn wave(number: i64) -> EnemyInfo {
        EnemyInfo {
            info: vec![info("Hovertank", 10.0), info("Hovercopter", 6.0)],
            enemies: vec![
                position("Hovertank", 5000.0, 5000.0),
                position("Hovercopter", 2500.0, 7500.0),
                position("Hovertank", 0.0, 10000.0),
            ],
            wave_number: number,
        }
    }

    fn panel() -> WavePanel {
        WavePanel::new(ScreenMapping::default(), WavePanelConfig::default())
    }

    #[test]
    fn test_builds_cards_for_new_wave() {
        let mut panel = panel();
        panel.update(Some(&wave(1)), &Pointer::at(0.0, 0.0));

        assert_eq!(panel.wave_number(), 1);
        let cards = panel.cards();
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].position, Point::new(820.0, 95.0));
        assert_eq!(cards[1].position, Point::new(820.0, 195.0));
        assert_eq!(cards[0].asset, "HovertankInformationPopup.png");
        assert_eq!(cards[0].text, "Hovertank\nHealth: 10\nSpeed: 2\nAttack:4");
        assert_eq!(cards[0].health_bar.length, 5.0);
        assert_eq!(cards[1].speed_bar.tint, TINT_BLUE);
    }

    #[test]
    fn test_same_wave_keeps_cards_but_refreshes_stats() {
        let mut panel = panel();
        panel.update(Some(&wave(1)), &Pointer::at(0.0, 0.0));

        let mut next = wave(1);
        next.info[0].health = 4.0;
        next.info.pop();
        panel.update(Some(&next), &Pointer::at(0.0, 0.0));

        // Card for the dropped entry stays until the wave changes.
        assert_eq!(panel.cards().len(), 2);
        assert_eq!(panel.cards()[0].health_bar.length, 2.0);
        assert_eq!(panel.cards()[1].health_bar.length, 3.0);
    }

    #[test]
    fn test_wave_change_rebuilds() {
        let mut panel = panel();
        panel.update(Some(&wave(1)), &Pointer::at(0.0, 0.0));

        let mut next = wave(2);
        next.info = vec![info("Hoverboss", 50.0)];
        panel.update(Some(&next), &Pointer::at(0.0, 0.0));

        assert_eq!(panel.wave_number(), 2);
        assert_eq!(panel.cards().len(), 1);
        assert_eq!(panel.cards()[0].enemy_name, "Hoverboss");
    }

    #[test]
    fn test_hover_marks_matching_enemies() {
        let mut panel = panel();
        panel.update(Some(&wave(1)), &Pointer::at(850.0, 120.0));

        assert_eq!(panel.selected().unwrap().enemy_name, "Hovertank");
        assert_eq!(
            panel.markers(),
            &[Point::new(512.0, 288.0), Point::new(0.0, 0.0)]
        );
    }

    #[test]
    fn test_markers_cleared_when_pointer_leaves() {
        let mut panel = panel();
        let frame = wave(1);
        panel.update(Some(&frame), &Pointer::at(850.0, 220.0));
        assert_eq!(panel.selected().unwrap().enemy_name, "Hovercopter");
        assert_eq!(panel.markers().len(), 1);

        panel.update(Some(&frame), &Pointer::at(400.0, 400.0));
        assert!(panel.selected().is_none());
        assert!(panel.markers().is_empty());
    }

    #[test]
    fn test_without_frame_nothing_is_built() {
        let mut panel = panel();
        panel.update(None, &Pointer::at(850.0, 120.0));
        assert_eq!(panel.wave_number(), NO_WAVE);
        assert!(panel.cards().is_empty());
    }
}
