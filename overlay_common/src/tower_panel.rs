//! Tower highlight, stats label and stat bars.
//!
//! The highlight follows whichever tower is under the pointer. Clicking a
//! hovered tower targets it; the target marker then tracks that tower every
//! frame until the user clicks on empty space.

use serde::{Deserialize, Serialize};

use crate::frame_meta::{TowerInfo, TowerMeta};
use crate::input::Pointer;
use crate::rect::{Point, ScreenRect};
use crate::screen::ScreenMapping;
use crate::stat_bar::{StatBar, TINT_RED, TINT_YELLOW};

/// Ticks the pointer must rest on towers before a click is accepted.
pub const CLICK_DELAY_TICKS: i32 = 20;

pub const HIGHLIGHT_ASSET: &str = "TowerInformationPopup.png";
pub const HIGHLIGHT_ANCHOR: Point = Point { x: 0.4, y: 0.75 };
pub const LABEL_OFFSET: Point = Point { x: -85.0, y: -85.0 };
pub const FIRE_BAR_OFFSET: Point = Point { x: -10.0, y: -63.0 };
pub const ATTACK_BAR_OFFSET: Point = Point { x: -10.0, y: -43.0 };

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TowerPanelConfig {
    pub fire_bar_factor: f32,
    pub attack_bar_factor: f32,
    pub click_delay_ticks: i32,
}

impl Default for TowerPanelConfig {
    fn default() -> Self {
        Self {
            fire_bar_factor: 0.5,
            attack_bar_factor: 0.5,
            click_delay_ticks: CLICK_DELAY_TICKS,
        }
    }
}

/// What the host draws for the highlight when it is visible.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TowerHighlightView {
    pub tower: usize,
    pub asset: String,
    pub position: Point,
    pub anchor: Point,
    pub label: String,
    pub label_offset: Point,
    pub fire_bar: StatBar,
    pub attack_bar: StatBar,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetView {
    pub tower: usize,
    pub name: String,
    pub rect: ScreenRect,
}

#[derive(Debug, Clone)]
pub struct TowerPanel {
    config: TowerPanelConfig,
    mapping: ScreenMapping,
    visible: bool,
    position: Point,
    hovered: Option<usize>,
    label: String,
    fire_bar: StatBar,
    attack_bar: StatBar,
    click_delay: i32,
    target: Option<TargetView>,
}

impl TowerPanel {
    pub fn new(mapping: ScreenMapping, config: TowerPanelConfig) -> Self {
        Self {
            config,
            mapping,
            visible: false,
            position: Point::default(),
            hovered: None,
            label: String::new(),
            fire_bar: StatBar::new(FIRE_BAR_OFFSET, TINT_RED),
            attack_bar: StatBar::new(ATTACK_BAR_OFFSET, TINT_YELLOW),
            click_delay: 0,
            target: None,
        }
    }

    /// Advance one tick against the current frame's towers.
    pub fn update(&mut self, towers: Option<&TowerInfo>, pointer: &Pointer) {
        self.click_delay = self.click_delay.saturating_sub(1);

        let Some(towers) = towers else {
            return;
        };

        // Overlapping towers: the last one in list order wins.
        let mut hovered = None;
        for (idx, tower) in towers.items.iter().enumerate() {
            let rect = self.tower_rect(tower);
            if rect.contains(pointer.position) {
                hovered = Some(idx);
                self.show(rect, tower);
            }
        }
        self.hovered = hovered;

        if hovered.is_none() {
            self.visible = false;
            self.click_delay = self.config.click_delay_ticks;
        }

        if pointer.clicked {
            match hovered {
                Some(idx) if self.click_delay <= 0 => {
                    log::debug!("Targeting tower {idx} ({})", towers.items[idx].name);
                    self.target = Some(self.target_view(idx, &towers.items[idx]));
                    self.click_delay = self.config.click_delay_ticks;
                }
                Some(_) => {}
                None => {
                    if self.target.take().is_some() {
                        log::debug!("Target cleared");
                    }
                }
            }
        }

        if let Some(idx) = self.target.as_ref().map(|t| t.tower) {
            self.target = towers
                .items
                .get(idx)
                .map(|tower| self.target_view(idx, tower));
            if self.target.is_none() {
                log::debug!("Targeted tower {idx} left the frame");
            }
        }
    }

    fn tower_rect(&self, tower: &TowerMeta) -> ScreenRect {
        self.mapping
            .entity_rect(tower.x, tower.y, tower.scale_x, tower.scale_y)
    }

    fn show(&mut self, rect: ScreenRect, tower: &TowerMeta) {
        self.position = rect.origin();
        self.visible = true;
        self.label = format!("{}\nFIRE RATE \nATTACK", tower.name);
        self.fire_bar
            .set_value(tower.fire_rate, self.config.fire_bar_factor);
        self.attack_bar
            .set_value(tower.attack, self.config.attack_bar_factor);
    }

    fn target_view(&self, idx: usize, tower: &TowerMeta) -> TargetView {
        TargetView {
            tower: idx,
            name: tower.name.clone(),
            rect: self.tower_rect(tower),
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn fire_bar(&self) -> &StatBar {
        &self.fire_bar
    }

    pub fn attack_bar(&self) -> &StatBar {
        &self.attack_bar
    }

    pub fn click_delay(&self) -> i32 {
        self.click_delay
    }

    pub fn target(&self) -> Option<&TargetView> {
        self.target.as_ref()
    }

    pub fn highlight_view(&self) -> Option<TowerHighlightView> {
        let tower = self.hovered?;
        if !self.visible {
            return None;
        }
        Some(TowerHighlightView {
            tower,
            asset: HIGHLIGHT_ASSET.to_string(),
            position: self.position,
            anchor: HIGHLIGHT_ANCHOR,
            label: self.label.clone(),
            label_offset: LABEL_OFFSET,
            fire_bar: self.fire_bar,
            attack_bar: self.attack_bar,
        })
    }
}
