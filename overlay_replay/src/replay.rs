use std::collections::HashSet;

use overlay_common::frame_log::FrameLog;
use overlay_common::input::Pointer;
use overlay_common::rect::Point;
use overlay_common::scene::{OverlayScene, SceneSnapshot};
use serde::Serialize;

/// Scripted input for a replay run.
#[derive(Debug, Clone)]
pub struct ReplayScript {
    pub pointer: Point,
    /// Frame numbers on which the pointer clicks (on the frame's last tick).
    pub clicks: HashSet<u64>,
    /// Overlay ticks rendered per metadata frame.
    pub ticks_per_frame: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReplayTick {
    pub frame: u64,
    pub snapshot: SceneSnapshot,
}

/// Feed every logged frame through `scene`, returning the snapshot taken
/// after each frame's last tick.
pub fn replay(frames: &FrameLog, scene: &mut OverlayScene, script: &ReplayScript) -> Vec<ReplayTick> {
    let ticks = script.ticks_per_frame.max(1);
    let mut out = Vec::with_capacity(frames.len());

    for logged in frames.iter() {
        scene.receive(logged.meta.clone());

        for tick in 0..ticks {
            let mut pointer = Pointer {
                position: script.pointer,
                clicked: false,
            };
            if tick + 1 == ticks && script.clicks.contains(&logged.number) {
                pointer = pointer.clicking();
            }
            scene.tick(&pointer);
        }

        let snapshot = scene.snapshot();
        log::info!("{}", summary(logged.number, &snapshot));
        out.push(ReplayTick {
            frame: logged.number,
            snapshot,
        });
    }

    out
}

pub fn summary(frame: u64, snapshot: &SceneSnapshot) -> String {
    let hover = snapshot
        .tower_highlight
        .as_ref()
        .and_then(|h| h.label.lines().next().map(|name| format!("{name}#{}", h.tower)))
        .unwrap_or_else(|| "-".to_string());
    let target = snapshot
        .target
        .as_ref()
        .map(|t| format!("{}#{}", t.name, t.tower))
        .unwrap_or_else(|| "-".to_string());

    format!(
        "frame {frame}: hover={hover} target={target} wave={} cards={} markers={}",
        snapshot.wave_number,
        snapshot.enemy_cards.len(),
        snapshot.enemy_markers.len()
    )
}
