//! Engine-independent model of the gameplay overlay.
//!
//! Frame metadata arrives from the relay; the scene turns it plus pointer
//! input into a description of the sprites, labels and bars to draw over the
//! video.

pub mod frame_file;
pub mod frame_log;
pub mod frame_meta;
pub mod input;
pub mod rect;
pub mod scene;
pub mod screen;
pub mod stat_bar;
pub mod tower_panel;
pub mod wave_panel;
