//! Movement domain: system modules for locomotion updates.

pub(crate) mod collisions;
pub(crate) mod feedback;
pub(crate) mod input;
pub(crate) mod movement;

pub(crate) use feedback::{log_movement_events, update_mover_sprites};
pub(crate) use input::{read_input, route_input};
pub(crate) use movement::{apply_mover_forces, attach_movers, tick_movers};
