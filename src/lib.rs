//! Tight-controls movement for 2D platformer characters.
//!
//! See [`movement`] for the controller and its Bevy plugin.

pub mod movement;
