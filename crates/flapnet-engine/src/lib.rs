//! Headless obstacle-avoidance game used to score evolved networks.
//!
//! The crate contains no rendering or input handling. A presentation layer
//! reads [`World`] state (actors, obstacles, score) to draw a frame, and
//! forwards player input through [`Actor::request_jump`],
//! [`Actor::toggle_godmode`] and [`World::reset`].

pub use self::{config::*, engine::*};

mod config;
pub mod core;
pub mod engine;
