//! Simulation logic stepping actors and obstacles.
//!
//! - [`World`] - the headless game world, one per evaluation
//! - [`Actor`] - a flying actor with its physics state and score
//! - [`Controller`] - manual control or a shared [`JumpPolicy`]
//! - [`Sensors`] - the six values a policy decides from
//!
//! A world is created, stepped until [`World::is_terminated`] and then
//! dropped. Worlds are never shared between threads; the policies they hold
//! are shared read-only through `Arc`.

pub use self::{actor::*, sensors::*, world::*};

mod actor;
mod sensors;
mod world;
