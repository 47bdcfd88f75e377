use std::{fmt, sync::Arc};

use super::JumpPolicy;

/// Who decides when an actor jumps.
#[derive(Clone, derive_more::IsVariant)]
pub enum Controller {
    /// Jumps only when [`Actor::request_jump`] is called, e.g. from keyboard input.
    Manual,
    /// Asks the policy every step.
    Policy(Arc<dyn JumpPolicy>),
}

impl fmt::Debug for Controller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Manual => f.write_str("Manual"),
            Self::Policy(_) => f.write_str("Policy(..)"),
        }
    }
}

/// A single flying actor.
///
/// Actors start alive and die when they leave the play field or hit an
/// obstacle. Death is permanent unless godmode is enabled, which keeps the
/// actor alive and stops it from falling below the godmode floor.
#[derive(Debug, Clone)]
pub struct Actor {
    y: f64,
    velocity: f64,
    alive: bool,
    score: usize,
    godmode: bool,
    pending_action: f64,
    last_output: f64,
    controller: Controller,
}

impl Actor {
    #[must_use]
    pub fn new(controller: Controller, y: f64) -> Self {
        Self {
            y,
            velocity: 0.0,
            alive: true,
            score: 0,
            godmode: false,
            pending_action: 0.0,
            last_output: 0.0,
            controller,
        }
    }

    /// Vertical position of the top edge.
    #[must_use]
    pub fn y(&self) -> f64 {
        self.y
    }

    #[must_use]
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Number of obstacles passed while alive.
    #[must_use]
    pub fn score(&self) -> usize {
        self.score
    }

    #[must_use]
    pub fn is_godmode(&self) -> bool {
        self.godmode
    }

    /// Most recent policy activation; `0.0` for manual actors.
    #[must_use]
    pub fn last_output(&self) -> f64 {
        self.last_output
    }

    #[must_use]
    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    /// Asks the actor to jump on the next step.
    pub fn request_jump(&mut self) {
        self.pending_action = 1.0;
    }

    pub fn set_godmode(&mut self, godmode: bool) {
        self.godmode = godmode;
    }

    pub fn toggle_godmode(&mut self) {
        self.godmode = !self.godmode;
    }

    pub(crate) fn reset(&mut self, y: f64) {
        self.y = y;
        self.velocity = 0.0;
        self.alive = true;
        self.score = 0;
        self.pending_action = 0.0;
        self.last_output = 0.0;
    }

    pub(crate) fn kill(&mut self) {
        if !self.godmode {
            self.alive = false;
        }
    }

    pub(crate) fn award_pass(&mut self) {
        if self.alive {
            self.score += 1;
        }
    }

    /// Applies physics and the jump decision for one step.
    ///
    /// `sense` is only evaluated for policy-controlled actors outside godmode;
    /// a godmode actor only jumps on [`Self::request_jump`].
    pub(crate) fn update<F>(&mut self, gravity: f64, godmode_floor: f64, sense: F)
    where
        F: FnOnce(&Self) -> super::Sensors,
    {
        if self.godmode {
            self.alive = true;
        }
        if !self.alive {
            return;
        }

        self.y += self.velocity;
        self.velocity += gravity;
        if self.godmode && self.y > godmode_floor {
            self.y = godmode_floor;
            self.velocity = 0.0;
        }

        if let Controller::Policy(policy) = &self.controller
            && !self.godmode
        {
            let output = policy.jump_activation(&sense(self));
            self.pending_action = output;
            self.last_output = output;
        }
    }

    /// Consumes the pending action, returning whether it triggers a jump.
    pub(crate) fn take_jump(&mut self, threshold: f64, jump_velocity: f64) -> bool {
        if !self.alive || self.pending_action <= threshold {
            return false;
        }
        self.velocity = jump_velocity;
        self.pending_action = 0.0;
        true
    }
}
