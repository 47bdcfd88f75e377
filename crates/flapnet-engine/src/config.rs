use serde::{Deserialize, Serialize};

/// Physical constants and drift parameters of a simulated world.
///
/// All distances are in screen units with the origin in the top-left corner
/// and `y` growing downwards. The defaults reproduce the classic game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Width of the play field.
    pub screen_width: f64,
    /// Height of the play field; actors outside `[0, screen_height]` die.
    pub screen_height: f64,
    /// Side length of the square actor bounding box.
    pub actor_size: f64,
    /// Velocity added to every living actor each step.
    pub gravity: f64,
    /// Velocity assigned on a jump (negative is upwards).
    pub jump_velocity: f64,
    /// Jump when the pending action exceeds this value.
    pub jump_threshold: f64,
    /// Horizontal extent of an obstacle.
    pub obstacle_width: f64,
    /// Distance the rightmost obstacle must travel before the next spawns.
    pub obstacle_spacing: f64,
    /// Vertical gap between the upper and lower obstacle halves at the start.
    pub initial_gap_height: f64,
    /// The gap stops shrinking once it reaches this value.
    pub min_gap_height: f64,
    /// Gap shrink per passed obstacle.
    pub gap_height_step: f64,
    /// Horizontal obstacle speed at the start.
    pub initial_speed: f64,
    /// The speed stops growing once it reaches this value.
    pub max_speed: f64,
    /// Speed gain per passed obstacle.
    pub speed_step: f64,
    /// Lowest position a godmode actor can reach.
    pub godmode_floor: f64,
    /// Denominator offset of the proximity bonus in [`World::fitness`](crate::World::fitness).
    pub proximity_epsilon: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            screen_width: 1000.0,
            screen_height: 500.0,
            actor_size: 30.0,
            gravity: 0.5,
            jump_velocity: -8.0,
            jump_threshold: 0.5,
            obstacle_width: 60.0,
            obstacle_spacing: 300.0,
            initial_gap_height: 200.0,
            min_gap_height: 180.0,
            gap_height_step: 0.1,
            initial_speed: 2.0,
            max_speed: 6.0,
            speed_step: 0.1,
            godmode_floor: 475.0,
            proximity_epsilon: 0.001,
        }
    }
}

impl SimulationConfig {
    /// Left edge of every actor; actors share one fixed column.
    #[must_use]
    pub fn actor_left(&self) -> f64 {
        self.actor_size / 2.0
    }

    /// Vertical position actors start from and return to on reset.
    #[must_use]
    pub fn actor_start_y(&self) -> f64 {
        self.screen_height / 2.0
    }
}
