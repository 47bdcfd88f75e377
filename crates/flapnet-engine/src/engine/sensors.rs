use flapnet_network::NeuralNetwork;

/// What an actor perceives at the start of its decision.
///
/// When no obstacle lies ahead, the distance and both gap bounds are `0.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sensors {
    pub game_speed: f64,
    pub actor_y: f64,
    pub actor_velocity: f64,
    pub obstacle_distance: f64,
    pub gap_top: f64,
    pub gap_bottom: f64,
}

impl Sensors {
    /// Number of values in [`Self::to_array`].
    pub const LEN: usize = 6;

    /// Returns the values in the order networks are trained on.
    #[must_use]
    pub const fn to_array(&self) -> [f64; Self::LEN] {
        [
            self.game_speed,
            self.actor_y,
            self.actor_velocity,
            self.obstacle_distance,
            self.gap_top,
            self.gap_bottom,
        ]
    }
}

/// Decides, from what an actor senses, how strongly it wants to jump.
///
/// The world jumps when the returned activation exceeds
/// [`SimulationConfig::jump_threshold`](crate::SimulationConfig::jump_threshold).
/// Implementations must be pure: the same policy is shared read-only between
/// concurrently running worlds.
pub trait JumpPolicy: Send + Sync {
    fn jump_activation(&self, sensors: &Sensors) -> f64;
}

impl JumpPolicy for NeuralNetwork {
    fn jump_activation(&self, sensors: &Sensors) -> f64 {
        self.predict(&sensors.to_array())
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    #[test]
    fn test_network_policy_uses_sensor_order() {
        let mut rng = Pcg32::seed_from_u64(7);
        let nn = NeuralNetwork::new(&[Sensors::LEN, 4, 1], &mut rng).copy_and_mutate(0.3, &mut rng);
        let sensors = Sensors {
            game_speed: 2.0,
            actor_y: 250.0,
            actor_velocity: -3.0,
            obstacle_distance: 400.0,
            gap_top: 150.0,
            gap_bottom: 350.0,
        };
        let expected = nn.predict(&[2.0, 250.0, -3.0, 400.0, 150.0, 350.0]);
        assert_eq!(nn.jump_activation(&sensors), expected);
    }
}
