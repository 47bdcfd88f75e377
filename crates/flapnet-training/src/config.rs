use flapnet_engine::{Sensors, SimulationConfig};
use serde::{Deserialize, Serialize};

/// Error returned by [`TrainingConfig::validate`].
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum TrainingConfigError {
    #[display("population size must be at least 1")]
    EmptyPopulation,
    #[display("at least one generation is required")]
    NoGenerations,
    #[display("worker pool size must be at least 1")]
    NoWorkers,
    #[display("step budget must be at least 1")]
    NoSteps,
    #[display("topology {topology:?} must start with {inputs} inputs and end with 1 output")]
    Topology {
        topology: Vec<usize>,
        inputs: usize,
    },
}

/// Hyperparameters of a training run.
///
/// The defaults are the values the trainer was tuned with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    /// Number of candidates per generation.
    pub population_size: usize,
    /// Maximum number of generations.
    pub generations: usize,
    /// Layer sizes of every candidate network.
    pub topology: Vec<usize>,
    /// Mutation rate coefficient of the squared best-gene streak.
    pub base_mutation: f64,
    /// Mutation rate coefficient of the squared best-score streak.
    pub score_mutation: f64,
    /// Number of evaluations running at the same time.
    pub concurrency: usize,
    /// Steps after which an evaluation is stopped even if its actor is alive.
    pub max_steps: u64,
    /// Training stops after the generation in which a candidate exceeds this fitness.
    pub success_threshold: f64,
    /// Seed of the breeding generator; random when absent.
    pub seed: Option<u64>,
    /// World parameters used for every evaluation.
    pub simulation: SimulationConfig,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            population_size: 10_000,
            generations: 100,
            topology: vec![Sensors::LEN, 32, 32, 8, 1],
            base_mutation: 2.0,
            score_mutation: 1.0,
            concurrency: 20,
            max_steps: 3_000_000,
            success_threshold: 50_000.0,
            seed: None,
            simulation: SimulationConfig::default(),
        }
    }
}

impl TrainingConfig {
    /// Checks the settings the trainer cannot run without.
    pub fn validate(&self) -> Result<(), TrainingConfigError> {
        if self.population_size == 0 {
            return Err(TrainingConfigError::EmptyPopulation);
        }
        if self.generations == 0 {
            return Err(TrainingConfigError::NoGenerations);
        }
        if self.concurrency == 0 {
            return Err(TrainingConfigError::NoWorkers);
        }
        if self.max_steps == 0 {
            return Err(TrainingConfigError::NoSteps);
        }
        let valid_topology = self.topology.len() >= 2
            && self.topology.first() == Some(&Sensors::LEN)
            && self.topology.last() == Some(&1)
            && !self.topology.contains(&0);
        if !valid_topology {
            return Err(TrainingConfigError::Topology {
                topology: self.topology.clone(),
                inputs: Sensors::LEN,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert_eq!(TrainingConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_rejects_degenerate_settings() {
        let base = TrainingConfig::default();
        let cases = [
            (
                TrainingConfig {
                    population_size: 0,
                    ..base.clone()
                },
                TrainingConfigError::EmptyPopulation,
            ),
            (
                TrainingConfig {
                    generations: 0,
                    ..base.clone()
                },
                TrainingConfigError::NoGenerations,
            ),
            (
                TrainingConfig {
                    concurrency: 0,
                    ..base.clone()
                },
                TrainingConfigError::NoWorkers,
            ),
            (
                TrainingConfig {
                    max_steps: 0,
                    ..base.clone()
                },
                TrainingConfigError::NoSteps,
            ),
        ];
        for (config, expected) in cases {
            assert_eq!(config.validate(), Err(expected));
        }
    }

    #[test]
    fn test_rejects_bad_topologies() {
        for topology in [vec![6], vec![5, 1], vec![6, 2], vec![6, 0, 1]] {
            let config = TrainingConfig {
                topology: topology.clone(),
                ..TrainingConfig::default()
            };
            assert!(
                matches!(config.validate(), Err(TrainingConfigError::Topology { .. })),
                "{topology:?}"
            );
        }
        let config = TrainingConfig {
            topology: vec![6, 1],
            ..TrainingConfig::default()
        };
        assert_eq!(config.validate(), Ok(()));
    }
}
