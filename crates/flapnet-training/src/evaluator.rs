//! Fitness evaluation of a single candidate.
//!
//! A candidate is scored by letting its network fly one actor through a fresh
//! headless [`World`] until the actor dies. Fitness is [`World::fitness`]:
//! the number of obstacles passed plus a proximity bonus for how close the
//! actor got to the next one.
//!
//! Two limits end an evaluation early:
//!
//! - **Success threshold** - once fitness exceeds it the candidate is
//!   considered solved and the trainer stops after the current generation
//! - **Step budget** - bounds the latency of an actor that never dies

use std::sync::Arc;

use flapnet_engine::{Controller, SimulationConfig, World};
use flapnet_network::NeuralNetwork;

/// How an evaluation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum EvaluationOutcome {
    /// The actor died.
    Terminated,
    /// Fitness exceeded the success threshold.
    Succeeded,
    /// The step budget ran out while the actor was still alive.
    StepBudgetExhausted,
}

/// Result of evaluating one candidate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    pub fitness: f64,
    /// Network output of the last decision the actor made.
    pub last_output: f64,
    pub steps: u64,
    pub outcome: EvaluationOutcome,
}

/// Plays candidates through headless worlds.
#[derive(Debug, Clone)]
pub struct FitnessEvaluator {
    simulation: SimulationConfig,
    max_steps: u64,
    success_threshold: f64,
}

impl FitnessEvaluator {
    #[must_use]
    pub fn new(simulation: SimulationConfig, max_steps: u64, success_threshold: f64) -> Self {
        Self {
            simulation,
            max_steps,
            success_threshold,
        }
    }

    /// Evaluates `network` in a world seeded with `seed`.
    ///
    /// Worlds built from the same seed spawn the same obstacles, so candidates
    /// evaluated with one seed are compared on equal terms.
    #[must_use]
    pub fn evaluate(&self, network: Arc<NeuralNetwork>, seed: u64) -> Evaluation {
        let mut world = World::new(
            self.simulation.clone(),
            seed,
            [Controller::Policy(network)],
        );

        let outcome = loop {
            if world.is_terminated() {
                break EvaluationOutcome::Terminated;
            }
            if world.steps() >= self.max_steps {
                break EvaluationOutcome::StepBudgetExhausted;
            }
            world.step();
            if world.fitness() > self.success_threshold {
                break EvaluationOutcome::Succeeded;
            }
        };

        Evaluation {
            fitness: world.fitness(),
            last_output: world.actors()[0].last_output(),
            steps: world.steps(),
            outcome,
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    fn network(seed: u64) -> Arc<NeuralNetwork> {
        let mut rng = Pcg32::seed_from_u64(seed);
        Arc::new(NeuralNetwork::new(&[6, 4, 1], &mut rng).copy_and_mutate(1.0, &mut rng))
    }

    #[test]
    fn test_falling_candidate_terminates() {
        let evaluator = FitnessEvaluator::new(SimulationConfig::default(), 100_000, 50_000.0);
        let mut rng = Pcg32::seed_from_u64(0);
        // zero weights give exactly 0.5, which never triggers a jump
        let nn = NeuralNetwork::new(&[6, 4, 1], &mut rng);
        let nn: NeuralNetwork = serde_json::from_value(zeroed_json(&nn)).unwrap();
        let eval = evaluator.evaluate(Arc::new(nn), 0);
        assert_eq!(eval.outcome, EvaluationOutcome::Terminated);
        assert!(eval.steps < 100);
        assert_eq!(eval.last_output, 0.5);
        // no obstacle passed; only the proximity bonus remains
        assert!(eval.fitness > 0.0 && eval.fitness < 1.0);
    }

    fn zeroed_json(nn: &NeuralNetwork) -> serde_json::Value {
        let mut value = serde_json::to_value(nn).unwrap();
        value["biases"] = serde_json::json!(vec![0.0; nn.biases().len()]);
        value
    }

    #[test]
    fn test_step_budget_stops_immortal_candidates() {
        let config = SimulationConfig {
            // without gravity an actor that never jumps hovers forever
            gravity: 0.0,
            screen_width: 10_000.0,
            ..SimulationConfig::default()
        };
        let evaluator = FitnessEvaluator::new(config, 500, 50_000.0);
        let mut rng = Pcg32::seed_from_u64(1);
        let nn = NeuralNetwork::new(&[6, 1], &mut rng);
        let nn: NeuralNetwork = serde_json::from_value(zeroed_json(&nn)).unwrap();
        let eval = evaluator.evaluate(Arc::new(nn), 0);
        assert_eq!(eval.outcome, EvaluationOutcome::StepBudgetExhausted);
        assert_eq!(eval.steps, 500);
    }

    #[test]
    fn test_success_threshold_ends_evaluation() {
        // the proximity bonus alone exceeds a tiny threshold right away
        let evaluator = FitnessEvaluator::new(SimulationConfig::default(), 1_000, 0.0);
        let eval = evaluator.evaluate(network(2), 0);
        assert_eq!(eval.outcome, EvaluationOutcome::Succeeded);
        assert_eq!(eval.steps, 1);
    }

    #[test]
    fn test_same_seed_same_fitness() {
        let evaluator = FitnessEvaluator::new(SimulationConfig::default(), 50_000, 50_000.0);
        let nn = network(3);
        let a = evaluator.evaluate(Arc::clone(&nn), 17);
        let b = evaluator.evaluate(nn, 17);
        assert_eq!(a, b);
    }
}
