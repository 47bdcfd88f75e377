//! Generation loop driving the genetic algorithm.

use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use flapnet_network::{Fingerprint, NeuralNetwork};
use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg32;
use rayon::{ThreadPool, ThreadPoolBuildError, ThreadPoolBuilder};

use crate::{
    config::{TrainingConfig, TrainingConfigError},
    convergence::ConvergenceTracker,
    evaluator::FitnessEvaluator,
    genetic::{Individual, Population, PopulationEvolver},
    stats::FitnessStats,
};

/// Error returned by [`Trainer::new`].
#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum TrainerError {
    #[display("invalid training config: {_0}")]
    Config(TrainingConfigError),
    #[display("failed to build evaluation pool: {_0}")]
    Pool(ThreadPoolBuildError),
}

/// Summary of one finished generation.
#[derive(Debug, Clone)]
pub struct GenerationReport {
    /// Zero-based index of the generation
    pub generation: usize,
    /// Configured number of generations
    pub generations: usize,
    pub best_fitness: f64,
    /// Last network output of the best candidate
    pub best_last_output: f64,
    pub best_gene: Fingerprint,
    /// Rate used to mutate this generation's offspring
    pub mutation_rate: f64,
    pub stats: FitnessStats,
    /// Number of evaluations stopped by the step budget
    pub exhausted: usize,
    /// Whether a candidate exceeded the success threshold
    pub succeeded: bool,
}

/// Result of a complete training run.
#[derive(Debug, Clone)]
pub struct TrainingOutcome {
    /// Best network of the last evaluated generation
    pub network: Arc<NeuralNetwork>,
    pub fitness: f64,
    pub generations_run: usize,
    pub succeeded: bool,
    pub elapsed: Duration,
}

/// Evolves a population according to a [`TrainingConfig`].
#[derive(Debug)]
pub struct Trainer {
    config: TrainingConfig,
    pool: ThreadPool,
    rng: Pcg32,
}

impl Trainer {
    /// Validates `config` and prepares the evaluation pool.
    pub fn new(config: TrainingConfig) -> Result<Self, TrainerError> {
        config.validate()?;
        let pool = ThreadPoolBuilder::new()
            .num_threads(config.concurrency)
            .thread_name(|i| format!("flapnet-eval-{i}"))
            .build()?;
        let seed = config.seed.unwrap_or_else(|| rand::rng().random());
        log::debug!("breeding seed: {seed}");
        Ok(Self {
            config,
            pool,
            rng: Pcg32::seed_from_u64(seed),
        })
    }

    #[must_use]
    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// Runs the generation loop, calling `on_generation` after each one.
    ///
    /// Every generation is evaluated in worlds seeded with its index. The run
    /// stops after the configured number of generations or after the first
    /// generation in which a candidate exceeds the success threshold.
    pub fn run<F>(&mut self, mut on_generation: F) -> TrainingOutcome
    where
        F: FnMut(&GenerationReport),
    {
        let TrainingConfig {
            population_size,
            generations,
            ref topology,
            base_mutation,
            score_mutation,
            max_steps,
            success_threshold,
            ref simulation,
            ..
        } = self.config;

        let start = Instant::now();
        let evaluator = FitnessEvaluator::new(simulation.clone(), max_steps, success_threshold);
        let mut tracker = ConvergenceTracker::new(base_mutation, score_mutation);
        let mut population = Population::random(population_size, topology, &mut self.rng);
        let mut champion = Arc::clone(population.individuals()[0].network());
        let mut champion_fitness = f64::MIN;
        let mut generations_run = 0;
        let mut succeeded = false;

        for generation in 0..generations {
            let mutation_rate = tracker.mutation_rate();
            population.evaluate_fitness(&evaluator, &self.pool, generation as u64);
            generations_run = generation + 1;

            let individuals = population.individuals();
            let best = &individuals[0];
            let best_eval = *best.evaluation().expect("population was just evaluated");
            let stats = FitnessStats::new(individuals.iter().map(Individual::fitness))
                .expect("population is never empty");
            let exhausted = individuals
                .iter()
                .filter(|i| i.evaluation().is_some_and(|e| e.outcome.is_step_budget_exhausted()))
                .count();
            succeeded = individuals
                .iter()
                .any(|i| i.evaluation().is_some_and(|e| e.outcome.is_succeeded()));

            champion = Arc::clone(best.network());
            champion_fitness = best_eval.fitness;
            let best_gene = best.gene().clone();

            if !succeeded && generation + 1 < generations {
                population = PopulationEvolver::new(population_size, mutation_rate)
                    .evolve(&population, &mut self.rng);
            }
            tracker.observe(&best_gene, best_eval.fitness);

            on_generation(&GenerationReport {
                generation,
                generations,
                best_fitness: best_eval.fitness,
                best_last_output: best_eval.last_output,
                best_gene,
                mutation_rate,
                stats,
                exhausted,
                succeeded,
            });

            if succeeded {
                log::info!(
                    "fitness {champion_fitness:.4} exceeds {success_threshold}, ending training"
                );
                break;
            }
        }

        TrainingOutcome {
            network: champion,
            fitness: champion_fitness,
            generations_run,
            succeeded,
            elapsed: start.elapsed(),
        }
    }
}

#[cfg(test)]
mod tests {
    use flapnet_engine::SimulationConfig;

    use super::*;

    fn small_config() -> TrainingConfig {
        TrainingConfig {
            population_size: 12,
            generations: 3,
            topology: vec![6, 4, 1],
            concurrency: 2,
            max_steps: 5_000,
            seed: Some(42),
            ..TrainingConfig::default()
        }
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = TrainingConfig {
            population_size: 0,
            ..small_config()
        };
        assert!(matches!(
            Trainer::new(config),
            Err(TrainerError::Config(TrainingConfigError::EmptyPopulation))
        ));
    }

    #[test]
    fn test_runs_all_generations() {
        let mut trainer = Trainer::new(small_config()).unwrap();
        let mut reports = vec![];
        let outcome = trainer.run(|report| reports.push(report.clone()));

        assert!(!outcome.succeeded);
        assert_eq!(outcome.generations_run, 3);
        assert_eq!(reports.len(), 3);
        for (i, report) in reports.iter().enumerate() {
            assert_eq!(report.generation, i);
            assert_eq!(report.generations, 3);
            assert_eq!(report.best_fitness, report.stats.max);
            assert!(report.stats.min <= report.stats.mean);
            assert!(report.mutation_rate >= 3.0);
        }
        assert_eq!(reports[0].mutation_rate, 3.0);
        assert_eq!(outcome.fitness, reports[2].best_fitness);
        assert_eq!(outcome.network.layer_sizes(), &[6, 4, 1]);
    }

    #[test]
    fn test_stops_after_successful_generation() {
        let config = TrainingConfig {
            // the proximity bonus alone exceeds this
            success_threshold: 0.0,
            generations: 10,
            ..small_config()
        };
        let mut trainer = Trainer::new(config).unwrap();
        let mut reports = vec![];
        let outcome = trainer.run(|report| reports.push(report.clone()));

        assert!(outcome.succeeded);
        assert_eq!(outcome.generations_run, 1);
        assert_eq!(reports.len(), 1);
        assert!(reports[0].succeeded);
    }

    #[test]
    fn test_step_budget_is_reported() {
        let config = TrainingConfig {
            max_steps: 10,
            generations: 1,
            simulation: SimulationConfig {
                gravity: 0.0,
                ..SimulationConfig::default()
            },
            ..small_config()
        };
        let mut trainer = Trainer::new(config).unwrap();
        let mut exhausted = 0;
        trainer.run(|report| exhausted = report.exhausted);
        // networks that never jump hover until the budget runs out
        assert!(exhausted > 0);
    }
}
