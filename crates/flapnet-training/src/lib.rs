//! Training system evolving flight controllers with a genetic algorithm.
//!
//! Every candidate is a [`NeuralNetwork`](flapnet_network::NeuralNetwork)
//! that decides when its actor jumps. Candidates are scored by flying through
//! a headless [`World`](flapnet_engine::World) and the best of them are bred
//! into the next generation.
//!
//! # How Training Works
//!
//! 1. **Population** - Create a population of networks with random biases
//! 2. **Evaluation** - Each network flies one actor through a world seeded
//!    with the generation index
//! 3. **Ranking** - Candidates are sorted by fitness, best first
//! 4. **Reproduction** - Elites survive, crossover and mutation fill the rest
//! 5. **Adaptation** - The mutation rate grows while the best candidate stalls
//! 6. **Repeat** - Until the generation limit or the success threshold
//!
//! # Architecture
//!
//! ```text
//! Trainer (generation loop)
//!     ↓ evaluates
//! Population (rayon pool, bounded concurrency)
//!     ↓ scored by
//! FitnessEvaluator (headless world per candidate)
//!     ↓ ranks
//! PopulationEvolver (elitism, crossover, mutation)
//!     ↓ tuned by
//! ConvergenceTracker (streak-based mutation rate)
//! ```
//!
//! See the [`genetic`] module for the breeding details.
//!
//! # Example
//!
//! ```no_run
//! use flapnet_training::{Trainer, TrainingConfig};
//!
//! let config = TrainingConfig {
//!     population_size: 100,
//!     generations: 10,
//!     ..TrainingConfig::default()
//! };
//! let mut trainer = Trainer::new(config)?;
//! let outcome = trainer.run(|report| {
//!     eprintln!("#{}: {:.4}", report.generation, report.best_fitness);
//! });
//! eprintln!("best fitness: {:.4}", outcome.fitness);
//! # Ok::<(), flapnet_training::TrainerError>(())
//! ```

pub use self::{config::*, trainer::*};

mod config;
pub mod convergence;
pub mod evaluator;
pub mod genetic;
pub mod stats;
mod trainer;
