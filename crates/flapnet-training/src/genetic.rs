//! Genetic algorithm evolving populations of networks.
//!
//! # Algorithm Overview
//!
//! Each generation goes through the same cycle:
//!
//! 1. **Evaluate Fitness** - Every individual flies through a fresh world on a
//!    bounded worker pool; all worlds of a generation share one seed
//! 2. **Rank** - Individuals are stably sorted by fitness, best first
//! 3. **Elitism** - The top tenth (at least one) is carried over unchanged
//! 4. **Crossover** - Half of the remaining slots are filled with children of
//!    elite pairs, two per pair (`p1 x p2` and `p2 x p1`)
//! 5. **Mutation** - The rest are mutated copies of the best non-elites
//!
//! # Slot Layout
//!
//! For a population of `n` with `e` elites and `c = (n - e) / 2` crossover
//! slots, the next generation is laid out as:
//!
//! ```text
//! [0, e)          elites, unchanged
//! [e, e + c)      crossover children of random elite pairs
//! [e + c, n)      slot i holds a mutated copy of ranked individual i - c
//! ```
//!
//! # Parallelization
//!
//! Evaluation spawns one task per individual on a caller-provided rayon
//! [`ThreadPool`], so concurrency is bounded by the pool size rather than the
//! population size. Results travel back through a channel and are only
//! applied after the whole generation has finished.

use std::sync::{Arc, mpsc};

use flapnet_network::{Fingerprint, NeuralNetwork};
use rand::Rng;
use rayon::ThreadPool;

use crate::evaluator::{Evaluation, FitnessEvaluator};

/// One elite slot is reserved per this many individuals.
pub const ELITE_DIVISOR: usize = 10;

/// A candidate network and the result of its latest evaluation.
#[derive(Debug, Clone)]
pub struct Individual {
    network: Arc<NeuralNetwork>,
    evaluation: Option<Evaluation>,
}

impl Individual {
    #[must_use]
    pub fn new(network: NeuralNetwork) -> Self {
        Self {
            network: Arc::new(network),
            evaluation: None,
        }
    }

    #[must_use]
    pub fn network(&self) -> &Arc<NeuralNetwork> {
        &self.network
    }

    #[must_use]
    pub fn gene(&self) -> &Fingerprint {
        self.network.gene()
    }

    /// Returns the latest evaluation, if the individual has been evaluated.
    #[must_use]
    pub fn evaluation(&self) -> Option<&Evaluation> {
        self.evaluation.as_ref()
    }

    /// Fitness of the latest evaluation; `f64::MIN` before the first one.
    #[must_use]
    pub fn fitness(&self) -> f64 {
        self.evaluation.map_or(f64::MIN, |e| e.fitness)
    }
}

/// An evaluation result tagged with the candidate it belongs to.
#[derive(Debug, Clone)]
pub struct ScoredCandidate {
    pub candidate_index: usize,
    pub evaluation: Evaluation,
    pub gene: Fingerprint,
}

/// A population of networks sharing one topology.
#[derive(Debug, Clone)]
pub struct Population {
    individuals: Vec<Individual>,
}

impl Population {
    /// Creates `count` fresh networks with the given topology.
    #[must_use]
    pub fn random<R>(count: usize, topology: &[usize], rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        let individuals = (0..count)
            .map(|_| Individual::new(NeuralNetwork::new(topology, rng)))
            .collect();
        Self { individuals }
    }

    #[must_use]
    pub fn from_individuals(individuals: Vec<Individual>) -> Self {
        Self { individuals }
    }

    /// Returns all individuals; sorted best first after [`Self::evaluate_fitness`].
    #[must_use]
    pub fn individuals(&self) -> &[Individual] {
        &self.individuals
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    /// Evaluates every individual on `pool` in worlds seeded with `seed`.
    ///
    /// Blocks until every evaluation has finished. Results arrive in
    /// completion order, tagged with the candidate index and gene.
    #[must_use]
    pub fn score(
        &self,
        evaluator: &FitnessEvaluator,
        pool: &ThreadPool,
        seed: u64,
    ) -> Vec<ScoredCandidate> {
        let (tx, rx) = mpsc::channel();
        pool.scope(|s| {
            for (candidate_index, ind) in self.individuals.iter().enumerate() {
                let tx = tx.clone();
                let network = Arc::clone(&ind.network);
                s.spawn(move |_| {
                    let gene = network.gene().clone();
                    let evaluation = evaluator.evaluate(network, seed);
                    // the receiver outlives the scope
                    let _ = tx.send(ScoredCandidate {
                        candidate_index,
                        evaluation,
                        gene,
                    });
                });
            }
        });
        drop(tx);
        rx.into_iter().collect()
    }

    /// Evaluates every individual on `pool` in worlds seeded with `seed`, then
    /// ranks the population by fitness, best first.
    ///
    /// Blocks until every evaluation has finished. Ties keep their previous
    /// relative order.
    pub fn evaluate_fitness(&mut self, evaluator: &FitnessEvaluator, pool: &ThreadPool, seed: u64) {
        let mut exhausted = 0;
        for scored in self.score(evaluator, pool, seed) {
            if scored.evaluation.outcome.is_step_budget_exhausted() {
                exhausted += 1;
            }
            let ind = &mut self.individuals[scored.candidate_index];
            debug_assert_eq!(ind.gene(), &scored.gene);
            ind.evaluation = Some(scored.evaluation);
        }
        if exhausted > 0 {
            log::warn!("{exhausted} evaluations hit the step budget");
        }

        self.individuals.sort_by(|a, b| b.fitness().total_cmp(&a.fitness()));
    }

    /// Returns the best individual. Meaningful after [`Self::evaluate_fitness`].
    #[must_use]
    pub fn best(&self) -> Option<&Individual> {
        self.individuals.first()
    }
}

/// Breeds the next generation from a ranked population.
#[derive(Debug, Clone, Copy)]
pub struct PopulationEvolver {
    /// Number of top individuals carried over unchanged
    pub elite_count: usize,
    /// Scale of the Gaussian noise applied to mutated copies
    pub mutation_rate: f64,
}

impl PopulationEvolver {
    /// Creates an evolver reserving a tenth of `population_size` (at least
    /// one) for elites.
    #[must_use]
    pub fn new(population_size: usize, mutation_rate: f64) -> Self {
        Self {
            elite_count: usize::max(1, population_size / ELITE_DIVISOR),
            mutation_rate,
        }
    }

    /// Evolves the population to create the next generation.
    ///
    /// # Panics
    ///
    /// Panics if `population` is not sorted by fitness, best first.
    #[must_use]
    pub fn evolve<R>(&self, population: &Population, rng: &mut R) -> Population
    where
        R: Rng + ?Sized,
    {
        let ranked = &population.individuals;
        assert!(
            ranked.is_sorted_by(|a, b| a.fitness() >= b.fitness()),
            "population must be ranked before breeding"
        );

        let size = ranked.len();
        let elite_count = self.elite_count.min(size);
        let crossover_slots = (size - elite_count) / 2;
        let mut next = Vec::with_capacity(size);

        // elite selection
        let elites = &ranked[..elite_count];
        next.extend(elites.iter().cloned());

        // crossover between random elite pairs
        while next.len() < elite_count + crossover_slots {
            let p1 = &elites[rng.random_range(0..elite_count)].network;
            let p2 = &elites[rng.random_range(0..elite_count)].network;
            next.push(Individual::new(p1.crossover(p2, rng)));
            if next.len() < elite_count + crossover_slots {
                next.push(Individual::new(p2.crossover(p1, rng)));
            }
        }

        // mutated copies of the next best
        for slot in elite_count + crossover_slots..size {
            let source = &ranked[slot - crossover_slots].network;
            next.push(Individual::new(
                source.copy_and_mutate(self.mutation_rate, rng),
            ));
        }

        Population { individuals: next }
    }
}
