//! Fixed-topology feed-forward network.
//!
//! A [`NeuralNetwork`] is a stack of fully connected layers with a sigmoid
//! activation and a single shared bias per layer transition. Networks are
//! value-like: the genetic operators ([`NeuralNetwork::copy_and_mutate`] and
//! [`NeuralNetwork::crossover`]) always build a new instance and never touch
//! their inputs.
//!
//! # Weight Layout
//!
//! Transition `l` connects `layer_sizes[l]` inputs to `layer_sizes[l + 1]`
//! outputs and stores its weights in one flat array, row-major by output:
//! the weight from input `j` to output `i` lives at `i * layer_sizes[l] + j`.
//!
//! # Persistence
//!
//! The type implements `Serialize`/`Deserialize`. Deserialization checks that
//! the arrays match the declared topology, so a loaded network is always safe
//! to run.

use rand::Rng;
use rand_distr::StandardNormal;
use serde::{Deserialize, Serialize};

use crate::{
    activation::sigmoid,
    fingerprint::{self, Fingerprint},
};

/// Error returned when persisted network data does not describe a valid network.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ShapeError {
    #[display("network needs at least 2 layers, got {_0}")]
    TooFewLayers(#[error(not(source))] usize),
    #[display("layer {_0} has zero units")]
    EmptyLayer(#[error(not(source))] usize),
    #[display("expected {expected} weight arrays, got {actual}")]
    WeightLayerCount { expected: usize, actual: usize },
    #[display("expected {expected} biases, got {actual}")]
    BiasCount { expected: usize, actual: usize },
    #[display("weight array {layer} has {actual} entries, expected {expected}")]
    WeightCount {
        layer: usize,
        expected: usize,
        actual: usize,
    },
}

/// A feed-forward neural network with a fixed topology.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "NetworkData")]
pub struct NeuralNetwork {
    layer_sizes: Vec<usize>,
    weights: Vec<Vec<f64>>,
    biases: Vec<f64>,
    gene: Fingerprint,
}

/// Unchecked wire representation, validated into a [`NeuralNetwork`].
#[derive(Deserialize)]
struct NetworkData {
    layer_sizes: Vec<usize>,
    weights: Vec<Vec<f64>>,
    biases: Vec<f64>,
    gene: Fingerprint,
}

impl TryFrom<NetworkData> for NeuralNetwork {
    type Error = ShapeError;

    fn try_from(data: NetworkData) -> Result<Self, Self::Error> {
        let NetworkData {
            layer_sizes,
            weights,
            biases,
            gene,
        } = data;
        check_topology(&layer_sizes)?;

        let transitions = layer_sizes.len() - 1;
        if weights.len() != transitions {
            return Err(ShapeError::WeightLayerCount {
                expected: transitions,
                actual: weights.len(),
            });
        }
        if biases.len() != transitions {
            return Err(ShapeError::BiasCount {
                expected: transitions,
                actual: biases.len(),
            });
        }
        for (layer, (w, sizes)) in weights.iter().zip(layer_sizes.windows(2)).enumerate() {
            let expected = sizes[0] * sizes[1];
            if w.len() != expected {
                return Err(ShapeError::WeightCount {
                    layer,
                    expected,
                    actual: w.len(),
                });
            }
        }

        Ok(Self {
            layer_sizes,
            weights,
            biases,
            gene,
        })
    }
}

fn check_topology(layer_sizes: &[usize]) -> Result<(), ShapeError> {
    if layer_sizes.len() < 2 {
        return Err(ShapeError::TooFewLayers(layer_sizes.len()));
    }
    if let Some(layer) = layer_sizes.iter().position(|&n| n == 0) {
        return Err(ShapeError::EmptyLayer(layer));
    }
    Ok(())
}

impl NeuralNetwork {
    /// Creates a network with zero weights and a random bias in `[-1, 1]` per layer.
    ///
    /// The network receives a fresh fingerprint of
    /// [`fingerprint::DEFAULT_LENGTH`] bits.
    ///
    /// # Panics
    ///
    /// Panics if `layer_sizes` has fewer than two entries or contains a zero.
    pub fn new<R>(layer_sizes: &[usize], rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        if let Err(e) = check_topology(layer_sizes) {
            panic!("invalid network topology {layer_sizes:?}: {e}");
        }
        let weights = layer_sizes
            .windows(2)
            .map(|sizes| vec![0.0; sizes[0] * sizes[1]])
            .collect();
        let biases = (1..layer_sizes.len())
            .map(|_| rng.random_range(-1.0..=1.0))
            .collect();
        Self {
            layer_sizes: layer_sizes.to_vec(),
            weights,
            biases,
            gene: Fingerprint::generate(fingerprint::DEFAULT_LENGTH, rng),
        }
    }

    /// Returns the number of units in each layer, input layer first.
    #[must_use]
    pub fn layer_sizes(&self) -> &[usize] {
        &self.layer_sizes
    }

    /// Returns the flat weight array of every layer transition.
    #[must_use]
    pub fn weights(&self) -> &[Vec<f64>] {
        &self.weights
    }

    /// Returns the bias of every layer transition.
    #[must_use]
    pub fn biases(&self) -> &[f64] {
        &self.biases
    }

    /// Returns the lineage fingerprint.
    #[must_use]
    pub fn gene(&self) -> &Fingerprint {
        &self.gene
    }

    /// Returns the number of inputs [`Self::predict`] expects.
    #[must_use]
    pub fn input_len(&self) -> usize {
        self.layer_sizes[0]
    }

    /// Runs a forward pass and returns the first unit of the output layer.
    ///
    /// # Panics
    ///
    /// Panics if `input.len()` differs from [`Self::input_len`].
    #[must_use]
    pub fn predict(&self, input: &[f64]) -> f64 {
        assert_eq!(
            input.len(),
            self.input_len(),
            "input length does not match network input layer"
        );
        let mut current = input.to_vec();
        for ((weights, bias), sizes) in self
            .weights
            .iter()
            .zip(&self.biases)
            .zip(self.layer_sizes.windows(2))
        {
            let (fan_in, fan_out) = (sizes[0], sizes[1]);
            current = (0..fan_out)
                .map(|i| {
                    let row = &weights[i * fan_in..(i + 1) * fan_in];
                    let sum = bias + row.iter().zip(&current).map(|(w, x)| w * x).sum::<f64>();
                    sigmoid(sum)
                })
                .collect();
        }
        current[0]
    }

    /// Returns a copy with every weight and bias perturbed by `N(0, 1) * rate`.
    ///
    /// The copy receives a mutated fingerprint that differs from this one.
    #[must_use]
    pub fn copy_and_mutate<R>(&self, rate: f64, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        let mut perturb = |v: f64| v + rng.sample::<f64, _>(StandardNormal) * rate;
        let weights = self
            .weights
            .iter()
            .map(|layer| layer.iter().map(|&w| perturb(w)).collect())
            .collect();
        let biases = self.biases.iter().map(|&b| perturb(b)).collect();
        Self {
            layer_sizes: self.layer_sizes.clone(),
            weights,
            biases,
            gene: self.gene.mutate(rng),
        }
    }

    /// Creates a child by single-point crossover of each weight array.
    ///
    /// For every layer transition a split index is drawn uniformly from
    /// `0..len`; weights before it come from `self`, the rest from `partner`.
    /// Each bias is taken from either parent with equal probability.
    ///
    /// # Panics
    ///
    /// Panics if the two networks have different topologies.
    #[must_use]
    pub fn crossover<R>(&self, partner: &Self, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        assert_eq!(
            self.layer_sizes, partner.layer_sizes,
            "crossover requires identical topologies"
        );

        let mut weights = Vec::with_capacity(self.weights.len());
        let mut biases = Vec::with_capacity(self.biases.len());
        for (layer, (mine, theirs)) in self.weights.iter().zip(&partner.weights).enumerate() {
            let split = rng.random_range(0..mine.len());
            let mut child = Vec::with_capacity(mine.len());
            child.extend_from_slice(&mine[..split]);
            child.extend_from_slice(&theirs[split..]);
            weights.push(child);

            biases.push(if rng.random_bool(0.5) {
                self.biases[layer]
            } else {
                partner.biases[layer]
            });
        }

        let gene = self.gene.combine(&partner.gene).unwrap_or_else(|| {
            log::warn!(
                "fingerprint length mismatch in crossover ({} vs {}), assigning a fresh one",
                self.gene,
                partner.gene
            );
            Fingerprint::generate(self.gene.len(), rng)
        });

        Self {
            layer_sizes: self.layer_sizes.clone(),
            weights,
            biases,
            gene,
        }
    }
}
