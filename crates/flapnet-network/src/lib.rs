//! Minimal feed-forward neural network evolved by the flapnet trainer.
//!
//! This crate holds the parts of the system that know nothing about the game:
//!
//! - [`network`] - [`NeuralNetwork`]: construction, prediction, mutation, crossover
//! - [`fingerprint`] - [`Fingerprint`]: lineage identifiers carried by each network
//! - [`activation`] - sigmoid and softmax
//! - [`math`] - scoring and rounding helpers
//!
//! # Example
//!
//! ```
//! use flapnet_network::NeuralNetwork;
//!
//! let mut rng = rand::rng();
//! let parent = NeuralNetwork::new(&[6, 4, 1], &mut rng);
//! let child = parent.copy_and_mutate(0.5, &mut rng);
//!
//! let output = child.predict(&[2.0, 250.0, 0.0, 300.0, 120.0, 320.0]);
//! assert!((0.0..=1.0).contains(&output));
//! assert_ne!(parent.gene(), child.gene());
//! ```

pub use self::{fingerprint::Fingerprint, network::*};

pub mod activation;
pub mod fingerprint;
pub mod math;
pub mod network;
