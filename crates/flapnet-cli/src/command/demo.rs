use std::sync::Arc;

use flapnet_engine::{Controller, SimulationConfig, World};
use flapnet_network::NeuralNetwork;
use rand::Rng as _;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct DemoArg {
    /// Steps after which the demo flight is stopped
    #[arg(long, default_value_t = 1_000_000)]
    demo_steps: u64,
    /// Seed of the demo world [default: random]
    #[arg(long)]
    demo_seed: Option<u64>,
}

/// Flies `network` through a fresh world and prints how far it got.
pub(crate) fn run(arg: &DemoArg, network: Arc<NeuralNetwork>) {
    let seed = arg.demo_seed.unwrap_or_else(|| rand::rng().random());
    let world = fly(network, seed, arg.demo_steps);

    eprintln!();
    eprintln!("Demo flight (seed {seed})");
    eprintln!("  Steps: {}", world.steps());
    eprintln!("  Obstacles passed: {}", world.score());
    if !world.is_terminated() {
        eprintln!("  Still alive when the step limit was reached");
    }
    eprintln!("  Score: {:.10}", world.fitness());
}

fn fly(network: Arc<NeuralNetwork>, seed: u64, max_steps: u64) -> World {
    let mut world = World::new(
        SimulationConfig::default(),
        seed,
        [Controller::Policy(network)],
    );
    while !world.is_terminated() && world.steps() < max_steps {
        world.step();
    }
    world
}
