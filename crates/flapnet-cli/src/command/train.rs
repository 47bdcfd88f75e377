use std::path::PathBuf;

use chrono::Utc;
use flapnet_network::NeuralNetwork;
use flapnet_training::{GenerationReport, Trainer, TrainingConfig};

use crate::{schema::model::TrainedModel, util};

const MODEL_NAME: &str = "flapnet";

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct TrainArg {
    /// Number of candidates per generation
    #[arg(long, default_value_t = 10_000)]
    population: usize,
    /// Maximum number of generations
    #[arg(long, default_value_t = 100)]
    generations: usize,
    /// Mutation coefficient of the best-gene streak
    #[arg(long, default_value_t = 2.0)]
    base_mutation: f64,
    /// Mutation coefficient of the best-score streak
    #[arg(long, default_value_t = 1.0)]
    score_mutation: f64,
    /// Number of evaluations running at the same time
    #[arg(long, default_value_t = 20)]
    concurrency: usize,
    /// Steps after which a still-alive candidate stops being evaluated
    #[arg(long, default_value_t = 3_000_000)]
    max_steps: u64,
    /// Fitness at which training ends early
    #[arg(long, default_value_t = 50_000.0)]
    success_threshold: f64,
    /// Seed of the breeding generator
    #[arg(long)]
    seed: Option<u64>,
    /// Output file path [default: NN_<unix-timestamp>.json]
    #[arg(long)]
    output: Option<PathBuf>,
}

impl TrainArg {
    fn to_config(&self) -> TrainingConfig {
        TrainingConfig {
            population_size: self.population,
            generations: self.generations,
            base_mutation: self.base_mutation,
            score_mutation: self.score_mutation,
            concurrency: self.concurrency,
            max_steps: self.max_steps,
            success_threshold: self.success_threshold,
            seed: self.seed,
            ..TrainingConfig::default()
        }
    }
}

pub(crate) fn run(arg: &TrainArg) -> anyhow::Result<NeuralNetwork> {
    let config = arg.to_config();
    let mut trainer = Trainer::new(config.clone())?;
    eprintln!(
        "Training {} networks {:?} for up to {} generations",
        config.population_size, config.topology, config.generations
    );

    let outcome = trainer.run(print_report);

    eprintln!("Trained for {:.3?}", outcome.elapsed);
    if outcome.succeeded {
        eprintln!("Success threshold reached, training ended early.");
    }

    let trained_at = Utc::now();
    let path = arg
        .output
        .clone()
        .unwrap_or_else(|| TrainedModel::default_file_name(trained_at).into());
    let model = TrainedModel {
        name: MODEL_NAME.to_owned(),
        trained_at,
        generations: outcome.generations_run,
        final_fitness: outcome.fitness,
        succeeded: outcome.succeeded,
        config,
        network: (*outcome.network).clone(),
    };
    util::save_json_file("model", &model, &path)?;

    eprintln!();
    eprintln!("Model saved successfully");
    eprintln!("  Path: {}", path.display());
    eprintln!("  Name: {}", model.name);
    eprintln!("  Trained at: {}", model.trained_at);
    eprintln!("  Generations: {}", model.generations);
    eprintln!("  Final fitness: {:.4}", model.final_fitness);
    eprintln!("  Fingerprint: {}", model.network.gene());

    Ok(model.network)
}

fn print_report(report: &GenerationReport) {
    let GenerationReport {
        generation,
        generations,
        best_fitness,
        best_last_output,
        best_gene,
        mutation_rate,
        stats,
        exhausted,
        succeeded: _,
    } = report;

    eprintln!(
        "Generation #{} / {generations}: best {best_fitness:.4}, output {best_last_output:.4}, \
         fp {best_gene}, mut {mutation_rate:.2}, total {:.4}",
        generation + 1,
        stats.total,
    );
    eprintln!(
        "  fitness min {:.4}, mean {:.4}, max {:.4}",
        stats.min, stats.mean, stats.max,
    );
    log::debug!(
        "  fitness median {:.4}, std dev {:.4}, {exhausted} hit the step budget",
        stats.median,
        stats.std_dev,
    );
}

#[cfg(test)]
mod tests {
    use clap::Parser as _;

    use super::*;

    #[derive(Debug, clap::Parser)]
    struct Wrapper {
        #[command(flatten)]
        arg: TrainArg,
    }

    #[test]
    fn test_defaults_match_training_config() {
        let Wrapper { arg } = Wrapper::parse_from(["test"]);
        assert_eq!(arg.to_config(), TrainingConfig::default());
        assert_eq!(arg.output, None);
    }

    #[test]
    fn test_flags_override_config() {
        let Wrapper { arg } = Wrapper::parse_from([
            "test",
            "--population",
            "40",
            "--generations",
            "5",
            "--seed",
            "7",
            "--concurrency",
            "4",
        ]);
        let config = arg.to_config();
        assert_eq!(config.population_size, 40);
        assert_eq!(config.generations, 5);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.concurrency, 4);
        assert_eq!(config.base_mutation, 2.0);
    }
}
