use std::{path::PathBuf, sync::Arc};

use clap::Parser;

use self::{demo::DemoArg, train::TrainArg};
use crate::util;

mod demo;
mod train;

/// Evolve a flight controller, or fly a saved one.
#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Model file (JSON format) to load instead of training a new one
    model_path: Option<PathBuf>,
    #[command(flatten)]
    train: TrainArg,
    #[command(flatten)]
    demo: DemoArg,
}

pub fn run() -> anyhow::Result<()> {
    let CommandArgs {
        model_path,
        train,
        demo,
    } = CommandArgs::parse();

    let network = match model_path {
        Some(path) => {
            let model = util::read_model_file(&path)?;
            eprintln!("Loaded model");
            eprintln!("  Path: {}", path.display());
            eprintln!("  Name: {}", model.name);
            eprintln!("  Trained at: {}", model.trained_at);
            eprintln!("  Final fitness: {:.4}", model.final_fitness);
            model.network
        }
        None => train::run(&train)?,
    };

    demo::run(&demo, Arc::new(network));
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory as _;

    use super::*;

    #[test]
    fn test_command_definition() {
        CommandArgs::command().debug_assert();
    }

    #[test]
    fn test_model_path_selects_loading() {
        let args = CommandArgs::try_parse_from(["flapnet", "NN_1.json"]).unwrap();
        assert_eq!(args.model_path, Some(PathBuf::from("NN_1.json")));

        let args = CommandArgs::try_parse_from(["flapnet", "--population", "50"]).unwrap();
        assert_eq!(args.model_path, None);
    }
}
