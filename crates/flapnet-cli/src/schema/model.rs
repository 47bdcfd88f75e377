use chrono::{DateTime, Utc};
use flapnet_network::NeuralNetwork;
use flapnet_training::TrainingConfig;
use serde::{Deserialize, Serialize};

/// A trained network together with how it was produced.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TrainedModel {
    pub name: String,
    pub trained_at: DateTime<Utc>,
    /// Number of generations evaluated before training stopped
    pub generations: usize,
    pub final_fitness: f64,
    /// Whether a candidate exceeded the success threshold
    pub succeeded: bool,
    pub config: TrainingConfig,
    pub network: NeuralNetwork,
}

impl TrainedModel {
    /// Default file name for a model trained at `trained_at`.
    #[must_use]
    pub fn default_file_name(trained_at: DateTime<Utc>) -> String {
        format!("NN_{}.json", trained_at.timestamp())
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone as _;
    use rand::SeedableRng as _;

    use super::*;

    #[test]
    fn test_default_file_name_uses_unix_timestamp() {
        let at = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(TrainedModel::default_file_name(at), "NN_1704164645.json");
    }

    #[test]
    fn test_json_keeps_network_exact() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(9);
        let network = NeuralNetwork::new(&[6, 3, 1], &mut rng).copy_and_mutate(0.7, &mut rng);
        let model = TrainedModel {
            name: "flapnet".to_owned(),
            trained_at: Utc::now(),
            generations: 4,
            final_fitness: 12.345_678_9,
            succeeded: false,
            config: TrainingConfig::default(),
            network,
        };

        let json = serde_json::to_string(&model).unwrap();
        let restored: TrainedModel = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.network, model.network);
        assert_eq!(restored.config, model.config);
        assert_eq!(restored.trained_at, model.trained_at);
        assert_eq!(restored.final_fitness.to_bits(), model.final_fitness.to_bits());
    }
}
