use std::{
    fs::File,
    io::{self, BufWriter, Write as _},
    path::Path,
};

use anyhow::Context;
use flapnet_engine::Sensors;

use crate::schema::model::TrainedModel;

pub fn save_json_file<T, P>(file_kind: &str, value: &T, path: P) -> anyhow::Result<()>
where
    T: serde::Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::create(path)
        .with_context(|| format!("Failed to create {} file: {}", file_kind, path.display()))?;

    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value)
        .with_context(|| format!("Failed to write {} JSON to {}", file_kind, path.display()))?;
    writeln!(writer)
        .and_then(|()| writer.flush())
        .with_context(|| format!("Failed to flush {} file: {}", file_kind, path.display()))?;

    Ok(())
}

pub fn read_json_file<T, P>(file_kind: &str, path: P) -> anyhow::Result<T>
where
    T: serde::de::DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open {} file: {}", file_kind, path.display()))?;

    let reader = io::BufReader::new(file);
    let value = serde_json::from_reader(reader).with_context(|| {
        format!(
            "Failed to parse {} JSON file: {}",
            file_kind,
            path.display()
        )
    })?;

    Ok(value)
}

/// Read a trained model from a JSON file
///
/// # Errors
///
/// Returns error if the file cannot be opened, is not valid JSON, holds a
/// network whose arrays do not match its topology, or holds a network that
/// does not take the sensor vector as input
pub fn read_model_file<P>(path: P) -> anyhow::Result<TrainedModel>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let model: TrainedModel = read_json_file("model", path)?;
    let inputs = model.network.input_len();
    anyhow::ensure!(
        inputs == Sensors::LEN,
        "Model network takes {inputs} inputs instead of {}: {}",
        Sensors::LEN,
        path.display()
    );
    Ok(model)
}
