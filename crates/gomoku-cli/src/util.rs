use std::{
    fs::File,
    io::{self, BufWriter, Write as _},
    path::Path,
};

use anyhow::Context;
use gomoku_adaptive::{config::RatingConfig, controller::RatingController};
use gomoku_evaluator::move_selector::{MoveSelector, SelectorSeed};
use rand::Rng as _;

use crate::schema::RatingsFile;

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

pub fn write_json_file<T, P>(file_kind: &str, path: P, value: &T) -> anyhow::Result<()>
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

/// Reads and validates rating constants, falling back to the defaults without a path.
pub fn load_rating_config(path: Option<&Path>) -> anyhow::Result<RatingConfig> {
    let Some(path) = path else {
        return Ok(RatingConfig::default());
    };
    let config: RatingConfig = read_json_file("rating config", path)?;
    config
        .validate()
        .with_context(|| format!("Invalid rating config: {}", path.display()))?;
    Ok(config)
}

/// Restores a controller from `path` if the file exists, otherwise starts fresh.
pub fn load_controller(
    config: RatingConfig,
    path: Option<&Path>,
) -> anyhow::Result<RatingController> {
    match path {
        Some(path) if path.exists() => {
            let file: RatingsFile = read_json_file("ratings", path)?;
            eprintln!(
                "Loaded ratings saved at {} from {}",
                file.saved_at,
                path.display()
            );
            RatingController::restore(config, &file.state)
                .with_context(|| format!("Invalid ratings in {}", path.display()))
        }
        _ => Ok(RatingController::new(config)?),
    }
}

pub fn save_controller(controller: &RatingController, path: &Path) -> anyhow::Result<()> {
    write_json_file("ratings", path, &RatingsFile::from_controller(controller))
}

/// Builds a selector from `seed`, or from a fresh random seed that is reported on stderr.
pub fn build_selector(seed: Option<SelectorSeed>) -> MoveSelector {
    let seed = seed.unwrap_or_else(|| rand::rng().random());
    eprintln!("Seed: {}", seed.to_hex());
    MoveSelector::with_seed(seed)
}
