use crate::ir::Dataset;
use anyhow::{Context, Result};
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("invalid family data: {message}")]
    Json { message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Parse a dataset, accepting strict JSON first and falling back to JSON5 so
/// hand-edited files may carry comments and trailing commas.
pub fn parse_dataset(input: &str) -> Result<Dataset, DataError> {
    match serde_json::from_str::<Dataset>(input) {
        Ok(dataset) => Ok(dataset),
        Err(strict_err) => match json5::from_str::<Dataset>(input) {
            Ok(dataset) => {
                tracing::debug!(error = %strict_err, "dataset is not strict JSON, parsed as JSON5");
                Ok(dataset)
            }
            // The strict parser's message carries line/column information.
            Err(_) => Err(DataError::Json {
                message: strict_err.to_string(),
            }),
        },
    }
}

pub fn load_dataset(path: &Path) -> Result<Dataset> {
    let contents = std::fs::read_to_string(path)
        .map_err(DataError::from)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let dataset =
        parse_dataset(&contents).with_context(|| format!("failed to parse {}", path.display()))?;
    tracing::debug!(
        people = dataset.people.len(),
        families = dataset.families.len(),
        hidden = dataset.hidden.len(),
        "loaded dataset"
    );
    Ok(dataset)
}
