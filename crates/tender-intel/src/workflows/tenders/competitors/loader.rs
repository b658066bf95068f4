use std::collections::BTreeMap;
use std::io::Read;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use super::config::{CompetitorProfile, ModelConfig, WeightVector};
use super::features::FeatureKind;

/// Failure reading an external weight or roster source.
#[derive(Debug, thiserror::Error)]
pub enum ModelSourceError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("invalid CSV in {path}: {source}")]
    Csv { path: PathBuf, source: csv::Error },
    #[error("weight '{key}' in {path} must be a number")]
    NonNumericWeight { path: PathBuf, key: String },
}

impl ModelConfig {
    /// Build the model tables, layering any readable external sources over the defaults.
    ///
    /// Missing or malformed sources are logged and skipped; loading never fails.
    pub fn load(weights_path: Option<&Path>, competitors_path: Option<&Path>) -> Self {
        let mut config = ModelConfig::default();

        if let Some(path) = weights_path.filter(|path| source_present(path)) {
            match read_weight_overrides(path) {
                Ok(overrides) => {
                    config.weights = WeightVector::default().with_overrides(&overrides);
                    info!(path = %path.display(), keys = overrides.len(), "loaded weight overrides");
                }
                Err(err) => warn!(error = %err, "keeping default weights"),
            }
        }

        if let Some(path) = competitors_path.filter(|path| source_present(path)) {
            match read_roster(path) {
                Ok(roster) => {
                    info!(path = %path.display(), competitors = roster.len(), "loaded competitor roster");
                    config.competitors = roster;
                }
                Err(err) => warn!(error = %err, "keeping default competitor roster"),
            }
        }

        config
    }
}

fn source_present(path: &Path) -> bool {
    let present = path.exists();
    if !present {
        tracing::debug!(path = %path.display(), "model source not found");
    }
    present
}

/// Read weight overrides, keeping only recognized weight names.
///
/// Unknown keys are skipped whatever their value; a recognized key with a
/// non-numeric value rejects the whole source.
pub fn read_weight_overrides(path: &Path) -> Result<BTreeMap<String, f64>, ModelSourceError> {
    let raw = read_to_string(path)?;
    let entries: BTreeMap<String, serde_json::Value> =
        serde_json::from_str(&raw).map_err(|source| ModelSourceError::Json {
            path: path.to_path_buf(),
            source,
        })?;

    let mut overrides = BTreeMap::new();
    for (key, value) in entries {
        if !is_weight_key(&key) {
            tracing::debug!(key = %key, "ignoring unknown weight override");
            continue;
        }
        let weight = value
            .as_f64()
            .ok_or_else(|| ModelSourceError::NonNumericWeight {
                path: path.to_path_buf(),
                key: key.clone(),
            })?;
        overrides.insert(key, weight);
    }
    Ok(overrides)
}

fn is_weight_key(key: &str) -> bool {
    key == "intercept" || FeatureKind::from_key(key).is_some()
}

/// Read a roster from JSON, or from CSV when the file has a `.csv` extension.
pub fn read_roster(path: &Path) -> Result<Vec<CompetitorProfile>, ModelSourceError> {
    let is_csv = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("csv"))
        .unwrap_or(false);

    if is_csv {
        let file = std::fs::File::open(path).map_err(|source| ModelSourceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        return parse_roster_csv(file).map_err(|source| ModelSourceError::Csv {
            path: path.to_path_buf(),
            source,
        });
    }

    let raw = read_to_string(path)?;
    serde_json::from_str(&raw).map_err(|source| ModelSourceError::Json {
        path: path.to_path_buf(),
        source,
    })
}

pub(crate) fn parse_roster_csv<R: Read>(reader: R) -> Result<Vec<CompetitorProfile>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    csv_reader
        .deserialize::<CompetitorProfile>()
        .collect::<Result<Vec<_>, _>>()
}

fn read_to_string(path: &Path) -> Result<String, ModelSourceError> {
    std::fs::read_to_string(path).map_err(|source| ModelSourceError::Io {
        path: path.to_path_buf(),
        source,
    })
}
