//! Persistence for fitted pipeline objects.
//!
//! Artifacts are JSON envelopes carrying a format version and a kind tag
//! around the serialized payload. The version tag rejects stale on-disk
//! formats; the kind tag rejects a model file handed to the preprocessor
//! loader (and vice versa). Whether a preprocessor/model pair came from the
//! same training run is NOT validated — see DESIGN.md.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::debug;

use crate::error::{PipelineError, Result};

/// Current on-disk envelope version.
pub const FORMAT_VERSION: u32 = 1;

/// What a persisted artifact contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    Preprocessor,
    Model,
}

#[derive(Serialize, Deserialize)]
struct Envelope<T> {
    format_version: u32,
    kind: ArtifactKind,
    created_at: DateTime<Utc>,
    payload: T,
}

/// Serialize a fitted object into a tagged envelope at `path`.
pub fn save<T: Serialize>(path: &Path, kind: ArtifactKind, payload: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let envelope = Envelope {
        format_version: FORMAT_VERSION,
        kind,
        created_at: Utc::now(),
        payload,
    };

    let json = serde_json::to_string_pretty(&envelope)?;
    std::fs::write(path, json)?;
    debug!(path = %path.display(), ?kind, "artifact saved");
    Ok(())
}

/// Load a fitted object of the expected kind from `path`.
///
/// A missing file is an `ArtifactMissing` error so callers can tell "train
/// first" apart from a corrupt or mismatched artifact.
pub fn load<T: DeserializeOwned>(path: &Path, kind: ArtifactKind) -> Result<T> {
    if !path.exists() {
        return Err(PipelineError::ArtifactMissing {
            path: path.to_path_buf(),
        });
    }

    let json = std::fs::read_to_string(path)?;
    let envelope: Envelope<T> = serde_json::from_str(&json)?;

    if envelope.format_version != FORMAT_VERSION {
        return Err(PipelineError::ArtifactVersion {
            path: path.to_path_buf(),
            found: envelope.format_version,
            expected: FORMAT_VERSION,
        });
    }
    if envelope.kind != kind {
        return Err(PipelineError::ArtifactKindMismatch {
            path: path.to_path_buf(),
            expected: kind,
            found: envelope.kind,
        });
    }

    debug!(path = %path.display(), ?kind, "artifact loaded");
    Ok(envelope.payload)
}
