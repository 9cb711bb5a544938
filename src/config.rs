//! Persona configuration input.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

use crate::error::{Error, Result};

/// File name of the persona configuration inside an input directory.
pub const PERSONA_CONFIG_FILE: &str = "persona_input.json";

/// Who the ranking is for and what they are trying to do.
///
/// Both fields are opaque: they are copied verbatim into the report metadata
/// and may be strings or arbitrary JSON objects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonaConfig {
    pub persona: Value,
    pub job_to_be_done: Value,
}

impl PersonaConfig {
    /// Create a configuration from any JSON-convertible values.
    pub fn new(persona: impl Into<Value>, job_to_be_done: impl Into<Value>) -> Self {
        Self {
            persona: persona.into(),
            job_to_be_done: job_to_be_done.into(),
        }
    }

    /// Parse a configuration from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::Config(format!("invalid persona JSON: {}", e)))
    }

    /// Load a configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("cannot read {}: {}", path.display(), e)))?;
        Self::from_json_str(&json)
    }
}
