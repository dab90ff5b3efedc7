use std::path::PathBuf;

use chrono::{DateTime, Local};
use serde::Serialize;

use modelforge_core::{ExplicitOptions, GenerationOptions};

/// Timestamp format exposed to templates as `today`, e.g. `2026-10-15 14:05pm`.
pub const TODAY_FORMAT: &str = "%Y-%m-%d %H:%M%P";

/// Identifier of the template used for models.
pub const MODEL_TEMPLATE: &str = "model";

/// Inputs for one generation run.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// Model name as typed by the operator; prompted for when absent.
    pub entity_name: Option<String>,
    /// Positional table name.
    pub table_name: Option<String>,
    pub explicit: ExplicitOptions,
    pub interactive: bool,
    pub output_dir: PathBuf,
    pub extension: String,
    pub overwrite: bool,
    pub generated_at: DateTime<Local>,
}

impl GenerationRequest {
    pub fn new(entity_name: Option<String>) -> Self {
        Self {
            entity_name,
            table_name: None,
            explicit: ExplicitOptions::default(),
            interactive: true,
            output_dir: PathBuf::from("models"),
            extension: "php".to_string(),
            overwrite: false,
            generated_at: Local::now(),
        }
    }
}

/// Immutable bundle handed to the renderer. Options are flattened so
/// templates read `table_name`, `rules`, ... at the top level.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationContext {
    pub model_name: String,
    pub today: String,
    #[serde(flatten)]
    pub options: GenerationOptions,
}

/// Result of a successful run.
#[derive(Debug, Clone)]
pub struct GenerationOutcome {
    pub destination: PathBuf,
    pub context: GenerationContext,
    /// False when the table could not be introspected.
    pub schema_found: bool,
}
