use std::path::PathBuf;

use thiserror::Error;

/// Errors emitted by the generation pipeline.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error(transparent)]
    Core(#[from] modelforge_core::Error),
    #[error("a model name is required in quiet mode")]
    MissingEntityName,
    #[error("prompt failed: {0}")]
    Prompt(#[from] std::io::Error),
    #[error("error creating new files: {0}")]
    Render(#[from] RenderError),
}

/// Failures reported by a renderer. No partial output is left behind.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("destination already exists: {}", .0.display())]
    DestinationExists(PathBuf),
    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
