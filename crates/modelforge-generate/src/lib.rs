//! Option resolution and artifact generation for modelforge.
//!
//! Merges explicit options, interactive answers, schema facts and defaults
//! into one configuration and hands it to a template renderer.

pub mod errors;
pub mod filters;
pub mod model;
pub mod orchestrator;
pub mod prompt;
pub mod renderer;
pub mod resolver;

pub use errors::{GenerationError, RenderError};
pub use filters::phpquote;
pub use model::{
    GenerationContext, GenerationOutcome, GenerationRequest, MODEL_TEMPLATE, TODAY_FORMAT,
};
pub use orchestrator::Generator;
pub use prompt::{BinaryQuestion, Prompt, YES_NO};
pub use renderer::{Renderer, TemplateRenderer, write_bytes_atomic};
pub use resolver::{OptionResolver, resolve_layered};
