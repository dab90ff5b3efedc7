use std::fs::{OpenOptions, create_dir_all};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use minijinja::{Environment, ErrorKind};

use crate::errors::RenderError;
use crate::filters::register_filters;
use crate::model::{GenerationContext, MODEL_TEMPLATE};

const BUILTIN_MODEL: &str = include_str!("../templates/model.jinja");

/// Output capability: turns a context into an artifact at `destination`.
///
/// Implementations write all or nothing and must refuse to replace an
/// existing file unless `overwrite` is set.
pub trait Renderer {
    fn render(
        &self,
        template_id: &str,
        destination: &Path,
        context: &GenerationContext,
        overwrite: bool,
    ) -> Result<(), RenderError>;
}

/// MiniJinja-backed renderer with a built-in `model` template.
///
/// With a template directory, `<dir>/<id>.jinja` takes precedence over the
/// built-in template of the same id.
pub struct TemplateRenderer {
    env: Environment<'static>,
}

impl TemplateRenderer {
    pub fn new() -> Result<Self, RenderError> {
        let mut env = Environment::new();
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.set_keep_trailing_newline(true);
        register_filters(&mut env);
        env.add_template(MODEL_TEMPLATE, BUILTIN_MODEL)?;
        Ok(Self { env })
    }

    pub fn with_template_dir(dir: impl Into<PathBuf>) -> Result<Self, RenderError> {
        let mut renderer = Self::new()?;
        renderer.env.set_loader(minijinja::path_loader(dir.into()));
        Ok(renderer)
    }

    /// Render `template_id` to a string without touching the filesystem.
    pub fn render_to_string(
        &self,
        template_id: &str,
        context: &GenerationContext,
    ) -> Result<String, RenderError> {
        let template = match self.env.get_template(&format!("{template_id}.jinja")) {
            Ok(template) => template,
            Err(err) if err.kind() == ErrorKind::TemplateNotFound => {
                self.env.get_template(template_id)?
            }
            Err(err) => return Err(err.into()),
        };
        Ok(template.render(context)?)
    }
}

impl Renderer for TemplateRenderer {
    fn render(
        &self,
        template_id: &str,
        destination: &Path,
        context: &GenerationContext,
        overwrite: bool,
    ) -> Result<(), RenderError> {
        if !overwrite && destination.exists() {
            return Err(RenderError::DestinationExists(destination.to_path_buf()));
        }

        let output = self.render_to_string(template_id, context)?;
        match write_bytes_atomic(destination, output.as_bytes(), overwrite) {
            Err(err) if !overwrite && err.kind() == io::ErrorKind::AlreadyExists => {
                return Err(RenderError::DestinationExists(destination.to_path_buf()));
            }
            result => result?,
        }
        tracing::debug!(
            event = "template_rendered",
            template = template_id,
            path = %destination.display(),
            bytes = output.len()
        );
        Ok(())
    }
}

/// Write through a sibling temp file and move it into place.
///
/// Without `overwrite` the temp file is hard-linked to `path`, which fails
/// with [`io::ErrorKind::AlreadyExists`] if `path` appeared in the meantime.
pub fn write_bytes_atomic(path: &Path, data: &[u8], overwrite: bool) -> io::Result<()> {
    let parent = path.parent().filter(|parent| !parent.as_os_str().is_empty());
    if let Some(parent) = parent {
        create_dir_all(parent)?;
    }

    let file_name = path.file_name().ok_or_else(|| {
        io::Error::new(io::ErrorKind::InvalidInput, "destination has no file name")
    })?;
    let tmp_path = path.with_file_name(format!(".{}.tmp", file_name.to_string_lossy()));

    let result = (|| {
        let mut file = OpenOptions::new()
            .create(true)
            .truncate(true)
            .write(true)
            .open(&tmp_path)?;
        file.write_all(data)?;
        file.sync_all()?;
        if overwrite {
            std::fs::rename(&tmp_path, path)
        } else {
            std::fs::hard_link(&tmp_path, path)?;
            std::fs::remove_file(&tmp_path)
        }
    })();

    if result.is_err() {
        let _ = std::fs::remove_file(&tmp_path);
    }
    result
}
