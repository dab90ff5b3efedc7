use modelforge_core::{EnglishInflector, Inflector, OptionDefaults, normalize_entity_name};
use modelforge_introspect::{SchemaSource, describe_table};

use crate::errors::GenerationError;
use crate::model::{
    GenerationContext, GenerationOutcome, GenerationRequest, MODEL_TEMPLATE, TODAY_FORMAT,
};
use crate::prompt::Prompt;
use crate::renderer::Renderer;
use crate::resolver::OptionResolver;

/// Drives one generation run: name → table → schema → rules → options →
/// renderer.
pub struct Generator<'a> {
    schema: &'a dyn SchemaSource,
    renderer: &'a dyn Renderer,
    inflector: &'a dyn Inflector,
    defaults: OptionDefaults,
}

impl<'a> Generator<'a> {
    pub fn new(schema: &'a dyn SchemaSource, renderer: &'a dyn Renderer) -> Self {
        Self {
            schema,
            renderer,
            inflector: &EnglishInflector,
            defaults: OptionDefaults::default(),
        }
    }

    pub fn with_inflector(mut self, inflector: &'a dyn Inflector) -> Self {
        self.inflector = inflector;
        self
    }

    pub fn with_defaults(mut self, defaults: OptionDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    pub async fn run(
        &self,
        request: GenerationRequest,
        prompt: &mut dyn Prompt,
    ) -> Result<GenerationOutcome, GenerationError> {
        let entity_name = self.entity_name(&request, prompt)?;
        tracing::info!(event = "entity_normalized", model = %entity_name);

        let mut resolver = if request.interactive {
            OptionResolver::interactive(&self.defaults, &request.explicit, prompt)
        } else {
            OptionResolver::quiet(&self.defaults, &request.explicit)
        };

        let table_name = resolver.resolve_table_name(
            request.table_name.as_deref(),
            &entity_name,
            self.inflector,
        )?;

        let (columns, schema_found) = match describe_table(self.schema, &table_name).await {
            Ok(columns) => {
                tracing::info!(
                    event = "schema_introspected",
                    engine = self.schema.engine(),
                    table = %table_name,
                    columns = columns.len()
                );
                (columns, true)
            }
            Err(err) if err.is_schema_not_found() => {
                tracing::warn!(
                    event = "schema_not_found",
                    engine = self.schema.engine(),
                    table = %table_name,
                    "continuing without fields or validation rules"
                );
                (Vec::new(), false)
            }
            Err(err) => return Err(err.into()),
        };

        let options = resolver.resolve(table_name, columns)?;
        tracing::debug!(
            event = "rules_derived",
            table = %options.table_name,
            rules = options.rules.len()
        );
        tracing::info!(
            event = "options_resolved",
            table = %options.table_name,
            primary_key = %options.primary_key(),
            interactive = request.interactive
        );

        let context = GenerationContext {
            model_name: entity_name,
            today: request.generated_at.format(TODAY_FORMAT).to_string(),
            options,
        };
        let destination = request
            .output_dir
            .join(format!("{}.{}", context.model_name, request.extension));

        self.renderer
            .render(MODEL_TEMPLATE, &destination, &context, request.overwrite)?;
        tracing::info!(event = "artifact_rendered", path = %destination.display());

        Ok(GenerationOutcome {
            destination,
            context,
            schema_found,
        })
    }

    fn entity_name(
        &self,
        request: &GenerationRequest,
        prompt: &mut dyn Prompt,
    ) -> Result<String, GenerationError> {
        let supplied = request
            .entity_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string);

        let name = match supplied {
            Some(name) => name,
            None if request.interactive => prompt.prompt("Model name", &[])?.trim().to_string(),
            None => String::new(),
        };

        if name.is_empty() {
            return Err(GenerationError::MissingEntityName);
        }
        Ok(normalize_entity_name(&name))
    }
}
