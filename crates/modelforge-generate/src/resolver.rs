//! Layered option resolution.
//!
//! Every option is resolved from an ordered list of optional overrides:
//! explicit caller value, interactive answer, schema-derived value, and
//! finally the configured default. The first layer holding a value wins.
//! Prompts are only shown for options that no higher layer has settled.

use modelforge_core::{
    ColumnDescriptor, DateFormat, ExplicitOptions, GenerationOptions, Inflector, OptionDefaults,
    default_table_name, derive_rules, primary_key_column,
};

use crate::errors::GenerationError;
use crate::prompt::{
    BinaryQuestion, LOG_USER, Prompt, SET_CREATED, SET_MODIFIED, SOFT_DELETES, YES_NO,
};

/// First present layer, else `default`.
pub fn resolve_layered<T>(layers: impl IntoIterator<Item = Option<T>>, default: T) -> T {
    layers.into_iter().flatten().next().unwrap_or(default)
}

/// Merges explicit options, prompt answers, schema facts and defaults.
pub struct OptionResolver<'a> {
    defaults: &'a OptionDefaults,
    explicit: &'a ExplicitOptions,
    prompt: Option<&'a mut dyn Prompt>,
}

impl<'a> OptionResolver<'a> {
    /// Resolver that never prompts.
    pub fn quiet(defaults: &'a OptionDefaults, explicit: &'a ExplicitOptions) -> Self {
        Self {
            defaults,
            explicit,
            prompt: None,
        }
    }

    /// Resolver that asks for every option not supplied explicitly.
    pub fn interactive(
        defaults: &'a OptionDefaults,
        explicit: &'a ExplicitOptions,
        prompt: &'a mut dyn Prompt,
    ) -> Self {
        Self {
            defaults,
            explicit,
            prompt: Some(prompt),
        }
    }

    /// Table name: positional argument, then `--table`, then the prompt
    /// (offering the derived name), then the name derived from the entity.
    pub fn resolve_table_name(
        &mut self,
        positional: Option<&str>,
        entity_name: &str,
        inflector: &dyn Inflector,
    ) -> Result<String, GenerationError> {
        let derived = default_table_name(entity_name, inflector);
        let explicit = non_blank(positional)
            .or_else(|| self.explicit.table())
            .map(str::to_string);

        let prompted = match explicit {
            Some(_) => None,
            None => self.ask("Table name", &[derived.as_str()])?,
        };

        Ok(resolve_layered([explicit, prompted], derived))
    }

    /// Resolve every remaining option for `table_name` given the columns
    /// found by introspection (empty when the table could not be described).
    pub fn resolve(
        &mut self,
        table_name: String,
        columns: Vec<ColumnDescriptor>,
    ) -> Result<GenerationOptions, GenerationError> {
        let defaults = self.defaults;
        let explicit = self.explicit;
        let mut options = GenerationOptions::from_defaults(table_name, defaults);

        let explicit_pk = explicit.primary_key().map(str::to_string);
        let schema_pk = primary_key_column(&columns).map(str::to_string);
        let prompted_pk = if explicit_pk.is_none() && schema_pk.is_none() {
            self.ask("Primary Key", &[defaults.primary_key.as_str()])?
        } else {
            None
        };
        options.set_primary_key(resolve_layered(
            [explicit_pk, schema_pk, prompted_pk],
            defaults.primary_key.clone(),
        ));

        options.set_created =
            self.resolve_binary(explicit.set_created, SET_CREATED, defaults.set_created)?;
        options.set_modified =
            self.resolve_binary(explicit.set_modified, SET_MODIFIED, defaults.set_modified)?;

        let prompted_format = match explicit.date_format {
            Some(_) => None,
            None => self
                .ask("Date Format?", &DateFormat::CHOICES)?
                .and_then(|answer| match answer.parse::<DateFormat>() {
                    Ok(format) => Some(format),
                    Err(err) => {
                        tracing::warn!(
                            event = "option_ignored",
                            option = "date_format",
                            answer = %answer,
                            error = %err
                        );
                        None
                    }
                }),
        };
        options.date_format =
            resolve_layered([explicit.date_format, prompted_format], defaults.date_format);

        options.log_user = self.resolve_binary(explicit.log_user, LOG_USER, defaults.log_user)?;
        options.use_soft_deletes =
            self.resolve_binary(explicit.soft_delete, SOFT_DELETES, defaults.use_soft_deletes)?;

        options.return_type = resolve_layered([explicit.return_type], defaults.return_type);
        options.return_insert_id =
            resolve_layered([explicit.return_insert_id], defaults.return_insert_id);

        options.rules = derive_rules(&columns).unwrap_or_default();
        options.fields = columns;

        Ok(options)
    }

    fn resolve_binary(
        &mut self,
        explicit: Option<bool>,
        question: BinaryQuestion,
        default: bool,
    ) -> Result<bool, GenerationError> {
        let prompted = match explicit {
            Some(_) => None,
            None => self
                .ask(question.message, &YES_NO)?
                .and_then(|answer| question.interpret(&answer)),
        };
        Ok(resolve_layered([explicit, prompted], default))
    }

    /// Ask the operator; `None` in quiet mode or for a blank answer.
    pub fn ask(
        &mut self,
        message: &str,
        choices: &[&str],
    ) -> Result<Option<String>, GenerationError> {
        let Some(prompt) = self.prompt.as_deref_mut() else {
            return Ok(None);
        };
        let answer = prompt.prompt(message, choices)?;
        Ok(non_blank(Some(&answer)).map(str::to_string))
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::io;

    use modelforge_core::{EnglishInflector, ReturnType};

    use super::*;

    /// Answers prompts from a script and records what was asked.
    #[derive(Default)]
    struct ScriptedPrompt {
        answers: VecDeque<String>,
        asked: Vec<String>,
    }

    impl ScriptedPrompt {
        fn new(answers: &[&str]) -> Self {
            Self {
                answers: answers.iter().map(|answer| answer.to_string()).collect(),
                asked: Vec::new(),
            }
        }
    }

    impl Prompt for ScriptedPrompt {
        fn prompt(&mut self, message: &str, choices: &[&str]) -> io::Result<String> {
            self.asked.push(message.to_string());
            let answer = self.answers.pop_front().unwrap_or_default();
            if answer.is_empty() {
                return Ok(choices.first().map(|c| c.to_string()).unwrap_or_default());
            }
            Ok(answer)
        }
    }

    fn columns_with_pk() -> Vec<ColumnDescriptor> {
        vec![
            ColumnDescriptor::new("id", "int").primary(),
            ColumnDescriptor::new("title", "varchar").with_max_length(100),
        ]
    }

    #[test]
    fn layered_resolution_takes_first_present_value() {
        assert_eq!(resolve_layered([None, Some(2), Some(3)], 4), 2);
        assert_eq!(resolve_layered([None::<i32>, None], 4), 4);
    }

    #[test]
    fn quiet_mode_uses_schema_then_defaults() {
        let defaults = OptionDefaults::default();
        let explicit = ExplicitOptions::default();
        let mut resolver = OptionResolver::quiet(&defaults, &explicit);

        let options = resolver
            .resolve("posts".to_string(), columns_with_pk())
            .expect("resolve");
        assert_eq!(options.primary_key(), "id");
        assert_eq!(options.protected(), ["id".to_string()]);
        assert!(options.set_created && options.set_modified && options.use_soft_deletes);
        assert!(!options.log_user);
        assert_eq!(options.date_format, DateFormat::Datetime);
        assert_eq!(options.return_type, ReturnType::Object);
        assert_eq!(options.rules.len(), 2);
        assert_eq!(options.fields.len(), 2);
    }

    #[test]
    fn explicit_primary_key_beats_schema() {
        let defaults = OptionDefaults::default();
        let explicit = ExplicitOptions {
            primary_key: Some("uuid".to_string()),
            ..ExplicitOptions::default()
        };
        let mut prompt = ScriptedPrompt::default();
        let mut resolver = OptionResolver::interactive(&defaults, &explicit, &mut prompt);

        let options = resolver
            .resolve("posts".to_string(), columns_with_pk())
            .expect("resolve");
        assert_eq!(options.primary_key(), "uuid");
        assert_eq!(options.protected(), ["uuid".to_string()]);
        assert!(!prompt.asked.contains(&"Primary Key".to_string()));
    }

    #[test]
    fn schema_primary_key_beats_prompt_and_skips_it() {
        let defaults = OptionDefaults::default();
        let explicit = ExplicitOptions::default();
        let mut prompt = ScriptedPrompt::default();
        let mut resolver = OptionResolver::interactive(&defaults, &explicit, &mut prompt);

        let options = resolver
            .resolve("posts".to_string(), columns_with_pk())
            .expect("resolve");
        assert_eq!(options.primary_key(), "id");
        assert_eq!(
            prompt.asked,
            vec![
                "Set Created date?",
                "Set Modified date?",
                "Date Format?",
                "Log User actions?",
                "Use Soft Deletes?",
            ]
        );
    }

    #[test]
    fn prompts_for_primary_key_without_schema() {
        let defaults = OptionDefaults::default();
        let explicit = ExplicitOptions::default();
        let mut prompt = ScriptedPrompt::new(&["post_id"]);
        let mut resolver = OptionResolver::interactive(&defaults, &explicit, &mut prompt);

        let options = resolver.resolve("posts".to_string(), Vec::new()).expect("resolve");
        assert_eq!(options.primary_key(), "post_id");
        assert!(options.rules.is_empty());
        assert!(options.fields.is_empty());
    }

    #[test]
    fn answer_tokens_are_interpreted_per_option() {
        let defaults = OptionDefaults::default();
        let explicit = ExplicitOptions::default();
        // pk, set_created, set_modified, date_format, log_user, soft_delete
        let mut prompt = ScriptedPrompt::new(&["", "n", "y", "int", "", "n"]);
        let mut resolver = OptionResolver::interactive(&defaults, &explicit, &mut prompt);

        let options = resolver.resolve("posts".to_string(), Vec::new()).expect("resolve");
        assert_eq!(options.primary_key(), "id");
        assert!(!options.set_created);
        assert!(options.set_modified);
        assert_eq!(options.date_format, DateFormat::Int);
        // An empty answer selects the first choice, `y`, which enables logging.
        assert!(options.log_user);
        assert!(!options.use_soft_deletes);
    }

    #[test]
    fn explicit_values_skip_their_prompts() {
        let defaults = OptionDefaults::default();
        let explicit = ExplicitOptions {
            primary_key: Some("id".to_string()),
            set_created: Some(false),
            set_modified: Some(true),
            date_format: Some(DateFormat::Date),
            log_user: Some(false),
            soft_delete: Some(true),
            ..ExplicitOptions::default()
        };
        let mut prompt = ScriptedPrompt::default();
        let mut resolver = OptionResolver::interactive(&defaults, &explicit, &mut prompt);

        let options = resolver.resolve("posts".to_string(), Vec::new()).expect("resolve");
        assert!(prompt.asked.is_empty());
        assert!(!options.set_created);
        assert_eq!(options.date_format, DateFormat::Date);
        assert!(!options.log_user);
    }

    #[test]
    fn unknown_date_format_answer_falls_back_to_default() {
        let defaults = OptionDefaults {
            date_format: DateFormat::Int,
            ..OptionDefaults::default()
        };
        let explicit = ExplicitOptions::default();
        // pk, set_created, set_modified, date_format, log_user, soft_delete
        let mut prompt = ScriptedPrompt::new(&["", "", "", "timestamp", "y", ""]);
        let mut resolver = OptionResolver::interactive(&defaults, &explicit, &mut prompt);

        let options = resolver
            .resolve("posts".to_string(), Vec::new())
            .expect("unknown answer is not fatal");
        assert_eq!(options.date_format, DateFormat::Int);
        assert!(options.log_user);
        assert_eq!(prompt.asked.len(), 6);
    }

    #[test]
    fn table_name_precedence() {
        let defaults = OptionDefaults::default();
        let inflector = EnglishInflector;
        let explicit = ExplicitOptions {
            table: Some("people".to_string()),
            ..ExplicitOptions::default()
        };

        let mut quiet = OptionResolver::quiet(&defaults, &explicit);
        assert_eq!(
            quiet
                .resolve_table_name(Some("members"), "User_model", &inflector)
                .expect("table"),
            "members"
        );
        assert_eq!(
            quiet
                .resolve_table_name(None, "User_model", &inflector)
                .expect("table"),
            "people"
        );

        let no_explicit = ExplicitOptions::default();
        let mut prompt = ScriptedPrompt::new(&["", "accounts"]);
        let mut interactive = OptionResolver::interactive(&defaults, &no_explicit, &mut prompt);
        assert_eq!(
            interactive
                .resolve_table_name(None, "User_model", &inflector)
                .expect("table"),
            "users"
        );
        assert_eq!(
            interactive
                .resolve_table_name(None, "User_model", &inflector)
                .expect("table"),
            "accounts"
        );
    }
}
