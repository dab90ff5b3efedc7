/// Options that control how database adapters look tables up.
#[derive(Debug, Clone)]
pub struct IntrospectOptions {
    /// Namespace searched for tables.
    pub schema: String,
}

impl Default for IntrospectOptions {
    fn default() -> Self {
        Self {
            schema: "public".to_string(),
        }
    }
}
