//! Projection options and configuration.

/// Options for projecting a record into tables.
#[derive(Debug, Clone)]
pub struct ProjectionOptions {
    /// Name of the table collecting top-level scalar fields
    pub general_table_name: String,

    /// Name of the table returned when the input cannot be projected
    pub placeholder_table_name: String,

    /// Column holding the placeholder message
    pub placeholder_column: String,

    /// Message placed in the placeholder table
    pub placeholder_message: String,

    /// Column used for non-mapping elements of a list of records
    pub value_column: String,
}

impl ProjectionOptions {
    /// Create new projection options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the generic table name.
    pub fn with_general_table_name(mut self, name: impl Into<String>) -> Self {
        self.general_table_name = name.into();
        self
    }

    /// Set the placeholder table name.
    pub fn with_placeholder_table_name(mut self, name: impl Into<String>) -> Self {
        self.placeholder_table_name = name.into();
        self
    }

    /// Set the placeholder message.
    pub fn with_placeholder_message(mut self, message: impl Into<String>) -> Self {
        self.placeholder_message = message.into();
        self
    }
}

impl Default for ProjectionOptions {
    fn default() -> Self {
        Self {
            general_table_name: "General information".to_string(),
            placeholder_table_name: "Error".to_string(),
            placeholder_column: "Message".to_string(),
            placeholder_message: "No data extracted or invalid format".to_string(),
            value_column: "value".to_string(),
        }
    }
}
