use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorType {
    SyntaxError,
    UnknownType,
    UnknownField,
}

impl ErrorType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SyntaxError => "SYNTAX_ERROR",
            Self::UnknownType => "UNKNOWN_TYPE",
            Self::UnknownField => "UNKNOWN_FIELD",
        }
    }
}

impl std::fmt::Display for ErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    #[serde(rename = "type")]
    pub error_type: ErrorType,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
}

impl ValidationError {
    pub fn syntax(message: impl Into<String>) -> Self {
        Self {
            error_type: ErrorType::SyntaxError,
            message: message.into(),
            type_name: None,
        }
    }

    pub fn unknown_type(type_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error_type: ErrorType::UnknownType,
            message: message.into(),
            type_name: Some(type_name.into()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<ValidationError>,
    pub suggestions: Vec<String>,
    pub estimated_complexity: usize,
    pub field_count: usize,
}

impl ValidationResult {
    /// Messages of all errors joined into one line
    #[must_use]
    pub fn error_summary(&self) -> String {
        self.errors
            .iter()
            .map(|e| e.message.as_str())
            .collect::<Vec<_>>()
            .join("; ")
    }

    #[must_use]
    pub fn has_error(&self, error_type: ErrorType) -> bool {
        self.errors.iter().any(|e| e.error_type == error_type)
    }
}
