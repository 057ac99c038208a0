use crate::catalog::TypeCatalog;
use crate::result::{ValidationError, ValidationResult};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

pub const DEFAULT_ENTITY_PREFIX: &str = "Entity_Tanzu_";

static OPERATION_KEYWORD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\s*(query|mutation|subscription)\b").expect("operation keyword regex")
});

static INLINE_FRAGMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\.\.\.\s*on\s+([A-Za-z_][A-Za-z0-9_]*)").expect("inline fragment regex")
});

static IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[A-Za-z_][A-Za-z0-9_]*").expect("identifier regex"));

/// Identifiers that never count as selected fields
const NON_FIELD_KEYWORDS: [&str; 8] = [
    "query",
    "mutation",
    "subscription",
    "fragment",
    "on",
    "true",
    "false",
    "null",
];

#[derive(Debug, Clone)]
pub struct ValidatorOptions {
    /// Attach "Did you mean" hints for unknown type names
    pub suggest_fixes: bool,
    /// Identifiers starting with this prefix are checked as entity type names
    pub entity_prefix: String,
}

impl Default for ValidatorOptions {
    fn default() -> Self {
        Self {
            suggest_fixes: true,
            entity_prefix: DEFAULT_ENTITY_PREFIX.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct QueryValidator {
    options: ValidatorOptions,
}

impl QueryValidator {
    #[must_use]
    pub fn new(options: ValidatorOptions) -> Self {
        Self { options }
    }

    #[must_use]
    pub fn with_suggestions(mut self, suggest_fixes: bool) -> Self {
        self.options.suggest_fixes = suggest_fixes;
        self
    }

    #[must_use]
    pub fn options(&self) -> &ValidatorOptions {
        &self.options
    }

    /// Structural checks, plus type-name checks when a catalog is supplied.
    ///
    /// Without a catalog only the syntax checks run; the result can still be valid.
    pub fn validate(&self, text: &str, catalog: Option<&dyn TypeCatalog>) -> ValidationResult {
        if text.trim().is_empty() {
            return ValidationResult {
                valid: false,
                errors: vec![ValidationError::syntax("Query cannot be null or empty")],
                ..ValidationResult::default()
            };
        }

        let mut errors = Vec::new();
        let mut suggestions = Vec::new();

        let trimmed = text.trim_start();
        if !OPERATION_KEYWORD.is_match(trimmed) && !trimmed.starts_with('{') {
            errors.push(ValidationError::syntax(
                "Query must start with 'query', 'mutation', 'subscription', or '{'",
            ));
        }

        errors.extend(check_balance(text));

        match catalog {
            Some(catalog) => {
                self.check_type_names(text, catalog, &mut errors, &mut suggestions);
            }
            None => log::debug!("No schema available, skipping type validation"),
        }

        let field_count = count_fields(text);
        let estimated_complexity = field_count * (1 + max_brace_depth(text) / 2);

        ValidationResult {
            valid: errors.is_empty(),
            errors,
            suggestions,
            estimated_complexity,
            field_count,
        }
    }

    /// Like [`validate`](Self::validate), but the document must be a mutation
    pub fn validate_mutation(
        &self,
        text: &str,
        catalog: Option<&dyn TypeCatalog>,
    ) -> ValidationResult {
        let mut result = self.validate(text, catalog);
        if !text.trim().is_empty() && !is_mutation(text) {
            result.errors.insert(
                0,
                ValidationError::syntax("Mutation must start with 'mutation' keyword"),
            );
            result.valid = false;
        }
        result
    }

    fn check_type_names(
        &self,
        text: &str,
        catalog: &dyn TypeCatalog,
        errors: &mut Vec<ValidationError>,
        suggestions: &mut Vec<String>,
    ) {
        let mut reported: HashSet<&str> = HashSet::new();

        for captures in INLINE_FRAGMENT.captures_iter(text) {
            let Some(name) = captures.get(1).map(|m| m.as_str()) else {
                continue;
            };
            if catalog.has_type(name) || !reported.insert(name) {
                continue;
            }
            errors.push(ValidationError::unknown_type(
                name,
                format!("Unknown type '{name}' in inline fragment"),
            ));
            self.suggest(name, catalog, suggestions);
        }

        for name in self.entity_type_names(text) {
            if catalog.has_type(name) || !reported.insert(name) {
                continue;
            }
            errors.push(ValidationError::unknown_type(
                name,
                format!("Unknown entity type '{name}'"),
            ));
            self.suggest(name, catalog, suggestions);
        }
    }

    fn suggest(&self, name: &str, catalog: &dyn TypeCatalog, suggestions: &mut Vec<String>) {
        if !self.options.suggest_fixes {
            return;
        }
        let similar = catalog.similar_types(name);
        if !similar.is_empty() {
            suggestions.push(format!(
                "Unknown type '{name}'. Did you mean: {}?",
                similar.join(", ")
            ));
        }
    }

    /// Distinct identifiers shaped like entity type names, in order of first appearance
    fn entity_type_names<'t>(&self, text: &'t str) -> Vec<&'t str> {
        let prefix = self.options.entity_prefix.as_str();
        let mut seen = HashSet::new();

        IDENTIFIER
            .find_iter(text)
            .map(|m| m.as_str())
            .filter(|ident| {
                ident.len() > prefix.len()
                    && ident.starts_with(prefix)
                    && ident[prefix.len()..]
                        .chars()
                        .all(|c| c.is_ascii_alphabetic() || c == '_')
            })
            .filter(|ident| seen.insert(*ident))
            .collect()
    }
}

fn is_mutation(text: &str) -> bool {
    OPERATION_KEYWORD
        .captures(text)
        .and_then(|c| c.get(1))
        .is_some_and(|keyword| keyword.as_str().eq_ignore_ascii_case("mutation"))
}

/// One error per imbalanced delimiter pair; counts only, positions are not tracked
fn check_balance(text: &str) -> Vec<ValidationError> {
    let (mut braces, mut parens) = (0i64, 0i64);
    for c in text.chars() {
        match c {
            '{' => braces += 1,
            '}' => braces -= 1,
            '(' => parens += 1,
            ')' => parens -= 1,
            _ => {}
        }
    }

    let mut errors = Vec::new();
    if braces > 0 {
        errors.push(ValidationError::syntax(format!(
            "Unbalanced braces: missing {braces} closing brace(s)"
        )));
    } else if braces < 0 {
        errors.push(ValidationError::syntax(format!(
            "Unbalanced braces: extra {} closing brace(s)",
            -braces
        )));
    }
    if parens > 0 {
        errors.push(ValidationError::syntax(format!(
            "Unbalanced parentheses: missing {parens} closing parenthesis"
        )));
    } else if parens < 0 {
        errors.push(ValidationError::syntax(format!(
            "Unbalanced parentheses: extra {} closing parenthesis",
            -parens
        )));
    }
    errors
}

fn count_fields(text: &str) -> usize {
    IDENTIFIER
        .find_iter(text)
        .filter(|m| {
            let lowered = m.as_str().to_ascii_lowercase();
            !NON_FIELD_KEYWORDS.contains(&lowered.as_str())
        })
        .count()
}

fn max_brace_depth(text: &str) -> usize {
    let mut depth = 0i64;
    let mut max = 0i64;
    for c in text.chars() {
        match c {
            '{' => {
                depth += 1;
                max = max.max(depth);
            }
            '}' => depth -= 1,
            _ => {}
        }
    }
    usize::try_from(max).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complexity_estimate() {
        // foo, bar at depth 2: 2 * (1 + 2 / 2)
        let result = QueryValidator::default().validate("query { foo { bar } }", None);
        assert!(result.valid);
        assert_eq!(result.field_count, 2);
        assert_eq!(result.estimated_complexity, 4);
    }

    #[test]
    fn test_keywords_are_not_counted_as_fields() {
        let text = "query Q { a(flag: true, other: null) { ... on T { b } } }";
        // Q, a, flag, other, T, b
        assert_eq!(count_fields(text), 6);
        assert_eq!(max_brace_depth(text), 3);
    }

    #[test]
    fn test_keyword_must_end_at_word_boundary() {
        assert!(OPERATION_KEYWORD.is_match("  QUERY{ a }"));
        assert!(OPERATION_KEYWORD.is_match("mutation"));
        assert!(!OPERATION_KEYWORD.is_match("queryable { a }"));
    }

    #[test]
    fn test_entity_names_require_letters_after_prefix() {
        let validator = QueryValidator::default();
        let names = validator.entity_type_names(
            "Entity_Tanzu_A_Type Entity_Tanzu_ Entity_Tanzu_B2 Entity_Tanzu_A_Type xEntity_Tanzu_C",
        );
        assert_eq!(names, ["Entity_Tanzu_A_Type"]);
    }

    #[test]
    fn test_is_mutation() {
        assert!(is_mutation("  Mutation { a }"));
        assert!(!is_mutation("query { a }"));
        assert!(!is_mutation("{ a }"));
    }
}
