use regex::Regex;
use std::sync::OnceLock;

/// Parses PostgreSQL constraint violation messages into structured pieces.
///
/// Postgres reports violations as free text plus a constraint name like
/// `users_email_key` or `items_job_id_fkey`; this extracts (entity, field)
/// from the name and the offending value from the DETAIL line.
pub struct ConstraintParser;

struct RegexPatterns {
    key_value: Regex,
    column_name: Regex,
    table_name: Regex,
}

impl RegexPatterns {
    fn new() -> Self {
        Self {
            // Matches "Key (field)=(value)" in PostgreSQL DETAIL lines
            key_value: Regex::new(r"Key \(([^)]+)\)=\(([^)]*)\)").unwrap(),
            column_name: Regex::new(r#"column "([^"]+)""#).unwrap(),
            table_name: Regex::new(r#"table "([^"]+)""#).unwrap(),
        }
    }
}

static REGEX_PATTERNS: OnceLock<RegexPatterns> = OnceLock::new();

impl ConstraintParser {
    fn patterns() -> &'static RegexPatterns {
        REGEX_PATTERNS.get_or_init(RegexPatterns::new)
    }

    /// Extracts (entity, field, value) from a unique violation.
    pub fn parse_unique_violation(
        message: &str,
        constraint_name: Option<&str>,
    ) -> Option<(String, String, String)> {
        if let Some(constraint) = constraint_name {
            if let Some((entity, field)) = Self::parse_constraint_name(constraint) {
                let value = Self::extract_value(message)
                    .unwrap_or_else(|| "duplicate_value".to_string());
                return Some((entity, field, value));
            }
        }

        let (field, value) = Self::extract_key_value(message)?;
        let entity =
            Self::extract_table(message).unwrap_or_else(|| "resource".to_string());
        Some((entity, field, value))
    }

    /// Extracts (entity, field) from a not-null violation.
    pub fn parse_not_null_violation(
        message: &str,
        _constraint_name: Option<&str>,
    ) -> Option<(String, String)> {
        let field = Self::patterns()
            .column_name
            .captures(message)?
            .get(1)?
            .as_str()
            .to_string();
        let entity =
            Self::extract_table(message).unwrap_or_else(|| "resource".to_string());
        Some((entity, field))
    }

    /// Extracts (entity, field, value) from a foreign key violation.
    pub fn parse_foreign_key_violation(
        message: &str,
        constraint_name: Option<&str>,
    ) -> Option<(String, String, String)> {
        let value = Self::extract_value(message).unwrap_or_default();
        if let Some(constraint) = constraint_name {
            if let Some((entity, field)) = Self::parse_constraint_name(constraint) {
                return Some((entity, field, value));
            }
        }
        let (field, value) = Self::extract_key_value(message)?;
        let entity =
            Self::extract_table(message).unwrap_or_else(|| "resource".to_string());
        Some((entity, field, value))
    }

    /// Splits a constraint name like `users_email_key` or
    /// `plate_orders_job_id_fkey` into (table, column).
    ///
    /// Table names may themselves contain underscores, so the split point is
    /// found by matching known table names first, longest prefix wins.
    fn parse_constraint_name(constraint: &str) -> Option<(String, String)> {
        let trimmed = constraint
            .strip_suffix("_key")
            .or_else(|| constraint.strip_suffix("_fkey"))
            .or_else(|| constraint.strip_suffix("_check"))
            .unwrap_or(constraint);

        const TABLES: &[&str] = &[
            "job_complexities",
            "plate_orders",
            "timesheets",
            "revisions",
            "items",
            "jobs",
            "users",
        ];

        for table in TABLES {
            if let Some(rest) = trimmed.strip_prefix(*table) {
                let field = rest.strip_prefix('_')?;
                if !field.is_empty() {
                    return Some((table.to_string(), field.to_string()));
                }
            }
        }

        // Unknown table: fall back to splitting on the first underscore.
        let (table, field) = trimmed.split_once('_')?;
        if field.is_empty() {
            return None;
        }
        Some((table.to_string(), field.to_string()))
    }

    fn extract_key_value(message: &str) -> Option<(String, String)> {
        let caps = Self::patterns().key_value.captures(message)?;
        Some((caps.get(1)?.as_str().to_string(), caps.get(2)?.as_str().to_string()))
    }

    fn extract_value(message: &str) -> Option<String> {
        Self::extract_key_value(message).map(|(_, value)| value)
    }

    fn extract_table(message: &str) -> Option<String> {
        Some(
            Self::patterns()
                .table_name
                .captures(message)?
                .get(1)?
                .as_str()
                .to_string(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_unique_violation_from_constraint_name() {
        let message = "duplicate key value violates unique constraint \"users_email_key\"\nDETAIL: Key (email)=(artist@example.com) already exists.";
        let result =
            ConstraintParser::parse_unique_violation(message, Some("users_email_key"));
        assert_eq!(
            result,
            Some((
                "users".to_string(),
                "email".to_string(),
                "artist@example.com".to_string()
            ))
        );
    }

    #[test]
    fn parses_multi_word_table_constraint() {
        let message = "duplicate key value violates unique constraint \"job_complexities_job_id_key\"\nDETAIL: Key (job_id)=(42) already exists.";
        let result = ConstraintParser::parse_unique_violation(
            message,
            Some("job_complexities_job_id_key"),
        );
        assert_eq!(
            result,
            Some((
                "job_complexities".to_string(),
                "job_id".to_string(),
                "42".to_string()
            ))
        );
    }

    #[test]
    fn parses_foreign_key_violation() {
        let message = "insert or update on table \"items\" violates foreign key constraint \"items_job_id_fkey\"\nDETAIL: Key (job_id)=(999) is not present in table \"jobs\".";
        let result = ConstraintParser::parse_foreign_key_violation(
            message,
            Some("items_job_id_fkey"),
        );
        assert_eq!(
            result,
            Some(("items".to_string(), "job_id".to_string(), "999".to_string()))
        );
    }

    #[test]
    fn parses_not_null_violation() {
        let message = "null value in column \"due_date\" of relation \"revisions\" violates not-null constraint";
        let result = ConstraintParser::parse_not_null_violation(message, None);
        assert_eq!(result.map(|(_, field)| field), Some("due_date".to_string()));
    }

    #[test]
    fn unknown_constraint_returns_none() {
        assert_eq!(ConstraintParser::parse_unique_violation("garbage", None), None);
    }
}
