//! Declarative field rules and the engine that applies them.
//!
//! A schema is a slice of [`FieldSpec`]s. Each field has a [`Kind`] (the
//! JSON shape it must have), a [`Presence`] policy, and an ordered list of
//! [`Check`]s pairing a predicate with the message reported when it fails.
//!
//! Evaluation order per field:
//!
//! 1. Look up the canonical name, then each alias
//! 2. Absent: report `Required`, skip the field, or substitute the default
//! 3. Shape check; a mismatch reports one issue and skips the checks
//! 4. Every check runs; each failure reports its own message
//!
//! Issues accumulate across fields in declaration order. Keys not declared
//! in the schema are dropped from the output.

use chrono::DateTime;
use serde_json::{Map, Value};
use uuid::Uuid;

use super::issues::ValidationIssue;

pub const REQUIRED_MESSAGE: &str = "Required";
pub const INTEGER_MESSAGE: &str = "Expected integer, received float";
pub const UUID_MESSAGE: &str = "Invalid uuid";
pub const DATETIME_MESSAGE: &str = "Invalid datetime";
pub const NON_NEGATIVE_MESSAGE: &str = "Number must be greater than or equal to 0";
pub const VECTOR_RANGE_MESSAGE: &str = "Embedding values must fit in 32-bit floats";

/// JSON shape a field must have.
#[derive(Debug, Clone, Copy)]
pub enum Kind {
    String,
    Number,
    /// A string equal to one of the listed literals
    Enum(&'static [&'static str]),
    /// A nested object validated against its own table
    Object(&'static [FieldSpec]),
    /// An array of numbers representable as `f32`
    FloatVector,
    /// Anything, including `null`
    Any,
}

/// Literal substituted for an absent field before checks run.
#[derive(Debug, Clone, Copy)]
pub enum Fallback {
    Str(&'static str),
    Int(i64),
}

impl Fallback {
    fn to_value(self) -> Value {
        match self {
            Fallback::Str(s) => Value::String(s.to_string()),
            Fallback::Int(n) => Value::from(n),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Presence {
    Required,
    Optional,
    Default(Fallback),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rule {
    /// At least this many characters
    MinLength(usize),
    /// Number with no fractional part
    Integer,
    /// Strictly greater than zero
    Positive,
    NonNegative,
    /// Inclusive lower bound
    Min(f64),
    /// Inclusive upper bound
    Max(f64),
    /// Hyphenated UUID
    Uuid,
    /// RFC 3339 timestamp
    DateTime,
}

impl Rule {
    pub fn holds(self, value: &Value) -> bool {
        match self {
            Rule::MinLength(min) => value.as_str().is_some_and(|s| s.chars().count() >= min),
            Rule::Integer => value.as_f64().is_some_and(|n| n.is_finite() && n.fract() == 0.0),
            Rule::Positive => value.as_f64().is_some_and(|n| n > 0.0),
            Rule::NonNegative => value.as_f64().is_some_and(|n| n >= 0.0),
            Rule::Min(min) => value.as_f64().is_some_and(|n| n >= min),
            Rule::Max(max) => value.as_f64().is_some_and(|n| n <= max),
            Rule::Uuid => value.as_str().is_some_and(is_uuid),
            Rule::DateTime => value.as_str().is_some_and(is_datetime),
        }
    }
}

/// A predicate and the message reported when it fails.
#[derive(Debug, Clone, Copy)]
pub struct Check {
    pub rule: Rule,
    pub message: &'static str,
}

impl Check {
    pub const fn new(rule: Rule, message: &'static str) -> Self {
        Self { rule, message }
    }

    pub const fn integer() -> Self {
        Self::new(Rule::Integer, INTEGER_MESSAGE)
    }

    pub const fn uuid() -> Self {
        Self::new(Rule::Uuid, UUID_MESSAGE)
    }

    pub const fn datetime() -> Self {
        Self::new(Rule::DateTime, DATETIME_MESSAGE)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    /// Canonical wire name, also used in issue paths and output
    pub name: &'static str,
    /// Older names accepted on input
    pub aliases: &'static [&'static str],
    pub kind: Kind,
    pub presence: Presence,
    pub checks: &'static [Check],
}

impl FieldSpec {
    pub const fn required(name: &'static str, kind: Kind) -> Self {
        Self { name, aliases: &[], kind, presence: Presence::Required, checks: &[] }
    }

    pub const fn optional(name: &'static str, kind: Kind) -> Self {
        Self { name, aliases: &[], kind, presence: Presence::Optional, checks: &[] }
    }

    pub const fn with_default(name: &'static str, kind: Kind, fallback: Fallback) -> Self {
        Self { name, aliases: &[], kind, presence: Presence::Default(fallback), checks: &[] }
    }

    pub const fn aliases(mut self, aliases: &'static [&'static str]) -> Self {
        self.aliases = aliases;
        self
    }

    pub const fn checks(mut self, checks: &'static [Check]) -> Self {
        self.checks = checks;
        self
    }

    fn is_integer(&self) -> bool {
        self.checks.iter().any(|check| check.rule == Rule::Integer)
    }

    fn lookup<'v>(&self, object: &'v Map<String, Value>) -> Option<&'v Value> {
        object
            .get(self.name)
            .or_else(|| self.aliases.iter().find_map(|alias| object.get(*alias)))
    }
}

/// Validate `raw` against `fields`, returning the defaulted, normalized
/// object or every issue found.
pub fn validate_object(
    fields: &[FieldSpec],
    raw: &Value,
) -> Result<Map<String, Value>, Vec<ValidationIssue>> {
    let mut issues = Vec::new();
    let object = check_object(fields, raw, "", &mut issues);
    if issues.is_empty() { Ok(object) } else { Err(issues) }
}

fn check_object(
    fields: &[FieldSpec],
    raw: &Value,
    prefix: &str,
    issues: &mut Vec<ValidationIssue>,
) -> Map<String, Value> {
    let mut output = Map::new();
    let Some(object) = raw.as_object() else {
        issues.push(ValidationIssue::new(prefix, type_mismatch("object", raw)));
        return output;
    };

    for field in fields {
        let path = join_path(prefix, field.name);
        let value = match (field.lookup(object), field.presence) {
            (Some(value), _) => value.clone(),
            (None, Presence::Default(fallback)) => fallback.to_value(),
            (None, Presence::Optional) => continue,
            (None, Presence::Required) => {
                issues.push(ValidationIssue::new(path, REQUIRED_MESSAGE));
                continue;
            }
        };
        if let Some(value) = check_field(field, value, &path, issues) {
            output.insert(field.name.to_string(), value);
        }
    }

    output
}

fn check_field(
    field: &FieldSpec,
    value: Value,
    path: &str,
    issues: &mut Vec<ValidationIssue>,
) -> Option<Value> {
    let value = match field.kind {
        Kind::String if !value.is_string() => {
            issues.push(ValidationIssue::new(path, type_mismatch("string", &value)));
            return None;
        }
        Kind::Number if !value.is_number() => {
            issues.push(ValidationIssue::new(path, type_mismatch("number", &value)));
            return None;
        }
        Kind::Enum(options) => {
            let message = match value.as_str() {
                Some(s) if options.contains(&s) => None,
                Some(s) => Some(format!(
                    "Invalid enum value. Expected {}, received '{}'",
                    quote_all(options),
                    s
                )),
                None => {
                    Some(format!("Expected {}, received {}", quote_all(options), type_name(&value)))
                }
            };
            if let Some(message) = message {
                issues.push(ValidationIssue::new(path, message));
                return None;
            }
            value
        }
        Kind::Object(inner) => {
            if !value.is_object() {
                issues.push(ValidationIssue::new(path, type_mismatch("object", &value)));
                return None;
            }
            let before = issues.len();
            let nested = check_object(inner, &value, path, issues);
            if issues.len() > before {
                return None;
            }
            Value::Object(nested)
        }
        Kind::FloatVector => check_vector(value, path, issues)?,
        Kind::String | Kind::Number | Kind::Any => value,
    };

    let before = issues.len();
    for check in field.checks {
        if !check.rule.holds(&value) {
            issues.push(ValidationIssue::new(path, check.message));
        }
    }
    if issues.len() > before {
        return None;
    }

    if field.is_integer() { Some(normalize_integer(value)) } else { Some(value) }
}

fn check_vector(value: Value, path: &str, issues: &mut Vec<ValidationIssue>) -> Option<Value> {
    let Some(items) = value.as_array() else {
        issues.push(ValidationIssue::new(path, type_mismatch("array", &value)));
        return None;
    };

    let before = issues.len();
    for (i, item) in items.iter().enumerate() {
        let item_path = format!("{}.{}", path, i);
        match item.as_f64() {
            Some(n) if (n as f32).is_finite() => {}
            Some(_) => issues.push(ValidationIssue::new(item_path, VECTOR_RANGE_MESSAGE)),
            None => issues.push(ValidationIssue::new(item_path, type_mismatch("number", item))),
        }
    }
    if issues.len() > before { None } else { Some(value) }
}

/// `1000.0` becomes `1000` so integer fields deserialize into integer types.
fn normalize_integer(value: Value) -> Value {
    match value.as_f64() {
        Some(n) if value.is_f64() && n.abs() < i64::MAX as f64 => Value::from(n as i64),
        _ => value,
    }
}

fn is_uuid(s: &str) -> bool {
    s.len() == 36 && Uuid::try_parse(s).is_ok()
}

/// `YYYY-MM-DDTHH:MM:SS[.fraction]Z`, UTC only.
///
/// The shape check rejects offsets, a space or lowercase separator, and leap
/// seconds before chrono checks the calendar values.
fn is_datetime(s: &str) -> bool {
    let bytes = s.as_bytes();
    if bytes.len() < 20 || bytes[bytes.len() - 1] != b'Z' {
        return false;
    }
    let digits = |range: std::ops::Range<usize>| bytes[range].iter().all(u8::is_ascii_digit);
    let shape_ok = digits(0..4)
        && bytes[4] == b'-'
        && digits(5..7)
        && bytes[7] == b'-'
        && digits(8..10)
        && bytes[10] == b'T'
        && digits(11..13)
        && bytes[13] == b':'
        && digits(14..16)
        && bytes[16] == b':'
        && digits(17..19)
        && bytes[17] <= b'5';
    if !shape_ok {
        return false;
    }
    let fraction = &bytes[19..bytes.len() - 1];
    let fraction_ok = match fraction.split_first() {
        None => true,
        Some((b'.', rest)) => !rest.is_empty() && rest.iter().all(u8::is_ascii_digit),
        Some(_) => false,
    };
    fraction_ok && DateTime::parse_from_rfc3339(s).is_ok()
}

fn join_path(prefix: &str, name: &str) -> String {
    if prefix.is_empty() { name.to_string() } else { format!("{}.{}", prefix, name) }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn type_mismatch(expected: &str, value: &Value) -> String {
    format!("Expected {}, received {}", expected, type_name(value))
}

fn quote_all(options: &[&str]) -> String {
    options.iter().map(|option| format!("'{}'", option)).collect::<Vec<_>>().join(" | ")
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    const INNER: &[FieldSpec] = &[FieldSpec::required("when", Kind::String)
        .checks(&[Check::new(Rule::DateTime, "Bad when")])];

    const FIELDS: &[FieldSpec] = &[
        FieldSpec::required("name", Kind::String)
            .aliases(&["legacyName"])
            .checks(&[Check::new(Rule::MinLength(1), "Name is required")]),
        FieldSpec::with_default("count", Kind::Number, Fallback::Int(3))
            .checks(&[Check::integer(), Check::new(Rule::Positive, "Count must be positive")]),
        FieldSpec::optional("ratio", Kind::Number)
            .checks(&[Check::new(Rule::Min(0.0), "Ratio"), Check::new(Rule::Max(1.0), "Ratio")]),
        FieldSpec::with_default("flavor", Kind::Enum(&["sweet", "sour"]), Fallback::Str("sweet")),
        FieldSpec::optional("inner", Kind::Object(INNER)),
    ];

    #[test]
    fn test_defaults_are_applied() {
        let object = validate_object(FIELDS, &json!({"name": "x"})).unwrap();
        assert_eq!(object["count"], 3);
        assert_eq!(object["flavor"], "sweet");
        assert!(!object.contains_key("ratio"));
    }

    #[test]
    fn test_alias_maps_to_canonical_name() {
        let object = validate_object(FIELDS, &json!({"legacyName": "x"})).unwrap();
        assert_eq!(object["name"], "x");
        assert!(!object.contains_key("legacyName"));
    }

    #[test]
    fn test_unknown_keys_are_dropped() {
        let object = validate_object(FIELDS, &json!({"name": "x", "extra": true})).unwrap();
        assert!(!object.contains_key("extra"));
    }

    #[test]
    fn test_missing_required_field() {
        let issues = validate_object(FIELDS, &json!({})).unwrap_err();
        assert_eq!(issues, vec![ValidationIssue::new("name", REQUIRED_MESSAGE)]);
    }

    #[test]
    fn test_type_mismatch_skips_checks() {
        let issues = validate_object(FIELDS, &json!({"name": 7})).unwrap_err();
        assert_eq!(issues, vec![ValidationIssue::new("name", "Expected string, received number")]);
    }

    #[test]
    fn test_null_is_not_absent() {
        let issues = validate_object(FIELDS, &json!({"name": "x", "ratio": null})).unwrap_err();
        assert_eq!(issues[0].message, "Expected number, received null");
    }

    #[test]
    fn test_every_failed_check_is_reported() {
        let issues = validate_object(FIELDS, &json!({"name": "", "count": -1.5})).unwrap_err();
        let messages: Vec<&str> = issues.iter().map(|i| i.message.as_str()).collect();
        assert_eq!(messages, vec!["Name is required", INTEGER_MESSAGE, "Count must be positive"]);
    }

    #[test]
    fn test_integer_valued_float_is_normalized() {
        let object = validate_object(FIELDS, &json!({"name": "x", "count": 4.0})).unwrap();
        assert!(object["count"].is_i64());
        assert_eq!(object["count"], 4);
    }

    #[test]
    fn test_enum_messages() {
        let issues = validate_object(FIELDS, &json!({"name": "x", "flavor": "bitter"})).unwrap_err();
        assert_eq!(
            issues[0].message,
            "Invalid enum value. Expected 'sweet' | 'sour', received 'bitter'"
        );

        let issues = validate_object(FIELDS, &json!({"name": "x", "flavor": 1})).unwrap_err();
        assert_eq!(issues[0].message, "Expected 'sweet' | 'sour', received number");
    }

    #[test]
    fn test_nested_paths() {
        let issues =
            validate_object(FIELDS, &json!({"name": "x", "inner": {"when": "later"}})).unwrap_err();
        assert_eq!(issues, vec![ValidationIssue::new("inner.when", "Bad when")]);

        let issues = validate_object(FIELDS, &json!({"name": "x", "inner": {}})).unwrap_err();
        assert_eq!(issues, vec![ValidationIssue::new("inner.when", REQUIRED_MESSAGE)]);
    }

    #[test]
    fn test_root_must_be_object() {
        let issues = validate_object(FIELDS, &json!("nope")).unwrap_err();
        assert_eq!(issues, vec![ValidationIssue::new("", "Expected object, received string")]);
    }

    #[test]
    fn test_uuid_rule_requires_hyphenated_form() {
        assert!(Rule::Uuid.holds(&json!("123e4567-e89b-12d3-a456-426614174000")));
        assert!(!Rule::Uuid.holds(&json!("123e4567e89b12d3a456426614174000")));
        assert!(!Rule::Uuid.holds(&json!("not-a-uuid")));
        assert!(!Rule::Uuid.holds(&json!(42)));
    }

    #[test]
    fn test_datetime_rule() {
        assert!(Rule::DateTime.holds(&json!("2024-01-01T12:00:00Z")));
        assert!(Rule::DateTime.holds(&json!("2024-01-01T12:00:00.123Z")));
        assert!(!Rule::DateTime.holds(&json!("2024-01-01")));
        assert!(!Rule::DateTime.holds(&json!("not-a-timestamp")));
        assert!(!Rule::DateTime.holds(&json!(1704110400)));
    }

    #[test]
    fn test_datetime_rule_is_utc_only() {
        for rejected in [
            "2024-01-15T12:30:00+02:00",
            "2024-01-15T12:30:00.5-05:00",
            "2024-01-15 12:30:00Z",
            "2024-01-15t12:30:00z",
            "2024-01-15T12:30:00z",
            "2024-06-30T23:59:60Z",
            "2024-01-15T12:30Z",
            "2024-01-15T12:30:00.Z",
            "2024-02-30T12:30:00Z",
            "2024-01-15T24:00:00Z",
        ] {
            assert!(!Rule::DateTime.holds(&json!(rejected)), "{} was accepted", rejected);
        }
    }

    #[test]
    fn test_vector_items() {
        const VECTOR: &[FieldSpec] = &[FieldSpec::required("v", Kind::FloatVector)];
        assert!(validate_object(VECTOR, &json!({"v": [0.1, 0.2, 3]})).is_ok());

        let issues = validate_object(VECTOR, &json!({"v": [0.1, "x", 1e300]})).unwrap_err();
        assert_eq!(
            issues,
            vec![
                ValidationIssue::new("v.1", "Expected number, received string"),
                ValidationIssue::new("v.2", VECTOR_RANGE_MESSAGE),
            ]
        );

        let issues = validate_object(VECTOR, &json!({"v": "0.1,0.2"})).unwrap_err();
        assert_eq!(issues[0].message, "Expected array, received string");
    }
}
