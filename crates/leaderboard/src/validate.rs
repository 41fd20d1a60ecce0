use serde_json::Value;

pub const DEFAULT_NAME: &str = "Player";
pub const MAX_NAME_CHARS: usize = 16;
pub const DEFAULT_LIMIT: usize = 10;
pub const MAX_LIMIT: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid Score")]
    InvalidScore,
    #[error("Invalid timeSeconds")]
    InvalidTime,
}

/// A submission that passed validation, ready to insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewScore {
    pub name: String,
    pub score: u64,
    pub time_seconds: u64,
}

/// Validate a `{name, score, timeSeconds}` body.
///
/// The name is trimmed and cut to 16 characters, falling back to "Player"
/// when empty. Score and time may be JSON numbers or numeric strings; they
/// must be finite and non-negative, and are floored.
pub fn validate_submission(body: &Value) -> Result<NewScore, ValidationError> {
    let name = display_name(body.get("name"));
    let score = whole_number(body.get("score")).ok_or(ValidationError::InvalidScore)?;
    let time_seconds = whole_number(body.get("timeSeconds")).ok_or(ValidationError::InvalidTime)?;
    Ok(NewScore {
        name,
        score,
        time_seconds,
    })
}

/// Listing size from a raw `limit` query value. Missing, zero or unparsable
/// values give the default; the result is clamped to `1..=50`.
pub fn clamp_limit(raw: Option<&str>) -> usize {
    let n = raw.map(numeric_string).unwrap_or(f64::NAN);
    if n.is_nan() || n == 0.0 {
        return DEFAULT_LIMIT;
    }
    n.clamp(1.0, MAX_LIMIT as f64) as usize
}

fn display_name(raw: Option<&Value>) -> String {
    let text = match raw {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    };
    let trimmed = text.trim();
    if trimmed.is_empty() {
        DEFAULT_NAME.to_string()
    } else {
        trimmed.chars().take(MAX_NAME_CHARS).collect()
    }
}

fn whole_number(raw: Option<&Value>) -> Option<u64> {
    let n = match raw? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => numeric_string(s),
        Value::Null => 0.0,
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::Array(_) | Value::Object(_) => return None,
    };
    if !n.is_finite() || n < 0.0 || n >= i64::MAX as f64 {
        return None;
    }
    Some(n.floor() as u64)
}

// Blank strings count as zero.
fn numeric_string(s: &str) -> f64 {
    let s = s.trim();
    if s.is_empty() {
        return 0.0;
    }
    s.parse().unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_numbers_and_numeric_strings() {
        let s = validate_submission(&json!({"name": "ace", "score": 120.9, "timeSeconds": "61"}))
            .unwrap();
        assert_eq!(
            s,
            NewScore {
                name: "ace".into(),
                score: 120,
                time_seconds: 61
            }
        );
    }

    #[test]
    fn name_is_trimmed_truncated_and_defaulted() {
        let long = validate_submission(&json!({
            "name": "  abcdefghijklmnopqrstuvwxyz  ", "score": 1, "timeSeconds": 1
        }))
        .unwrap();
        assert_eq!(long.name, "abcdefghijklmnop");

        let blank = validate_submission(&json!({"name": "   ", "score": 1, "timeSeconds": 1})).unwrap();
        assert_eq!(blank.name, "Player");

        let missing = validate_submission(&json!({"score": 1, "timeSeconds": 1})).unwrap();
        assert_eq!(missing.name, "Player");
    }

    #[test]
    fn name_limit_counts_chars_not_utf16_units() {
        let rockets = "\u{1F680}".repeat(20);
        let entry =
            validate_submission(&json!({"name": rockets, "score": 1, "timeSeconds": 1})).unwrap();
        assert_eq!(entry.name.chars().count(), MAX_NAME_CHARS);
        assert_eq!(entry.name, "\u{1F680}".repeat(16));
    }

    #[test]
    fn bad_score_rejected_before_time() {
        for score in [json!(-1), json!("abc"), json!([1]), json!({})] {
            assert_eq!(
                validate_submission(&json!({"score": score, "timeSeconds": -5})),
                Err(ValidationError::InvalidScore)
            );
        }
        assert_eq!(
            validate_submission(&json!({"timeSeconds": 5})),
            Err(ValidationError::InvalidScore)
        );
    }

    #[test]
    fn bad_time_rejected() {
        assert_eq!(
            validate_submission(&json!({"score": 10, "timeSeconds": "1e999"})),
            Err(ValidationError::InvalidTime)
        );
        assert_eq!(
            validate_submission(&json!({"score": 10, "timeSeconds": -0.5})),
            Err(ValidationError::InvalidTime)
        );
    }

    #[test]
    fn blank_and_null_count_as_zero() {
        let s = validate_submission(&json!({"score": "", "timeSeconds": null})).unwrap();
        assert_eq!((s.score, s.time_seconds), (0, 0));
    }

    #[test]
    fn error_messages_match_wire_format() {
        assert_eq!(ValidationError::InvalidScore.to_string(), "Invalid Score");
        assert_eq!(ValidationError::InvalidTime.to_string(), "Invalid timeSeconds");
    }

    #[test]
    fn limit_defaults_and_clamps() {
        assert_eq!(clamp_limit(None), 10);
        assert_eq!(clamp_limit(Some("0")), 10);
        assert_eq!(clamp_limit(Some("abc")), 10);
        assert_eq!(clamp_limit(Some("25")), 25);
        assert_eq!(clamp_limit(Some("500")), 50);
        assert_eq!(clamp_limit(Some("-3")), 1);
        assert_eq!(clamp_limit(Some("7.8")), 7);
    }
}
