//! Synthetic form submissions.

use jiff::{Timestamp, tz::TimeZone};
use serde_json::{Map, Value, json};

use crate::domain::webhooks::records::FormField;

/// Build the body posted to a webhook when testing a form.
///
/// Each named field gets a sample value picked from its type. Fields without
/// a name are skipped.
#[must_use]
pub fn build_test_payload(form_name: &str, fields: &[FormField], now: Timestamp) -> Value {
    let data: Map<String, Value> = fields
        .iter()
        .filter(|field| !field.name.trim().is_empty())
        .map(|field| (field.name.clone(), sample_value(field, now)))
        .collect();

    json!({
        "formName": form_name,
        "submittedAt": now.to_string(),
        "test": true,
        "data": data,
    })
}

fn sample_value(field: &FormField, now: Timestamp) -> Value {
    match field.field_type.trim().to_ascii_lowercase().as_str() {
        "email" => json!("test@example.com"),
        "tel" | "phone" => json!("+1 555 010 0000"),
        "number" => json!(42),
        "checkbox" | "boolean" => json!(true),
        "url" => json!("https://example.com"),
        "date" => json!(now.to_zoned(TimeZone::UTC).date().to_string()),
        "textarea" => json!("This is a test submission."),
        _ => {
            let label = field
                .label
                .as_deref()
                .filter(|label| !label.trim().is_empty())
                .unwrap_or(&field.name);

            json!(format!("Test {label}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn field(name: &str, field_type: &str) -> FormField {
        FormField {
            name: name.to_string(),
            field_type: field_type.to_string(),
            label: None,
        }
    }

    #[test]
    fn fills_fields_by_type() -> TestResult {
        let now: Timestamp = "2026-03-01T12:30:00Z".parse()?;

        let mut name = field("name", "text");
        name.label = Some("Full name".to_string());

        let payload = build_test_payload(
            "Contact",
            &[
                name,
                field("email", "Email"),
                field("age", "number"),
                field("subscribe", "checkbox"),
                field("when", "date"),
                field("", "text"),
            ],
            now,
        );

        assert_eq!(payload["formName"], json!("Contact"));
        assert_eq!(payload["submittedAt"], json!("2026-03-01T12:30:00Z"));
        assert_eq!(payload["test"], json!(true));
        assert_eq!(payload["data"]["name"], json!("Test Full name"));
        assert_eq!(payload["data"]["email"], json!("test@example.com"));
        assert_eq!(payload["data"]["age"], json!(42));
        assert_eq!(payload["data"]["subscribe"], json!(true));
        assert_eq!(payload["data"]["when"], json!("2026-03-01"));
        assert_eq!(payload["data"].as_object().map(Map::len), Some(5));

        Ok(())
    }

    #[test]
    fn unknown_types_use_the_field_name() {
        let payload = build_test_payload("Demo", &[field("genre", "")], Timestamp::UNIX_EPOCH);

        assert_eq!(payload["data"]["genre"], json!("Test genre"));
    }
}
