//! Upstream promotion payload validation.

use serde_json::Value;
use tracing::debug;

use crate::domain::promotions::records::Promotion;

const REQUIRED_FIELDS: [&str; 2] = ["name", "code"];

/// Extract an active promotion from an upstream response body.
///
/// Accepts `{"promotion": {...}}`, `{"promotion": null}` or a bare promotion
/// object. Anything structurally wrong, and inactive promotions, yield `None`.
pub fn parse_promotion(body: &[u8]) -> Option<Promotion> {
    let value: Value = match serde_json::from_slice(body) {
        Ok(value) => value,
        Err(error) => {
            debug!("promotion body is not valid json: {error}");

            return None;
        }
    };

    let candidate = match value {
        Value::Object(mut object) => match object.remove("promotion") {
            Some(Value::Null) => return None,
            Some(inner @ Value::Object(_)) => inner,
            Some(_) => return None,
            None => Value::Object(object),
        },
        _ => return None,
    };

    if !has_required_fields(&candidate) {
        debug!("promotion body is missing required fields");

        return None;
    }

    match serde_json::from_value::<Promotion>(candidate) {
        Ok(promotion) if promotion.active => Some(promotion),
        Ok(_) => None,
        Err(error) => {
            debug!("promotion body has unexpected field types: {error}");

            None
        }
    }
}

fn has_required_fields(candidate: &Value) -> bool {
    REQUIRED_FIELDS
        .iter()
        .all(|field| candidate.get(field).is_some_and(Value::is_string))
        && candidate.get("active").is_some_and(Value::is_boolean)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::domain::promotions::records::DiscountType;

    use super::*;

    fn bytes(value: &Value) -> Vec<u8> {
        value.to_string().into_bytes()
    }

    fn spring_sale() -> Value {
        json!({
            "name": "Spring Sale",
            "code": "SPRING25",
            "startDate": "2026-03-01T00:00:00Z",
            "endDate": "2026-03-31T23:59:59Z",
            "discountAmount": 25,
            "discountType": "percentage",
            "appliesToMonthly": true,
            "appliesToYearly": false,
            "active": true
        })
    }

    #[test]
    fn parses_wrapped_promotion() {
        let promotion = parse_promotion(&bytes(&json!({ "promotion": spring_sale() })));

        let Some(promotion) = promotion else {
            unreachable!("expected a promotion");
        };

        assert_eq!(promotion.code, "SPRING25");
        assert_eq!(promotion.discount_type, Some(DiscountType::Percentage));
        assert_eq!(promotion.discount_amount, Some(25.0));
        assert!(promotion.applies_to_monthly);
        assert!(!promotion.applies_to_yearly);
    }

    #[test]
    fn parses_bare_promotion() {
        assert!(parse_promotion(&bytes(&spring_sale())).is_some());
    }

    #[test]
    fn optional_fields_may_be_absent() {
        let body = json!({ "name": "Flash", "code": "FLASH", "active": true });

        let promotion = parse_promotion(&bytes(&body));

        assert!(promotion.is_some_and(|promotion| promotion.end_date.is_none()));
    }

    #[test]
    fn null_promotion_is_none() {
        assert_eq!(parse_promotion(&bytes(&json!({ "promotion": null }))), None);
    }

    #[test]
    fn inactive_promotion_is_none() {
        let mut body = spring_sale();
        body["active"] = json!(false);

        assert_eq!(parse_promotion(&bytes(&body)), None);
    }

    #[test]
    fn malformed_json_is_none() {
        assert_eq!(parse_promotion(b"{\"promotion\": "), None);
        assert_eq!(parse_promotion(b"<html>oops</html>"), None);
    }

    #[test]
    fn missing_or_mistyped_required_fields_are_none() {
        for body in [
            json!({ "code": "X", "active": true }),
            json!({ "name": "X", "active": true }),
            json!({ "name": "X", "code": "X" }),
            json!({ "name": "X", "code": "X", "active": "yes" }),
            json!({ "name": 1, "code": "X", "active": true }),
            json!({ "promotion": "SPRING25" }),
            json!([spring_sale()]),
        ] {
            assert_eq!(parse_promotion(&bytes(&body)), None, "accepted {body}");
        }
    }

    #[test]
    fn unknown_discount_type_is_none() {
        let mut body = spring_sale();
        body["discountType"] = json!("bogo");

        assert_eq!(parse_promotion(&bytes(&body)), None);
    }
}
