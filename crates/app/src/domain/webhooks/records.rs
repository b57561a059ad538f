//! Webhook Records

use serde::{Deserialize, Serialize};

/// A field on a form whose webhook is being tested.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FormField {
    pub name: String,

    #[serde(rename = "type", default)]
    pub field_type: String,

    #[serde(default)]
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookTest {
    pub url: String,
    pub form_name: String,
    pub fields: Vec<FormField>,
}

/// How the webhook endpoint answered the test submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookOutcome {
    pub success: bool,
    pub status: u16,
    pub status_text: String,
}
