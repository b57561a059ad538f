//! Webhook Handlers
