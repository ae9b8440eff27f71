//! Canonical structured event names used across `sse-listener`.

// Listener lifecycle events.
pub const SUBSCRIPTION_START_OK: &str = "subscription_start_ok";
pub const SUBSCRIPTION_START_REJECTED: &str = "subscription_start_rejected";
pub const SUBSCRIPTION_STOP_OK: &str = "subscription_stop_ok";
pub const SUBSCRIPTION_STOP_IGNORED: &str = "subscription_stop_ignored";

// Delivery and error-path events.
pub const STREAM_EVENT_FORWARDED: &str = "stream_event_forwarded";
pub const STREAM_EVENT_DROPPED: &str = "stream_event_dropped";
pub const STREAM_ERROR_TEARDOWN: &str = "stream_error_teardown";
pub const STREAM_ERROR_AFTER_STOP: &str = "stream_error_after_stop";

// In-memory transport events.
pub const MEMORY_STREAM_CREATE: &str = "memory_stream_create";
pub const MEMORY_REGISTER_AFTER_CLOSE: &str = "memory_register_after_close";
pub const MEMORY_UNREGISTER_MISSING: &str = "memory_unregister_missing";
pub const MEMORY_EMIT_AFTER_CLOSE: &str = "memory_emit_after_close";
