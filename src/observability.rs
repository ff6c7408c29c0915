use biometrics::{Collector, Counter, Moments};

pub(crate) static CLIENT_REQUESTS: Counter = Counter::new("gemchat.client.requests");
pub(crate) static CLIENT_REQUEST_ERRORS: Counter = Counter::new("gemchat.client.request_errors");
pub(crate) static CLIENT_REQUEST_DURATION: Moments =
    Moments::new("gemchat.client.request_duration_seconds");

pub(crate) static CHAT_TURNS: Counter = Counter::new("gemchat.chat.turns");
pub(crate) static CHAT_TURN_FAILURES: Counter = Counter::new("gemchat.chat.turn_failures");
pub(crate) static CHAT_USAGE_MISSING: Counter = Counter::new("gemchat.chat.usage_missing");
pub(crate) static CHAT_SKIPPED_INPUTS: Counter = Counter::new("gemchat.chat.skipped_inputs");

/// Register this crate's biometrics with the provided collector.
pub fn register_biometrics(collector: Collector) {
    collector.register_counter(&CLIENT_REQUESTS);
    collector.register_counter(&CLIENT_REQUEST_ERRORS);
    collector.register_moments(&CLIENT_REQUEST_DURATION);

    collector.register_counter(&CHAT_TURNS);
    collector.register_counter(&CHAT_TURN_FAILURES);
    collector.register_counter(&CHAT_USAGE_MISSING);
    collector.register_counter(&CHAT_SKIPPED_INPUTS);
}
