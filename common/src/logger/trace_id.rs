/// Correlation id that follows one simulated day through its spans.
///
/// Unlike a request id in a networked service, this is just the day label
/// the caller already has (e.g. "2024-03-01") — no generator is needed.
#[derive(Clone, Debug)]
pub struct TraceId(String);

impl TraceId {
    pub fn new(v: impl Into<String>) -> Self {
        Self(v.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
