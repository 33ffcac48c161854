use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct Configuration {
    pub content_length_limit: Option<usize>,
    /// `0` disables the timeout
    pub request_timeout_secs: u64,
}

impl Configuration {
    #[must_use]
    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_secs > 0).then(|| Duration::from_secs(self.request_timeout_secs))
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            content_length_limit: Some(1024 * 1024),
            request_timeout_secs: 30,
        }
    }
}
