use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use std::{num::NonZeroU64, time::Duration};

const DEFAULT_TIMEOUT_SECS: NonZeroU64 = match NonZeroU64::new(10) {
    Some(secs) => secs,
    None => unreachable!(),
};

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct Configuration {
    pub program: SmolStr,
    pub args: Vec<SmolStr>,
    /// Signing always runs under a timeout, so `0` is rejected
    pub timeout_secs: NonZeroU64,
}

impl Configuration {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.get())
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            program: SmolStr::new_static("node"),
            args: vec![SmolStr::new_static("sign.js")],
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}
