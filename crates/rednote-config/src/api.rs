use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct Configuration {
    /// Overrides the host of the web API
    pub host: Option<SmolStr>,
    /// Overrides the browser User-Agent of the header template
    pub user_agent: Option<SmolStr>,
}
