use serde::Deserialize;

/// Secrets read from the environment (`REDNOTE_` prefix)
#[derive(Deserialize)]
pub struct Environment {
    /// Raw `Cookie` header of a logged-in browser session
    #[serde(default)]
    pub cookie: String,
}
