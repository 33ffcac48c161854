use serde::{Deserialize, Serialize};
use sonic_rs::Value;

/// Envelope every web API response is wrapped in
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ApiResponse<T = Value> {
    pub code: i64,
    #[serde(default)]
    pub success: bool,
    pub msg: Option<String>,
    pub data: Option<T>,
}
