use serde::{Deserialize, Serialize};

/// Configuration for the Access Gate.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateConfig {
    /// Name under which the client holds its content-password credential
    /// (default: "postpass")
    #[serde(default = "default_credential_name")]
    pub credential_name: String,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            credential_name: default_credential_name(),
        }
    }
}

fn default_credential_name() -> String {
    "postpass".to_string()
}
