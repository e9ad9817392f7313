//! Target environment → endpoint resolution.
//!
//! `production` and `dev` map to fixed hosts; any other selector is
//! treated as a subdomain token of the custom-environment host template.
//! All three share the same pipeline path.

const PIPELINE_PATH: &str = "/v2/PipelineExecution/18546128-a4a6-411b-8b5c-23b64beaee01";

const PRODUCTION_HOST: &str = "https://api.airia.ai";
const DEV_HOST: &str = "https://dev.api.airiadev.ai";

/// Scoring environment selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Production,
    Dev,
    /// Arbitrary subdomain token, e.g. "acme" → https://acme.api.airia.ai
    Custom(String),
}

impl Environment {
    /// Interpret a selector string: "production" and "dev" are fixed,
    /// anything else is a custom subdomain token.
    pub fn from_selector(selector: &str) -> Self {
        match selector {
            "production" => Environment::Production,
            "dev" => Environment::Dev,
            other => Environment::Custom(other.to_string()),
        }
    }

    /// The selector token as sent to the proxy.
    pub fn selector(&self) -> &str {
        match self {
            Environment::Production => "production",
            Environment::Dev => "dev",
            Environment::Custom(token) => token,
        }
    }

    /// Full endpoint URL for a direct call.
    pub fn endpoint(&self) -> String {
        match self {
            Environment::Production => format!("{}{}", PRODUCTION_HOST, PIPELINE_PATH),
            Environment::Dev => format!("{}{}", DEV_HOST, PIPELINE_PATH),
            Environment::Custom(token) => {
                format!("https://{}.api.airia.ai{}", token, PIPELINE_PATH)
            }
        }
    }
}

impl Default for Environment {
    fn default() -> Self {
        Environment::Production
    }
}
