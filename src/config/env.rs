//! Process environment snapshot.
//!
//! The environment is read exactly once at startup. Everything downstream
//! of the supervisor receives this snapshot, so a readiness report always
//! describes the environment the process actually started with, and tests
//! can inject a lookup instead of mutating global state.

/// Variable holding the Claude API key.
pub const CLAUDE_API_KEY: &str = "CLAUDE_API_KEY";
/// Variable holding the Airtable API key.
pub const AIRTABLE_API_KEY: &str = "AIRTABLE_API_KEY";
/// Variable overriding the configured listener port.
pub const PORT: &str = "PORT";
/// Variable selecting the deployment profile.
pub const APP_ENV: &str = "APP_ENV";

/// Variables that must be present for the service to be fully operational.
pub const REQUIRED_VARS: [&str; 2] = [CLAUDE_API_KEY, AIRTABLE_API_KEY];

/// Deployment profile, selected by APP_ENV. Unknown values fall back to
/// production.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    Development,
    Production,
    Testing,
}

impl Profile {
    fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("development") => Profile::Development,
            Some("testing") => Profile::Testing,
            _ => Profile::Production,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Profile::Development => "development",
            Profile::Production => "production",
            Profile::Testing => "testing",
        }
    }
}

/// Immutable view of the environment variables this service cares about.
#[derive(Clone)]
pub struct EnvSnapshot {
    pub claude_api_key: Option<String>,
    pub airtable_api_key: Option<String>,
    /// Listener port override, when PORT held a valid u16.
    pub port: Option<u16>,
    pub profile: Profile,
}

// Manual Debug so key material never reaches the logs.
impl std::fmt::Debug for EnvSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnvSnapshot")
            .field("claude_api_key", &mask(self.claude_api_key.as_deref()))
            .field("airtable_api_key", &mask(self.airtable_api_key.as_deref()))
            .field("port", &self.port)
            .field("profile", &self.profile)
            .finish()
    }
}

fn mask(value: Option<&str>) -> &'static str {
    if value.is_some() {
        "<set>"
    } else {
        "<unset>"
    }
}

impl EnvSnapshot {
    /// Capture the current process environment.
    pub fn capture() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a snapshot from an arbitrary lookup function.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        // Empty values count as unset.
        let get = |key: &str| lookup(key).filter(|value| !value.is_empty());

        let port = get(PORT).and_then(|raw| match raw.parse::<u16>() {
            Ok(port) => Some(port),
            Err(_) => {
                tracing::warn!(value = %raw, "Ignoring unparseable PORT override");
                None
            }
        });
        let profile = Profile::parse(get(APP_ENV).as_deref());

        Self {
            claude_api_key: get(CLAUDE_API_KEY),
            airtable_api_key: get(AIRTABLE_API_KEY),
            port,
            profile,
        }
    }

    /// Names of required variables missing from this snapshot.
    pub fn missing_required(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.claude_api_key.is_none() {
            missing.push(CLAUDE_API_KEY);
        }
        if self.airtable_api_key.is_none() {
            missing.push(AIRTABLE_API_KEY);
        }
        missing
    }

    pub fn has_all_required(&self) -> bool {
        self.missing_required().is_empty()
    }
}
