use serde::{Deserialize, Serialize};

/// Two hours
fn default_initial_seconds() -> u64 {
    2 * 60 * 60
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct TimerConfig {
    #[serde(default = "default_initial_seconds")]
    pub initial_seconds: u64,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            initial_seconds: default_initial_seconds(),
        }
    }
}
