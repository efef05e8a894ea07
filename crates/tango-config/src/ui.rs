use serde::{Deserialize, Serialize};

fn default_show_examples() -> bool {
    true
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct UiConfig {
    #[serde(default = "default_show_examples")]
    pub show_examples: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            show_examples: default_show_examples(),
        }
    }
}
