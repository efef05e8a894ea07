use tango_types::View;

/// UI-side copy of what was last drawn
#[derive(Default)]
pub struct UiState {
    pub view: Option<View>,
}

impl UiState {
    pub fn new() -> Self {
        Self::default()
    }
}
