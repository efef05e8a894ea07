use crate::entry::VocabularyEntry;

#[derive(Debug, Clone)]
pub enum AppEvent {
    UiEvent(UiEvent),
    /// Snapshot of everything the UI shows
    Render(View),
    TimerUpdate {
        seconds_left: u64,
    },
    Notice(String),
    BackendReady,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEvent {
    Next,
    Previous,
    DismissQuotaNotice,
    ExportCard,
    Help,
    Close,
}

impl UiEvent {
    /// Parse a line typed by the user
    pub fn from_command(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "" | "n" | "next" => Some(UiEvent::Next),
            "p" | "prev" | "previous" => Some(UiEvent::Previous),
            "d" | "dismiss" => Some(UiEvent::DismissQuotaNotice),
            "a" | "anki" => Some(UiEvent::ExportCard),
            "h" | "help" | "?" => Some(UiEvent::Help),
            "q" | "quit" | "exit" => Some(UiEvent::Close),
            _ => None,
        }
    }
}

/// What the user sees after a state change
#[derive(Debug, Clone, Default)]
pub struct View {
    pub current: Option<VocabularyEntry>,
    /// 1-based position and total count
    pub position: Option<(usize, usize)>,
    pub fetching: bool,
    pub error: Option<String>,
    pub quota_notice: bool,
    pub storage_notice: Option<String>,
    pub seconds_left: u64,
}

impl View {
    pub fn can_go_previous(&self) -> bool {
        matches!(self.position, Some((current, _)) if current > 1)
    }

    pub fn can_go_next(&self) -> bool {
        !self.fetching
    }
}
