use tango_config::ui::UiConfig;
use tango_types::AppEvent;

use crate::render::{HELP, format_clock, render_view};
use crate::state::UiState;

/// Apply a backend event, returning text to print if the screen changed
pub fn handle_events(event: AppEvent, state: &mut UiState, config: &UiConfig) -> Option<String> {
    match event {
        AppEvent::Render(view) => {
            tracing::debug!("[UI] Render at {:?}", view.position);
            let text = render_view(&view, config);
            state.view = Some(view);
            Some(text)
        }
        AppEvent::TimerUpdate { seconds_left } => {
            if let Some(view) = state.view.as_mut() {
                view.seconds_left = seconds_left;
            }
            // Whole minutes only
            if seconds_left % 60 == 0 {
                Some(format!("time left {}\n", format_clock(seconds_left)))
            } else {
                None
            }
        }
        AppEvent::Notice(message) => Some(format!("-- {message}\n")),
        AppEvent::BackendReady => Some(format!("{HELP}\n")),
        AppEvent::UiEvent(_) => None,
    }
}
