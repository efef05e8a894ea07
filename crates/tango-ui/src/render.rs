use std::fmt::Write;

use tango_config::ui::UiConfig;
use tango_types::{ImageRef, View};

pub const HELP: &str = "[n]ext  [p]rev  [d]ismiss  [a]nki  [h]elp  [q]uit";

/// `HH:MM:SS`
pub fn format_clock(seconds: u64) -> String {
    format!(
        "{:02}:{:02}:{:02}",
        seconds / 3600,
        (seconds % 3600) / 60,
        seconds % 60
    )
}

fn describe_image(image: &ImageRef) -> String {
    match image {
        ImageRef::Pending => "[no image]".to_string(),
        ImageRef::Failed => "[image unavailable]".to_string(),
        ImageRef::Data(data) => {
            let mime_type = image
                .split_data_url()
                .map(|(mime, _)| mime)
                .unwrap_or("image");
            format!("[{} {} KB]", mime_type, data.len() * 3 / 4 / 1024)
        }
    }
}

/// Full screen text for one view
pub fn render_view(view: &View, config: &UiConfig) -> String {
    let mut out = String::new();

    if let Some(error) = &view.error {
        let _ = writeln!(out, "!! {error}");
    }
    if view.quota_notice {
        let _ = writeln!(
            out,
            "!! Image quota exhausted, cards continue without pictures ([d] to dismiss)"
        );
    }
    if let Some(notice) = &view.storage_notice {
        let _ = writeln!(out, "!! {notice}");
    }

    match &view.current {
        Some(entry) => {
            let _ = writeln!(out);
            let _ = writeln!(out, "  {}  {}", entry.word, entry.phonetic);
            let _ = writeln!(out, "  {}", entry.translation);
            if config.show_examples {
                let _ = writeln!(out);
                let _ = writeln!(out, "  {}", entry.example);
                let _ = writeln!(out, "  {}", entry.example_translation);
            }
            let _ = writeln!(out, "  {}", describe_image(&entry.image));
        }
        None if view.fetching => {
            let _ = writeln!(out, "\n  Loading a new word...");
        }
        None => {
            let _ = writeln!(out, "\n  No cards yet, press [n] to fetch one.");
        }
    }

    let position = view
        .position
        .map(|(current, total)| format!("{current} / {total}"))
        .unwrap_or_else(|| "0 / 0".to_string());

    let prev = if view.can_go_previous() { "[p]rev" } else { " prev " };
    let next = if view.can_go_next() {
        "[n]ext"
    } else {
        " ...  "
    };

    let _ = writeln!(out);
    let _ = write!(
        out,
        "{prev}  {position}  {next}    {}",
        format_clock(view.seconds_left)
    );
    if view.fetching && view.current.is_some() {
        out.push_str("    loading...");
    }
    out.push('\n');

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tango_types::VocabularyEntry;

    fn entry(image: ImageRef) -> VocabularyEntry {
        VocabularyEntry {
            id: 1,
            word: "meadow".into(),
            phonetic: "/ˈmed.oʊ/".into(),
            translation: "lug".into(),
            example: "Cows graze in the meadow.".into(),
            example_translation: "Korovy pasutsya na lugu.".into(),
            image,
        }
    }

    #[test]
    fn clock_formats_hours() {
        assert_eq!(format_clock(7200), "02:00:00");
        assert_eq!(format_clock(7195), "01:59:55");
        assert_eq!(format_clock(0), "00:00:00");
    }

    #[test]
    fn loading_placeholder_without_card() {
        let view = View {
            fetching: true,
            seconds_left: 60,
            ..View::default()
        };
        let text = render_view(&view, &UiConfig::default());
        assert!(text.contains("Loading a new word"));
        assert!(text.contains("0 / 0"));
        assert!(text.contains(" ...  "));
    }

    #[test]
    fn card_with_banners() {
        let view = View {
            current: Some(entry(ImageRef::Failed)),
            position: Some((2, 5)),
            error: Some("Failed to fetch a new word".into()),
            quota_notice: true,
            seconds_left: 7195,
            ..View::default()
        };
        let text = render_view(&view, &UiConfig::default());

        assert!(text.starts_with("!! Failed to fetch a new word\n"));
        assert!(text.contains("Image quota exhausted"));
        assert!(text.contains("meadow"));
        assert!(text.contains("Korovy pasutsya na lugu."));
        assert!(text.contains("[image unavailable]"));
        assert!(text.contains("[p]rev  2 / 5  [n]ext    01:59:55"));
    }

    #[test]
    fn first_card_disables_previous() {
        let view = View {
            current: Some(entry(ImageRef::from_base64("image/jpeg", "QUJD"))),
            position: Some((1, 1)),
            ..View::default()
        };
        let config = UiConfig {
            show_examples: false,
        };
        let text = render_view(&view, &config);

        assert!(text.contains(" prev   1 / 1  [n]ext"));
        assert!(text.contains("[image/jpeg 0 KB]"));
        assert!(!text.contains("Cows graze"));
    }
}
