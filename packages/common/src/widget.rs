//! The embed widget and its state-string codec.
//!
//! The persisted state is the nine field values joined with `|` in
//! [`FieldKey::ALL`] order, e.g. `12345|True|True|True||True|False|480|360`.
//! Values are not escaped in this form, so a video id or color containing
//! `|` produces a string that no longer decodes. Hosts that need arbitrary
//! text can use the escaped variant, which is not layout-compatible with
//! previously stored state.

use serde::{Deserialize, Serialize};

use crate::error::{EmbedError, Result};
use crate::field::{FieldKey, FieldValue};

const SEPARATOR: char = '|';
const ESCAPE: char = '\\';

/// Result of applying a state string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeOutcome {
    /// All nine fields were overwritten
    Applied,

    /// Wrong segment count; the widget is unchanged
    Ignored { segments: usize },
}

impl DecodeOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, DecodeOutcome::Applied)
    }
}

/// Vimeo embed configuration owned by one host content block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedWidget {
    pub video_id: String,
    pub show_title: FieldValue<bool>,
    pub show_byline: FieldValue<bool>,
    pub show_portrait: FieldValue<bool>,
    /// Control color as hex without `#`. Stored and persisted, never rendered.
    pub color: String,
    pub autoplay: FieldValue<bool>,
    pub loop_video: FieldValue<bool>,
    pub width: FieldValue<i32>,
    pub height: FieldValue<i32>,
}

impl Default for EmbedWidget {
    fn default() -> Self {
        Self::new()
    }
}

impl EmbedWidget {
    pub fn new() -> Self {
        Self {
            video_id: String::new(),
            show_title: FieldValue::Value(true),
            show_byline: FieldValue::Value(true),
            show_portrait: FieldValue::Value(true),
            color: String::new(),
            autoplay: FieldValue::Value(false),
            loop_video: FieldValue::Value(false),
            width: FieldValue::Value(480),
            height: FieldValue::Value(360),
        }
    }

    pub fn with_video_id(video_id: impl Into<String>) -> Self {
        Self {
            video_id: video_id.into(),
            ..Self::new()
        }
    }

    /// Read a field as state-string text
    pub fn get(&self, key: FieldKey) -> String {
        match key {
            FieldKey::VideoId => self.video_id.clone(),
            FieldKey::ShowTitle => self.show_title.to_text(),
            FieldKey::ShowByLine => self.show_byline.to_text(),
            FieldKey::ShowPortrait => self.show_portrait.to_text(),
            FieldKey::Color => self.color.clone(),
            FieldKey::Autoplay => self.autoplay.to_text(),
            FieldKey::Loop => self.loop_video.to_text(),
            FieldKey::Width => self.width.to_text(),
            FieldKey::Height => self.height.to_text(),
        }
    }

    /// Write a field from text. Typed fields keep unparsable text as raw.
    pub fn set(&mut self, key: FieldKey, text: &str) {
        match key {
            FieldKey::VideoId => self.video_id = text.to_string(),
            FieldKey::ShowTitle => self.show_title = FieldValue::from_text(text),
            FieldKey::ShowByLine => self.show_byline = FieldValue::from_text(text),
            FieldKey::ShowPortrait => self.show_portrait = FieldValue::from_text(text),
            FieldKey::Color => self.color = text.to_string(),
            FieldKey::Autoplay => self.autoplay = FieldValue::from_text(text),
            FieldKey::Loop => self.loop_video = FieldValue::from_text(text),
            FieldKey::Width => self.width = FieldValue::from_text(text),
            FieldKey::Height => self.height = FieldValue::from_text(text),
        }
    }

    pub fn encode_state(&self) -> String {
        FieldKey::ALL
            .iter()
            .map(|&key| self.get(key))
            .collect::<Vec<_>>()
            .join("|")
    }

    /// Apply a state string. Anything but exactly nine segments is ignored.
    pub fn decode_state(&mut self, state: &str) -> DecodeOutcome {
        let segments: Vec<&str> = state.split(SEPARATOR).collect();
        self.apply_segments(&segments)
    }

    /// Like [`decode_state`](Self::decode_state), reporting a bad segment count as an error
    pub fn try_decode_state(&mut self, state: &str) -> Result<()> {
        match self.decode_state(state) {
            DecodeOutcome::Applied => Ok(()),
            DecodeOutcome::Ignored { segments } => Err(EmbedError::SegmentCount {
                expected: FieldKey::ALL.len(),
                found: segments,
            }),
        }
    }

    /// State string with `\` and `|` escaped inside values
    pub fn encode_state_escaped(&self) -> String {
        FieldKey::ALL
            .iter()
            .map(|&key| escape_segment(&self.get(key)))
            .collect::<Vec<_>>()
            .join("|")
    }

    pub fn decode_state_escaped(&mut self, state: &str) -> DecodeOutcome {
        let segments = split_escaped(state);
        let segments: Vec<&str> = segments.iter().map(String::as_str).collect();
        self.apply_segments(&segments)
    }

    /// Check the fields the host marks as required
    pub fn validate(&self) -> Result<()> {
        for key in FieldKey::ALL.into_iter().filter(FieldKey::is_required) {
            if self.get(key).trim().is_empty() {
                return Err(EmbedError::MissingRequired(key));
            }
        }
        Ok(())
    }

    fn apply_segments(&mut self, segments: &[&str]) -> DecodeOutcome {
        if segments.len() != FieldKey::ALL.len() {
            log::debug!(
                "ignoring embed state with {} segments, expected {}",
                segments.len(),
                FieldKey::ALL.len()
            );
            return DecodeOutcome::Ignored {
                segments: segments.len(),
            };
        }

        for (key, segment) in FieldKey::ALL.into_iter().zip(segments) {
            self.set(key, segment);
        }
        DecodeOutcome::Applied
    }
}

fn escape_segment(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if c == ESCAPE || c == SEPARATOR {
            escaped.push(ESCAPE);
        }
        escaped.push(c);
    }
    escaped
}

fn split_escaped(state: &str) -> Vec<String> {
    let mut segments = vec![String::new()];
    let mut chars = state.chars();
    while let Some(c) = chars.next() {
        match c {
            ESCAPE => {
                // Trailing lone escape is kept literally
                let next = chars.next().unwrap_or(ESCAPE);
                if let Some(current) = segments.last_mut() {
                    current.push(next);
                }
            }
            SEPARATOR => segments.push(String::new()),
            _ => {
                if let Some(current) = segments.last_mut() {
                    current.push(c);
                }
            }
        }
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let widget = EmbedWidget::new();
        assert_eq!(widget.video_id, "");
        assert_eq!(widget.color, "");
        assert_eq!(widget.show_title, FieldValue::Value(true));
        assert_eq!(widget.show_byline, FieldValue::Value(true));
        assert_eq!(widget.show_portrait, FieldValue::Value(true));
        assert_eq!(widget.autoplay, FieldValue::Value(false));
        assert_eq!(widget.loop_video, FieldValue::Value(false));
        assert_eq!(widget.width, FieldValue::Value(480));
        assert_eq!(widget.height, FieldValue::Value(360));
    }

    #[test]
    fn test_defaults_match_schema() {
        let widget = EmbedWidget::new();
        for key in FieldKey::ALL {
            assert_eq!(widget.get(key), key.default_text(), "{key}");
        }
    }

    #[test]
    fn test_encode_state() {
        let mut widget = EmbedWidget::with_video_id("12345");
        widget.autoplay = FieldValue::Value(true);
        assert_eq!(widget.encode_state(), "12345|True|True|True||True|False|480|360");
    }

    #[test]
    fn test_encode_unset_fields_as_empty() {
        let mut widget = EmbedWidget::new();
        widget.width = FieldValue::Unset;
        widget.loop_video = FieldValue::Unset;
        assert_eq!(widget.encode_state(), "|True|True|True||False|||360");
    }

    #[test]
    fn test_round_trip() {
        let mut widget = EmbedWidget::with_video_id("76979871");
        widget.show_byline = FieldValue::Value(false);
        widget.color = "00adef".to_string();
        widget.loop_video = FieldValue::Value(true);
        widget.width = FieldValue::Value(640);
        widget.height = FieldValue::Raw("auto".to_string());

        let mut decoded = EmbedWidget::new();
        assert_eq!(decoded.decode_state(&widget.encode_state()), DecodeOutcome::Applied);
        assert_eq!(decoded, widget);
    }

    #[test]
    fn test_decode_wrong_arity_is_noop() {
        let mut widget = EmbedWidget::with_video_id("x");
        let before = widget.clone();

        assert_eq!(
            widget.decode_state("a|b|c"),
            DecodeOutcome::Ignored { segments: 3 }
        );
        assert_eq!(widget.video_id, "x");

        for state in ["", "1|2|3|4|5|6|7|8", "1|2|3|4|5|6|7|8|9|10"] {
            assert!(!widget.decode_state(state).is_applied());
        }
        assert_eq!(widget, before);
    }

    #[test]
    fn test_decode_keeps_raw_text() {
        let mut widget = EmbedWidget::new();
        widget.decode_state("abc|yes|False|true||1|0|wide|360");
        assert_eq!(widget.video_id, "abc");
        assert_eq!(widget.show_title, FieldValue::Raw("yes".to_string()));
        assert_eq!(widget.show_byline, FieldValue::Value(false));
        assert_eq!(widget.show_portrait, FieldValue::Raw("true".to_string()));
        assert!(!widget.show_portrait.is_truthy());
        assert_eq!(widget.autoplay, FieldValue::Raw("1".to_string()));
        assert_eq!(widget.width, FieldValue::Raw("wide".to_string()));
        assert_eq!(widget.height, FieldValue::Value(360));
        assert_eq!(widget.encode_state(), "abc|yes|False|true||1|0|wide|360");
    }

    #[test]
    fn test_decode_then_encode_is_byte_identical() {
        let state = "7|TRUE| false|True|00adef|False|1|+0480| 360";
        let mut widget = EmbedWidget::new();
        assert!(widget.decode_state(state).is_applied());
        assert_eq!(widget.encode_state(), state);
    }

    #[test]
    fn test_try_decode_reports_count() {
        let mut widget = EmbedWidget::new();
        assert_eq!(
            widget.try_decode_state("a|b"),
            Err(EmbedError::SegmentCount {
                expected: 9,
                found: 2
            })
        );
        assert!(widget.try_decode_state("1|True|True|True||False|False|480|360").is_ok());
        assert_eq!(widget.video_id, "1");
    }

    #[test]
    fn test_unescaped_separator_breaks_state() {
        let widget = EmbedWidget::with_video_id("12|34");
        let mut decoded = EmbedWidget::new();
        assert_eq!(
            decoded.decode_state(&widget.encode_state()),
            DecodeOutcome::Ignored { segments: 10 }
        );
    }

    #[test]
    fn test_escaped_round_trip() {
        let mut widget = EmbedWidget::with_video_id("12|34");
        widget.color = r"a\b|".to_string();

        let state = widget.encode_state_escaped();
        assert_eq!(state, r"12\|34|True|True|True|a\\b\||False|False|480|360");

        let mut decoded = EmbedWidget::new();
        assert!(decoded.decode_state_escaped(&state).is_applied());
        assert_eq!(decoded, widget);
    }

    #[test]
    fn test_escaped_decode_reads_plain_state() {
        let mut widget = EmbedWidget::new();
        assert!(widget
            .decode_state_escaped("99|True|False|True|ff0000|False|True|320|240")
            .is_applied());
        assert_eq!(widget.video_id, "99");
        assert_eq!(widget.height, FieldValue::Value(240));
    }

    #[test]
    fn test_get_set_by_key() {
        let mut widget = EmbedWidget::new();
        widget.set(FieldKey::Width, "800");
        widget.set(FieldKey::Autoplay, "True");
        assert_eq!(widget.width, FieldValue::Value(800));
        assert!(widget.autoplay.is_truthy());
        assert_eq!(widget.get(FieldKey::Width), "800");
    }

    #[test]
    fn test_validate_required_video_id() {
        assert_eq!(
            EmbedWidget::new().validate(),
            Err(EmbedError::MissingRequired(FieldKey::VideoId))
        );
        assert!(EmbedWidget::with_video_id("1").validate().is_ok());
    }

    #[test]
    fn test_json_round_trip() {
        let mut widget = EmbedWidget::with_video_id("42");
        widget.height = FieldValue::Unset;
        let json = serde_json::to_string(&widget).unwrap();
        let restored: EmbedWidget = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, widget);
    }
}
