use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::EmbedError;

/// Key of one configurable field, in state-string order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldKey {
    #[serde(rename = "Video ID")]
    VideoId,
    #[serde(rename = "Show Title")]
    ShowTitle,
    #[serde(rename = "Show ByLine")]
    ShowByLine,
    #[serde(rename = "Show Portrait")]
    ShowPortrait,
    #[serde(rename = "Color")]
    Color,
    #[serde(rename = "Allow Autoplay")]
    Autoplay,
    #[serde(rename = "Loop Video")]
    Loop,
    #[serde(rename = "Video Width")]
    Width,
    #[serde(rename = "Video Height")]
    Height,
}

impl FieldKey {
    /// All keys in the fixed order used by the state string
    pub const ALL: [FieldKey; 9] = [
        FieldKey::VideoId,
        FieldKey::ShowTitle,
        FieldKey::ShowByLine,
        FieldKey::ShowPortrait,
        FieldKey::Color,
        FieldKey::Autoplay,
        FieldKey::Loop,
        FieldKey::Width,
        FieldKey::Height,
    ];

    /// Key text as seen by the host property editor
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKey::VideoId => "Video ID",
            FieldKey::ShowTitle => "Show Title",
            FieldKey::ShowByLine => "Show ByLine",
            FieldKey::ShowPortrait => "Show Portrait",
            FieldKey::Color => "Color",
            FieldKey::Autoplay => "Allow Autoplay",
            FieldKey::Loop => "Loop Video",
            FieldKey::Width => "Video Width",
            FieldKey::Height => "Video Height",
        }
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            FieldKey::VideoId | FieldKey::Color => FieldKind::Text,
            FieldKey::ShowTitle
            | FieldKey::ShowByLine
            | FieldKey::ShowPortrait
            | FieldKey::Autoplay
            | FieldKey::Loop => FieldKind::Boolean,
            FieldKey::Width | FieldKey::Height => FieldKind::Number,
        }
    }

    /// Only the video id is flagged for host-side validation
    pub fn is_required(&self) -> bool {
        matches!(self, FieldKey::VideoId)
    }

    /// Default value in state-string form
    pub fn default_text(&self) -> &'static str {
        match self {
            FieldKey::VideoId | FieldKey::Color => "",
            FieldKey::ShowTitle | FieldKey::ShowByLine | FieldKey::ShowPortrait => "True",
            FieldKey::Autoplay | FieldKey::Loop => "False",
            FieldKey::Width => "480",
            FieldKey::Height => "360",
        }
    }

    /// Help text for the property editor
    pub fn description(&self) -> &'static str {
        match self {
            FieldKey::VideoId => "The Vimeo video ID",
            FieldKey::ShowTitle => "Show the title on the video",
            FieldKey::ShowByLine => "Show the user's byline on the video",
            FieldKey::ShowPortrait => "Show the user's portrait on the video",
            FieldKey::Color => "Color of the video controls, without the leading #",
            FieldKey::Autoplay => {
                "Play the video automatically on load. This won't work on some devices"
            }
            FieldKey::Loop => "Play the video again when it reaches the end",
            FieldKey::Width => "The video width",
            FieldKey::Height => "The video height",
        }
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldKey {
    type Err = EmbedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| EmbedError::UnknownField(s.to_string()))
    }
}

/// Semantic type of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Boolean,
    Number,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Text => write!(f, "text"),
            FieldKind::Boolean => write!(f, "boolean"),
            FieldKind::Number => write!(f, "number"),
        }
    }
}

/// Schema entry handed to the host for enumeration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub key: FieldKey,
    pub kind: FieldKind,
    pub required: bool,
    /// Default in state-string form
    pub default: String,
    pub description: String,
}

impl From<FieldKey> for FieldDescriptor {
    fn from(key: FieldKey) -> Self {
        Self {
            key,
            kind: key.kind(),
            required: key.is_required(),
            default: key.default_text().to_string(),
            description: key.description().to_string(),
        }
    }
}

/// The nine field descriptors in fixed order
pub fn schema() -> Vec<FieldDescriptor> {
    FieldKey::ALL.into_iter().map(FieldDescriptor::from).collect()
}

/// Value held by a typed field.
///
/// Only the canonical text of `T` becomes `Value`; any other text is kept
/// verbatim in `Raw`, so decoding then encoding a state string reproduces it
/// byte for byte. `Raw` never holds canonical or empty text when built
/// through [`FieldValue::from_text`] or deserialized.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(untagged)]
#[serde(
    from = "StoredValue<T>",
    bound(deserialize = "T: Deserialize<'de> + FieldText")
)]
pub enum FieldValue<T> {
    Value(T),
    Raw(String),
    #[default]
    Unset,
}

/// JSON shape of a field value before raw text is normalized
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredValue<T> {
    Value(T),
    Text(String),
    Unset,
}

impl<T: FieldText> From<StoredValue<T>> for FieldValue<T> {
    fn from(stored: StoredValue<T>) -> Self {
        match stored {
            StoredValue::Value(value) => FieldValue::Value(value),
            StoredValue::Text(text) => FieldValue::from_text(&text),
            StoredValue::Unset => FieldValue::Unset,
        }
    }
}

impl<T: FieldText> FieldValue<T> {
    /// Parse state-string text; empty text means unset
    pub fn from_text(text: &str) -> Self {
        if text.is_empty() {
            return FieldValue::Unset;
        }
        match T::parse_text(text) {
            Some(value) => FieldValue::Value(value),
            None => FieldValue::Raw(text.to_string()),
        }
    }

    pub fn to_text(&self) -> String {
        match self {
            FieldValue::Value(value) => value.format_text(),
            FieldValue::Raw(text) => text.clone(),
            FieldValue::Unset => String::new(),
        }
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            FieldValue::Value(value) => Some(value),
            _ => None,
        }
    }
}

impl FieldValue<bool> {
    /// True only for a stored boolean `true`; unset and raw text count as false
    pub fn is_truthy(&self) -> bool {
        matches!(self, FieldValue::Value(true))
    }
}

impl<T> From<T> for FieldValue<T> {
    fn from(value: T) -> Self {
        FieldValue::Value(value)
    }
}

impl<T: FieldText> fmt::Display for FieldValue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

/// Conversion between a native field type and its state-string text.
///
/// `parse_text` accepts exactly what `format_text` produces.
pub trait FieldText: Sized {
    fn parse_text(text: &str) -> Option<Self>;
    fn format_text(&self) -> String;
}

impl FieldText for bool {
    fn parse_text(text: &str) -> Option<Self> {
        match text {
            "True" => Some(true),
            "False" => Some(false),
            _ => None,
        }
    }

    fn format_text(&self) -> String {
        let text = if *self { "True" } else { "False" };
        text.to_string()
    }
}

impl FieldText for i32 {
    fn parse_text(text: &str) -> Option<Self> {
        let value: i32 = text.parse().ok()?;
        (value.to_string() == text).then_some(value)
    }

    fn format_text(&self) -> String {
        self.to_string()
    }
}
