pub mod error;
pub mod field;
pub mod options;
pub mod render;
pub mod widget;

pub use error::{EmbedError, Result};
pub use field::{schema, FieldDescriptor, FieldKey, FieldKind, FieldText, FieldValue};
pub use options::{EmbedOptions, RenderMode};
pub use render::query_string;
pub use widget::{DecodeOutcome, EmbedWidget};

/// Name shown in the host's content picker
pub const PLUGIN_DISPLAY_NAME: &str = "Vimeo Video";

pub const PLUGIN_DESCRIPTION: &str = "Displays a vimeo video";
