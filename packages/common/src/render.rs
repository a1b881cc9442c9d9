//! Embed markup for the Vimeo player.
//!
//! Color is stored on the widget but has never been part of the player URL;
//! it is left out here as well.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use url::form_urlencoded;
use url::Url;

use crate::error::{EmbedError, Result};
use crate::field::FieldValue;
use crate::options::{EmbedOptions, RenderMode};
use crate::widget::EmbedWidget;

/// Characters escaped in a single URL path segment
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'/')
    .add(b'%');

/// Player flags in emission order
pub fn query_string(widget: &EmbedWidget) -> String {
    form_urlencoded::Serializer::new(String::new())
        .append_pair("title", flag(&widget.show_title))
        .append_pair("byline", flag(&widget.show_byline))
        .append_pair("portrait", flag(&widget.show_portrait))
        .append_pair("autoplay", flag(&widget.autoplay))
        .append_pair("loop", flag(&widget.loop_video))
        .finish()
}

fn flag(value: &FieldValue<bool>) -> &'static str {
    if value.is_truthy() {
        "1"
    } else {
        "0"
    }
}

impl EmbedWidget {
    /// Render with default options. Never fails; empty or malformed values
    /// are interpolated as-is.
    pub fn render(&self) -> String {
        self.compatible_markup(&EmbedOptions::default())
    }

    /// Render with host options. Only strict mode can fail, when the base
    /// URL cannot take a path segment.
    pub fn render_with(&self, options: &EmbedOptions) -> Result<String> {
        log::trace!("rendering embed for video {:?} in {} mode", self.video_id, options.mode);
        let markup = match options.mode {
            RenderMode::Compatible => self.compatible_markup(options),
            RenderMode::Strict => {
                let src = strict_player_url(&options.player_base_url, self)?;
                iframe(
                    options,
                    &escape_attribute(&options.css_class),
                    &escape_attribute(&self.width.to_text()),
                    &escape_attribute(&self.height.to_text()),
                    &escape_attribute(&src),
                )
            }
        };
        Ok(markup)
    }

    fn compatible_markup(&self, options: &EmbedOptions) -> String {
        let src = format!(
            "{}{}?{}",
            options.player_base_url,
            self.video_id,
            query_string(self)
        );
        iframe(
            options,
            &options.css_class,
            &self.width.to_text(),
            &self.height.to_text(),
            &src,
        )
    }
}

fn strict_player_url(base: &str, widget: &EmbedWidget) -> Result<String> {
    let mut url = Url::parse(base)?;
    if url.cannot_be_a_base() {
        return Err(EmbedError::InvalidOptions(format!(
            "{base} cannot take a path segment"
        )));
    }
    url.set_query(None);
    url.set_fragment(None);

    let mut src = url.to_string();
    if !src.ends_with('/') {
        src.push('/');
    }
    src.push_str(&encode_path_segment(&widget.video_id));
    src.push('?');
    src.push_str(&query_string(widget));
    Ok(src)
}

/// Dot segments are encoded too, so a `.` or `..` id is never resolved away
fn encode_path_segment(segment: &str) -> String {
    match segment {
        "." => "%2E".to_string(),
        ".." => "%2E%2E".to_string(),
        _ => utf8_percent_encode(segment, PATH_SEGMENT).to_string(),
    }
}

fn iframe(options: &EmbedOptions, class: &str, width: &str, height: &str, src: &str) -> String {
    let mut markup =
        format!("<iframe class=\"{class}\" width=\"{width}\" height=\"{height}\" src=\"{src}\"");
    if options.allow_fullscreen {
        markup.push_str(" webkitAllowFullScreen mozallowfullscreen allowFullScreen");
    }
    markup.push_str("></iframe>");
    markup
}

fn escape_attribute(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
