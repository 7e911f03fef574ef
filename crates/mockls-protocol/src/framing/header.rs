//! Header block parsing.

use super::error::FramingError;

const CONTENT_LENGTH: &str = "content-length: ";
const CONTENT_TYPE: &str = "content-type: ";

/// Fields recognised in a frame header block.
///
/// Field names match case-insensitively and the last occurrence of a
/// repeated field wins. Lines that do not match a known field, including a
/// `Content-Length` whose value is not purely decimal digits, are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameHeader {
    content_length: Option<usize>,
    content_type: Option<String>,
}

impl FrameHeader {
    /// Parses a header block, excluding the terminating blank line.
    ///
    /// # Errors
    ///
    /// Returns [`FramingError::ContentLengthOutOfRange`] when a
    /// `Content-Length` value consists of digits but overflows `usize`.
    pub fn parse(block: &[u8]) -> Result<Self, FramingError> {
        let text = String::from_utf8_lossy(block);
        let mut header = Self::default();

        for line in text.split("\r\n") {
            if let Some(value) = field_value(line, CONTENT_LENGTH) {
                if let Some(length) = parse_length(value)? {
                    header.content_length = Some(length);
                }
            } else if let Some(value) = field_value(line, CONTENT_TYPE) {
                if !value.is_empty() {
                    header.content_type = Some(value.to_owned());
                }
            }
        }

        Ok(header)
    }

    /// Number of content bytes announced by the header, if any.
    #[must_use]
    pub const fn content_length(&self) -> Option<usize> {
        self.content_length
    }

    /// Announced content type. Stored for diagnostics only.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    pub(crate) fn require_content_length(&self) -> Result<usize, FramingError> {
        self.content_length
            .ok_or(FramingError::MissingContentLength)
    }
}

/// Returns the text after `prefix` when the line starts with it, ignoring
/// ASCII case.
fn field_value<'a>(line: &'a str, prefix: &str) -> Option<&'a str> {
    let name = line.get(..prefix.len())?;
    if name.eq_ignore_ascii_case(prefix) {
        line.get(prefix.len()..)
    } else {
        None
    }
}

fn parse_length(value: &str) -> Result<Option<usize>, FramingError> {
    if value.is_empty() || !value.bytes().all(|byte| byte.is_ascii_digit()) {
        return Ok(None);
    }
    value
        .parse()
        .map(Some)
        .map_err(|_| FramingError::ContentLengthOutOfRange {
            value: value.to_owned(),
        })
}
