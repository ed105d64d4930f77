//! Inbound message annotations consumed by the classifier.

/// A rich-text entity attached to an inbound message.
///
/// Chat transports mark some spans as literal hyperlinks independent of the
/// text they display; the classifier trusts those URLs at face value instead
/// of pattern-matching them out of the message body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageEntity {
    /// A span explicitly carrying a literal URL.
    TextLink(String),
    /// Any other entity kind; ignored by classification.
    Other,
}

impl MessageEntity {
    /// The carried URL for literal-link entities.
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::TextLink(url) => Some(url),
            Self::Other => None,
        }
    }
}
