//! Link value objects produced by classification.

/// The four link families the bot understands.
///
/// Classification decisions branch exhaustively over this enum; the string
/// payload travels alongside it in [`Link`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkKind {
    /// A 115 shared-folder URL redeemable with a `(share_code, receive_code)` pair.
    Share,
    /// A plain `http(s)://` or `ftp://` URL submitted as an offline-download task.
    Generic,
    /// A `magnet:?xt=` URI.
    Magnet,
    /// An `ed2k://|` URI.
    Ed2k,
}

/// A classified link: a normalized string plus its inferred kind.
///
/// Links are value objects with no identity beyond their normalized string
/// form; deduplication compares the string only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub kind: LinkKind,
    pub href: String,
}

impl Link {
    pub fn new(kind: LinkKind, href: impl Into<String>) -> Self {
        Self {
            kind,
            href: href.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_equality_is_by_string() {
        let a = Link::new(LinkKind::Magnet, "magnet:?xt=urn:btih:AA");
        let b = Link::new(LinkKind::Magnet, "magnet:?xt=urn:btih:AA");
        assert_eq!(a, b);
    }

    #[test]
    fn test_link_kinds_are_distinct() {
        let a = Link::new(LinkKind::Generic, "http://example.com");
        let b = Link::new(LinkKind::Share, "http://example.com");
        assert_ne!(a, b);
    }
}
