//! The classification result consumed by the mixed dispatcher.

use super::link::{Link, LinkKind};

/// Four ordered, deduplicated sequences of link strings, one per [`LinkKind`].
///
/// Produced once per inbound message by [`crate::domain::classifier::classify`]
/// and read-only afterwards. Within each sequence first-seen order is
/// preserved; cross-sequence ordering carries no meaning.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassifiedLinks {
    pub share: Vec<String>,
    pub generic: Vec<String>,
    pub magnet: Vec<String>,
    pub ed2k: Vec<String>,
}

impl ClassifiedLinks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a link to the sequence matching its kind, unless an equal
    /// string is already present there.
    ///
    /// Returns `true` if the link was inserted.
    pub fn push(&mut self, link: Link) -> bool {
        let bucket = match link.kind {
            LinkKind::Share => &mut self.share,
            LinkKind::Generic => &mut self.generic,
            LinkKind::Magnet => &mut self.magnet,
            LinkKind::Ed2k => &mut self.ed2k,
        };

        if bucket.iter().any(|existing| *existing == link.href) {
            return false;
        }
        bucket.push(link.href);
        true
    }

    /// Returns `true` when no link of any kind was found.
    pub fn is_empty(&self) -> bool {
        self.share.is_empty()
            && self.generic.is_empty()
            && self.magnet.is_empty()
            && self.ed2k.is_empty()
    }

    /// Total number of classified links across all four sequences.
    pub fn len(&self) -> usize {
        self.share.len() + self.generic.len() + self.magnet.len() + self.ed2k.len()
    }
}
