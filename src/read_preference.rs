//! Read preference tag sets.
//!
//! Each `readPreferenceTags` option contributes exactly one tag set. Its
//! value is a ','-separated list of `key:value` pairs; pairs without a ':'
//! are dropped rather than rejected.

use indexmap::IndexMap;
use tracing::trace;

use crate::cursor::{Cursor, split_once_unescaped};

/// One group of tag key/value pairs used to select replica set members.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct TagSet {
    tags: IndexMap<String, String>,
}

impl TagSet {
    /// Parses one `readPreferenceTags` value.
    ///
    /// An empty value yields an empty tag set, which matches any member.
    ///
    /// # Examples
    ///
    /// ```
    /// use mongodb_uri::TagSet;
    ///
    /// let tags = TagSet::parse("dc:ny,rack:1,junk");
    /// assert_eq!(tags.get("dc"), Some("ny"));
    /// assert_eq!(tags.get("rack"), Some("1"));
    /// assert_eq!(tags.len(), 2);
    /// ```
    #[must_use]
    pub fn parse(input: &str) -> Self {
        let mut tags = IndexMap::new();
        let mut cursor = Cursor::new(input);

        while let Some(pair) = cursor.take_through(',') {
            Self::insert_pair(&mut tags, pair);
        }
        Self::insert_pair(&mut tags, cursor.take_rest());

        Self { tags }
    }

    /// Returns the value for a tag key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }

    /// Returns true if the set has no tags.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Returns the number of tags.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Returns an iterator over the tags in order of appearance.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.tags.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn insert_pair(tags: &mut IndexMap<String, String>, pair: &str) {
        if let Some((key, value)) = split_once_unescaped(pair, ':') {
            tags.insert(key.to_string(), value.to_string());
        }
    }
}

/// The ordered tag sets of a connection string.
///
/// Position `n` holds the tag set of the `n`th `readPreferenceTags` option.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ReadPreferenceTagSets {
    sets: Vec<TagSet>,
}

impl ReadPreferenceTagSets {
    /// Creates an empty sequence.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the tag set at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&TagSet> {
        self.sets.get(index)
    }

    /// Returns true if no tag sets were given.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// Returns the number of tag sets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sets.len()
    }

    /// Returns an iterator over the tag sets in order.
    pub fn iter(&self) -> std::slice::Iter<'_, TagSet> {
        self.sets.iter()
    }

    /// Returns the tag sets as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[TagSet] {
        &self.sets
    }

    pub(crate) fn push_raw(&mut self, value: &str) {
        let tag_set = TagSet::parse(value);
        trace!(
            target: "mongodb_uri::parse",
            position = self.sets.len(),
            tags = tag_set.len(),
            "parsed read preference tag set"
        );
        self.sets.push(tag_set);
    }
}

impl<'a> IntoIterator for &'a ReadPreferenceTagSets {
    type Item = &'a TagSet;
    type IntoIter = std::slice::Iter<'a, TagSet>;

    fn into_iter(self) -> Self::IntoIter {
        self.sets.iter()
    }
}
