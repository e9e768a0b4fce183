// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Section data sources: the counts a [`PositionManager`](crate::PositionManager) lays out.

use alloc::vec::Vec;

/// Read-only view of a sectioned data set.
///
/// Implemented by whatever owns the actual items (typically a list adapter).
/// The mapping engine samples these values on every
/// [`PositionManager::invalidate`](crate::PositionManager::invalidate) and never
/// holds on to the source afterwards.
pub trait SectionDataSource {
    /// Returns the number of sections.
    fn section_count(&self) -> usize;

    /// Returns the number of items in `section`.
    ///
    /// Only called with `section < self.section_count()`.
    fn item_count(&self, section: usize) -> usize;

    /// Returns `true` if sections without items should still get a header.
    ///
    /// Defaults to `false`: empty sections vanish from the linear space.
    fn show_headers_for_empty_sections(&self) -> bool {
        false
    }
}

impl<T: SectionDataSource + ?Sized> SectionDataSource for &T {
    fn section_count(&self) -> usize {
        (**self).section_count()
    }

    fn item_count(&self, section: usize) -> usize {
        (**self).item_count(section)
    }

    fn show_headers_for_empty_sections(&self) -> bool {
        (**self).show_headers_for_empty_sections()
    }
}

/// An owned [`SectionDataSource`] backed by a vector of item counts.
///
/// Handy for hosts whose items already live in per-section collections and
/// only need to mirror their lengths.
///
/// ```rust
/// use understory_sectioned_list::{SectionCounts, SectionDataSource};
///
/// let mut counts = SectionCounts::new([3, 0, 2]);
/// assert_eq!(counts.section_count(), 3);
/// assert_eq!(counts.item_count(2), 2);
///
/// counts.set_item_count(1, 4);
/// assert_eq!(counts.item_count(1), 4);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SectionCounts {
    counts: Vec<usize>,
    show_empty_headers: bool,
}

impl SectionCounts {
    /// Creates a source with one section per entry of `counts`.
    ///
    /// Empty sections are hidden; see [`SectionCounts::with_empty_headers`].
    #[must_use]
    pub fn new<I>(counts: I) -> Self
    where
        I: IntoIterator<Item = usize>,
    {
        Self {
            counts: counts.into_iter().collect(),
            show_empty_headers: false,
        }
    }

    /// Returns this source with the empty-section header policy set to `show`.
    #[must_use]
    pub fn with_empty_headers(mut self, show: bool) -> Self {
        self.show_empty_headers = show;
        self
    }

    /// Sets whether sections without items still get a header.
    pub fn set_show_headers_for_empty_sections(&mut self, show: bool) {
        self.show_empty_headers = show;
    }

    /// Sets the item count of an existing section.
    ///
    /// # Panics
    ///
    /// Panics if `section` is out of bounds.
    pub fn set_item_count(&mut self, section: usize, count: usize) {
        self.counts[section] = count;
    }

    /// Appends a section holding `count` items and returns its index.
    pub fn push_section(&mut self, count: usize) -> usize {
        self.counts.push(count);
        self.counts.len() - 1
    }

    /// Returns the item counts, one entry per section.
    #[must_use]
    pub fn counts(&self) -> &[usize] {
        &self.counts
    }
}

impl SectionDataSource for SectionCounts {
    fn section_count(&self) -> usize {
        self.counts.len()
    }

    fn item_count(&self, section: usize) -> usize {
        self.counts[section]
    }

    fn show_headers_for_empty_sections(&self) -> bool {
        self.show_empty_headers
    }
}
