// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Header-location table: an immutable snapshot of the linear layout.

use alloc::vec::Vec;
use core::ops::Range;

use hashbrown::HashMap;

use crate::{CollapseState, ItemCoord, SectionDataSource};

/// Read-only position queries handed to item views.
///
/// Views usually only need to know whether their position is a header and
/// where inside its section it falls. Both [`HeaderTable`] and
/// [`PositionManager`](crate::PositionManager) implement this, so a view can be
/// given either the live manager or a pinned snapshot.
pub trait PositionLookup {
    /// Returns `true` if `position` is a section header.
    fn is_header(&self, position: usize) -> bool;

    /// Maps a linear position to its section coordinate.
    fn relative_position(&self, position: usize) -> Option<ItemCoord>;
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct HeaderEntry {
    /// Linear position of the header.
    position: usize,
    /// Section the header belongs to.
    section: usize,
    /// Items laid out after the header: zero when collapsed.
    visible_items: usize,
}

/// The linear layout of a sectioned list at one point in time.
///
/// The linear space interleaves each visible section's header with its
/// visible items, in section order. A section is laid out as:
///
/// - header only, if it is collapsed (regardless of its item count);
/// - header followed by all of its items, if it has items or the source asks
///   for headers on empty sections;
/// - nothing at all otherwise.
///
/// A table is built in one pass by [`HeaderTable::build`] and never mutated
/// afterwards. [`PositionManager`](crate::PositionManager) keeps the current
/// table behind an [`Arc`](alloc::sync::Arc) and swaps in a fresh one on every
/// invalidation, so a snapshot held by a reader stays self-consistent.
///
/// Forward lookups (`position → section`) binary search the ascending header
/// positions; reverse lookups (`section → position`) go through a hash index
/// built alongside them.
///
/// ```rust
/// use understory_sectioned_list::{CollapseState, HeaderTable, ItemCoord, SectionCounts};
///
/// let source = SectionCounts::new([2, 0, 3]);
/// let table = HeaderTable::build(&source, &CollapseState::new());
///
/// // Section 1 is empty and hidden: [h0, 0, 1, h2, 0, 1, 2]
/// assert_eq!(table.len(), 7);
/// assert_eq!(table.section_header_index(1), None);
/// assert_eq!(table.relative_position(4), Some(ItemCoord::item(2, 0)));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HeaderTable {
    entries: Vec<HeaderEntry>,
    /// Section index to index into `entries`.
    by_section: HashMap<usize, usize>,
    /// Item counts as sampled from the source, one per section.
    item_counts: Vec<usize>,
    len: usize,
}

impl HeaderTable {
    /// Creates a table with no sections.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Lays out `source` with the sections in `collapsed` folded to their headers.
    ///
    /// # Panics
    ///
    /// Panics if the laid-out headers and items do not fit in `usize`
    /// positions, for example when a visible section reports `usize::MAX` items.
    #[must_use]
    pub fn build<S>(source: &S, collapsed: &CollapseState) -> Self
    where
        S: SectionDataSource + ?Sized,
    {
        let section_count = source.section_count();
        let show_empty = source.show_headers_for_empty_sections();

        let mut entries = Vec::with_capacity(section_count);
        let mut by_section = HashMap::with_capacity(section_count);
        let mut item_counts = Vec::with_capacity(section_count);
        let mut count = 0_usize;

        for section in 0..section_count {
            let items = source.item_count(section);
            item_counts.push(items);

            let visible_items = if collapsed.is_collapsed(section) {
                0
            } else if show_empty || items > 0 {
                items
            } else {
                continue;
            };

            by_section.insert(section, entries.len());
            entries.push(HeaderEntry {
                position: count,
                section,
                visible_items,
            });
            let Some(next) = visible_items
                .checked_add(1)
                .and_then(|span| count.checked_add(span))
            else {
                panic!("sectioned list layout overflows usize at section {section}");
            };
            count = next;
        }

        Self {
            entries,
            by_section,
            item_counts,
            len: count,
        }
    }

    /// Returns the number of linear positions (headers plus visible items).
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the linear space is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of sections that have a visible header.
    #[must_use]
    pub fn header_count(&self) -> usize {
        self.entries.len()
    }

    /// Returns the section count sampled when this table was built.
    #[must_use]
    pub fn section_count(&self) -> usize {
        self.item_counts.len()
    }

    /// Returns the item count of `section` sampled when this table was built.
    ///
    /// This is the data source's count, including items hidden by collapsing.
    #[must_use]
    pub fn item_count(&self, section: usize) -> Option<usize> {
        self.item_counts.get(section).copied()
    }

    /// Returns `true` if `position` is a section header.
    #[must_use]
    pub fn is_header(&self, position: usize) -> bool {
        self.entry_at(position).is_some()
    }

    /// Returns the section whose header sits at `position`.
    ///
    /// Returns `None` both for item positions and for positions past the end.
    #[must_use]
    pub fn section_id(&self, position: usize) -> Option<usize> {
        self.entry_at(position).map(|entry| entry.section)
    }

    /// Returns the linear position of `section`'s header.
    ///
    /// Returns `None` if the section does not exist or is hidden because it
    /// has no items.
    #[must_use]
    pub fn section_header_index(&self, section: usize) -> Option<usize> {
        self.entry_for(section).map(|entry| entry.position)
    }

    /// Maps a linear position to its section coordinate.
    ///
    /// Header positions map to [`ItemCoord::header`]; every other position
    /// maps to the item it falls on inside the nearest preceding header's
    /// section. Returns `None` for positions at or past [`len`](Self::len).
    #[must_use]
    pub fn relative_position(&self, position: usize) -> Option<ItemCoord> {
        if position >= self.len {
            return None;
        }
        let idx = self.entries.partition_point(|entry| entry.position <= position);
        let entry = self.entries.get(idx.checked_sub(1)?)?;
        if entry.position == position {
            Some(ItemCoord::header(entry.section))
        } else {
            Some(ItemCoord::item(entry.section, position - entry.position - 1))
        }
    }

    /// Maps item `relative` of `section` to its linear position.
    ///
    /// Returns `None` if the section does not exist, `relative` is not below
    /// the section's item count, the section has no visible header, or the
    /// section is collapsed.
    #[must_use]
    pub fn absolute_position(&self, section: usize, relative: usize) -> Option<usize> {
        if relative >= self.item_count(section)? {
            return None;
        }
        let entry = self.entry_for(section)?;
        (relative < entry.visible_items).then(|| entry.position + relative + 1)
    }

    /// Maps a coordinate to its linear position.
    ///
    /// Header coordinates map to the header's position; item coordinates
    /// behave like [`absolute_position`](Self::absolute_position).
    #[must_use]
    pub fn absolute_position_of(&self, coord: ItemCoord) -> Option<usize> {
        match coord.relative() {
            Some(relative) => self.absolute_position(coord.section(), relative),
            None => self.section_header_index(coord.section()),
        }
    }

    /// Returns the linear range covered by `section`'s visible items.
    ///
    /// The range starts right after the header and is empty when the section
    /// is collapsed or has no items. Returns `None` if the section has no
    /// visible header. Hosts use this to turn "section contents changed" into
    /// a ranged change notification.
    #[must_use]
    pub fn section_items_range(&self, section: usize) -> Option<Range<usize>> {
        let entry = self.entry_for(section)?;
        let start = entry.position + 1;
        Some(start..start + entry.visible_items)
    }

    /// Returns `(position, section)` for every visible header, in ascending order.
    pub fn headers(&self) -> impl ExactSizeIterator<Item = (usize, usize)> + '_ {
        self.entries.iter().map(|entry| (entry.position, entry.section))
    }

    fn entry_at(&self, position: usize) -> Option<&HeaderEntry> {
        let idx = self
            .entries
            .binary_search_by_key(&position, |entry| entry.position)
            .ok()?;
        Some(&self.entries[idx])
    }

    fn entry_for(&self, section: usize) -> Option<&HeaderEntry> {
        self.by_section.get(&section).map(|&idx| &self.entries[idx])
    }
}

impl PositionLookup for HeaderTable {
    fn is_header(&self, position: usize) -> bool {
        Self::is_header(self, position)
    }

    fn relative_position(&self, position: usize) -> Option<ItemCoord> {
        Self::relative_position(self, position)
    }
}
