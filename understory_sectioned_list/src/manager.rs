// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The position manager: current layout plus collapse state.

use alloc::sync::Arc;
use core::ops::Range;

use crate::{
    CollapseState, HeaderTable, ItemCoord, PositionLookup, SectionDataSource, SectionOutOfBounds,
};

/// Translates between linear list positions and section coordinates.
///
/// A `PositionManager` owns two independent pieces of state:
///
/// - the current [`HeaderTable`], derived from a [`SectionDataSource`] and
///   rebuilt wholesale by [`invalidate`](Self::invalidate);
/// - a [`CollapseState`], which survives invalidation and only changes through
///   the collapse/expand methods.
///
/// Queries answer against the table built by the most recent `invalidate`.
/// Collapsing or expanding does not touch that table: the owner must call
/// `invalidate` again (and usually re-render) before the new layout is
/// visible. [`needs_invalidate`](Self::needs_invalidate) reports when that is
/// still pending.
///
/// Collapse methods validate the section against the section count sampled by
/// the last `invalidate`, so they reject every index until the first call.
///
/// ```rust
/// use understory_sectioned_list::{ItemCoord, PositionManager, SectionCounts};
///
/// let source = SectionCounts::new([5, 5]);
/// let mut positions = PositionManager::new();
/// assert_eq!(positions.invalidate(&source), 12);
///
/// assert!(positions.is_header(6));
/// assert_eq!(positions.relative_position(3), Some(ItemCoord::item(0, 2)));
/// assert_eq!(positions.absolute_position(1, 4), Some(11));
///
/// positions.collapse_section(0).unwrap();
/// assert_eq!(positions.invalidate(&source), 7);
/// ```
#[derive(Clone, Debug, Default)]
pub struct PositionManager {
    table: Arc<HeaderTable>,
    collapsed: CollapseState,
    /// Collapse revision the current table was built from.
    built_revision: u64,
}

impl PositionManager {
    /// Creates a manager with an empty layout and every section expanded.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds the layout from `source` and returns the new linear length.
    ///
    /// The previous table is replaced, not patched; snapshots obtained from
    /// [`snapshot`](Self::snapshot) before this call keep describing the old
    /// layout.
    ///
    /// # Panics
    ///
    /// Panics if the layout does not fit in `usize` positions; see
    /// [`HeaderTable::build`].
    pub fn invalidate<S>(&mut self, source: &S) -> usize
    where
        S: SectionDataSource + ?Sized,
    {
        let table = HeaderTable::build(source, &self.collapsed);
        let len = table.len();
        self.table = Arc::new(table);
        self.built_revision = self.collapsed.revision();
        len
    }

    /// Returns a shared handle to the current layout.
    #[must_use]
    pub fn snapshot(&self) -> Arc<HeaderTable> {
        Arc::clone(&self.table)
    }

    /// Returns the current layout.
    #[must_use]
    pub fn table(&self) -> &HeaderTable {
        &self.table
    }

    /// Returns the collapse state.
    #[must_use]
    pub fn collapse_state(&self) -> &CollapseState {
        &self.collapsed
    }

    /// Returns the linear length computed by the last `invalidate`.
    #[must_use]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns `true` if the current layout has no positions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Returns `true` if `position` is a section header.
    #[must_use]
    pub fn is_header(&self, position: usize) -> bool {
        self.table.is_header(position)
    }

    /// Returns the section whose header sits at `position`, if any.
    #[must_use]
    pub fn section_id(&self, position: usize) -> Option<usize> {
        self.table.section_id(position)
    }

    /// Returns the linear position of `section`'s header, if it is visible.
    #[must_use]
    pub fn section_header_index(&self, section: usize) -> Option<usize> {
        self.table.section_header_index(section)
    }

    /// Maps a linear position to its section coordinate.
    ///
    /// See [`HeaderTable::relative_position`].
    #[must_use]
    pub fn relative_position(&self, position: usize) -> Option<ItemCoord> {
        self.table.relative_position(position)
    }

    /// Maps item `relative` of `section` to its linear position.
    ///
    /// See [`HeaderTable::absolute_position`].
    #[must_use]
    pub fn absolute_position(&self, section: usize, relative: usize) -> Option<usize> {
        self.table.absolute_position(section, relative)
    }

    /// Maps a coordinate to its linear position.
    #[must_use]
    pub fn absolute_position_of(&self, coord: ItemCoord) -> Option<usize> {
        self.table.absolute_position_of(coord)
    }

    /// Returns the linear range covered by `section`'s visible items.
    ///
    /// See [`HeaderTable::section_items_range`].
    #[must_use]
    pub fn section_items_range(&self, section: usize) -> Option<Range<usize>> {
        self.table.section_items_range(section)
    }

    /// Collapses `section` so that only its header is laid out.
    ///
    /// Returns `Ok(true)` if the section was expanded before. Takes effect at
    /// the next [`invalidate`](Self::invalidate).
    ///
    /// # Errors
    ///
    /// Returns [`SectionOutOfBounds`] if `section` is not below the current
    /// section count.
    pub fn collapse_section(&mut self, section: usize) -> Result<bool, SectionOutOfBounds> {
        let section_count = self.table.section_count();
        self.collapsed.collapse(section, section_count)
    }

    /// Expands `section` so that its items are laid out again.
    ///
    /// Returns `Ok(true)` if the section was collapsed before. Takes effect at
    /// the next [`invalidate`](Self::invalidate).
    ///
    /// # Errors
    ///
    /// Returns [`SectionOutOfBounds`] if `section` is not below the current
    /// section count.
    pub fn expand_section(&mut self, section: usize) -> Result<bool, SectionOutOfBounds> {
        let section_count = self.table.section_count();
        self.collapsed.expand(section, section_count)
    }

    /// Flips `section` between expanded and collapsed, returning the new
    /// expanded state.
    ///
    /// # Errors
    ///
    /// Returns [`SectionOutOfBounds`] if `section` is not below the current
    /// section count.
    pub fn toggle_section_expanded(&mut self, section: usize) -> Result<bool, SectionOutOfBounds> {
        let section_count = self.table.section_count();
        self.collapsed.toggle(section, section_count)
    }

    /// Returns whether `section` is expanded.
    ///
    /// # Errors
    ///
    /// Returns [`SectionOutOfBounds`] if `section` is not below the current
    /// section count.
    pub fn is_section_expanded(&self, section: usize) -> Result<bool, SectionOutOfBounds> {
        self.collapsed.is_expanded(section, self.table.section_count())
    }

    /// Expands every section. Takes effect at the next `invalidate`.
    pub fn expand_all(&mut self) {
        self.collapsed.clear();
    }

    /// Returns the collapse revision; see [`CollapseState::revision`].
    #[must_use]
    pub fn collapse_revision(&self) -> u64 {
        self.collapsed.revision()
    }

    /// Returns `true` if the collapse state changed since the last `invalidate`.
    #[must_use]
    pub fn needs_invalidate(&self) -> bool {
        self.collapsed.revision() != self.built_revision
    }
}

impl PositionLookup for PositionManager {
    fn is_header(&self, position: usize) -> bool {
        self.table.is_header(position)
    }

    fn relative_position(&self, position: usize) -> Option<ItemCoord> {
        self.table.relative_position(position)
    }
}

#[cfg(test)]
mod tests {
    use super::PositionManager;
    use crate::{ItemCoord, PositionLookup, SectionCounts};

    #[test]
    fn collapse_is_rejected_before_first_invalidate() {
        let mut positions = PositionManager::new();
        assert!(positions.collapse_section(0).is_err());
        assert!(positions.is_section_expanded(0).is_err());
        assert!(positions.is_empty());
    }

    #[test]
    fn needs_invalidate_tracks_collapse_changes() {
        let source = SectionCounts::new([3, 3]);
        let mut positions = PositionManager::new();
        positions.invalidate(&source);
        assert!(!positions.needs_invalidate());

        positions.collapse_section(1).unwrap();
        assert!(positions.needs_invalidate());
        // The layout is unchanged until the owner invalidates.
        assert_eq!(positions.len(), 8);

        positions.invalidate(&source);
        assert!(!positions.needs_invalidate());
        assert_eq!(positions.len(), 5);

        // Idempotent collapse does not ask for another rebuild.
        positions.collapse_section(1).unwrap();
        assert!(!positions.needs_invalidate());
    }

    #[test]
    #[should_panic(expected = "sectioned list layout overflows usize at section 0")]
    fn invalidate_panics_on_overflowing_counts() {
        let mut positions = PositionManager::new();
        positions.invalidate(&SectionCounts::new([usize::MAX]));
    }

    #[test]
    fn snapshots_survive_invalidation() {
        let mut source = SectionCounts::new([2]);
        let mut positions = PositionManager::new();
        positions.invalidate(&source);
        let before = positions.snapshot();

        source.push_section(4);
        positions.invalidate(&source);

        assert_eq!(before.len(), 3);
        assert_eq!(before.section_header_index(1), None);
        assert_eq!(positions.len(), 8);
        assert_eq!(positions.section_header_index(1), Some(3));
    }

    #[test]
    fn collapse_state_survives_invalidation() {
        let source = SectionCounts::new([1, 1, 1]);
        let mut positions = PositionManager::new();
        positions.invalidate(&source);
        positions.collapse_section(2).unwrap();
        positions.invalidate(&source);
        positions.invalidate(&source);
        assert_eq!(positions.is_section_expanded(2), Ok(false));
        assert_eq!(positions.len(), 5);

        positions.expand_all();
        assert_eq!(positions.invalidate(&source), 6);
    }

    #[test]
    fn lookup_trait_matches_inherent_queries() {
        fn describe(lookup: &dyn PositionLookup, position: usize) -> Option<ItemCoord> {
            if lookup.is_header(position) {
                assert!(lookup.relative_position(position)?.is_header());
            }
            lookup.relative_position(position)
        }

        let source = SectionCounts::new([2, 1]);
        let mut positions = PositionManager::new();
        positions.invalidate(&source);
        let snapshot = positions.snapshot();
        for position in 0..positions.len() {
            assert_eq!(describe(&positions, position), describe(&*snapshot, position));
        }
        assert_eq!(describe(&positions, 3), Some(ItemCoord::header(1)));
    }
}
