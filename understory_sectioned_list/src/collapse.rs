// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sticky per-section collapse state.

use core::fmt;

use hashbrown::HashSet;

/// Error returned when a section index is not below the current section count.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SectionOutOfBounds {
    /// The offending section index.
    pub section: usize,
    /// The section count the index was checked against.
    pub section_count: usize,
}

impl fmt::Display for SectionOutOfBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "section {} is out of bounds for {} sections",
            self.section, self.section_count
        )
    }
}

impl core::error::Error for SectionOutOfBounds {}

/// The set of collapsed sections.
///
/// Every section starts out expanded. Membership only changes through
/// [`collapse`](Self::collapse), [`expand`](Self::expand),
/// [`toggle`](Self::toggle) and [`clear`](Self::clear); rebuilding a
/// [`HeaderTable`](crate::HeaderTable) reads this set but never alters it.
///
/// The checked methods take the section count to validate against, since the
/// set itself does not know how many sections exist.
///
/// ```rust
/// use understory_sectioned_list::CollapseState;
///
/// let mut state = CollapseState::new();
/// assert_eq!(state.collapse(1, 3), Ok(true));
/// assert_eq!(state.is_expanded(1, 3), Ok(false));
/// assert!(state.collapse(3, 3).is_err());
/// ```
#[derive(Clone, Debug, Default)]
pub struct CollapseState {
    collapsed: HashSet<usize>,
    revision: u64,
}

impl CollapseState {
    /// Creates a state with every section expanded.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if `section` is collapsed, without bounds checking.
    #[must_use]
    pub fn is_collapsed(&self, section: usize) -> bool {
        self.collapsed.contains(&section)
    }

    /// Returns whether `section` is expanded.
    ///
    /// # Errors
    ///
    /// Returns [`SectionOutOfBounds`] if `section >= section_count`.
    pub fn is_expanded(
        &self,
        section: usize,
        section_count: usize,
    ) -> Result<bool, SectionOutOfBounds> {
        check_bounds(section, section_count)?;
        Ok(!self.is_collapsed(section))
    }

    /// Collapses `section`.
    ///
    /// Returns `Ok(true)` if the section was expanded before the call.
    ///
    /// # Errors
    ///
    /// Returns [`SectionOutOfBounds`] if `section >= section_count`.
    pub fn collapse(
        &mut self,
        section: usize,
        section_count: usize,
    ) -> Result<bool, SectionOutOfBounds> {
        check_bounds(section, section_count)?;
        let changed = self.collapsed.insert(section);
        if changed {
            self.bump_revision();
        }
        Ok(changed)
    }

    /// Expands `section`.
    ///
    /// Returns `Ok(true)` if the section was collapsed before the call.
    ///
    /// # Errors
    ///
    /// Returns [`SectionOutOfBounds`] if `section >= section_count`.
    pub fn expand(
        &mut self,
        section: usize,
        section_count: usize,
    ) -> Result<bool, SectionOutOfBounds> {
        check_bounds(section, section_count)?;
        let changed = self.collapsed.remove(&section);
        if changed {
            self.bump_revision();
        }
        Ok(changed)
    }

    /// Flips `section` between expanded and collapsed.
    ///
    /// Returns the new expanded state.
    ///
    /// # Errors
    ///
    /// Returns [`SectionOutOfBounds`] if `section >= section_count`.
    pub fn toggle(
        &mut self,
        section: usize,
        section_count: usize,
    ) -> Result<bool, SectionOutOfBounds> {
        if self.is_collapsed(section) {
            self.expand(section, section_count)?;
            Ok(true)
        } else {
            self.collapse(section, section_count)?;
            Ok(false)
        }
    }

    /// Expands every section.
    pub fn clear(&mut self) {
        if self.collapsed.is_empty() {
            return;
        }
        self.collapsed.clear();
        self.bump_revision();
    }

    /// Returns the number of collapsed sections.
    ///
    /// Sections that no longer exist in the data source still count until
    /// they are expanded or the state is cleared.
    #[must_use]
    pub fn collapsed_count(&self) -> usize {
        self.collapsed.len()
    }

    /// Returns an iterator over the collapsed sections, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.collapsed.iter().copied()
    }

    /// Returns the revision counter.
    ///
    /// Bumped on every call that actually changes membership; idempotent
    /// collapses and expands leave it alone.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn bump_revision(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

fn check_bounds(section: usize, section_count: usize) -> Result<(), SectionOutOfBounds> {
    if section < section_count {
        Ok(())
    } else {
        Err(SectionOutOfBounds {
            section,
            section_count,
        })
    }
}
