// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Structured coordinates: a section plus a slot inside it.

use core::fmt;

/// A position expressed relative to a section.
///
/// A coordinate either names the section's header slot or the item at a
/// zero-based index inside the section. Equality, ordering and hashing are
/// structural; headers sort before the items of the same section.
///
/// The [`Display`](fmt::Display) form is `"{section}:{relative}"`, with `-1`
/// standing in for the header slot:
///
/// ```rust
/// use understory_sectioned_list::ItemCoord;
///
/// assert_eq!(ItemCoord::item(8, 16).to_string(), "8:16");
/// assert_eq!(ItemCoord::header(3).to_string(), "3:-1");
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemCoord {
    section: usize,
    relative: Option<usize>,
}

impl ItemCoord {
    /// Creates a coordinate naming the header of `section`.
    #[must_use]
    pub const fn header(section: usize) -> Self {
        Self {
            section,
            relative: None,
        }
    }

    /// Creates a coordinate naming item `relative` of `section`.
    #[must_use]
    pub const fn item(section: usize, relative: usize) -> Self {
        Self {
            section,
            relative: Some(relative),
        }
    }

    /// Returns the section index.
    #[must_use]
    pub const fn section(&self) -> usize {
        self.section
    }

    /// Returns the item index within the section, or `None` for the header slot.
    #[must_use]
    pub const fn relative(&self) -> Option<usize> {
        self.relative
    }

    /// Returns `true` if this coordinate names a section header.
    #[must_use]
    pub const fn is_header(&self) -> bool {
        self.relative.is_none()
    }
}

impl fmt::Display for ItemCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.relative {
            Some(relative) => write!(f, "{}:{}", self.section, relative),
            None => write!(f, "{}:-1", self.section),
        }
    }
}
