// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_sectioned_list --heading-base-level=0

//! Understory Sectioned List: index mapping for sectioned, collapsible lists.
//!
//! Virtualized list renderers think in flat positions `0..len`. Sectioned
//! data thinks in sections, each with a header and a run of items. This crate
//! translates between the two and keeps track of which sections are collapsed.
//!
//! The core concepts are:
//!
//! - [`SectionDataSource`]: the read-only section/item counts supplied by the
//!   host, plus a policy flag for whether empty sections still get a header.
//!   [`SectionCounts`] is a ready-made owned implementation.
//! - [`ItemCoord`]: a structured coordinate naming either a section's header or
//!   an item inside it.
//! - [`HeaderTable`]: an immutable snapshot of the linear layout that answers
//!   position queries in both directions.
//! - [`CollapseState`]: the sticky set of collapsed sections.
//! - [`PositionManager`]: owns the current table and the collapse state and is
//!   what a list adapter normally talks to.
//!
//! This crate deliberately does **not** know about views, recycling, or any
//! particular UI framework. Host frameworks are responsible for:
//!
//! - Calling [`PositionManager::invalidate`] whenever section or item counts may
//!   have changed, and after any collapse or expand, and reporting the returned
//!   length to their list widget.
//! - Mapping each realized position through [`PositionManager::relative_position`]
//!   to decide whether to bind a header or an item view.
//! - Turning [`PositionManager::section_items_range`] into change notifications
//!   when a section's contents change.
//!
//! ## Layout rules
//!
//! Sections are laid out in index order. For each section:
//!
//! - a collapsed section contributes its header only;
//! - otherwise, a section with items (or any section, when the source asks for
//!   headers on empty sections) contributes its header followed by its items;
//! - an empty section is omitted entirely when empty-section headers are off.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_sectioned_list::{ItemCoord, PositionManager, SectionCounts};
//!
//! // Two sections of five items each.
//! let source = SectionCounts::new([5, 5]);
//! let mut positions = PositionManager::new();
//!
//! // Two headers plus ten items.
//! assert_eq!(positions.invalidate(&source), 12);
//! assert_eq!(positions.section_header_index(1), Some(6));
//! assert_eq!(positions.relative_position(7), Some(ItemCoord::item(1, 0)));
//! assert_eq!(positions.absolute_position(0, 4), Some(5));
//!
//! // Collapse the first section; the layout changes once we invalidate.
//! positions.toggle_section_expanded(0).unwrap();
//! assert_eq!(positions.invalidate(&source), 7);
//! assert_eq!(positions.relative_position(1), Some(ItemCoord::header(1)));
//! ```
//!
//! ## Snapshots
//!
//! [`PositionManager::invalidate`] builds a new [`HeaderTable`] and swaps it in
//! whole. Readers that must not observe a layout change halfway through their
//! work can hold a [`PositionManager::snapshot`] instead of the manager. Both
//! implement [`PositionLookup`], the small trait item views need.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod collapse;
mod coord;
mod manager;
mod source;
mod table;

pub use collapse::{CollapseState, SectionOutOfBounds};
pub use coord::ItemCoord;
pub use manager::PositionManager;
pub use source::{SectionCounts, SectionDataSource};
pub use table::{HeaderTable, PositionLookup};
