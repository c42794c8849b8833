use std::fmt;
use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::errors::{Result, ResultSyncError};

/// Position of an item in a sectioned list: `(section, item)`
///
/// Both components are zero-based. Section-level notifications use an index
/// path whose item is 0 (see [`IndexPath::for_section`]). Ordering is
/// section-major, which is the order a list renderer lays items out in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct IndexPath {
    pub section: usize,
    pub item: usize,
}

impl IndexPath {
    pub fn new(section: usize, item: usize) -> Self {
        Self { section, item }
    }

    /// Index path addressing a whole section (item 0)
    pub fn for_section(section: usize) -> Self {
        Self { section, item: 0 }
    }

    pub fn zero() -> Self {
        Self::new(0, 0)
    }

    /// Build an index path from signed components, rejecting negatives
    ///
    /// # Errors
    ///
    /// Returns `NegativeIndex` if either component is below zero.
    pub fn try_from_signed(section: i64, item: i64) -> Result<Self> {
        let section = usize::try_from(section).map_err(|_| ResultSyncError::NegativeIndex {
            component: "section",
            value: section,
        })?;
        let item = usize::try_from(item).map_err(|_| ResultSyncError::NegativeIndex {
            component: "item",
            value: item,
        })?;
        Ok(Self::new(section, item))
    }

    /// Every item path in `range` within `section`
    pub fn in_range(range: Range<usize>, section: usize) -> Vec<IndexPath> {
        range.map(|item| IndexPath::new(section, item)).collect()
    }

    /// The preceding item in the same section, or `None` at item 0
    pub fn previous(&self) -> Option<IndexPath> {
        self.item.checked_sub(1).map(|item| self.with_item(item))
    }

    pub fn next(&self) -> IndexPath {
        self.with_item(self.item + 1)
    }

    /// First item of the following section
    pub fn next_section(&self) -> IndexPath {
        IndexPath::new(self.section + 1, 0)
    }

    pub fn section_copy(&self) -> IndexPath {
        IndexPath::for_section(self.section)
    }

    pub fn with_item(&self, item: usize) -> IndexPath {
        IndexPath::new(self.section, item)
    }

    pub fn with_section(&self, section: usize) -> IndexPath {
        IndexPath::new(section, self.item)
    }

    /// Shift the item by `delta`
    ///
    /// # Errors
    ///
    /// Returns `NegativeIndex` if the result would be below zero.
    pub fn adjusting_item(&self, delta: i64) -> Result<IndexPath> {
        IndexPath::try_from_signed(self.section as i64, self.item as i64 + delta)
    }

    /// Shift the section by `delta`
    ///
    /// # Errors
    ///
    /// Returns `NegativeIndex` if the result would be below zero.
    pub fn adjusting_section(&self, delta: i64) -> Result<IndexPath> {
        IndexPath::try_from_signed(self.section as i64 + delta, self.item as i64)
    }
}

impl fmt::Display for IndexPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.section, self.item)
    }
}

impl From<(usize, usize)> for IndexPath {
    fn from((section, item): (usize, usize)) -> Self {
        IndexPath::new(section, item)
    }
}
