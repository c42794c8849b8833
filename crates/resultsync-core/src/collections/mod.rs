//! Bidirectional index structures used by the diff.
//!
//! - [`BiMap`] remembers where an identity was (position <-> identity).
//! - [`OrderedUniqueList`] keeps identities in display order with O(1)
//!   index lookup in both directions.
//! - [`ComparatorChain`] is the tie-break chain used for sorted insertion.

pub mod bimap;
pub mod comparator;
pub mod ordered_list;

pub use bimap::BiMap;
pub use comparator::ComparatorChain;
pub use ordered_list::OrderedUniqueList;
