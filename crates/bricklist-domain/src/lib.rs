//! Domain types shared between the bricklist sync core and host apps
//!
//! This crate provides the canonical models for set cataloguing:
//! - SetNum: opaque set identifier with canonical/plain forms
//! - CatalogSet: catalog summary of one set
//! - CollectionKind, CollectionState: the two system buckets (Owned, Wishlist)
//! - ListSummary, ListDetail, ListItem: custom ordered lists

pub mod catalog_set;
pub mod collection;
pub mod list;
pub mod set_num;

pub use catalog_set::*;
pub use collection::*;
pub use list::*;
pub use set_num::*;
