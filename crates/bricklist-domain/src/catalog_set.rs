//! Catalog summary of one set

use serde::{Deserialize, Serialize};

use crate::set_num::SetNum;

/// Catalog summary as returned by set and collection endpoints.
///
/// The server emits the image URL under several historical spellings; the
/// serde aliases collapse them into the one canonical field so no consumer
/// has to special-case variants.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CatalogSet {
    #[serde(alias = "set_num")]
    pub set_id: SetNum,
    pub name: String,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub theme: Option<String>,
    #[serde(default)]
    pub pieces: Option<u32>,
    #[serde(
        default,
        alias = "imageUrl",
        alias = "set_image_url",
        alias = "setImageUrl"
    )]
    pub image_url: Option<String>,
}

impl CatalogSet {
    /// Create a minimal summary with just the identifier and name.
    pub fn new(set_id: impl Into<SetNum>, name: impl Into<String>) -> Self {
        Self {
            set_id: set_id.into(),
            name: name.into(),
            year: None,
            theme: None,
            pieces: None,
            image_url: None,
        }
    }
}
