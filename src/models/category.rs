use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Category — Entry of the read-only category listing
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub url: String,
}
