//! Data Transfer Objects - request/response types for the API.

use serde::{Deserialize, Serialize};

/// Body of the `check-slug` probes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckSlugRequest {
    #[serde(default)]
    pub slug: String,
}

/// Answer of the `check-slug` probes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckSlugResponse {
    pub exists: bool,
}

/// Query string of the post listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListPostsQuery {
    pub per_page: Option<u64>,
    pub page: Option<u64>,
}
