//! Database ID type definition and the request and response shapes that carry IDs.

use serde::{Deserialize, Serialize};

/// Alias for the integer type used for mapping to database IDs.
pub type DatabaseId = i64;

/// The `?id=` query string used to pick the row to update or delete.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct IdQuery {
    /// The ID of the row.
    pub id: DatabaseId,
}

/// The response data for a newly created row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CreatedId {
    /// The ID of the new row.
    pub id: DatabaseId,
}
