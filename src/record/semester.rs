//! Semester record

use serde::{Deserialize, Serialize};

/// A semester and its credit-load threshold
///
/// No handler creates semesters; the store is only read during enrollment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Semester {
    pub id_semester: String,

    /// Credit total above which enrollment adds the overload penalty
    pub semester_credit_semester: u64,

    pub created_at: u64,
    pub updated_at: u64,
}
