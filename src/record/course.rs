//! Course record

use serde::{Deserialize, Serialize};

/// A course students can enroll in
///
/// Courses are immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id_course: String,
    pub name_course: String,

    /// Credit weight added to a student's total on enrollment
    pub semester_credit_semester: u64,

    /// Nanosecond timestamps
    pub created_at: u64,
    pub updated_at: u64,
}
