//! Student record and payment receipt

use serde::{Deserialize, Serialize};

use super::Course;

/// A student with their enrolled courses and tuition state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id_student: String,
    pub name_student: String,

    /// Id of the student's semester (key into the semester store)
    pub semester_student: String,

    /// Snapshots of enrolled courses, in enrollment order
    pub course_student: Vec<Course>,

    /// Sum of the credit weights of `course_student`
    pub semester_credit_semester_total: u64,

    /// Tuition still owed
    pub payment_student: u64,

    /// Set once tuition has been paid; blocks further enrollment
    pub already_pay: bool,

    pub created_at: u64,
    pub updated_at: u64,
}

/// Result of a successful payment: the updated student plus the change
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentReceipt {
    #[serde(flatten)]
    pub student: Student,

    /// Change handed back to the payer
    pub kembalian: u64,
}
