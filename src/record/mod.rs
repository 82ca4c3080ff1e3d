//! Record Module
//!
//! The three entity shapes kept by the registrar. Field names on the wire
//! follow the camelCase vocabulary of the records (`idStudent`,
//! `semesterCreditSemesterTotal`, `alreadyPay`, ...).
//!
//! ## Relationships
//! - `Student::semester_student` names a `Semester` by id
//! - `Student::course_student` holds *copies* of `Course` records taken at
//!   enrollment time, not references

mod course;
mod semester;
mod student;

pub use course::Course;
pub use semester::Semester;
pub use student::{PaymentReceipt, Student};
