//! Tests for course enrollment
//!
//! These tests verify:
//! - Lookup failures (student, course, semester) surface as Error Exchange
//! - The credit cap and already-paid checks
//! - The overload penalty against the semester threshold
//! - A rejected enrollment leaves the stored student unchanged

use registrar::{Config, RecordError};

use crate::common::{seed_semester, setup};

const REJECTED: &str = "Error Exchange [Error: Error ID User/ ID Course/ Max Semester Credit Semester = 25 / Already Pay]";

#[test]
fn test_enroll_without_semester_fails() {
    let registrar = setup();
    let course = registrar.create_course("Algorithms", 4).unwrap();
    let student = registrar.create_student("Alice", "S1").unwrap();

    let err = registrar
        .add_course_student(&student.id_student, &course.id_course)
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "Error Exchange [Error: The Semester with id=S1 not found]"
    );
    assert_eq!(
        registrar.get_once_student(&student.id_student).unwrap(),
        student
    );
}

#[test]
fn test_enroll_unknown_student() {
    let registrar = setup();
    let course = registrar.create_course("Algorithms", 4).unwrap();

    let err = registrar
        .add_course_student("ghost", &course.id_course)
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "Error Exchange [Error: The Student with id=ghost not found]"
    );
}

#[test]
fn test_enroll_unknown_course() {
    let registrar = setup();
    seed_semester(&registrar, "S1", 24);
    let student = registrar.create_student("Alice", "S1").unwrap();

    let err = registrar
        .add_course_student(&student.id_student, "nope")
        .unwrap_err();

    assert!(matches!(
        err.cause(),
        RecordError::NotFound { entity: "Course", .. }
    ));
}

#[test]
fn test_enroll_empty_ids_fail_lookup() {
    let registrar = setup();

    let err = registrar.add_course_student("", "").unwrap_err();

    assert!(err.to_string().starts_with("Error Exchange ["));
}

#[test]
fn test_enroll_success() {
    let registrar = setup();
    seed_semester(&registrar, "S1", 24);
    let course = registrar.create_course("Algorithms", 4).unwrap();
    let student = registrar.create_student("Alice", "S1").unwrap();

    let updated = registrar
        .add_course_student(&student.id_student, &course.id_course)
        .unwrap();

    assert_eq!(updated.semester_credit_semester_total, 4);
    assert_eq!(updated.payment_student, 4_000_000);
    assert_eq!(updated.course_student, vec![course]);
    assert_eq!(
        registrar.get_once_student(&student.id_student).unwrap(),
        updated
    );
}

#[test]
fn test_enroll_accumulates_in_order() {
    let registrar = setup();
    seed_semester(&registrar, "S1", 24);
    let a = registrar.create_course("Algorithms", 4).unwrap();
    let b = registrar.create_course("Databases", 3).unwrap();
    let student = registrar.create_student("Alice", "S1").unwrap();

    registrar
        .add_course_student(&student.id_student, &a.id_course)
        .unwrap();
    let updated = registrar
        .add_course_student(&student.id_student, &b.id_course)
        .unwrap();

    assert_eq!(updated.semester_credit_semester_total, 7);
    assert_eq!(updated.course_student, vec![a, b]);
}

#[test]
fn test_enroll_same_course_twice_allowed() {
    let registrar = setup();
    seed_semester(&registrar, "S1", 24);
    let course = registrar.create_course("Algorithms", 4).unwrap();
    let student = registrar.create_student("Alice", "S1").unwrap();

    registrar
        .add_course_student(&student.id_student, &course.id_course)
        .unwrap();
    let updated = registrar
        .add_course_student(&student.id_student, &course.id_course)
        .unwrap();

    assert_eq!(updated.course_student.len(), 2);
    assert_eq!(updated.semester_credit_semester_total, 8);
}

#[test]
fn test_enroll_up_to_cap_allowed() {
    let registrar = setup();
    seed_semester(&registrar, "S1", 25);
    let course = registrar.create_course("Thesis", 25).unwrap();
    let student = registrar.create_student("Alice", "S1").unwrap();

    let updated = registrar
        .add_course_student(&student.id_student, &course.id_course)
        .unwrap();

    assert_eq!(updated.semester_credit_semester_total, 25);
}

#[test]
fn test_enroll_over_cap_rejected_and_not_persisted() {
    let registrar = setup();
    seed_semester(&registrar, "S1", 25);
    let big = registrar.create_course("Project", 20).unwrap();
    let extra = registrar.create_course("Lab", 6).unwrap();
    let student = registrar.create_student("Alice", "S1").unwrap();

    let enrolled = registrar
        .add_course_student(&student.id_student, &big.id_course)
        .unwrap();

    let err = registrar
        .add_course_student(&student.id_student, &extra.id_course)
        .unwrap_err();

    assert_eq!(err.to_string(), REJECTED);
    assert!(matches!(err.cause(), RecordError::BusinessRule(_)));

    // The increment happened on a copy; the stored total stays at 20
    let stored = registrar.get_once_student(&student.id_student).unwrap();
    assert_eq!(stored, enrolled);
    assert_eq!(stored.semester_credit_semester_total, 20);
    assert_eq!(stored.course_student.len(), 1);
}

#[test]
fn test_enroll_after_payment_rejected() {
    let registrar = setup();
    seed_semester(&registrar, "S1", 24);
    let course = registrar.create_course("Seminar", 0).unwrap();
    let student = registrar.create_student("Alice", "S1").unwrap();
    registrar.payment(&student.id_student, 4_000_000).unwrap();

    let err = registrar
        .add_course_student(&student.id_student, &course.id_course)
        .unwrap_err();

    assert_eq!(err.to_string(), REJECTED);
    assert!(registrar
        .get_once_student(&student.id_student)
        .unwrap()
        .course_student
        .is_empty());
}

#[test]
fn test_enroll_over_semester_threshold_adds_penalty() {
    let registrar = setup();
    seed_semester(&registrar, "S1", 3);
    let course = registrar.create_course("Algorithms", 4).unwrap();
    let student = registrar.create_student("Alice", "S1").unwrap();

    let updated = registrar
        .add_course_student(&student.id_student, &course.id_course)
        .unwrap();

    assert_eq!(updated.payment_student, 5_000_000);
    assert_eq!(updated.semester_credit_semester_total, 4);
}

#[test]
fn test_enroll_at_semester_threshold_no_penalty() {
    let registrar = setup();
    seed_semester(&registrar, "S1", 4);
    let course = registrar.create_course("Algorithms", 4).unwrap();
    let student = registrar.create_student("Alice", "S1").unwrap();

    let updated = registrar
        .add_course_student(&student.id_student, &course.id_course)
        .unwrap();

    assert_eq!(updated.payment_student, 4_000_000);
}

#[test]
fn test_penalty_applies_on_each_enrollment_past_threshold() {
    let registrar = setup();
    seed_semester(&registrar, "S1", 5);
    let course = registrar.create_course("Algorithms", 3).unwrap();
    let student = registrar.create_student("Alice", "S1").unwrap();

    registrar
        .add_course_student(&student.id_student, &course.id_course)
        .unwrap();
    let second = registrar
        .add_course_student(&student.id_student, &course.id_course)
        .unwrap();
    let third = registrar
        .add_course_student(&student.id_student, &course.id_course)
        .unwrap();

    assert_eq!(second.payment_student, 5_000_000);
    assert_eq!(third.payment_student, 6_000_000);
}

#[test]
fn test_enroll_custom_cap_in_message() {
    let config = Config::builder().max_credit_total(10).build();
    let registrar = registrar::Registrar::in_memory(config);
    seed_semester(&registrar, "S1", 24);
    let course = registrar.create_course("Project", 11).unwrap();
    let student = registrar.create_student("Alice", "S1").unwrap();

    let err = registrar
        .add_course_student(&student.id_student, &course.id_course)
        .unwrap_err();

    assert!(err
        .to_string()
        .contains("Max Semester Credit Semester = 10"));
}
