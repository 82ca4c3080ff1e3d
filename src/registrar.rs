//! Registrar Module
//!
//! The operation handlers. Each handler validates its input, reads and
//! writes the record stores, and either returns the resulting record or an
//! `OperationError` whose message carries the operation prefix.
//!
//! ## Enrollment order
//! `add_course_student` runs its steps in a fixed order that decides which
//! failure wins:
//! 1. Look up the student, the course, then the student's semester
//! 2. Add the course credit to the running total
//! 3. Reject empty ids, a total above the cap, or an already-paid student
//! 4. Add the overload penalty if the total passed the semester threshold
//! 5. Append the course snapshot and persist
//!
//! The running total is changed on a copy of the student. A rejection in
//! step 3 never reaches the store, so the stored total is unchanged.

use crate::config::Config;
use crate::env::{Clock, IdGenerator, SystemClock, UuidGenerator};
use crate::error::{Operation, OperationError, RecordError};
use crate::protocol::{Command, Response};
use crate::record::{Course, PaymentReceipt, Semester, Student};
use crate::store::Stores;

const MISSING_STUDENT_FIELDS: &str = "Name/Semester must be added";
const MISSING_COURSE_NAME: &str = "Name must be added";
const INSUFFICIENT_PAYMENT: &str = "Please Check Your Money";

/// Student, course and semester record handlers
pub struct Registrar {
    config: Config,
    stores: Stores,
    clock: Box<dyn Clock>,
    ids: Box<dyn IdGenerator>,
}

impl Registrar {
    /// Create a registrar over `stores` using wall-clock time and UUIDs
    pub fn new(config: Config, stores: Stores) -> Self {
        Self::with_collaborators(config, stores, Box::new(SystemClock), Box::new(UuidGenerator))
    }

    pub fn with_collaborators(
        config: Config,
        stores: Stores,
        clock: Box<dyn Clock>,
        ids: Box<dyn IdGenerator>,
    ) -> Self {
        Self {
            config,
            stores,
            clock,
            ids,
        }
    }

    /// Open durable stores under `config.data_dir`
    pub fn open(config: Config) -> crate::Result<Self> {
        let stores = Stores::open(&config)?;
        tracing::info!(
            "Opened stores in {}: {} courses, {} students, {} semesters",
            config.data_dir.display(),
            stores.courses.len(),
            stores.students.len(),
            stores.semesters.len()
        );
        Ok(Self::new(config, stores))
    }

    /// Registrar over fresh in-memory stores
    pub fn in_memory(config: Config) -> Self {
        Self::new(config, Stores::in_memory())
    }

    // =========================================================================
    // Command routing
    // =========================================================================

    /// Execute a wire command
    pub fn execute(&self, command: Command) -> Response {
        let encoded = match command {
            Command::CreateStudent { name, semester } => {
                match self.create_student(&name, &semester) {
                    Ok(student) => Response::json(&student),
                    Err(e) => return Response::error(&e.to_string()),
                }
            }
            Command::CreateCourse {
                name_course,
                credit_semester,
            } => match self.create_course(&name_course, credit_semester) {
                Ok(course) => Response::json(&course),
                Err(e) => return Response::error(&e.to_string()),
            },
            Command::GetAllStudents => Response::json(&self.get_all_students()),
            Command::GetAllCourses => Response::json(&self.get_all_courses()),
            Command::GetAllSemesters => Response::json(&self.get_all_semesters()),
            Command::GetOnceStudent { id } => match self.get_once_student(&id) {
                Ok(student) => Response::json(&student),
                Err(e @ RecordError::NotFound { .. }) => return Response::not_found(&e.to_string()),
                Err(e) => return Response::error(&e.to_string()),
            },
            Command::Payment { id_student, total } => match self.payment(&id_student, total) {
                Ok(receipt) => Response::json(&receipt),
                Err(e) => return Response::error(&e.to_string()),
            },
            Command::AddCourseStudent { id_user, id_course } => {
                match self.add_course_student(&id_user, &id_course) {
                    Ok(student) => Response::json(&student),
                    Err(e) => return Response::error(&e.to_string()),
                }
            }
            Command::Ping => return Response::ok(Some(b"PONG".to_vec())),
        };

        encoded.unwrap_or_else(|e| Response::error(&e.to_string()))
    }

    // =========================================================================
    // Handlers
    // =========================================================================

    /// Create a student owing the initial tuition with no courses
    pub fn create_student(&self, name: &str, semester: &str) -> Result<Student, OperationError> {
        self.finish(Operation::CreateStudent, self.try_create_student(name, semester))
    }

    fn try_create_student(&self, name: &str, semester: &str) -> Result<Student, RecordError> {
        if name.is_empty() || semester.is_empty() {
            return Err(RecordError::Validation(MISSING_STUDENT_FIELDS.to_string()));
        }

        let now = self.clock.now_nanos();
        let student = Student {
            id_student: self.ids.next_id(),
            name_student: name.to_string(),
            semester_student: semester.to_string(),
            course_student: Vec::new(),
            semester_credit_semester_total: 0,
            payment_student: self.config.initial_tuition,
            already_pay: false,
            created_at: now,
            updated_at: now,
        };

        self.stores
            .students
            .insert(&student.id_student, student.clone())?;
        tracing::debug!("Created student {}", student.id_student);
        Ok(student)
    }

    /// Create a course with the given credit weight
    pub fn create_course(
        &self,
        name_course: &str,
        credit_semester: u64,
    ) -> Result<Course, OperationError> {
        self.finish(
            Operation::CreateCourse,
            self.try_create_course(name_course, credit_semester),
        )
    }

    fn try_create_course(&self, name_course: &str, credit_semester: u64) -> Result<Course, RecordError> {
        if name_course.is_empty() {
            return Err(RecordError::Validation(MISSING_COURSE_NAME.to_string()));
        }

        let now = self.clock.now_nanos();
        let course = Course {
            id_course: self.ids.next_id(),
            name_course: name_course.to_string(),
            semester_credit_semester: credit_semester,
            created_at: now,
            updated_at: now,
        };

        self.stores
            .courses
            .insert(&course.id_course, course.clone())?;
        tracing::debug!("Created course {}", course.id_course);
        Ok(course)
    }

    pub fn get_all_students(&self) -> Vec<Student> {
        self.stores.students.values()
    }

    pub fn get_all_courses(&self) -> Vec<Course> {
        self.stores.courses.values()
    }

    pub fn get_all_semesters(&self) -> Vec<Semester> {
        self.stores.semesters.values()
    }

    /// Fetch one student
    ///
    /// A missing id yields `RecordError::NotFound`, whose message reads
    /// `The Student with id=<id> not found`.
    pub fn get_once_student(&self, id: &str) -> Result<Student, RecordError> {
        self.stores
            .students
            .get(id)
            .ok_or_else(|| RecordError::not_found("Student", id))
    }

    /// Settle a student's tuition
    ///
    /// `kembalian` is computed after the balance has been zeroed, so it
    /// always equals `total`.
    pub fn payment(&self, id_student: &str, total: u64) -> Result<PaymentReceipt, OperationError> {
        self.finish(Operation::Payment, self.try_payment(id_student, total))
    }

    fn try_payment(&self, id_student: &str, total: u64) -> Result<PaymentReceipt, RecordError> {
        let mut student = self.get_once_student(id_student)?;

        if total < student.payment_student {
            return Err(RecordError::BusinessRule(INSUFFICIENT_PAYMENT.to_string()));
        }

        student.payment_student = 0;
        student.already_pay = true;
        self.stores
            .students
            .insert(&student.id_student, student.clone())?;

        let kembalian = total - student.payment_student;
        tracing::debug!("Student {} paid {}", student.id_student, total);

        Ok(PaymentReceipt { student, kembalian })
    }

    /// Enroll a student in a course
    pub fn add_course_student(&self, id_user: &str, id_course: &str) -> Result<Student, OperationError> {
        self.finish(
            Operation::AddCourseStudent,
            self.try_add_course_student(id_user, id_course),
        )
    }

    fn try_add_course_student(&self, id_user: &str, id_course: &str) -> Result<Student, RecordError> {
        let mut student = self.get_once_student(id_user)?;
        let course = self
            .stores
            .courses
            .get(id_course)
            .ok_or_else(|| RecordError::not_found("Course", id_course))?;
        let semester = self
            .stores
            .semesters
            .get(&student.semester_student)
            .ok_or_else(|| RecordError::not_found("Semester", student.semester_student.as_str()))?;

        student.semester_credit_semester_total = student
            .semester_credit_semester_total
            .saturating_add(course.semester_credit_semester);

        if id_user.is_empty()
            || id_course.is_empty()
            || student.semester_credit_semester_total > self.config.max_credit_total
            || student.already_pay
        {
            return Err(RecordError::BusinessRule(format!(
                "Error ID User/ ID Course/ Max Semester Credit Semester = {} / Already Pay",
                self.config.max_credit_total
            )));
        }

        if semester.semester_credit_semester < student.semester_credit_semester_total {
            student.payment_student = student
                .payment_student
                .saturating_add(self.config.overload_penalty);
        }

        student.course_student.push(course);
        self.stores.students.insert(id_user, student.clone())?;
        tracing::debug!(
            "Enrolled student {} in course {} ({} credits)",
            id_user,
            id_course,
            student.semester_credit_semester_total
        );

        Ok(student)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Direct access to the underlying stores
    pub fn stores(&self) -> &Stores {
        &self.stores
    }

    /// Wrap a handler failure with its operation and log it
    fn finish<T>(
        &self,
        operation: Operation,
        result: Result<T, RecordError>,
    ) -> Result<T, OperationError> {
        result.map_err(|source| {
            let err = OperationError::new(operation, source);
            tracing::warn!("{}", err);
            err
        })
    }
}
