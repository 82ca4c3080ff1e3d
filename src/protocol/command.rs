//! Command definitions
//!
//! One command per registrar operation.

/// Command types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum CommandType {
    CreateStudent = 0x01,
    CreateCourse = 0x02,
    GetAllStudents = 0x03,
    GetAllCourses = 0x04,
    GetAllSemesters = 0x05,
    GetOnceStudent = 0x06,
    Payment = 0x07,
    AddCourseStudent = 0x08,
    Ping = 0x09,
}

impl CommandType {
    pub fn from_byte(byte: u8) -> Option<Self> {
        Some(match byte {
            0x01 => CommandType::CreateStudent,
            0x02 => CommandType::CreateCourse,
            0x03 => CommandType::GetAllStudents,
            0x04 => CommandType::GetAllCourses,
            0x05 => CommandType::GetAllSemesters,
            0x06 => CommandType::GetOnceStudent,
            0x07 => CommandType::Payment,
            0x08 => CommandType::AddCourseStudent,
            0x09 => CommandType::Ping,
            _ => return None,
        })
    }
}

/// A parsed command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Register a student in a semester
    CreateStudent { name: String, semester: String },

    /// Register a course with its credit weight
    CreateCourse { name_course: String, credit_semester: u64 },

    GetAllStudents,
    GetAllCourses,
    GetAllSemesters,

    /// Fetch one student by id
    GetOnceStudent { id: String },

    /// Pay a student's tuition
    Payment { id_student: String, total: u64 },

    /// Enroll a student in a course
    AddCourseStudent { id_user: String, id_course: String },

    /// Ping (health check)
    Ping,
}

impl Command {
    /// Get the command type
    pub fn command_type(&self) -> CommandType {
        match self {
            Command::CreateStudent { .. } => CommandType::CreateStudent,
            Command::CreateCourse { .. } => CommandType::CreateCourse,
            Command::GetAllStudents => CommandType::GetAllStudents,
            Command::GetAllCourses => CommandType::GetAllCourses,
            Command::GetAllSemesters => CommandType::GetAllSemesters,
            Command::GetOnceStudent { .. } => CommandType::GetOnceStudent,
            Command::Payment { .. } => CommandType::Payment,
            Command::AddCourseStudent { .. } => CommandType::AddCourseStudent,
            Command::Ping => CommandType::Ping,
        }
    }
}
