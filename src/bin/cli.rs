//! Registrar CLI Client
//!
//! Command-line interface for interacting with a registrar server.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use registrar::network::Client;
use registrar::protocol::{Command, Status};

/// Registrar CLI
#[derive(Parser, Debug)]
#[command(name = "registrar-cli")]
#[command(about = "CLI for the registrar record service")]
struct Args {
    /// Server address
    #[arg(short, long, default_value = "127.0.0.1:7878")]
    server: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create a student
    CreateStudent {
        name: String,
        /// Semester id the student belongs to
        semester: String,
    },

    /// Create a course
    CreateCourse {
        name: String,
        /// Credit weight of the course
        credit: u64,
    },

    /// List all students
    Students,

    /// List all courses
    Courses,

    /// List all semesters
    Semesters,

    /// Show one student
    Student { id: String },

    /// Pay a student's tuition
    Pay {
        id: String,
        /// Amount tendered
        total: u64,
    },

    /// Enroll a student in a course
    Enroll { student_id: String, course_id: String },

    /// Ping the server
    Ping,
}

impl From<Commands> for Command {
    fn from(command: Commands) -> Self {
        match command {
            Commands::CreateStudent { name, semester } => Command::CreateStudent { name, semester },
            Commands::CreateCourse { name, credit } => Command::CreateCourse {
                name_course: name,
                credit_semester: credit,
            },
            Commands::Students => Command::GetAllStudents,
            Commands::Courses => Command::GetAllCourses,
            Commands::Semesters => Command::GetAllSemesters,
            Commands::Student { id } => Command::GetOnceStudent { id },
            Commands::Pay { id, total } => Command::Payment {
                id_student: id,
                total,
            },
            Commands::Enroll {
                student_id,
                course_id,
            } => Command::AddCourseStudent {
                id_user: student_id,
                id_course: course_id,
            },
            Commands::Ping => Command::Ping,
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    let mut client = match Client::connect(&args.server) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to connect to {}: {}", args.server, e);
            return ExitCode::FAILURE;
        }
    };

    let response = match client.send(&args.command.into()) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Request failed: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match response.status {
        Status::Ok => {
            let text = match response.decode_json::<serde_json::Value>() {
                Ok(value) => serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string()),
                // PING answers with plain text
                Err(_) => response.message(),
            };
            println!("{}", text);
            ExitCode::SUCCESS
        }
        Status::NotFound | Status::Error => {
            eprintln!("{}", response.message());
            ExitCode::FAILURE
        }
    }
}
