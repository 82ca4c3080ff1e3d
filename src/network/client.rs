//! Blocking client
//!
//! One typed method per registrar operation.

use std::io::{BufReader, BufWriter};
use std::net::{TcpStream, ToSocketAddrs};

use serde::de::DeserializeOwned;

use crate::error::{Result, StoreError};
use crate::protocol::{read_response, write_command, Command, Response, Status};
use crate::record::{Course, PaymentReceipt, Semester, Student};

/// Outcome of an operation: the record, or the server's failure message
pub type Reply<T> = std::result::Result<T, String>;

/// A connection to a registrar server
pub struct Client {
    reader: BufReader<TcpStream>,
    writer: BufWriter<TcpStream>,
}

impl Client {
    pub fn connect(addr: impl ToSocketAddrs) -> Result<Self> {
        let stream = TcpStream::connect(addr)?;
        stream.set_nodelay(true)?;
        let read_stream = stream.try_clone()?;

        Ok(Self {
            reader: BufReader::new(read_stream),
            writer: BufWriter::new(stream),
        })
    }

    /// Send a raw command and wait for its response
    pub fn send(&mut self, command: &Command) -> Result<Response> {
        write_command(&mut self.writer, command)?;
        read_response(&mut self.reader)
    }

    pub fn ping(&mut self) -> Result<()> {
        let response = self.send(&Command::Ping)?;
        match response.status {
            Status::Ok => Ok(()),
            _ => Err(StoreError::Protocol(format!(
                "unexpected ping reply: {}",
                response.message()
            ))),
        }
    }

    pub fn create_student(&mut self, name: &str, semester: &str) -> Result<Reply<Student>> {
        self.call(Command::CreateStudent {
            name: name.to_string(),
            semester: semester.to_string(),
        })
    }

    pub fn create_course(&mut self, name_course: &str, credit_semester: u64) -> Result<Reply<Course>> {
        self.call(Command::CreateCourse {
            name_course: name_course.to_string(),
            credit_semester,
        })
    }

    pub fn get_all_students(&mut self) -> Result<Vec<Student>> {
        self.call_infallible(Command::GetAllStudents)
    }

    pub fn get_all_courses(&mut self) -> Result<Vec<Course>> {
        self.call_infallible(Command::GetAllCourses)
    }

    pub fn get_all_semesters(&mut self) -> Result<Vec<Semester>> {
        self.call_infallible(Command::GetAllSemesters)
    }

    /// A missing student comes back as `Err("The Student with id=... not found")`
    pub fn get_once_student(&mut self, id: &str) -> Result<Reply<Student>> {
        self.call(Command::GetOnceStudent { id: id.to_string() })
    }

    pub fn payment(&mut self, id_student: &str, total: u64) -> Result<Reply<PaymentReceipt>> {
        self.call(Command::Payment {
            id_student: id_student.to_string(),
            total,
        })
    }

    pub fn add_course_student(&mut self, id_user: &str, id_course: &str) -> Result<Reply<Student>> {
        self.call(Command::AddCourseStudent {
            id_user: id_user.to_string(),
            id_course: id_course.to_string(),
        })
    }

    fn call<T: DeserializeOwned>(&mut self, command: Command) -> Result<Reply<T>> {
        let response = self.send(&command)?;
        match response.status {
            Status::Ok => Ok(Ok(response.decode_json()?)),
            Status::NotFound | Status::Error => Ok(Err(response.message())),
        }
    }

    fn call_infallible<T: DeserializeOwned>(&mut self, command: Command) -> Result<T> {
        self.call(command)?.map_err(StoreError::Protocol)
    }
}
