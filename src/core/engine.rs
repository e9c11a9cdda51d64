use crate::config::{Command, ListKind};
use crate::core::GradebookService;
use crate::domain::model::{SortKey, StudentId};
use crate::domain::ports::Storage;
use crate::utils::error::{GradebookError, Result};
use crate::utils::validation::parse_grade;
use std::fmt::Display;

/// One command per run: load the stored document, apply the command, save everything back.
pub struct GradebookEngine<S: Storage> {
    storage: S,
    service: GradebookService,
}

impl<S: Storage> GradebookEngine<S> {
    /// Loads the stored document. A malformed record fails the whole load.
    pub fn open(storage: S) -> Result<Self> {
        let document = storage.load();
        let mut service = GradebookService::new();
        service.load_from_value(&document)?;
        Ok(Self { storage, service })
    }

    pub fn service(&self) -> &GradebookService {
        &self.service
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Runs `command` against the in-memory gradebook and returns the text to print.
    pub fn dispatch(&mut self, command: &Command) -> Result<String> {
        tracing::debug!("Running command {}", command.name());
        let service = &mut self.service;

        let output = match command {
            Command::AddStudent { name } => {
                let id = service.add_student(name)?;
                let stored = service.find_student(id).map_or(name.as_str(), |s| s.name());
                format!("Added student: ID={}, Name='{}'", id, stored)
            }
            Command::AddCourse { code, title } => {
                service.add_course(code, title)?;
                format!(
                    "Added course: Code={}, Title='{}'",
                    code.trim().to_uppercase(),
                    title.trim()
                )
            }
            Command::Enroll { student_id, course } => {
                service.enroll(known_student_id(*student_id)?, course)?;
                format!(
                    "Enrolled student {} in course {}",
                    student_id,
                    course.trim().to_uppercase()
                )
            }
            Command::AddGrade {
                student_id,
                course,
                grade,
            } => {
                let grade = parse_grade(grade)?;
                service.add_grade(known_student_id(*student_id)?, course, grade)?;
                format!(
                    "Added grade {} for student {} in course {}",
                    grade,
                    student_id,
                    course.trim().to_uppercase()
                )
            }
            Command::List { kind, sort } => {
                let sort = sort.map(SortKey::from);
                match kind {
                    ListKind::Students => listing(
                        "students",
                        &service.list_students(sort.unwrap_or(SortKey::Id)),
                    ),
                    ListKind::Courses => listing(
                        "courses",
                        &service.list_courses(sort.unwrap_or(SortKey::Code)),
                    ),
                    ListKind::Enrollments => listing("enrollments", service.list_enrollments()),
                }
            }
            Command::Avg { student_id, course } => {
                let average = service.compute_average(known_student_id(*student_id)?, course)?;
                format!(
                    "Average for student {} in {}: {:.2}",
                    student_id,
                    course.trim().to_uppercase(),
                    average
                )
            }
            Command::Gpa { student_id } => {
                let gpa = service.compute_gpa(known_student_id(*student_id)?)?;
                format!("GPA for student {}: {:.2}", student_id, gpa)
            }
        };

        Ok(output)
    }

    /// Writes the whole gradebook back to storage.
    pub fn persist(&self) -> Result<()> {
        self.storage.save(&self.service.to_document())
    }
}

/// Ids typed on the command line may be anything; only positive `u32` values can name a student.
fn known_student_id(raw: i64) -> Result<StudentId> {
    StudentId::try_from(raw)
        .ok()
        .filter(|id| *id >= 1)
        .ok_or_else(|| GradebookError::not_found(format!("Student with ID {} not found", raw)))
}

fn listing<T: Display>(kind: &str, items: &[T]) -> String {
    if items.is_empty() {
        return format!("No {} found", kind);
    }

    let mut lines = Vec::with_capacity(items.len() + 1);
    lines.push(format!("{}{}:", kind[..1].to_uppercase(), &kind[1..]));
    lines.extend(items.iter().map(|item| format!("  {}", item)));
    lines.join("\n")
}
