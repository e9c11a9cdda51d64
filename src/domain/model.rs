use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, validate_positive_id, validate_range};
use serde::Serialize;
use std::fmt;

pub type StudentId = u32;

pub const MIN_GRADE: f64 = 0.0;
pub const MAX_GRADE: f64 = 100.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Student {
    id: StudentId,
    name: String,
}

impl Student {
    pub fn new(id: StudentId, name: &str) -> Result<Self> {
        let name = validate_non_empty_string("Student name", name)?;
        validate_positive_id("Student ID", id)?;
        Ok(Self { id, name })
    }

    pub fn id(&self) -> StudentId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Student {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Student(ID: {}, Name: {})", self.id, self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Course {
    code: String,
    title: String,
}

impl Course {
    pub fn new(code: &str, title: &str) -> Result<Self> {
        let code = normalize_code(code)?;
        let title = validate_non_empty_string("Course title", title)?;
        Ok(Self { code, title })
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn title(&self) -> &str {
        &self.title
    }
}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Course(Code: {}, Title: {})", self.code, self.title)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Enrollment {
    student_id: StudentId,
    course_code: String,
    grades: Vec<f64>,
}

impl Enrollment {
    pub fn new(student_id: StudentId, course_code: &str) -> Result<Self> {
        validate_positive_id("Student ID", student_id)?;
        let course_code = normalize_code(course_code)?;
        Ok(Self {
            student_id,
            course_code,
            grades: Vec::new(),
        })
    }

    /// Rebuilds an enrollment with previously recorded grades, checking each one.
    pub fn with_grades(
        student_id: StudentId,
        course_code: &str,
        grades: impl IntoIterator<Item = f64>,
    ) -> Result<Self> {
        let mut enrollment = Self::new(student_id, course_code)?;
        for grade in grades {
            enrollment.add_grade(grade)?;
        }
        Ok(enrollment)
    }

    pub fn student_id(&self) -> StudentId {
        self.student_id
    }

    pub fn course_code(&self) -> &str {
        &self.course_code
    }

    pub fn grades(&self) -> &[f64] {
        &self.grades
    }

    pub fn has_grades(&self) -> bool {
        !self.grades.is_empty()
    }

    pub fn add_grade(&mut self, grade: f64) -> Result<()> {
        validate_range("Grade", grade, MIN_GRADE, MAX_GRADE)?;
        self.grades.push(grade);
        Ok(())
    }

    /// Mean of the recorded grades, `0.0` when there are none.
    pub fn average(&self) -> f64 {
        if self.grades.is_empty() {
            return 0.0;
        }
        self.grades.iter().sum::<f64>() / self.grades.len() as f64
    }

    pub fn matches(&self, student_id: StudentId, normalized_code: &str) -> bool {
        self.student_id == student_id && self.course_code == normalized_code
    }
}

impl fmt::Display for Enrollment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Enrollment(Student: {}, Course: {}, Grades: {}, Avg: {:.2})",
            self.student_id,
            self.course_code,
            self.grades.len(),
            self.average()
        )
    }
}

/// Trimmed, upper-cased course code. Every code comparison goes through this.
pub fn normalize_code(code: &str) -> Result<String> {
    Ok(validate_non_empty_string("Course code", code)?.to_uppercase())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Id,
    Name,
    Code,
    Title,
}
