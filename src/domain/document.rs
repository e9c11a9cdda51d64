use crate::domain::model::{Course, Enrollment, Student, StudentId};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashSet;
use thiserror::Error;

/// Problems found while checking a persisted document, tagged with the JSON path of the field.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DocumentError {
    #[error("{path}: missing field")]
    MissingField { path: String },

    #[error("{path}: expected {expected}")]
    WrongType {
        path: String,
        expected: &'static str,
    },

    #[error("{path}: {reason}")]
    OutOfRange { path: String, reason: String },

    #[error("{path}: {reason}")]
    InvalidValue { path: String, reason: String },

    #[error("{path}: duplicate {key}")]
    Duplicate { path: String, key: String },
}

/// The full persisted state: three collections in creation order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GradebookDocument {
    pub students: Vec<Student>,
    pub courses: Vec<Course>,
    pub enrollments: Vec<Enrollment>,
}

impl GradebookDocument {
    pub fn empty_value() -> Value {
        serde_json::json!({
            "students": [],
            "courses": [],
            "enrollments": [],
        })
    }

    /// Checks every field of `value` and builds the records.
    ///
    /// Missing top-level collections and a missing `grades` array are treated as empty. Any other
    /// problem rejects the whole document.
    pub fn from_value(value: &Value) -> Result<Self, DocumentError> {
        let root = value.as_object().ok_or_else(|| DocumentError::WrongType {
            path: "$".to_string(),
            expected: "object",
        })?;

        let mut document = Self::default();

        let mut seen_ids = HashSet::new();
        for (index, item) in collection(root, "students")?.iter().enumerate() {
            let path = format!("students[{}]", index);
            let fields = object(item, &path)?;
            let id = positive_id(fields, &path, "id")?;
            let name = string(fields, &path, "name")?;
            let student = Student::new(id, name).map_err(|e| invalid(&path, "name", e))?;
            if !seen_ids.insert(id) {
                return Err(DocumentError::Duplicate {
                    path: format!("{}.id", path),
                    key: format!("student id {}", id),
                });
            }
            document.students.push(student);
        }

        let mut seen_codes = HashSet::new();
        for (index, item) in collection(root, "courses")?.iter().enumerate() {
            let path = format!("courses[{}]", index);
            let fields = object(item, &path)?;
            let code = string(fields, &path, "code")?;
            let title = string(fields, &path, "title")?;
            let blank = if code.trim().is_empty() { "code" } else { "title" };
            let course = Course::new(code, title).map_err(|e| invalid(&path, blank, e))?;
            if !seen_codes.insert(course.code().to_string()) {
                return Err(DocumentError::Duplicate {
                    path: format!("{}.code", path),
                    key: format!("course code {}", course.code()),
                });
            }
            document.courses.push(course);
        }

        let mut seen_pairs = HashSet::new();
        for (index, item) in collection(root, "enrollments")?.iter().enumerate() {
            let path = format!("enrollments[{}]", index);
            let fields = object(item, &path)?;
            let student_id = positive_id(fields, &path, "student_id")?;
            let course_code = string(fields, &path, "course_code")?;
            let grades = grades(fields, &path)?;
            let enrollment = Enrollment::with_grades(student_id, course_code, grades)
                .map_err(|e| invalid(&path, "course_code", e))?;
            let pair = (student_id, enrollment.course_code().to_string());
            if !seen_pairs.insert(pair) {
                return Err(DocumentError::Duplicate {
                    path,
                    key: format!(
                        "enrollment of student {} in {}",
                        student_id,
                        enrollment.course_code()
                    ),
                });
            }
            document.enrollments.push(enrollment);
        }

        Ok(document)
    }
}

fn collection<'a>(root: &'a Map<String, Value>, key: &str) -> Result<&'a [Value], DocumentError> {
    match root.get(key) {
        None | Some(Value::Null) => Ok(&[]),
        Some(Value::Array(items)) => Ok(items),
        Some(_) => Err(DocumentError::WrongType {
            path: key.to_string(),
            expected: "array",
        }),
    }
}

fn object<'a>(value: &'a Value, path: &str) -> Result<&'a Map<String, Value>, DocumentError> {
    value.as_object().ok_or_else(|| DocumentError::WrongType {
        path: path.to_string(),
        expected: "object",
    })
}

fn field<'a>(
    fields: &'a Map<String, Value>,
    path: &str,
    key: &str,
) -> Result<&'a Value, DocumentError> {
    fields.get(key).ok_or_else(|| DocumentError::MissingField {
        path: format!("{}.{}", path, key),
    })
}

fn string<'a>(
    fields: &'a Map<String, Value>,
    path: &str,
    key: &str,
) -> Result<&'a str, DocumentError> {
    field(fields, path, key)?
        .as_str()
        .ok_or_else(|| DocumentError::WrongType {
            path: format!("{}.{}", path, key),
            expected: "string",
        })
}

fn positive_id(
    fields: &Map<String, Value>,
    path: &str,
    key: &str,
) -> Result<StudentId, DocumentError> {
    let value = field(fields, path, key)?;
    let field_path = format!("{}.{}", path, key);
    let raw = value.as_i64().ok_or_else(|| DocumentError::WrongType {
        path: field_path.clone(),
        expected: "integer",
    })?;
    match StudentId::try_from(raw) {
        Ok(id) if id >= 1 => Ok(id),
        _ => Err(DocumentError::OutOfRange {
            path: field_path,
            reason: format!("student id {} must be between 1 and {}", raw, StudentId::MAX),
        }),
    }
}

fn grades(fields: &Map<String, Value>, path: &str) -> Result<Vec<f64>, DocumentError> {
    let items = match fields.get("grades") {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Array(items)) => items,
        Some(_) => {
            return Err(DocumentError::WrongType {
                path: format!("{}.grades", path),
                expected: "array",
            })
        }
    };

    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let grade_path = format!("{}.grades[{}]", path, index);
            let grade = item.as_f64().ok_or_else(|| DocumentError::WrongType {
                path: grade_path.clone(),
                expected: "number",
            })?;
            if !(0.0..=100.0).contains(&grade) {
                return Err(DocumentError::OutOfRange {
                    path: grade_path,
                    reason: format!("grade {} must be between 0 and 100", grade),
                });
            }
            Ok(grade)
        })
        .collect()
}

fn invalid(path: &str, key: &str, err: crate::utils::error::GradebookError) -> DocumentError {
    DocumentError::InvalidValue {
        path: format!("{}.{}", path, key),
        reason: err.to_string(),
    }
}
