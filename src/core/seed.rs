use crate::core::GradebookService;
use crate::utils::error::Result;

const STUDENTS: [&str; 3] = ["Alice Johnson", "Bob Smith", "Carol Davis"];

const COURSES: [(&str, &str); 3] = [
    ("GIT101", "Git & GitHub"),
    ("PY201", "Python Essentials 2"),
    ("PY101", "Python Essentials 1"),
];

const ENROLLMENTS: [(u32, &str, [f64; 3]); 6] = [
    (1, "GIT101", [85.0, 90.0, 88.0]),
    (1, "PY201", [92.0, 95.0, 90.0]),
    (2, "GIT101", [78.0, 82.0, 80.0]),
    (2, "PY101", [85.0, 88.0, 90.0]),
    (3, "PY201", [90.0, 92.0, 94.0]),
    (3, "PY101", [87.0, 85.0, 89.0]),
];

/// A small demo gradebook built through the regular service operations.
pub fn sample_service() -> Result<GradebookService> {
    let mut service = GradebookService::new();

    for name in STUDENTS {
        service.add_student(name)?;
    }

    for (code, title) in COURSES {
        service.add_course(code, title)?;
    }

    for (student_id, course_code, grades) in ENROLLMENTS {
        service.enroll(student_id, course_code)?;
        for grade in grades {
            service.add_grade(student_id, course_code, grade)?;
        }
    }

    Ok(service)
}
