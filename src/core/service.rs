use crate::domain::document::GradebookDocument;
use crate::domain::model::{normalize_code, Course, Enrollment, SortKey, Student, StudentId};
use crate::utils::error::{GradebookError, Result};
use crate::utils::validation::validate_non_empty_string;
use serde_json::Value;

/// In-memory students, courses and enrollments, plus the id counter for the next student.
#[derive(Debug, Clone)]
pub struct GradebookService {
    students: Vec<Student>,
    courses: Vec<Course>,
    enrollments: Vec<Enrollment>,
    next_student_id: StudentId,
}

impl Default for GradebookService {
    fn default() -> Self {
        Self::new()
    }
}

impl GradebookService {
    pub fn new() -> Self {
        Self {
            students: Vec::new(),
            courses: Vec::new(),
            enrollments: Vec::new(),
            next_student_id: 1,
        }
    }

    /// Replaces all collections with the records of `document`.
    pub fn load_from_document(&mut self, document: GradebookDocument) {
        self.next_student_id = document
            .students
            .iter()
            .map(Student::id)
            .max()
            .map_or(1, |max| max.saturating_add(1));
        self.students = document.students;
        self.courses = document.courses;
        self.enrollments = document.enrollments;
    }

    /// Checks `value` completely before replacing anything.
    pub fn load_from_value(&mut self, value: &Value) -> Result<()> {
        let document = GradebookDocument::from_value(value)?;
        tracing::debug!(
            "Loaded {} students, {} courses, {} enrollments",
            document.students.len(),
            document.courses.len(),
            document.enrollments.len()
        );
        self.load_from_document(document);
        Ok(())
    }

    pub fn to_document(&self) -> GradebookDocument {
        GradebookDocument {
            students: self.students.clone(),
            courses: self.courses.clone(),
            enrollments: self.enrollments.clone(),
        }
    }

    pub fn add_student(&mut self, name: &str) -> Result<StudentId> {
        validate_non_empty_string("Student name", name)?;

        let id = self.next_student_id;
        let student = Student::new(id, name)?;
        self.next_student_id = id.checked_add(1).ok_or_else(|| {
            GradebookError::validation("Student ID space exhausted")
        })?;
        self.students.push(student);
        tracing::debug!("Added student {}", id);
        Ok(id)
    }

    pub fn add_course(&mut self, code: &str, title: &str) -> Result<()> {
        let course = Course::new(code, title)?;
        if self.find_course(course.code()).is_some() {
            return Err(GradebookError::duplicate(format!(
                "Course with code {} already exists",
                course.code()
            )));
        }

        tracing::debug!("Added course {}", course.code());
        self.courses.push(course);
        Ok(())
    }

    pub fn enroll(&mut self, student_id: StudentId, course_code: &str) -> Result<()> {
        if self.find_student(student_id).is_none() {
            return Err(GradebookError::not_found(format!(
                "Student with ID {} not found",
                student_id
            )));
        }

        let code = normalize_code(course_code)?;
        if self.find_course(&code).is_none() {
            return Err(GradebookError::not_found(format!(
                "Course with code {} not found",
                code
            )));
        }

        if self.find_enrollment(student_id, &code).is_some() {
            return Err(GradebookError::duplicate(format!(
                "Student {} is already enrolled in {}",
                student_id, code
            )));
        }

        self.enrollments.push(Enrollment::new(student_id, &code)?);
        tracing::debug!("Enrolled student {} in {}", student_id, code);
        Ok(())
    }

    pub fn add_grade(
        &mut self,
        student_id: StudentId,
        course_code: &str,
        grade: f64,
    ) -> Result<()> {
        let code = normalize_code(course_code)?;
        let enrollment = self
            .enrollments
            .iter_mut()
            .find(|e| e.matches(student_id, &code))
            .ok_or_else(|| not_enrolled(student_id, &code))?;
        enrollment.add_grade(grade)
    }

    pub fn compute_average(&self, student_id: StudentId, course_code: &str) -> Result<f64> {
        let code = normalize_code(course_code)?;
        self.find_enrollment(student_id, &code)
            .map(Enrollment::average)
            .ok_or_else(|| not_enrolled(student_id, &code))
    }

    /// Mean of the per-course averages. Enrollments without grades are left out, not counted as 0.
    pub fn compute_gpa(&self, student_id: StudentId) -> Result<f64> {
        if self.find_student(student_id).is_none() {
            return Err(GradebookError::not_found(format!(
                "Student with ID {} not found",
                student_id
            )));
        }

        let averages: Vec<f64> = self
            .enrollments
            .iter()
            .filter(|e| e.student_id() == student_id && e.has_grades())
            .map(Enrollment::average)
            .collect();

        if averages.is_empty() {
            return Err(GradebookError::NoGradesError { student_id });
        }

        Ok(averages.iter().sum::<f64>() / averages.len() as f64)
    }

    /// Sorted copy. `Name` compares case-insensitively; any other key sorts by id.
    pub fn list_students(&self, sort_by: SortKey) -> Vec<Student> {
        let mut students = self.students.clone();
        match sort_by {
            SortKey::Name => students.sort_by_cached_key(|s| s.name().to_lowercase()),
            _ => students.sort_by_key(Student::id),
        }
        students
    }

    /// Sorted copy. `Title` compares case-insensitively; any other key sorts by code.
    pub fn list_courses(&self, sort_by: SortKey) -> Vec<Course> {
        let mut courses = self.courses.clone();
        match sort_by {
            SortKey::Title => courses.sort_by_cached_key(|c| c.title().to_lowercase()),
            _ => courses.sort_by(|a, b| a.code().cmp(b.code())),
        }
        courses
    }

    pub fn list_enrollments(&self) -> &[Enrollment] {
        &self.enrollments
    }

    pub fn next_student_id(&self) -> StudentId {
        self.next_student_id
    }

    pub fn find_student(&self, student_id: StudentId) -> Option<&Student> {
        self.students.iter().find(|s| s.id() == student_id)
    }

    /// Looks up by code; `code` is normalized first, blank codes match nothing.
    pub fn find_course(&self, code: &str) -> Option<&Course> {
        let code = normalize_code(code).ok()?;
        self.courses.iter().find(|c| c.code() == code)
    }

    pub fn find_enrollment(&self, student_id: StudentId, course_code: &str) -> Option<&Enrollment> {
        let code = normalize_code(course_code).ok()?;
        self.enrollments
            .iter()
            .find(|e| e.matches(student_id, &code))
    }
}

fn not_enrolled(student_id: StudentId, code: &str) -> GradebookError {
    GradebookError::not_found(format!(
        "Student {} is not enrolled in {}",
        student_id, code
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn service_with_enrollment() -> GradebookService {
        let mut service = GradebookService::new();
        let id = service.add_student("Jane Smith").unwrap();
        service.add_course("MATH101", "Calculus I").unwrap();
        service.enroll(id, "MATH101").unwrap();
        service
    }

    #[test]
    fn test_add_student_assigns_increasing_ids() {
        let mut service = GradebookService::new();
        assert_eq!(service.add_student("John Doe").unwrap(), 1);
        assert_eq!(service.add_student("Jane Doe").unwrap(), 2);
        assert_eq!(service.add_student("Jim Doe").unwrap(), 3);
        assert_eq!(service.find_student(1).unwrap().name(), "John Doe");
    }

    #[test]
    fn test_add_student_rejects_blank_name() {
        let mut service = GradebookService::new();
        assert!(service.add_student("").is_err());
        assert!(service.add_student("   ").is_err());
        assert!(service.list_students(SortKey::Id).is_empty());
        assert_eq!(service.next_student_id(), 1);
    }

    #[test]
    fn test_add_course_rejects_duplicate_normalized_code() {
        let mut service = GradebookService::new();
        service.add_course("cs101", "Intro").unwrap();
        let err = service.add_course(" CS101 ", "Another Course").unwrap_err();
        assert!(matches!(err, GradebookError::DuplicateError { .. }));
        assert_eq!(err.to_string(), "Course with code CS101 already exists");
        assert_eq!(service.list_courses(SortKey::Code).len(), 1);
    }

    #[test]
    fn test_enroll_rejections_leave_state_unchanged() {
        let mut service = service_with_enrollment();

        let err = service.enroll(99, "MATH101").unwrap_err();
        assert_eq!(err.to_string(), "Student with ID 99 not found");

        let err = service.enroll(1, "BIO101").unwrap_err();
        assert_eq!(err.to_string(), "Course with code BIO101 not found");

        let err = service.enroll(1, "math101").unwrap_err();
        assert!(matches!(err, GradebookError::DuplicateError { .. }));

        assert_eq!(service.list_enrollments().len(), 1);
    }

    #[test]
    fn test_add_grade_records_in_order() {
        let mut service = service_with_enrollment();
        service.add_grade(1, "MATH101", 85.5).unwrap();
        service.add_grade(1, "math101", 70.0).unwrap();

        let enrollment = service.find_enrollment(1, "MATH101").unwrap();
        assert_eq!(enrollment.grades(), &[85.5, 70.0]);
    }

    #[test]
    fn test_add_grade_rejections() {
        let mut service = service_with_enrollment();
        assert!(service.add_grade(1, "MATH101", 100.01).is_err());
        assert!(service.add_grade(1, "MATH101", -3.0).is_err());

        let err = service.add_grade(2, "MATH101", 50.0).unwrap_err();
        assert_eq!(err.to_string(), "Student 2 is not enrolled in MATH101");

        assert!(service.find_enrollment(1, "MATH101").unwrap().grades().is_empty());
    }

    #[test]
    fn test_compute_average() {
        let mut service = service_with_enrollment();
        assert_eq!(service.compute_average(1, "MATH101").unwrap(), 0.0);

        service.add_grade(1, "MATH101", 80.0).unwrap();
        service.add_grade(1, "MATH101", 90.0).unwrap();
        assert_eq!(service.compute_average(1, "math101").unwrap(), 85.0);

        assert!(service.compute_average(1, "PHY101").is_err());
    }

    #[test]
    fn test_compute_gpa_skips_ungraded_enrollments() {
        let mut service = GradebookService::new();
        let id = service.add_student("Charlie Wilson").unwrap();
        service.add_course("CS101", "CS Intro").unwrap();
        service.add_course("MATH101", "Calculus").unwrap();
        service.add_course("ART101", "Drawing").unwrap();
        service.enroll(id, "CS101").unwrap();
        service.enroll(id, "MATH101").unwrap();
        service.enroll(id, "ART101").unwrap();

        service.add_grade(id, "CS101", 80.0).unwrap();
        service.add_grade(id, "CS101", 80.0).unwrap();
        service.add_grade(id, "MATH101", 90.0).unwrap();

        assert_eq!(service.compute_gpa(id).unwrap(), 85.0);
    }

    #[test]
    fn test_compute_gpa_errors() {
        let mut service = GradebookService::new();
        assert!(matches!(
            service.compute_gpa(1),
            Err(GradebookError::NotFoundError { .. })
        ));

        let id = service.add_student("Diana Prince").unwrap();
        assert!(matches!(
            service.compute_gpa(id),
            Err(GradebookError::NoGradesError { student_id: 1 })
        ));

        service.add_course("CS101", "Intro").unwrap();
        service.enroll(id, "CS101").unwrap();
        assert!(matches!(
            service.compute_gpa(id),
            Err(GradebookError::NoGradesError { .. })
        ));
    }

    #[test]
    fn test_listing_sorts_copies() {
        let mut service = GradebookService::new();
        service.add_student("carol").unwrap();
        service.add_student("Alice").unwrap();
        service.add_student("bob").unwrap();
        service.add_course("PY201", "python 2").unwrap();
        service.add_course("GIT101", "Git").unwrap();

        let by_name: Vec<String> = service
            .list_students(SortKey::Name)
            .iter()
            .map(|s| s.name().to_string())
            .collect();
        assert_eq!(by_name, ["Alice", "bob", "carol"]);

        let by_id: Vec<StudentId> = service
            .list_students(SortKey::Code)
            .iter()
            .map(Student::id)
            .collect();
        assert_eq!(by_id, [1, 2, 3]);

        let codes: Vec<String> = service
            .list_courses(SortKey::Name)
            .iter()
            .map(|c| c.code().to_string())
            .collect();
        assert_eq!(codes, ["GIT101", "PY201"]);

        let titles: Vec<String> = service
            .list_courses(SortKey::Title)
            .iter()
            .map(|c| c.title().to_string())
            .collect();
        assert_eq!(titles, ["Git", "python 2"]);

        // creation order is untouched
        assert_eq!(service.to_document().courses[0].code(), "PY201");
    }

    #[test]
    fn test_load_recomputes_next_id() {
        let mut service = GradebookService::new();
        service
            .load_from_value(&json!({
                "students": [{"id": 4, "name": "Dan"}, {"id": 2, "name": "Bea"}]
            }))
            .unwrap();
        assert_eq!(service.add_student("Newcomer").unwrap(), 5);

        service.load_from_value(&json!({})).unwrap();
        assert_eq!(service.next_student_id(), 1);
    }

    #[test]
    fn test_failed_load_keeps_previous_state() {
        let mut service = service_with_enrollment();
        let result = service.load_from_value(&json!({
            "students": [{"id": 1, "name": "Ok"}],
            "courses": [{"code": "X"}]
        }));

        assert!(matches!(result, Err(GradebookError::DocumentError(_))));
        assert_eq!(service.find_student(1).unwrap().name(), "Jane Smith");
        assert_eq!(service.list_enrollments().len(), 1);
    }

    #[test]
    fn test_document_round_trip() {
        let mut service = service_with_enrollment();
        service.add_grade(1, "MATH101", 60.0).unwrap();
        service.add_grade(1, "MATH101", 75.0).unwrap();
        service.add_student("Second").unwrap();

        let value = serde_json::to_value(service.to_document()).unwrap();
        let mut restored = GradebookService::new();
        restored.load_from_value(&value).unwrap();

        assert_eq!(restored.to_document(), service.to_document());
        assert_eq!(restored.next_student_id(), 3);
    }
}
