use anyhow::Result;
use gradebook::config::{ListKind, SortArg};
use gradebook::core::Storage;
use gradebook::{Command, GradebookEngine, GradebookError, LocalStorage};
use std::path::Path;
use tempfile::TempDir;

/// One process invocation: open the data file, run a command, save.
fn run(path: &Path, command: Command) -> Result<String, GradebookError> {
    let mut engine = GradebookEngine::open(LocalStorage::new(path))?;
    let output = engine.dispatch(&command)?;
    engine.persist()?;
    Ok(output)
}

#[test]
fn test_state_survives_between_invocations() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let data = temp_dir.path().join("data/gradebook.json");

    run(&data, Command::AddStudent { name: "Alice".to_string() })?;
    run(&data, Command::AddStudent { name: "Bob".to_string() })?;
    run(
        &data,
        Command::AddCourse {
            code: "cs101".to_string(),
            title: "Intro".to_string(),
        },
    )?;
    run(
        &data,
        Command::Enroll {
            student_id: 2,
            course: "cs101".to_string(),
        },
    )?;
    for grade in ["80", "90"] {
        run(
            &data,
            Command::AddGrade {
                student_id: 2,
                course: "CS101".to_string(),
                grade: grade.to_string(),
            },
        )?;
    }

    let avg = run(
        &data,
        Command::Avg {
            student_id: 2,
            course: "CS101".to_string(),
        },
    )?;
    assert_eq!(avg, "Average for student 2 in CS101: 85.00");

    let gpa = run(&data, Command::Gpa { student_id: 2 })?;
    assert_eq!(gpa, "GPA for student 2: 85.00");

    let listing = run(
        &data,
        Command::List {
            kind: ListKind::Students,
            sort: Some(SortArg::Name),
        },
    )?;
    assert_eq!(
        listing,
        "Students:\n  Student(ID: 1, Name: Alice)\n  Student(ID: 2, Name: Bob)"
    );

    let stored: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&data)?)?;
    assert_eq!(
        stored["enrollments"][0],
        serde_json::json!({"student_id": 2, "course_code": "CS101", "grades": [80.0, 90.0]})
    );
    Ok(())
}

#[test]
fn test_rejected_command_does_not_touch_file() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let data = temp_dir.path().join("gradebook.json");

    run(&data, Command::AddStudent { name: "Alice".to_string() })?;
    let before = std::fs::read_to_string(&data)?;

    let err = run(
        &data,
        Command::Enroll {
            student_id: 1,
            course: "NOPE".to_string(),
        },
    )
    .unwrap_err();
    assert_eq!(err.to_string(), "Course with code NOPE not found");

    assert_eq!(std::fs::read_to_string(&data)?, before);
    Ok(())
}

#[test]
fn test_corrupt_file_starts_empty() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let data = temp_dir.path().join("gradebook.json");
    std::fs::write(&data, "this is not json")?;

    let out = run(&data, Command::AddStudent { name: "Fresh".to_string() })?;
    assert_eq!(out, "Added student: ID=1, Name='Fresh'");
    Ok(())
}

#[test]
fn test_malformed_record_fails_to_open() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let data = temp_dir.path().join("gradebook.json");
    std::fs::write(
        &data,
        r#"{"students": [{"id": 1, "name": "Ok"}, {"name": "No id"}], "courses": [], "enrollments": []}"#,
    )?;

    let result = GradebookEngine::open(LocalStorage::new(&data));
    match result {
        Err(GradebookError::DocumentError(e)) => {
            assert_eq!(e.to_string(), "students[1].id: missing field")
        }
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("malformed document was accepted"),
    }
    Ok(())
}

#[test]
fn test_seeded_data_is_readable() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let data = temp_dir.path().join("seeded.json");
    let storage = LocalStorage::new(&data);
    storage.save(&gradebook::core::seed::sample_service()?.to_document())?;

    let gpa = run(&data, Command::Gpa { student_id: 1 })?;
    // GIT101 avg 87.666.., PY201 avg 92.333..
    assert_eq!(gpa, "GPA for student 1: 90.00");

    let courses = run(
        &data,
        Command::List {
            kind: ListKind::Courses,
            sort: None,
        },
    )?;
    assert_eq!(
        courses,
        "Courses:\n  Course(Code: GIT101, Title: Git & GitHub)\n  Course(Code: PY101, Title: Python Essentials 1)\n  Course(Code: PY201, Title: Python Essentials 2)"
    );
    Ok(())
}
