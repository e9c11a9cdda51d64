pub mod cli;
pub mod toml_config;

use crate::domain::model::SortKey;
use crate::utils::error::Result;
use clap::{Parser, Subcommand, ValueEnum};
pub use toml_config::DEFAULT_CONFIG_FILE;
use toml_config::GradebookConfig;

#[derive(Debug, Clone, Parser)]
#[command(name = "gradebook")]
#[command(about = "Gradebook CLI - manage students, courses, and grades")]
pub struct CliConfig {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to a TOML configuration file
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Gradebook data file (overrides the configuration file)
    #[arg(long, global = true)]
    pub data_file: Option<String>,

    /// Log file (overrides the configuration file)
    #[arg(long, global = true)]
    pub log_file: Option<String>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// Reads the configuration file (if any), applies command-line overrides and validates.
    pub fn resolve(&self) -> Result<GradebookConfig> {
        GradebookConfig::resolve(
            self.config.as_deref(),
            self.data_file.as_deref(),
            self.log_file.as_deref(),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Subcommand)]
pub enum Command {
    /// Add a new student
    AddStudent {
        /// Student name
        #[arg(long)]
        name: String,
    },
    /// Add a new course
    AddCourse {
        /// Course code
        #[arg(long)]
        code: String,
        /// Course title
        #[arg(long)]
        title: String,
    },
    /// Enroll student in course
    Enroll {
        /// Student ID
        #[arg(long, allow_hyphen_values = true)]
        student_id: i64,
        /// Course code
        #[arg(long)]
        course: String,
    },
    /// Add grade for student in course
    AddGrade {
        /// Student ID
        #[arg(long, allow_hyphen_values = true)]
        student_id: i64,
        /// Course code
        #[arg(long)]
        course: String,
        /// Grade (0-100)
        #[arg(long, allow_hyphen_values = true)]
        grade: String,
    },
    /// List students, courses, or enrollments
    List {
        /// What to list
        #[arg(value_enum)]
        kind: ListKind,
        /// Sort by field
        #[arg(long, value_enum)]
        sort: Option<SortArg>,
    },
    /// Compute average grade for student in course
    Avg {
        /// Student ID
        #[arg(long, allow_hyphen_values = true)]
        student_id: i64,
        /// Course code
        #[arg(long)]
        course: String,
    },
    /// Compute GPA for student
    Gpa {
        /// Student ID
        #[arg(long, allow_hyphen_values = true)]
        student_id: i64,
    },
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::AddStudent { .. } => "add-student",
            Command::AddCourse { .. } => "add-course",
            Command::Enroll { .. } => "enroll",
            Command::AddGrade { .. } => "add-grade",
            Command::List { .. } => "list",
            Command::Avg { .. } => "avg",
            Command::Gpa { .. } => "gpa",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListKind {
    Students,
    Courses,
    Enrollments,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortArg {
    Name,
    Code,
    Title,
    Id,
}

impl From<SortArg> for SortKey {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Name => SortKey::Name,
            SortArg::Code => SortKey::Code,
            SortArg::Title => SortKey::Title,
            SortArg::Id => SortKey::Id,
        }
    }
}
