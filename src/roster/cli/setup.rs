use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

/// Returns the version string, including git hash and commit date for non-release builds.
/// Format for releases: "v0.1.0"
/// Format for dev builds: "v0.1.0\ndev: abc1234 2024-01-15 14:30"
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            format!("v{}", VERSION)
        } else {
            format!("v{}\ndev: {} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "roster", bin_name = "roster", version = get_version())]
#[command(about = "Student records kept in flat files", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Data directory (overrides $ROSTER_HOME)
    #[arg(long, global = true, value_name = "DIR", help_heading = "Options")]
    pub root: Option<PathBuf>,

    /// More log output on stderr (-v, -vv)
    #[arg(short, long, global = true, action = ArgAction::Count, help_heading = "Options")]
    pub verbose: u8,
}

/// Profile fields shared by `add` and `update`.
#[derive(Args, Debug, Default, Clone)]
pub struct ProfileArgs {
    #[arg(long)]
    pub first_name: Option<String>,

    #[arg(long)]
    pub last_name: Option<String>,

    /// Birthday as YYYY-MM-DD
    #[arg(long)]
    pub birthday: Option<String>,

    /// Image file to copy into the student's storage directory
    #[arg(long, value_name = "FILE")]
    pub photo: Option<String>,

    /// College record id
    #[arg(long)]
    pub college: Option<String>,

    /// Department record id
    #[arg(long)]
    pub department: Option<String>,

    /// Year level
    #[arg(long)]
    pub year: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a student
    #[command(display_order = 1)]
    Add {
        /// Record id (a new UUID when omitted)
        #[arg(long)]
        id: Option<String>,

        /// Student number, unique across records
        #[arg(long)]
        student_id: String,

        #[arg(long)]
        gender: String,

        #[command(flatten)]
        profile: ProfileArgs,
    },

    /// List students
    #[command(alias = "ls", display_order = 2)]
    List,

    /// Show one student
    #[command(display_order = 3)]
    Show { id: String },

    /// Change fields of a student; unspecified fields keep their value
    #[command(display_order = 4)]
    Update {
        id: String,

        #[arg(long)]
        student_id: Option<String>,

        #[arg(long)]
        gender: Option<String>,

        #[command(flatten)]
        profile: ProfileArgs,
    },

    /// Delete a student and its storage directory
    #[command(alias = "rm", display_order = 5)]
    Delete { id: String },

    /// Manage colleges
    #[command(display_order = 10)]
    College {
        #[command(subcommand)]
        action: CollegeCommands,
    },

    /// Manage departments
    #[command(display_order = 11)]
    Department {
        #[command(subcommand)]
        action: DepartmentCommands,
    },

    /// Check tables against storage directories
    #[command(display_order = 20)]
    Doctor {
        /// Remove orphan directories and clear missing photo references
        #[arg(long)]
        fix: bool,
    },

    /// Create the data directory layout
    #[command(display_order = 21)]
    Init,

    /// Show where data is stored
    #[command(display_order = 22)]
    Paths {
        /// Show only this student's storage directory
        id: Option<String>,
    },

    /// Get or set configuration
    #[command(display_order = 23)]
    Config {
        /// Configuration key (genders, unique-student-id-on-update, photo-file-name)
        key: Option<String>,
        /// Value to set
        value: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum CollegeCommands {
    Add {
        #[arg(long)]
        id: Option<String>,
        code: String,
        name: String,
    },
    #[command(alias = "ls")]
    List,
    #[command(alias = "rm")]
    Delete { id: String },
}

#[derive(Subcommand, Debug)]
pub enum DepartmentCommands {
    Add {
        #[arg(long)]
        id: Option<String>,
        /// Owning college record id
        #[arg(long)]
        college: String,
        code: String,
        name: String,
    },
    #[command(alias = "ls")]
    List,
    #[command(alias = "rm")]
    Delete { id: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_add_with_profile() {
        let cli = Cli::try_parse_from([
            "roster",
            "add",
            "--student-id",
            "S1",
            "--gender",
            "Female",
            "--first-name",
            "Ana",
            "--year",
            "2",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Add {
                id,
                student_id,
                gender,
                profile,
            }) => {
                assert_eq!(id, None);
                assert_eq!(student_id, "S1");
                assert_eq!(gender, "Female");
                assert_eq!(profile.first_name.as_deref(), Some("Ana"));
                assert_eq!(profile.year.as_deref(), Some("2"));
                assert_eq!(profile.photo, None);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["roster", "list", "--root", "/tmp/r", "-vv"]).unwrap();
        assert_eq!(cli.root, Some(PathBuf::from("/tmp/r")));
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn add_requires_student_id() {
        assert!(Cli::try_parse_from(["roster", "add", "--gender", "Male"]).is_err());
    }
}
