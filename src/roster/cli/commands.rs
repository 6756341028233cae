use super::render::{
    render_colleges, render_config, render_departments, render_messages, render_paths,
    render_student_detail, render_students,
};
use super::setup::{Cli, CollegeCommands, Commands, DepartmentCommands, ProfileArgs};
use clap::Parser;
use roster::api::RosterApi;
use roster::commands::config::ConfigAction;
use roster::commands::CmdResult;
use roster::error::{Result, RosterError};
use roster::init::{initialize, resolve_root};
use roster::logging::{init_logging, Verbosity};
use roster::model::{College, Department, Student};
use roster::store::fs::FileStore;
use uuid::Uuid;

type Api = RosterApi<FileStore>;

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(Verbosity::from_flags(cli.verbose));

    let root = resolve_root(cli.root)?;
    let mut ctx = initialize(root)?;
    let api = &mut ctx.api;

    match cli.command {
        None | Some(Commands::List) => handle_list(api),
        Some(Commands::Show { id }) => handle_show(api, &id),
        Some(Commands::Add {
            id,
            student_id,
            gender,
            profile,
        }) => handle_add(api, id, student_id, gender, profile),
        Some(Commands::Update {
            id,
            student_id,
            gender,
            profile,
        }) => handle_update(api, &id, student_id, gender, profile),
        Some(Commands::Delete { id }) => print_result(api.delete_student(&id)?),
        Some(Commands::College { action }) => handle_college(api, action),
        Some(Commands::Department { action }) => handle_department(api, action),
        Some(Commands::Doctor { fix }) => print_result(api.doctor(fix)?),
        Some(Commands::Init) => print_result(api.init()?),
        Some(Commands::Paths { id }) => {
            let result = api.paths(id.as_deref())?;
            print!("{}", render_paths(&result.paths));
            Ok(())
        }
        Some(Commands::Config { key, value }) => handle_config(api, key, value),
    }
}

fn new_id(id: Option<String>) -> String {
    id.unwrap_or_else(|| Uuid::new_v4().to_string())
}

fn handle_list(api: &Api) -> Result<()> {
    let result = api.get_students()?;
    print!("{}", render_students(&result.listed_students));
    Ok(())
}

fn handle_show(api: &Api, id: &str) -> Result<()> {
    let result = api.get_student(id)?;
    for student in &result.listed_students {
        print!("{}", render_student_detail(student));
    }
    Ok(())
}

fn handle_add(
    api: &mut Api,
    id: Option<String>,
    student_id: String,
    gender: String,
    profile: ProfileArgs,
) -> Result<()> {
    let mut student = Student::new(new_id(id), student_id);
    student.gender = gender;
    apply_profile(&mut student, profile);
    print_result(api.create_student(student)?)
}

fn handle_update(
    api: &mut Api,
    id: &str,
    student_id: Option<String>,
    gender: Option<String>,
    profile: ProfileArgs,
) -> Result<()> {
    let mut student = api
        .get_student(id)?
        .listed_students
        .pop()
        .ok_or_else(|| RosterError::NotFound(format!("Student with id {}", id)))?;
    if let Some(v) = student_id {
        student.student_id = v;
    }
    if let Some(v) = gender {
        student.gender = v;
    }
    apply_profile(&mut student, profile);
    print_result(api.update_student(student)?)
}

/// Overwrite the fields that were given on the command line.
fn apply_profile(student: &mut Student, profile: ProfileArgs) {
    let ProfileArgs {
        first_name,
        last_name,
        birthday,
        photo,
        college,
        department,
        year,
    } = profile;
    let fields = [
        (first_name, &mut student.first_name),
        (last_name, &mut student.last_name),
        (birthday, &mut student.birthday),
        (photo, &mut student.photo),
        (college, &mut student.college_id),
        (department, &mut student.department_id),
        (year, &mut student.year),
    ];
    for (value, field) in fields {
        if let Some(value) = value {
            *field = value;
        }
    }
}

fn handle_college(api: &mut Api, action: CollegeCommands) -> Result<()> {
    match action {
        CollegeCommands::Add { id, code, name } => print_result(api.create_college(College {
            id: new_id(id),
            code,
            name,
        })?),
        CollegeCommands::List => {
            print!("{}", render_colleges(&api.get_colleges()?.colleges));
            Ok(())
        }
        CollegeCommands::Delete { id } => print_result(api.delete_college(&id)?),
    }
}

fn handle_department(api: &mut Api, action: DepartmentCommands) -> Result<()> {
    match action {
        DepartmentCommands::Add {
            id,
            college,
            code,
            name,
        } => print_result(api.create_department(Department {
            id: new_id(id),
            college_id: college,
            code,
            name,
        })?),
        DepartmentCommands::List => {
            print!("{}", render_departments(&api.get_departments()?.departments));
            Ok(())
        }
        DepartmentCommands::Delete { id } => print_result(api.delete_department(&id)?),
    }
}

fn handle_config(api: &mut Api, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(key), None) => ConfigAction::ShowKey(key),
        (Some(key), Some(value)) => ConfigAction::Set(key, value),
    };
    let show_all = matches!(action, ConfigAction::ShowAll);

    let result = api.config_action(action)?;
    if show_all {
        if let Some(config) = &result.config {
            print!("{}", render_config(config));
        }
    }
    print!("{}", render_messages(&result.messages));
    Ok(())
}

fn print_result(result: CmdResult) -> Result<()> {
    print!("{}", render_messages(&result.messages));
    Ok(())
}
