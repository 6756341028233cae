use serde::{Deserialize, Serialize};
use std::fmt;

/// The entity types persisted by the store, one table file each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Entity {
    Students,
    Colleges,
    Departments,
}

impl Entity {
    pub const ALL: [Entity; 3] = [Entity::Students, Entity::Colleges, Entity::Departments];

    pub fn file_name(&self) -> &'static str {
        match self {
            Entity::Students => "students.txt",
            Entity::Colleges => "colleges.txt",
            Entity::Departments => "departments.txt",
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Entity::Students => "students",
            Entity::Colleges => "colleges",
            Entity::Departments => "departments",
        };
        f.write_str(name)
    }
}

/// A student record.
///
/// `id` is assigned by the caller and never changes; it also names the record's
/// asset directory. `student_id` is the externally visible code. Dates and the
/// year are kept as text exactly as submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: String,
    pub student_id: String,
    pub first_name: String,
    pub last_name: String,
    pub gender: String,
    pub birthday: String,
    /// Absolute path of the stored photo, or empty.
    pub photo: String,
    pub college_id: String,
    pub department_id: String,
    pub year: String,
}

impl Student {
    pub fn new(id: impl Into<String>, student_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            student_id: student_id.into(),
            ..Default::default()
        }
    }

    pub fn full_name(&self) -> String {
        match (self.first_name.is_empty(), self.last_name.is_empty()) {
            (false, false) => format!("{} {}", self.first_name, self.last_name),
            (false, true) => self.first_name.clone(),
            (true, false) => self.last_name.clone(),
            (true, true) => String::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct College {
    pub id: String,
    pub code: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    pub id: String,
    pub college_id: String,
    pub code: String,
    pub name: String,
}
