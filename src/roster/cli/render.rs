//! Terminal output. Every function builds a `String` so layout can be tested
//! without a terminal; `commands.rs` does the printing.
//!
//! Column math uses display width, not byte or char counts, so names with
//! accents or CJK characters line up.

use colored::Colorize;
use roster::commands::{CmdMessage, MessageLevel};
use roster::config::RosterConfig;
use roster::model::{College, Department, Student};
use std::path::PathBuf;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const NAME_WIDTH: usize = 28;
const ID_WIDTH: usize = 12;

pub fn render_messages(messages: &[CmdMessage]) -> String {
    let mut out = String::new();
    for message in messages {
        let line = match message.level {
            MessageLevel::Info => message.content.dimmed(),
            MessageLevel::Success => message.content.green(),
            MessageLevel::Warning => message.content.yellow(),
            MessageLevel::Error => message.content.red(),
        };
        out.push_str(&format!("{}\n", line));
    }
    out
}

pub fn render_students(students: &[Student]) -> String {
    if students.is_empty() {
        return "No students found.\n".to_string();
    }

    let mut out = String::new();
    let header = format!(
        "{}{}{}{}{}",
        pad("ID", ID_WIDTH),
        pad("STUDENT", ID_WIDTH),
        pad("NAME", NAME_WIDTH),
        pad("GENDER", 8),
        "YEAR"
    );
    out.push_str(&format!("{}\n", header.dimmed()));

    for s in students {
        let id = truncate_to_width(&s.id, ID_WIDTH - 1);
        let name = truncate_to_width(&s.full_name(), NAME_WIDTH - 1);
        out.push_str(&format!(
            "{}{}{}{}{}\n",
            pad(&id, ID_WIDTH).yellow(),
            pad(&s.student_id, ID_WIDTH),
            pad(&name, NAME_WIDTH).bold(),
            pad(&s.gender, 8),
            s.year
        ));
    }
    out
}

pub fn render_student_detail(student: &Student) -> String {
    let rows = [
        ("id", &student.id),
        ("student id", &student.student_id),
        ("first name", &student.first_name),
        ("last name", &student.last_name),
        ("gender", &student.gender),
        ("birthday", &student.birthday),
        ("photo", &student.photo),
        ("college", &student.college_id),
        ("department", &student.department_id),
        ("year", &student.year),
    ];
    let mut out = String::new();
    for (label, value) in rows {
        out.push_str(&format!("{} {}\n", pad(label, 12).dimmed(), value));
    }
    out
}

pub fn render_colleges(colleges: &[College]) -> String {
    if colleges.is_empty() {
        return "No colleges found.\n".to_string();
    }
    colleges
        .iter()
        .map(|c| format!("{}{}{}\n", pad(&c.id, ID_WIDTH).yellow(), pad(&c.code, 10).bold(), c.name))
        .collect()
}

pub fn render_departments(departments: &[Department]) -> String {
    if departments.is_empty() {
        return "No departments found.\n".to_string();
    }
    departments
        .iter()
        .map(|d| {
            format!(
                "{}{}{}{}\n",
                pad(&d.id, ID_WIDTH).yellow(),
                pad(&d.code, 10).bold(),
                pad(&d.name, NAME_WIDTH),
                d.college_id.dimmed()
            )
        })
        .collect()
}

pub fn render_paths(paths: &[(String, PathBuf)]) -> String {
    let width = paths.iter().map(|(l, _)| l.width()).max().unwrap_or(0) + 2;
    paths
        .iter()
        .map(|(label, path)| format!("{}{}\n", pad(label, width).dimmed(), path.display()))
        .collect()
}

pub fn render_config(config: &RosterConfig) -> String {
    RosterConfig::KEYS
        .iter()
        .filter_map(|key| config.get(key).map(|v| format!("{} = {}\n", key, v)))
        .collect()
}

/// Left-align `s` in a column of `width` display cells.
fn pad(s: &str, width: usize) -> String {
    let fill = width.saturating_sub(s.width());
    format!("{}{}", s, " ".repeat(fill))
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain() {
        colored::control::set_override(false);
    }

    fn student(id: &str, first: &str, last: &str) -> Student {
        Student {
            id: id.into(),
            student_id: format!("S-{}", id),
            first_name: first.into(),
            last_name: last.into(),
            gender: "Female".into(),
            year: "2".into(),
            ..Default::default()
        }
    }

    #[test]
    fn empty_list_message() {
        plain();
        assert_eq!(render_students(&[]), "No students found.\n");
    }

    #[test]
    fn columns_align_with_wide_characters() {
        plain();
        let out = render_students(&[student("1", "Ana", "Reyes"), student("2", "美咲", "佐藤")]);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        let year_col = |line: &str| {
            let idx = line.rfind('2').unwrap();
            line[..idx].width()
        };
        assert_eq!(year_col(lines[1]), year_col(lines[2]));
    }

    #[test]
    fn long_names_are_truncated() {
        plain();
        let out = render_students(&[student("1", &"A".repeat(40), "B")]);
        assert!(out.contains('…'));
        assert!(!out.contains(&"A".repeat(40)));
    }

    #[test]
    fn config_lists_every_key() {
        plain();
        let out = render_config(&RosterConfig::default());
        assert!(out.contains("genders = Male,Female,Other"));
        assert!(out.contains("unique-student-id-on-update = false"));
        assert!(out.contains("photo-file-name = photo.jpg"));
    }

    #[test]
    fn messages_keep_order() {
        plain();
        let out = render_messages(&[CmdMessage::success("one"), CmdMessage::warning("two")]);
        assert_eq!(out, "one\ntwo\n");
    }
}
