//! # Line Codec
//!
//! Every record is stored as exactly one line of text: its fields, in a fixed
//! order, joined by [`DELIMITER`].
//!
//! ```text
//! id|studentId|firstName|lastName|gender|birthday|photo|collegeId|departmentId|year
//! ```
//!
//! Each field is percent-encoded before joining. Encoding leaves only the RFC 3986
//! unreserved characters (`A-Z a-z 0-9 - _ . ~`) untouched, so an encoded field can
//! never contain the delimiter, a line terminator, or a bare `%`. That makes the
//! split on decode unambiguous and the round trip lossless for any field value.
//!
//! Decoding is strict: a line must split into exactly [`LineRecord::FIELD_COUNT`]
//! fields, every field must be something [`encode`] could have produced (unreserved
//! characters and `%XX` escapes only) and must decode to valid UTF-8. Anything else
//! is a [`RosterError::Format`].

use crate::error::{Result, RosterError};
use crate::model::{College, Department, Entity, Student};

pub const DELIMITER: char = '|';

/// A record that can be stored as one delimited line.
pub trait LineRecord: Sized {
    /// The table this record type lives in.
    const ENTITY: Entity;

    /// Number of fields in the stored line.
    const FIELD_COUNT: usize;

    /// Identifier, unique within the table.
    fn id(&self) -> &str;

    /// Field values in stored order. Must return `FIELD_COUNT` items.
    fn fields(&self) -> Vec<&str>;

    /// Build a record from decoded field values. Receives exactly `FIELD_COUNT` items.
    fn from_fields(fields: Vec<String>) -> Result<Self>;
}

pub fn encode<R: LineRecord>(record: &R) -> String {
    record
        .fields()
        .into_iter()
        .map(|field| urlencoding::encode(field).into_owned())
        .collect::<Vec<_>>()
        .join(&DELIMITER.to_string())
}

pub fn decode<R: LineRecord>(line: &str) -> Result<R> {
    let raw: Vec<&str> = line.split(DELIMITER).collect();
    if raw.len() != R::FIELD_COUNT {
        return Err(RosterError::Format(format!(
            "expected {} fields for {}, found {}",
            R::FIELD_COUNT,
            R::ENTITY,
            raw.len()
        )));
    }

    let fields = raw
        .into_iter()
        .enumerate()
        .map(|(i, field)| {
            if !is_encoded(field) {
                return Err(RosterError::Format(format!(
                    "field {} is not percent-encoded",
                    i + 1
                )));
            }
            urlencoding::decode(field)
                .map(|decoded| decoded.into_owned())
                .map_err(|e| RosterError::Format(format!("field {} is not valid UTF-8: {}", i + 1, e)))
        })
        .collect::<Result<Vec<_>>>()?;

    R::from_fields(fields)
}

/// Only unreserved characters and complete `%XX` escapes.
fn is_encoded(field: &str) -> bool {
    let bytes = field.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'%' => {
                let hex = |at: usize| bytes.get(at).is_some_and(u8::is_ascii_hexdigit);
                if !(hex(i + 1) && hex(i + 2)) {
                    return false;
                }
                i += 3;
            }
            b if b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.' | b'~') => i += 1,
            _ => return false,
        }
    }
    true
}

fn field_count_mismatch(entity: Entity, got: usize) -> RosterError {
    RosterError::Format(format!("wrong number of fields for {}: {}", entity, got))
}

impl LineRecord for Student {
    const ENTITY: Entity = Entity::Students;
    const FIELD_COUNT: usize = 10;

    fn id(&self) -> &str {
        &self.id
    }

    fn fields(&self) -> Vec<&str> {
        vec![
            self.id.as_str(),
            self.student_id.as_str(),
            self.first_name.as_str(),
            self.last_name.as_str(),
            self.gender.as_str(),
            self.birthday.as_str(),
            self.photo.as_str(),
            self.college_id.as_str(),
            self.department_id.as_str(),
            self.year.as_str(),
        ]
    }

    fn from_fields(fields: Vec<String>) -> Result<Self> {
        let got = fields.len();
        let [id, student_id, first_name, last_name, gender, birthday, photo, college_id, department_id, year]: [String; 10] =
            fields
                .try_into()
                .map_err(|_| field_count_mismatch(Self::ENTITY, got))?;
        Ok(Student {
            id,
            student_id,
            first_name,
            last_name,
            gender,
            birthday,
            photo,
            college_id,
            department_id,
            year,
        })
    }
}

impl LineRecord for College {
    const ENTITY: Entity = Entity::Colleges;
    const FIELD_COUNT: usize = 3;

    fn id(&self) -> &str {
        &self.id
    }

    fn fields(&self) -> Vec<&str> {
        vec![self.id.as_str(), self.code.as_str(), self.name.as_str()]
    }

    fn from_fields(fields: Vec<String>) -> Result<Self> {
        let got = fields.len();
        let [id, code, name]: [String; 3] = fields
            .try_into()
            .map_err(|_| field_count_mismatch(Self::ENTITY, got))?;
        Ok(College { id, code, name })
    }
}

impl LineRecord for Department {
    const ENTITY: Entity = Entity::Departments;
    const FIELD_COUNT: usize = 4;

    fn id(&self) -> &str {
        &self.id
    }

    fn fields(&self) -> Vec<&str> {
        vec![
            self.id.as_str(),
            self.college_id.as_str(),
            self.code.as_str(),
            self.name.as_str(),
        ]
    }

    fn from_fields(fields: Vec<String>) -> Result<Self> {
        let got = fields.len();
        let [id, college_id, code, name]: [String; 4] = fields
            .try_into()
            .map_err(|_| field_count_mismatch(Self::ENTITY, got))?;
        Ok(Department {
            id,
            college_id,
            code,
            name,
        })
    }
}
