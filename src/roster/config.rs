use crate::error::{Result, RosterError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_PHOTO_FILE_NAME: &str = "photo.jpg";

/// Configuration for roster, stored in `<data root>/config.json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct RosterConfig {
    /// Gender values accepted on create and update
    #[serde(default = "default_genders")]
    pub genders: Vec<String>,

    /// Reject updates that give a record another record's student id
    #[serde(default)]
    pub unique_student_id_on_update: bool,

    /// File name of the managed photo inside each record's asset directory
    #[serde(default = "default_photo_file_name")]
    pub photo_file_name: String,
}

fn default_genders() -> Vec<String> {
    vec!["Male".to_string(), "Female".to_string(), "Other".to_string()]
}

fn default_photo_file_name() -> String {
    DEFAULT_PHOTO_FILE_NAME.to_string()
}

fn check_genders(genders: &[String]) -> Result<()> {
    if genders.is_empty() || genders.iter().any(|g| g.trim().is_empty()) {
        return Err(RosterError::Config(
            "genders must list at least one value".to_string(),
        ));
    }
    Ok(())
}

/// The photo name is joined onto each asset directory, so it must not leave it.
fn check_photo_file_name(name: &str) -> Result<()> {
    if name.trim().is_empty()
        || name.trim() != name
        || name.contains(['/', '\\', '\0'])
        || name == "."
        || name == ".."
    {
        return Err(RosterError::Config(format!(
            "'{}' is not a plain file name",
            name
        )));
    }
    Ok(())
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            genders: default_genders(),
            unique_student_id_on_update: false,
            photo_file_name: default_photo_file_name(),
        }
    }
}

impl RosterConfig {
    pub const KEYS: [&'static str; 3] = [
        "genders",
        "unique-student-id-on-update",
        "photo-file-name",
    ];

    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        let config: RosterConfig = serde_json::from_str(&content)?;
        config.validate().map_err(|e| match e {
            RosterError::Config(reason) => {
                RosterError::Config(format!("{}: {}", config_path.display(), reason))
            }
            other => other,
        })?;
        Ok(config)
    }

    /// Check the values `set` would refuse, for configs edited by hand.
    pub fn validate(&self) -> Result<()> {
        check_genders(&self.genders)?;
        check_photo_file_name(&self.photo_file_name)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();
        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_path, content)?;
        Ok(())
    }

    pub fn accepts_gender(&self, gender: &str) -> bool {
        self.genders.iter().any(|g| g == gender)
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "genders" => Some(self.genders.join(",")),
            "unique-student-id-on-update" => Some(self.unique_student_id_on_update.to_string()),
            "photo-file-name" => Some(self.photo_file_name.clone()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "genders" => {
                let genders: Vec<String> = value
                    .split(',')
                    .map(str::trim)
                    .filter(|g| !g.is_empty())
                    .map(str::to_string)
                    .collect();
                check_genders(&genders)?;
                self.genders = genders;
            }
            "unique-student-id-on-update" => {
                self.unique_student_id_on_update = value.parse().map_err(|_| {
                    RosterError::Config(format!("expected true or false, got '{}'", value))
                })?;
            }
            "photo-file-name" => {
                let name = value.trim();
                check_photo_file_name(name)?;
                self.photo_file_name = name.to_string();
            }
            other => {
                return Err(RosterError::Config(format!("Unknown config key: {}", other)));
            }
        }
        Ok(())
    }
}
