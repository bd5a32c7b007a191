use std::fmt;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Deserializer};

use super::domain::NewCandidate;
use crate::scoring::CandidateProfile;

const LIST_SEPARATOR: char = ';';

#[derive(Debug)]
pub enum RosterError {
    Io(std::io::Error),
    Csv(csv::Error),
    MissingName { row: usize },
}

impl fmt::Display for RosterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RosterError::Io(err) => write!(f, "failed to read candidate roster: {}", err),
            RosterError::Csv(err) => write!(f, "invalid candidate roster CSV: {}", err),
            RosterError::MissingName { row } => {
                write!(f, "candidate roster row {} has no name", row)
            }
        }
    }
}

impl std::error::Error for RosterError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RosterError::Io(err) => Some(err),
            RosterError::Csv(err) => Some(err),
            RosterError::MissingName { .. } => None,
        }
    }
}

impl From<std::io::Error> for RosterError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for RosterError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Bulk intake of candidates from an outreach roster export.
pub struct RosterImporter;

impl RosterImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<NewCandidate>, RosterError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Parse roster rows. Optional columns may be omitted entirely; list columns
    /// (`skills`, `interests`) are `;`-separated.
    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<NewCandidate>, RosterError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut candidates = Vec::new();

        for (index, record) in csv_reader.deserialize::<RosterRow>().enumerate() {
            let row = record?;
            if row.name.is_empty() {
                return Err(RosterError::MissingName { row: index + 1 });
            }
            candidates.push(row.into_candidate());
        }

        Ok(candidates)
    }
}

#[derive(Debug, Deserialize)]
struct RosterRow {
    name: String,
    #[serde(default)]
    location: String,
    #[serde(default, deserialize_with = "lenient_age")]
    age: i32,
    #[serde(default)]
    education_level: String,
    #[serde(default)]
    source_channel: String,
    #[serde(default)]
    income_bracket: String,
    #[serde(default)]
    skills: String,
    #[serde(default)]
    interests: String,
    #[serde(default, deserialize_with = "lenient_flag")]
    profile_completed: bool,
    #[serde(default, deserialize_with = "lenient_flag")]
    documents_uploaded: bool,
}

impl RosterRow {
    fn into_candidate(self) -> NewCandidate {
        NewCandidate {
            name: self.name,
            location: self.location,
            profile: CandidateProfile {
                age: self.age,
                education_level: self.education_level,
                source_channel: self.source_channel,
                income_bracket: self.income_bracket,
                skills: split_list(&self.skills),
                interests: split_list(&self.interests),
                profile_completed: self.profile_completed,
                documents_uploaded: self.documents_uploaded,
                ..CandidateProfile::default()
            },
        }
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(LIST_SEPARATOR)
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Blank cells read as 0, like every other missing profile field.
fn lenient_age<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }
    trimmed.parse().map_err(serde::de::Error::custom)
}

fn lenient_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    match raw.trim().to_ascii_lowercase().as_str() {
        "" | "false" | "no" | "n" | "0" => Ok(false),
        "true" | "yes" | "y" | "1" => Ok(true),
        other => Err(serde::de::Error::custom(format!(
            "expected a yes/no flag, found '{other}'"
        ))),
    }
}
