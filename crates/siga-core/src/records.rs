//! Read-only academic history records.
//!
//! The history screen lists subject cards: title, instructor, status, the
//! per-unit grades, and a progress label. Records can be overridden from the
//! config file; a built-in demo set is used otherwise.

use serde::{Deserialize, Serialize};

/// Whether a subject is still being taught.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubjectStatus {
    Active,
    Finished,
}

impl SubjectStatus {
    /// Display label, in the product's language.
    pub fn label(&self) -> &'static str {
        match self {
            SubjectStatus::Active => "Activo",
            SubjectStatus::Finished => "Finalizado",
        }
    }
}

/// A graded unit within a subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitGrade {
    pub topic: String,
    pub grade: String,
}

/// One subject card in the academic history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectRecord {
    pub title: String,
    pub instructor: String,
    pub status: SubjectStatus,
    #[serde(default)]
    pub units: Vec<UnitGrade>,
    pub progress: String,
}

/// The built-in history shown when the config does not override it.
pub fn builtin() -> Vec<SubjectRecord> {
    vec![
        SubjectRecord {
            title: "Inglés IV".to_string(),
            instructor: "Lic. Marco Antonio Suarez".to_string(),
            status: SubjectStatus::Active,
            units: vec![
                UnitGrade {
                    topic: "El pasado".to_string(),
                    grade: "E".to_string(),
                },
                UnitGrade {
                    topic: "Pasado Simple vs Continuo".to_string(),
                    grade: "E".to_string(),
                },
            ],
            progress: "100%".to_string(),
        },
        SubjectRecord {
            title: "Desarrollo de Apps Móvil".to_string(),
            instructor: "Ing. Nelson Crozby Padilla".to_string(),
            status: SubjectStatus::Finished,
            units: vec![
                UnitGrade {
                    topic: "Intro a desarrollo".to_string(),
                    grade: "A".to_string(),
                },
                UnitGrade {
                    topic: "Diseño de apps".to_string(),
                    grade: "B".to_string(),
                },
            ],
            progress: "100%".to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_records_are_well_formed() {
        let records = builtin();
        assert_eq!(records.len(), 2);
        for record in &records {
            assert!(!record.title.is_empty());
            assert!(!record.instructor.is_empty());
            assert!(!record.units.is_empty());
        }
    }

    #[test]
    fn test_record_round_trips_through_toml() {
        let record = builtin().remove(0);
        let toml = toml::to_string(&record).unwrap();
        let back: SubjectRecord = toml::from_str(&toml).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(SubjectStatus::Active.label(), "Activo");
        assert_eq!(SubjectStatus::Finished.label(), "Finalizado");
    }
}
