//! Categorical encodings: target label, yes/no flags and fixed ordinal scales.

use crate::error::{PipelineError, Result};

/// Outcome of looking a raw category up in a closed table
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Encoded {
    Mapped(i64),
    /// Outside the table; becomes a null in the engineered record
    Unmapped(String),
}

impl Encoded {
    pub fn value(&self) -> Option<i64> {
        match self {
            Encoded::Mapped(v) => Some(*v),
            Encoded::Unmapped(_) => None,
        }
    }
}

fn lookup(table: &[(&str, i64)], raw: &str) -> Encoded {
    table
        .iter()
        .find(|(k, _)| *k == raw)
        .map(|(_, v)| Encoded::Mapped(*v))
        .unwrap_or_else(|| Encoded::Unmapped(raw.to_string()))
}

/// Yes → 1, No → 0
pub fn encode_binary(raw: &str) -> Encoded {
    lookup(&[("Yes", 1), ("No", 0)], raw)
}

/// Stayed → 0, Left → 1. Unlike the feature encodings this one is strict.
pub fn encode_label(raw: &str, row: usize) -> Result<u8> {
    match raw {
        "Stayed" => Ok(0),
        "Left" => Ok(1),
        other => Err(PipelineError::UnknownLabel {
            row,
            value: other.to_string(),
        }),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrdinalScale {
    WorkLifeBalance,
    JobSatisfaction,
    PerformanceRating,
    EmployeeRecognition,
    CompanyReputation,
    JobLevel,
    CompanySize,
    EducationLevel,
}

const POOR_TO_EXCELLENT: &[(&str, i64)] = &[("Poor", 1), ("Fair", 2), ("Good", 3), ("Excellent", 4)];
const LOW_TO_VERY_HIGH: &[(&str, i64)] = &[("Low", 1), ("Medium", 2), ("High", 3), ("Very High", 4)];

impl OrdinalScale {
    pub fn column(self) -> &'static str {
        match self {
            OrdinalScale::WorkLifeBalance => "Work-Life Balance",
            OrdinalScale::JobSatisfaction => "Job Satisfaction",
            OrdinalScale::PerformanceRating => "Performance Rating",
            OrdinalScale::EmployeeRecognition => "Employee Recognition",
            OrdinalScale::CompanyReputation => "Company Reputation",
            OrdinalScale::JobLevel => "Job Level",
            OrdinalScale::CompanySize => "Company Size",
            OrdinalScale::EducationLevel => "Education Level",
        }
    }

    fn table(self) -> &'static [(&'static str, i64)] {
        match self {
            OrdinalScale::WorkLifeBalance | OrdinalScale::CompanyReputation => POOR_TO_EXCELLENT,
            OrdinalScale::JobSatisfaction | OrdinalScale::EmployeeRecognition => LOW_TO_VERY_HIGH,
            OrdinalScale::PerformanceRating => &[("Low", 1), ("Below Average", 2), ("Average", 3), ("High", 4)],
            // Executive passes validation but has no rank here
            OrdinalScale::JobLevel => &[("Entry", 1), ("Mid", 2), ("Senior", 3)],
            OrdinalScale::CompanySize => &[("Small", 1), ("Medium", 2), ("Large", 3)],
            OrdinalScale::EducationLevel => &[
                ("High School", 1),
                ("Bachelor\u{2019}s Degree", 2),
                ("Bachelor's Degree", 2),
                ("Master\u{2019}s Degree", 3),
                ("Master's Degree", 3),
                ("Associate Degree", 4),
                ("PhD", 5),
            ],
        }
    }

    pub fn encode(self, raw: &str) -> Encoded {
        lookup(self.table(), raw)
    }
}
