use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Enrollment status of a student.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum StudentStatus {
    #[default]
    Active,
    Inactive,
}

/// A student enrolled in the studio.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<NaiveDate>,
    #[serde(default)]
    pub status: StudentStatus,
    /// Label of the pricing plan the student pays for.
    #[serde(default)]
    pub plan: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan_expires_on: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructor_id: Option<String>,
    /// Human readable class slots, first one is the next class.
    #[serde(default)]
    pub schedule: Vec<String>,
}

/// An instructor working at the studio.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Instructor {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub specialties: Vec<String>,
    /// Commission percentage, falls back to the studio default when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commission: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_student_accepts_minimal_remote_payload() {
        let student: Student =
            serde_json::from_str(r#"{"id":"s1","name":"Ana","birthDate":"1990-04-12"}"#).unwrap();
        assert_eq!(student.status, StudentStatus::Active);
        assert!(student.schedule.is_empty());
        assert_eq!(
            student.birth_date,
            NaiveDate::from_ymd_opt(1990, 4, 12)
        );
    }
}
