//! Intake form record and step types.
//!
//! The intake form gates chat access. Step 1 (`Details`) holds the required
//! identity fields, step 2 (`School`) the optional school information. The
//! record is validated, submitted once, and then dropped.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::IntakeError;

/// Loose `local@domain.tld` check, same strictness as the web form.
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

/// Which page of the intake form is visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntakeStep {
    Details,
    School,
}

impl Default for IntakeStep {
    fn default() -> Self {
        IntakeStep::Details
    }
}

/// User details captured by the intake form.
///
/// Serialized as-is for `POST /api/save_user`; every field is a string on
/// the wire, optional ones are sent empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntakeRecord {
    pub full_name: String,
    pub email: String,
    /// Single-choice "yes" / "no" answer.
    pub international: String,
    pub student_category: String,
    pub student_type: String,
    #[serde(default)]
    pub grade: String,
    #[serde(default)]
    pub province: String,
    #[serde(default)]
    pub school_name: String,
    #[serde(default)]
    pub student_number: String,
}

impl IntakeRecord {
    /// Validate the step-1 fields.
    ///
    /// Required fields are checked before the email format, so an empty
    /// email reports a missing field rather than a malformed one.
    pub fn validate_details(&self) -> Result<(), IntakeError> {
        let required = [
            ("full_name", &self.full_name),
            ("email", &self.email),
            ("international", &self.international),
            ("student_category", &self.student_category),
            ("student_type", &self.student_type),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(IntakeError::MissingField(name));
            }
        }

        let email = self.email.trim();
        if !EMAIL_RE.is_match(email) {
            return Err(IntakeError::InvalidEmail(email.to_string()));
        }

        Ok(())
    }

    /// Copy of the record with surrounding whitespace removed from every field.
    pub fn trimmed(&self) -> Self {
        Self {
            full_name: self.full_name.trim().to_string(),
            email: self.email.trim().to_string(),
            international: self.international.trim().to_string(),
            student_category: self.student_category.trim().to_string(),
            student_type: self.student_type.trim().to_string(),
            grade: self.grade.trim().to_string(),
            province: self.province.trim().to_string(),
            school_name: self.school_name.trim().to_string(),
            student_number: self.student_number.trim().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ada() -> IntakeRecord {
        IntakeRecord {
            full_name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            international: "no".to_string(),
            student_category: "High School".to_string(),
            student_type: "Returning".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_details() {
        assert!(ada().validate_details().is_ok());
    }

    #[test]
    fn test_each_required_field_is_checked() {
        let blank: [fn(&mut IntakeRecord); 5] = [
            |r| r.full_name.clear(),
            |r| r.email = "   ".to_string(),
            |r| r.international.clear(),
            |r| r.student_category.clear(),
            |r| r.student_type.clear(),
        ];
        for clear in blank {
            let mut record = ada();
            clear(&mut record);
            assert!(matches!(
                record.validate_details(),
                Err(IntakeError::MissingField(_))
            ));
        }
    }

    #[test]
    fn test_optional_fields_not_required() {
        let record = ada();
        assert!(record.school_name.is_empty());
        assert!(record.validate_details().is_ok());
    }

    #[test]
    fn test_invalid_emails() {
        for email in ["ada", "ada@example", "ada@@example.com", "a da@example.com", "@example.com", "ada@.com."] {
            let mut record = ada();
            record.email = email.to_string();
            assert_eq!(
                record.validate_details(),
                Err(IntakeError::InvalidEmail(email.to_string())),
                "{email} should be rejected"
            );
        }
    }

    #[test]
    fn test_email_with_subdomain_accepted() {
        let mut record = ada();
        record.email = " ada.l@mail.example.co.za ".to_string();
        assert!(record.validate_details().is_ok());
    }

    #[test]
    fn test_trimmed() {
        let mut record = ada();
        record.full_name = "  Ada Lovelace ".to_string();
        record.school_name = " Kimberley High\n".to_string();
        let trimmed = record.trimmed();
        assert_eq!(trimmed.full_name, "Ada Lovelace");
        assert_eq!(trimmed.school_name, "Kimberley High");
    }

    #[test]
    fn test_serializes_all_wire_fields() {
        let json = serde_json::to_value(ada()).unwrap();
        let obj = json.as_object().unwrap();
        for key in [
            "full_name",
            "email",
            "international",
            "student_category",
            "student_type",
            "grade",
            "province",
            "school_name",
            "student_number",
        ] {
            assert!(obj.get(key).is_some_and(|v| v.is_string()), "missing {key}");
        }
    }
}
