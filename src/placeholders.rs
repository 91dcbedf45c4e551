//! Placeholder tokens and issuance-time substitution.
//!
//! Templates reference recipient data through a fixed vocabulary of
//! bracketed tokens (`{{studentName}}`, `{{courseName}}`, ...). Substitution
//! happens once, at issuance time; the editor treats tokens as opaque text.

use serde::{Deserialize, Serialize};

/// The fixed vocabulary of placeholder tokens, in display order.
pub const TOKENS: [&str; 9] = [
    "{{studentName}}",
    "{{courseName}}",
    "{{completionDate}}",
    "{{issueDate}}",
    "{{expiryDate}}",
    "{{certificateNumber}}",
    "{{instructorName}}",
    "{{personalNumber}}",
    "{{finalGrade}}",
];

/// Recipient data substituted into a template at issuance time.
///
/// Every field is optional: an absent field leaves its token verbatim in the
/// output, so missing data stays visible on the certificate instead of being
/// silently blanked. That is deliberate policy, not an oversight.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct RecipientData {
    /// Full name of the student.
    pub student_name: Option<String>,
    /// Name of the completed course.
    pub course_name: Option<String>,
    /// Date the course was completed.
    pub completion_date: Option<String>,
    /// Date the certificate was issued.
    pub issue_date: Option<String>,
    /// Date the certificate expires, if it does.
    pub expiry_date: Option<String>,
    /// Unique certificate number.
    pub certificate_number: Option<String>,
    /// Name of the instructor.
    pub instructor_name: Option<String>,
    /// National/personal identification number.
    pub personal_number: Option<String>,
    /// Final grade awarded.
    pub final_grade: Option<String>,
}

impl RecipientData {
    fn field_for(&self, token: &str) -> &Option<String> {
        match token {
            "{{studentName}}" => &self.student_name,
            "{{courseName}}" => &self.course_name,
            "{{completionDate}}" => &self.completion_date,
            "{{issueDate}}" => &self.issue_date,
            "{{expiryDate}}" => &self.expiry_date,
            "{{certificateNumber}}" => &self.certificate_number,
            "{{instructorName}}" => &self.instructor_name,
            "{{personalNumber}}" => &self.personal_number,
            "{{finalGrade}}" => &self.final_grade,
            _ => &None,
        }
    }
}

/// Substitutes every known token in `text` with the corresponding recipient
/// field. Tokens whose field is absent are left untouched.
pub fn substitute(text: &str, recipient: &RecipientData) -> String {
    let mut out = text.to_string();
    for token in TOKENS {
        if let Some(value) = recipient.field_for(token) {
            out = out.replace(token, value);
        }
    }
    out
}
