use std::ops::{Deref, RangeInclusive};

use serde::{Deserialize, Serialize};

pub const AGE_RANGE: RangeInclusive<u8> = 18..=100;
pub const CREDIT_SCORE_RANGE: RangeInclusive<u16> = 300..=900;
pub const MIN_LOAN_TERM_MONTHS: u32 = 1;

/// Applicant details as collected by the intake surface, before validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationSubmission {
    pub applicant_income: f64,
    pub coapplicant_income: f64,
    pub age: u8,
    pub dependents: u32,
    pub existing_loans: u32,
    pub savings: f64,
    pub collateral_value: f64,
    pub loan_amount: f64,
    pub loan_term_months: u32,
    pub education_level: EducationLevel,
    pub employment_status: EmploymentStatus,
    pub marital_status: MaritalStatus,
    pub loan_purpose: LoanPurpose,
    pub property_area: PropertyArea,
    pub gender: Gender,
    pub employer_category: EmployerCategory,
    pub dti_ratio: f64,
    pub credit_score: u16,
}

impl ApplicationSubmission {
    pub fn total_income(&self) -> f64 {
        self.applicant_income + self.coapplicant_income
    }

    /// Loan amount over combined income; `None` when there is no income to divide by.
    pub fn loan_to_income(&self) -> Option<f64> {
        let total_income = self.total_income();
        if total_income > 0.0 {
            Some(self.loan_amount / total_income)
        } else {
            None
        }
    }
}

/// Accepts the label (`"Graduate"`, `"NotGraduate"`) or the 0/1 graduate flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "EducationInput")]
pub enum EducationLevel {
    NotGraduate,
    Graduate,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum EducationInput {
    Flag(u8),
    Label(String),
}

impl TryFrom<EducationInput> for EducationLevel {
    type Error = String;

    fn try_from(input: EducationInput) -> Result<Self, Self::Error> {
        match input {
            EducationInput::Flag(0) => Ok(EducationLevel::NotGraduate),
            EducationInput::Flag(1) => Ok(EducationLevel::Graduate),
            EducationInput::Flag(other) => {
                Err(format!("education flag must be 0 or 1, found {other}"))
            }
            EducationInput::Label(label) => match label.as_str() {
                "Graduate" => Ok(EducationLevel::Graduate),
                "NotGraduate" | "Not Graduate" => Ok(EducationLevel::NotGraduate),
                _ => Err(format!("unknown education level '{label}'")),
            },
        }
    }
}

impl EducationLevel {
    pub const fn flag(self) -> u8 {
        match self {
            EducationLevel::NotGraduate => 0,
            EducationLevel::Graduate => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmploymentStatus {
    Salaried,
    #[serde(rename = "Self-employed", alias = "Self-Employed", alias = "SelfEmployed")]
    SelfEmployed,
    Unemployed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaritalStatus {
    Single,
    Married,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoanPurpose {
    Car,
    Education,
    Home,
    Personal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PropertyArea {
    Rural,
    Semiurban,
    Urban,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmployerCategory {
    Government,
    #[serde(rename = "MNC")]
    Mnc,
    Private,
    Unemployed,
}

/// Validation failures raised while building an [`ApplicantRecord`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvalidApplicant {
    #[error("{field} must be a finite, non-negative number (found {value})")]
    NegativeOrNonFinite { field: &'static str, value: f64 },
    #[error("age must be between {min} and {max} (found {found})")]
    AgeOutOfRange { min: u8, max: u8, found: u8 },
    #[error("credit score must be between {min} and {max} (found {found})")]
    CreditScoreOutOfRange { min: u16, max: u16, found: u16 },
    #[error("loan term must be at least {min} month(s) (found {found})")]
    LoanTermTooShort { min: u32, found: u32 },
}

/// Submission that has passed range validation. Read-only once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ApplicantRecord(ApplicationSubmission);

impl ApplicantRecord {
    pub fn into_inner(self) -> ApplicationSubmission {
        self.0
    }
}

impl TryFrom<ApplicationSubmission> for ApplicantRecord {
    type Error = InvalidApplicant;

    fn try_from(submission: ApplicationSubmission) -> Result<Self, Self::Error> {
        let amounts = [
            ("applicant_income", submission.applicant_income),
            ("coapplicant_income", submission.coapplicant_income),
            ("savings", submission.savings),
            ("collateral_value", submission.collateral_value),
            ("loan_amount", submission.loan_amount),
            ("dti_ratio", submission.dti_ratio),
        ];
        if let Some((field, value)) = amounts
            .into_iter()
            .find(|(_, value)| !value.is_finite() || *value < 0.0)
        {
            return Err(InvalidApplicant::NegativeOrNonFinite { field, value });
        }

        if !AGE_RANGE.contains(&submission.age) {
            return Err(InvalidApplicant::AgeOutOfRange {
                min: *AGE_RANGE.start(),
                max: *AGE_RANGE.end(),
                found: submission.age,
            });
        }

        if !CREDIT_SCORE_RANGE.contains(&submission.credit_score) {
            return Err(InvalidApplicant::CreditScoreOutOfRange {
                min: *CREDIT_SCORE_RANGE.start(),
                max: *CREDIT_SCORE_RANGE.end(),
                found: submission.credit_score,
            });
        }

        if submission.loan_term_months < MIN_LOAN_TERM_MONTHS {
            return Err(InvalidApplicant::LoanTermTooShort {
                min: MIN_LOAN_TERM_MONTHS,
                found: submission.loan_term_months,
            });
        }

        Ok(Self(submission))
    }
}

impl Deref for ApplicantRecord {
    type Target = ApplicationSubmission;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Binary outcome shared by the model label and the final decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Approved,
    Rejected,
}

impl Verdict {
    pub const fn label(self) -> &'static str {
        match self {
            Verdict::Approved => "approved",
            Verdict::Rejected => "rejected",
        }
    }
}
