//! Feature encoding matching the column layout the classifier was trained on.
//!
//! The order of [`FEATURE_NAMES`] is part of the contract with the model artifact. Reordering
//! columns here without retraining silently corrupts every prediction.

use std::ops::Range;

use serde::Serialize;

use super::domain::{
    ApplicantRecord, EmployerCategory, EmploymentStatus, Gender, LoanPurpose, MaritalStatus,
    PropertyArea,
};

pub const FEATURE_COUNT: usize = 27;

pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "Applicant_Income",
    "Coapplicant_Income",
    "Age",
    "Dependents",
    "Existing_Loans",
    "Savings",
    "Collateral_Value",
    "Loan_Amount",
    "Loan_Term",
    "Education_Level",
    "Employment_Status_Salaried",
    "Employment_Status_Self-employed",
    "Employment_Status_Unemployed",
    "Marital_Status_Single",
    "Loan_Purpose_Car",
    "Loan_Purpose_Education",
    "Loan_Purpose_Home",
    "Loan_Purpose_Personal",
    "Property_Area_Semiurban",
    "Property_Area_Urban",
    "Gender_Male",
    "Employer_Category_Government",
    "Employer_Category_MNC",
    "Employer_Category_Private",
    "Employer_Category_Unemployed",
    "DTI_Ratio_sq",
    "Credit_Score_sq",
];

/// Index ranges of the one-hot indicator groups within a [`FeatureVector`].
pub const ONE_HOT_GROUPS: [(&str, Range<usize>); 6] = [
    ("employment_status", 10..13),
    ("marital_status", 13..14),
    ("loan_purpose", 14..18),
    ("property_area", 18..20),
    ("gender", 20..21),
    ("employer_category", 21..25),
];

/// Fixed-length numeric row handed to the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        FEATURE_NAMES
            .iter()
            .position(|candidate| *candidate == name)
            .map(|index| self.0[index])
    }

    pub fn named(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        FEATURE_NAMES.iter().copied().zip(self.0.iter().copied())
    }
}

impl From<[f64; FEATURE_COUNT]> for FeatureVector {
    fn from(values: [f64; FEATURE_COUNT]) -> Self {
        Self(values)
    }
}

fn indicator(hit: bool) -> f64 {
    if hit {
        1.0
    } else {
        0.0
    }
}

pub fn encode(record: &ApplicantRecord) -> FeatureVector {
    let employment = record.employment_status;
    let purpose = record.loan_purpose;
    let employer = record.employer_category;

    FeatureVector([
        record.applicant_income,
        record.coapplicant_income,
        f64::from(record.age),
        f64::from(record.dependents),
        f64::from(record.existing_loans),
        record.savings,
        record.collateral_value,
        record.loan_amount,
        f64::from(record.loan_term_months),
        f64::from(record.education_level.flag()),
        indicator(employment == EmploymentStatus::Salaried),
        indicator(employment == EmploymentStatus::SelfEmployed),
        indicator(employment == EmploymentStatus::Unemployed),
        indicator(record.marital_status == MaritalStatus::Single),
        indicator(purpose == LoanPurpose::Car),
        indicator(purpose == LoanPurpose::Education),
        indicator(purpose == LoanPurpose::Home),
        indicator(purpose == LoanPurpose::Personal),
        indicator(record.property_area == PropertyArea::Semiurban),
        indicator(record.property_area == PropertyArea::Urban),
        indicator(record.gender == Gender::Male),
        indicator(employer == EmployerCategory::Government),
        indicator(employer == EmployerCategory::Mnc),
        indicator(employer == EmployerCategory::Private),
        indicator(employer == EmployerCategory::Unemployed),
        record.dti_ratio.powi(2),
        f64::from(record.credit_score).powi(2),
    ])
}
