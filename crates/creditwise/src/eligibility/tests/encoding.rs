use super::common::*;
use crate::eligibility::domain::{
    ApplicantRecord, EducationLevel, EmployerCategory, EmploymentStatus, Gender, LoanPurpose,
    MaritalStatus, PropertyArea,
};
use crate::eligibility::features::{encode, FEATURE_COUNT, FEATURE_NAMES, ONE_HOT_GROUPS};

fn group_sums(record: &ApplicantRecord) -> Vec<(&'static str, f64)> {
    let features = encode(record);
    ONE_HOT_GROUPS
        .iter()
        .map(|(name, range)| {
            let sum: f64 = features.as_slice()[range.clone()].iter().sum();
            (*name, sum)
        })
        .collect()
}

#[test]
fn encodes_raw_numerics_in_training_order() {
    let features = encode(&record());
    let values = features.as_slice();

    assert_eq!(values.len(), FEATURE_COUNT);
    assert_eq!(
        &values[..10],
        &[60_000.0, 20_000.0, 35.0, 1.0, 0.0, 15_000.0, 40_000.0, 100_000.0, 60.0, 1.0]
    );
}

#[test]
fn appends_squared_risk_terms_last() {
    let features = encode(&record());

    assert_eq!(FEATURE_NAMES[25], "DTI_Ratio_sq");
    assert_eq!(FEATURE_NAMES[26], "Credit_Score_sq");
    assert!((features.as_slice()[25] - 0.09).abs() < 1e-12);
    assert_eq!(features.as_slice()[26], 490_000.0);
}

#[test]
fn one_hot_columns_follow_the_selected_categories() {
    let record = record_with(|submission| {
        submission.employment_status = EmploymentStatus::SelfEmployed;
        submission.marital_status = MaritalStatus::Single;
        submission.loan_purpose = LoanPurpose::Education;
        submission.property_area = PropertyArea::Semiurban;
        submission.gender = Gender::Male;
        submission.employer_category = EmployerCategory::Mnc;
    });
    let features = encode(&record);

    for name in [
        "Employment_Status_Self-employed",
        "Marital_Status_Single",
        "Loan_Purpose_Education",
        "Property_Area_Semiurban",
        "Gender_Male",
        "Employer_Category_MNC",
    ] {
        assert_eq!(features.get(name), Some(1.0), "{name} should be hot");
    }
    assert_eq!(features.get("Employment_Status_Salaried"), Some(0.0));
    assert_eq!(features.get("Property_Area_Urban"), Some(0.0));
    assert_eq!(features.get("Unknown_Column"), None);
}

#[test]
fn reference_categories_encode_as_all_zero_groups() {
    let record = record_with(|submission| {
        submission.marital_status = MaritalStatus::Married;
        submission.property_area = PropertyArea::Rural;
        submission.gender = Gender::Female;
    });

    let sums = group_sums(&record);
    for (group, sum) in sums {
        match group {
            "marital_status" | "property_area" | "gender" => {
                assert_eq!(sum, 0.0, "{group} reference category should be all zeros")
            }
            _ => assert_eq!(sum, 1.0, "{group} should have exactly one hot column"),
        }
    }
}

#[test]
fn every_category_combination_keeps_groups_exclusive() {
    let employment = [
        EmploymentStatus::Salaried,
        EmploymentStatus::SelfEmployed,
        EmploymentStatus::Unemployed,
    ];
    let purposes = [
        LoanPurpose::Car,
        LoanPurpose::Education,
        LoanPurpose::Home,
        LoanPurpose::Personal,
    ];
    let areas = [PropertyArea::Rural, PropertyArea::Semiurban, PropertyArea::Urban];
    let employers = [
        EmployerCategory::Government,
        EmployerCategory::Mnc,
        EmployerCategory::Private,
        EmployerCategory::Unemployed,
    ];

    for status in employment {
        for purpose in purposes {
            for area in areas {
                for employer in employers {
                    let record = record_with(|submission| {
                        submission.employment_status = status;
                        submission.loan_purpose = purpose;
                        submission.property_area = area;
                        submission.employer_category = employer;
                    });
                    let features = encode(&record);
                    assert_eq!(features.as_slice().len(), FEATURE_COUNT);
                    for (group, sum) in group_sums(&record) {
                        assert!(sum == 0.0 || sum == 1.0, "{group} summed to {sum}");
                    }
                }
            }
        }
    }
}

#[test]
fn encoding_is_deterministic() {
    let record = record();
    let first = encode(&record);
    let second = encode(&record);

    let first_bits: Vec<u64> = first.as_slice().iter().map(|value| value.to_bits()).collect();
    let second_bits: Vec<u64> = second.as_slice().iter().map(|value| value.to_bits()).collect();
    assert_eq!(first_bits, second_bits);
}

#[test]
fn feature_names_are_unique() {
    let mut names = FEATURE_NAMES.to_vec();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), FEATURE_COUNT);
}

#[test]
fn education_accepts_graduate_flag_or_label() {
    let parse = |value: serde_json::Value| serde_json::from_value::<EducationLevel>(value);

    assert_eq!(parse(serde_json::json!(1)).expect("flag"), EducationLevel::Graduate);
    assert_eq!(parse(serde_json::json!(0)).expect("flag"), EducationLevel::NotGraduate);
    assert_eq!(
        parse(serde_json::json!("NotGraduate")).expect("label"),
        EducationLevel::NotGraduate
    );
    assert!(parse(serde_json::json!(2)).is_err());
    assert!(parse(serde_json::json!("Postgraduate")).is_err());

    let record = record_with(|submission| {
        submission.education_level = parse(serde_json::json!(0)).expect("flag")
    });
    assert_eq!(encode(&record).get("Education_Level"), Some(0.0));
}
