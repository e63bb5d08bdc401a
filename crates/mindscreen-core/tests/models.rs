use jiff::civil::date;

use mindscreen_core::error::CoreError;
use mindscreen_core::models::patient::PatientRecord;
use mindscreen_core::models::score::Score;
use mindscreen_core::models::severity::Severity;

#[test]
fn severity_order_follows_clinical_order() {
    assert!(Severity::Minimal < Severity::Mild);
    assert!(Severity::Mild < Severity::Moderate);
    assert!(Severity::Moderate < Severity::Severe);

    let mut shuffled = vec![Severity::Severe, Severity::Minimal, Severity::Moderate, Severity::Mild];
    shuffled.sort();
    assert_eq!(shuffled, Severity::ALL.to_vec());
}

#[test]
fn only_moderate_and_severe_are_elevated() {
    assert!(!Severity::Minimal.is_elevated());
    assert!(!Severity::Mild.is_elevated());
    assert!(Severity::Moderate.is_elevated());
    assert!(Severity::Severe.is_elevated());
}

#[test]
fn severity_serializes_snake_case() {
    let json = serde_json::to_string(&Severity::Moderate).unwrap();
    assert_eq!(json, "\"moderate\"");
    assert_eq!(Severity::Moderate.to_string(), "Moderate");
}

#[test]
fn score_displays_against_maximum() {
    let score = Score::new(22, 63).unwrap();
    assert_eq!(score.to_string(), "22 / 63");
    assert_eq!(score.total(), 22);
}

#[test]
fn score_above_maximum_is_rejected() {
    assert!(matches!(
        Score::new(64, 63),
        Err(CoreError::ScoreOutOfRange { total: 64, max: 63 })
    ));
}

#[test]
fn intake_trims_and_defaults_date_to_today() {
    let today = date(2024, 1, 15);
    let patient = PatientRecord::from_intake("  Jane Doe ", " 29", None, today).unwrap();
    assert_eq!(patient.name, "Jane Doe");
    assert_eq!(patient.age, "29");
    assert_eq!(patient.assessment_date, today);

    let blank = PatientRecord::from_intake("Jane", "29", Some("  "), today).unwrap();
    assert_eq!(blank.assessment_date, today);
}

#[test]
fn intake_parses_explicit_date() {
    let patient =
        PatientRecord::from_intake("Jane", "29", Some("2023-11-02"), date(2024, 1, 15)).unwrap();
    assert_eq!(patient.assessment_date, date(2023, 11, 2));
    assert_eq!(patient.assessment_date.to_string(), "2023-11-02");
}

#[test]
fn intake_requires_name_and_age() {
    let today = date(2024, 1, 15);
    assert!(matches!(
        PatientRecord::from_intake("   ", "29", None, today),
        Err(CoreError::MissingField(field)) if field == "name"
    ));
    assert!(matches!(
        PatientRecord::from_intake("Jane", "", None, today),
        Err(CoreError::MissingField(field)) if field == "age"
    ));
}

#[test]
fn intake_rejects_malformed_date() {
    let result = PatientRecord::from_intake("Jane", "29", Some("15/01/2024"), date(2024, 1, 15));
    assert!(matches!(result, Err(CoreError::InvalidDate { value, .. }) if value == "15/01/2024"));
}

#[test]
fn every_core_error_comes_from_intake_or_scoring() {
    let today = date(2024, 3, 2);
    let errors = [
        PatientRecord::from_intake("", "30", None, today).unwrap_err(),
        PatientRecord::from_intake("Ann", "30", Some("soon"), today).unwrap_err(),
        Score::new(64, 63).unwrap_err(),
    ];

    for err in errors {
        let message = err.to_string();
        match err {
            CoreError::MissingField(field) => assert!(message.contains(&field)),
            CoreError::InvalidDate { value, .. } => assert!(message.contains(&value)),
            CoreError::ScoreOutOfRange { total, .. } => {
                assert!(message.contains(&total.to_string()))
            }
        }
    }
}
