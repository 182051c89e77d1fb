use chrono::NaiveDate;

use crate::{
    domain::{BedId, PatientId},
    error::ErrorCode,
    protocol::{parse_admission_date, NewPatient, PatientRecord},
};

fn new_patient() -> NewPatient {
    NewPatient {
        patient_name: "  Asha Rao ".to_string(),
        age: 34,
        gender: "F".to_string(),
        diagnosis: "Pneumonia".to_string(),
        admission_date: "2025-01-02".to_string(),
        bed_id: Some(BedId(5)),
    }
}

#[test]
fn decodes_wire_record_with_null_bed() {
    let record: PatientRecord = serde_json::from_str(
        r#"{"patient_id":7,"patient_name":"Ravi","age":61,"gender":"M","diagnosis":"Sepsis","admission_date":"2025-03-09","bed_id":null}"#,
    )
    .expect("decode");

    assert_eq!(record.patient_id, PatientId(7));
    assert_eq!(record.bed_id, None);
    assert_eq!(
        record.admission_date(),
        NaiveDate::from_ymd_opt(2025, 3, 9)
    );
}

#[test]
fn rejects_negative_age_at_decode() {
    let result = serde_json::from_str::<PatientRecord>(
        r#"{"patient_id":7,"patient_name":"Ravi","age":-1,"gender":"M","diagnosis":"Sepsis","admission_date":"2025-03-09","bed_id":null}"#,
    );
    assert!(result.is_err());
}

#[test]
fn record_invariants_flag_non_positive_ids_and_blank_names() {
    let mut record = PatientRecord {
        patient_id: PatientId(0),
        patient_name: "Ravi".to_string(),
        age: 61,
        gender: "M".to_string(),
        diagnosis: "Sepsis".to_string(),
        admission_date: "2025-03-09".to_string(),
        bed_id: None,
    };
    assert_eq!(
        record.check_invariants().expect_err("zero id").code,
        ErrorCode::Validation
    );

    record.patient_id = PatientId(3);
    record.patient_name = "   ".to_string();
    assert!(record.check_invariants().is_err());

    record.patient_name = "Ravi".to_string();
    assert!(record.check_invariants().is_ok());
}

#[test]
fn parses_timestamp_forms_of_admission_date() {
    let expected = NaiveDate::from_ymd_opt(2025, 1, 2);
    assert_eq!(parse_admission_date("2025-01-02T00:00:00.000Z"), expected);
    assert_eq!(parse_admission_date("2025-01-02T08:30:00+05:30"), expected);
    assert_eq!(parse_admission_date("2025-01-02T08:30:00"), expected);
    assert_eq!(parse_admission_date("yesterday"), None);
}

#[test]
fn new_patient_validation_checks_name_date_and_bed() {
    assert!(new_patient().validate().is_ok());

    let mut blank = new_patient();
    blank.patient_name = " ".to_string();
    assert!(blank.validate().is_err());

    let mut bad_date = new_patient();
    bad_date.admission_date = "02/01/2025".to_string();
    assert!(bad_date.validate().is_err());

    let mut bad_bed = new_patient();
    bad_bed.bed_id = Some(BedId(0));
    assert!(bad_bed.validate().is_err());
}

#[test]
fn new_patient_serializes_missing_bed_as_null() {
    let mut patient = new_patient().normalized();
    patient.bed_id = None;
    let json = serde_json::to_value(&patient).expect("encode");

    assert_eq!(json["patient_name"], "Asha Rao");
    assert!(json["bed_id"].is_null());
}
