use qi_profile::ValidationError;
use qi_profile::api::{
    RESULT_TABLE_JSON_SCHEMA_V1, SCORE_PROFILE_REQUEST_JSON_SCHEMA_V1, ScoreProfileRequest,
};
use qi_profile::core::{RawScore, ResultTable, ScorePolicy, TableVariant};

#[test]
fn bare_request_json_parses_with_mixed_score_kinds() {
    let input = r#"{
        "variant": "index",
        "scores": {"Vocabulario": 12, "Cubos": "9", "Digitos": null},
        "chart": {"reference_mean": 8.0, "safety_margin": 2.0}
    }"#;
    let request = ScoreProfileRequest::from_json_compat_str(input).expect("request");

    assert_eq!(request.variant, TableVariant::Index);
    assert_eq!(request.scores.get("Vocabulario"), &RawScore::Int(12));
    assert_eq!(request.scores.get("Cubos"), &RawScore::Text("9".to_owned()));
    assert_eq!(request.scores.get("Digitos"), &RawScore::Absent);
    assert_eq!(request.chart.safety_margin, Some(2.0));

    let table = request.build_table().expect("table");
    assert_eq!(table.len(), 11);
    assert_eq!(table.rows()[0].score.get(), 12);
}

#[test]
fn versioned_request_round_trips_through_the_contract() {
    let mut request = ScoreProfileRequest::new(TableVariant::Qi);
    request.scores.insert("Aritmetica", 15);
    request.chart.reference_mean = Some(8.5);

    let json = request.to_json_contract_v1_pretty().expect("json");
    assert!(json.contains(&format!(
        "\"schema_version\": {SCORE_PROFILE_REQUEST_JSON_SCHEMA_V1}"
    )));
    let parsed = ScoreProfileRequest::from_json_compat_str(&json).expect("parse");
    assert_eq!(parsed, request);
}

#[test]
fn unsupported_schema_version_is_rejected() {
    let input = r#"{"schema_version": 7, "request": {"variant": "qi"}}"#;
    let err = ScoreProfileRequest::from_json_compat_str(input).expect_err("version");
    assert!(err.to_string().contains("unsupported request schema version: 7"));
}

#[test]
fn garbage_input_is_a_data_error() {
    assert!(matches!(
        ScoreProfileRequest::from_json_compat_str("not json"),
        Err(qi_profile::ChartError::InvalidData(_))
    ));
}

#[test]
fn fractional_json_score_fails_table_build() {
    let input = r#"{"variant": "qi", "scores": {"Codigos": 7.5}}"#;
    let request = ScoreProfileRequest::from_json_compat_str(input).expect("request");
    assert_eq!(request.build_table(), Err(ValidationError::NotInteger));
}

#[test]
fn result_table_contract_carries_rows_and_schema() {
    let request = ScoreProfileRequest::new(TableVariant::Qi);
    let table = request.build_table().expect("table");
    let json = table.to_json_contract_v1_pretty().expect("json");
    let value: serde_json::Value = serde_json::from_str(&json).expect("value");

    assert_eq!(
        value["schema_version"],
        serde_json::json!(RESULT_TABLE_JSON_SCHEMA_V1)
    );
    let rows = value["table"]["rows"].as_array().expect("rows");
    assert_eq!(rows.len(), 13);
    assert_eq!(rows[0]["label"], "Vocabulário");
    assert_eq!(rows[0]["score"], 8);
    assert_eq!(rows[0]["group"], "QI Verbal");
    assert_eq!(value["table"]["variant"], "qi");
    assert_eq!(value["group_column_name"], "QI");
}

#[test]
fn table_contract_names_the_group_column_per_variant() {
    let index = ScoreProfileRequest::new(TableVariant::Index)
        .build_table()
        .expect("index table");
    let value: serde_json::Value =
        serde_json::from_str(&index.to_json_contract_v1_pretty().expect("json")).expect("value");
    assert_eq!(value["group_column_name"], "Índice");
    assert_eq!(value["table"]["rows"][10]["group"], "IVP");

    let ungrouped = ResultTable::ungrouped(ScorePolicy::default(), [("A", 5)]).expect("table");
    let value: serde_json::Value =
        serde_json::from_str(&ungrouped.to_json_contract_v1_pretty().expect("json"))
            .expect("value");
    assert!(value["group_column_name"].is_null());
}

#[test]
fn wide_json_integers_keep_their_integer_kind() {
    let input = r#"{"variant": "qi", "scores": {"Cubos": 18446744073709551615}}"#;
    let request = ScoreProfileRequest::from_json_compat_str(input).expect("request");
    assert_eq!(
        request.build_table(),
        Err(ValidationError::OutOfRange { min: 0, max: 18 })
    );
}
