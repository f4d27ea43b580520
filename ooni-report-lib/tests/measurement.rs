use ooni_report_lib::measurement::{
    parse_measurement, read_measurement, Accessible, Blocking, BlockingMethod, HttpBody,
    MeasurementOutcome,
};
use ooni_report_lib::ReportError;
use serde_json::json;
use std::io::Write;
use tempfile::NamedTempFile;

type TestResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

fn outcome_of(test_keys: serde_json::Value) -> Result<MeasurementOutcome, ReportError> {
    let doc = json!({ "input": "http://example.com/", "test_keys": test_keys });
    Ok(parse_measurement(&doc.to_string())?.test_keys.outcome())
}

#[test]
fn reads_tri_state_accessible() -> TestResult {
    assert_eq!(outcome_of(json!({"accessible": true}))?.accessible, Accessible::Yes);
    assert_eq!(outcome_of(json!({"accessible": false}))?.accessible, Accessible::No);
    assert_eq!(outcome_of(json!({"accessible": null}))?.accessible, Accessible::Unknown);
    Ok(())
}

#[test]
fn reads_blocking_verdicts() -> TestResult {
    assert_eq!(outcome_of(json!({"blocking": null}))?.blocking, Blocking::Null);
    assert_eq!(outcome_of(json!({"blocking": false}))?.blocking, Blocking::NotBlocked);
    assert_eq!(
        outcome_of(json!({"blocking": "dns"}))?.blocking,
        Blocking::Blocked(BlockingMethod::Dns)
    );
    assert_eq!(
        outcome_of(json!({"blocking": "mitm"}))?.blocking,
        Blocking::Blocked(BlockingMethod::Other("mitm".to_string()))
    );
    assert_eq!(
        outcome_of(json!({"blocking": true}))?.blocking,
        Blocking::Blocked(BlockingMethod::Unspecified)
    );
    Ok(())
}

#[test]
fn missing_and_mistyped_fields_default_to_null() -> TestResult {
    let o = outcome_of(json!({}))?;
    assert_eq!(o.accessible, Accessible::Unknown);
    assert_eq!(o.blocking, Blocking::Null);

    let o = outcome_of(json!({"accessible": "yes", "blocking": 3}))?;
    assert_eq!(o.accessible, Accessible::Unknown);
    assert_eq!(o.blocking, Blocking::Null);

    let m = parse_measurement("{}")?;
    assert_eq!(m.test_keys.outcome(), MeasurementOutcome::default());
    Ok(())
}

#[test]
fn null_arrays_read_as_empty() -> TestResult {
    let doc = json!({
        "test_keys": {
            "queries": null,
            "tcp_connect": null,
            "requests": null
        }
    });
    let m = parse_measurement(&doc.to_string())?;
    assert!(m.test_keys.queries.is_empty());
    assert!(m.test_keys.tcp_connect.is_empty());
    assert!(m.test_keys.requests.is_empty());
    Ok(())
}

#[test]
fn reads_binary_response_body() -> TestResult {
    let doc = json!({
        "test_keys": {
            "requests": [{
                "failure": null,
                "request": {"method": "GET", "url": "http://example.com/"},
                "response": {
                    "code": 200,
                    "headers": {"Server": "nginx"},
                    "body": {"format": "base64", "data": "AAEC"}
                }
            }]
        }
    });
    let m = parse_measurement(&doc.to_string())?;
    let response = m.test_keys.requests[0].response.as_ref().ok_or("response missing")?;
    assert_eq!(response.code, Some(200));
    assert_eq!(
        response.body,
        Some(HttpBody::Encoded { format: "base64".into(), data: "AAEC".into() })
    );
    Ok(())
}

#[test]
fn blocking_serializes_back_to_wire_values() -> TestResult {
    assert_eq!(serde_json::to_value(Blocking::Null)?, json!(null));
    assert_eq!(serde_json::to_value(Blocking::NotBlocked)?, json!(false));
    assert_eq!(serde_json::to_value(Blocking::from("tcp-ip"))?, json!("tcp-ip"));
    assert_eq!(serde_json::to_value(Blocking::Blocked(BlockingMethod::Unspecified))?, json!(true));
    assert_eq!(serde_json::to_value(Accessible::No)?, json!(false));
    Ok(())
}

#[test]
fn rejects_malformed_json() {
    let err = parse_measurement("{ not json").err();
    assert!(matches!(err, Some(ReportError::Parse(_))));
}

#[test]
fn reads_measurement_from_file() -> TestResult {
    let mut file = NamedTempFile::new()?;
    writeln!(
        file,
        r#"{{"report_id": "20180709T222326Z_AS37594_x", "test_keys": {{"accessible": false, "blocking": "tcp-ip"}}}}"#
    )?;

    let m = read_measurement(file.path())?;
    assert_eq!(m.report_id.as_deref(), Some("20180709T222326Z_AS37594_x"));
    assert_eq!(m.test_keys.outcome().blocking, Blocking::Blocked(BlockingMethod::TcpIp));
    Ok(())
}

#[test]
fn missing_file_is_io_error() {
    let err = read_measurement("/nonexistent/measurement.json").err();
    assert!(matches!(err, Some(ReportError::Io(_))));
}

#[test]
fn null_report_fields_still_parse_and_classify() -> TestResult {
    let doc = json!({
        "test_keys": {
            "accessible": true,
            "blocking": "dns",
            "queries": [{"hostname": null, "query_type": null, "answers": [{"answer_type": null}]}],
            "tcp_connect": [{"ip": null, "port": null, "status": null}],
            "requests": [{"request": {"method": null, "url": null}, "response": null}]
        }
    });
    let m = parse_measurement(&doc.to_string())?;
    assert_eq!(m.test_keys.queries[0].hostname, "");
    assert_eq!(m.test_keys.tcp_connect[0].port, 0);
    assert!(!m.test_keys.tcp_connect[0].status.success);
    assert_eq!(
        m.test_keys.requests[0].request.as_ref().map(|r| r.method.as_str()),
        Some("")
    );
    assert_eq!(m.test_keys.outcome().blocking, Blocking::Blocked(BlockingMethod::Dns));
    Ok(())
}

#[test]
fn null_test_keys_reads_as_empty() -> TestResult {
    let m = parse_measurement(r#"{"input": "http://example.com/", "test_keys": null}"#)?;
    assert_eq!(m.test_keys.outcome(), MeasurementOutcome::default());
    assert!(m.test_keys.queries.is_empty());
    Ok(())
}
