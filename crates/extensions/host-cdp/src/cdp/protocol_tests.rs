use super::*;

#[test]
fn test_cdp_request_serialize() {
    let req = CdpRequest {
        id: 1,
        method: "Page.reload".to_string(),
        params: Some(serde_json::json!({"ignoreCache": false})),
        session_id: Some("S1".to_string()),
    };
    let json = serde_json::to_string(&req).unwrap();
    assert!(json.contains("Page.reload"));
    assert!(json.contains("\"sessionId\":\"S1\""));
}

#[test]
fn test_cdp_request_omits_empty_fields() {
    let req = CdpRequest {
        id: 2,
        method: "Target.getTargets".to_string(),
        params: None,
        session_id: None,
    };
    let json = serde_json::to_string(&req).unwrap();
    assert!(!json.contains("params"));
    assert!(!json.contains("sessionId"));
}

#[test]
fn test_cdp_response_deserialize() {
    let json = r#"{"id": 1, "result": {"frameId": "abc"}}"#;
    let resp: CdpResponse = serde_json::from_str(json).unwrap();
    assert_eq!(resp.id, Some(1));
    assert!(resp.result.is_some());
}

#[test]
fn test_cdp_event_deserialize() {
    let json = r#"{"method": "Page.loadEventFired", "params": {"timestamp": 1.0}, "sessionId": "S1"}"#;
    let resp: CdpResponse = serde_json::from_str(json).unwrap();
    assert!(resp.id.is_none());
    assert_eq!(resp.method.as_deref(), Some("Page.loadEventFired"));
}

#[test]
fn test_page_info_deserialize() {
    let json = r#"{
        "id": "page123",
        "type": "page",
        "title": "Test",
        "url": "https://example.com",
        "webSocketDebuggerUrl": "ws://localhost:9222/devtools/page/page123"
    }"#;
    let info: PageInfo = serde_json::from_str(json).unwrap();
    assert_eq!(info.id, "page123");
    assert!(info.is_page());
}

#[test]
fn test_service_worker_is_not_a_page() {
    let json = r#"{"id": "w1", "type": "service_worker", "url": "https://example.com/sw.js"}"#;
    let info: PageInfo = serde_json::from_str(json).unwrap();
    assert!(!info.is_page());
    assert_eq!(info.title, "");
}

#[test]
fn test_exception_message_prefers_description() {
    let json = r#"{
        "result": {"type": "object", "subtype": "error"},
        "exceptionDetails": {
            "exceptionId": 1,
            "text": "Uncaught",
            "lineNumber": 0,
            "columnNumber": 5,
            "exception": {"type": "object", "description": "TypeError: x is not a function"}
        }
    }"#;
    let result: EvaluationResult = serde_json::from_str(json).unwrap();
    let details = result.exception_details.unwrap();
    assert_eq!(details.message(), "TypeError: x is not a function");
}

#[test]
fn test_exception_message_falls_back_to_text() {
    let details = ExceptionDetails {
        text: "Uncaught SyntaxError".to_string(),
        line_number: 0,
        column_number: 0,
        exception: None,
    };
    assert_eq!(details.message(), "Uncaught SyntaxError");
}
