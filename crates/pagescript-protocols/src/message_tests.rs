use super::*;
use serde_json::json;

#[test]
fn test_request_tags() {
    let value = serde_json::to_value(Request::CheckAiStatus).unwrap();
    assert_eq!(value, json!({"type": "CHECK_AI_STATUS"}));

    let value = serde_json::to_value(Request::ExecuteScript {
        code: "1+1".to_string(),
        tab_id: 3,
    })
    .unwrap();
    assert_eq!(value, json!({"type": "EXECUTE_SCRIPT", "code": "1+1", "tabId": 3}));
}

#[test]
fn test_request_types_cover_every_variant() {
    let requests = vec![
        Request::CheckAiStatus,
        Request::GenerateScript { prompt: "p".to_string() },
        Request::ExecuteScript { code: "c".to_string(), tab_id: 1 },
        Request::GetCurrentTab,
        Request::SummarizePage { tab_id: 1 },
        Request::GetSettings,
        Request::SaveSettings { settings: Settings::default() },
    ];
    assert_eq!(requests.len(), Request::TYPES.len());
    for request in requests {
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["type"], request.kind());
        assert!(Request::TYPES.contains(&request.kind()));
    }
}

#[test]
fn test_from_json_generate() {
    let request = Request::from_json(r#"{"type":"GENERATE_SCRIPT","prompt":"make it blue"}"#).unwrap();
    assert_eq!(
        request,
        Request::GenerateScript {
            prompt: "make it blue".to_string()
        }
    );
}

#[test]
fn test_from_json_unknown_type() {
    let err = Request::from_json(r#"{"type":"PING"}"#).unwrap_err();
    assert!(matches!(err, ProtocolError::UnknownMessageType(ref t) if t == "PING"));
}

#[test]
fn test_from_json_missing_field() {
    let err = Request::from_json(r#"{"type":"EXECUTE_SCRIPT","code":"x"}"#).unwrap_err();
    assert!(matches!(err, ProtocolError::MalformedMessage(_)));
}

#[test]
fn test_from_json_not_json() {
    let err = Request::from_json("hello").unwrap_err();
    assert!(matches!(err, ProtocolError::MalformedMessage(_)));
}

#[test]
fn test_from_json_missing_type() {
    let err = Request::from_json(r#"{"prompt":"x"}"#).unwrap_err();
    assert!(matches!(err, ProtocolError::MalformedMessage(_)));
}

#[test]
fn test_save_settings_accepts_legacy_provider() {
    let request = Request::from_json(
        r#"{"type":"SAVE_SETTINGS","settings":{"provider":"chrome-ai","geminiApiKey":"","openaiApiKey":""}}"#,
    )
    .unwrap();
    match request {
        Request::SaveSettings { settings } => assert_eq!(settings.provider, ProviderKind::OnDevice),
        other => panic!("unexpected request: {:?}", other),
    }
}

#[test]
fn test_response_ai_status_omits_empty_fields() {
    let response = Response::AiStatus {
        status: AiStatus::NoApiKey,
        message: None,
        provider: Some(ProviderKind::Gemini),
    };
    let value = serde_json::to_value(&response).unwrap();
    assert_eq!(
        value,
        json!({"type": "AI_STATUS", "status": "no-api-key", "provider": "gemini"})
    );
}

#[test]
fn test_response_script_executed() {
    let response = Response::ScriptExecuted {
        result: ExecutionResult::failed("x is not defined", 10),
    };
    let value = serde_json::to_value(&response).unwrap();
    assert_eq!(value["type"], "SCRIPT_EXECUTED");
    assert_eq!(value["result"]["success"], false);
    assert_eq!(value["result"]["error"], "x is not defined");
    assert_eq!(value["result"]["executedAt"], 10);
}

#[test]
fn test_response_current_tab() {
    let response = Response::CurrentTab {
        tab_id: 9,
        url: "https://example.com/".to_string(),
    };
    let value = serde_json::to_value(&response).unwrap();
    assert_eq!(
        value,
        json!({"type": "CURRENT_TAB", "tabId": 9, "url": "https://example.com/"})
    );
}

#[test]
fn test_response_unit_variant() {
    let value = serde_json::to_value(Response::SettingsSaved).unwrap();
    assert_eq!(value, json!({"type": "SETTINGS_SAVED"}));
}

#[test]
fn test_response_error_helper() {
    let response = Response::error("no active tab");
    assert!(response.is_error());
    let value = serde_json::to_value(&response).unwrap();
    assert_eq!(value, json!({"type": "ERROR", "message": "no active tab"}));
}
