use super::support::{RecordingLogger, Scripted, ScriptedSource, header};
use ag_ui_handler::{AgUiEvent, AgUiHandler, Event, IdGenerator};
use actix_web::http::{Method, StatusCode};
use actix_web::test;
use mockall::mock;
use serde_json::{Value, json};

mock! {
    pub Ids {}

    impl IdGenerator for Ids {
        fn thread_id(&self) -> String;
        fn run_id(&self) -> String;
    }
}

fn two_run_events() -> Vec<Value> {
    vec![
        AgUiEvent::run_started("thread-1", "run-1").to_json().unwrap(),
        AgUiEvent::run_finished("thread-1", "run-1").to_json().unwrap(),
    ]
}

fn post_run(body: &str) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/")
        .insert_header(("Content-Type", "application/json"))
        .set_payload(body.to_string())
}

#[actix_web::test]
async fn test_cors_preflight() {
    let source = ScriptedSource::events(two_run_events());
    let app = init_agui_app!(AgUiHandler::new(source.clone()));

    let req = test::TestRequest::default()
        .method(Method::OPTIONS)
        .uri("/")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(header(&resp, "Access-Control-Allow-Origin"), Some("*"));
    assert_eq!(
        header(&resp, "Access-Control-Allow-Methods"),
        Some("POST, OPTIONS")
    );
    assert_eq!(
        header(&resp, "Access-Control-Allow-Headers"),
        Some("Content-Type, Accept, Authorization, X-User-ID")
    );

    let body = test::read_body(resp).await;
    assert!(body.is_empty());
    assert!(source.runs().is_empty(), "preflight must not start a run");
}

#[actix_web::test]
async fn test_non_post_methods_are_rejected() {
    let source = ScriptedSource::events(two_run_events());
    let app = init_agui_app!(AgUiHandler::new(source.clone()));

    for method in [Method::GET, Method::PUT, Method::DELETE, Method::PATCH] {
        let req = test::TestRequest::default()
            .method(method.clone())
            .uri("/")
            .set_payload(r#"{"threadId":"t1"}"#)
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED, "{method}");
        let body = test::read_body(resp).await;
        assert_eq!(body, "Method not allowed");
    }

    assert!(source.runs().is_empty());
}

#[actix_web::test]
async fn test_invalid_json_is_bad_request() {
    let source = ScriptedSource::events(two_run_events());
    let app = init_agui_app!(AgUiHandler::new(source.clone()));

    let resp = test::call_service(&app, post_run("invalid").to_request()).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(
        header(&resp, "Content-Type")
            .unwrap_or_default()
            .starts_with("text/plain")
    );
    let body = test::read_body(resp).await;
    let body = std::str::from_utf8(&body).unwrap();
    assert!(body.starts_with("Invalid JSON: "), "unexpected body: {body}");
    assert!(source.runs().is_empty());
}

#[actix_web::test]
async fn test_scalar_message_content_is_bad_request() {
    let app = init_agui_app!(AgUiHandler::new(ScriptedSource::default()));

    let body = r#"{"threadId":"t1","messages":[{"id":"m1","role":"user","content":12345}]}"#;
    let resp = test::call_service(&app, post_run(body).to_request()).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = test::read_body(resp).await;
    let body = std::str::from_utf8(&body).unwrap();
    assert!(body.contains("content must be either a string or an array"));
}

#[actix_web::test]
async fn test_sse_streaming() {
    let source = ScriptedSource::events(two_run_events());
    let app = init_agui_app!(AgUiHandler::new(source));

    let req = post_run(r#"{"threadId":"t1","messages":[]}"#)
        .insert_header(("Accept", "text/event-stream"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(header(&resp, "Content-Type"), Some("text/event-stream"));
    assert_eq!(header(&resp, "Cache-Control"), Some("no-cache"));
    assert_eq!(header(&resp, "Access-Control-Allow-Origin"), Some("*"));
    assert_eq!(header(&resp, "X-Accel-Buffering"), Some("no"));

    let body = test::read_body(resp).await;
    let body = std::str::from_utf8(&body).unwrap();
    assert_eq!(body.matches("data:").count(), 2);

    let frames: Vec<Value> = body
        .split("\n\n")
        .filter(|frame| !frame.is_empty())
        .map(|frame| serde_json::from_str(frame.strip_prefix("data: ").unwrap()).unwrap())
        .collect();
    assert_eq!(frames, two_run_events());
}

#[actix_web::test]
async fn test_streaming_is_default_for_absent_and_wildcard_accept() {
    let app = init_agui_app!(AgUiHandler::new(ScriptedSource::events(two_run_events())));

    let absent = test::call_service(&app, post_run("{}").to_request()).await;
    assert_eq!(header(&absent, "Content-Type"), Some("text/event-stream"));
    let body = test::read_body(absent).await;
    assert_eq!(std::str::from_utf8(&body).unwrap().matches("data:").count(), 2);

    let wildcard = test::call_service(
        &app,
        post_run("{}").insert_header(("Accept", "*/*")).to_request(),
    )
    .await;
    assert_eq!(header(&wildcard, "Content-Type"), Some("text/event-stream"));
}

#[actix_web::test]
async fn test_json_response() {
    let source = ScriptedSource::events(vec![
        AgUiEvent::run_started("thread-json", "run-json")
            .to_json()
            .unwrap(),
    ]);
    let app = init_agui_app!(AgUiHandler::new(source));

    let req = post_run("{}")
        .insert_header(("Accept", "application/json"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(header(&resp, "Content-Type"), Some("application/json"));

    let events: Vec<Value> = test::read_body_json(resp).await;
    assert_eq!(
        events,
        vec![json!({"type": "RUN_STARTED", "threadId": "thread-json", "runId": "run-json"})]
    );
}

#[actix_web::test]
async fn test_other_accept_values_select_json() {
    let app = init_agui_app!(AgUiHandler::new(ScriptedSource::events(two_run_events())));

    for accept in ["text/plain", "text/event-stream, */*", "application/*"] {
        let req = post_run("{}").insert_header(("Accept", accept)).to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(header(&resp, "Content-Type"), Some("application/json"), "{accept}");
        let events: Vec<Value> = test::read_body_json(resp).await;
        assert_eq!(events.len(), 2);
    }
}

#[actix_web::test]
async fn test_json_mode_skips_unserializable_events() {
    let source = ScriptedSource::new(vec![
        Scripted::Event(json!({"type": "RUN_STARTED", "seq": 1})),
        Scripted::Unserializable,
        Scripted::Event(json!({"type": "RUN_FINISHED", "seq": 3})),
    ]);
    let app = init_agui_app!(AgUiHandler::new(source));

    let req = post_run("{}")
        .insert_header(("Accept", "application/json"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let events: Vec<Value> = test::read_body_json(resp).await;
    assert_eq!(
        events,
        vec![
            json!({"type": "RUN_STARTED", "seq": 1}),
            json!({"type": "RUN_FINISHED", "seq": 3})
        ]
    );
}

#[actix_web::test]
async fn test_json_mode_with_no_events_is_empty_array() {
    let app = init_agui_app!(AgUiHandler::new(ScriptedSource::default()));

    let req = post_run("{}")
        .insert_header(("Accept", "application/json"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    let body = test::read_body(resp).await;
    assert_eq!(body, "[]");
}

#[actix_web::test]
async fn test_generate_ids() {
    let source = ScriptedSource::default();
    let mut ids = MockIds::new();
    ids.expect_thread_id()
        .times(1)
        .returning(|| "thread-generated".to_string());
    ids.expect_run_id()
        .times(1)
        .returning(|| "run-generated".to_string());

    let app = init_agui_app!(AgUiHandler::new(source.clone()).with_id_generator(ids));

    let resp = test::call_service(&app, post_run(r#"{"messages":[]}"#).to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let runs = source.runs();
    assert_eq!(runs.len(), 1);
    assert_eq!(runs[0].thread_id, "thread-generated");
    assert_eq!(runs[0].run_id, "run-generated");
    assert_eq!(runs[0].input.thread_id, "thread-generated");
    assert_eq!(runs[0].input.run_id, "run-generated");
}

#[actix_web::test]
async fn test_supplied_ids_pass_through() {
    let source = ScriptedSource::default();
    let mut ids = MockIds::new();
    ids.expect_thread_id().never();
    ids.expect_run_id().never();

    let app = init_agui_app!(AgUiHandler::new(source.clone()).with_id_generator(ids));

    let body = r#"{"threadId":"t1","runId":"r1","messages":[]}"#;
    test::call_service(&app, post_run(body).to_request()).await;

    let runs = source.runs();
    assert_eq!(runs[0].thread_id, "t1");
    assert_eq!(runs[0].run_id, "r1");
}

#[actix_web::test]
async fn test_default_generator_fills_empty_ids() {
    let source = ScriptedSource::default();
    let app = init_agui_app!(AgUiHandler::new(source.clone()));

    let body = r#"{"threadId":"","runId":"","messages":[]}"#;
    test::call_service(&app, post_run(body).to_request()).await;

    let runs = source.runs();
    assert!(!runs[0].thread_id.is_empty());
    assert!(!runs[0].run_id.is_empty());
    assert_ne!(runs[0].thread_id, runs[0].run_id);
}

#[actix_web::test]
async fn test_null_ids_are_generated() {
    let source = ScriptedSource::default();
    let app = init_agui_app!(AgUiHandler::new(source.clone()));

    let body = r#"{"threadId":null,"runId":null,"messages":null,"tools":null}"#;
    let resp = test::call_service(&app, post_run(body).to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let runs = source.runs();
    assert!(runs[0].thread_id.starts_with("thread_"));
    assert!(runs[0].run_id.starts_with("run_"));
    assert!(runs[0].input.messages.is_empty());
    assert!(runs[0].input.tools.is_empty());
}

#[actix_web::test]
async fn test_user_id_header_reaches_context() {
    let source = ScriptedSource::default();
    let app = init_agui_app!(AgUiHandler::new(source.clone()));

    let with_user = post_run("{}").insert_header(("X-User-ID", "alice")).to_request();
    test::call_service(&app, with_user).await;
    test::call_service(&app, post_run("{}").to_request()).await;

    let runs = source.runs();
    assert_eq!(runs[0].user_id, "alice");
    assert_eq!(runs[1].user_id, "");
}

#[actix_web::test]
async fn test_input_reaches_source_normalized() {
    let source = ScriptedSource::default();
    let app = init_agui_app!(AgUiHandler::new(source.clone()));

    let body = json!({
        "threadId": "t1",
        "messages": [
            {"id": "m1", "role": "user", "content": "hello"},
            {"id": "m2", "role": "assistant", "content": null}
        ],
        "tools": [{"name": "search", "description": "Search"}],
        "state": {"step": 2}
    });
    test::call_service(&app, post_run(&body.to_string()).to_request()).await;

    let input = &source.runs()[0].input;
    assert_eq!(input.messages[0].text_content(), "hello");
    assert_eq!(input.messages[0].content.len(), 1);
    assert!(input.messages[1].content.is_empty());
    assert_eq!(input.tools[0].name, "search");
    assert_eq!(input.state, Some(json!({"step": 2})));
}

#[actix_web::test]
async fn test_one_log_line_per_request() {
    let logger = RecordingLogger::default();
    let app = init_agui_app!(
        AgUiHandler::new(ScriptedSource::default()).with_logger(logger.clone())
    );

    let req = test::TestRequest::get()
        .uri("/")
        .peer_addr("127.0.0.1:4000".parse().unwrap())
        .to_request();
    test::call_service(&app, req).await;

    assert_eq!(
        logger.lines(),
        vec!["[AG-UI] Received GET request from 127.0.0.1:4000".to_string()]
    );
}

#[actix_web::test]
async fn test_health() {
    let app = init_agui_app!(AgUiHandler::new(ScriptedSource::default()));

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(header(&resp, "Content-Type"), Some("application/json"));
    let body = test::read_body(resp).await;
    assert_eq!(
        body,
        r#"{"status":"healthy","protocol":"ag-ui","version":"1.0.0"}"#
    );
}
