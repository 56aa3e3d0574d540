// tests/emotion_client_test.rs
// EmotionClient against a local fake of the EmotionPredict service

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::post,
};
use serde_json::{Value, json};
use tokio::net::TcpListener;

use emotion_detector::emotion::client::MODEL_ID_HEADER;
use emotion_detector::{ClassifyError, Emotion, EmotionClassifier, EmotionClient, FailureKind};

const MODEL_ID: &str = "emotion_aggregated-workflow_lang_en_stock";

#[derive(Clone)]
struct FakeUpstream {
    status: StatusCode,
    body: String,
    delay: Duration,
    hits: Arc<AtomicUsize>,
    last_request: Arc<Mutex<Option<(Option<String>, Value)>>>,
}

impl FakeUpstream {
    fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
            delay: Duration::ZERO,
            hits: Arc::new(AtomicUsize::new(0)),
            last_request: Arc::new(Mutex::new(None)),
        }
    }

    fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

async fn predict(
    State(upstream): State<FakeUpstream>,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, String) {
    upstream.hits.fetch_add(1, Ordering::SeqCst);
    let model = headers
        .get(MODEL_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(String::from);
    let payload = serde_json::from_str(&body).unwrap_or(Value::Null);
    *upstream.last_request.lock().unwrap() = Some((model, payload));

    if !upstream.delay.is_zero() {
        tokio::time::sleep(upstream.delay).await;
    }
    (upstream.status, upstream.body.clone())
}

/// Serve the fake on an ephemeral port and return its endpoint URL
async fn spawn_upstream(upstream: FakeUpstream) -> String {
    let app = Router::new()
        .route("/predict", post(predict))
        .with_state(upstream);
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/predict")
}

fn client_for(endpoint: &str) -> EmotionClient {
    EmotionClient::new(endpoint, MODEL_ID, Duration::from_secs(5)).unwrap()
}

fn joy_body() -> String {
    json!({
        "emotionPredictions": [{
            "emotion": {
                "anger": 0.013,
                "disgust": 0.002,
                "fear": 0.009,
                "joy": 0.970,
                "sadness": 0.055
            },
            "target": "",
            "emotionMentions": [{
                "span": {"begin": 0, "end": 21, "text": "I love new technology"},
                "emotion": {
                    "anger": 0.013,
                    "disgust": 0.002,
                    "fear": 0.009,
                    "joy": 0.970,
                    "sadness": 0.055
                }
            }]
        }],
        "producerId": {"name": "Ensemble Aggregated Emotion Workflow", "version": "0.0.1"}
    })
    .to_string()
}

#[tokio::test]
async fn test_successful_classification() {
    let upstream = FakeUpstream::new(StatusCode::OK, joy_body());
    let endpoint = spawn_upstream(upstream.clone()).await;
    let client = client_for(&endpoint);

    let result = client.classify("I love new technology").await;

    assert_eq!(result.dominant_emotion, Some(Emotion::Joy));
    assert_eq!(result.scores.joy, Some(0.970));
    assert_eq!(result.scores.anger, Some(0.013));
    assert_eq!(result.scores.sadness, Some(0.055));
    assert_eq!(upstream.hits(), 1);

    let json = serde_json::to_value(result).unwrap();
    assert_eq!(json.as_object().unwrap().len(), 6);
    assert_eq!(json["dominant_emotion"], "joy");
}

#[tokio::test]
async fn test_request_carries_payload_and_model_header() {
    let upstream = FakeUpstream::new(StatusCode::OK, joy_body());
    let endpoint = spawn_upstream(upstream.clone()).await;

    client_for(&endpoint).classify("I love new technology").await;

    let (model, payload) = upstream.last_request.lock().unwrap().clone().unwrap();
    assert_eq!(model.as_deref(), Some(MODEL_ID));
    assert_eq!(payload, json!({"raw_document": {"text": "I love new technology"}}));
}

#[tokio::test]
async fn test_blank_input_makes_no_call() {
    let upstream = FakeUpstream::new(StatusCode::OK, joy_body());
    let endpoint = spawn_upstream(upstream.clone()).await;
    let client = client_for(&endpoint);

    for text in ["", " ", "\t\n  "] {
        let result = client.classify(text).await;
        assert!(result.is_null());
        assert!(result.scores.is_empty());
    }
    assert_eq!(upstream.hits(), 0);
}

#[tokio::test]
async fn test_non_success_statuses_yield_null() {
    for status in [
        StatusCode::BAD_REQUEST,
        StatusCode::NOT_FOUND,
        StatusCode::INTERNAL_SERVER_ERROR,
        StatusCode::SERVICE_UNAVAILABLE,
    ] {
        let upstream = FakeUpstream::new(status, r#"{"code":3,"details":"bad"}"#);
        let endpoint = spawn_upstream(upstream.clone()).await;
        let client = client_for(&endpoint);

        assert!(client.classify("I am really mad about this").await.is_null());

        match client.try_classify("I am really mad about this").await {
            Err(ClassifyError::Upstream { status: got, body }) => {
                assert_eq!(got.as_u16(), status.as_u16());
                assert!(body.contains("details"));
            }
            other => panic!("expected upstream error for {status}, got {other:?}"),
        }
    }
}

#[tokio::test]
async fn test_malformed_replies_yield_null() {
    let bodies = [
        r#"{"producerId":{"name":"x","version":"1"}}"#.to_string(),
        r#"{"emotionPredictions":[]}"#.to_string(),
        r#"{"emotionPredictions":[{"target":""}]}"#.to_string(),
        r#"{"emotionPredictions":[{"emotion":{"joy":0.9}}]}"#.to_string(),
        "not json at all".to_string(),
    ];

    for body in bodies {
        let upstream = FakeUpstream::new(StatusCode::OK, body.clone());
        let endpoint = spawn_upstream(upstream).await;
        let client = client_for(&endpoint);

        assert!(client.classify("some text").await.is_null(), "body: {body}");
        let err = client.try_classify("some text").await.unwrap_err();
        assert_eq!(err.kind(), FailureKind::ParseFailure, "body: {body}");
    }
}

#[tokio::test]
async fn test_out_of_range_scores_yield_null() {
    let body = json!({
        "emotionPredictions": [{
            "emotion": {"anger": -3.0, "disgust": 7.5, "fear": 0.1, "joy": 0.1, "sadness": 0.1}
        }]
    })
    .to_string();
    let upstream = FakeUpstream::new(StatusCode::OK, body);
    let endpoint = spawn_upstream(upstream).await;
    let client = client_for(&endpoint);

    let result = client.classify("I feel strange").await;
    assert!(result.is_null());
    assert!(result.scores.is_empty());

    let err = client.try_classify("I feel strange").await.unwrap_err();
    assert_eq!(err.kind(), FailureKind::ParseFailure);
}

#[tokio::test]
async fn test_analyze_skips_invalid_mention() {
    let body = json!({
        "emotionPredictions": [{
            "emotion": {"anger": 0.05, "disgust": 0.05, "fear": 0.1, "joy": 0.7, "sadness": 0.1},
            "emotionMentions": [
                {
                    "span": {"begin": 0, "end": 13, "text": "I love spring"},
                    "emotion": {"anger": 0.05, "disgust": 0.05, "fear": 0.1, "joy": 0.7, "sadness": 0.1}
                },
                {
                    "span": {"begin": 14, "end": 27, "text": "but not rain"},
                    "emotion": {"sadness": 0.4}
                }
            ]
        }]
    })
    .to_string();
    let upstream = FakeUpstream::new(StatusCode::OK, body);
    let endpoint = spawn_upstream(upstream).await;

    let analysis = client_for(&endpoint)
        .try_analyze("I love spring but not rain")
        .await
        .unwrap();

    assert_eq!(analysis.result.dominant_emotion, Some(Emotion::Joy));
    assert_eq!(analysis.mentions.len(), 1);
    assert_eq!(analysis.mentions[0].span.text, "I love spring");
}

#[tokio::test]
async fn test_timeout_yields_null() {
    let upstream = FakeUpstream::new(StatusCode::OK, joy_body()).with_delay(Duration::from_secs(2));
    let endpoint = spawn_upstream(upstream).await;
    let client = EmotionClient::new(&endpoint, MODEL_ID, Duration::from_millis(200)).unwrap();

    assert!(client.classify("I am glad this happened").await.is_null());

    let err = client.try_classify("I am glad this happened").await.unwrap_err();
    assert!(matches!(err, ClassifyError::Timeout), "got {err:?}");
    assert_eq!(err.kind(), FailureKind::NetworkFailure);
}

#[tokio::test]
async fn test_connection_refused_yields_null() {
    // Grab a free port, then close it so nothing is listening
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = client_for(&format!("http://{addr}/predict"));

    assert!(client.classify("I am glad this happened").await.is_null());

    let err = client.try_classify("I am glad this happened").await.unwrap_err();
    assert_eq!(err.kind(), FailureKind::NetworkFailure);
}

#[tokio::test]
async fn test_analyze_includes_mentions() {
    let upstream = FakeUpstream::new(StatusCode::OK, joy_body());
    let endpoint = spawn_upstream(upstream).await;

    let analysis = client_for(&endpoint)
        .try_analyze("I love new technology")
        .await
        .unwrap();

    assert_eq!(analysis.result.dominant_emotion, Some(Emotion::Joy));
    assert_eq!(analysis.mentions.len(), 1);
    assert_eq!(analysis.mentions[0].span.text, "I love new technology");
    assert_eq!(analysis.mentions[0].result.dominant_emotion, Some(Emotion::Joy));
}
