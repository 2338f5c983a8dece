//! End-to-end smoke tests for the full coopd stack.
//!
//! Each test wires the complete application (virtual pins and sensor bank,
//! the real flock HTTP feed against a local mock server, the controller and
//! the axum router) and exercises the HTTP layer via
//! `tower::ServiceExt::oneshot`; no TCP port is bound for the API.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use coopctl_adapter_flock_http::{FlockConfig, FlockHttpFeed};
use coopctl_adapter_http_axum::router;
use coopctl_adapter_http_axum::state::AppState;
use coopctl_adapter_virtual::{VirtualPin, VirtualSensorBank};
use coopctl_app::alarm::{AlarmSignaler, SignalTiming};
use coopctl_app::controller::Controller;
use coopctl_app::device_registry::DeviceRegistry;
use coopctl_domain::device::DeviceName;
use coopctl_domain::sample::SensorReading;
use coopctl_domain::threshold::ThresholdConfig;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

type CoopController = Controller<Arc<VirtualPin>, Arc<VirtualSensorBank>, FlockHttpFeed>;

struct Harness {
    controller: Arc<CoopController>,
    sensor: Arc<VirtualSensorBank>,
    pins: Vec<(&'static str, Arc<VirtualPin>)>,
    _feed: Option<MockServer>,
}

impl Harness {
    async fn start(feed_response: ResponseTemplate) -> Self {
        let feed_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/kandang"))
            .respond_with(feed_response)
            .mount(&feed_server)
            .await;

        let feed_url = format!("{}/api/kandang", feed_server.uri());
        Self {
            _feed: Some(feed_server),
            ..Self::wire(&feed_url)
        }
    }

    /// Wire the stack against a feed URL nothing listens on. For tests that
    /// never touch `/api/kandang` and must not do real IO.
    fn offline() -> Self {
        Self::wire("http://127.0.0.1:9/api/kandang")
    }

    fn wire(feed_url: &str) -> Self {
        let pins: Vec<_> = [("fan", 12), ("lamp", 13), ("heater", 14), ("pump", 15), ("feeder", 2)]
            .into_iter()
            .map(|(name, pin)| (name, Arc::new(VirtualPin::new(pin))))
            .collect();
        let registry = DeviceRegistry::new(
            pins.iter()
                .map(|(name, pin)| (DeviceName::new(*name).unwrap(), Arc::clone(pin))),
        )
        .unwrap();

        let sensor = Arc::new(VirtualSensorBank::new(reading(25.0, 20_000)));
        let feed = FlockHttpFeed::new(&FlockConfig {
            url: feed_url.to_string(),
            timeout_ms: 1_000,
        })
        .unwrap();

        let controller = Controller::new(
            registry,
            ThresholdConfig::default(),
            Arc::clone(&sensor),
            feed,
            "192.168.1.50",
        )
        .unwrap();

        Self {
            controller: Arc::new(controller),
            sensor,
            pins,
            _feed: None,
        }
    }

    fn app(&self) -> axum::Router {
        router::build(AppState::from_arc(Arc::clone(&self.controller)))
    }

    fn pin(&self, name: &str) -> &VirtualPin {
        self.pins
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, pin)| pin.as_ref())
            .unwrap()
    }
}

fn reading(temperature: f64, light_level: u16) -> SensorReading {
    SensorReading {
        temperature,
        humidity: 64.96,
        pressure: 1011.04,
        altitude: 31.26,
        light_level,
    }
}

async fn send(app: axum::Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(
            String::from_utf8_lossy(&bytes).into_owned(),
        ))
    };
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

// ---------------------------------------------------------------------------
// Health check
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_return_ok_when_health_check_called() {
    let harness = Harness::start(ResponseTemplate::new(200).set_body_json(json!([]))).await;
    let (status, body) = send(harness.app(), get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::String("OK".to_string()));
}

// ---------------------------------------------------------------------------
// Sensors and automation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_poll_round_and_record_history() {
    let harness = Harness::start(ResponseTemplate::new(200).set_body_json(json!([]))).await;

    let (status, body) = send(harness.app(), get("/api/temp")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["temperature"], json!(25.0));
    assert_eq!(body["humidity"], json!(65.0));
    assert_eq!(body["pressure"], json!(1011.0));
    assert_eq!(body["altitude"], json!(31.3));
    assert_eq!(body["ldr"], json!(20_000));
    assert_eq!(body["lamp_auto"], json!("off"));

    send(harness.app(), get("/api/temp")).await;
    let (status, history) = send(harness.app(), get("/api/temp-history")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(history["labels"].as_array().unwrap().len(), 2);
    assert_eq!(history["temperature"], json!([25.0, 25.0]));
    assert_eq!(history["humidity"], json!([65.0, 65.0]));
    assert_eq!(history["pressure"], json!([1011.0, 1011.0]));
}

#[tokio::test]
async fn should_cap_history_at_twenty_samples() {
    let harness = Harness::start(ResponseTemplate::new(200).set_body_json(json!([]))).await;

    for i in 0..25 {
        harness.sensor.set_temperature(f64::from(i));
        let (status, _) = send(harness.app(), get("/api/temp")).await;
        assert_eq!(status, StatusCode::OK);
    }

    let (_, history) = send(harness.app(), get("/api/temp-history")).await;
    let temps: Vec<f64> = history["temperature"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_f64().unwrap())
        .collect();
    let expected: Vec<f64> = (5..25).map(f64::from).collect();
    assert_eq!(temps, expected);
}

#[tokio::test]
async fn should_switch_lamp_through_hysteresis_band() {
    let harness = Harness::start(ResponseTemplate::new(200).set_body_json(json!([]))).await;
    let lamp = harness.pin("lamp");

    for (light, expected) in [
        (45_000, "on"),
        (35_000, "on"),
        (29_000, "off"),
        (35_000, "off"),
    ] {
        harness.sensor.set_light_level(light);
        let (_, body) = send(harness.app(), get("/api/temp")).await;
        assert_eq!(body["lamp_auto"], json!(expected), "light {light}");
        assert_eq!(lamp.level(), expected == "on", "light {light}");
    }

    let (_, body) = send(harness.app(), get("/api/lamp/status")).await;
    assert_eq!(body, json!({ "device": "lamp", "status": "off" }));
}

#[tokio::test]
async fn should_return_500_and_keep_history_when_sensor_fails() {
    let harness = Harness::start(ResponseTemplate::new(200).set_body_json(json!([]))).await;
    harness.sensor.set_fault(true);

    let (status, body) = send(harness.app(), get("/api/temp")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].is_string());

    let (_, history) = send(harness.app(), get("/api/temp-history")).await;
    assert_eq!(history["labels"], json!([]));
}

#[tokio::test(start_paused = true)]
async fn should_drive_alarm_output_from_temperature() {
    let harness = Harness::offline();
    let buzzer = Arc::new(VirtualPin::new(27));
    let signaler = AlarmSignaler::start(
        harness.controller.alarm_flag(),
        Arc::clone(&buzzer),
        SignalTiming {
            active: Duration::from_millis(20),
            idle: Duration::from_millis(5),
        },
    );

    harness.sensor.set_temperature(31.5);
    send(harness.app(), get("/api/temp")).await;
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(buzzer.level());

    harness.sensor.set_temperature(30.0);
    send(harness.app(), get("/api/temp")).await;
    tokio::time::sleep(Duration::from_millis(80)).await;
    assert!(!buzzer.level());

    signaler.abort();
}

// ---------------------------------------------------------------------------
// Devices
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_command_device_and_drive_its_pin() {
    let harness = Harness::start(ResponseTemplate::new(200).set_body_json(json!([]))).await;
    let fan = harness.pin("fan");

    let (status, body) = send(harness.app(), post("/api/fan", r#"{"action":"on"}"#)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "device": "fan", "status": "on" }));
    assert!(fan.level());

    let (_, body) = send(harness.app(), get("/api/fan/status")).await;
    assert_eq!(body, json!({ "device": "fan", "status": "on" }));

    let (status, _) = send(harness.app(), post("/api/fan", r#"{"action":"off"}"#)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(!fan.level());
}

#[tokio::test]
async fn should_reject_bad_commands_without_touching_pins() {
    let harness = Harness::start(ResponseTemplate::new(200).set_body_json(json!([]))).await;
    let heater = harness.pin("heater");
    let before = heater.writes();

    let (status, _) = send(harness.app(), post("/api/heater", r#"{"action":"toggle"}"#)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, _) = send(harness.app(), post("/api/heater", "{}")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, _) = send(harness.app(), post("/api/window", r#"{"action":"on"}"#)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, body) = send(harness.app(), post("/api/status", r#"{"action":"on"}"#)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    assert_eq!(heater.writes(), before);
}

#[tokio::test]
async fn should_return_404_for_unknown_device_status() {
    let harness = Harness::start(ResponseTemplate::new(200).set_body_json(json!([]))).await;
    let (status, body) = send(harness.app(), get("/api/window/status")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn should_report_500_when_output_fails() {
    let harness = Harness::start(ResponseTemplate::new(200).set_body_json(json!([]))).await;
    harness.pin("pump").set_fault(true);

    let (status, _) = send(harness.app(), post("/api/pump", r#"{"action":"on"}"#)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let (_, body) = send(harness.app(), get("/api/pump/status")).await;
    assert_eq!(body["status"], json!("off"));
}

#[tokio::test]
async fn should_list_devices_and_report_node_status() {
    let harness = Harness::start(ResponseTemplate::new(200).set_body_json(json!([]))).await;

    let (_, devices) = send(harness.app(), get("/api/devices")).await;
    assert_eq!(devices.as_array().unwrap().len(), 5);
    assert_eq!(devices[0], json!({ "name": "fan", "status": "off" }));

    let (status, body) = send(harness.app(), get("/api/status")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "status": "online", "ip": "192.168.1.50", "device_count": 5 })
    );
}

// ---------------------------------------------------------------------------
// Flock feed
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_sum_remote_flock_records() {
    let harness = Harness::start(ResponseTemplate::new(200).set_body_json(json!([
        { "animals": 120, "feed": "35", "water": 40.9 },
        { "animals": "80", "feed": 15, "water": true },
        { "animals": "n/a" }
    ])))
    .await;

    let (status, body) = send(harness.app(), get("/api/kandang")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "animals": 200, "feed": 50, "water": 41 }));
}

#[tokio::test]
async fn should_pass_single_remote_record_through() {
    let record = json!({ "animals": 12, "note": "north pen" });
    let harness = Harness::start(ResponseTemplate::new(200).set_body_json(&record)).await;

    let (status, body) = send(harness.app(), get("/api/kandang")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, record);
}

#[tokio::test]
async fn should_return_placeholders_when_remote_fails() {
    let harness = Harness::start(ResponseTemplate::new(502)).await;

    let (status, body) = send(harness.app(), get("/api/kandang")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "animals": "-", "feed": "-", "water": "-" }));
}

#[tokio::test]
async fn should_return_placeholders_for_empty_remote_list() {
    let harness = Harness::start(ResponseTemplate::new(200).set_body_json(json!([]))).await;

    let (_, body) = send(harness.app(), get("/api/kandang")).await;
    assert_eq!(body, json!({ "animals": "-", "feed": "-", "water": "-" }));
}
