//! End-to-end flows over a real listener.

mod common;

use std::time::Duration;

use triage_bot::config::TriageConfig;

fn config_with_geocoder(base_url: String) -> TriageConfig {
    let mut config = TriageConfig::default();
    config.geocoder.base_url = base_url;
    config.geocoder.timeout_secs = 2;
    config
}

#[tokio::test]
async fn headache_maps_to_common_cold() {
    let geocoder = common::start_mock_geocoder(
        r#"[{"display_name":"St. Mary Hospital, 12 Main St, Springfield"}]"#,
    )
    .await;
    let app = common::spawn_app(config_with_geocoder(geocoder)).await;
    let client = common::client();

    let res = client
        .post(app.url("/chat_api"))
        .json(&serde_json::json!({ "message": "headache", "location": "Springfield" }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 200);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["diagnosis"], "Common Cold");
    assert_eq!(body["medicine"], "Paracetamol, Vitamin C");
    let hospitals = body["nearby_hospitals"].as_array().unwrap();
    assert_eq!(hospitals.len(), 1);
    assert_eq!(hospitals[0]["name"], "St. Mary Hospital");
    assert_eq!(hospitals[0]["rating"], "N/A");

    app.shutdown.trigger();
}

#[tokio::test]
async fn unmatched_symptoms_report_unknown() {
    let geocoder = common::start_mock_geocoder("[]").await;
    let app = common::spawn_app(config_with_geocoder(geocoder)).await;
    let client = common::client();

    let res = client
        .post(app.url("/chat_api"))
        .json(&serde_json::json!({ "message": "xyz-unrelated" }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 200);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["diagnosis"], "Unknown");
    assert_eq!(body["medicine"], "Not available");
    assert_eq!(body["nearby_hospitals"].as_array().unwrap().len(), 0);

    app.shutdown.trigger();
}

#[tokio::test]
async fn geocoder_outage_serves_fallback_facilities() {
    let geocoder = common::unreachable_geocoder().await;
    let app = common::spawn_app(config_with_geocoder(geocoder)).await;
    let client = common::client();

    let res = client
        .post(app.url("/chat_api"))
        .json(&serde_json::json!({ "message": "fever", "location": "Springfield" }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 200);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["diagnosis"], "Viral Fever");
    let hospitals = body["nearby_hospitals"].as_array().unwrap();
    assert_eq!(hospitals.len(), 2);
    for hospital in hospitals {
        assert!(hospital["address"]
            .as_str()
            .unwrap()
            .contains("Springfield"));
    }

    app.shutdown.trigger();
}

#[tokio::test]
async fn omitted_location_uses_the_configured_default() {
    let geocoder = common::unreachable_geocoder().await;
    let mut config = config_with_geocoder(geocoder);
    config.geocoder.fallback_location = "Metropolis".to_string();
    let app = common::spawn_app(config).await;
    let client = common::client();

    let res = client
        .post(app.url("/chat_api"))
        .json(&serde_json::json!({ "message": "cough" }))
        .send()
        .await
        .unwrap();

    let body: serde_json::Value = res.json().await.unwrap();
    let hospitals = body["nearby_hospitals"].as_array().unwrap();
    assert_eq!(hospitals.len(), 2);
    assert!(hospitals[0]["address"]
        .as_str()
        .unwrap()
        .contains("Metropolis"));

    app.shutdown.trigger();
}

#[tokio::test]
async fn register_login_and_chat_flow() {
    let geocoder = common::start_mock_geocoder("[]").await;
    let app = common::spawn_app(config_with_geocoder(geocoder)).await;
    let client = common::client();

    let res = client
        .post(app.url("/register"))
        .form(&[("username", "alice"), ("password", "correct")])
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 201);

    let res = client
        .post(app.url("/login"))
        .form(&[("username", "alice"), ("password", "correct")])
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    let body: serde_json::Value = res.json().await.unwrap();
    let token = body["token"].as_str().unwrap().to_string();

    let res = client
        .get(app.url("/chat"))
        .header("Authorization", format!("Bearer {token}"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["user"], "alice");

    let res = client.get(app.url("/chat")).send().await.unwrap();
    assert_eq!(res.status(), 401);

    app.shutdown.trigger();
}

#[tokio::test]
async fn login_failures_are_indistinguishable() {
    let geocoder = common::start_mock_geocoder("[]").await;
    let app = common::spawn_app(config_with_geocoder(geocoder)).await;
    let client = common::client();

    client
        .post(app.url("/register"))
        .form(&[("username", "alice"), ("password", "correct")])
        .send()
        .await
        .unwrap();

    let wrong_password = client
        .post(app.url("/login"))
        .form(&[("username", "alice"), ("password", "wrong")])
        .send()
        .await
        .unwrap();
    let unknown_user = client
        .post(app.url("/login"))
        .form(&[("username", "nouser"), ("password", "x")])
        .send()
        .await
        .unwrap();

    assert_eq!(wrong_password.status(), 401);
    assert_eq!(unknown_user.status(), 401);
    assert_eq!(
        wrong_password.text().await.unwrap(),
        unknown_user.text().await.unwrap()
    );

    app.shutdown.trigger();
}

#[tokio::test]
async fn sixth_diagnosis_request_in_a_window_is_rejected() {
    let geocoder = common::unreachable_geocoder().await;
    let app = common::spawn_app(config_with_geocoder(geocoder)).await;
    let client = common::client();

    for _ in 0..5 {
        let res = client
            .post(app.url("/chat_api"))
            .json(&serde_json::json!({ "message": "fever" }))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), 200);
    }

    let res = client
        .post(app.url("/chat_api"))
        .json(&serde_json::json!({ "message": "fever" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 429);

    // The service-wide scope still has headroom; other routes are admitted.
    let res = client.get(app.url("/status")).send().await.unwrap();
    assert_eq!(res.status(), 200);

    app.shutdown.trigger();
}

#[tokio::test]
async fn admission_resumes_after_the_window_elapses() {
    let geocoder = common::unreachable_geocoder().await;
    let mut config = config_with_geocoder(geocoder);
    config.rate_limit.window_secs = 1;
    config.rate_limit.chat_per_window = 1;
    let app = common::spawn_app(config).await;
    let client = common::client();

    let first = client
        .post(app.url("/chat_api"))
        .json(&serde_json::json!({ "message": "fever" }))
        .send()
        .await
        .unwrap();
    assert_eq!(first.status(), 200);

    let second = client
        .post(app.url("/chat_api"))
        .json(&serde_json::json!({ "message": "fever" }))
        .send()
        .await
        .unwrap();
    assert_eq!(second.status(), 429);

    tokio::time::sleep(Duration::from_millis(1100)).await;

    let third = client
        .post(app.url("/chat_api"))
        .json(&serde_json::json!({ "message": "fever" }))
        .send()
        .await
        .unwrap();
    assert_eq!(third.status(), 200);

    app.shutdown.trigger();
}
