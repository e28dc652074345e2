use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header::CONTENT_TYPE},
    response::Response,
};
use cityscout::config::{Config, UpstreamConfig};
use cityscout::error::INTERNAL_ERROR_BODY;
use cityscout::providers::Providers;
use cityscout::resolver::Resolver;
use cityscout::server::router::{ScoutState, scout_router};
use serde_json::{Value, json};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tower::ServiceExt;
use url::Url;
use wiremock::matchers::{method, path, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn app_for(server: &MockServer, tag: &str) -> Router {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time before UNIX_EPOCH")
        .as_nanos();

    let mut temp_path = std::env::temp_dir();
    temp_path.push(format!(
        "cityscout-{tag}-{}-{}.sqlite",
        std::process::id(),
        nanos
    ));
    let database_url = format!("sqlite:{}", temp_path.display());

    let api_url = Url::parse(&server.uri()).expect("invalid mock server url");
    let mut cfg = Config::default();
    for (upstream, key) in [
        (&mut cfg.providers.geocode, "geo-key"),
        (&mut cfg.providers.weather, "wx-key"),
        (&mut cfg.providers.events, "ev-token"),
    ] {
        *upstream = UpstreamConfig {
            api_key: key.to_string(),
            api_url: Some(api_url.clone()),
            ..Default::default()
        };
    }

    let db = cityscout::db::spawn(&database_url)
        .await
        .expect("failed to spawn store");
    let providers = Providers::new(&cfg).expect("failed to build providers");
    let resolver = Resolver::new(db, providers, Duration::from_secs(3600));
    scout_router(ScoutState::new(resolver))
}

async fn get(app: &Router, uri: &str) -> Response {
    app.clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(uri)
                .body(Body::empty())
                .expect("failed to build request"),
        )
        .await
        .expect("request failed")
}

async fn body_text(resp: Response) -> String {
    let body = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    String::from_utf8(body.to_vec()).expect("response body was not utf-8")
}

async fn body_json(resp: Response) -> Value {
    serde_json::from_str(&body_text(resp).await).expect("response body was not json")
}

async fn mount_geocoder(server: &MockServer, expected_calls: u64) {
    Mock::given(method("GET"))
        .and(path("/maps/api/geocode/json"))
        .and(query_param("address", "Seattle"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "OK",
            "results": [{
                "formatted_address": "Seattle, WA, USA",
                "geometry": { "location": { "lat": 47.6062095, "lng": -122.3320708 } }
            }]
        })))
        .expect(expected_calls)
        .mount(server)
        .await;
}

#[tokio::test]
async fn location_route_fetches_once_and_replays_from_cache() {
    let server = MockServer::start().await;
    mount_geocoder(&server, 1).await;
    let app = app_for(&server, "route-location").await;

    // 1) miss -> provider call, 200 JSON
    let resp = get(&app, "/location?data=Seattle").await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().contains_key("x-request-id"));
    let first = body_json(resp).await;
    assert_eq!(first["search_query"], "Seattle");
    assert_eq!(first["formatted_query"], "Seattle, WA, USA");
    assert!(first["latitude"].is_f64());
    assert!(first["longitude"].is_f64());
    assert!(first["id"].is_i64());

    // 2) hit -> same payload, no second provider call (checked by `expect(1)`)
    let resp = get(&app, "/location?data=Seattle").await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await, first);
}

#[tokio::test]
async fn weather_and_events_accept_json_and_bracketed_data() {
    let server = MockServer::start().await;
    mount_geocoder(&server, 1).await;
    Mock::given(method("GET"))
        .and(path_regex(r"^/forecast/wx-key/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "daily": { "data": [ { "time": 1_551_686_400, "summary": "Rain." } ] }
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v3/events/search/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "events": [{
                "url": "https://www.eventbrite.com/e/1",
                "name": { "text": "Jazz Night", "html": "Jazz Night" },
                "start": { "utc": "2019-03-10T03:00:00Z" },
                "summary": "A night out"
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;
    let app = app_for(&server, "route-children").await;

    let location = body_json(get(&app, "/location?data=Seattle").await).await;
    let id = location["id"].as_i64().expect("numeric id");

    // JSON object string, echoing the whole location back.
    let data = url::form_urlencoded::byte_serialize(location.to_string().as_bytes())
        .collect::<String>();
    let resp = get(&app, &format!("/weather?data={data}")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        body_json(resp).await,
        json!([{ "forecast": "Rain.", "time": "Mon Mar 04 2019", "location_id": id }])
    );

    // Bracketed form, served from cache this time.
    let bracketed = format!(
        "data%5Bid%5D={id}&data%5Bsearch_query%5D=Seattle\
         &data%5Blatitude%5D=47.6062095&data%5Blongitude%5D=-122.3320708"
    );
    let resp = get(&app, &format!("/weather?{bracketed}")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await.as_array().map(Vec::len), Some(1));

    let resp = get(&app, &format!("/events?{bracketed}")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        body_json(resp).await,
        json!([{
            "link": "https://www.eventbrite.com/e/1",
            "name": "Jazz Night",
            "event_date": "Sun Mar 10 2019",
            "summary": "A night out",
            "location_id": id
        }])
    );
}

#[tokio::test]
async fn bad_requests_and_unknown_routes_are_plain_text() {
    let server = MockServer::start().await;
    let app = app_for(&server, "route-errors").await;

    for uri in ["/location", "/weather", "/events?data=not-json"] {
        let resp = get(&app, uri).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{uri}");
        assert!(!body_text(resp).await.is_empty());
    }

    let resp = get(&app, "/nope").await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let content_type = resp
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("text/plain"), "{content_type}");
    assert_eq!(body_text(resp).await, "Not Found");
}

#[tokio::test]
async fn provider_failure_becomes_generic_500() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/maps/api/geocode/json"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(1)
        .mount(&server)
        .await;
    let app = app_for(&server, "route-500").await;

    let resp = get(&app, "/location?data=Seattle").await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_text(resp).await, INTERNAL_ERROR_BODY);
}

#[tokio::test]
async fn cors_allows_any_origin() {
    let server = MockServer::start().await;
    let app = app_for(&server, "route-cors").await;

    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/location")
                .header("origin", "http://localhost:8080")
                .body(Body::empty())
                .expect("failed to build request"),
        )
        .await
        .expect("request failed");
    assert_eq!(
        resp.headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
}
