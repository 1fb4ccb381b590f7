//! In-process fake of the ARM and token endpoints for integration tests.
//!
//! PUT stores the resource (with `id`/`name` filled in like ARM does) and
//! answers with the status ARM uses for that resource type. GET returns a
//! stored resource or a `{ "value": [...] }` list, DELETE answers 202.

#![allow(dead_code)]

use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

pub const TEST_TOKEN: &str = "test-token";

#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub query: String,
    pub authorization: Option<String>,
    pub body: Value,
}

#[derive(Default)]
struct FakeState {
    calls: Vec<Recorded>,
    resources: BTreeMap<String, Value>,
}

/// Behaviour switches and recorded traffic.
#[derive(Clone, Default)]
pub struct FakeArm {
    state: Arc<Mutex<FakeState>>,
    /// Answer 409 to any request whose path contains this (case-insensitive).
    pub fail_on: Option<String>,
    /// Return a different `name` for created autoscale settings.
    pub rename_settings: bool,
    /// Leave this child collection (e.g. `"subnets"`) out of PUT responses.
    pub omit_child: Option<&'static str>,
}

impl FakeArm {
    pub fn failing_on(fragment: &str) -> FakeArm {
        FakeArm {
            fail_on: Some(fragment.to_ascii_lowercase()),
            ..Default::default()
        }
    }

    pub fn renaming_settings() -> FakeArm {
        FakeArm {
            rename_settings: true,
            ..Default::default()
        }
    }

    pub fn omitting_child(child: &'static str) -> FakeArm {
        FakeArm {
            omit_child: Some(child),
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<Recorded> {
        self.state.lock().unwrap().calls.clone()
    }

    /// `"METHOD /path"` per call, with the subscription prefix kept.
    pub fn call_lines(&self) -> Vec<String> {
        self.calls()
            .iter()
            .map(|c| format!("{} {}", c.method, c.path))
            .collect()
    }

    /// Start serving on a random local port and return the base url.
    pub async fn start(&self) -> String {
        let app = Router::new().fallback(handle).with_state(self.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind to random port");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("fake arm server");
        });
        format!("http://{addr}")
    }
}

async fn handle(
    State(fake): State<FakeArm>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> Response {
    let path = uri.path().to_string();
    let lower = path.to_ascii_lowercase();
    let body_json: Value = serde_json::from_str(&body).unwrap_or(Value::Null);

    let mut state = fake.state.lock().unwrap();
    state.calls.push(Recorded {
        method: method.to_string(),
        path: path.clone(),
        query: uri.query().unwrap_or_default().to_string(),
        authorization: headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body: body_json.clone(),
    });

    if let Some(fragment) = &fake.fail_on {
        if lower.contains(fragment.as_str()) {
            return (
                StatusCode::CONFLICT,
                Json(json!({ "error": { "code": "Conflict", "message": "injected" } })),
            )
                .into_response();
        }
    }

    if lower.ends_with("/oauth2/token") {
        return Json(json!({
            "token_type": "Bearer",
            "expires_in": "3599",
            "access_token": TEST_TOKEN
        }))
        .into_response();
    }

    match method {
        Method::PUT => {
            let resource = arm_resource(&path, body_json, &fake);
            state.resources.insert(lower.clone(), resource.clone());
            if lower.contains("/microsoft.storage/storageaccounts/") {
                StatusCode::ACCEPTED.into_response()
            } else {
                (StatusCode::CREATED, Json(resource)).into_response()
            }
        }
        Method::PATCH => match state.resources.get_mut(&lower) {
            Some(existing) => {
                if let (Some(target), Some(patch)) = (existing.as_object_mut(), body_json.as_object())
                {
                    for (k, v) in patch {
                        target.insert(k.clone(), v.clone());
                    }
                }
                (StatusCode::OK, Json(existing.clone())).into_response()
            }
            None => StatusCode::NOT_FOUND.into_response(),
        },
        Method::GET => {
            if let Some(found) = state.resources.get(&lower) {
                return (StatusCode::OK, Json(found.clone())).into_response();
            }
            let value: Vec<Value> = state
                .resources
                .iter()
                .filter(|(k, _)| in_collection(k, &lower))
                .map(|(_, v)| v.clone())
                .collect();
            (StatusCode::OK, Json(json!({ "value": value }))).into_response()
        }
        Method::DELETE => {
            let prefix = format!("{lower}/");
            state
                .resources
                .retain(|k, _| k != &lower && !k.starts_with(&prefix));
            StatusCode::ACCEPTED.into_response()
        }
        _ => StatusCode::METHOD_NOT_ALLOWED.into_response(),
    }
}

/// Whether stored `key` is listed by a GET on `collection`.
///
/// Direct children always are; a subscription-wide provider collection
/// (`/subscriptions/{s}/providers/{ns}/{type}`) also lists resources of that
/// type in every resource group of the subscription.
fn in_collection(key: &str, collection: &str) -> bool {
    let Some((parent, _)) = key.rsplit_once('/') else {
        return false;
    };
    if parent == collection {
        return true;
    }
    let parts: Vec<&str> = collection.split('/').collect();
    if let ["", "subscriptions", sub, "providers", ns, kind] = parts.as_slice() {
        return parent.starts_with(&format!("/subscriptions/{sub}/resourcegroups/"))
            && parent.ends_with(&format!("/providers/{ns}/{kind}"));
    }
    false
}

/// The request body with `id`/`name` set, child resources given ids.
fn arm_resource(path: &str, body: Value, fake: &FakeArm) -> Value {
    let lower = path.to_ascii_lowercase();
    let name = path.rsplit('/').next().unwrap_or_default().to_string();
    let mut resource = if body.is_object() { body } else { json!({}) };
    resource["id"] = json!(path);
    resource["name"] = if fake.rename_settings && lower.contains("/autoscalesettings/") {
        json!(format!("{name}-renamed"))
    } else {
        json!(name)
    };

    for child in [
        "subnets",
        "frontendIPConfigurations",
        "backendAddressPools",
        "inboundNatPools",
    ] {
        if let Some(items) = resource
            .pointer_mut(&format!("/properties/{child}"))
            .and_then(Value::as_array_mut)
        {
            for item in items.iter_mut() {
                let child_name = item["name"].as_str().unwrap_or_default().to_string();
                item["id"] = json!(format!("{path}/{child}/{child_name}"));
            }
        }
    }
    if let (Some(child), Some(properties)) = (
        fake.omit_child,
        resource.get_mut("properties").and_then(Value::as_object_mut),
    ) {
        properties.remove(child);
    }
    resource
}
