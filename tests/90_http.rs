mod common;

use anyhow::Result;
use reqwest::{header::CONTENT_TYPE, StatusCode};
use serde_json::{json, Value};

#[tokio::test]
async fn protected_routes_require_a_bearer_token() -> Result<()> {
    let server = common::spawn_app(common::offline_state()?).await?;

    let res = server.client.get(server.url("/api/container")).send().await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: Value = res.json().await?;
    assert_eq!(body["code"], json!(-2));
    assert!(body["text"].is_string());

    let res = server
        .client
        .get(server.url("/api/location"))
        .bearer_auth("not-a-token")
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: Value = res.json().await?;
    assert_eq!(body["code"], json!(-2));
    Ok(())
}

#[tokio::test]
async fn malformed_requests_get_the_error_envelope() -> Result<()> {
    let state = common::offline_state()?;
    let token = common::token_for(&state, 1)?;
    let server = common::spawn_app(state).await?;
    let client = &server.client;

    let res = client.get(server.url("/api/container/abc")).bearer_auth(&token).send().await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await?;
    assert_eq!(body["code"], json!(-1));
    assert!(body["text"].is_string());

    let res = client
        .delete(server.url("/api/container/1/item/x"))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(res.json::<Value>().await?["code"], json!(-1));

    let res = client
        .post(server.url("/api/location"))
        .bearer_auth(&token)
        .json(&json!({ "address": "x" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await?;
    assert_eq!(body["code"], json!(-1));
    assert!(body["text"].as_str().unwrap_or_default().contains("name"));

    let res = client
        .post(server.url("/api/location"))
        .bearer_auth(&token)
        .header(CONTENT_TYPE, "application/json")
        .body("{not json")
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(res.json::<Value>().await?["code"], json!(-1));

    let res = client
        .post(server.url("/api/user/register"))
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body("email=a%40example.test&password=pw")
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await?;
    assert_eq!(body, json!({ "code": -1, "text": "Expected a JSON request body" }));
    Ok(())
}

#[tokio::test]
async fn root_banner_is_public() -> Result<()> {
    let server = common::spawn_app(common::offline_state()?).await?;

    let res = server.client.get(server.url("/")).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await?;
    assert_eq!(body["name"], json!("Boxmeup API"));
    Ok(())
}

#[tokio::test]
async fn health_reports_an_unreachable_database() -> Result<()> {
    let server = common::spawn_app(common::offline_state()?).await?;

    let res = server.client.get(server.url("/health")).send().await?;
    assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = res.json().await?;
    assert_eq!(body["status"], json!("degraded"));
    Ok(())
}

#[tokio::test]
async fn full_inventory_flow() -> Result<()> {
    let Some(state) = common::test_state().await? else { return Ok(()) };
    let server = common::spawn_app(state).await?;
    let client = &server.client;
    let credentials = json!({ "email": common::unique_email("http"), "password": "pw" });

    // Register and log in
    let res = client.post(server.url("/api/user/register")).json(&credentials).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    let user_id = res.json::<Value>().await?["id"].as_i64().unwrap();
    assert!(user_id > 0);

    let res = client.post(server.url("/api/user/register")).json(&credentials).send().await?;
    assert_eq!(res.status(), StatusCode::CONFLICT);
    assert_eq!(res.json::<Value>().await?["code"], json!(-5));

    let bad = json!({ "email": credentials["email"], "password": "nope" });
    let res = client.post(server.url("/api/user/login")).json(&bad).send().await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(res.json::<Value>().await?["text"], json!("Authentication failure."));

    let res = client.post(server.url("/api/user/login")).json(&credentials).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    let token = res.json::<Value>().await?["token"].as_str().unwrap().to_string();

    // A location with a container in it
    let res = client
        .post(server.url("/api/location"))
        .bearer_auth(&token)
        .json(&json!({ "name": "Garage", "address": "1 Main St" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let location_id = res.json::<Value>().await?["id"].as_i64().unwrap();

    let res = client
        .post(server.url("/api/container"))
        .bearer_auth(&token)
        .json(&json!({ "name": "Tools", "location_id": location_id }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let container_id = res.json::<Value>().await?["id"].as_i64().unwrap();

    // Items
    let res = client
        .post(server.url(&format!("/api/container/{container_id}/item")))
        .bearer_auth(&token)
        .json(&json!({ "body": "Hammer", "quantity": 2 }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let item_id = res.json::<Value>().await?["id"].as_i64().unwrap();

    let res = client
        .put(server.url(&format!("/api/container/{container_id}/item/{item_id}")))
        .bearer_auth(&token)
        .json(&json!({ "quantity": 3 }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.json::<Value>().await?, json!({ "id": item_id }));

    let res = client
        .get(server.url(&format!("/api/container/{container_id}/item")))
        .bearer_auth(&token)
        .send()
        .await?;
    let body: Value = res.json().await?;
    assert_eq!(body["items"][0]["body"], json!("Hammer"));
    assert_eq!(body["items"][0]["quantity"], json!(3));
    assert_eq!(body["meta"], json!({ "request_total": 1, "total": 1, "pages": 1 }));

    // Listings carry the envelope and the denormalized counts
    let res = client
        .get(server.url(&format!("/api/container?location_id={location_id}")))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await?;
    assert_eq!(body["containers"][0]["id"], json!(container_id));
    assert_eq!(body["containers"][0]["container_item_count"], json!(1));
    assert_eq!(body["containers"][0]["location"]["name"], json!("Garage"));
    assert_eq!(body["meta"]["total"], json!(1));

    // A page far past the end is empty, not an error
    let res = client
        .get(server.url(&format!("/api/container?page={}", i64::MAX)))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await?;
    assert_eq!(body["containers"], json!([]));
    assert_eq!(body["meta"]["request_total"], json!(0));

    let res = client
        .get(server.url("/api/location?is_attached_to_container=T"))
        .bearer_auth(&token)
        .send()
        .await?;
    let body: Value = res.json().await?;
    assert_eq!(body["locations"][0]["container_count"], json!(1));

    // Search
    let res = client
        .get(server.url("/api/item/search?term=hamm"))
        .bearer_auth(&token)
        .send()
        .await?;
    let body: Value = res.json().await?;
    assert_eq!(body["items"][0]["id"], json!(item_id));

    let res = client
        .get(server.url("/api/item/search?term="))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(res.json::<Value>().await?["code"], json!(-1));

    // Detach, then delete
    let res = client
        .put(server.url(&format!("/api/container/{container_id}")))
        .bearer_auth(&token)
        .json(&json!({ "name": "Tools" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let res = client
        .get(server.url(&format!("/api/location/{location_id}")))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.json::<Value>().await?["container_count"], json!(0));

    let res = client
        .delete(server.url(&format!("/api/container/{container_id}")))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let res = client
        .get(server.url(&format!("/api/container/{container_id}")))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(res.json::<Value>().await?["code"], json!(-4));
    Ok(())
}
