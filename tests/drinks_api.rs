mod common;

use anyhow::Result;
use axum::http::{Method, StatusCode};
use serde_json::json;

#[tokio::test]
async fn root_describes_the_service() -> Result<()> {
    let app = common::test_app().await?;
    let (status, body) = common::request(app, Method::GET, "/", None, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["data"]["name"], json!("Drinks API"));
    Ok(())
}

#[tokio::test]
async fn health_reports_database_ok() -> Result<()> {
    let app = common::test_app().await?;
    let (status, body) = common::request(app, Method::GET, "/health", None, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["database"], json!("ok"));
    Ok(())
}

#[tokio::test]
async fn public_listing_is_empty_before_any_insert() -> Result<()> {
    let app = common::test_app().await?;
    let (status, body) = common::request(app, Method::GET, "/drinks", None, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["drinks"], json!([]));
    Ok(())
}

#[tokio::test]
async fn create_round_trips_through_the_detail_projection() -> Result<()> {
    let app = common::test_app().await?;

    let (status, body) = common::request(
        app.clone(),
        Method::POST,
        "/drinks",
        Some(&common::bearer(&["post:drinks"])),
        Some(json!({
            "title": "Water",
            "recipe": [{"name": "water", "color": "blue", "parts": 1}],
        })),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));

    let created = &body["drinks"][0];
    assert!(created["id"].as_i64().unwrap() > 0);
    assert_eq!(created["title"], json!("Water"));
    assert_eq!(
        created["recipe"],
        json!([{"name": "water", "color": "blue", "parts": 1}])
    );

    // The detail listing shows the same record
    let (status, body) = common::request(
        app,
        Method::GET,
        "/drinks-detail",
        Some(&common::bearer(&["get:drinks-detail"])),
        None,
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["drinks"][0]["title"], json!("Water"));
    assert_eq!(
        body["drinks"][0]["recipe"],
        json!([{"name": "water", "color": "blue", "parts": 1}])
    );
    Ok(())
}

#[tokio::test]
async fn public_listing_projects_summary_only() -> Result<()> {
    let app = common::test_app().await?;

    common::request(
        app.clone(),
        Method::POST,
        "/drinks",
        Some(&common::bearer(&["post:drinks"])),
        Some(json!({
            "title": "Matcha",
            "recipe": [{"name": "matcha", "color": "green", "parts": 2}],
        })),
    )
    .await?;

    let (status, body) = common::request(app, Method::GET, "/drinks", None, None).await?;
    assert_eq!(status, StatusCode::OK);

    let drink = &body["drinks"][0];
    assert_eq!(drink["title"], json!("Matcha"));
    assert!(drink.get("recipe").is_none(), "summary must not carry recipe");
    Ok(())
}

#[tokio::test]
async fn create_defaults_title_and_recipe_when_omitted() -> Result<()> {
    let app = common::test_app().await?;

    let (status, body) = common::request(
        app,
        Method::POST,
        "/drinks",
        Some(&common::bearer(&["post:drinks"])),
        Some(json!({})),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["drinks"][0]["title"], json!(""));
    assert_eq!(body["drinks"][0]["recipe"], json!([]));
    Ok(())
}

#[tokio::test]
async fn update_with_only_recipe_keeps_title() -> Result<()> {
    let app = common::test_app().await?;

    let (_, body) = common::request(
        app.clone(),
        Method::POST,
        "/drinks",
        Some(&common::bearer(&["post:drinks"])),
        Some(json!({"title": "A", "recipe": []})),
    )
    .await?;
    let id = body["drinks"][0]["id"].as_i64().unwrap();

    let (status, body) = common::request(
        app,
        Method::PATCH,
        &format!("/drinks/{}", id),
        Some(&common::bearer(&["patch:drinks"])),
        Some(json!({
            "recipe": [{"name": "espresso", "color": "brown", "parts": 1}],
        })),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["drinks"][0]["title"], json!("A"));
    assert_eq!(
        body["drinks"][0]["recipe"],
        json!([{"name": "espresso", "color": "brown", "parts": 1}])
    );
    Ok(())
}

#[tokio::test]
async fn update_missing_drink_is_not_found() -> Result<()> {
    let app = common::test_app().await?;
    let (status, body) = common::request(
        app,
        Method::PATCH,
        "/drinks/999",
        Some(&common::bearer(&["patch:drinks"])),
        Some(json!({"title": "ghost"})),
    )
    .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["error"], json!(404));
    Ok(())
}

#[tokio::test]
async fn delete_returns_the_id_and_repeats_are_not_found() -> Result<()> {
    let app = common::test_app().await?;

    let (_, body) = common::request(
        app.clone(),
        Method::POST,
        "/drinks",
        Some(&common::bearer(&["post:drinks"])),
        Some(json!({"title": "temp"})),
    )
    .await?;
    let id = body["drinks"][0]["id"].as_i64().unwrap();

    let auth = common::bearer(&["delete:drinks"]);
    let (status, body) = common::request(
        app.clone(),
        Method::DELETE,
        &format!("/drinks/{}", id),
        Some(&auth),
        None,
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["delete"], json!(id));

    // Repeating the delete reports NotFound each time, with no state change
    for _ in 0..2 {
        let (status, body) = common::request(
            app.clone(),
            Method::DELETE,
            &format!("/drinks/{}", id),
            Some(&auth),
            None,
        )
        .await?;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], json!(404));
    }
    Ok(())
}

#[tokio::test]
async fn malformed_json_body_is_unprocessable() -> Result<()> {
    let app = common::test_app().await?;
    let (status, body) = common::request_text(
        app,
        Method::POST,
        "/drinks",
        Some(&common::bearer(&["post:drinks"])),
        "{not json",
    )
    .await?;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["error"], json!(422));
    Ok(())
}

#[tokio::test]
async fn wrongly_typed_fields_are_unprocessable() -> Result<()> {
    let app = common::test_app().await?;
    let (status, body) = common::request(
        app,
        Method::POST,
        "/drinks",
        Some(&common::bearer(&["post:drinks"])),
        Some(json!({"title": 7, "recipe": "not a list"})),
    )
    .await?;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], json!(422));
    Ok(())
}

#[tokio::test]
async fn mutations_require_authorization_while_listing_does_not() -> Result<()> {
    let app = common::test_app().await?;

    let (status, _) = common::request(app.clone(), Method::GET, "/drinks", None, None).await?;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = common::request(
        app,
        Method::POST,
        "/drinks",
        None,
        Some(json!({"title": "sneaky"})),
    )
    .await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], json!(401));
    Ok(())
}
