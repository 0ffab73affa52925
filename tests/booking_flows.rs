//! End-to-end flows against a real Postgres. Every test skips cleanly when
//! DATABASE_URL is unset so the suite still passes on machines without a
//! database; with one, migrations are applied on first use.
//!
//! Tests share the database but never share rooms or accounts: each creates
//! its own with unique names, so they are safe to run concurrently and
//! repeatedly.

mod common;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use serde_json::json;
use tower::ServiceExt;
use uuid::Uuid;

use azure_horizon::database::Database;
use common::{body_json, get_auth, send_json, send_json_auth};

// ── Test infrastructure ──────────────────────────────────────

macro_rules! require_db {
    () => {
        match common::db_app().await {
            Some(pair) => pair,
            None => {
                eprintln!("DATABASE_URL not set; skipping");
                return;
            }
        }
    };
}

fn unique_email(tag: &str) -> String {
    format!("{tag}-{}@flows.example", Uuid::new_v4().simple())
}

fn future(days: u64) -> String {
    (chrono::Utc::now().date_naive() + chrono::Days::new(days))
        .format("%Y-%m-%d")
        .to_string()
}

fn booking_payload(room_id: Uuid, check_in: &str, check_out: &str, email: &str) -> serde_json::Value {
    json!({
        "roomId": room_id,
        "checkInDate": check_in,
        "checkOutDate": check_out,
        "guestName": "Flow Tester",
        "guestEmail": email,
    })
}

async fn insert_room(db: &Database) -> (Uuid, String) {
    let name = format!("Test Room {}", Uuid::new_v4().simple());
    let id = sqlx::query_scalar::<_, Uuid>(
        r#"
        INSERT INTO rooms (name, description, image, features, price)
        VALUES ($1, 'A room used by the flow tests', '/test-room.jpg', ARRAY['Wi-Fi', 'Desk'], 199.0)
        RETURNING id
        "#,
    )
    .bind(&name)
    .fetch_one(&db.pool)
    .await
    .unwrap();
    (id, name)
}

/// Register a fresh account; returns (token, account id).
async fn register(app: &axum::Router, email: &str) -> (String, Uuid) {
    let response = send_json(
        app,
        "POST",
        "/api/users/register",
        json!({ "name": "Flow Tester", "email": email, "password": "test-password-1" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(body["message"], "User registered successfully");
    let token = body["token"].as_str().unwrap().to_string();
    let id = body["user"]["id"].as_str().unwrap().parse().unwrap();
    (token, id)
}

async fn promote_to_admin(email: &str, db: &Database) {
    sqlx::query("UPDATE users SET role = 'admin' WHERE email = $1")
        .bind(email)
        .execute(&db.pool)
        .await
        .unwrap();
}

// ── Rooms and availability ───────────────────────────────────

#[tokio::test]
async fn room_catalog_is_public_and_camel_cased() {
    let (app, db) = require_db!();
    let (room_id, name) = insert_room(&db).await;

    let response = common::get(&app, "/api/rooms").await;
    assert_eq!(response.status(), StatusCode::OK);
    let rooms = body_json(response).await;
    let entry = rooms
        .as_array()
        .unwrap()
        .iter()
        .find(|r| r["id"] == room_id.to_string())
        .expect("inserted room should be listed");
    assert_eq!(entry["name"], name.as_str());
    assert!(entry["features"].is_array());
    assert!(entry["price"].is_number());
    assert!(entry["createdAt"].is_string());

    let response = common::get(&app, &format!("/api/rooms/{room_id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["name"], name.as_str());
}

#[tokio::test]
async fn unknown_room_is_404() {
    let (app, _db) = require_db!();

    let response = common::get(&app, &format!("/api/rooms/{}", Uuid::new_v4())).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["message"], "Room not found");
}

#[tokio::test]
async fn availability_reflects_existing_bookings() {
    let (app, db) = require_db!();
    let (room_id, name) = insert_room(&db).await;
    let email = unique_email("avail");

    // Fresh room: available, friendly message with the dates spelled out.
    let check_in = future(30);
    let check_out = future(33);
    let response = send_json(
        &app,
        "POST",
        "/api/rooms/check-availability",
        json!({ "roomId": room_id, "checkInDate": check_in, "checkOutDate": check_out }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["available"], true);
    let message = body["message"].as_str().unwrap();
    assert!(message.starts_with("Great news!"), "got: {message}");
    assert!(message.contains(&name) && message.contains(&check_in) && message.contains(&check_out));

    // Book it, then the same window reads unavailable.
    let response = send_json(
        &app,
        "POST",
        "/api/bookings",
        booking_payload(room_id, &check_in, &check_out, &email),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = send_json(
        &app,
        "POST",
        "/api/rooms/check-availability",
        json!({ "roomId": room_id, "checkInDate": future(31), "checkOutDate": future(32) }),
    )
    .await;
    let body = body_json(response).await;
    assert_eq!(body["available"], false);
    assert!(body["message"]
        .as_str()
        .unwrap()
        .starts_with("Unfortunately,"));

    // The checkout day itself is free for the next guest.
    let response = send_json(
        &app,
        "POST",
        "/api/rooms/check-availability",
        json!({ "roomId": room_id, "checkInDate": check_out, "checkOutDate": future(35) }),
    )
    .await;
    assert_eq!(body_json(response).await["available"], true);
}

// ── Booking conflicts ────────────────────────────────────────

#[tokio::test]
async fn overlapping_bookings_conflict_but_back_to_back_do_not() {
    let (app, db) = require_db!();
    let (room_id, _) = insert_room(&db).await;
    let email = unique_email("overlap");

    let response = send_json(
        &app,
        "POST",
        "/api/bookings",
        booking_payload(room_id, &future(40), &future(44), &email),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Booking created successfully");
    assert_eq!(body["booking"]["status"], "confirmed");
    assert_eq!(body["booking"]["roomId"], room_id.to_string());
    assert_eq!(body["booking"]["checkInDate"], future(40));

    // Any overlap with the occupied interval conflicts.
    let response = send_json(
        &app,
        "POST",
        "/api/bookings",
        booking_payload(room_id, &future(42), &future(46), &email),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["message"],
        "Room is not available for the selected dates"
    );

    // Check-in on the previous checkout day is not an overlap.
    let response = send_json(
        &app,
        "POST",
        "/api/bookings",
        booking_payload(room_id, &future(44), &future(46), &email),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn unknown_room_cannot_be_booked() {
    let (app, _db) = require_db!();

    let response = send_json(
        &app,
        "POST",
        "/api/bookings",
        booking_payload(Uuid::new_v4(), &future(50), &future(52), "ghost@flows.example"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["message"], "Room not found");
}

#[tokio::test]
async fn cancelled_bookings_free_the_interval() {
    let (app, db) = require_db!();
    let (room_id, _) = insert_room(&db).await;
    let email = unique_email("cancel");

    let response = send_json(
        &app,
        "POST",
        "/api/bookings",
        booking_payload(room_id, &future(60), &future(63), &email),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let booking_id: Uuid = body_json(response).await["booking"]["id"]
        .as_str()
        .unwrap()
        .parse()
        .unwrap();

    // Staff cancel out-of-band; the interval opens up again.
    sqlx::query("UPDATE bookings SET status = 'cancelled' WHERE id = $1")
        .bind(booking_id)
        .execute(&db.pool)
        .await
        .unwrap();

    let response = send_json(
        &app,
        "POST",
        "/api/bookings",
        booking_payload(room_id, &future(60), &future(63), &email),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn concurrent_requests_cannot_double_book() {
    let (app, db) = require_db!();
    let (room_id, _) = insert_room(&db).await;

    async fn attempt(app: axum::Router, payload: serde_json::Value) -> StatusCode {
        let request = Request::builder()
            .method("POST")
            .uri("/api/bookings")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(payload.to_string()))
            .unwrap();
        app.oneshot(request).await.unwrap().status()
    }

    let payload = booking_payload(room_id, &future(70), &future(73), &unique_email("race"));
    let (a, b) = tokio::join!(
        tokio::spawn(attempt(app.clone(), payload.clone())),
        tokio::spawn(attempt(app.clone(), payload.clone())),
    );
    let statuses = [a.unwrap(), b.unwrap()];

    let created = statuses.iter().filter(|s| **s == StatusCode::CREATED).count();
    let rejected = statuses
        .iter()
        .filter(|s| **s == StatusCode::BAD_REQUEST)
        .count();
    assert_eq!(created, 1, "exactly one of the racing requests may land: {statuses:?}");
    assert_eq!(rejected, 1, "the loser answers as a conflict: {statuses:?}");

    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM bookings WHERE room_id = $1 AND status <> 'cancelled'",
    )
    .bind(room_id)
    .fetch_one(&db.pool)
    .await
    .unwrap();
    assert_eq!(count, 1, "only one row may exist for the interval");
}

// ── Booking visibility ───────────────────────────────────────

#[tokio::test]
async fn guests_see_their_own_bookings_admins_see_all() {
    let (app, db) = require_db!();
    let (room_a, _) = insert_room(&db).await;
    let (room_b, _) = insert_room(&db).await;

    let email_one = unique_email("guest-one");
    let email_two = unique_email("guest-two");
    let (token_one, _) = register(&app, &email_one).await;
    let (token_two, _) = register(&app, &email_two).await;

    let admin_email = unique_email("admin");
    let (admin_token, _) = register(&app, &admin_email).await;
    promote_to_admin(&admin_email, &db).await;

    let response = send_json(
        &app,
        "POST",
        "/api/bookings",
        booking_payload(room_a, &future(80), &future(82), &email_one),
    )
    .await;
    let booking_one: String = body_json(response).await["booking"]["id"]
        .as_str()
        .unwrap()
        .to_string();

    let response = send_json(
        &app,
        "POST",
        "/api/bookings",
        booking_payload(room_b, &future(80), &future(82), &email_two),
    )
    .await;
    let booking_two: String = body_json(response).await["booking"]["id"]
        .as_str()
        .unwrap()
        .to_string();

    // Guest one sees exactly their own booking, with the room joined in.
    let response = get_auth(&app, "/api/bookings", &token_one).await;
    assert_eq!(response.status(), StatusCode::OK);
    let list = body_json(response).await;
    let list = list.as_array().unwrap();
    assert!(list.iter().all(|b| b["guestEmail"] == email_one.as_str()));
    assert!(list.iter().any(|b| b["id"] == booking_one.as_str()));
    assert!(list.iter().all(|b| b["id"] != booking_two.as_str()));
    assert!(list[0]["room"]["name"].is_string());

    // The admin list carries both.
    let response = get_auth(&app, "/api/bookings", &admin_token).await;
    let list = body_json(response).await;
    let list = list.as_array().unwrap();
    assert!(list.iter().any(|b| b["id"] == booking_one.as_str()));
    assert!(list.iter().any(|b| b["id"] == booking_two.as_str()));

    // Detail route: own booking opens, someone else's is denied.
    let response = get_auth(&app, &format!("/api/bookings/{booking_one}"), &token_one).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get_auth(&app, &format!("/api/bookings/{booking_two}"), &token_one).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(response).await["message"], "Access denied");

    let response = get_auth(&app, &format!("/api/bookings/{booking_two}"), &admin_token).await;
    assert_eq!(response.status(), StatusCode::OK);
}

// ── Accounts ─────────────────────────────────────────────────

#[tokio::test]
async fn registration_normalizes_emails_and_rejects_duplicates() {
    let (app, _db) = require_db!();
    let email = unique_email("signup");

    let (_, _) = register(&app, &email).await;

    // Same address, different case: still a duplicate.
    let response = send_json(
        &app,
        "POST",
        "/api/users/register",
        json!({ "name": "Other", "email": email.to_uppercase(), "password": "test-password-1" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["message"], "User already exists");

    // Login works regardless of the case the client types.
    let response = send_json(
        &app,
        "POST",
        "/api/users/login",
        json!({ "email": email.to_uppercase(), "password": "test-password-1" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Login successful");
    assert_eq!(body["user"]["email"], email.as_str());
    assert_eq!(body["user"]["role"], "user");
    assert!(body["token"].is_string());
}

#[tokio::test]
async fn login_rejects_wrong_passwords_without_detail() {
    let (app, _db) = require_db!();
    let email = unique_email("badpw");
    register(&app, &email).await;

    let response = send_json(
        &app,
        "POST",
        "/api/users/login",
        json!({ "email": email, "password": "wrong-password" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["message"], "Invalid credentials");

    // Unknown address answers identically.
    let response = send_json(
        &app,
        "POST",
        "/api/users/login",
        json!({ "email": unique_email("nobody"), "password": "wrong-password" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["message"], "Invalid credentials");
}

#[tokio::test]
async fn profile_shows_login_history_and_hides_the_hash() {
    let (app, _db) = require_db!();
    let email = unique_email("profile");
    let (token, _) = register(&app, &email).await;

    // Registered but never logged in.
    let response = get_auth(&app, "/api/users/me", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["email"], email.as_str());
    assert_eq!(body["isActive"], true);
    assert!(body["lastLogin"].is_null());
    assert!(body.get("password").is_none() && body.get("passwordHash").is_none());

    send_json(
        &app,
        "POST",
        "/api/users/login",
        json!({ "email": email, "password": "test-password-1" }),
    )
    .await;

    let response = get_auth(&app, "/api/users/me", &token).await;
    assert!(body_json(response).await["lastLogin"].is_string());
}

#[tokio::test]
async fn profile_and_password_updates() {
    let (app, _db) = require_db!();
    let email = unique_email("update");
    let (token, _) = register(&app, &email).await;

    let response = send_json_auth(
        &app,
        "PUT",
        "/api/users/me",
        &token,
        json!({ "name": "Renamed Tester", "phone": "+1 555 0101" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Profile updated successfully");
    assert_eq!(body["user"]["name"], "Renamed Tester");
    assert_eq!(body["user"]["phone"], "+1 555 0101");

    // Password change requires the current password.
    let response = send_json_auth(
        &app,
        "PUT",
        "/api/users/me/password",
        &token,
        json!({ "currentPassword": "not-the-password", "newPassword": "next-password-1" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        body_json(response).await["message"],
        "Current password is incorrect"
    );

    let response = send_json_auth(
        &app,
        "PUT",
        "/api/users/me/password",
        &token,
        json!({ "currentPassword": "test-password-1", "newPassword": "next-password-1" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await["message"],
        "Password changed successfully"
    );

    // Old password is gone, the new one works.
    let response = send_json(
        &app,
        "POST",
        "/api/users/login",
        json!({ "email": email, "password": "test-password-1" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = send_json(
        &app,
        "POST",
        "/api/users/login",
        json!({ "email": email, "password": "next-password-1" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn taken_emails_cannot_be_claimed_via_profile_update() {
    let (app, _db) = require_db!();
    let email_one = unique_email("claim-one");
    let email_two = unique_email("claim-two");
    let (token, _) = register(&app, &email_one).await;
    register(&app, &email_two).await;

    let response = send_json_auth(
        &app,
        "PUT",
        "/api/users/me",
        &token,
        json!({ "email": email_two }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["message"], "Email already in use");
}

// ── Administration ───────────────────────────────────────────

#[tokio::test]
async fn admin_surface_is_gated_by_role() {
    let (app, db) = require_db!();
    let email = unique_email("plain");
    let (token, user_id) = register(&app, &email).await;

    for uri in ["/api/users", "/api/inquiries"] {
        let response = get_auth(&app, uri, &token).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN, "{uri}");
        assert_eq!(
            body_json(response).await["message"],
            "Access denied. Admin privileges required."
        );
    }

    // A regular account can read itself but not a stranger.
    let response = get_auth(&app, &format!("/api/users/{user_id}"), &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get_auth(&app, &format!("/api/users/{}", Uuid::new_v4()), &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(
        body_json(response).await["message"],
        "Access denied. Insufficient privileges."
    );

    // Promotion takes effect on the next request; no new token needed.
    promote_to_admin(&email, &db).await;
    let response = get_auth(&app, "/api/users?limit=5", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(body["users"].is_array());
    assert!(body["pagination"]["total"].is_number());
    assert!(body["pagination"]["pages"].is_number());
}

#[tokio::test]
async fn admins_manage_accounts_but_not_their_own() {
    let (app, db) = require_db!();
    let admin_email = unique_email("boss");
    let (admin_token, admin_id) = register(&app, &admin_email).await;
    promote_to_admin(&admin_email, &db).await;

    let target_email = unique_email("target");
    let (target_token, target_id) = register(&app, &target_email).await;

    // Role change through the admin update route.
    let response = send_json_auth(
        &app,
        "PUT",
        &format!("/api/users/{target_id}"),
        &admin_token,
        json!({ "role": "owner" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["message"], "Invalid role");

    let response = send_json_auth(
        &app,
        "PUT",
        &format!("/api/users/{target_id}"),
        &admin_token,
        json!({ "name": "Managed Account", "role": "user" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["message"], "User updated successfully");
    assert_eq!(body["user"]["name"], "Managed Account");

    // Deactivation locks the account out immediately.
    let response = send_json_auth(
        &app,
        "PUT",
        &format!("/api/users/{target_id}/status"),
        &admin_token,
        json!({ "isActive": false }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await["message"],
        "User deactivated successfully"
    );

    let response = get_auth(&app, "/api/users/me", &target_token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(
        body_json(response).await["message"],
        "Account is deactivated. Please contact administrator."
    );

    let response = send_json(
        &app,
        "POST",
        "/api/users/login",
        json!({ "email": target_email, "password": "test-password-1" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Self-targeting guards.
    let response = send_json_auth(
        &app,
        "PUT",
        &format!("/api/users/{admin_id}/status"),
        &admin_token,
        json!({ "isActive": false }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["message"],
        "Cannot deactivate your own account"
    );

    let request = Request::builder()
        .method("DELETE")
        .uri(format!("/api/users/{admin_id}"))
        .header(header::AUTHORIZATION, format!("Bearer {admin_token}"))
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["message"],
        "Cannot delete your own account"
    );

    // Deleting the target invalidates their token on the next request.
    let request = Request::builder()
        .method("DELETE")
        .uri(format!("/api/users/{target_id}"))
        .header(header::AUTHORIZATION, format!("Bearer {admin_token}"))
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["message"], "User deleted successfully");

    let response = get_auth(&app, "/api/users/me", &target_token).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        body_json(response).await["message"],
        "User not found. Access denied."
    );
}

#[tokio::test]
async fn user_search_finds_by_name_fragment() {
    let (app, db) = require_db!();
    let admin_email = unique_email("searcher");
    let (admin_token, _) = register(&app, &admin_email).await;
    promote_to_admin(&admin_email, &db).await;

    // The unique half of the email doubles as a search needle.
    let needle = admin_email.split('@').next().unwrap().to_string();
    let response = get_auth(&app, &format!("/api/users?search={needle}"), &admin_token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let users = body["users"].as_array().unwrap();
    assert!(users.iter().any(|u| u["email"] == admin_email.as_str()));
    assert!(users.iter().all(|u| u.get("passwordHash").is_none()));
}

#[tokio::test]
async fn oversized_page_numbers_answer_empty_lists() {
    let (app, db) = require_db!();
    let admin_email = unique_email("pager");
    let (admin_token, _) = register(&app, &admin_email).await;
    promote_to_admin(&admin_email, &db).await;

    // Far past the data: a valid, empty page rather than an error.
    let response = get_auth(&app, "/api/users?page=1073741828&limit=100", &admin_token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["users"].as_array().unwrap().len(), 0);
    assert_eq!(body["pagination"]["page"], 1_073_741_828u64);

    let response = get_auth(&app, "/api/inquiries?page=4294967295&limit=100", &admin_token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["inquiries"].as_array().unwrap().len(), 0);
}

// ── Inquiries ────────────────────────────────────────────────

#[tokio::test]
async fn inquiry_lifecycle_from_submission_to_status_change() {
    let (app, db) = require_db!();
    let admin_email = unique_email("concierge");
    let (admin_token, _) = register(&app, &admin_email).await;
    promote_to_admin(&admin_email, &db).await;

    // Guests default to 2 when the field is left out.
    let response = send_json(
        &app,
        "POST",
        "/api/inquiries",
        json!({
            "name": "Walk-in Guest",
            "email": unique_email("walkin"),
            "checkInDate": future(90),
            "checkOutDate": future(93),
            "message": "Do you have late checkout?",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(
        body["message"],
        "Reservation inquiry submitted successfully. Our team will contact you within 24 hours."
    );
    assert_eq!(body["inquiry"]["status"], "pending");
    assert_eq!(body["inquiry"]["guests"], "2");
    let inquiry_id = body["inquiry"]["id"].as_str().unwrap().to_string();

    // Listed for staff, filterable by status.
    let response = get_auth(&app, "/api/inquiries?status=pending&limit=100", &admin_token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(body["inquiries"]
        .as_array()
        .unwrap()
        .iter()
        .all(|i| i["status"] == "pending"));

    let response = get_auth(&app, "/api/inquiries?status=lost", &admin_token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["message"], "Invalid status");

    // Status workflow.
    let response = send_json_auth(
        &app,
        "PUT",
        &format!("/api/inquiries/{inquiry_id}/status"),
        &admin_token,
        json!({ "status": "contacted" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Inquiry status updated successfully");
    assert_eq!(body["inquiry"]["status"], "contacted");

    let response = send_json_auth(
        &app,
        "PUT",
        &format!("/api/inquiries/{inquiry_id}/status"),
        &admin_token,
        json!({ "status": "archived" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["message"], "Invalid status");

    let response = get_auth(&app, &format!("/api/inquiries/{inquiry_id}"), &admin_token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "contacted");

    let response = send_json_auth(
        &app,
        "PUT",
        &format!("/api/inquiries/{}/status", Uuid::new_v4()),
        &admin_token,
        json!({ "status": "booked" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["message"], "Inquiry not found");
}
