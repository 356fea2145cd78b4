use actix_web::cookie::Cookie;
use actix_web::http::{StatusCode, header};
use actix_web::{App, test, web};
use serde_json::{Value, json};
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

use super::{configure_api_routes, configure_frontend_routes};
use crate::cache::{ObjectCache, object_cache::MokaCacheWrapper};
use crate::middlewares::require_jwt::CSRF_HEADER;
use crate::models::users::entities::User;
use crate::storage::Storage;
use crate::storage::sea_orm_storage::{SeaOrmStorage, tests as fixtures};
use crate::utils::jwt::JwtUtils;
use crate::utils::{json_error_handler, query_error_handler};

// 限流计数是全局的，每个测试使用不同的来源地址
static NEXT_PEER: AtomicU8 = AtomicU8::new(1);

fn unique_peer() -> SocketAddr {
    let n = NEXT_PEER.fetch_add(1, Ordering::Relaxed);
    SocketAddr::from(([198, 51, 100, n], 40000))
}

macro_rules! test_app {
    ($storage:expr) => {
        test::init_service(
            App::new()
                .app_data(web::QueryConfig::default().error_handler(query_error_handler))
                .app_data(web::JsonConfig::default().error_handler(json_error_handler))
                .app_data(web::Data::new($storage))
                .app_data(web::Data::new(
                    Arc::new(MokaCacheWrapper::with_settings(1000, 300)) as Arc<dyn ObjectCache>
                ))
                .configure(configure_api_routes)
                .configure(configure_frontend_routes),
        )
        .await
    };
}

async fn setup() -> (SeaOrmStorage, Arc<dyn Storage>) {
    let storage = fixtures::memory_storage().await;
    let shared: Arc<dyn Storage> = Arc::new(storage.clone());
    (storage, shared)
}

fn bearer(user: &User) -> (header::HeaderName, String) {
    let session = JwtUtils::generate_session_token(
        user.id,
        &user.role.to_string(),
        user.token_version,
        chrono::Duration::minutes(10),
    )
    .unwrap();
    (header::AUTHORIZATION, format!("Bearer {}", session.token))
}

fn error_messages(body: &Value) -> Vec<String> {
    body["data"]["error_messages"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m.as_str().unwrap().to_string())
        .collect()
}

#[actix_web::test]
async fn test_register_login_and_userinfo_flow() {
    let (_, shared) = setup().await;
    let app = test_app!(shared);
    let peer = unique_peer();

    let req = test::TestRequest::get()
        .uri("/api/v1/register")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["roles"], json!(["teacher", "student"]));

    let register = json!({"username": "maija_opiskelija", "password": "salasana123", "role": "student"});
    let req = test::TestRequest::post()
        .uri("/api/v1/register")
        .peer_addr(peer)
        .set_json(&register)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let req = test::TestRequest::post()
        .uri("/api/v1/register")
        .peer_addr(peer)
        .set_json(&register)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Käyttäjätunnus on jo käytössä.");

    let req = test::TestRequest::post()
        .uri("/api/v1/login")
        .peer_addr(peer)
        .set_json(json!({"username": "maija_opiskelija", "password": "vaara-salasana"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Väärä käyttäjätunnus tai salasana.");

    let req = test::TestRequest::post()
        .uri("/api/v1/login")
        .peer_addr(peer)
        .set_json(json!({"username": "maija_opiskelija", "password": "salasana123"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().contains_key(header::SET_COOKIE));
    let body: Value = test::read_body_json(resp).await;
    let token = body["data"]["access_token"].as_str().unwrap().to_string();
    let csrf = body["data"]["csrf_token"].as_str().unwrap().to_string();
    assert_eq!(body["data"]["user"]["role"], "student");

    let req = test::TestRequest::get()
        .uri("/api/v1/login")
        .cookie(Cookie::new("session", token.clone()))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["logged_in"], true);

    let req = test::TestRequest::get()
        .uri("/api/v1/userinfo")
        .cookie(Cookie::new("session", token.clone()))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["has_userinfo"], false);

    let userinfo = json!({"first_name": "Maija", "last_name": "Meikäläinen", "student_number": "0123456"});

    // Cookie 会话的写操作必须带 CSRF 头
    let req = test::TestRequest::post()
        .uri("/api/v1/userinfo")
        .cookie(Cookie::new("session", token.clone()))
        .set_json(&userinfo)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::post()
        .uri("/api/v1/userinfo")
        .cookie(Cookie::new("session", token.clone()))
        .insert_header((CSRF_HEADER, csrf.clone()))
        .set_json(json!({"first_name": "", "last_name": "Meikäläinen", "student_number": "12ab"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        error_messages(&body),
        vec![
            "Etunimen on oltava 1-50 merkkiä.",
            "Opiskelijanumeron on oltava 1-20 numeroa."
        ]
    );

    let req = test::TestRequest::post()
        .uri("/api/v1/userinfo")
        .cookie(Cookie::new("session", token.clone()))
        .insert_header((CSRF_HEADER, csrf))
        .set_json(&userinfo)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri("/api/v1/userinfo")
        .insert_header((header::AUTHORIZATION, format!("Bearer {token}")))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["has_userinfo"], true);
    assert_eq!(body["data"]["student_number"], "0123456");
}

#[actix_web::test]
async fn test_course_lifecycle() {
    let (storage, shared) = setup().await;
    let teacher = fixtures::teacher(&storage, "opettaja").await;
    let teacher = fixtures::with_userinfo(&storage, &teacher).await;
    let student = fixtures::student(&storage, "opiskelija").await;
    let student = fixtures::with_userinfo(&storage, &student).await;
    let app = test_app!(shared);

    let req = test::TestRequest::post()
        .uri("/api/v1/add_course")
        .insert_header(bearer(&student))
        .set_json(json!({"course_name": "Ohjelmointi", "description": "Perusteet"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Vain opettajat voivat lisätä kursseja!");

    let req = test::TestRequest::post()
        .uri("/api/v1/add_course")
        .insert_header(bearer(&teacher))
        .set_json(json!({"course_name": "Oh", "description": ""}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        error_messages(&body),
        vec![
            "Kurssin nimen on oltava 3-100 merkkiä.",
            "Kurssikuvauksen on oltava 1-2000 merkkiä."
        ]
    );

    let req = test::TestRequest::post()
        .uri("/api/v1/add_course")
        .insert_header(bearer(&teacher))
        .set_json(json!({"course_name": "Ohjelmointi", "description": "Perusteet"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    let course_id = body["data"]["id"].as_i64().unwrap();

    let req = test::TestRequest::get().uri("/api/v1/").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["pagination"]["total"], 1);
    assert_eq!(body["data"]["items"][0]["name"], "Ohjelmointi");

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/enroll/{course_id}"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["course_name"], "Ohjelmointi");

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/enroll/{course_id}"))
        .insert_header(bearer(&teacher))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        error_messages(&body),
        vec!["Vain opiskelijat voivat ilmoittautua kursseille."]
    );

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/enroll/{course_id}"))
        .insert_header(bearer(&student))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/enroll/{course_id}"))
        .insert_header(bearer(&student))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        error_messages(&body),
        vec!["Olet jo ilmoittautunut kurssille!"]
    );

    let req = test::TestRequest::get()
        .uri("/api/v1/homepage")
        .insert_header(bearer(&student))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["items"][0]["id"], course_id);

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/update_course/{course_id}"))
        .insert_header(bearer(&student))
        .set_json(json!({"course_name": "Kaapattu", "description": "x"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body["message"],
        "Vain kurssin opettaja voi muokata kurssitietoja!"
    );

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/update_course/{course_id}"))
        .insert_header(bearer(&teacher))
        .set_json(json!({"course_name": "Ohjelmointi 2", "description": "Jatkokurssi"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/update_course/{course_id}"))
        .insert_header(bearer(&teacher))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["course_name"], "Ohjelmointi 2");
    assert_eq!(body["data"]["description"], "Jatkokurssi");

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/course_page/{course_id}"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["enrolled"], false);
    assert_eq!(body["data"]["owner"], false);
    assert_eq!(body["data"]["points"], 0);

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/delete_course/{course_id}"))
        .insert_header(bearer(&student))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/delete_course/{course_id}"))
        .insert_header(bearer(&teacher))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/enroll/{course_id}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_add_course_requires_userinfo() {
    let (storage, shared) = setup().await;
    let teacher = fixtures::teacher(&storage, "uusi_opettaja").await;
    let app = test_app!(shared);

    let req = test::TestRequest::get()
        .uri("/api/v1/add_course")
        .insert_header(bearer(&teacher))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Täydennä ensin käyttäjätietosi!");
}

#[actix_web::test]
async fn test_exercises_and_materials() {
    let (storage, shared) = setup().await;
    let teacher = fixtures::teacher(&storage, "opettaja").await;
    let teacher = fixtures::with_userinfo(&storage, &teacher).await;
    let student = fixtures::student(&storage, "opiskelija").await;
    let student = fixtures::with_userinfo(&storage, &student).await;
    let course = fixtures::course(&storage, teacher.id, "Maantieto").await;
    let app = test_app!(shared);

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/add_exercise/{}", course.id))
        .insert_header(bearer(&student))
        .set_json(json!({"question": "Suomen pääkaupunki?", "correct_answer": "Helsinki"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/add_exercise/{}", course.id))
        .insert_header(bearer(&teacher))
        .set_json(json!({"question": "Suomen pääkaupunki?", "correct_answer": "Helsinki"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    let exercise_id = body["data"]["id"].as_i64().unwrap();

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/answer/{exercise_id}"))
        .insert_header(bearer(&student))
        .set_json(json!({"answer": "Helsinki"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    storage.enroll_student(course.id, student.id).await.unwrap();

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/answer/{exercise_id}"))
        .insert_header(bearer(&student))
        .set_json(json!({"answer": "  helsinki "}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["is_correct"], true);

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/answer/{exercise_id}"))
        .insert_header(bearer(&student))
        .set_json(json!({"answer": "Turku"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/course_page/{}", course.id))
        .insert_header(bearer(&student))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["enrolled"], true);
    assert_eq!(body["data"]["points"], 1);
    assert_eq!(body["data"]["answers"].as_array().unwrap().len(), 1);

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/add_material/{}", course.id))
        .insert_header(bearer(&teacher))
        .set_json(json!({"title": "Kartat", "content": "Karttojen lukeminen"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    let material_id = body["data"]["id"].as_i64().unwrap();

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/course_page/{}", course.id))
        .insert_header(bearer(&teacher))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["owner"], true);
    assert_eq!(body["data"]["answers"][0]["student_name"], "Etu opiskelija");
    assert_eq!(body["data"]["materials"][0]["title"], "Kartat");

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/delete_material/{material_id}"))
        .insert_header(bearer(&student))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/delete_material/{material_id}"))
        .insert_header(bearer(&teacher))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/delete_exercise/{exercise_id}"))
        .insert_header(bearer(&teacher))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/course_page/{}", course.id))
        .insert_header(bearer(&student))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert!(body["data"]["exercise_list"].as_array().unwrap().is_empty());
    assert_eq!(body["data"]["points"], 0);
}

#[actix_web::test]
async fn test_logout_revokes_session() {
    let (storage, shared) = setup().await;
    let student = fixtures::student(&storage, "uloskirjautuja").await;
    let app = test_app!(shared);
    let auth = bearer(&student);

    let req = test::TestRequest::get()
        .uri("/api/v1/homepage")
        .insert_header(auth.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri("/api/v1/logout")
        .insert_header(auth.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri("/api/v1/homepage")
        .insert_header(auth)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_delete_account_cascades() {
    let (storage, shared) = setup().await;
    let teacher = fixtures::teacher(&storage, "lahtija").await;
    let course = fixtures::course(&storage, teacher.id, "Poistuva kurssi").await;
    let app = test_app!(shared);
    let auth = bearer(&teacher);

    let req = test::TestRequest::get()
        .uri("/api/v1/delete_account")
        .insert_header(auth.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    assert!(storage.get_course(course.id).await.unwrap().is_none());

    let req = test::TestRequest::get()
        .uri("/api/v1/homepage")
        .insert_header(auth)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_request_errors_use_envelope() {
    let (storage, shared) = setup().await;
    let teacher = fixtures::teacher(&storage, "opettaja").await;
    let app = test_app!(shared);

    let req = test::TestRequest::get().uri("/api/v1/homepage").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::get().uri("/api/v1/enroll/0").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::get()
        .uri("/api/v1/course_page/999")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Kurssitietoja ei löytynyt.");

    let req = test::TestRequest::post()
        .uri("/api/v1/add_course")
        .insert_header(bearer(&teacher))
        .insert_header((header::CONTENT_TYPE, "application/json"))
        .set_payload("{\"course_name\": ")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["code"].as_i64().unwrap() > 0);

    let req = test::TestRequest::get().uri("/api/v1/?page=abc").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::get().uri("/api/tuntematon").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::get().uri("/kurssit/1").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_course_list_page_beyond_range_is_empty() {
    let (storage, shared) = setup().await;
    let teacher = fixtures::teacher(&storage, "opettaja").await;
    fixtures::course(&storage, teacher.id, "Tilastotiede").await;
    let app = test_app!(shared);

    let req = test::TestRequest::get()
        .uri("/api/v1/?page=9223372036854775807&size=100")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["data"]["items"].as_array().unwrap().is_empty());
    assert_eq!(body["data"]["pagination"]["total"], 1);

    let req = test::TestRequest::get()
        .uri("/api/v1/?page=2&size=1")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert!(body["data"]["items"].as_array().unwrap().is_empty());
}

#[actix_web::test]
async fn test_blank_userinfo_is_rejected_and_padding_trimmed() {
    let (storage, shared) = setup().await;
    let student = fixtures::student(&storage, "tyhjat_tiedot").await;
    let app = test_app!(shared);

    let req = test::TestRequest::post()
        .uri("/api/v1/userinfo")
        .insert_header(bearer(&student))
        .set_json(json!({"first_name": " ", "last_name": " ", "student_number": " 1 "}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        error_messages(&body),
        vec![
            "Etunimen on oltava 1-50 merkkiä.",
            "Sukunimen on oltava 1-50 merkkiä."
        ]
    );

    let req = test::TestRequest::post()
        .uri("/api/v1/userinfo")
        .insert_header(bearer(&student))
        .set_json(json!({"first_name": " Liisa ", "last_name": "Virtanen  ", "student_number": " 7654321"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["has_userinfo"], true);
    assert_eq!(body["data"]["first_name"], "Liisa");
    assert_eq!(body["data"]["last_name"], "Virtanen");
    assert_eq!(body["data"]["student_number"], "7654321");
}

#[actix_web::test]
async fn test_logout_ends_every_session_of_user() {
    let (storage, shared) = setup().await;
    let student = fixtures::student(&storage, "kahden_laitteen").await;
    let app = test_app!(shared);
    let laptop = bearer(&student);
    let phone = bearer(&student);
    assert_ne!(laptop.1, phone.1);

    // 两个令牌都先通过一次认证，会话用户进入缓存
    for auth in [&laptop, &phone] {
        let req = test::TestRequest::get()
            .uri("/api/v1/homepage")
            .insert_header(auth.clone())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    let req = test::TestRequest::get()
        .uri("/api/v1/logout")
        .insert_header(laptop.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri("/api/v1/homepage")
        .insert_header(phone)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}
