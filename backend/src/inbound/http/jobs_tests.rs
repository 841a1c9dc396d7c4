//! Handler tests for the job endpoints, wired over the in-memory repository.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::{StatusCode, header::ContentType};
use actix_web::{App, test, web};
use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

use super::*;
use crate::Trace;
use crate::domain::JobService;
use crate::domain::ports::FixtureJobRepository;

struct FixtureClock {
    utc_now: DateTime<Utc>,
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

fn at(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, day, 12, 0, 0)
        .single()
        .expect("valid fixture timestamp")
}

fn stored_job(id: i32, title: &str, day: u32) -> Job {
    Job {
        id: JobId::new(id),
        title: title.to_owned(),
        company: "Acme".to_owned(),
        location: "Austin, USA".to_owned(),
        posting_date: at(day),
        job_type: None,
        sector: None,
        tags: None,
    }
}

struct Harness {
    repo: Arc<FixtureJobRepository>,
    state: web::Data<HttpState>,
}

impl Harness {
    fn with_jobs(jobs: Vec<Job>) -> Self {
        let repo = Arc::new(FixtureJobRepository::with_jobs(jobs));
        let clock: Arc<dyn Clock> = Arc::new(FixtureClock { utc_now: at(1) });
        let service = JobService::new(repo.clone(), clock);
        Self {
            repo,
            state: web::Data::new(HttpState::from_service(Arc::new(service))),
        }
    }

    fn app(
        &self,
    ) -> App<
        impl ServiceFactory<
            ServiceRequest,
            Config = (),
            Response = ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        > + use<>,
    > {
        App::new()
            .app_data(self.state.clone())
            .wrap(Trace)
            .configure(configure)
    }
}

#[fixture]
fn harness() -> Harness {
    Harness::with_jobs(Vec::new())
}

fn actuary() -> Value {
    json!({"title": "Actuary I", "company": "Acme", "location": "Austin, USA"})
}

#[rstest]
#[actix_web::test]
async fn welcome_is_plain_text(harness: Harness) {
    let app = test::init_service(harness.app()).await;
    let res = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;

    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers().contains_key("trace-id"));
    let body = test::read_body(res).await;
    assert_eq!(body.as_ref(), WELCOME_MESSAGE.as_bytes());
}

#[rstest]
#[actix_web::test]
async fn create_then_repeat_is_conflict_and_stores_once(harness: Harness) {
    let app = test::init_service(harness.app()).await;

    let first = test::call_service(
        &app,
        test::TestRequest::post().uri("/jobs").set_json(actuary()).to_request(),
    )
    .await;
    assert_eq!(first.status(), StatusCode::CREATED);
    let created: CreatedResponse = test::read_body_json(first).await;
    assert_eq!(created.message, "Job created");

    let second = test::call_service(
        &app,
        test::TestRequest::post().uri("/jobs").set_json(actuary()).to_request(),
    )
    .await;
    assert_eq!(second.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(second).await;
    assert_eq!(body, json!({"message": DUPLICATE_MESSAGE}));
    assert_eq!(harness.repo.len(), 1);

    let fetched = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/jobs/{}", created.id))
            .to_request(),
    )
    .await;
    assert_eq!(fetched.status(), StatusCode::OK);
    let job: Value = test::read_body_json(fetched).await;
    assert_eq!(job["job_type"], Value::Null);
    assert_eq!(job["posting_date"], json!("2024-06-01"));
    assert_eq!(job["title"], json!("Actuary I"));
}

#[rstest]
#[case(json!({"company": "Acme", "location": "Austin, USA"}), "title")]
#[case(json!({"title": "  ", "company": "Acme", "location": "Austin, USA"}), "title")]
#[case(json!({"title": "A", "company": "Acme"}), "location")]
#[case(
    json!({"title": "A", "company": "Acme", "location": "X", "tags": "t".repeat(256)}),
    "tags"
)]
#[actix_web::test]
async fn create_rejects_invalid_drafts(
    harness: Harness,
    #[case] payload: Value,
    #[case] field: &str,
) {
    let app = test::init_service(harness.app()).await;
    let res = test::call_service(
        &app,
        test::TestRequest::post().uri("/jobs").set_json(payload).to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["details"]["field"], json!(field));
    assert!(body["error"].is_string());
    assert!(harness.repo.is_empty());
}

#[rstest]
#[case("1714554000000", "2024-06-01")]
#[case("2024-05-01 09:00:00+00", "2024-06-01")]
#[case("2024-05-01 09:00:00", "2024-05-01")]
#[case("Wed, 01 May 2024 09:00:00 GMT", "2024-05-01")]
#[actix_web::test]
async fn create_accepts_any_posting_date_text(
    harness: Harness,
    #[case] raw: &str,
    #[case] stored: &str,
) {
    let app = test::init_service(harness.app()).await;
    let mut payload = actuary();
    payload["posting_date"] = json!(raw);

    let res = test::call_service(
        &app,
        test::TestRequest::post().uri("/jobs").set_json(payload).to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let created: CreatedResponse = test::read_body_json(res).await;

    let job: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri(&format!("/jobs/{}", created.id))
            .to_request(),
    )
    .await;
    assert_eq!(job["posting_date"], json!(stored));
}

#[rstest]
#[case("{not json")]
#[case(r#"{"title": 5, "company": "Acme", "location": "X"}"#)]
#[actix_web::test]
async fn malformed_bodies_are_bad_requests(harness: Harness, #[case] raw: &'static str) {
    let app = test::init_service(harness.app()).await;
    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/jobs")
            .insert_header(ContentType::json())
            .set_payload(raw)
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["code"], json!("invalid_request"));
}

#[rstest]
#[actix_web::test]
async fn list_reports_page_counts() {
    let jobs = (1..=17)
        .map(|n| stored_job(n, &format!("Job {n}"), 1 + (n as u32 % 28)))
        .collect();
    let harness = Harness::with_jobs(jobs);
    let app = test::init_service(harness.app()).await;

    let body: ListJobsResponse = test::call_and_read_body_json(
        &app,
        test::TestRequest::get().uri("/jobs?limit=8&page=3").to_request(),
    )
    .await;

    assert!(body.success);
    assert_eq!(body.total_jobs, 17);
    assert_eq!(body.total_pages, 3);
    assert_eq!(body.current_page, 3);
    assert_eq!(body.jobs.len(), 1);
}

#[rstest]
#[case("/jobs?page=abc&limit=-4")]
#[case("/jobs?page=0&limit=")]
#[actix_web::test]
async fn invalid_paging_falls_back_to_defaults(harness: Harness, #[case] uri: &str) {
    let app = test::init_service(harness.app()).await;
    let body: ListJobsResponse =
        test::call_and_read_body_json(&app, test::TestRequest::get().uri(uri).to_request()).await;
    assert_eq!(body.current_page, 1);
    assert_eq!(body.total_pages, 0);
}

#[rstest]
#[actix_web::test]
async fn unknown_sort_matches_default_order() {
    let harness = Harness::with_jobs(vec![
        stored_job(1, "B", 3),
        stored_job(2, "A", 5),
        stored_job(3, "C", 4),
    ]);
    let app = test::init_service(harness.app()).await;

    let ids = |body: ListJobsResponse| body.jobs.iter().map(|job| job.id).collect::<Vec<_>>();
    let default: ListJobsResponse =
        test::call_and_read_body_json(&app, test::TestRequest::get().uri("/jobs").to_request())
            .await;
    let unknown: ListJobsResponse = test::call_and_read_body_json(
        &app,
        test::TestRequest::get().uri("/jobs?sort=by_salary").to_request(),
    )
    .await;
    let by_title: ListJobsResponse = test::call_and_read_body_json(
        &app,
        test::TestRequest::get().uri("/jobs?sort=title_asc").to_request(),
    )
    .await;

    assert_eq!(ids(default), vec![2, 3, 1]);
    assert_eq!(ids(unknown), vec![2, 3, 1]);
    assert_eq!(ids(by_title), vec![2, 1, 3]);
}

#[rstest]
#[actix_web::test]
async fn free_text_matches_tags_only_records() {
    let mut tagged = stored_job(1, "Analyst", 1);
    tagged.tags = Some("Python, Pricing".to_owned());
    let harness = Harness::with_jobs(vec![tagged, stored_job(2, "Actuary", 2)]);
    let app = test::init_service(harness.app()).await;

    let body: ListJobsResponse = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri("/jobs?tag=python&job_type=all")
            .to_request(),
    )
    .await;

    assert_eq!(body.total_jobs, 1);
    assert_eq!(body.jobs.first().map(|job| job.id), Some(1));
}

#[rstest]
#[actix_web::test]
async fn tags_only_update_keeps_other_fields() {
    let mut job = stored_job(1, "Analyst", 1);
    job.job_type = Some("Life".to_owned());
    job.sector = Some("Insurance".to_owned());
    let harness = Harness::with_jobs(vec![job]);
    let app = test::init_service(harness.app()).await;

    let res = test::call_service(
        &app,
        test::TestRequest::patch()
            .uri("/jobs/1")
            .set_json(json!({"tags": "x"}))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body, json!({"message": "Job 1 updated"}));

    let job: JobResponse =
        test::call_and_read_body_json(&app, test::TestRequest::get().uri("/jobs/1").to_request())
            .await;
    assert_eq!(job.tags.as_deref(), Some("x"));
    assert_eq!(job.title, "Analyst");
    assert_eq!(job.company, "Acme");
    assert_eq!(job.location, "Austin, USA");
    assert_eq!(job.job_type.as_deref(), Some("Life"));
    assert_eq!(job.sector.as_deref(), Some("Insurance"));
}

#[rstest]
#[actix_web::test]
async fn null_optional_field_clears_it() {
    let mut job = stored_job(1, "Analyst", 1);
    job.job_type = Some("Life".to_owned());
    job.sector = Some("Insurance".to_owned());
    let harness = Harness::with_jobs(vec![job]);
    let app = test::init_service(harness.app()).await;

    let res = test::call_service(
        &app,
        test::TestRequest::put()
            .uri("/jobs/1")
            .set_json(json!({"job_type": null, "title": null}))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);

    let job: JobResponse =
        test::call_and_read_body_json(&app, test::TestRequest::get().uri("/jobs/1").to_request())
            .await;
    assert_eq!(job.job_type, None);
    assert_eq!(job.sector.as_deref(), Some("Insurance"));
    assert_eq!(job.title, "Analyst");
}

#[rstest]
#[actix_web::test]
async fn put_collision_is_conflict() {
    let harness = Harness::with_jobs(vec![stored_job(1, "A", 1), stored_job(2, "B", 1)]);
    let app = test::init_service(harness.app()).await;

    let res = test::call_service(
        &app,
        test::TestRequest::put()
            .uri("/jobs/2")
            .set_json(json!({"title": "A"}))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body, json!({"message": DUPLICATE_MESSAGE}));
}

#[rstest]
#[case(test::TestRequest::get())]
#[case(test::TestRequest::delete())]
#[actix_web::test]
async fn unknown_or_non_integer_ids_are_not_found(
    harness: Harness,
    #[case] request: test::TestRequest,
    #[values("/jobs/99", "/jobs/abc")] uri: &str,
) {
    let app = test::init_service(harness.app()).await;
    let res = test::call_service(&app, request.uri(uri).to_request()).await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["error"], json!(JOB_NOT_FOUND_MESSAGE));
}

#[rstest]
#[actix_web::test]
async fn delete_removes_job_once() {
    let harness = Harness::with_jobs(vec![stored_job(4, "A", 1)]);
    let app = test::init_service(harness.app()).await;

    let first = test::call_service(&app, test::TestRequest::delete().uri("/jobs/4").to_request())
        .await;
    assert_eq!(first.status(), StatusCode::OK);
    let body: Value = test::read_body_json(first).await;
    assert_eq!(body, json!({"message": "Job 4 deleted"}));

    let second =
        test::call_service(&app, test::TestRequest::delete().uri("/jobs/4").to_request()).await;
    assert_eq!(second.status(), StatusCode::NOT_FOUND);
    assert!(harness.repo.is_empty());
}
