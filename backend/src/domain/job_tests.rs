//! Tests for job validation, filtering, and ordering.

use chrono::{Duration, TimeZone};
use rstest::{fixture, rstest};

use super::*;

fn at(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, day, 12, 0, 0)
        .single()
        .expect("valid fixture timestamp")
}

fn job(id: i32, title: &str, day: u32) -> Job {
    Job {
        id: JobId::new(id),
        title: title.to_owned(),
        company: "Acme".to_owned(),
        location: "Austin, USA".to_owned(),
        posting_date: at(day),
        job_type: Some("Life, Pensions".to_owned()),
        sector: None,
        tags: Some("Excel, SQL".to_owned()),
    }
}

#[fixture]
fn draft() -> JobDraft {
    JobDraft {
        title: Some("  Actuary I ".to_owned()),
        company: Some("Acme".to_owned()),
        location: Some("Austin, USA".to_owned()),
        ..JobDraft::default()
    }
}

#[rstest]
fn from_draft_trims_and_defaults_posting_date(draft: JobDraft) {
    let now = at(3);
    let new_job = NewJob::from_draft(draft, now).expect("valid draft");

    assert_eq!(new_job.title, "Actuary I");
    assert_eq!(new_job.posting_date, now);
    assert!(new_job.job_type.is_none());
    assert!(new_job.tags.is_none());
}

#[rstest]
#[case(JobField::Title)]
#[case(JobField::Company)]
#[case(JobField::Location)]
fn from_draft_rejects_blank_required_fields(mut draft: JobDraft, #[case] field: JobField) {
    match field {
        JobField::Title => draft.title = Some("   ".to_owned()),
        JobField::Company => draft.company = None,
        _ => draft.location = Some(String::new()),
    }

    let err = NewJob::from_draft(draft, at(1)).expect_err("blank field rejected");
    assert_eq!(err, JobValidationError::MissingField(field));
    assert_eq!(err.to_string(), format!("'{}' is required", field.as_str()));
}

#[rstest]
fn from_draft_rejects_oversized_title(mut draft: JobDraft) {
    draft.title = Some("x".repeat(201));
    let err = NewJob::from_draft(draft, at(1)).expect_err("too long");
    assert_eq!(
        err,
        JobValidationError::TooLong {
            field: JobField::Title,
            max: 200
        }
    );
}

#[rstest]
#[case(JobField::Title, Some(200))]
#[case(JobField::Tags, Some(255))]
#[case(JobField::PostingDate, None)]
fn only_text_columns_have_a_width(#[case] field: JobField, #[case] expected: Option<usize>) {
    assert_eq!(field.max_chars(), expected);
}

#[rstest]
fn from_draft_stores_blank_optionals_as_none(mut draft: JobDraft) {
    draft.job_type = Some("  ".to_owned());
    draft.tags = Some("N/A".to_owned());
    let new_job = NewJob::from_draft(draft, at(1)).expect("valid draft");

    assert!(new_job.job_type.is_none());
    assert_eq!(new_job.tags.as_deref(), Some("N/A"));
}

#[rstest]
#[case("2024-05-02T08:30:00Z", Some(at(2) - Duration::minutes(210)))]
#[case("2024-05-02T12:00:00+00:00", Some(at(2)))]
#[case("2024-05-02T12:00:00", Some(at(2)))]
#[case("2024-05-02T12:00:00.000", Some(at(2)))]
#[case("2024-05-02 12:00:00", Some(at(2)))]
#[case("Thu, 02 May 2024 12:00:00 GMT", Some(at(2)))]
#[case("Thu, 02 May 2024 14:00:00 +0200", Some(at(2)))]
#[case("2024-05-02", Some(at(2) - Duration::hours(12)))]
#[case("N/A", None)]
#[case("   ", None)]
fn parse_posting_date_accepts_known_formats(
    #[case] raw: &str,
    #[case] expected: Option<DateTime<Utc>>,
) {
    assert_eq!(parse_posting_date(Some(raw)), Ok(expected));
}

#[rstest]
fn parse_posting_date_rejects_free_text() {
    assert_eq!(
        parse_posting_date(Some("last week")),
        Err(JobValidationError::InvalidPostingDate("last week".to_owned()))
    );
}

#[rstest]
fn patch_keeps_omitted_fields() {
    let patch = JobPatch::try_from(JobPatchDraft {
        tags: Some(Some("x".to_owned())),
        ..JobPatchDraft::default()
    })
    .expect("valid patch");
    let mut stored = job(1, "Analyst", 1);
    let before = stored.clone();

    patch.apply_to(&mut stored);

    assert_eq!(stored.tags.as_deref(), Some("x"));
    assert_eq!(stored.title, before.title);
    assert_eq!(stored.company, before.company);
    assert_eq!(stored.location, before.location);
    assert_eq!(stored.job_type, before.job_type);
    assert_eq!(stored.sector, before.sector);
}

#[rstest]
fn patch_blank_optional_clears_value() {
    let patch = JobPatch::try_from(JobPatchDraft {
        job_type: Some(Some(String::new())),
        ..JobPatchDraft::default()
    })
    .expect("valid patch");
    assert_eq!(patch.job_type, Some(None));

    let mut stored = job(1, "Analyst", 1);
    patch.apply_to(&mut stored);
    assert!(stored.job_type.is_none());
}

#[rstest]
fn patch_payload_separates_null_from_absent() {
    let draft: JobPatchDraft =
        serde_json::from_str(r#"{"sector": null, "tags": "Python", "title": null}"#)
            .expect("valid payload");
    assert_eq!(draft.sector, Some(None));
    assert_eq!(draft.tags, Some(Some("Python".to_owned())));
    assert_eq!(draft.job_type, None);
    assert_eq!(draft.title, None);

    let patch = JobPatch::try_from(draft).expect("valid patch");
    assert_eq!(patch.sector, Some(None));
    assert_eq!(patch.job_type, None);

    let mut stored = job(1, "Analyst", 1);
    stored.sector = Some("Life".to_owned());
    stored.job_type = Some("Full-time".to_owned());
    patch.apply_to(&mut stored);
    assert!(stored.sector.is_none());
    assert_eq!(stored.job_type.as_deref(), Some("Full-time"));
    assert_eq!(stored.title, "Analyst");
}

#[rstest]
fn patch_rejects_blank_required_field() {
    let err = JobPatch::try_from(JobPatchDraft {
        company: Some(" ".to_owned()),
        ..JobPatchDraft::default()
    })
    .expect_err("blank company rejected");
    assert_eq!(err.field(), JobField::Company);
}

#[rstest]
fn empty_patch_is_detected() {
    let patch = JobPatch::try_from(JobPatchDraft::default()).expect("valid patch");
    assert!(patch.is_empty());
}

#[rstest]
#[case(Some("All"), None)]
#[case(Some("ALL"), None)]
#[case(Some("  "), None)]
#[case(None, None)]
#[case(Some(" Life "), Some("Life"))]
fn filter_normalises_sentinels(#[case] raw: Option<&str>, #[case] expected: Option<&str>) {
    let filter = JobFilter::new(raw, raw, raw, raw);
    assert_eq!(filter.job_type(), expected);
    assert_eq!(filter.search(), expected);
}

#[rstest]
fn search_matches_tags_only() {
    let filter = JobFilter::new(None, None, None, Some("sql"));
    assert!(filter.matches(&job(1, "Analyst", 1)));
}

#[rstest]
fn search_misses_unrelated_term() {
    let filter = JobFilter::new(None, None, None, Some("python"));
    assert!(!filter.matches(&job(1, "Analyst", 1)));
}

#[rstest]
fn column_filter_requires_value_present() {
    let filter = JobFilter::new(None, None, Some("Insurance"), None);
    assert!(!filter.matches(&job(1, "Analyst", 1)));
}

#[rstest]
#[case(None, JobSort::PostingDateDesc)]
#[case(Some("posting_date_desc"), JobSort::PostingDateDesc)]
#[case(Some("posting_date_asc"), JobSort::PostingDateAsc)]
#[case(Some("title_asc"), JobSort::TitleAsc)]
#[case(Some("title_desc"), JobSort::TitleDesc)]
#[case(Some("salary"), JobSort::PostingDateDesc)]
fn sort_parses_known_keys(#[case] raw: Option<&str>, #[case] expected: JobSort) {
    assert_eq!(JobSort::from_query(raw), expected);
}

#[rstest]
fn sort_breaks_ties_by_id() {
    let mut jobs = vec![job(1, "B", 2), job(3, "A", 2), job(2, "C", 1)];

    jobs.sort_by(|a, b| JobSort::PostingDateDesc.compare(a, b));
    let ids: Vec<i32> = jobs.iter().map(|j| j.id.as_i32()).collect();
    assert_eq!(ids, vec![3, 1, 2]);

    jobs.sort_by(|a, b| JobSort::TitleAsc.compare(a, b));
    let titles: Vec<&str> = jobs.iter().map(|j| j.title.as_str()).collect();
    assert_eq!(titles, vec!["A", "B", "C"]);
}

#[rstest]
fn job_id_parses_from_path_segment() {
    assert_eq!("42".parse::<JobId>(), Ok(JobId::new(42)));
    assert!("abc".parse::<JobId>().is_err());
}
