//! Shared helpers for the job board integration tests.
//!
//! Integration tests compile as separate crates, so anything shared between
//! them lives here and is pulled in with `mod support;`.

pub mod pg_embed;

/// Returns true when `SKIP_TEST_CLUSTER` is `1`, `true`, or `yes`
/// (case-insensitive).
pub fn should_skip_test_cluster() -> bool {
    std::env::var("SKIP_TEST_CLUSTER")
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Report an embedded cluster setup failure.
///
/// Prints a skip marker and returns `None` when `SKIP_TEST_CLUSTER` is set;
/// panics otherwise so CI breakage stays visible.
pub fn handle_cluster_setup_failure<T>(reason: impl std::fmt::Display) -> Option<T> {
    if should_skip_test_cluster() {
        eprintln!("SKIP-TEST-CLUSTER: {reason}");
        None
    } else {
        panic!("Test cluster setup failed: {reason}. Set SKIP_TEST_CLUSTER=1 to skip.");
    }
}

/// Returns true when the opt-in `RUN_PG_EMBEDDED=1` flag is present.
pub fn embedded_postgres_enabled() -> bool {
    std::env::var("RUN_PG_EMBEDDED").as_deref() == Ok("1")
}

/// Render a `postgres` error with its SQLSTATE and detail.
///
/// `postgres::Error`'s `Display` often collapses to `db error`.
pub fn format_postgres_error(error: &postgres::Error) -> String {
    let Some(db_error) = error.as_db_error() else {
        return error.to_string();
    };

    let mut summary = format!(
        "postgres error {:?}: {}",
        db_error.code(),
        db_error.message()
    );
    if let Some(detail) = db_error.detail() {
        summary.push_str("; detail: ");
        summary.push_str(detail);
    }
    summary
}
