//! Scraped job listings: raw embedded records and their normalised form.
//!
//! The listing page embeds its data as JSON produced by the site's client
//! framework. Records are decoded into [`RawJobListing`], an explicit schema
//! of optional fields, and then resolved into a [`ScrapedJob`] using fixed
//! defaults so every pushed record carries the same shape.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::job::MISSING_VALUE_SENTINEL;

/// Placeholder for an unknown city or country.
pub const UNKNOWN_PLACE: &str = "Unknown";

/// JSON pointer to the listing array inside the page's embedded state.
pub const LISTINGS_POINTER: &str = "/props/pageProps/filteredJobs";

/// Country reference as embedded by the listing site.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawCountry {
    /// Display label, e.g. `"USA"`.
    #[serde(default)]
    pub label: Option<String>,
}

/// One listing record as embedded in the page state.
///
/// Unknown keys are ignored. A key holding `null` is treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawJobListing {
    /// Position title.
    #[serde(default)]
    pub position: Option<String>,
    /// Hiring company.
    #[serde(default)]
    pub company: Option<String>,
    /// Cities, first one wins.
    #[serde(default)]
    pub cities: Option<Vec<String>>,
    /// Country reference.
    #[serde(default)]
    pub countries: Option<RawCountry>,
    /// Sector labels, stored as the job type.
    #[serde(default)]
    pub sectors: Option<Vec<String>>,
    /// Free-form labels.
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    /// Creation timestamp, passed through unmodified. Sites emit either
    /// text or epoch numbers here.
    #[serde(default)]
    pub created_at: Option<Value>,
}

/// Normalised listing ready to be pushed to the job API.
///
/// Serialises to the body of `POST /jobs`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapedJob {
    /// Position title or `"N/A"`.
    pub title: String,
    /// Company or `"N/A"`.
    pub company: String,
    /// `"city, country"` with `"Unknown"` for either missing part.
    pub location: String,
    /// Sectors joined with `", "` or `"N/A"`.
    pub job_type: String,
    /// Tags joined with `", "` or `"N/A"`.
    pub tags: String,
    /// Source timestamp text or `"N/A"`.
    pub posting_date: String,
}

/// A raw record could not be decoded into [`RawJobListing`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("listing #{ordinal} could not be decoded: {message}")]
pub struct ListingExtractionError {
    /// 1-based position of the record in the page.
    pub ordinal: usize,
    /// Decoder message.
    pub message: String,
}

impl From<RawJobListing> for ScrapedJob {
    fn from(raw: RawJobListing) -> Self {
        let RawJobListing {
            position,
            company,
            cities,
            countries,
            sectors,
            tags,
            created_at,
        } = raw;

        let city = cities
            .and_then(|list| list.into_iter().next())
            .unwrap_or_else(|| UNKNOWN_PLACE.to_owned());
        let country = countries
            .and_then(|country| country.label)
            .unwrap_or_else(|| UNKNOWN_PLACE.to_owned());

        Self {
            title: position.unwrap_or_else(missing),
            company: company.unwrap_or_else(missing),
            location: format!("{city}, {country}"),
            job_type: join_or_missing(sectors),
            tags: join_or_missing(tags),
            posting_date: created_at.map_or_else(missing, as_text),
        }
    }
}

impl ScrapedJob {
    /// Decode and normalise one embedded record.
    ///
    /// # Errors
    /// Returns [`ListingExtractionError`] when the record is not an object or
    /// a known key holds a value of the wrong shape.
    ///
    /// # Examples
    /// ```
    /// use jobboard::domain::ScrapedJob;
    /// use serde_json::json;
    ///
    /// let job = ScrapedJob::extract(1, &json!({"position": "Analyst", "cities": ["Leeds"]}))
    ///     .expect("valid record");
    /// assert_eq!(job.location, "Leeds, Unknown");
    /// assert_eq!(job.company, "N/A");
    /// ```
    pub fn extract(ordinal: usize, record: &Value) -> Result<Self, ListingExtractionError> {
        RawJobListing::deserialize(record)
            .map(Self::from)
            .map_err(|error| ListingExtractionError {
                ordinal,
                message: error.to_string(),
            })
    }
}

fn missing() -> String {
    MISSING_VALUE_SENTINEL.to_owned()
}

fn as_text(value: Value) -> String {
    match value {
        Value::String(text) => text,
        other => other.to_string(),
    }
}

fn join_or_missing(values: Option<Vec<String>>) -> String {
    match values {
        Some(list) if !list.is_empty() => list.join(", "),
        _ => missing(),
    }
}

/// Locate the listing records inside the page's embedded state.
///
/// Returns `None` when the key is absent or does not hold an array.
#[must_use]
pub fn embedded_listings(state: &Value) -> Option<&[Value]> {
    state
        .pointer(LISTINGS_POINTER)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
}
