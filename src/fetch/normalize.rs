//! Upstream volume → [`Book`] normalization.
//!
//! The books API returns deeply optional JSON: any of `volumeInfo`,
//! `accessInfo`, their children, or the array entries inside them can be
//! missing, `null`, or of a different type than documented. Navigation goes
//! through `serde_json::Value` accessors so that every one of those cases
//! falls through to the field's sentinel instead of failing the whole item.

use serde_json::Value;

use crate::domain::{Book, EBOOK_AVAILABLE, EBOOK_UNAVAILABLE, UNKNOWN};

/// Builds a [`Book`] from one entry of the upstream `items` array.
///
/// Never panics and never fails. Empty strings count as absent.
///
/// # Example
///
/// ```
/// use bookscout::fetch::normalize_volume;
///
/// let item = serde_json::json!({ "volumeInfo": { "title": "Dune" } });
/// let book = normalize_volume(&item);
/// assert_eq!(book.title, "Dune");
/// assert_eq!(book.author_name, "Unknown");
/// assert_eq!(book.rating_value, 0.0);
/// ```
#[must_use]
pub fn normalize_volume(item: &Value) -> Book {
    let info = item.get("volumeInfo").unwrap_or(&Value::Null);

    Book {
        title: non_empty_str(info.get("title")).unwrap_or(UNKNOWN).to_string(),
        author_name: join_authors(info.get("authors")).unwrap_or_else(|| UNKNOWN.to_string()),
        isbn: first_identifier(info.get("industryIdentifiers"))
            .unwrap_or(UNKNOWN)
            .to_string(),
        cover_image_url: non_empty_str(info.get("imageLinks").and_then(|l| l.get("thumbnail")))
            .unwrap_or_default()
            .to_string(),
        ebook_available: ebook_phrase(item.get("accessInfo").and_then(|a| a.get("isEbook")))
            .to_string(),
        first_publish_year: publish_year(info.get("publishedDate"))
            .unwrap_or(UNKNOWN)
            .to_string(),
        rating_value: rating(info.get("averageRating")),
    }
}

fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str).filter(|s| !s.is_empty())
}

/// Joins every string entry of `authors` with `", "`.
fn join_authors(value: Option<&Value>) -> Option<String> {
    let joined = value?
        .as_array()?
        .iter()
        .filter_map(Value::as_str)
        .filter(|name| !name.is_empty())
        .collect::<Vec<_>>()
        .join(", ");

    (!joined.is_empty()).then_some(joined)
}

/// First identifier in the candidate list that is a non-empty string.
fn first_identifier(value: Option<&Value>) -> Option<&str> {
    value?
        .as_array()?
        .iter()
        .find_map(|candidate| non_empty_str(candidate.get("identifier")))
}

/// Maps the upstream flag to one of the two fixed phrases.
///
/// Only a literal `true` counts as available.
fn ebook_phrase(value: Option<&Value>) -> &'static str {
    if value.and_then(Value::as_bool).unwrap_or(false) {
        EBOOK_AVAILABLE
    } else {
        EBOOK_UNAVAILABLE
    }
}

/// Leading `-`-separated segment of a date such as `1965-08-01` or `1965`.
fn publish_year(value: Option<&Value>) -> Option<&str> {
    non_empty_str(value)?
        .split('-')
        .next()
        .filter(|segment| !segment.is_empty())
}

/// Numeric rating, accepting numbers and numeric strings. Defaults to `0.0`.
fn rating(value: Option<&Value>) -> f64 {
    let parsed = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    parsed.filter(|r| r.is_finite()).unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn assert_all_sentinels(book: &Book) {
        assert_eq!(book.title, UNKNOWN);
        assert_eq!(book.author_name, UNKNOWN);
        assert_eq!(book.isbn, UNKNOWN);
        assert_eq!(book.cover_image_url, "");
        assert_eq!(book.ebook_available, EBOOK_UNAVAILABLE);
        assert_eq!(book.first_publish_year, UNKNOWN);
        assert_eq!(book.rating_value, 0.0);
    }

    #[test]
    fn complete_volume_maps_every_field() {
        let item = json!({
            "volumeInfo": {
                "title": "Dune",
                "authors": ["Frank Herbert", "Brian Herbert"],
                "industryIdentifiers": [
                    { "type": "ISBN_13", "identifier": "9780441013593" },
                    { "type": "ISBN_10", "identifier": "0441013597" }
                ],
                "imageLinks": { "thumbnail": "http://books.example/dune.jpg" },
                "publishedDate": "1965-08-01",
                "averageRating": 4.5
            },
            "accessInfo": { "isEbook": true }
        });

        let book = normalize_volume(&item);

        assert_eq!(book.title, "Dune");
        assert_eq!(book.author_name, "Frank Herbert, Brian Herbert");
        assert_eq!(book.isbn, "9780441013593");
        assert_eq!(book.cover_image_url, "http://books.example/dune.jpg");
        assert_eq!(book.ebook_available, EBOOK_AVAILABLE);
        assert_eq!(book.first_publish_year, "1965");
        assert_eq!(book.rating_value, 4.5);
    }

    #[test]
    fn empty_object_yields_sentinels() {
        assert_all_sentinels(&normalize_volume(&json!({})));
    }

    #[test]
    fn non_object_item_yields_sentinels() {
        assert_all_sentinels(&normalize_volume(&Value::Null));
        assert_all_sentinels(&normalize_volume(&json!("a string")));
        assert_all_sentinels(&normalize_volume(&json!([1, 2, 3])));
    }

    #[test]
    fn null_fields_yield_sentinels() {
        let item = json!({
            "volumeInfo": {
                "title": null,
                "authors": null,
                "industryIdentifiers": null,
                "imageLinks": null,
                "publishedDate": null,
                "averageRating": null
            },
            "accessInfo": null
        });
        assert_all_sentinels(&normalize_volume(&item));
    }

    #[test]
    fn unexpected_shapes_yield_sentinels() {
        let item = json!({
            "volumeInfo": {
                "title": 42,
                "authors": "Frank Herbert",
                "industryIdentifiers": { "identifier": "123" },
                "imageLinks": ["http://books.example/x.jpg"],
                "publishedDate": 1965,
                "averageRating": [4]
            },
            "accessInfo": { "isEbook": "yes" }
        });
        assert_all_sentinels(&normalize_volume(&item));
    }

    #[test]
    fn empty_strings_count_as_absent() {
        let item = json!({
            "volumeInfo": {
                "title": "",
                "authors": [],
                "industryIdentifiers": [{ "identifier": "" }],
                "imageLinks": { "thumbnail": "" },
                "publishedDate": ""
            }
        });
        assert_all_sentinels(&normalize_volume(&item));
    }

    #[test]
    fn isbn_skips_candidates_without_identifier() {
        let item = json!({
            "volumeInfo": {
                "industryIdentifiers": [
                    { "type": "OTHER" },
                    null,
                    { "type": "ISBN_10", "identifier": "0441013597" }
                ]
            }
        });
        assert_eq!(normalize_volume(&item).isbn, "0441013597");
    }

    #[test]
    fn authors_ignore_non_string_entries() {
        let item = json!({ "volumeInfo": { "authors": [null, "Ursula K. Le Guin", 7] } });
        assert_eq!(normalize_volume(&item).author_name, "Ursula K. Le Guin");
    }

    #[test]
    fn year_only_and_partial_dates() {
        let year_only = json!({ "volumeInfo": { "publishedDate": "2001" } });
        let month = json!({ "volumeInfo": { "publishedDate": "1999-04" } });
        let leading_dash = json!({ "volumeInfo": { "publishedDate": "-04-01" } });

        assert_eq!(normalize_volume(&year_only).first_publish_year, "2001");
        assert_eq!(normalize_volume(&month).first_publish_year, "1999");
        assert_eq!(normalize_volume(&leading_dash).first_publish_year, UNKNOWN);
    }

    #[test]
    fn numeric_string_rating_is_accepted() {
        let item = json!({ "volumeInfo": { "averageRating": " 3.5 " } });
        assert_eq!(normalize_volume(&item).rating_value, 3.5);

        let garbage = json!({ "volumeInfo": { "averageRating": "great" } });
        assert_eq!(normalize_volume(&garbage).rating_value, 0.0);
    }

    #[test]
    fn ebook_false_is_unavailable() {
        let item = json!({ "accessInfo": { "isEbook": false } });
        assert_eq!(normalize_volume(&item).ebook_available, EBOOK_UNAVAILABLE);
    }
}
