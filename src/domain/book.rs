//! Book record and search field selector.
//!
//! A [`Book`] is the only domain entity: a fixed-shape record built once by the
//! normalizer from whatever the upstream API returned. Every field is populated,
//! either with the real value or with its sentinel, so nothing downstream has to
//! deal with absence.

use std::fmt;
use std::str::FromStr;

use super::error::BookscoutError;

/// Sentinel for missing text fields (title, author, ISBN, published year).
pub const UNKNOWN: &str = "Unknown";

/// E-book availability phrase for volumes the upstream flags as e-books.
pub const EBOOK_AVAILABLE: &str = "E-book Access: Available";

/// E-book availability phrase for every other volume.
pub const EBOOK_UNAVAILABLE: &str = "E-book Access: Unavailable";

/// A normalized book record.
///
/// Records are immutable once built. The result set shares them behind `Rc`, so
/// sorted and filtered views reference the same records rather than copies.
///
/// # Examples
///
/// ```
/// use bookscout::domain::{Book, EBOOK_AVAILABLE};
///
/// let book = Book {
///     title: "Dune".to_string(),
///     author_name: "Frank Herbert".to_string(),
///     isbn: "9780441013593".to_string(),
///     cover_image_url: String::new(),
///     ebook_available: EBOOK_AVAILABLE.to_string(),
///     first_publish_year: "1965".to_string(),
///     rating_value: 4.5,
/// };
/// assert!(book.is_ebook());
/// assert_eq!(book.rating_label(), "4.5");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Book {
    pub title: String,
    /// All authors joined into one display string.
    pub author_name: String,
    pub isbn: String,
    /// Thumbnail URL, empty when the volume has no cover.
    pub cover_image_url: String,
    /// Either [`EBOOK_AVAILABLE`] or [`EBOOK_UNAVAILABLE`].
    pub ebook_available: String,
    pub first_publish_year: String,
    /// Average rating, `0.0` when the volume has none.
    pub rating_value: f64,
}

impl Book {
    /// Returns `true` when the availability phrase is exactly [`EBOOK_AVAILABLE`].
    #[must_use]
    pub fn is_ebook(&self) -> bool {
        self.ebook_available == EBOOK_AVAILABLE
    }

    /// Rating used for ordering. Non-finite values sort as unrated.
    #[must_use]
    pub fn sort_rating(&self) -> f64 {
        if self.rating_value.is_finite() {
            self.rating_value
        } else {
            0.0
        }
    }

    /// Rating formatted for display (`4`, `3.5`, `0`).
    #[must_use]
    pub fn rating_label(&self) -> String {
        format!("{}", self.sort_rating())
    }

    /// Cover URL for display, with a literal stand-in when there is none.
    #[must_use]
    pub fn cover_label(&self) -> &str {
        if self.cover_image_url.is_empty() {
            "(no cover)"
        } else {
            &self.cover_image_url
        }
    }
}

/// Which volume attribute a search query targets.
///
/// The wire value is sent verbatim as the `q=<field>:<query>` prefix.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SearchField {
    #[default]
    Title,
    Author,
    Isbn,
}

impl SearchField {
    /// Raw selector value used in the query string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Author => "author",
            Self::Isbn => "isbn",
        }
    }

    /// Label shown in the search bar.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::Author => "Author",
            Self::Isbn => "ISBN",
        }
    }

    /// Next selector in Title → Author → ISBN → Title order.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Title => Self::Author,
            Self::Author => Self::Isbn,
            Self::Isbn => Self::Title,
        }
    }
}

impl fmt::Display for SearchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchField {
    type Err = BookscoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "title" => Ok(Self::Title),
            "author" => Ok(Self::Author),
            "isbn" => Ok(Self::Isbn),
            other => Err(BookscoutError::Config(format!("unknown search field: {other}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book_with_rating(rating_value: f64) -> Book {
        Book {
            title: UNKNOWN.to_string(),
            author_name: UNKNOWN.to_string(),
            isbn: UNKNOWN.to_string(),
            cover_image_url: String::new(),
            ebook_available: EBOOK_UNAVAILABLE.to_string(),
            first_publish_year: UNKNOWN.to_string(),
            rating_value,
        }
    }

    #[test]
    fn rating_label_drops_trailing_zero() {
        assert_eq!(book_with_rating(4.0).rating_label(), "4");
        assert_eq!(book_with_rating(3.5).rating_label(), "3.5");
        assert_eq!(book_with_rating(0.0).rating_label(), "0");
    }

    #[test]
    fn non_finite_rating_sorts_as_zero() {
        assert_eq!(book_with_rating(f64::NAN).sort_rating(), 0.0);
        assert_eq!(book_with_rating(f64::INFINITY).sort_rating(), 0.0);
    }

    #[test]
    fn cover_label_never_blank() {
        assert_eq!(book_with_rating(0.0).cover_label(), "(no cover)");
    }

    #[test]
    fn search_field_cycles_and_parses() {
        assert_eq!(SearchField::Title.next(), SearchField::Author);
        assert_eq!(SearchField::Isbn.next(), SearchField::Title);
        assert_eq!("ISBN".parse::<SearchField>().unwrap(), SearchField::Isbn);
        assert_eq!(" author ".parse::<SearchField>().unwrap(), SearchField::Author);
        assert!("publisher".parse::<SearchField>().is_err());
    }
}
