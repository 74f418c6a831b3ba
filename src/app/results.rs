//! Derived views over the retained result set.
//!
//! The result set is never reordered or trimmed in place. Every view the user
//! sees is recomputed from it, so toggling sort or filter back off always
//! restores the exact upstream order.

use std::rc::Rc;

use crate::domain::Book;

/// Stable sort by rating, highest first. Unrated records keep their relative
/// input order after every rated one.
#[must_use]
pub fn sorted_by_rating(books: &[Rc<Book>]) -> Vec<Rc<Book>> {
    let mut sorted = books.to_vec();
    sorted.sort_by(|a, b| b.sort_rating().total_cmp(&a.sort_rating()));
    sorted
}

/// Records whose availability phrase is exactly the "Available" one.
#[must_use]
pub fn ebooks_only(books: &[Rc<Book>]) -> Vec<Rc<Book>> {
    books.iter().filter(|book| book.is_ebook()).cloned().collect()
}

/// Applies the active toggles to the retained set: order first, then filter.
#[must_use]
pub fn derive_visible(results: &[Rc<Book>], sort_by_rating: bool, ebook_only: bool) -> Vec<Rc<Book>> {
    let ordered = if sort_by_rating {
        sorted_by_rating(results)
    } else {
        results.to_vec()
    };

    if ebook_only {
        ebooks_only(&ordered)
    } else {
        ordered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EBOOK_AVAILABLE, EBOOK_UNAVAILABLE, UNKNOWN};

    fn book(title: &str, rating_value: f64, ebook: bool) -> Rc<Book> {
        Rc::new(Book {
            title: title.to_string(),
            author_name: UNKNOWN.to_string(),
            isbn: UNKNOWN.to_string(),
            cover_image_url: String::new(),
            ebook_available: if ebook { EBOOK_AVAILABLE } else { EBOOK_UNAVAILABLE }.to_string(),
            first_publish_year: UNKNOWN.to_string(),
            rating_value,
        })
    }

    fn titles(books: &[Rc<Book>]) -> Vec<&str> {
        books.iter().map(|b| b.title.as_str()).collect()
    }

    #[test]
    fn sort_is_descending_and_stable() {
        let books = vec![
            book("a", 0.0, false),
            book("b", 4.0, false),
            book("c", 3.5, true),
            book("d", 0.0, true),
            book("e", 4.0, true),
            book("f", f64::NAN, false),
        ];

        let sorted = sorted_by_rating(&books);

        assert_eq!(titles(&sorted), vec!["b", "e", "c", "a", "d", "f"]);
    }

    #[test]
    fn sort_shares_records_and_leaves_input_untouched() {
        let books = vec![book("low", 1.0, false), book("high", 5.0, false)];

        let sorted = sorted_by_rating(&books);

        assert_eq!(titles(&books), vec!["low", "high"]);
        assert!(Rc::ptr_eq(&sorted[0], &books[1]));
        assert!(Rc::ptr_eq(&sorted[1], &books[0]));
    }

    #[test]
    fn filter_keeps_only_available_in_order() {
        let books = vec![
            book("a", 1.0, true),
            book("b", 2.0, false),
            book("c", 3.0, true),
        ];

        assert_eq!(titles(&ebooks_only(&books)), vec!["a", "c"]);
        assert_eq!(titles(&derive_visible(&books, false, false)), vec!["a", "b", "c"]);
    }

    #[test]
    fn toggles_compose_over_retained_set() {
        let books = vec![
            book("a", 1.0, true),
            book("b", 5.0, false),
            book("c", 3.0, true),
        ];

        assert_eq!(titles(&derive_visible(&books, true, true)), vec!["c", "a"]);
        assert_eq!(titles(&derive_visible(&books, true, false)), vec!["b", "c", "a"]);
        assert_eq!(titles(&derive_visible(&books, false, true)), vec!["a", "c"]);
    }
}
