use std::fmt::Write;

use shelf::{Book, Rating, Review};

pub const NO_RATINGS: &str = "No ratings available";
pub const NO_BOOKS: &str = "No books found";
pub const NO_REVIEWS: &str = "No reviews available";

const FULL_STAR: char = '★';
const HALF_STAR: char = '⯪';
const EMPTY_STAR: char = '☆';

/// One line per book: title, author, year and the catalog rating when known.
pub fn book_list(books: &[Book]) -> String {
    if books.is_empty() {
        return NO_BOOKS.to_owned();
    }

    books.iter().map(book_card).collect::<Vec<_>>().join("\n")
}

pub fn book_card(book: &Book) -> String {
    let mut line = format!("{} - {}", book.title, book.author);
    if let Some(year) = &book.published_year {
        let _ = write!(line, " ({year})");
    }
    if let Some(rating) = book.rating {
        let _ = write!(line, " {rating:.1} ({})", book.ratings_count.unwrap_or(0));
    }
    let _ = write!(line, " [{}]", book.id);
    line
}

pub fn book_details(book: &Book, rating: Option<&Rating>) -> String {
    let mut out = format!("{}\nby {}\n", book.title, book.author);

    if let Some(year) = &book.published_year {
        let _ = writeln!(out, "Published: {year}");
    }
    if let Some(publisher) = &book.publisher {
        let _ = writeln!(out, "{publisher}");
    }
    if let Some(isbn) = &book.isbn {
        let _ = writeln!(out, "ISBN: {isbn}");
    }
    if let Some(cover) = &book.cover_image {
        let _ = writeln!(out, "Cover: {cover}");
    }

    out.push_str("\nRating & Reviews\n");
    out.push_str(&rating.map_or_else(|| NO_RATINGS.to_owned(), self::rating));

    if let Some(description) = &book.description {
        let _ = write!(out, "\n\nDescription\n{description}");
    }

    if let Some(url) = book.web_search_url() {
        let _ = write!(out, "\n\nSearch on Google: {url}");
    }
    if let Some(url) = book.open_library_search_url() {
        let _ = write!(out, "\nView on Open Library: {url}");
    }

    out
}

pub fn rating(rating: &Rating) -> String {
    let mut out = format!(
        "{} {:.1} / {}",
        stars(rating.value, rating.max_value),
        rating.value,
        rating.max_value
    );
    if let Some(count) = rating.review_count.filter(|c| *c > 0) {
        let _ = write!(out, "\nBased on {count} reviews");
    }
    let _ = write!(out, "\nSource: {}", rating.source);
    out
}

pub fn reviews(reviews: &[Review]) -> String {
    if reviews.is_empty() {
        return NO_REVIEWS.to_owned();
    }

    reviews
        .iter()
        .map(|review| {
            let mut out = review.url.clone();
            if let Some(byline) = &review.byline {
                let _ = write!(out, "\n{byline}");
            }
            if let Some(published) = &review.published {
                let _ = write!(out, " ({published})");
            }
            if let Some(summary) = &review.summary {
                let _ = write!(out, "\n{summary}");
            }
            let _ = write!(out, "\nSource: {}", review.source);
            out
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Full stars for the whole part of `value`, a half star when the fraction is at least a half and
/// empty stars up to `max`.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn stars(value: f64, max: f64) -> String {
    let max = max.max(0.0).floor() as usize;
    let value = value.clamp(0.0, max as f64);
    let full = value.floor() as usize;
    let half = usize::from(value.fract() >= 0.5);
    let empty = max.saturating_sub(full + half);

    std::iter::repeat(FULL_STAR)
        .take(full)
        .chain(std::iter::repeat(HALF_STAR).take(half))
        .chain(std::iter::repeat(EMPTY_STAR).take(empty))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book() -> Book {
        Book {
            id: "1".to_owned(),
            title: "Test Book".to_owned(),
            author: "Test Author".to_owned(),
            published_year: Some("2023".to_owned()),
            rating: Some(4.5),
            ratings_count: Some(100),
            ..Book::default()
        }
    }

    #[test]
    fn card_shows_rating_and_count() {
        assert_eq!(
            "Test Book - Test Author (2023) 4.5 (100) [1]",
            book_card(&book())
        );

        let unrated = Book {
            rating: None,
            published_year: None,
            ..book()
        };
        assert_eq!("Test Book - Test Author [1]", book_card(&unrated));
    }

    #[test]
    fn stars_round_down_with_half_star() {
        assert_eq!("★★★★⯪", stars(4.5, 5.0));
        assert_eq!("★★★★☆", stars(4.4, 5.0));
        assert_eq!("☆☆☆☆☆", stars(0.0, 5.0));
        assert_eq!("★★★★★", stars(7.0, 5.0));
        assert_eq!("", stars(3.0, 0.0));
    }

    #[test]
    fn rating_hides_zero_review_count() {
        let r = Rating {
            source: "Google Books".to_owned(),
            value: 4.0,
            max_value: 5.0,
            review_count: Some(0),
        };
        assert_eq!("★★★★☆ 4.0 / 5\nSource: Google Books", rating(&r));

        let r = Rating {
            review_count: Some(12),
            ..r
        };
        assert!(rating(&r).contains("Based on 12 reviews"));
    }

    #[test]
    fn details_without_rating_say_so() {
        let details = book_details(&book(), None);
        assert!(details.starts_with("Test Book\nby Test Author\nPublished: 2023\n"));
        assert!(details.contains(&format!("Rating & Reviews\n{NO_RATINGS}")));
        assert!(details.ends_with(
            "Search on Google: https://www.google.com/search?q=Test+Book+Test+Author\n\
             View on Open Library: https://openlibrary.org/search?q=Test+Book"
        ));
    }

    #[test]
    fn empty_lists_have_placeholders() {
        assert_eq!(NO_BOOKS, book_list(&[]));
        assert_eq!(NO_REVIEWS, reviews(&[]));
    }
}
