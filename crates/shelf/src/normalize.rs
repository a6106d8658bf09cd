//! Mapping of raw Google Books volumes into [`Book`]s.
//!
//! The provider's JSON is not trusted to match any schema: every field is read through a total
//! accessor and a field with the wrong type is treated the same as a missing one.
use serde_json::{Map, Value};

use crate::model::{Book, UNKNOWN_AUTHOR, UNKNOWN_TITLE};

type Object = Map<String, Value>;

/// Converts one raw volume into a [`Book`].
///
/// Never fails: absent optional fields stay unset and absent required fields fall back to
/// [`UNKNOWN_TITLE`] and [`UNKNOWN_AUTHOR`]. A volume without an id produces a [`Book`] with an
/// empty id, which callers are expected to reject.
#[must_use]
pub fn normalize_volume(volume: &Object) -> Book {
    let empty = Object::new();
    let info = object(volume, "volumeInfo").unwrap_or(&empty);

    Book {
        id: string(volume, "id").unwrap_or_default().to_owned(),
        title: non_empty_string(info, "title")
            .unwrap_or(UNKNOWN_TITLE)
            .to_owned(),
        author: array(info, "authors")
            .and_then(|authors| authors.first())
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .unwrap_or(UNKNOWN_AUTHOR)
            .to_owned(),
        published_year: string(info, "publishedDate").map(published_year),
        cover_image: object(info, "imageLinks")
            .and_then(|links| string(links, "thumbnail"))
            .map(|url| url.replacen("http:", "https:", 1)),
        description: string(info, "description").map(str::to_owned),
        isbn: array(info, "industryIdentifiers").and_then(|ids| preferred_isbn(ids)),
        publisher: string(info, "publisher").map(str::to_owned),
        rating: info.get("averageRating").and_then(Value::as_f64),
        ratings_count: info.get("ratingsCount").and_then(Value::as_u64),
    }
}

/// Picks the ISBN from a list of `industryIdentifiers`.
///
/// The first `ISBN_13` entry wins regardless of where it appears in the list, then the first
/// `ISBN_10` entry.
#[must_use]
pub fn preferred_isbn(identifiers: &[Value]) -> Option<String> {
    let find = |kind: &str| {
        identifiers
            .iter()
            .filter_map(Value::as_object)
            .find(|id| string(id, "type") == Some(kind))
            .and_then(|id| string(id, "identifier"))
            .map(str::to_owned)
    };

    find("ISBN_13").or_else(|| find("ISBN_10"))
}

// "2004-05-01" -> "2004". The segment is not checked to be a year.
fn published_year(date: &str) -> String {
    date.split('-').next().unwrap_or_default().to_owned()
}

fn string<'a>(obj: &'a Object, key: &str) -> Option<&'a str> {
    obj.get(key).and_then(Value::as_str)
}

fn non_empty_string<'a>(obj: &'a Object, key: &str) -> Option<&'a str> {
    string(obj, key).filter(|s| !s.is_empty())
}

fn object<'a>(obj: &'a Object, key: &str) -> Option<&'a Object> {
    obj.get(key).and_then(Value::as_object)
}

fn array<'a>(obj: &'a Object, key: &str) -> Option<&'a Vec<Value>> {
    obj.get(key).and_then(Value::as_array)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn normalize(value: Value) -> Book {
        normalize_volume(value.as_object().expect("test volumes are objects"))
    }

    #[test]
    fn full_volume_is_mapped_to_book() {
        let json = include_str!("../../../tests/data/google_books_volume.json");
        let volume: Value = serde_json::from_str(json).unwrap();
        let book = normalize(volume);

        assert_eq!("QVn-CgAAQBAJ", book.id);
        assert_eq!("Code Complete", book.title);
        assert_eq!("Steve McConnell", book.author);
        assert_eq!(Some("2004"), book.published_year.as_deref());
        assert_eq!(
            Some("https://books.google.com/books/content?id=QVn-CgAAQBAJ&printsec=frontcover&img=1&zoom=1&source=gbs_api"),
            book.cover_image.as_deref()
        );
        assert_eq!(Some("9780735619678"), book.isbn.as_deref());
        assert_eq!(Some("Microsoft Press"), book.publisher.as_deref());
        assert_eq!(Some(4.5), book.rating);
        assert_eq!(Some(142), book.ratings_count);
        assert!(book.description.is_some());
    }

    #[test]
    fn missing_title_and_authors_fall_back_to_defaults() {
        for volume in [
            json!({ "id": "a" }),
            json!({ "id": "a", "volumeInfo": {} }),
            json!({ "id": "a", "volumeInfo": { "title": "", "authors": [] } }),
            json!({ "id": "a", "volumeInfo": { "title": null, "authors": null } }),
            json!({ "id": "a", "volumeInfo": { "title": 42, "authors": "Frank Herbert" } }),
            json!({ "id": "a", "volumeInfo": "not an object" }),
        ] {
            let book = normalize(volume);
            assert_eq!(UNKNOWN_TITLE, book.title);
            assert_eq!(UNKNOWN_AUTHOR, book.author);
        }
    }

    #[test]
    fn only_first_author_is_kept() {
        let book = normalize(json!({
            "id": "a",
            "volumeInfo": { "authors": ["Terry Pratchett", "Neil Gaiman"] }
        }));
        assert_eq!("Terry Pratchett", book.author);
    }

    #[test]
    fn optional_fields_stay_unset_when_absent() {
        let book = normalize(json!({ "id": "a", "volumeInfo": { "title": "Dune" } }));
        assert_eq!(
            Book {
                id: "a".to_owned(),
                title: "Dune".to_owned(),
                author: UNKNOWN_AUTHOR.to_owned(),
                ..Book::default()
            },
            book
        );
    }

    #[test]
    fn published_year_is_first_date_segment() {
        let year = |date: &str| {
            normalize(json!({ "id": "a", "volumeInfo": { "publishedDate": date } })).published_year
        };
        assert_eq!(Some("1965".to_owned()), year("1965-08-01"));
        assert_eq!(Some("1965".to_owned()), year("1965"));
        // passed through without validation
        assert_eq!(Some("circa 1965".to_owned()), year("circa 1965"));
    }

    #[test]
    fn http_cover_is_rewritten_to_https() {
        let cover = |url: &str| {
            normalize(json!({
                "id": "a",
                "volumeInfo": { "imageLinks": { "thumbnail": url } }
            }))
            .cover_image
        };
        assert_eq!(
            Some("https://books.google.com/cover?a=http:".to_owned()),
            cover("http://books.google.com/cover?a=http:")
        );
        assert_eq!(
            Some("https://books.google.com/cover".to_owned()),
            cover("https://books.google.com/cover")
        );

        let book = normalize(json!({ "id": "a", "volumeInfo": { "imageLinks": {} } }));
        assert_eq!(None, book.cover_image);
    }

    #[test]
    fn isbn_13_is_preferred_in_any_order() {
        let isbn_13 = json!({ "type": "ISBN_13", "identifier": "9780441013593" });
        let isbn_10 = json!({ "type": "ISBN_10", "identifier": "0441013597" });
        let other = json!({ "type": "OTHER", "identifier": "UOM:39015" });

        for ids in [
            vec![isbn_13.clone(), isbn_10.clone()],
            vec![isbn_10.clone(), isbn_13.clone()],
            vec![other.clone(), isbn_10.clone(), isbn_13.clone()],
        ] {
            assert_eq!(Some("9780441013593".to_owned()), preferred_isbn(&ids));
        }

        assert_eq!(
            Some("0441013597".to_owned()),
            preferred_isbn(&[other.clone(), isbn_10])
        );
        assert_eq!(None, preferred_isbn(&[other]));
        assert_eq!(None, preferred_isbn(&[json!("ISBN_13"), json!(null)]));
    }

    #[test]
    fn zero_rating_is_kept() {
        let book = normalize(json!({
            "id": "a",
            "volumeInfo": { "averageRating": 0, "ratingsCount": 0 }
        }));
        assert_eq!(Some(0.0), book.rating);
        assert_eq!(Some(0), book.ratings_count);
    }

    #[test]
    fn missing_id_yields_empty_id() {
        let book = normalize(json!({ "volumeInfo": { "title": "Dune" } }));
        assert!(book.id.is_empty());
    }
}
