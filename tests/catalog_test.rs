//! Scenario tests for the library catalog.

use library_catalog::{BorrowOutcome, CatalogError, Library, OrderedIndex, Book};

fn ids(books: &[&Book]) -> Vec<u64> {
    books.iter().map(|b| b.id()).collect()
}

fn library_with(ids: &[u64]) -> Library {
    let mut library = Library::new();
    for &id in ids {
        library
            .insert_book(id, format!("Book{}", id), format!("Author{}", id))
            .unwrap();
    }
    library
}

#[test]
fn test_range_round_trip() {
    let input = [42, 7, 19, 88, 3, 61, 25, 14, 99, 50];
    let library = library_with(&input);

    let mut expected = input.to_vec();
    expected.sort_unstable();

    assert_eq!(ids(&library.books_in_range(3, 99)), expected);
    library.index().validate().unwrap();
}

#[test]
fn test_nearest_tie_on_both_sides() {
    let library = library_with(&[10, 20, 5, 25]);

    assert_eq!(ids(&library.closest_books(15)), vec![10, 20]);
}

#[test]
fn test_nearest_after_insertions() {
    let library = library_with(&[10, 20, 5, 15, 25]);

    assert_eq!(ids(&library.closest_books(12)), vec![10]);
    assert_eq!(ids(&library.closest_books(13)), vec![15]);
    assert_eq!(ids(&library.closest_books(22)), vec![20]);
    assert_eq!(ids(&library.closest_books(23)), vec![25]);
}

#[test]
fn test_priority_beats_arrival() {
    let mut library = library_with(&[1]);

    assert_eq!(
        library.borrow_book(1, 1, 2).unwrap(),
        BorrowOutcome::Borrowed { book_id: 1, patron_id: 1 }
    );
    assert_eq!(
        library.borrow_book(2, 1, 1).unwrap(),
        BorrowOutcome::Reserved { book_id: 1, patron_id: 2 }
    );

    let outcome = library.return_book(1, 1).unwrap();
    assert_eq!(outcome.returned_by, 1);
    assert_eq!(outcome.allotted_to, Some(2));
}

#[test]
fn test_equal_priority_is_first_come_first_served() {
    let mut library = library_with(&[1]);
    library.borrow_book(100, 1, 1).unwrap();
    library.borrow_book(200, 1, 3).unwrap(); // A
    library.borrow_book(300, 1, 3).unwrap(); // B

    assert_eq!(library.return_book(100, 1).unwrap().allotted_to, Some(200));
    assert_eq!(library.return_book(200, 1).unwrap().allotted_to, Some(300));
    assert_eq!(library.return_book(300, 1).unwrap().allotted_to, None);
    assert!(library.book(1).unwrap().is_available());
}

#[test]
fn test_delete_with_reservations() {
    let mut library = library_with(&[1, 2, 3]);
    library.borrow_book(10, 2, 1).unwrap();
    library.borrow_book(11, 2, 1).unwrap();
    library.borrow_book(12, 2, 1).unwrap();

    let deletion = library.delete_book(2).unwrap();
    assert_eq!(deletion.cancelled, vec![11, 12]);
    assert!(matches!(library.book(2), Err(CatalogError::BookNotFound(2))));
    assert_eq!(ids(&library.books_in_range(0, 10)), vec![1, 3]);
}

#[test]
fn test_return_of_available_book() {
    let mut library = library_with(&[4]);

    let outcome = library.return_book(9, 4).unwrap();
    assert_eq!(outcome.allotted_to, None);
    assert!(library.book(4).unwrap().is_available());
}

#[test]
fn test_reinsert_after_delete() {
    let mut library = library_with(&[1, 2, 3]);
    library.borrow_book(10, 2, 1).unwrap();
    library.delete_book(2).unwrap();

    library.insert_book(2, "Fresh", "Copy").unwrap();
    let book = library.book(2).unwrap();
    assert_eq!(book.title, "Fresh");
    assert!(book.is_available());
    assert!(book.reservations().is_empty());
}

#[test]
fn test_color_flips_monotonic_across_operations() {
    let mut library = Library::new();
    let mut last = 0;

    for id in [50, 20, 80, 10, 30, 70, 90, 5, 15, 25, 35, 1] {
        library.insert_book(id, "T", "A").unwrap();
        assert!(library.color_flip_count() >= last);
        last = library.color_flip_count();
    }
    for id in [20, 50, 1, 90, 35] {
        library.delete_book(id).unwrap();
        assert!(library.color_flip_count() >= last);
        last = library.color_flip_count();
    }
    library.index().validate().unwrap();
}

#[test]
fn test_index_allows_duplicates_below_library() {
    let mut index = OrderedIndex::new();
    index.insert(Book::new(1, "First", "A"));
    index.insert(Book::new(1, "Second", "A"));

    assert_eq!(index.len(), 2);
    assert_eq!(index.search(1).unwrap().title, "First");
}
