mod common;

use std::cell::Cell;

use common::{create_test_store, hotel_count, insert_hotel};
use travel_desk::{DeleteOutcome, HotelDraft, HotelError, HotelManager, Store, ValidationError};

fn fill(store: &Store, rows: usize) -> Vec<i64> {
    (1..=rows)
        .map(|n| insert_hotel(store, &format!("Hotel {n}"), 0))
        .collect()
}

fn draft(name: &str, stars: &str) -> HotelDraft {
    HotelDraft {
        name: name.to_string(),
        stars: stars.to_string(),
        country: "France".to_string(),
        description: "Sea view".to_string(),
    }
}

#[test]
fn twenty_five_rows_make_three_pages() {
    let (_dir, store) = create_test_store();
    fill(&store, 25);
    let mut manager = HotelManager::new(10);

    let first = manager.list(&store, 1).unwrap();
    assert_eq!(first.total_pages, 3);
    assert_eq!(first.total_rows, 25);
    assert_eq!(first.hotels.len(), 10);
    assert_eq!(first.hotels[0].name, "Hotel 1");

    let last = manager.list(&store, 3).unwrap();
    assert_eq!(last.hotels.len(), 5);
    assert_eq!(last.hotels[0].name, "Hotel 21");
    assert_eq!(manager.current_page(), 3);

    let err = manager.list(&store, 4).unwrap_err();
    assert!(matches!(
        err,
        HotelError::PageOutOfRange {
            page: 4,
            total_pages: 3
        }
    ));
    assert_eq!(manager.current_page(), 3);
}

#[test]
fn pages_partition_the_table() {
    let (_dir, store) = create_test_store();
    let ids = fill(&store, 23);
    let mut manager = HotelManager::new(4);

    let first = manager.list(&store, 1).unwrap();
    let mut seen: Vec<i64> = Vec::new();
    for page in 1..=first.total_pages {
        seen.extend(manager.list(&store, page).unwrap().hotels.iter().map(|h| h.id));
    }

    assert_eq!(seen, ids);
}

#[test]
fn empty_table_has_one_empty_page() {
    let (_dir, store) = create_test_store();
    let mut manager = HotelManager::default();

    let page = manager.list(&store, 1).unwrap();
    assert!(page.hotels.is_empty());
    assert_eq!(page.total_pages, 1);

    assert!(matches!(
        manager.list(&store, 0),
        Err(HotelError::PageOutOfRange { page: 0, .. })
    ));
    assert!(matches!(
        manager.next_page(&store),
        Err(HotelError::PageOutOfRange { page: 2, .. })
    ));
    assert_eq!(manager.current_page(), 1);
}

#[test]
fn next_and_previous_move_one_page() {
    let (_dir, store) = create_test_store();
    fill(&store, 12);
    let mut manager = HotelManager::new(5);
    manager.list(&store, 1).unwrap();

    assert_eq!(manager.next_page(&store).unwrap().page, 2);
    assert_eq!(manager.next_page(&store).unwrap().page, 3);
    assert!(manager.next_page(&store).unwrap_err().is_rejection());
    assert_eq!(manager.previous_page(&store).unwrap().page, 2);
    assert_eq!(manager.previous_page(&store).unwrap().page, 1);
    assert!(manager.previous_page(&store).is_err());
    assert_eq!(manager.current_page(), 1);
}

#[test]
fn invalid_drafts_never_touch_the_table() {
    let (_dir, store) = create_test_store();
    let mut manager = HotelManager::default();

    let cases = [
        (draft("", "3"), ValidationError::Blank { field: "Hotel name" }),
        (draft("Inn", " "), ValidationError::Blank { field: "Stars" }),
        (draft("Inn", "abc"), ValidationError::StarsNotInteger),
        (draft("Inn", "7"), ValidationError::StarsOutOfRange { stars: 7 }),
    ];
    for (input, expected) in cases {
        match manager.create(&store, &input) {
            Err(HotelError::Validation(err)) => assert_eq!(err, expected),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    assert_eq!(hotel_count(&store), 0);
}

#[test]
fn created_hotels_start_unreferenced() {
    let (_dir, store) = create_test_store();
    let mut manager = HotelManager::default();

    let page = manager.create(&store, &draft("  Seaside  ", "5")).unwrap();
    assert_eq!(page.total_rows, 1);

    let hotel = &page.hotels[0];
    assert_eq!(hotel.name, "Seaside");
    assert_eq!(hotel.stars, 5);
    assert_eq!(hotel.tours_count, 0);
}

#[test]
fn update_overwrites_fields_but_keeps_the_tour_link() {
    let (_dir, store) = create_test_store();
    let id = insert_hotel(&store, "Old name", 2);
    let mut manager = HotelManager::default();

    manager.update(&store, id, &draft("New name", "4")).unwrap();
    let hotel = manager.hotel(&store, id).unwrap();
    assert_eq!(hotel.name, "New name");
    assert_eq!(hotel.stars, 4);
    assert_eq!(hotel.country, "France");
    assert_eq!(hotel.tours_count, 2);

    assert!(matches!(
        manager.update(&store, id + 100, &draft("Ghost", "1")),
        Err(HotelError::NotFound { .. })
    ));
}

#[test]
fn referenced_hotels_are_refused_before_confirmation() {
    let (_dir, store) = create_test_store();
    let id = insert_hotel(&store, "Busy", 3);
    let mut manager = HotelManager::default();
    let asked = Cell::new(false);

    let err = manager
        .delete(&store, id, |_| {
            asked.set(true);
            true
        })
        .unwrap_err();

    assert!(matches!(
        err,
        HotelError::Referenced { tours_count: 3, .. }
    ));
    assert!(!asked.get());
    assert_eq!(hotel_count(&store), 1);
}

#[test]
fn declined_deletion_changes_nothing() {
    let (_dir, store) = create_test_store();
    let id = insert_hotel(&store, "Quiet", 0);
    let mut manager = HotelManager::default();

    let outcome = manager.delete(&store, id, |_| false).unwrap();
    assert_eq!(outcome, DeleteOutcome::Declined);
    assert_eq!(hotel_count(&store), 1);
}

#[test]
fn confirmed_deletion_removes_exactly_one_row() {
    let (_dir, store) = create_test_store();
    let ids = fill(&store, 3);
    let mut manager = HotelManager::default();

    let outcome = manager
        .delete(&store, ids[1], |hotel| hotel.name == "Hotel 2")
        .unwrap();

    let DeleteOutcome::Deleted(page) = outcome else {
        panic!("expected the hotel to be deleted");
    };
    assert_eq!(page.total_rows, 2);
    assert_eq!(hotel_count(&store), 2);
    assert!(matches!(
        manager.hotel(&store, ids[1]),
        Err(HotelError::NotFound { .. })
    ));
}

#[test]
fn deleting_the_last_row_of_the_last_page_steps_back() {
    let (_dir, store) = create_test_store();
    let ids = fill(&store, 11);
    let mut manager = HotelManager::new(10);
    manager.list(&store, 2).unwrap();

    let outcome = manager.delete(&store, ids[10], |_| true).unwrap();
    let DeleteOutcome::Deleted(page) = outcome else {
        panic!("expected the hotel to be deleted");
    };

    assert_eq!(page.page, 1);
    assert_eq!(page.total_pages, 1);
    assert_eq!(manager.current_page(), 1);
}

#[test]
fn missing_hotel_cannot_be_deleted() {
    let (_dir, store) = create_test_store();
    let mut manager = HotelManager::default();

    assert!(matches!(
        manager.delete(&store, 42, |_| true),
        Err(HotelError::NotFound { id: 42 })
    ));
}

#[test]
fn invalid_updates_leave_the_row_untouched() {
    let (_dir, store) = create_test_store();
    let id = insert_hotel(&store, "Lakeside", 1);
    let mut manager = HotelManager::default();
    let before = manager.hotel(&store, id).unwrap();

    let blank_country = HotelDraft {
        country: "   ".to_string(),
        ..draft("Renamed", "4")
    };
    let cases = [
        (draft(" ", "4"), ValidationError::Blank { field: "Hotel name" }),
        (blank_country, ValidationError::Blank { field: "Country" }),
        (draft("Renamed", "abc"), ValidationError::StarsNotInteger),
        (draft("Renamed", "+3"), ValidationError::StarsNotInteger),
        (draft("Renamed", "6"), ValidationError::StarsOutOfRange { stars: 6 }),
        (draft("Renamed", "-1"), ValidationError::StarsOutOfRange { stars: -1 }),
    ];
    for (input, expected) in cases {
        match manager.update(&store, id, &input) {
            Err(HotelError::Validation(err)) => assert_eq!(err, expected),
            other => panic!("expected validation error, got {other:?}"),
        }
        assert_eq!(manager.hotel(&store, id).unwrap(), before);
    }

    assert_eq!(hotel_count(&store), 1);
}

#[test]
fn huge_page_size_lists_everything_on_one_page() {
    let (_dir, store) = create_test_store();
    fill(&store, 3);
    let mut manager = HotelManager::new(i64::MAX);

    let page = manager.list(&store, 1).unwrap();
    assert_eq!(page.total_pages, 1);
    assert_eq!(page.hotels.len(), 3);
    assert!(matches!(
        manager.next_page(&store),
        Err(HotelError::PageOutOfRange { page: 2, total_pages: 1 })
    ));
}
