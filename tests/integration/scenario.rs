//! End-to-end walk through the three-document example corpus.
//!
//! ```text
//! 1: "hello, my name is BATMAN!"
//! 2: "I have come to save Gotham!"
//! 3: "What is your name"
//! ```

use fastsearch::{Cursor, IndexError, Position};

use crate::common::{positions, scenario_index};

#[test]
fn test_find_present_and_absent() {
    let index = scenario_index();
    assert_eq!(index.find("name", Position::new(1, 2)).unwrap(), Position::new(1, 2));

    let err = index.find("name", Position::new(1, 3)).unwrap_err();
    assert!(err.is_not_found());
    assert!(matches!(err, IndexError::NotFound { .. }));
}

#[test]
fn test_neighbours() {
    let index = scenario_index();
    assert_eq!(index.previous("name", Position::new(1, 3)), Cursor::at(1, 2));
    assert_eq!(index.next("my", Position::new(1, 1)), Cursor::Eof);
    assert_eq!(index.next("name", Position::new(1, 2)), Cursor::at(3, 3));
    assert_eq!(index.next("name", Cursor::Bof), Cursor::at(1, 2));
    assert_eq!(index.previous("name", Cursor::Eof), Cursor::at(3, 3));
    assert_eq!(index.previous("hello", Position::new(1, 0)), Cursor::Bof);
    assert_eq!(index.next("gotham", Cursor::Bof), Cursor::at(2, 5));
}

#[test]
fn test_walk_whole_list() {
    let index = scenario_index();
    let mut seen = Vec::new();
    let mut cursor = index.next("is", Cursor::Bof);
    while let Some(p) = cursor.position() {
        seen.push(p);
        cursor = index.next("is", p);
    }
    assert_eq!(seen, positions(&[(1, 3), (3, 1)]));

    // And back again.
    let mut back = Vec::new();
    let mut cursor = index.previous("is", Cursor::Eof);
    while let Some(p) = cursor.position() {
        back.push(p);
        cursor = index.previous("is", p);
    }
    back.reverse();
    assert_eq!(back, seen);
}

#[test]
fn test_phrase_your_name() {
    let index = scenario_index();
    let found = index.next_phrase(&["your", "name"], Cursor::Bof).unwrap();
    assert_eq!(found, positions(&[(3, 2), (3, 3)]));
    assert!(index
        .next_phrase(&["your", "name"], Position::new(3, 2))
        .unwrap()
        .is_empty());
    // "name is" occurs in doc 1 only; doc 3 has "is your name".
    assert_eq!(
        index.all_phrases(&["name", "is"]).unwrap(),
        vec![positions(&[(1, 2), (1, 3)])]
    );
}

#[test]
fn test_cover_my_batman() {
    let index = scenario_index();
    let cover = index.next_cover(&["my", "batman"], Cursor::Bof).unwrap();
    assert_eq!(cover, positions(&[(1, 1), (1, 4)]));
    assert!(index.next_cover(&["my", "batman"], Position::new(1, 1)).unwrap().is_empty());
}

#[test]
fn test_rank_queries() {
    let index = scenario_index();
    assert_eq!(index.rank_proximity("My BATMAN", 10).unwrap(), vec![1]);
    // Doc 1 has "name is" adjacent; doc 3 has them two apart.
    assert_eq!(index.rank_proximity("is name", 10).unwrap(), vec![1, 3]);
    assert!(matches!(index.rank_proximity("?!", 10), Err(IndexError::EmptyQuery)));
}

#[test]
fn test_unknown_terms() {
    let index = scenario_index();
    assert_eq!(index.next("robin", Cursor::Bof), Cursor::Eof);
    assert_eq!(index.previous("robin", Cursor::Eof), Cursor::Bof);
    assert!(index.next_phrase(&["robin", "name"], Cursor::Bof).unwrap().is_empty());
    assert!(index.rank_proximity("robin", 5).unwrap().is_empty());
}
