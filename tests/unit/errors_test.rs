use linkboard::types::errors::*;
use rstest::rstest;

// === BoardError Display ===

/// Each board error renders a readable message.
#[test]
fn board_error_display_variants() {
    assert_eq!(BoardError::EmptyName.to_string(), "Section name cannot be empty");
    assert_eq!(
        BoardError::DuplicateName("Work".to_string()).to_string(),
        "Section name already exists: Work"
    );
    assert_eq!(
        BoardError::InvalidColor("plaid".to_string()).to_string(),
        "Invalid color: plaid"
    );
    assert_eq!(BoardError::SectionNotFound(7).to_string(), "Section not found: 7");
    assert_eq!(BoardError::LinkNotFound(9).to_string(), "Link not found: 9");
    assert_eq!(BoardError::EmptyTitle.to_string(), "Title cannot be empty");
    assert_eq!(
        BoardError::DuplicateUrl("https://a.io/".to_string()).to_string(),
        "Link url already exists in section: https://a.io/"
    );
    assert_eq!(
        BoardError::InvalidInput("nothing usable".to_string()).to_string(),
        "Invalid input: nothing usable"
    );
}

/// Board errors work as `std::error::Error` trait objects.
#[test]
fn board_error_implements_error_trait() {
    let err: Box<dyn std::error::Error> = Box::new(BoardError::SectionNotFound(1));
    assert!(err.source().is_none());
}

// === Kinds ===

/// Each board error maps to its error kind.
#[rstest]
#[case(BoardError::EmptyName, ErrorKind::InvalidInput)]
#[case(BoardError::EmptyTitle, ErrorKind::InvalidInput)]
#[case(BoardError::InvalidUrl("x".into()), ErrorKind::InvalidInput)]
#[case(BoardError::InvalidInput("x".into()), ErrorKind::InvalidInput)]
#[case(BoardError::SectionNotFound(1), ErrorKind::NotFound)]
#[case(BoardError::LinkNotFound(1), ErrorKind::NotFound)]
#[case(BoardError::DuplicateName("x".into()), ErrorKind::Conflict)]
#[case(BoardError::DuplicateUrl("x".into()), ErrorKind::Conflict)]
#[case(BoardError::InvalidColor("x".into()), ErrorKind::InvalidColor)]
#[case(BoardError::Database("x".into()), ErrorKind::Internal)]
#[case(BoardError::Internal("x".into()), ErrorKind::Internal)]
fn board_error_kind(#[case] err: BoardError, #[case] expected: ErrorKind) {
    assert_eq!(err.kind(), expected);
}

/// Store errors convert to `BoardError::Database`.
#[test]
fn rusqlite_errors_become_database_errors() {
    let err: BoardError = rusqlite::Error::QueryReturnedNoRows.into();
    assert!(matches!(err, BoardError::Database(_)));
    assert_eq!(err.kind(), ErrorKind::Internal);
}

/// A UNIQUE constraint failure is recognised, other failures are not.
#[test]
fn unique_violation_is_detected() {
    let conn = rusqlite::Connection::open_in_memory().unwrap();
    conn.execute_batch("CREATE TABLE t (v TEXT UNIQUE); INSERT INTO t VALUES ('a');")
        .unwrap();
    let err = conn.execute("INSERT INTO t VALUES ('a')", []).unwrap_err();
    assert!(is_unique_violation(&err));
    assert!(!is_unique_violation(&rusqlite::Error::QueryReturnedNoRows));
}

// === SettingsError ===

/// Each settings error renders a readable message.
#[test]
fn settings_error_display_variants() {
    assert_eq!(
        SettingsError::IoError("disk full".to_string()).to_string(),
        "Settings I/O error: disk full"
    );
    assert_eq!(
        SettingsError::SerializationError("bad json".to_string()).to_string(),
        "Settings serialization error: bad json"
    );
    assert_eq!(
        SettingsError::InvalidValue("LINKBOARD_UNIQUE_URLS=maybe".to_string()).to_string(),
        "Invalid settings value: LINKBOARD_UNIQUE_URLS=maybe"
    );
}
