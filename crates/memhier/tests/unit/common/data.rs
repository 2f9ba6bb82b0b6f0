//! # Access Type Tests

use memhier_core::common::AccessType;
use rstest::rstest;

#[rstest]
#[case('R', Some(AccessType::Read))]
#[case('r', Some(AccessType::Read))]
#[case('W', Some(AccessType::Write))]
#[case('w', Some(AccessType::Write))]
#[case('X', None)]
#[case(' ', None)]
fn from_char(#[case] c: char, #[case] expected: Option<AccessType>) {
    assert_eq!(AccessType::from_char(c), expected);
}

#[test]
fn write_classification() {
    assert!(AccessType::Write.is_write());
    assert!(!AccessType::Read.is_write());
    assert_eq!(AccessType::Read.as_char(), 'R');
    assert_eq!(AccessType::Write.as_char(), 'W');
}

#[test]
fn serializes_lowercase() {
    assert_eq!(serde_json::to_string(&AccessType::Write).unwrap(), "\"write\"");
}
