mod common;

use common::credential;
use wrappedcli::types::TermWindow;

#[test]
fn test_term_window_wire_values() {
    assert_eq!(TermWindow::Recent.wire_value(), "short_term");
    assert_eq!(TermWindow::Medium.wire_value(), "medium_term");
    assert_eq!(TermWindow::Long.wire_value(), "long_term");
}

#[test]
fn test_term_window_parses_only_the_three_wire_literals() {
    assert_eq!(TermWindow::from_wire("short_term"), Some(TermWindow::Recent));
    assert_eq!(TermWindow::from_wire("medium_term"), Some(TermWindow::Medium));
    assert_eq!(TermWindow::from_wire("long_term"), Some(TermWindow::Long));

    assert_eq!(TermWindow::from_wire("weekly"), None);
    assert_eq!(TermWindow::from_wire(""), None);
    assert_eq!(TermWindow::from_wire("Short_Term"), None);
    assert_eq!(TermWindow::from_wire("recent"), None);
}

#[test]
fn test_term_window_roundtrips_through_wire_values() {
    for term in TermWindow::ALL {
        assert_eq!(TermWindow::from_wire(term.wire_value()), Some(term));
    }
}

#[test]
fn test_credential_expiry_boundary() {
    let cred = credential("alice", 1_000);

    assert!(!cred.is_expired(999));
    // expires_at == now counts as expired
    assert!(cred.is_expired(1_000));
    assert!(cred.is_expired(1_001));
}
