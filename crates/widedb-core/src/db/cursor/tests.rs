use crate::{
    db::{
        cursor::{
            CursorError, CursorSignature, CursorToken, PageCursor, TextCursor, TimeCursor,
            token::MAX_CURSOR_TOKEN_BYTES, validate_page_size_max,
        },
        direction::Direction,
        query::{Predicates, ViewModel, ViewOrder},
    },
    types::Ulid,
};

const BY_KIND: ViewModel = ViewModel::new("thing_by_kind", &["kind"], ViewOrder::SearchText);

fn signature(kind: &str) -> CursorSignature {
    CursorSignature::compute(&BY_KIND, &Predicates::new().eq("kind", kind))
}

#[test]
fn zero_page_size_is_rejected() {
    let err = TextCursor::first(0).expect_err("page size 0 should fail");
    assert!(matches!(
        err,
        CursorError::InvalidPageSize { page_size: 0, .. }
    ));

    let err = TimeCursor::first(0, true).expect_err("page size 0 should fail");
    assert!(matches!(
        err,
        CursorError::InvalidPageSize { page_size: 0, .. }
    ));
}

#[test]
fn page_size_above_configured_max_is_rejected() {
    assert!(validate_page_size_max(10, 10).is_ok());
    assert!(matches!(
        validate_page_size_max(11, 10),
        Err(CursorError::InvalidPageSize {
            page_size: 11,
            max: 10
        })
    ));
}

#[test]
fn text_search_prefix_is_lowercased_and_bounded() {
    let cursor = TextCursor::first(5)
        .expect("cursor")
        .with_text_search("MaiL");

    assert_eq!(cursor.text_search(), Some("mail"));
    assert_eq!(cursor.text_search_bound().as_deref(), Some("maim"));
}

#[test]
fn empty_text_search_means_no_filter() {
    let cursor = TextCursor::first(5).expect("cursor").with_text_search("");

    assert_eq!(cursor.text_search(), None);
    assert_eq!(cursor.text_search_bound(), None);
}

#[test]
fn prefix_bound_skips_trailing_max_chars() {
    let cursor = TextCursor::first(5)
        .expect("cursor")
        .with_text_search("a\u{10FFFF}");
    assert_eq!(cursor.text_search_bound().as_deref(), Some("b"));

    let cursor = TextCursor::first(5)
        .expect("cursor")
        .with_text_search("\u{10FFFF}\u{10FFFF}");
    assert_eq!(cursor.text_search_bound(), None);
}

#[test]
fn next_text_cursor_carries_prefix_and_page_size() {
    let id = Ulid::from_parts(5, 1);
    let cursor = TextCursor::first(3)
        .expect("cursor")
        .with_text_search("ma");
    let next = cursor.next_after("mail".to_string(), id);

    assert_eq!(next.page_size(), 3);
    assert_eq!(next.text_search(), Some("ma"));
    assert_eq!(next.text_offset(), Some("mail"));
    assert_eq!(next.id_offset(), Some(id));
}

#[test]
fn next_time_cursor_keeps_bounds_and_direction() {
    let id = Ulid::from_parts(50, 1);
    let cursor = TimeCursor::new(Some(10), Some(100), None, 4, false).expect("cursor");
    let next = cursor.next_after(id);

    assert_eq!(next.start_ms(), Some(10));
    assert_eq!(next.end_ms(), Some(100));
    assert_eq!(next.id_offset(), Some(id));
    assert_eq!(next.direction(), Direction::Desc);
}

#[test]
fn token_decodes_to_the_encoded_cursor() {
    let cursor = PageCursor::from(
        TimeCursor::new(Some(1), None, Some(Ulid::from_parts(7, 7)), 20, true).expect("cursor"),
    );
    let token = CursorToken::new(signature("a"), cursor.clone());

    let bytes = token.encode().expect("encode");
    let decoded = CursorToken::decode(&bytes).expect("decode");

    assert_eq!(decoded, token);
    assert_eq!(decoded.verify(signature("a")).expect("verify"), cursor);
}

#[test]
fn decoded_text_cursor_is_normalized() {
    let raw = TextCursor {
        page_size: 2,
        text_search: Some("MAIL".to_string()),
        text_offset: None,
        id_offset: None,
    };
    let bytes = CursorToken::new(signature("a"), raw.into())
        .encode()
        .expect("encode");

    let cursor = CursorToken::decode(&bytes)
        .expect("decode")
        .verify(signature("a"))
        .expect("verify");
    let PageCursor::Text(cursor) = cursor else {
        panic!("expected a text cursor");
    };
    assert_eq!(cursor.text_search(), Some("mail"));
    assert_eq!(cursor.text_search_bound().as_deref(), Some("maim"));

    let blank = TextCursor {
        page_size: 2,
        text_search: Some(String::new()),
        text_offset: None,
        id_offset: None,
    };
    let bytes = CursorToken::new(signature("a"), blank.into())
        .encode()
        .expect("encode");
    let PageCursor::Text(cursor) = CursorToken::decode(&bytes).expect("decode").into_cursor()
    else {
        panic!("expected a text cursor");
    };
    assert_eq!(cursor.text_search(), None);
}

#[test]
fn decoded_cursor_with_zero_page_size_is_rejected() {
    let text = TextCursor {
        page_size: 0,
        text_search: None,
        text_offset: None,
        id_offset: None,
    };
    let bytes = CursorToken::new(signature("a"), text.into())
        .encode()
        .expect("encode");
    let err = CursorToken::decode(&bytes).expect_err("page size 0 should fail");
    assert!(matches!(err, CursorError::InvalidToken { .. }));

    let time = TimeCursor {
        page_size: 0,
        start_ms: None,
        end_ms: None,
        id_offset: None,
        direction: Direction::Asc,
    };
    let bytes = CursorToken::new(signature("a"), time.into())
        .encode()
        .expect("encode");
    let err = CursorToken::decode(&bytes).expect_err("page size 0 should fail");
    assert!(matches!(err, CursorError::InvalidToken { .. }));
}

#[test]
fn token_for_another_filter_is_rejected() {
    let token = CursorToken::new(
        signature("a"),
        TextCursor::first(2).expect("cursor").into(),
    );
    let decoded = CursorToken::decode(&token.encode().expect("encode")).expect("decode");

    let err = decoded
        .verify(signature("b"))
        .expect_err("signature should differ");
    assert!(matches!(err, CursorError::SignatureMismatch { .. }));
}

#[test]
fn token_with_unknown_version_is_rejected() {
    let token = CursorToken::new(
        signature("a"),
        TextCursor::first(2).expect("cursor").into(),
    );
    let bytes = token
        .encode_with_version_for_test(9)
        .expect("encode test token");

    let err = CursorToken::decode(&bytes).expect_err("version 9 should fail");
    assert!(matches!(err, CursorError::UnsupportedVersion { version: 9 }));
}

#[test]
fn garbled_and_oversized_tokens_are_rejected() {
    let err = CursorToken::decode(b"not a token").expect_err("garbage should fail");
    assert!(matches!(err, CursorError::InvalidToken { .. }));

    let oversized = vec![0_u8; MAX_CURSOR_TOKEN_BYTES + 1];
    let err = CursorToken::decode(&oversized).expect_err("oversized should fail");
    assert!(matches!(err, CursorError::InvalidToken { .. }));
}

#[test]
fn signature_depends_on_view_and_values() {
    const OTHER: ViewModel = ViewModel::new("other_view", &["kind"], ViewOrder::SearchText);
    let predicates = Predicates::new().eq("kind", "a");

    assert_eq!(signature("a"), signature("a"));
    assert_ne!(signature("a"), signature("b"));
    assert_ne!(
        CursorSignature::compute(&OTHER, &predicates),
        CursorSignature::compute(&BY_KIND, &predicates)
    );
}
