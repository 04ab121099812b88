//! Whole-crate scenario tests drawn from the address parser's testable
//! properties: concrete address -> diagnosis mappings that exercise more
//! than one module (parser, literal analysis, validator) at a time.

use isemail::{is_valid, parse};
use isemail_types::Kind;

#[test]
fn plain_address_is_valid() {
    assert_eq!(parse(b"test@example.com").kind, Kind::Valid);
    assert!(is_valid(b"test@example.com"));
}

#[test]
fn underscore_in_domain_is_rfc5322_only() {
    // "_" is atext but not ALPHA/DIGIT/hyphen, so it's allowed by RFC
    // 5322's broader atext but not a valid RFC 5321 sub-domain character.
    assert_eq!(parse(b"test@ex_ample.com").kind, Kind::Rfc5322Domain);
}

#[test]
fn quoted_local_part_is_rfc5321_curiosity() {
    assert_eq!(
        parse(br#""Joe Bloggs"@example.com"#).kind,
        Kind::Rfc5321QuotedString
    );
}

#[test]
fn leading_dot_in_local_part_is_fatal() {
    assert_eq!(parse(b".start@example.com").kind, Kind::ErrDotStart);
}

#[test]
fn trailing_dot_in_local_part_is_fatal() {
    assert_eq!(parse(b"end.@example.com").kind, Kind::ErrDotEnd);
}

#[test]
fn consecutive_dots_in_local_part_is_fatal() {
    assert_eq!(parse(b"a..b@example.com").kind, Kind::ErrConsecutiveDots);
}

#[test]
fn domain_starting_with_hyphen_is_fatal() {
    assert_eq!(parse(b"a@-bad.com").kind, Kind::ErrDomainHyphenStart);
}

#[test]
fn domain_ending_with_hyphen_is_fatal() {
    assert_eq!(parse(b"a@bad-.com").kind, Kind::ErrDomainHyphenEnd);
}

#[test]
fn overlong_address_is_flagged() {
    // local="a"*64 (not itself too long), '@', three labels of <=63
    // octets each (so no single label trips LABEL_TOOLONG) summing to a
    // 190-octet domain -> 64 + 1 + 190 = 255 total, over the 254 limit.
    let local = "a".repeat(64);
    let domain = format!("{}.{}.{}", "b".repeat(63), "b".repeat(63), "b".repeat(62));
    let address = format!("{local}@{domain}");
    assert_eq!(parse(address.as_bytes()).kind, Kind::Rfc5322TooLong);
}

#[test]
fn overlong_local_part_is_flagged() {
    let local = "a".repeat(65);
    let address = format!("{local}@example.com");
    assert_eq!(parse(address.as_bytes()).kind, Kind::Rfc5322LocalTooLong);
}

#[test]
fn overlong_domain_is_flagged() {
    // Five 60-octet labels (well under the 63-octet label limit) joined
    // by dots: 5*60 + 4 = 304 octets, over the domain's 255-octet limit.
    let label = "b".repeat(60);
    let domain = std::iter::repeat(label.as_str())
        .take(5)
        .collect::<Vec<_>>()
        .join(".");
    let address = format!("a@{domain}");
    assert_eq!(parse(address.as_bytes()).kind, Kind::Rfc5322DomainTooLong);
}

#[test]
fn domain_and_label_overlong_together_reports_domain_toolong() {
    // A single label of 300 octets is both a domain over 255 octets and a
    // label over 63 octets. The length checks are an elif chain off the
    // same decision, not three independent conditions, so only the first
    // match -- domain length -- is ever reported.
    let domain = "b".repeat(300);
    let address = format!("a@{domain}");
    assert_eq!(parse(address.as_bytes()).kind, Kind::Rfc5322DomainTooLong);
}

#[test]
fn quoted_string_followed_by_comment_near_at_is_deprecated() {
    assert_eq!(
        parse(br#""quoted string" (comment) @example.com"#).kind,
        Kind::DeprecCfwsNearAt
    );
}

#[test]
fn ipv4_address_literal_is_rfc5321_curiosity() {
    assert_eq!(
        parse(b"test@[192.168.1.1]").kind,
        Kind::Rfc5321AddressLiteral
    );
}

#[test]
fn unclosed_domain_literal_is_fatal() {
    assert_eq!(parse(b"test@[192.168.1.1").kind, Kind::ErrUnclosedDomlit);
}

#[test]
fn unclosed_quoted_string_is_fatal() {
    assert_eq!(parse(br#""test@example.com"#).kind, Kind::ErrUnclosedQuotedStr);
}

#[test]
fn unclosed_comment_is_fatal() {
    assert_eq!(parse(b"test(comment@example.com").kind, Kind::ErrUnclosedComment);
}

#[test]
fn bare_cr_without_lf_is_fatal() {
    assert_eq!(parse(b"test@exa\rmple.com").kind, Kind::ErrCrNoLf);
}

#[test]
fn leading_folded_whitespace_is_cfws() {
    // FWS right at the start of an element raises CFWS_FWS; since an
    // ordinary atext byte follows before the "@", context_prior is reset
    // before the "@" is reached and DEPREC_CFWS_NEAR_AT doesn't also fire.
    assert_eq!(parse(b" john@example.com").kind, Kind::CfwsFws);
}

#[test]
fn missing_at_sign_is_fatal() {
    assert_eq!(parse(b"not-an-address").kind, Kind::ErrNoDomain);
}

#[test]
fn empty_local_part_is_fatal() {
    assert_eq!(parse(b"@example.com").kind, Kind::ErrNoLocalPart);
}

#[test]
fn comment_in_local_part_is_cfws() {
    // A comment right before "@" leaves context_prior == Comment, which
    // itself raises DEPREC_CFWS_NEAR_AT. Put the comment at the start of
    // the element instead, with atext after it, so CFWS_COMMENT is the
    // only diagnosis raised.
    assert_eq!(parse(b"(comment)john@example.com").kind, Kind::CfwsComment);
}

#[test]
fn quoted_pair_in_comment_is_discarded_without_raising_qp() {
    // A quoted pair inside a comment is consumed and discarded, raising no
    // diagnosis of its own.
    assert_eq!(parse(b"(a\\b)john@example.com").kind, Kind::CfwsComment);
}
