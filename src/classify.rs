//! Character classifier: octet-level predicates used throughout the parser.
//!
//! Everything here operates on raw bytes, not `char`. Addresses are octet
//! sequences, not Unicode text (see `DESIGN.md`); a byte outside `0..=127`
//! is never valid in any of the contexts the parser recognizes.

use abnf_core::streaming::{is_ALPHA, is_DIGIT};
use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::one_of,
    combinator::{eof, recognize},
    multi::count,
    sequence::{preceded, tuple},
    IResult,
};

/// atext = ALPHA / DIGIT / "!" / "#" / "$" / "%" / "&" / "'" / "*" / "+" /
///         "-" / "/" / "=" / "?" / "^" / "_" / "`" / "{" / "|" / "}" / "~"
pub fn is_atext(byte: u8) -> bool {
    const ALLOWED: &[u8] = b"!#$%&'*+-/=?^_`{|}~";
    is_ALPHA(byte) || is_DIGIT(byte) || ALLOWED.contains(&byte)
}

/// specials = "(" / ")" / "<" / ">" / "[" / "]" / ":" / ";" / "@" / "\" /
///            "," / "." / DQUOTE
pub fn is_specials(byte: u8) -> bool {
    br#"()<>[]:;@\,."#.contains(&byte) || byte == b'"'
}

/// US-ASCII control characters that do not include CR, LF, or whitespace.
///
/// obs-NO-WS-CTL = %d1-8 / %d11 / %d12 / %d14-31 / %d127
pub fn is_obs_no_ws_ctl(byte: u8) -> bool {
    matches!(byte, 1..=8 | 11 | 12 | 14..=31 | 127)
}

/// qtext = %d33 / %d35-91 / %d93-126 (excludes "\" and the quote char)
pub fn is_qtext(byte: u8) -> bool {
    matches!(byte, 33 | 35..=91 | 93..=126)
}

/// ctext = %d33-39 / %d42-91 / %d93-126 (excludes "(", ")", "\")
pub fn is_ctext(byte: u8) -> bool {
    matches!(byte, 33..=39 | 42..=91 | 93..=126)
}

/// dtext = %d33-90 / %d94-126 (excludes "[", "]", "\")
pub fn is_dtext(byte: u8) -> bool {
    matches!(byte, 33..=90 | 94..=126)
}

/// VCHAR = %d33-126
pub fn is_vchar(byte: u8) -> bool {
    matches!(byte, 33..=126)
}

/// WSP = SP / HTAB
pub fn is_wsp(byte: u8) -> bool {
    byte == b' ' || byte == b'\t'
}

/// Snum = "25" %x30-35 / "2" %x30-34 DIGIT / ["1"] DIGIT [DIGIT]
///
/// Representing a decimal integer value in the range 0 through 255.
fn snum(input: &str) -> IResult<&str, &str> {
    alt((
        recognize(preceded(tag("25"), one_of("012345"))),
        recognize(tuple((tag("2"), one_of("01234"), one_of("0123456789")))),
        recognize(tuple((
            nom::combinator::opt(tag("1")),
            one_of("0123456789"),
            nom::combinator::opt(one_of("0123456789")),
        ))),
    ))(input)
}

/// IPv4-address-literal = Snum 3("." Snum), anchored to the end of `input`.
fn ipv4_dotted_quad(input: &str) -> IResult<&str, &str> {
    recognize(tuple((snum, count(preceded(tag("."), snum), 3), eof)))(input)
}

/// Finds the trailing IPv4 dotted quad in `input`, if any, anchored to the
/// end of the string. Returns the byte offset where the match begins.
///
/// Mirrors the "search the tail of the literal for an embedded IPv4
/// address" strategy the post-parse validator uses when analysing a
/// domain literal that may be `IPv6:...:a.b.c.d`.
pub fn trailing_ipv4(input: &str) -> Option<usize> {
    for (start, _) in input.char_indices() {
        if start > 0 && !matches!(input.as_bytes()[start - 1], b'.' | b':') {
            continue;
        }
        if ipv4_dotted_quad(&input[start..]).is_ok() {
            return Some(start);
        }
    }
    None
}

/// Matches `^[0-9A-Fa-f]{0,4}$`, the shape of one colon-delimited group in
/// an IPv6 literal. Empty groups occur wherever a literal contains "::".
pub fn is_ipv6_group(group: &str) -> bool {
    group.len() <= 4 && group.bytes().all(|b| b.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_atext() {
        assert!(is_atext(b'a'));
        assert!(is_atext(b'9'));
        assert!(is_atext(b'!'));
        assert!(!is_atext(b'@'));
        assert!(!is_atext(b' '));
    }

    #[test]
    fn finds_trailing_ipv4() {
        assert_eq!(trailing_ipv4("1.2.3.4"), Some(0));
        assert_eq!(trailing_ipv4("IPv6:::1.2.3.4"), Some(7));
        assert_eq!(trailing_ipv4("IPv6:1::2"), None);
        assert_eq!(trailing_ipv4("256.1.1.1"), None);
    }

    #[test]
    fn classifies_ipv6_groups() {
        assert!(is_ipv6_group("ab12"));
        assert!(is_ipv6_group(""));
        assert!(!is_ipv6_group("abcde"));
        assert!(!is_ipv6_group("g123"));
    }
}
