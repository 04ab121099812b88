//! RFC 5321 / RFC 5322 email address parsing and diagnosis.
//!
//! The entry point is [`is_email`]: it runs the address through a
//! single-pass octet-level parser (see `parser`), reduces whatever it
//! observed to the worst [`Diagnosis`], and optionally consults the DNS and
//! gTLD collaborators described in the crate's design notes. Everything the
//! parser can say about an address lives in `isemail-types`; this crate
//! only knows how to produce one.

mod classify;
mod context;
#[cfg(feature = "dns")]
pub mod dns;
mod gtld;
mod literal;
mod parser;
mod validate;

pub use isemail_types::{Category, Diagnosis, Kind};

/// Escapes a raw octet sequence for display, e.g. in CLI diagnostics.
/// Printable ASCII passes through; everything else becomes `\xHH` (with
/// `\t`/`\r`/`\\` as the customary two-character escapes).
pub fn escape(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|byte| match byte {
            0x09 => String::from("\\t"),
            0x0d => String::from("\\r"),
            0x5c => String::from("\\\\"),
            0x20..=0x7e => (*byte as char).to_string(),
            _ => format!("\\x{byte:02x}"),
        })
        .collect()
}

/// Checks that `address` conforms to RFC 5321 / RFC 5322, returning the
/// worst [`Diagnosis`] observed.
///
/// `check_dns` and `allow_gtld` gate the optional collaborators in §6.3;
/// both require the `dns` feature (`allow_gtld = false` still only needs
/// the gTLD check, which has no DNS dependency, but both are grouped
/// behind `dns` to keep the feature story simple).
pub fn parse(address: &[u8]) -> Diagnosis {
    let state = parser::parse(address);
    state.worst()
}

/// The boolean form of [`parse`]: `true` iff the worst diagnosis's code is
/// below [`Category::THRESHOLD`].
pub fn is_valid(address: &[u8]) -> bool {
    parse(address).code() < Category::THRESHOLD
}

#[cfg(feature = "dns")]
pub async fn is_email(address: &[u8], check_dns: bool, allow_gtld: bool) -> Diagnosis {
    let mut diagnosis = parse(address);
    let mut threshold = Category::THRESHOLD;

    if diagnosis.code() < Category::DnsWarn as u8 && (check_dns || !allow_gtld) {
        threshold = Category::Valid as u8;

        let domain = domain_part(address);

        if check_dns {
            diagnosis = diagnosis.max(dns::check(domain).await);
        }
        if !allow_gtld {
            diagnosis = diagnosis.max(gtld::check(domain));
        }
    }

    if diagnosis.code() < threshold {
        Diagnosis::VALID
    } else {
        diagnosis
    }
}

#[cfg(feature = "dns")]
fn domain_part(address: &[u8]) -> &str {
    let at = address.iter().rposition(|&b| b == b'@').map_or(0, |i| i + 1);
    std::str::from_utf8(&address[at..]).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use isemail_types::Kind;

    #[test]
    fn accepts_a_plain_address() {
        assert_eq!(parse(b"test@example.com"), Diagnosis::VALID);
        assert!(is_valid(b"test@example.com"));
    }

    #[test]
    fn rejects_missing_at_sign() {
        assert!(!is_valid(b"not-an-address"));
    }

    #[test]
    fn flags_double_dot_local_part() {
        let diagnosis = parse(b"john..doe@example.com");
        assert_eq!(diagnosis.kind, Kind::ErrConsecutiveDots);
    }

    #[test]
    fn flags_quoted_string_local_part() {
        let diagnosis = parse(br#""john doe"@example.com"#);
        assert_eq!(diagnosis.kind, Kind::Rfc5321QuotedString);
    }

    #[test]
    fn accepts_ipv4_address_literal() {
        let diagnosis = parse(b"test@[192.168.1.1]");
        assert_eq!(diagnosis.kind, Kind::Rfc5321AddressLiteral);
    }

    #[test]
    fn rejects_unclosed_domain_literal() {
        let diagnosis = parse(b"test@[192.168.1.1");
        assert_eq!(diagnosis.kind, Kind::ErrUnclosedDomlit);
    }

    #[test]
    fn flags_overlong_local_part() {
        let local = "a".repeat(65);
        let address = format!("{local}@example.com");
        assert_eq!(parse(address.as_bytes()).kind, Kind::Rfc5322LocalTooLong);
    }

    #[test]
    fn escapes_control_bytes() {
        assert_eq!(escape(b"a\tb"), "a\\tb");
        assert_eq!(escape(&[0x01]), "\\x01");
    }
}
