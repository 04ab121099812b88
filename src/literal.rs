//! Address-literal analysis: what runs when the parser hits the closing
//! `]` of a domain literal, per RFC 5321 §4.1.3.
//!
//! Takes the raw bytes collected between `[` and `]` (exclusive) and
//! decides whether they look like an IPv4 literal, an `IPv6:`-tagged IPv6
//! literal, or neither.

use isemail_types::{Diagnosis, Kind};

use crate::classify;

pub(crate) fn analyze(literal: &[u8]) -> Vec<Diagnosis> {
    // The literal is built only from bytes the LITERAL context accepts
    // (dtext, plus escaped octets from quoted pairs), so this is always
    // ASCII and the lossy path is never actually taken.
    let literal = String::from_utf8_lossy(literal);
    let mut out = Vec::new();

    let mut rewritten;
    let body: &str = match classify::trailing_ipv4(&literal) {
        Some(0) => {
            out.push(Diagnosis::new(Kind::Rfc5321AddressLiteral));
            return out;
        }
        Some(start) => {
            rewritten = literal[..start].to_string();
            rewritten.push_str("0:0");
            &rewritten
        }
        None => &literal,
    };

    let Some(ipv6) = body.strip_prefix("IPv6:") else {
        out.push(Diagnosis::new(Kind::Rfc5322DomainLiteral));
        return out;
    };

    let groups: Vec<&str> = ipv6.split(':').collect();
    let grp_count = groups.len();
    let mut max_groups = 8usize;

    match find_double_colon(ipv6) {
        None => {
            if grp_count != max_groups {
                out.push(Diagnosis::new(Kind::Rfc5322Ipv6GrpCount));
            }
        }
        Some((first, last)) if first != last => {
            out.push(Diagnosis::new(Kind::Rfc5322Ipv62x2xColon));
        }
        Some((index, _)) => {
            if index == 0 || index == ipv6.len().saturating_sub(2) {
                max_groups += 1;
            }
            if grp_count > max_groups {
                out.push(Diagnosis::new(Kind::Rfc5322Ipv6MaxGrps));
            } else if grp_count == max_groups {
                out.push(Diagnosis::new(Kind::Rfc5321Ipv6Deprecated));
            }
        }
    }

    let bytes = ipv6.as_bytes();
    let starts_single_colon = bytes.first() == Some(&b':') && bytes.get(1) != Some(&b':');
    let ends_single_colon = bytes.len() >= 2
        && bytes.last() == Some(&b':')
        && bytes[bytes.len() - 2] != b':';

    if starts_single_colon {
        out.push(Diagnosis::new(Kind::Rfc5322Ipv6ColonStrt));
    } else if ends_single_colon {
        out.push(Diagnosis::new(Kind::Rfc5322Ipv6ColonEnd));
    } else if groups.iter().any(|group| !classify::is_ipv6_group(group)) {
        out.push(Diagnosis::new(Kind::Rfc5322Ipv6BadChar));
    } else {
        out.push(Diagnosis::new(Kind::Rfc5321AddressLiteral));
    }

    out
}

/// Returns the byte offsets of the first and last `"::"` occurrence in
/// `ipv6`, or `None` if it contains no `"::"` at all.
fn find_double_colon(ipv6: &str) -> Option<(usize, usize)> {
    let first = ipv6.find("::")?;
    let last = ipv6.rfind("::").unwrap();
    Some((first, last))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(literal: &str) -> Vec<Kind> {
        analyze(literal.as_bytes()).into_iter().map(|d| d.kind).collect()
    }

    #[test]
    fn plain_ipv4_is_address_literal() {
        assert_eq!(kinds("1.2.3.4"), vec![Kind::Rfc5321AddressLiteral]);
    }

    #[test]
    fn full_ipv6_is_address_literal() {
        assert_eq!(
            kinds("IPv6:2001:0db8:0000:0000:0000:ff00:0042:8329"),
            vec![Kind::Rfc5321AddressLiteral]
        );
    }

    #[test]
    fn elided_ipv6_is_deprecated() {
        // The elision check and the final shape check both fire: a single
        // elided zero-group is well-formed (so the shape check also passes)
        // but deprecated (so it additionally raises IPV6DEPRECATED). The
        // aggregator picks the worse of the two.
        let mut found = kinds("IPv6:2001:db8::ff00:42:8329:1:2");
        found.sort_by_key(|k| Diagnosis::new(*k).code());
        assert_eq!(
            found,
            vec![Kind::Rfc5321AddressLiteral, Kind::Rfc5321Ipv6Deprecated]
        );
    }

    #[test]
    fn ipv6_with_embedded_ipv4_mapped_address() {
        // "::ffff:a.b.c.d" elides four zero groups, well short of the
        // single-group elision that RFC5321_IPV6DEPRECATED warns about.
        assert_eq!(
            kinds("IPv6:::ffff:192.168.0.1"),
            vec![Kind::Rfc5321AddressLiteral]
        );
    }

    #[test]
    fn wrong_group_count() {
        // The group-count check and the final shape check are independent:
        // too few groups that are otherwise well-formed raises both.
        let mut found = kinds("IPv6:1:2:3");
        found.sort_by_key(|k| Diagnosis::new(*k).code());
        assert_eq!(
            found,
            vec![Kind::Rfc5321AddressLiteral, Kind::Rfc5322Ipv6GrpCount]
        );
    }

    #[test]
    fn bad_hex_group() {
        assert_eq!(
            kinds("IPv6:1:2:3:4:5:6:7:ghij"),
            vec![Kind::Rfc5322Ipv6BadChar]
        );
    }

    #[test]
    fn not_ipv6_tagged_is_domain_literal() {
        assert_eq!(kinds("unknown-tag:foo"), vec![Kind::Rfc5322DomainLiteral]);
    }
}
