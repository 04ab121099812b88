//! The diagnosis taxonomy: every observation the parser can make about an
//! address, and the static metadata (message, description, references)
//! that goes with it.

use crate::reference::Reference;

/// Upper bound of severity for a band of diagnoses.
///
/// A diagnosis's [`Kind::code`] is always `<= category as u8`, and strictly
/// greater than the previous category's value. `Threshold` is not itself a
/// category any diagnosis belongs to; it marks the default cut line between
/// "valid enough" and "not valid enough" used by [`crate::Diagnosis`]'s
/// boolean conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Category {
    Valid = 1,
    DnsWarn = 7,
    Rfc5321 = 15,
    Cfws = 31,
    Deprecated = 63,
    Rfc5322 = 127,
    Error = 255,
}

impl Category {
    /// The default boolean-conversion threshold: any diagnosis with
    /// `code < THRESHOLD` is considered "valid enough".
    pub const THRESHOLD: u8 = 16;
}

/// Every distinct observation the parser, validator, and collaborators can
/// report about an address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Kind {
    Valid,

    // DNS collaborator (§6.3). NullMxRecord's code is an open point: the
    // source this taxonomy is drawn from defines the kind in its test suite
    // but never assigns it a slot in the primary table. We give it the last
    // unused code in the DNSWARN band (7, the band's own ceiling).
    NoNameservers,
    DnsTimedOut,
    DnsWarnNoMxRecord,
    DnsWarnNoRecord,
    DnsWarnNullMxRecord,

    // gTLD collaborator.
    Gtld,

    // RFC 5321 curiosities.
    Rfc5321Tld,
    Rfc5321TldNumeric,
    Rfc5321QuotedString,
    Rfc5321AddressLiteral,
    Rfc5321Ipv6Deprecated,

    // CFWS warnings.
    CfwsComment,
    CfwsFws,

    // Deprecated/obsolete forms.
    DeprecLocalPart,
    DeprecFws,
    DeprecQtext,
    DeprecQp,
    DeprecComment,
    DeprecCtext,
    DeprecCfwsNearAt,

    // RFC 5322-only forms.
    Rfc5322Domain,
    Rfc5322TooLong,
    Rfc5322LocalTooLong,
    Rfc5322DomainTooLong,
    Rfc5322LabelTooLong,
    Rfc5322DomainLiteral,
    Rfc5322DomlitObsdtext,
    Rfc5322Ipv6GrpCount,
    Rfc5322Ipv62x2xColon,
    Rfc5322Ipv6BadChar,
    Rfc5322Ipv6MaxGrps,
    Rfc5322Ipv6ColonStrt,
    Rfc5322Ipv6ColonEnd,

    // Fatal errors.
    ErrExpectingDtext,
    ErrNoLocalPart,
    ErrNoDomain,
    ErrConsecutiveDots,
    ErrAtextAfterCfws,
    ErrAtextAfterQs,
    ErrAtextAfterDomlit,
    ErrExpectingQpair,
    ErrExpectingAtext,
    ErrExpectingQtext,
    ErrExpectingCtext,
    ErrBackslashEnd,
    ErrDotStart,
    ErrDotEnd,
    ErrDomainHyphenStart,
    ErrDomainHyphenEnd,
    ErrUnclosedQuotedStr,
    ErrUnclosedComment,
    ErrUnclosedDomlit,
    ErrFwsCrlfX2,
    ErrFwsCrlfEnd,
    ErrCrNoLf,

    /// The parser reached a state it believes is unreachable. Surfaced as
    /// data instead of a panic; see §7.
    BadParse,
}

impl Kind {
    /// The diagnosis's position within its category band.
    pub const fn code(self) -> u8 {
        use Kind::*;
        match self {
            Valid => 0,
            Gtld => 2,
            NoNameservers => 3,
            DnsTimedOut => 4,
            DnsWarnNoMxRecord => 5,
            DnsWarnNoRecord => 6,
            DnsWarnNullMxRecord => 7,

            Rfc5321Tld => 9,
            Rfc5321TldNumeric => 10,
            Rfc5321QuotedString => 11,
            Rfc5321AddressLiteral => 12,
            Rfc5321Ipv6Deprecated => 13,

            CfwsComment => 17,
            CfwsFws => 18,

            DeprecLocalPart => 33,
            DeprecFws => 34,
            DeprecQtext => 35,
            DeprecQp => 36,
            DeprecComment => 37,
            DeprecCtext => 38,
            DeprecCfwsNearAt => 49,

            Rfc5322Domain => 65,
            Rfc5322TooLong => 66,
            Rfc5322LocalTooLong => 67,
            Rfc5322DomainTooLong => 68,
            Rfc5322LabelTooLong => 69,
            Rfc5322DomainLiteral => 70,
            Rfc5322DomlitObsdtext => 71,
            Rfc5322Ipv6GrpCount => 72,
            Rfc5322Ipv62x2xColon => 73,
            Rfc5322Ipv6BadChar => 74,
            Rfc5322Ipv6MaxGrps => 75,
            Rfc5322Ipv6ColonStrt => 76,
            Rfc5322Ipv6ColonEnd => 77,

            ErrExpectingDtext => 129,
            ErrNoLocalPart => 130,
            ErrNoDomain => 131,
            ErrConsecutiveDots => 132,
            ErrAtextAfterCfws => 133,
            ErrAtextAfterQs => 134,
            ErrAtextAfterDomlit => 135,
            ErrExpectingQpair => 136,
            ErrExpectingAtext => 137,
            ErrExpectingQtext => 138,
            ErrExpectingCtext => 139,
            ErrBackslashEnd => 140,
            ErrDotStart => 141,
            ErrDotEnd => 142,
            ErrDomainHyphenStart => 143,
            ErrDomainHyphenEnd => 144,
            ErrUnclosedQuotedStr => 145,
            ErrUnclosedComment => 146,
            ErrUnclosedDomlit => 147,
            ErrFwsCrlfX2 => 148,
            ErrFwsCrlfEnd => 149,
            ErrCrNoLf => 150,

            BadParse => 255,
        }
    }

    pub const fn category(self) -> Category {
        use Kind::*;
        match self {
            Valid => Category::Valid,
            Gtld | NoNameservers | DnsTimedOut | DnsWarnNoMxRecord | DnsWarnNoRecord
            | DnsWarnNullMxRecord => Category::DnsWarn,
            Rfc5321Tld | Rfc5321TldNumeric | Rfc5321QuotedString | Rfc5321AddressLiteral
            | Rfc5321Ipv6Deprecated => Category::Rfc5321,
            CfwsComment | CfwsFws => Category::Cfws,
            DeprecLocalPart | DeprecFws | DeprecQtext | DeprecQp | DeprecComment
            | DeprecCtext | DeprecCfwsNearAt => Category::Deprecated,
            Rfc5322Domain
            | Rfc5322TooLong
            | Rfc5322LocalTooLong
            | Rfc5322DomainTooLong
            | Rfc5322LabelTooLong
            | Rfc5322DomainLiteral
            | Rfc5322DomlitObsdtext
            | Rfc5322Ipv6GrpCount
            | Rfc5322Ipv62x2xColon
            | Rfc5322Ipv6BadChar
            | Rfc5322Ipv6MaxGrps
            | Rfc5322Ipv6ColonStrt
            | Rfc5322Ipv6ColonEnd => Category::Rfc5322,
            BadParse => Category::Error,
            _ => Category::Error,
        }
    }

    /// Short human-readable summary of what went wrong (or right).
    pub const fn message(self) -> &'static str {
        use Kind::*;
        match self {
            Valid => "Address is valid.",
            Gtld => "Address has a gTLD as its domain and gTLDs are disallowed by this check.",
            NoNameservers => "No nameservers could be reached to resolve this domain.",
            DnsTimedOut => "The DNS lookup for this domain timed out.",
            DnsWarnNoMxRecord => "Couldn't find an MX record for this domain but an A record does exist.",
            DnsWarnNoRecord => "Couldn't find an MX record or A record for this domain.",
            DnsWarnNullMxRecord => "This domain publishes a null MX record and accepts no mail.",
            Rfc5321Tld => "Address is valid but at a Top Level Domain.",
            Rfc5321TldNumeric => "Address is valid but the Top Level Domain begins with a number.",
            Rfc5321QuotedString => "Address is valid but contains a quoted string.",
            Rfc5321AddressLiteral => "Address is valid but at a literal address, not a domain.",
            Rfc5321Ipv6Deprecated => "Address is valid but contains a :: that only elides one zero group.",
            CfwsComment => "Address contains a comment.",
            CfwsFws => "Address contains Folding White Space.",
            DeprecLocalPart => "Address contains a local part in deprecated form.",
            DeprecFws => "Address contains Folding White Space in deprecated form.",
            DeprecQtext => "Address contains a quoted string with a deprecated character.",
            DeprecQp => "Address contains a quoted pair in deprecated form.",
            DeprecComment => "Address contains a comment in deprecated form.",
            DeprecCtext => "Address contains a comment with a deprecated character.",
            DeprecCfwsNearAt => "Address contains a comment or Folding White Space around the @ sign.",
            Rfc5322Domain => "Address is RFC 5322 compliant but contains domain characters not allowed by DNS.",
            Rfc5322TooLong => "Address is too long.",
            Rfc5322LocalTooLong => "Address contains a local part that is too long.",
            Rfc5322DomainTooLong => "Address contains a domain that is too long.",
            Rfc5322LabelTooLong => "Address contains a domain part with an element that is too long.",
            Rfc5322DomainLiteral => "Address contains a domain literal that is not a valid RFC 5321 address literal.",
            Rfc5322DomlitObsdtext => "Address contains a domain literal with obsolete characters.",
            Rfc5322Ipv6GrpCount => "Address contains an IPv6 literal with the wrong number of groups.",
            Rfc5322Ipv62x2xColon => "Address contains an IPv6 literal with too many :: sequences.",
            Rfc5322Ipv6BadChar => "Address contains an IPv6 literal with an illegal group of characters.",
            Rfc5322Ipv6MaxGrps => "Address contains an IPv6 literal with too many groups.",
            Rfc5322Ipv6ColonStrt => "Address contains an IPv6 literal that starts with a single colon.",
            Rfc5322Ipv6ColonEnd => "Address contains an IPv6 literal that ends with a single colon.",
            ErrExpectingDtext => "Address contains a character that is not allowed in a domain literal.",
            ErrNoLocalPart => "Address has no local part.",
            ErrNoDomain => "Address has no domain part.",
            ErrConsecutiveDots => "Address contains consecutive dots.",
            ErrAtextAfterCfws => "Address contains text after a comment or Folding White Space.",
            ErrAtextAfterQs => "Address contains text after a quoted string.",
            ErrAtextAfterDomlit => "Address contains extra characters after the domain literal.",
            ErrExpectingQpair => "Address contains a character that is not allowed in a quoted pair.",
            ErrExpectingAtext => "Address contains a character that is not allowed.",
            ErrExpectingQtext => "Address contains a character that is not allowed in a quoted string.",
            ErrExpectingCtext => "Address contains a character that is not allowed in a comment.",
            ErrBackslashEnd => "Address ends in a backslash.",
            ErrDotStart => "Address has a local part or domain that begins with a dot.",
            ErrDotEnd => "Address has a local part or domain that ends with a dot.",
            ErrDomainHyphenStart => "Address has a domain that begins with a hyphen.",
            ErrDomainHyphenEnd => "Address has a domain that ends with a hyphen.",
            ErrUnclosedQuotedStr => "Address contains an unclosed quoted string.",
            ErrUnclosedComment => "Address contains an unclosed comment.",
            ErrUnclosedDomlit => "Address contains a domain literal that is missing its closing bracket.",
            ErrFwsCrlfX2 => "Address contains a Folding White Space with consecutive CRLF sequences.",
            ErrFwsCrlfEnd => "Address contains a Folding White Space that ends with a CRLF sequence.",
            ErrCrNoLf => "Address contains a carriage return that is not followed by a line feed.",
            BadParse => "The parser reached a state that should be unreachable.",
        }
    }

    /// Long-form description of the category this kind belongs to.
    pub const fn description(self) -> &'static str {
        match self.category() {
            Category::Valid => {
                "Address is valid. This does not mean the address actually \
                 exists, nor even that the domain exists."
            }
            Category::DnsWarn => "Address is valid but a DNS check was not successful.",
            Category::Rfc5321 => "Address is valid for SMTP but has unusual elements.",
            Category::Cfws => {
                "Address is valid within the message but cannot be used \
                 unmodified for the envelope."
            }
            Category::Deprecated => {
                "Address contains deprecated elements but may still be valid \
                 in restricted contexts."
            }
            Category::Rfc5322 => {
                "Address is only valid according to the broad definition of \
                 RFC 5322. It is otherwise invalid."
            }
            Category::Error => "Address is invalid for any purpose.",
        }
    }

    /// Citation tokens, resolved against the reference table.
    pub fn references(self) -> Vec<Reference> {
        use Kind::*;
        let citations: &[&str] = match self {
            Valid | Gtld | NoNameservers | DnsTimedOut | DnsWarnNullMxRecord => &[],
            DnsWarnNoMxRecord | DnsWarnNoRecord => &["mailbox"],
            Rfc5321Tld => &["TLD"],
            Rfc5321TldNumeric => &["TLD-format"],
            Rfc5321QuotedString => &["quoted-string"],
            Rfc5321AddressLiteral => &["address-literal", "address-literal-IPv4"],
            Rfc5321Ipv6Deprecated => &["address-literal-IPv6"],
            CfwsComment => &["dot-atom"],
            CfwsFws => &["local-part"],
            DeprecLocalPart | DeprecComment => &["obs-local-part", "obs-domain"],
            DeprecFws => &["obs-local-part", "obs-domain"],
            DeprecQtext => &["obs-qtext"],
            DeprecQp => &["obs-qp"],
            DeprecCtext => &["obs-ctext"],
            DeprecCfwsNearAt => &["CFWS-near-at", "SHOULD-NOT"],
            Rfc5322Domain => &["domain-RFC5322"],
            Rfc5322TooLong => &["mailbox-maximum"],
            Rfc5322LocalTooLong => &["local-part-maximum"],
            Rfc5322DomainTooLong => &["domain-maximum"],
            Rfc5322LabelTooLong => &["label"],
            Rfc5322DomainLiteral => &["domain-literal"],
            Rfc5322DomlitObsdtext => &["obs-dtext"],
            Rfc5322Ipv6GrpCount
            | Rfc5322Ipv62x2xColon
            | Rfc5322Ipv6BadChar
            | Rfc5322Ipv6MaxGrps
            | Rfc5322Ipv6ColonStrt
            | Rfc5322Ipv6ColonEnd => &["address-literal-IPv6"],
            ErrExpectingDtext => &["dtext"],
            ErrNoLocalPart => &["local-part"],
            ErrNoDomain => &["addr-spec", "mailbox"],
            ErrConsecutiveDots => &["local-part", "domain-RFC5322", "domain-RFC5321"],
            ErrAtextAfterCfws => &["local-part", "domain-RFC5322"],
            ErrAtextAfterQs => &["local-part"],
            ErrAtextAfterDomlit => &["domain-RFC5322"],
            ErrExpectingQpair => &["quoted-pair"],
            ErrExpectingAtext => &["atext"],
            ErrExpectingQtext => &["qtext"],
            ErrExpectingCtext => &["ctext"],
            ErrBackslashEnd => &["domain-RFC5322", "domain-RFC5321", "quoted-pair"],
            ErrDotStart | ErrDotEnd => &["local-part", "domain-RFC5322", "domain-RFC5321"],
            ErrDomainHyphenStart | ErrDomainHyphenEnd => &["sub-domain"],
            ErrUnclosedQuotedStr => &["quoted-string"],
            ErrUnclosedComment => &["CFWS"],
            ErrUnclosedDomlit => &["domain-literal"],
            ErrFwsCrlfX2 | ErrFwsCrlfEnd => &["CFWS"],
            ErrCrNoLf => &["CFWS", "CRLF"],
            BadParse => &[],
        };

        citations
            .iter()
            .filter_map(|citation| Reference::lookup(citation))
            .collect()
    }
}

/// A single, cheaply-copyable observation about an address.
///
/// `Diagnosis` is totally ordered by [`Kind::code`]: reducing a set of
/// diagnoses down to the worst one is just `diagnoses.into_iter().max()`.
#[derive(Debug, Clone, Copy, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Diagnosis {
    pub kind: Kind,
}

impl Diagnosis {
    pub const VALID: Diagnosis = Diagnosis { kind: Kind::Valid };

    pub const fn new(kind: Kind) -> Self {
        Self { kind }
    }

    pub const fn code(&self) -> u8 {
        self.kind.code()
    }

    pub const fn category(&self) -> Category {
        self.kind.category()
    }

    pub const fn message(&self) -> &'static str {
        self.kind.message()
    }

    pub const fn description(&self) -> &'static str {
        self.kind.description()
    }

    pub fn references(&self) -> Vec<Reference> {
        self.kind.references()
    }

    /// Whether this diagnosis is at or above the fatal-error band.
    pub const fn is_fatal(&self) -> bool {
        matches!(self.category(), Category::Error)
    }

    /// Boolean verdict against the default [`Category::THRESHOLD`].
    pub const fn is_valid(&self) -> bool {
        self.code() < Category::THRESHOLD
    }
}

impl Default for Diagnosis {
    fn default() -> Self {
        Self::VALID
    }
}

impl PartialEq for Diagnosis {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
    }
}

impl PartialOrd for Diagnosis {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Diagnosis {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.code().cmp(&other.code())
    }
}

impl From<Kind> for Diagnosis {
    fn from(kind: Kind) -> Self {
        Self::new(kind)
    }
}
