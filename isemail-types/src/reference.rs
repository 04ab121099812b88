//! Citation metadata attached to a diagnosis.

/// A single citation token and the link/description pair it resolves to.
///
/// This mirrors the small lookup table the address parser consults whenever
/// it wants to point a caller at the RFC production a diagnosis came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Reference {
    /// Short, stable token such as `"atext"` or `"address-literal-IPv6"`.
    pub citation: &'static str,
    /// A human-readable link to the relevant RFC section.
    pub link: &'static str,
}

impl Reference {
    pub const fn new(citation: &'static str, link: &'static str) -> Self {
        Self { citation, link }
    }

    pub fn lookup(citation: &str) -> Option<Reference> {
        REFERENCE_TABLE
            .iter()
            .copied()
            .find(|reference| reference.citation == citation)
    }
}

macro_rules! rfc5322 {
    ($section:expr) => {
        concat!("https://tools.ietf.org/html/rfc5322#section-", $section)
    };
}

macro_rules! rfc5321 {
    ($section:expr) => {
        concat!("https://tools.ietf.org/html/rfc5321#section-", $section)
    };
}

/// The full citation table. Kept as a flat array rather than a `HashMap`
/// because it is tiny, constant, and never looked up more than a handful of
/// times per address.
const REFERENCE_TABLE: &[Reference] = &[
    Reference::new("local-part", rfc5322!("3.4.1")),
    Reference::new("addr-spec", rfc5322!("3.4.1")),
    Reference::new("mailbox", rfc5321!("4.1.2")),
    Reference::new("domain-RFC5322", rfc5322!("3.4.1")),
    Reference::new("domain-RFC5321", rfc5321!("4.1.2")),
    Reference::new("atext", rfc5322!("3.2.3")),
    Reference::new("qtext", rfc5322!("3.2.4")),
    Reference::new("ctext", rfc5322!("3.2.3")),
    Reference::new("dtext", rfc5322!("3.4.1")),
    Reference::new("quoted-pair", rfc5322!("3.2.1")),
    Reference::new("quoted-string", rfc5322!("3.2.4")),
    Reference::new("obs-qtext", rfc5322!("4.1")),
    Reference::new("obs-qp", rfc5322!("4.1")),
    Reference::new("obs-ctext", rfc5322!("4.1")),
    Reference::new("obs-dtext", rfc5322!("4.1")),
    Reference::new("obs-local-part", rfc5322!("4.4")),
    Reference::new("obs-domain", rfc5322!("4.4")),
    Reference::new("sub-domain", rfc5321!("4.1.2")),
    Reference::new("domain-literal", rfc5322!("3.4.1")),
    Reference::new("CFWS", rfc5322!("3.2.2")),
    Reference::new("CFWS-near-at", rfc5322!("3.4.1")),
    Reference::new("SHOULD-NOT", "https://tools.ietf.org/html/rfc2119#section-4"),
    Reference::new("CRLF", rfc5322!("2.2")),
    Reference::new("dot-atom", rfc5322!("3.2.3")),
    Reference::new("local-part-maximum", rfc5321!("4.5.3.1.1")),
    Reference::new("domain-maximum", rfc5321!("4.5.3.1.2")),
    Reference::new("mailbox-maximum", rfc5321!("4.5.3.1.3")),
    Reference::new("label", "https://tools.ietf.org/html/rfc1035#section-2.3.4"),
    Reference::new("address-literal", rfc5321!("4.1.3")),
    Reference::new("address-literal-IPv4", rfc5321!("4.1.3")),
    Reference::new("address-literal-IPv6", rfc5321!("4.1.3")),
    Reference::new("TLD", rfc5321!("2.3.5")),
    Reference::new("TLD-format", "https://www.rfc-editor.org/errata_search.php?rfc=1123&eid=1353"),
];
