//! The DNS collaborator (§6.3): an MX lookup with an A-record fallback,
//! gated behind the `dns` feature so the core parser never needs a
//! resolver or an async runtime.

use std::time::Duration;

use hickory_resolver::config::{ResolverConfig, ResolverOpts};
use hickory_resolver::error::ResolveErrorKind;
use hickory_resolver::TokioAsyncResolver;
use isemail_types::{Diagnosis, Kind};

const LOOKUP_TIMEOUT: Duration = Duration::from_secs(5);

/// Resolves `domain`'s mail-routing records and maps the outcome onto the
/// diagnosis taxonomy. Never panics: every resolver failure mode becomes a
/// `Diagnosis` instead of propagating.
pub async fn check(domain: &str) -> Diagnosis {
    let mut opts = ResolverOpts::default();
    opts.timeout = LOOKUP_TIMEOUT;
    let resolver = TokioAsyncResolver::tokio(ResolverConfig::default(), opts);

    match tokio::time::timeout(LOOKUP_TIMEOUT, resolver.mx_lookup(domain)).await {
        Err(_) => {
            log::warn!("DNS lookup for {domain} timed out");
            Diagnosis::new(Kind::DnsTimedOut)
        }
        Ok(Ok(mx)) => {
            let records: Vec<_> = mx.iter().collect();
            match records.as_slice() {
                [] => has_a_record(&resolver, domain).await,
                [only] if only.preference() == 0 && only.exchange().is_root() => {
                    Diagnosis::new(Kind::DnsWarnNullMxRecord)
                }
                _ => tld_checks(domain),
            }
        }
        Ok(Err(error)) => match error.kind() {
            ResolveErrorKind::NoRecordsFound { .. } => has_a_record(&resolver, domain).await,
            ResolveErrorKind::NoConnections => {
                log::warn!("no nameservers available while resolving {domain}");
                Diagnosis::new(Kind::NoNameservers)
            }
            _ => {
                log::debug!("MX lookup for {domain} failed: {error}");
                Diagnosis::new(Kind::DnsWarnNoRecord)
            }
        },
    }
}

async fn has_a_record(resolver: &TokioAsyncResolver, domain: &str) -> Diagnosis {
    match resolver.lookup_ip(domain).await {
        Ok(lookup) if lookup.iter().next().is_some() => Diagnosis::new(Kind::DnsWarnNoMxRecord),
        _ => Diagnosis::new(Kind::DnsWarnNoRecord),
    }
}

/// Run only when there was no MX/A problem to report: a domain with no
/// MX record at all is fine by DNS as long as it isn't a bare TLD.
fn tld_checks(domain: &str) -> Diagnosis {
    if !domain.contains('.') {
        return Diagnosis::new(Kind::Rfc5321Tld);
    }

    let last_label = domain.rsplit('.').next().unwrap_or("");
    if last_label.starts_with(|c: char| c.is_ascii_digit()) {
        return Diagnosis::new(Kind::Rfc5321TldNumeric);
    }

    Diagnosis::VALID
}
