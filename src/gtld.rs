//! The gTLD collaborator: a single presence check, no DNS involved.

use isemail_types::{Diagnosis, Kind};

/// `VALID` if `domain` contains a dot (so it has *some* TLD beyond the
/// bare label), else `GTLD`.
pub fn check(domain: &str) -> Diagnosis {
    if domain.contains('.') {
        Diagnosis::VALID
    } else {
        Diagnosis::new(Kind::Gtld)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_label_is_gtld() {
        assert_eq!(check("com"), Diagnosis::new(Kind::Gtld));
    }

    #[test]
    fn dotted_domain_is_valid() {
        assert_eq!(check("example.com"), Diagnosis::VALID);
    }
}
