//! Post-parse validation: the checks that only make sense once the octet
//! loop has finished, because they depend on the terminal state (what
//! context we ended in, the final lengths) rather than any single octet.

use isemail_types::{Category, Diagnosis, Kind};

use crate::context::{Context, ParseState};

pub(crate) fn finish(state: &mut ParseState, last_token: Option<u8>) {
    if state.worst().code() >= Category::Rfc5322 as u8 {
        return;
    }

    if let Some(diagnosis) = terminal_context_error(state, last_token) {
        state.push(diagnosis);
        return;
    }

    // A single elif chain, not three independent checks: only the first
    // length condition that matches is reported, so an address that trips
    // more than one of these at once still gets the same single diagnosis
    // the reference implementation would return.
    if state.domain.len() > 255 {
        state.push(Diagnosis::new(Kind::Rfc5322DomainTooLong));
    } else if state.local_part.len() + 1 + state.domain.len() > 254 {
        state.push(Diagnosis::new(Kind::Rfc5322TooLong));
    } else if state.element_len > 63 {
        state.push(Diagnosis::new(Kind::Rfc5322LabelTooLong));
    }
}

/// Mirrors §4.4 item 1: an unterminated nested context, or a local-part /
/// domain shape that the octet loop left incomplete, is a fatal error.
fn terminal_context_error(state: &ParseState, last_token: Option<u8>) -> Option<Diagnosis> {
    match state.context {
        Context::QuotedString => return Some(Diagnosis::new(Kind::ErrUnclosedQuotedStr)),
        Context::QuotedPair => return Some(Diagnosis::new(Kind::ErrBackslashEnd)),
        Context::Comment => return Some(Diagnosis::new(Kind::ErrUnclosedComment)),
        Context::Literal => return Some(Diagnosis::new(Kind::ErrUnclosedDomlit)),
        _ => {}
    }

    if last_token == Some(b'\r') {
        return Some(Diagnosis::new(Kind::ErrFwsCrlfEnd));
    }
    if state.domain.is_empty() {
        return Some(Diagnosis::new(Kind::ErrNoDomain));
    }
    if state.element_len == 0 {
        return Some(Diagnosis::new(Kind::ErrDotEnd));
    }
    if state.hyphen_flag {
        return Some(Diagnosis::new(Kind::ErrDomainHyphenEnd));
    }

    None
}
