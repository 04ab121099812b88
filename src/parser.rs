//! The octet-by-octet address scanner.
//!
//! Ported from the reference FSM one context at a time: a single pass over
//! the raw bytes, a context stack for contexts that nest (FWS, comments,
//! quoted pairs), and a `repeat` dispatch so that the character that ends a
//! run of FWS gets reprocessed in whatever context FWS interrupted.

use isemail_types::{Diagnosis, Kind};

use crate::classify;
use crate::context::{Context, ParseState};
use crate::literal;
use crate::validate;

/// What the dispatch loop should do after handling one octet.
enum Action {
    /// Move on to the next octet.
    Advance,
    /// Re-run dispatch on the same octet now that the context has changed.
    Repeat,
}

pub(crate) fn parse(address: &[u8]) -> ParseState {
    let mut state = ParseState::new();
    let len = address.len();
    let mut i = 0usize;
    let mut skip_next = false;
    let mut last_token: Option<u8> = None;

    while i < len {
        if skip_next {
            skip_next = false;
            i += 1;
            continue;
        }

        let token = address[i];
        let next = address.get(i + 1).copied();
        last_token = Some(token);

        loop {
            let action = match state.context {
                Context::LocalPart => local_part(&mut state, token, next, &mut skip_next),
                Context::Domain => domain(&mut state, token, next, &mut skip_next),
                Context::Literal => domain_literal(&mut state, token, next, &mut skip_next),
                Context::QuotedString => quoted_string(&mut state, token, next, &mut skip_next),
                Context::QuotedPair => quoted_pair(&mut state, token),
                Context::Comment => comment(&mut state, token, next, &mut skip_next),
                Context::Fws => fws(&mut state, token, next, &mut skip_next),
            };

            match action {
                Action::Advance => break,
                Action::Repeat => continue,
            }
        }

        if state.worst().code() > isemail_types::Category::Rfc5322 as u8 {
            break;
        }

        i += 1;
    }

    validate::finish(&mut state, last_token);
    state
}

/// local-part = dot-atom / quoted-string / obs-local-part
fn local_part(state: &mut ParseState, token: u8, next: Option<u8>, skip_next: &mut bool) -> Action {
    use Kind::*;

    match token {
        b'(' => {
            if state.element_len == 0 {
                if state.element_count == 0 {
                    state.push(Diagnosis::new(CfwsComment));
                } else {
                    state.push(Diagnosis::new(DeprecComment));
                }
            } else {
                state.push(Diagnosis::new(CfwsComment));
                state.end_or_die = true;
            }
            state.context_stack.push(state.context);
            state.context = Context::Comment;
            Action::Advance
        }

        b'.' => {
            if state.element_len == 0 {
                if state.element_count == 0 {
                    state.push(Diagnosis::new(ErrDotStart));
                } else {
                    state.push(Diagnosis::new(ErrConsecutiveDots));
                }
            } else {
                if state.end_or_die {
                    state.push(Diagnosis::new(DeprecLocalPart));
                }
                state.end_or_die = false;
                state.element_len = 0;
                state.element_count += 1;
                state.local_part.push(b'.');
                state.atoms_local.push(Vec::new());
            }
            Action::Advance
        }

        b'"' => {
            if state.element_len == 0 {
                if state.element_count == 0 {
                    state.push(Diagnosis::new(Rfc5321QuotedString));
                } else {
                    state.push(Diagnosis::new(DeprecLocalPart));
                }
                state.local_part.push(b'"');
                state.current_local_atom().push(b'"');
                state.element_len += 1;
                state.end_or_die = true;
                state.context_stack.push(state.context);
                state.context = Context::QuotedString;
            } else {
                state.push(Diagnosis::new(ErrExpectingAtext));
            }
            Action::Advance
        }

        b'\r' | b' ' | b'\t' => {
            if token == b'\r' {
                *skip_next = true;
                if next != Some(b'\n') {
                    state.push(Diagnosis::new(ErrCrNoLf));
                    return Action::Advance;
                }
            }

            if state.element_len == 0 {
                if state.element_count == 0 {
                    state.push(Diagnosis::new(CfwsFws));
                } else {
                    state.push(Diagnosis::new(DeprecFws));
                }
            } else {
                state.end_or_die = true;
            }

            state.context_stack.push(state.context);
            state.context = Context::Fws;
            state.token_prior = token;
            Action::Advance
        }

        b'@' => {
            if state.local_part.is_empty() {
                state.push(Diagnosis::new(ErrNoLocalPart));
            } else if state.element_len == 0 {
                state.push(Diagnosis::new(ErrDotEnd));
            } else if state.local_part.len() > 64 {
                state.push(Diagnosis::new(Rfc5322LocalTooLong));
            } else if matches!(state.context_prior, Context::Comment | Context::Fws) {
                state.push(Diagnosis::new(DeprecCfwsNearAt));
            }

            state.context = Context::Domain;
            state.context_stack.clear();
            state.element_count = 0;
            state.element_len = 0;
            state.end_or_die = false;
            Action::Advance
        }

        _ => {
            if state.end_or_die {
                match state.context_prior {
                    Context::Comment | Context::Fws => state.push(Diagnosis::new(ErrAtextAfterCfws)),
                    Context::QuotedString => state.push(Diagnosis::new(ErrAtextAfterQs)),
                    _ => state.push(Diagnosis::new(BadParse)),
                }
            } else {
                state.context_prior = state.context;
                if !classify::is_atext(token) {
                    state.push(Diagnosis::new(ErrExpectingAtext));
                }
                state.local_part.push(token);
                state.current_local_atom().push(token);
                state.element_len += 1;
            }
            Action::Advance
        }
    }
}

/// domain = dot-atom / domain-literal / obs-domain
fn domain(state: &mut ParseState, token: u8, next: Option<u8>, skip_next: &mut bool) -> Action {
    use Kind::*;

    match token {
        b'(' => {
            if state.element_len == 0 {
                if state.element_count == 0 {
                    state.push(Diagnosis::new(DeprecCfwsNearAt));
                } else {
                    state.push(Diagnosis::new(DeprecComment));
                }
            } else {
                state.push(Diagnosis::new(CfwsComment));
                state.end_or_die = true;
            }
            state.context_stack.push(state.context);
            state.context = Context::Comment;
            Action::Advance
        }

        b'.' => {
            if state.element_len == 0 {
                if state.element_count == 0 {
                    state.push(Diagnosis::new(ErrDotStart));
                } else {
                    state.push(Diagnosis::new(ErrConsecutiveDots));
                }
            } else if state.hyphen_flag {
                state.push(Diagnosis::new(ErrDomainHyphenEnd));
            } else {
                if state.element_len > 63 {
                    state.push(Diagnosis::new(Rfc5322LabelTooLong));
                }
                state.end_or_die = false;
                state.element_len = 0;
                state.element_count += 1;
                state.atoms_domain.push(Vec::new());
                state.domain.push(b'.');
            }
            Action::Advance
        }

        b'[' => {
            if state.domain.is_empty() {
                state.end_or_die = true;
                state.element_len += 1;
                state.context_stack.push(state.context);
                state.context = Context::Literal;
                state.domain.push(b'[');
                state.current_domain_atom().push(b'[');
                state.literal.clear();
            } else {
                state.push(Diagnosis::new(ErrExpectingAtext));
            }
            Action::Advance
        }

        b'\r' | b' ' | b'\t' => {
            if token == b'\r' {
                *skip_next = true;
                if next != Some(b'\n') {
                    state.push(Diagnosis::new(ErrCrNoLf));
                    return Action::Advance;
                }
            }

            if state.element_len == 0 {
                if state.element_count == 0 {
                    state.push(Diagnosis::new(DeprecCfwsNearAt));
                } else {
                    state.push(Diagnosis::new(DeprecFws));
                }
            } else {
                state.push(Diagnosis::new(CfwsFws));
                state.end_or_die = true;
            }

            state.context_stack.push(state.context);
            state.context = Context::Fws;
            state.token_prior = token;
            Action::Advance
        }

        _ => {
            // Unlike LOCALPART, an end_or_die violation here does not stop
            // processing: the character still gets classified and appended,
            // which can stack a second diagnosis on top (matching the
            // reference parser's behavior in this context).
            if state.end_or_die {
                match state.context_prior {
                    Context::Comment | Context::Fws => state.push(Diagnosis::new(ErrAtextAfterCfws)),
                    Context::Literal => state.push(Diagnosis::new(ErrAtextAfterDomlit)),
                    _ => state.push(Diagnosis::new(BadParse)),
                }
            }

            state.hyphen_flag = false;

            if !classify::is_atext(token) {
                state.push(Diagnosis::new(ErrExpectingAtext));
            } else if token == b'-' {
                if state.element_len == 0 {
                    state.push(Diagnosis::new(ErrDomainHyphenStart));
                }
                state.hyphen_flag = true;
            } else if !(token.is_ascii_digit() || token.is_ascii_alphabetic()) {
                state.push(Diagnosis::new(Rfc5322Domain));
            }

            state.domain.push(token);
            state.current_domain_atom().push(token);
            state.element_len += 1;
            Action::Advance
        }
    }
}

/// domain-literal = "[" *([FWS] dtext) [FWS] "]"
fn domain_literal(state: &mut ParseState, token: u8, next: Option<u8>, skip_next: &mut bool) -> Action {
    use Kind::*;

    match token {
        b']' => {
            if state.worst().code() < isemail_types::Category::Deprecated as u8 {
                for diagnosis in literal::analyze(&state.literal) {
                    state.push(diagnosis);
                }
            } else {
                state.push(Diagnosis::new(Rfc5322DomainLiteral));
            }

            state.domain.push(b']');
            state.current_domain_atom().push(b']');
            state.element_len += 1;
            state.context_prior = state.context;
            state.context = state.context_stack.pop().unwrap_or(Context::Domain);
            Action::Advance
        }

        b'\\' => {
            state.push(Diagnosis::new(Rfc5322DomlitObsdtext));
            state.context_stack.push(state.context);
            state.context = Context::QuotedPair;
            Action::Advance
        }

        b'\r' | b' ' | b'\t' => {
            if token == b'\r' {
                *skip_next = true;
                if next != Some(b'\n') {
                    state.push(Diagnosis::new(ErrCrNoLf));
                    return Action::Advance;
                }
            }

            state.push(Diagnosis::new(CfwsFws));
            state.context_stack.push(state.context);
            state.context = Context::Fws;
            state.token_prior = token;
            Action::Advance
        }

        _ => {
            if token > 127 || token == 0 || token == b'[' {
                state.push(Diagnosis::new(ErrExpectingDtext));
                return Action::Advance;
            }
            if !classify::is_dtext(token) {
                state.push(Diagnosis::new(Rfc5322DomlitObsdtext));
            }

            state.literal.push(token);
            state.domain.push(token);
            state.current_domain_atom().push(token);
            state.element_len += 1;
            Action::Advance
        }
    }
}

/// quoted-string = DQUOTE *([FWS] qcontent) [FWS] DQUOTE
fn quoted_string(state: &mut ParseState, token: u8, next: Option<u8>, skip_next: &mut bool) -> Action {
    use Kind::*;

    match token {
        b'\\' => {
            state.context_stack.push(state.context);
            state.context = Context::QuotedPair;
            Action::Advance
        }

        b'\r' | b'\t' => {
            if token == b'\r' {
                *skip_next = true;
                if next != Some(b'\n') {
                    state.push(Diagnosis::new(ErrCrNoLf));
                    return Action::Advance;
                }
            }

            state.local_part.push(b' ');
            state.current_local_atom().push(b' ');
            state.element_len += 1;

            state.push(Diagnosis::new(CfwsFws));
            state.context_stack.push(state.context);
            state.context = Context::Fws;
            state.token_prior = token;
            Action::Advance
        }

        b'"' => {
            state.local_part.push(b'"');
            state.current_local_atom().push(b'"');
            state.element_len += 1;
            state.context_prior = state.context;
            state.context = state.context_stack.pop().unwrap_or(Context::LocalPart);
            Action::Advance
        }

        _ => {
            if token > 127 || token == 0 || token == b'\n' {
                state.push(Diagnosis::new(ErrExpectingQtext));
            } else if !classify::is_qtext(token) {
                state.push(Diagnosis::new(DeprecQtext));
            }

            state.local_part.push(token);
            state.current_local_atom().push(token);
            state.element_len += 1;
            Action::Advance
        }
    }
}

/// quoted-pair = ("\" (VCHAR / WSP)) / obs-qp
fn quoted_pair(state: &mut ParseState, token: u8) -> Action {
    use Kind::*;

    if token > 127 {
        state.push(Diagnosis::new(ErrExpectingQpair));
    } else if (token < 31 && token != 9) || token == 127 {
        state.push(Diagnosis::new(DeprecQp));
    }

    state.context_prior = state.context;
    state.context = state.context_stack.pop().unwrap_or(Context::LocalPart);

    match state.context {
        Context::Comment => {}
        Context::QuotedString => {
            state.local_part.push(b'\\');
            state.local_part.push(token);
            state.current_local_atom().push(b'\\');
            state.current_local_atom().push(token);
            state.element_len += 2;
        }
        Context::Literal => {
            state.domain.push(b'\\');
            state.domain.push(token);
            state.current_domain_atom().push(b'\\');
            state.current_domain_atom().push(token);
            state.element_len += 2;
        }
        _ => state.push(Diagnosis::new(BadParse)),
    }

    Action::Advance
}

/// comment = "(" *([FWS] ccontent) [FWS] ")"
fn comment(state: &mut ParseState, token: u8, next: Option<u8>, skip_next: &mut bool) -> Action {
    use Kind::*;

    match token {
        b'(' => {
            state.context_stack.push(state.context);
            state.context = Context::Comment;
            Action::Advance
        }

        b')' => {
            state.context_prior = state.context;
            state.context = state.context_stack.pop().unwrap_or(Context::LocalPart);
            Action::Advance
        }

        b'\\' => {
            state.context_stack.push(state.context);
            state.context = Context::QuotedPair;
            Action::Advance
        }

        b'\r' | b' ' | b'\t' => {
            if token == b'\r' {
                *skip_next = true;
                if next != Some(b'\n') {
                    state.push(Diagnosis::new(ErrCrNoLf));
                    return Action::Advance;
                }
            }

            state.push(Diagnosis::new(CfwsFws));
            state.context_stack.push(state.context);
            state.context = Context::Fws;
            state.token_prior = token;
            Action::Advance
        }

        _ => {
            if token > 127 || token == 0 || token == b'\n' {
                state.push(Diagnosis::new(ErrExpectingCtext));
                return Action::Advance;
            }
            if !classify::is_ctext(token) {
                state.push(Diagnosis::new(DeprecCtext));
            }
            Action::Advance
        }
    }
}

/// FWS = ([*WSP CRLF] 1*WSP) / obs-FWS
fn fws(state: &mut ParseState, token: u8, next: Option<u8>, skip_next: &mut bool) -> Action {
    use Kind::*;

    if state.token_prior == b'\r' {
        if token == b'\r' {
            state.push(Diagnosis::new(ErrFwsCrlfX2));
            return Action::Advance;
        }

        if state.crlf_count != -1 {
            state.crlf_count += 1;
            if state.crlf_count > 1 {
                state.push(Diagnosis::new(DeprecFws));
            }
        } else {
            state.crlf_count = 1;
        }
    }

    match token {
        b'\r' => {
            *skip_next = true;
            if next != Some(b'\n') {
                state.push(Diagnosis::new(ErrCrNoLf));
                return Action::Advance;
            }
        }
        b' ' | b'\t' => {}
        _ => {
            if state.token_prior == b'\r' {
                state.push(Diagnosis::new(ErrFwsCrlfEnd));
                return Action::Advance;
            }

            if state.crlf_count != -1 {
                state.crlf_count = -1;
            }

            state.context_prior = state.context;
            state.context = state.context_stack.pop().unwrap_or(Context::LocalPart);
            state.token_prior = token;
            return Action::Repeat;
        }
    }

    state.token_prior = token;
    Action::Advance
}
