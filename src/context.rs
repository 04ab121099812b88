//! The parser's state: the context stack and the per-invocation data it
//! accumulates while scanning an address one octet at a time.

use std::collections::HashSet;

use isemail_types::Diagnosis;

/// Where the parser currently believes it is within the address grammar.
///
/// Used both as the live state and as the entries pushed onto
/// [`ParseState::context_stack`] while a nested context (FWS, a comment, a
/// quoted pair) is being resumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Context {
    LocalPart,
    Domain,
    Literal,
    Comment,
    Fws,
    QuotedString,
    QuotedPair,
}

/// All mutable state for one call to [`crate::parser::parse`].
///
/// Created fresh for each address and discarded when parsing finishes;
/// nothing here is shared across invocations.
pub(crate) struct ParseState {
    pub context: Context,
    pub context_stack: Vec<Context>,
    pub context_prior: Context,

    /// Dot-separated atom index within the current component, starting at 0.
    pub element_count: u32,
    /// Length of the atom currently being built.
    pub element_len: u32,
    /// Set while the last domain-atom character was a hyphen.
    pub hyphen_flag: bool,
    /// Once a closing context has been accepted mid-element, no further
    /// atext is allowed in this element.
    pub end_or_die: bool,
    /// -1 when unset, else the number of consecutive CRLFs observed inside
    /// the current run of FWS.
    pub crlf_count: i32,
    /// Previous raw octet within the current FWS run.
    pub token_prior: u8,

    /// Octet buffers, not `String`: lengths here are the octet counts the
    /// length-limit checks in RFC 5321 §4.5.3.1 actually mean, and a byte
    /// above 127 can flow into these on an error path without needing a
    /// valid UTF-8 representation along the way.
    pub local_part: Vec<u8>,
    pub domain: Vec<u8>,
    pub literal: Vec<u8>,

    pub atoms_local: Vec<Vec<u8>>,
    pub atoms_domain: Vec<Vec<u8>>,

    pub diagnoses: HashSet<Diagnosis>,
}

impl ParseState {
    pub fn new() -> Self {
        Self {
            context: Context::LocalPart,
            context_stack: vec![Context::LocalPart],
            context_prior: Context::LocalPart,
            element_count: 0,
            element_len: 0,
            hyphen_flag: false,
            end_or_die: false,
            crlf_count: -1,
            token_prior: 0,
            local_part: Vec::new(),
            domain: Vec::new(),
            literal: Vec::new(),
            atoms_local: vec![Vec::new()],
            atoms_domain: vec![Vec::new()],
            diagnoses: HashSet::new(),
        }
    }

    pub fn push(&mut self, diagnosis: Diagnosis) {
        self.diagnoses.insert(diagnosis);
    }

    /// The worst diagnosis raised so far, or `VALID` if none.
    pub fn worst(&self) -> Diagnosis {
        self.diagnoses
            .iter()
            .copied()
            .max()
            .unwrap_or(Diagnosis::VALID)
    }

    pub fn current_local_atom(&mut self) -> &mut Vec<u8> {
        &mut self.atoms_local[self.element_count as usize]
    }

    pub fn current_domain_atom(&mut self) -> &mut Vec<u8> {
        &mut self.atoms_domain[self.element_count as usize]
    }
}
