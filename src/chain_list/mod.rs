//! The chain-list selection language.
//!
//! A chain list is a flat token stream of runs, each of the form
//!
//! ```text
//! chain <name> [operator-name <name> | operator-list <id> <id> ...]
//! ```
//!
//! Runs are parsed into [`ChainRun`]s, resolved against an assembly's
//! operators into [`ResolvedChain`]s, and finally turned into one unioned
//! [`Structure`](crate::structure::Structure).

mod parser;
mod resolve;

use std::fmt;

pub use parser::{parse, split_runs, tokenize};
pub use resolve::{operator_key, operator_lookup, pair_spec, resolve, select, to_structures};

/// Keyword that starts a run.
pub const CHAIN_KEYWORD: &str = "chain";
/// Qualifier naming an operator directly.
pub const OPERATOR_NAME_KEYWORD: &str = "operator-name";
/// Qualifier listing the oper ids an operator composes.
pub const OPERATOR_LIST_KEYWORD: &str = "operator-list";

/// Optional operator restriction of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperatorQualifier {
    /// An operator name, used as given.
    Name(String),
    /// An unordered set of oper ids, resolved through the assembly.
    List(Vec<u32>),
}

/// One parsed `chain ...` run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainRun {
    /// Chain identifier.
    pub chain: String,
    /// Operator restriction, if any.
    pub qualifier: Option<OperatorQualifier>,
}

/// A run with its operator resolved to a name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedChain {
    /// Chain identifier.
    pub chain: String,
    /// Operator name; `None` selects every copy of the chain.
    pub operator: Option<String>,
}

/// Invalid chain-list input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainListError {
    /// No tokens at all.
    Empty,
    /// The stream does not start with `chain`.
    ExpectedChainKeyword {
        /// The offending first token.
        found: String,
    },
    /// A `chain` keyword with no chain name after it.
    EmptyRun {
        /// 0-based run index.
        run: usize,
    },
    /// A qualifier keyword other than `operator-name` / `operator-list`.
    UnknownQualifier {
        /// Chain of the run.
        chain: String,
        /// The unrecognised keyword.
        keyword: String,
    },
    /// `operator-name` with nothing after it.
    MissingOperatorName {
        /// Chain of the run.
        chain: String,
    },
    /// `operator-list` with no ids after it.
    EmptyOperatorList {
        /// Chain of the run.
        chain: String,
    },
    /// An `operator-list` entry that is not a non-negative integer.
    InvalidOperatorId {
        /// Chain of the run.
        chain: String,
        /// The offending token.
        token: String,
    },
    /// Extra tokens after a complete `operator-name` qualifier.
    TrailingTokens {
        /// Chain of the run.
        chain: String,
        /// The extra tokens.
        tokens: Vec<String>,
    },
    /// No operator of the assembly composes exactly these ids.
    UnmatchedOperatorList {
        /// Chain of the run.
        chain: String,
        /// Sorted, comma-joined ids.
        key: String,
    },
    /// Several differently named operators compose these ids.
    AmbiguousOperatorList {
        /// Chain of the run.
        chain: String,
        /// Sorted, comma-joined ids.
        key: String,
        /// Candidate operator names.
        names: Vec<String>,
    },
}

impl fmt::Display for ChainListError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "no chain-list tokens given"),
            Self::ExpectedChainKeyword { found } => {
                write!(f, "expected `{CHAIN_KEYWORD}`, found `{found}`")
            }
            Self::EmptyRun { run } => {
                write!(f, "run {} has no chain name", run + 1)
            }
            Self::UnknownQualifier { chain, keyword } => write!(
                f,
                "chain {chain}: unknown qualifier `{keyword}` (expected \
                 `{OPERATOR_NAME_KEYWORD}` or `{OPERATOR_LIST_KEYWORD}`)"
            ),
            Self::MissingOperatorName { chain } => {
                write!(f, "chain {chain}: `{OPERATOR_NAME_KEYWORD}` needs a name")
            }
            Self::EmptyOperatorList { chain } => {
                write!(f, "chain {chain}: `{OPERATOR_LIST_KEYWORD}` needs at least one id")
            }
            Self::InvalidOperatorId { chain, token } => {
                write!(f, "chain {chain}: `{token}` is not an operator id")
            }
            Self::TrailingTokens { chain, tokens } => {
                write!(f, "chain {chain}: unexpected tokens `{}`", tokens.join(" "))
            }
            Self::UnmatchedOperatorList { chain, key } => {
                write!(f, "chain {chain}: no operator composes ids [{key}]")
            }
            Self::AmbiguousOperatorList { chain, key, names } => write!(
                f,
                "chain {chain}: ids [{key}] match several operators ({})",
                names.join(", ")
            ),
        }
    }
}

impl std::error::Error for ChainListError {}
