//! Tokenizing chain-list text into chain runs.

use super::{
    ChainListError, ChainRun, OperatorQualifier, CHAIN_KEYWORD, OPERATOR_LIST_KEYWORD,
    OPERATOR_NAME_KEYWORD,
};

/// Split a single command-line argument into tokens.
#[must_use]
pub fn tokenize(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

/// Group tokens into runs, each starting with the `chain` keyword. The
/// token after `chain` or `operator-name` is a value and never starts a new
/// run, so a chain or operator literally named `chain` is allowed. Tokens
/// before the first `chain` form a leading run of their own.
#[must_use]
pub fn split_runs<'a, S: AsRef<str>>(tokens: &'a [S]) -> Vec<Vec<&'a str>> {
    let mut runs: Vec<Vec<&str>> = Vec::new();
    let mut value_next = false;
    for token in tokens.iter().map(|t| t.as_ref()) {
        let starts_run = !value_next && token == CHAIN_KEYWORD;
        value_next = !value_next && (token == CHAIN_KEYWORD || token == OPERATOR_NAME_KEYWORD);
        match runs.last_mut() {
            Some(run) if !starts_run => run.push(token),
            _ => runs.push(vec![token]),
        }
    }
    runs
}

/// Parse a token stream into chain runs.
pub fn parse<S: AsRef<str>>(tokens: &[S]) -> Result<Vec<ChainRun>, ChainListError> {
    let runs = split_runs(tokens);
    let Some(first) = runs.first().and_then(|r| r.first()) else {
        return Err(ChainListError::Empty);
    };
    if *first != CHAIN_KEYWORD {
        return Err(ChainListError::ExpectedChainKeyword {
            found: (*first).to_owned(),
        });
    }
    runs.iter()
        .enumerate()
        .map(|(i, run)| parse_run(i, run))
        .collect()
}

fn parse_run(index: usize, run: &[&str]) -> Result<ChainRun, ChainListError> {
    let [_, chain, rest @ ..] = run else {
        return Err(ChainListError::EmptyRun { run: index });
    };
    let chain = (*chain).to_owned();
    let qualifier = match rest {
        [] => None,
        [keyword, args @ ..] if *keyword == OPERATOR_NAME_KEYWORD => match args {
            [] => return Err(ChainListError::MissingOperatorName { chain }),
            [name] => Some(OperatorQualifier::Name((*name).to_owned())),
            [_, extra @ ..] => {
                return Err(ChainListError::TrailingTokens {
                    chain,
                    tokens: extra.iter().map(|t| (*t).to_owned()).collect(),
                })
            }
        },
        [keyword, args @ ..] if *keyword == OPERATOR_LIST_KEYWORD => {
            if args.is_empty() {
                return Err(ChainListError::EmptyOperatorList { chain });
            }
            let ids = args
                .iter()
                .map(|t| {
                    t.parse::<u32>().map_err(|_| ChainListError::InvalidOperatorId {
                        chain: chain.clone(),
                        token: (*t).to_owned(),
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            Some(OperatorQualifier::List(ids))
        }
        [keyword, ..] => {
            return Err(ChainListError::UnknownQualifier {
                chain,
                keyword: (*keyword).to_owned(),
            })
        }
    };
    Ok(ChainRun { chain, qualifier })
}
