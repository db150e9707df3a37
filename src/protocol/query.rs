use crate::encoding::CODE_MAX_LEN;
use crate::error::ParseError;
use crate::protocol::command::Command;
use crate::protocol::reply::Reply;
use crate::store::RecordStore;
use crate::util::text::truncate_chars;

/// QUERY command: Q code
#[derive(Debug, Clone, PartialEq)]
pub struct QueryCmd {
    pub code: String,
}

impl QueryCmd {
    pub fn new(code: impl Into<String>) -> Self {
        Self { code: code.into() }
    }

    /// Parse QUERY arguments (everything after the `Q` tag)
    pub fn parse(args: &[&str]) -> Result<Command, ParseError> {
        match args {
            [code] => Ok(Command::Query(QueryCmd::new(truncate_chars(
                code,
                CODE_MAX_LEN,
            )))),
            _ => Err(ParseError::WrongArity {
                command: "Q",
                expected: 1,
                actual: args.len(),
            }),
        }
    }

    /// Execute the QUERY command
    pub fn execute(&self, store: &RecordStore) -> Reply {
        match store.lookup(&self.code) {
            Some(record) => Reply::Success {
                data: record.clone(),
            },
            None => Reply::not_found(self.code.as_str()),
        }
    }
}
