use tracing::{debug, error};

use crate::error::ParseError;
use crate::protocol::load::LoadCmd;
use crate::protocol::query::QueryCmd;
use crate::protocol::reply::Reply;
use crate::store::RecordStore;

/// Engine command types
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// L code region vl_uf vl_regiao vl_brasil period updated_at
    Load(LoadCmd),
    /// Q code
    Query(QueryCmd),
    /// X
    Exit,
}

impl Command {
    /// Parse one input line into a Command.
    ///
    /// The tag is the first whitespace-delimited token and is matched exactly.
    pub fn parse(line: &str) -> Result<Self, ParseError> {
        let mut tokens = line.split_whitespace();
        let Some(tag) = tokens.next() else {
            return Err(ParseError::Empty);
        };
        let args: Vec<&str> = tokens.collect();

        match tag {
            "L" => LoadCmd::parse(&args),
            "Q" => QueryCmd::parse(&args),
            "X" if args.is_empty() => Ok(Command::Exit),
            "X" => Err(ParseError::WrongArity {
                command: "X",
                expected: 0,
                actual: args.len(),
            }),
            _ => Err(ParseError::UnknownCommand(tag.to_string())),
        }
    }

    /// Execute the command on the given store and return the reply, if any.
    ///
    /// Loads never reply; a failed load is logged and leaves the store as it was.
    pub fn execute(&self, store: &mut RecordStore) -> Option<Reply> {
        match self {
            Command::Load(cmd) => {
                match cmd.execute(store) {
                    Ok(()) => debug!("Loaded record for {}", cmd.code),
                    Err(e) => error!("Dropping load: {}", e),
                }
                None
            }
            Command::Query(cmd) => Some(cmd.execute(store)),
            Command::Exit => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_load_command() {
        let cmd = Command::parse("L SP Sudeste 150.50 140.20 130.00 202310 20231101").unwrap();
        match cmd {
            Command::Load(load) => {
                assert_eq!(load.code, "SP");
                assert_eq!(load.values, [150.5, 140.2, 130.0]);
            }
            _ => panic!("Expected LOAD command"),
        }
    }

    #[test]
    fn test_parse_query_command() {
        let cmd = Command::parse("Q RS").unwrap();
        assert_eq!(cmd, Command::Query(QueryCmd::new("RS")));
    }

    #[test]
    fn test_parse_tolerates_extra_whitespace() {
        let cmd = Command::parse("  Q \t RS  \r").unwrap();
        assert_eq!(cmd, Command::Query(QueryCmd::new("RS")));
    }

    #[test]
    fn test_parse_exit_command() {
        assert_eq!(Command::parse("X").unwrap(), Command::Exit);
        assert!(Command::parse("X now").is_err());
    }

    #[test]
    fn test_parse_empty_line() {
        assert_eq!(Command::parse(""), Err(ParseError::Empty));
        assert_eq!(Command::parse("   "), Err(ParseError::Empty));
    }

    #[test]
    fn test_parse_unknown_command() {
        assert_eq!(
            Command::parse("D SP"),
            Err(ParseError::UnknownCommand("D".to_string()))
        );
        // tags are case sensitive
        assert!(Command::parse("q SP").is_err());
        assert!(Command::parse("LOAD SP").is_err());
    }

    #[test]
    fn test_execute_load_then_query() {
        let mut store = RecordStore::default();

        let load = Command::parse("L SP Sudeste 150.50 140.20 130.00 202310 20231101").unwrap();
        assert_eq!(load.execute(&mut store), None);

        let query = Command::parse("Q SP").unwrap();
        match query.execute(&mut store) {
            Some(Reply::Success { data }) => assert_eq!(data.region_name, "Sudeste"),
            other => panic!("Expected success reply, got {:?}", other),
        }
    }

    #[test]
    fn test_execute_query_not_found() {
        let mut store = RecordStore::default();
        let result = Command::parse("Q RS").unwrap().execute(&mut store);
        assert_eq!(result, Some(Reply::not_found("RS")));
    }

    #[test]
    fn test_execute_exit_has_no_reply() {
        let mut store = RecordStore::default();
        assert_eq!(Command::Exit.execute(&mut store), None);
    }
}
