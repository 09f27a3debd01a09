pub mod append;
pub mod dbsize;
pub mod decr;
pub mod decrby;
pub mod del;
pub mod executable;
pub mod exists;
pub mod get;
pub mod incr;
pub mod incrby;
pub mod mget;
pub mod mset;
pub mod ping;
pub mod rename;
pub mod set;
pub mod time;
pub mod touch;

use bytes::Bytes;
use std::vec;
use thiserror::Error as ThisError;

use crate::commands::executable::Executable;
use crate::frame::Frame;
use crate::request::Request;
use crate::store::Store;
use crate::Error;

use append::Append;
use dbsize::DBSize;
use decr::Decr;
use decrby::DecrBy;
use del::Del;
use exists::Exists;
use get::Get;
use incr::Incr;
use incrby::IncrBy;
use mget::Mget;
use mset::Mset;
use ping::Ping;
use rename::Rename;
use set::Set;
use time::Time;
use touch::Touch;

#[derive(Debug, PartialEq)]
pub enum Command {
    Append(Append),
    DBsize(DBSize),
    Decr(Decr),
    DecrBy(DecrBy),
    Del(Del),
    Exists(Exists),
    Get(Get),
    Incr(Incr),
    IncrBy(IncrBy),
    Mget(Mget),
    Mset(Mset),
    Ping(Ping),
    Rename(Rename),
    Set(Set),
    Time(Time),
    Touch(Touch),
}

/// Builds a [`Command`] out of the arguments that follow the command name.
pub type CommandParseFn = fn(&mut CommandParser) -> Result<Command, CommandParserError>;

/// Every supported command, keyed by its lower-cased name.
pub static COMMANDS: &[(&str, CommandParseFn)] = &[
    ("append", |p| Append::try_from(p).map(Command::Append)),
    ("dbsize", |p| DBSize::try_from(p).map(Command::DBsize)),
    ("decr", |p| Decr::try_from(p).map(Command::Decr)),
    ("decrby", |p| DecrBy::try_from(p).map(Command::DecrBy)),
    ("del", |p| Del::try_from(p).map(Command::Del)),
    ("exists", |p| Exists::try_from(p).map(Command::Exists)),
    ("get", |p| Get::try_from(p).map(Command::Get)),
    ("incr", |p| Incr::try_from(p).map(Command::Incr)),
    ("incrby", |p| IncrBy::try_from(p).map(Command::IncrBy)),
    ("mget", |p| Mget::try_from(p).map(Command::Mget)),
    ("mset", |p| Mset::try_from(p).map(Command::Mset)),
    ("ping", |p| Ping::try_from(p).map(Command::Ping)),
    ("rename", |p| Rename::try_from(p).map(Command::Rename)),
    ("set", |p| Set::try_from(p).map(Command::Set)),
    ("time", |p| Time::try_from(p).map(Command::Time)),
    ("touch", |p| Touch::try_from(p).map(Command::Touch)),
];

fn lookup(name: &str) -> Option<CommandParseFn> {
    COMMANDS
        .iter()
        .find(|(command, _)| *command == name)
        .map(|(_, parse)| *parse)
}

/// Runs a decoded request against the store. Every failure, from an unknown command to an
/// operand that is not an integer, is turned into an error reply.
pub fn execute(request: Request, store: &Store) -> Frame {
    let cmd = match Command::try_from(request) {
        Ok(cmd) => cmd,
        Err(err) => return Frame::Error(err.to_string()),
    };

    cmd.exec(store.clone())
        .unwrap_or_else(|err| Frame::Error(err.to_string()))
}

impl Executable for Command {
    fn exec(self, store: Store) -> Result<Frame, Error> {
        match self {
            Command::Append(cmd) => cmd.exec(store),
            Command::DBsize(cmd) => cmd.exec(store),
            Command::Decr(cmd) => cmd.exec(store),
            Command::DecrBy(cmd) => cmd.exec(store),
            Command::Del(cmd) => cmd.exec(store),
            Command::Exists(cmd) => cmd.exec(store),
            Command::Get(cmd) => cmd.exec(store),
            Command::Incr(cmd) => cmd.exec(store),
            Command::IncrBy(cmd) => cmd.exec(store),
            Command::Mget(cmd) => cmd.exec(store),
            Command::Mset(cmd) => cmd.exec(store),
            Command::Ping(cmd) => cmd.exec(store),
            Command::Rename(cmd) => cmd.exec(store),
            Command::Set(cmd) => cmd.exec(store),
            Command::Time(cmd) => cmd.exec(store),
            Command::Touch(cmd) => cmd.exec(store),
        }
    }
}

impl TryFrom<Request> for Command {
    type Error = CommandParserError;

    fn try_from(request: Request) -> Result<Self, Self::Error> {
        let mut parts = request.into_parts().into_iter();

        let command = parts
            .next()
            .map(|name| name.to_lowercase())
            .ok_or(CommandParserError::EmptyCommand)?;

        let parse = lookup(&command).ok_or_else(|| CommandParserError::UnknownCommand {
            command: command.clone(),
        })?;

        let parser = &mut CommandParser { parts };

        parse(parser).map_err(|err| match err {
            CommandParserError::EndOfStream | CommandParserError::TrailingArguments => {
                CommandParserError::WrongNumberOfArguments { command }
            }
            err => err,
        })
    }
}

pub struct CommandParser {
    parts: vec::IntoIter<String>,
}

impl CommandParser {
    fn next_string(&mut self) -> Result<String, CommandParserError> {
        self.parts.next().ok_or(CommandParserError::EndOfStream)
    }

    fn next_bytes(&mut self) -> Result<Bytes, CommandParserError> {
        self.next_string().map(Bytes::from)
    }

    fn next_integer(&mut self) -> Result<i64, CommandParserError> {
        self.next_string()?
            .parse::<i64>()
            .map_err(|_| CommandParserError::NotAnInteger)
    }

    /// Drains every argument left, failing when there is none.
    fn remaining_strings(&mut self) -> Result<Vec<String>, CommandParserError> {
        let rest: Vec<String> = self.parts.by_ref().collect();
        if rest.is_empty() {
            return Err(CommandParserError::EndOfStream);
        }
        Ok(rest)
    }

    /// Fails if the command was given more arguments than it takes.
    fn finish(&mut self) -> Result<(), CommandParserError> {
        match self.parts.next() {
            Some(_) => Err(CommandParserError::TrailingArguments),
            None => Ok(()),
        }
    }
}

/// Errors raised while turning a request into a command. The message is sent to the client as is.
#[derive(Debug, ThisError, PartialEq)]
pub enum CommandParserError {
    #[error("empty command")]
    EmptyCommand,
    #[error("undefined command {command}")]
    UnknownCommand { command: String },
    #[error("wrong number of arguments for '{command}' command")]
    WrongNumberOfArguments { command: String },
    #[error("syntax error")]
    SyntaxError,
    #[error("value is not an integer or out of range")]
    NotAnInteger,
    #[error("protocol error; attempting to extract a value failed due to the request being fully consumed")]
    EndOfStream,
    #[error("protocol error; unexpected trailing arguments")]
    TrailingArguments,
}
