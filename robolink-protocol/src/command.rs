//! Command identifiers, tokenizing and typed validation
//!
//! A frame body such as `MOVE:10:20` is split on `:` into non-empty tokens.
//! The first token selects a [`CommandId`]; the rest are arguments whose
//! count and types are fixed per identifier:
//!
//! | identifier | arguments                                        |
//! |------------|--------------------------------------------------|
//! | `PING`     | -                                                |
//! | `HOME`     | -                                                |
//! | `PLAY`     | -                                                |
//! | `STOP`     | -                                                |
//! | `CLEAR`    | -                                                |
//! | `SERVO`    | index (u8, < 7), angle (f32)                     |
//! | `MOVE`     | frame id (u16), duration ms (u32)                |
//! | `DEL`      | frame id (u16)                                   |
//! | `FRAME`    | id (u16), name (str), 7 angles (f32), duration ms (u32) |

use core::fmt::Write;
use core::str::FromStr;

use heapless::{String, Vec};

use crate::buffer::MAX_FRAME_BODY;
use crate::frame::{END_SYMBOL, SPLIT_SYMBOL, START_SYMBOL};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of servos on the arm
pub const SERVO_COUNT: usize = 7;

/// Maximum keyframe name length in bytes
pub const FRAME_NAME_LEN: usize = 16;

/// Maximum number of arguments in one frame, identifier not counted
pub const MAX_FIELDS: usize = 16;

/// Largest encoded frame, START and END included
pub const MAX_FRAME_LEN: usize = MAX_FRAME_BODY + 2;

/// Shortest valid frame on the wire (`#PING%`)
pub const MIN_FRAME_LEN: usize = 6;

/// Errors that can occur while parsing a frame body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandError {
    /// Body is empty, not UTF-8, or holds only separators
    MalformedFrame,
    /// First field is not a supported identifier
    UnknownIdentifier,
    /// Wrong number of arguments for the identifier
    ArityMismatch { expected: usize, found: usize },
    /// Argument at `index` (0-based, identifier excluded) failed conversion
    InvalidArgument { index: usize },
}

impl core::fmt::Display for CommandError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            CommandError::MalformedFrame => f.write_str("malformed frame"),
            CommandError::UnknownIdentifier => f.write_str("unknown command identifier"),
            CommandError::ArityMismatch { expected, found } => {
                write!(f, "expected {} arguments, found {}", expected, found)
            }
            CommandError::InvalidArgument { index } => write!(f, "invalid argument {}", index),
        }
    }
}

/// Errors that can occur while encoding a command as a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EncodeError {
    /// Encoded body would not fit the receive buffer
    TooLong,
    /// Argument at `index` would not parse back to the same value
    InvalidArgument { index: usize },
}

impl core::fmt::Display for EncodeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            EncodeError::TooLong => f.write_str("frame too long"),
            EncodeError::InvalidArgument { index } => {
                write!(f, "argument {} cannot be encoded", index)
            }
        }
    }
}

/// Supported command identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandId {
    Ping,
    Home,
    Play,
    Stop,
    Clear,
    Servo,
    Move,
    Delete,
    Frame,
}

impl CommandId {
    /// Every supported identifier
    pub const ALL: [CommandId; 9] = [
        CommandId::Ping,
        CommandId::Home,
        CommandId::Play,
        CommandId::Stop,
        CommandId::Clear,
        CommandId::Servo,
        CommandId::Move,
        CommandId::Delete,
        CommandId::Frame,
    ];

    /// Wire token for this identifier
    pub const fn as_str(self) -> &'static str {
        match self {
            CommandId::Ping => "PING",
            CommandId::Home => "HOME",
            CommandId::Play => "PLAY",
            CommandId::Stop => "STOP",
            CommandId::Clear => "CLEAR",
            CommandId::Servo => "SERVO",
            CommandId::Move => "MOVE",
            CommandId::Delete => "DEL",
            CommandId::Frame => "FRAME",
        }
    }

    /// Look up an identifier by its wire token (case-sensitive)
    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|id| id.as_str() == token)
    }

    /// Number of arguments the identifier takes
    pub const fn arity(self) -> usize {
        match self {
            CommandId::Ping
            | CommandId::Home
            | CommandId::Play
            | CommandId::Stop
            | CommandId::Clear => 0,
            CommandId::Delete => 1,
            CommandId::Servo | CommandId::Move => 2,
            // id, name, angles, duration
            CommandId::Frame => 3 + SERVO_COUNT,
        }
    }
}

/// A stored arm pose
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct KeyFrame {
    /// Frame id; playback runs in ascending id order
    pub id: u16,
    /// Display name
    pub name: String<FRAME_NAME_LEN>,
    /// Target angle per servo in degrees
    pub angles: [f32; SERVO_COUNT],
    /// Time to travel from the previous pose into this one
    pub duration_ms: u32,
}

/// A tokenized frame body
///
/// Arguments borrow from the frame body and are not yet converted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand<'a> {
    pub identifier: CommandId,
    pub arguments: Vec<&'a str, MAX_FIELDS>,
}

impl<'a> ParsedCommand<'a> {
    /// Split a frame body into identifier and argument tokens
    ///
    /// Empty tokens are skipped, so `MOVE::10:20` reads like `MOVE:10:20`.
    pub fn tokenize(body: &'a [u8]) -> Result<Self, CommandError> {
        let text = core::str::from_utf8(body).map_err(|_| CommandError::MalformedFrame)?;
        let mut tokens = text
            .split(SPLIT_SYMBOL as char)
            .filter(|token| !token.is_empty());

        let first = tokens.next().ok_or(CommandError::MalformedFrame)?;
        let identifier = CommandId::from_token(first).ok_or(CommandError::UnknownIdentifier)?;

        let mut arguments = Vec::new();
        while let Some(token) = tokens.next() {
            if arguments.push(token).is_err() {
                return Err(CommandError::ArityMismatch {
                    expected: identifier.arity(),
                    found: arguments.len() + 1 + tokens.by_ref().count(),
                });
            }
        }

        Ok(Self {
            identifier,
            arguments,
        })
    }

    /// Validate argument count and types
    pub fn to_command(&self) -> Result<Command, CommandError> {
        let expected = self.identifier.arity();
        if self.arguments.len() != expected {
            return Err(CommandError::ArityMismatch {
                expected,
                found: self.arguments.len(),
            });
        }

        let args = &self.arguments;
        let command = match self.identifier {
            CommandId::Ping => Command::Ping,
            CommandId::Home => Command::Home,
            CommandId::Play => Command::Play,
            CommandId::Stop => Command::Stop,
            CommandId::Clear => Command::Clear,
            CommandId::Servo => {
                let index: u8 = number(args, 0)?;
                if usize::from(index) >= SERVO_COUNT {
                    return Err(CommandError::InvalidArgument { index: 0 });
                }
                Command::Servo {
                    index,
                    angle: angle(args, 1)?,
                }
            }
            CommandId::Move => Command::Move {
                frame_id: number(args, 0)?,
                duration_ms: number(args, 1)?,
            },
            CommandId::Delete => Command::Delete {
                frame_id: number(args, 0)?,
            },
            CommandId::Frame => {
                let id = number(args, 0)?;
                let name = String::try_from(args[1])
                    .map_err(|_| CommandError::InvalidArgument { index: 1 })?;
                let mut angles = [0.0; SERVO_COUNT];
                for (servo, slot) in angles.iter_mut().enumerate() {
                    *slot = angle(args, 2 + servo)?;
                }
                Command::Frame(KeyFrame {
                    id,
                    name,
                    angles,
                    duration_ms: number(args, 2 + SERVO_COUNT)?,
                })
            }
        };

        Ok(command)
    }
}

fn number<T: FromStr>(args: &[&str], index: usize) -> Result<T, CommandError> {
    args[index]
        .parse()
        .map_err(|_| CommandError::InvalidArgument { index })
}

fn angle(args: &[&str], index: usize) -> Result<f32, CommandError> {
    let value: f32 = number(args, index)?;
    if !value.is_finite() {
        return Err(CommandError::InvalidArgument { index });
    }
    Ok(value)
}

/// A validated command, ready for dispatch
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Link check
    Ping,
    /// Move every servo to its initial angle
    Home,
    /// Play stored keyframes in id order
    Play,
    /// Stop playback or motion
    Stop,
    /// Forget all keyframes
    Clear,
    /// Drive one servo directly
    Servo { index: u8, angle: f32 },
    /// Travel to a stored keyframe
    Move { frame_id: u16, duration_ms: u32 },
    /// Remove a stored keyframe
    Delete { frame_id: u16 },
    /// Store or replace a keyframe
    Frame(KeyFrame),
}

impl Command {
    /// Parse a complete frame body
    pub fn parse(body: &[u8]) -> Result<Self, CommandError> {
        ParsedCommand::tokenize(body)?.to_command()
    }

    /// Identifier of this command
    pub fn id(&self) -> CommandId {
        match self {
            Command::Ping => CommandId::Ping,
            Command::Home => CommandId::Home,
            Command::Play => CommandId::Play,
            Command::Stop => CommandId::Stop,
            Command::Clear => CommandId::Clear,
            Command::Servo { .. } => CommandId::Servo,
            Command::Move { .. } => CommandId::Move,
            Command::Delete { .. } => CommandId::Delete,
            Command::Frame(_) => CommandId::Frame,
        }
    }

    /// Encode this command as a complete frame (for host tools or testing)
    ///
    /// Only commands that [`Command::parse`] would read back unchanged are
    /// encoded: servo index in range, finite angles, and a keyframe name of
    /// 1..=16 bytes free of framing symbols.
    pub fn to_frame(&self) -> Result<String<MAX_FRAME_LEN>, EncodeError> {
        self.check_encodable()?;
        let mut out = String::new();
        self.write_frame(&mut out).map_err(|_| EncodeError::TooLong)?;
        Ok(out)
    }

    fn check_encodable(&self) -> Result<(), EncodeError> {
        match self {
            Command::Servo { index, angle } => {
                if usize::from(*index) >= SERVO_COUNT {
                    return Err(EncodeError::InvalidArgument { index: 0 });
                }
                if !angle.is_finite() {
                    return Err(EncodeError::InvalidArgument { index: 1 });
                }
            }
            Command::Frame(frame) => {
                let framing = [START_SYMBOL, END_SYMBOL, SPLIT_SYMBOL];
                if frame.name.is_empty() || frame.name.bytes().any(|b| framing.contains(&b)) {
                    return Err(EncodeError::InvalidArgument { index: 1 });
                }
                if let Some(servo) = frame.angles.iter().position(|a| !a.is_finite()) {
                    return Err(EncodeError::InvalidArgument { index: 2 + servo });
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn write_frame(&self, out: &mut String<MAX_FRAME_LEN>) -> core::fmt::Result {
        let sep = SPLIT_SYMBOL as char;
        out.write_char(START_SYMBOL as char)?;
        out.write_str(self.id().as_str())?;
        match self {
            Command::Ping | Command::Home | Command::Play | Command::Stop | Command::Clear => {}
            Command::Servo { index, angle } => write!(out, "{sep}{index}{sep}{angle}")?,
            Command::Move {
                frame_id,
                duration_ms,
            } => write!(out, "{sep}{frame_id}{sep}{duration_ms}")?,
            Command::Delete { frame_id } => write!(out, "{sep}{frame_id}")?,
            Command::Frame(frame) => {
                write!(out, "{sep}{}{sep}{}", frame.id, frame.name)?;
                for angle in frame.angles {
                    write!(out, "{sep}{angle}")?;
                }
                write!(out, "{sep}{}", frame.duration_ms)?;
            }
        }
        out.write_char(END_SYMBOL as char)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(text: &str) -> String<FRAME_NAME_LEN> {
        String::try_from(text).unwrap()
    }

    #[test]
    fn test_tokenize_move() {
        let parsed = ParsedCommand::tokenize(b"MOVE:10:20").unwrap();
        assert_eq!(parsed.identifier, CommandId::Move);
        assert_eq!(parsed.arguments.as_slice(), &["10", "20"]);
    }

    #[test]
    fn test_tokenize_skips_empty_fields() {
        let parsed = ParsedCommand::tokenize(b":MOVE::10:20:").unwrap();
        assert_eq!(parsed.identifier, CommandId::Move);
        assert_eq!(parsed.arguments.as_slice(), &["10", "20"]);
    }

    #[test]
    fn test_empty_body_is_malformed() {
        assert_eq!(
            ParsedCommand::tokenize(b""),
            Err(CommandError::MalformedFrame)
        );
        assert_eq!(
            ParsedCommand::tokenize(b":::"),
            Err(CommandError::MalformedFrame)
        );
    }

    #[test]
    fn test_invalid_utf8_is_malformed() {
        assert_eq!(
            ParsedCommand::tokenize(&[0xFF, 0xFE]),
            Err(CommandError::MalformedFrame)
        );
    }

    #[test]
    fn test_unknown_identifier() {
        assert_eq!(
            Command::parse(b"JUMP:1"),
            Err(CommandError::UnknownIdentifier)
        );
        // Identifiers are case-sensitive
        assert_eq!(Command::parse(b"ping"), Err(CommandError::UnknownIdentifier));
    }

    #[test]
    fn test_parse_ping() {
        assert_eq!(Command::parse(b"PING"), Ok(Command::Ping));
    }

    #[test]
    fn test_parse_move() {
        assert_eq!(
            Command::parse(b"MOVE:10:20"),
            Ok(Command::Move {
                frame_id: 10,
                duration_ms: 20
            })
        );
    }

    #[test]
    fn test_move_missing_argument() {
        assert_eq!(
            Command::parse(b"MOVE:10"),
            Err(CommandError::ArityMismatch {
                expected: 2,
                found: 1
            })
        );
    }

    #[test]
    fn test_zero_arity_rejects_arguments() {
        assert_eq!(
            Command::parse(b"PING:1"),
            Err(CommandError::ArityMismatch {
                expected: 0,
                found: 1
            })
        );
    }

    #[test]
    fn test_non_numeric_argument() {
        assert_eq!(
            Command::parse(b"MOVE:ten:20"),
            Err(CommandError::InvalidArgument { index: 0 })
        );
        assert_eq!(
            Command::parse(b"MOVE:10:-5"),
            Err(CommandError::InvalidArgument { index: 1 })
        );
    }

    #[test]
    fn test_parse_servo() {
        assert_eq!(
            Command::parse(b"SERVO:3:42.5"),
            Ok(Command::Servo {
                index: 3,
                angle: 42.5
            })
        );
    }

    #[test]
    fn test_servo_index_out_of_range() {
        assert_eq!(
            Command::parse(b"SERVO:7:90"),
            Err(CommandError::InvalidArgument { index: 0 })
        );
    }

    #[test]
    fn test_servo_rejects_non_finite_angle() {
        assert_eq!(
            Command::parse(b"SERVO:1:NaN"),
            Err(CommandError::InvalidArgument { index: 1 })
        );
        assert_eq!(
            Command::parse(b"SERVO:1:inf"),
            Err(CommandError::InvalidArgument { index: 1 })
        );
    }

    #[test]
    fn test_parse_frame() {
        let command = Command::parse(b"FRAME:2:wave:90:170:35:90:90:90:0:1500").unwrap();
        assert_eq!(
            command,
            Command::Frame(KeyFrame {
                id: 2,
                name: name("wave"),
                angles: [90.0, 170.0, 35.0, 90.0, 90.0, 90.0, 0.0],
                duration_ms: 1500,
            })
        );
    }

    #[test]
    fn test_frame_name_too_long() {
        assert_eq!(
            Command::parse(b"FRAME:2:a_very_long_frame_name:90:170:35:90:90:90:0:1500"),
            Err(CommandError::InvalidArgument { index: 1 })
        );
    }

    #[test]
    fn test_frame_bad_angle_reports_position() {
        assert_eq!(
            Command::parse(b"FRAME:2:wave:90:170:x:90:90:90:0:1500"),
            Err(CommandError::InvalidArgument { index: 4 })
        );
    }

    #[test]
    fn test_max_fields_excludes_identifier() {
        let body = b"PING:1:2:3:4:5:6:7:8:9:10:11:12:13:14:15:16";
        let parsed = ParsedCommand::tokenize(body).unwrap();
        assert_eq!(parsed.arguments.len(), MAX_FIELDS);
        assert_eq!(
            parsed.to_command(),
            Err(CommandError::ArityMismatch {
                expected: 0,
                found: MAX_FIELDS
            })
        );
    }

    #[test]
    fn test_too_many_fields() {
        let body = b"PING:1:2:3:4:5:6:7:8:9:10:11:12:13:14:15:16:17";
        assert_eq!(
            ParsedCommand::tokenize(body),
            Err(CommandError::ArityMismatch {
                expected: 0,
                found: 17
            })
        );
    }

    #[test]
    fn test_arity_table_matches_identifiers() {
        for id in CommandId::ALL {
            assert_eq!(CommandId::from_token(id.as_str()), Some(id));
        }
        assert_eq!(CommandId::Frame.arity(), 10);
        assert_eq!(CommandId::from_token("DEL"), Some(CommandId::Delete));
    }

    #[test]
    fn test_min_frame_len_is_shortest_command() {
        let shortest = CommandId::ALL
            .iter()
            .map(|id| 2 + id.as_str().len() + 2 * id.arity())
            .min();
        assert_eq!(shortest, Some(MIN_FRAME_LEN));
        assert_eq!(Command::Ping.to_frame().unwrap().len(), MIN_FRAME_LEN);
    }

    #[test]
    fn test_to_frame_encodes_wire_format() {
        let frame = Command::Move {
            frame_id: 10,
            duration_ms: 20,
        }
        .to_frame()
        .unwrap();
        assert_eq!(frame.as_str(), "#MOVE:10:20%");

        assert_eq!(Command::Ping.to_frame().unwrap().as_str(), "#PING%");
    }

    #[test]
    fn test_to_frame_parses_back() {
        let original = Command::Frame(KeyFrame {
            id: 7,
            name: name("grab"),
            angles: [10.0, 20.5, 30.0, 40.0, 50.0, 60.0, 180.0],
            duration_ms: 250,
        });
        let frame = original.to_frame().unwrap();
        let bytes = frame.as_bytes();
        let parsed = Command::parse(&bytes[1..bytes.len() - 1]).unwrap();
        assert_eq!(parsed, original);
    }

    #[test]
    fn test_to_frame_rejects_names_that_break_framing() {
        for bad in ["", "a:b", "#go", "end%"] {
            let command = Command::Frame(KeyFrame {
                id: 1,
                name: name(bad),
                angles: [90.0; SERVO_COUNT],
                duration_ms: 100,
            });
            assert_eq!(
                command.to_frame(),
                Err(EncodeError::InvalidArgument { index: 1 }),
                "name {bad:?}"
            );
        }
    }

    #[test]
    fn test_to_frame_rejects_non_finite_frame_angle() {
        let mut angles = [90.0; SERVO_COUNT];
        angles[3] = f32::NAN;
        let command = Command::Frame(KeyFrame {
            id: 1,
            name: name("wave"),
            angles,
            duration_ms: 100,
        });
        assert_eq!(
            command.to_frame(),
            Err(EncodeError::InvalidArgument { index: 5 })
        );
    }

    #[test]
    fn test_to_frame_rejects_bad_servo() {
        let out_of_range = Command::Servo {
            index: SERVO_COUNT as u8,
            angle: 90.0,
        };
        assert_eq!(
            out_of_range.to_frame(),
            Err(EncodeError::InvalidArgument { index: 0 })
        );

        let infinite = Command::Servo {
            index: 2,
            angle: f32::INFINITY,
        };
        assert_eq!(
            infinite.to_frame(),
            Err(EncodeError::InvalidArgument { index: 1 })
        );
    }

    #[test]
    fn test_to_frame_servo_parses_back() {
        let original = Command::Servo {
            index: 6,
            angle: 42.5,
        };
        let frame = original.to_frame().unwrap();
        let bytes = frame.as_bytes();
        assert_eq!(Command::parse(&bytes[1..bytes.len() - 1]), Ok(original));
    }
}
