//! Typed view of the `/Kontrol/*` message protocol.
//!
//! A [`Transport`](crate::Transport) owns the wire encoding and hands the
//! controller [`InboundPacket`]s: an address plus ordered [`Arg`]s.
//! [`Inbound::parse()`] dispatches on the address pattern and checks the
//! argument list; [`Outbound`] is the typed form of everything the
//! controller sends.
//!
//! Every message that concerns the rack carries the rack identity as its
//! first argument:
//!
//! ```text
//! /Kontrol/module  "127.0.0.1:6001" "a1" "Brds Mono" "synth/brdsmono"
//! /Kontrol/param   "127.0.0.1:6001" "a1" "pct" "o_colour" "Colour" 0.0 100.0 50.0
//! /Kontrol/changed "127.0.0.1:6001" "s1" "r-chout-l-pan-3" 0.0
//! /Kontrol/ping    9001 5
//! ```

use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

use orac::rack::{ParamKind, RackError};

/// Common prefix of every protocol address.
pub const ADDRESS_PREFIX: &str = "/Kontrol/";

/// One positional argument of a protocol message.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    Str(String),
    Int(i32),
    Float(f32),
    Bool(bool),
}

impl From<&str> for Arg {
    fn from(s: &str) -> Self {
        Arg::Str(s.into())
    }
}

impl From<String> for Arg {
    fn from(s: String) -> Self {
        Arg::Str(s)
    }
}

impl From<i32> for Arg {
    fn from(i: i32) -> Self {
        Arg::Int(i)
    }
}

impl From<f32> for Arg {
    fn from(f: f32) -> Self {
        Arg::Float(f)
    }
}

impl From<bool> for Arg {
    fn from(b: bool) -> Self {
        Arg::Bool(b)
    }
}

/// A decoded datagram as delivered by the transport.
#[derive(Debug, Clone, PartialEq)]
pub struct InboundPacket {
    pub address: String,
    pub args: Vec<Arg>,
}

impl InboundPacket {
    pub fn new(address: &str, args: Vec<Arg>) -> Self {
        Self {
            address: address.into(),
            args,
        }
    }
}

/// Reasons an inbound packet is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ProtocolError {
    /// No handler is registered for the address.
    UnknownAddress,
    /// Argument at this position is missing.
    MissingArgument(usize),
    /// Argument at this position has an unusable type.
    WrongArgumentType(usize),
    /// A `param` declaration used an unknown type tag or an inverted range.
    InvalidParam(RackError),
}

impl From<RackError> for ProtocolError {
    fn from(e: RackError) -> Self {
        ProtocolError::InvalidParam(e)
    }
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ProtocolError::UnknownAddress => write!(f, "unknown address"),
            ProtocolError::MissingArgument(i) => write!(f, "missing argument {}", i),
            ProtocolError::WrongArgumentType(i) => write!(f, "wrong type for argument {}", i),
            ProtocolError::InvalidParam(e) => write!(f, "invalid param declaration: {}", e),
        }
    }
}

/// Inbound messages, one variant per address.
#[derive(Debug, Clone, PartialEq)]
pub enum Inbound {
    /// New rack identity: the remote session restarted.
    Rack { rack: String, host: String, port: i32 },
    Module { rack: String, slot: String, label: String, module: String },
    Page { rack: String, slot: String, page: String, label: String, params: Vec<String> },
    /// Parameter declaration. `range` is absent for boolean parameters.
    Param {
        rack: String,
        slot: String,
        kind: ParamKind,
        param: String,
        label: String,
        range: Option<(f32, f32)>,
        default: f32,
    },
    Changed { rack: String, slot: String, param: String, value: f32 },
    LoadPreset { rack: String, name: String },
    LoadModule { rack: String, slot: String, module: String },
    /// Resource announcement; `kind` is kept raw so unknown kinds can be
    /// logged and ignored.
    Resource { rack: String, kind: String, value: String },
    MidiLearn(bool),
    ModLearn(bool),
    Ping { keepalive_secs: i32 },
    PublishStart,
    PublishRackFinished { rack: String },
    /// Any other `publish*` marker, by name. Carries no state.
    Publish(String),
}

impl Inbound {
    /// Dispatch on the address pattern and decode the arguments.
    pub fn parse(packet: &InboundPacket) -> Result<Self, ProtocolError> {
        let name = packet
            .address
            .strip_prefix(ADDRESS_PREFIX)
            .ok_or(ProtocolError::UnknownAddress)?;
        let args = Args(&packet.args);

        let message = match name {
            "rack" => Inbound::Rack {
                rack: args.string(0)?,
                host: args.string(1)?,
                port: args.int(2)?,
            },
            "module" => Inbound::Module {
                rack: args.string(0)?,
                slot: args.string(1)?,
                label: args.string(2)?,
                module: args.string(3)?,
            },
            "page" => {
                let mut params = Vec::new();
                for i in 4..packet.args.len() {
                    params.push(args.string(i)?);
                }
                Inbound::Page {
                    rack: args.string(0)?,
                    slot: args.string(1)?,
                    page: args.string(2)?,
                    label: args.string(3)?,
                    params,
                }
            }
            "param" => Self::parse_param(args)?,
            "changed" => Inbound::Changed {
                rack: args.string(0)?,
                slot: args.string(1)?,
                param: args.string(2)?,
                value: args.float(3)?,
            },
            "loadPreset" => Inbound::LoadPreset {
                rack: args.string(0)?,
                name: args.string(1)?,
            },
            "loadModule" => Inbound::LoadModule {
                rack: args.string(0)?,
                slot: args.string(1)?,
                module: args.string(2)?,
            },
            "resource" => Inbound::Resource {
                rack: args.string(0)?,
                kind: args.string(1)?,
                value: args.string(2)?,
            },
            "midiLearn" => Inbound::MidiLearn(args.boolean(0)?),
            "modLearn" => Inbound::ModLearn(args.boolean(0)?),
            "ping" => Inbound::Ping {
                keepalive_secs: match packet.args.len() {
                    0 => 0,
                    n => args.int(n - 1)?,
                },
            },
            "publishStart" => Inbound::PublishStart,
            "publishRackFinished" => Inbound::PublishRackFinished {
                rack: args.string(0)?,
            },
            other if other.starts_with("publish") => Inbound::Publish(other.into()),
            _ => return Err(ProtocolError::UnknownAddress),
        };
        Ok(message)
    }

    // rack slot type id label [min max] default
    fn parse_param(args: Args<'_>) -> Result<Self, ProtocolError> {
        let kind = ParamKind::from_tag(args.str(2)?)?;
        let len = args.0.len();
        if len < 6 {
            return Err(ProtocolError::MissingArgument(len));
        }
        let range = if len >= 8 {
            Some((args.float(5)?, args.float(6)?))
        } else if kind == ParamKind::Boolean {
            None
        } else {
            return Err(ProtocolError::MissingArgument(len));
        };
        Ok(Inbound::Param {
            rack: args.string(0)?,
            slot: args.string(1)?,
            kind,
            param: args.string(3)?,
            label: args.string(4)?,
            range,
            default: args.float(len - 1)?,
        })
    }
}

/// Positional accessors with type checking.
#[derive(Clone, Copy)]
struct Args<'a>(&'a [Arg]);

impl<'a> Args<'a> {
    fn get(&self, i: usize) -> Result<&'a Arg, ProtocolError> {
        self.0.get(i).ok_or(ProtocolError::MissingArgument(i))
    }

    fn str(&self, i: usize) -> Result<&'a str, ProtocolError> {
        match self.get(i)? {
            Arg::Str(s) => Ok(s),
            _ => Err(ProtocolError::WrongArgumentType(i)),
        }
    }

    fn string(&self, i: usize) -> Result<String, ProtocolError> {
        self.str(i).map(String::from)
    }

    fn float(&self, i: usize) -> Result<f32, ProtocolError> {
        match self.get(i)? {
            Arg::Float(f) => Ok(*f),
            Arg::Int(n) => Ok(*n as f32),
            _ => Err(ProtocolError::WrongArgumentType(i)),
        }
    }

    fn int(&self, i: usize) -> Result<i32, ProtocolError> {
        match self.get(i)? {
            Arg::Int(n) => Ok(*n),
            Arg::Float(f) => Ok(*f as i32),
            _ => Err(ProtocolError::WrongArgumentType(i)),
        }
    }

    fn boolean(&self, i: usize) -> Result<bool, ProtocolError> {
        match self.get(i)? {
            Arg::Bool(b) => Ok(*b),
            Arg::Int(n) => Ok(*n != 0),
            _ => Err(ProtocolError::WrongArgumentType(i)),
        }
    }
}

/// Messages the controller sends to the rack.
#[derive(Debug, Clone, PartialEq)]
pub enum Outbound {
    /// `keepalive_secs == 0` asks the rack to publish its full state.
    Ping { listen_port: i32, keepalive_secs: i32 },
    Changed { rack: String, slot: String, param: String, value: f32 },
    LoadModule { rack: String, slot: String, module: String },
    LoadPreset { rack: String, name: String },
    SavePreset { rack: String, name: String },
    MidiLearn(bool),
    ModulationLearn(bool),
}

impl Outbound {
    pub fn address(&self) -> &'static str {
        match self {
            Outbound::Ping { .. } => "/Kontrol/ping",
            Outbound::Changed { .. } => "/Kontrol/changed",
            Outbound::LoadModule { .. } => "/Kontrol/loadModule",
            Outbound::LoadPreset { .. } => "/Kontrol/loadPreset",
            Outbound::SavePreset { .. } => "/Kontrol/savePreset",
            Outbound::MidiLearn(_) => "/Kontrol/midiLearn",
            Outbound::ModulationLearn(_) => "/Kontrol/modulationLearn",
        }
    }

    /// Arguments in wire order.
    pub fn args(&self) -> Vec<Arg> {
        match self {
            Outbound::Ping {
                listen_port,
                keepalive_secs,
            } => vec![Arg::Int(*listen_port), Arg::Int(*keepalive_secs)],
            Outbound::Changed {
                rack,
                slot,
                param,
                value,
            } => vec![
                rack.as_str().into(),
                slot.as_str().into(),
                param.as_str().into(),
                Arg::Float(*value),
            ],
            Outbound::LoadModule { rack, slot, module } => vec![
                rack.as_str().into(),
                slot.as_str().into(),
                module.as_str().into(),
            ],
            Outbound::LoadPreset { rack, name } | Outbound::SavePreset { rack, name } => {
                vec![rack.as_str().into(), name.as_str().into()]
            }
            Outbound::MidiLearn(on) | Outbound::ModulationLearn(on) => vec![Arg::Bool(*on)],
        }
    }
}
