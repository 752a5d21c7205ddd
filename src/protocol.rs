//! Communication Protocols
//!
//! CAT (Computer Aided Transceiver) line assembly, command parsing and
//! response formatting. Commands are a two-letter prefix, an optional
//! argument and a `;` terminator. Anything the panel does not understand,
//! or cannot honor, is dropped without a reply.

use core::fmt::{self, Write};

use heapless::{String, Vec};

use crate::config::{CAT_IDENTITY, CAT_LINE_CAPACITY, CAT_RESPONSE_CAPACITY, CAT_TERMINATOR};
use crate::hal::{SynthesizerPort, TxEnableOutput};
use crate::radio::controls::Controls;
use crate::types::Frequency;

/// One terminated command, without its terminator
pub type CommandLine = Vec<u8, CAT_LINE_CAPACITY>;

/// CAT line assembler
///
/// Collects bytes until the terminator. Bytes that arrive once the line
/// is full are dropped; the terminator still closes out what was kept.
pub struct CatParser {
    /// Command buffer
    buffer: CommandLine,
    /// Set when bytes were dropped from the current line
    truncated: bool,
}

impl CatParser {
    /// Create a new CAT parser
    #[must_use]
    pub const fn new() -> Self {
        Self {
            buffer: Vec::new(),
            truncated: false,
        }
    }

    /// Feed a byte to the parser
    /// Returns the completed line when `byte` is the terminator
    pub fn feed(&mut self, byte: u8) -> Option<CommandLine> {
        if byte == CAT_TERMINATOR {
            if self.truncated {
                #[cfg(feature = "embedded")]
                defmt::debug!("CAT line truncated to {} bytes", self.buffer.len());
                self.truncated = false;
            }
            return Some(core::mem::take(&mut self.buffer));
        }

        if self.buffer.push(byte).is_err() {
            self.truncated = true;
        }
        None
    }

    /// Bytes collected for the line in progress
    #[must_use]
    pub fn pending(&self) -> &[u8] {
        &self.buffer
    }

    /// Discard the line in progress
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.truncated = false;
    }
}

impl Default for CatParser {
    fn default() -> Self {
        Self::new()
    }
}

/// CAT command parsed from a terminated line
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CatCommand {
    /// `TX;` read transmit state
    ReadTx,
    /// `TX0;` / `TX1;` set transmit state
    SetTx(bool),
    /// `FA;` read frequency
    ReadFrequency,
    /// `FAn…;` set frequency (raw value, range-checked on execution)
    SetFrequency(u32),
    /// `AI;` read auto-info flag
    ReadAutoInfo,
    /// `AI0;` / `AI1;` set auto-info flag
    SetAutoInfo(bool),
    /// `ID;` read transceiver identity
    ReadId,
    /// `MD0;` read operating mode
    ReadMode,
    /// `SH…;` read filter shift
    ReadShift,
    /// `NA…;` read narrow filter
    ReadNarrow,
    /// `IF…;` read transceiver status
    ReadStatus,
    /// `ST;` read split flag
    ReadSplit,
    /// `ST0;` / `ST1;` set split flag
    SetSplit(bool),
}

impl CatCommand {
    /// Parse a line (terminator already removed).
    ///
    /// Returns None for unknown prefixes and malformed arguments.
    #[must_use]
    pub fn parse(line: &[u8]) -> Option<Self> {
        if line.len() < 2 {
            return None;
        }
        let (prefix, arg) = line.split_at(2);

        match prefix {
            b"TX" => Self::flag(arg, Self::ReadTx, Self::SetTx),
            b"FA" => {
                if arg.is_empty() {
                    Some(Self::ReadFrequency)
                } else {
                    Some(Self::SetFrequency(parse_unsigned(arg)))
                }
            }
            b"AI" => Self::flag(arg, Self::ReadAutoInfo, Self::SetAutoInfo),
            b"ID" => Some(Self::ReadId),
            b"MD" => (arg == b"0").then_some(Self::ReadMode),
            b"SH" => Some(Self::ReadShift),
            b"NA" => Some(Self::ReadNarrow),
            b"IF" => Some(Self::ReadStatus),
            b"ST" => Self::flag(arg, Self::ReadSplit, Self::SetSplit),
            _ => None,
        }
    }

    /// Query when `arg` is empty, otherwise set from its first byte.
    /// Anything after the `0` or `1` is ignored.
    fn flag(arg: &[u8], read: Self, set: fn(bool) -> Self) -> Option<Self> {
        match arg {
            [] => Some(read),
            [b'0', ..] => Some(set(false)),
            [b'1', ..] => Some(set(true)),
            _ => None,
        }
    }

    /// Run the command against the panel controls.
    ///
    /// Queries produce exactly one response; sets produce none.
    pub fn execute<S, T>(self, controls: &mut Controls<S, T>) -> Option<CatResponse>
    where
        S: SynthesizerPort,
        T: TxEnableOutput,
    {
        match self {
            Self::ReadTx => Some(CatResponse::tx(controls.state().tx_enabled())),
            Self::SetTx(on) => {
                controls.set_tx(on);
                None
            }
            Self::ReadFrequency => Some(CatResponse::frequency(controls.state().frequency())),
            Self::SetFrequency(hz) => {
                controls.set_frequency(hz);
                None
            }
            Self::ReadAutoInfo => Some(CatResponse::auto_info(controls.state().auto_info())),
            Self::SetAutoInfo(on) => {
                controls.set_auto_info(on);
                None
            }
            Self::ReadId => Some(CatResponse::id()),
            Self::ReadMode => Some(CatResponse::mode()),
            Self::ReadShift => Some(CatResponse::shift()),
            Self::ReadNarrow => Some(CatResponse::narrow()),
            Self::ReadStatus => Some(CatResponse::status(controls.state().frequency())),
            Self::ReadSplit => Some(CatResponse::split(controls.state().split())),
            Self::SetSplit(on) => {
                controls.set_split(on);
                None
            }
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for CatCommand {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::ReadTx => defmt::write!(f, "ReadTX"),
            Self::SetTx(on) => defmt::write!(f, "SetTX({})", on),
            Self::ReadFrequency => defmt::write!(f, "ReadFreq"),
            Self::SetFrequency(hz) => defmt::write!(f, "SetFreq({})", hz),
            Self::ReadAutoInfo => defmt::write!(f, "ReadAI"),
            Self::SetAutoInfo(on) => defmt::write!(f, "SetAI({})", on),
            Self::ReadSplit => defmt::write!(f, "ReadST"),
            Self::SetSplit(on) => defmt::write!(f, "SetST({})", on),
            _ => defmt::write!(f, "CAT(...)"),
        }
    }
}

/// Parse and execute one line. None means nothing is sent back.
pub fn dispatch<S, T>(line: &[u8], controls: &mut Controls<S, T>) -> Option<CatResponse>
where
    S: SynthesizerPort,
    T: TxEnableOutput,
{
    let Some(command) = CatCommand::parse(line) else {
        #[cfg(feature = "embedded")]
        defmt::debug!("ignored CAT line {=[u8]:a}", line);
        return None;
    };
    #[cfg(feature = "embedded")]
    defmt::trace!("CAT {}", command);
    command.execute(controls)
}

/// Leading decimal value of `arg`: optional whitespace and `+`, then
/// digits up to the first non-digit. No digits gives 0; overflow saturates.
fn parse_unsigned(arg: &[u8]) -> u32 {
    let mut bytes = arg
        .iter()
        .copied()
        .skip_while(u8::is_ascii_whitespace)
        .peekable();
    if bytes.peek() == Some(&b'+') {
        bytes.next();
    }
    bytes
        .take_while(u8::is_ascii_digit)
        .fold(0u32, |acc, digit| {
            acc.saturating_mul(10).saturating_add(u32::from(digit - b'0'))
        })
}

/// CAT response line, terminator included
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CatResponse {
    buffer: String<CAT_RESPONSE_CAPACITY>,
}

impl CatResponse {
    fn build(args: fmt::Arguments<'_>) -> Self {
        let mut buffer = String::new();
        // Every response fits CAT_RESPONSE_CAPACITY
        let _ = buffer.write_fmt(args);
        Self { buffer }
    }

    fn flag(prefix: &str, on: bool) -> Self {
        Self::build(format_args!("{prefix}{};", u8::from(on)))
    }

    /// `TX{0|1};`
    #[must_use]
    pub fn tx(on: bool) -> Self {
        Self::flag("TX", on)
    }

    /// `FA` + 9-digit zero-padded Hz
    #[must_use]
    pub fn frequency(freq: Frequency) -> Self {
        Self::build(format_args!("FA{:09};", freq.as_hz()))
    }

    /// `AI{0|1};`
    #[must_use]
    pub fn auto_info(on: bool) -> Self {
        Self::flag("AI", on)
    }

    /// Fixed identity, `ID0650;`
    #[must_use]
    pub fn id() -> Self {
        Self::build(format_args!("ID{CAT_IDENTITY};"))
    }

    /// Fixed mode report, `MD0C;`
    #[must_use]
    pub fn mode() -> Self {
        Self::build(format_args!("MD0C;"))
    }

    /// Fixed shift report, `SH0000;`
    #[must_use]
    pub fn shift() -> Self {
        Self::build(format_args!("SH0000;"))
    }

    /// Fixed narrow-filter report, `NA00;`
    #[must_use]
    pub fn narrow() -> Self {
        Self::build(format_args!("NA00;"))
    }

    /// Status report: `IF001` + 9-digit Hz + `+000000C00000;`
    #[must_use]
    pub fn status(freq: Frequency) -> Self {
        Self::build(format_args!("IF001{:09}+000000C00000;", freq.as_hz()))
    }

    /// `ST{0|1};`
    #[must_use]
    pub fn split(on: bool) -> Self {
        Self::flag("ST", on)
    }

    /// Get the response string
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    /// Get the response bytes
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.buffer.as_bytes()
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for CatResponse {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{=str}", self.buffer.as_str());
    }
}
