//! Read-only views into memory for diagnostics. Nothing in here changes the
//! state of the bus.

pub mod fmt;

use crate::address::region_name;
use crate::memory::MemoryBus;
use std::fmt as std_fmt;

pub use self::fmt::FmtNum;

pub const BYTES_PER_ROW: usize = 16;

/// Printable ASCII, i.e. what the dump shows as a character instead of `.`
pub fn is_printable(b: u8) -> bool {
    (32..=126).contains(&b)
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DumpError {
    /// `start` lies behind `end`
    InvertedRange { start: u16, end: u16 },
}

impl std_fmt::Display for DumpError {
    fn fmt(&self, f: &mut std_fmt::Formatter<'_>) -> std_fmt::Result {
        match self {
            DumpError::InvertedRange { start, end } => write!(
                f,
                "start address ({:#06X}) > end address ({:#06X})",
                start, end
            ),
        }
    }
}

impl std::error::Error for DumpError {}

/// Up to 16 consecutive bytes, starting at `addr`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DumpRow {
    addr: u16,
    bytes: Vec<u8>,
}

impl DumpRow {
    pub fn addr(&self) -> u16 {
        self.addr
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn ascii(&self) -> String {
        self.bytes
            .iter()
            .map(|&b| if is_printable(b) { char::from(b) } else { '.' })
            .collect()
    }
}

/// Snapshot of an inclusive address range as seen through [`MemoryBus::read8`],
/// so unmapped bytes show up as `0xFF`
#[derive(Debug, Clone)]
pub struct MemoryDump {
    start: u16,
    end: u16,
    rows: Vec<DumpRow>,
}

impl MemoryDump {
    pub(crate) fn capture(
        bus: &MemoryBus,
        start: u16,
        end: u16,
    ) -> Result<MemoryDump, DumpError> {
        if start > end {
            let err = DumpError::InvertedRange { start, end };
            log::error!("Refusing to dump memory: {}", err);
            return Err(err);
        }

        // Walk in u32 so a range ending at 0xFFFF terminates
        let (first, last) = (start as u32, end as u32);
        let rows = (first..=last)
            .step_by(BYTES_PER_ROW)
            .map(|row_addr| {
                let row_end = (row_addr + BYTES_PER_ROW as u32 - 1).min(last);

                DumpRow {
                    addr: row_addr as u16,
                    bytes: (row_addr..=row_end)
                        .map(|addr| bus.read8(addr as u16))
                        .collect(),
                }
            })
            .collect();

        Ok(MemoryDump { start, end, rows })
    }

    pub fn start(&self) -> u16 {
        self.start
    }

    pub fn end(&self) -> u16 {
        self.end
    }

    pub fn rows(&self) -> &[DumpRow] {
        &self.rows
    }

    /// All captured bytes in address order
    pub fn bytes(&self) -> impl Iterator<Item = u8> + '_ {
        self.rows.iter().flat_map(|row| row.bytes.iter().copied())
    }

    /// Name of the region the dump starts in
    pub fn region_name(&self) -> &'static str {
        region_name(self.start)
    }
}

const COLUMN_HEADER: &str =
    "Address  : 00 01 02 03 04 05 06 07 08 09 0A 0B 0C 0D 0E 0F | ASCII";
const SEPARATOR: &str =
    "---------|------------------------------------------------|----------------";

impl std_fmt::Display for MemoryDump {
    fn fmt(&self, f: &mut std_fmt::Formatter<'_>) -> std_fmt::Result {
        writeln!(
            f,
            "Memory dump from {:#06X} to {:#06X} ({}):",
            self.start,
            self.end,
            self.region_name()
        )?;
        writeln!(f, "{}", COLUMN_HEADER)?;
        writeln!(f, "{}", SEPARATOR)?;

        for row in &self.rows {
            write!(f, "{:#06X} : ", row.addr)?;

            for b in &row.bytes {
                write!(f, "{:02X} ", b)?;
            }
            for _ in row.bytes.len()..BYTES_PER_ROW {
                write!(f, "   ")?;
            }

            writeln!(f, "| {}", row.ascii())?;
        }

        Ok(())
    }
}
