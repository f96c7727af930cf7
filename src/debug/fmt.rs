use super::{MemoryDump, BYTES_PER_ROW, COLUMN_HEADER, SEPARATOR};
use crate::address::is_valid_address;
use console::{style, StyledObject};
use std::fmt::Write;

/// Formats u8 as blue (value) and u16 as yellow (address)
pub trait FmtNum {
    fn fmt_val(self) -> StyledObject<String>;
}

impl FmtNum for u8 {
    fn fmt_val(self) -> StyledObject<String> {
        style(format!("{:02X}", self)).blue()
    }
}

impl FmtNum for u16 {
    fn fmt_val(self) -> StyledObject<String> {
        style(format!("{:#06X}", self)).yellow()
    }
}

impl MemoryDump {
    /// Same layout as the `Display` impl, with addresses and bytes colored for
    /// a terminal. Open-bus bytes of unmapped addresses are dimmed.
    pub fn styled(&self) -> String {
        let mut out = String::new();

        // Writing into a String can't fail
        let _ = self.write_styled(&mut out);

        out
    }

    fn write_styled(&self, out: &mut String) -> std::fmt::Result {
        writeln!(
            out,
            "Memory dump from {} to {} ({}):",
            self.start.fmt_val(),
            self.end.fmt_val(),
            style(self.region_name()).green()
        )?;
        writeln!(out, "{}", style(COLUMN_HEADER).bold())?;
        writeln!(out, "{}", SEPARATOR)?;

        for row in &self.rows {
            write!(out, "{} : ", row.addr.fmt_val())?;

            for (i, &b) in row.bytes.iter().enumerate() {
                if is_valid_address(row.addr.wrapping_add(i as u16)) {
                    write!(out, "{} ", b.fmt_val())?;
                } else {
                    write!(out, "{} ", style(format!("{:02X}", b)).dim())?;
                }
            }
            for _ in row.bytes.len()..BYTES_PER_ROW {
                write!(out, "   ")?;
            }

            writeln!(out, "| {}", row.ascii())?;
        }

        Ok(())
    }
}
