//! The CPU's view of memory. [`MemoryBus`] owns every buffer that backs the
//! address space and is the only way to reach them.

mod internal_mem;

use crate::address::{self, Access, MemAddr, Region, OPEN_BUS};
use crate::cartridge::{CartridgeRom, RomLoadError};
use crate::debug::{DumpError, MemoryDump};
use internal_mem::InternalMem;
use std::path::Path;

/// Cartridge ROM plus console-internal RAM, addressed through a single
/// 16 bit bus. Create one per emulator session.
pub struct MemoryBus {
    cartridge: CartridgeRom,
    internal: InternalMem,
}

impl MemoryBus {
    /// A bus with all buffers zeroed and no cartridge inserted
    pub fn new() -> MemoryBus {
        MemoryBus {
            cartridge: CartridgeRom::new(),
            internal: InternalMem::new(),
        }
    }

    /// Zeroes every buffer and forgets the inserted cartridge
    pub fn clear(&mut self) {
        self.cartridge.clear();
        self.internal.clear();
        log::info!("Memory cleared");
    }

    pub fn is_rom_loaded(&self) -> bool {
        self.cartridge.is_loaded()
    }

    /// Reads a byte. Addresses without backing storage read as `0xFF`.
    pub fn read8(&self, addr: u16) -> u8 {
        match MemAddr::from(addr) {
            MemAddr::Mapped(Region::Rom, offset) => self.cartridge.read(offset),
            MemAddr::Mapped(region, offset) => self
                .internal
                .buffer(region)
                .map(|buf| buf[offset as usize])
                .unwrap_or(OPEN_BUS),
            MemAddr::Unmapped(_) => OPEN_BUS,
        }
    }

    /// Writes a byte. Writes to unmapped addresses are dropped, writes to
    /// read-only regions are dropped and reported.
    pub fn write8(&mut self, addr: u16, val: u8) {
        match MemAddr::from(addr) {
            MemAddr::Mapped(region, offset) => {
                if !region.access().contains(Access::WRITE) {
                    log::warn!(
                        "Rejected write of {:#04X} to read-only {} at {:#06X}",
                        val,
                        region.name(),
                        addr
                    );
                    return;
                }

                if let Some(buf) = self.internal.buffer_mut(region) {
                    buf[offset as usize] = val;
                }
            }
            MemAddr::Unmapped(_) => {
                log::trace!("Dropped write of {:#04X} to unmapped {:#06X}", val, addr)
            }
        }
    }

    /// Reads a little-endian word. Both bytes are resolved on their own, so a
    /// word can straddle two regions. The high byte of a read at `0xFFFF`
    /// comes from `0x0000`.
    pub fn read16(&self, addr: u16) -> u16 {
        let lo = self.read8(addr);
        let hi = self.read8(addr.wrapping_add(1));

        u16::from_le_bytes([lo, hi])
    }

    /// Writes a little-endian word, byte by byte. Wraps like [`MemoryBus::read16`].
    pub fn write16(&mut self, addr: u16, val: u16) {
        let [lo, hi] = val.to_le_bytes();

        self.write8(addr, lo);
        self.write8(addr.wrapping_add(1), hi);
    }

    pub fn is_valid_address(&self, addr: u16) -> bool {
        address::is_valid_address(addr)
    }

    pub fn region_name(&self, addr: u16) -> &'static str {
        address::region_name(addr)
    }

    /// Inserts the cartridge image at `path`, bypassing the read-only policy of
    /// the bus. Returns the number of bytes loaded; at most 32 KiB are read.
    /// On error, memory is left exactly as it was.
    pub fn load_rom<P: AsRef<Path>>(&mut self, path: P) -> Result<usize, RomLoadError> {
        self.cartridge.load_file(path)
    }

    /// Inserts a cartridge image that is already in memory
    pub fn load_rom_bytes(&mut self, image: &[u8]) -> Result<usize, RomLoadError> {
        self.cartridge.load_bytes(image)
    }

    /// Reads `[start, end]` for display. Fails without touching memory if
    /// `start > end`.
    pub fn dump_region(&self, start: u16, end: u16) -> Result<MemoryDump, DumpError> {
        MemoryDump::capture(self, start, end)
    }
}

impl Default for MemoryBus {
    fn default() -> Self {
        Self::new()
    }
}
