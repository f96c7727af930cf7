use crate::debug::is_printable;
use crate::memory::MemoryBus;
use num_enum::TryFromPrimitive;
use std::convert::TryFrom;

const HEADER_START: u16 = 0x0100;
const HEADER_END: u16 = 0x014F;

// Offsets relative to HEADER_START
const TITLE: usize = 0x34;
const TITLE_MAX_LEN: usize = 16;
const CARTRIDGE_TYPE: usize = 0x47;
const ROM_SIZE: usize = 0x48;
const RAM_SIZE: usize = 0x49;
const CHECKSUM_RANGE: (usize, usize) = (0x34, 0x4C);
const CHECKSUM: usize = 0x4D;

/// A copy of the cartridge header (`0x0100 - 0x014F`), read through the bus
/// like any other caller would. Nothing here is validated on load; a header
/// full of zeroes or open-bus bytes is perfectly representable.
pub struct CartridgeHeader([u8; (HEADER_END - HEADER_START) as usize + 1]);

impl CartridgeHeader {
    pub fn read(bus: &MemoryBus) -> CartridgeHeader {
        let mut header = [0u8; (HEADER_END - HEADER_START) as usize + 1];

        for (addr, b) in (HEADER_START..=HEADER_END).zip(header.iter_mut()) {
            *b = bus.read8(addr);
        }

        CartridgeHeader(header)
    }

    pub fn bytes(&self) -> &[u8] {
        &self.0
    }

    /// Title is only null-terminated if shorter than 16 bytes, so we
    /// can't rely on that. Unprintable bytes show up as `.`.
    pub fn title(&self) -> String {
        self.0[TITLE..]
            .iter()
            .copied()
            .take(TITLE_MAX_LEN)
            .take_while(|b| *b != 0)
            .map(|b| if is_printable(b) { char::from(b) } else { '.' })
            .collect()
    }

    pub fn cartridge_type(&self) -> Option<CartridgeType> {
        CartridgeType::try_from(self.0[CARTRIDGE_TYPE]).ok()
    }

    pub fn rom_size(&self) -> Option<RomSize> {
        RomSize::try_from(self.0[ROM_SIZE]).ok()
    }

    pub fn ram_size(&self) -> Option<RamSize> {
        RamSize::try_from(self.0[RAM_SIZE]).ok()
    }

    pub fn checksum(&self) -> u8 {
        let (from, to) = CHECKSUM_RANGE;

        self.0[from..=to]
            .iter()
            .fold(0u8, |acc, b| acc.wrapping_sub(*b).wrapping_sub(1))
    }

    pub fn has_valid_checksum(&self) -> bool {
        self.0[CHECKSUM] == self.checksum()
    }
}

/// Only the types that fit into 32 KiB without banking can be fully
/// represented by this bus; the rest are still recognized.
#[derive(TryFromPrimitive, Debug, Copy, Clone, PartialEq, Eq)]
#[repr(u8)]
pub enum CartridgeType {
    RomOnly = 0x00,
    Mbc1 = 0x01,
    Mbc1Ram = 0x02,
    Mbc1RamBattery = 0x03,
    Mbc2 = 0x05,
    Mbc2Battery = 0x06,
    RomRam = 0x08,
    RomRamBattery = 0x09,
    Mmm01 = 0x0B,
    Mmm01Ram = 0x0C,
    Mmm01RamBattery = 0x0D,
    Mbc3TimerBattery = 0x0F,
    Mbc3TimerRamBattery = 0x10,
    Mbc3 = 0x11,
    Mbc3Ram = 0x12,
    Mbc3RamBattery = 0x13,
    Mbc5 = 0x19,
    Mbc5Ram = 0x1A,
    Mbc5RamBattery = 0x1B,
    Mbc5Rumble = 0x1C,
    Mbc5RumbleRam = 0x1D,
    Mbc5RumbleRamBattery = 0x1E,
    PocketCamera = 0xFC,
    BandaiTama5 = 0xFD,
    HuC3 = 0xFE,
    HuC1RamBattery = 0xFF,
}

impl CartridgeType {
    /// Whether the cartridge needs a memory bank controller, which this bus
    /// does not emulate
    pub fn needs_mbc(self) -> bool {
        !matches!(
            self,
            CartridgeType::RomOnly | CartridgeType::RomRam | CartridgeType::RomRamBattery
        )
    }
}

#[derive(TryFromPrimitive, Debug, Copy, Clone, PartialEq, Eq)]
#[repr(u8)]
pub enum RomSize {
    Rom32Kb = 0x00,
    Rom64Kb = 0x01,
    Rom128Kb = 0x02,
    Rom256Kb = 0x03,
    Rom512Kb = 0x04,
    Rom1Mb = 0x05,
    Rom2Mb = 0x06,
    Rom4Mb = 0x07,
    Rom8Mb = 0x08,
}

impl RomSize {
    pub fn bytes(self) -> usize {
        0x8000 << (self as u8)
    }
}

#[derive(TryFromPrimitive, Debug, Copy, Clone, PartialEq, Eq)]
#[repr(u8)]
pub enum RamSize {
    RamNone = 0x00,
    Ram2Kb = 0x01,
    Ram8Kb = 0x02,
    Ram32Kb = 0x03,
    Ram128Kb = 0x04,
    Ram64Kb = 0x05,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::ROM_LEN;

    fn image_with_header(title: &[u8], ctype: u8, rom_size: u8, ram_size: u8) -> Vec<u8> {
        let mut image = vec![0u8; ROM_LEN];
        image[0x134..0x134 + title.len()].copy_from_slice(title);
        image[0x147] = ctype;
        image[0x148] = rom_size;
        image[0x149] = ram_size;

        let checksum = image[0x134..=0x14C]
            .iter()
            .fold(0u8, |acc, b| acc.wrapping_sub(*b).wrapping_sub(1));
        image[0x14D] = checksum;

        image
    }

    #[test]
    fn parses_loaded_header() {
        let mut bus = MemoryBus::new();
        bus.load_rom_bytes(&image_with_header(b"TETRIS", 0x00, 0x00, 0x00))
            .unwrap();

        let header = CartridgeHeader::read(&bus);
        assert_eq!(header.title(), "TETRIS");
        assert_eq!(header.cartridge_type(), Some(CartridgeType::RomOnly));
        assert_eq!(header.rom_size(), Some(RomSize::Rom32Kb));
        assert_eq!(header.ram_size(), Some(RamSize::RamNone));
        assert!(header.has_valid_checksum());
        assert!(!header.cartridge_type().unwrap().needs_mbc());
    }

    #[test]
    fn title_is_capped_at_sixteen_bytes() {
        let mut bus = MemoryBus::new();
        bus.load_rom_bytes(&image_with_header(b"ABCDEFGHIJKLMNOPQRS", 0x01, 0x01, 0x02))
            .unwrap();

        let header = CartridgeHeader::read(&bus);
        assert_eq!(header.title(), "ABCDEFGHIJKLMNOP");
        assert_eq!(header.cartridge_type(), Some(CartridgeType::Mbc1));
        assert_eq!(header.rom_size().map(RomSize::bytes), Some(0x10000));
    }

    #[test]
    fn unprintable_title_bytes_become_dots() {
        let mut bus = MemoryBus::new();
        bus.load_rom_bytes(&image_with_header(&[b'A', 0x7F, b'B'], 0x00, 0x00, 0x00))
            .unwrap();

        assert_eq!(CartridgeHeader::read(&bus).title(), "A.B");
    }

    #[test]
    fn corrupted_header_fails_checksum() {
        let mut image = image_with_header(b"POKEMON", 0x13, 0x05, 0x03);
        image[0x134] ^= 0xFF;

        let mut bus = MemoryBus::new();
        bus.load_rom_bytes(&image).unwrap();

        assert!(!CartridgeHeader::read(&bus).has_valid_checksum());
    }

    #[test]
    fn unknown_codes_are_none() {
        let mut bus = MemoryBus::new();
        bus.load_rom_bytes(&image_with_header(b"X", 0x04, 0x42, 0x09))
            .unwrap();

        let header = CartridgeHeader::read(&bus);
        assert_eq!(header.cartridge_type(), None);
        assert_eq!(header.rom_size(), None);
        assert_eq!(header.ram_size(), None);
    }
}
