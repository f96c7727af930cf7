//! The memory map of the Game Boy as far as this crate backs it with real
//! storage. Translation is driven by the [`REGIONS`] table, so giving the
//! I/O registers or HRAM real storage later only means adding a row.

use bitflags::bitflags;

pub const ROM_START: u16 = 0x0000;
pub const ROM_END: u16 = 0x7FFF;
pub const VRAM_START: u16 = 0x8000;
pub const VRAM_END: u16 = 0x9FFF;
pub const WRAM_START: u16 = 0xC000;
pub const WRAM_END: u16 = 0xDFFF;

// Known to the address space, but without storage behind them (yet)
pub const IO_START: u16 = 0xFF00;
pub const IO_END: u16 = 0xFF7F;
pub const HRAM_START: u16 = 0xFF80;
pub const HRAM_END: u16 = 0xFFFE;

pub const ROM_LEN: usize = (ROM_END - ROM_START) as usize + 1;
pub const VRAM_LEN: usize = (VRAM_END - VRAM_START) as usize + 1;
pub const WRAM_LEN: usize = (WRAM_END - WRAM_START) as usize + 1;

/// The value every read from an address without backing storage returns
pub const OPEN_BUS: u8 = 0xFF;

bitflags! {
    /// What the CPU side of the bus is allowed to do with a region. Loading a
    /// cartridge does not go through the bus and ignores these.
    pub struct Access: u8 {
        const READ = 0b_0000_0001;
        const WRITE = 0b_0000_0010;
        const READ_WRITE = Self::READ.bits | Self::WRITE.bits;
    }
}

/// A part of the address space that is backed by its own buffer
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Region {
    Rom,  // 0x0000 - 0x7FFF
    Vram, // 0x8000 - 0x9FFF
    Wram, // 0xC000 - 0xDFFF
}

/// One row of the memory map
#[derive(Debug, Copy, Clone)]
pub struct RegionDesc {
    pub start: u16,
    pub end: u16,
    pub region: Region,
    pub access: Access,
}

impl RegionDesc {
    pub fn contains(&self, addr: u16) -> bool {
        addr >= self.start && addr <= self.end
    }
}

/// All mapped regions, ordered by start address. The ranges never overlap.
pub static REGIONS: [RegionDesc; 3] = [
    RegionDesc {
        start: ROM_START,
        end: ROM_END,
        region: Region::Rom,
        access: Access::READ,
    },
    RegionDesc {
        start: VRAM_START,
        end: VRAM_END,
        region: Region::Vram,
        access: Access::READ_WRITE,
    },
    RegionDesc {
        start: WRAM_START,
        end: WRAM_END,
        region: Region::Wram,
        access: Access::READ_WRITE,
    },
];

impl Region {
    pub fn desc(self) -> &'static RegionDesc {
        match self {
            Region::Rom => &REGIONS[0],
            Region::Vram => &REGIONS[1],
            Region::Wram => &REGIONS[2],
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Region::Rom => "ROM",
            Region::Vram => "VRAM",
            Region::Wram => "WRAM",
        }
    }

    pub fn start(self) -> u16 {
        self.desc().start
    }

    pub fn end(self) -> u16 {
        self.desc().end
    }

    /// Number of bytes backing this region
    pub fn len(self) -> usize {
        (self.end() - self.start()) as usize + 1
    }

    pub fn access(self) -> Access {
        self.desc().access
    }
}

/// A bus address translated into the buffer that backs it. Offsets are
/// local to the region, so `Mapped(Region::Vram, 0)` is `0x8000`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MemAddr {
    Mapped(Region, u16),
    /// Holds the untranslated address
    Unmapped(u16),
}

impl From<u16> for MemAddr {
    fn from(addr: u16) -> Self {
        REGIONS
            .iter()
            .find(|desc| desc.contains(addr))
            .map(|desc| MemAddr::Mapped(desc.region, addr - desc.start))
            .unwrap_or(MemAddr::Unmapped(addr))
    }
}

impl MemAddr {
    pub fn region(self) -> Option<Region> {
        match self {
            MemAddr::Mapped(region, _) => Some(region),
            MemAddr::Unmapped(_) => None,
        }
    }
}

/// Addresses are accepted as anything that widens into a `u32` so that callers
/// working with wider integers get a defined answer for values above `0xFFFF`.
fn narrow(addr: impl Into<u32>) -> Option<u16> {
    let addr = addr.into();

    if addr > 0xFFFF {
        None
    } else {
        Some(addr as u16)
    }
}

/// True iff `addr` is backed by ROM, VRAM or WRAM
pub fn is_valid_address(addr: impl Into<u32>) -> bool {
    narrow(addr)
        .and_then(|addr| MemAddr::from(addr).region())
        .is_some()
}

/// Classifies any address, including ones that don't fit on the bus.
/// In-range addresses without storage are `"Unmapped"`, anything above
/// `0xFFFF` is `"Invalid"`.
pub fn region_name(addr: impl Into<u32>) -> &'static str {
    match narrow(addr) {
        Some(addr) => match MemAddr::from(addr) {
            MemAddr::Mapped(region, _) => region.name(),
            MemAddr::Unmapped(_) => "Unmapped",
        },
        None => "Invalid",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_lengths_match_buffer_sizes() {
        assert_eq!(Region::Rom.len(), ROM_LEN);
        assert_eq!(Region::Vram.len(), VRAM_LEN);
        assert_eq!(Region::Wram.len(), WRAM_LEN);
        assert_eq!(ROM_LEN, 0x8000);
        assert_eq!(VRAM_LEN, 0x2000);
        assert_eq!(WRAM_LEN, 0x2000);
    }

    #[test]
    fn regions_are_sorted_and_disjoint() {
        for pair in REGIONS.windows(2) {
            assert!(pair[0].end < pair[1].start);
        }
    }

    #[test]
    fn translates_to_local_offsets() {
        assert_eq!(MemAddr::from(0x0000), MemAddr::Mapped(Region::Rom, 0));
        assert_eq!(MemAddr::from(0x7FFF), MemAddr::Mapped(Region::Rom, 0x7FFF));
        assert_eq!(MemAddr::from(0x8000), MemAddr::Mapped(Region::Vram, 0));
        assert_eq!(MemAddr::from(0x9FFF), MemAddr::Mapped(Region::Vram, 0x1FFF));
        assert_eq!(MemAddr::from(0xC123), MemAddr::Mapped(Region::Wram, 0x123));
        assert_eq!(MemAddr::from(0xA000), MemAddr::Unmapped(0xA000));
        assert_eq!(MemAddr::from(0xE000), MemAddr::Unmapped(0xE000));
        assert_eq!(MemAddr::from(0xFFFF), MemAddr::Unmapped(0xFFFF));
    }

    #[test]
    fn every_address_maps_to_at_most_one_region() {
        for addr in 0..=0xFFFFu16 {
            let hits = REGIONS.iter().filter(|desc| desc.contains(addr)).count();
            assert!(hits <= 1, "{:#06X} is claimed by {} regions", addr, hits);
        }
    }

    #[test]
    fn only_rom_is_read_only() {
        assert_eq!(Region::Rom.access(), Access::READ);
        assert_eq!(Region::Vram.access(), Access::READ | Access::WRITE);
        assert_eq!(Region::Wram.access(), Access::READ | Access::WRITE);
    }

    #[test]
    fn names_and_validity_agree_on_boundaries() {
        let boundaries = [
            (ROM_START, "ROM"),
            (ROM_END, "ROM"),
            (VRAM_START, "VRAM"),
            (VRAM_END, "VRAM"),
            (WRAM_START, "WRAM"),
            (WRAM_END, "WRAM"),
        ];

        for &(addr, name) in boundaries.iter() {
            assert!(is_valid_address(addr), "{:#06X} should be valid", addr);
            assert_eq!(region_name(addr), name);
        }
    }

    #[test]
    fn unbacked_addresses_are_unmapped() {
        for &addr in [0xA000u16, 0xBFFF, 0xE000, IO_START, IO_END, HRAM_START, HRAM_END, 0xFFFF]
            .iter()
        {
            assert!(!is_valid_address(addr));
            assert_eq!(region_name(addr), "Unmapped");
        }
    }

    #[test]
    fn wide_addresses_are_invalid() {
        assert!(!is_valid_address(0x1_0000u32));
        assert!(!is_valid_address(u32::MAX));
        assert_eq!(region_name(0x1_0000u32), "Invalid");
        assert_eq!(region_name(0xFFFFu32), "Unmapped");
        assert_eq!(region_name(0x8000u32), "VRAM");
    }
}
