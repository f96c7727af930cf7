//! dmgbus is the memory bus of a Game Boy (DMG) emulator, on its own. It maps
//! the 16 bit address space onto cartridge ROM, video RAM and working RAM,
//! and knows nothing about the CPU, PPU or timers that would drive it.
//!
//! The bus follows a few simple rules:
//! - Reads from addresses without backing storage return `0xFF` (open bus)
//! - Writes to those addresses are dropped
//! - ROM can only be changed by inserting a cartridge, never through the bus
//! - Words are little-endian and may straddle regions, each byte being
//!   resolved on its own
//!
//! ```no_run
//! use dmgbus::{CartridgeHeader, MemoryBus};
//!
//! let mut bus = MemoryBus::new();
//!
//! match bus.load_rom("tetris.gb") {
//!     Ok(len) => println!("Inserted {} bytes of ROM", len),
//!     Err(err) => eprintln!("{}", err),
//! }
//!
//! println!("Title: {}", CartridgeHeader::read(&bus).title());
//!
//! bus.write16(0xC000, 0x1234);
//! assert_eq!(bus.read8(0xC000), 0x34);
//! assert_eq!(bus.read8(0xA000), 0xFF);
//!
//! print!("{}", bus.dump_region(0x0100, 0x014F).unwrap());
//! ```

pub mod address;
mod cartridge;
pub mod debug;
mod memory;

pub use address::{is_valid_address, region_name, Access, MemAddr, Region};
pub use cartridge::{CartridgeHeader, CartridgeType, RamSize, RomLoadError, RomSize};
pub use debug::{DumpError, DumpRow, MemoryDump};
pub use memory::MemoryBus;
