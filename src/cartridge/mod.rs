//! Cartridge ROM. Inserting a cartridge is the only way ROM contents ever
//! change; the CPU side of the bus can only read them.

pub mod header;

use crate::address::ROM_LEN;
use std::fmt;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

pub use header::{CartridgeHeader, CartridgeType, RamSize, RomSize};

#[derive(Debug)]
pub enum RomLoadError {
    IoError(io::Error),

    /// The image did not contain a single byte
    Empty,
}

impl fmt::Display for RomLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RomLoadError::IoError(err) => write!(f, "could not read rom image: {}", err),
            RomLoadError::Empty => write!(f, "rom image is empty"),
        }
    }
}

impl std::error::Error for RomLoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RomLoadError::IoError(err) => Some(err),
            RomLoadError::Empty => None,
        }
    }
}

impl From<io::Error> for RomLoadError {
    fn from(err: io::Error) -> Self {
        RomLoadError::IoError(err)
    }
}

/// The fixed 32 KiB of ROM visible at `0x0000 - 0x7FFF`, plus whether a
/// cartridge has been inserted
pub struct CartridgeRom {
    rom: Box<[u8]>,
    loaded: bool,
}

impl CartridgeRom {
    pub fn new() -> CartridgeRom {
        CartridgeRom {
            rom: vec![0; ROM_LEN].into_boxed_slice(),
            loaded: false,
        }
    }

    pub fn read(&self, offset: u16) -> u8 {
        self.rom[offset as usize]
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn clear(&mut self) {
        for b in self.rom.iter_mut() {
            *b = 0;
        }
        self.loaded = false;
    }

    /// Reads at most [`ROM_LEN`] bytes of the image at `path`. Nothing is
    /// touched unless the whole operation succeeds.
    pub fn load_file<P: AsRef<Path>>(&mut self, path: P) -> Result<usize, RomLoadError> {
        let path = path.as_ref();

        let result = File::open(path)
            .and_then(read_bounded)
            .map_err(RomLoadError::from)
            .and_then(|(image, truncated)| {
                if truncated {
                    log::warn!(
                        "ROM image {} is larger than {} bytes, the rest is ignored",
                        path.display(),
                        ROM_LEN
                    );
                }
                self.insert(&image)
            });

        match &result {
            Ok(len) => log::info!("Loaded {} bytes of ROM from {}", len, path.display()),
            Err(err) => log::error!("Could not load ROM {}: {}", path.display(), err),
        }

        result
    }

    /// Same as [`CartridgeRom::load_file`], for images that are already in memory
    pub fn load_bytes(&mut self, image: &[u8]) -> Result<usize, RomLoadError> {
        if image.len() > ROM_LEN {
            log::warn!(
                "ROM image is {} bytes, only the first {} are used",
                image.len(),
                ROM_LEN
            );
        }

        self.insert(&image[..image.len().min(ROM_LEN)])
    }

    /// Replaces the ROM contents. Whatever the new image doesn't cover is zeroed,
    /// since nothing of the previous cartridge survives a swap.
    fn insert(&mut self, image: &[u8]) -> Result<usize, RomLoadError> {
        debug_assert!(image.len() <= ROM_LEN);

        if image.is_empty() {
            return Err(RomLoadError::Empty);
        }

        let (head, tail) = self.rom.split_at_mut(image.len());
        head.copy_from_slice(image);
        for b in tail.iter_mut() {
            *b = 0;
        }

        self.loaded = true;
        Ok(image.len())
    }
}

impl Default for CartridgeRom {
    fn default() -> Self {
        Self::new()
    }
}

/// Reads up to [`ROM_LEN`] bytes and reports whether anything was left over
fn read_bounded<R: Read>(mut reader: R) -> io::Result<(Vec<u8>, bool)> {
    let mut image = Vec::with_capacity(ROM_LEN);
    reader
        .by_ref()
        .take(ROM_LEN as u64)
        .read_to_end(&mut image)?;

    let mut probe = [0u8; 1];
    let truncated = image.len() == ROM_LEN && reader.read(&mut probe)? > 0;

    Ok((image, truncated))
}
