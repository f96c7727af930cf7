use crate::address::{Region, VRAM_LEN, WRAM_LEN};

/// Contains the video RAM (VRAM) and working RAM (WRAM) of the Game Boy.
/// Both are plain read-write buffers that are never resized.
pub struct InternalMem {
    pub(super) vram: Box<[u8]>,
    pub(super) wram: Box<[u8]>,
}

impl InternalMem {
    pub fn new() -> InternalMem {
        InternalMem {
            vram: vec![0; VRAM_LEN].into_boxed_slice(),
            wram: vec![0; WRAM_LEN].into_boxed_slice(),
        }
    }

    /// The buffer backing `region`, or `None` if the region does not live in
    /// console-internal memory
    pub fn buffer(&self, region: Region) -> Option<&[u8]> {
        match region {
            Region::Vram => Some(&self.vram[..]),
            Region::Wram => Some(&self.wram[..]),
            Region::Rom => None,
        }
    }

    pub fn buffer_mut(&mut self, region: Region) -> Option<&mut [u8]> {
        match region {
            Region::Vram => Some(&mut self.vram[..]),
            Region::Wram => Some(&mut self.wram[..]),
            Region::Rom => None,
        }
    }

    pub fn clear(&mut self) {
        for b in self.vram.iter_mut().chain(self.wram.iter_mut()) {
            *b = 0;
        }
    }
}

impl Default for InternalMem {
    fn default() -> Self {
        Self::new()
    }
}
