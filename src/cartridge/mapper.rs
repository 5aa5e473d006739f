use super::CartridgeError;

/// Translates CPU and PPU bus addresses into offsets within the cartridge's
/// program and character memories. `None` means the cartridge does not
/// respond to that address and the caller falls back to its own decoding.
pub trait Mapper {
    fn cpu_map_read(&self, addr: u16) -> Option<usize>;
    fn cpu_map_write(&self, addr: u16) -> Option<usize>;
    fn ppu_map_read(&self, addr: u16) -> Option<usize>;
    fn ppu_map_write(&self, addr: u16) -> Option<usize>;
}

pub fn create(id: u8, prg_banks: u8, chr_banks: u8) -> Result<Box<dyn Mapper>, CartridgeError> {
    match id {
        0 => Ok(Box::new(Nrom::new(prg_banks, chr_banks))),
        other => Err(CartridgeError::UnsupportedMapper(other)),
    }
}

/// Mapper 0. No bank switching: 16KB of PRG is mirrored into both halves of
/// 0x8000-0xFFFF, 32KB fills the window. CHR is a fixed 8KB, writable only
/// when the cartridge ships CHR RAM instead of ROM.
#[derive(Debug, Clone, Copy)]
pub struct Nrom {
    prg_banks: u8,
    chr_banks: u8,
}

impl Nrom {
    pub fn new(prg_banks: u8, chr_banks: u8) -> Self {
        Self { prg_banks, chr_banks }
    }

    fn prg_mask(&self) -> u16 {
        if self.prg_banks > 1 { 0x7FFF } else { 0x3FFF }
    }
}

impl Mapper for Nrom {
    fn cpu_map_read(&self, addr: u16) -> Option<usize> {
        match addr {
            0x8000..=0xFFFF => Some((addr & self.prg_mask()) as usize),
            _ => None,
        }
    }

    // PRG is ROM and NROM exposes no registers, so writes are never claimed
    fn cpu_map_write(&self, _addr: u16) -> Option<usize> {
        None
    }

    fn ppu_map_read(&self, addr: u16) -> Option<usize> {
        match addr {
            0x0000..=0x1FFF => Some(addr as usize),
            _ => None,
        }
    }

    fn ppu_map_write(&self, addr: u16) -> Option<usize> {
        match addr {
            0x0000..=0x1FFF if self.chr_banks == 0 => Some(addr as usize),
            _ => None,
        }
    }
}
