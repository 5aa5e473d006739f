use std::fs;
use std::path::Path;

use thiserror::Error;

pub mod mapper;

use mapper::Mapper;

const HEADER_SIZE: usize = 16;
const TRAINER_SIZE: usize = 512;
const PRG_BANK_SIZE: usize = 16 * 1024;
const CHR_BANK_SIZE: usize = 8 * 1024;
const MAGIC: &[u8; 4] = b"NES\x1a";

#[derive(Debug, Error)]
pub enum CartridgeError {
    #[error("failed to read ROM: {0}")]
    Io(#[from] std::io::Error),

    #[error("not an iNES image (bad magic)")]
    InvalidMagic,

    #[error("ROM image truncated: expected {expected} bytes, found {actual}")]
    Truncated { expected: usize, actual: usize },

    #[error("unsupported mapper {0}")]
    UnsupportedMapper(u8),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mirroring {
    Horizontal,
    Vertical,
}

pub struct Cartridge {
    prg_memory: Vec<u8>,
    chr_memory: Vec<u8>,
    prg_banks: u8,
    chr_banks: u8,
    mapper_id: u8,
    mirroring: Mirroring,
    mapper: Box<dyn Mapper>,
}

impl Cartridge {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, CartridgeError> {
        let path = path.as_ref();
        let data = fs::read(path)?;
        let cartridge = Self::from_bytes(&data)?;

        log::info!(
            "Cartridge loaded from {} - PRG banks: {}, CHR banks: {}, mapper: {}, mirroring: {:?}",
            path.display(),
            cartridge.prg_banks,
            cartridge.chr_banks,
            cartridge.mapper_id,
            cartridge.mirroring
        );

        Ok(cartridge)
    }

    /// Parses an in-memory iNES image.
    pub fn from_bytes(data: &[u8]) -> Result<Self, CartridgeError> {
        if data.len() < 4 || &data[0..4] != MAGIC {
            return Err(CartridgeError::InvalidMagic);
        }
        if data.len() < HEADER_SIZE {
            return Err(CartridgeError::Truncated {
                expected: HEADER_SIZE,
                actual: data.len(),
            });
        }

        let prg_banks = data[4];
        let chr_banks = data[5];
        let flags6 = data[6];
        let flags7 = data[7];

        let mapper_id = (flags7 & 0xF0) | (flags6 >> 4);
        let mirroring = if flags6 & 0x01 != 0 {
            Mirroring::Vertical
        } else {
            Mirroring::Horizontal
        };

        let mapper = mapper::create(mapper_id, prg_banks, chr_banks)?;

        let prg_start = if flags6 & 0x04 != 0 {
            HEADER_SIZE + TRAINER_SIZE
        } else {
            HEADER_SIZE
        };
        let prg_size = prg_banks as usize * PRG_BANK_SIZE;
        let chr_start = prg_start + prg_size;
        let chr_size = chr_banks as usize * CHR_BANK_SIZE;

        let expected = chr_start + chr_size;
        if data.len() < expected {
            return Err(CartridgeError::Truncated {
                expected,
                actual: data.len(),
            });
        }

        let prg_memory = data[prg_start..chr_start].to_vec();
        let chr_memory = if chr_banks == 0 {
            // CHR RAM
            vec![0; CHR_BANK_SIZE]
        } else {
            data[chr_start..expected].to_vec()
        };

        Ok(Cartridge {
            prg_memory,
            chr_memory,
            prg_banks,
            chr_banks,
            mapper_id,
            mirroring,
            mapper,
        })
    }

    pub fn cpu_read(&self, addr: u16) -> Option<u8> {
        self.mapper
            .cpu_map_read(addr)
            .and_then(|offset| self.prg_memory.get(offset).copied())
    }

    pub fn cpu_write(&mut self, addr: u16, data: u8) -> bool {
        match self.mapper.cpu_map_write(addr) {
            Some(offset) => match self.prg_memory.get_mut(offset) {
                Some(slot) => {
                    *slot = data;
                    true
                }
                None => false,
            },
            None => false,
        }
    }

    pub fn ppu_read(&self, addr: u16) -> Option<u8> {
        self.mapper
            .ppu_map_read(addr)
            .and_then(|offset| self.chr_memory.get(offset).copied())
    }

    pub fn ppu_write(&mut self, addr: u16, data: u8) -> bool {
        match self.mapper.ppu_map_write(addr) {
            Some(offset) => match self.chr_memory.get_mut(offset) {
                Some(slot) => {
                    *slot = data;
                    true
                }
                None => false,
            },
            None => false,
        }
    }

    pub fn mirroring(&self) -> Mirroring {
        self.mirroring
    }

    pub fn prg_banks(&self) -> u8 {
        self.prg_banks
    }

    pub fn chr_banks(&self) -> u8 {
        self.chr_banks
    }

    pub fn mapper_id(&self) -> u8 {
        self.mapper_id
    }
}
