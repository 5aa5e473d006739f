use crate::cartridge::Mirroring;

/// Video memory that lives inside the PPU rather than on the cartridge.
#[derive(Debug, Clone)]
pub struct PpuMemory {
    pub nametables: [[u8; 1024]; 2],
    pub palettes: [u8; 32],
    /// Backing for pattern space when no cartridge claims it.
    pub patterns: [[u8; 4096]; 2],
    pub oam: [u8; 256],
}

impl PpuMemory {
    pub fn new() -> Self {
        Self {
            nametables: [[0; 1024]; 2],
            palettes: [0; 32],
            patterns: [[0; 4096]; 2],
            oam: [0; 256],
        }
    }

    pub fn read_pattern(&self, addr: u16) -> u8 {
        let (table, offset) = pattern_index(addr);
        self.patterns[table][offset]
    }

    pub fn write_pattern(&mut self, addr: u16, data: u8) {
        let (table, offset) = pattern_index(addr);
        self.patterns[table][offset] = data;
    }

    pub fn read_nametable(&self, addr: u16, mirroring: Mirroring) -> u8 {
        let (table, offset) = nametable_index(addr, mirroring);
        self.nametables[table][offset]
    }

    pub fn write_nametable(&mut self, addr: u16, data: u8, mirroring: Mirroring) {
        let (table, offset) = nametable_index(addr, mirroring);
        self.nametables[table][offset] = data;
    }

    pub fn read_palette(&self, addr: u16) -> u8 {
        self.palettes[palette_index(addr)]
    }

    pub fn write_palette(&mut self, addr: u16, data: u8) {
        self.palettes[palette_index(addr)] = data;
    }
}

impl Default for PpuMemory {
    fn default() -> Self {
        Self::new()
    }
}

fn pattern_index(addr: u16) -> (usize, usize) {
    (((addr & 0x1000) >> 12) as usize, (addr & 0x0FFF) as usize)
}

fn nametable_index(addr: u16, mirroring: Mirroring) -> (usize, usize) {
    let addr = addr & 0x0FFF;
    let quadrant = addr / 0x0400;
    let table = match mirroring {
        // $2000=$2800, $2400=$2C00
        Mirroring::Vertical => quadrant & 1,
        // $2000=$2400, $2800=$2C00
        Mirroring::Horizontal => quadrant >> 1,
    };
    (table as usize, (addr & 0x03FF) as usize)
}

// $3F10/$3F14/$3F18/$3F1C fold onto $3F00/$3F04/$3F08/$3F0C
fn palette_index(addr: u16) -> usize {
    let addr = (addr & 0x1F) as usize;
    if addr >= 0x10 && addr % 4 == 0 {
        addr - 0x10
    } else {
        addr
    }
}
