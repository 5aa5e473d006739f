/// The console's 2KB of work RAM, mirrored four times across 0x0000-0x1FFF.
pub struct Memory {
    pub(crate) ram: [u8; 0x800],
}

impl Memory {
    pub fn new() -> Self {
        Memory { ram: [0; 0x800] }
    }

    // Callers outside 0x0000-0x1FFF rely on the same mask, see Bus::write
    pub fn read(&self, addr: u16) -> u8 {
        self.ram[(addr & 0x07FF) as usize]
    }

    pub fn write(&mut self, addr: u16, data: u8) {
        self.ram[(addr & 0x07FF) as usize] = data;
    }

    pub fn ram(&self) -> &[u8; 0x800] {
        &self.ram
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}
