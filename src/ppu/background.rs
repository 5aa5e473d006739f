/// Background shift registers. The high byte of each 16-bit shifter holds
/// the tile being drawn and the low byte the tile fetched next.
#[derive(Debug, Clone, Default)]
pub struct BackgroundPipeline {
    pub next_tile_id: u8,
    pub next_tile_attr: u8,
    pub next_tile_low: u8,
    pub next_tile_high: u8,

    pattern_low: u16,
    pattern_high: u16,
    attr_low: u16,
    attr_high: u16,
}

impl BackgroundPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shift(&mut self) {
        self.pattern_low <<= 1;
        self.pattern_high <<= 1;
        self.attr_low <<= 1;
        self.attr_high <<= 1;
    }

    pub fn load(&mut self) {
        self.pattern_low = (self.pattern_low & 0xFF00) | self.next_tile_low as u16;
        self.pattern_high = (self.pattern_high & 0xFF00) | self.next_tile_high as u16;

        // Palette bits are constant across a tile, so widen them to a byte
        let attr_low_byte = if self.next_tile_attr & 0b01 != 0 { 0xFF } else { 0x00 };
        let attr_high_byte = if self.next_tile_attr & 0b10 != 0 { 0xFF } else { 0x00 };

        self.attr_low = (self.attr_low & 0xFF00) | attr_low_byte;
        self.attr_high = (self.attr_high & 0xFF00) | attr_high_byte;
    }

    /// Stores the two palette bits of the attribute byte that cover the
    /// tile at (`coarse_x`, `coarse_y`).
    pub fn set_attribute(&mut self, attr_byte: u8, coarse_x: u16, coarse_y: u16) {
        let mut attr = attr_byte;
        if coarse_y & 0x02 != 0 {
            attr >>= 4;
        }
        if coarse_x & 0x02 != 0 {
            attr >>= 2;
        }
        self.next_tile_attr = attr & 0x03;
    }

    /// Returns `(pixel, palette)` for the current dot, offset by fine X.
    pub fn pixel(&self, fine_x: u8) -> (u8, u8) {
        let bit_mux = 0x8000u16 >> (fine_x & 0x07);

        let p0 = (self.pattern_low & bit_mux != 0) as u8;
        let p1 = (self.pattern_high & bit_mux != 0) as u8;
        let a0 = (self.attr_low & bit_mux != 0) as u8;
        let a1 = (self.attr_high & bit_mux != 0) as u8;

        ((p1 << 1) | p0, (a1 << 1) | a0)
    }
}
