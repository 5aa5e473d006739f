use bitflags::bitflags;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct PpuControl: u8 {
        const NAMETABLE_X = 0b00000001;
        const NAMETABLE_Y = 0b00000010;
        const VRAM_INCREMENT = 0b00000100;
        const SPRITE_PATTERN = 0b00001000;
        const BG_PATTERN = 0b00010000;
        const SPRITE_SIZE = 0b00100000;
        const PPU_MASTER_SLAVE = 0b01000000;
        const NMI_ENABLE = 0b10000000;
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct PpuMask: u8 {
        const GRAYSCALE = 0b00000001;
        const BG_LEFT_ENABLE = 0b00000010;
        const SPRITE_LEFT_ENABLE = 0b00000100;
        const BG_ENABLE = 0b00001000;
        const SPRITE_ENABLE = 0b00010000;
        const EMPHASIZE_RED = 0b00100000;
        const EMPHASIZE_GREEN = 0b01000000;
        const EMPHASIZE_BLUE = 0b10000000;
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct PpuStatus: u8 {
        const SPRITE_OVERFLOW = 0b00100000;
        const SPRITE_0_HIT = 0b01000000;
        const VBLANK = 0b10000000;
    }
}

impl PpuControl {
    pub fn vram_increment(self) -> u16 {
        if self.contains(PpuControl::VRAM_INCREMENT) {
            32
        } else {
            1
        }
    }

    /// Base of the background half of pattern memory, 0x0000 or 0x1000.
    pub fn bg_pattern_base(self) -> u16 {
        if self.contains(PpuControl::BG_PATTERN) {
            0x1000
        } else {
            0
        }
    }
}

impl PpuMask {
    pub fn rendering_enabled(self) -> bool {
        self.intersects(PpuMask::BG_ENABLE | PpuMask::SPRITE_ENABLE)
    }
}

const COARSE_X: u16 = 0x001F;
const COARSE_Y: u16 = 0x03E0;
const NAMETABLE_X: u16 = 0x0400;
const NAMETABLE_Y: u16 = 0x0800;
const FINE_Y: u16 = 0x7000;

/// The 15-bit internal VRAM address, laid out as
/// `yyy NN YYYYY XXXXX` (fine Y, nametable, coarse Y, coarse X).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VramAddress(u16);

impl VramAddress {
    pub fn new(raw: u16) -> Self {
        VramAddress(raw & 0x7FFF)
    }

    pub fn raw(self) -> u16 {
        self.0
    }

    pub fn set_raw(&mut self, raw: u16) {
        self.0 = raw & 0x7FFF;
    }

    pub fn coarse_x(self) -> u16 {
        self.0 & COARSE_X
    }

    pub fn coarse_y(self) -> u16 {
        (self.0 & COARSE_Y) >> 5
    }

    pub fn nametable_x(self) -> u16 {
        (self.0 & NAMETABLE_X) >> 10
    }

    pub fn nametable_y(self) -> u16 {
        (self.0 & NAMETABLE_Y) >> 11
    }

    pub fn fine_y(self) -> u16 {
        (self.0 & FINE_Y) >> 12
    }

    pub fn set_coarse_x(&mut self, value: u16) {
        self.0 = (self.0 & !COARSE_X) | (value & 0x1F);
    }

    pub fn set_coarse_y(&mut self, value: u16) {
        self.0 = (self.0 & !COARSE_Y) | ((value & 0x1F) << 5);
    }

    pub fn set_nametable_x(&mut self, value: u16) {
        self.0 = (self.0 & !NAMETABLE_X) | ((value & 1) << 10);
    }

    pub fn set_nametable_y(&mut self, value: u16) {
        self.0 = (self.0 & !NAMETABLE_Y) | ((value & 1) << 11);
    }

    pub fn set_fine_y(&mut self, value: u16) {
        self.0 = (self.0 & !FINE_Y) | ((value & 0x07) << 12);
    }

    pub fn increment(&mut self, amount: u16) {
        self.set_raw(self.0.wrapping_add(amount));
    }

    /// Moves one tile right, spilling into the neighbouring nametable.
    pub fn increment_x(&mut self) {
        if self.coarse_x() == 31 {
            self.set_coarse_x(0);
            self.set_nametable_x(self.nametable_x() ^ 1);
        } else {
            self.set_coarse_x(self.coarse_x() + 1);
        }
    }

    /// Moves one pixel row down. Row 29 is the last tile row; rows 30 and 31
    /// hold attributes and wrap without switching nametable.
    pub fn increment_y(&mut self) {
        if self.fine_y() < 7 {
            self.set_fine_y(self.fine_y() + 1);
            return;
        }

        self.set_fine_y(0);
        match self.coarse_y() {
            29 => {
                self.set_coarse_y(0);
                self.set_nametable_y(self.nametable_y() ^ 1);
            }
            31 => self.set_coarse_y(0),
            y => self.set_coarse_y(y + 1),
        }
    }

    pub fn copy_horizontal(&mut self, from: VramAddress) {
        let mask = COARSE_X | NAMETABLE_X;
        self.0 = (self.0 & !mask) | (from.0 & mask);
    }

    pub fn copy_vertical(&mut self, from: VramAddress) {
        let mask = COARSE_Y | NAMETABLE_Y | FINE_Y;
        self.0 = (self.0 & !mask) | (from.0 & mask);
    }

    /// Name-table byte for the tile under this address.
    pub fn tile_address(self) -> u16 {
        0x2000 | (self.0 & 0x0FFF)
    }

    /// Attribute byte covering the tile under this address.
    pub fn attribute_address(self) -> u16 {
        0x23C0
            | (self.nametable_y() << 11)
            | (self.nametable_x() << 10)
            | ((self.coarse_y() >> 2) << 3)
            | (self.coarse_x() >> 2)
    }
}
