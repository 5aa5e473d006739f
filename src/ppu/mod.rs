pub mod background;
pub mod frame;
pub mod memory;
pub mod registers;

#[cfg(test)]
mod tests;

use crate::cartridge::{Cartridge, Mirroring};

use background::BackgroundPipeline;
pub use frame::{Frame, Rgb, SCREEN_HEIGHT, SCREEN_WIDTH, SYSTEM_PALETTE};
use memory::PpuMemory;
pub use registers::{PpuControl, PpuMask, PpuStatus, VramAddress};

pub const CYCLES_PER_SCANLINE: u16 = 341;
pub const SCANLINES_PER_FRAME: u16 = 262;

const PRE_RENDER_SCANLINE: i16 = -1;
const VBLANK_SCANLINE: i16 = 241;

/// The 2C02 picture processor: register file, video memory and the
/// background half of the rendering pipeline.
pub struct Ppu {
    control: PpuControl,
    mask: PpuMask,
    status: PpuStatus,
    oam_addr: u8,

    vram_addr: VramAddress, // v
    temp_addr: VramAddress, // t
    fine_x: u8,
    write_latch: bool,
    data_buffer: u8,
    io_latch: u8, // last value written to any register

    memory: PpuMemory,
    background: BackgroundPipeline,
    frame: Frame,

    cycle: u16,
    scanline: i16,
    frame_count: u64,

    nmi: bool,
    frame_completed: bool,
}

impl Ppu {
    pub fn new() -> Self {
        Ppu {
            control: PpuControl::empty(),
            mask: PpuMask::empty(),
            status: PpuStatus::empty(),
            oam_addr: 0,

            vram_addr: VramAddress::default(),
            temp_addr: VramAddress::default(),
            fine_x: 0,
            write_latch: false,
            data_buffer: 0,
            io_latch: 0,

            memory: PpuMemory::new(),
            background: BackgroundPipeline::new(),
            frame: Frame::screen(),

            cycle: 0,
            scanline: PRE_RENDER_SCANLINE,
            frame_count: 0,

            nmi: false,
            frame_completed: false,
        }
    }

    /// Advances one dot.
    pub fn clock(&mut self, cartridge: Option<&Cartridge>) {
        if self.scanline < 240 {
            if self.scanline == PRE_RENDER_SCANLINE && self.cycle == 1 {
                self.status.remove(
                    PpuStatus::VBLANK | PpuStatus::SPRITE_0_HIT | PpuStatus::SPRITE_OVERFLOW,
                );
            }

            if (2..258).contains(&self.cycle) || (321..338).contains(&self.cycle) {
                self.update_shifters();
                self.fetch_background((self.cycle - 1) % 8, cartridge);
            }

            if self.cycle == 256 {
                self.increment_scroll_y();
            }

            if self.cycle == 257 {
                self.background.load();
                self.transfer_address_x();
            }

            // Dummy name-table fetches at the end of the line
            if self.cycle == 338 || self.cycle == 340 {
                self.background.next_tile_id =
                    self.ppu_read(self.vram_addr.tile_address(), cartridge);
            }

            if self.scanline == PRE_RENDER_SCANLINE && (280..305).contains(&self.cycle) {
                self.transfer_address_y();
            }
        }

        if self.scanline == VBLANK_SCANLINE && self.cycle == 1 {
            self.status.insert(PpuStatus::VBLANK);
            if self.control.contains(PpuControl::NMI_ENABLE) {
                self.nmi = true;
            }
        }

        self.render_dot(cartridge);

        self.cycle += 1;
        if self.cycle >= CYCLES_PER_SCANLINE {
            self.cycle = 0;
            self.scanline += 1;
            if self.scanline >= 261 {
                self.scanline = PRE_RENDER_SCANLINE;
                self.frame_count += 1;
                self.frame_completed = true;
            }
        }
    }

    /// CPU-side register read. `addr` is the register index (0..=7).
    /// With `read_only` set the read leaves every latch untouched.
    pub fn cpu_read(&mut self, addr: u16, read_only: bool, cartridge: Option<&Cartridge>) -> u8 {
        match addr & 0x0007 {
            0x0002 => {
                let data = (self.status.bits() & 0xE0) | (self.io_latch & 0x1F);
                if !read_only {
                    self.status.remove(PpuStatus::VBLANK);
                    self.write_latch = false;
                }
                data
            }
            0x0004 => self.memory.oam[self.oam_addr as usize],
            0x0007 => {
                let vram = self.vram_addr.raw() & 0x3FFF;
                if read_only {
                    return if vram >= 0x3F00 {
                        self.ppu_read(vram, cartridge)
                    } else {
                        self.data_buffer
                    };
                }

                // Reads lag one behind, except palette reads which are direct
                let mut data = self.data_buffer;
                self.data_buffer = self.ppu_read(vram, cartridge);
                if vram >= 0x3F00 {
                    data = self.data_buffer;
                }
                self.vram_addr.increment(self.control.vram_increment());
                data
            }
            // Control, mask, OAM address, scroll and address are write-only
            _ => 0,
        }
    }

    /// CPU-side register write. `addr` is the register index (0..=7).
    pub fn cpu_write(&mut self, addr: u16, data: u8, cartridge: Option<&mut Cartridge>) {
        self.io_latch = data;

        match addr & 0x0007 {
            0x0000 => {
                self.control = PpuControl::from_bits_retain(data);
                self.temp_addr.set_nametable_x(data as u16 & 0x01);
                self.temp_addr.set_nametable_y((data as u16 >> 1) & 0x01);
            }
            0x0001 => self.mask = PpuMask::from_bits_retain(data),
            0x0003 => self.oam_addr = data,
            0x0004 => {
                self.memory.oam[self.oam_addr as usize] = data;
                self.oam_addr = self.oam_addr.wrapping_add(1);
            }
            0x0005 => {
                if !self.write_latch {
                    self.fine_x = data & 0x07;
                    self.temp_addr.set_coarse_x(data as u16 >> 3);
                    self.write_latch = true;
                } else {
                    self.temp_addr.set_fine_y(data as u16 & 0x07);
                    self.temp_addr.set_coarse_y(data as u16 >> 3);
                    self.write_latch = false;
                }
            }
            0x0006 => {
                if !self.write_latch {
                    let raw = (self.temp_addr.raw() & 0x00FF) | ((data as u16 & 0x3F) << 8);
                    self.temp_addr.set_raw(raw);
                    self.write_latch = true;
                } else {
                    let raw = (self.temp_addr.raw() & 0xFF00) | data as u16;
                    self.temp_addr.set_raw(raw);
                    self.vram_addr = self.temp_addr;
                    self.write_latch = false;
                }
            }
            0x0007 => {
                self.ppu_write(self.vram_addr.raw(), data, cartridge);
                self.vram_addr.increment(self.control.vram_increment());
            }
            _ => {}
        }
    }

    /// Reads the PPU's own 14-bit address space.
    pub fn ppu_read(&self, addr: u16, cartridge: Option<&Cartridge>) -> u8 {
        let addr = addr & 0x3FFF;

        if let Some(data) = cartridge.and_then(|cart| cart.ppu_read(addr)) {
            return data;
        }

        match addr {
            0x0000..=0x1FFF => self.memory.read_pattern(addr),
            0x2000..=0x3EFF => self.memory.read_nametable(addr, mirroring_of(cartridge)),
            _ => self.memory.read_palette(addr),
        }
    }

    pub fn ppu_write(&mut self, addr: u16, data: u8, cartridge: Option<&mut Cartridge>) {
        let addr = addr & 0x3FFF;

        let mirroring = match cartridge {
            Some(cart) => {
                if cart.ppu_write(addr, data) {
                    return;
                }
                cart.mirroring()
            }
            None => Mirroring::Horizontal,
        };

        match addr {
            0x0000..=0x1FFF => self.memory.write_pattern(addr, data),
            0x2000..=0x3EFF => self.memory.write_nametable(addr, data, mirroring),
            _ => self.memory.write_palette(addr, data),
        }
    }

    /// Resolves entry `pixel` (0..=3) of `palette` (0..=7) to a screen colour.
    pub fn color_from_palette(&self, palette: u8, pixel: u8, cartridge: Option<&Cartridge>) -> Rgb {
        let addr = 0x3F00 + ((palette as u16 & 0x07) << 2) + (pixel as u16 & 0x03);
        let mut index = self.ppu_read(addr, cartridge) & 0x3F;
        if self.mask.contains(PpuMask::GRAYSCALE) {
            index &= 0x30;
        }
        SYSTEM_PALETTE[index as usize]
    }

    /// Renders pattern table `index` (0 or 1) as a 16x16 grid of tiles,
    /// 128x128 pixels, coloured with `palette`.
    pub fn pattern_table(&self, index: u8, palette: u8, cartridge: Option<&Cartridge>) -> Frame {
        let mut image = Frame::new(128, 128);
        let base = (index as u16 & 0x01) * 0x1000;

        for tile_y in 0..16u16 {
            for tile_x in 0..16u16 {
                let offset = tile_y * 256 + tile_x * 16;

                for row in 0..8u16 {
                    let mut low = self.ppu_read(base + offset + row, cartridge);
                    let mut high = self.ppu_read(base + offset + row + 8, cartridge);

                    for col in 0..8u16 {
                        let pixel = ((high & 0x01) << 1) | (low & 0x01);
                        low >>= 1;
                        high >>= 1;

                        image.set_pixel(
                            (tile_x * 8 + (7 - col)) as usize,
                            (tile_y * 8 + row) as usize,
                            self.color_from_palette(palette, pixel, cartridge),
                        );
                    }
                }
            }
        }

        image
    }

    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    /// Returns and clears the pending NMI request.
    pub fn take_nmi(&mut self) -> bool {
        std::mem::take(&mut self.nmi)
    }

    pub fn nmi_pending(&self) -> bool {
        self.nmi
    }

    pub fn frame_completed(&self) -> bool {
        self.frame_completed
    }

    pub fn clear_frame_completed(&mut self) {
        self.frame_completed = false;
    }

    pub fn cycle(&self) -> u16 {
        self.cycle
    }

    pub fn scanline(&self) -> i16 {
        self.scanline
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn control(&self) -> PpuControl {
        self.control
    }

    pub fn mask(&self) -> PpuMask {
        self.mask
    }

    pub fn status(&self) -> PpuStatus {
        self.status
    }

    pub fn vram_address(&self) -> u16 {
        self.vram_addr.raw()
    }

    pub fn oam(&self) -> &[u8; 256] {
        &self.memory.oam
    }

    fn fetch_background(&mut self, step: u16, cartridge: Option<&Cartridge>) {
        match step {
            0 => {
                self.background.load();
                self.background.next_tile_id =
                    self.ppu_read(self.vram_addr.tile_address(), cartridge);
            }
            2 => {
                let attr = self.ppu_read(self.vram_addr.attribute_address(), cartridge);
                self.background.set_attribute(
                    attr,
                    self.vram_addr.coarse_x(),
                    self.vram_addr.coarse_y(),
                );
            }
            4 => {
                let addr = self.pattern_address();
                self.background.next_tile_low = self.ppu_read(addr, cartridge);
            }
            6 => {
                let addr = self.pattern_address() + 8;
                self.background.next_tile_high = self.ppu_read(addr, cartridge);
            }
            7 => self.increment_scroll_x(),
            _ => {}
        }
    }

    fn pattern_address(&self) -> u16 {
        self.control.bg_pattern_base()
            + ((self.background.next_tile_id as u16) << 4)
            + self.vram_addr.fine_y()
    }

    fn update_shifters(&mut self) {
        if self.mask.contains(PpuMask::BG_ENABLE) {
            self.background.shift();
        }
    }

    fn increment_scroll_x(&mut self) {
        if self.mask.rendering_enabled() {
            self.vram_addr.increment_x();
        }
    }

    fn increment_scroll_y(&mut self) {
        if self.mask.rendering_enabled() {
            self.vram_addr.increment_y();
        }
    }

    fn transfer_address_x(&mut self) {
        if self.mask.rendering_enabled() {
            self.vram_addr.copy_horizontal(self.temp_addr);
        }
    }

    fn transfer_address_y(&mut self) {
        if self.mask.rendering_enabled() {
            self.vram_addr.copy_vertical(self.temp_addr);
        }
    }

    fn render_dot(&mut self, cartridge: Option<&Cartridge>) {
        if !(1..=256).contains(&self.cycle) || !(0..240).contains(&self.scanline) {
            return;
        }
        let x = (self.cycle - 1) as usize;

        let (mut pixel, mut palette) = (0, 0);
        if self.mask.contains(PpuMask::BG_ENABLE)
            && (x >= 8 || self.mask.contains(PpuMask::BG_LEFT_ENABLE))
        {
            (pixel, palette) = self.background.pixel(self.fine_x);
        }
        // Transparent pixels show the universal backdrop
        if pixel == 0 {
            palette = 0;
        }

        let color = self.color_from_palette(palette, pixel, cartridge);
        self.frame.set_pixel(x, self.scanline as usize, color);
    }
}

impl Default for Ppu {
    fn default() -> Self {
        Self::new()
    }
}

fn mirroring_of(cartridge: Option<&Cartridge>) -> Mirroring {
    cartridge.map_or(Mirroring::Horizontal, Cartridge::mirroring)
}
