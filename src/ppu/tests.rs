use super::*;

const DOTS_PER_FRAME: u32 = CYCLES_PER_SCANLINE as u32 * SCANLINES_PER_FRAME as u32;

/// Mapper 0 cartridge with one PRG bank and 8KB of CHR RAM.
fn chr_ram_cartridge(flags6: u8) -> Cartridge {
    let mut image = vec![0x4E, 0x45, 0x53, 0x1A, 0x01, 0x00, flags6, 0x00];
    image.resize(16 + 0x4000, 0);
    Cartridge::from_bytes(&image).expect("valid test image")
}

fn run_dots(ppu: &mut Ppu, dots: u32, cartridge: Option<&Cartridge>) {
    for _ in 0..dots {
        ppu.clock(cartridge);
    }
}

fn set_vram_address(ppu: &mut Ppu, addr: u16) {
    ppu.cpu_write(6, (addr >> 8) as u8, None);
    ppu.cpu_write(6, addr as u8, None);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_control_register() {
        let mut ppu = Ppu::new();
        ppu.cpu_write(0, 0xFF, None);

        assert_eq!(ppu.control(), PpuControl::all());
        assert_eq!(ppu.temp_addr.nametable_x(), 1);
        assert_eq!(ppu.temp_addr.nametable_y(), 1);
    }

    #[test]
    fn test_mask_register() {
        let mut ppu = Ppu::new();
        ppu.cpu_write(1, PpuMask::BG_ENABLE.bits(), None);

        assert!(ppu.mask().contains(PpuMask::BG_ENABLE));
        assert!(!ppu.mask().contains(PpuMask::SPRITE_ENABLE));
    }

    #[test]
    fn test_status_read_clears_vblank_and_latch() {
        let mut ppu = Ppu::new();
        ppu.status.insert(PpuStatus::VBLANK | PpuStatus::SPRITE_0_HIT);
        ppu.write_latch = true;

        let status = ppu.cpu_read(2, false, None);

        assert_eq!(status & 0xE0, 0xC0);
        assert!(!ppu.status().contains(PpuStatus::VBLANK));
        assert!(ppu.status().contains(PpuStatus::SPRITE_0_HIT));
        assert!(!ppu.write_latch);
    }

    #[test]
    fn test_status_peek_has_no_side_effects() {
        let mut ppu = Ppu::new();
        ppu.status.insert(PpuStatus::VBLANK);
        ppu.write_latch = true;

        assert_eq!(ppu.cpu_read(2, true, None) & 0x80, 0x80);
        assert!(ppu.status().contains(PpuStatus::VBLANK));
        assert!(ppu.write_latch);
    }

    #[test]
    fn test_status_low_bits_are_bus_noise() {
        let mut ppu = Ppu::new();
        ppu.cpu_write(3, 0x3B, None);
        assert_eq!(ppu.cpu_read(2, false, None), 0x1B);
    }

    #[test]
    fn test_write_only_registers_read_zero() {
        let mut ppu = Ppu::new();
        ppu.cpu_write(0, 0x80, None);
        for reg in [0, 1, 3, 5, 6] {
            assert_eq!(ppu.cpu_read(reg, false, None), 0);
        }
    }

    #[test]
    fn test_address_register_two_writes() {
        let mut ppu = Ppu::new();

        ppu.cpu_write(6, 0x21, None);
        assert!(ppu.write_latch);
        assert_eq!(ppu.vram_address(), 0);

        ppu.cpu_write(6, 0x08, None);
        assert!(!ppu.write_latch);
        assert_eq!(ppu.vram_address(), 0x2108);
    }

    #[test]
    fn test_address_high_byte_is_masked() {
        let mut ppu = Ppu::new();
        set_vram_address(&mut ppu, 0xFF00);
        assert_eq!(ppu.vram_address(), 0x3F00);
    }

    #[test]
    fn test_data_reads_are_buffered() {
        let mut ppu = Ppu::new();
        set_vram_address(&mut ppu, 0x2000);
        ppu.cpu_write(7, 0x11, None);
        ppu.cpu_write(7, 0x22, None);
        assert_eq!(ppu.vram_address(), 0x2002);

        set_vram_address(&mut ppu, 0x2000);
        let stale = ppu.cpu_read(7, false, None);
        let first = ppu.cpu_read(7, false, None);
        let second = ppu.cpu_read(7, false, None);

        assert_eq!(stale, 0x00);
        assert_eq!(first, 0x11);
        assert_eq!(second, 0x22);
        assert_eq!(ppu.vram_address(), 0x2003);
    }

    #[test]
    fn test_palette_reads_are_immediate() {
        let mut ppu = Ppu::new();
        set_vram_address(&mut ppu, 0x3F01);
        ppu.cpu_write(7, 0x2C, None);

        set_vram_address(&mut ppu, 0x3F01);
        assert_eq!(ppu.cpu_read(7, false, None), 0x2C);
    }

    #[test]
    fn test_data_peek_does_not_advance() {
        let mut ppu = Ppu::new();
        set_vram_address(&mut ppu, 0x2400);
        ppu.cpu_write(7, 0x5A, None);
        set_vram_address(&mut ppu, 0x2400);
        ppu.cpu_read(7, false, None);

        let before = ppu.vram_address();
        assert_eq!(ppu.cpu_read(7, true, None), 0x5A);
        assert_eq!(ppu.cpu_read(7, true, None), 0x5A);
        assert_eq!(ppu.vram_address(), before);
    }

    #[test]
    fn test_increment_by_32() {
        let mut ppu = Ppu::new();
        ppu.cpu_write(0, PpuControl::VRAM_INCREMENT.bits(), None);
        set_vram_address(&mut ppu, 0x2000);

        ppu.cpu_write(7, 0x01, None);
        ppu.cpu_write(7, 0x02, None);

        assert_eq!(ppu.vram_address(), 0x2040);
        assert_eq!(ppu.ppu_read(0x2020, None), 0x02);
    }

    #[test]
    fn test_scroll_register() {
        let mut ppu = Ppu::new();
        // X = 125 (coarse 15, fine 5), Y = 94 (coarse 11, fine 6)
        ppu.cpu_write(5, 125, None);
        ppu.cpu_write(5, 94, None);

        assert_eq!(ppu.fine_x, 5);
        assert_eq!(ppu.temp_addr.coarse_x(), 15);
        assert_eq!(ppu.temp_addr.coarse_y(), 11);
        assert_eq!(ppu.temp_addr.fine_y(), 6);
        assert!(!ppu.write_latch);
    }

    #[test]
    fn test_status_read_resets_shared_latch() {
        let mut ppu = Ppu::new();
        ppu.cpu_write(5, 0x10, None);
        ppu.cpu_read(2, false, None);
        // Treated as the first write again
        ppu.cpu_write(6, 0x23, None);
        ppu.cpu_write(6, 0x45, None);
        assert_eq!(ppu.vram_address(), 0x2345);
    }

    #[test]
    fn test_oam_address_and_data() {
        let mut ppu = Ppu::new();
        ppu.cpu_write(3, 0xFE, None);
        ppu.cpu_write(4, 0xAA, None);
        ppu.cpu_write(4, 0xBB, None);
        ppu.cpu_write(4, 0xCC, None);

        assert_eq!(ppu.oam()[0xFE], 0xAA);
        assert_eq!(ppu.oam()[0xFF], 0xBB);
        assert_eq!(ppu.oam()[0x00], 0xCC);

        ppu.cpu_write(3, 0xFF, None);
        assert_eq!(ppu.cpu_read(4, false, None), 0xBB);
    }

    #[test]
    fn test_pattern_space_goes_to_cartridge() {
        let mut ppu = Ppu::new();
        let mut cart = chr_ram_cartridge(0x00);

        ppu.ppu_write(0x0123, 0x77, Some(&mut cart));

        assert_eq!(cart.ppu_read(0x0123), Some(0x77));
        assert_eq!(ppu.ppu_read(0x0123, Some(&cart)), 0x77);
        assert_eq!(ppu.memory.read_pattern(0x0123), 0x00);
    }

    #[test]
    fn test_pattern_space_without_cartridge() {
        let mut ppu = Ppu::new();
        ppu.ppu_write(0x1FFF, 0x42, None);
        assert_eq!(ppu.memory.patterns[1][0x0FFF], 0x42);
        assert_eq!(ppu.ppu_read(0x1FFF, None), 0x42);
    }

    #[test]
    fn test_nametable_mirroring_follows_cartridge() {
        let mut ppu = Ppu::new();
        let mut vertical = chr_ram_cartridge(0x01);
        ppu.ppu_write(0x2001, 0x99, Some(&mut vertical));
        assert_eq!(ppu.ppu_read(0x2801, Some(&vertical)), 0x99);
        assert_eq!(ppu.ppu_read(0x2401, Some(&vertical)), 0x00);

        let mut ppu = Ppu::new();
        let mut horizontal = chr_ram_cartridge(0x00);
        ppu.ppu_write(0x2001, 0x99, Some(&mut horizontal));
        assert_eq!(ppu.ppu_read(0x2401, Some(&horizontal)), 0x99);
        assert_eq!(ppu.ppu_read(0x2801, Some(&horizontal)), 0x00);
    }

    #[test]
    fn test_frame_is_341_by_262_dots() {
        let mut ppu = Ppu::new();

        run_dots(&mut ppu, DOTS_PER_FRAME - 1, None);
        assert!(!ppu.frame_completed());
        assert_eq!(ppu.scanline(), 260);
        assert_eq!(ppu.cycle(), 340);

        ppu.clock(None);
        assert!(ppu.frame_completed());
        assert_eq!(ppu.scanline(), -1);
        assert_eq!(ppu.cycle(), 0);
        assert_eq!(ppu.frame_count(), 1);

        ppu.clear_frame_completed();
        run_dots(&mut ppu, DOTS_PER_FRAME, None);
        assert!(ppu.frame_completed());
        assert_eq!(ppu.frame_count(), 2);
    }

    #[test]
    fn test_vblank_starts_at_scanline_241_cycle_1() {
        let mut ppu = Ppu::new();
        ppu.cpu_write(0, PpuControl::NMI_ENABLE.bits(), None);

        // Dot (241, 1) is the 242*341 + 2nd clock from the start of a frame
        run_dots(&mut ppu, 242 * 341 + 1, None);
        assert!(!ppu.status().contains(PpuStatus::VBLANK));
        assert!(!ppu.nmi_pending());

        ppu.clock(None);
        assert!(ppu.status().contains(PpuStatus::VBLANK));
        assert!(ppu.take_nmi());
        assert!(!ppu.nmi_pending());
    }

    #[test]
    fn test_pre_render_line_clears_vblank() {
        let mut ppu = Ppu::new();
        run_dots(&mut ppu, DOTS_PER_FRAME, None);
        assert!(ppu.status().contains(PpuStatus::VBLANK));

        run_dots(&mut ppu, 2, None);
        assert!(!ppu.status().contains(PpuStatus::VBLANK));
    }

    #[test]
    fn test_no_nmi_when_disabled() {
        let mut ppu = Ppu::new();
        run_dots(&mut ppu, DOTS_PER_FRAME, None);
        assert!(!ppu.take_nmi());
        assert_eq!(ppu.status().bits() & 0x80, 0x80);
    }

    #[test]
    fn test_one_nmi_per_frame() {
        let mut ppu = Ppu::new();
        ppu.cpu_write(0, PpuControl::NMI_ENABLE.bits(), None);

        let mut nmis = 0;
        for _ in 0..3 * DOTS_PER_FRAME {
            ppu.clock(None);
            if ppu.take_nmi() {
                nmis += 1;
            }
        }
        assert_eq!(nmis, 3);
    }

    #[test]
    fn test_disabled_background_draws_backdrop() {
        let mut ppu = Ppu::new();
        set_vram_address(&mut ppu, 0x3F00);
        ppu.cpu_write(7, 0x21, None);

        run_dots(&mut ppu, DOTS_PER_FRAME, None);

        let backdrop = SYSTEM_PALETTE[0x21];
        assert_eq!(ppu.frame().pixel(0, 0), Some(backdrop));
        assert_eq!(ppu.frame().pixel(255, 239), Some(backdrop));
        assert_eq!(ppu.frame().pixel(128, 100), Some(backdrop));
    }

    #[test]
    fn test_background_tile_is_rendered() {
        let mut ppu = Ppu::new();
        let mut cart = chr_ram_cartridge(0x01);

        // Tile 1: plane 0 solid, plane 1 empty, so every pixel is colour 1
        for row in 0..8 {
            ppu.ppu_write(0x0010 + row, 0xFF, Some(&mut cart));
        }
        ppu.ppu_write(0x2000, 0x01, Some(&mut cart));
        ppu.ppu_write(0x3F00, 0x0F, Some(&mut cart));
        ppu.ppu_write(0x3F01, 0x21, Some(&mut cart));

        set_vram_address(&mut ppu, 0x0000);
        ppu.cpu_write(0, 0x00, Some(&mut cart));
        ppu.cpu_write(1, (PpuMask::BG_ENABLE | PpuMask::BG_LEFT_ENABLE).bits(), Some(&mut cart));

        while !ppu.frame_completed() {
            ppu.clock(Some(&cart));
        }

        let tile = SYSTEM_PALETTE[0x21];
        let backdrop = SYSTEM_PALETTE[0x0F];
        let frame = ppu.frame();
        for y in 0..8 {
            for x in 0..8 {
                assert_eq!(frame.pixel(x, y), Some(tile), "({x}, {y})");
            }
        }
        assert_eq!(frame.pixel(8, 0), Some(backdrop));
        assert_eq!(frame.pixel(0, 8), Some(backdrop));
        assert_eq!(frame.pixel(200, 200), Some(backdrop));
    }

    #[test]
    fn test_hidden_left_column() {
        let mut ppu = Ppu::new();
        let mut cart = chr_ram_cartridge(0x01);
        for row in 0..8 {
            ppu.ppu_write(0x0010 + row, 0xFF, Some(&mut cart));
        }
        ppu.ppu_write(0x2000, 0x01, Some(&mut cart));
        ppu.ppu_write(0x3F01, 0x21, Some(&mut cart));

        set_vram_address(&mut ppu, 0x0000);
        ppu.cpu_write(1, PpuMask::BG_ENABLE.bits(), Some(&mut cart));

        while !ppu.frame_completed() {
            ppu.clock(Some(&cart));
        }

        assert_eq!(ppu.frame().pixel(0, 0), Some(SYSTEM_PALETTE[0x00]));
    }

    #[test]
    fn test_color_from_palette() {
        let mut ppu = Ppu::new();
        ppu.ppu_write(0x3F0E, 0x16, None);

        assert_eq!(ppu.color_from_palette(3, 2, None), SYSTEM_PALETTE[0x16]);

        ppu.cpu_write(1, PpuMask::GRAYSCALE.bits(), None);
        assert_eq!(ppu.color_from_palette(3, 2, None), SYSTEM_PALETTE[0x10]);
    }

    #[test]
    fn test_pattern_table_view() {
        let mut ppu = Ppu::new();
        let mut cart = chr_ram_cartridge(0x00);

        // Second table, tile 0, top row: leftmost pixel colour 3, next colour 1
        ppu.ppu_write(0x1000, 0b1100_0000, Some(&mut cart));
        ppu.ppu_write(0x1008, 0b1000_0000, Some(&mut cart));
        ppu.ppu_write(0x3F00, 0x0F, Some(&mut cart));
        ppu.ppu_write(0x3F05, 0x2A, Some(&mut cart));
        ppu.ppu_write(0x3F07, 0x30, Some(&mut cart));

        let view = ppu.pattern_table(1, 1, Some(&cart));

        assert_eq!(view.width(), 128);
        assert_eq!(view.height(), 128);
        assert_eq!(view.pixel(0, 0), Some(SYSTEM_PALETTE[0x30]));
        assert_eq!(view.pixel(1, 0), Some(SYSTEM_PALETTE[0x2A]));
        // Colour 0 of palette 1 is the $3F04 slot
        assert_eq!(view.pixel(2, 0), Some(SYSTEM_PALETTE[0x00]));
    }
}
