use std::collections::BTreeMap;
use std::path::Path;

use crate::cartridge::{Cartridge, CartridgeError};
use crate::cpu::{disasm, Cpu, CpuBus};
use crate::memory::Memory;
use crate::ppu::{Frame, Ppu};


const RESET_VECTOR: u16 = 0xFFFC;

/// Everything the CPU can reach through the address bus. Kept apart from
/// the CPU so the two can be borrowed independently while clocking.
struct Interconnect {
    ram: Memory,
    ppu: Ppu,
    cartridge: Option<Cartridge>,
}

impl Interconnect {
    fn new() -> Self {
        Interconnect {
            ram: Memory::new(),
            ppu: Ppu::new(),
            cartridge: None,
        }
    }

    fn read_byte(&mut self, addr: u16, read_only: bool) -> u8 {
        match addr {
            0x0000..=0x1FFF => self.ram.read(addr),
            0x2000..=0x3FFF => self.ppu.cpu_read(addr & 0x0007, read_only, self.cartridge.as_ref()),
            // Anything unclaimed is open bus
            _ => self
                .cartridge
                .as_ref()
                .and_then(|cart| cart.cpu_read(addr))
                .unwrap_or(0),
        }
    }

    fn write_byte(&mut self, addr: u16, data: u8) {
        match addr {
            0x0000..=0x1FFF => self.ram.write(addr, data),
            0x2000..=0x3FFF => self.ppu.cpu_write(addr & 0x0007, data, self.cartridge.as_mut()),
            _ => {
                if let Some(cart) = self.cartridge.as_mut() {
                    if cart.cpu_write(addr, data) {
                        return;
                    }
                }
                // Unclaimed writes fall through to RAM, masked the same way
                self.ram.write(addr & 0x07FF, data);
            }
        }
    }
}

impl CpuBus for Interconnect {
    fn read(&mut self, addr: u16) -> u8 {
        self.read_byte(addr, false)
    }

    fn write(&mut self, addr: u16, data: u8) {
        self.write_byte(addr, data)
    }

    fn peek(&mut self, addr: u16) -> u8 {
        self.read_byte(addr, true)
    }
}

/// The console: CPU, RAM, PPU and cartridge on one master clock.
pub struct Bus {
    cpu: Cpu,
    io: Interconnect,
    system_clock: u64,
}

impl Bus {
    pub fn new() -> Self {
        Bus {
            cpu: Cpu::new(),
            io: Interconnect::new(),
            system_clock: 0,
        }
    }

    /// Loads a ROM from disk and plugs it in. On error the bus is left as it was.
    pub fn insert_cartridge<P: AsRef<Path>>(&mut self, path: P) -> Result<(), CartridgeError> {
        let cartridge = Cartridge::load(path)?;
        self.insert(cartridge);
        Ok(())
    }

    /// Plugs in an already parsed cartridge and points the CPU at its reset vector.
    pub fn insert(&mut self, cartridge: Cartridge) {
        self.io.cartridge = Some(cartridge);

        let low = self.io.read_byte(RESET_VECTOR, true) as u16;
        let high = self.io.read_byte(RESET_VECTOR + 1, true) as u16;
        self.cpu.pc = (high << 8) | low;
    }

    pub fn reset(&mut self) {
        self.cpu.reset(&mut self.io);
        self.system_clock = 0;
    }

    /// One master clock: a PPU dot, a CPU cycle on every third call, then
    /// any NMI the PPU raised during this dot.
    pub fn clock(&mut self) {
        self.io.ppu.clock(self.io.cartridge.as_ref());

        if self.system_clock % 3 == 0 {
            self.cpu.clock(&mut self.io);
        }

        if self.io.ppu.take_nmi() {
            self.cpu.nmi(&mut self.io);
        }

        self.system_clock += 1;
    }

    /// Clocks until the CPU has finished an instruction.
    pub fn step_instruction(&mut self) {
        let start = self.cpu.clock_count();
        loop {
            self.clock();
            if self.cpu.clock_count() > start && self.cpu.complete() {
                break;
            }
        }
    }

    /// Clocks until the PPU finishes a frame, then lets the in-flight
    /// instruction complete.
    pub fn step_frame(&mut self) {
        while !self.io.ppu.frame_completed() {
            self.clock();
        }
        self.io.ppu.clear_frame_completed();

        while !self.cpu.complete() {
            self.clock();
        }
    }

    pub fn irq(&mut self) {
        self.cpu.irq(&mut self.io);
    }

    pub fn nmi(&mut self) {
        self.cpu.nmi(&mut self.io);
    }

    /// CPU-view read. `read_only` suppresses register side effects.
    pub fn read(&mut self, addr: u16, read_only: bool) -> u8 {
        self.io.read_byte(addr, read_only)
    }

    pub fn write(&mut self, addr: u16, data: u8) {
        self.io.write_byte(addr, data);
    }

    pub fn disassemble(&mut self, start: u16, end: u16) -> BTreeMap<u16, String> {
        disasm::disassemble(&mut self.io, start, end)
    }

    pub fn pattern_table(&self, index: u8, palette: u8) -> Frame {
        self.io.ppu.pattern_table(index, palette, self.io.cartridge.as_ref())
    }

    pub fn frame_completed(&self) -> bool {
        self.io.ppu.frame_completed()
    }

    pub fn clear_frame_completed(&mut self) {
        self.io.ppu.clear_frame_completed();
    }

    pub fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    pub fn cpu_mut(&mut self) -> &mut Cpu {
        &mut self.cpu
    }

    pub fn ppu(&self) -> &Ppu {
        &self.io.ppu
    }

    pub fn cartridge(&self) -> Option<&Cartridge> {
        self.io.cartridge.as_ref()
    }

    pub fn ram(&self) -> &[u8; 0x800] {
        self.io.ram.ram()
    }

    pub fn system_clock(&self) -> u64 {
        self.system_clock
    }
}

impl Default for Bus {
    fn default() -> Self {
        Self::new()
    }
}
