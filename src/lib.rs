//! Cycle-stepped emulation of the NES hardware core: 6502 CPU, system bus,
//! NROM cartridge and the background half of the 2C02 PPU.

pub mod bus;
pub mod cartridge;
pub mod config;
pub mod cpu;
pub mod memory;
pub mod ppu;

pub use bus::Bus;
pub use cartridge::{Cartridge, CartridgeError, Mirroring};
pub use cpu::{Cpu, CpuBus, StatusFlags};
pub use ppu::Ppu;
