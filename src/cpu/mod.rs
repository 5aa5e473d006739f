use bitflags::bitflags;

use crate::config;

pub mod addressing;
pub mod disasm;
pub mod ops;
pub mod table;

pub use addressing::AddrMode;
pub use ops::Operation;
pub use table::{Instruction, INSTRUCTIONS};


const STACK_BASE: u16 = 0x0100;
const RESET_VECTOR: u16 = 0xFFFC;
// IRQ, NMI and BRK all vector through here on this machine
const IRQ_VECTOR: u16 = 0xFFFE;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct StatusFlags: u8 {
        const CARRY = 0b00000001;
        const ZERO = 0b00000010;
        const INTERRUPT_DISABLE = 0b00000100;
        const DECIMAL = 0b00001000;
        const BREAK = 0b00010000;
        const UNUSED = 0b00100000;
        const OVERFLOW = 0b01000000;
        const NEGATIVE = 0b10000000;
    }
}

/// The bus as seen from the CPU. Every memory access the core makes goes
/// through one of these calls.
pub trait CpuBus {
    fn read(&mut self, addr: u16) -> u8;
    fn write(&mut self, addr: u16, data: u8);

    /// Read without side effects on memory-mapped registers.
    fn peek(&mut self, addr: u16) -> u8 {
        self.read(addr)
    }
}

pub struct Cpu {
    pub a: u8,      // Accumulator
    pub x: u8,      // X register
    pub y: u8,      // Y register
    pub sp: u8,     // Stack pointer, page 1
    pub pc: u16,    // Program counter
    pub status: StatusFlags,

    fetched: u8,
    addr_abs: u16,
    addr_rel: u16,
    opcode: u8,
    cycles: u8,     // Cycles left in the current instruction
    clock_count: u64,
}

impl Cpu {
    pub fn new() -> Self {
        Cpu {
            a: 0,
            x: 0,
            y: 0,
            sp: 0xFD,
            pc: 0,
            status: StatusFlags::UNUSED,
            fetched: 0,
            addr_abs: 0,
            addr_rel: 0,
            opcode: 0,
            cycles: 0,
            clock_count: 0,
        }
    }

    /// Advances the CPU by one of its own clock cycles. The whole instruction
    /// executes on the first cycle; the remaining ones are idle so that the
    /// overall timing matches the hardware.
    pub fn clock(&mut self, bus: &mut dyn CpuBus) {
        if self.cycles == 0 {
            self.opcode = bus.read(self.pc);
            let instruction = &INSTRUCTIONS[self.opcode as usize];

            if config::trace_cpu() {
                log::trace!(
                    "{:04X}  {:02X}  {}  A:{:02X} X:{:02X} Y:{:02X} P:{:02X} SP:{:02X}",
                    self.pc,
                    self.opcode,
                    instruction.mnemonic,
                    self.a,
                    self.x,
                    self.y,
                    self.status.bits(),
                    self.sp
                );
            }

            self.status.insert(StatusFlags::UNUSED);
            self.pc = self.pc.wrapping_add(1);

            self.cycles = instruction.cycles;
            let addr_extra = self.address(instruction.mode, bus);
            let op_extra = self.execute(instruction.operation, bus);
            // Both sides must agree before the page-cross cycle is charged
            self.cycles += addr_extra & op_extra;

            self.status.insert(StatusFlags::UNUSED);
        }

        self.clock_count += 1;
        self.cycles = self.cycles.saturating_sub(1);
    }

    pub fn reset(&mut self, bus: &mut dyn CpuBus) {
        self.a = 0;
        self.x = 0;
        self.y = 0;
        self.sp = 0xFD;
        self.status = StatusFlags::UNUSED;

        self.pc = self.read_vector(bus, RESET_VECTOR);

        self.addr_abs = 0;
        self.addr_rel = 0;
        self.fetched = 0;

        self.cycles = 8;
    }

    /// Maskable interrupt. Ignored while INTERRUPT_DISABLE is set.
    pub fn irq(&mut self, bus: &mut dyn CpuBus) {
        if self.status.contains(StatusFlags::INTERRUPT_DISABLE) {
            return;
        }
        self.interrupt(bus);
        self.cycles = 7;
    }

    pub fn nmi(&mut self, bus: &mut dyn CpuBus) {
        self.interrupt(bus);
        self.cycles = 8;
    }

    /// True when the current instruction has used up all of its cycles.
    pub fn complete(&self) -> bool {
        self.cycles == 0
    }

    pub fn cycles_remaining(&self) -> u8 {
        self.cycles
    }

    pub fn clock_count(&self) -> u64 {
        self.clock_count
    }

    pub fn opcode(&self) -> u8 {
        self.opcode
    }

    fn interrupt(&mut self, bus: &mut dyn CpuBus) {
        self.push(bus, (self.pc >> 8) as u8);
        self.push(bus, self.pc as u8);

        self.status.remove(StatusFlags::BREAK);
        self.status.insert(StatusFlags::UNUSED);
        self.push(bus, self.status.bits());
        self.status.insert(StatusFlags::INTERRUPT_DISABLE);

        self.pc = self.read_vector(bus, IRQ_VECTOR);
    }

    fn read_vector(&mut self, bus: &mut dyn CpuBus, vector: u16) -> u16 {
        let low = bus.read(vector) as u16;
        let high = bus.read(vector.wrapping_add(1)) as u16;
        (high << 8) | low
    }

    /// Loads the operand for the current instruction. Implied mode already
    /// placed the accumulator in `fetched`.
    fn fetch(&mut self, bus: &mut dyn CpuBus) -> u8 {
        if self.mode() != AddrMode::Imp {
            self.fetched = bus.read(self.addr_abs);
        }
        self.fetched
    }

    fn mode(&self) -> AddrMode {
        INSTRUCTIONS[self.opcode as usize].mode
    }

    fn push(&mut self, bus: &mut dyn CpuBus, data: u8) {
        bus.write(STACK_BASE + self.sp as u16, data);
        self.sp = self.sp.wrapping_sub(1);
    }

    fn pop(&mut self, bus: &mut dyn CpuBus) -> u8 {
        self.sp = self.sp.wrapping_add(1);
        bus.read(STACK_BASE + self.sp as u16)
    }

    fn set_zero_negative_flags(&mut self, value: u8) {
        self.status.set(StatusFlags::ZERO, value == 0);
        self.status.set(StatusFlags::NEGATIVE, value & 0x80 != 0);
    }
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}
