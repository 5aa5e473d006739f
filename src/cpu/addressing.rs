use super::{Cpu, CpuBus};

/// The twelve 6502 addressing modes. Each resolver leaves its result in
/// `addr_abs` (or `addr_rel` for branches) and reports whether it may need
/// an extra cycle for crossing a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddrMode {
    Imp,
    Imm,
    Zp0,
    Zpx,
    Zpy,
    Rel,
    Abs,
    Abx,
    Aby,
    Ind,
    Izx,
    Izy,
}

impl AddrMode {
    /// Operand bytes following the opcode.
    pub fn operand_len(self) -> u16 {
        match self {
            AddrMode::Imp => 0,
            AddrMode::Imm
            | AddrMode::Zp0
            | AddrMode::Zpx
            | AddrMode::Zpy
            | AddrMode::Rel
            | AddrMode::Izx
            | AddrMode::Izy => 1,
            AddrMode::Abs | AddrMode::Abx | AddrMode::Aby | AddrMode::Ind => 2,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            AddrMode::Imp => "IMP",
            AddrMode::Imm => "IMM",
            AddrMode::Zp0 => "ZP0",
            AddrMode::Zpx => "ZPX",
            AddrMode::Zpy => "ZPY",
            AddrMode::Rel => "REL",
            AddrMode::Abs => "ABS",
            AddrMode::Abx => "ABX",
            AddrMode::Aby => "ABY",
            AddrMode::Ind => "IND",
            AddrMode::Izx => "IZX",
            AddrMode::Izy => "IZY",
        }
    }
}

impl Cpu {
    pub(super) fn address(&mut self, mode: AddrMode, bus: &mut dyn CpuBus) -> u8 {
        match mode {
            AddrMode::Imp => self.imp(),
            AddrMode::Imm => self.imm(),
            AddrMode::Zp0 => self.zero_page(bus, 0),
            AddrMode::Zpx => self.zero_page(bus, self.x),
            AddrMode::Zpy => self.zero_page(bus, self.y),
            AddrMode::Rel => self.rel(bus),
            AddrMode::Abs => self.absolute(bus, 0),
            AddrMode::Abx => self.absolute(bus, self.x),
            AddrMode::Aby => self.absolute(bus, self.y),
            AddrMode::Ind => self.ind(bus),
            AddrMode::Izx => self.izx(bus),
            AddrMode::Izy => self.izy(bus),
        }
    }

    fn read_pc_byte(&mut self, bus: &mut dyn CpuBus) -> u8 {
        let data = bus.read(self.pc);
        self.pc = self.pc.wrapping_add(1);
        data
    }

    fn read_pc_word(&mut self, bus: &mut dyn CpuBus) -> u16 {
        let low = self.read_pc_byte(bus) as u16;
        let high = self.read_pc_byte(bus) as u16;
        (high << 8) | low
    }

    fn imp(&mut self) -> u8 {
        self.fetched = self.a;
        0
    }

    fn imm(&mut self) -> u8 {
        self.addr_abs = self.pc;
        self.pc = self.pc.wrapping_add(1);
        0
    }

    fn zero_page(&mut self, bus: &mut dyn CpuBus, index: u8) -> u8 {
        self.addr_abs = self.read_pc_byte(bus).wrapping_add(index) as u16;
        0
    }

    fn rel(&mut self, bus: &mut dyn CpuBus) -> u8 {
        // Sign-extend so the branch target is a plain wrapping add
        self.addr_rel = self.read_pc_byte(bus) as i8 as i16 as u16;
        0
    }

    fn absolute(&mut self, bus: &mut dyn CpuBus, index: u8) -> u8 {
        let base = self.read_pc_word(bus);
        self.addr_abs = base.wrapping_add(index as u16);

        if (self.addr_abs & 0xFF00) != (base & 0xFF00) {
            1
        } else {
            0
        }
    }

    fn ind(&mut self, bus: &mut dyn CpuBus) -> u8 {
        let pointer = self.read_pc_word(bus);

        // The high byte never carries into the next page
        let high_addr = if pointer & 0x00FF == 0x00FF {
            pointer & 0xFF00
        } else {
            pointer.wrapping_add(1)
        };

        let low = bus.read(pointer) as u16;
        let high = bus.read(high_addr) as u16;
        self.addr_abs = (high << 8) | low;
        0
    }

    fn izx(&mut self, bus: &mut dyn CpuBus) -> u8 {
        let t = self.read_pc_byte(bus);
        let pointer = t.wrapping_add(self.x);

        let low = bus.read(pointer as u16) as u16;
        let high = bus.read(pointer.wrapping_add(1) as u16) as u16;
        self.addr_abs = (high << 8) | low;
        0
    }

    fn izy(&mut self, bus: &mut dyn CpuBus) -> u8 {
        let t = self.read_pc_byte(bus);

        let low = bus.read(t as u16) as u16;
        let high = bus.read(t.wrapping_add(1) as u16) as u16;
        let base = (high << 8) | low;
        self.addr_abs = base.wrapping_add(self.y as u16);

        if (self.addr_abs & 0xFF00) != (base & 0xFF00) {
            1
        } else {
            0
        }
    }
}
