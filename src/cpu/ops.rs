use super::{AddrMode, Cpu, CpuBus, StatusFlags, IRQ_VECTOR};

/// Operation half of an opcode-table entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Adc, And, Asl, Bcc, Bcs, Beq, Bit, Bmi, Bne, Bpl, Brk, Bvc, Bvs, Clc,
    Cld, Cli, Clv, Cmp, Cpx, Cpy, Dec, Dex, Dey, Eor, Inc, Inx, Iny, Jmp,
    Jsr, Lda, Ldx, Ldy, Lsr, Nop, Ora, Pha, Php, Pla, Plp, Rol, Ror, Rti,
    Rts, Sbc, Sec, Sed, Sei, Sta, Stx, Sty, Tax, Tay, Tsx, Txa, Txs, Tya,
    /// Any opcode the table does not decode. Burns its cycles and nothing else.
    Invalid,
}

impl Cpu {
    /// Runs one operation. The return value is 1 when the operation is
    /// eligible for the addressing mode's page-cross cycle.
    pub(super) fn execute(&mut self, operation: Operation, bus: &mut dyn CpuBus) -> u8 {
        match operation {
            Operation::Adc => self.adc(bus),
            Operation::And => self.and(bus),
            Operation::Asl => self.asl(bus),
            Operation::Bcc => self.branch(!self.status.contains(StatusFlags::CARRY)),
            Operation::Bcs => self.branch(self.status.contains(StatusFlags::CARRY)),
            Operation::Beq => self.branch(self.status.contains(StatusFlags::ZERO)),
            Operation::Bit => self.bit(bus),
            Operation::Bmi => self.branch(self.status.contains(StatusFlags::NEGATIVE)),
            Operation::Bne => self.branch(!self.status.contains(StatusFlags::ZERO)),
            Operation::Bpl => self.branch(!self.status.contains(StatusFlags::NEGATIVE)),
            Operation::Brk => self.brk(bus),
            Operation::Bvc => self.branch(!self.status.contains(StatusFlags::OVERFLOW)),
            Operation::Bvs => self.branch(self.status.contains(StatusFlags::OVERFLOW)),
            Operation::Clc => self.set_flag(StatusFlags::CARRY, false),
            Operation::Cld => self.set_flag(StatusFlags::DECIMAL, false),
            Operation::Cli => self.set_flag(StatusFlags::INTERRUPT_DISABLE, false),
            Operation::Clv => self.set_flag(StatusFlags::OVERFLOW, false),
            Operation::Cmp => self.compare(bus, self.a, 1),
            Operation::Cpx => self.compare(bus, self.x, 0),
            Operation::Cpy => self.compare(bus, self.y, 0),
            Operation::Dec => self.step_memory(bus, 0xFF),
            Operation::Dex => {
                self.x = self.x.wrapping_sub(1);
                self.set_zero_negative_flags(self.x);
                0
            }
            Operation::Dey => {
                self.y = self.y.wrapping_sub(1);
                self.set_zero_negative_flags(self.y);
                0
            }
            Operation::Eor => self.eor(bus),
            Operation::Inc => self.step_memory(bus, 0x01),
            Operation::Inx => {
                self.x = self.x.wrapping_add(1);
                self.set_zero_negative_flags(self.x);
                0
            }
            Operation::Iny => {
                self.y = self.y.wrapping_add(1);
                self.set_zero_negative_flags(self.y);
                0
            }
            Operation::Jmp => {
                self.pc = self.addr_abs;
                0
            }
            Operation::Jsr => self.jsr(bus),
            Operation::Lda => {
                self.a = self.fetch(bus);
                self.set_zero_negative_flags(self.a);
                1
            }
            Operation::Ldx => {
                self.x = self.fetch(bus);
                self.set_zero_negative_flags(self.x);
                1
            }
            Operation::Ldy => {
                self.y = self.fetch(bus);
                self.set_zero_negative_flags(self.y);
                1
            }
            Operation::Lsr => self.lsr(bus),
            Operation::Nop => 0,
            Operation::Ora => self.ora(bus),
            Operation::Pha => {
                self.push(bus, self.a);
                0
            }
            Operation::Php => self.php(bus),
            Operation::Pla => {
                self.a = self.pop(bus);
                self.set_zero_negative_flags(self.a);
                0
            }
            Operation::Plp => {
                self.status = StatusFlags::from_bits_retain(self.pop(bus));
                self.status.insert(StatusFlags::UNUSED);
                0
            }
            Operation::Rol => self.rol(bus),
            Operation::Ror => self.ror(bus),
            Operation::Rti => self.rti(bus),
            Operation::Rts => self.rts(bus),
            Operation::Sbc => self.sbc(bus),
            Operation::Sec => self.set_flag(StatusFlags::CARRY, true),
            Operation::Sed => self.set_flag(StatusFlags::DECIMAL, true),
            Operation::Sei => self.set_flag(StatusFlags::INTERRUPT_DISABLE, true),
            Operation::Sta => {
                bus.write(self.addr_abs, self.a);
                0
            }
            Operation::Stx => {
                bus.write(self.addr_abs, self.x);
                0
            }
            Operation::Sty => {
                bus.write(self.addr_abs, self.y);
                0
            }
            Operation::Tax => {
                self.x = self.a;
                self.set_zero_negative_flags(self.x);
                0
            }
            Operation::Tay => {
                self.y = self.a;
                self.set_zero_negative_flags(self.y);
                0
            }
            Operation::Tsx => {
                self.x = self.sp;
                self.set_zero_negative_flags(self.x);
                0
            }
            Operation::Txa => {
                self.a = self.x;
                self.set_zero_negative_flags(self.a);
                0
            }
            Operation::Txs => {
                self.sp = self.x;
                0
            }
            Operation::Tya => {
                self.a = self.y;
                self.set_zero_negative_flags(self.a);
                0
            }
            Operation::Invalid => {
                log::debug!(
                    "Invalid opcode 0x{:02X} at PC: 0x{:04X}",
                    self.opcode,
                    self.pc.wrapping_sub(1)
                );
                0
            }
        }
    }

    fn set_flag(&mut self, flag: StatusFlags, value: bool) -> u8 {
        self.status.set(flag, value);
        0
    }

    fn carry_in(&self) -> u16 {
        self.status.contains(StatusFlags::CARRY) as u16
    }

    /// Shift/rotate results go back to A in implied mode, to memory otherwise.
    fn write_back(&mut self, bus: &mut dyn CpuBus, value: u8) {
        if self.mode() == AddrMode::Imp {
            self.a = value;
        } else {
            bus.write(self.addr_abs, value);
        }
    }

    fn branch(&mut self, condition: bool) -> u8 {
        if condition {
            self.cycles += 1;
            self.addr_abs = self.pc.wrapping_add(self.addr_rel);

            if (self.addr_abs & 0xFF00) != (self.pc & 0xFF00) {
                self.cycles += 1;
            }

            self.pc = self.addr_abs;
        }
        0
    }

    fn adc(&mut self, bus: &mut dyn CpuBus) -> u8 {
        let operand = self.fetch(bus) as u16;
        let a = self.a as u16;
        let temp = a + operand + self.carry_in();

        self.status.set(StatusFlags::CARRY, temp > 0x00FF);
        self.status.set(StatusFlags::ZERO, temp & 0x00FF == 0);
        self.status.set(StatusFlags::OVERFLOW, !(a ^ operand) & (a ^ temp) & 0x0080 != 0);
        self.status.set(StatusFlags::NEGATIVE, temp & 0x0080 != 0);

        self.a = temp as u8;
        1
    }

    // Subtraction is addition of the operand's one's complement
    fn sbc(&mut self, bus: &mut dyn CpuBus) -> u8 {
        let value = (self.fetch(bus) as u16) ^ 0x00FF;
        let a = self.a as u16;
        let temp = a + value + self.carry_in();

        self.status.set(StatusFlags::CARRY, temp & 0xFF00 != 0);
        self.status.set(StatusFlags::ZERO, temp & 0x00FF == 0);
        self.status.set(StatusFlags::OVERFLOW, (temp ^ a) & (temp ^ value) & 0x0080 != 0);
        self.status.set(StatusFlags::NEGATIVE, temp & 0x0080 != 0);

        self.a = temp as u8;
        1
    }

    fn and(&mut self, bus: &mut dyn CpuBus) -> u8 {
        self.a &= self.fetch(bus);
        self.set_zero_negative_flags(self.a);
        1
    }

    fn eor(&mut self, bus: &mut dyn CpuBus) -> u8 {
        self.a ^= self.fetch(bus);
        self.set_zero_negative_flags(self.a);
        1
    }

    fn ora(&mut self, bus: &mut dyn CpuBus) -> u8 {
        self.a |= self.fetch(bus);
        self.set_zero_negative_flags(self.a);
        1
    }

    fn asl(&mut self, bus: &mut dyn CpuBus) -> u8 {
        let temp = (self.fetch(bus) as u16) << 1;
        self.status.set(StatusFlags::CARRY, temp & 0xFF00 != 0);
        self.set_zero_negative_flags(temp as u8);
        self.write_back(bus, temp as u8);
        0
    }

    fn lsr(&mut self, bus: &mut dyn CpuBus) -> u8 {
        let fetched = self.fetch(bus);
        self.status.set(StatusFlags::CARRY, fetched & 0x01 != 0);
        let temp = fetched >> 1;
        self.set_zero_negative_flags(temp);
        self.write_back(bus, temp);
        0
    }

    fn rol(&mut self, bus: &mut dyn CpuBus) -> u8 {
        let temp = ((self.fetch(bus) as u16) << 1) | self.carry_in();
        self.status.set(StatusFlags::CARRY, temp & 0xFF00 != 0);
        self.set_zero_negative_flags(temp as u8);
        self.write_back(bus, temp as u8);
        0
    }

    fn ror(&mut self, bus: &mut dyn CpuBus) -> u8 {
        let fetched = self.fetch(bus);
        let temp = ((self.carry_in() as u8) << 7) | (fetched >> 1);
        self.status.set(StatusFlags::CARRY, fetched & 0x01 != 0);
        self.set_zero_negative_flags(temp);
        self.write_back(bus, temp);
        0
    }

    fn bit(&mut self, bus: &mut dyn CpuBus) -> u8 {
        let fetched = self.fetch(bus);
        self.status.set(StatusFlags::ZERO, self.a & fetched == 0);
        self.status.set(StatusFlags::NEGATIVE, fetched & 0x80 != 0);
        self.status.set(StatusFlags::OVERFLOW, fetched & 0x40 != 0);
        0
    }

    fn compare(&mut self, bus: &mut dyn CpuBus, register: u8, extra: u8) -> u8 {
        let fetched = self.fetch(bus);
        self.status.set(StatusFlags::CARRY, register >= fetched);
        self.set_zero_negative_flags(register.wrapping_sub(fetched));
        extra
    }

    fn step_memory(&mut self, bus: &mut dyn CpuBus, delta: u8) -> u8 {
        let temp = self.fetch(bus).wrapping_add(delta);
        bus.write(self.addr_abs, temp);
        self.set_zero_negative_flags(temp);
        0
    }

    fn brk(&mut self, bus: &mut dyn CpuBus) -> u8 {
        // PC already skipped the padding byte, so this is opcode + 2
        self.push(bus, (self.pc >> 8) as u8);
        self.push(bus, self.pc as u8);

        self.push(bus, (self.status | StatusFlags::BREAK | StatusFlags::UNUSED).bits());
        self.status.remove(StatusFlags::BREAK);
        self.status.insert(StatusFlags::INTERRUPT_DISABLE);

        self.pc = self.read_vector(bus, IRQ_VECTOR);
        0
    }

    fn php(&mut self, bus: &mut dyn CpuBus) -> u8 {
        self.push(bus, (self.status | StatusFlags::BREAK | StatusFlags::UNUSED).bits());
        self.status.remove(StatusFlags::BREAK | StatusFlags::UNUSED);
        0
    }

    fn rti(&mut self, bus: &mut dyn CpuBus) -> u8 {
        self.status = StatusFlags::from_bits_retain(self.pop(bus));
        self.status.remove(StatusFlags::BREAK | StatusFlags::UNUSED);

        let low = self.pop(bus) as u16;
        let high = self.pop(bus) as u16;
        self.pc = (high << 8) | low;
        0
    }

    fn jsr(&mut self, bus: &mut dyn CpuBus) -> u8 {
        let ret = self.pc.wrapping_sub(1);
        self.push(bus, (ret >> 8) as u8);
        self.push(bus, ret as u8);
        self.pc = self.addr_abs;
        0
    }

    fn rts(&mut self, bus: &mut dyn CpuBus) -> u8 {
        let low = self.pop(bus) as u16;
        let high = self.pop(bus) as u16;
        // JSR pushed the address of its last operand byte
        self.pc = ((high << 8) | low).wrapping_add(1);
        0
    }
}
