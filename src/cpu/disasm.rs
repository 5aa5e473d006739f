use std::collections::BTreeMap;

use super::{AddrMode, CpuBus, INSTRUCTIONS};

/// Decodes `start..=end` into one line per instruction, keyed by address.
/// Reads go through `CpuBus::peek`, so register side effects are avoided.
pub fn disassemble(bus: &mut dyn CpuBus, start: u16, end: u16) -> BTreeMap<u16, String> {
    let mut lines = BTreeMap::new();
    let mut addr = start as u32;

    while addr <= end as u32 {
        let line_addr = addr as u16;
        let opcode = bus.peek(line_addr);
        addr += 1;

        let instruction = &INSTRUCTIONS[opcode as usize];
        let mut next_byte = || {
            let value = bus.peek(addr as u16);
            addr += 1;
            value
        };

        let operand = match instruction.mode {
            AddrMode::Imp => String::new(),
            AddrMode::Imm => format!("#${:02X} ", next_byte()),
            AddrMode::Zp0 => format!("${:02X} ", next_byte()),
            AddrMode::Zpx => format!("${:02X}, X ", next_byte()),
            AddrMode::Zpy => format!("${:02X}, Y ", next_byte()),
            AddrMode::Izx => format!("(${:02X}, X) ", next_byte()),
            AddrMode::Izy => format!("(${:02X}), Y ", next_byte()),
            AddrMode::Abs | AddrMode::Abx | AddrMode::Aby | AddrMode::Ind => {
                let low = next_byte() as u16;
                let high = next_byte() as u16;
                let word = (high << 8) | low;
                match instruction.mode {
                    AddrMode::Abx => format!("${:04X}, X ", word),
                    AddrMode::Aby => format!("${:04X}, Y ", word),
                    AddrMode::Ind => format!("(${:04X}) ", word),
                    _ => format!("${:04X} ", word),
                }
            }
            AddrMode::Rel => {
                let offset = next_byte();
                let target = (addr as u16).wrapping_add(offset as i8 as i16 as u16);
                format!("${:02X} [${:04X}] ", offset, target)
            }
        };

        lines.insert(
            line_addr,
            format!(
                "${:04X}: {} {}{{{}}}",
                line_addr,
                instruction.mnemonic,
                operand,
                instruction.mode.tag()
            ),
        );
    }

    lines
}
