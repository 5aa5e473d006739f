use std::env;
use std::process;

use nes_engine::{config, Bus};

struct Options {
    rom: String,
    frames: u64,
    dump: Option<(u16, u16)>,
    disasm: Option<(u16, u16)>,
}

/// Accepts `42` or `0x2A`.
fn parse_number(text: &str) -> Result<u16, String> {
    let parsed = match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex) => u16::from_str_radix(hex, 16),
        None => text.parse::<u16>(),
    };
    parsed.map_err(|e| format!("invalid number '{}': {}", text, e))
}

fn value<'a>(args: &'a [String], i: usize, flag: &str) -> Result<&'a str, String> {
    args.get(i)
        .map(String::as_str)
        .ok_or_else(|| format!("{} requires a value", flag))
}

fn parse_args(args: &[String]) -> Result<Options, String> {
    let mut rom = None;
    let mut frames = config::headless_frames();
    let mut dump = None;
    let mut disasm = None;
    let mut i = 1;

    while i < args.len() {
        match args[i].as_str() {
            "--frames" => {
                let text = value(args, i + 1, "--frames")?;
                frames = text
                    .parse::<u64>()
                    .map_err(|e| format!("invalid frame count '{}': {}", text, e))?;
                i += 2;
            }
            "--dump" => {
                let start = parse_number(value(args, i + 1, "--dump")?)?;
                let len = parse_number(value(args, i + 2, "--dump")?)?;
                dump = Some((start, len));
                i += 3;
            }
            "--disasm" => {
                let start = parse_number(value(args, i + 1, "--disasm")?)?;
                let end = parse_number(value(args, i + 2, "--disasm")?)?;
                disasm = Some((start, end));
                i += 3;
            }
            s if s.starts_with('-') => return Err(format!("Unknown option: {}", s)),
            s => {
                if rom.is_some() {
                    return Err(format!("unexpected argument '{}'", s));
                }
                rom = Some(s.to_string());
                i += 1;
            }
        }
    }

    let rom = rom.ok_or_else(|| "ROM argument missing".to_string())?;
    Ok(Options { rom, frames, dump, disasm })
}

fn hex_dump(bus: &mut Bus, start: u16, len: u16) -> Vec<String> {
    let mut lines = Vec::new();
    let end = start as u32 + len as u32;
    let mut addr = start as u32;

    while addr < end {
        let row_end = (addr + 16).min(end);
        let bytes: Vec<String> = (addr..row_end)
            .map(|a| format!("{:02X}", bus.read(a as u16, true)))
            .collect();
        lines.push(format!("${:04X}: {}", addr, bytes.join(" ")));
        addr = row_end;
    }

    lines
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 || args.iter().any(|a| a == "--help" || a == "-h") {
        eprintln!(
            "Usage: {} <rom> [--frames N] [--dump START LEN] [--disasm START END]",
            args.first().map(String::as_str).unwrap_or("nes-engine")
        );
        return;
    }

    let options = match parse_args(&args) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(2);
        }
    };

    let mut bus = Bus::new();
    if let Err(e) = bus.insert_cartridge(&options.rom) {
        log::error!("Failed to load {}: {}", options.rom, e);
        eprintln!("Failed to load {}: {}", options.rom, e);
        process::exit(1);
    }
    bus.reset();

    for _ in 0..options.frames {
        bus.step_frame();
    }

    if config::quiet() {
        return;
    }

    let cpu = bus.cpu();
    println!(
        "frames={} clocks={} PC:{:04X} A:{:02X} X:{:02X} Y:{:02X} P:{:02X} SP:{:02X}",
        bus.ppu().frame_count(),
        bus.system_clock(),
        cpu.pc,
        cpu.a,
        cpu.x,
        cpu.y,
        cpu.status.bits(),
        cpu.sp
    );

    if let Some((start, len)) = options.dump {
        for line in hex_dump(&mut bus, start, len) {
            println!("{}", line);
        }
    }

    if let Some((start, end)) = options.disasm {
        for line in bus.disassemble(start, end).values() {
            println!("{}", line);
        }
    }
}
