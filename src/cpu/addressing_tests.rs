use super::*;

#[test]
fn test_zero_page_addressing() {
    let (mut cpu, mut bus) = setup_cpu();
    bus.write(0x42, 0xAB);

    // LDA $42
    bus.load_program(&[0xA5, 0x42], 0x8000);
    let cycles = step(&mut cpu, &mut bus);

    assert_eq!(cpu.a, 0xAB);
    assert_eq!(cycles, 3);
}

#[test]
fn test_zero_page_x_wraps_within_page() {
    let (mut cpu, mut bus) = setup_cpu();
    cpu.x = 0x20;
    bus.write(0x0010, 0xCD); // (0xF0 + 0x20) & 0xFF
    bus.write(0x0110, 0xEE);

    // LDA $F0,X
    bus.load_program(&[0xB5, 0xF0], 0x8000);
    let cycles = step(&mut cpu, &mut bus);

    assert_eq!(cpu.a, 0xCD);
    assert_eq!(cycles, 4);
}

#[test]
fn test_zero_page_y_indexes_by_y() {
    let (mut cpu, mut bus) = setup_cpu();
    cpu.x = 0x01;
    cpu.y = 0x05;
    bus.write(0x0035, 0x99);

    // LDX $30,Y
    bus.load_program(&[0xB6, 0x30], 0x8000);
    step(&mut cpu, &mut bus);

    assert_eq!(cpu.x, 0x99);
}

#[test]
fn test_absolute_addressing() {
    let (mut cpu, mut bus) = setup_cpu();
    bus.write(0x1234, 0x56);

    // LDA $1234
    bus.load_program(&[0xAD, 0x34, 0x12], 0x8000);
    let cycles = step(&mut cpu, &mut bus);

    assert_eq!(cpu.a, 0x56);
    assert_eq!(cpu.pc, 0x8003);
    assert_eq!(cycles, 4);
}

#[test]
fn test_absolute_x_page_cross_costs_a_cycle() {
    let (mut cpu, mut bus) = setup_cpu();
    cpu.x = 0x01;
    bus.write(0x1300, 0x77);
    bus.write(0x1235, 0x66);

    // LDA $12FF,X ; LDA $1234,X
    bus.load_program(&[0xBD, 0xFF, 0x12, 0xBD, 0x34, 0x12], 0x8000);

    let cycles = step(&mut cpu, &mut bus);
    assert_eq!(cpu.a, 0x77);
    assert_eq!(cycles, 5);

    let cycles = step(&mut cpu, &mut bus);
    assert_eq!(cpu.a, 0x66);
    assert_eq!(cycles, 4);
}

#[test]
fn test_store_absolute_x_has_fixed_cost() {
    let (mut cpu, mut bus) = setup_cpu();
    cpu.a = 0x42;
    cpu.x = 0x01;

    // STA $12FF,X
    bus.load_program(&[0x9D, 0xFF, 0x12], 0x8000);
    let cycles = step(&mut cpu, &mut bus);

    assert_eq!(bus.memory[0x1300], 0x42);
    assert_eq!(cycles, 5);
}

#[test]
fn test_absolute_y_addressing() {
    let (mut cpu, mut bus) = setup_cpu();
    cpu.y = 0x10;
    bus.write(0x2010, 0x3C);

    // LDA $2000,Y
    bus.load_program(&[0xB9, 0x00, 0x20], 0x8000);
    let cycles = step(&mut cpu, &mut bus);

    assert_eq!(cpu.a, 0x3C);
    assert_eq!(cycles, 4);
}

#[test]
fn test_indirect_jump() {
    let (mut cpu, mut bus) = setup_cpu();
    bus.write(0x0200, 0x00);
    bus.write(0x0201, 0x40);

    // JMP ($0200)
    bus.load_program(&[0x6C, 0x00, 0x02], 0x8000);
    let cycles = step(&mut cpu, &mut bus);

    assert_eq!(cpu.pc, 0x4000);
    assert_eq!(cycles, 5);
}

#[test]
fn test_indirect_jump_page_wrap_bug() {
    let (mut cpu, mut bus) = setup_cpu();
    bus.write(0x02FF, 0x34);
    bus.write(0x0300, 0x56); // not used
    bus.write(0x0200, 0x12);

    // JMP ($02FF)
    bus.load_program(&[0x6C, 0xFF, 0x02], 0x8000);
    step(&mut cpu, &mut bus);

    assert_eq!(cpu.pc, 0x1234);
}

#[test]
fn test_indexed_indirect_x() {
    let (mut cpu, mut bus) = setup_cpu();
    cpu.x = 0x04;
    bus.write(0x0024, 0x74);
    bus.write(0x0025, 0x20);
    bus.write(0x2074, 0x5A);

    // LDA ($20,X)
    bus.load_program(&[0xA1, 0x20], 0x8000);
    let cycles = step(&mut cpu, &mut bus);

    assert_eq!(cpu.a, 0x5A);
    assert_eq!(cycles, 6);
}

#[test]
fn test_indexed_indirect_x_pointer_wraps_zero_page() {
    let (mut cpu, mut bus) = setup_cpu();
    cpu.x = 0x01;
    bus.write(0x00FF, 0x00);
    bus.write(0x0000, 0x30);
    bus.write(0x3000, 0x81);

    // LDA ($FE,X)
    bus.load_program(&[0xA1, 0xFE], 0x8000);
    step(&mut cpu, &mut bus);

    assert_eq!(cpu.a, 0x81);
}

#[test]
fn test_indirect_indexed_y() {
    let (mut cpu, mut bus) = setup_cpu();
    cpu.y = 0x10;
    bus.write(0x0086, 0x28);
    bus.write(0x0087, 0x40);
    bus.write(0x4038, 0xA7);

    // LDA ($86),Y
    bus.load_program(&[0xB1, 0x86], 0x8000);
    let cycles = step(&mut cpu, &mut bus);

    assert_eq!(cpu.a, 0xA7);
    assert_eq!(cycles, 5);
}

#[test]
fn test_indirect_indexed_y_page_cross() {
    let (mut cpu, mut bus) = setup_cpu();
    cpu.y = 0x10;
    bus.write(0x0086, 0xF8);
    bus.write(0x0087, 0x40);
    bus.write(0x4108, 0x3B);

    // LDA ($86),Y
    bus.load_program(&[0xB1, 0x86], 0x8000);
    let cycles = step(&mut cpu, &mut bus);

    assert_eq!(cpu.a, 0x3B);
    assert_eq!(cycles, 6);
}

#[test]
fn test_immediate_reads_the_operand_byte() {
    let (mut cpu, mut bus) = setup_cpu();

    // LDY #$7F
    bus.load_program(&[0xA0, 0x7F], 0x8000);
    step(&mut cpu, &mut bus);

    assert_eq!(cpu.y, 0x7F);
    assert_eq!(cpu.pc, 0x8002);
}
