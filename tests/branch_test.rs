//! Tests for conditional branches, BRA and the Rockwell bit instructions.
//!
//! Branch timing: 2 cycles not taken, 3 taken, 4 when the target is in a
//! different page than the following instruction. BRA: 3, or 4 across a page.

use lib65c02::{Config, Cpu, FlatMemory, MemoryBus, UnimplementedPolicy};

fn setup_cpu_at(origin: u16, program: &[u8]) -> Cpu<FlatMemory> {
    let mut memory = FlatMemory::new();
    memory.write_u16(0xFFFC, origin);
    memory.load(origin, program);
    let config = Config::default().with_rockwell_extensions(true);
    let mut cpu = Cpu::with_config(memory, config);
    cpu.reset().unwrap();
    cpu
}

fn setup_cpu(program: &[u8]) -> Cpu<FlatMemory> {
    setup_cpu_at(0x8000, program)
}

fn step(cpu: &mut Cpu<FlatMemory>) -> u64 {
    let before = cpu.cycles();
    cpu.step().unwrap();
    cpu.cycles() - before
}

// ========== Conditional Branches ==========

#[test]
fn test_branch_not_taken() {
    let mut cpu = setup_cpu(&[0xF0, 0x10]); // BEQ +16
    cpu.set_flag_z(false);

    assert_eq!(step(&mut cpu), 2);
    assert_eq!(cpu.pc(), 0x8002);
}

#[test]
fn test_branch_taken_same_page() {
    let mut cpu = setup_cpu(&[0xD0, 0x10]); // BNE +16
    cpu.set_flag_z(false);

    assert_eq!(step(&mut cpu), 3);
    assert_eq!(cpu.pc(), 0x8012);
}

#[test]
fn test_branch_backwards_to_self() {
    let mut cpu = setup_cpu(&[0x90, 0xFE]); // BCC *
    cpu.set_flag_c(false);

    assert_eq!(step(&mut cpu), 3);
    assert_eq!(cpu.pc(), 0x8000);
}

#[test]
fn test_branch_taken_page_cross() {
    let mut cpu = setup_cpu_at(0x80F0, &[0x30, 0x20]); // BMI +32
    cpu.set_flag_n(true);

    assert_eq!(step(&mut cpu), 4);
    assert_eq!(cpu.pc(), 0x8112);
}

#[test]
fn test_branch_crossing_measured_from_next_instruction() {
    // Opcode at $80FE, next instruction at $8100, target $8101: same page as next
    let mut cpu = setup_cpu_at(0x80FE, &[0x70, 0x01]); // BVS +1
    cpu.set_flag_v(true);

    assert_eq!(step(&mut cpu), 3);
    assert_eq!(cpu.pc(), 0x8101);
}

#[test]
fn test_every_condition() {
    // (opcode, flag setter, value that takes the branch)
    let cases: [(u8, fn(&mut Cpu<FlatMemory>, bool), bool); 8] = [
        (0x10, Cpu::set_flag_n, false), // BPL
        (0x30, Cpu::set_flag_n, true),  // BMI
        (0x50, Cpu::set_flag_v, false), // BVC
        (0x70, Cpu::set_flag_v, true),  // BVS
        (0x90, Cpu::set_flag_c, false), // BCC
        (0xB0, Cpu::set_flag_c, true),  // BCS
        (0xD0, Cpu::set_flag_z, false), // BNE
        (0xF0, Cpu::set_flag_z, true),  // BEQ
    ];

    for (opcode, set_flag, taken_when) in cases {
        let mut cpu = setup_cpu(&[opcode, 0x04]);
        set_flag(&mut cpu, taken_when);
        step(&mut cpu);
        assert_eq!(cpu.pc(), 0x8006, "opcode ${:02X} should branch", opcode);

        let mut cpu = setup_cpu(&[opcode, 0x04]);
        set_flag(&mut cpu, !taken_when);
        step(&mut cpu);
        assert_eq!(cpu.pc(), 0x8002, "opcode ${:02X} should fall through", opcode);
    }
}

// ========== BRA ==========

#[test]
fn test_bra_always_branches() {
    let mut cpu = setup_cpu(&[0x80, 0x7F]);

    assert_eq!(step(&mut cpu), 3);
    assert_eq!(cpu.pc(), 0x8081);
}

#[test]
fn test_bra_page_cross() {
    let mut cpu = setup_cpu(&[0x80, 0x80]); // BRA -128

    assert_eq!(step(&mut cpu), 4);
    assert_eq!(cpu.pc(), 0x7F82);
}

// ========== Rockwell Bit Instructions ==========

#[test]
fn test_smb_and_rmb() {
    let mut cpu = setup_cpu(&[0xD7, 0x20, 0x07, 0x20]); // SMB5 $20; RMB0 $20
    cpu.memory_mut().write(0x0020, 0x01);
    let flags = cpu.status();

    assert_eq!(step(&mut cpu), 5);
    assert_eq!(cpu.memory().read(0x0020), 0x21);

    assert_eq!(step(&mut cpu), 5);
    assert_eq!(cpu.memory().read(0x0020), 0x20);
    assert_eq!(cpu.status(), flags);
}

#[test]
fn test_bbr_taken_and_not_taken() {
    let mut cpu = setup_cpu(&[0x2F, 0x30, 0x10, 0x2F, 0x31, 0x10]); // BBR2 $30; BBR2 $31
    cpu.memory_mut().write(0x0030, 0x04);
    cpu.memory_mut().write(0x0031, 0xFB);

    assert_eq!(step(&mut cpu), 5);
    assert_eq!(cpu.pc(), 0x8003);

    assert_eq!(step(&mut cpu), 5);
    assert_eq!(cpu.pc(), 0x8016);
}

#[test]
fn test_bbs_branches_backwards() {
    let mut cpu = setup_cpu(&[0xFF, 0x40, 0xFD]); // BBS7 $40,*
    cpu.memory_mut().write(0x0040, 0x80);

    step(&mut cpu);
    assert_eq!(cpu.pc(), 0x8000);
}

#[test]
fn test_rockwell_disabled_is_one_byte_nop() {
    let mut memory = FlatMemory::new();
    memory.write_u16(0xFFFC, 0x8000);
    memory.load(0x8000, &[0x87, 0x20]); // SMB0 $20
    let config = Config::default().with_rockwell_extensions(false);
    let mut cpu = Cpu::with_config(memory, config);
    cpu.reset().unwrap();

    assert_eq!(step(&mut cpu), 1);
    assert_eq!(cpu.pc(), 0x8001);
    assert_eq!(cpu.memory().read(0x0020), 0x00);
}

#[test]
fn test_rockwell_off_by_default() {
    let mut memory = FlatMemory::new();
    memory.write_u16(0xFFFC, 0x8000);
    memory.load(0x8000, &[0xFF, 0x40, 0xFD]); // BBS7 $40,*
    memory.write(0x0040, 0x80);
    let mut cpu = Cpu::new(memory);
    cpu.reset().unwrap();

    assert_eq!(step(&mut cpu), 1);
    assert_eq!(cpu.pc(), 0x8001);
}

#[test]
fn test_rockwell_disabled_follows_fail_policy() {
    let mut memory = FlatMemory::new();
    memory.write_u16(0xFFFC, 0x8000);
    memory.load(0x8000, &[0x0F, 0x00, 0x00]); // BBR0
    let config = Config::default()
        .with_rockwell_extensions(false)
        .with_unimplemented(UnimplementedPolicy::Fail);
    let mut cpu = Cpu::with_config(memory, config);
    cpu.reset().unwrap();

    let err = cpu.step().unwrap_err();
    assert_eq!(err.to_string(), "Unimplemented instruction at $8000: $0f");
}

#[test]
fn test_rockwell_toggled_at_runtime() {
    let mut cpu = setup_cpu(&[0x87, 0x20, 0x87, 0x20]);

    cpu.signals().set_rockwell_extensions(false);
    step(&mut cpu);
    assert_eq!(cpu.memory().read(0x0020), 0x00);
    assert_eq!(cpu.pc(), 0x8001);

    cpu.set_pc(0x8002);
    cpu.signals().set_rockwell_extensions(true);
    step(&mut cpu);
    assert_eq!(cpu.memory().read(0x0020), 0x01);
}
