//! Tests for reset, NMI and IRQ handling at instruction boundaries.
//!
//! Tests cover:
//! - The reset sequence and the reset line
//! - NMI edge latching
//! - Level-triggered IRQ, masking by I, and CLI unmasking
//! - Priority between simultaneous requests
//! - Lines driven by a memory-mapped device mid-instruction

use std::sync::Arc;

use lib65c02::{Cpu, FlatMemory, MemoryBus, Signals};

const NMI_HANDLER: u16 = 0x9000;
const IRQ_HANDLER: u16 = 0xA000;

fn vectored_memory(program: &[u8]) -> FlatMemory {
    let mut memory = FlatMemory::new();
    memory.write_u16(0xFFFA, NMI_HANDLER);
    memory.write_u16(0xFFFC, 0x8000);
    memory.write_u16(0xFFFE, IRQ_HANDLER);
    memory.load(0x8000, program);
    // Both handlers: NOP; RTI
    memory.load(NMI_HANDLER, &[0xEA, 0x40]);
    memory.load(IRQ_HANDLER, &[0xEA, 0x40]);
    memory
}

fn setup_cpu(program: &[u8]) -> Cpu<FlatMemory> {
    let mut cpu = Cpu::new(vectored_memory(program));
    cpu.reset().unwrap();
    cpu
}

fn step(cpu: &mut Cpu<FlatMemory>) -> u64 {
    let before = cpu.cycles();
    cpu.step().unwrap();
    cpu.cycles() - before
}

// ========== Reset ==========

#[test]
fn test_reset_sequence() {
    let mut cpu = Cpu::new(vectored_memory(&[]));
    cpu.reset().unwrap();

    assert_eq!(cpu.pc(), 0x8000);
    assert_eq!(cpu.sp(), 0xFD);
    assert_eq!(cpu.status(), 0x34);
    assert_eq!(cpu.cycles(), 7);
    assert_eq!(cpu.a(), 0);
    assert_eq!(cpu.x(), 0);
    assert_eq!(cpu.y(), 0);
}

#[test]
fn test_reset_clears_decimal() {
    let mut cpu = setup_cpu(&[]);
    cpu.set_flag_d(true);

    cpu.reset().unwrap();

    assert!(!cpu.flag_d());
    assert!(cpu.flag_i());
}

#[test]
fn test_reset_line_rising_edge_requests_reset() {
    let mut cpu = setup_cpu(&[0xEA, 0xEA, 0xEA]);
    step(&mut cpu);
    assert_eq!(cpu.pc(), 0x8001);
    let sp = cpu.sp();

    cpu.signals().reset_low();
    cpu.signals().reset_high();

    // Reset service, then the first instruction again
    assert_eq!(step(&mut cpu), 7 + 2);
    assert_eq!(cpu.pc(), 0x8001);
    assert_eq!(cpu.sp(), sp.wrapping_sub(3));
}

#[test]
fn test_reset_line_held_high_does_not_retrigger() {
    let mut cpu = setup_cpu(&[0xEA, 0xEA]);
    cpu.signals().reset_high();
    step(&mut cpu);

    cpu.signals().reset_high();
    assert_eq!(step(&mut cpu), 2);
    assert_eq!(cpu.pc(), 0x8002);
}

#[test]
fn test_reset_discards_pending_nmi() {
    let mut cpu = setup_cpu(&[0xEA, 0xEA]);
    cpu.signals().nmi_low();
    cpu.signals().reset_high();

    step(&mut cpu);
    assert_eq!(cpu.pc(), 0x8001);

    step(&mut cpu);
    assert_eq!(cpu.pc(), 0x8002);
}

#[test]
fn test_reset_beats_nmi_and_irq_then_irq_follows() {
    // CLI; NOP; NOP
    let mut cpu = setup_cpu(&[0x58, 0xEA, 0xEA]);
    step(&mut cpu);
    assert!(!cpu.flag_i());

    cpu.signals().irq_low();
    cpu.signals().nmi_low();
    cpu.signals().reset_high();

    // Reset wins and restarts at the vector; its CLI runs in the same step
    assert_eq!(step(&mut cpu), 7 + 2);
    assert_eq!(cpu.pc(), 0x8001);
    assert!(!cpu.flag_i());

    // The NMI went with the reset; the held IRQ is next
    assert_eq!(step(&mut cpu), 7 + 2);
    assert_eq!(cpu.pc(), IRQ_HANDLER + 1);
    assert!(cpu.flag_i());
}

// ========== NMI ==========

#[test]
fn test_nmi_serviced_at_next_boundary() {
    let mut cpu = setup_cpu(&[0xEA, 0xEA]);
    cpu.set_flag_d(true);
    let sp = cpu.sp();

    cpu.signals().nmi_low();
    assert_eq!(step(&mut cpu), 7 + 2);

    assert_eq!(cpu.pc(), NMI_HANDLER + 1);
    assert!(cpu.flag_i());
    assert!(!cpu.flag_d());
    assert_eq!(cpu.sp(), sp.wrapping_sub(3));

    let pushed = cpu.memory().read(0x0100 | sp.wrapping_sub(2) as u16);
    assert_eq!(pushed & 0x10, 0x00, "hardware interrupts push B clear");
    assert_eq!(pushed & 0x20, 0x20);
    assert_eq!(pushed & 0x08, 0x08);
    assert_eq!(cpu.memory().read_u16(0x0100 | sp.wrapping_sub(1) as u16), 0x8000);
}

#[test]
fn test_nmi_latched_after_line_released() {
    let mut cpu = setup_cpu(&[0xEA]);
    cpu.signals().nmi_low();
    cpu.signals().nmi_high();

    step(&mut cpu);
    assert_eq!(cpu.pc(), NMI_HANDLER + 1);
}

#[test]
fn test_nmi_held_low_services_once() {
    let mut cpu = setup_cpu(&[0xEA]);
    cpu.signals().nmi_low();

    step(&mut cpu);
    step(&mut cpu); // RTI
    assert_eq!(cpu.pc(), 0x8000);

    step(&mut cpu);
    assert_eq!(cpu.pc(), 0x8001);

    cpu.signals().nmi_high();
    cpu.signals().nmi_low();
    step(&mut cpu);
    assert_eq!(cpu.pc(), NMI_HANDLER + 1);
}

#[test]
fn test_nmi_ignores_interrupt_disable() {
    let mut cpu = setup_cpu(&[0xEA]);
    assert!(cpu.flag_i());

    cpu.signals().nmi_low();
    step(&mut cpu);
    assert_eq!(cpu.pc(), NMI_HANDLER + 1);
}

// ========== IRQ ==========

#[test]
fn test_irq_masked_until_cli() {
    let mut cpu = setup_cpu(&[0x58, 0xEA]); // CLI; NOP
    cpu.signals().irq_low();

    // I is set after reset: CLI runs
    assert_eq!(step(&mut cpu), 2);
    assert_eq!(cpu.pc(), 0x8001);

    // Serviced at the boundary right after CLI
    step(&mut cpu);
    assert_eq!(cpu.pc(), IRQ_HANDLER + 1);

    let pushed = cpu.memory().read(0x0100 | cpu.sp().wrapping_add(1) as u16);
    assert_eq!(pushed & 0x10, 0x00);
    assert_eq!(pushed & 0x04, 0x00);
}

#[test]
fn test_irq_is_level_triggered() {
    let mut cpu = setup_cpu(&[0xEA, 0xEA]);
    cpu.set_flag_i(false);

    cpu.signals().irq_low();
    cpu.signals().irq_high();
    step(&mut cpu);
    assert_eq!(cpu.pc(), 0x8001);
}

#[test]
fn test_irq_reenters_while_line_stays_low() {
    let mut cpu = setup_cpu(&[0xEA]);
    cpu.set_flag_i(false);
    cpu.signals().irq_low();

    step(&mut cpu); // IRQ + NOP
    step(&mut cpu); // RTI restores I clear
    assert_eq!(cpu.pc(), 0x8000);

    step(&mut cpu); // line still low: serviced again
    assert_eq!(cpu.pc(), IRQ_HANDLER + 1);
}

// ========== Priority ==========

#[test]
fn test_nmi_before_irq() {
    let mut cpu = setup_cpu(&[0xEA]);
    cpu.set_flag_i(false);
    cpu.signals().irq_low();
    cpu.signals().nmi_low();

    step(&mut cpu);
    assert_eq!(cpu.pc(), NMI_HANDLER + 1);

    // NMI handler runs with I set; IRQ waits for RTI
    step(&mut cpu);
    assert_eq!(cpu.pc(), 0x8000);

    step(&mut cpu);
    assert_eq!(cpu.pc(), IRQ_HANDLER + 1);
}

#[test]
fn test_attend_services_one_request() {
    let mut cpu = setup_cpu(&[0xEA]);
    assert!(!cpu.attend().unwrap());

    cpu.signals().nmi_low();
    assert!(cpu.attend().unwrap());
    assert_eq!(cpu.pc(), NMI_HANDLER);
    assert!(!cpu.attend().unwrap());
}

// ========== Device-Driven Lines ==========

/// RAM with an interrupt-control register at $D000: a non-zero write pulls IRQ
/// low, zero releases it. A write to $D001 pulses NMI.
struct InterruptingMemory {
    ram: FlatMemory,
    signals: Arc<Signals>,
}

impl MemoryBus for InterruptingMemory {
    fn read(&self, addr: u16) -> u8 {
        self.ram.read(addr)
    }

    fn write(&mut self, addr: u16, value: u8) {
        match addr {
            0xD000 if value != 0 => self.signals.irq_low(),
            0xD000 => self.signals.irq_high(),
            0xD001 => {
                self.signals.nmi_low();
                self.signals.nmi_high();
            }
            _ => self.ram.write(addr, value),
        }
    }
}

fn device_cpu(program: &[u8]) -> Cpu<InterruptingMemory> {
    let signals = Arc::new(Signals::default());
    let memory = InterruptingMemory {
        ram: vectored_memory(program),
        signals: Arc::clone(&signals),
    };
    let mut cpu = Cpu::with_signals(memory, signals);
    cpu.reset().unwrap();
    cpu
}

#[test]
fn test_device_irq_waits_for_instruction_boundary() {
    // CLI; LDA #1; STA $D000; INX
    let mut cpu = device_cpu(&[0x58, 0xA9, 0x01, 0x8D, 0x00, 0xD0, 0xE8]);

    cpu.step().unwrap();
    cpu.step().unwrap();
    cpu.step().unwrap();
    // The store completed; the IRQ has not been serviced yet
    assert_eq!(cpu.pc(), 0x8006);
    assert_eq!(cpu.x(), 0);

    cpu.step().unwrap();
    assert_eq!(cpu.pc(), IRQ_HANDLER + 1);
    assert_eq!(cpu.x(), 0);
}

#[test]
fn test_device_nmi_pulse_is_latched() {
    // STA $D001; INX
    let mut cpu = device_cpu(&[0x8D, 0x01, 0xD0, 0xE8]);

    cpu.step().unwrap();
    assert!(!cpu.signals().irq_asserted());

    cpu.step().unwrap();
    assert_eq!(cpu.pc(), NMI_HANDLER + 1);
}

#[test]
fn test_stack_pointer_published_each_boundary() {
    let mut cpu = device_cpu(&[0x48, 0x48]); // PHA; PHA

    cpu.step().unwrap();
    assert_eq!(cpu.signals().stack_pointer(), 0xFC);

    cpu.step().unwrap();
    assert_eq!(cpu.signals().stack_pointer(), 0xFB);
}
