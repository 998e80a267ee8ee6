//! Tests for the threaded run loop.
//!
//! Programs report progress through a write-only port at $F000 and can switch
//! the processor off by writing $F001. The test thread only ever talks to the
//! running core through the control lines.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use lib65c02::{
    Config, Cpu, FlatMemory, MemoryBus, PowerState, Processor, Signals, UnimplementedPolicy,
};

const PORT: u16 = 0xF000;
const POWER_SWITCH: u16 = 0xF001;

struct Board {
    ram: FlatMemory,
    port: Arc<AtomicU8>,
    signals: Arc<Signals>,
}

impl MemoryBus for Board {
    fn read(&self, addr: u16) -> u8 {
        self.ram.read(addr)
    }

    fn write(&mut self, addr: u16, value: u8) {
        match addr {
            PORT => self.port.store(value, Ordering::SeqCst),
            POWER_SWITCH => self.signals.power_off(),
            _ => self.ram.write(addr, value),
        }
    }
}

/// Builds a processor running `program` from $8000, with NMI and IRQ handlers
/// loaded at $9000 and $A000.
fn setup_processor(
    config: Config,
    program: &[u8],
    nmi_handler: &[u8],
    irq_handler: &[u8],
) -> (Processor<Board>, Arc<AtomicU8>) {
    let mut ram = FlatMemory::new();
    ram.write_u16(0xFFFA, 0x9000);
    ram.write_u16(0xFFFC, 0x8000);
    ram.write_u16(0xFFFE, 0xA000);
    ram.load(0x8000, program);
    ram.load(0x9000, nmi_handler);
    ram.load(0xA000, irq_handler);

    let signals = Arc::new(Signals::new(&config));
    let port = Arc::new(AtomicU8::new(0));
    let board = Board {
        ram,
        port: Arc::clone(&port),
        signals: Arc::clone(&signals),
    };
    let processor = Processor::from_cpu(Cpu::with_signals(board, signals));
    (processor, port)
}

/// Default options with STP and WAI enabled.
fn pausable() -> Config {
    Config::default().with_pausable(true)
}

fn start(processor: &mut Processor<Board>) {
    processor.power_on().unwrap();
    processor.reset_low();
    processor.reset_high();
}

fn wait_for(what: &str, mut condition: impl FnMut() -> bool) {
    let deadline = Instant::now() + Duration::from_secs(5);
    while !condition() {
        assert!(Instant::now() < deadline, "timed out waiting for {}", what);
        thread::sleep(Duration::from_millis(1));
    }
}

// ========== Power ==========

#[test]
fn test_program_switches_itself_off() {
    // LDA #$42; STA $10; STA $F001
    let program = [0xA9, 0x42, 0x85, 0x10, 0x8D, 0x01, 0xF0];
    let (mut processor, _) = setup_processor(Config::default(), &program, &[], &[]);

    start(&mut processor);
    processor.wait_halted().unwrap();

    assert_eq!(processor.state(), PowerState::Halted);
    assert!(!processor.failed());
    assert_eq!(processor.failure_message(), None);

    let cpu = processor.cpu().unwrap();
    assert_eq!(cpu.memory().read(0x0010), 0x42);
    // Registers read zero once halted
    assert_eq!((cpu.a(), cpu.x(), cpu.y(), cpu.sp(), cpu.pc()), (0, 0, 0, 0, 0));
    assert_eq!(cpu.status(), 0);
    assert_eq!(processor.stack_pointer(), 0);
}

#[test]
fn test_awaits_reset_before_running() {
    // LDA #1; STA $F000; BRA *
    let program = [0xA9, 0x01, 0x8D, 0x00, 0xF0, 0x80, 0xFE];
    let (mut processor, port) = setup_processor(Config::default(), &program, &[], &[]);

    processor.power_on().unwrap();
    wait_for("awaiting reset", || processor.state() == PowerState::AwaitingReset);
    thread::sleep(Duration::from_millis(20));
    assert_eq!(port.load(Ordering::SeqCst), 0);

    processor.reset_high();
    wait_for("program output", || port.load(Ordering::SeqCst) == 1);
    assert_eq!(processor.state(), PowerState::Running);

    processor.power_off().unwrap();
    assert_eq!(processor.state(), PowerState::Halted);
}

#[test]
fn test_power_on_while_running_is_ignored() {
    let program = [0x80, 0xFE]; // BRA *
    let (mut processor, _) = setup_processor(Config::default(), &program, &[], &[]);

    start(&mut processor);
    wait_for("running", || processor.state() == PowerState::Running);
    processor.power_on().unwrap();
    assert!(processor.is_running());
    assert_eq!(processor.state(), PowerState::Running);

    processor.power_off().unwrap();
    assert!(!processor.is_running());
}

#[test]
fn test_power_cycle_restarts_from_reset_vector() {
    // INC $10; LDA $10; STA $F000; STA $F001
    let program = [0xE6, 0x10, 0xA5, 0x10, 0x8D, 0x00, 0xF0, 0x8D, 0x01, 0xF0];
    let (mut processor, port) = setup_processor(Config::default(), &program, &[], &[]);

    start(&mut processor);
    processor.wait_halted().unwrap();
    assert_eq!(port.load(Ordering::SeqCst), 1);

    start(&mut processor);
    processor.wait_halted().unwrap();
    // Memory survives a power cycle
    assert_eq!(port.load(Ordering::SeqCst), 2);
}

#[test]
fn test_drop_powers_off() {
    let program = [0x80, 0xFE];
    let (mut processor, _) = setup_processor(Config::default(), &program, &[], &[]);
    let signals = Arc::clone(processor.signals());

    start(&mut processor);
    wait_for("running", || signals.state() == PowerState::Running);
    drop(processor);

    assert_eq!(signals.state(), PowerState::Halted);
    assert!(!signals.powered());
}

// ========== Failures ==========

#[test]
fn test_unimplemented_opcode_halts_with_message() {
    let config = Config::default().with_unimplemented(UnimplementedPolicy::Fail);
    let program = [0xEA, 0xEA, 0x44, 0x00]; // NOP; NOP; MVP
    let (mut processor, _) = setup_processor(config, &program, &[], &[]);

    start(&mut processor);
    processor.wait_halted().unwrap();

    assert_eq!(processor.state(), PowerState::Halted);
    assert!(processor.failed());
    assert_eq!(
        processor.failure_message().as_deref(),
        Some("Unimplemented instruction at $8002: $44")
    );
    assert_eq!(processor.cpu().map(|cpu| cpu.pc()), Some(0));
}

#[test]
fn test_power_on_clears_previous_failure() {
    let config = Config::default().with_unimplemented(UnimplementedPolicy::Fail);
    let (mut processor, _) = setup_processor(config, &[0x02, 0x00], &[], &[]);

    start(&mut processor);
    processor.wait_halted().unwrap();
    assert!(processor.failed());

    processor.power_on().unwrap();
    assert!(!processor.failed());
    assert_eq!(processor.failure_message(), None);
    processor.power_off().unwrap();
}

#[test]
fn test_cancel_stopped_clock_is_fatal() {
    let program = [0xEA, 0xDB]; // NOP; STP
    let (mut processor, _) = setup_processor(pausable(), &program, &[], &[]);

    start(&mut processor);
    wait_for("stack pointer published", || processor.stack_pointer() == 0xFD);
    processor.cancel();
    processor.wait_halted().unwrap();

    assert!(processor.failed());
    assert_eq!(processor.failure_message().as_deref(), Some("wait cancelled"));
}

// ========== Reset Line ==========

#[test]
fn test_reset_held_low_suspends_execution() {
    // loop: INC A; STA $F000; BRA loop
    let program = [0x1A, 0x8D, 0x00, 0xF0, 0x80, 0xFA];
    let (mut processor, port) = setup_processor(Config::default(), &program, &[], &[]);

    start(&mut processor);
    wait_for("program output", || port.load(Ordering::SeqCst) != 0);

    processor.reset_low();
    thread::sleep(Duration::from_millis(20));
    let held = port.load(Ordering::SeqCst);
    thread::sleep(Duration::from_millis(20));
    assert_eq!(port.load(Ordering::SeqCst), held);
    assert_eq!(processor.state(), PowerState::Running);

    processor.reset_high();
    wait_for("execution to resume", || port.load(Ordering::SeqCst) != held);

    processor.power_off().unwrap();
}

// ========== STP / WAI ==========

#[test]
fn test_stp_waits_for_reset() {
    // INC $10; LDA $10; STA $F000; STP
    let program = [0xE6, 0x10, 0xA5, 0x10, 0x8D, 0x00, 0xF0, 0xDB];
    let (mut processor, port) = setup_processor(pausable(), &program, &[], &[]);

    start(&mut processor);
    wait_for("first pass", || port.load(Ordering::SeqCst) == 1);
    thread::sleep(Duration::from_millis(20));
    assert_eq!(port.load(Ordering::SeqCst), 1);
    assert_eq!(processor.state(), PowerState::Running);

    processor.reset_low();
    processor.reset_high();
    wait_for("second pass", || port.load(Ordering::SeqCst) == 2);

    processor.power_off().unwrap();
    assert!(!processor.failed());
}

#[test]
fn test_stp_released_by_power_off() {
    let (mut processor, _) = setup_processor(pausable(), &[0xEA, 0xDB], &[], &[]);

    start(&mut processor);
    wait_for("stack pointer published", || processor.stack_pointer() == 0xFD);
    processor.power_off().unwrap();

    assert_eq!(processor.state(), PowerState::Halted);
    assert!(!processor.failed());
}

#[test]
fn test_wai_released_by_masked_irq() {
    // SEI; LDA #1; STA $F000; WAI; LDA #2; STA $F000; STP
    let program = [
        0x78, 0xA9, 0x01, 0x8D, 0x00, 0xF0, 0xCB, 0xA9, 0x02, 0x8D, 0x00, 0xF0, 0xDB,
    ];
    // The IRQ handler would report 0xEE
    let irq_handler = [0xA9, 0xEE, 0x8D, 0x00, 0xF0, 0xDB];
    let (mut processor, port) = setup_processor(pausable(), &program, &[], &irq_handler);

    start(&mut processor);
    wait_for("before WAI", || port.load(Ordering::SeqCst) == 1);
    thread::sleep(Duration::from_millis(20));
    assert_eq!(port.load(Ordering::SeqCst), 1);

    processor.irq_low();
    wait_for("after WAI", || port.load(Ordering::SeqCst) == 2);

    processor.power_off().unwrap();
}

#[test]
fn test_wai_released_by_nmi() {
    // LDA #1; STA $F000; WAI; STP
    let program = [0xA9, 0x01, 0x8D, 0x00, 0xF0, 0xCB, 0xDB];
    // LDA #3; STA $F000; STP
    let nmi_handler = [0xA9, 0x03, 0x8D, 0x00, 0xF0, 0xDB];
    let (mut processor, port) = setup_processor(pausable(), &program, &nmi_handler, &[]);

    start(&mut processor);
    wait_for("before WAI", || port.load(Ordering::SeqCst) == 1);

    processor.nmi_low();
    wait_for("NMI handler", || port.load(Ordering::SeqCst) == 3);

    processor.power_off().unwrap();
}

// ========== Pacing ==========

#[test]
fn test_cycle_period_throttles_execution() {
    // 20 NOPs (40 cycles), then power off
    let mut program = vec![0xEA; 20];
    program.extend_from_slice(&[0x8D, 0x01, 0xF0]);
    let config = Config::default().with_cycle_period_ns(1_000_000);
    let (mut processor, _) = setup_processor(config, &program, &[], &[]);

    let started = Instant::now();
    start(&mut processor);
    processor.wait_halted().unwrap();

    assert!(started.elapsed() >= Duration::from_millis(40));
    assert!(!processor.failed());
}

#[test]
fn test_cycle_period_changed_at_runtime() {
    let program = [0x80, 0xFE]; // BRA *
    let config = Config::default().with_cycle_period_ns(10_000_000);
    let (mut processor, _) = setup_processor(config, &program, &[], &[]);

    start(&mut processor);
    wait_for("running", || processor.state() == PowerState::Running);
    processor.set_cycle_period_ns(0);
    processor.power_off().unwrap();

    assert_eq!(processor.signals().cycle_period_ns(), 0);
    assert!(!processor.failed());
}
