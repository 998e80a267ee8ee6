//! Fuzz target for CPU step execution.
//!
//! Builds an arbitrary register file, page zero, stack page and instruction
//! stream, then runs a few instruction boundaries with arbitrary line activity.

#![no_main]

use arbitrary::Arbitrary;
use lib65c02::{Config, Cpu, FlatMemory, MemoryBus, UnimplementedPolicy};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct FuzzCpuState {
    a: u8,
    x: u8,
    y: u8,
    sp: u8,
    status: u8,
}

#[derive(Debug, Arbitrary)]
struct FuzzConfig {
    fail_on_unimplemented: bool,
    rockwell_extensions: bool,
    pausable: bool,
}

/// Line activity before each boundary
#[derive(Debug, Arbitrary)]
enum LineEvent {
    None,
    Nmi,
    IrqLow,
    IrqHigh,
    Reset,
}

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    cpu_state: FuzzCpuState,
    config: FuzzConfig,
    program: [u8; 16],
    zero_page: [u8; 256],
    stack_page: [u8; 256],
    events: Vec<LineEvent>,
}

fuzz_target!(|input: FuzzInput| {
    let mut memory = FlatMemory::new();
    memory.write_u16(0xFFFA, 0x8000);
    memory.write_u16(0xFFFC, 0x8000);
    memory.write_u16(0xFFFE, 0x8000);
    memory.load(0x8000, &input.program);
    memory.load(0x0000, &input.zero_page);
    memory.load(0x0100, &input.stack_page);

    let policy = if input.config.fail_on_unimplemented {
        UnimplementedPolicy::Fail
    } else {
        UnimplementedPolicy::Nop
    };
    let config = Config::default()
        .with_unimplemented(policy)
        .with_rockwell_extensions(input.config.rockwell_extensions)
        .with_pausable(input.config.pausable);

    let mut cpu = Cpu::with_config(memory, config);
    cpu.reset().unwrap();
    cpu.set_a(input.cpu_state.a);
    cpu.set_x(input.cpu_state.x);
    cpu.set_y(input.cpu_state.y);
    cpu.set_sp(input.cpu_state.sp);
    cpu.set_status(input.cpu_state.status);

    for event in input.events.iter().take(64) {
        match event {
            LineEvent::None => {}
            LineEvent::Nmi => {
                cpu.signals().nmi_low();
                cpu.signals().nmi_high();
            }
            LineEvent::IrqLow => cpu.signals().irq_low(),
            LineEvent::IrqHigh => cpu.signals().irq_high(),
            LineEvent::Reset => {
                cpu.signals().reset_low();
                cpu.signals().reset_high();
            }
        }

        let before = cpu.cycles();
        if cpu.step().is_err() {
            // Only the fail policy stops a synchronous CPU
            assert!(input.config.fail_on_unimplemented);
            break;
        }

        // U and B read set whatever was executed
        assert_eq!(cpu.status() & 0x30, 0x30);
        assert!(cpu.cycles() > before);
    }
});
