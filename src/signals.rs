//! # Control Lines and Shared Run-Loop State
//!
//! `Signals` is the meeting point between the run loop and everything outside it:
//! the host driving the control lines, memory-mapped devices that want to raise an
//! interrupt or switch the machine off, and diagnostic code reading the stack
//! pointer. It is shared through an `Arc`.
//!
//! ## Lines
//!
//! - **RESB** (reset, active low): starts low. A low→high transition arms a reset
//!   request. While the line is held low a running processor executes nothing.
//! - **NMIB** (active low, edge sensitive): starts high. A high→low transition
//!   latches an NMI request. Raising the line again does not cancel it.
//! - **IRQB** (active low, level sensitive): not latched. Serviced at a boundary
//!   only while low and while the I flag is clear.
//!
//! Attention is read straight from the reset latch, the NMI latch and the IRQ
//! level at each instruction boundary. Nothing caches it, so a line change made on
//! another thread while the run loop consumes a latch is never lost.
//!
//! ## Blocking
//!
//! Blocking waits (awaiting reset, reset held low, STP, WAI and the pacer) park on a
//! condition variable. Every line or power change notifies it. [`Signals::cancel`]
//! aborts any blocked wait with [`ExecutionError::WaitCancelled`].

use std::sync::atomic::{AtomicBool, AtomicU64, AtomicU8, Ordering};
use std::time::Instant;

use parking_lot::{Condvar, Mutex};
use tracing::{debug, info};

use crate::{Config, ExecutionError, UnimplementedPolicy};

/// Lifecycle of the run loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PowerState {
    /// Never powered.
    Off,
    /// Powered, waiting for the reset line to rise.
    AwaitingReset,
    /// Executing instructions.
    Running,
    /// Powered off or failed; registers are zero.
    Halted,
}

impl PowerState {
    fn from_u8(value: u8) -> Self {
        match value {
            1 => PowerState::AwaitingReset,
            2 => PowerState::Running,
            3 => PowerState::Halted,
            _ => PowerState::Off,
        }
    }

    fn as_u8(self) -> u8 {
        match self {
            PowerState::Off => 0,
            PowerState::AwaitingReset => 1,
            PowerState::Running => 2,
            PowerState::Halted => 3,
        }
    }
}

/// Line levels, latches, runtime options and failure state of one processor.
pub struct Signals {
    power: AtomicBool,
    state: AtomicU8,

    reset_high: AtomicBool,
    reset_request: AtomicBool,
    nmi_high: AtomicBool,
    nmi_request: AtomicBool,
    irq_low: AtomicBool,
    cancelled: AtomicBool,

    cycle_period_ns: AtomicU64,
    fail_on_unimplemented: AtomicBool,
    rockwell_extensions: AtomicBool,
    pausable: AtomicBool,

    stack_pointer: AtomicU8,
    failed: AtomicBool,
    failure: Mutex<Option<String>>,

    wake_lock: Mutex<()>,
    wake: Condvar,
}

impl Signals {
    /// Creates the line state of an unpowered processor with `config` as its options.
    pub fn new(config: &Config) -> Self {
        Self {
            power: AtomicBool::new(false),
            state: AtomicU8::new(PowerState::Off.as_u8()),
            reset_high: AtomicBool::new(false),
            reset_request: AtomicBool::new(false),
            nmi_high: AtomicBool::new(true),
            nmi_request: AtomicBool::new(false),
            irq_low: AtomicBool::new(false),
            cancelled: AtomicBool::new(false),
            cycle_period_ns: AtomicU64::new(config.cycle_period_ns),
            fail_on_unimplemented: AtomicBool::new(
                config.unimplemented == UnimplementedPolicy::Fail,
            ),
            rockwell_extensions: AtomicBool::new(config.rockwell_extensions),
            pausable: AtomicBool::new(config.pausable),
            stack_pointer: AtomicU8::new(0),
            failed: AtomicBool::new(false),
            failure: Mutex::new(None),
            wake_lock: Mutex::new(()),
            wake: Condvar::new(),
        }
    }

    // ========== Control Lines ==========

    /// Drives RESB low.
    pub fn reset_low(&self) {
        if self.reset_high.swap(false, Ordering::AcqRel) {
            debug!("reset line low");
            self.notify();
        }
    }

    /// Drives RESB high. A rising edge arms a reset request.
    pub fn reset_high(&self) {
        if !self.reset_high.swap(true, Ordering::AcqRel) {
            self.reset_request.store(true, Ordering::Release);
            debug!("reset line high, reset requested");
            self.notify();
        }
    }

    /// Drives NMIB low. A falling edge latches an NMI request.
    pub fn nmi_low(&self) {
        if self.nmi_high.swap(false, Ordering::AcqRel) {
            self.nmi_request.store(true, Ordering::Release);
            debug!("NMI latched");
            self.notify();
        }
    }

    /// Drives NMIB high. A latched request stays pending.
    pub fn nmi_high(&self) {
        self.nmi_high.store(true, Ordering::Release);
    }

    /// Drives IRQB low.
    pub fn irq_low(&self) {
        if !self.irq_low.swap(true, Ordering::AcqRel) {
            self.notify();
        }
    }

    /// Drives IRQB high.
    pub fn irq_high(&self) {
        self.irq_low.store(false, Ordering::Release);
    }

    /// Current RESB level.
    pub fn reset_line_high(&self) -> bool {
        self.reset_high.load(Ordering::Acquire)
    }

    /// True while IRQB is held low.
    pub fn irq_asserted(&self) -> bool {
        self.irq_low.load(Ordering::Acquire)
    }

    // ========== Power ==========

    /// Asks the run loop to stop after the current instruction without waiting
    /// for it. Safe to call from inside a memory device on the run-loop thread.
    pub fn power_off(&self) {
        if self.power.swap(false, Ordering::AcqRel) {
            info!("power off requested");
            self.notify();
        }
    }

    /// True while the processor is powered.
    pub fn powered(&self) -> bool {
        self.power.load(Ordering::Acquire)
    }

    /// Aborts any blocked wait of the run loop, which then halts with
    /// `WaitCancelled`. The flag is cleared by the next power-on.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
        self.notify();
    }

    pub fn cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    pub fn state(&self) -> PowerState {
        PowerState::from_u8(self.state.load(Ordering::Acquire))
    }

    // ========== Runtime Options ==========

    /// Sets the clock period in nanoseconds; zero runs unthrottled.
    pub fn set_cycle_period_ns(&self, nanoseconds: u64) {
        self.cycle_period_ns.store(nanoseconds, Ordering::Release);
        debug!(nanoseconds, "cycle period changed");
        self.notify();
    }

    pub fn cycle_period_ns(&self) -> u64 {
        self.cycle_period_ns.load(Ordering::Acquire)
    }

    pub fn set_unimplemented_policy(&self, policy: UnimplementedPolicy) {
        self.fail_on_unimplemented
            .store(policy == UnimplementedPolicy::Fail, Ordering::Release);
        debug!(?policy, "unimplemented opcode policy changed");
    }

    pub fn unimplemented_policy(&self) -> UnimplementedPolicy {
        if self.fail_on_unimplemented.load(Ordering::Acquire) {
            UnimplementedPolicy::Fail
        } else {
            UnimplementedPolicy::Nop
        }
    }

    pub fn set_rockwell_extensions(&self, enabled: bool) {
        self.rockwell_extensions.store(enabled, Ordering::Release);
        debug!(enabled, "rockwell extensions toggled");
    }

    pub fn rockwell_extensions(&self) -> bool {
        self.rockwell_extensions.load(Ordering::Acquire)
    }

    pub fn set_pausable(&self, enabled: bool) {
        self.pausable.store(enabled, Ordering::Release);
        debug!(enabled, "pausable instructions toggled");
    }

    pub fn pausable(&self) -> bool {
        self.pausable.load(Ordering::Acquire)
    }

    // ========== Diagnostics ==========

    /// Stack pointer as of the last instruction boundary.
    pub fn stack_pointer(&self) -> u8 {
        self.stack_pointer.load(Ordering::Acquire)
    }

    /// True once the run loop has halted on an error. Cleared by power-on.
    pub fn failed(&self) -> bool {
        self.failed.load(Ordering::Acquire)
    }

    /// Message of the error that halted the run loop.
    pub fn failure_message(&self) -> Option<String> {
        self.failure.lock().clone()
    }

    // ========== Run-Loop Side ==========

    pub(crate) fn publish_stack_pointer(&self, sp: u8) {
        self.stack_pointer.store(sp, Ordering::Release);
    }

    pub(crate) fn set_state(&self, state: PowerState) {
        self.state.store(state.as_u8(), Ordering::Release);
        self.notify();
    }

    /// Clears failure and cancellation and raises power.
    pub(crate) fn begin_power_on(&self) {
        self.failed.store(false, Ordering::Release);
        *self.failure.lock() = None;
        self.cancelled.store(false, Ordering::Release);
        self.power.store(true, Ordering::Release);
        self.set_state(PowerState::AwaitingReset);
    }

    pub(crate) fn record_failure(&self, message: String) {
        *self.failure.lock() = Some(message);
        self.failed.store(true, Ordering::Release);
        self.power.store(false, Ordering::Release);
        self.notify();
    }

    /// Checked at every instruction boundary.
    pub(crate) fn needs_attention(&self) -> bool {
        self.reset_request.load(Ordering::Acquire)
            || self.nmi_request.load(Ordering::Acquire)
            || self.irq_low.load(Ordering::Acquire)
    }

    pub(crate) fn reset_requested(&self) -> bool {
        self.reset_request.load(Ordering::Acquire)
    }

    pub(crate) fn nmi_requested(&self) -> bool {
        self.nmi_request.load(Ordering::Acquire)
    }

    /// Consumes a pending reset request. Servicing a reset also discards a pending NMI.
    pub(crate) fn take_reset_request(&self) -> bool {
        let taken = self.reset_request.swap(false, Ordering::AcqRel);
        if taken {
            self.nmi_request.store(false, Ordering::Release);
        }
        taken
    }

    pub(crate) fn take_nmi_request(&self) -> bool {
        self.nmi_request.swap(false, Ordering::AcqRel)
    }

    /// Drops both latches without servicing them.
    pub(crate) fn discard_requests(&self) {
        self.reset_request.store(false, Ordering::Release);
        self.nmi_request.store(false, Ordering::Release);
    }

    fn notify(&self) {
        let _guard = self.wake_lock.lock();
        self.wake.notify_all();
    }

    /// Blocks while `blocked` holds. Returns early with `WaitCancelled` on cancel.
    pub(crate) fn wait_while<F>(&self, mut blocked: F) -> Result<(), ExecutionError>
    where
        F: FnMut(&Signals) -> bool,
    {
        let mut guard = self.wake_lock.lock();
        loop {
            if self.cancelled() {
                return Err(ExecutionError::WaitCancelled);
            }
            if !blocked(self) {
                return Ok(());
            }
            self.wake.wait(&mut guard);
        }
    }

    /// Sleeps until `deadline`, power-off or cancel.
    pub(crate) fn sleep_until(&self, deadline: Instant) -> Result<(), ExecutionError> {
        let mut guard = self.wake_lock.lock();
        loop {
            if self.cancelled() {
                return Err(ExecutionError::WaitCancelled);
            }
            if !self.powered() || Instant::now() >= deadline {
                return Ok(());
            }
            self.wake.wait_until(&mut guard, deadline);
        }
    }

    /// Blocks until a reset request arrives. Returns false if power went away first.
    pub(crate) fn wait_for_reset_request(&self) -> Result<bool, ExecutionError> {
        self.wait_while(|s| s.powered() && !s.reset_requested())?;
        Ok(self.powered())
    }

    /// Blocks while the reset line is held low.
    pub(crate) fn wait_for_reset_release(&self) -> Result<(), ExecutionError> {
        self.wait_while(|s| s.powered() && !s.reset_line_high())
    }
}

impl Default for Signals {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl std::fmt::Debug for Signals {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signals")
            .field("state", &self.state())
            .field("reset_high", &self.reset_line_high())
            .field("nmi_requested", &self.nmi_requested())
            .field("irq_low", &self.irq_asserted())
            .field("failed", &self.failed())
            .finish_non_exhaustive()
    }
}
