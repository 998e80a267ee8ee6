//! # Threaded Processor
//!
//! `Processor` owns a [`Cpu`] and runs it on a dedicated thread named
//! `w65c02-core`. The host talks to the running core only through the control
//! lines in [`Signals`]; the CPU and its memory move to the worker thread on
//! power-on and come back when the run loop exits and the thread is joined.
//!
//! ## Run Loop
//!
//! 1. Power-on: state `AwaitingReset`, U and B forced set.
//! 2. Wait until the reset line rises (or power goes away).
//! 3. State `Running`: while powered, execute one instruction boundary at a
//!    time; nothing executes while the reset line is held low.
//! 4. Power-off or an execution error: registers zeroed, state `Halted`. An error
//!    is recorded in `Signals` as the failure message.

use std::sync::Arc;
use std::thread::{self, JoinHandle};

use tracing::{error, info, warn};

use crate::signals::{PowerState, Signals};
use crate::{Config, Cpu, ExecutionError, MemoryBus, ProcessorError, UnimplementedPolicy};

const THREAD_NAME: &str = "w65c02-core";

/// A 65C02 running on its own thread.
///
/// # Examples
///
/// ```
/// use lib65c02::{Config, FlatMemory, MemoryBus, PowerState, Processor};
///
/// let mut memory = FlatMemory::new();
/// memory.write_u16(0xFFFC, 0x0400);
/// memory.load(0x0400, &[0x02, 0x00]); // COP: unimplemented on the 65C02
///
/// let config = Config::default().with_unimplemented(lib65c02::UnimplementedPolicy::Fail);
/// let mut processor = Processor::new(memory, config);
/// processor.power_on().unwrap();
/// processor.reset_high();
/// processor.wait_halted().unwrap();
///
/// assert_eq!(processor.state(), PowerState::Halted);
/// assert!(processor.failed());
/// assert_eq!(
///     processor.failure_message().as_deref(),
///     Some("Unimplemented instruction at $0400: $02")
/// );
/// ```
pub struct Processor<M: MemoryBus + Send + 'static> {
    cpu: Option<Cpu<M>>,
    worker: Option<JoinHandle<Cpu<M>>>,
    signals: Arc<Signals>,
}

impl<M: MemoryBus + Send + 'static> Processor<M> {
    /// Creates an unpowered processor over `memory`.
    pub fn new(memory: M, config: Config) -> Self {
        Self::from_cpu(Cpu::with_config(memory, config))
    }

    /// Wraps an existing CPU, sharing its control lines.
    pub fn from_cpu(cpu: Cpu<M>) -> Self {
        let signals = Arc::clone(cpu.signals());
        Self {
            cpu: Some(cpu),
            worker: None,
            signals,
        }
    }

    // ========== Power ==========

    /// Starts the run loop. Does nothing while the loop is already running.
    ///
    /// The processor then waits for the reset line to rise.
    pub fn power_on(&mut self) -> Result<(), ProcessorError> {
        if let Some(worker) = &self.worker {
            if !worker.is_finished() {
                return Ok(());
            }
        }
        self.reap()?;

        let cpu = self.cpu.take().ok_or(ProcessorError::WorkerPanicked)?;
        self.signals.begin_power_on();
        info!("power on");

        let spawned = thread::Builder::new()
            .name(THREAD_NAME.to_string())
            .spawn(move || run(cpu));
        match spawned {
            Ok(handle) => {
                self.worker = Some(handle);
                Ok(())
            }
            Err(err) => {
                self.signals.record_failure(err.to_string());
                self.signals.set_state(PowerState::Halted);
                Err(ProcessorError::Spawn(err))
            }
        }
    }

    /// Stops the run loop after the current instruction and waits for it to exit.
    ///
    /// Called on the run-loop thread itself this only signals, like
    /// [`Signals::power_off`].
    pub fn power_off(&mut self) -> Result<(), ProcessorError> {
        self.signals.power_off();

        if let Some(worker) = &self.worker {
            if worker.thread().id() == thread::current().id() {
                return Ok(());
            }
        }
        self.reap()
    }

    /// Blocks until the run loop exits on its own (power-off from a device, or a
    /// failure).
    pub fn wait_halted(&mut self) -> Result<(), ProcessorError> {
        self.reap()
    }

    /// Joins a worker, taking the CPU back.
    fn reap(&mut self) -> Result<(), ProcessorError> {
        match self.worker.take() {
            Some(worker) => match worker.join() {
                Ok(cpu) => {
                    self.cpu = Some(cpu);
                    Ok(())
                }
                Err(_) => {
                    self.signals.record_failure("processor thread panicked".to_string());
                    self.signals.set_state(PowerState::Halted);
                    Err(ProcessorError::WorkerPanicked)
                }
            },
            None => Ok(()),
        }
    }

    // ========== Access ==========

    /// The CPU, while the run loop is not holding it.
    pub fn cpu(&self) -> Option<&Cpu<M>> {
        self.cpu.as_ref()
    }

    pub fn cpu_mut(&mut self) -> Option<&mut Cpu<M>> {
        self.cpu.as_mut()
    }

    pub fn signals(&self) -> &Arc<Signals> {
        &self.signals
    }

    /// True while a run-loop thread exists and has not finished.
    pub fn is_running(&self) -> bool {
        self.worker
            .as_ref()
            .is_some_and(|worker| !worker.is_finished())
    }

    // ========== Control Lines ==========

    pub fn reset_low(&self) {
        self.signals.reset_low();
    }

    pub fn reset_high(&self) {
        self.signals.reset_high();
    }

    pub fn nmi_low(&self) {
        self.signals.nmi_low();
    }

    pub fn nmi_high(&self) {
        self.signals.nmi_high();
    }

    pub fn irq_low(&self) {
        self.signals.irq_low();
    }

    pub fn irq_high(&self) {
        self.signals.irq_high();
    }

    pub fn set_cycle_period_ns(&self, nanoseconds: u64) {
        self.signals.set_cycle_period_ns(nanoseconds);
    }

    pub fn set_unimplemented_policy(&self, policy: UnimplementedPolicy) {
        self.signals.set_unimplemented_policy(policy);
    }

    pub fn set_rockwell_extensions(&self, enabled: bool) {
        self.signals.set_rockwell_extensions(enabled);
    }

    pub fn set_pausable(&self, enabled: bool) {
        self.signals.set_pausable(enabled);
    }

    /// Aborts a blocked wait; the run loop halts with a failure.
    pub fn cancel(&self) {
        self.signals.cancel();
    }

    // ========== Queries ==========

    pub fn state(&self) -> PowerState {
        self.signals.state()
    }

    pub fn failed(&self) -> bool {
        self.signals.failed()
    }

    pub fn failure_message(&self) -> Option<String> {
        self.signals.failure_message()
    }

    pub fn stack_pointer(&self) -> u8 {
        self.signals.stack_pointer()
    }
}

impl<M: MemoryBus + Send + 'static> Drop for Processor<M> {
    fn drop(&mut self) {
        if self.worker.is_some() {
            if let Err(err) = self.power_off() {
                warn!(%err, "processor dropped with a failed run loop");
            }
        }
    }
}

/// Body of the run-loop thread. Returns the CPU, registers zeroed.
fn run<M: MemoryBus>(mut cpu: Cpu<M>) -> Cpu<M> {
    let signals = Arc::clone(cpu.signals());
    cpu.power_up();

    if let Err(err) = run_powered(&mut cpu, &signals) {
        error!(%err, "processor halted");
        signals.record_failure(err.to_string());
    }

    cpu.zero_registers();
    signals.publish_stack_pointer(0);
    signals.set_state(PowerState::Halted);
    info!("halted");
    cpu
}

fn run_powered<M: MemoryBus>(cpu: &mut Cpu<M>, signals: &Signals) -> Result<(), ExecutionError> {
    if !signals.wait_for_reset_request()? {
        return Ok(());
    }
    signals.set_state(PowerState::Running);
    info!("reset released, running");
    cpu.resync_pacer();

    while signals.powered() {
        if !signals.reset_line_high() {
            signals.wait_for_reset_release()?;
            cpu.resync_pacer();
            continue;
        }
        cpu.step()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FlatMemory;

    #[test]
    fn test_power_cycle_without_reset() {
        let mut processor = Processor::new(FlatMemory::new(), Config::default());
        assert_eq!(processor.state(), PowerState::Off);

        processor.power_on().unwrap();
        assert!(processor.cpu().is_none());

        processor.power_off().unwrap();
        assert_eq!(processor.state(), PowerState::Halted);
        assert!(!processor.failed());
        assert!(processor.cpu().is_some());
    }

    #[test]
    fn test_power_off_is_idempotent() {
        let mut processor = Processor::new(FlatMemory::new(), Config::default());
        processor.power_off().unwrap();
        processor.power_off().unwrap();
        assert_eq!(processor.state(), PowerState::Off);
    }

    #[test]
    fn test_cancel_while_awaiting_reset_fails() {
        let mut processor = Processor::new(FlatMemory::new(), Config::default());
        processor.power_on().unwrap();
        processor.cancel();
        processor.wait_halted().unwrap();

        assert!(processor.failed());
        assert_eq!(processor.failure_message().as_deref(), Some("wait cancelled"));
    }
}
