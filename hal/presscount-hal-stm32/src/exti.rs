//! External interrupt lines for STM32F4
//!
//! embassy-stm32 is built without its `exti` feature, so the firmware owns
//! the EXTI vectors. This module configures a line for rising-edge
//! triggering and acknowledges it from the handler.

use embassy_stm32::pac;

use presscount_hal::EdgeInterrupt;

/// GPIO port selector as encoded in SYSCFG_EXTICR
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Port {
    A = 0,
    B = 1,
    C = 2,
    D = 3,
    E = 4,
}

/// One EXTI line (0-15) routed from a GPIO pin
#[derive(Debug, Clone, Copy)]
pub struct ExtiLine {
    line: usize,
}

impl ExtiLine {
    /// Handle for a line that has already been configured
    ///
    /// Used from the interrupt handler, where the line number is fixed by
    /// the vector that fired.
    pub const fn new(line: usize) -> Self {
        Self { line }
    }

    /// Route `port`'s pin `line` to the EXTI controller, trigger on rising
    /// edges only, clear any stale pending flag and unmask the line
    ///
    /// The NVIC vector still has to be enabled by the caller.
    pub fn configure_rising(port: Port, line: usize) -> Self {
        pac::RCC.apb2enr().modify(|w| w.set_syscfgen(true));
        pac::SYSCFG
            .exticr(line / 4)
            .modify(|w| w.set_exti(line % 4, port as u8));

        pac::EXTI.rtsr(0).modify(|w| w.set_line(line, true));
        pac::EXTI.ftsr(0).modify(|w| w.set_line(line, false));

        let exti = Self { line };
        exti.acknowledge();
        pac::EXTI.imr(0).modify(|w| w.set_line(line, true));
        exti
    }

    fn acknowledge(&self) {
        // PR is write-one-to-clear
        pac::EXTI.pr(0).write(|w| w.set_line(self.line, true));
    }
}

impl EdgeInterrupt for ExtiLine {
    fn clear_pending(&mut self) {
        self.acknowledge();
    }

    fn is_pending(&self) -> bool {
        pac::EXTI.pr(0).read().line(self.line)
    }
}
