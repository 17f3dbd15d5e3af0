//! EXTI Adapter
//!
//! Routes the start button to its EXTI line. embassy-stm32 owns the EXTI
//! interrupt vectors: its handler clears the pending bit and wakes the
//! [`ExtiInput`] future, which is what [`EdgeInterrupt`] waits on.

use embassy_stm32::exti::ExtiInput;

use crate::config::START_EXTI_LINE;
use crate::peripheral::exti::EdgeInterrupt;
use crate::types::{PinRole, SenseResult};

/// Bind the button input to the start EXTI line
///
/// # Errors
///
/// Returns an error if the button pin number does not match the line.
pub fn start_button(button: ExtiInput<'_>) -> SenseResult<EdgeInterrupt<ExtiInput<'_>>> {
    let pin = PinRole::ButtonInput.pin();
    debug!("exti: line {} -> {}", START_EXTI_LINE, pin);
    EdgeInterrupt::route(START_EXTI_LINE, pin.number, button)
}
