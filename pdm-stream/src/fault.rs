//! Fatal start-up failure indication.
//!
//! When [`bring_up`](crate::pipeline::bring_up) fails there is no audio path
//! to fall back to. The firmware parks in [`halt`], blinking an indicator so
//! the failure is visible without a debugger.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

/// Time between indicator toggles.
pub const FAULT_BLINK_PERIOD_MS: u32 = 500;

/// Blink `indicator` forever.
///
/// Pin errors are ignored: there is nowhere left to report them.
pub fn halt<P, D>(mut indicator: P, mut delay: D) -> !
where
    P: OutputPin,
    D: DelayNs,
{
    #[cfg(feature = "defmt")]
    defmt::error!("fatal start-up failure, halting");

    let mut lit = false;
    loop {
        lit = blink_once(&mut indicator, &mut delay, lit);
    }
}

/// Run `cycles` full on/off periods, then return with the indicator off.
pub fn blink<P, D>(indicator: &mut P, delay: &mut D, cycles: u32)
where
    P: OutputPin,
    D: DelayNs,
{
    let mut lit = false;
    for _ in 0..cycles * 2 {
        lit = blink_once(indicator, delay, lit);
    }
    let _ = indicator.set_low();
}

/// Flip the indicator and wait one period. Returns the new state.
fn blink_once<P, D>(indicator: &mut P, delay: &mut D, lit: bool) -> bool
where
    P: OutputPin,
    D: DelayNs,
{
    let lit = !lit;
    let _ = if lit {
        indicator.set_high()
    } else {
        indicator.set_low()
    };
    delay.delay_ms(FAULT_BLINK_PERIOD_MS);
    lit
}
