use std::sync::atomic::{AtomicBool, Ordering};

use crate::process::ProcessError;

static INSTALLED: AtomicBool = AtomicBool::new(false);

/// Keeps Ctrl-C from terminating the front-end.
///
/// The terminal delivers the interrupt to the whole foreground group, so a
/// running child still receives it; only this process ignores it. At the
/// prompt rustyline reads Ctrl-C as a key press instead.
pub fn setup_interrupt_handler() -> Result<(), ProcessError> {
    if INSTALLED.swap(true, Ordering::SeqCst) {
        return Ok(());
    }
    ctrlc::set_handler(|| {
        tracing::debug!("interrupt received; left to the child shell");
    })
    .map_err(|e| ProcessError::Signal(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handler_installs_once() {
        assert!(setup_interrupt_handler().is_ok());
        assert!(setup_interrupt_handler().is_ok());
    }
}
