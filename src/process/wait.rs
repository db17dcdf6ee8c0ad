use std::io;
use std::process::{Child, ExitStatus};

/// Blocks until `child` has terminated and returns its status.
///
/// A child that already exited is picked up by the initial poll. Otherwise the
/// blocking wait reaps it; the OS keeps the status of an exited but unreaped
/// child, so a termination before this call cannot be missed.
pub fn wait_for_exit(child: &mut Child) -> io::Result<ExitStatus> {
    if let Some(status) = child.try_wait()? {
        return Ok(status);
    }
    loop {
        match child.wait() {
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            other => return other,
        }
    }
}

/// Converts a status into the integer reported to the read-eval loop.
pub fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }
    1
}
