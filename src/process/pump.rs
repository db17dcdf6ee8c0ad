use std::io::{ErrorKind, Read, Write};

const CHUNK_SIZE: usize = 4096;

/// Copies `source` into `sink` one chunk at a time until end-of-stream.
///
/// Read errors end the pump like EOF. If the sink stops accepting data the
/// pump keeps reading and discards, so the child never blocks on a full pipe.
/// Returns the number of bytes read from `source`.
pub fn pump<R, W>(mut source: R, sink: &mut W) -> u64
where
    R: Read,
    W: Write + ?Sized,
{
    let mut buf = [0u8; CHUNK_SIZE];
    let mut total = 0u64;
    let mut sink_open = true;

    loop {
        let n = match source.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => {
                tracing::warn!(error = %e, "child stream closed unexpectedly");
                break;
            }
        };
        total += n as u64;

        if sink_open {
            if let Err(e) = sink.write_all(&buf[..n]).and_then(|_| sink.flush()) {
                tracing::warn!(error = %e, "host stream rejected output, discarding");
                sink_open = false;
            }
        }
    }

    total
}
