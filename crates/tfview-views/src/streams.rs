use std::io::{self, Write};
use std::sync::{Arc, Mutex, PoisonError};

type Sink = Mutex<Box<dyn Write + Send>>;

/// Output destination shared by every view of an invocation.
///
/// Each `print*` call writes its whole string under the stream lock and
/// flushes, so a line (or a JSON record) is never split by a concurrent
/// writer.
pub struct Streams {
    stdout: Sink,
    stderr: Sink,
}

impl Streams {
    pub fn new(stdout: Box<dyn Write + Send>, stderr: Box<dyn Write + Send>) -> Self {
        Self {
            stdout: Mutex::new(stdout),
            stderr: Mutex::new(stderr),
        }
    }

    pub fn stdio() -> Self {
        Self::new(Box::new(io::stdout()), Box::new(io::stderr()))
    }

    /// In-memory streams for tests and embedding.
    pub fn capture() -> (Self, CapturedOutput) {
        let captured = CapturedOutput::default();
        let streams = Self::new(
            Box::new(captured.stdout.clone()),
            Box::new(captured.stderr.clone()),
        );
        (streams, captured)
    }

    pub fn print(&self, s: &str) {
        write_all(&self.stdout, "stdout", s.as_bytes());
    }

    pub fn println(&self, s: &str) {
        write_all(&self.stdout, "stdout", format!("{}\n", s).as_bytes());
    }

    pub fn eprint(&self, s: &str) {
        write_all(&self.stderr, "stderr", s.as_bytes());
    }

    pub fn eprintln(&self, s: &str) {
        write_all(&self.stderr, "stderr", format!("{}\n", s).as_bytes());
    }
}

fn write_all(sink: &Sink, name: &str, bytes: &[u8]) {
    let mut writer = sink.lock().unwrap_or_else(PoisonError::into_inner);
    if let Err(err) = writer.write_all(bytes).and_then(|_| writer.flush()) {
        tracing::warn!(stream = name, error = %err, "dropped output write");
    }
}

/// Growable byte buffer that can be handed out as a writer.
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    pub fn contents(&self) -> String {
        let bytes = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Read side of [`Streams::capture`].
#[derive(Debug, Clone, Default)]
pub struct CapturedOutput {
    stdout: SharedBuffer,
    stderr: SharedBuffer,
}

impl CapturedOutput {
    pub fn stdout(&self) -> String {
        self.stdout.contents()
    }

    pub fn stderr(&self) -> String {
        self.stderr.contents()
    }

    pub fn stdout_lines(&self) -> Vec<String> {
        self.stdout().lines().map(str::to_string).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.stdout().is_empty() && self.stderr().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_println_lines_are_not_interleaved() {
        let (streams, captured) = Streams::capture();
        let streams = Arc::new(streams);

        thread::scope(|s| {
            for worker in 0..8 {
                let streams = Arc::clone(&streams);
                s.spawn(move || {
                    for i in 0..50 {
                        streams.println(&format!("worker-{}-line-{}-end", worker, i));
                    }
                });
            }
        });

        let lines = captured.stdout_lines();
        assert_eq!(lines.len(), 400);
        assert!(lines.iter().all(|l| l.starts_with("worker-") && l.ends_with("-end")));
    }

    #[test]
    fn test_stderr_separate_from_stdout() {
        let (streams, captured) = Streams::capture();
        streams.print("out");
        streams.eprintln("err");
        assert_eq!(captured.stdout(), "out");
        assert_eq!(captured.stderr(), "err\n");
    }
}
