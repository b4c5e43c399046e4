use std::io;
use std::sync::{Arc, Mutex};

use nova_param_names::{MemberIdentity, MethodRef};
use tracing_subscriber::fmt::MakeWriter;

use super::fixtures::discoverer;

#[derive(Clone, Default)]
struct SharedLogBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedLogBuffer {
    fn as_string(&self) -> String {
        let bytes = self.0.lock().expect("log buffer mutex poisoned");
        String::from_utf8_lossy(&bytes).to_string()
    }
}

struct SharedLogWriter(Arc<Mutex<Vec<u8>>>);

impl io::Write for SharedLogWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut out = self.0.lock().expect("log buffer mutex poisoned");
        out.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for SharedLogBuffer {
    type Writer = SharedLogWriter;

    fn make_writer(&'a self) -> Self::Writer {
        SharedLogWriter(self.0.clone())
    }
}

fn capture<T>(level: tracing::Level, f: impl FnOnce() -> T) -> (T, String) {
    let logs = SharedLogBuffer::default();
    let subscriber = tracing_subscriber::fmt()
        .with_ansi(false)
        .without_time()
        .with_max_level(level)
        .with_writer(logs.clone())
        .finish();
    let out = tracing::subscriber::with_default(subscriber, f);
    (out, logs.as_string())
}

#[test]
fn routine_misses_are_logged_at_debug() {
    let discoverer = discoverer();
    let run = MethodRef::from_descriptor("demo.Stripped", "run", "(Ljava/lang/String;)V", false)
        .unwrap();
    let missing = MethodRef::from_descriptor("demo.Nowhere", "f", "()V", false).unwrap();

    let (_, text) = capture(tracing::Level::DEBUG, || {
        discoverer.resolve_method_parameter_names(&run);
        discoverer.resolve_method_parameter_names(&missing);
    });

    assert!(text.contains("nova.param_names"), "got:\n{text}");
    assert!(text.contains("debug_info_absent"), "got:\n{text}");
    assert!(text.contains("resource_not_found"), "got:\n{text}");
    assert!(!text.contains("WARN"), "got:\n{text}");
}

#[test]
fn routine_misses_are_quiet_at_warn() {
    let discoverer = discoverer();
    let missing = MethodRef::from_descriptor("demo.Nowhere", "f", "()V", false).unwrap();

    let (result, text) = capture(tracing::Level::WARN, || {
        discoverer.resolve_method_parameter_names(&missing)
    });
    assert_eq!(result, None);
    assert!(text.is_empty(), "got:\n{text}");
}

#[test]
fn invariant_violations_are_logged_at_warn() {
    let discoverer = discoverer();
    let wrong = MethodRef::from_descriptor("demo.Shapes", "mix", "(IJI)V", true).unwrap();

    let (result, text) = capture(tracing::Level::WARN, || {
        discoverer.lookup(&MemberIdentity::from(&wrong))
    });
    assert!(result.is_err());
    assert!(text.contains("WARN"), "got:\n{text}");
    assert!(text.contains("demo.Shapes#mix(IJI)V"), "got:\n{text}");
}
