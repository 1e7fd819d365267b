//! Log capture for unit tests. Records are kept per thread so tests running
//! in parallel only see their own output.

use std::{
    sync::{Mutex, Once},
    thread::{self, ThreadId},
};

use log::{Level, LevelFilter, Log, Metadata, Record};

struct CaptureLogger {
    records: Mutex<Vec<(ThreadId, Level, String)>>,
}

static LOGGER: CaptureLogger = CaptureLogger {
    records: Mutex::new(Vec::new()),
};
static INSTALL: Once = Once::new();

impl Log for CaptureLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        if let Ok(mut records) = self.records.lock() {
            records.push((thread::current().id(), record.level(), record.args().to_string()));
        }
    }

    fn flush(&self) {}
}

fn take_current_thread() -> Vec<(Level, String)> {
    let me = thread::current().id();
    let mut records = LOGGER.records.lock().unwrap_or_else(|e| e.into_inner());
    let (mine, others): (Vec<_>, Vec<_>) = records.drain(..).partition(|(id, _, _)| *id == me);
    *records = others;
    mine.into_iter().map(|(_, level, msg)| (level, msg)).collect()
}

/// Run `f` and return its result together with everything it logged.
pub fn capture<T>(f: impl FnOnce() -> T) -> (T, Vec<(Level, String)>) {
    INSTALL.call_once(|| {
        log::set_logger(&LOGGER).expect("no other logger in renderer tests");
        log::set_max_level(LevelFilter::Trace);
    });
    take_current_thread();
    let out = f();
    (out, take_current_thread())
}
