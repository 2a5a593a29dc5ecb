//! Binding between the scanner and an editor host.
//!
//! The host supplies the active buffer and renders annotations; the session
//! owns the configuration, reacts to change notifications with a debounced
//! rescan, and implements the two user commands (toggle, set chance).
//!
//! Each render call carries the complete annotation set for the buffer.
//! Hosts should replace whatever they showed before.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tracing::{debug, info};

use crate::buffer::TextBuffer;
use crate::debounce::Debouncer;
use crate::scan::{Annotation, ScanConfig, Scanner};
use crate::select::{ChanceError, ChancePercent};

pub const ENABLED_MESSAGE: &str = "Syntax Zaz enabled! Prepare to question everything...";
pub const DISABLED_MESSAGE: &str = "Syntax Zaz disabled. You can code in peace now.";

/// The editor side of a session.
///
/// `render` and `inform` are called while the session lock is held. An
/// implementation must not call back into its `Session` from either method,
/// or it will deadlock.
pub trait Host: Send + 'static {
    /// The buffer currently shown, if any.
    fn active_buffer(&self) -> Option<&dyn TextBuffer>;

    /// Replace all annotations on the active buffer.
    fn render(&mut self, annotations: Vec<Annotation>);

    /// Show a short informational message to the user.
    fn inform(&mut self, message: &str);
}

struct Shared<H> {
    host: H,
    config: ScanConfig,
    scanner: Scanner,
}

pub struct Session<H: Host> {
    shared: Arc<Mutex<Shared<H>>>,
    debouncer: Debouncer,
}

impl<H: Host> Session<H> {
    pub fn new(host: H, config: ScanConfig, delay: Duration) -> Self {
        Self {
            shared: Arc::new(Mutex::new(Shared {
                host,
                config,
                scanner: Scanner::default(),
            })),
            debouncer: Debouncer::new(delay),
        }
    }

    /// Schedule the first scan if a buffer is already open.
    pub fn activate(&self) {
        let has_buffer = lock(&self.shared).host.active_buffer().is_some();
        if has_buffer {
            self.schedule();
        }
    }

    /// The active buffer's content changed.
    pub fn content_changed(&self) {
        if self.config().enabled {
            self.schedule();
        }
    }

    /// A different buffer became active.
    pub fn active_buffer_changed(&self) {
        if self.config().enabled {
            self.schedule();
        }
    }

    /// Flip the enabled flag. Returns the new state.
    ///
    /// Disabling clears annotations immediately. A scan that is still
    /// pending will see the flag and do nothing when it fires.
    pub fn toggle(&self) -> bool {
        let enabled = {
            let mut shared = lock(&self.shared);
            shared.config.enabled = !shared.config.enabled;
            let enabled = shared.config.enabled;
            if enabled {
                shared.host.inform(ENABLED_MESSAGE);
            } else {
                shared.host.inform(DISABLED_MESSAGE);
                if shared.host.active_buffer().is_some() {
                    shared.host.render(Vec::new());
                }
            }
            enabled
        };

        info!(enabled, "toggled");
        if enabled {
            self.schedule();
        }
        enabled
    }

    /// Validate and apply a chance percentage typed by the user.
    ///
    /// Invalid input leaves the configuration untouched.
    pub fn set_chance(&self, input: &str) -> Result<ChancePercent, ChanceError> {
        let chance = ChancePercent::parse_input(input)?;
        {
            let mut shared = lock(&self.shared);
            shared.config.chance = chance;
            shared.host.inform(&format!("Zaz chance set to {}", chance));
        }
        info!(chance = chance.get(), "chance updated");
        self.schedule();
        Ok(chance)
    }

    /// Scan the active buffer now and render the result.
    pub fn refresh(&self) {
        refresh(&self.shared);
    }

    /// Cancel any pending scan and clear annotations.
    pub fn deactivate(&self) {
        self.debouncer.cancel();
        let mut shared = lock(&self.shared);
        if shared.host.active_buffer().is_some() {
            shared.host.render(Vec::new());
        }
    }

    pub fn config(&self) -> ScanConfig {
        lock(&self.shared).config
    }

    pub fn is_scan_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Run a closure against the host.
    pub fn with_host<R>(&self, f: impl FnOnce(&mut H) -> R) -> R {
        f(&mut lock(&self.shared).host)
    }

    fn schedule(&self) {
        let shared = Arc::clone(&self.shared);
        self.debouncer.trigger(move || refresh(&shared));
    }
}

fn refresh<H: Host>(shared: &Mutex<Shared<H>>) {
    let mut guard = lock(shared);
    let shared = &mut *guard;

    if !shared.config.enabled {
        debug!("scan skipped: disabled");
        return;
    }

    let annotations = match shared.host.active_buffer() {
        Some(buffer) => shared.scanner.scan(buffer, &shared.config),
        None => {
            debug!("scan skipped: no active buffer");
            return;
        }
    };
    shared.host.render(annotations);
}

fn lock<H>(shared: &Mutex<Shared<H>>) -> MutexGuard<'_, Shared<H>> {
    shared.lock().unwrap_or_else(|e| e.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::Document;

    #[derive(Default)]
    struct TestHost {
        document: Option<Document>,
        renders: Vec<Vec<Annotation>>,
        messages: Vec<String>,
    }

    impl Host for TestHost {
        fn active_buffer(&self) -> Option<&dyn TextBuffer> {
            self.document.as_ref().map(|d| d as &dyn TextBuffer)
        }

        fn render(&mut self, annotations: Vec<Annotation>) {
            self.renders.push(annotations);
        }

        fn inform(&mut self, message: &str) {
            self.messages.push(message.to_string());
        }
    }

    fn session(text: Option<&str>, chance: u8) -> Session<TestHost> {
        let host = TestHost {
            document: text.map(Document::from_text),
            ..Default::default()
        };
        let config = ScanConfig::new(true, ChancePercent::new(chance).unwrap());
        Session::new(host, config, Duration::from_millis(500))
    }

    #[test]
    fn test_refresh_renders_full_set() {
        let session = session(Some("let value = compute(42);\nreturn Ok(result);\n"), 100);
        session.refresh();
        session.refresh();
        session.with_host(|host| {
            assert_eq!(host.renders.len(), 2);
            assert_eq!(host.renders[0].len(), 2);
            assert_eq!(host.renders[0], host.renders[1]);
        });
    }

    #[test]
    fn test_refresh_without_buffer_is_skipped() {
        let session = session(None, 100);
        session.refresh();
        session.with_host(|host| assert!(host.renders.is_empty()));
    }

    #[test]
    fn test_invalid_chance_leaves_config() {
        let session = session(None, 30);
        assert!(session.set_chance("abc").is_err());
        assert!(session.set_chance("0").is_err());
        assert!(session.set_chance("101").is_err());
        assert_eq!(session.config().chance.get(), 30);
        session.with_host(|host| assert!(host.messages.is_empty()));
    }
}
