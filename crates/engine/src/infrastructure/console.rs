//! Terminal presentation: notices, radio traffic and the static cue go to stdout.

use std::io::Write;

use aiatc_domain::AirportCode;

use crate::infrastructure::ports::{PresentationPort, Severity};

/// Writes everything the pilot should see or hear to standard output.
#[derive(Debug, Default)]
pub struct ConsolePresentation;

impl ConsolePresentation {
    pub fn new() -> Self {
        Self
    }

    fn emit(&self, line: &str) {
        let mut stdout = std::io::stdout().lock();
        // A closed stdout is not worth crashing the radio over
        let _ = writeln!(stdout, "{line}");
        let _ = stdout.flush();
    }
}

impl PresentationPort for ConsolePresentation {
    fn notify(&self, severity: Severity, message: &str) {
        let tag = match severity {
            Severity::Info => "INFO",
            Severity::Error => "ERROR",
        };
        self.emit(&format!("[{tag}] {message}"));
    }

    fn play_static(&self) {
        self.emit("~~ kssshhhhk ~~");
    }

    fn controller_says(&self, airport: &AirportCode, text: &str) {
        self.emit(&format!("<{airport} ATC> {text}"));
    }

    fn pilot_says(&self, speaker: &str, text: &str) {
        self.emit(&format!("<{speaker}> {text}"));
    }
}
