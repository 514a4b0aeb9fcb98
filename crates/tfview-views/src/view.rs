use crate::colorize::Colorize;
use crate::format::{format_diagnostic, format_diagnostic_plain};
use crate::streams::Streams;
use tfview_types::{Diagnostics, Severity};

/// Name of the executable, used in help hints.
pub const CLI_NAME: &str = "tfview";

/// Session-wide terminal view shared by all command views.
///
/// Owned by the CLI session; command views hold it through an `Arc` for the
/// duration of one invocation.
pub struct View {
    streams: Streams,
    colorize: Colorize,
    in_automation: bool,
}

impl View {
    pub fn new(streams: Streams, colorize: Colorize, in_automation: bool) -> Self {
        Self {
            streams,
            colorize,
            in_automation,
        }
    }

    pub fn streams(&self) -> &Streams {
        &self.streams
    }

    pub fn colorize(&self) -> Colorize {
        self.colorize
    }

    /// True when driven by a pipeline rather than a person at a terminal.
    pub fn running_in_automation(&self) -> bool {
        self.in_automation
    }

    /// Errors go to stderr, warnings to stdout.
    pub fn diagnostics(&self, diags: &Diagnostics) {
        for diag in diags {
            let msg = if self.colorize.is_enabled() {
                format_diagnostic(diag, self.colorize)
            } else {
                format_diagnostic_plain(diag)
            };

            match diag.severity {
                Severity::Error => self.streams.eprint(&msg),
                Severity::Warning => self.streams.print(&msg),
            }
        }
    }

    pub fn help_prompt(&self, command: &str) {
        if self.in_automation {
            self.streams
                .eprintln(&format!("For usage, run: {} {} --help", CLI_NAME, command));
            return;
        }
        self.streams.eprint(&format!(
            "\nFor more help on using this command, run:\n  {} {} --help\n",
            CLI_NAME,
            self.colorize.bold(command)
        ));
    }
}
