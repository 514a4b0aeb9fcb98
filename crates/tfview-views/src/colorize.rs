use owo_colors::OwoColorize;

/// ANSI styling switch. When disabled every helper returns the input as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Colorize {
    enabled: bool,
}

impl Colorize {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn disabled() -> Self {
        Self { enabled: false }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn bold(&self, s: &str) -> String {
        if self.enabled {
            s.bold().to_string()
        } else {
            s.to_string()
        }
    }

    pub fn bold_green(&self, s: &str) -> String {
        if self.enabled {
            s.green().bold().to_string()
        } else {
            s.to_string()
        }
    }

    pub fn bold_red(&self, s: &str) -> String {
        if self.enabled {
            s.red().bold().to_string()
        } else {
            s.to_string()
        }
    }

    pub fn bold_yellow(&self, s: &str) -> String {
        if self.enabled {
            s.yellow().bold().to_string()
        } else {
            s.to_string()
        }
    }

    pub fn red(&self, s: &str) -> String {
        if self.enabled {
            s.red().to_string()
        } else {
            s.to_string()
        }
    }

    pub fn yellow(&self, s: &str) -> String {
        if self.enabled {
            s.yellow().to_string()
        } else {
            s.to_string()
        }
    }
}
