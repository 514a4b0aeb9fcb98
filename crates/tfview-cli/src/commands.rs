use super::args::{Cli, Commands};
use super::handlers::{self, HandlerContext};
use crate::config::Config;
use crate::logging;
use anyhow::Result;
use is_terminal::IsTerminal;
use std::process::ExitCode;
use std::sync::Arc;
use tfview_views::{Colorize, Streams, View};

pub fn run(cli: Cli) -> Result<ExitCode> {
    let config = Config::load(cli.config.as_deref())?;

    let level = cli
        .log_level
        .map(|l| l.to_string())
        .unwrap_or_else(|| config.logging.level.clone());
    logging::init(&level);

    let color = color_enabled(
        cli.no_color || config.ui.no_color,
        std::env::var_os("NO_COLOR").is_some(),
        std::io::stdout().is_terminal(),
    );
    let in_automation = running_in_automation();
    tracing::debug!(color, in_automation, "terminal settings resolved");

    let view = Arc::new(View::new(Streams::stdio(), Colorize::new(color), in_automation));
    let ctx = HandlerContext::new(view, config);

    match cli.command {
        Commands::Refresh(args) => handlers::refresh::handle(&ctx, args),
    }
}

/// Colors need a terminal on stdout and no opt-out from flags, config or
/// `NO_COLOR`.
fn color_enabled(disabled: bool, no_color_env: bool, stdout_is_terminal: bool) -> bool {
    !disabled && !no_color_env && stdout_is_terminal
}

fn running_in_automation() -> bool {
    std::env::var_os("TF_IN_AUTOMATION").is_some_and(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_color_requires_terminal() {
        assert!(color_enabled(false, false, true));
        assert!(!color_enabled(false, false, false));
    }

    #[test]
    fn test_any_opt_out_disables_color() {
        assert!(!color_enabled(true, false, true));
        assert!(!color_enabled(false, true, true));
        assert!(!color_enabled(true, true, true));
    }

    #[test]
    fn test_flag_and_config_opt_outs() {
        let cli = Cli::parse_from(["tfview", "--no-color", "refresh"]);
        let config = Config::default();
        assert!(!color_enabled(cli.no_color || config.ui.no_color, false, true));

        let cli = Cli::parse_from(["tfview", "refresh"]);
        let config: Config = toml::from_str("[ui]\nno_color = true\n").unwrap();
        assert!(!color_enabled(cli.no_color || config.ui.no_color, false, true));
    }
}
