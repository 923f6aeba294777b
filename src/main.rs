// SPDX-License-Identifier: MPL-2.0
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use snackbar_queue::config;
use snackbar_queue::diagnostics::{DiagnosticsCollector, WarningEvent, WarningType};
use snackbar_queue::error::{Error, Result};
use snackbar_queue::{Callback, DismissEvent, Snackbar, SnackbarDuration, SnackbarManager};

const HELP: &str = "\
snackbar-demo: queue a few snackbars and print what happens

USAGE:
  snackbar-demo [OPTIONS]

OPTIONS:
  --count <N>          Number of snackbars to show [default: 3]
  --interval <MS>      Delay between two show requests [default: 500]
  --duration <D>       long, short, indefinite or milliseconds
  --animation <MS>     Show/hide transition time
  --config <DIR>       Directory holding settings.toml
  --report             Print the diagnostics report as JSON
  -h, --help           Print this help
";

/// How long the demo waits for the queue to drain.
const DRAIN_LIMIT: Duration = Duration::from_secs(120);

/// Polling period of the queue and the diagnostics channel.
const DRAIN_TICK: Duration = Duration::from_millis(50);

struct Flags {
    count: usize,
    interval: Duration,
    duration: Option<SnackbarDuration>,
    animation: Option<Duration>,
    config_dir: Option<PathBuf>,
    report: bool,
}

fn parse_flags() -> Result<Option<Flags>> {
    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        print!("{HELP}");
        return Ok(None);
    }

    let invalid = |e: pico_args::Error| Error::InvalidArgument(e.to_string());
    let flags = Flags {
        count: args.opt_value_from_str("--count").map_err(invalid)?.unwrap_or(3),
        interval: Duration::from_millis(
            args.opt_value_from_str("--interval")
                .map_err(invalid)?
                .unwrap_or(500),
        ),
        duration: args.opt_value_from_str("--duration").map_err(invalid)?,
        animation: args
            .opt_value_from_str("--animation")
            .map_err(invalid)?
            .map(Duration::from_millis),
        config_dir: args.opt_value_from_str("--config").map_err(invalid)?,
        report: args.contains("--report"),
    };

    let rest = args.finish();
    if !rest.is_empty() {
        return Err(Error::InvalidArgument(format!(
            "unexpected arguments: {rest:?}"
        )));
    }
    Ok(Some(flags))
}

/// Prints every notification a snackbar receives.
struct Printer {
    label: String,
}

impl Callback for Printer {
    fn on_shown(&self) {
        println!("{} shown", self.label);
    }

    fn on_dismissed(&self, event: DismissEvent) {
        println!("{} dismissed ({event})", self.label);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Some(flags) = parse_flags()? else {
        return Ok(());
    };

    let (config, warning) = config::load_with_override(flags.config_dir.clone());

    let duration = match flags.duration {
        Some(duration) => duration,
        None => config.snackbar.default_duration()?,
    };
    let animation = flags
        .animation
        .unwrap_or_else(|| config.snackbar.animation_duration());

    let manager = SnackbarManager::with_timing(config.snackbar.timeout_table());
    let mut collector = DiagnosticsCollector::new(config.diagnostics.event_capacity());
    if let Some(warning) = warning {
        collector
            .handle()
            .log_warning(WarningEvent::new(WarningType::ConfigurationIssue, warning));
    }
    manager.set_diagnostics(collector.handle());

    let mut snackbars = Vec::with_capacity(flags.count);
    for index in 1..=flags.count {
        let label = format!("snackbar #{index}");
        let snackbar = Snackbar::with_manager(manager.clone(), label.clone(), duration)
            .set_animation_duration(animation)
            .set_callback(Arc::new(Printer { label }));
        snackbar.show();
        snackbars.push(snackbar);
        if index < flags.count {
            tokio::time::sleep(flags.interval).await;
            collector.process_pending();
        }
    }

    if duration == SnackbarDuration::Indefinite {
        if let Some(last) = snackbars.last() {
            tokio::time::sleep(flags.interval).await;
            last.dismiss();
        }
    }

    let started = tokio::time::Instant::now();
    let mut tick = tokio::time::interval(DRAIN_TICK);
    while manager.has_current() || manager.has_next() {
        if started.elapsed() > DRAIN_LIMIT {
            log::warn!("queue did not drain within {DRAIN_LIMIT:?}");
            break;
        }
        tick.tick().await;
        collector.process_pending();
    }

    if flags.report {
        collector.process_pending();
        println!("{}", collector.export_json()?);
    }
    Ok(())
}
