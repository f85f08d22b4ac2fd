use clap::Parser;
use search_bot::SearchBot;
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use wondev_bot_utils::Bot;

#[derive(Parser)]
struct Args {
    /// How many plies to look ahead
    #[arg(short, long, default_value_t = 2)]
    depth: u32,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "info")]
    log_level: LevelFilter,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    if args.depth == 0 {
        anyhow::bail!("--depth must be at least 1");
    }
    initialize_logging(args.log_level);
    SearchBot::new(args.depth).run()
}

fn initialize_logging(level: LevelFilter) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    // Stdout is reserved for the protocol
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(format)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}
