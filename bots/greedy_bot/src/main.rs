use clap::Parser;
use greedy_bot::GreedyBot;
use wondev_bot_utils::Bot;

#[derive(Parser)]
struct Args {
    /// RNG seed
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(rand::random);

    GreedyBot::new(seed).run()
}
