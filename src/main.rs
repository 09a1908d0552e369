#![warn(clippy::all, rust_2018_idioms)]

use anyhow::Context as _;
use luckydip_core::{Draw, LuckyDipConfig, TicketBatch};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = LuckyDipConfig::from_env()?;
    let mut rng = rand::thread_rng();

    let mut batch = TicketBatch::generate(&config.game, &config.batch, &mut rng)
        .context("Failed to generate tickets")?;
    log::info!("{batch}");
    for ticket in &batch {
        log::info!("\n{ticket}");
    }

    let draw = Draw::random(&config.game, &mut rng).context("Failed to draw numbers")?;
    log::info!("Draw: main {:?} lucky {:?}", draw.main(), draw.lucky());

    let summary = batch.check_draw(&draw, &config.game);
    log::info!("\n{summary}");
    log::info!("Net result: {:.2}", summary.net());

    println!("{}", batch.to_json_pretty()?);
    Ok(())
}
