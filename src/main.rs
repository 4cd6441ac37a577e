//! Shatterball entry point: a headless fixed-rate run loop.
//!
//! Runs the arena at 60 ticks per second until one ball survives, then
//! prints the standings. The only external input is the process stop signal.

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use shatterball::background::Background;
use shatterball::color::color_name;
use shatterball::consts::TICK_HZ;
use shatterball::rankings::{RankingRow, standings};
use shatterball::sim::{ArenaConfig, SimState, tick};

fn main() {
    env_logger::init();

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    let config = ArenaConfig::default();
    let mut state = SimState::new(config, seed);
    let mut background = Background::new(&config, seed);

    log::info!(
        "Shatterball starting: seed {}, arena {}x{}, {} balls",
        seed,
        config.width,
        config.height,
        state.balls.len()
    );

    let tick_duration = Duration::from_secs_f64(1.0 / TICK_HZ as f64);
    let mut next_tick = Instant::now();
    loop {
        background.update(state.elapsed_secs());
        tick(&mut state, &mut background);

        if let Some(winner) = state.winner() {
            log::info!(
                "{} ball wins after {:.1}s",
                color_name(winner.color),
                winner.survival_ticks as f32 / TICK_HZ as f32
            );
            print_standings(&standings(winner.color, &state.eliminated));
            break;
        }

        // Frame governor: sleep out the rest of the tick
        next_tick += tick_duration;
        let wait = next_tick.saturating_duration_since(Instant::now());
        if !wait.is_zero() {
            std::thread::sleep(wait);
        }
    }
}

fn print_standings(rows: &[RankingRow]) {
    println!("{:<8}{:<10}{}", "Rank", "Ball", "Time");
    for row in rows {
        println!(
            "{:<8}{:<10}{}",
            format!("{}.", row.rank),
            row.name,
            row.time_label()
        );
    }
}
