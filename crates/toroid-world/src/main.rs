//! Headless snake run: `toroid-sim [config.json]`.

use std::path::Path;

use rand::SeedableRng;
use rand::rngs::StdRng;
use toroid_world::{SimConfig, Snake, TickOutcome, World};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => {
            let config = SimConfig::load(Path::new(&path))?;
            log::info!("loaded config from {path}");
            config
        }
        None => SimConfig::default(),
    };
    log::debug!("{config:?}");

    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut world = World::new(config.count, config.wrap)?;
    let pathfinder = world.pathfinder(config.pathfinder());
    let mut snake = Snake::spawn(&mut world, 0, config.spawn, pathfinder, &mut rng)?;

    for tick in 0..config.ticks {
        if snake.tick(&mut world, &mut rng)? == TickOutcome::Stranded {
            log::warn!("snake stranded at {} on tick {tick}", snake.head());
            break;
        }
    }

    let stats = snake.stats();
    log::info!(
        "{} ticks: ate {}, collided {}, longest {}, final length {}",
        stats.ticks,
        stats.eaten,
        stats.collisions,
        stats.longest,
        snake.len()
    );
    println!("{}", serde_json::to_string(&stats)?);
    Ok(())
}
