//! Headless симуляция волшебника
//!
//! 1. Scripted сессия: три заклинания + неверный code + dash
//! 2. Seeded-random сессия
//!
//! `tprpg_simulation [tuning.ron] [seed]`

use std::path::PathBuf;

use bevy::prelude::*;
use tprpg_simulation::logger::{init_logger, log_info, log_warning};
use tprpg_simulation::scenario::{SessionStats, WizardDriver};
use tprpg_simulation::{PlayerInputEvent, SpellEffect, WizardTuning};

fn main() {
    init_logger();

    let mut args = std::env::args().skip(1);
    let tuning_path = args.next().map(PathBuf::from).unwrap_or_else(|| PathBuf::from("tuning.ron"));
    let seed = match args.next().map(|s| s.parse::<u64>()) {
        Some(Ok(seed)) => seed,
        Some(Err(e)) => {
            log_warning(&format!("Invalid seed ({}), using 42", e));
            42
        }
        None => 42,
    };

    let tuning = WizardTuning::load_or_default(&tuning_path);
    println!("Starting TPRPG headless simulation (seed: {})", seed);

    let scripted = run_scripted(seed, tuning.clone());
    print_stats("Scripted session", &scripted);

    let mut driver = WizardDriver::new(seed, tuning);
    driver.run_random_session(3000);
    print_stats("Random session", &driver.stats());
    log_info(&format!("Wizard final position: {:?}", driver.position()));

    println!("Simulation complete!");
}

fn run_scripted(seed: u64, tuning: WizardTuning) -> SessionStats {
    let mut driver = WizardDriver::new(seed, tuning);

    for (i, effect) in SpellEffect::ALL.into_iter().enumerate() {
        driver.cast(effect, Vec3::new(2.0 * i as f32, 0.0, -4.0));
        driver.idle(5);
        driver.frame(PlayerInputEvent::fire());
    }

    // 1-2-3-4-5 нет в словаре
    driver.start_crafting_at(Vec3::new(0.0, 0.0, -3.0));
    driver.trace(&[1, 2, 3, 4, 5], 1);
    driver.frame(PlayerInputEvent::end_crafting());

    driver.frame(PlayerInputEvent::moving(Vec2::new(0.0, 1.0)));
    driver.frame(PlayerInputEvent::dash());
    driver.idle(90);

    driver.stats()
}

fn print_stats(title: &str, stats: &SessionStats) {
    println!("=== {} ===", title);
    println!("  crafting sessions: {}", stats.crafting_started);
    for effect in SpellEffect::ALL {
        println!("  {}: {}", effect.name(), stats.casts_of(effect));
    }
    println!("  fizzled: {}", stats.spells_fizzled);
    println!("  projectiles fired: {}", stats.projectiles_fired);
    println!("  dashes: {}", stats.dashes);
}
