//! Circle Survivor entry point
//!
//! The browser build is driven from JavaScript through `platform::web`. The
//! native binary plays a scripted headless run against an in-memory store.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use circle_survivor::sim::GamePhase;
    use circle_survivor::{Game, ItemKind, MemoryStore};

    env_logger::init();
    log::info!("Circle Survivor (native) starting headless demo...");

    const DT: f32 = 1.0 / 60.0;
    const MAX_SECONDS: f32 = 120.0;

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(2024);

    let mut game = Game::new(MemoryStore::new(), seed);

    let mut run = 0;
    let mut elapsed = 0.0;
    while run < 2 {
        if let Err(e) = game.start(seed + run) {
            log::error!("Could not start run: {e}");
            return;
        }
        run += 1;

        // Weave around the arena, using whatever the store could afford
        let keys = ["w", "d", "s", "a"];
        let mut frame = 0u32;
        while game.phase() == GamePhase::Running && elapsed < MAX_SECONDS {
            if frame % 90 == 0 {
                let current = keys[(frame / 90) as usize % keys.len()];
                let previous = keys[((frame / 90) as usize + keys.len() - 1) % keys.len()];
                game.handle_input(previous, false);
                game.handle_input(current, true);
            }
            if frame % 600 == 300 {
                game.handle_input("shift", true);
                game.handle_input("shift", false);
            }
            game.update(DT);
            for event in game.drain_events() {
                log::debug!("{event:?}");
            }
            elapsed += DT;
            frame += 1;
        }

        let score = game.state().score;
        println!(
            "Run {run}: survived {score:.1}s, {} coins banked",
            game.wallet().coins
        );

        if game.phase() == GamePhase::AwaitingRevive {
            let _ = game.decline_revive();
        }
        if game.phase() == GamePhase::AwaitingName {
            let _ = game.submit_name(&format!("demo-{run}"));
        } else {
            let _ = game.stop();
        }

        while game.buy(ItemKind::Turbo).is_ok() {}
    }

    println!("\nLeaderboard:");
    for (i, entry) in game.high_scores().entries.iter().enumerate() {
        println!("{}. {} {:.1}s", i + 1, entry.name, entry.score);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::init, this is just to satisfy the compiler
}
