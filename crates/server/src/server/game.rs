//! Game state and main loop.

use crate::config::Config;
use crate::world::{World, INITIAL_POWERUPS};
use bytes::{Bytes, BytesMut};
use futures_util::FutureExt;
use protocol::records;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, RwLock};
use tokio::time::{interval_at, sleep, Instant, MissedTickBehavior};
use tracing::{debug, warn};

use super::client::SessionRegistry;

/// Main game state.
pub struct GameState {
    pub world: World,
}

impl GameState {
    /// Build the world from config: walls plus the initial powerup set.
    pub fn new(config: &Config) -> Self {
        let mut world = World::new(config.game.universe_size, config.game.respawn_rate);
        for wall in &config.walls {
            world.add_wall(wall.as_wall());
        }
        world.add_powerups(INITIAL_POWERUPS);
        Self { world }
    }

    /// Run one tick and serialize the resulting frame. Transient event
    /// flags are cleared only after serialization, so each death, join
    /// and disconnect is broadcast in exactly one frame.
    pub fn tick(&mut self) -> Bytes {
        self.world.update();
        let frame = self.build_frame();
        self.world.clear_transient_flags();
        frame
    }

    /// Serialize the full world state, all powerups and then all snakes.
    fn build_frame(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(4096);
        for powerup in self.world.powerups.values() {
            if let Err(e) = records::write_record(&mut buf, &powerup.to_record()) {
                warn!("Dropping powerup {} from frame: {}", powerup.id, e);
            }
        }
        for snake in self.world.snakes.values() {
            if let Err(e) = records::write_record(&mut buf, &snake.to_record()) {
                warn!("Dropping snake {} from frame: {}", snake.id, e);
            }
        }
        buf.freeze()
    }
}

/// Run the main game loop.
pub async fn run_game_loop(
    state: Arc<RwLock<GameState>>,
    sessions: Arc<RwLock<SessionRegistry>>,
    frame_tx: broadcast::Sender<Bytes>,
    tick_interval_ms: u64,
) {
    let start = Instant::now() + Duration::from_millis(tick_interval_ms);
    let mut ticker = interval_at(start, Duration::from_millis(tick_interval_ms));
    // Use Skip to catch up on missed ticks - ensures consistent game speed.
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        let scheduled = ticker.tick().await;

        // Hibernate when no users are connected to reduce CPU usage
        {
            let registry = sessions.read().await;
            if registry.is_empty() {
                drop(registry);
                sleep(Duration::from_millis((tick_interval_ms * 4).max(100))).await;
                continue;
            }
        }

        // Drain any backlog of tick events so we always process the most recent tick.
        // This keeps user inputs up-to-date when the server falls behind.
        let mut skipped = 0u32;
        while ticker.tick().now_or_never().is_some() {
            skipped += 1;
        }
        if skipped > 0 {
            debug!(
                "Skipped {} ticks to stay current (lag: {:?})",
                skipped,
                Instant::now().saturating_duration_since(scheduled)
            );
        }

        let frame = {
            let mut game = state.write().await;
            let tick_start = std::time::Instant::now();
            let frame = game.tick();
            let tick_ms = tick_start.elapsed().as_secs_f64() * 1000.0;

            let tick_budget = tick_interval_ms as f64 * 0.9;
            if tick_ms > tick_budget {
                warn!(
                    "Slow tick #{}: {:.3}ms (budget: {:.1}ms) - {} snakes",
                    game.world.time,
                    tick_ms,
                    tick_budget,
                    game.world.snakes.len()
                );
            }

            frame
        }; // Write lock released here

        // A send error just means no receiver is currently subscribed.
        let _ = frame_tx.send(frame);
    }
}
