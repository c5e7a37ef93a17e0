//! Game server implementation.
//!
//! Shared state lives behind two locks: the session registry tracks
//! connections and the game state owns the world. They are never held
//! at the same time, so connection churn cannot stall the game loop.

use crate::config::Config;
use bytes::{Bytes, BytesMut};
use protocol::records::{self, MoveCommand};
use protocol::LineFramer;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{broadcast, RwLock};
use tracing::{debug, info, warn};

pub mod client;
pub mod game;

pub use client::{Session, SessionRegistry};
pub use game::{run_game_loop, GameState};

/// Run the game server.
pub async fn run(config: Config) -> anyhow::Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.server.bind, config.server.port).parse()?;
    let listener = TcpListener::bind(&addr).await?;
    info!("Listening on {}", listener.local_addr()?);

    let sessions = Arc::new(RwLock::new(SessionRegistry::new()));

    // Each tick's frame is serialized once and fanned out to every client.
    let (frame_tx, _frame_rx) = broadcast::channel::<Bytes>(5);

    let game_state = GameState::new(&config);
    info!(
        "World initialized: {} walls, {} powerups",
        game_state.world.walls.len(),
        game_state.world.powerups.len()
    );
    let game_state = Arc::new(RwLock::new(game_state));

    // Start the game loop
    let loop_state = Arc::clone(&game_state);
    let loop_sessions = Arc::clone(&sessions);
    let loop_tx = frame_tx.clone();
    let tick_interval = config.game.ms_per_frame;
    tokio::spawn(async move {
        game::run_game_loop(loop_state, loop_sessions, loop_tx, tick_interval).await;
    });

    loop {
        let (stream, addr) = listener.accept().await?;

        let game_state = Arc::clone(&game_state);
        let sessions = Arc::clone(&sessions);
        let frame_rx = frame_tx.subscribe();

        tokio::spawn(handle_connection(
            stream, addr, game_state, sessions, frame_rx,
        ));
    }
}

/// Handle a single client connection through its whole life: the name
/// handshake, the world download, then the intent/broadcast loop.
async fn handle_connection(
    stream: TcpStream,
    addr: SocketAddr,
    game_state: Arc<RwLock<GameState>>,
    sessions: Arc<RwLock<SessionRegistry>>,
    mut frame_rx: broadcast::Receiver<Bytes>,
) {
    info!("New connection from {}", addr);

    let session_id = {
        let mut registry = sessions.write().await;
        registry.add(addr)
    };

    let (mut read, mut write) = stream.into_split();
    let mut framer = LineFramer::new();

    // The server sends nothing until the client's name line arrives.
    let mut name: Option<String> = None;
    while name.is_none() {
        match read.read_buf(framer.buffer_mut()).await {
            Ok(0) => break,
            Ok(_) => {
                if let Some(record) = framer.next_record() {
                    name = Some(String::from_utf8_lossy(&record).trim().to_string());
                }
            }
            Err(e) => {
                warn!("Read error from {}: {}", addr, e);
                break;
            }
        }
    }
    let Some(name) = name else {
        sessions.write().await.remove(session_id);
        info!("Connection from {} closed before joining", addr);
        return;
    };

    // Handshake: session id line, world size line, one line per wall.
    let handshake = {
        let game = game_state.read().await;
        let mut buf = BytesMut::new();
        buf.extend_from_slice(format!("{session_id}\n").as_bytes());
        buf.extend_from_slice(format!("{}\n", game.world.size).as_bytes());
        for wall in game.world.walls.values() {
            if let Err(e) = records::write_record(&mut buf, &wall.to_record()) {
                warn!("Failed to encode wall {}: {}", wall.id, e);
            }
        }
        buf.freeze()
    };
    if let Err(e) = write.write_all(&handshake).await {
        warn!("Failed to send handshake to {}: {}", addr, e);
        sessions.write().await.remove(session_id);
        return;
    }

    sessions.write().await.set_name(session_id, &name);
    game_state.write().await.world.spawn_snake(session_id, &name);
    info!("Session {} ({}) joined from {}", session_id, name, addr);

    loop {
        // Apply every complete record already buffered. This also picks
        // up intents the client pipelined behind its name line.
        while let Some(record) = framer.next_record() {
            match MoveCommand::decode(&record) {
                Ok(cmd) => {
                    let mut game = game_state.write().await;
                    game.world.apply_intent(session_id, cmd.moving);
                }
                // Anything unparseable is dropped, the session stays up.
                Err(e) => debug!("Ignoring record from session {}: {}", session_id, e),
            }
        }

        tokio::select! {
            result = read.read_buf(framer.buffer_mut()) => {
                match result {
                    Ok(0) => {
                        info!("Session {} ({}) disconnected", session_id, name);
                        break;
                    }
                    Ok(_) => {}
                    Err(e) => {
                        warn!("Read error from {}: {}", addr, e);
                        break;
                    }
                }
            }
            frame = frame_rx.recv() => {
                match frame {
                    Ok(frame) => {
                        if let Err(e) = write.write_all(&frame).await {
                            warn!("Failed to send frame to {}: {}", addr, e);
                            break;
                        }
                    }
                    // Frames carry absolute state, so missing some is safe.
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        debug!("Session {} lagged, skipped {} frames", session_id, n);
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        }
    }

    sessions.write().await.remove(session_id);
    game_state.write().await.world.mark_disconnected(session_id);
    info!("Session {} ({}) left", session_id, name);
}
