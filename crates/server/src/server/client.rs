//! Client session state.

use std::collections::HashMap;
use std::net::SocketAddr;

/// A connected client session.
#[derive(Debug)]
pub struct Session {
    /// Unique session ID, shared with the snake it controls.
    pub id: u64,
    /// Remote address.
    pub addr: SocketAddr,
    /// Player name. `None` until the joining name line arrives.
    pub name: Option<String>,
}

/// All live sessions. Session IDs start at 1 and are never reused.
#[derive(Debug)]
pub struct SessionRegistry {
    next_id: u64,
    sessions: HashMap<u64, Session>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            sessions: HashMap::new(),
        }
    }

    /// Register a fresh connection and hand back its session ID.
    pub fn add(&mut self, addr: SocketAddr) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.sessions.insert(
            id,
            Session {
                id,
                addr,
                name: None,
            },
        );
        id
    }

    pub fn set_name(&mut self, id: u64, name: &str) {
        if let Some(session) = self.sessions.get_mut(&id) {
            session.name = Some(name.to_string());
        }
    }

    pub fn remove(&mut self, id: u64) -> Option<Session> {
        self.sessions.remove(&id)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
