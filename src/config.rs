//! Process configuration read from the environment.
//!
//!   DRONE_PILOT_BIND_ADDR   listen address (default: 0.0.0.0:5000)
//!   DRONE_PILOT_MAX_AGENTS  agent table capacity (default: 64)
//!   RUST_LOG                tracing filter (default: info,drone_pilot=debug,tower_http=info)

use std::net::SocketAddr;

use anyhow::Context;

use crate::dynamics::state::SteeringConfig;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5000";
pub const DEFAULT_MAX_AGENTS: usize = 64;
pub const DEFAULT_LOG_FILTER: &str = "info,drone_pilot=debug,tower_http=info";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub max_agents: usize,
    pub steering: SteeringConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 5000)),
            max_agents: DEFAULT_MAX_AGENTS,
            steering: SteeringConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind = lookup("DRONE_PILOT_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.into());
        let bind_addr = bind
            .parse::<SocketAddr>()
            .with_context(|| format!("invalid DRONE_PILOT_BIND_ADDR: {bind}"))?;

        let max_agents = match lookup("DRONE_PILOT_MAX_AGENTS") {
            Some(v) => v
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .with_context(|| format!("invalid DRONE_PILOT_MAX_AGENTS: {v}"))?,
            None => DEFAULT_MAX_AGENTS,
        };

        Ok(Self { bind_addr, max_agents, steering: SteeringConfig::default() })
    }
}
