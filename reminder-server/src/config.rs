use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use clap::Parser;

pub const DEFAULT_PORT: u16 = 3000;

/// Default log filter when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "reminder_server=info,tower_http=info,warn";

/// Command-line / environment configuration for the HTTP service.
#[derive(Debug, Clone, Parser)]
#[command(name = "reminder-server", version, about = "Weather reminder HTTP service")]
pub struct ServerConfig {
    /// Address to bind.
    #[arg(long, env = "REMINDER_HOST", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub host: IpAddr,

    /// Port to listen on.
    #[arg(short, long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,
}

impl ServerConfig {
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
