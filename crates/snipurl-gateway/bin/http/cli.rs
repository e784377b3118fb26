use clap::Parser;
use std::net::SocketAddr;

pub const LISTEN_ADDR_ENV: &str = "SNIPURL_LISTEN_ADDR";
pub const REDIS_URL_ENV: &str = "SNIPURL_REDIS_URL";
pub const REDIS_TOKEN_ENV: &str = "SNIPURL_REDIS_TOKEN";
pub const PUBLIC_BASE_URL_ENV: &str = "SNIPURL_PUBLIC_BASE_URL";
pub const ADMIN_PASSWORD_ENV: &str = "SNIPURL_ADMIN_PASSWORD";

pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8080";
pub const DEFAULT_ADMIN_PASSWORD: &str = "snipurl-admin-2024";

#[derive(Debug, Parser)]
#[command(name = "snipurl-gateway")]
pub struct CLI {
    #[arg(long, env = LISTEN_ADDR_ENV, default_value = DEFAULT_LISTEN_ADDR)]
    pub listen_addr: SocketAddr,

    /// Durable backend URL; together with the token, selects the Redis
    /// backend. Without both, state lives in process memory.
    #[arg(long, env = REDIS_URL_ENV)]
    pub redis_url: Option<String>,

    #[arg(long, env = REDIS_TOKEN_ENV, hide_env_values = true)]
    pub redis_token: Option<String>,

    /// Base for returned short URLs, e.g. `https://sn.ip`. Derived from
    /// request headers when unset.
    #[arg(long, env = PUBLIC_BASE_URL_ENV)]
    pub public_base_url: Option<String>,

    #[arg(
        long,
        env = ADMIN_PASSWORD_ENV,
        default_value = DEFAULT_ADMIN_PASSWORD,
        hide_env_values = true
    )]
    pub admin_password: String,
}
