//! Command-line client for the KV Proxy server
//!
//! Usage: `kv_client <GET|SET|UPDATE|DELETE> <key> [value]`
//!
//! The server address is read from `SERVER_ADDR` (default: 127.0.0.1:8081).

use std::env;

use anyhow::{bail, Context};

use kv_proxy::models::{Action, Request};
use kv_proxy::KvClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut args = env::args().skip(1);
    let (Some(action), Some(key)) = (args.next(), args.next()) else {
        bail!("usage: kv_client <GET|SET|UPDATE|DELETE> <key> [value]");
    };
    let value = args.next().unwrap_or_default();

    let action: Action = action.to_uppercase().parse()?;

    let addr = env::var("SERVER_ADDR").unwrap_or_else(|_| "127.0.0.1:8081".to_string());
    let client = KvClient::new(addr.clone());
    let resp = client
        .send(&Request::new(action, key, value))
        .await
        .with_context(|| format!("Request to {} failed", addr))?;

    match action {
        Action::Get if resp.found => println!("{}", resp.value),
        Action::Get => println!("(not found)"),
        Action::Set => println!("OK"),
        Action::Update | Action::Delete => println!("{}", resp.message),
    }
    Ok(())
}
