//! IP address literals, decorated with reverse and forward DNS.

use std::net::IpAddr;

use tracing::debug;

use crate::dns::Resolver;
use crate::types::{Guess, GuessValue};

/// A literal address is as unambiguous as input gets.
const GOODNESS: i32 = 200;

const NO_HOST_NAME: &str = "(address does not resolve to a host name)";
const NO_ADDRESSES: &str = "(which does not forward-resolve to anything)";

/// Guess for an IPv4 or IPv6 literal, or `None` if `token` is not one.
///
/// DNS failures never drop the guess; they are explained in its context
/// lines instead.
#[must_use]
pub fn guess_ip(token: &str, resolver: &dyn Resolver) -> Option<Guess> {
    let ip: IpAddr = token.parse().ok()?;
    debug!(%ip, "ip: matched address literal");

    let additional = match resolver.reverse(ip) {
        Ok(hosts) if !hosts.is_empty() => hosts
            .iter()
            .flat_map(|host| [format!("reverse lookup: {host}"), forward_line(host, resolver)])
            .collect(),
        Ok(_) => {
            debug!(%ip, "ip: reverse lookup returned no names");
            vec![NO_HOST_NAME.to_string()]
        }
        Err(e) => {
            debug!(%ip, error = %e, "ip: reverse lookup failed");
            vec![NO_HOST_NAME.to_string()]
        }
    };

    Some(
        Guess::new(format!("IP address {ip}"), "IP address", GOODNESS, GuessValue::Ip(ip))
            .with_additional(additional),
    )
}

fn forward_line(host: &str, resolver: &dyn Resolver) -> String {
    match resolver.forward(host) {
        Ok(addrs) if !addrs.is_empty() => format!(
            "which resolves to: {}",
            addrs
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        ),
        Ok(_) => {
            debug!(host, "ip: forward lookup returned no addresses");
            NO_ADDRESSES.to_string()
        }
        Err(e) => {
            debug!(host, error = %e, "ip: forward lookup gave nothing");
            NO_ADDRESSES.to_string()
        }
    }
}
