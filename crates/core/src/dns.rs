//! DNS lookups used to decorate IP address guesses.
//!
//! Lookups never fail a guess: every error becomes an explanatory line in
//! the IP guesser. [`SystemResolver`] bounds each blocking call with a
//! timeout so a stalled reverse lookup cannot hang the whole run.

use std::io;
use std::net::IpAddr;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, trace};

/// Default per-lookup timeout of [`SystemResolver`].
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(2);

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("no record")]
    NoRecord,

    #[error("lookup timed out after {0:?}")]
    Timeout(Duration),

    #[error("lookup failed: {0}")]
    Failed(String),
}

/// Reverse and forward name resolution.
pub trait Resolver {
    /// Host names pointing back at `ip`.
    fn reverse(&self, ip: IpAddr) -> Result<Vec<String>, LookupError>;

    /// Addresses `host` resolves to.
    fn forward(&self, host: &str) -> Result<Vec<IpAddr>, LookupError>;
}

/// Resolver backed by the operating system (`getnameinfo`/`getaddrinfo`).
#[derive(Debug, Clone, Copy)]
pub struct SystemResolver {
    timeout: Duration,
}

impl SystemResolver {
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Run a blocking lookup on a helper thread and give up after the timeout.
    ///
    /// A timed out thread is left to finish on its own; its result is dropped.
    fn bounded<T, F>(&self, what: &str, lookup: F) -> Result<T, LookupError>
    where
        T: Send + 'static,
        F: FnOnce() -> io::Result<T> + Send + 'static,
    {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let _ = tx.send(lookup());
        });
        match rx.recv_timeout(self.timeout) {
            Ok(Ok(found)) => Ok(found),
            Ok(Err(e)) => {
                trace!(what, error = %e, "dns: lookup failed");
                Err(LookupError::Failed(e.to_string()))
            }
            Err(RecvTimeoutError::Timeout) => {
                debug!(what, timeout = ?self.timeout, "dns: lookup timed out");
                Err(LookupError::Timeout(self.timeout))
            }
            Err(RecvTimeoutError::Disconnected) => {
                Err(LookupError::Failed("resolver thread exited".to_string()))
            }
        }
    }
}

impl Default for SystemResolver {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT)
    }
}

impl Resolver for SystemResolver {
    fn reverse(&self, ip: IpAddr) -> Result<Vec<String>, LookupError> {
        let host = self.bounded("reverse", move || dns_lookup::lookup_addr(&ip))?;
        // getnameinfo hands back the numeric form when there is no PTR record.
        if host.is_empty() || host.parse::<IpAddr>().is_ok() {
            return Err(LookupError::NoRecord);
        }
        Ok(vec![host])
    }

    fn forward(&self, host: &str) -> Result<Vec<IpAddr>, LookupError> {
        let owned = host.to_string();
        let mut addrs = self.bounded("forward", move || dns_lookup::lookup_host(&owned))?;
        // One entry per socket type comes back; keep the first of each.
        let mut seen = Vec::with_capacity(addrs.len());
        addrs.retain(|a| {
            if seen.contains(a) {
                false
            } else {
                seen.push(*a);
                true
            }
        });
        if addrs.is_empty() {
            return Err(LookupError::NoRecord);
        }
        Ok(addrs)
    }
}

/// Resolver that knows nothing. Used offline and in tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoResolver;

impl Resolver for NoResolver {
    fn reverse(&self, _ip: IpAddr) -> Result<Vec<String>, LookupError> {
        Err(LookupError::NoRecord)
    }

    fn forward(&self, _host: &str) -> Result<Vec<IpAddr>, LookupError> {
        Err(LookupError::NoRecord)
    }
}
