//! Passlock environment configuration.
//!
//! This crate provides static, per-environment configuration for the wallet
//! SDK:
//!
//! - [`WalletConfig`] -- gateway endpoint, relying party, and timing knobs
//!   for a given environment
//! - [`RelyingParty`] -- the WebAuthn relying-party identity ceremonies are
//!   scoped to
//! - [`Environment`] -- which deployment the wallet talks to
//!
//! All data is compile-time constant (`&'static str` and a few scalars).
//! Zero heap allocations. Types are `Copy`.
//!
//! `config` has no dependencies, so it can be used freely as a leaf crate.

// ---------------------------------------------------------------------------
// Environment
// ---------------------------------------------------------------------------

/// Deployment environment the wallet operates against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Environment {
    /// Production gateway.
    Mainnet,
    /// Public test gateway. Sessions and accounts are wiped periodically.
    Testnet,
    /// Gateway running on localhost, for development and integration tests.
    Local,
}

// ---------------------------------------------------------------------------
// RelyingParty
// ---------------------------------------------------------------------------

/// WebAuthn relying-party identity.
///
/// The `id` must be a registrable domain suffix of the origin the ceremony
/// runs on; authenticators bind credentials to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelyingParty {
    /// Relying-party identifier (a domain, no scheme).
    pub id: &'static str,
    /// Human-readable service name shown by the authenticator UI.
    pub name: &'static str,
}

// ---------------------------------------------------------------------------
// WalletConfig
// ---------------------------------------------------------------------------

/// Environment-specific wallet configuration.
///
/// This is `Copy` -- pointers to static data and a few scalars. Timing is
/// expressed in the units the consuming layer needs: the ceremony bound in
/// seconds, the session lifetime in milliseconds (epoch arithmetic).
#[derive(Debug, Clone, Copy)]
pub struct WalletConfig {
    /// The environment this configuration is for.
    pub environment: Environment,

    /// Base URL of the challenge gateway, without a trailing slash.
    pub gateway_url: &'static str,

    /// Relying-party identity ceremonies are scoped to.
    pub rp: RelyingParty,

    /// Upper bound on a single credential ceremony, in seconds.
    ///
    /// Matches the gateway's challenge-validity window: a ceremony that
    /// outlives it would be rejected server-side anyway, so the wallet
    /// fails it locally first. `0` disables the bound.
    pub ceremony_timeout_secs: u64,

    /// Session lifetime in milliseconds. `0` means sessions never expire.
    pub session_ttl_ms: u64,
}

impl WalletConfig {
    /// Get the configuration for a specific environment.
    pub const fn for_environment(environment: Environment) -> Self {
        match environment {
            Environment::Mainnet => Self::MAINNET,
            Environment::Testnet => Self::TESTNET,
            Environment::Local => Self::LOCAL,
        }
    }

    /// Returns the ceremony bound, or `None` when disabled.
    pub const fn ceremony_timeout_secs(&self) -> Option<u64> {
        if self.ceremony_timeout_secs == 0 {
            None
        } else {
            Some(self.ceremony_timeout_secs)
        }
    }

    /// Returns true when sessions produced under this config never expire.
    pub const fn sessions_never_expire(&self) -> bool {
        self.session_ttl_ms == 0
    }

    // -----------------------------------------------------------------------
    // Built-in environment configurations
    // -----------------------------------------------------------------------

    /// Production configuration.
    pub const MAINNET: Self = Self {
        environment: Environment::Mainnet,
        gateway_url: "https://authn.passlock.dev",
        rp: RelyingParty {
            id: "passlock.dev",
            name: "Passlock Wallet",
        },
        ceremony_timeout_secs: 120,
        session_ttl_ms: 24 * 60 * 60 * 1000,
    };

    /// Public testnet configuration.
    pub const TESTNET: Self = Self {
        environment: Environment::Testnet,
        gateway_url: "https://authn.testnet.passlock.dev",
        rp: RelyingParty {
            id: "testnet.passlock.dev",
            name: "Passlock Wallet (testnet)",
        },
        ceremony_timeout_secs: 120,
        session_ttl_ms: 24 * 60 * 60 * 1000,
    };

    /// Local development configuration.
    ///
    /// Points at a gateway on localhost and never expires sessions, so
    /// integration runs are not cut short by the clock.
    pub const LOCAL: Self = Self {
        environment: Environment::Local,
        gateway_url: "http://localhost:3000",
        rp: RelyingParty {
            id: "localhost",
            name: "Passlock Wallet (dev)",
        },
        ceremony_timeout_secs: 120,
        session_ttl_ms: 0,
    };
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mainnet_config() {
        let config = WalletConfig::for_environment(Environment::Mainnet);
        assert_eq!(config.gateway_url, "https://authn.passlock.dev");
        assert_eq!(config.rp.id, "passlock.dev");
        assert_eq!(config.ceremony_timeout_secs(), Some(120));
        assert!(!config.sessions_never_expire());
    }

    #[test]
    fn remote_gateways_are_https() {
        for environment in [Environment::Mainnet, Environment::Testnet] {
            let config = WalletConfig::for_environment(environment);
            assert!(
                config.gateway_url.starts_with("https://"),
                "{:?} gateway should use HTTPS",
                environment
            );
        }
    }

    #[test]
    fn gateway_urls_have_no_trailing_slash() {
        for environment in [
            Environment::Mainnet,
            Environment::Testnet,
            Environment::Local,
        ] {
            let config = WalletConfig::for_environment(environment);
            assert!(
                !config.gateway_url.ends_with('/'),
                "{:?} gateway URL should not end with a slash",
                environment
            );
        }
    }

    #[test]
    fn rp_ids_carry_no_scheme() {
        for environment in [
            Environment::Mainnet,
            Environment::Testnet,
            Environment::Local,
        ] {
            let config = WalletConfig::for_environment(environment);
            assert!(!config.rp.id.contains("://"));
        }
    }

    #[test]
    fn local_sessions_never_expire() {
        let config = WalletConfig::LOCAL;
        assert_eq!(config.session_ttl_ms, 0);
        assert!(config.sessions_never_expire());
    }

    #[test]
    fn zero_timeout_disables_the_bound() {
        let mut config = WalletConfig::LOCAL;
        config.ceremony_timeout_secs = 0;
        assert_eq!(config.ceremony_timeout_secs(), None);
    }

    #[test]
    fn configs_are_copy() {
        let a = WalletConfig::MAINNET;
        let b = a;
        assert_eq!(a.gateway_url, b.gateway_url);
    }

    #[test]
    fn const_fn_works_at_compile_time() {
        const CONFIG: WalletConfig = WalletConfig::for_environment(Environment::Local);
        assert_eq!(CONFIG.environment, Environment::Local);
    }
}
