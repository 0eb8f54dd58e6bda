//! Pre-arm trust check
//!
//! [`TrustedFlight`] ties the validator to the vehicle: the trust anchor is
//! loaded once from firmware storage, and every arming attempt reads the
//! candidate token from the filesystem and the current time from the clock.

use crate::algorithm::{AlgorithmType, SignatureVerifier};
use crate::claims::ClaimsValidation;
use crate::clock::Clock;
use crate::error::{Error, Result};
use crate::filesystem::Filesystem;
use crate::key::parse_public_key;
use crate::logger::{EventLog, TracingEventLog, truncate_message};
use crate::outcome::ValidationResult;
use crate::romfs::FirmwareStorage;
use crate::validator::TokenValidator;
use std::sync::{Arc, OnceLock};
use std::time::Instant;

const DEFAULT_PUBLIC_KEY_PATH: &str = "trusted_flight/key.pub";
const DEFAULT_ISSUER_PATH: &str = "trusted_flight/token_issuer";
const DEFAULT_TOKEN_PATH: &str = "trusted_flight/token";

const NOT_INITIALIZED: &str = "Initialization is not done yet";
const UNABLE_TO_READ_TOKEN: &str = "Unable to read token";
const CANNOT_ALLOCATE_TOKEN: &str = "Cannot allocate buffer for token";

/// Where the trust anchor and token live, and how tokens are checked
#[derive(Clone)]
pub struct TrustedFlightConfig {
    public_key_path: String,
    issuer_path: String,
    token_path: String,
    verifier: Arc<dyn SignatureVerifier>,
    claims: ClaimsValidation,
}

impl Default for TrustedFlightConfig {
    fn default() -> Self {
        Self {
            public_key_path: DEFAULT_PUBLIC_KEY_PATH.into(),
            issuer_path: DEFAULT_ISSUER_PATH.into(),
            token_path: DEFAULT_TOKEN_PATH.into(),
            verifier: Arc::new(AlgorithmType::EdDSA),
            claims: ClaimsValidation::default(),
        }
    }
}

impl TrustedFlightConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Firmware storage path of the trusted public key
    pub fn public_key_path(mut self, path: impl Into<String>) -> Self {
        self.public_key_path = path.into();
        self
    }

    /// Firmware storage path of the trusted issuer
    pub fn issuer_path(mut self, path: impl Into<String>) -> Self {
        self.issuer_path = path.into();
        self
    }

    /// Filesystem path of the candidate token
    pub fn token_path(mut self, path: impl Into<String>) -> Self {
        self.token_path = path.into();
        self
    }

    /// Signature scheme the deployment pins
    pub fn verifier(mut self, verifier: Arc<dyn SignatureVerifier>) -> Self {
        self.verifier = verifier;
        self
    }

    pub fn claims(mut self, claims: ClaimsValidation) -> Self {
        self.claims = claims;
        self
    }
}

impl std::fmt::Debug for TrustedFlightConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrustedFlightConfig")
            .field("public_key_path", &self.public_key_path)
            .field("issuer_path", &self.issuer_path)
            .field("token_path", &self.token_path)
            .field("algorithm", &self.verifier.algorithm())
            .field("claims", &self.claims)
            .finish()
    }
}

/// Decides whether the vehicle may arm
///
/// Call [`init`](Self::init) once at startup, then [`is_trusted`](Self::is_trusted)
/// on every arming attempt. Each attempt re-reads the token, so a token
/// uploaded after boot is picked up without a restart.
pub struct TrustedFlight {
    config: TrustedFlightConfig,
    storage: Box<dyn FirmwareStorage>,
    filesystem: Box<dyn Filesystem>,
    clock: Box<dyn Clock>,
    event_log: Box<dyn EventLog>,
    validator: OnceLock<TokenValidator>,
    started: Instant,
}

impl TrustedFlight {
    pub fn new(
        config: TrustedFlightConfig,
        storage: impl FirmwareStorage + 'static,
        filesystem: impl Filesystem + 'static,
        clock: impl Clock + 'static,
    ) -> Self {
        Self {
            config,
            storage: Box::new(storage),
            filesystem: Box::new(filesystem),
            clock: Box::new(clock),
            event_log: Box::new(TracingEventLog),
            validator: OnceLock::new(),
            started: Instant::now(),
        }
    }

    /// Replace the default `tracing` event sink
    pub fn with_event_log(mut self, event_log: impl EventLog + 'static) -> Self {
        self.event_log = Box::new(event_log);
        self
    }

    pub fn is_initialized(&self) -> bool {
        self.validator.get().is_some()
    }

    /// Load the trust anchor from firmware storage
    ///
    /// A failed init leaves the instance uninitialized and may be retried.
    /// Once it succeeds, further calls do nothing.
    pub fn init(&self) -> Result<()> {
        if self.is_initialized() {
            return Ok(());
        }

        let validator = self.load_trust_anchor()?;
        // A concurrent init loaded the same anchor; keep whichever landed first
        let _ = self.validator.set(validator);
        self.log("Trusted flight initialized");
        Ok(())
    }

    fn load_trust_anchor(&self) -> Result<TokenValidator> {
        self.config
            .claims
            .check()
            .inspect_err(|_| self.log("Invalid claims configuration"))?;

        let key_file = self
            .storage
            .load(&self.config.public_key_path)
            .inspect_err(|_| self.log("Failed to read public key file system"))?;
        let issuer_file = self
            .storage
            .load(&self.config.issuer_path)
            .inspect_err(|_| self.log("Failed to read token issuer file system"))?;

        let issuer = issuer_file.trim_ascii_end();
        if issuer.is_empty() {
            self.log("Token issuer is empty");
            return Err(Error::StorageCorrupt {
                path: self.config.issuer_path.clone(),
                reason: "empty issuer".into(),
            });
        }

        let public_key =
            parse_public_key(&key_file).inspect_err(|_| self.log("Failed to parse public key"))?;
        self.config
            .verifier
            .check_key(&public_key)
            .inspect_err(|_| self.log("Failed to parse public key"))?;

        Ok(TokenValidator::new(&public_key, issuer)
            .verifier(self.config.verifier.clone())
            .claims(self.config.claims.clone())
            .build())
    }

    /// Validate the token currently on the filesystem
    ///
    /// Errors cover the cases where no token could be examined at all;
    /// every examined token yields exactly one [`ValidationResult`].
    pub fn check(&self) -> Result<ValidationResult> {
        let Some(validator) = self.validator.get() else {
            self.log(NOT_INITIALIZED);
            return Err(Error::NotInitialized);
        };

        let now = self.current_time();
        let token = self.read_token()?;

        let outcome = validator.validate(&token, now);
        self.log(outcome.message());
        Ok(outcome)
    }

    /// Pre-arm check: whether the vehicle may arm, and why
    pub fn is_trusted(&self) -> (bool, String) {
        match self.check() {
            Ok(outcome) => (outcome.is_valid(), outcome.message().to_string()),
            Err(Error::NotInitialized) => (false, NOT_INITIALIZED.to_string()),
            Err(Error::AllocationFailed { .. }) => (false, CANNOT_ALLOCATE_TOKEN.to_string()),
            Err(_) => (false, UNABLE_TO_READ_TOKEN.to_string()),
        }
    }

    /// Current time in whole seconds, read once per attempt
    fn current_time(&self) -> Option<i64> {
        let Some(micros) = self.clock.utc_micros() else {
            self.log("RTC not available");
            return None;
        };
        let seconds = micros / 1_000_000;
        self.log(&format!("RTC is available. Current utc sec: {seconds}"));
        i64::try_from(seconds).ok()
    }

    fn read_token(&self) -> Result<Vec<u8>> {
        let mut token = self
            .filesystem
            .load_file(&self.config.token_path)
            .inspect_err(|error| match error {
                Error::AllocationFailed { .. } => self.log(CANNOT_ALLOCATE_TOKEN),
                _ => self.log("Failed to read token from file system"),
            })?;

        // Upload tools commonly leave a trailing newline
        let len = token.trim_ascii_end().len();
        token.truncate(len);
        Ok(token)
    }

    fn log(&self, message: &str) {
        let timestamp_us = u64::try_from(self.started.elapsed().as_micros()).unwrap_or(u64::MAX);
        self.event_log.write(truncate_message(message), timestamp_us);
    }
}

impl std::fmt::Debug for TrustedFlight {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrustedFlight")
            .field("config", &self.config)
            .field("validator", &self.validator.get())
            .finish_non_exhaustive()
    }
}

/// Process-wide home for the installed [`TrustedFlight`]
///
/// ```
/// use trusted_flight::Registry;
///
/// static TRUSTED_FLIGHT: Registry = Registry::new();
/// assert!(TRUSTED_FLIGHT.get().is_none());
/// ```
#[derive(Debug, Default)]
pub struct Registry {
    slot: OnceLock<TrustedFlight>,
}

impl Registry {
    pub const fn new() -> Self {
        Self {
            slot: OnceLock::new(),
        }
    }

    /// Install `trusted_flight`; only the first install succeeds
    pub fn install(&self, trusted_flight: TrustedFlight) -> Result<&TrustedFlight> {
        let mut installed = false;
        let instance = self.slot.get_or_init(|| {
            installed = true;
            trusted_flight
        });
        if installed {
            Ok(instance)
        } else {
            Err(Error::AlreadyInstalled)
        }
    }

    pub fn get(&self) -> Option<&TrustedFlight> {
        self.slot.get()
    }
}
