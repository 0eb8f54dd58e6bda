//! Pre-arm flight authorization from signed tokens.
//!
//! A vehicle may only arm when the token on its filesystem carries a valid
//! signature from the trusted key baked into firmware, names the trusted
//! issuer, and is inside its validity window according to a trusted clock.
//!
//! ```no_run
//! use trusted_flight::{
//!     LocalFilesystem, RomFs, SystemClock, TrustedFlight, TrustedFlightConfig,
//! };
//!
//! # let romfs = RomFs::new();
//! let pre_arm = TrustedFlight::new(
//!     TrustedFlightConfig::default(),
//!     romfs,
//!     LocalFilesystem::new("/APM"),
//!     SystemClock,
//! );
//! pre_arm.init()?;
//!
//! let (armable, reason) = pre_arm.is_trusted();
//! println!("{armable}: {reason}");
//! # Ok::<(), trusted_flight::Error>(())
//! ```

mod error;

// Internal modules
pub(crate) mod claims;
pub(crate) mod document;
pub(crate) mod header;
pub(crate) mod limits;
pub(crate) mod logger;
pub(crate) mod token;
pub(crate) mod utils;
pub(crate) mod validator;

// Components
pub(crate) mod algorithm;
pub(crate) mod clock;
pub(crate) mod filesystem;
pub(crate) mod key;
pub(crate) mod outcome;
pub(crate) mod romfs;
pub(crate) mod trusted_flight;

// Public Interface
pub use algorithm::{AlgorithmType, SignatureVerifier};
pub use claims::ClaimsValidation;
pub use clock::{Clock, SystemClock};
pub use error::{Error, Result};
pub use filesystem::{Filesystem, LocalFilesystem};
pub use key::parse_public_key;
pub use logger::{EventLog, TracingEventLog};
pub use outcome::ValidationResult;
pub use romfs::{FirmwareStorage, RomFs};
pub use trusted_flight::{Registry, TrustedFlight, TrustedFlightConfig};
pub use utils::{Alphabet, decode as decode_base64, encode as encode_base64};
pub use validator::TokenValidator;
