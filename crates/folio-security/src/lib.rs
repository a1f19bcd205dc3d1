//! # Folio Security
//!
//! Signed download links: token minting and verification, clocks, redemption ledger.

pub mod clock;
pub mod ledger;
pub mod link_token;

pub use clock::{Clock, ManualClock, SystemClock};
pub use ledger::RedemptionLedger;
pub use link_token::{IssuedToken, LinkClaims, LinkTokenService, TokenError, VerifiedLink};
