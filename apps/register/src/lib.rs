//! # Kirana Register Library
//!
//! Core library for the headless register application.
//!
//! ## Module Organization
//! ```text
//! kirana_register/
//! ├── lib.rs          ◄─── You are here (module exports)
//! ├── session.rs      ◄─── Register: the cashier command surface
//! ├── state.rs        ◄─── Shared state: transaction + busy flag
//! ├── error.rs        ◄─── RegisterError (serializable, coded)
//! └── main.rs         ◄─── Terminal harness + tracing setup
//! ```
//!
//! ## Wiring
//! The catalog is injected into [`session::Register`] at construction —
//! there is no global registry or process-wide hook bridging components.
//! A front-end owns a `Register` and calls its methods; that is the whole
//! integration surface.

pub mod error;
pub mod session;
pub mod state;

pub use error::{ErrorCode, RegisterError};
pub use session::{LineItemView, ReceiptView, Register};
pub use state::{BusyFlag, BusyGuard, TransactionState};
