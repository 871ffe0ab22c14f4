#![deny(missing_docs)]

//! # dgfip-core -- Reconciliation and Disclosure Engine
//!
//! This crate holds the logic that decides what a relying service may read
//! from a citizen's tax record. It has no HTTP or FranceConnect dependency:
//! the record store is reached through the [`RecordStore`] trait and the
//! caller supplies the scopes and identity it obtained from a checked token.
//!
//! ## Pipeline
//!
//! ```text
//! scopes ──► is_authorized ──┐
//!                            ├──► filter ──► format ──► JSON body
//! identity ──► reconcile ────┘
//! ```
//!
//! [`DataBroker`] runs the four steps once per request. Authorization and
//! reconciliation are independent; projection needs both.
//!
//! ## Design Principles
//!
//! 1. **Default deny.** A field leaves the engine only if a granted scope
//!    maps to it in [`SCOPE_TO_FIELDS`].
//! 2. **One record or none.** Zero and multiple store matches are the same
//!    outcome for the caller.
//! 3. **Failure is not absence.** A store error surfaces as [`StoreError`],
//!    never as a missing record.
//! 4. **Static tables.** [`SCOPE_TO_FIELDS`] and [`PUBLIC_LABELS`] are
//!    `const` data; nothing writes to them at runtime.

pub mod broker;
pub mod error;
pub mod format;
pub mod identity;
pub mod normalize;
pub mod reconcile;
pub mod record;
pub mod scope;
pub mod store;

pub use broker::{DataBroker, Disclosure};
pub use error::StoreError;
pub use format::{format, set_at_path, PUBLIC_LABELS};
pub use identity::{FederatedIdentity, Gender, ReconciliationCriteria, Title};
pub use normalize::{first_given_name, normalize};
pub use reconcile::reconcile;
pub use record::InternalRecord;
pub use scope::{allowed_fields, filter, is_authorized, ScopeSet, SCOPE_TO_FIELDS};
pub use store::RecordStore;
