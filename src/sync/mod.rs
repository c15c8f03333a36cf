// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! The reconciliation engine: change detection, endpoint resolution, apply,
//! restart, retry and status assembly.

pub mod digest;
pub mod interval;
pub mod reconcile;
pub mod resolver;
pub mod restart;
pub mod retry;
pub mod secrets;
pub mod status;

pub use reconcile::{reconcile_request, PassResult, ReconcileReport};
pub use secrets::SyncOutcome;
pub use status::Stage;
