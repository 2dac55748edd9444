//! Import triggering and job dispatch
//!
//! - [`kind`] - import type labels resolved to [`ImportKind`]
//! - [`dispatcher`] - payload storage, job creation and enqueueing
//! - [`controller`] - checks, routing and checkpoint commit

pub mod controller;
pub mod dispatcher;
pub mod kind;

pub use controller::{find_id_field, ImportController, ImportOutcome};
pub use dispatcher::{DispatchRequest, ImportDispatcher};
pub use kind::ImportKind;
