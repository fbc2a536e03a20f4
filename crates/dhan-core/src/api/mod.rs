//! Endpoint callers, one module per API area. Each adds methods to
//! [`DhanClient`](crate::DhanClient).

mod charts;
mod consent;
mod margin;
mod market;
mod option_chain;
mod orders;
mod portfolio;
mod profile;
