#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![cfg_attr(feature = "fail-on-warnings", deny(clippy::all))]

pub mod definition;
pub mod entry_record;
pub mod execution;
mod ledger;
pub mod line;
pub mod store;

pub use ledger::*;

pub mod primitives {
    pub use tally_types::primitives::*;
}

pub mod money {
    pub use tally_types::money::*;
}

pub use money::Money;
pub use primitives::*;
pub use tally_types::{entry::*, line::*};
