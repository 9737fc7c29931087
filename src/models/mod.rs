//! Insightly API model types.

mod common;
mod contact;
mod instance;
mod opportunity;
mod pipeline_stage;
mod team_member;

pub use common::*;
pub use contact::*;
pub use instance::*;
pub use opportunity::*;
pub use pipeline_stage::*;
pub use team_member::*;
