#![deny(warnings, rust_2018_idioms)]
#![forbid(unsafe_code)]

mod cidr;
mod classify;
mod outcome;

pub use self::{
    cidr::addresses,
    classify::{classify, PortState, Signature, SIGNATURES},
    outcome::{Outcome, Target, Verdict},
};
pub use ipnet::Ipv4Net;
