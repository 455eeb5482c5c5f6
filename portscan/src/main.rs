#![deny(warnings, rust_2018_idioms)]
#![forbid(unsafe_code)]

mod args;
mod scan;

use clap::Parser;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    args::Args::parse().run().await
}
