//! `farmstallctl`: manage a Farmstall shop from the terminal.
#![allow(missing_docs)]

pub mod cli;
