//! Microcontroller exposing AM2320, DS18x20 and light sensor readings over a serial line.
//!
//! Each reading is requested with a bare ASCII command and answered with a single decimal number.

pub mod command;
pub mod parser;
pub mod poller;
pub mod reading;
pub mod validator;
