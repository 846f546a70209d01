// Core module - Command dispatch over an injected toolchain
pub mod dispatcher;
pub mod tools;
