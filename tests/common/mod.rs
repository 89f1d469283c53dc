#![allow(dead_code, unused_imports)]
//! Shared test utilities for integration tests.
//!
//! # Modules
//!
//! - `fixtures`: hand-assembled class files and JAR archives in temp dirs
//! - `mocks`: in-memory remote directory, fixed scanner and scripted prompt

pub mod fixtures;
pub mod mocks;

pub use fixtures::{class_bytes, simulation_jar, write_jar, JAVA_SIMULATION};
pub use mocks::{Call, FakeDirectory, FakeScanner, ScriptedPrompt};
