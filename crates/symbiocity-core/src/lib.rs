//! Virtual-time orchestration for the Symbiocity simulation.
//!
//! This crate ties the twin and city state containers together under a
//! single deterministic clock: a scheduler owns every timer, a step
//! function drains due tasks, and an async runner paces steps against
//! real time.
//!
//! # Modules
//!
//! - [`scheduler`] -- Virtual-time task queue with one-shot and
//!   periodic scheduling.
//! - [`tick`] -- [`SimulationState`] and the per-step task dispatch.
//! - [`runner`] -- Bounded async loop with a per-step callback.
//! - [`control`] -- Shared pause/stop/speed controls for the loop.
//! - [`config`] -- Configuration loading from `symbiocity-config.yaml`
//!   into strongly-typed structs.
//!
//! [`SimulationState`]: tick::SimulationState

pub mod config;
pub mod control;
pub mod runner;
pub mod scheduler;
pub mod tick;
