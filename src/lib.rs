//! wanderplan library
//!
//! The itinerary manager and its storage, export and front-end modules. The
//! binary wires them to the terminal; integration tests drive them directly.

pub mod activities;
pub mod app;
pub mod cli;
pub mod commands;
pub mod config;
pub mod data;
pub mod export;
pub mod form;
pub mod logging;
pub mod planner;
pub mod storage;
pub mod ui;
