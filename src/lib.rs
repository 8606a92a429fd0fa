// SIGNCAST Core Library
// Copyright (c) 2026 SIGNCAST

pub mod compositor;
pub mod config;
pub mod server;
pub mod state;
pub mod translator;
