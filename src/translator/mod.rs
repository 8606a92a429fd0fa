// SIGNCAST Translator Modules
// Copyright (c) 2026 SIGNCAST

pub mod resolver;
pub mod spelling;
pub mod synthesizer;
pub mod vocabulary;
