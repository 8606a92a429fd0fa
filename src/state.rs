// SIGNCAST Shared Service State
// Copyright (c) 2026 SIGNCAST

use std::sync::Arc;

use crate::compositor::{self, TranslateOutcome};
use crate::config::ServiceConfig;
use crate::translator::resolver::TokenResolver;
use crate::translator::synthesizer::ClipLibrary;
use crate::translator::vocabulary::Vocabulary;

/// Everything a request needs, built once at startup. All of it is
/// read-only afterwards, so requests share it through `Arc` without
/// any locking.
pub struct ServiceState {
    pub config: ServiceConfig,
    pub vocabulary: Vocabulary,
    pub library: ClipLibrary,
}

pub type AppState = Arc<ServiceState>;

impl ServiceState {
    pub fn new(config: ServiceConfig) -> Self {
        let vocabulary = Vocabulary::load(&config.vocab_file);
        let library = ClipLibrary::scan(&config.clip_dir);
        Self {
            config,
            vocabulary,
            library,
        }
    }

    pub fn resolver(&self) -> TokenResolver<'_> {
        TokenResolver::new(&self.vocabulary, &self.library)
            .with_pause_clip(self.config.pause_clip_if_present())
            .with_zero_clip(self.config.zero_clip_if_present())
    }

    /// Run the full text-to-video pipeline with this state's collaborators.
    pub async fn translate(&self, text: &str) -> TranslateOutcome {
        let resolver = self.resolver();
        compositor::translate_to_video(&resolver, text, &self.config.output_dir).await
    }
}
