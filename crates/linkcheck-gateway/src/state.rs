use std::sync::Arc;

use linkcheck_service::LinkChecker;

#[derive(Clone)]
pub struct AppState {
    checker: Arc<dyn LinkChecker>,
}

impl AppState {
    pub fn new(checker: Arc<dyn LinkChecker>) -> Self {
        Self { checker }
    }

    pub fn checker(&self) -> &dyn LinkChecker {
        self.checker.as_ref()
    }
}
