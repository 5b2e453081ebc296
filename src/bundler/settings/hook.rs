//! Post-build hook.

use crate::bundler::{Bundler, Verbosity};
use std::{fmt, sync::Arc};

/// Callback run once by the custom-hook stage.
///
/// Receives the running [`Bundler`] so it can inspect the build directory,
/// runtime and entry points. Its boolean return value is the stage result.
/// A panic inside the hook is not caught.
#[derive(Clone)]
pub struct PostBuildHook(Arc<dyn Fn(&Bundler) -> bool + Send + Sync>);

impl PostBuildHook {
    /// Wraps a closure.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&Bundler) -> bool + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Invokes the hook.
    pub fn call(&self, bundler: &Bundler) -> bool {
        (self.0)(bundler)
    }
}

impl Default for PostBuildHook {
    fn default() -> Self {
        Self::new(|bundler| {
            bundler.msg(Verbosity::Normal, "Nothing to do here.");
            true
        })
    }
}

impl fmt::Debug for PostBuildHook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PostBuildHook(<fn>)")
    }
}
