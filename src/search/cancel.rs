use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Advisory stop flag shared between a search and whoever started it.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self { Self::default() }

    pub fn cancel(&self) { self.0.store(true, Ordering::Relaxed); }

    pub fn is_cancelled(&self) -> bool { self.0.load(Ordering::Relaxed) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_flag() {
        let t = CancelToken::new();
        let other = t.clone();
        assert!(!other.is_cancelled());
        t.cancel();
        assert!(other.is_cancelled());
    }
}
