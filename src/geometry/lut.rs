use std::sync::{Arc, Mutex, PoisonError};

use crate::math::Point2;

/// Memoized lookup table keyed by its step count.
///
/// Only the most recent table is kept; asking for a different step count
/// rebuilds it.
#[derive(Debug, Default)]
pub(crate) struct LutCache {
    table: Mutex<Option<(usize, Arc<[Point2]>)>>,
}

impl Clone for LutCache {
    fn clone(&self) -> Self {
        let table = self.table.lock().unwrap_or_else(PoisonError::into_inner).clone();
        Self {
            table: Mutex::new(table),
        }
    }
}

impl LutCache {
    pub(crate) fn get_or_build(
        &self,
        steps: usize,
        build: impl FnOnce() -> Vec<Point2>,
    ) -> Arc<[Point2]> {
        let mut guard = self.table.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some((cached_steps, table)) = guard.as_ref() {
            if *cached_steps == steps {
                return Arc::clone(table);
            }
        }
        let table: Arc<[Point2]> = build().into();
        *guard = Some((steps, Arc::clone(&table)));
        table
    }

    pub(crate) fn clear(&self) {
        *self.table.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rebuilds_only_on_new_step_count() {
        let cache = LutCache::default();
        let mut builds = 0;
        let a = cache.get_or_build(3, || {
            builds += 1;
            vec![Point2::origin(); 3]
        });
        let b = cache.get_or_build(3, || {
            builds += 1;
            Vec::new()
        });
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(builds, 1);

        let c = cache.get_or_build(5, || vec![Point2::origin(); 5]);
        assert_eq!(c.len(), 5);

        cache.clear();
        let d = cache.get_or_build(5, || vec![Point2::origin(); 5]);
        assert!(!Arc::ptr_eq(&c, &d));
    }
}
