use futures::future::join_all;
use std::collections::{HashMap, HashSet};
use std::fmt::Debug;
use std::future::Future;
use std::hash::Hash;

use crate::database::StoreError;

/// Look up each distinct id concurrently and wait for all of them.
///
/// One future runs per distinct id, so a page referencing the same parent
/// twenty times issues one lookup. Each result lands in the slot of its id;
/// failed lookups are logged and left out of the map. The futures are owned
/// by the caller, so dropping the caller cancels every outstanding lookup.
pub async fn fan_out<I, K, V, F, Fut>(ids: I, what: &str, lookup: F) -> HashMap<K, V>
where
    I: IntoIterator<Item = K>,
    K: Copy + Eq + Hash + Debug,
    F: Fn(K) -> Fut,
    Fut: Future<Output = Result<V, StoreError>>,
{
    let mut seen = HashSet::new();
    let distinct: Vec<K> = ids.into_iter().filter(|id| seen.insert(*id)).collect();
    if distinct.is_empty() {
        return HashMap::new();
    }

    tracing::debug!("Hydrating {} distinct {} ids", distinct.len(), what);
    let results = join_all(distinct.iter().map(|id| lookup(*id))).await;

    distinct
        .into_iter()
        .zip(results)
        .filter_map(|(id, result)| match result {
            Ok(value) => Some((id, value)),
            Err(e) => {
                tracing::warn!("Skipping {} {:?} during hydration: {}", what, id, e);
                None
            }
        })
        .collect()
}
