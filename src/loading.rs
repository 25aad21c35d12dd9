use std::future::Future;

use tokio::task::JoinSet;
use tracing::debug;

/// Counted barrier over pending model loads: resolves once every completion has
/// fired, in any order, and returns how many were joined.
pub fn all_loads_finished<F: Future<Output = ()> + Send + 'static>(
	loads: impl IntoIterator<Item = F>,
) -> impl Future<Output = usize> {
	let mut join_set = JoinSet::new();
	for load in loads {
		join_set.spawn(load);
	}
	async move {
		let mut finished = 0;
		while let Some(result) = join_set.join_next().await {
			result.unwrap();
			finished += 1;
			debug!(finished, "model load finished");
		}
		finished
	}
}
