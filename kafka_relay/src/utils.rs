use std::future::Future;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Returns the value stored in `holder`, creating it with `create` on first use.
/// A failed creation leaves the holder empty so the next caller tries again.
pub async fn get_or_create<T, E, F, Fut>(
    holder: &RwLock<Option<Arc<T>>>,
    create: F,
) -> Result<Arc<T>, E>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    if let Some(value) = holder.read().await.as_ref() {
        return Ok(value.clone());
    }
    let mut guard = holder.write().await;

    if let Some(value) = guard.as_ref() {
        return Ok(value.clone());
    }

    let value = Arc::new(create().await?);
    *guard = Some(value.clone());

    Ok(value)
}
