use async_trait::async_trait;

use crate::diagnostic::Diagnostic;
use crate::item::Collection;
use crate::settings::CollectionFilter;

/// Where timeline items come from.
///
/// Failures are returned as a [`Diagnostic`] value so callers always
/// discriminate success from failure by type.
#[async_trait(?Send)]
pub trait CollectionSource {
    async fn fetch_collection(
        &self,
        url: &str,
        filter: Option<&CollectionFilter>,
        cache: bool,
    ) -> Result<Collection, Diagnostic>;
}
