pub mod derive;
pub mod detail;
pub mod list;

mod error;

pub use error::{Error, Result};

use std::{future::Future, pin::Pin, sync::Arc};

use scry_catalog::HttpCatalog;
use scry_config::Config;
use scry_domain::resource::Resource;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Read-only view of the upstream catalog. Every operation is fallible and
/// bounded by `max_results`; implementations must not cache across calls.
pub trait Catalog
where
	Self: Send + Sync,
{
	fn list_memories<'a>(
		&'a self,
		max_results: u32,
	) -> BoxFuture<'a, color_eyre::Result<Vec<Resource>>>;

	fn list_actors<'a>(
		&'a self,
		memory_id: &'a str,
		max_results: u32,
	) -> BoxFuture<'a, color_eyre::Result<Vec<Resource>>>;

	fn list_sessions<'a>(
		&'a self,
		memory_id: &'a str,
		actor_id: &'a str,
		max_results: u32,
	) -> BoxFuture<'a, color_eyre::Result<Vec<Resource>>>;

	fn list_events<'a>(
		&'a self,
		memory_id: &'a str,
		actor_id: &'a str,
		session_id: &'a str,
		include_payloads: bool,
		max_results: u32,
	) -> BoxFuture<'a, color_eyre::Result<Vec<Resource>>>;

	fn get_memory<'a>(
		&'a self,
		memory_id: &'a str,
	) -> BoxFuture<'a, color_eyre::Result<Resource>>;

	fn get_event<'a>(
		&'a self,
		memory_id: &'a str,
		actor_id: &'a str,
		session_id: &'a str,
		event_id: &'a str,
	) -> BoxFuture<'a, color_eyre::Result<Resource>>;
}

impl Catalog for HttpCatalog {
	fn list_memories<'a>(
		&'a self,
		max_results: u32,
	) -> BoxFuture<'a, color_eyre::Result<Vec<Resource>>> {
		Box::pin(HttpCatalog::list_memories(self, max_results))
	}

	fn list_actors<'a>(
		&'a self,
		memory_id: &'a str,
		max_results: u32,
	) -> BoxFuture<'a, color_eyre::Result<Vec<Resource>>> {
		Box::pin(HttpCatalog::list_actors(self, memory_id, max_results))
	}

	fn list_sessions<'a>(
		&'a self,
		memory_id: &'a str,
		actor_id: &'a str,
		max_results: u32,
	) -> BoxFuture<'a, color_eyre::Result<Vec<Resource>>> {
		Box::pin(HttpCatalog::list_sessions(self, memory_id, actor_id, max_results))
	}

	fn list_events<'a>(
		&'a self,
		memory_id: &'a str,
		actor_id: &'a str,
		session_id: &'a str,
		include_payloads: bool,
		max_results: u32,
	) -> BoxFuture<'a, color_eyre::Result<Vec<Resource>>> {
		Box::pin(HttpCatalog::list_events(
			self,
			memory_id,
			actor_id,
			session_id,
			include_payloads,
			max_results,
		))
	}

	fn get_memory<'a>(
		&'a self,
		memory_id: &'a str,
	) -> BoxFuture<'a, color_eyre::Result<Resource>> {
		Box::pin(HttpCatalog::get_memory(self, memory_id))
	}

	fn get_event<'a>(
		&'a self,
		memory_id: &'a str,
		actor_id: &'a str,
		session_id: &'a str,
		event_id: &'a str,
	) -> BoxFuture<'a, color_eyre::Result<Resource>> {
		Box::pin(HttpCatalog::get_event(self, memory_id, actor_id, session_id, event_id))
	}
}

enum CatalogState {
	Ready(Arc<dyn Catalog>),
	Unavailable { message: String },
}

pub struct ScryService {
	pub cfg: Config,
	catalog: CatalogState,
}
impl ScryService {
	/// Builds the HTTP catalog once at startup. A construction failure (e.g.
	/// missing credentials) leaves the service running in a degraded state
	/// where every operation reports [`Error::UpstreamUnavailable`].
	pub fn new(cfg: Config) -> Self {
		let catalog = match HttpCatalog::new(&cfg.upstream) {
			Ok(catalog) => CatalogState::Ready(Arc::new(catalog)),
			Err(err) => {
				tracing::warn!(error = %err, "Catalog client is unavailable.");

				CatalogState::Unavailable { message: err.to_string() }
			},
		};

		Self { cfg, catalog }
	}

	pub fn with_catalog(cfg: Config, catalog: Arc<dyn Catalog>) -> Self {
		Self { cfg, catalog: CatalogState::Ready(catalog) }
	}

	pub fn catalog_ready(&self) -> bool {
		matches!(self.catalog, CatalogState::Ready(_))
	}

	pub(crate) fn catalog(&self) -> Result<&Arc<dyn Catalog>> {
		match &self.catalog {
			CatalogState::Ready(catalog) => Ok(catalog),
			CatalogState::Unavailable { message } =>
				Err(Error::UpstreamUnavailable { message: message.clone() }),
		}
	}

	pub(crate) fn page_size(&self, requested: Option<u32>) -> u32 {
		requested.unwrap_or(self.cfg.view.page_size).clamp(1, self.cfg.view.max_page_size)
	}

	pub(crate) fn event_page_size(&self, requested: Option<u32>) -> u32 {
		requested.unwrap_or(self.cfg.view.event_page_size).clamp(1, self.cfg.view.max_page_size)
	}
}

pub(crate) fn required<'a>(value: &'a str, name: &str) -> Result<&'a str> {
	let trimmed = value.trim();

	if trimmed.is_empty() {
		return Err(Error::InvalidRequest { message: format!("{name} is required.") });
	}

	Ok(trimmed)
}
