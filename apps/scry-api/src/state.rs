use std::sync::Arc;

use scry_service::ScryService;

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<ScryService>,
}
impl AppState {
	pub fn new(config: scry_config::Config) -> Self {
		Self { service: Arc::new(ScryService::new(config)) }
	}

	pub fn with_service(service: ScryService) -> Self {
		Self { service: Arc::new(service) }
	}
}
