use scry_domain::resource::Level;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	/// The catalog client could not be constructed at startup; every
	/// operation reports this until the configuration is fixed.
	#[error("Catalog client is unavailable: {message}")]
	UpstreamUnavailable { message: String },
	/// The requested level's own upstream call failed. Without the base data
	/// there is nothing to show, so this propagates with its cause.
	#[error("Failed to fetch {level} data from the catalog: {message}")]
	BaseListing { level: Level, message: String },
	#[error("Invalid request: {message}")]
	InvalidRequest { message: String },
}
