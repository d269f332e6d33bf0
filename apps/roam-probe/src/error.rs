pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error(transparent)]
	Config(#[from] roam_config::Error),
	#[error(transparent)]
	Service(#[from] roam_service::Error),
	#[error(transparent)]
	SerdeJson(#[from] serde_json::Error),
}
