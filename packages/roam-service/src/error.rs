pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Provider error: {message}")]
	Provider { message: String },
	#[error("Invalid request: {message}")]
	InvalidRequest { message: String },
}
impl From<roam_providers::Error> for Error {
	fn from(err: roam_providers::Error) -> Self {
		match err {
			roam_providers::Error::InvalidConfig { message } => Self::InvalidRequest { message },
			other => Self::Provider { message: other.to_string() },
		}
	}
}
