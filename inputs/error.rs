use crate::Role;
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
	#[error("undefined method `{accessor}` for {type_name}")]
	UndefinedAccessor { accessor: String, type_name: String },
	#[error("no {role} method was given or detected for `{attribute}`")]
	UnresolvedAccessor { attribute: String, role: Role },
}
