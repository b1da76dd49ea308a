use pursuit_core::{CoreError, NodeId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChaseError {
    #[error(transparent)]
    Config(#[from] CoreError),

    #[error("home node {0} is not in the navigation graph")]
    UnknownHome(NodeId),
}

pub type ChaseResult<T> = Result<T, ChaseError>;
