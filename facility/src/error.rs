use thiserror::Error;

#[derive(Debug, Error)]
pub enum FacilityError {
    #[error("governance error: {0}")]
    Governance(#[from] agora_governance::GovernanceError),

    #[error("exchange error: {0}")]
    Exchange(#[from] agora_exchange::ExchangeError),

    #[error("invalid value: {0}")]
    Types(#[from] agora_types::TypesError),

    #[error("config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
