use crate::trade::Status;

#[derive(thiserror::Error, Debug)]
pub enum AccountError {
    #[error("handle '{0}' is already registered")]
    HandleTaken(String),
    #[error("no account registered for '{0}'")]
    UnknownUser(String),
    #[error("handle must not be empty")]
    EmptyHandle,
    #[error("password must not be empty")]
    EmptyPassword,
    #[error("credentials rejected")]
    BadCredentials,
    #[error("pack '{0}' is not in the catalog")]
    UnknownPack(String),
    #[error("pack '{0}' is not held in the inventory")]
    PackNotHeld(String),
    #[error("pack costs {cost} coins but only {held} are held")]
    InsufficientCoins { cost: u64, held: u64 },
}

#[derive(thiserror::Error, Debug)]
pub enum TradeError {
    #[error("no trade with id {0}")]
    UnknownTrade(u64),
    #[error("trade is {0}, no longer open")]
    NotOpen(Status),
    #[error("'{0}' may not respond in the current phase")]
    NotYourTurn(String),
    #[error("a trade cannot be opened with yourself")]
    SelfTrade,
    #[error("'{owner}' no longer holds '{item}'")]
    ItemMissing { owner: String, item: String },
}

#[derive(thiserror::Error, Debug)]
pub enum AuthError {
    #[error("token is malformed")]
    Malformed,
    #[error("token signature rejected")]
    BadSignature,
    #[error("token expired")]
    Expired,
}
