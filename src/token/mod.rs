//! Token ledger modules.
pub mod erc721;
