//! Extensions to the ERC-721 ledger.
pub mod metadata;
pub use metadata::{Erc721Metadata, IErc721Metadata};
