//! Optional metadata of the ERC-721 standard.
//!
//! Stores the collection name and symbol and a base URI, and renders a
//! per-token URI as the base followed by the decimal token id. The URI is a
//! pure template: it is computable for any id, minted or not.
use alloc::{
    string::{String, ToString},
    vec,
    vec::Vec,
};

use alloy_primitives::U256;
use stylus_sdk::{prelude::*, storage::StorageString};

/// Metadata of an [`crate::token::erc721::Erc721`] token.
#[storage]
pub struct Erc721Metadata {
    /// Token name.
    #[allow(clippy::used_underscore_binding)]
    pub _name: StorageString,
    /// Token symbol.
    #[allow(clippy::used_underscore_binding)]
    pub _symbol: StorageString,
    /// Base URI for tokens.
    #[allow(clippy::used_underscore_binding)]
    pub _base_uri: StorageString,
}

/// Interface for the optional metadata functions from the ERC-721 standard.
pub trait IErc721Metadata {
    /// Returns the token collection name.
    fn name(&self) -> String;

    /// Returns the token collection symbol.
    fn symbol(&self) -> String;

    /// Returns the base of Uniform Resource Identifier (URI) for the tokens'
    /// collection.
    fn base_uri(&self) -> String;

    /// Returns the Uniform Resource Identifier (URI) for `token_id`: the
    /// base URI followed by the decimal rendering of the id.
    ///
    /// Does not check that `token_id` has been minted.
    fn token_uri(&self, token_id: U256) -> String;
}

#[public]
#[implements(IErc721Metadata)]
impl Erc721Metadata {
    /// Constructor.
    #[constructor]
    pub fn constructor(
        &mut self,
        name: String,
        symbol: String,
        base_uri: String,
    ) {
        self._name.set_str(name);
        self._symbol.set_str(symbol);
        self._base_uri.set_str(base_uri);
    }
}

#[public]
impl IErc721Metadata for Erc721Metadata {
    fn name(&self) -> String {
        self._name.get_string()
    }

    fn symbol(&self) -> String {
        self._symbol.get_string()
    }

    fn base_uri(&self) -> String {
        self._base_uri.get_string()
    }

    fn token_uri(&self, token_id: U256) -> String {
        let mut uri = self.base_uri();
        uri.push_str(&token_id.to_string());
        uri
    }
}

impl Erc721Metadata {
    /// Overwrites the base URI. Internal function without access
    /// restriction.
    pub fn _set_base_uri(&mut self, base_uri: String) {
        self._base_uri.set_str(base_uri);
    }
}
