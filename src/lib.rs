//! Capped, priced NFT drop contract for Arbitrum Stylus.
//!
//! [`NftDrop`] tracks ownership of a finite, incrementally minted set of
//! unique tokens and gates public minting behind a price and a supply cap.
//! Mint proceeds are forwarded to the administrator, who can also mint for
//! free, reprice the drop, rotate the metadata base URI, and withdraw any
//! funds held by the contract.
#![cfg_attr(not(any(test, feature = "export-abi")), no_main)]
extern crate alloc;

pub mod access;
pub mod token;

use alloc::{string::String, vec, vec::Vec};

use alloy_primitives::{uint, Address, U256, U64};
use stylus_sdk::{
    call::{call, Call},
    contract, evm, msg,
    prelude::*,
    storage::{StorageU256, StorageU64},
};

use crate::{
    access::ownable::{self, IOwnable, Ownable},
    token::erc721::{
        self,
        extensions::{Erc721Metadata, IErc721Metadata},
        Erc721, IErc721,
    },
};

pub use sol::*;
mod sol {
    use alloy_sol_types::sol;

    sol! {
        /// Emitted once at deployment with the drop configuration.
        #[derive(Debug)]
        #[allow(missing_docs)]
        event NftDropInitialized(uint256 max_supply, uint64 mint_price);

        /// Emitted when the administrator changes the mint price.
        #[derive(Debug)]
        #[allow(missing_docs)]
        event MintPriceUpdated(uint64 previous_price, uint64 new_price);

        /// Emitted when the administrator withdraws funds held by the
        /// contract.
        #[derive(Debug)]
        #[allow(missing_docs)]
        event Withdrawal(address indexed target, uint64 amount);
    }

    sol! {
        /// Every token of the drop has been minted.
        ///
        /// * `max_supply` - The supply cap of the drop.
        #[derive(Debug)]
        #[allow(missing_docs)]
        error NftDropSupplyExhausted(uint256 max_supply);
        /// The attached value does not cover the mint price.
        ///
        /// * `value` - Value attached to the call.
        /// * `price` - Current price of a mint.
        #[derive(Debug)]
        #[allow(missing_docs)]
        error NftDropInsufficientPayment(uint256 value, uint64 price);
        /// The contract balance does not cover the requested withdrawal.
        ///
        /// * `balance` - Current balance of the contract.
        /// * `requested` - Amount requested for withdrawal.
        #[derive(Debug)]
        #[allow(missing_docs)]
        error NftDropInsufficientFunds(uint256 balance, uint64 requested);
    }
}

/// An error that occurred in the [`NftDrop`] contract.
#[derive(SolidityError, Debug)]
pub enum Error {
    /// An error that occurred in the token ledger.
    Erc721(erc721::Error),
    /// An error that occurred in the access control component.
    Ownable(ownable::Error),
    /// Every token of the drop has been minted.
    SupplyExhausted(NftDropSupplyExhausted),
    /// The attached value does not cover the mint price.
    InsufficientPayment(NftDropInsufficientPayment),
    /// The contract balance does not cover the requested withdrawal.
    InsufficientFunds(NftDropInsufficientFunds),
    /// An outbound transfer of funds failed.
    TransferFailed(stylus_sdk::call::Error),
}

/// The drop contract: an ERC-721 ledger with collection metadata, a
/// single administrator, and a capped, priced public mint.
#[entrypoint]
#[storage]
struct NftDrop {
    erc721: Erc721,
    metadata: Erc721Metadata,
    ownable: Ownable,
    /// Total number of tokens that can ever be minted. Fixed at deployment.
    max_supply: StorageU256,
    /// Price of one public mint, in wei.
    mint_price: StorageU64,
    /// Number of tokens minted so far. Token ids are sequential starting at
    /// one, so this is also the id of the last minted token.
    minted: StorageU256,
}

#[public]
#[implements(IErc721<Error = Error>, IErc721Metadata, IOwnable<Error = Error>)]
impl NftDrop {
    /// Constructor.
    ///
    /// Records the deployer as the administrator and fixes the supply cap.
    ///
    /// # Errors
    ///
    /// * [`ownable::Error::InvalidOwner`] - If the sender is
    ///   `Address::ZERO`.
    ///
    /// # Events
    ///
    /// * [`ownable::OwnershipTransferred`].
    /// * [`NftDropInitialized`].
    #[constructor]
    pub fn constructor(
        &mut self,
        name: String,
        symbol: String,
        base_uri: String,
        max_supply: U256,
        mint_price: U64,
    ) -> Result<(), Error> {
        self.ownable.constructor(msg::sender())?;
        self.metadata.constructor(name, symbol, base_uri);
        self.max_supply.set(max_supply);
        self.mint_price.set(mint_price);

        evm::log(NftDropInitialized {
            max_supply,
            mint_price: mint_price.to::<u64>(),
        });
        Ok(())
    }

    /// Mints the next token of the drop to `to` against the attached
    /// payment. The entire attached value is forwarded to the administrator.
    ///
    /// The supply cap is checked before the payment, so an exhausted drop
    /// reports [`Error::SupplyExhausted`] regardless of the value attached.
    ///
    /// # Errors
    ///
    /// * [`Error::SupplyExhausted`] - If every token has been minted.
    /// * [`Error::InsufficientPayment`] - If the attached value is below the
    ///   mint price.
    /// * [`Error::Erc721`] - If `to` is `Address::ZERO`.
    /// * [`Error::TransferFailed`] - If forwarding the payment fails.
    ///
    /// # Events
    ///
    /// * [`erc721::Transfer`] with `from` set to `Address::ZERO`.
    #[payable]
    pub fn mint(&mut self, to: Address) -> Result<(), Error> {
        self._require_supply()?;

        let price = self.mint_price.get();
        let value = msg::value();
        if value < U256::from(price) {
            return Err(Error::InsufficientPayment(
                NftDropInsufficientPayment { value, price: price.to::<u64>() },
            ));
        }

        self._mint_sequential(to)?;

        // All storage writes are done; only now does value leave the call.
        let admin = self.ownable.owner();
        call(Call::new_in(self).value(value), admin, &[])?;
        Ok(())
    }

    /// Mints the next token of the drop to `to`, for free. Administrator
    /// only; the supply cap still applies.
    ///
    /// # Errors
    ///
    /// * [`Error::Ownable`] - If the caller is not the administrator.
    /// * [`Error::SupplyExhausted`] - If every token has been minted.
    /// * [`Error::Erc721`] - If `to` is `Address::ZERO`.
    ///
    /// # Events
    ///
    /// * [`erc721::Transfer`] with `from` set to `Address::ZERO`.
    pub fn admin_mint(&mut self, to: Address) -> Result<(), Error> {
        self.ownable.only_owner()?;
        self._require_supply()?;
        self._mint_sequential(to)?;
        Ok(())
    }

    /// Transfers `token_id` from the caller to `to`.
    ///
    /// # Errors
    ///
    /// * [`Error::Erc721`] - If the token does not exist, the caller is not
    ///   its owner, or `to` is `Address::ZERO`.
    ///
    /// # Events
    ///
    /// * [`erc721::Transfer`].
    pub fn transfer(
        &mut self,
        to: Address,
        token_id: U256,
    ) -> Result<(), Error> {
        self.erc721.transfer_from(msg::sender(), to, token_id)?;
        Ok(())
    }

    /// Overwrites the metadata base URI. Administrator only.
    ///
    /// # Errors
    ///
    /// * [`Error::Ownable`] - If the caller is not the administrator.
    pub fn set_base_uri(&mut self, base_uri: String) -> Result<(), Error> {
        self.ownable.only_owner()?;
        self.metadata._set_base_uri(base_uri);
        Ok(())
    }

    /// Sets the price of one public mint. Administrator only.
    ///
    /// # Errors
    ///
    /// * [`Error::Ownable`] - If the caller is not the administrator.
    ///
    /// # Events
    ///
    /// * [`MintPriceUpdated`].
    pub fn change_mint_price(
        &mut self,
        new_price: U64,
    ) -> Result<(), Error> {
        self.ownable.only_owner()?;

        let previous_price = self.mint_price.get();
        self.mint_price.set(new_price);

        evm::log(MintPriceUpdated {
            previous_price: previous_price.to::<u64>(),
            new_price: new_price.to::<u64>(),
        });
        Ok(())
    }

    /// Sends `amount` of the contract's funds to `target`. Administrator
    /// only.
    ///
    /// # Errors
    ///
    /// * [`Error::Ownable`] - If the caller is not the administrator.
    /// * [`Error::InsufficientFunds`] - If the contract balance does not
    ///   cover `amount`.
    /// * [`Error::TransferFailed`] - If the transfer fails.
    ///
    /// # Events
    ///
    /// * [`Withdrawal`].
    pub fn withdraw(
        &mut self,
        target: Address,
        amount: U64,
    ) -> Result<(), Error> {
        self.ownable.only_owner()?;

        let balance = contract::balance();
        if balance < U256::from(amount) {
            return Err(Error::InsufficientFunds(NftDropInsufficientFunds {
                balance,
                requested: amount.to::<u64>(),
            }));
        }

        call(Call::new_in(self).value(U256::from(amount)), target, &[])?;

        evm::log(Withdrawal { target, amount: amount.to::<u64>() });
        Ok(())
    }

    /// Returns the number of tokens minted so far.
    pub fn current_supply(&self) -> U256 {
        self.minted.get()
    }

    /// Returns the total number of tokens that can ever be minted.
    pub fn max_supply(&self) -> U256 {
        self.max_supply.get()
    }

    /// Returns the price of one public mint, in wei.
    pub fn mint_price(&self) -> U64 {
        self.mint_price.get()
    }
}

impl NftDrop {
    fn _require_supply(&self) -> Result<(), Error> {
        let max_supply = self.max_supply.get();
        if self.minted.get() >= max_supply {
            return Err(Error::SupplyExhausted(NftDropSupplyExhausted {
                max_supply,
            }));
        }
        Ok(())
    }

    /// Mints the next sequential token id to `to`. Ids start at one; the
    /// counter is bumped before the ledger write so it always equals the
    /// last minted id.
    fn _mint_sequential(&mut self, to: Address) -> Result<U256, Error> {
        let token_id = self.minted.get() + uint!(1_U256);
        self.minted.set(token_id);
        self.erc721._mint(to, token_id)?;
        Ok(token_id)
    }
}

#[public]
impl IErc721 for NftDrop {
    type Error = Error;

    fn balance_of(&self, owner: Address) -> U256 {
        self.erc721.balance_of(owner)
    }

    fn owner_of(&self, token_id: U256) -> Result<Address, Self::Error> {
        Ok(self.erc721.owner_of(token_id)?)
    }

    fn transfer_from(
        &mut self,
        from: Address,
        to: Address,
        token_id: U256,
    ) -> Result<(), Self::Error> {
        Ok(self.erc721.transfer_from(from, to, token_id)?)
    }

    fn approve(
        &mut self,
        to: Address,
        token_id: U256,
    ) -> Result<(), Self::Error> {
        Ok(self.erc721.approve(to, token_id)?)
    }

    fn set_approval_for_all(&mut self, operator: Address, approved: bool) {
        self.erc721.set_approval_for_all(operator, approved);
    }

    fn get_approved(&self, token_id: U256) -> Result<Address, Self::Error> {
        Ok(self.erc721.get_approved(token_id)?)
    }

    fn is_approved_for_all(&self, owner: Address, operator: Address) -> bool {
        self.erc721.is_approved_for_all(owner, operator)
    }
}

#[public]
impl IErc721Metadata for NftDrop {
    fn name(&self) -> String {
        self.metadata.name()
    }

    fn symbol(&self) -> String {
        self.metadata.symbol()
    }

    fn base_uri(&self) -> String {
        self.metadata.base_uri()
    }

    fn token_uri(&self, token_id: U256) -> String {
        self.metadata.token_uri(token_id)
    }
}

#[public]
impl IOwnable for NftDrop {
    type Error = Error;

    fn owner(&self) -> Address {
        self.ownable.owner()
    }

    fn transfer_ownership(
        &mut self,
        new_owner: Address,
    ) -> Result<(), Self::Error> {
        Ok(self.ownable.transfer_ownership(new_owner)?)
    }
}
