//! Ownership and authorization ledger for a set of unique tokens.
//!
//! Tracks which address owns each token, per-token approvals and
//! owner-to-operator approvals, and exposes the transfer and delegation
//! surface built on a single ownership-update primitive, [`Erc721::_update`].
//! Errors follow the [ERC-6093] naming.
//!
//! [ERC-6093]: https://eips.ethereum.org/EIPS/eip-6093
use alloc::{vec, vec::Vec};

use alloy_primitives::{uint, Address, U256};
use stylus_sdk::{
    call::MethodError,
    evm, msg,
    prelude::*,
    storage::{StorageAddress, StorageBool, StorageMap, StorageU256},
};

pub mod extensions;

pub use sol::*;
mod sol {
    use alloy_sol_types::sol;

    sol! {
        /// Emitted when the `token_id` token is transferred from `from` to
        /// `to`. Minting emits this event with `from` set to the zero
        /// address.
        #[derive(Debug)]
        #[allow(missing_docs)]
        event Transfer(
            address indexed from,
            address indexed to,
            uint256 indexed token_id
        );

        /// Emitted when `owner` enables `approved` to manage the `token_id`
        /// token.
        #[derive(Debug)]
        #[allow(missing_docs)]
        event Approval(
            address indexed owner,
            address indexed approved,
            uint256 indexed token_id
        );

        /// Emitted when `owner` enables or disables (`approved`) `operator`
        /// to manage all of its tokens.
        #[derive(Debug)]
        #[allow(missing_docs)]
        event ApprovalForAll(address indexed owner, address indexed operator, bool approved);
    }

    sol! {
        /// Indicates a `token_id` whose `owner` is the zero address, or a
        /// transfer whose `from` does not match the current owner.
        ///
        /// * `token_id` - Token id as a number.
        #[derive(Debug)]
        #[allow(missing_docs)]
        error ERC721NonexistentToken(uint256 token_id);
        /// Indicates a failure with the token `sender`. Raised when a mint
        /// targets an id that already exists.
        ///
        /// * `sender` - Address whose token is being transferred.
        #[derive(Debug)]
        #[allow(missing_docs)]
        error ERC721InvalidSender(address sender);
        /// Indicates a failure with the token `receiver`. Raised when the
        /// recipient is the zero address.
        ///
        /// * `receiver` - Address receiving the token.
        #[derive(Debug)]
        #[allow(missing_docs)]
        error ERC721InvalidReceiver(address receiver);
        /// Indicates a failure with the `operator`'s approval. Used in
        /// transfers.
        ///
        /// * `operator` - Address that may be allowed to operate on tokens
        ///   without being their owner.
        /// * `token_id` - Token id as a number.
        #[derive(Debug)]
        #[allow(missing_docs)]
        error ERC721InsufficientApproval(address operator, uint256 token_id);
        /// Indicates a failure with the `approver` of a token to be approved.
        /// Used in approvals.
        ///
        /// * `approver` - Address initiating an approval operation.
        #[derive(Debug)]
        #[allow(missing_docs)]
        error ERC721InvalidApprover(address approver);
    }
}

/// An [`Erc721`] error defined as described in [ERC-6093].
///
/// [ERC-6093]: https://eips.ethereum.org/EIPS/eip-6093
#[derive(SolidityError, Debug)]
pub enum Error {
    /// Indicates a `token_id` whose `owner` is the zero address, or a
    /// transfer whose `from` does not match the current owner.
    NonexistentToken(ERC721NonexistentToken),
    /// Indicates a failure with the token `sender`. Used in mints.
    InvalidSender(ERC721InvalidSender),
    /// Indicates a failure with the token `receiver`. Used in transfers and
    /// mints.
    InvalidReceiver(ERC721InvalidReceiver),
    /// Indicates a failure with the `operator`'s approval. Used in transfers.
    InsufficientApproval(ERC721InsufficientApproval),
    /// Indicates a failure with the `approver` of a token to be approved.
    /// Used in approvals.
    InvalidApprover(ERC721InvalidApprover),
}

impl MethodError for Error {
    fn encode(self) -> alloc::vec::Vec<u8> {
        self.into()
    }
}

/// State of an [`Erc721`] token ledger.
#[storage]
pub struct Erc721 {
    /// Maps tokens to owners.
    #[allow(clippy::used_underscore_binding)]
    pub _owners: StorageMap<U256, StorageAddress>,
    /// Maps users to balances.
    #[allow(clippy::used_underscore_binding)]
    pub _balances: StorageMap<Address, StorageU256>,
    /// Maps tokens to approvals.
    #[allow(clippy::used_underscore_binding)]
    pub _token_approvals: StorageMap<U256, StorageAddress>,
    /// Maps owners to a mapping of operator approvals.
    #[allow(clippy::used_underscore_binding)]
    pub _operator_approvals:
        StorageMap<Address, StorageMap<Address, StorageBool>>,
}

/// Required interface of an [`Erc721`] compliant contract.
pub trait IErc721 {
    /// The error type associated to this ERC-721 trait implementation.
    type Error: Into<alloc::vec::Vec<u8>>;

    /// Returns the number of tokens in `owner`'s account.
    ///
    /// Never fails; unknown addresses (the zero address included) hold zero
    /// tokens.
    fn balance_of(&self, owner: Address) -> U256;

    /// Returns the owner of the `token_id` token.
    ///
    /// # Errors
    ///
    /// * [`Error::NonexistentToken`] - If the token does not exist.
    fn owner_of(&self, token_id: U256) -> Result<Address, Self::Error>;

    /// Transfers `token_id` token from `from` to `to`.
    ///
    /// The caller must be `from`, the address approved for `token_id`, or an
    /// operator of `from`. Any approval for the token is cleared by the
    /// transfer.
    ///
    /// # Errors
    ///
    /// * [`Error::NonexistentToken`] - If the token does not exist or `from`
    ///   is not its current owner.
    /// * [`Error::InsufficientApproval`] - If the caller does not have the
    ///   right to transfer.
    /// * [`Error::InvalidReceiver`] - If `to` is `Address::ZERO`.
    ///
    /// # Events
    ///
    /// * [`Transfer`].
    fn transfer_from(
        &mut self,
        from: Address,
        to: Address,
        token_id: U256,
    ) -> Result<(), Self::Error>;

    /// Gives permission to `to` to transfer `token_id` token to another
    /// account. The approval is cleared when the token is transferred.
    ///
    /// Only a single account can be approved at a time, so approving the
    /// `Address::ZERO` clears the previous approval.
    ///
    /// # Errors
    ///
    /// * [`Error::NonexistentToken`] - If the token does not exist.
    /// * [`Error::InvalidApprover`] - If the caller is neither the owner nor
    ///   an operator of the owner.
    ///
    /// # Events
    ///
    /// * [`Approval`].
    fn approve(
        &mut self,
        to: Address,
        token_id: U256,
    ) -> Result<(), Self::Error>;

    /// Approve or remove `operator` as an operator for the caller.
    ///
    /// Operators can call [`Self::transfer_from`] for any token owned by the
    /// caller. Always permitted; setting and clearing are both
    /// unconditional.
    ///
    /// # Events
    ///
    /// * [`ApprovalForAll`].
    fn set_approval_for_all(&mut self, operator: Address, approved: bool);

    /// Returns the account approved for `token_id` token.
    ///
    /// # Errors
    ///
    /// * [`Error::NonexistentToken`] - If the token does not exist.
    fn get_approved(&self, token_id: U256) -> Result<Address, Self::Error>;

    /// Returns whether the `operator` is allowed to manage all the assets of
    /// `owner`.
    fn is_approved_for_all(&self, owner: Address, operator: Address) -> bool;
}

#[public]
#[implements(IErc721<Error = Error>)]
impl Erc721 {}

#[public]
impl IErc721 for Erc721 {
    type Error = Error;

    fn balance_of(&self, owner: Address) -> U256 {
        self._balances.get(owner)
    }

    fn owner_of(&self, token_id: U256) -> Result<Address, Error> {
        self._require_owned(token_id)
    }

    fn transfer_from(
        &mut self,
        from: Address,
        to: Address,
        token_id: U256,
    ) -> Result<(), Error> {
        let owner = self._require_owned(token_id)?;
        if owner != from {
            return Err(ERC721NonexistentToken { token_id }.into());
        }

        self._check_authorized(owner, msg::sender(), token_id)?;

        if to.is_zero() {
            return Err(
                ERC721InvalidReceiver { receiver: Address::ZERO }.into()
            );
        }

        // Authorization already checked above.
        self._update(to, token_id, Address::ZERO)?;
        Ok(())
    }

    fn approve(&mut self, to: Address, token_id: U256) -> Result<(), Error> {
        self._approve(to, token_id, msg::sender(), true)
    }

    fn set_approval_for_all(&mut self, operator: Address, approved: bool) {
        self._set_approval_for_all(msg::sender(), operator, approved);
    }

    fn get_approved(&self, token_id: U256) -> Result<Address, Error> {
        self._require_owned(token_id)?;
        Ok(self._get_approved(token_id))
    }

    fn is_approved_for_all(&self, owner: Address, operator: Address) -> bool {
        self._operator_approvals.get(owner).get(operator)
    }
}

impl Erc721 {
    /// Returns the owner of the `token_id`. Does NOT revert if the token
    /// doesn't exist.
    #[must_use]
    pub fn _owner_of(&self, token_id: U256) -> Address {
        self._owners.get(token_id)
    }

    /// Returns the approved address for `token_id`.
    /// Returns 0 if `token_id` is not minted.
    #[must_use]
    pub fn _get_approved(&self, token_id: U256) -> Address {
        self._token_approvals.get(token_id)
    }

    /// Returns whether `spender` is allowed to manage `owner`'s tokens, or
    /// `token_id` in particular.
    ///
    /// WARNING: This function assumes that `owner` is the actual owner of
    /// `token_id` and does not verify this assumption.
    #[must_use]
    pub fn _is_authorized(
        &self,
        owner: Address,
        spender: Address,
        token_id: U256,
    ) -> bool {
        !spender.is_zero()
            && (owner == spender
                || self.is_approved_for_all(owner, spender)
                || self._get_approved(token_id) == spender)
    }

    /// Checks if `operator` can operate on `token_id`, assuming the provided
    /// `owner` is the actual owner.
    ///
    /// # Errors
    ///
    /// * [`Error::NonexistentToken`] - If `owner` is `Address::ZERO`.
    /// * [`Error::InsufficientApproval`] - If `operator` does not have the
    ///   right to operate on the token.
    pub fn _check_authorized(
        &self,
        owner: Address,
        operator: Address,
        token_id: U256,
    ) -> Result<(), Error> {
        if self._is_authorized(owner, operator, token_id) {
            return Ok(());
        }

        if owner.is_zero() {
            Err(ERC721NonexistentToken { token_id }.into())
        } else {
            Err(ERC721InsufficientApproval { operator, token_id }.into())
        }
    }

    /// Transfers `token_id` from its current owner to `to`, or alternatively
    /// mints if the current owner is `Address::ZERO`. Returns the owner of
    /// the `token_id` before the update.
    ///
    /// The `auth` argument is optional. If the value passed is non-zero, then
    /// this function will check that `auth` is either the owner of the
    /// token, or approved to operate on the token (by the owner).
    ///
    /// Every owner change clears the single-token approval and adjusts the
    /// balances of the previous and new owners.
    ///
    /// # Errors
    ///
    /// * [`Error::NonexistentToken`] - If the token does not exist and `auth`
    ///   is not `Address::ZERO`.
    /// * [`Error::InsufficientApproval`] - If `auth` is not `Address::ZERO`
    ///   and `auth` does not have a right to operate on this token.
    ///
    /// # Events
    ///
    /// * [`Transfer`].
    pub fn _update(
        &mut self,
        to: Address,
        token_id: U256,
        auth: Address,
    ) -> Result<Address, Error> {
        let from = self._owner_of(token_id);

        // Perform (optional) operator check.
        if !auth.is_zero() {
            self._check_authorized(from, auth, token_id)?;
        }

        // Execute the update.
        if !from.is_zero() {
            // Clear approval. No need to re-authorize or emit the `Approval`
            // event.
            self._approve(Address::ZERO, token_id, Address::ZERO, false)?;
            let from_balance = self._balances.get(from);
            self._balances.setter(from).set(from_balance - uint!(1_U256));
        }

        if !to.is_zero() {
            let to_balance = self._balances.get(to);
            self._balances.setter(to).set(to_balance + uint!(1_U256));
        }

        self._owners.setter(token_id).set(to);
        evm::log(Transfer { from, to, token_id });
        Ok(from)
    }

    /// Mints `token_id` and transfers it to `to`.
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidSender`] - If `token_id` already exists.
    /// * [`Error::InvalidReceiver`] - If `to` is `Address::ZERO`.
    ///
    /// # Events
    ///
    /// * [`Transfer`] with `from` set to `Address::ZERO`.
    pub fn _mint(&mut self, to: Address, token_id: U256) -> Result<(), Error> {
        if to.is_zero() {
            return Err(
                ERC721InvalidReceiver { receiver: Address::ZERO }.into()
            );
        }

        let previous_owner = self._update(to, token_id, Address::ZERO)?;
        if !previous_owner.is_zero() {
            return Err(ERC721InvalidSender { sender: Address::ZERO }.into());
        }
        Ok(())
    }

    /// Approve `to` to operate on `token_id`.
    ///
    /// The `auth` argument is optional. If the value passed is non-zero, then
    /// this function will check that `auth` is either the owner of the
    /// token, or approved to operate on all tokens held by this owner.
    ///
    /// # Errors
    ///
    /// * [`Error::NonexistentToken`] - If the token does not exist.
    /// * [`Error::InvalidApprover`] - If `auth` does not have a right to
    ///   approve this token.
    ///
    /// # Events
    ///
    /// * [`Approval`] if `emit_event` is true.
    pub fn _approve(
        &mut self,
        to: Address,
        token_id: U256,
        auth: Address,
        emit_event: bool,
    ) -> Result<(), Error> {
        // Avoid reading the owner unless necessary.
        if emit_event || !auth.is_zero() {
            let owner = self._require_owned(token_id)?;

            // We do not use [`Self::_is_authorized`] because single-token
            // approvals should not be able to call `approve`.
            if !auth.is_zero()
                && owner != auth
                && !self.is_approved_for_all(owner, auth)
            {
                return Err(ERC721InvalidApprover { approver: auth }.into());
            }

            if emit_event {
                evm::log(Approval { owner, approved: to, token_id });
            }
        }

        self._token_approvals.setter(token_id).set(to);
        Ok(())
    }

    /// Approve `operator` to operate on all of `owner`'s tokens.
    ///
    /// Unconditional; both granting and revoking always succeed.
    ///
    /// # Events
    ///
    /// * [`ApprovalForAll`].
    pub fn _set_approval_for_all(
        &mut self,
        owner: Address,
        operator: Address,
        approved: bool,
    ) {
        self._operator_approvals.setter(owner).setter(operator).set(approved);
        evm::log(ApprovalForAll { owner, operator, approved });
    }

    /// Reverts if the `token_id` doesn't have a current owner (it hasn't been
    /// minted). Returns the owner.
    ///
    /// # Errors
    ///
    /// * [`Error::NonexistentToken`] - If the token does not exist.
    pub fn _require_owned(&self, token_id: U256) -> Result<Address, Error> {
        let owner = self._owner_of(token_id);
        if owner.is_zero() {
            return Err(ERC721NonexistentToken { token_id }.into());
        }
        Ok(owner)
    }
}
