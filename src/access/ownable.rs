//! Contract module which provides a basic access control mechanism, where
//! there is an account (an owner) that is granted exclusive access to
//! specific functions.
//!
//! The initial owner is set by the deploying constructor and can later be
//! changed with [`Ownable::transfer_ownership`]. The module makes available
//! the [`Ownable::only_owner`] check, which callers use to restrict an
//! operation to the owner.
use alloc::{vec, vec::Vec};

use alloy_primitives::Address;
use stylus_sdk::{
    call::MethodError, evm, msg, prelude::*, storage::StorageAddress,
};

pub use sol::*;
mod sol {
    use alloy_sol_types::sol;

    sol! {
        /// Emitted when ownership gets transferred between accounts.
        ///
        /// * `previous_owner` - Address of the previous owner.
        /// * `new_owner` - Address of the new owner.
        #[derive(Debug)]
        #[allow(missing_docs)]
        event OwnershipTransferred(address indexed previous_owner, address indexed new_owner);
    }

    sol! {
        /// The caller account is not authorized to perform an operation.
        ///
        /// * `account` - Account that was found to not be authorized.
        #[derive(Debug)]
        #[allow(missing_docs)]
        error OwnableUnauthorizedAccount(address account);
        /// The owner is not a valid owner account. (eg. [`Address::ZERO`])
        ///
        /// * `owner` - Account that's not allowed to become the owner.
        #[derive(Debug)]
        #[allow(missing_docs)]
        error OwnableInvalidOwner(address owner);
    }
}

/// An error that occurred in the [`Ownable`] contract.
#[derive(SolidityError, Debug)]
pub enum Error {
    /// The caller account is not authorized to perform an operation.
    UnauthorizedAccount(OwnableUnauthorizedAccount),
    /// The owner is not a valid owner account. (eg. [`Address::ZERO`])
    InvalidOwner(OwnableInvalidOwner),
}

impl MethodError for Error {
    fn encode(self) -> alloc::vec::Vec<u8> {
        self.into()
    }
}

/// State of an [`Ownable`] contract.
#[storage]
pub struct Ownable {
    /// The current owner of this contract.
    pub(crate) owner: StorageAddress,
}

/// Interface for an [`Ownable`] contract.
pub trait IOwnable {
    /// The error type associated to the trait implementation.
    type Error: Into<alloc::vec::Vec<u8>>;

    /// Returns the address of the current owner.
    fn owner(&self) -> Address;

    /// Transfers ownership of the contract to a new account (`new_owner`).
    /// Can only be called by the current owner.
    ///
    /// # Errors
    ///
    /// * [`Error::UnauthorizedAccount`] - If not called by the owner.
    /// * [`Error::InvalidOwner`] - If `new_owner` is the [`Address::ZERO`].
    ///
    /// # Events
    ///
    /// * [`OwnershipTransferred`].
    fn transfer_ownership(
        &mut self,
        new_owner: Address,
    ) -> Result<(), Self::Error>;
}

#[public]
#[implements(IOwnable<Error = Error>)]
impl Ownable {
    /// Constructor.
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidOwner`] - If `initial_owner` is [`Address::ZERO`].
    #[constructor]
    pub fn constructor(&mut self, initial_owner: Address) -> Result<(), Error> {
        if initial_owner.is_zero() {
            return Err(Error::InvalidOwner(OwnableInvalidOwner {
                owner: Address::ZERO,
            }));
        }
        self._transfer_ownership(initial_owner);
        Ok(())
    }
}

#[public]
impl IOwnable for Ownable {
    type Error = Error;

    fn owner(&self) -> Address {
        self.owner()
    }

    fn transfer_ownership(
        &mut self,
        new_owner: Address,
    ) -> Result<(), Self::Error> {
        self.transfer_ownership(new_owner)
    }
}

impl Ownable {
    /// Returns the address of the current owner.
    #[must_use]
    pub fn owner(&self) -> Address {
        self.owner.get()
    }

    /// Transfers ownership of the contract to a new account (`new_owner`).
    /// Can only be called by the current owner.
    ///
    /// # Errors
    ///
    /// * [`Error::UnauthorizedAccount`] - If not called by the owner.
    /// * [`Error::InvalidOwner`] - If `new_owner` is the [`Address::ZERO`].
    ///
    /// # Events
    ///
    /// * [`OwnershipTransferred`].
    pub fn transfer_ownership(
        &mut self,
        new_owner: Address,
    ) -> Result<(), Error> {
        self.only_owner()?;

        if new_owner.is_zero() {
            return Err(Error::InvalidOwner(OwnableInvalidOwner {
                owner: Address::ZERO,
            }));
        }

        self._transfer_ownership(new_owner);

        Ok(())
    }

    /// Checks if the [`msg::sender`] is set as the owner.
    ///
    /// # Errors
    ///
    /// * [`Error::UnauthorizedAccount`] - If called by any account other than
    ///   the owner.
    pub fn only_owner(&self) -> Result<(), Error> {
        let account = msg::sender();
        if self.owner() != account {
            return Err(Error::UnauthorizedAccount(
                OwnableUnauthorizedAccount { account },
            ));
        }

        Ok(())
    }

    /// Transfers ownership of the contract to `new_owner`. Internal function
    /// without access restriction.
    ///
    /// # Events
    ///
    /// * [`OwnershipTransferred`].
    pub fn _transfer_ownership(&mut self, new_owner: Address) {
        let previous_owner = self.owner.get();
        self.owner.set(new_owner);
        evm::log(OwnershipTransferred { previous_owner, new_owner });
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::Address;
    use motsu::prelude::*;
    use stylus_sdk::prelude::*;

    use super::*;

    unsafe impl TopLevelStorage for Ownable {}

    #[motsu::test]
    fn constructor_sets_owner(contract: Contract<Ownable>, alice: Address) {
        contract.sender(alice).constructor(alice).motsu_unwrap();

        assert_eq!(alice, contract.sender(alice).owner());

        contract.assert_emitted(&OwnershipTransferred {
            previous_owner: Address::ZERO,
            new_owner: alice,
        });
    }

    #[motsu::test]
    fn constructor_reverts_when_invalid_owner(
        contract: Contract<Ownable>,
        alice: Address,
    ) {
        let err = contract
            .sender(alice)
            .constructor(Address::ZERO)
            .motsu_expect_err("should revert");
        assert!(
            matches!(err, Error::InvalidOwner(OwnableInvalidOwner { owner }) if owner.is_zero())
        );
    }

    #[motsu::test]
    fn transfers_ownership(
        contract: Contract<Ownable>,
        alice: Address,
        bob: Address,
    ) {
        contract.sender(alice).constructor(alice).motsu_unwrap();

        contract
            .sender(alice)
            .transfer_ownership(bob)
            .motsu_expect("should transfer ownership");
        assert_eq!(bob, contract.sender(alice).owner());

        contract.assert_emitted(&OwnershipTransferred {
            previous_owner: alice,
            new_owner: bob,
        });
    }

    #[motsu::test]
    fn prevents_non_owners_from_transferring(
        contract: Contract<Ownable>,
        alice: Address,
        bob: Address,
    ) {
        contract.sender(alice).constructor(bob).motsu_unwrap();

        let err =
            contract.sender(alice).transfer_ownership(bob).motsu_unwrap_err();

        assert!(matches!(
            err,
            Error::UnauthorizedAccount(OwnableUnauthorizedAccount { account })
                if account == alice
        ));
    }

    #[motsu::test]
    fn prevents_reaching_stuck_state(
        contract: Contract<Ownable>,
        alice: Address,
    ) {
        contract.sender(alice).constructor(alice).motsu_unwrap();

        let err = contract
            .sender(alice)
            .transfer_ownership(Address::ZERO)
            .motsu_unwrap_err();

        assert!(matches!(
            err,
            Error::InvalidOwner(OwnableInvalidOwner { owner }) if owner.is_zero()
        ));
    }
}
