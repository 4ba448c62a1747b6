//! Bincode Component Serializer
//!
//! Implements the `ComponentSerializer` port with bincode's default
//! (fixed-int, little-endian) encoding, which is canonical for these types.
//! A command is encoded as `(discriminant, data)`; its signers form their own
//! group.

use crate::domain::Component;
use crate::ports::{ComponentSerializer, SerializationError, TransactionComponent};

/// Default component serializer.
#[derive(Debug, Clone, Copy, Default)]
pub struct BincodeComponentSerializer;

impl ComponentSerializer for BincodeComponentSerializer {
    fn serialize(
        &self,
        component: TransactionComponent<'_>,
    ) -> Result<Component, SerializationError> {
        let encoded = match component {
            TransactionComponent::StateRef(state_ref) => bincode::serialize(state_ref),
            TransactionComponent::Output(output) => bincode::serialize(output),
            TransactionComponent::Command(command) => {
                bincode::serialize(&(command.discriminant, &command.data))
            }
            TransactionComponent::Attachment(hash) => bincode::serialize(hash),
            TransactionComponent::Notary(party) => bincode::serialize(party),
            TransactionComponent::TimeWindow(window) => bincode::serialize(window),
            TransactionComponent::ParametersHash(hash) => bincode::serialize(hash),
            TransactionComponent::Signer(key) => bincode::serialize(key),
        };
        encoded.map_err(|e| SerializationError {
            message: e.to_string(),
        })
    }
}
