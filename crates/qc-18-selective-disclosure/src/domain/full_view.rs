//! # Full Transaction View
//!
//! Prover-side view: every plaintext group, the privacy salt and the complete
//! derived tree. Inputs, outputs and references are padded to their targets;
//! every other group enters the tree exactly as supplied.
//!
//! ## Identity
//!
//! `id` is the top root. Equality and hashing use `id` only.

use std::collections::BTreeMap;
use std::hash::{Hash as StdHash, Hasher};
use std::iter;

use shared_crypto::Hash;

use super::component_disclosure::ComponentDisclosure;
use super::entities::{StateRef, TransactionBody};
use super::errors::DisclosureError;
use super::grouping::{ComponentGroups, TypedComponent};
use super::padding::ComponentPadding;
use super::partial_view::{PartialTransactionView, TransactionDisclosure};
use super::utxo::UtxoCommitment;
use super::value_objects::{
    Component, ComponentGroupKind, GroupVisibility, Nonce, PrivacySalt, TreeDigests,
};
use crate::algorithms::{merkle_path, ComponentMerkleTree};
use crate::ports::{ComponentSerializer, TransactionComponent};

/// Prover-side transaction with all plaintext and derived hashes.
#[derive(Debug, Clone)]
pub struct FullTransactionView {
    groups: ComponentGroups,
    salt: PrivacySalt,
    tree: ComponentMerkleTree,
    witness_signers: Vec<Component>,
}

impl FullTransactionView {
    /// Serialize, group, pad and hash a transaction body.
    ///
    /// ## Errors
    ///
    /// - `Configuration`: not exactly one command, no notary, bad time window
    /// - `GroupCardinality`: inputs, outputs, references or signers exceed
    ///   their padding target
    /// - `Serialization`: the serializer rejected a field
    pub fn build<Z>(
        body: &TransactionBody,
        padding: &ComponentPadding,
        salt: PrivacySalt,
        digests: TreeDigests,
        serializer: &Z,
    ) -> Result<Self, DisclosureError>
    where
        Z: ComponentSerializer + ?Sized,
    {
        use ComponentGroupKind as Kind;

        let (command, notary) = body.validate_shape()?;

        let outputs = body
            .outputs
            .iter()
            .map(|output| -> Result<Option<TypedComponent>, DisclosureError> {
                Ok(Some(TypedComponent {
                    discriminant: output.discriminant,
                    bytes: serializer.serialize(TransactionComponent::Output(output))?,
                }))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let signers: Vec<Component> = command
            .signers
            .iter()
            .map(|key| serialize_one(serializer, TransactionComponent::Signer(key)))
            .collect::<Result<_, _>>()?;

        let mut groups = ComponentGroups::new();
        groups.add(
            Kind::Inputs,
            serialize_all(serializer, body.inputs.iter().map(TransactionComponent::StateRef))?,
        )?;
        groups.add_typed(Kind::Outputs, outputs)?;
        groups.add(
            Kind::Commands,
            serialize_all(serializer, iter::once(TransactionComponent::Command(command)))?,
        )?;
        groups.add(
            Kind::Attachments,
            serialize_all(
                serializer,
                body.attachments.iter().map(TransactionComponent::Attachment),
            )?,
        )?;
        groups.add(
            Kind::Notary,
            serialize_all(serializer, iter::once(TransactionComponent::Notary(notary)))?,
        )?;
        groups.add(
            Kind::TimeWindow,
            serialize_all(
                serializer,
                body.time_window.iter().map(TransactionComponent::TimeWindow),
            )?,
        )?;
        groups.add(Kind::Signers, signers.iter().cloned().map(Some))?;
        groups.add(
            Kind::References,
            serialize_all(
                serializer,
                body.references.iter().map(TransactionComponent::StateRef),
            )?,
        )?;
        groups.add(
            Kind::Parameters,
            serialize_all(
                serializer,
                body.parameters_hash
                    .iter()
                    .map(TransactionComponent::ParametersHash),
            )?,
        )?;

        let input_filler =
            serialize_one(serializer, TransactionComponent::StateRef(padding.input_filler()))?;
        let output_filler =
            serialize_one(serializer, TransactionComponent::Output(padding.output_filler()))?;
        let reference_filler = serialize_one(
            serializer,
            TransactionComponent::StateRef(padding.reference_filler()),
        )?;
        let signer_filler =
            serialize_one(serializer, TransactionComponent::Signer(padding.signer_filler()))?;

        padding.pad_group(&mut groups, Kind::Inputs, &input_filler)?;
        padding.pad_group(&mut groups, Kind::Outputs, &output_filler)?;
        padding.pad_group(&mut groups, Kind::References, &reference_filler)?;
        let witness_signers = padding.pad_components(Kind::Signers, &signers, &signer_filler)?;

        Ok(Self::assemble(groups, salt, digests, witness_signers))
    }

    /// Build from already serialized groups.
    ///
    /// The caller is responsible for padding. Exactly one command component
    /// and a notary group are still required.
    pub fn from_groups(
        groups: ComponentGroups,
        salt: PrivacySalt,
        digests: TreeDigests,
    ) -> Result<Self, DisclosureError> {
        let commands = groups.components(ComponentGroupKind::Commands).len();
        if commands != 1 {
            return Err(DisclosureError::Configuration(format!(
                "exactly one command required, got {}",
                commands
            )));
        }
        if groups.get(ComponentGroupKind::Notary).is_none() {
            return Err(DisclosureError::Configuration(
                "notary is required".to_string(),
            ));
        }
        let witness_signers = groups.components(ComponentGroupKind::Signers).to_vec();
        Ok(Self::assemble(groups, salt, digests, witness_signers))
    }

    fn assemble(
        groups: ComponentGroups,
        salt: PrivacySalt,
        digests: TreeDigests,
        witness_signers: Vec<Component>,
    ) -> Self {
        let tree = ComponentMerkleTree::build(&groups, &salt, digests);
        tracing::debug!(
            id = %hex::encode(&tree.root()[..8]),
            inputs = groups.components(ComponentGroupKind::Inputs).len(),
            outputs = groups.components(ComponentGroupKind::Outputs).len(),
            "full transaction view built"
        );
        Self {
            groups,
            salt,
            tree,
            witness_signers,
        }
    }

    /// Transaction id (top root).
    pub fn id(&self) -> Hash {
        self.tree.root()
    }

    /// Same as [`Self::id`].
    pub fn top_root(&self) -> Hash {
        self.tree.root()
    }

    /// Digest pair the tree was built with.
    pub fn digests(&self) -> TreeDigests {
        self.tree.digests()
    }

    /// Plaintext groups.
    pub fn groups(&self) -> &ComponentGroups {
        &self.groups
    }

    /// Roots of present groups by ordinal.
    pub fn group_roots(&self) -> &BTreeMap<u32, Hash> {
        self.tree.group_roots()
    }

    /// Root of one group, sentinel if absent.
    pub fn group_root(&self, kind: ComponentGroupKind) -> Hash {
        self.tree.group_root(kind.ordinal())
    }

    /// Sentinel-filled list the id is computed over.
    pub fn top_level_roots(&self) -> &[Hash] {
        self.tree.top_level_roots()
    }

    /// Nonces of every present group.
    pub fn component_nonces(&self) -> &BTreeMap<u32, Vec<Nonce>> {
        self.tree.nonces()
    }

    /// Leaf hashes of one group.
    pub fn leaf_hashes(&self, kind: ComponentGroupKind) -> &[Hash] {
        self.tree.leaf_hashes(kind.ordinal())
    }

    /// Output leaf hashes, in output order.
    pub fn output_leaf_hashes(&self) -> &[Hash] {
        self.leaf_hashes(ComponentGroupKind::Outputs)
    }

    /// Leaf hash of one output.
    pub fn output_leaf_hash(&self, index: u32) -> Option<Hash> {
        self.output_leaf_hashes().get(index as usize).copied()
    }

    /// Signers padded to their target for the proof witness.
    pub fn witness_signers(&self) -> &[Component] {
        &self.witness_signers
    }

    /// Material a verifier needs to rebuild a partial view.
    ///
    /// Disclosed roles are always listed, empty when absent, so the verifier
    /// can tell "disclosed and empty" from "withheld". Hidden roles and
    /// unknown ordinals travel as roots; outputs travel as leaf hashes.
    pub fn disclosure(&self) -> TransactionDisclosure {
        let mut disclosed_components = BTreeMap::new();
        let mut disclosed_nonces = BTreeMap::new();
        let mut hidden_group_roots = BTreeMap::new();

        for kind in ComponentGroupKind::ALL {
            if kind.visibility() != GroupVisibility::Disclosed {
                continue;
            }
            let ordinal = kind.ordinal();
            disclosed_components.insert(ordinal, self.groups.components(kind).to_vec());
            disclosed_nonces.insert(
                ordinal,
                self.component_nonces()
                    .get(&ordinal)
                    .cloned()
                    .unwrap_or_default(),
            );
        }

        for (&ordinal, &root) in self.group_roots() {
            let visibility = ComponentGroupKind::from_ordinal(ordinal)
                .map(ComponentGroupKind::visibility)
                .unwrap_or(GroupVisibility::Hidden);
            if visibility == GroupVisibility::Hidden {
                hidden_group_roots.insert(ordinal, root);
            }
        }

        TransactionDisclosure {
            digests: self.digests(),
            disclosed_components,
            disclosed_nonces,
            hidden_group_roots,
            output_leaf_hashes: self.output_leaf_hashes().to_vec(),
            top_level_roots: self.top_level_roots().to_vec(),
            id: self.id(),
        }
    }

    /// Rebuild the verifier's view of this transaction.
    pub fn to_partial(&self) -> Result<PartialTransactionView, DisclosureError> {
        PartialTransactionView::reconstruct(self.disclosure())
    }

    /// Reveal one component with its inclusion paths up to the id.
    pub fn disclose_component(
        &self,
        group_index: u32,
        component_index: usize,
    ) -> Result<ComponentDisclosure, DisclosureError> {
        let not_found = || DisclosureError::ComponentNotFound {
            group: group_index,
            index: component_index,
        };

        let group = self.groups.get_ordinal(group_index).ok_or_else(not_found)?;
        let component = group.components.get(component_index).ok_or_else(not_found)?;
        let nonce = self
            .component_nonces()
            .get(&group_index)
            .and_then(|nonces| nonces.get(component_index))
            .ok_or_else(not_found)?;

        let node = self.digests().node;
        let group_path = merkle_path(self.tree.leaf_hashes(group_index), component_index, node)
            .ok_or_else(not_found)?;
        let top_path = merkle_path(self.top_level_roots(), group_index as usize, node)
            .ok_or_else(not_found)?;

        Ok(ComponentDisclosure {
            group_index,
            component_index: component_index as u32,
            component: component.clone(),
            nonce: *nonce,
            group_path,
            top_path,
        })
    }

    /// Commitment a recipient presents when spending output `output_index`.
    pub fn utxo_commitment(&self, output_index: u32) -> Result<UtxoCommitment, DisclosureError> {
        let ordinal = ComponentGroupKind::Outputs.ordinal();
        let not_found = || DisclosureError::ComponentNotFound {
            group: ordinal,
            index: output_index as usize,
        };

        let content = self
            .groups
            .components(ComponentGroupKind::Outputs)
            .get(output_index as usize)
            .ok_or_else(not_found)?;
        let nonce = self
            .component_nonces()
            .get(&ordinal)
            .and_then(|nonces| nonces.get(output_index as usize))
            .ok_or_else(not_found)?;

        Ok(UtxoCommitment::new(
            StateRef::new(self.id(), output_index),
            content.clone(),
            *nonce,
        ))
    }

    /// Salt behind every nonce. Goes into the proof witness, never on the wire.
    pub fn privacy_salt(&self) -> &PrivacySalt {
        &self.salt
    }
}

impl PartialEq for FullTransactionView {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for FullTransactionView {}

impl StdHash for FullTransactionView {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id().hash(state);
    }
}

fn serialize_one<Z>(
    serializer: &Z,
    component: TransactionComponent<'_>,
) -> Result<Component, DisclosureError>
where
    Z: ComponentSerializer + ?Sized,
{
    Ok(serializer.serialize(component)?)
}

fn serialize_all<'a, Z, I>(serializer: &Z, items: I) -> Result<Vec<Option<Component>>, DisclosureError>
where
    Z: ComponentSerializer + ?Sized,
    I: IntoIterator<Item = TransactionComponent<'a>>,
{
    items
        .into_iter()
        .map(|component| serialize_one(serializer, component).map(Some))
        .collect()
}
