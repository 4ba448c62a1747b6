//! # Component Padding
//!
//! Fixed target cardinalities and filler values for size-sensitive groups.
//!
//! The proof system needs a fixed-shape witness, so inputs, outputs,
//! references and signers each declare a target size and a filler. Content
//! beyond the target is an error, never truncated.
//!
//! Padding only extends groups that hold at least one real component; an
//! absent group stays absent and is represented by the sentinel root.
//! Signers are checked against their target but enter the tree unpadded; the
//! padded signer list is kept for the witness only.

use serde::{Deserialize, Serialize};

use super::entities::{OutputState, PublicKey, StateRef};
use super::errors::DisclosureError;
use super::grouping::ComponentGroups;
use super::value_objects::{Component, ComponentGroupKind};

/// Target size and filler for one group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaddingTarget<T> {
    /// Required cardinality.
    pub size: usize,
    /// Dummy value appended up to `size`.
    pub filler: T,
}

/// Validated padding declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentPadding {
    inputs: PaddingTarget<StateRef>,
    outputs: PaddingTarget<OutputState>,
    references: PaddingTarget<StateRef>,
    signers: PaddingTarget<PublicKey>,
}

impl ComponentPadding {
    /// Start a builder.
    pub fn builder() -> ComponentPaddingBuilder {
        ComponentPaddingBuilder::default()
    }

    /// Target size of a size-sensitive group; `None` for non-paddable roles.
    pub fn target(&self, kind: ComponentGroupKind) -> Option<usize> {
        match kind {
            ComponentGroupKind::Inputs => Some(self.inputs.size),
            ComponentGroupKind::Outputs => Some(self.outputs.size),
            ComponentGroupKind::References => Some(self.references.size),
            ComponentGroupKind::Signers => Some(self.signers.size),
            _ => None,
        }
    }

    /// Filler for inputs.
    pub fn input_filler(&self) -> &StateRef {
        &self.inputs.filler
    }

    /// Filler for outputs.
    pub fn output_filler(&self) -> &OutputState {
        &self.outputs.filler
    }

    /// Filler for references.
    pub fn reference_filler(&self) -> &StateRef {
        &self.references.filler
    }

    /// Filler for signers.
    pub fn signer_filler(&self) -> &PublicKey {
        &self.signers.filler
    }

    /// Fail if `actual` exceeds the target of `kind`.
    pub fn check_cardinality(
        &self,
        kind: ComponentGroupKind,
        actual: usize,
    ) -> Result<(), DisclosureError> {
        match self.target(kind) {
            Some(target) if actual > target => Err(DisclosureError::GroupCardinality {
                group: kind,
                actual,
                target,
            }),
            _ => Ok(()),
        }
    }

    /// Pad `components` of `kind` up to its target with `filler`.
    pub fn pad_components(
        &self,
        kind: ComponentGroupKind,
        components: &[Component],
        filler: &Component,
    ) -> Result<Vec<Component>, DisclosureError> {
        self.check_cardinality(kind, components.len())?;
        let target = self.target(kind).unwrap_or(components.len());
        let mut padded = components.to_vec();
        padded.resize(target, filler.clone());
        Ok(padded)
    }

    /// Pad a present group in place. Absent groups are left absent.
    pub fn pad_group(
        &self,
        groups: &mut ComponentGroups,
        kind: ComponentGroupKind,
        filler: &Component,
    ) -> Result<(), DisclosureError> {
        if !kind.is_paddable() {
            return Err(DisclosureError::Configuration(format!(
                "group {} is not paddable",
                kind
            )));
        }
        match groups.components_mut(kind) {
            Some(components) => {
                self.check_cardinality(kind, components.len())?;
                let target = self.target(kind).unwrap_or(components.len());
                components.resize(target, filler.clone());
                Ok(())
            }
            None => Ok(()),
        }
    }
}

/// Builder for [`ComponentPadding`]. Every size and filler is required.
///
/// Deserializable so it can sit directly in configuration files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentPaddingBuilder {
    /// Inputs target size.
    pub inputs_size: Option<usize>,
    /// Inputs filler.
    pub input_filler: Option<StateRef>,
    /// Outputs target size.
    pub outputs_size: Option<usize>,
    /// Outputs filler.
    pub output_filler: Option<OutputState>,
    /// References target size.
    pub references_size: Option<usize>,
    /// References filler.
    pub reference_filler: Option<StateRef>,
    /// Signers target size.
    pub signers_size: Option<usize>,
    /// Signers filler.
    pub signer_filler: Option<PublicKey>,
}

impl ComponentPaddingBuilder {
    /// Inputs target and filler.
    pub fn inputs(mut self, size: usize, filler: StateRef) -> Self {
        self.inputs_size = Some(size);
        self.input_filler = Some(filler);
        self
    }

    /// Outputs target and filler.
    pub fn outputs(mut self, size: usize, filler: OutputState) -> Self {
        self.outputs_size = Some(size);
        self.output_filler = Some(filler);
        self
    }

    /// References target and filler.
    pub fn references(mut self, size: usize, filler: StateRef) -> Self {
        self.references_size = Some(size);
        self.reference_filler = Some(filler);
        self
    }

    /// Signers target and filler.
    pub fn signers(mut self, size: usize, filler: PublicKey) -> Self {
        self.signers_size = Some(size);
        self.signer_filler = Some(filler);
        self
    }

    /// Validate and build.
    pub fn build(self) -> Result<ComponentPadding, DisclosureError> {
        Ok(ComponentPadding {
            inputs: required(ComponentGroupKind::Inputs, self.inputs_size, self.input_filler)?,
            outputs: required(ComponentGroupKind::Outputs, self.outputs_size, self.output_filler)?,
            references: required(
                ComponentGroupKind::References,
                self.references_size,
                self.reference_filler,
            )?,
            signers: required(ComponentGroupKind::Signers, self.signers_size, self.signer_filler)?,
        })
    }
}

fn required<T>(
    kind: ComponentGroupKind,
    size: Option<usize>,
    filler: Option<T>,
) -> Result<PaddingTarget<T>, DisclosureError> {
    let size = size.ok_or_else(|| {
        DisclosureError::Configuration(format!("padding size missing for {}", kind))
    })?;
    let filler = filler.ok_or_else(|| {
        DisclosureError::Configuration(format!("padding filler missing for {}", kind))
    })?;
    Ok(PaddingTarget { size, filler })
}
