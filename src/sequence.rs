//! Validation sequence: the ordered obligations checked before signing.
//!
//! Nodes are recorded in discovery order. Duplicates are meaningful (two
//! layers may each owe a fee) and are never collapsed.

use serde::Serialize;

use delegated_sign_types::{AccountId, Call, DelegationClass};

/// `payer` must be able to afford the fee of `call`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeeNode {
    pub payer: AccountId,
    pub call: Call,
    pub class: DelegationClass,
}

/// `confirmer` must explicitly confirm (or execute) `call`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfirmationNode {
    pub confirmer: AccountId,
    pub call: Call,
    pub class: DelegationClass,
}

/// A pending multisig operation: `signatory` approves `call` for `multisig_account`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MultisigOperationNode {
    pub signatory: AccountId,
    pub call: Call,
    pub multisig_account: AccountId,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationNode {
    Fee(FeeNode),
    Confirmation(ConfirmationNode),
    MultisigOperation(MultisigOperationNode),
}

impl ValidationNode {
    pub fn fee(payer: AccountId, call: Call, class: DelegationClass) -> Self {
        ValidationNode::Fee(FeeNode { payer, call, class })
    }

    pub fn confirmation(confirmer: AccountId, call: Call, class: DelegationClass) -> Self {
        ValidationNode::Confirmation(ConfirmationNode {
            confirmer,
            call,
            class,
        })
    }

    pub fn multisig_operation(
        signatory: AccountId,
        call: Call,
        multisig_account: AccountId,
    ) -> Self {
        ValidationNode::MultisigOperation(MultisigOperationNode {
            signatory,
            call,
            multisig_account,
        })
    }

    /// The account this obligation is attributed to.
    pub fn account(&self) -> &AccountId {
        match self {
            ValidationNode::Fee(node) => &node.payer,
            ValidationNode::Confirmation(node) => &node.confirmer,
            ValidationNode::MultisigOperation(node) => &node.signatory,
        }
    }

    pub fn call(&self) -> &Call {
        match self {
            ValidationNode::Fee(node) => &node.call,
            ValidationNode::Confirmation(node) => &node.call,
            ValidationNode::MultisigOperation(node) => &node.call,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ValidationNode::Fee(_) => "fee",
            ValidationNode::Confirmation(_) => "confirmation",
            ValidationNode::MultisigOperation(_) => "multisig_operation",
        }
    }
}

/// Finished, read-only sequence of validation nodes.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationSequence {
    nodes: Vec<ValidationNode>,
}

impl ValidationSequence {
    pub fn nodes(&self) -> &[ValidationNode] {
        &self.nodes
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ValidationNode> {
        self.nodes.iter()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn fee_nodes(&self) -> impl Iterator<Item = &FeeNode> {
        self.nodes.iter().filter_map(|node| match node {
            ValidationNode::Fee(fee) => Some(fee),
            _ => None,
        })
    }

    pub fn confirmation_nodes(&self) -> impl Iterator<Item = &ConfirmationNode> {
        self.nodes.iter().filter_map(|node| match node {
            ValidationNode::Confirmation(confirmation) => Some(confirmation),
            _ => None,
        })
    }

    pub fn multisig_operations(&self) -> impl Iterator<Item = &MultisigOperationNode> {
        self.nodes.iter().filter_map(|node| match node {
            ValidationNode::MultisigOperation(operation) => Some(operation),
            _ => None,
        })
    }
}

impl<'a> IntoIterator for &'a ValidationSequence {
    type Item = &'a ValidationNode;
    type IntoIter = std::slice::Iter<'a, ValidationNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}

/// Append-only accumulator used during one resolution.
#[derive(Debug, Default)]
pub struct ValidationSequenceBuilder {
    nodes: Vec<ValidationNode>,
}

impl ValidationSequenceBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, node: ValidationNode) -> &mut Self {
        self.nodes.push(node);
        self
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn build(self) -> ValidationSequence {
        ValidationSequence { nodes: self.nodes }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn remark() -> Call {
        Call::new("System", "remark", json!({"remark": "0x01"}))
    }

    #[test]
    fn test_builder_keeps_order_and_duplicates() {
        let alice = AccountId::new([1; 32]);
        let bob = AccountId::new([2; 32]);

        let mut builder = ValidationSequenceBuilder::new();
        builder
            .add(ValidationNode::fee(alice, remark(), DelegationClass::Proxy))
            .add(ValidationNode::confirmation(bob, remark(), DelegationClass::Multisig))
            .add(ValidationNode::fee(alice, remark(), DelegationClass::Proxy));
        assert_eq!(builder.len(), 3);

        let sequence = builder.build();
        let kinds: Vec<&str> = sequence.iter().map(ValidationNode::kind).collect();
        assert_eq!(kinds, vec!["fee", "confirmation", "fee"]);
        assert_eq!(sequence.fee_nodes().count(), 2);
        assert_eq!(sequence.confirmation_nodes().count(), 1);
        assert_eq!(sequence.multisig_operations().count(), 0);
        assert_eq!(sequence.nodes()[1].account(), &bob);
    }

    #[test]
    fn test_empty_builder() {
        let builder = ValidationSequenceBuilder::new();
        assert!(builder.is_empty());
        assert!(builder.build().is_empty());
    }

    #[test]
    fn test_node_serialization_is_tagged() {
        let signatory = AccountId::new([1; 32]);
        let multisig = AccountId::new([9; 32]);
        let node = ValidationNode::multisig_operation(signatory, remark(), multisig);

        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["kind"], "multisig_operation");
        assert_eq!(json["signatory"], json!(signatory.to_string()));
        assert_eq!(json["multisig_account"], json!(multisig.to_string()));
        assert_eq!(json["call"]["function"], "remark");
    }
}
