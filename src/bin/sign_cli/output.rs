//! Output formatting for delegated-sign CLI
//!
//! Provides human-readable and JSON output formatting for all commands.

use serde::Serialize;

use delegated_sign::{CallLayer, ValidationNode, ValidationSequence, ValidationSequenceError};

/// Format a validation sequence for display
pub fn format_sequence(sequence: &ValidationSequence) -> String {
    let mut out = format!(
        "\x1b[1mValidation sequence:\x1b[0m {} node(s)\n",
        sequence.len()
    );

    for (i, node) in sequence.iter().enumerate() {
        let detail = match node {
            ValidationNode::Fee(fee) => format!("({})", fee.class),
            ValidationNode::Confirmation(confirmation) => format!("({})", confirmation.class),
            ValidationNode::MultisigOperation(operation) => {
                format!("for multisig {}", operation.multisig_account.short())
            }
        };
        out.push_str(&format!(
            "  {:>2}. {:<18} {}  {}  {}\n",
            i + 1,
            node.kind(),
            node.account().short(),
            node.call().path(),
            detail
        ));
    }

    out
}

pub fn format_sequence_json(sequence: &ValidationSequence) -> String {
    #[derive(Serialize)]
    struct SequenceJson<'a> {
        success: bool,
        node_count: usize,
        #[serde(flatten)]
        sequence: &'a ValidationSequence,
    }

    let payload = SequenceJson {
        success: true,
        node_count: sequence.len(),
        sequence,
    };
    serde_json::to_string_pretty(&payload).unwrap_or_else(|_| "{}".to_string())
}

/// Format call layers, outermost first
pub fn format_layers(layers: &[CallLayer]) -> String {
    let mut out = String::new();
    for layer in layers {
        let indent = "  ".repeat(layer.depth);
        match layer.wrapper {
            Some(kind) => out.push_str(&format!(
                "{}[{}] {} ({})\n",
                indent,
                layer.depth,
                layer.call,
                kind.class()
            )),
            None => out.push_str(&format!("{}[{}] {}\n", indent, layer.depth, layer.call)),
        }
    }
    out
}

/// Format an error for display
pub fn format_error(error: &anyhow::Error, json_output: bool) -> String {
    let security_relevant = error
        .chain()
        .filter_map(|cause| cause.downcast_ref::<ValidationSequenceError>())
        .any(ValidationSequenceError::is_security_relevant);

    if json_output {
        #[derive(Serialize)]
        struct ErrorJson {
            success: bool,
            error: String,
            #[serde(skip_serializing_if = "Option::is_none")]
            cause: Option<String>,
            security_relevant: bool,
        }

        let err = ErrorJson {
            success: false,
            error: error.to_string(),
            cause: error.source().map(|e| e.to_string()),
            security_relevant,
        };
        serde_json::to_string_pretty(&err).unwrap_or_else(|_| "{}".to_string())
    } else {
        let mut out = format!("\x1b[31mError:\x1b[0m {}\n", error);
        let mut causes = error.chain().skip(1).peekable();
        if causes.peek().is_some() {
            out.push_str("Caused by:\n");
            for (idx, cause) in causes.enumerate() {
                out.push_str(&format!("  {}: {}\n", idx + 1, cause));
            }
        }
        if security_relevant {
            out.push_str("The call does not match the expected signers; do not sign it.\n");
        }
        out
    }
}
