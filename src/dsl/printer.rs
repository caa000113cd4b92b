use crate::graph::{Node, NodeRole, Properties};
use std::borrow::Cow;

/// Transition target token standing for the `FAIL` node.
pub const FAIL_TARGET: &str = "$FAIL";
/// Transition target token standing for the `END` node.
pub const END_TARGET: &str = "$END";

/// Appends `label: name --key=value ...` for a step.
pub(super) fn write_step(out: &mut String, node: &Node) {
    if let Some(label) = node.label() {
        out.push_str(label);
        out.push_str(": ");
    }
    out.push_str(node.name());
    write_properties(out, node.properties());
}

/// Appends ` --key=value` pairs, quoting values that contain a space.
pub(super) fn write_properties(out: &mut String, properties: Option<&Properties>) {
    let Some(properties) = properties else {
        return;
    };
    for (key, value) in properties.iter() {
        out.push_str(" --");
        out.push_str(key);
        out.push('=');
        if value.contains(' ') && !value.starts_with('\'') {
            out.push('\'');
            out.push_str(value);
            out.push('\'');
        } else {
            out.push_str(value);
        }
    }
}

/// Appends ` status->target` for one transition link.
pub(super) fn write_transition(out: &mut String, status: &str, target: &Node) {
    out.push(' ');
    out.push_str(&transition_status(status));
    out.push_str("->");
    out.push_str(&transition_target(target));
    write_properties(out, target.properties());
}

/// Numeric exit codes stay bare; textual statuses are single-quoted.
fn transition_status(status: &str) -> Cow<'_, str> {
    if status.parse::<i32>().is_ok() || status.starts_with('\'') {
        Cow::Borrowed(status)
    } else {
        Cow::Owned(format!("'{}'", status))
    }
}

fn transition_target(target: &Node) -> Cow<'_, str> {
    match (target.role(), target.label()) {
        (NodeRole::Fail, _) => Cow::Borrowed(FAIL_TARGET),
        (NodeRole::End, _) => Cow::Borrowed(END_TARGET),
        (_, Some(label)) => Cow::Owned(format!("{}: {}", label, target.name())),
        (_, None) => Cow::Borrowed(target.name()),
    }
}
