//! Unit tests for the small building blocks of the graph model.
use flowtext::prelude::*;

#[test]
fn test_node_roles() {
    assert_eq!(NodeRole::of("START"), NodeRole::Start);
    assert_eq!(NodeRole::of("END"), NodeRole::End);
    assert_eq!(NodeRole::of("FAIL"), NodeRole::Fail);
    assert_eq!(NodeRole::of("SYNC"), NodeRole::Sync);
    assert_eq!(NodeRole::of("start"), NodeRole::Step);
    assert_eq!(NodeRole::of("$END"), NodeRole::Step);

    assert!(Node::new("0", "START").is_start());
    assert!(Node::new("9", "SYNC").is_sync());
    assert!(!Node::new("1", "timestamp").is_end());
}

#[test]
fn test_node_label_and_display() {
    let node = Node::new("3", "timestamp");
    assert_eq!(node.label(), None);
    assert_eq!(node.to_string(), "3:timestamp");

    let mut metadata = Properties::new();
    metadata.insert("owner", "ops");
    let node = node.with_metadata(metadata).with_label("t3");
    assert_eq!(node.label(), Some("t3"));
    assert_eq!(node.metadata().and_then(|m| m.get("owner")), Some("ops"));
    assert_eq!(node.to_string(), "3:t3:timestamp");
}

#[test]
fn test_properties_keep_insertion_order() {
    let mut properties = Properties::new();
    properties.insert("b", "1");
    properties.insert("a", "2");
    properties.insert("b", "3");

    let entries: Vec<(&str, &str)> = properties.iter().collect();
    assert_eq!(entries, vec![("b", "3"), ("a", "2")]);
    assert_eq!(properties.len(), 2);
    assert!(properties.contains_key("a"));
    assert_eq!(properties.get("c"), None);
}

#[test]
fn test_link_properties() {
    let link = Link::new("1", "2");
    assert!(link.has_no_properties());
    assert!(!link.has_transition_set());
    assert_eq!(link.to_string(), "1-2");

    let link = Link::transition("1", "2", "COMPLETED");
    assert!(link.has_transition_set());
    assert!(!link.has_no_properties());
    assert_eq!(link.transition_name(), Some("COMPLETED"));
}

#[test]
fn test_error_messages() {
    let err = GraphError::MissingReservedNode { name: "START" };
    assert_eq!(err.to_string(), "Invalid workflow graph: no 'START' node found");

    let err = GraphError::NodeNotFound {
        missing_node_id: "7".to_string(),
        source_node_id: "1".to_string(),
    };
    assert!(err.to_string().starts_with("Invalid workflow graph: node '7' not found"));

    let err = GraphError::RecursionLimit { limit: 5 };
    assert!(err.to_string().contains("maximum nesting depth of 5"));
}

#[test]
fn test_default_options() {
    let graph = Graph::default();
    let writer = DslWriter::new(&graph);
    assert_eq!(writer.options(), DslOptions::default());
    assert_eq!(
        DslWriter::builder(&graph)
            .with_options(DslOptions {
                drain_limit: 3,
                max_depth: 4
            })
            .build()
            .options()
            .max_depth,
        4
    );
}
