//! Integration tests for the usage-marking engine
//!
//! These exercise the full pipeline (parse -> classify -> mark) and assert
//! on the accumulated per-component usage records.

use propscan::components::{Component, ComponentKind};
use propscan::engine::{analyze_source, EngineConfig, UnitAnalysis};
use std::path::Path;

fn analyze(source: &str) -> UnitAnalysis {
    analyze_source(Path::new("test.jsx"), source, &EngineConfig::default()).unwrap()
}

fn analyze_with_react(source: &str, version: &str) -> UnitAnalysis {
    let config = EngineConfig::from_react_version(Some(version));
    analyze_source(Path::new("test.jsx"), source, &config).unwrap()
}

fn component<'a>(unit: &'a UnitAnalysis, name: &str) -> &'a Component {
    unit.components
        .iter()
        .find(|c| c.name.as_deref() == Some(name))
        .unwrap_or_else(|| panic!("component {} not found", name))
}

/// Dotted usage paths of a component, in traversal order
fn paths(component: &Component) -> Vec<String> {
    component
        .used_properties
        .iter()
        .map(|record| record.path.join("."))
        .collect()
}

// ============================================================================
// Member chain resolution
// ============================================================================

#[test]
fn test_direct_chain_records_full_path() {
    let unit = analyze(
        r#"
        function Card(props) {
            return <div>{props.a.b.c}</div>;
        }
        "#,
    );

    let card = component(&unit, "Card");
    assert_eq!(paths(card), vec!["a.b.c"]);
    assert!(!card.suppress_unused_check);
}

#[test]
fn test_class_render_single_prop() {
    let unit = analyze(
        r#"
        class Greeting extends React.Component {
            render() {
                return <div>{this.props.name}</div>;
            }
        }
        "#,
    );

    let greeting = component(&unit, "Greeting");
    assert_eq!(greeting.kind, ComponentKind::Class);
    assert_eq!(paths(greeting), vec!["name"]);
    assert!(!greeting.suppress_unused_check);
}

#[test]
fn test_nested_chain_in_lifecycle_method() {
    let unit = analyze(
        r#"
        class Header extends Component {
            componentWillReceiveProps(nextProps) {
                if (nextProps.config.theme) {
                    this.update();
                }
            }
        }
        "#,
    );

    let header = component(&unit, "Header");
    assert_eq!(paths(header), vec!["config.theme"]);
}

#[test]
fn test_instance_qualified_chain_in_render() {
    let unit = analyze(
        r#"
        class Page extends Component {
            render() {
                return <span>{this.props.config.theme.accent}</span>;
            }
        }
        "#,
    );

    let page = component(&unit, "Page");
    assert_eq!(paths(page), vec!["config.theme.accent"]);
}

#[test]
fn test_bare_props_in_class_helper_is_ignored() {
    let unit = analyze(
        r#"
        class Table extends Component {
            helper() {
                const props = buildProps();
                return props.rows;
            }
            render() {
                return <table>{this.props.data}</table>;
            }
        }
        "#,
    );

    let table = component(&unit, "Table");
    assert_eq!(paths(table), vec!["data"]);
}

// ============================================================================
// Computed keys
// ============================================================================

#[test]
fn test_computed_key_sets_suppress_without_record() {
    let unit = analyze(
        r#"
        function Grid(props) {
            return <div>{props[window.key]}</div>;
        }
        "#,
    );

    let grid = component(&unit, "Grid");
    assert!(grid.used_properties.is_empty());
    assert!(grid.suppress_unused_check);
}

#[test]
fn test_string_subscript_records_literal_key() {
    let unit = analyze(
        r#"
        function Grid(props) {
            return <div>{props["label"]}</div>;
        }
        "#,
    );

    let grid = component(&unit, "Grid");
    assert_eq!(paths(grid), vec!["label"]);
    assert!(!grid.suppress_unused_check);
}

// ============================================================================
// Destructuring
// ============================================================================

#[test]
fn test_destructured_parameter_records_in_order() {
    let unit = analyze(
        r#"
        const Badge = ({ icon, label }) => (
            <span>{icon}{label}</span>
        );
        "#,
    );

    let badge = component(&unit, "Badge");
    assert_eq!(badge.kind, ComponentKind::Function);
    assert_eq!(paths(badge), vec!["icon", "label"]);
}

#[test]
fn test_destructured_parameter_with_default_value() {
    let unit = analyze(
        r#"
        function Badge({ icon } = {}) {
            return <span>{icon}</span>;
        }
        "#,
    );

    let badge = component(&unit, "Badge");
    assert_eq!(paths(badge), vec!["icon"]);
}

#[test]
fn test_renamed_binding_records_schema_key() {
    let unit = analyze(
        r#"
        function Title(props) {
            const { label: text } = props;
            return <h1>{text}</h1>;
        }
        "#,
    );

    let title = component(&unit, "Title");
    assert_eq!(paths(title), vec!["label"]);
}

#[test]
fn test_rest_binding_records_and_suppresses() {
    let unit = analyze(
        r#"
        function Card(props) {
            const { title, ...rest } = props;
            return <div>{title}</div>;
        }
        "#,
    );

    let card = component(&unit, "Card");
    assert_eq!(paths(card), vec!["title"]);
    assert!(card.suppress_unused_check);
}

#[test]
fn test_self_destructuring_through_instance() {
    let unit = analyze(
        r#"
        class Profile extends Component {
            render() {
                const { props: { firstName } } = this;
                return <div>{firstName}</div>;
            }
        }
        "#,
    );

    let profile = component(&unit, "Profile");
    assert_eq!(paths(profile), vec!["firstName"]);
}

#[test]
fn test_destructuring_from_instance_props() {
    let unit = analyze(
        r#"
        class Profile extends Component {
            render() {
                const { firstName, lastName } = this.props;
                return <div>{firstName} {lastName}</div>;
            }
        }
        "#,
    );

    let profile = component(&unit, "Profile");
    assert_eq!(paths(profile), vec!["firstName", "lastName"]);
}

#[test]
fn test_destructuring_below_a_resolved_chain() {
    let unit = analyze(
        r#"
        function Panel(props) {
            const { width } = props.size;
            return <div style={{ width }} />;
        }
        "#,
    );

    let panel = component(&unit, "Panel");
    // The direct read of `size` and the extracted field both count
    assert_eq!(paths(panel), vec!["size", "size.width"]);
}

#[test]
fn test_lifecycle_signature_destructuring() {
    let unit = analyze(
        r#"
        class Header extends Component {
            componentWillReceiveProps({ active }) {
                this.refresh(active);
            }
        }
        "#,
    );

    let header = component(&unit, "Header");
    assert_eq!(paths(header), vec!["active"]);
}

// ============================================================================
// State updater
// ============================================================================

#[test]
fn test_state_updater_records_only_updater_body() {
    let unit = analyze(
        r#"
        class Counter extends Component {
            increment() {
                this.setState(
                    (state, props) => ({ next: state.n + props.step }),
                    () => console.log(props.ignored)
                );
            }
        }
        "#,
    );

    let counter = component(&unit, "Counter");
    assert_eq!(paths(counter), vec!["step"]);
}

#[test]
fn test_state_updater_destructured_props_parameter() {
    let unit = analyze(
        r#"
        class Counter extends Component {
            increment() {
                this.setState((state, { step }) => ({ next: state.n + step }));
            }
        }
        "#,
    );

    let counter = component(&unit, "Counter");
    assert_eq!(paths(counter), vec!["step"]);
}

#[test]
fn test_updater_second_param_under_custom_name() {
    let unit = analyze(
        r#"
        class Counter extends Component {
            increment() {
                this.setState((state, incoming) => ({ next: incoming.step }));
            }
        }
        "#,
    );

    let counter = component(&unit, "Counter");
    assert_eq!(paths(counter), vec!["step"]);
}

// ============================================================================
// Spread forwarding
// ============================================================================

#[test]
fn test_jsx_spread_attribute_suppresses() {
    let unit = analyze(
        r#"
        function Wrapper(props) {
            return <Inner {...props} />;
        }
        "#,
    );

    let wrapper = component(&unit, "Wrapper");
    assert!(wrapper.suppress_unused_check);
}

// ============================================================================
// Lifecycle name gating
// ============================================================================

#[test]
fn test_async_safe_lifecycle_names_gated_by_version() {
    let source = r#"
        class Header extends Component {
            UNSAFE_componentWillUpdate(nextProps) {
                this.refresh(nextProps.active);
            }
        }
    "#;

    let current = analyze(source);
    assert_eq!(paths(component(&current, "Header")), vec!["active"]);

    let legacy = analyze_with_react(source, "16.2.0");
    assert!(component(&legacy, "Header").used_properties.is_empty());
}

#[test]
fn test_synchronous_lifecycle_names_always_active() {
    let source = r#"
        class Header extends Component {
            componentDidUpdate(prevProps) {
                this.log(prevProps.active);
            }
        }
    "#;

    let legacy = analyze_with_react(source, "15.0.0");
    assert_eq!(paths(component(&legacy, "Header")), vec!["active"]);
}

// ============================================================================
// Custom validators
// ============================================================================

#[test]
fn test_custom_validator_body_counts_as_usage() {
    let unit = analyze(
        r#"
        function Card(props) {
            return <div>{props.title}</div>;
        }
        Card.propTypes = {
            title: PropTypes.string,
            size: function(props) {
                return props.size > 10 ? new Error('too big') : null;
            },
        };
        "#,
    );

    let card = component(&unit, "Card");
    assert!(paths(card).contains(&"size".to_string()));
}

#[test]
fn test_custom_validator_destructured_parameter() {
    let unit = analyze(
        r#"
        function Card(props) {
            return <div>{props.title}</div>;
        }
        Card.propTypes = {
            theme: ({ theme }) => (theme ? null : new Error('missing')),
        };
        "#,
    );

    let card = component(&unit, "Card");
    assert!(paths(card).contains(&"theme".to_string()));
}

// ============================================================================
// Determinism
// ============================================================================

#[test]
fn test_analysis_is_deterministic() {
    let source = r#"
        function Card(props) {
            const { title, ...rest } = props;
            return <div title={props.config.theme}>{title}</div>;
        }
        class Profile extends Component {
            componentWillReceiveProps({ active }) {
                this.refresh(active);
            }
            render() {
                return <div>{this.props.name}</div>;
            }
        }
    "#;

    let first = analyze(source);
    let second = analyze(source);

    let shape = |unit: &UnitAnalysis| -> Vec<(Option<String>, Vec<String>, bool)> {
        unit.components
            .iter()
            .map(|c| (c.name.clone(), paths(c), c.suppress_unused_check))
            .collect()
    };

    assert_eq!(shape(&first), shape(&second));
}
