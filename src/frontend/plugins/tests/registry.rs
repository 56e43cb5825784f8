//! 注册表测试

use crate::frontend::core::parser::ast::{Node, NodeKind};
use crate::frontend::plugins::{Plugin, PluginError, PluginRegistry};

#[test]
fn test_registry_with_builtins() {
    let registry = PluginRegistry::with_builtins();
    assert_eq!(registry.names(), vec!["jsx", "vue", "control-flow"]);
    assert!(registry.contains("vue"));
    assert!(registry.get("svelte").is_none());
}

#[test]
fn test_builtin_patterns() {
    let registry = PluginRegistry::with_builtins();

    let control_flow = registry.resolve(&["control-flow"]).unwrap();
    assert!(control_flow.patterns().is_empty());

    let jsx = registry.resolve(&["jsx"]).unwrap();
    assert_eq!(jsx.patterns()[0].ast_node, "JSXElement");
    assert!(!jsx.patterns()[0].interpolation);

    let vue = registry.resolve(&["vue"]).unwrap();
    assert_eq!(vue.patterns()[0].ast_node, "VueElement");
    assert!(vue.patterns()[0].interpolation);
}

#[test]
fn test_jsx_and_vue_conflict() {
    let registry = PluginRegistry::with_builtins();
    let err = registry.resolve(&["jsx", "vue"]).unwrap_err();
    assert_eq!(
        err,
        PluginError::Conflict {
            plugin: "jsx".to_string(),
            other: "vue".to_string(),
        }
    );
}

#[test]
fn test_one_sided_conflict_is_detected() {
    let mut registry = PluginRegistry::new();
    registry.register(Plugin::builder("a", "1.0").build().unwrap()).unwrap();
    registry
        .register(Plugin::builder("b", "1.0").conflicts("a").build().unwrap())
        .unwrap();

    assert!(matches!(
        registry.resolve(&["a", "b"]),
        Err(PluginError::Conflict { .. })
    ));
    assert!(registry.resolve(&["a"]).is_ok());
}

#[test]
fn test_unknown_plugin() {
    let registry = PluginRegistry::with_builtins();
    assert_eq!(
        registry.resolve(&["jsx", "svelte"]).unwrap_err(),
        PluginError::NotFound {
            name: "svelte".to_string()
        }
    );
}

#[test]
fn test_duplicate_registration() {
    let mut registry = PluginRegistry::with_builtins();
    let again = Plugin::builder("jsx", "9.9").build().unwrap();
    assert!(matches!(
        registry.register(again),
        Err(PluginError::AlreadyRegistered { .. })
    ));
}

#[test]
fn test_invalid_meta() {
    assert!(matches!(
        Plugin::builder("", "1.0").build(),
        Err(PluginError::InvalidMeta { .. })
    ));
    assert!(matches!(
        Plugin::builder("bad", "1.0").syntax("(", "X", 0).build(),
        Err(PluginError::InvalidMeta { .. })
    ));
}

#[test]
fn test_resolution_keeps_registration_order_and_dedupes() {
    let registry = PluginRegistry::with_builtins();
    let set = registry.resolve(&["control-flow", "vue", "vue"]).unwrap();
    assert_eq!(set.names(), vec!["vue", "control-flow"]);
}

#[test]
fn test_patterns_sorted_by_priority() {
    let mut registry = PluginRegistry::new();
    registry
        .register(
            Plugin::builder("low", "1")
                .syntax("^<a", "Low", 1)
                .syntax("^<b", "LowToo", 1)
                .build()
                .unwrap(),
        )
        .unwrap();
    registry
        .register(Plugin::builder("high", "1").syntax("^<c", "High", 9).build().unwrap())
        .unwrap();

    let set = registry.resolve(&["low", "high"]).unwrap();
    let order: Vec<_> = set.patterns().iter().map(|p| p.ast_node.as_str()).collect();
    assert_eq!(order, vec!["High", "Low", "LowToo"]);
}

#[test]
fn test_hooks_run_in_order() {
    let mut registry = PluginRegistry::new();
    registry
        .register(
            Plugin::builder("first", "1")
                .before_parse(|s| s.replace("A", "B"))
                .build()
                .unwrap(),
        )
        .unwrap();
    registry
        .register(
            Plugin::builder("second", "1")
                .before_parse(|s| s.replace("B", "C"))
                .build()
                .unwrap(),
        )
        .unwrap();

    let set = registry.resolve(&["second", "first"]).unwrap();
    assert_eq!(set.before_parse("A"), "C");
}

#[test]
fn test_explicit_after_parse_hook() {
    let mut registry = PluginRegistry::new();
    registry
        .register(
            Plugin::builder("strip", "1")
                .after_parse(|program| {
                    program.body.clear();
                    Ok(())
                })
                .build()
                .unwrap(),
        )
        .unwrap();
    registry
        .register(
            Plugin::builder("fail", "1")
                .after_parse(|_| Err("nope".to_string()))
                .build()
                .unwrap(),
        )
        .unwrap();

    let mut program = crate::frontend::core::parser::parse("@atomic { }");
    registry
        .resolve(&["strip"])
        .unwrap()
        .after_parse(&mut program)
        .unwrap();
    assert!(program.body.is_empty());

    let err = registry
        .resolve(&["fail"])
        .unwrap()
        .after_parse(&mut program)
        .unwrap_err();
    assert_eq!(
        err,
        PluginError::HookFailed {
            plugin: "fail".to_string(),
            message: "nope".to_string(),
        }
    );
}

#[test]
fn test_handler_replaces_nested_sentinels() {
    let mut registry = PluginRegistry::new();
    registry
        .register(
            Plugin::builder("widgets", "1")
                .syntax("^<w", "Widget", 0)
                .handler("Widget", |element, span| {
                    Ok(Node::new(
                        NodeKind::AtomicBlock {
                            block_type: "widget".to_string(),
                            id: Some(element.tag.clone()),
                            body: vec![],
                        },
                        span,
                    ))
                })
                .build()
                .unwrap(),
        )
        .unwrap();
    let set = registry.resolve(&["widgets"]).unwrap();

    let source = "@dom main {\n  @if (x) {\n    <wbox />\n  }\n}";
    let mut program = crate::frontend::core::parser::Parser::with_patterns(source, set.patterns()).parse();
    set.after_parse(&mut program).unwrap();

    let mut found = Vec::new();
    crate::frontend::core::parser::walk::for_each_program_node(&program, &mut |node: &Node| {
        found.push(node.type_name().to_string());
    });
    assert!(found.contains(&"AtomicBlock".to_string()));
    assert!(!found.contains(&"PluginNode".to_string()));
}

#[test]
fn test_plugin_error_diagnostics() {
    let conflict = PluginError::Conflict {
        plugin: "jsx".to_string(),
        other: "vue".to_string(),
    }
    .to_diagnostic(None);
    assert_eq!(conflict.code, "PLUGIN_CONFLICT");
    assert_eq!(conflict.message, "Plugin 'jsx' conflicts with 'vue'");

    let missing = PluginError::NotFound {
        name: "x".to_string(),
    }
    .to_diagnostic(None);
    assert_eq!(missing.code, "PLUGIN_ERROR");
}
