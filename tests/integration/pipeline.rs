//! Compiler pipeline: plugins, validation and generated modules

use asxr::util::config::{load_project_config, CONFIG_FILE_NAME};
use asxr::{compile, compile_file, CompileError, CompileOptions, Compiler, GenerateOptions, OutputFormat};
use std::fs;

fn options_without_header() -> CompileOptions {
    CompileOptions {
        generate: GenerateOptions {
            header: false,
            ..GenerateOptions::default()
        },
        ..CompileOptions::default()
    }
}

fn codes(err: &CompileError) -> Vec<String> {
    err.diagnostics().into_iter().map(|d| d.code).collect()
}

#[test]
fn test_compile_counter_module() {
    let source = "@state { count: 0 }\n\
                  @atomic[counter] {\n  label: {{count}}\n  step: 1\n}";
    let output = compile(source, options_without_header()).unwrap();

    let expected = "import { createBlock, createDom, propose, call, reactor } from '@asxr/runtime';\n\
                    \n\
                    export default function mount(state, blocks = {}) {\n\
                    \x20 state.set('count', 0);\n\
                    \x20 {\n\
                    \x20   const props0 = {};\n\
                    \x20   const children0 = [];\n\
                    \x20   props0.label = () => state.get('count');\n\
                    \x20   props0.step = 1;\n\
                    \x20   blocks['counter'] = createBlock('atomic', 'counter', props0, children0);\n\
                    \x20 }\n\
                    \x20 return blocks;\n\
                    }\n";
    assert_eq!(output.code, expected);
    assert!(output.diagnostics.is_empty());
}

#[test]
fn test_compile_fails_with_diagnostics() {
    let err = compile("@atomic[a] { }\n@atomic[a] { x: #nowhere }", CompileOptions::default())
        .unwrap_err();
    match &err {
        CompileError::Failed { errors, .. } => assert_eq!(*errors, 2),
        other => panic!("Expected Failed, got {:?}", other),
    }
    assert_eq!(codes(&err), vec!["DUPLICATE_ID", "UNDEFINED_REFERENCE"]);
}

#[test]
fn test_parse_errors_are_reported_together() {
    let err = compile("@atomic[a] { x: }\n@atomic[b] { y: 2 }\n@atomic[c] { z: }", CompileOptions::default())
        .unwrap_err();
    assert_eq!(codes(&err), vec!["PARSE_ERROR", "PARSE_ERROR"]);
}

#[test]
fn test_jsx_directive_enables_dialect() {
    let source = "@use jsx\n<div className=\"app\">Hi</div>";
    let output = compile(source, options_without_header()).unwrap();

    assert!(output.code.contains("// @use jsx"), "{}", output.code);
    assert!(output.code.contains("props0.className = 'app';"), "{}", output.code);
    assert!(output.code.contains("props1.textContent = 'Hi';"), "{}", output.code);
    assert!(
        output.code.contains("children0.push(createDom('#text', null, props1, children1));"),
        "{}",
        output.code
    );
    assert!(output.code.contains("createDom('div', null, props0, children0);"), "{}", output.code);
}

#[test]
fn test_jsx_style_object() {
    let source = "@use jsx\n<div style={{ color: \"red\" }}>hi</div>";
    let output = compile(source, options_without_header()).unwrap();
    assert!(output.code.contains("props0.style = { color: 'red' };"), "{}", output.code);
}

#[test]
fn test_vue_plugin_from_options() {
    let options = CompileOptions {
        plugins: vec!["vue".to_string()],
        ..options_without_header()
    };
    let output = compile("<p v-if=\"visible\">shown</p>", options).unwrap();
    assert!(output.code.contains("if (state.get('visible')) {"), "{}", output.code);
    assert!(output.code.contains("createDom('p', null, props0, children0);"), "{}", output.code);
}

#[test]
fn test_conflicting_directives_fail() {
    let err = compile("@use jsx\n@use vue\n@atomic { }", CompileOptions::default()).unwrap_err();
    assert!(matches!(err, CompileError::Plugin(_)));
    assert_eq!(codes(&err), vec!["PLUGIN_CONFLICT"]);
}

#[test]
fn test_analyze_never_fails() {
    let compiler = Compiler::new();
    let analysis = compiler.analyze("bad.asxr", "@use nothing\n@atomic[a] { }\n@atomic[a] { }");
    assert!(analysis.has_errors());
    let codes: Vec<_> = analysis.diagnostics.iter().map(|d| d.code.as_str()).collect();
    assert_eq!(codes, vec!["PLUGIN_ERROR", "DUPLICATE_ID"]);
    assert_eq!(analysis.program.body.len(), 3);
}

#[test]
fn test_commonjs_output() {
    let options = CompileOptions {
        generate: GenerateOptions {
            format: OutputFormat::CommonJs,
            runtime_path: "./rt.js".to_string(),
            header: false,
        },
        ..CompileOptions::default()
    };
    let output = compile("@atomic { }", options).unwrap();
    assert!(output
        .code
        .starts_with("const { createBlock, createDom, propose, call, reactor } = require('./rt.js');\n"));
    assert!(output.code.ends_with("};\n"));
}

#[test]
fn test_compiler_is_shareable_across_threads() {
    let compiler = Compiler::new();
    let sources: Vec<String> = (0..8)
        .map(|i| format!("@atomic[b{}] {{ n: {} }}", i, i))
        .collect();

    let outputs: Vec<String> = std::thread::scope(|scope| {
        let handles: Vec<_> = sources
            .iter()
            .map(|source| scope.spawn(|| compiler.compile("t.asxr", source).unwrap().code))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    for (i, code) in outputs.iter().enumerate() {
        assert!(code.contains(&format!("blocks['b{}'] = createBlock('atomic', 'b{}'", i, i)));
        assert_eq!(code, &compiler.compile("t.asxr", &sources[i]).unwrap().code);
    }
}

#[test]
fn test_compile_file_with_project_schema() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("card.json"),
        r#"{ "card": { "required": ["title"], "properties": { "title": { "type": "string" } } } }"#,
    )
    .unwrap();
    fs::write(
        dir.path().join(CONFIG_FILE_NAME),
        "[validate]\nschemas = [\"card.json\"]\n",
    )
    .unwrap();
    let good = dir.path().join("good.asxr");
    let bad = dir.path().join("bad.asxr");
    fs::write(&good, "@card[c] { title: \"Hello\" }").unwrap();
    fs::write(&bad, "@card[c] { title: 42 }\n@card[d] { }").unwrap();

    let options = load_project_config(dir.path())
        .unwrap()
        .compile_options()
        .unwrap();

    let output = compile_file(&good, options.clone()).unwrap();
    assert!(output.code.contains("createBlock('card', 'c', props0, children0)"));

    let err = compile_file(&bad, options).unwrap_err();
    let err = err.downcast_ref::<CompileError>().unwrap();
    assert_eq!(codes(err), vec!["TYPE_MISMATCH", "REQUIRED"]);
}

#[test]
fn test_compile_file_missing() {
    let err = compile_file(std::path::Path::new("/no/such/file.asxr"), CompileOptions::default())
        .unwrap_err();
    assert!(err.to_string().contains("Failed to read file"));
}
