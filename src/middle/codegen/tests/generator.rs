//! 模块框架与确定性测试

use crate::frontend::core::parser::parse;
use crate::middle::codegen::{generate, GenerateOptions, OutputFormat};

#[test]
fn test_esm_module() {
    let output = generate(&parse(""), &GenerateOptions::default());
    let expected = format!(
        "// Generated by asxr {}. Do not edit.\n\
         import {{ createBlock, createDom, propose, call, reactor }} from '@asxr/runtime';\n\
         \n\
         export default function mount(state, blocks = {{}}) {{\n  return blocks;\n}}\n",
        env!("CARGO_PKG_VERSION")
    );
    assert_eq!(output, expected);
}

#[test]
fn test_commonjs_module_with_custom_runtime() {
    let options = GenerateOptions {
        format: OutputFormat::CommonJs,
        runtime_path: "./runtime.js".to_string(),
        header: false,
    };
    let output = generate(&parse(""), &options);
    assert_eq!(
        output,
        "const { createBlock, createDom, propose, call, reactor } = require('./runtime.js');\n\
         \n\
         module.exports = function mount(state, blocks = {}) {\n  return blocks;\n};\n"
    );
}

#[test]
fn test_generation_is_deterministic() {
    let source = "@atomic[a] {\n  x: {{y}}\n  @dom p { textContent: 'hi' }\n  @for (i in list) { @block { n: i } }\n}\n\
                  @reactor { @every 500 { @set t = t + 1 } }\n\
                  @on ready { @call init() }";
    let program = parse(source);
    for format in [OutputFormat::Esm, OutputFormat::CommonJs] {
        let options = GenerateOptions {
            format,
            ..GenerateOptions::default()
        };
        let first = generate(&program, &options);
        let second = generate(&parse(source), &options);
        assert_eq!(first, second);
        assert!(first.contains("children0.push(createBlock('block', null, props2, children2));"), "{}", first);
    }
}

#[test]
fn test_output_format_parsing() {
    assert_eq!("esm".parse::<OutputFormat>(), Ok(OutputFormat::Esm));
    assert_eq!("CJS".parse::<OutputFormat>(), Ok(OutputFormat::CommonJs));
    assert_eq!("commonjs".parse::<OutputFormat>(), Ok(OutputFormat::CommonJs));
    assert!("amd".parse::<OutputFormat>().is_err());
    assert_eq!(OutputFormat::CommonJs.to_string(), "cjs");

    let parsed: OutputFormat = serde_json::from_str("\"cjs\"").unwrap();
    assert_eq!(parsed, OutputFormat::CommonJs);
    let parsed: OutputFormat = serde_json::from_str("\"esm\"").unwrap();
    assert_eq!(parsed, OutputFormat::Esm);
}
