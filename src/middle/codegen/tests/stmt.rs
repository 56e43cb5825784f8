//! 语句生成测试

use super::mount_body;

#[test]
fn test_if_chain_fills_enclosing_props() {
    let source = "@atomic[a] {\n  @if (x > 10) { value: true } @else @if (x > 5) { value: 1 } @else { value: false }\n}";
    let expected = "\
{
  const props0 = {};
  const children0 = [];
  if (x > 10) {
    props0.value = true;
  } else if (x > 5) {
    props0.value = 1;
  } else {
    props0.value = false;
  }
  blocks['a'] = createBlock('atomic', 'a', props0, children0);
}
";
    assert_eq!(mount_body(source), expected);
}

#[test]
fn test_top_level_if_creates_standalone_blocks() {
    let expected = "\
if (ok) {
  {
    const props0 = {};
    const children0 = [];
    createBlock('atomic', null, props0, children0);
  }
}
";
    assert_eq!(mount_body("@if (ok) { @atomic { } }"), expected);
}

#[test]
fn test_for_loops() {
    assert_eq!(
        mount_body("@for (item, i in {{items}}) { @set last = item.name }"),
        "for (const [i, item] of Array.from(state.get('items')).entries()) {\n  state.set('last', item.name);\n}\n"
    );
    assert_eq!(mount_body("@for (row of rows) { }"), "for (const row of rows) {\n}\n");
}

#[test]
fn test_while_and_do_while() {
    assert_eq!(
        mount_body("@while (n < 3) { @set n = n + 1 }"),
        "while (n < 3) {\n  state.set('n', n + 1);\n}\n"
    );
    assert_eq!(
        mount_body("@do { @set n = n + 1 }\n@while (n < 3)"),
        "do {\n  state.set('n', n + 1);\n} while (n < 3);\n"
    );
}

#[test]
fn test_switch() {
    let source = "@switch ({{mode}}) {\n  @case \"a\" { @set x = 1 }\n  @default { @set x = 0 }\n}";
    let expected = "\
switch (state.get('mode')) {
  case 'a': {
    state.set('x', 1);
    break;
  }
  default: {
    state.set('x', 0);
    break;
  }
}
";
    assert_eq!(mount_body(source), expected);
}

#[test]
fn test_server_calls() {
    assert_eq!(
        mount_body("@call \"api/users\"({{page}}, 20) -> users.list"),
        "call('api/users', [state.get('page'), 20], 'users.list');\n"
    );
    assert_eq!(mount_body("@call refresh()"), "call('refresh', [], null);\n");
}

#[test]
fn test_state_definition() {
    assert_eq!(
        mount_body("@state { count: 0, name: 'x' }"),
        "state.set('count', 0);\nstate.set('name', 'x');\n"
    );
}

#[test]
fn test_reactor_and_timer() {
    let expected = "\
blocks['r1'] = reactor('reactor', { id: 'r1' }, () => {
  reactor('every', { interval: 1000 }, () => {
    state.set('tick', tick + 1);
  });
});
";
    assert_eq!(
        mount_body("@reactor[r1] { @every 1000 { @set tick = tick + 1 } }"),
        expected
    );
}

#[test]
fn test_trigger_with_otherwise() {
    let expected = "\
reactor('on', { trigger: () => online }, () => {
  state.set('status', 'up');
}, () => {
  state.set('status', 'down');
});
";
    assert_eq!(
        mount_body("@on online { status: 'up' } @else { status: 'down' }"),
        expected
    );
}

#[test]
fn test_unknown_and_directive_markers() {
    assert_eq!(
        mount_body("@use jsx\n@constraint c: x > 0"),
        "// @use jsx\n// unknown: Constraint\n"
    );
}
