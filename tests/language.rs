use std::{cell::RefCell, fs, io::Write, rc::Rc};

use pretty_assertions::assert_eq;
use tommy::{
    error::{ParseError, RuntimeError},
    get_result,
    interpreter::evaluator::core::Context,
    parse,
};
use walkdir::WalkDir;

#[derive(Clone, Default)]
struct Captured(Rc<RefCell<Vec<u8>>>);

impl Write for Captured {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Runs `src` and returns what it printed, along with the outcome.
fn run_captured(src: &str) -> (Result<(), RuntimeError>, String) {
    let program = parse(src).unwrap_or_else(|e| panic!("Script failed to parse: {e}"));
    let captured = Captured::default();
    let mut context = Context::with_output(Box::new(captured.clone()));
    let result = context.execute(&program);
    let output = String::from_utf8(captured.0.borrow().clone()).unwrap();
    (result, output)
}

fn assert_output(src: &str, expected: &str) {
    let (result, output) = run_captured(src);
    if let Err(e) = result {
        panic!("Script failed: {e}\nOutput so far: {output:?}");
    }
    assert_eq!(output, expected);
}

fn assert_success(src: &str) {
    if let Err(e) = get_result(src) {
        panic!("Script failed: {e}");
    }
}

fn assert_failure(src: &str) {
    if get_result(src).is_ok() {
        panic!("Script succeeded but was expected to fail")
    }
}

fn runtime_failure(src: &str) -> RuntimeError {
    match run_captured(src).0 {
        Ok(()) => panic!("Script succeeded but was expected to fail"),
        Err(e) => e,
    }
}

#[test]
fn script_corpus_matches_expected_output() {
    let mut count = 0;

    for entry in
        WalkDir::new("tests/scripts").into_iter()
                                     .filter_map(Result::ok)
                                     .filter(|e| e.path().extension().is_some_and(|ext| ext == "tom"))
    {
        let path = entry.path();
        let source =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));
        let expected_path = path.with_extension("out");
        let expected = fs::read_to_string(&expected_path).unwrap_or_else(|e| {
                                                             panic!("Failed to read {expected_path:?}: {e}")
                                                         });

        count += 1;
        let (result, output) = run_captured(&source);
        if let Err(e) = result {
            panic!("Script {path:?} failed:\n{source}\nError: {e}");
        }
        assert_eq!(output, expected, "output of {path:?}");
    }

    assert!(count > 0, "No scripts found in tests/scripts");
}

#[test]
fn reassignment_updates_variable() {
    assert_output("let x: Int = 5\nx = x + 1\nprint(x)", "6");
}

#[test]
fn typed_function_call() {
    assert_output("let f(a: Int, b: Int): Int = return a * b end\nprint(f(3, 4))", "12");
}

#[test]
fn while_loop_counts() {
    assert_output("let i = 0\nwhile i < 3 do print(i); i = i + 1 end", "012");
}

#[test]
fn push_and_len() {
    assert_output("let a = []\npush(a, 1)\npush(a, 2)\nprint(len(a))", "2");
}

#[test]
fn string_concatenation() {
    assert_output(r#"print("a" ++ "b")"#, "ab");
}

#[test]
fn operator_precedence() {
    assert_output("print(1 + 2 * 3)", "7");
    assert_output("print(2 ** 3 ** 2)", "512");
    assert_output("print(10 - 4 - 3)", "3");
    assert_output("print(-2 ** 2)", "-4");
    assert_output("print(7 / 2)", "3");
    assert_output("print(-7 / 2)", "-3");
    assert_output("print(7 % 3)", "1");
    assert_output("print(not 1 < 2 or true)", "true");
}

#[test]
fn logical_operators_short_circuit() {
    assert_output("let t = false and 1 / 0 == 0\nprint(t)", "false");
    assert_output("let t = true or 1 / 0 == 0\nprint(t)", "true");
    assert!(matches!(runtime_failure("let t = true and 1 / 0 == 0").root_cause(),
                     RuntimeError::DivisionByZero { .. }));
}

#[test]
fn block_variables_do_not_escape() {
    let err = runtime_failure("if true then let y = 1 end\nprint(y)");
    assert!(matches!(err.root_cause(), RuntimeError::UndefinedVariable { name, .. } if name == "y"));
}

#[test]
fn shadowing_in_nested_scope() {
    assert_output("let x = 1\nif true then let x = 2; print(x) end\nprint(x)", "21");
}

#[test]
fn redefinition_in_same_scope_fails() {
    assert!(matches!(runtime_failure("let x = 1\nlet x = 2").root_cause(),
                     RuntimeError::RedefineVariable { .. }));
}

#[test]
fn closures_capture_by_reference() {
    assert_output("let n = 1\nlet get = \\ -> n\nn = 5\nprint(get())", "5");
    assert_output("let make(): () -> Int = let count = 0\nlet bump(): Int = count = count + 1; return count end\nreturn bump end\n\
                   let c = make()\nc()\nc()\nprint(c())",
                  "3");
}

#[test]
fn recursion() {
    assert_output("let fact(n: Int): Int = if n <= 1 then return 1 end\nreturn n * fact(n - 1) end\nprint(fact(10))",
                  "3628800");
}

#[test]
fn return_leaves_loops_inside_function() {
    assert_output("let first(xs: [Int], target: Int): Int =\n\
                   let i = 0\n\
                   for x in xs do if x == target then return i end\ni = i + 1 end\n\
                   return -1\n\
                   end\n\
                   print(first([4, 5, 6], 6))\nprint(first([], 1))",
                  "2-1");
}

#[test]
fn return_inside_while_ends_only_the_call() {
    assert_output("let f(): Int =\n\
                   let i = 0\n\
                   while true do if i == 3 then return i end\ni = i + 1 end\n\
                   print(99)\n\
                   return 0\n\
                   end\n\
                   print(f())\nprint(7)",
                  "37");
}

#[test]
fn function_without_return_yields_unit() {
    assert_output("let f(): Unit = let x = 1 end\nprint(f())", "unit");
}

#[test]
fn arrays_are_shared() {
    assert_output("let a = [1, 2]\nlet b = a\nb[0] = 9\nprint(a)", "[9, 2]");
    assert_output("let a = [1]\nlet add(xs: [Int]): Unit = push(xs, 2) end\nadd(a)\nprint(a)",
                  "[1, 2]");
}

#[test]
fn prelude_functions() {
    assert_output("let a = [1]\nlet b = cons(a, 2)\nprint(a)\nprint(b)", "[1][1, 2]");
    assert_output("print(concat([1], [2, 3]))", "[1, 2, 3]");
    assert_output(r#"println("hi")"#, "hi\n");
}

#[test]
fn higher_order_functions() {
    assert_output("let map(xs: [Int], f: (Int) -> Int): [Int] =\n\
                   let out = []\nfor x in xs do push(out, f(x)) end\nreturn out\nend\n\
                   print(map([1, 2, 3], \\x -> x * x))",
                  "[1, 4, 9]");
}

#[test]
fn runtime_error_kinds() {
    let cases: [(&str, fn(&RuntimeError) -> bool); 7] = [
        ("print(1 / 0)", |e| matches!(e, RuntimeError::DivisionByZero { .. })),
        ("print([1][1])", |e| matches!(e, RuntimeError::ArrayIndexOutOfRange { .. })),
        ("print(1 + true)", |e| matches!(e, RuntimeError::IncorrectType { .. })),
        ("let x: Int = \"s\"", |e| matches!(e, RuntimeError::IncorrectType { .. })),
        ("let f(a: Int): Int = return a end\nf()", |e| {
            matches!(e, RuntimeError::IncorrectArgumentCount { expected: 1, found: 0, .. })
        }),
        ("print(9223372036854775807 + 1)", |e| matches!(e, RuntimeError::Overflow { .. })),
        ("return 1", |e| matches!(e, RuntimeError::InvalidControlTransfer { .. })),
    ];

    for (src, check) in cases {
        let err = runtime_failure(src);
        assert!(check(err.root_cause()), "unexpected error for {src:?}: {err:?}");
    }
}

#[test]
fn errors_report_failing_statement_line() {
    let err = runtime_failure("let x = 1\nlet y = 2\nprint(x / 0)");
    assert!(matches!(err, RuntimeError::InStatement { line: 3, .. }));
}

#[test]
fn output_before_error_is_kept() {
    let (result, output) = run_captured("print(1)\nprint(undefined)\nprint(2)");
    assert!(result.is_err());
    assert_eq!(output, "1");
}

#[test]
fn parse_errors_stop_execution() {
    assert!(matches!(parse("let x = (1 + 2"), Err(ParseError::Expected { .. })
                                             | Err(ParseError::UnexpectedEndOfInput { .. })));
    assert!(matches!(parse("1 < 2 < 3"), Err(ParseError::AmbiguousOperatorChain { .. })));
    assert!(matches!(parse("f(x) = 1"), Err(ParseError::InvalidAssignmentTarget { .. })));
    assert!(matches!(parse(r#"print("\q")"#), Err(ParseError::InvalidEscape { .. })));
    assert_failure("print(1)\nlet = 2");
}

#[test]
fn comments_and_semicolons() {
    assert_success("// leading comment\nlet x = 1; let y = 2 // trailing\nprint(x + y);;");
}

#[test]
fn context_keeps_globals_between_programs() {
    let captured = Captured::default();
    let mut context = Context::with_output(Box::new(captured.clone()));

    context.execute(&parse("let total = 40").unwrap()).unwrap();
    context.execute(&parse("total = total + 2\nprint(total)").unwrap()).unwrap();

    assert_eq!(String::from_utf8(captured.0.borrow().clone()).unwrap(), "42");
    assert!(context.globals().local_names().contains(&"total".to_string()));
}
