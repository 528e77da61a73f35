//! Tree-shape tests via the s-expression printer.

use pretty_assertions::assert_eq;

use garnet_ir::NodePrinter;

use super::parse_ok;

fn sexp(source: &str) -> String {
    NodePrinter::print(&parse_ok(source))
}

// ─── Literals ───────────────────────────────────────────────────────────

#[test]
fn literals() {
    assert_eq!(sexp("1"), "(int 1)");
    assert_eq!(sexp("3.5"), "(float 3.5)");
    assert_eq!(sexp("\"hi\""), "(str \"hi\")");
    assert_eq!(sexp(":a"), "(sym a)");
    assert_eq!(sexp("nil"), "(nil)");
    assert_eq!(sexp("self"), "(self)");
}

#[test]
fn negative_literals_fold() {
    assert_eq!(sexp("-2"), "(int -2)");
    assert_eq!(sexp("- 2"), "(int -2)");
    assert_eq!(sexp("-2.5"), "(float -2.5)");
    assert_eq!(sexp("+2"), "(int 2)");
    // a non-literal operand stays a unary call
    assert_eq!(sexp("-a"), "(call -@ (ident a) _)");
}

#[test]
fn collections() {
    assert_eq!(sexp("[1, 2]"), "(array (int 1) (int 2))");
    assert_eq!(sexp("[]"), "(array)");
    assert_eq!(sexp("{1 => 2}"), "(hash (int 1) (int 2))");
    assert_eq!(sexp("{}"), "(hash)");
}

// ─── Operators ──────────────────────────────────────────────────────────

#[test]
fn binary_operators_are_calls() {
    assert_eq!(sexp("1 + 2"), "(call + (int 1) (int 2) _)");
    assert_eq!(
        sexp("1 + 2 * 3"),
        "(call + (int 1) (call * (int 2) (int 3) _) _)"
    );
    assert_eq!(
        sexp("(1 + 2) * 3"),
        "(call * (call + (int 1) (int 2) _) (int 3) _)"
    );
}

#[test]
fn power_is_right_associative() {
    assert_eq!(
        sexp("2 ** 3 ** 2"),
        "(call ** (int 2) (call ** (int 3) (int 2) _) _)"
    );
}

#[test]
fn unary_minus_binds_looser_than_power() {
    assert_eq!(
        sexp("-2 ** 2"),
        "(call -@ (call ** (int 2) (int 2) _) _)"
    );
}

#[test]
fn boolean_operators_short_circuit_shapes() {
    assert_eq!(sexp("a && b || c"), "(or (and (ident a) (ident b)) (ident c))");
    assert_eq!(sexp("a and b or c"), "(or (and (ident a) (ident b)) (ident c))");
    assert_eq!(sexp("not a and b"), "(and (not (ident a)) (ident b))");
    assert_eq!(sexp("!a"), "(not (ident a))");
}

#[test]
fn ternary_is_an_if() {
    assert_eq!(sexp("a ? 1 : 2"), "(if (ident a) (int 1) (int 2))");
    // right-nesting: a ? b : (c ? d : e)
    assert_eq!(
        sexp("a ? b : c ? d : e"),
        "(if (ident a) (ident b) (if (ident c) (ident d) (ident e)))"
    );
}

// ─── Assignment ─────────────────────────────────────────────────────────

#[test]
fn assignments_by_variable_kind() {
    assert_eq!(sexp("a = 1"), "(lasgn a (int 1))");
    assert_eq!(sexp("@a = 1"), "(iasgn @a (int 1))");
    assert_eq!(sexp("$a = 1"), "(gasgn $a (int 1))");
    assert_eq!(sexp("@@a = 1"), "(cvasgn @@a (int 1))");
    assert_eq!(sexp("A = 1"), "(cdecl A (int 1))");
    assert_eq!(sexp("a = b = 1"), "(lasgn a (lasgn b (int 1)))");
}

#[test]
fn op_assign_desugars() {
    assert_eq!(sexp("a += 1"), "(lasgn a (call + (ident a) (int 1) _))");
    assert_eq!(sexp("a ||= 1"), "(lasgn a (or (ident a) (int 1)))");
    assert_eq!(sexp("a &&= 1"), "(lasgn a (and (ident a) (int 1)))");
    assert_eq!(sexp("@x <<= 1"), "(iasgn @x (call << (ivar @x) (int 1) _))");
}

// ─── Calls ──────────────────────────────────────────────────────────────

#[test]
fn call_shapes() {
    assert_eq!(sexp("foo()"), "(call foo _ _)");
    assert_eq!(sexp("foo(1, 2)"), "(call foo _ (int 1) (int 2) _)");
    assert_eq!(sexp("a.b"), "(call b (ident a) _)");
    assert_eq!(sexp("a.b(1)"), "(call b (ident a) (int 1) _)");
    assert_eq!(sexp("a.b.c"), "(call c (call b (ident a) _) _)");
    assert_eq!(sexp("xs[0]"), "(call [] (ident xs) (int 0) _)");
    assert_eq!(sexp("1.abs"), "(call abs (int 1) _)");
}

#[test]
fn leading_dot_continues_a_chain() {
    assert_eq!(sexp("a\n  .b\n  .c"), "(call c (call b (ident a) _) _)");
}

#[test]
fn blocks_attach_to_the_call() {
    assert_eq!(
        sexp("foo { |x| x }"),
        "(call foo _ (iter (list (param x _)) (ident x)))"
    );
    assert_eq!(sexp("foo do end"), "(call foo _ (iter _ _))");
    assert_eq!(
        sexp("a.each { || 1 }"),
        "(call each (ident a) (iter (list) (int 1)))"
    );
    assert_eq!(
        sexp("f(1) { 2 }"),
        "(call f _ (int 1) (iter _ (int 2)))"
    );
}

// ─── Control flow ───────────────────────────────────────────────────────

#[test]
fn if_forms() {
    assert_eq!(sexp("if a then b end"), "(if (ident a) (ident b) _)");
    assert_eq!(sexp("if a\n  b\nelse\n  c\nend"), "(if (ident a) (ident b) (ident c))");
    assert_eq!(
        sexp("if a\n  b\nelsif c\n  d\nend"),
        "(if (ident a) (ident b) (if (ident c) (ident d) _))"
    );
    assert_eq!(sexp("b if a"), "(if (ident a) (ident b) _)");
}

#[test]
fn unless_swaps_branches() {
    assert_eq!(sexp("unless a then b end"), "(if (ident a) _ (ident b))");
    assert_eq!(sexp("b unless a"), "(if (ident a) _ (ident b))");
}

#[test]
fn loops() {
    assert_eq!(sexp("while a\n  b\nend"), "(while (ident a) (ident b))");
    assert_eq!(sexp("while a do\n  b\nend"), "(while (ident a) (ident b))");
    assert_eq!(sexp("until a\n  b\nend"), "(until (ident a) (ident b))");
    assert_eq!(sexp("b while a"), "(while (ident a) (ident b))");
}

#[test]
fn dangling_do_binds_to_the_loop_not_a_block() {
    // `do` after a loop condition is the loop separator even when the
    // condition ends in a method call.
    assert_eq!(
        sexp("while a.b do\n  c\nend"),
        "(while (call b (ident a) _) (ident c))"
    );
    // inside the body it opens a block again
    assert_eq!(
        sexp("while a\n  f do\n    b\n  end\nend"),
        "(while (ident a) (call f _ (iter _ (ident b))))"
    );
}

#[test]
fn case_when() {
    assert_eq!(
        sexp("case x\nwhen 1, 2\n  :a\nend"),
        "(case (ident x) (list (when (list (int 1) (int 2)) (sym a))))"
    );
    assert_eq!(
        sexp("case\nwhen 1\n  :a\nelse\n  :b\nend"),
        "(case _ (list (when (list (int 1)) (sym a))) (sym b))"
    );
}

#[test]
fn case_in_patterns() {
    assert_eq!(
        sexp("case x\nin [1]\n  :a\nend"),
        "(case (ident x) (list (in (array (int 1)) (sym a))))"
    );
}

#[test]
fn begin_rescue_ensure() {
    assert_eq!(
        sexp("begin\n  a\nrescue E => e\n  b\nensure\n  c\nend"),
        "(begin (ident a) (rescue e (list (const E)) (ident b)) _ (ident c))"
    );
    assert_eq!(
        sexp("begin\n  a\nrescue\n  b\nend"),
        "(begin (ident a) (rescue _ (ident b)) _ _)"
    );
    assert_eq!(sexp("begin\n  a\nend"), "(begin (ident a) _ _)");
}

#[test]
fn jumps() {
    assert_eq!(sexp("return 1"), "(return (int 1))");
    assert_eq!(sexp("return"), "(return _)");
    assert_eq!(sexp("break"), "(break _)");
    assert_eq!(sexp("next 2"), "(next (int 2))");
}

// ─── Definitions ────────────────────────────────────────────────────────

#[test]
fn method_definitions() {
    assert_eq!(
        sexp("def add(a, b = 1)\n  a + b\nend"),
        "(def add (param a _) (param b (int 1)) (call + (ident a) (ident b) _))"
    );
    assert_eq!(sexp("def run\n  1\nend"), "(def run (int 1))");
}

#[test]
fn class_and_module_definitions() {
    assert_eq!(sexp("class A\nend"), "(class (const A) _ _)");
    assert_eq!(sexp("class A < B\nend"), "(class (const A) (const B) _)");
    assert_eq!(sexp("module M\n  x\nend"), "(module (const M) (ident x))");
}

// ─── Statement sequencing ───────────────────────────────────────────────

#[test]
fn sequences() {
    assert_eq!(sexp("a\nb"), "(block (ident a) (ident b))");
    assert_eq!(sexp("a; b; c"), "(block (ident a) (ident b) (ident c))");
    assert_eq!(sexp("a +\n  b"), "(call + (ident a) (ident b) _)");
}

#[test]
fn heredoc_bodies_become_strings() {
    assert_eq!(
        sexp("x = <<~EOS\n  hi\nEOS"),
        r#"(lasgn x (str "hi\n"))"#
    );
}
