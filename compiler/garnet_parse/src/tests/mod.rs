//! Parser test suite.
//!
//! `properties` holds the cross-cutting guarantees (round trips, position
//! coverage, determinism, pass fixed points, shared-table concurrency);
//! `sexp` pins the tree shapes for the accepted subset; `errors` the
//! failure taxonomy.

mod errors;
mod sexp;

use garnet_ir::ParseNode;

pub(crate) fn parse_ok(source: &str) -> ParseNode {
    crate::parse(source.as_bytes())
        .unwrap_or_else(|e| panic!("parse failed on {source:?}: {e}"))
}

/// Sources covering the whole accepted subset; shared by the property
/// tests.
pub(crate) const CORPUS: &[&str] = &[
    "1",
    "3.14",
    "\"s\"",
    ":sym",
    "a = 1",
    "@x = 1",
    "$g = 2",
    "@@c = 3",
    "X = 4",
    "1 + 2 * 3 - 4 / 5 % 6",
    "2 ** 3 ** 2",
    "-2 ** 2",
    "a <=> b",
    "a << 1",
    "x = a == b",
    "a && b || c",
    "a and b or c",
    "not a",
    "!a",
    "a ? b : c",
    "[1, 2, [3]]",
    "{1 => 2, :a => \"b\"}",
    "(1 + 2) * 3",
    "foo(1, 2)",
    "a.b.c",
    "a.b(1).c(2)",
    "xs[0]",
    "foo { |x| x + 1 }",
    "foo do |a, b|\n  a\nend",
    "a += 1",
    "a ||= 2",
    "x = 1 if y",
    "x = 1 unless y",
    "i = 0\nwhile i < 10\n  i += 1\nend",
    "until done\n  step\nend",
    "if a\n  b\nelsif c\n  d\nelse\n  e\nend",
    "unless a\n  b\nelse\n  c\nend",
    "case x\nwhen 1, 2 then :low\nwhen 3\n  :high\nelse\n  :other\nend",
    "case x\nin [1] then :one\nin [2] then :two\nend",
    "begin\n  work\nrescue Error => e\n  log(e)\nensure\n  cleanup\nend",
    "def add(a, b = 1)\n  a + b\nend",
    "class Point < Base\n  def x\n    @x\n  end\nend",
    "module Util\n  VERSION = \"1.0\"\nend",
    "return 1 if done",
    "break unless more",
    "next",
    "x = <<~EOS\n  text\nEOS\nx.strip",
    "a\n  .b\n  .c",
    "while x do\n  tick\nend",
];
