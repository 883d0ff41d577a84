//! Fixture manifest: the embedded sources and their expected findings.
//!
//! Line numbers refer to the files under `fixtures/`. Each anchor is text
//! that occurs on its line; `validation::validate_corpus` enforces this.
//! Waivers list defect comments that deliberately carry no finding.

use crate::category::CheckCategory::{self, *};
use crate::finding::ExpectedFinding;
use crate::fixture::{Fixture, Waiver};

const fn req(
    rule: &'static str,
    category: CheckCategory,
    line: u32,
    anchor: &'static str,
    description: &'static str,
) -> ExpectedFinding {
    ExpectedFinding::required(rule, category, line, anchor, description)
}

const fn adv(
    rule: &'static str,
    category: CheckCategory,
    line: u32,
    anchor: &'static str,
    description: &'static str,
) -> ExpectedFinding {
    ExpectedFinding::advisory(rule, category, line, anchor, description)
}

const BASIC_FINDINGS: &[ExpectedFinding] = &[
    req(
        "google-build-using-namespace",
        Google,
        6,
        "using namespace std;",
        "using-directive pulls all of namespace std into the global scope",
    ),
    req(
        "clang-diagnostic-unused-variable",
        ClangDiagnostic,
        11,
        "int z = x + y;",
        "z is initialized but never used",
    ),
    adv("performance-*", Performance, 15, "i++", "post-increment where pre-increment suffices"),
    req(
        "clang-diagnostic-writable-strings",
        ClangDiagnostic,
        19,
        "char* str = \"Hello\";",
        "string literal bound to a non-const char pointer",
    ),
    req(
        "bugprone-assignment-in-if-condition",
        Bugprone,
        21,
        "if (x = y)",
        "assignment used as an if condition",
    ),
    adv(
        "clang-analyzer-*",
        ClangAnalyzer,
        26,
        "i <= 10",
        "loop writes one element past the end of arr",
    ),
];

const BUGPRONE_FINDINGS: &[ExpectedFinding] = &[
    req(
        "bugprone-assignment-in-if-condition",
        Bugprone,
        12,
        "if (x = y)",
        "assignment used as an if condition",
    ),
    req(
        "clang-analyzer-cplusplus.NewDelete",
        ClangAnalyzer,
        23,
        "*ptr",
        "pointer dereferenced after delete",
    ),
    req(
        "clang-diagnostic-mismatched-new-delete",
        ClangDiagnostic,
        29,
        "delete ptr;",
        "array allocated with new[] released with scalar delete",
    ),
    adv(
        "clang-analyzer-*",
        ClangAnalyzer,
        38,
        "arr[i]",
        "loop reads arr[5] on its final iteration",
    ),
    req(
        "cppcoreguidelines-init-variables",
        Cppcoreguidelines,
        44,
        "int x;",
        "local variable declared without an initializer",
    ),
    adv(
        "clang-analyzer-core.*",
        ClangAnalyzer,
        47,
        "std::cout << x",
        "uninitialized value passed to operator<<",
    ),
    req(
        "clang-analyzer-core.NullDereference",
        ClangAnalyzer,
        55,
        "*ptr = 42;",
        "store through a null pointer",
    ),
    adv("clang-analyzer-*", ClangAnalyzer, 61, "max + 1", "signed addition overflows INT_MAX"),
    req(
        "clang-diagnostic-sign-compare",
        ClangDiagnostic,
        72,
        "signedInt < unsignedInt",
        "comparison between signed and unsigned integers",
    ),
];

const GOOGLE_STYLE_FINDINGS: &[ExpectedFinding] = &[
    adv(
        "readability-identifier-naming",
        Readability,
        8,
        "class my_class",
        "class name is not CamelCase",
    ),
    req(
        "misc-non-private-member-variables-in-classes",
        Misc,
        11,
        "int MyVariable;",
        "public data member in a class with member functions",
    ),
    req(
        "google-explicit-constructor",
        Google,
        14,
        "my_class(int value)",
        "single-argument constructor is not marked explicit",
    ),
    adv(
        "cppcoreguidelines-virtual-class-destructor",
        Cppcoreguidelines,
        19,
        "~my_class()",
        "destructor of a would-be base class is not virtual",
    ),
    adv(
        "readability-identifier-naming",
        Readability,
        24,
        "MyMethod",
        "method and parameter names are not lower_case",
    ),
    adv(
        "readability-identifier-naming",
        Readability,
        32,
        "my_function",
        "free function name is not CamelCase",
    ),
    req("readability-magic-numbers", Readability, 34, "100", "magic number used as a size limit"),
    adv(
        "readability-*",
        Readability,
        38,
        "for(int i=0;i<max_size;i++)",
        "no spaces around the for keyword, separators and operators",
    ),
    req("google-readability-casting", Google, 44, "(int)d", "C-style cast instead of static_cast"),
    req(
        "clang-diagnostic-unused-variable",
        ClangDiagnostic,
        44,
        "int i",
        "i is initialized but never used",
    ),
    req(
        "readability-isolate-declaration",
        Readability,
        47,
        "int a,b,c;",
        "multiple declarations in a single statement",
    ),
    req(
        "clang-diagnostic-unused-variable",
        ClangDiagnostic,
        47,
        "int a,b,c;",
        "a, b and c are declared but never used",
    ),
];

const MISC_FINDINGS: &[ExpectedFinding] = &[
    req(
        "google-explicit-constructor",
        Google,
        10,
        "Test(int value)",
        "single-argument constructor is not marked explicit",
    ),
    req(
        "clang-analyzer-cplusplus.NewDeleteLeaks",
        ClangAnalyzer,
        28,
        "new int[10]",
        "array allocation is never released",
    ),
    req(
        "clang-diagnostic-unused-variable",
        ClangDiagnostic,
        28,
        "int* ptr",
        "ptr is initialized but never used",
    ),
    req(
        "clang-analyzer-cplusplus.NewDeleteLeaks",
        ClangAnalyzer,
        31,
        "new Test(42)",
        "object allocation is never released",
    ),
    req(
        "clang-diagnostic-unused-variable",
        ClangDiagnostic,
        31,
        "Test* test",
        "test is initialized but never used",
    ),
    req(
        "performance-unnecessary-copy-initialization",
        Performance,
        43,
        "std::string copy = str;",
        "local copy of a string that is never modified",
    ),
    req(
        "clang-diagnostic-sign-compare",
        ClangDiagnostic,
        47,
        "i < vec.size()",
        "signed loop index compared with size_t",
    ),
    req(
        "clang-diagnostic-unused-variable",
        ClangDiagnostic,
        48,
        "int val",
        "loop variable is never used",
    ),
    req(
        "clang-diagnostic-array-bounds",
        ClangDiagnostic,
        56,
        "arr[10]",
        "constant index past the end of a five-element array",
    ),
    req(
        "clang-diagnostic-unused-variable",
        ClangDiagnostic,
        59,
        "Test* ptr = nullptr;",
        "pointer is never used",
    ),
    adv(
        "performance-inefficient-string-concatenation",
        Performance,
        67,
        "result += \"x\";",
        "string grown one character at a time in a loop",
    ),
    req(
        "performance-inefficient-vector-operation",
        Performance,
        73,
        "vec.push_back(i);",
        "push_back in a counted loop without reserve",
    ),
];

const MISC_WAIVERS: &[Waiver] = &[Waiver::new(
    33,
    "the shared_ptr cycle is only sketched; the SetNext calls are commented out",
)];

const MODERNIZE_FINDINGS: &[ExpectedFinding] = &[
    req(
        "cppcoreguidelines-owning-memory",
        Cppcoreguidelines,
        11,
        "new int(42)",
        "owning raw pointer initialized with new",
    ),
    req(
        "cppcoreguidelines-owning-memory",
        Cppcoreguidelines,
        15,
        "delete ptr;",
        "delete applied to a pointer not marked gsl::owner",
    ),
    req(
        "modernize-use-auto",
        Modernize,
        23,
        "std::vector<int>::iterator it",
        "spelled-out iterator type where auto fits",
    ),
    req(
        "modernize-loop-convert",
        Modernize,
        23,
        "for (std::vector<int>::iterator it",
        "iterator loop replaceable by a range-based for",
    ),
    req(
        "modernize-loop-convert",
        Modernize,
        33,
        "for (int i = 0; i < 5; ++i)",
        "index loop over an array replaceable by a range-based for",
    ),
    req("modernize-use-nullptr", Modernize, 40, "NULL", "NULL used to initialize a pointer"),
    req("modernize-use-nullptr", Modernize, 42, "ptr == NULL", "NULL used in a pointer comparison"),
    adv(
        "modernize-*",
        Modernize,
        50,
        "vec.push_back(1);",
        "sequence of push_back calls instead of an initializer list",
    ),
    adv(
        "modernize-use-auto",
        Modernize,
        66,
        "std::vector<int> vec = createVector();",
        "declared type repeats the initializer's type",
    ),
    req(
        "modernize-loop-convert",
        Modernize,
        68,
        "for (auto it = vec.begin()",
        "iterator loop replaceable by a range-based for",
    ),
    adv(
        "modernize-*",
        Modernize,
        78,
        "p.first << \": \" << p.second",
        "pair members read through first and second instead of structured bindings",
    ),
];

const PERFORMANCE_FINDINGS: &[ExpectedFinding] = &[
    adv(
        "performance-inefficient-string-concatenation",
        Performance,
        13,
        "\"string\" + std::to_string(i)",
        "temporary strings created by operator+ inside a loop",
    ),
    req(
        "performance-unnecessary-copy-initialization",
        Performance,
        23,
        "std::vector<int> copy = largeVector;",
        "million-element vector copied but never modified",
    ),
    req(
        "clang-diagnostic-error",
        ClangDiagnostic,
        26,
        "printVector(copy);",
        "printVector is used before it is declared",
    ),
    req(
        "performance-unnecessary-value-param",
        Performance,
        30,
        "std::vector<int> vec",
        "vector parameter taken by value but only read",
    ),
    req(
        "clang-analyzer-cplusplus.NewDeleteLeaks",
        ClangAnalyzer,
        40,
        "new int[1000]",
        "array allocation is never released",
    ),
    req(
        "clang-diagnostic-unused-variable",
        ClangDiagnostic,
        40,
        "int *data",
        "data is initialized but never used",
    ),
    req(
        "performance-inefficient-vector-operation",
        Performance,
        52,
        "vec.push_back(i);",
        "push_back in a counted loop without reserve",
    ),
    adv(
        "readability-*",
        Readability,
        59,
        "(a + b) * (c - a) / (b + c) % (a * c)",
        "four-operator arithmetic in one unexplained expression",
    ),
    req(
        "readability-else-after-return",
        Readability,
        66,
        "} else if (x == 0) {",
        "else branch after a return",
    ),
    req(
        "modernize-avoid-c-arrays",
        Modernize,
        81,
        "int arr[1000];",
        "C-style array instead of std::array",
    ),
    req(
        "clang-diagnostic-error",
        ClangDiagnostic,
        87,
        "processArray(arr, 1000);",
        "processArray is used before it is declared",
    ),
];

const PERFORMANCE_WAIVERS: &[Waiver] =
    &[Waiver::new(42, "restates the leak recorded at line 40")];

const READABILITY_FINDINGS: &[ExpectedFinding] = &[
    adv(
        "readability-function-size",
        Readability,
        8,
        "complexFunction",
        "function takes eight parameters",
    ),
    adv(
        "readability-function-cognitive-complexity",
        Readability,
        14,
        "longFunction",
        "deeply nested conditionals and loops",
    ),
    req("readability-magic-numbers", Readability, 44, "1024", "unexplained array size"),
    req("readability-magic-numbers", Readability, 47, "256", "unexplained multiplier"),
    req(
        "readability-isolate-declaration",
        Readability,
        53,
        "int a=1,b=2,c=3;",
        "multiple declarations in a single statement",
    ),
    req(
        "readability-braces-around-statements",
        Readability,
        53,
        "if(a>b)if(b>c)",
        "nested if statements without braces",
    ),
    req(
        "readability-identifier-length",
        Readability,
        58,
        "int x = 10;",
        "single-letter variable name",
    ),
    req(
        "readability-identifier-length",
        Readability,
        59,
        "int y = 20;",
        "single-letter variable name",
    ),
    req(
        "readability-identifier-length",
        Readability,
        60,
        "int z = x + y;",
        "single-letter variable name",
    ),
    req(
        "readability-isolate-declaration",
        Readability,
        67,
        "int a = 1, b = 2, c = 3, d = 4;",
        "multiple declarations in a single statement",
    ),
    adv(
        "readability-avoid-nested-conditional-operator",
        Readability,
        68,
        "? (c > d ? c : d) :",
        "conditional operator nested inside another",
    ),
];

const SMOKE_FINDINGS: &[ExpectedFinding] = &[
    req(
        "google-build-using-namespace",
        Google,
        6,
        "using namespace std;",
        "using-directive pulls all of namespace std into the global scope",
    ),
    req(
        "clang-diagnostic-unused-variable",
        ClangDiagnostic,
        15,
        "int unusedVar = 42;",
        "unusedVar is initialized but never used",
    ),
    adv(
        "clang-analyzer-core.DivideZero",
        ClangAnalyzer,
        20,
        "a / b",
        "division by a caller-supplied value that may be zero",
    ),
    req(
        "clang-analyzer-cplusplus.NewDeleteLeaks",
        ClangAnalyzer,
        24,
        "new int[10]",
        "array allocation is never released",
    ),
    req(
        "clang-diagnostic-unused-variable",
        ClangDiagnostic,
        24,
        "int *ptr",
        "ptr is initialized but never used",
    ),
    req(
        "google-explicit-constructor",
        Google,
        29,
        "TestClass(int value)",
        "single-argument constructor is not marked explicit",
    ),
    req(
        "google-readability-casting",
        Google,
        34,
        "(int)val",
        "C-style cast instead of static_cast",
    ),
    req(
        "clang-diagnostic-unused-variable",
        ClangDiagnostic,
        34,
        "int converted",
        "converted is initialized but never used",
    ),
    req(
        "cppcoreguidelines-narrowing-conversions",
        Cppcoreguidelines,
        39,
        "int x = 3.14;",
        "double literal narrowed to int",
    ),
    req(
        "clang-diagnostic-unused-variable",
        ClangDiagnostic,
        39,
        "int x = 3.14;",
        "x is initialized but never used",
    ),
    req("modernize-use-nullptr", Modernize, 44, "NULL", "NULL used to initialize a pointer"),
    adv(
        "modernize-use-override",
        Modernize,
        48,
        "virtual void someMethod()",
        "virtual method that may override without saying so",
    ),
    adv(
        "misc-unconventional-assign-operator",
        Misc,
        52,
        "operator+",
        "operator returning a non-const reference to its operand",
    ),
    req(
        "clang-diagnostic-error",
        ClangDiagnostic,
        53,
        "return *this;",
        "this used outside of a member function",
    ),
    req(
        "clang-diagnostic-sign-compare",
        ClangDiagnostic,
        64,
        "i <= numbers.size()",
        "signed loop index compared with size_t",
    ),
    adv(
        "clang-analyzer-*",
        ClangAnalyzer,
        64,
        "i <= numbers.size()",
        "loop reads one element past the end of numbers",
    ),
    req(
        "clang-diagnostic-unused-variable",
        ClangDiagnostic,
        69,
        "int y = x;",
        "y is initialized but never used",
    ),
    req(
        "google-readability-casting",
        Google,
        75,
        "(int*)malloc",
        "C-style cast of the malloc result",
    ),
    req(
        "cppcoreguidelines-no-malloc",
        Cppcoreguidelines,
        75,
        "malloc(sizeof(int))",
        "manual allocation with malloc",
    ),
    req(
        "bugprone-unique-ptr-array-mismatch",
        Bugprone,
        79,
        "std::unique_ptr<int> bad_unique_ptr(new int[10])",
        "unique_ptr<int> owns an array allocated with new[]",
    ),
];

/// Every fixture in the corpus, in listing order.
pub(crate) const FIXTURES: &[Fixture] = &[
    Fixture {
        name: "basic",
        file_name: "basic.cpp",
        summary: "Basic syntax and hygiene mistakes in a single main()",
        categories: &[Google, ClangDiagnostic, Performance, Bugprone, ClangAnalyzer],
        findings: BASIC_FINDINGS,
        waivers: &[],
        source: include_str!("../fixtures/basic.cpp"),
    },
    Fixture {
        name: "bugprone",
        file_name: "bugprone.cpp",
        summary: "Bug-prone patterns: misuse of new/delete, undefined behavior, mixed signedness",
        categories: &[Bugprone, ClangAnalyzer, ClangDiagnostic, Cppcoreguidelines],
        findings: BUGPRONE_FINDINGS,
        waivers: &[],
        source: include_str!("../fixtures/bugprone.cpp"),
    },
    Fixture {
        name: "google_style",
        file_name: "google_style.cpp",
        summary: "Google C++ style guide violations: naming, implicit constructors, casts",
        categories: &[Readability, Misc, Google, Cppcoreguidelines, ClangDiagnostic],
        findings: GOOGLE_STYLE_FINDINGS,
        waivers: &[],
        source: include_str!("../fixtures/google_style.cpp"),
    },
    Fixture {
        name: "misc",
        file_name: "misc.cpp",
        summary: "Leaks, needless copies, out-of-bounds access and unreserved growth",
        categories: &[Google, ClangAnalyzer, Performance, ClangDiagnostic],
        findings: MISC_FINDINGS,
        waivers: MISC_WAIVERS,
        source: include_str!("../fixtures/misc.cpp"),
    },
    Fixture {
        name: "modernize",
        file_name: "modernize.cpp",
        summary: "Pre-C++11 idioms with modern replacements",
        categories: &[Cppcoreguidelines, Modernize],
        findings: MODERNIZE_FINDINGS,
        waivers: &[],
        source: include_str!("../fixtures/modernize.cpp"),
    },
    Fixture {
        name: "performance",
        file_name: "performance.cpp",
        summary: "Avoidable copies and allocations, plus calls to undeclared functions",
        categories: &[Performance, ClangDiagnostic, ClangAnalyzer, Readability, Modernize],
        findings: PERFORMANCE_FINDINGS,
        waivers: PERFORMANCE_WAIVERS,
        source: include_str!("../fixtures/performance.cpp"),
    },
    Fixture {
        name: "readability",
        file_name: "readability.cpp",
        summary: "Hard-to-read code: long parameter lists, deep nesting, magic numbers, terse names",
        categories: &[Readability],
        findings: READABILITY_FINDINGS,
        waivers: &[],
        source: include_str!("../fixtures/readability.cpp"),
    },
    Fixture {
        name: "smoke",
        file_name: "smoke.cpp",
        summary: "One-file tour of the defect families the visualizer groups by check",
        categories: &[Google, ClangDiagnostic, ClangAnalyzer, Cppcoreguidelines, Modernize, Misc, Bugprone],
        findings: SMOKE_FINDINGS,
        waivers: &[],
        source: include_str!("../fixtures/smoke.cpp"),
    },
];
