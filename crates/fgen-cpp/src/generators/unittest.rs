use fgen_parser_api::{
    AccessLevel, FunctionSignature, HeaderListener, ParseState, Parameter, Scope,
};
use std::path::Path;

use super::{include_name, GenerateError, GenerateResult};

#[derive(Debug)]
struct Fixture {
    class_name: String,
    /// Reachable from outside; private nested classes get no fixture
    public: bool,
    tests: Vec<String>,
}

/// Renders a CppUnit fixture per public class
///
/// Every public function contributes one `testXxx` method; constructors
/// share a single `testConstructor`. Operators are skipped. Functions
/// outside any class are collected into a fixture named after the header.
#[derive(Debug)]
pub struct UnitTestScaffold {
    header: String,
    out: String,
    fixtures: Vec<Fixture>,
    free_functions: Vec<String>,
    error: Option<GenerateError>,
}

impl UnitTestScaffold {
    pub fn new(header: &Path) -> Self {
        Self {
            header: include_name(header),
            out: String::new(),
            fixtures: Vec::new(),
            free_functions: Vec::new(),
            error: None,
        }
    }

    /// Rendered text, or the first bookkeeping error seen during the parse
    pub fn finish(self) -> GenerateResult<String> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.out),
        }
    }

    fn add_test(&mut self, state: &ParseState<'_>, function_name: &str) {
        if !state.scopes().is_publicly_reachable() {
            return;
        }
        let test = test_name(function_name);
        let tests = match self.fixtures.last_mut() {
            Some(fixture) => &mut fixture.tests,
            None => &mut self.free_functions,
        };
        if !tests.contains(&test) {
            tests.push(test);
        }
    }

    fn write_fixture(&mut self, class_name: &str, tests: &[String]) {
        let fixture = format!("{class_name}Test");
        let out = &mut self.out;

        out.push_str(&format!("class {fixture} : public CppUnit::TestFixture\n{{\n"));
        out.push_str(&format!("    CPPUNIT_TEST_SUITE({fixture});\n"));
        for test in tests {
            out.push_str(&format!("    CPPUNIT_TEST({test});\n"));
        }
        out.push_str("    CPPUNIT_TEST_SUITE_END();\n\n");
        out.push_str("public:\n    void setUp();\n    void tearDown();\n\n");
        for test in tests {
            out.push_str(&format!("    void {test}();\n"));
        }
        out.push_str("};\n\n");
        out.push_str(&format!("CPPUNIT_TEST_SUITE_REGISTRATION({fixture});\n\n"));

        out.push_str(&format!("void {fixture}::setUp()\n{{\n}}\n\n"));
        out.push_str(&format!("void {fixture}::tearDown()\n{{\n}}\n\n"));
        for test in tests {
            out.push_str(&format!(
                "void {fixture}::{test}()\n{{\n    CPPUNIT_FAIL(\"not implemented\");\n}}\n\n"
            ));
        }
    }
}

/// `size` → `testSize`
fn test_name(function_name: &str) -> String {
    let mut chars = function_name.chars();
    match chars.next() {
        Some(first) => format!("test{}{}", first.to_uppercase(), chars.as_str()),
        None => "test".to_string(),
    }
}

/// Fixture name for free functions: the header stem, capitalized
fn header_fixture_name(header: &str) -> String {
    let stem = Path::new(header)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mut chars = stem.chars();
    match chars.next() {
        Some(first) => format!("{}{}", first.to_uppercase(), chars.as_str()),
        None => "Header".to_string(),
    }
}

impl HeaderListener for UnitTestScaffold {
    fn on_pre_parse(&mut self, _state: &ParseState<'_>) {
        self.out.push_str("#include <cppunit/extensions/HelperMacros.h>\n");
        self.out.push_str(&format!("#include \"{}\"\n\n", self.header));
    }

    fn on_post_parse(&mut self, _state: &ParseState<'_>) {
        if !self.free_functions.is_empty() {
            let tests = std::mem::take(&mut self.free_functions);
            self.write_fixture(&header_fixture_name(&self.header), &tests);
        }
    }

    fn on_namespace(&mut self, state: &ParseState<'_>, name: &str) {
        if name.is_empty() {
            return;
        }
        let mut path = state.scopes().qualifier_path();
        path.push(name.to_string());
        self.out
            .push_str(&format!("using namespace {};\n\n", path.join("::")));
    }

    fn on_class_start(&mut self, state: &ParseState<'_>, name: &str) {
        // the class itself is on top; only its enclosing classes decide reachability
        let frames = state.scopes().frames();
        let enclosing = &frames[..frames.len().saturating_sub(1)];
        let public = enclosing
            .iter()
            .filter_map(Scope::as_class)
            .all(|class| class.access == AccessLevel::Public);
        self.fixtures.push(Fixture {
            class_name: name.to_string(),
            public,
            tests: Vec::new(),
        });
    }

    fn on_class_end(&mut self, _state: &ParseState<'_>, name: &str) {
        let Some(fixture) = self.fixtures.pop() else {
            self.error.get_or_insert(GenerateError::ClassMismatch {
                expected: String::new(),
                found: name.to_string(),
            });
            return;
        };
        if fixture.class_name != name {
            self.error.get_or_insert(GenerateError::ClassMismatch {
                expected: fixture.class_name,
                found: name.to_string(),
            });
            return;
        }
        if fixture.public {
            self.write_fixture(&fixture.class_name, &fixture.tests);
        }
    }

    fn on_function_decl(&mut self, state: &ParseState<'_>, function: &FunctionSignature) {
        if !function.is_operator() {
            self.add_test(state, &function.name);
        }
    }

    fn on_function_def(&mut self, state: &ParseState<'_>, function: &FunctionSignature) {
        if !function.is_operator() {
            self.add_test(state, &function.name);
        }
    }

    fn on_ctor_decl(&mut self, state: &ParseState<'_>, _name: &str, _params: &[Parameter]) {
        self.add_test(state, "Constructor");
    }

    fn on_ctor_def(&mut self, state: &ParseState<'_>, _name: &str, _params: &[Parameter]) {
        self.add_test(state, "Constructor");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CppHeaderParser;
    use fgen_parser_api::ParserConfig;

    fn render(source: &str) -> GenerateResult<String> {
        let mut scaffold = UnitTestScaffold::new(Path::new("geometry.h"));
        let mut parser = CppHeaderParser::with_config(ParserConfig::quiet());
        parser.add_listener(&mut scaffold);
        parser.parse_source(source).unwrap();
        drop(parser);
        scaffold.finish()
    }

    #[test]
    fn test_test_names() {
        assert_eq!(test_name("area"), "testArea");
        assert_eq!(test_name("Constructor"), "testConstructor");
        assert_eq!(header_fixture_name("geometry.h"), "Geometry");
    }

    #[test]
    fn test_fixture_for_public_members() {
        let out = render(
            "namespace geo {\nclass Circle {\npublic:\n    Circle(double r);\n    Circle(const Circle& other);\n    double area() const;\n    double area(int precision) const;\n    bool operator==(const Circle& rhs) const;\nprivate:\n    void recompute();\n};\n}\n",
        )
        .unwrap();

        assert!(out.starts_with(
            "#include <cppunit/extensions/HelperMacros.h>\n#include \"geometry.h\"\n\nusing namespace geo;\n\n"
        ));
        assert!(out.contains("class CircleTest : public CppUnit::TestFixture\n{\n    CPPUNIT_TEST_SUITE(CircleTest);\n    CPPUNIT_TEST(testConstructor);\n    CPPUNIT_TEST(testArea);\n    CPPUNIT_TEST_SUITE_END();\n"));
        assert!(out.contains("CPPUNIT_TEST_SUITE_REGISTRATION(CircleTest);\n"));
        assert!(out.contains("void CircleTest::testArea()\n{\n    CPPUNIT_FAIL(\"not implemented\");\n}\n"));
        assert_eq!(out.matches("CPPUNIT_TEST(testConstructor)").count(), 1);
        assert!(!out.contains("testRecompute"));
        assert!(!out.contains("operator"));
    }

    #[test]
    fn test_fixture_layout() {
        let out = render("struct Counter { void bump(); };\n").unwrap();
        assert_eq!(
            out,
            "#include <cppunit/extensions/HelperMacros.h>\n#include \"geometry.h\"\n\n\
             class CounterTest : public CppUnit::TestFixture\n{\n\
             \x20   CPPUNIT_TEST_SUITE(CounterTest);\n\
             \x20   CPPUNIT_TEST(testBump);\n\
             \x20   CPPUNIT_TEST_SUITE_END();\n\n\
             public:\n\
             \x20   void setUp();\n\
             \x20   void tearDown();\n\n\
             \x20   void testBump();\n\
             };\n\n\
             CPPUNIT_TEST_SUITE_REGISTRATION(CounterTest);\n\n\
             void CounterTest::setUp()\n{\n}\n\n\
             void CounterTest::tearDown()\n{\n}\n\n\
             void CounterTest::testBump()\n{\n    CPPUNIT_FAIL(\"not implemented\");\n}\n\n"
        );
    }

    #[test]
    fn test_private_nested_class_gets_no_fixture() {
        let out = render("class Outer {\n    struct Hidden { void f(); };\npublic:\n    void g();\n};\n").unwrap();
        assert!(!out.contains("HiddenTest"));
        assert!(out.contains("CPPUNIT_TEST(testG);"));
        assert!(!out.contains("testF"));
    }

    #[test]
    fn test_free_functions_get_header_fixture() {
        let out = render("double distance(const Point& a, const Point& b);\n").unwrap();
        assert!(out.contains("class GeometryTest : public CppUnit::TestFixture"));
        assert!(out.contains("    void testDistance();\n"));
    }

    #[test]
    fn test_mismatched_class_end_is_reported() {
        let mut scaffold = UnitTestScaffold::new(Path::new("geometry.h"));
        let scopes = fgen_parser_api::ScopeStack::new();
        let state = ParseState::new(&scopes, 1);
        scaffold.on_class_start(&state, "A");
        scaffold.on_class_end(&state, "B");
        assert_eq!(
            scaffold.finish(),
            Err(GenerateError::ClassMismatch {
                expected: "A".to_string(),
                found: "B".to_string()
            })
        );
    }
}
