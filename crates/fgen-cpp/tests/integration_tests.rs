//! Integration tests for the C++ header parser

use fgen_cpp::{extract, extract_file, preprocess, CppHeaderParser, ImplementationSkeleton};
use fgen_parser_api::{
    AccessLevel, ClassKey, DeclSpecifier, EnumDecl, FunctionKind, FunctionSignature,
    HeaderListener, MacroDef, ParseState, Parameter, ParserConfig, ParserError, TemplateParams,
};
use std::path::Path;

const SAMPLE_H: &str = include_str!("fixtures/sample.h");

/// Records structural events as short strings
#[derive(Default)]
struct RecordingListener {
    events: Vec<String>,
    ctor_in_template: Vec<bool>,
}

impl HeaderListener for RecordingListener {
    fn on_pre_parse(&mut self, _state: &ParseState<'_>) {
        self.events.push("pre_parse".to_string());
    }

    fn on_post_parse(&mut self, _state: &ParseState<'_>) {
        self.events.push("post_parse".to_string());
    }

    fn on_macro(&mut self, _state: &ParseState<'_>, macro_def: &MacroDef) {
        self.events
            .push(format!("macro {}={}", macro_def.name, macro_def.value));
    }

    fn on_namespace(&mut self, _state: &ParseState<'_>, name: &str) {
        self.events.push(format!("namespace {name}"));
    }

    fn on_namespace_start(&mut self, _state: &ParseState<'_>, name: &str) {
        self.events.push(format!("namespace_start {name}"));
    }

    fn on_namespace_end(&mut self, _state: &ParseState<'_>, name: &str) {
        self.events.push(format!("namespace_end {name}"));
    }

    fn on_class(
        &mut self,
        _state: &ParseState<'_>,
        _template: Option<&TemplateParams>,
        key: ClassKey,
        name: &str,
    ) {
        self.events.push(format!("{key} {name}"));
    }

    fn on_class_start(&mut self, _state: &ParseState<'_>, name: &str) {
        self.events.push(format!("class_start {name}"));
    }

    fn on_class_end(&mut self, _state: &ParseState<'_>, name: &str) {
        self.events.push(format!("class_end {name}"));
    }

    fn on_enum(&mut self, _state: &ParseState<'_>, decl: &EnumDecl) {
        self.events.push(format!(
            "enum {} [{}]",
            decl.name.as_deref().unwrap_or(""),
            decl.members.join(",")
        ));
    }

    fn on_function_decl(&mut self, _state: &ParseState<'_>, function: &FunctionSignature) {
        self.events.push(format!("function_decl {}", function.name));
    }

    fn on_function_def(&mut self, _state: &ParseState<'_>, function: &FunctionSignature) {
        self.events.push(format!("function_def {}", function.name));
    }

    fn on_ctor_decl(&mut self, state: &ParseState<'_>, name: &str, _params: &[Parameter]) {
        self.ctor_in_template.push(state.is_inside_template_class());
        self.events.push(format!("ctor_decl {name}"));
    }

    fn on_ctor_def(&mut self, state: &ParseState<'_>, name: &str, _params: &[Parameter]) {
        self.ctor_in_template.push(state.is_inside_template_class());
        self.events.push(format!("ctor_def {name}"));
    }

    fn on_dtor_decl(&mut self, _state: &ParseState<'_>, name: &str) {
        self.events.push(format!("dtor_decl {name}"));
    }

    fn on_dtor_def(&mut self, _state: &ParseState<'_>, name: &str) {
        self.events.push(format!("dtor_def {name}"));
    }
}

fn record(source: &str) -> RecordingListener {
    let mut recorder = RecordingListener::default();
    let mut parser = CppHeaderParser::with_config(ParserConfig::quiet());
    parser.add_listener(&mut recorder);
    parser.parse_source(source).unwrap();
    drop(parser);
    recorder
}

fn line_of(needle: &str) -> usize {
    SAMPLE_H
        .lines()
        .position(|line| line.contains(needle))
        .map(|idx| idx + 1)
        .unwrap()
}

#[test]
fn test_namespace_class_function_sequence() {
    let recorder = record("namespace N { class C { public: void f(); }; }");
    assert_eq!(
        recorder.events,
        vec![
            "pre_parse",
            "namespace N",
            "namespace_start N",
            "class C",
            "class_start C",
            "function_decl f",
            "class_end C",
            "namespace_end N",
            "post_parse",
        ]
    );
}

#[test]
fn test_enum_members() {
    let recorder = record("enum Color { RED, GREEN, BLUE };");
    assert_eq!(recorder.events[1], "enum Color [RED,GREEN,BLUE]");
}

#[test]
fn test_macro_continuation_is_joined() {
    let recorder = record("#define MAX(a, b) \\\n    ((a) > (b) ? (a) : (b))\nint f();");
    assert_eq!(
        recorder.events[1..],
        ["macro MAX=(a, b) ((a) > (b) ? (a) : (b))", "function_decl f", "post_parse"]
    );
}

#[test]
fn test_constructor_inside_template_class() {
    let recorder = record("template <typename T> class Box { Box(); };");
    assert_eq!(
        recorder.events[1..],
        ["class Box", "class_start Box", "ctor_decl Box", "class_end Box", "post_parse"]
    );
    assert_eq!(recorder.ctor_in_template, vec![true]);
}

#[test]
fn test_struct_and_class_default_access() {
    let ir = extract(
        "struct S { void open(); };\nclass C { void hidden(); public: void shown(); };\n",
        &ParserConfig::quiet(),
    )
    .unwrap();
    assert_eq!(ir.function("S::open").unwrap().access, Some(AccessLevel::Public));
    assert_eq!(ir.function("C::hidden").unwrap().access, Some(AccessLevel::Private));
    assert_eq!(ir.function("C::shown").unwrap().access, Some(AccessLevel::Public));
}

#[test]
fn test_declaration_and_definition_split_across_lines() {
    let recorder = record("class A\n{\npublic:\n    A()\n    {\n    }\n    ~A();\n    int get() const\n    {\n        return 1;\n    }\n};\n");
    assert_eq!(
        recorder.events[1..],
        [
            "class A",
            "class_start A",
            "ctor_def A",
            "dtor_decl ~A",
            "function_def get",
            "class_end A",
            "post_parse"
        ]
    );
}

#[test]
fn test_nested_blocks_in_function_body_emit_nothing() {
    let mut recorder = RecordingListener::default();
    let mut parser = CppHeaderParser::with_config(ParserConfig::quiet());
    parser.add_listener(&mut recorder);
    let summary = parser
        .parse_source("class A { public: void f() { if (x) { void g(); } } void h(); };")
        .unwrap();
    drop(parser);

    assert_eq!(
        recorder.events[1..],
        [
            "class A",
            "class_start A",
            "function_def f",
            "function_decl h",
            "class_end A",
            "post_parse"
        ]
    );
    assert_eq!(summary.unclosed_scopes, 0);
}

#[test]
fn test_extern_c_block_is_transparent() {
    let source = "#ifdef __cplusplus\nextern \"C\" {\n#endif\nvoid init(int flags);\nextern \"C\" int version();\n#ifdef __cplusplus\n}\n#endif\n";
    let mut parser = CppHeaderParser::with_config(ParserConfig::quiet());
    let summary = parser.parse_source(source).unwrap();
    assert_eq!(summary.unclosed_scopes, 0);

    let ir = extract(source, &ParserConfig::quiet()).unwrap();
    let names: Vec<&str> = ir.functions.iter().map(|f| f.signature.name.as_str()).collect();
    assert_eq!(names, ["init", "version"]);
    assert!(ir.functions[0].scope_path.is_empty());
}

#[test]
fn test_sample_header() {
    let ir = extract(SAMPLE_H, &ParserConfig::quiet()).unwrap();

    let macros: Vec<&str> = ir.macros.iter().map(|m| m.def.name.as_str()).collect();
    assert_eq!(macros, ["SAMPLE_H", "SAMPLE_VERSION", "SAMPLE_CHECK"]);
    assert_eq!(
        ir.macros[2].def.value,
        "(expr) do { if (!(expr)) abort(); } while (0)"
    );

    assert_eq!(ir.namespaces.len(), 1);
    assert_eq!(ir.enums[0].decl.members, ["Read", "Write", "Append"]);
    assert_eq!(ir.enums[0].line, line_of("enum Mode"));

    let classes: Vec<&str> = ir.classes.iter().map(|c| c.qualified_name.as_str()).collect();
    assert_eq!(classes, ["sample::Shape", "sample::Point", "sample::Buffer"]);
    assert_eq!(ir.classes[0].line, line_of("class Shape"));
    assert!(ir.classes[1].is_struct());
    assert!(ir.classes[2].is_template());

    assert_eq!(ir.functions.len(), 13);
    assert_eq!(ir.definitions().count(), 2);
    assert_eq!(ir.functions_of_kind(FunctionKind::Constructor).count(), 3);
    assert_eq!(ir.functions_of_kind(FunctionKind::Destructor).count(), 1);

    let area = ir.function("sample::Shape::area").unwrap();
    assert_eq!(area.signature.specifier, Some(DeclSpecifier::PureVirtual));
    assert!(area.signature.is_virtual);

    let rename = ir.function("sample::Shape::rename").unwrap();
    assert_eq!(rename.access, Some(AccessLevel::Protected));

    let create = ir.function("sample::Shape::create").unwrap();
    assert!(create.signature.is_static);
    assert_eq!(create.signature.params.len(), 2);

    assert!(ir.function("sample::Shape::operator==").is_some());
    assert!(ir.function("sample::Buffer::push").unwrap().in_template_class);

    let clamp = ir.function("sample::clamp").unwrap();
    assert_eq!(clamp.access, None);
    assert_eq!(clamp.line, line_of("int clamp"));
}

#[test]
fn test_scope_stack_is_empty_after_balanced_input() {
    let mut parser = CppHeaderParser::with_config(ParserConfig::quiet());
    let summary = parser.parse_source(SAMPLE_H).unwrap();
    assert_eq!(summary.unclosed_scopes, 0);
    assert_eq!(summary.line_count, SAMPLE_H.lines().count());
    assert_eq!(parser.metrics().files_parsed, 1);
}

#[test]
fn test_unclosed_scope_is_reported_not_fatal() {
    let mut parser = CppHeaderParser::with_config(ParserConfig::quiet());
    let summary = parser.parse_source("namespace open {\nclass A {\n").unwrap();
    assert_eq!(summary.unclosed_scopes, 2);
}

#[test]
fn test_unbalanced_brace_aborts_without_post_parse() {
    let mut recorder = RecordingListener::default();
    let mut parser = CppHeaderParser::with_config(ParserConfig::quiet());
    parser.add_listener(&mut recorder);
    let err = parser.parse_source("class A { };\n}\n").unwrap_err();
    drop(parser);

    assert!(matches!(err, ParserError::UnbalancedBrace { line: 2 }));
    assert_eq!(recorder.events.first().map(String::as_str), Some("pre_parse"));
    assert!(!recorder.events.iter().any(|e| e == "post_parse"));
}

#[derive(Default)]
struct LineHooks(Vec<String>);

impl HeaderListener for LineHooks {
    fn on_pre_line(&mut self, state: &ParseState<'_>, line: &str) {
        self.0.push(format!("pre {} {line}", state.current_line_number()));
    }

    fn on_post_line(&mut self, state: &ParseState<'_>, line: &str) {
        self.0.push(format!("post {} {line}", state.current_line_number()));
    }

    fn on_function_decl(&mut self, state: &ParseState<'_>, function: &FunctionSignature) {
        self.0
            .push(format!("decl {} {}", state.current_line_number(), function.name));
    }
}

#[test]
fn test_line_hooks_bracket_every_fragment() {
    let mut hooks = LineHooks::default();
    let mut parser = CppHeaderParser::with_config(ParserConfig::quiet());
    parser.add_listener(&mut hooks);
    parser.parse_source("void a(); void b();\n\nvoid c();\n").unwrap();
    drop(parser);

    assert_eq!(
        hooks.0,
        [
            "pre 1 void a(); void b();",
            "decl 1 a",
            "decl 1 b",
            "post 1 void a(); void b();",
            "pre 3 void c();",
            "decl 3 c",
            "post 3 void c();",
        ]
    );
}

#[test]
fn test_listeners_run_in_registration_order() {
    let mut first = RecordingListener::default();
    let mut second = RecordingListener::default();
    let mut parser = CppHeaderParser::with_config(ParserConfig::quiet());
    parser.add_listener(&mut first);
    let id = parser.add_listener(&mut second);
    assert!(parser.remove_listener(id).is_some());
    parser.parse_source("void f();").unwrap();
    drop(parser);

    assert_eq!(first.events.len(), 3);
    assert!(second.events.is_empty());
}

#[test]
fn test_preprocess_is_idempotent() {
    let once = preprocess(SAMPLE_H);
    let text: String = once.iter().map(|line| format!("{}\n", line.text)).collect();
    let twice = preprocess(&text);

    let once_text: Vec<&str> = once.iter().map(|line| line.text.as_str()).collect();
    let twice_text: Vec<&str> = twice.iter().map(|line| line.text.as_str()).collect();
    assert_eq!(once_text, twice_text);
    assert!(once_text.iter().all(|line| !line.contains("//") && !line.contains("/*")));
}

#[test]
fn test_parse_file_and_extract_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sample.h");
    std::fs::write(&path, SAMPLE_H).unwrap();

    let mut parser = CppHeaderParser::with_config(ParserConfig::quiet());
    assert!(parser.can_parse(&path));
    let summary = parser.parse_file(&path).unwrap();
    assert_eq!(summary.unclosed_scopes, 0);

    let ir = extract_file(&path, &ParserConfig::quiet()).unwrap();
    assert_eq!(ir.file_path.as_deref(), Some(path.as_path()));
    assert_eq!(ir.classes.len(), 3);
}

#[test]
fn test_file_too_large() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("big.h");
    std::fs::write(&path, "class A { };\n".repeat(16)).unwrap();

    let mut parser = CppHeaderParser::with_config(ParserConfig::quiet().with_max_file_size(64));
    let err = parser.parse_file(&path).unwrap_err();
    assert!(matches!(err, ParserError::FileTooLarge(_, size) if size > 64));
}

#[test]
fn test_missing_file_is_io_error() {
    let mut parser = CppHeaderParser::with_config(ParserConfig::quiet());
    let err = parser.parse_file(Path::new("does/not/exist.h")).unwrap_err();
    assert!(matches!(err, ParserError::IoError(..)));
}

#[test]
fn test_skeleton_for_sample_header() {
    let mut skeleton = ImplementationSkeleton::new(Path::new("include/sample.h"));
    let mut parser = CppHeaderParser::with_config(ParserConfig::quiet());
    parser.add_listener(&mut skeleton);
    parser.parse_source(SAMPLE_H).unwrap();
    drop(parser);
    let out = skeleton.finish();

    assert!(out.starts_with("#include \"sample.h\"\n\nnamespace sample\n{\n\n"));
    assert!(out.contains("Shape::Shape(const std::string& name)\n{\n}\n"));
    assert!(out.contains("Shape::~Shape()\n{\n}\n"));
    assert!(out.contains("Shape* Shape::create(Mode mode, int sides)\n{\n}\n"));
    assert!(out.contains("double Point::length() const\n{\n}\n"));
    assert!(out.contains("int clamp(int value, int low, int high)\n{\n}\n"));
    assert!(!out.contains("Shape::area"));
    assert!(!out.contains("Buffer::"));
    assert!(out.ends_with("}\n"));
}
