#![allow(non_snake_case)]

use super::*;
use crate::lexer::tokenize;
use test_case::test_case;

fn render_source(source: &str) -> String {
    render(&tokenize(source).unwrap())
}

fn shape_source(source: &str) -> TypeShape {
    shape_of(&tokenize(source).unwrap())
}

#[test_case("std :: vector < std :: string >", "std::vector<std::string>")]
#[test_case("unsigned   int", "unsigned int")]
#[test_case("char *", "char*")]
#[test_case("const char * ", "const char*")]
#[test_case("std::map<int,int>", "std::map<int, int>")]
#[test_case("std::vector<std::vector<int>>", "std::vector<std::vector<int>>")]
#[test_case("\"default\"", "\"default\"")]
#[test_case("- 1", "-1")]
#[test_case("Mode :: FAST", "Mode::FAST")]
#[test_case("{ 1 , 2 }", "{1, 2}")]
fn render___normalizes_spacing(source: &str, expected: &str) {
    assert_eq!(render_source(source), expected);
}

#[test_case("bool", ScalarKind::Bool)]
#[test_case("int", ScalarKind::Int)]
#[test_case("std::string", ScalarKind::String)]
#[test_case("std :: string", ScalarKind::String)]
#[test_case("float", ScalarKind::Float)]
#[test_case("double", ScalarKind::Double)]
fn shape_of___passthrough_scalars___are_scalar(source: &str, kind: ScalarKind) {
    assert_eq!(shape_source(source), TypeShape::Scalar(kind));
}

#[test_case("std::vector<int>", "std::vector", "int")]
#[test_case("std::vector<std::string>", "std::vector", "std::string")]
#[test_case("::std::vector<float>", "std::vector", "float")]
#[test_case("std::deque<Mode>", "std::deque", "Mode")]
#[test_case("std::list<std::pair<int, int>>", "std::list", "std::pair<int, int>")]
#[test_case("std::vector<std::vector<int>>", "std::vector", "std::vector<int>")]
fn shape_of___sequence_containers___report_element(source: &str, container: &str, element: &str) {
    assert_eq!(
        shape_source(source),
        TypeShape::Sequence {
            container: container.to_string(),
            element: element.to_string(),
        }
    );
}

#[test_case("SensorDataType")]
#[test_case("SHI::MeasurementDataState")]
#[test_case("uint8_t")]
#[test_case("unsigned int")]
#[test_case("string")]
#[test_case("vector<int>")]
#[test_case("std::vector<int, MyAllocator>")]
#[test_case("std::map<std::string, int>")]
#[test_case("std::vector<int>*")]
#[test_case("std::array<int, 3>")]
fn shape_of___other_types___are_named(source: &str) {
    assert_eq!(shape_source(source), TypeShape::Named);
}
