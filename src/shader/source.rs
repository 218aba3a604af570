use std::fs;
use std::path::Path;

use super::ShaderError;

/// Line token that starts a new section in a combined shader file.
pub const SECTION_MARKER: &str = "#shader";

/// Vertex and fragment GLSL sources split out of one combined file.
///
/// The file format interleaves both stages under `#shader` markers:
///
/// ```text
/// #shader vertex
/// <vertex GLSL lines>
/// #shader fragment
/// <fragment GLSL lines>
/// ```
///
/// Sections may appear in any order and repeat; content accumulates
/// across repeated markers of the same kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderSourcePair {
    pub vertex: String,
    pub fragment: String,
}

/// Section the scanner is currently routing content lines into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Undefined,
    Vertex,
    Fragment,
}

/// Reads a combined shader file and splits it into per-stage sources.
pub fn load_shader_file(path: impl AsRef<Path>) -> Result<ShaderSourcePair, ShaderError> {
    let text = fs::read_to_string(path)?;
    split_source(&text)
}

/// Splits combined shader text into vertex and fragment sources.
///
/// A line containing [`SECTION_MARKER`] selects the active section via a
/// case-sensitive substring match on `vertex` / `fragment`; a marker with
/// an unrecognized kind leaves the active section unchanged. Every other
/// line is appended verbatim plus a newline to the active section.
/// A content line seen before any section has been selected is an error.
pub fn split_source(input: &str) -> Result<ShaderSourcePair, ShaderError> {
    let mut section = Section::Undefined;
    let mut vertex = String::new();
    let mut fragment = String::new();

    for line in input.lines() {
        if line.contains(SECTION_MARKER) {
            if line.contains("vertex") {
                section = Section::Vertex;
            } else if line.contains("fragment") {
                section = Section::Fragment;
            }
            // Unrecognized kinds keep the previous section active.
        } else {
            let target = match section {
                Section::Vertex => &mut vertex,
                Section::Fragment => &mut fragment,
                Section::Undefined => {
                    return Err(ShaderError::Parse(format!(
                        "content line before any recognized section marker: {:?}",
                        line
                    )));
                }
            };
            target.push_str(line);
            target.push('\n');
        }
    }

    Ok(ShaderSourcePair { vertex, fragment })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_basic_two_section_split() {
        let pair = split_source("#shader vertex\nA\n#shader fragment\nB\n").unwrap();
        assert_eq!(pair.vertex, "A\n");
        assert_eq!(pair.fragment, "B\n");
    }

    #[test]
    fn test_sections_in_reverse_order() {
        let pair = split_source("#shader fragment\nB\n#shader vertex\nA\n").unwrap();
        assert_eq!(pair.vertex, "A\n");
        assert_eq!(pair.fragment, "B\n");
    }

    #[test]
    fn test_repeated_sections_accumulate() {
        let input = "#shader vertex\nA\n#shader fragment\nB\n#shader vertex\nC\n";
        let pair = split_source(input).unwrap();
        assert_eq!(pair.vertex, "A\nC\n");
        assert_eq!(pair.fragment, "B\n");
    }

    #[test]
    fn test_empty_input() {
        let pair = split_source("").unwrap();
        assert_eq!(pair.vertex, "");
        assert_eq!(pair.fragment, "");
    }

    #[test]
    fn test_marker_only_input() {
        let pair = split_source("#shader vertex\n#shader fragment\n").unwrap();
        assert_eq!(pair.vertex, "");
        assert_eq!(pair.fragment, "");
    }

    #[test]
    fn test_unrecognized_kind_keeps_active_section() {
        let input = "#shader vertex\nA\n#shader geometry\nB\n";
        let pair = split_source(input).unwrap();
        assert_eq!(pair.vertex, "A\nB\n");
        assert_eq!(pair.fragment, "");
    }

    #[test]
    fn test_content_before_any_marker_is_an_error() {
        let err = split_source("void main() {}\n").unwrap_err();
        assert!(matches!(err, ShaderError::Parse(_)));
    }

    #[test]
    fn test_unrecognized_kind_before_content_is_an_error() {
        let err = split_source("#shader geometry\nvoid main() {}\n").unwrap_err();
        assert!(matches!(err, ShaderError::Parse(_)));
    }

    #[test]
    fn test_section_content_round_trips() {
        let vertex_body = "#version 330 core\n\nvoid main()\n{\n    gl_Position = vec4(0.0);\n}\n";
        let fragment_body = "#version 330 core\n\nvoid main()\n{\n}\n";
        let input = format!("#shader vertex\n{vertex_body}#shader fragment\n{fragment_body}");
        let pair = split_source(&input).unwrap();
        assert_eq!(pair.vertex, vertex_body);
        assert_eq!(pair.fragment, fragment_body);
    }

    #[test]
    fn test_missing_trailing_newline_still_terminates_line() {
        let pair = split_source("#shader vertex\nA").unwrap();
        assert_eq!(pair.vertex, "A\n");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "#shader vertex\nA\n#shader fragment\nB\n").unwrap();
        let pair = load_shader_file(file.path()).unwrap();
        assert_eq!(pair.vertex, "A\n");
        assert_eq!(pair.fragment, "B\n");
    }

    #[test]
    fn test_missing_file_is_a_file_error() {
        let err = load_shader_file("no/such/shader.glsl").unwrap_err();
        assert!(matches!(err, ShaderError::File(_)));
    }
}
