//! Zig binding generator.
//!
//! Each native becomes a `pub fn` that forwards to a user-supplied invoker:
//!
//! ```zig
//! pub const Entity = struct {
//!     /// Gets the current coordinates for a specified entity.
//!     pub fn getEntityCoords(entity: types.Entity, alive: windows.BOOL) types.Vector3 { return invoker.invoke(types.Vector3, 0x3FEF770D40960D5A, .{entity, alive}); } // 0x3FEF770D40960D5A 0x1647F1CB b323
//! };
//! ```

pub mod idents;
pub mod types;

use serde::{Deserialize, Serialize};

use crate::codegen::line_writer::{LineWriter, WriterSettings};
use crate::codegen::{CodeGenerator, CodegenError, GenerationContext};
use crate::core::native::NativeDescriptor;

const DOC_COMMENT: &str = "///";
const LINE_COMMENT: &str = "//";

const OPENING: &str = "{";
const CLOSING: &str = "}";
const CONTAINER_CLOSING: &str = "};";

/// Marker appended to doc lines that continue on the next line.
const CONTINUATION: &str = " \\";

/// Default import block placed after the header.
pub const DEFAULT_INCLUDES: &str =
    "const invoker = @import(\"invoker.zig\");\nconst types = @import(\"types.zig\");";

/// Options controlling Zig output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZigSettings {
    /// Emit native documentation as doc comments
    pub generate_comments: bool,

    /// Emit a link to each native's documentation page
    pub include_links: bool,

    /// Use host integer types instead of symbolic handle types
    pub use_native_types: bool,

    /// Rename functions to camelCase, parameters to snake_case and namespaces to TitleCase
    pub enforce_naming: bool,

    /// Put each function body on the signature line
    pub one_line_functions: bool,

    /// Import block placed after the header
    pub includes: String,

    /// Name of the invoker function
    pub invoke_function: String,
}

impl Default for ZigSettings {
    fn default() -> Self {
        ZigSettings {
            generate_comments: true,
            include_links: false,
            use_native_types: false,
            enforce_naming: true,
            one_line_functions: true,
            includes: DEFAULT_INCLUDES.to_string(),
            invoke_function: "invoke".to_string(),
        }
    }
}

/// Generates Zig bindings.
#[derive(Debug)]
pub struct ZigGenerator {
    settings: ZigSettings,
    context: GenerationContext,
    writer: LineWriter,
}

impl ZigGenerator {
    pub fn new(settings: ZigSettings, writer: WriterSettings, context: GenerationContext) -> Self {
        ZigGenerator {
            settings,
            context,
            writer: LineWriter::new(writer),
        }
    }

    /// Prepare a native's documentation for `///` comments.
    ///
    /// Tabs become the configured indentation. A line followed by another
    /// non-blank line gets a continuation marker unless it is indented.
    fn format_docs(&self, comment: &str) -> String {
        let comment = comment.replace('\t', &self.writer.settings().indentation);
        let mut lines: Vec<String> = comment
            .split('\n')
            .map(|l| l.trim_end_matches('\r').to_string())
            .collect();

        for i in 1..lines.len() {
            let prev = &lines[i - 1];
            if !lines[i].trim().is_empty() && !prev.trim().is_empty() && !prev.starts_with("  ") {
                lines[i - 1].push_str(CONTINUATION);
            }
        }

        lines.join("\n")
    }

    fn write_docs(&mut self, native: &NativeDescriptor) {
        let has_comment = !native.comment.trim().is_empty();

        if self.settings.generate_comments && has_comment {
            let docs = self.format_docs(&native.comment);
            self.writer.write_comment(&docs, DOC_COMMENT);
        }

        if self.settings.include_links {
            if self.settings.generate_comments && has_comment {
                self.writer.write_comment("", DOC_COMMENT);
            }
            let link = self.context.native_link(&native.hash);
            self.writer.write_comment(&link, DOC_COMMENT);
        }
    }
}

impl CodeGenerator for ZigGenerator {
    fn start(&mut self) {
        let w = &mut self.writer;

        w.write_comment(
            &format!("Generated on {}", self.context.timestamp()),
            LINE_COMMENT,
        );
        w.write_comment(&self.context.origin, LINE_COMMENT);
        w.write_blank_line();
        w.write_comment("Expected invoker signature:", LINE_COMMENT);
        w.write_comment(
            "`pub inline fn invoke(comptime R: type, hash: u64, args: anytype) R { ... }`",
            LINE_COMMENT,
        );
        w.write_blank_line();
        w.write_line("const windows = @import(\"std\").os.windows;");
        w.write_blank_line();
        if !self.settings.includes.trim().is_empty() {
            w.write_line(&self.settings.includes);
            w.write_blank_line();
        }
        // Keep the generated column layout away from the formatter.
        w.write_line("// zig fmt: off");
        w.write_blank_line();
    }

    fn end(&mut self) {
        self.writer.write_line("// zig fmt: on");
        self.writer.write_blank_line();
    }

    fn push_namespace(&mut self, name: &str) {
        let name = idents::namespace_name(name, self.settings.enforce_naming);

        self.writer.write_line(&format!("pub const {} = struct", name));
        self.writer.push_branch(OPENING, false);
    }

    fn pop_namespace(&mut self) -> Result<(), CodegenError> {
        self.writer.pop_branch(CONTAINER_CLOSING)?;
        self.writer.write_blank_line();
        Ok(())
    }

    fn add_native(&mut self, native: &NativeDescriptor) -> Result<(), CodegenError> {
        native.validate()?;

        let enforce = self.settings.enforce_naming;
        let native_types = self.settings.use_native_types;

        let name = idents::native_name(&native.name, enforce);
        let params = native
            .params
            .iter()
            .map(|p| {
                format!(
                    "{}: {}",
                    idents::param_name(&p.name, enforce),
                    types::format_type(&p.ty, native_types)
                )
            })
            .collect::<Vec<_>>()
            .join(", ");
        let args = native
            .params
            .iter()
            .map(|p| types::format_invoke_param(p, enforce))
            .collect::<Vec<_>>()
            .join(", ");
        let return_type = types::format_type(&native.return_type, native_types);
        let return_kw = if return_type == "void" { "" } else { "return " };

        let mut metadata = vec![native.hash.as_str(), native.jhash.as_str()];
        let build = native.build.as_ref().map(|b| format!("b{}", b));
        if let Some(build) = &build {
            metadata.push(build);
        }
        let metadata = metadata
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        self.write_docs(native);

        self.writer
            .write_line(&format!("pub fn {}({}) {}", name, params, return_type));
        self.writer
            .push_branch(OPENING, self.settings.one_line_functions);
        self.writer.write_line(&format!(
            "{}invoker.{}({}, {}, .{{{}}});",
            return_kw, self.settings.invoke_function, return_type, native.hash, args
        ));
        self.writer
            .pop_branch_with_comment(CLOSING, &metadata, LINE_COMMENT)
    }

    fn finish(self) -> Result<String, CodegenError> {
        self.writer.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::native::{DescriptorError, NativeParam, TypeSpec};
    use crate::test_support::{get_entity_coords, set_waypoint, test_context};

    fn generator(settings: ZigSettings) -> ZigGenerator {
        ZigGenerator::new(settings, WriterSettings::default(), test_context())
    }

    fn render(settings: ZigSettings, native: &NativeDescriptor) -> String {
        let mut gen = generator(settings);
        gen.add_native(native).unwrap();
        gen.finish().unwrap()
    }

    // =========================================================================
    // Header and footer
    // =========================================================================

    #[test]
    fn test_start_and_end() {
        let mut gen = generator(ZigSettings::default());
        gen.start();
        gen.end();
        let out = gen.finish().unwrap();

        let expected = "\
// Generated on 2024-01-02 03:04:05 UTC
// https://nativedb.example

// Expected invoker signature:
// `pub inline fn invoke(comptime R: type, hash: u64, args: anytype) R { ... }`

const windows = @import(\"std\").os.windows;

const invoker = @import(\"invoker.zig\");
const types = @import(\"types.zig\");

// zig fmt: off

// zig fmt: on

";
        assert_eq!(out, expected);
    }

    #[test]
    fn test_start_custom_includes() {
        let settings = ZigSettings {
            includes: "const natives = @import(\"natives\");".to_string(),
            ..Default::default()
        };
        let mut gen = generator(settings);
        gen.start();
        let out = gen.finish().unwrap();
        assert!(out.contains("const natives = @import(\"natives\");\n\n// zig fmt: off"));
        assert!(!out.contains("invoker.zig"));
    }

    // =========================================================================
    // Natives
    // =========================================================================

    #[test]
    fn test_get_entity_coords_default_settings() {
        let out = render(ZigSettings::default(), &get_entity_coords());
        assert_eq!(
            out,
            "/// Gets coords\n\
             pub fn getEntityCoords(entity: types.Entity) types.Vector3 { \
             return invoker.invoke(types.Vector3, 0x123, .{entity}); } // 0x123\n"
        );
    }

    #[test]
    fn test_void_native_with_vector_param() {
        let out = render(ZigSettings::default(), &set_waypoint());
        assert_eq!(
            out,
            "pub fn setNewWaypoint(coords: types.Vector2, blip_id: c_int) void { \
             invoker.invoke(void, 0xFE43368D2AA4F2FC, .{coords.x, coords.y, blip_id}); } \
             // 0xFE43368D2AA4F2FC 0x8444E1F0 b323\n"
        );
    }

    #[test]
    fn test_multi_line_function() {
        let settings = ZigSettings {
            one_line_functions: false,
            generate_comments: false,
            ..Default::default()
        };
        let out = render(settings, &set_waypoint());
        assert_eq!(
            out,
            "pub fn setNewWaypoint(coords: types.Vector2, blip_id: c_int) void {\n    \
             invoker.invoke(void, 0xFE43368D2AA4F2FC, .{coords.x, coords.y, blip_id});\n\
             } // 0xFE43368D2AA4F2FC 0x8444E1F0 b323\n"
        );
    }

    #[test]
    fn test_naming_not_enforced() {
        let settings = ZigSettings {
            enforce_naming: false,
            ..Default::default()
        };
        let out = render(settings, &set_waypoint());
        assert!(out.starts_with("pub fn SET_NEW_WAYPOINT(coords: types.Vector2, blipId: c_int) void"));
        assert!(out.contains(".{coords.x, coords.y, blipId}"));
    }

    #[test]
    fn test_native_types() {
        let settings = ZigSettings {
            use_native_types: true,
            ..Default::default()
        };
        let out = render(settings, &get_entity_coords());
        assert!(out.contains("pub fn getEntityCoords(entity: c_int) types.Vector3"));
    }

    #[test]
    fn test_pointer_params() {
        let native = NativeDescriptor::new("GET_GROUND_Z_FOR_3D_COORD", "0xC906A7DAB05C8D2B", TypeSpec::new("BOOL"))
            .with_param(NativeParam::new("x", TypeSpec::new("float")))
            .with_param(NativeParam::new("groundZ", TypeSpec::new("float").pointer()))
            .with_param(NativeParam::new("name", TypeSpec::new("char").pointer().constant()))
            .with_param(NativeParam::new("out", TypeSpec::new("Vector3").pointer()));
        let out = render(ZigSettings::default(), &native);
        assert!(out.contains(
            "pub fn getGroundZFor3dCoord(x: f32, ground_z: [*c]f32, name: [*c]const u8, out: [*c]types.Vector3) windows.BOOL"
        ));
        assert!(out.contains(
            "return invoker.invoke(windows.BOOL, 0xC906A7DAB05C8D2B, .{x, ground_z, name, out});"
        ));
    }

    #[test]
    fn test_hex_named_native() {
        let native = NativeDescriptor::new("_0x9A0B5A83", "0x9A0B5A83", TypeSpec::new("void"));
        let out = render(ZigSettings::default(), &native);
        assert!(out.starts_with("pub fn @\"0x9A0B5A83\"() void { invoker.invoke(void, 0x9A0B5A83, .{}); }"));
    }

    #[test]
    fn test_custom_invoke_function() {
        let settings = ZigSettings {
            invoke_function: "call".to_string(),
            ..Default::default()
        };
        let out = render(settings, &get_entity_coords());
        assert!(out.contains("return invoker.call(types.Vector3, 0x123, .{entity});"));
    }

    #[test]
    fn test_invalid_native_rejected() {
        let mut gen = generator(ZigSettings::default());
        let native = NativeDescriptor::new("", "0x1", TypeSpec::new("void"));
        assert_eq!(
            gen.add_native(&native),
            Err(CodegenError::InvalidNative(DescriptorError::EmptyName {
                hash: "0x1".to_string()
            }))
        );
    }

    // =========================================================================
    // Documentation
    // =========================================================================

    #[test]
    fn test_docs_continuation_markers() {
        let native = get_entity_coords().with_comment(
            "First line\nsecond line\n\nNew paragraph\n  indented\n  more indented\nafter",
        );
        let out = render(ZigSettings::default(), &native);
        let expected_docs = "\
/// First line \\
/// second line
///
/// New paragraph \\
///   indented
///   more indented
/// after
";
        assert!(out.starts_with(expected_docs), "got:\n{out}");
    }

    #[test]
    fn test_docs_tabs_replaced() {
        let native = get_entity_coords().with_comment("Params:\n\tentity");
        let mut gen = ZigGenerator::new(
            ZigSettings::default(),
            WriterSettings {
                indentation: "  ".to_string(),
                ..Default::default()
            },
            test_context(),
        );
        gen.add_native(&native).unwrap();
        let out = gen.finish().unwrap();
        assert!(out.starts_with("/// Params: \\\n///   entity\n"), "got:\n{out}");
    }

    #[test]
    fn test_comments_disabled() {
        let settings = ZigSettings {
            generate_comments: false,
            ..Default::default()
        };
        let out = render(settings, &get_entity_coords());
        assert!(out.starts_with("pub fn getEntityCoords"));
    }

    #[test]
    fn test_links_with_comment() {
        let settings = ZigSettings {
            include_links: true,
            ..Default::default()
        };
        let out = render(settings, &get_entity_coords());
        assert!(out.starts_with(
            "/// Gets coords\n///\n/// https://nativedb.example/natives/0x123\npub fn"
        ));
    }

    #[test]
    fn test_links_without_comment() {
        let settings = ZigSettings {
            include_links: true,
            ..Default::default()
        };
        let out = render(settings, &set_waypoint());
        assert!(out.starts_with("/// https://nativedb.example/natives/0xFE43368D2AA4F2FC\npub fn"));
    }

    #[test]
    fn test_links_only() {
        let settings = ZigSettings {
            include_links: true,
            generate_comments: false,
            ..Default::default()
        };
        let out = render(settings, &get_entity_coords());
        assert!(out.starts_with("/// https://nativedb.example/natives/0x123\npub fn"));
    }

    // =========================================================================
    // Namespaces
    // =========================================================================

    #[test]
    fn test_empty_namespace_round_trip() {
        let mut gen = generator(ZigSettings::default());
        gen.push_namespace("NATIVE");
        gen.pop_namespace().unwrap();
        gen.add_native(&get_entity_coords()).unwrap();
        let out = gen.finish().unwrap();

        let mut lines = out.lines();
        assert_eq!(lines.next(), Some("pub const Native = struct {"));
        assert_eq!(lines.next(), Some("};"));
        assert_eq!(lines.next(), Some(""));
        assert_eq!(lines.next(), Some("/// Gets coords"));
        let function = lines.next().unwrap();
        assert!(function.contains("{ return invoker.invoke("));
        assert!(function.contains(".{entity}); } // 0x123"));
        assert!(!function.contains("};"));
    }

    #[test]
    fn test_namespace_contents_indented() {
        let mut gen = generator(ZigSettings::default());
        gen.push_namespace("entity");
        gen.add_native(&get_entity_coords()).unwrap();
        gen.pop_namespace().unwrap();
        let out = gen.finish().unwrap();

        assert_eq!(
            out,
            "pub const Entity = struct {\n    \
             /// Gets coords\n    \
             pub fn getEntityCoords(entity: types.Entity) types.Vector3 { \
             return invoker.invoke(types.Vector3, 0x123, .{entity}); } // 0x123\n\
             };\n\n"
        );
    }

    #[test]
    fn test_pop_namespace_without_push() {
        let mut gen = generator(ZigSettings::default());
        assert_eq!(gen.pop_namespace(), Err(CodegenError::UnbalancedBranch));
    }
}
