//! C-ABI to Zig type mapping.

use crate::codegen::zig::idents;
use crate::core::native::{NativeParam, TypeSpec};

/// Pointer marker for C-compatible pointers.
const C_POINTER: &str = "[*c]";

/// Map a C-ABI base type to its Zig spelling. Unknown types pass through.
pub fn zig_base_type(ty: &str) -> String {
    let mapped = match ty {
        // Fixed-width
        "int8_t" => "i8",
        "uint8_t" => "u8",
        "int16_t" => "i16",
        "uint16_t" => "u16",
        "int32_t" => "i32",
        "uint32_t" => "u32",
        "int64_t" => "i64",
        "uint64_t" => "u64",
        "__int128" | "signed __int128" => "i128",
        "unsigned __int128" => "u128",

        // Basic C types. Zig has no distinct char type.
        "char" | "signed char" | "unsigned char" => "u8",
        "short" | "signed short" => "c_short",
        "unsigned short" => "c_ushort",
        "int" | "signed int" => "c_int",
        "unsigned int" => "c_uint",
        "long" | "signed long" => "c_long",
        "unsigned long" => "c_ulong",
        "long long" | "signed long long" => "c_longlong",
        "unsigned long long" => "c_ulonglong",

        // Pointer-sized
        "intptr_t" => "isize",
        "uintptr_t" => "usize",

        // Floating point
        "long double" => "c_longdouble",
        "_Float16" => "f16",
        "float" => "f32",
        "double" => "f64",
        "_Float128" => "f128",

        // Windows API
        "BOOL" | "BYTE" | "WORD" | "HANDLE" | "HMODULE" | "DWORD" => {
            return format!("windows.{}", ty)
        }

        // Game handles and vectors
        "Void" | "Any" | "uint" | "Hash" | "Blip" | "Cam" | "Camera" | "CarGenerator"
        | "ColourIndex" | "CoverPoint" | "Entity" | "FireId" | "Group" | "Interior"
        | "Object" | "Ped" | "Pickup" | "Player" | "ScrHandle" | "Sphere" | "TaskSequence"
        | "Texture" | "TextureDict" | "Train" | "Vehicle" | "Weapon" | "Vector2"
        | "Vector3" | "Vector4" => return format!("types.{}", ty),

        other => other,
    };

    mapped.to_string()
}

/// Remap game handle types to host-ABI integers.
///
/// Returns `None` when the type has no native substitute or native types are off.
pub fn native_base_type(ty: &str, use_native_types: bool) -> Option<&'static str> {
    if !use_native_types {
        return None;
    }

    match ty {
        "Void" | "Any" | "uint" | "Hash" => Some("windows.DWORD"),
        "Blip" | "Cam" | "Camera" | "CarGenerator" | "ColourIndex" | "CoverPoint" | "Entity"
        | "FireId" | "Group" | "Interior" | "Object" | "Ped" | "Pickup" | "Player"
        | "ScrHandle" | "Sphere" | "TaskSequence" | "Texture" | "TextureDict" | "Train"
        | "Vehicle" | "Weapon" => Some("c_int"),
        _ => None,
    }
}

/// Format a full type: pointer markers, optional `const`, then the base type.
///
/// `const` is only emitted behind a pointer; Zig has no const value types.
pub fn format_type(ty: &TypeSpec, use_native_types: bool) -> String {
    let base = match native_base_type(&ty.base_type, use_native_types) {
        Some(native) => native.to_string(),
        None => zig_base_type(&ty.base_type),
    };

    let pointers = C_POINTER.repeat(ty.pointers);
    if ty.is_const && ty.is_pointer() {
        format!("{}const {}", pointers, base)
    } else {
        format!("{}{}", pointers, base)
    }
}

/// Format a parameter as passed to the invoker.
///
/// Vectors passed by value are spread into their components.
pub fn format_invoke_param(param: &NativeParam, enforce_naming: bool) -> String {
    let name = idents::param_name(&param.name, enforce_naming);

    let fields: &[&str] = match (param.ty.is_pointer(), param.ty.base_type.as_str()) {
        (false, "Vector2") => &["x", "y"],
        (false, "Vector3") => &["x", "y", "z"],
        (false, "Vector4") => &["x", "y", "z", "w"],
        _ => return name,
    };

    fields
        .iter()
        .map(|field| format!("{}.{}", name, field))
        .collect::<Vec<_>>()
        .join(", ")
}
