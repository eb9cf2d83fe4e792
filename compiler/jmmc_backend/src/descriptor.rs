// SPDX-License-Identifier: MIT
// Copyright (c) 2023 Kagati Foundation

use std::collections::HashMap;

use itertools::Itertools;
use jmmc_types::IrType;
use lazy_static::lazy_static;

pub const OBJECT_CLASS: &str = "java/lang/Object";

lazy_static! {
    static ref BUILTIN_DESCRIPTORS: HashMap<IrType, &'static str> = {
        let mut table = HashMap::new();
        table.insert(IrType::I32, "I");
        table.insert(IrType::Bool, "Z");
        table.insert(IrType::Void, "V");
        table.insert(IrType::String, "Ljava/lang/String;");
        table
    };
}

/// Qualifies a simple class name through the imports (`List` with
/// `java.util.List` imported becomes `java/util/List`). Unmatched names are
/// returned unchanged.
pub fn full_name(simple_name: &str, imports: &[String]) -> String {
    let suffix = format!(".{simple_name}");
    imports
        .iter()
        .find(|imp| imp.ends_with(&suffix))
        .map(|imp| imp.replace('.', "/"))
        .unwrap_or_else(|| simple_name.to_string())
}

/// Name used in `.super` and in the default constructor.
pub fn super_name(super_class: Option<&str>, imports: &[String]) -> String {
    match super_class {
        None | Some("Object") => OBJECT_CLASS.to_string(),
        Some(name) => full_name(name, imports),
    }
}

/// JVM type descriptor of an IR type.
pub fn descriptor(ty: &IrType, imports: &[String]) -> String {
    match ty {
        IrType::Array(elem) => format!("[{}", descriptor(elem, imports)),
        IrType::Class(name) => format!("L{};", full_name(name, imports)),
        builtin => BUILTIN_DESCRIPTORS
            .get(builtin)
            .map(|desc| desc.to_string())
            .unwrap_or_default(),
    }
}

/// `(ArgDescs)RetDesc`
pub fn method_descriptor<'a>(
    params: impl IntoIterator<Item = &'a IrType>,
    ret: &IrType,
    imports: &[String]
) -> String {
    let params = params
        .into_iter()
        .map(|ty| descriptor(ty, imports))
        .join("");
    format!("({params}){}", descriptor(ret, imports))
}
